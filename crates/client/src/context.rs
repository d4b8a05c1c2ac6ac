//! Explicit application state, loaded from the local store.
//!
//! | Context | Init | Teardown |
//! |---|---|---|
//! | [`SessionContext`] | persisted token, dropped if expired | `sign_out` removes the token |
//! | [`CartContext`] | persisted cart, empty if missing or unreadable | `clear` empties and persists |
//! | [`Preferences`] | persisted theme and install-prompt dismissal | none |
//!
//! Every mutation writes through to the store before returning.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use foodnova_auth::{GuardOutcome, Session, UserProfile, guard_admin, guard_customer};
use foodnova_cart::{Cart, CartKey, CartLine};

use crate::api::ApiClient;
use crate::api::auth::{LoginRequest, RegisterRequest};
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::store::{LocalStore, keys};

#[derive(Debug, Clone)]
pub struct SessionContext {
    store: LocalStore,
    session: Session,
}

impl SessionContext {
    /// Restore the persisted session. `override_token` wins and is not persisted.
    pub async fn load(store: LocalStore, override_token: Option<String>) -> ClientResult<Self> {
        let session = match override_token {
            Some(token) => Session::with_token(token),
            None => {
                let persisted: Option<String> = store.get(keys::AUTH_TOKEN).await?;
                let restored = Session::restore(persisted.clone(), Utc::now());
                if persisted.is_some() && restored.token().is_none() {
                    store.remove(keys::AUTH_TOKEN).await?;
                }
                restored
            }
        };
        Ok(Self { store, session })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub async fn sign_in(&mut self, token: String) -> ClientResult<()> {
        self.store.put(keys::AUTH_TOKEN, &token).await?;
        self.session = Session::with_token(token);
        tracing::info!(role = %self.session.role(), "signed in");
        Ok(())
    }

    pub fn set_profile(&mut self, profile: UserProfile) {
        self.session.set_profile(profile);
    }

    pub async fn sign_out(&mut self) -> ClientResult<()> {
        self.store.remove(keys::AUTH_TOKEN).await?;
        self.session = Session::anonymous();
        tracing::info!("signed out");
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CartContext {
    store: LocalStore,
    cart: Cart,
}

impl CartContext {
    pub async fn load(store: LocalStore) -> ClientResult<Self> {
        let cart = match store.get::<Cart>(keys::CART).await {
            Ok(cart) => cart.unwrap_or_default(),
            Err(err) => {
                tracing::warn!(error = %format!("{err:#}"), "stored cart unreadable, starting empty");
                Cart::new()
            }
        };
        Ok(Self { store, cart })
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub async fn add(&mut self, line: CartLine) -> ClientResult<()> {
        tracing::debug!(key = %line.key, qty = line.qty, "cart add");
        let mut next = self.cart.clone();
        next.add_item(line)?;
        self.commit(next).await
    }

    pub async fn set_quantity(&mut self, key: &CartKey, qty: u32) -> ClientResult<()> {
        let mut next = self.cart.clone();
        next.set_quantity(key, qty)?;
        self.commit(next).await
    }

    /// Returns whether a line was removed.
    pub async fn remove(&mut self, key: &CartKey) -> ClientResult<bool> {
        let mut next = self.cart.clone();
        if !next.remove_item(key) {
            return Ok(false);
        }
        self.commit(next).await?;
        Ok(true)
    }

    pub async fn clear(&mut self) -> ClientResult<()> {
        self.commit(Cart::new()).await
    }

    /// The stored cart is written first; memory only follows a successful write.
    async fn commit(&mut self, next: Cart) -> ClientResult<()> {
        self.store.put(keys::CART, &next).await?;
        self.cart = next;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl core::fmt::Display for Theme {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        })
    }
}

#[derive(Debug, Clone)]
pub struct Preferences {
    store: LocalStore,
    theme: Theme,
    install_prompt_dismissed_at: Option<DateTime<Utc>>,
}

impl Preferences {
    pub async fn load(store: LocalStore) -> ClientResult<Self> {
        let theme = store.get::<Theme>(keys::THEME).await?.unwrap_or_default();
        let install_prompt_dismissed_at = store.get::<DateTime<Utc>>(keys::INSTALL_PROMPT_DISMISSED_AT).await?;
        Ok(Self {
            store,
            theme,
            install_prompt_dismissed_at,
        })
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub async fn set_theme(&mut self, theme: Theme) -> ClientResult<()> {
        self.store.put(keys::THEME, &theme).await?;
        self.theme = theme;
        Ok(())
    }

    pub async fn toggle_theme(&mut self) -> ClientResult<Theme> {
        let next = self.theme.toggled();
        self.set_theme(next).await?;
        Ok(next)
    }

    pub fn install_prompt_dismissed_at(&self) -> Option<DateTime<Utc>> {
        self.install_prompt_dismissed_at
    }

    pub async fn dismiss_install_prompt(&mut self, at: DateTime<Utc>) -> ClientResult<()> {
        self.store.put(keys::INSTALL_PROMPT_DISMISSED_AT, &at).await?;
        self.install_prompt_dismissed_at = Some(at);
        Ok(())
    }
}

/// Everything a screen may need, passed explicitly.
#[derive(Debug, Clone)]
pub struct AppContext {
    pub api: ApiClient,
    pub session: SessionContext,
    pub cart: CartContext,
    pub prefs: Preferences,
    store: LocalStore,
}

impl AppContext {
    pub async fn init(config: &ClientConfig) -> ClientResult<Self> {
        let store = LocalStore::open(&config.store_path()).await?;
        Self::with_store(&config.api_url, store, config.token.clone()).await
    }

    pub async fn with_store(
        api_url: &str,
        store: LocalStore,
        override_token: Option<String>,
    ) -> ClientResult<Self> {
        let session = SessionContext::load(store.clone(), override_token).await?;
        let cart = CartContext::load(store.clone()).await?;
        let prefs = Preferences::load(store.clone()).await?;

        let mut api = ApiClient::new(api_url);
        api.set_token(session.session().token().map(str::to_string));

        Ok(Self {
            api,
            session,
            cart,
            prefs,
            store,
        })
    }

    /// Flush and release the local store.
    pub async fn close(self) {
        self.store.close().await;
    }

    pub async fn login(&mut self, email: &str, password: &str) -> ClientResult<UserProfile> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(ClientError::Validation("Please enter your email and password".into()));
        }

        let tokens = self
            .api
            .login(&LoginRequest {
                email: email.trim().to_string(),
                password: password.to_string(),
            })
            .await?;

        self.session.sign_in(tokens.access_token.clone()).await?;
        self.api.set_token(Some(tokens.access_token));
        self.whoami().await
    }

    pub async fn register(
        &mut self,
        email: &str,
        password: &str,
        full_name: &str,
    ) -> ClientResult<UserProfile> {
        if email.trim().is_empty() || password.is_empty() || full_name.trim().is_empty() {
            return Err(ClientError::Validation("Please fill in all fields".into()));
        }

        self.api
            .register(&RegisterRequest {
                email: email.trim().to_string(),
                password: password.to_string(),
                full_name: full_name.trim().to_string(),
            })
            .await?;
        self.login(email, password).await
    }

    /// Fetch `/auth/me` and attach it to the session.
    pub async fn whoami(&mut self) -> ClientResult<UserProfile> {
        if self.api.token().is_none() {
            return Err(ClientError::Validation("You are not signed in".into()));
        }
        let profile = self.api.me().await?;
        self.session.set_profile(profile.clone());
        Ok(profile)
    }

    pub async fn logout(&mut self) -> ClientResult<()> {
        self.session.sign_out().await?;
        self.api.set_token(None);
        Ok(())
    }

    pub fn require_customer(&self, path: &str) -> ClientResult<()> {
        guard_result(guard_customer(self.session.session(), path))
    }

    pub fn require_admin(&self, path: &str) -> ClientResult<()> {
        guard_result(guard_admin(self.session.session(), path))
    }
}

fn guard_result(outcome: GuardOutcome) -> ClientResult<()> {
    match outcome {
        GuardOutcome::Allow => Ok(()),
        GuardOutcome::RedirectToLogin { from } => Err(ClientError::Validation(format!(
            "Please sign in to continue ({from})"
        ))),
        GuardOutcome::RedirectToAdminLogin { from } => Err(ClientError::Validation(format!(
            "Admin sign-in required ({from})"
        ))),
        GuardOutcome::RedirectHome => Err(ClientError::Validation("Admin access required".into())),
    }
}

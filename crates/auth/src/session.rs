use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use foodnova_core::UserId;

use crate::claims::{decode_claims, validate_expiry};
use crate::roles::{Role, role};

/// Profile returned by `GET /auth/me` and `POST /auth/register`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub email: String,
    pub full_name: String,
    #[serde(default = "default_role")]
    pub role: Role,
}

fn default_role() -> Role {
    Role::Unknown
}

/// Client-side session: the bearer token and what the UI derives from it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Session {
    token: Option<String>,
    profile: Option<UserProfile>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            profile: None,
        }
    }

    /// Rebuild a session from a persisted token.
    ///
    /// Expired or undecodable tokens yield an anonymous session.
    pub fn restore(token: Option<String>, now: DateTime<Utc>) -> Self {
        let Some(token) = token else {
            return Self::anonymous();
        };
        match decode_claims(&token).and_then(|claims| validate_expiry(&claims, now)) {
            Ok(()) => Self::with_token(token),
            Err(err) => {
                tracing::info!(%err, "discarding persisted token");
                Self::anonymous()
            }
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    pub fn set_profile(&mut self, profile: UserProfile) {
        self.profile = Some(profile);
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some() || self.profile.is_some()
    }

    /// Role for gating: the fetched profile wins, the token claim is the fallback.
    pub fn role(&self) -> Role {
        if let Some(profile) = &self.profile {
            if profile.role != Role::Unknown {
                return profile.role;
            }
        }
        self.token.as_deref().map(role).unwrap_or(Role::Unknown)
    }

    pub fn is_admin(&self) -> bool {
        self.role().is_admin()
    }
}

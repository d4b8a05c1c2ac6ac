//! Checkout submission.

use foodnova_orders::{CheckoutForm, Order};

use super::InFlight;
use crate::api::ApiClient;
use crate::context::CartContext;
use crate::error::ClientResult;

/// Where to go after a successful submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutOutcome {
    pub order: Order,
    /// The order viewer should prompt for a receipt upload.
    pub show_upload_banner: bool,
}

#[derive(Debug)]
pub struct CheckoutScreen {
    api: ApiClient,
    in_flight: InFlight,
}

impl CheckoutScreen {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            in_flight: InFlight::default(),
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight.is_active()
    }

    /// Validate locally, submit, and clear the cart on success.
    ///
    /// On any failure the cart is left untouched so the shopper can retry.
    /// Once the order exists it is always returned; a cart that cannot be
    /// cleared afterwards is only logged.
    pub async fn submit(&self, cart: &mut CartContext, form: &CheckoutForm) -> ClientResult<CheckoutOutcome> {
        let request = form.build_request(cart.cart()).inspect_err(|err| {
            tracing::debug!(%err, "checkout rejected locally");
        })?;

        let _guard = self.in_flight.begin()?;
        let order = self.api.create_order(&request).await?;
        tracing::info!(order = %order.id, total = %order.total_amount, "order placed");

        if let Err(err) = cart.clear().await {
            tracing::warn!(order = %order.id, %err, "order placed but the cart could not be cleared");
        }
        Ok(CheckoutOutcome {
            order,
            show_upload_banner: true,
        })
    }
}

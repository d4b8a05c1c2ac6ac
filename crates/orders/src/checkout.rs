//! Checkout: turn the cart and the delivery form into an order request.
//!
//! Validation here is the only thing standing between a half-filled form and
//! a network call. Anything that fails it never reaches the API.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use foodnova_cart::{Cart, CartLine};
use foodnova_core::{PackVariantId, ProductId};

use crate::payment::PaymentMethod;

/// Prefix marking an order for in-store pickup in the address field.
pub const PICKUP_PREFIX: &str = "PICKUP - ";

/// Address note used for pickup when the shopper leaves the field blank.
pub const PICKUP_DEFAULT_NOTE: &str = "Customer will pick up from store";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryMode {
    Pickup,
    #[default]
    Delivery,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CheckoutError {
    #[error("Your cart is empty")]
    EmptyCart,

    #[error("Please enter your delivery address")]
    MissingAddress,

    #[error("Please enter your phone number")]
    MissingPhone,
}

/// What the shopper typed on the checkout screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckoutForm {
    pub mode: DeliveryMode,
    /// Delivery address, or an optional pickup note.
    pub address: String,
    pub phone: String,
    pub payment_method: PaymentMethod,
}

impl CheckoutForm {
    /// The address sent to the API.
    ///
    /// Pickup orders always get a non-empty `PICKUP - ...` marker.
    pub fn resolved_address(&self) -> String {
        let typed = self.address.trim();
        match self.mode {
            DeliveryMode::Delivery => typed.to_string(),
            DeliveryMode::Pickup if typed.is_empty() => format!("{PICKUP_PREFIX}{PICKUP_DEFAULT_NOTE}"),
            DeliveryMode::Pickup => format!("{PICKUP_PREFIX}{typed}"),
        }
    }

    pub fn validate(&self) -> Result<(), CheckoutError> {
        if self.mode == DeliveryMode::Delivery && self.address.trim().is_empty() {
            return Err(CheckoutError::MissingAddress);
        }
        if self.phone.trim().is_empty() {
            return Err(CheckoutError::MissingPhone);
        }
        Ok(())
    }

    /// Validate and build the `POST /orders` body from the cart.
    pub fn build_request(&self, cart: &Cart) -> Result<CreateOrderRequest, CheckoutError> {
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        self.validate()?;

        Ok(CreateOrderRequest {
            items: cart.lines().iter().map(OrderItemRequest::from).collect(),
            delivery_address: self.resolved_address(),
            phone: self.phone.trim().to_string(),
            payment_method: self.payment_method.clone(),
        })
    }
}

/// One requested line. Exactly one of the two ids is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItemRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<ProductId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pack_variant_id: Option<PackVariantId>,
    pub qty: u32,
}

impl From<&CartLine> for OrderItemRequest {
    fn from(line: &CartLine) -> Self {
        Self {
            product_id: line.key.product_id(),
            pack_variant_id: line.key.pack_variant_id(),
            qty: line.qty,
        }
    }
}

/// Body of `POST /orders`. Prices are not sent; the server computes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    pub items: Vec<OrderItemRequest>,
    pub delivery_address: String,
    pub phone: String,
    pub payment_method: PaymentMethod,
}

//! Strongly-typed identifiers for server-of-record entities.
//!
//! The API hands out integer primary keys; each entity gets its own newtype so
//! an order id can never be passed where a receipt id is expected.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

macro_rules! int_id {
    ($(#[$meta:meta])* $t:ident, $name:literal) => {
        $(#[$meta])*
        #[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $t(i64);

        impl $t {
            pub const fn new(raw: i64) -> Self {
                Self(raw)
            }

            pub const fn get(&self) -> i64 {
                self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<i64> for $t {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl From<$t> for i64 {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let raw = s
                    .trim()
                    .parse::<i64>()
                    .map_err(|e| DomainError::invalid_id(format!("{}: {}", $name, e)))?;
                Ok(Self(raw))
            }
        }
    };
}

int_id!(
    /// Identifier of an order.
    OrderId,
    "OrderId"
);
int_id!(
    /// Identifier of a line on a placed order.
    OrderItemId,
    "OrderItemId"
);
int_id!(
    /// Identifier of a catalog product.
    ProductId,
    "ProductId"
);
int_id!(CategoryId, "CategoryId");
int_id!(PackId, "PackId");
int_id!(PackVariantId, "PackVariantId");
int_id!(VariantItemId, "VariantItemId");
int_id!(ReceiptId, "ReceiptId");
int_id!(PaymentId, "PaymentId");
int_id!(
    /// Identifier of an account on the API (customer or staff).
    UserId,
    "UserId"
);

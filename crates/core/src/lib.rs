//! `foodnova-core` — shared building blocks for the storefront client.
//!
//! This crate contains **pure** primitives (no IO, no HTTP, no storage).

pub mod entity;
pub mod error;
pub mod id;
pub mod timestamp;
pub mod value_object;

pub use entity::{Entity, replace_by_id};
pub use error::{DomainError, DomainResult};
pub use id::{
    CategoryId, OrderId, OrderItemId, PackId, PackVariantId, PaymentId, ProductId, ReceiptId,
    UserId, VariantItemId,
};
pub use value_object::Money;

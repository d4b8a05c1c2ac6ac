//! Shopper's cart: selected products or pack variants with quantities.
//!
//! Pure in-memory state. Persisting it between runs is the caller's job; the
//! type round-trips through serde and re-establishes its invariants on load.

pub mod cart;

pub use cart::{Cart, CartError, CartKey, CartLine};

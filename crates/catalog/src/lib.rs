//! Catalog read models and admin edit payloads.
//!
//! The API owns and validates every catalog entity; this crate only models
//! what it returns and what the admin console sends back.

pub mod category;
pub mod pack;
pub mod product;

pub use category::{Category, CategoryDraft};
pub use pack::{Pack, PackDraft, PackPatch, PackVariant, VariantDraft, VariantItem, VariantItemDraft, VariantPatch};
pub use product::{
    LOW_STOCK_THRESHOLD, Product, ProductDraft, ProductPatch, active_count, filter_by_category,
    low_stock,
};

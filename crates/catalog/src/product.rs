use serde::{Deserialize, Serialize};

use foodnova_core::{CategoryId, DomainError, DomainResult, Entity, Money, ProductId};

/// Active products with fewer units than this are flagged on the dashboard.
pub const LOW_STOCK_THRESHOLD: i64 = 20;

fn default_true() -> bool {
    true
}

/// Catalog product as returned by `/products` and `/admin/products`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Price in smallest currency unit.
    pub price: Money,
    #[serde(default)]
    pub stock_qty: i64,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    /// Resolved by the admin endpoints only.
    #[serde(default)]
    pub category_name: Option<String>,
}

impl Product {
    pub fn is_low_stock(&self) -> bool {
        self.is_active && self.stock_qty < LOW_STOCK_THRESHOLD
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &ProductId {
        &self.id
    }
}

/// Products whose category matches `category`; `None` keeps everything.
pub fn filter_by_category(products: &[Product], category: Option<CategoryId>) -> Vec<Product> {
    match category {
        Some(id) => products
            .iter()
            .filter(|p| p.category_id == Some(id))
            .cloned()
            .collect(),
        None => products.to_vec(),
    }
}

/// Active products under [`LOW_STOCK_THRESHOLD`].
pub fn low_stock(products: &[Product]) -> Vec<&Product> {
    products.iter().filter(|p| p.is_low_stock()).collect()
}

pub fn active_count(products: &[Product]) -> usize {
    products.iter().filter(|p| p.is_active).count()
}

/// Body of `POST /admin/products`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub name: String,
    pub price: Money,
    pub stock_qty: i64,
    pub image_url: Option<String>,
    pub category_id: Option<CategoryId>,
}

impl ProductDraft {
    /// Field-presence checks only; pricing rules are the server's.
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("product name is required"));
        }
        if self.stock_qty < 0 {
            return Err(DomainError::validation("stock quantity cannot be negative"));
        }
        Ok(())
    }
}

/// Body of `PATCH /admin/products/{id}`; unset fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock_qty: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl ProductPatch {
    pub fn is_empty(&self) -> bool {
        *self == ProductPatch::default()
    }
}

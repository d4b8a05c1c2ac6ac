//! Packs: named bundles with priced variants, each made of catalog products.
//!
//! Ownership is three levels deep (pack → variant → item) and every level is
//! edited through its own admin endpoint.

use serde::{Deserialize, Serialize};

use foodnova_core::{DomainError, DomainResult, Entity, Money, PackId, PackVariantId, ProductId, VariantItemId};

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pack {
    pub id: PackId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub variants: Vec<PackVariant>,
}

impl Pack {
    pub fn variant(&self, id: PackVariantId) -> Option<&PackVariant> {
        self.variants.iter().find(|v| v.id == id)
    }

    /// Cheapest variant price, used as the "from" price on listings.
    pub fn starting_price(&self) -> Option<Money> {
        self.variants.iter().map(|v| v.price).min()
    }
}

impl Entity for Pack {
    type Id = PackId;

    fn id(&self) -> &PackId {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackVariant {
    pub id: PackVariantId,
    #[serde(default)]
    pub pack_id: Option<PackId>,
    pub name: String,
    pub price: Money,
    #[serde(default)]
    pub items: Vec<VariantItem>,
}

impl PackVariant {
    /// Label used for cart lines and order snapshots: `Pack - Variant`.
    pub fn display_name(&self, pack: &Pack) -> String {
        format!("{} - {}", pack.name, self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantItem {
    pub id: VariantItemId,
    #[serde(default)]
    pub variant_id: Option<PackVariantId>,
    pub product_id: ProductId,
    pub qty: u32,
    #[serde(default)]
    pub product_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackDraft {
    pub name: String,
    pub description: Option<String>,
}

impl PackDraft {
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("pack name is required"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantDraft {
    pub name: String,
    pub price: Money,
}

impl VariantDraft {
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("variant name is required"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Money>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantItemDraft {
    pub product_id: ProductId,
    pub qty: u32,
}

impl VariantItemDraft {
    pub fn validate(&self) -> DomainResult<()> {
        if self.qty == 0 {
            return Err(DomainError::validation("variant item quantity must be at least 1"));
        }
        Ok(())
    }
}

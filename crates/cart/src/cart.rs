use serde::{Deserialize, Serialize};
use thiserror::Error;

use foodnova_core::{Money, PackVariantId, ProductId};

/// What a cart line points at. Exactly one of product or pack variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum CartKey {
    Product(ProductId),
    PackVariant(PackVariantId),
}

impl CartKey {
    pub fn product_id(&self) -> Option<ProductId> {
        match self {
            CartKey::Product(id) => Some(*id),
            CartKey::PackVariant(_) => None,
        }
    }

    pub fn pack_variant_id(&self) -> Option<PackVariantId> {
        match self {
            CartKey::PackVariant(id) => Some(*id),
            CartKey::Product(_) => None,
        }
    }
}

impl core::fmt::Display for CartKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            CartKey::Product(id) => write!(f, "product:{id}"),
            CartKey::PackVariant(id) => write!(f, "variant:{id}"),
        }
    }
}

/// One line: key, quantity and the display fields cached at add time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub key: CartKey,
    pub name: String,
    pub unit_price: Money,
    pub qty: u32,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl CartLine {
    pub fn new(key: CartKey, name: impl Into<String>, unit_price: Money, qty: u32) -> Self {
        Self {
            key,
            name: name.into(),
            unit_price,
            qty,
            image_url: None,
        }
    }

    pub fn line_total(&self) -> Money {
        self.unit_price.times(self.qty)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CartError {
    #[error("quantity must be at least 1")]
    ZeroQuantity,

    #[error("no cart line for {0}")]
    UnknownLine(CartKey),
}

/// The cart holder.
///
/// Invariant: every retained line has `qty >= 1` and keys are unique.
/// Totals are derived on every read, never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<CartLine>", into = "Vec<CartLine>")]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn line(&self, key: &CartKey) -> Option<&CartLine> {
        self.lines.iter().find(|l| &l.key == key)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Add a line, or grow the existing line for the same key.
    ///
    /// The cached name and price are refreshed from `incoming`.
    pub fn add_item(&mut self, incoming: CartLine) -> Result<(), CartError> {
        if incoming.qty == 0 {
            return Err(CartError::ZeroQuantity);
        }
        match self.lines.iter_mut().find(|l| l.key == incoming.key) {
            Some(existing) => {
                existing.qty = existing.qty.saturating_add(incoming.qty);
                existing.name = incoming.name;
                existing.unit_price = incoming.unit_price;
                if incoming.image_url.is_some() {
                    existing.image_url = incoming.image_url;
                }
            }
            None => self.lines.push(incoming),
        }
        Ok(())
    }

    /// Returns whether a line was removed.
    pub fn remove_item(&mut self, key: &CartKey) -> bool {
        let before = self.lines.len();
        self.lines.retain(|l| &l.key != key);
        self.lines.len() != before
    }

    /// Set a line's quantity; zero removes the line.
    pub fn set_quantity(&mut self, key: &CartKey, qty: u32) -> Result<(), CartError> {
        if qty == 0 {
            return if self.remove_item(key) {
                Ok(())
            } else {
                Err(CartError::UnknownLine(*key))
            };
        }
        let line = self
            .lines
            .iter_mut()
            .find(|l| &l.key == key)
            .ok_or(CartError::UnknownLine(*key))?;
        line.qty = qty;
        Ok(())
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn total_items(&self) -> u32 {
        self.lines.iter().map(|l| l.qty).sum()
    }

    pub fn total_amount(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }
}

impl From<Vec<CartLine>> for Cart {
    fn from(lines: Vec<CartLine>) -> Self {
        let mut cart = Cart::new();
        for line in lines {
            // Persisted data may predate the invariant; zero lines are dropped.
            let _ = cart.add_item(line);
        }
        cart
    }
}

impl From<Cart> for Vec<CartLine> {
    fn from(cart: Cart) -> Self {
        cart.lines
    }
}

//! Catalog browse: categories, products and packs, filtered by category.
//!
//! Holds the unfiltered product list once mounted and filters it locally.
//! A category is fetched from the server only when no unfiltered list is
//! held and that category has not been fetched before.

use std::collections::HashMap;

use foodnova_cart::{CartKey, CartLine};
use foodnova_catalog::{Category, Pack, Product, filter_by_category};
use foodnova_core::{CategoryId, PackVariantId, ProductId};

use crate::api::ApiClient;
use crate::context::CartContext;
use crate::error::{ClientError, ClientResult};

#[derive(Debug, Clone)]
pub struct BrowseScreen {
    api: ApiClient,
    categories: Vec<Category>,
    packs: Vec<Pack>,
    all_products: Option<Vec<Product>>,
    by_category: HashMap<CategoryId, Vec<Product>>,
    selected: Option<CategoryId>,
}

impl BrowseScreen {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            categories: Vec::new(),
            packs: Vec::new(),
            all_products: None,
            by_category: HashMap::new(),
            selected: None,
        }
    }

    /// Fetch categories, products and packs together.
    pub async fn mount(&mut self) -> ClientResult<()> {
        let (categories, products, packs) = tokio::try_join!(
            self.api.list_categories(),
            self.api.list_products(None),
            self.api.list_packs(),
        )?;
        tracing::debug!(
            categories = categories.len(),
            products = products.len(),
            packs = packs.len(),
            "catalog mounted"
        );

        self.categories = categories;
        self.packs = packs;
        self.all_products = Some(products);
        self.by_category.clear();
        Ok(())
    }

    /// Switch the category tab. `None` is "All".
    pub async fn select_category(&mut self, category: Option<CategoryId>) -> ClientResult<()> {
        if let (Some(id), None) = (category, &self.all_products) {
            if !self.by_category.contains_key(&id) {
                let products = self.api.list_products(Some(id)).await?;
                self.by_category.insert(id, products);
            }
        }
        if category.is_none() && self.all_products.is_none() {
            self.all_products = Some(self.api.list_products(None).await?);
        }
        self.selected = category;
        Ok(())
    }

    pub fn selected_category(&self) -> Option<CategoryId> {
        self.selected
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn packs(&self) -> &[Pack] {
        &self.packs
    }

    /// Products under the current tab, in server order.
    pub fn visible_products(&self) -> Vec<Product> {
        match (&self.all_products, self.selected) {
            (Some(all), selected) => filter_by_category(all, selected),
            (None, Some(id)) => self.by_category.get(&id).cloned().unwrap_or_default(),
            (None, None) => Vec::new(),
        }
    }

    fn find_product(&self, id: ProductId) -> Option<&Product> {
        self.all_products
            .iter()
            .flatten()
            .chain(self.by_category.values().flatten())
            .find(|p| p.id == id)
    }

    pub async fn add_product_to_cart(
        &self,
        cart: &mut CartContext,
        id: ProductId,
        qty: u32,
    ) -> ClientResult<()> {
        let product = self
            .find_product(id)
            .ok_or_else(|| ClientError::Validation(format!("Product {id} not found")))?;
        if !product.is_active {
            return Err(ClientError::Validation(format!("{} is not available", product.name)));
        }

        let mut line = CartLine::new(CartKey::Product(product.id), &product.name, product.price, qty);
        line.image_url = product.image_url.clone();
        cart.add(line).await
    }

    pub async fn add_variant_to_cart(
        &self,
        cart: &mut CartContext,
        id: PackVariantId,
        qty: u32,
    ) -> ClientResult<()> {
        let (pack, variant) = self
            .packs
            .iter()
            .find_map(|pack| pack.variant(id).map(|v| (pack, v)))
            .ok_or_else(|| ClientError::Validation(format!("Pack variant {id} not found")))?;

        let line = CartLine::new(
            CartKey::PackVariant(variant.id),
            variant.display_name(pack),
            variant.price,
            qty,
        );
        cart.add(line).await
    }
}

//! Admin catalog management: products, categories, packs.
//!
//! Drafts are checked locally before they are sent. After each mutation the
//! affected list is fetched again, except product edits, whose response
//! already carries the updated row. A mutation the server accepted is
//! reported as a success even if that re-fetch fails; the lists are then
//! flagged stale until the next successful load.

use foodnova_catalog::{
    Category, CategoryDraft, Pack, PackDraft, PackPatch, Product, ProductDraft, ProductPatch,
    VariantDraft, VariantItemDraft, VariantPatch,
};
use foodnova_core::{CategoryId, PackId, PackVariantId, ProductId, VariantItemId, replace_by_id};

use super::InFlight;
use crate::api::ApiClient;
use crate::error::{ClientError, ClientResult};

#[derive(Debug)]
pub struct CatalogAdmin {
    api: ApiClient,
    products: Vec<Product>,
    categories: Vec<Category>,
    packs: Vec<Pack>,
    in_flight: InFlight,
    stale: bool,
}

impl CatalogAdmin {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            products: Vec::new(),
            categories: Vec::new(),
            packs: Vec::new(),
            in_flight: InFlight::default(),
            stale: false,
        }
    }

    pub async fn load(&mut self) -> ClientResult<()> {
        let (products, categories, packs) = tokio::try_join!(
            self.api.admin_products(),
            self.api.admin_categories(),
            self.api.admin_packs(),
        )?;
        self.products = products;
        self.categories = categories;
        self.packs = packs;
        self.stale = false;
        Ok(())
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn packs(&self) -> &[Pack] {
        &self.packs
    }

    pub fn is_stale(&self) -> bool {
        self.stale
    }

    fn mark_stale(&mut self, list: &'static str, err: ClientError) {
        tracing::warn!(list, %err, "catalog refresh failed");
        self.stale = true;
    }

    async fn reload_products(&mut self) -> bool {
        match self.api.admin_products().await {
            Ok(products) => {
                self.products = products;
                true
            }
            Err(err) => {
                self.mark_stale("products", err);
                false
            }
        }
    }

    async fn reload_categories(&mut self) {
        match self.api.admin_categories().await {
            Ok(categories) => self.categories = categories,
            Err(err) => self.mark_stale("categories", err),
        }
    }

    async fn reload_packs(&mut self) {
        match self.api.admin_packs().await {
            Ok(packs) => self.packs = packs,
            Err(err) => self.mark_stale("packs", err),
        }
    }

    pub async fn create_product(&mut self, draft: ProductDraft) -> ClientResult<Product> {
        draft.validate()?;
        let created = {
            let _guard = self.in_flight.begin()?;
            self.api.create_product(&draft).await?
        };
        tracing::info!(product = %created.id, name = %created.name, "product created");
        if !self.reload_products().await {
            self.products.push(created.clone());
        }
        Ok(created)
    }

    pub async fn update_product(&mut self, id: ProductId, patch: ProductPatch) -> ClientResult<Product> {
        if patch.is_empty() {
            return Err(ClientError::Validation("Nothing to update".into()));
        }
        let updated = {
            let _guard = self.in_flight.begin()?;
            self.api.update_product(id, &patch).await?
        };
        tracing::info!(product = %id, "product updated");
        replace_by_id(&mut self.products, updated.clone());
        Ok(updated)
    }

    /// The server soft-deletes; the row comes back inactive on reload.
    pub async fn delete_product(&mut self, id: ProductId) -> ClientResult<()> {
        {
            let _guard = self.in_flight.begin()?;
            self.api.delete_product(id).await?;
        }
        tracing::info!(product = %id, "product deleted");
        self.reload_products().await;
        Ok(())
    }

    pub async fn create_category(&mut self, name: &str) -> ClientResult<()> {
        let draft = CategoryDraft::new(name)?;
        {
            let _guard = self.in_flight.begin()?;
            self.api.create_category(&draft).await?;
        }
        tracing::info!(name = %draft.name, "category created");
        self.reload_categories().await;
        Ok(())
    }

    pub async fn delete_category(&mut self, id: CategoryId) -> ClientResult<()> {
        {
            let _guard = self.in_flight.begin()?;
            self.api.delete_category(id).await?;
        }
        tracing::info!(category = %id, "category deleted");
        self.reload_categories().await;
        Ok(())
    }

    pub async fn create_pack(&mut self, draft: PackDraft) -> ClientResult<()> {
        draft.validate()?;
        {
            let _guard = self.in_flight.begin()?;
            self.api.create_pack(&draft).await?;
        }
        tracing::info!(name = %draft.name, "pack created");
        self.reload_packs().await;
        Ok(())
    }

    pub async fn update_pack(&mut self, id: PackId, patch: PackPatch) -> ClientResult<()> {
        if patch == PackPatch::default() {
            return Err(ClientError::Validation("Nothing to update".into()));
        }
        {
            let _guard = self.in_flight.begin()?;
            self.api.update_pack(id, &patch).await?;
        }
        self.reload_packs().await;
        Ok(())
    }

    pub async fn delete_pack(&mut self, id: PackId) -> ClientResult<()> {
        {
            let _guard = self.in_flight.begin()?;
            self.api.delete_pack(id).await?;
        }
        tracing::info!(pack = %id, "pack deleted");
        self.reload_packs().await;
        Ok(())
    }

    pub async fn add_variant(&mut self, pack: PackId, draft: VariantDraft) -> ClientResult<()> {
        draft.validate()?;
        {
            let _guard = self.in_flight.begin()?;
            self.api.add_variant(pack, &draft).await?;
        }
        self.reload_packs().await;
        Ok(())
    }

    pub async fn update_variant(&mut self, id: PackVariantId, patch: VariantPatch) -> ClientResult<()> {
        if patch == VariantPatch::default() {
            return Err(ClientError::Validation("Nothing to update".into()));
        }
        {
            let _guard = self.in_flight.begin()?;
            self.api.update_variant(id, &patch).await?;
        }
        self.reload_packs().await;
        Ok(())
    }

    pub async fn delete_variant(&mut self, id: PackVariantId) -> ClientResult<()> {
        {
            let _guard = self.in_flight.begin()?;
            self.api.delete_variant(id).await?;
        }
        self.reload_packs().await;
        Ok(())
    }

    pub async fn add_variant_item(&mut self, variant: PackVariantId, draft: VariantItemDraft) -> ClientResult<()> {
        draft.validate()?;
        {
            let _guard = self.in_flight.begin()?;
            self.api.add_variant_item(variant, &draft).await?;
        }
        self.reload_packs().await;
        Ok(())
    }

    pub async fn delete_variant_item(&mut self, id: VariantItemId) -> ClientResult<()> {
        {
            let _guard = self.in_flight.begin()?;
            self.api.delete_variant_item(id).await?;
        }
        self.reload_packs().await;
        Ok(())
    }
}

use reqwest::Method;

use foodnova_catalog::{
    Category, CategoryDraft, Pack, PackDraft, PackPatch, Product, ProductDraft, ProductPatch,
    VariantDraft, VariantItemDraft, VariantPatch,
};
use foodnova_core::{CategoryId, OrderId, PackId, PackVariantId, PaymentId, ProductId, ReceiptId, VariantItemId};
use foodnova_orders::{Order, OrderStatus, OrderSummary, PaymentUpdate, ReceiptReview, StatusUpdate};

use super::{Ack, ApiClient};
use crate::error::ClientResult;

// Orders, receipts, payments.
impl ApiClient {
    pub async fn admin_orders(&self) -> ClientResult<Vec<OrderSummary>> {
        let req = self.request(Method::GET, "/admin/orders");
        self.send(req, "Failed to load orders").await
    }

    /// Full order including customer, receipt and payment.
    pub async fn admin_order(&self, id: OrderId) -> ClientResult<Order> {
        let req = self.request(Method::GET, &format!("/admin/orders/{id}"));
        self.send(req, "Failed to load order").await
    }

    pub async fn update_order_status(&self, id: OrderId, status: OrderStatus) -> ClientResult<Ack> {
        tracing::debug!(order = %id, %status, "PATCH /admin/orders");
        let req = self
            .request(Method::PATCH, &format!("/admin/orders/{id}"))
            .json(&StatusUpdate { status });
        self.send(req, "Failed to update status").await
    }

    pub async fn review_receipt(&self, id: ReceiptId, review: &ReceiptReview) -> ClientResult<Ack> {
        tracing::debug!(receipt = %id, status = ?review.status, "PATCH /admin/receipts");
        let req = self
            .request(Method::PATCH, &format!("/admin/receipts/{id}"))
            .json(review);
        self.send(req, "Failed to update receipt").await
    }

    pub async fn update_payment(&self, id: PaymentId, update: &PaymentUpdate) -> ClientResult<Ack> {
        tracing::debug!(payment = %id, status = %update.status, "PATCH /admin/payments");
        let req = self
            .request(Method::PATCH, &format!("/admin/payments/{id}"))
            .json(update);
        self.send(req, "Failed to update payment").await
    }
}

// Products and categories.
impl ApiClient {
    /// Every product, inactive ones included.
    pub async fn admin_products(&self) -> ClientResult<Vec<Product>> {
        let req = self.request(Method::GET, "/admin/products");
        self.send(req, "Failed to load products").await
    }

    pub async fn create_product(&self, draft: &ProductDraft) -> ClientResult<Product> {
        let req = self.request(Method::POST, "/admin/products").json(draft);
        self.send(req, "Failed to create product").await
    }

    pub async fn update_product(&self, id: ProductId, patch: &ProductPatch) -> ClientResult<Product> {
        let req = self
            .request(Method::PATCH, &format!("/admin/products/{id}"))
            .json(patch);
        self.send(req, "Failed to update product").await
    }

    pub async fn delete_product(&self, id: ProductId) -> ClientResult<()> {
        let req = self.request(Method::DELETE, &format!("/admin/products/{id}"));
        self.send_empty(req, "Failed to delete product").await
    }

    pub async fn admin_categories(&self) -> ClientResult<Vec<Category>> {
        let req = self.request(Method::GET, "/admin/categories");
        self.send(req, "Failed to load categories").await
    }

    pub async fn create_category(&self, draft: &CategoryDraft) -> ClientResult<()> {
        let req = self.request(Method::POST, "/admin/categories").json(draft);
        self.send_empty(req, "Failed to create category").await
    }

    pub async fn delete_category(&self, id: CategoryId) -> ClientResult<()> {
        let req = self.request(Method::DELETE, &format!("/admin/categories/{id}"));
        self.send_empty(req, "Failed to delete category").await
    }
}

// Packs, variants, variant items.
impl ApiClient {
    pub async fn admin_packs(&self) -> ClientResult<Vec<Pack>> {
        let req = self.request(Method::GET, "/admin/packs");
        self.send(req, "Failed to load packs").await
    }

    pub async fn create_pack(&self, draft: &PackDraft) -> ClientResult<()> {
        let req = self.request(Method::POST, "/admin/packs").json(draft);
        self.send_empty(req, "Failed to create pack").await
    }

    pub async fn update_pack(&self, id: PackId, patch: &PackPatch) -> ClientResult<()> {
        let req = self
            .request(Method::PATCH, &format!("/admin/packs/{id}"))
            .json(patch);
        self.send_empty(req, "Failed to update pack").await
    }

    pub async fn delete_pack(&self, id: PackId) -> ClientResult<()> {
        let req = self.request(Method::DELETE, &format!("/admin/packs/{id}"));
        self.send_empty(req, "Failed to delete pack").await
    }

    pub async fn add_variant(&self, pack: PackId, draft: &VariantDraft) -> ClientResult<()> {
        let req = self
            .request(Method::POST, &format!("/admin/packs/{pack}/variants"))
            .json(draft);
        self.send_empty(req, "Failed to add variant").await
    }

    pub async fn update_variant(&self, id: PackVariantId, patch: &VariantPatch) -> ClientResult<()> {
        let req = self
            .request(Method::PATCH, &format!("/admin/packs/variants/{id}"))
            .json(patch);
        self.send_empty(req, "Failed to update variant").await
    }

    pub async fn delete_variant(&self, id: PackVariantId) -> ClientResult<()> {
        let req = self.request(Method::DELETE, &format!("/admin/packs/variants/{id}"));
        self.send_empty(req, "Failed to delete variant").await
    }

    pub async fn add_variant_item(&self, variant: PackVariantId, draft: &VariantItemDraft) -> ClientResult<()> {
        let req = self
            .request(Method::POST, &format!("/admin/packs/variants/{variant}/items"))
            .json(draft);
        self.send_empty(req, "Failed to add item").await
    }

    pub async fn delete_variant_item(&self, id: VariantItemId) -> ClientResult<()> {
        let req = self.request(Method::DELETE, &format!("/admin/packs/variants/items/{id}"));
        self.send_empty(req, "Failed to remove item").await
    }
}

use reqwest::Method;

use foodnova_catalog::{Category, Pack, Product};
use foodnova_core::{CategoryId, PackId};

use super::ApiClient;
use crate::error::ClientResult;

impl ApiClient {
    /// `GET /products`, optionally narrowed server-side to one category.
    pub async fn list_products(&self, category: Option<CategoryId>) -> ClientResult<Vec<Product>> {
        tracing::debug!(?category, "GET /products");
        let mut req = self.request(Method::GET, "/products");
        if let Some(id) = category {
            req = req.query(&[("category_id", id.get())]);
        }
        self.send(req, "Failed to load products").await
    }

    pub async fn list_categories(&self) -> ClientResult<Vec<Category>> {
        let req = self.request(Method::GET, "/categories");
        self.send(req, "Failed to load categories").await
    }

    pub async fn list_packs(&self) -> ClientResult<Vec<Pack>> {
        let req = self.request(Method::GET, "/packs");
        self.send(req, "Failed to load packs").await
    }

    pub async fn get_pack(&self, id: PackId) -> ClientResult<Pack> {
        let req = self.request(Method::GET, &format!("/packs/{id}"));
        self.send(req, "Pack not found").await
    }
}

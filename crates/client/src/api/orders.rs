use reqwest::Method;
use reqwest::multipart::{Form, Part};

use foodnova_core::OrderId;
use foodnova_orders::{CreateOrderRequest, Order, OrderSummary, Receipt, ReceiptFile};

use super::ApiClient;
use crate::error::{ClientError, ClientResult};

impl ApiClient {
    pub async fn create_order(&self, body: &CreateOrderRequest) -> ClientResult<Order> {
        tracing::debug!(items = body.items.len(), "POST /orders");
        let req = self.request(Method::POST, "/orders").json(body);
        self.send(req, "Failed to place order. Please try again.").await
    }

    /// The caller's orders, newest first as the server returns them.
    pub async fn my_orders(&self) -> ClientResult<Vec<OrderSummary>> {
        let req = self.request(Method::GET, "/orders/my");
        self.send(req, "Failed to load orders").await
    }

    pub async fn get_order(&self, id: OrderId) -> ClientResult<Order> {
        let req = self.request(Method::GET, &format!("/orders/{id}"));
        self.send(req, "Failed to load order").await
    }

    /// Multipart upload under the `file` field.
    ///
    /// The file has already passed type and size checks in [`ReceiptFile::new`].
    pub async fn upload_receipt(&self, id: OrderId, file: ReceiptFile) -> ClientResult<Receipt> {
        let (name, mime, bytes) = file.into_parts();
        tracing::debug!(order = %id, %name, size = bytes.len(), "uploading receipt");

        let part = Part::bytes(bytes)
            .file_name(name)
            .mime_str(&mime)
            .map_err(|err| ClientError::Validation(err.to_string()))?;
        let form = Form::new().part("file", part);

        let req = self
            .request(Method::POST, &format!("/orders/{id}/receipt"))
            .multipart(form);
        self.send(req, "Failed to upload receipt").await
    }

    pub async fn get_receipt(&self, id: OrderId) -> ClientResult<Receipt> {
        let req = self.request(Method::GET, &format!("/orders/{id}/receipt"));
        self.send(req, "No receipt found").await
    }
}

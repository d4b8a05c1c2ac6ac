//! Customer order viewer with receipt upload.

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::watch;

use foodnova_core::OrderId;
use foodnova_orders::{
    CustomerAction, Order, Receipt, ReceiptFile, ReceiptFileError, customer_action,
    mime_from_path, validate_receipt_file,
};

use super::InFlight;
use crate::api::ApiClient;
use crate::error::{ClientError, ClientResult};

#[derive(Debug)]
pub struct OrderViewer {
    api: ApiClient,
    order_id: OrderId,
    order: watch::Sender<Option<Order>>,
    show_upload_banner: bool,
    in_flight: InFlight,
    stale: AtomicBool,
}

impl OrderViewer {
    pub fn new(api: ApiClient, order_id: OrderId) -> Self {
        Self {
            api,
            order_id,
            order: watch::Sender::new(None),
            show_upload_banner: false,
            in_flight: InFlight::default(),
            stale: AtomicBool::new(false),
        }
    }

    /// Viewer opened straight after checkout.
    pub fn after_checkout(api: ApiClient, order: Order) -> Self {
        let viewer = Self::new(api, order.id);
        viewer.order.send_replace(Some(order));
        Self {
            show_upload_banner: true,
            ..viewer
        }
    }

    pub async fn load(&self) -> ClientResult<()> {
        let order = self.api.get_order(self.order_id).await?;
        self.order.send_replace(Some(order));
        self.stale.store(false, Ordering::Release);
        Ok(())
    }

    pub fn order(&self) -> Option<Order> {
        self.order.borrow().clone()
    }

    /// Set when a change was accepted but the order could not be re-fetched.
    pub fn is_stale(&self) -> bool {
        self.stale.load(Ordering::Acquire)
    }

    /// Banner shown only while the order still awaits its first receipt.
    pub fn show_upload_banner(&self) -> bool {
        self.show_upload_banner && matches!(self.action(), Ok(CustomerAction::UploadReceipt))
    }

    pub fn action(&self) -> Result<CustomerAction, ClientError> {
        self.order
            .borrow()
            .as_ref()
            .map(customer_action)
            .ok_or(ClientError::NotLoaded("order"))
    }

    /// Validate, upload, then re-fetch the whole order.
    ///
    /// Type and size are checked before anything is sent. A failed upload
    /// leaves the displayed order as it was. Once the upload is accepted the
    /// call succeeds; if the re-fetch then fails, the new receipt is recorded
    /// on the displayed order and the viewer is marked stale.
    pub async fn upload_receipt(
        &self,
        file_name: &str,
        mime_type: &str,
        bytes: Vec<u8>,
    ) -> ClientResult<Receipt> {
        let file = ReceiptFile::new(file_name, mime_type, bytes)?;
        self.upload(file).await
    }

    /// Read a receipt from disk; the size is checked before the file is read.
    pub async fn upload_receipt_from_path(&self, path: &Path) -> ClientResult<Receipt> {
        let mime = mime_from_path(path).ok_or_else(|| {
            let ext = path
                .extension()
                .and_then(|e| e.to_str())
                .unwrap_or_default()
                .to_string();
            ReceiptFileError::UnsupportedType(ext)
        })?;

        let size = tokio::fs::metadata(path)
            .await
            .map_err(|err| ClientError::Validation(format!("Cannot read {}: {err}", path.display())))?
            .len();
        validate_receipt_file(mime, size)?;

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|err| ClientError::Validation(format!("Cannot read {}: {err}", path.display())))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "receipt".to_string());

        self.upload_receipt(&name, mime, bytes).await
    }

    async fn upload(&self, file: ReceiptFile) -> ClientResult<Receipt> {
        if self.action()? != CustomerAction::UploadReceipt {
            return Err(ClientError::Validation(
                "This order does not accept a receipt upload".into(),
            ));
        }

        let _guard = self.in_flight.begin()?;
        let receipt = self.api.upload_receipt(self.order_id, file).await?;
        tracing::info!(order = %self.order_id, receipt = %receipt.id, "receipt uploaded");

        if let Err(err) = self.load().await {
            tracing::warn!(order = %self.order_id, after = "receipt upload", %err, "order refresh failed");
            self.order.send_modify(|order| {
                if let Some(order) = order {
                    order.has_receipt = true;
                    order.receipt_status = Some(receipt.status);
                    if order.receipt.is_some() {
                        order.receipt = Some(receipt.clone());
                    }
                }
            });
            self.stale.store(true, Ordering::Release);
        }
        Ok(receipt)
    }

    pub async fn receipt(&self) -> ClientResult<Receipt> {
        self.api.get_receipt(self.order_id).await
    }
}

//! Admin order list and single-order review.

use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::watch;

use foodnova_core::OrderId;
use foodnova_orders::{
    Order, OrderFilter, OrderStatus, OrderSummary, PaymentStatus, PaymentUpdate, ReceiptReview,
    ReceiptStatus, ReviewDecision,
};

use super::InFlight;
use crate::api::ApiClient;
use crate::error::{ClientError, ClientResult};

#[derive(Debug, Clone)]
pub struct AdminOrdersScreen {
    api: ApiClient,
    orders: Vec<OrderSummary>,
    filter: OrderFilter,
}

impl AdminOrdersScreen {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            orders: Vec::new(),
            filter: OrderFilter::default(),
        }
    }

    pub async fn load(&mut self) -> ClientResult<()> {
        self.orders = self.api.admin_orders().await?;
        Ok(())
    }

    pub fn set_filter(&mut self, filter: OrderFilter) {
        self.filter = filter;
    }

    pub fn orders(&self) -> &[OrderSummary] {
        &self.orders
    }

    pub fn visible(&self) -> Vec<&OrderSummary> {
        self.filter.apply(&self.orders)
    }
}

/// One order under admin review.
///
/// Status changes are applied to the displayed order immediately and
/// reverted if the server refuses them. Receipt and payment decisions are
/// followed by a full re-fetch. When that re-fetch fails the decision still
/// counts as made: it is patched into the displayed order, which is then
/// marked stale.
#[derive(Debug)]
pub struct OrderReviewer {
    api: ApiClient,
    order_id: OrderId,
    order: watch::Sender<Option<Order>>,
    in_flight: InFlight,
    stale: AtomicBool,
}

impl OrderReviewer {
    pub fn new(api: ApiClient, order_id: OrderId) -> Self {
        Self {
            api,
            order_id,
            order: watch::Sender::new(None),
            in_flight: InFlight::default(),
            stale: AtomicBool::new(false),
        }
    }

    pub async fn load(&self) -> ClientResult<()> {
        let order = self.api.admin_order(self.order_id).await?;
        self.order.send_replace(Some(order));
        self.stale.store(false, Ordering::Release);
        Ok(())
    }

    /// Re-fetch after an accepted change, falling back to `patch` on failure.
    async fn refresh_or_patch(&self, what: &str, patch: impl FnOnce(&mut Order)) {
        if let Err(err) = self.load().await {
            tracing::warn!(order = %self.order_id, after = what, %err, "order refresh failed");
            self.order.send_modify(|order| {
                if let Some(order) = order {
                    patch(order);
                }
            });
            self.stale.store(true, Ordering::Release);
        }
    }

    /// Observe every change to the displayed order, optimistic ones included.
    pub fn subscribe(&self) -> watch::Receiver<Option<Order>> {
        self.order.subscribe()
    }

    pub fn order(&self) -> Option<Order> {
        self.order.borrow().clone()
    }

    pub fn is_saving(&self) -> bool {
        self.in_flight.is_active()
    }

    /// Set when a change was accepted but the order could not be re-fetched.
    pub fn is_stale(&self) -> bool {
        self.stale.load(Ordering::Acquire)
    }

    fn current_status(&self) -> ClientResult<OrderStatus> {
        self.order
            .borrow()
            .as_ref()
            .map(|o| o.status)
            .ok_or(ClientError::NotLoaded("order"))
    }

    fn set_displayed_status(&self, status: OrderStatus) {
        self.order.send_modify(|order| {
            if let Some(order) = order {
                order.status = status;
            }
        });
    }

    pub async fn set_status(&self, status: OrderStatus) -> ClientResult<()> {
        let previous = self.current_status()?;
        let _guard = self.in_flight.begin()?;

        self.set_displayed_status(status);
        match self.api.update_order_status(self.order_id, status).await {
            Ok(_) => {
                tracing::info!(order = %self.order_id, from = %previous, to = %status, "status updated");
                Ok(())
            }
            Err(err) => {
                tracing::warn!(order = %self.order_id, %err, "status update failed, reverting");
                self.set_displayed_status(previous);
                Err(err)
            }
        }
    }

    /// Only a receipt still awaiting review can be approved or rejected.
    pub async fn review_receipt(&self, decision: ReviewDecision, note: Option<&str>) -> ClientResult<()> {
        let (receipt_id, current) = self
            .order
            .borrow()
            .as_ref()
            .ok_or(ClientError::NotLoaded("order"))?
            .receipt
            .as_ref()
            .map(|r| (r.id, r.status))
            .ok_or_else(|| ClientError::Validation("This order has no receipt to review".into()))?;
        if current != ReceiptStatus::Submitted {
            return Err(ClientError::Validation(format!("This receipt has already been {current}")));
        }

        let review = ReceiptReview::new(decision, note);
        let _guard = self.in_flight.begin()?;
        self.api.review_receipt(receipt_id, &review).await?;
        tracing::info!(order = %self.order_id, receipt = %receipt_id, ?decision, "receipt reviewed");

        self.refresh_or_patch("receipt review", |order| {
            if let Some(receipt) = order.receipt.as_mut() {
                receipt.status = decision.into();
                receipt.admin_note = review.admin_note;
            }
            order.receipt_status = Some(decision.into());
        })
        .await;
        Ok(())
    }

    pub async fn update_payment(&self, status: PaymentStatus, reference: Option<String>) -> ClientResult<()> {
        let payment_id = self
            .order
            .borrow()
            .as_ref()
            .ok_or(ClientError::NotLoaded("order"))?
            .payment
            .as_ref()
            .map(|p| p.id)
            .ok_or_else(|| ClientError::Validation("This order has no payment record".into()))?;

        let reference = reference.map(|r| r.trim().to_string()).filter(|r| !r.is_empty());
        let update = PaymentUpdate { status, reference };
        let _guard = self.in_flight.begin()?;
        self.api.update_payment(payment_id, &update).await?;
        tracing::info!(order = %self.order_id, payment = %payment_id, %status, "payment updated");

        self.refresh_or_patch("payment update", |order| {
            if let Some(payment) = order.payment.as_mut() {
                payment.status = update.status;
                if update.reference.is_some() {
                    payment.reference = update.reference;
                }
            }
        })
        .await;
        Ok(())
    }
}

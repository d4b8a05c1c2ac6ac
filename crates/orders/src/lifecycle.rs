//! What the customer order screen offers for each order/receipt state.

use crate::order::{Order, OrderStatus};
use crate::receipt::{ReceiptState, ReceiptStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomerAction {
    /// Pending order with no receipt: offer the upload control.
    UploadReceipt,
    /// A receipt exists: show its status, nothing to do.
    ReceiptBadge(ReceiptStatus),
    /// Nothing to show or do.
    NoAction,
}

/// Display/action matrix for the customer order viewer.
///
/// A rejected receipt on a pending order shows its badge only; there is no
/// re-upload path from this screen.
pub fn customer_action(order: &Order) -> CustomerAction {
    action_for(order.status, order.receipt_state())
}

fn action_for(status: OrderStatus, receipt: ReceiptState) -> CustomerAction {
    match (status, receipt.status()) {
        (OrderStatus::Pending, None) => CustomerAction::UploadReceipt,
        (_, Some(status)) => CustomerAction::ReceiptBadge(status),
        (_, None) => CustomerAction::NoAction,
    }
}

use core::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use foodnova_core::{DomainError, Entity, Money, OrderId, OrderItemId, ProductId, UserId, timestamp};

use crate::payment::Payment;
use crate::receipt::{Receipt, ReceiptState, ReceiptStatus};

/// Order status lifecycle, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Paid,
    Confirmed,
    OutForDelivery,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 6] = [
        OrderStatus::Pending,
        OrderStatus::Paid,
        OrderStatus::Confirmed,
        OrderStatus::OutForDelivery,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Paid => "paid",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::OutForDelivery => "out_for_delivery",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl core::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s.trim())
            .ok_or_else(|| {
                DomainError::validation(format!(
                    "unknown order status `{s}`; expected one of: pending, paid, confirmed, out_for_delivery, delivered, cancelled"
                ))
            })
    }
}

/// Order line with the product name frozen at checkout time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    #[serde(default)]
    pub id: Option<OrderItemId>,
    /// `None` for pack-variant lines and for products deleted since.
    #[serde(default)]
    pub product_id: Option<ProductId>,
    pub name_snapshot: String,
    pub unit_price: Money,
    pub qty: u32,
    pub line_total: Money,
}

impl OrderItem {
    /// Whether the server-computed line total matches price × quantity.
    pub fn is_consistent(&self) -> bool {
        self.unit_price.times(self.qty) == self.line_total
    }
}

/// Full order, as returned by `/orders/{id}` and `/admin/orders/{id}`.
///
/// The customer endpoint reports the receipt through `has_receipt` and
/// `receipt_status`; the admin endpoint embeds `receipt` and `payment`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    #[serde(default)]
    pub user_id: Option<UserId>,
    pub status: OrderStatus,
    pub total_amount: Money,
    pub delivery_address: String,
    pub phone: String,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    #[serde(default)]
    pub has_receipt: bool,
    #[serde(default)]
    pub receipt_status: Option<ReceiptStatus>,
    #[serde(default)]
    pub receipt: Option<Receipt>,
    #[serde(default)]
    pub payment: Option<Payment>,
    #[serde(default)]
    pub user_email: Option<String>,
    #[serde(default)]
    pub user_name: Option<String>,
}

impl Order {
    pub fn receipt_state(&self) -> ReceiptState {
        if let Some(receipt) = &self.receipt {
            return receipt.status.into();
        }
        match (self.receipt_status, self.has_receipt) {
            (Some(status), _) => status.into(),
            (None, true) => ReceiptState::Submitted,
            (None, false) => ReceiptState::Absent,
        }
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }
}

impl Entity for Order {
    type Id = OrderId;

    fn id(&self) -> &OrderId {
        &self.id
    }
}

/// Row of `/orders/my` and `/admin/orders`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSummary {
    pub id: OrderId,
    pub status: OrderStatus,
    pub total_amount: Money,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub item_count: u32,
}

impl Entity for OrderSummary {
    type Id = OrderId;

    fn id(&self) -> &OrderId {
        &self.id
    }
}

/// Body of `PATCH /admin/orders/{id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub status: OrderStatus,
}

/// Admin order list filter: status tab plus order-number search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderFilter {
    /// `None` is the "all" tab.
    pub status: Option<OrderStatus>,
    pub search: String,
}

impl OrderFilter {
    pub fn matches(&self, order: &OrderSummary) -> bool {
        let status_ok = self.status.is_none_or(|s| s == order.status);
        let search = self.search.trim();
        let search_ok = search.is_empty() || order.id.to_string().contains(search);
        status_ok && search_ok
    }

    pub fn apply<'a>(&self, orders: &'a [OrderSummary]) -> Vec<&'a OrderSummary> {
        orders.iter().filter(|o| self.matches(o)).collect()
    }
}

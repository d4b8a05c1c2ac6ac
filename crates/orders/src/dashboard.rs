//! Admin dashboard figures, derived from the full order and product lists.
//!
//! Recomputed from scratch on every call; admin lists are small.

use foodnova_catalog::{Product, active_count, low_stock};
use foodnova_core::Money;

use crate::order::{OrderStatus, OrderSummary};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardStats {
    pub total_orders: usize,
    pub pending_orders: Vec<OrderSummary>,
    /// Sum of `total_amount` over every order that is not cancelled.
    pub total_revenue: Money,
    pub active_products: usize,
    pub low_stock: Vec<Product>,
}

impl DashboardStats {
    pub fn compute(orders: &[OrderSummary], products: &[Product]) -> Self {
        Self {
            total_orders: orders.len(),
            pending_orders: orders
                .iter()
                .filter(|o| o.status == OrderStatus::Pending)
                .cloned()
                .collect(),
            total_revenue: orders
                .iter()
                .filter(|o| o.status != OrderStatus::Cancelled)
                .map(|o| o.total_amount)
                .sum(),
            active_products: active_count(products),
            low_stock: low_stock(products).into_iter().cloned().collect(),
        }
    }
}

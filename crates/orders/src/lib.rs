//! Orders, receipts and payments as the client sees them.
//!
//! This crate models the order lifecycle without enforcing it: status changes
//! are decided by the API (or an admin), and the client only observes them.
//! What it does own are the local checks that run before any request:
//! checkout form validation and receipt file validation.

pub mod checkout;
pub mod dashboard;
pub mod lifecycle;
pub mod order;
pub mod payment;
pub mod receipt;

pub use checkout::{
    CheckoutError, CheckoutForm, CreateOrderRequest, DeliveryMode, OrderItemRequest,
    PICKUP_DEFAULT_NOTE, PICKUP_PREFIX,
};
pub use dashboard::DashboardStats;
pub use lifecycle::{CustomerAction, customer_action};
pub use order::{Order, OrderFilter, OrderItem, OrderStatus, OrderSummary, StatusUpdate};
pub use payment::{Payment, PaymentMethod, PaymentStatus, PaymentUpdate};
pub use receipt::{
    ALLOWED_RECEIPT_TYPES, MAX_RECEIPT_BYTES, Receipt, ReceiptFile, ReceiptFileError,
    ReceiptReview, ReceiptState, ReceiptStatus, ReviewDecision, mime_from_path,
    validate_receipt_file,
};

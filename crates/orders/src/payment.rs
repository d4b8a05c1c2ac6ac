use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use foodnova_core::{PaymentId, timestamp};

/// How the customer intends to pay. The API accepts free-form values; the
/// storefront offers the first two.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PaymentMethod {
    #[default]
    Etransfer,
    Bank,
    Other(String),
}

impl PaymentMethod {
    pub fn as_str(&self) -> &str {
        match self {
            PaymentMethod::Etransfer => "etransfer",
            PaymentMethod::Bank => "bank",
            PaymentMethod::Other(raw) => raw,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            PaymentMethod::Etransfer => "Bank Transfer",
            PaymentMethod::Bank => "Bank Deposit",
            PaymentMethod::Other(raw) => raw,
        }
    }
}

impl From<String> for PaymentMethod {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "etransfer" => PaymentMethod::Etransfer,
            "bank" => PaymentMethod::Bank,
            _ => PaymentMethod::Other(raw),
        }
    }
}

impl From<PaymentMethod> for String {
    fn from(method: PaymentMethod) -> Self {
        method.as_str().to_string()
    }
}

impl core::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Verified,
    Failed,
}

impl core::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Verified => "verified",
            PaymentStatus::Failed => "failed",
        })
    }
}

/// Payment record attached to an order. Read-only for customers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    pub id: PaymentId,
    pub method: PaymentMethod,
    pub status: PaymentStatus,
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default, with = "timestamp::option")]
    pub verified_at: Option<DateTime<Utc>>,
}

/// Body of `PATCH /admin/payments/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentUpdate {
    pub status: PaymentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

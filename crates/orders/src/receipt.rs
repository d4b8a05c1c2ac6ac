//! Payment receipts: customer-uploaded proof of payment, reviewed by staff.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use foodnova_core::{OrderId, ReceiptId, timestamp};

/// Largest receipt the client will try to upload.
pub const MAX_RECEIPT_BYTES: u64 = 10 * 1024 * 1024;

/// MIME types accepted for receipts.
pub const ALLOWED_RECEIPT_TYPES: [&str; 5] = [
    "image/png",
    "image/jpeg",
    "image/jpg",
    "image/webp",
    "application/pdf",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReceiptStatus {
    Submitted,
    Approved,
    Rejected,
}

impl ReceiptStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReceiptStatus::Submitted => "submitted",
            ReceiptStatus::Approved => "approved",
            ReceiptStatus::Rejected => "rejected",
        }
    }
}

impl core::fmt::Display for ReceiptStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Receipt status with "nothing uploaded yet" folded in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReceiptState {
    Absent,
    Submitted,
    Approved,
    Rejected,
}

impl From<ReceiptStatus> for ReceiptState {
    fn from(status: ReceiptStatus) -> Self {
        match status {
            ReceiptStatus::Submitted => ReceiptState::Submitted,
            ReceiptStatus::Approved => ReceiptState::Approved,
            ReceiptStatus::Rejected => ReceiptState::Rejected,
        }
    }
}

impl ReceiptState {
    pub fn status(&self) -> Option<ReceiptStatus> {
        match self {
            ReceiptState::Absent => None,
            ReceiptState::Submitted => Some(ReceiptStatus::Submitted),
            ReceiptState::Approved => Some(ReceiptStatus::Approved),
            ReceiptState::Rejected => Some(ReceiptStatus::Rejected),
        }
    }
}

impl core::fmt::Display for ReceiptState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.status() {
            Some(status) => status.fmt(f),
            None => f.write_str("absent"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    pub id: ReceiptId,
    #[serde(default)]
    pub order_id: Option<OrderId>,
    pub file_url: String,
    pub status: ReceiptStatus,
    #[serde(default)]
    pub admin_note: Option<String>,
    #[serde(default, with = "timestamp::option")]
    pub uploaded_at: Option<DateTime<Utc>>,
}

/// Staff decision on a submitted receipt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewDecision {
    Approved,
    Rejected,
}

impl From<ReviewDecision> for ReceiptStatus {
    fn from(decision: ReviewDecision) -> Self {
        match decision {
            ReviewDecision::Approved => ReceiptStatus::Approved,
            ReviewDecision::Rejected => ReceiptStatus::Rejected,
        }
    }
}

/// Body of `PATCH /admin/receipts/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptReview {
    pub status: ReviewDecision,
    pub admin_note: Option<String>,
}

impl ReceiptReview {
    /// Blank notes are sent as `null`.
    pub fn new(status: ReviewDecision, note: Option<&str>) -> Self {
        let admin_note = note.map(str::trim).filter(|n| !n.is_empty()).map(str::to_string);
        Self { status, admin_note }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReceiptFileError {
    #[error("Invalid file type. Allowed: PNG, JPG, WEBP, PDF")]
    UnsupportedType(String),

    #[error("File too large. Maximum size: 10MB")]
    TooLarge(u64),
}

/// Check type and size before anything is sent.
pub fn validate_receipt_file(mime_type: &str, size: u64) -> Result<(), ReceiptFileError> {
    let mime = mime_type.trim().to_ascii_lowercase();
    if !ALLOWED_RECEIPT_TYPES.contains(&mime.as_str()) {
        return Err(ReceiptFileError::UnsupportedType(mime));
    }
    if size > MAX_RECEIPT_BYTES {
        return Err(ReceiptFileError::TooLarge(size));
    }
    Ok(())
}

/// Guess a receipt's MIME type from its extension.
pub fn mime_from_path(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "webp" => Some("image/webp"),
        "pdf" => Some("application/pdf"),
        _ => None,
    }
}

/// A validated receipt ready for multipart upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptFile {
    file_name: String,
    mime_type: String,
    bytes: Vec<u8>,
}

impl ReceiptFile {
    pub fn new(
        file_name: impl Into<String>,
        mime_type: &str,
        bytes: Vec<u8>,
    ) -> Result<Self, ReceiptFileError> {
        validate_receipt_file(mime_type, bytes.len() as u64)?;
        Ok(Self {
            file_name: file_name.into(),
            mime_type: mime_type.trim().to_ascii_lowercase(),
            bytes,
        })
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_parts(self) -> (String, String, Vec<u8>) {
        (self.file_name, self.mime_type, self.bytes)
    }
}

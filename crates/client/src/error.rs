//! Client error taxonomy: local validation, server-reported, transport.

use thiserror::Error;

use foodnova_cart::CartError;
use foodnova_core::DomainError;
use foodnova_orders::{CheckoutError, ReceiptFileError};

#[derive(Debug, Error)]
pub enum ClientError {
    /// Rejected before any request was sent.
    #[error("{0}")]
    Validation(String),

    /// The server answered with a non-success status.
    #[error("{detail}")]
    Api { status: u16, detail: String },

    /// No response at all.
    #[error("network error: {0}")]
    Network(String),

    #[error("unexpected response: {0}")]
    Decode(String),

    #[error("local storage error: {0}")]
    Store(String),

    #[error("another request is still in progress")]
    Busy,

    #[error("{0} is not loaded")]
    NotLoaded(&'static str),
}

pub type ClientResult<T> = Result<T, ClientError>;

impl ClientError {
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<CheckoutError> for ClientError {
    fn from(err: CheckoutError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<ReceiptFileError> for ClientError {
    fn from(err: ReceiptFileError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<CartError> for ClientError {
    fn from(err: CartError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<DomainError> for ClientError {
    fn from(err: DomainError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<anyhow::Error> for ClientError {
    fn from(err: anyhow::Error) -> Self {
        Self::Store(format!("{err:#}"))
    }
}

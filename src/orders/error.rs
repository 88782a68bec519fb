//! Error types for the Order collection.

use crate::tracking::TrackingError;
use thiserror::Error;

/// Errors that can occur during order operations.
#[derive(Debug, Error, PartialEq)]
pub enum OrderError {
    /// The requested order was not found.
    #[error("Order not found: {0}")]
    NotFound(String),

    /// The store rejected a draft or a status transition.
    #[error("Order rejected: {0}")]
    Rejected(String),

    /// Tracking-number generation failed; the order was not modified.
    #[error("Tracking number error: {0}")]
    Tracking(#[from] TrackingError),

    /// An error occurred while communicating with the store.
    #[error("Store communication error: {0}")]
    StoreCommunicationError(String),
}

impl From<String> for OrderError {
    fn from(msg: String) -> Self {
        OrderError::StoreCommunicationError(msg)
    }
}

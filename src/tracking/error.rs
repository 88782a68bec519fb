//! Error types for the tracking-number subsystem.

use crate::framework::StoreError;
use thiserror::Error;

/// Errors that can occur while generating a tracking number.
#[derive(Debug, Error, PartialEq)]
pub enum TrackingError {
    /// Every candidate in the attempt budget was already assigned to an order.
    /// Fatal to the calling operation; nothing may be persisted in this case.
    #[error("Tracking number generation exhausted after {attempts} attempts")]
    ExhaustedRetries { attempts: u32 },

    /// The uniqueness check against the order collection failed.
    /// Store outages are surfaced unchanged, never masked or retried here.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Validation outcomes for tracking numbers received from external sources
/// (carrier webhooks, user-entered lookups).
///
/// The two variants are distinct so callers can word feedback differently:
/// "not a valid tracking number" versus "this number doesn't belong to any
/// shipment". Neither occurs in the generation path.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// The string is not exactly 10 ASCII digits.
    #[error("Malformed tracking number")]
    InvalidFormat,

    /// Well-formed, but the final digit does not satisfy the checksum relation.
    #[error("Tracking number checksum mismatch")]
    ChecksumMismatch,
}

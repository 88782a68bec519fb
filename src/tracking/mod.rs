//! Tracking-number generation and validation.
//!
//! The one genuinely algorithmic corner of the system. A tracking number is
//! a 10-digit carrier-style identifier with an embedded check digit; this
//! module owns its format, the weighted-sum checksum, the pure validator for
//! numbers arriving from outside, and the generator that guarantees
//! collection-wide uniqueness through a bounded generate-and-check loop.
//!
//! # Main Components
//!
//! - [`TrackingNumber`] - The validated identifier type
//! - [`validate`] - Pure well-formedness + checksum check, no store round trip
//! - [`TrackingNumberGenerator`] - Bounded generate-and-check-uniqueness loop
//! - [`UniquenessOracle`] - The injected read-only view of persisted orders
//! - [`TrackingError`] / [`ValidationError`] - The two error taxonomies;
//!   generation failures are fatal to the calling operation, validation
//!   failures are recoverable and user-facing

pub mod checksum;
pub mod error;
pub mod generator;

pub use checksum::{validate, TrackingNumber, BODY_SPACE, CARRIER_PREFIX, TRACKING_LEN};
pub use error::{TrackingError, ValidationError};
pub use generator::{TrackingNumberGenerator, UniquenessOracle, MAX_ATTEMPTS};

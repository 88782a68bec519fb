//! Runtime orchestration and lifecycle management.
//!
//! This module contains the infrastructure for managing the service's runtime
//! environment, including:
//!
//! - **Collection lifecycle management**: Starting, wiring, and shutting down
//!   the document collections
//! - **System orchestration**: Wiring the tracking generator to its
//!   uniqueness oracle
//! - **Observability setup**: Initializing tracing and logging
//!
//! # Main Components
//!
//! - [`FulfillmentSystem`] - The primary orchestrator
//! - [`setup_tracing`] - Initializes the tracing/logging infrastructure

pub mod system;
pub mod tracing;

pub use system::*;
pub use self::tracing::*;

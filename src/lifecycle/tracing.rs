//! # Observability & Tracing
//!
//! This module provides the tracing infrastructure for the whole service.
//!
//! ## Overview
//!
//! [`setup_tracing`] initializes structured logging with the `tracing` crate.
//! Log levels are controlled through the `RUST_LOG` environment variable.
//!
//! ## What Gets Traced
//!
//! - **Collection Lifecycle**: Startup, shutdown, and final collection size
//! - **Store Operations**: Insert, Get, Find, Patch, Remove, with structured
//!   fields (document type, ID, whether a find matched)
//! - **Tracking Generation**: Each accepted candidate at `debug`, each
//!   collision at `warn` with the attempt number
//! - **Client Entry Points**: `#[instrument]` spans on every operation
//!
//! ## Usage Examples
//!
//! ```bash
//! # Compact logs
//! RUST_LOG=info cargo run
//!
//! # Show full payloads (drafts, patches, filters)
//! RUST_LOG=debug cargo run
//!
//! # Filter to the store layer only
//! RUST_LOG=shiptrack::framework=debug cargo run
//! ```
//!
//! ## Workflow Trace Example
//!
//! A shipped order with `RUST_LOG=debug` shows the complete flow, including
//! the uniqueness read the generator issues before the ship patch:
//!
//! ```text
//! DEBUG place_order called draft=OrderDraft { customer_id: "cust_1", .. }
//! INFO  Inserted order_id="order_1" size=1
//! INFO  Patched order_id="order_1"
//! DEBUG Find filter=TrackingNumber(..) found=false
//! DEBUG Candidate accepted attempt=1 number=9412345677
//! INFO  Tracking number accepted number=9412345677
//! INFO  Patched order_id="order_1"
//! ```
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // Don't show module paths - we use doc_type instead
        .compact() // Compact format shows spans inline (e.g., "mark_shipped")
        .init();
}

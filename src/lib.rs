#![doc(html_logo_url = "https://www.rust-lang.org/logos/rust-logo-128x128.png")]
#![doc(html_favicon_url = "https://www.rust-lang.org/favicon.ico")]
//! # Shiptrack
//!
//! > **Checksum-validated tracking numbers for an order-fulfillment service.**
//!
//! This crate implements the shipment-tracking core of a storefront backend:
//! a tracking-number generator that guarantees uniqueness against the
//! persisted order collection, a pure validator for numbers arriving from
//! carriers or customers, and the order lifecycle that attaches a number at
//! ship time.
//!
//! ## 🏗️ Design Philosophy
//!
//! ### Why a typed collection layer?
//!
//! The storefront persists its records in an external, schema-flexible
//! document store queried through declarative filters. That store is modeled
//! here as typed collections behind message-passing actors:
//! - **Typed documents**: every collection accepts only its own draft, patch,
//!   and filter payloads, checked at compile time.
//! - **Sequential processing**: each collection owns its state in one task,
//!   so a filter query observes a consistent snapshot with no locks.
//!
//! ### Injected capabilities
//!
//! The tracking generator depends on two capabilities it does not own: a
//! randomness source for the 7-digit body and a read-only uniqueness oracle
//! over persisted orders. Both are injected, which is what makes the
//! collision and exhaustion scenarios deterministic under test.
//!
//! ## 👩‍💻 Architecture Notes
//!
//! ### 1. Two error taxonomies
//! Generation failures ([`TrackingError`](tracking::TrackingError)) are fatal
//! to the calling operation: retries exhausted, or a store outage surfaced
//! unchanged. Validation failures
//! ([`ValidationError`](tracking::ValidationError)) are recoverable and meant
//! for user-facing messaging; `InvalidFormat` and `ChecksumMismatch` stay
//! distinct so a caller can word the two cases differently.
//!
//! ### 2. Reads and writes stay separate
//! The generator performs one read per attempt and never writes. Persisting
//! the accepted number is the caller's single patch, so a failed generation
//! can never leave a partial tracking number behind.
//!
//! ### 3. Observability
//! We use `tracing` everywhere with structured logging: collection lifecycle,
//! every store operation, every generation attempt. See [`lifecycle::tracing`].
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Store ([`framework`])
//! The generic collection layer: [`Document`](framework::Document),
//! [`CollectionActor`](framework::CollectionActor),
//! [`CollectionClient`](framework::CollectionClient).
//!
//! ### 2. The Core ([`tracking`])
//! Tracking-number format, checksum, validator, and the bounded
//! generate-and-check-uniqueness loop.
//!
//! ### 3. The Domain ([`model`], [`orders`])
//! The [`Order`](model::Order) document, its fulfillment status machine, and
//! the collection factory.
//!
//! ### 4. The Interface ([`clients`])
//! [`OrderClient`](clients::OrderClient) wraps the generic client with the
//! domain operations (place, pay, ship, deliver, cancel, tracking lookup) and
//! serves as the production uniqueness oracle.
//!
//! ### 5. The Orchestrator ([`lifecycle`])
//! [`FulfillmentSystem`](lifecycle::FulfillmentSystem) spins everything up,
//! wires the generator to its oracle, and shuts down gracefully.
//!
//! ## 🚀 Quick Start
//!
//! ### Running the Demo
//!
//! ```bash
//! # Run with info logs
//! RUST_LOG=info cargo run
//! ```
//!
//! ### Running Tests
//!
//! ```bash
//! cargo test
//! ```

pub mod clients;
pub mod framework;
pub mod lifecycle;
pub mod model;
pub mod orders;
pub mod tracking;

//! Generic document-collection layer standing in for the external store.
//!
//! This module provides the building blocks for typed collections of documents
//! with insert/get/patch/remove operations and declarative filter queries.
//!
//! # Main Components
//!
//! - [`Document`] - Trait that stored record types implement
//! - [`CollectionActor`] - Generic actor that owns one collection
//! - [`CollectionClient`] - Typed client for querying and mutating a collection
//! - [`StoreError`] - Common error types
//!
//! # Testing
//!
//! See [`mock`] module for utilities to test clients without spawning full collections.

pub mod core;
pub mod mock;

// Re-export core types for convenience
pub use self::core::*;

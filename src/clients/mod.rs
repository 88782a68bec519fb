//! Type-safe wrappers around [`CollectionClient`](crate::framework::CollectionClient).

pub mod order_client;
pub mod store_client;

pub use order_client::*;
pub use store_client::*;

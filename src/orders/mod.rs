//! Order-specific collection wiring and document implementation.

pub mod document;
pub mod error;

pub use error::*;

use crate::clients::OrderClient;
use crate::framework::CollectionActor;
use crate::model::Order;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Creates a new Order collection and its client.
pub fn new() -> (CollectionActor<Order>, OrderClient) {
    let order_id_counter = Arc::new(AtomicU64::new(1));
    let next_order_id = move || {
        let id = order_id_counter.fetch_add(1, Ordering::SeqCst);
        format!("order_{}", id)
    };

    let (actor, generic_client) = CollectionActor::new(32, next_order_id);
    let client = OrderClient::new(generic_client);

    (actor, client)
}

use crate::tracking::TrackingNumber;
use serde::{Deserialize, Serialize};

/// Represents a customer order moving through fulfillment.
///
/// # Document Store
/// This struct implements the [`Document`](crate::framework::Document) trait,
/// allowing it to be held by a [`CollectionActor`](crate::framework::CollectionActor).
///
/// The `tracking_number` is `None` until the order is shipped; the
/// [`OrderPatch::Ship`] transition assigns it exactly once and it is
/// immutable afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: String,
    pub customer_id: String,
    pub product_id: String,
    pub quantity: u32,
    pub total: f64,
    pub status: OrderStatus,
    pub tracking_number: Option<TrackingNumber>,
}

/// Fulfillment states an order passes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    /// Placed by the customer, payment pending.
    Placed,
    /// Payment confirmed (by the external payment webhook).
    Paid,
    /// Handed to the carrier; a tracking number is attached.
    Shipped,
    /// Confirmed delivered.
    Delivered,
    /// Cancelled before shipping.
    Cancelled,
}

/// Payload for placing a new order.
#[derive(Debug, Clone)]
pub struct OrderDraft {
    pub customer_id: String,
    pub product_id: String,
    pub quantity: u32,
    pub total: f64,
}

/// Status-machine mutations applied to a stored order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OrderPatch {
    /// Payment confirmed; only valid from [`OrderStatus::Placed`].
    MarkPaid,
    /// Hand to the carrier and attach the tracking number; only valid from
    /// [`OrderStatus::Paid`] and only while no number is assigned yet.
    Ship { tracking_number: TrackingNumber },
    /// Carrier confirmed delivery; only valid from [`OrderStatus::Shipped`].
    MarkDelivered,
    /// Abort fulfillment; only valid before shipping.
    Cancel,
}

/// Declarative equality filters the order collection can evaluate.
#[derive(Debug, Clone)]
pub enum OrderFilter {
    /// Field equality on the assigned tracking number.
    TrackingNumber(TrackingNumber),
    /// Field equality on the owning customer.
    #[allow(dead_code)]
    Customer(String),
}

impl Order {
    /// Creates a new Order in the [`OrderStatus::Placed`] state.
    ///
    /// # Arguments
    /// * `id` - Unique identifier (typically set by the collection)
    /// * `customer_id` - The purchasing customer
    /// * `product_id` - The purchased product
    /// * `quantity` - Number of units
    /// * `total` - Order total
    pub fn new(
        id: impl Into<String>,
        customer_id: impl Into<String>,
        product_id: impl Into<String>,
        quantity: u32,
        total: f64,
    ) -> Self {
        Self {
            id: id.into(),
            customer_id: customer_id.into(),
            product_id: product_id.into(),
            quantity,
            total,
            status: OrderStatus::Placed,
            tracking_number: None,
        }
    }
}

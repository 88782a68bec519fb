//! Demo binary: drives one order through the full fulfillment flow.
//!
//! 1. Start the [`FulfillmentSystem`].
//! 2. Place and pay an order.
//! 3. Ship it, which generates and attaches a tracking number.
//! 4. Look the order back up by that number, the way a tracking page would.

use shiptrack::lifecycle::{setup_tracing, FulfillmentSystem};
use shiptrack::model::OrderDraft;
use shiptrack::tracking::validate;
use tracing::{error, info, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    // Setup tracing once for the entire application
    setup_tracing();

    info!("Starting fulfillment service demo");

    let system = FulfillmentSystem::new();

    // Place a test order
    let draft = OrderDraft {
        customer_id: "cust_1".to_string(),
        product_id: "prod_42".to_string(),
        quantity: 3,
        total: 74.97,
    };

    let span = tracing::info_span!("order_placement");
    let order_id = async {
        info!("Placing test order");
        system
            .order_client
            .place_order(draft)
            .await
            .map_err(|e| e.to_string())
    }
    .instrument(span)
    .await?;

    info!(order_id = %order_id, "Order placed successfully");

    // Payment confirmation would normally arrive via the payment webhook
    system
        .order_client
        .mark_paid(order_id.clone())
        .await
        .map_err(|e| e.to_string())?;

    info!(order_id = %order_id, "Order marked paid");

    // Ship: generates a collection-unique tracking number and attaches it
    let span = tracing::info_span!("shipping");
    let ship_result = async {
        info!("Shipping order");
        system.ship_order(order_id.clone()).await
    }
    .instrument(span)
    .await;

    let tracking_number = match ship_result {
        Ok(number) => {
            info!(order_id = %order_id, number = %number, "Order shipped");
            number
        }
        Err(e) => {
            error!(error = %e, "Shipping failed");
            return Err(e.to_string());
        }
    };

    // The number is checksum-valid without any store round trip
    validate(tracking_number.as_str()).map_err(|e| e.to_string())?;

    // Tracking lookup, as the storefront's tracking page would issue it
    let tracked = system
        .order_client
        .find_by_tracking(&tracking_number)
        .await
        .map_err(|e| e.to_string())?;

    match tracked {
        Some(order) => info!(order_id = %order.id, status = ?order.status, "Tracking lookup hit"),
        None => error!(number = %tracking_number, "Tracking lookup missed"),
    }

    // Shutdown system gracefully
    system.shutdown().await?;

    info!("Demo completed successfully");
    Ok(())
}

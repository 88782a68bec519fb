use crate::clients::OrderClient;
use crate::orders::OrderError;
use crate::tracking::{TrackingNumber, TrackingNumberGenerator};
use tracing::{error, info};

/// The main runtime orchestrator for the fulfillment service.
///
/// `FulfillmentSystem` is responsible for:
/// - **Lifecycle Management**: Starting and stopping the order collection
/// - **Dependency Wiring**: Building the tracking-number generator over the
///   order client, which doubles as its uniqueness oracle
/// - **Resource Coordination**: Owning the shared ID generator for orders
///
/// # Example
///
/// ```ignore
/// let system = FulfillmentSystem::new();
///
/// let order_id = system.order_client.place_order(draft).await?;
/// system.order_client.mark_paid(order_id.clone()).await?;
/// let tracking = system.ship_order(order_id).await?;
///
/// // Gracefully shut down when done
/// system.shutdown().await?;
/// ```
pub struct FulfillmentSystem {
    /// Client for interacting with the Order collection
    pub order_client: OrderClient,

    /// Tracking-number generator wired to the order collection as its
    /// uniqueness oracle
    pub tracking: TrackingNumberGenerator<OrderClient>,

    /// Task handles for all running collections (used for graceful shutdown)
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl FulfillmentSystem {
    /// Creates and initializes a new `FulfillmentSystem` with the order
    /// collection running.
    ///
    /// This method:
    /// 1. Creates the ID generator for orders
    /// 2. Spawns the Order collection in its own Tokio task
    /// 3. Wires the tracking generator to a clone of the order client
    pub fn new() -> Self {
        let (order_actor, order_client) = crate::orders::new();
        let order_handle = tokio::spawn(order_actor.run());

        let tracking = TrackingNumberGenerator::new(order_client.clone());

        Self {
            order_client,
            tracking,
            handles: vec![order_handle],
        }
    }

    /// Ships `order_id` using the system's tracking-number generator.
    pub async fn ship_order(&self, order_id: String) -> Result<TrackingNumber, OrderError> {
        self.order_client.mark_shipped(order_id, &self.tracking).await
    }

    /// Gracefully shuts down the entire system.
    ///
    /// Dropping the clients closes their channels; each collection actor
    /// detects the closed channel and exits its event loop. The tracking
    /// generator holds its own client clone (the oracle), so it must be
    /// dropped too before the order collection can stop.
    ///
    /// # Returns
    ///
    /// - `Ok(())` if all collections shut down cleanly
    /// - `Err(String)` if any collection task failed or panicked
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");

        drop(self.order_client);
        drop(self.tracking);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Collection task failed: {:?}", e);
                return Err(format!("Collection task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}

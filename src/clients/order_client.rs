use crate::clients::store_client::StoreClient;
use crate::framework::{CollectionClient, StoreError};
use crate::model::{Order, OrderDraft, OrderFilter, OrderPatch};
use crate::orders::OrderError;
use crate::tracking::{TrackingNumber, TrackingNumberGenerator, UniquenessOracle};
use async_trait::async_trait;
use tracing::{debug, info, instrument};

/// Client for interacting with the Order collection.
///
/// Shipping is the only orchestrated operation: [`OrderClient::mark_shipped`]
/// sequences the read-only tracking-number generation and the single patch
/// that attaches the accepted number.
#[derive(Clone)]
pub struct OrderClient {
    inner: CollectionClient<Order>,
}

fn map_store_error(e: StoreError) -> OrderError {
    match e {
        StoreError::NotFound(id) => OrderError::NotFound(id),
        StoreError::Rejected(msg) => OrderError::Rejected(msg),
        other => OrderError::StoreCommunicationError(other.to_string()),
    }
}

impl OrderClient {
    pub fn new(inner: CollectionClient<Order>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self, draft))]
    pub async fn place_order(&self, draft: OrderDraft) -> Result<String, OrderError> {
        debug!(?draft, "place_order called");
        info!("Sending insert to collection");
        self.inner.insert(draft).await.map_err(map_store_error)
    }

    /// Records the external payment webhook's confirmation on the order.
    #[instrument(skip(self))]
    pub async fn mark_paid(&self, id: String) -> Result<Order, OrderError> {
        debug!("Sending request");
        self.inner
            .patch(id, OrderPatch::MarkPaid)
            .await
            .map_err(map_store_error)
    }

    /// Ships the order: generates a collection-unique tracking number, then
    /// attaches it with a single patch that also moves the status to Shipped.
    ///
    /// Generation is read-only. When it fails (retries exhausted or store
    /// error) the order is left untouched; no partial number is persisted.
    #[instrument(skip(self, generator))]
    pub async fn mark_shipped<O: UniquenessOracle>(
        &self,
        id: String,
        generator: &TrackingNumberGenerator<O>,
    ) -> Result<TrackingNumber, OrderError> {
        debug!("Sending request");
        let tracking_number = generator.generate().await?;
        info!(number = %tracking_number, "Tracking number accepted");

        self.inner
            .patch(
                id,
                OrderPatch::Ship {
                    tracking_number: tracking_number.clone(),
                },
            )
            .await
            .map_err(map_store_error)?;
        Ok(tracking_number)
    }

    /// Records carrier-confirmed delivery.
    #[instrument(skip(self))]
    pub async fn mark_delivered(&self, id: String) -> Result<Order, OrderError> {
        debug!("Sending request");
        self.inner
            .patch(id, OrderPatch::MarkDelivered)
            .await
            .map_err(map_store_error)
    }

    /// Cancels an order that has not shipped yet.
    #[instrument(skip(self))]
    pub async fn cancel(&self, id: String) -> Result<Order, OrderError> {
        debug!("Sending request");
        self.inner
            .patch(id, OrderPatch::Cancel)
            .await
            .map_err(map_store_error)
    }

    /// Looks up the order carrying `number`, if any.
    ///
    /// This is the same equality query the generator consults as its
    /// uniqueness oracle; exposed here for external tracking lookups.
    #[instrument(skip(self, number))]
    pub async fn find_by_tracking(
        &self,
        number: &TrackingNumber,
    ) -> Result<Option<Order>, OrderError> {
        debug!(number = %number, "Sending request");
        self.inner
            .find(OrderFilter::TrackingNumber(number.clone()))
            .await
            .map_err(map_store_error)
    }
}

/// The production uniqueness oracle: field equality on the tracking number
/// against the persisted order collection. Store failures pass through
/// unchanged so the generator can surface them unmasked.
#[async_trait]
impl UniquenessOracle for OrderClient {
    async fn is_assigned(&self, candidate: &TrackingNumber) -> Result<bool, StoreError> {
        let hit = self
            .inner
            .find(OrderFilter::TrackingNumber(candidate.clone()))
            .await?;
        Ok(hit.is_some())
    }
}

#[async_trait]
impl StoreClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &CollectionClient<Order> {
        &self.inner
    }

    fn map_error(e: StoreError) -> Self::Error {
        map_store_error(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::MockCollection;
    use crate::model::OrderStatus;
    use crate::tracking::TrackingError;

    fn shipped_order(number: &TrackingNumber) -> Order {
        let mut order = Order::new("order_1", "cust_1", "prod_1", 1, 10.0);
        order.status = OrderStatus::Shipped;
        order.tracking_number = Some(number.clone());
        order
    }

    #[tokio::test]
    async fn test_order_client_answers_as_oracle() {
        let mut mock = MockCollection::<Order>::new();
        let number = TrackingNumber::parse("9412345677").unwrap();

        mock.expect_find().return_ok(Some(shipped_order(&number)));
        mock.expect_find().return_ok(None);

        let client = OrderClient::new(mock.client());
        assert!(client.is_assigned(&number).await.unwrap());
        assert!(!client.is_assigned(&number).await.unwrap());

        mock.verify();
    }

    #[tokio::test]
    async fn test_mark_shipped_surfaces_store_outage_without_patching() {
        let mut mock = MockCollection::<Order>::new();
        mock.expect_find().return_err(StoreError::StoreClosed);

        let client = OrderClient::new(mock.client());
        let generator = TrackingNumberGenerator::with_body_source(client.clone(), || 1234567);

        let err = client
            .mark_shipped("order_1".to_string(), &generator)
            .await
            .unwrap_err();
        assert_eq!(
            err,
            OrderError::Tracking(TrackingError::Store(StoreError::StoreClosed))
        );

        // Only the uniqueness read ran; no patch was attempted.
        mock.verify();
    }
}

//! Collection-unique tracking-number generation.
//!
//! The generator draws a random 7-digit body, stamps the carrier prefix and
//! check digit, and asks the uniqueness oracle whether any persisted order
//! already carries the candidate. Collisions retry up to a fixed budget;
//! exhausting the budget is an error, not a loop. Each attempt is one read
//! against the store and the generator itself never writes: persisting the
//! accepted number onto the order is the caller's separate patch.

use super::checksum::{TrackingNumber, BODY_SPACE};
use super::error::TrackingError;
use crate::framework::StoreError;
use async_trait::async_trait;
use rand::Rng;
use tracing::{debug, instrument, warn};

/// Attempt budget before generation gives up with
/// [`TrackingError::ExhaustedRetries`]. Collisions are practically improbable
/// at ten million bodies, but the bound keeps the loop finite if the random
/// space saturates or the store keeps reporting a false collision.
pub const MAX_ATTEMPTS: u32 = 5;

/// Read-only view of the persisted order collection, consulted once per
/// generation attempt.
///
/// The production implementation is [`OrderClient`](crate::clients::OrderClient),
/// which evaluates an equality filter on the tracking-number field. Tests
/// substitute scripted oracles to make collision scenarios deterministic.
#[async_trait]
pub trait UniquenessOracle: Send + Sync {
    /// Returns `true` when some persisted order already carries `candidate`.
    async fn is_assigned(&self, candidate: &TrackingNumber) -> Result<bool, StoreError>;
}

/// Generates carrier-valid, collection-unique tracking numbers.
///
/// Randomness is an injected capability (the `draw_body` closure) so the
/// exhaustion scenario is testable without true randomness; the default
/// source draws uniformly from `[0, 10_000_000)`.
pub struct TrackingNumberGenerator<O> {
    oracle: O,
    draw_body: Box<dyn Fn() -> u32 + Send + Sync>,
}

impl<O: UniquenessOracle> TrackingNumberGenerator<O> {
    /// Creates a generator backed by the process-wide random source.
    pub fn new(oracle: O) -> Self {
        Self::with_body_source(oracle, || rand::rng().random_range(0..BODY_SPACE))
    }

    /// Creates a generator with an injected body source.
    pub fn with_body_source(
        oracle: O,
        draw_body: impl Fn() -> u32 + Send + Sync + 'static,
    ) -> Self {
        Self {
            oracle,
            draw_body: Box::new(draw_body),
        }
    }

    /// Produces a tracking number no persisted order currently carries.
    ///
    /// Attempts are sequential: each candidate is checked against the oracle
    /// before the next draw. Store failures propagate unchanged; after
    /// [`MAX_ATTEMPTS`] collisions the result is
    /// [`TrackingError::ExhaustedRetries`] and nothing has been written.
    #[instrument(skip(self))]
    pub async fn generate(&self) -> Result<TrackingNumber, TrackingError> {
        for attempt in 1..=MAX_ATTEMPTS {
            let body = (self.draw_body)() % BODY_SPACE;
            let candidate = TrackingNumber::compose(body);

            if !self.oracle.is_assigned(&candidate).await? {
                debug!(attempt, number = %candidate, "Candidate accepted");
                return Ok(candidate);
            }
            warn!(attempt, number = %candidate, "Candidate already assigned");
        }

        Err(TrackingError::ExhaustedRetries {
            attempts: MAX_ATTEMPTS,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracking::{validate, CARRIER_PREFIX};
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    /// Oracle that reports "assigned" for a fixed number of leading calls,
    /// then "free", counting every call it receives.
    struct ScriptedOracle {
        collisions: u32,
        calls: Arc<AtomicU32>,
    }

    #[async_trait]
    impl UniquenessOracle for ScriptedOracle {
        async fn is_assigned(&self, _candidate: &TrackingNumber) -> Result<bool, StoreError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(call < self.collisions)
        }
    }

    /// Oracle whose every call fails, simulating a store outage.
    struct FailingOracle;

    #[async_trait]
    impl UniquenessOracle for FailingOracle {
        async fn is_assigned(&self, _candidate: &TrackingNumber) -> Result<bool, StoreError> {
            Err(StoreError::StoreClosed)
        }
    }

    #[tokio::test]
    async fn test_first_free_candidate_is_returned() {
        let calls = Arc::new(AtomicU32::new(0));
        let oracle = ScriptedOracle { collisions: 0, calls: calls.clone() };
        let generator = TrackingNumberGenerator::with_body_source(oracle, || 1234567);

        let number = generator.generate().await.unwrap();

        assert_eq!(number.as_str(), "9412345677");
        assert_eq!(calls.load(Ordering::SeqCst), 1, "exactly one attempt");
    }

    #[tokio::test]
    async fn test_generated_numbers_validate() {
        let oracle = ScriptedOracle { collisions: 0, calls: Arc::new(AtomicU32::new(0)) };
        let generator = TrackingNumberGenerator::new(oracle);

        for _ in 0..100 {
            let number = generator.generate().await.unwrap();
            assert_eq!(number.as_str().len(), 10);
            assert!(number.as_str().starts_with(CARRIER_PREFIX));
            assert!(validate(number.as_str()).is_ok());
        }
    }

    #[tokio::test]
    async fn test_retries_then_succeeds() {
        let calls = Arc::new(AtomicU32::new(0));
        let oracle = ScriptedOracle { collisions: 2, calls: calls.clone() };
        // Distinct bodies per attempt, deterministically.
        let bodies = Arc::new(AtomicU32::new(0));
        let generator = TrackingNumberGenerator::with_body_source(oracle, move || {
            bodies.fetch_add(1, Ordering::SeqCst)
        });

        let number = generator.generate().await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 3);
        // Third draw produced body 2.
        assert!(number.as_str().starts_with("940000002"));
    }

    #[tokio::test]
    async fn test_exhausted_retries_after_five_collisions() {
        let calls = Arc::new(AtomicU32::new(0));
        let oracle = ScriptedOracle { collisions: u32::MAX, calls: calls.clone() };
        let generator = TrackingNumberGenerator::with_body_source(oracle, || 1234567);

        let err = generator.generate().await.unwrap_err();

        assert_eq!(err, TrackingError::ExhaustedRetries { attempts: MAX_ATTEMPTS });
        assert_eq!(calls.load(Ordering::SeqCst), MAX_ATTEMPTS, "budget is fixed");
    }

    #[tokio::test]
    async fn test_store_failure_propagates_unchanged() {
        let generator = TrackingNumberGenerator::with_body_source(FailingOracle, || 1234567);

        let err = generator.generate().await.unwrap_err();

        assert_eq!(err, TrackingError::Store(StoreError::StoreClosed));
    }
}

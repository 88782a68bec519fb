//! # Mock Framework
//!
//! Utilities for testing clients in isolation.
//!
//! Use [`MockCollection`] to get a client backed by a queue of expectations,
//! or [`mock_collection_client`] for raw channel-level assertions.

use crate::framework::{CollectionClient, Document, StoreError, StoreRequest};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// Represents an expected request to the mock collection.
///
/// Used internally by `MockCollection` to track what requests are expected
/// and what responses should be returned.
#[allow(dead_code)] // Future features: Remove expectations
enum Expectation<T: Document> {
    Get {
        id: T::Id,
        response: Result<Option<T>, StoreError>,
    },
    Insert {
        response: Result<T::Id, StoreError>,
    },
    Find {
        response: Result<Option<T>, StoreError>,
    },
    Patch {
        id: T::Id,
        response: Result<T, StoreError>,
    },
    Remove {
        id: T::Id,
        response: Result<(), StoreError>,
    },
}

/// A mock collection with expectation tracking for fluent testing.
///
/// # Example
/// ```ignore
/// let mut mock = MockCollection::<Order>::new();
/// mock.expect_find().return_ok(None);
/// mock.expect_patch("order_1".to_string()).return_ok(shipped_order);
///
/// let client = mock.client();
/// // Use client in tests...
/// mock.verify(); // Ensures all expectations were met
/// ```
pub struct MockCollection<T: Document> {
    client: CollectionClient<T>,
    expectations: Arc<Mutex<VecDeque<Expectation<T>>>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: Document> MockCollection<T>
where
    T::Id: Send,
    T::Draft: Send,
    T::Patch: Send,
    T::Filter: Send,
{
    /// Creates a new mock collection with no expectations.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<StoreRequest<T>>(100);
        let expectations = Arc::new(Mutex::new(VecDeque::new()));
        let expectations_clone = expectations.clone();

        // Spawn background task to handle requests
        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let mut exps = expectations_clone.lock().unwrap();
                let expectation = exps.pop_front();
                drop(exps); // Release lock before async operations

                match (request, expectation) {
                    (StoreRequest::Get { id: _, respond_to }, Some(Expectation::Get { id: _, response })) => {
                        let _ = respond_to.send(response);
                    }
                    (StoreRequest::Insert { draft: _, respond_to }, Some(Expectation::Insert { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (StoreRequest::Find { filter: _, respond_to }, Some(Expectation::Find { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (StoreRequest::Patch { id: _, patch: _, respond_to }, Some(Expectation::Patch { id: _, response })) => {
                        let _ = respond_to.send(response);
                    }
                    (StoreRequest::Remove { id: _, respond_to }, Some(Expectation::Remove { id: _, response })) => {
                        let _ = respond_to.send(response);
                    }
                    _ => {
                        panic!("Unexpected request or expectation mismatch");
                    }
                }
            }
        });

        Self {
            client: CollectionClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> CollectionClient<T> {
        self.client.clone()
    }

    /// Expects a `get` operation.
    pub fn expect_get(&mut self, id: T::Id) -> GetExpectationBuilder<T> {
        GetExpectationBuilder {
            id,
            expectations: self.expectations.clone(),
        }
    }

    /// Expects an `insert` operation.
    pub fn expect_insert(&mut self) -> InsertExpectationBuilder<T> {
        InsertExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `find` operation.
    pub fn expect_find(&mut self) -> FindExpectationBuilder<T> {
        FindExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `patch` operation.
    pub fn expect_patch(&mut self, id: T::Id) -> PatchExpectationBuilder<T> {
        PatchExpectationBuilder {
            id,
            expectations: self.expectations.clone(),
        }
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }
}

/// Builder for `get` expectations.
pub struct GetExpectationBuilder<T: Document> {
    id: T::Id,
    expectations: Arc<Mutex<VecDeque<Expectation<T>>>>,
}

impl<T: Document> GetExpectationBuilder<T> {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: Option<T>) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(Expectation::Get {
            id: self.id,
            response: Ok(value),
        });
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: StoreError) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(Expectation::Get {
            id: self.id,
            response: Err(error),
        });
    }
}

/// Builder for `insert` expectations.
pub struct InsertExpectationBuilder<T: Document> {
    expectations: Arc<Mutex<VecDeque<Expectation<T>>>>,
}

impl<T: Document> InsertExpectationBuilder<T> {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, id: T::Id) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(Expectation::Insert {
            response: Ok(id),
        });
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: StoreError) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(Expectation::Insert {
            response: Err(error),
        });
    }
}

/// Builder for `find` expectations.
pub struct FindExpectationBuilder<T: Document> {
    expectations: Arc<Mutex<VecDeque<Expectation<T>>>>,
}

impl<T: Document> FindExpectationBuilder<T> {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: Option<T>) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(Expectation::Find {
            response: Ok(value),
        });
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: StoreError) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(Expectation::Find {
            response: Err(error),
        });
    }
}

/// Builder for `patch` expectations.
pub struct PatchExpectationBuilder<T: Document> {
    id: T::Id,
    expectations: Arc<Mutex<VecDeque<Expectation<T>>>>,
}

impl<T: Document> PatchExpectationBuilder<T> {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: T) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(Expectation::Patch {
            id: self.id,
            response: Ok(value),
        });
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: StoreError) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(Expectation::Patch {
            id: self.id,
            response: Err(error),
        });
    }
}

// =============================================================================
// CHANNEL-LEVEL HELPERS
// =============================================================================

/// Creates a mock collection client and a receiver for asserting requests.
///
/// # Testing Strategy
/// In unit/integration tests, we don't want to spin up a full `CollectionActor`
/// if we are just testing the *client* logic (e.g., `OrderClient`).
///
/// Instead, we create a mock client that sends messages to a channel we control
/// (`receiver`). We can then inspect the messages arriving on that channel,
/// assert they are correct, and answer them however the scenario requires
/// (success, failure, collision). This keeps store behavior deterministic.
///
/// **Note**: Consider using [`MockCollection`] for a more fluent API.
pub fn mock_collection_client<T: Document>(buffer_size: usize) -> (CollectionClient<T>, mpsc::Receiver<StoreRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (CollectionClient::new(sender), receiver)
}

/// Helper to verify that the next message is an Insert request
pub async fn expect_insert<T: Document>(receiver: &mut mpsc::Receiver<StoreRequest<T>>) -> Option<(T::Draft, tokio::sync::oneshot::Sender<Result<T::Id, StoreError>>)> {
    match receiver.recv().await {
        Some(StoreRequest::Insert { draft, respond_to }) => Some((draft, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Find request
pub async fn expect_find<T: Document>(receiver: &mut mpsc::Receiver<StoreRequest<T>>) -> Option<(T::Filter, tokio::sync::oneshot::Sender<Result<Option<T>, StoreError>>)> {
    match receiver.recv().await {
        Some(StoreRequest::Find { filter, respond_to }) => Some((filter, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Patch request
pub async fn expect_patch<T: Document>(receiver: &mut mpsc::Receiver<StoreRequest<T>>) -> Option<(T::Id, T::Patch, tokio::sync::oneshot::Sender<Result<T, StoreError>>)> {
    match receiver.recv().await {
        Some(StoreRequest::Patch { id, patch, respond_to }) => Some((id, patch, respond_to)),
        _ => None,
    }
}

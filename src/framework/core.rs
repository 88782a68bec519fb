//! # Core Collection Framework
//!
//! This module defines the generic building blocks for the document-store layer.
//!
//! ## Key Types
//!
//! - [`Document`]: The trait that all stored record types must implement.
//! - [`CollectionActor`]: The generic actor that owns one collection of documents.
//! - [`CollectionClient`]: The generic client for querying and mutating a collection.
//! - [`StoreError`]: Common errors (e.g., StoreClosed, NotFound).

use std::collections::HashMap;
use std::fmt::{Debug, Display};
use std::hash::Hash;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

// =============================================================================
// 1. THE ABSTRACTION (The Document contract)
// =============================================================================

/// Trait that any record type must implement to be held by a [`CollectionActor`].
///
/// # Architecture Note
/// The external persistence service this layer stands in for is schema-flexible:
/// it stores typed documents and answers declarative filter queries. We keep that
/// shape by defining one contract (`Document`) that every stored type satisfies,
/// so the collection loop is written once and reused for any record type.
///
/// Associated types enforce payload safety. A collection of `Order` documents
/// only accepts an `OrderDraft`, an `OrderPatch`, and an `OrderFilter`; the
/// compiler rejects payloads meant for a different collection.
///
/// Documents are passive records. All three methods are synchronous: a draft is
/// shaped into a document, a patch is applied against it, a filter is evaluated
/// against it. Orchestration that spans collections belongs in the clients.
pub trait Document: Clone + Send + Sync + 'static {
    /// The unique identifier for this document (e.g., String, Uuid, u64).
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;

    /// The data required to create a new document (DTO).
    type Draft: Send + Sync + Debug;

    /// A partial mutation applied to an existing document.
    type Patch: Send + Sync + Debug;

    /// A declarative predicate the store evaluates to answer `find` queries
    /// (e.g., field equality on a tracking number).
    type Filter: Send + Sync + Debug;

    /// Construct the full document from the ID and draft payload.
    /// Returns an error string when the draft fails validation.
    fn from_draft(id: Self::Id, draft: Self::Draft) -> Result<Self, String>;

    /// Evaluate a filter against this document.
    fn matches(&self, filter: &Self::Filter) -> bool;

    /// Apply a patch mutation to this document.
    /// Returns an error string when the patch is rejected (e.g., an illegal
    /// state transition).
    fn apply_patch(&mut self, patch: Self::Patch) -> Result<(), String>;
}

// =============================================================================
// 2. THE GENERIC MESSAGES & ERRORS
// =============================================================================

/// Errors that can occur within the store layer itself.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum StoreError {
    #[error("Store closed")]
    StoreClosed,
    #[error("Store dropped response channel")]
    StoreDropped,
    #[error("Document not found: {0}")]
    NotFound(String),
    #[error("Rejected: {0}")]
    Rejected(String),
}

/// Type alias for the one-shot response channel used by collection actors.
pub type Response<T> = oneshot::Sender<Result<T, StoreError>>;

/// Internal message type sent to a collection actor to request operations.
///
/// # Document-Store Shape
/// The variants mirror the operations the external document store exposes:
/// insert a typed draft, fetch by ID, evaluate a filter query, patch an
/// existing record, remove a record. `Find` is the declarative read the
/// tracking-number uniqueness check relies on; it returns at most one
/// matching document or none.
///
/// The type is generic over `T: Document` and uses the associated types from
/// the [`Document`] trait (`Draft`, `Patch`, `Filter`) so every operation is
/// typed to its collection.
#[derive(Debug)]
pub enum StoreRequest<T: Document> {
    Insert {
        draft: T::Draft,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    Find {
        filter: T::Filter,
        respond_to: Response<Option<T>>,
    },
    Patch {
        id: T::Id,
        patch: T::Patch,
        respond_to: Response<T>,
    },
    #[allow(dead_code)]
    Remove {
        id: T::Id,
        respond_to: Response<()>,
    },
}

// =============================================================================
// 3. THE GENERIC COLLECTION ACTOR
// =============================================================================

/// The generic actor that owns one collection of documents.
///
/// # Architecture Note
/// This struct is the "server" half of the store. It owns the state
/// (`documents`) and the receiver end of the channel.
///
/// **Concurrency Model**:
/// Each collection processes its messages sequentially in its own task, so the
/// `documents` map needs no `Mutex`. A `Find` therefore observes a consistent
/// snapshot of the collection: no insert or patch interleaves with it.
pub struct CollectionActor<T: Document> {
    receiver: mpsc::Receiver<StoreRequest<T>>,
    documents: HashMap<T::Id, T>,
    next_id_fn: Box<dyn Fn() -> T::Id + Send + Sync>,
}

impl<T: Document> CollectionActor<T> {
    pub fn new(
        buffer_size: usize,
        next_id_fn: impl Fn() -> T::Id + Send + Sync + 'static,
    ) -> (Self, CollectionClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            documents: HashMap::new(),
            next_id_fn: Box::new(next_id_fn),
        };
        let client = CollectionClient::new(sender);
        (actor, client)
    }

    /// Runs the collection's event loop, processing messages until the channel closes.
    pub async fn run(mut self) {
        // Extract just the type name (e.g., "Order" instead of "shiptrack::model::order::Order")
        let doc_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(doc_type, "Collection started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                StoreRequest::Insert { draft, respond_to } => {
                    debug!(doc_type, ?draft, "Insert");
                    let id = (self.next_id_fn)();

                    match T::from_draft(id.clone(), draft) {
                        Ok(doc) => {
                            self.documents.insert(id.clone(), doc);
                            info!(doc_type, %id, size = self.documents.len(), "Inserted");
                            let _ = respond_to.send(Ok(id));
                        }
                        Err(e) => {
                            warn!(doc_type, error = %e, "Insert rejected");
                            let _ = respond_to.send(Err(StoreError::Rejected(e)));
                        }
                    }
                }
                StoreRequest::Get { id, respond_to } => {
                    let doc = self.documents.get(&id).cloned();
                    let found = doc.is_some();
                    debug!(doc_type, %id, found, "Get");
                    let _ = respond_to.send(Ok(doc));
                }
                StoreRequest::Find { filter, respond_to } => {
                    // At most one match is returned, per the store contract.
                    let doc = self.documents.values().find(|d| d.matches(&filter)).cloned();
                    let found = doc.is_some();
                    debug!(doc_type, ?filter, found, "Find");
                    let _ = respond_to.send(Ok(doc));
                }
                StoreRequest::Patch { id, patch, respond_to } => {
                    debug!(doc_type, %id, ?patch, "Patch");
                    if let Some(doc) = self.documents.get_mut(&id) {
                        if let Err(e) = doc.apply_patch(patch) {
                            warn!(doc_type, %id, error = %e, "Patch rejected");
                            let _ = respond_to.send(Err(StoreError::Rejected(e)));
                            continue;
                        }
                        info!(doc_type, %id, "Patched");
                        let _ = respond_to.send(Ok(doc.clone()));
                    } else {
                        warn!(doc_type, %id, "Not found");
                        let _ = respond_to.send(Err(StoreError::NotFound(id.to_string())));
                    }
                }
                StoreRequest::Remove { id, respond_to } => {
                    debug!(doc_type, %id, "Remove");
                    if self.documents.remove(&id).is_some() {
                        info!(doc_type, %id, size = self.documents.len(), "Removed");
                        let _ = respond_to.send(Ok(()));
                    } else {
                        warn!(doc_type, %id, "Not found");
                        let _ = respond_to.send(Err(StoreError::NotFound(id.to_string())));
                    }
                }
            }
        }

        info!(doc_type, size = self.documents.len(), "Shutdown");
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

/// A type-safe client for interacting with a [`CollectionActor`].
#[derive(Clone)]
pub struct CollectionClient<T: Document> {
    sender: mpsc::Sender<StoreRequest<T>>,
}

impl<T: Document> CollectionClient<T> {
    pub fn new(sender: mpsc::Sender<StoreRequest<T>>) -> Self {
        Self { sender }
    }

    pub async fn insert(&self, draft: T::Draft) -> Result<T::Id, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender.send(StoreRequest::Insert { draft, respond_to })
            .await.map_err(|_| StoreError::StoreClosed)?;
        response.await.map_err(|_| StoreError::StoreDropped)?
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender.send(StoreRequest::Get { id, respond_to })
            .await.map_err(|_| StoreError::StoreClosed)?;
        response.await.map_err(|_| StoreError::StoreDropped)?
    }

    /// Evaluates a filter against the collection, returning the first match or `None`.
    pub async fn find(&self, filter: T::Filter) -> Result<Option<T>, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender.send(StoreRequest::Find { filter, respond_to })
            .await.map_err(|_| StoreError::StoreClosed)?;
        response.await.map_err(|_| StoreError::StoreDropped)?
    }

    pub async fn patch(&self, id: T::Id, patch: T::Patch) -> Result<T, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender.send(StoreRequest::Patch { id, patch, respond_to })
            .await.map_err(|_| StoreError::StoreClosed)?;
        response.await.map_err(|_| StoreError::StoreDropped)?
    }

    #[allow(dead_code)]
    pub async fn remove(&self, id: T::Id) -> Result<(), StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender.send(StoreRequest::Remove { id, respond_to })
            .await.map_err(|_| StoreError::StoreClosed)?;
        response.await.map_err(|_| StoreError::StoreDropped)?
    }
}

// =============================================================================
// 5. EXAMPLE USAGE (Test)
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;

    // --- Domain Definition ---

    #[derive(Clone, Debug, PartialEq)]
    struct Coupon {
        id: String,
        code: String,
        percent_off: u32,
        active: bool,
    }

    #[derive(Debug)]
    struct CouponDraft {
        code: String,
        percent_off: u32,
    }

    #[derive(Debug)]
    enum CouponPatch {
        Deactivate,
    }

    #[derive(Debug)]
    enum CouponFilter {
        Code(String),
    }

    impl Document for Coupon {
        type Id = String;
        type Draft = CouponDraft;
        type Patch = CouponPatch;
        type Filter = CouponFilter;

        fn from_draft(id: String, draft: CouponDraft) -> Result<Self, String> {
            if draft.percent_off > 100 {
                return Err(format!("percent_off out of range: {}", draft.percent_off));
            }
            Ok(Self {
                id,
                code: draft.code,
                percent_off: draft.percent_off,
                active: true,
            })
        }

        fn matches(&self, filter: &CouponFilter) -> bool {
            match filter {
                CouponFilter::Code(code) => self.code == *code,
            }
        }

        fn apply_patch(&mut self, patch: CouponPatch) -> Result<(), String> {
            match patch {
                CouponPatch::Deactivate => {
                    if !self.active {
                        return Err("coupon already inactive".to_string());
                    }
                    self.active = false;
                    Ok(())
                }
            }
        }
    }

    // --- Test ---

    #[tokio::test]
    async fn test_collection_actor_with_find() {
        // ID Generator
        let counter = Arc::new(AtomicU64::new(1));
        let next_id = move || {
            let id = counter.fetch_add(1, Ordering::SeqCst);
            format!("coupon_{}", id)
        };

        // Start Actor
        let (actor, client) = CollectionActor::<Coupon>::new(10, next_id);
        tokio::spawn(actor.run());

        // 1. Insert
        let draft = CouponDraft { code: "WELCOME10".into(), percent_off: 10 };
        let id: String = client.insert(draft).await.unwrap();

        // 2. Find by code
        let found = client.find(CouponFilter::Code("WELCOME10".into())).await.unwrap();
        assert_eq!(found.as_ref().map(|c| c.id.as_str()), Some(id.as_str()));

        // 3. Find miss
        let missing = client.find(CouponFilter::Code("NOPE".into())).await.unwrap();
        assert!(missing.is_none());

        // 4. Patch
        let patched = client.patch(id.clone(), CouponPatch::Deactivate).await.unwrap();
        assert!(!patched.active);

        // 5. Patch rejected on second deactivate
        let err = client.patch(id.clone(), CouponPatch::Deactivate).await.unwrap_err();
        assert!(matches!(err, StoreError::Rejected(_)));

        // 6. Remove
        client.remove(id.clone()).await.unwrap();
        let gone = client.get(id.clone()).await.unwrap();
        assert!(gone.is_none());
    }

    #[tokio::test]
    async fn test_insert_rejects_invalid_draft() {
        let (actor, client) = CollectionActor::<Coupon>::new(10, || "coupon_1".to_string());
        tokio::spawn(actor.run());

        let draft = CouponDraft { code: "TOOBIG".into(), percent_off: 150 };
        let err = client.insert(draft).await.unwrap_err();
        assert!(matches!(err, StoreError::Rejected(_)));
    }
}

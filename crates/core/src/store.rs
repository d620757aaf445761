//! Document store contract.
//!
//! Every service keeps its collection in memory as the source of truth and
//! rewrites the whole collection after each mutation. The store is a plain
//! serialization boundary: it owns nothing and never fails on a missing
//! collection.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Named collections persisted by the back-office services.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Collection {
    Inventory,
    Orders,
    Users,
    WorkLogs,
}

impl Collection {
    pub const ALL: [Collection; 4] = [
        Collection::Inventory,
        Collection::Orders,
        Collection::Users,
        Collection::WorkLogs,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Collection::Inventory => "inventory",
            Collection::Orders => "orders",
            Collection::Users => "users",
            Collection::WorkLogs => "worklogs",
        }
    }
}

impl core::fmt::Display for Collection {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// Persistence failure. Always non-fatal for the in-memory session.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("i/o error on collection '{collection}': {message}")]
    Io {
        collection: Collection,
        message: String,
    },

    #[error("failed to encode collection '{collection}': {message}")]
    Encode {
        collection: Collection,
        message: String,
    },

    #[error("failed to decode collection '{collection}': {message}")]
    Decode {
        collection: Collection,
        message: String,
    },
}

impl StoreError {
    pub fn collection(&self) -> Collection {
        match self {
            StoreError::Io { collection, .. }
            | StoreError::Encode { collection, .. }
            | StoreError::Decode { collection, .. } => *collection,
        }
    }
}

/// Whole-collection load/save.
pub trait DocumentStore: Send + Sync {
    /// Load a collection. A collection that was never saved loads as empty.
    fn load<T: DeserializeOwned>(&self, collection: Collection) -> Result<Vec<T>, StoreError>;

    /// Replace a collection with `items`.
    fn save<T: Serialize>(&self, collection: Collection, items: &[T]) -> Result<(), StoreError>;
}

impl<S> DocumentStore for Arc<S>
where
    S: DocumentStore + ?Sized,
{
    fn load<T: DeserializeOwned>(&self, collection: Collection) -> Result<Vec<T>, StoreError> {
        (**self).load(collection)
    }

    fn save<T: Serialize>(&self, collection: Collection, items: &[T]) -> Result<(), StoreError> {
        (**self).save(collection, items)
    }
}

impl<S> DocumentStore for &S
where
    S: DocumentStore + ?Sized,
{
    fn load<T: DeserializeOwned>(&self, collection: Collection) -> Result<Vec<T>, StoreError> {
        (**self).load(collection)
    }

    fn save<T: Serialize>(&self, collection: Collection, items: &[T]) -> Result<(), StoreError> {
        (**self).save(collection, items)
    }
}

/// Outcome of the write-through that follows a mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Durability {
    Saved,
    Failed(StoreError),
}

impl Durability {
    pub fn is_saved(&self) -> bool {
        matches!(self, Durability::Saved)
    }

    pub fn error(&self) -> Option<&StoreError> {
        match self {
            Durability::Saved => None,
            Durability::Failed(err) => Some(err),
        }
    }
}

impl From<Result<(), StoreError>> for Durability {
    fn from(result: Result<(), StoreError>) -> Self {
        match result {
            Ok(()) => Durability::Saved,
            Err(err) => Durability::Failed(err),
        }
    }
}

/// A business outcome paired with the durability of its write-through.
///
/// The in-memory change behind `outcome` has already happened regardless of
/// `durability`; a failed save is a warning, not a rollback.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct Committed<T> {
    pub outcome: T,
    pub durability: Durability,
}

impl<T> Committed<T> {
    pub fn new(outcome: T, durability: Durability) -> Self {
        Self {
            outcome,
            durability,
        }
    }

    pub fn is_durable(&self) -> bool {
        self.durability.is_saved()
    }

    pub fn into_outcome(self) -> T {
        self.outcome
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Committed<U> {
        Committed {
            outcome: f(self.outcome),
            durability: self.durability,
        }
    }
}

/// Save `items` and log (but swallow) any failure.
pub fn write_through<S, T>(store: &S, collection: Collection, items: &[T]) -> Durability
where
    S: DocumentStore + ?Sized,
    T: Serialize,
{
    let durability = Durability::from(store.save(collection, items));
    if let Durability::Failed(err) = &durability {
        tracing::error!(%collection, error = %err, "write-through failed; in-memory state kept");
    }
    durability
}

/// Load a collection, falling back to an empty list when the load fails.
pub fn load_or_empty<S, T>(store: &S, collection: Collection) -> Vec<T>
where
    S: DocumentStore + ?Sized,
    T: DeserializeOwned,
{
    match store.load(collection) {
        Ok(items) => {
            tracing::debug!(%collection, count = items.len(), "collection loaded");
            items
        }
        Err(err) => {
            tracing::error!(%collection, error = %err, "failed to load collection; starting empty");
            Vec::new()
        }
    }
}

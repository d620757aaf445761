use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;

use musicshop_core::{Collection, DocumentStore, StoreError};

/// In-memory document store.
///
/// Collections are held as JSON values so loads go through the same serde
/// path as the file backend. Saves can be forced to fail to exercise the
/// durability reporting of the services.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    collections: RwLock<HashMap<Collection, JsonValue>>,
    save_counts: RwLock<HashMap<Collection, usize>>,
    fail_saves: AtomicBool,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent save fail with an I/O error (or succeed again).
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    /// Number of successful saves of `collection`.
    pub fn save_count(&self, collection: Collection) -> usize {
        self.save_counts
            .read()
            .map(|counts| counts.get(&collection).copied().unwrap_or(0))
            .unwrap_or(0)
    }

    /// Raw persisted snapshot of `collection`, if it was ever saved.
    pub fn snapshot(&self, collection: Collection) -> Option<JsonValue> {
        self.collections.read().ok()?.get(&collection).cloned()
    }

    /// Pre-populate a collection without counting it as a save.
    pub fn seed<T: Serialize>(&self, collection: Collection, items: &[T]) -> Result<(), StoreError> {
        let value = encode(collection, items)?;
        let mut map = self.collections.write().map_err(|_| poisoned(collection))?;
        map.insert(collection, value);
        Ok(())
    }
}

fn encode<T: Serialize>(collection: Collection, items: &[T]) -> Result<JsonValue, StoreError> {
    serde_json::to_value(items).map_err(|e| StoreError::Encode {
        collection,
        message: e.to_string(),
    })
}

fn poisoned(collection: Collection) -> StoreError {
    StoreError::Io {
        collection,
        message: "lock poisoned".to_string(),
    }
}

impl DocumentStore for InMemoryDocumentStore {
    fn load<T: DeserializeOwned>(&self, collection: Collection) -> Result<Vec<T>, StoreError> {
        let map = self.collections.read().map_err(|_| poisoned(collection))?;
        match map.get(&collection) {
            None => Ok(Vec::new()),
            Some(value) => serde_json::from_value(value.clone()).map_err(|e| StoreError::Decode {
                collection,
                message: e.to_string(),
            }),
        }
    }

    fn save<T: Serialize>(&self, collection: Collection, items: &[T]) -> Result<(), StoreError> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(StoreError::Io {
                collection,
                message: "simulated write failure".to_string(),
            });
        }

        let value = encode(collection, items)?;
        self.collections
            .write()
            .map_err(|_| poisoned(collection))?
            .insert(collection, value);
        *self
            .save_counts
            .write()
            .map_err(|_| poisoned(collection))?
            .entry(collection)
            .or_default() += 1;
        Ok(())
    }
}

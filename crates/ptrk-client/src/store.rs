//! Shared store of the latest state per tracked object.
//!
//! The store is the only data shared between the ingestion and relay
//! loops. One `std::sync::Mutex` serializes every access; it is never
//! held across an `.await`.
//!
//! ```text
//!  Ingestion ──upsert──▶ ┌──────────────────────────────┐
//!                        │ Mutex<IndexMap<ObjectId, ..>>│
//!  Relay ◀──snapshot──── └──────────────────────────────┘
//! ```
//!
//! Iteration follows first-seen order. Replacing an existing object
//! keeps its position.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use indexmap::IndexMap;
use ptrk_core::{ObjectId, TrackedObject};

/// Outcome of an [`ObjectStore::upsert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    /// The id was new and the object was appended.
    Inserted,
    /// An object with the same id was replaced in place.
    Replaced,
}

/// Cheap-to-clone handle to the shared object map.
#[derive(Debug, Clone, Default)]
pub struct ObjectStore {
    objects: Arc<Mutex<IndexMap<ObjectId, TrackedObject>>>,
}

impl ObjectStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts the object, or replaces the one with the same id.
    pub fn upsert(&self, object: TrackedObject) -> Upsert {
        match self.lock().insert(object.id, object) {
            Some(_) => Upsert::Replaced,
            None => Upsert::Inserted,
        }
    }

    /// Copies every object, in first-seen order, at a single instant.
    pub fn snapshot(&self) -> Vec<TrackedObject> {
        self.lock().values().copied().collect()
    }

    /// Removes every object.
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Returns the current state of one object.
    pub fn get(&self, id: ObjectId) -> Option<TrackedObject> {
        self.lock().get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // Values are plain `Copy` data written by a single `insert`, so a
    // panic elsewhere cannot leave a half-written entry behind.
    fn lock(&self) -> MutexGuard<'_, IndexMap<ObjectId, TrackedObject>> {
        self.objects.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

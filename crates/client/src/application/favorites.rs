//! The favorites collection - persistent, kind-partitioned, debounced.
//!
//! One store exists per process; the composition root constructs it and
//! hands clones to every entity service (clones share state). Mutations mark
//! the collection dirty and schedule a debounced write so bursts coalesce
//! into a single storage call; `flush` forces the write immediately for
//! toggles and process-suspend hooks.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use serde_json::{json, Value};
use thiserror::Error;

use lorebook_domain::{codec, Entity, EntityKind};

use crate::ports::outbound::{storage_keys, StorageProvider};

/// Default window for coalescing bursts of mutations into one write.
const DEBOUNCE_WINDOW: Duration = Duration::from_millis(1000);

/// Caller-defect failures from the favorites collection.
///
/// These indicate a bug at the call site, not a runtime condition to
/// recover from.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StoreError {
    #[error("invalid entity: id must not be empty")]
    InvalidEntity,
}

struct Collection {
    by_kind: HashMap<EntityKind, Vec<Entity>>,
    dirty: bool,
}

impl Collection {
    fn new() -> Self {
        let mut by_kind = HashMap::new();
        for kind in EntityKind::ALL {
            by_kind.insert(kind, Vec::new());
        }
        Self {
            by_kind,
            dirty: false,
        }
    }
}

/// Process-wide favorites collection with debounced persistence.
///
/// Insertion order within a kind is preserved; membership is keyed by
/// `(kind, id)`. All operations are atomic with respect to each other.
#[derive(Clone)]
pub struct FavoritesStore {
    collection: Arc<Mutex<Collection>>,
    storage: Arc<dyn StorageProvider>,
    debounce: Duration,
    generation: Arc<AtomicU64>,
}

impl FavoritesStore {
    /// Create a store bound to the given storage and restore any persisted
    /// favorites into memory.
    pub fn new(storage: Arc<dyn StorageProvider>) -> Self {
        Self::with_debounce(storage, DEBOUNCE_WINDOW)
    }

    /// Like [`FavoritesStore::new`] with an explicit debounce window.
    pub fn with_debounce(storage: Arc<dyn StorageProvider>, debounce: Duration) -> Self {
        let store = Self {
            collection: Arc::new(Mutex::new(Collection::new())),
            storage,
            debounce,
            generation: Arc::new(AtomicU64::new(0)),
        };
        store.restore();
        store
    }

    /// Add an entity; a no-op if `(kind, id)` is already present.
    pub fn add(&self, entity: Entity) -> Result<(), StoreError> {
        if entity.id().is_empty() {
            return Err(StoreError::InvalidEntity);
        }
        let mut changed = false;
        if let Some(mut collection) = self.locked() {
            let bucket = collection.by_kind.entry(entity.kind()).or_default();
            if !bucket.iter().any(|e| e.id() == entity.id()) {
                bucket.push(entity);
                collection.dirty = true;
                changed = true;
            }
        }
        if changed {
            self.schedule_persist();
        }
        Ok(())
    }

    /// Remove by `(kind, id)`; returns whether a removal occurred.
    pub fn remove(&self, kind: EntityKind, id: &str) -> bool {
        let mut removed = false;
        if let Some(mut collection) = self.locked() {
            let bucket = collection.by_kind.entry(kind).or_default();
            if let Some(index) = bucket.iter().position(|e| e.id() == id) {
                bucket.remove(index);
                collection.dirty = true;
                removed = true;
            }
        }
        if removed {
            self.schedule_persist();
        }
        removed
    }

    /// Remove the entity's `(kind, id)`; returns whether a removal occurred.
    pub fn remove_entity(&self, entity: &Entity) -> bool {
        self.remove(entity.kind(), entity.id())
    }

    pub fn has(&self, kind: EntityKind, id: &str) -> bool {
        self.locked()
            .map(|collection| {
                collection
                    .by_kind
                    .get(&kind)
                    .is_some_and(|bucket| bucket.iter().any(|e| e.id() == id))
            })
            .unwrap_or(false)
    }

    pub fn has_entity(&self, entity: &Entity) -> bool {
        self.has(entity.kind(), entity.id())
    }

    /// All favorites of one kind, insertion order, as a defensive copy.
    pub fn get_by_kind(&self, kind: EntityKind) -> Vec<Entity> {
        self.locked()
            .and_then(|collection| collection.by_kind.get(&kind).cloned())
            .unwrap_or_default()
    }

    /// One favorite by `(kind, id)`.
    pub fn get_by_id(&self, kind: EntityKind, id: &str) -> Option<Entity> {
        self.locked().and_then(|collection| {
            collection
                .by_kind
                .get(&kind)
                .and_then(|bucket| bucket.iter().find(|e| e.id() == id).cloned())
        })
    }

    /// All favorites, grouped in [`EntityKind::ALL`] order, insertion order
    /// within each kind.
    pub fn get_all(&self) -> Vec<Entity> {
        self.locked()
            .map(|collection| {
                let mut all = Vec::new();
                for kind in EntityKind::ALL {
                    if let Some(bucket) = collection.by_kind.get(&kind) {
                        all.extend(bucket.iter().cloned());
                    }
                }
                all
            })
            .unwrap_or_default()
    }

    pub fn count(&self) -> usize {
        self.locked()
            .map(|collection| collection.by_kind.values().map(Vec::len).sum())
            .unwrap_or(0)
    }

    pub fn count_by_kind(&self, kind: EntityKind) -> usize {
        self.locked()
            .map(|collection| collection.by_kind.get(&kind).map(Vec::len).unwrap_or(0))
            .unwrap_or(0)
    }

    /// Remove every favorite and persist immediately.
    pub fn clear(&self) {
        if let Some(mut collection) = self.locked() {
            for bucket in collection.by_kind.values_mut() {
                bucket.clear();
            }
            collection.dirty = true;
        }
        self.flush();
    }

    /// Remove every favorite of one kind (debounced persist).
    pub fn clear_by_kind(&self, kind: EntityKind) {
        let mut changed = false;
        if let Some(mut collection) = self.locked() {
            collection.by_kind.entry(kind).or_default().clear();
            collection.dirty = true;
            changed = true;
        }
        if changed {
            self.schedule_persist();
        }
    }

    pub fn characters(&self) -> Vec<Entity> {
        self.get_by_kind(EntityKind::Character)
    }

    pub fn spells(&self) -> Vec<Entity> {
        self.get_by_kind(EntityKind::Spell)
    }

    pub fn potions(&self) -> Vec<Entity> {
        self.get_by_kind(EntityKind::Potion)
    }

    pub fn books(&self) -> Vec<Entity> {
        self.get_by_kind(EntityKind::Book)
    }

    pub fn movies(&self) -> Vec<Entity> {
        self.get_by_kind(EntityKind::Movie)
    }

    /// Write the collection to storage, unless nothing changed since the
    /// last write.
    pub fn persist(&self) {
        let payload = {
            let Some(mut collection) = self.locked() else {
                return;
            };
            if !collection.dirty {
                return;
            }
            let mut serialized = serde_json::Map::new();
            for kind in EntityKind::ALL {
                let records: Vec<Value> = collection
                    .by_kind
                    .get(&kind)
                    .map(|bucket| {
                        bucket
                            .iter()
                            .map(|entity| {
                                json!({
                                    "type": kind.storage_tag(),
                                    "data": codec::encode(entity),
                                })
                            })
                            .collect()
                    })
                    .unwrap_or_default();
                serialized.insert(kind.as_str().to_string(), Value::Array(records));
            }
            collection.dirty = false;
            Value::Object(serialized)
        };
        match serde_json::to_string(&payload) {
            Ok(data) => self.storage.save(storage_keys::FAVORITES, &data),
            Err(e) => tracing::error!("failed to serialize favorites: {e}"),
        }
    }

    /// Persist immediately, cancelling any pending debounced write.
    pub fn flush(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.persist();
    }

    /// Load favorites from storage into memory, replacing the current
    /// contents for every kind found there. Malformed payloads are treated
    /// as empty; unknown kind or record tags are dropped with a warning.
    pub fn restore(&self) {
        let Some(stored) = self.storage.load(storage_keys::FAVORITES) else {
            return;
        };
        let parsed: Value = match serde_json::from_str(&stored) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("ignoring malformed favorites payload: {e}");
                return;
            }
        };
        let Value::Object(map) = parsed else {
            tracing::warn!("ignoring malformed favorites payload: not an object");
            return;
        };
        let Some(mut collection) = self.locked() else {
            return;
        };
        for (tag, records) in map {
            let Some(kind) = EntityKind::from_tag(&tag) else {
                tracing::warn!(%tag, "skipping stored favorites of unknown kind");
                continue;
            };
            let Value::Array(records) = records else {
                tracing::warn!(kind = %kind, "skipping malformed stored favorites");
                continue;
            };
            let restored: Vec<Entity> = records
                .iter()
                .filter_map(|record| decode_stored(kind, record))
                .collect();
            collection.by_kind.insert(kind, restored);
        }
        collection.dirty = false;
    }

    fn locked(&self) -> Option<MutexGuard<'_, Collection>> {
        match self.collection.lock() {
            Ok(guard) => Some(guard),
            Err(e) => {
                tracing::error!("favorites collection lock poisoned: {e}");
                None
            }
        }
    }

    /// Cancel-and-reschedule: each mutation supersedes any pending write, so
    /// a burst produces exactly one storage call once the window elapses.
    fn schedule_persist(&self) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            self.persist();
            return;
        };
        let store = self.clone();
        handle.spawn(async move {
            tokio::time::sleep(store.debounce).await;
            if store.generation.load(Ordering::SeqCst) == generation {
                store.persist();
            }
        });
    }
}

fn decode_stored(kind: EntityKind, record: &Value) -> Option<Entity> {
    let tag = record.get("type").and_then(Value::as_str).unwrap_or_default();
    if EntityKind::from_storage_tag(tag) != Some(kind) {
        tracing::warn!(tag, "no decoder for stored favorite type");
        return None;
    }
    let Some(data) = record.get("data") else {
        tracing::warn!(kind = %kind, "stored favorite has no data");
        return None;
    };
    match codec::decode(kind, data) {
        Ok(entity) => Some(entity),
        Err(e) => {
            tracing::warn!(kind = %kind, "dropping undecodable stored favorite: {e}");
            None
        }
    }
}

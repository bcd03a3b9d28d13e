//! Unsaved editor state, kept per catalog until the author saves or discards it.
//!
//! Writes are debounced: staging a draft (re)starts a quiet period and the
//! draft is only written once the period has elapsed without another edit.
//! Time is supplied by the caller, so nothing here owns a timer.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::{Duration, Instant};

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use tracing::{debug, warn};

use vitrine_core::CatalogId;

use crate::config::BuilderConfig;

/// Storage key of a catalog's draft.
pub fn draft_key(catalog_id: CatalogId) -> String {
    format!("catalog-draft:{catalog_id}")
}

/// Key/value storage for drafts (browser storage, a file, memory, ...).
pub trait DraftStore: Send + Sync {
    fn load(&self, key: &str) -> Option<JsonValue>;
    fn save(&self, key: &str, value: JsonValue);
    fn clear(&self, key: &str);
}

impl<S> DraftStore for Arc<S>
where
    S: DraftStore + ?Sized,
{
    fn load(&self, key: &str) -> Option<JsonValue> {
        (**self).load(key)
    }

    fn save(&self, key: &str, value: JsonValue) {
        (**self).save(key, value)
    }

    fn clear(&self, key: &str) {
        (**self).clear(key)
    }
}

#[derive(Debug, Default)]
pub struct InMemoryDraftStore {
    inner: RwLock<HashMap<String, JsonValue>>,
}

impl InMemoryDraftStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Each write is a single map operation, so a poisoned lock is logged
    /// and recovered rather than dropping the write.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, JsonValue>> {
        self.inner.read().unwrap_or_else(|poisoned| {
            warn!("draft store lock poisoned, recovering");
            poisoned.into_inner()
        })
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, JsonValue>> {
        self.inner.write().unwrap_or_else(|poisoned| {
            warn!("draft store lock poisoned, recovering");
            poisoned.into_inner()
        })
    }
}

impl DraftStore for InMemoryDraftStore {
    fn load(&self, key: &str) -> Option<JsonValue> {
        self.read().get(key).cloned()
    }

    fn save(&self, key: &str, value: JsonValue) {
        self.write().insert(key.to_string(), value);
    }

    fn clear(&self, key: &str) {
        self.write().remove(key);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebouncePolicy {
    pub quiet_period: Duration,
}

impl DebouncePolicy {
    pub fn new(quiet_period: Duration) -> Self {
        Self { quiet_period }
    }

    /// Write on the first flush after staging.
    pub fn immediate() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn due_at(&self, staged_at: Instant) -> Instant {
        staged_at + self.quiet_period
    }
}

impl From<&BuilderConfig> for DebouncePolicy {
    fn from(config: &BuilderConfig) -> Self {
        Self::new(config.draft_debounce)
    }
}

#[derive(Debug)]
struct Pending {
    value: JsonValue,
    due: Instant,
}

/// Debounced writer in front of a [`DraftStore`].
pub struct DraftAutosave<S> {
    store: S,
    policy: DebouncePolicy,
    pending: HashMap<String, Pending>,
}

impl<S> DraftAutosave<S>
where
    S: DraftStore,
{
    pub fn new(store: S, policy: DebouncePolicy) -> Self {
        Self {
            store,
            policy,
            pending: HashMap::new(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Record the latest draft for `key`, replacing any pending one and
    /// restarting its quiet period at `now`.
    pub fn stage<T: Serialize>(&mut self, key: &str, draft: &T, now: Instant) -> Result<(), serde_json::Error> {
        let value = serde_json::to_value(draft)?;
        self.pending.insert(
            key.to_string(),
            Pending {
                value,
                due: self.policy.due_at(now),
            },
        );
        Ok(())
    }

    pub fn is_pending(&self, key: &str) -> bool {
        self.pending.contains_key(key)
    }

    /// Earliest instant at which a flush would write something.
    pub fn next_due(&self) -> Option<Instant> {
        self.pending.values().map(|p| p.due).min()
    }

    /// Write every draft whose quiet period has elapsed at `now`.
    pub fn flush_due(&mut self, now: Instant) -> usize {
        let due: Vec<String> = self
            .pending
            .iter()
            .filter(|(_, p)| p.due <= now)
            .map(|(k, _)| k.clone())
            .collect();
        for key in &due {
            if let Some(pending) = self.pending.remove(key) {
                self.store.save(key, pending.value);
            }
        }
        if !due.is_empty() {
            debug!(written = due.len(), "drafts saved");
        }
        due.len()
    }

    /// Write every pending draft regardless of its quiet period.
    pub fn flush_all(&mut self) -> usize {
        let written = self.pending.len();
        for (key, pending) in self.pending.drain() {
            self.store.save(&key, pending.value);
        }
        written
    }

    /// Forget the draft for `key`, both pending and stored.
    pub fn discard(&mut self, key: &str) {
        self.pending.remove(key);
        self.store.clear(key);
    }

    /// Latest draft for `key`: the pending one if any, else the stored one.
    ///
    /// A stored draft that no longer decodes as `T` is treated as absent.
    pub fn restore<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = match self.pending.get(key) {
            Some(pending) => pending.value.clone(),
            None => self.store.load(key)?,
        };
        match serde_json::from_value(value) {
            Ok(draft) => Some(draft),
            Err(err) => {
                warn!(key, error = %err, "ignoring undecodable draft");
                None
            }
        }
    }
}

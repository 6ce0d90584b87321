//! Persisted set of enabled source ids
//!
//! Stored as a JSON array under a single key. Reads never fail: a missing
//! key, a store error, or corrupt data all yield the default set (one
//! system source). Writes are fire-and-forget.

use super::traits::KeyValueStore;
use std::collections::BTreeSet;
use std::sync::Arc;

/// Reads and writes the enabled-source set
pub struct ToggleStore {
    store: Arc<dyn KeyValueStore>,
    key: String,
    default_source: String,
}

impl ToggleStore {
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        key: impl Into<String>,
        default_source: impl Into<String>,
    ) -> Self {
        Self {
            store,
            key: key.into(),
            default_source: default_source.into(),
        }
    }

    /// The set used when nothing usable is persisted
    pub fn default_set(&self) -> BTreeSet<String> {
        BTreeSet::from([self.default_source.clone()])
    }

    /// Load the enabled set, falling back to the default
    pub fn load(&self) -> BTreeSet<String> {
        let raw = match self.store.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return self.default_set(),
            Err(e) => {
                tracing::warn!(
                    key = %self.key,
                    error = %e,
                    "reading toggle state failed; using default"
                );
                return self.default_set();
            }
        };
        match serde_json::from_str::<Vec<String>>(&raw) {
            Ok(ids) => ids.into_iter().collect(),
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "corrupt toggle state; using default");
                self.default_set()
            }
        }
    }

    /// Persist the enabled set. Failures are logged, never returned.
    pub fn save(&self, enabled: &BTreeSet<String>) {
        let ids: Vec<&String> = enabled.iter().collect();
        let result = serde_json::to_string(&ids)
            .map_err(super::StorageError::from)
            .and_then(|json| self.store.set(&self.key, &json));
        if let Err(e) = result {
            tracing::warn!(key = %self.key, error = %e, "persisting toggle state failed");
        }
    }
}

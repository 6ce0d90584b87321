//! Registry of known sources, in registration order

use super::file::JsonFileSource;
use super::traits::{Source, SourceCatalog};
use super::types::SYSTEM_SOURCES;
use crate::config::FileSourceConfig;
use std::path::Path;
use std::sync::Arc;

/// Where a registered source came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceOrigin {
    /// One of the fixed system sources
    System,
    /// Discovered through a [`SourceCatalog`]
    User,
}

struct Registered {
    source: Arc<dyn Source>,
    origin: SourceOrigin,
}

/// Ordered set of sources keyed by id
///
/// Registration order is collection order, which is what breaks ties
/// between same-priority duplicates during deduplication.
#[derive(Default)]
pub struct SourceRegistry {
    sources: Vec<Registered>,
}

impl SourceRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a system source
    ///
    /// A source whose id is already registered replaces the earlier one in
    /// place.
    pub fn register_system(&mut self, source: Arc<dyn Source>) {
        let entry = Registered {
            source,
            origin: SourceOrigin::System,
        };
        match self.position(entry.source.id()) {
            Some(i) => self.sources[i] = entry,
            None => self.sources.push(entry),
        }
    }

    /// Register a user-defined source
    ///
    /// Replaces an earlier user source with the same id in place. A system
    /// source is never shadowed: returns false and leaves it registered.
    pub fn register_user(&mut self, source: Arc<dyn Source>) -> bool {
        let entry = Registered {
            source,
            origin: SourceOrigin::User,
        };
        match self.position(entry.source.id()) {
            Some(i) if self.sources[i].origin == SourceOrigin::System => false,
            Some(i) => {
                self.sources[i] = entry;
                true
            }
            None => {
                self.sources.push(entry);
                true
            }
        }
    }

    /// Register file-backed sources from configuration
    ///
    /// Every system source is registered, in its fixed order, reading the
    /// configured file or `<fallback_dir>/<id>.json` (with `:` as `-`).
    /// Other configured entries become user sources.
    pub fn register_files(&mut self, configured: &[FileSourceConfig], fallback_dir: &Path) {
        for id in SYSTEM_SOURCES {
            let path = configured
                .iter()
                .find(|c| c.id == id)
                .map(|c| c.path.clone())
                .unwrap_or_else(|| fallback_dir.join(format!("{}.json", id.replace(':', "-"))));
            self.register_system(Arc::new(JsonFileSource::new(id, path)));
        }
        for entry in configured.iter().filter(|c| !SYSTEM_SOURCES.contains(&c.id.as_str())) {
            self.register_user(Arc::new(JsonFileSource::new(entry.id.clone(), entry.path.clone())));
        }
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.sources.iter().position(|r| r.source.id() == id)
    }

    /// Replace all user sources with the catalog's current listing
    ///
    /// Listed entries that name a system source are skipped; system sources
    /// keep their slot whether or not the catalog lists them. Returns the
    /// number of user sources registered. On catalog failure the user
    /// sources are left as they were and the error is logged.
    pub async fn discover(&mut self, catalog: &dyn SourceCatalog) -> usize {
        match catalog.list_sources().await {
            Ok(found) => {
                self.sources.retain(|r| r.origin == SourceOrigin::System);
                let mut count = 0;
                for source in found {
                    let id = source.id().to_string();
                    if self.register_user(source) {
                        count += 1;
                    } else {
                        tracing::debug!(source = %id, "catalog lists a system source; keeping it");
                    }
                }
                tracing::debug!(count, "discovered user sources");
                count
            }
            Err(e) => {
                tracing::warn!(error = %e, "source discovery failed; keeping known sources");
                0
            }
        }
    }

    /// Look up a source by id
    pub fn get(&self, id: &str) -> Option<Arc<dyn Source>> {
        self.sources
            .iter()
            .find(|r| r.source.id() == id)
            .map(|r| Arc::clone(&r.source))
    }

    pub fn origin(&self, id: &str) -> Option<SourceOrigin> {
        self.sources
            .iter()
            .find(|r| r.source.id() == id)
            .map(|r| r.origin)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.sources.iter().any(|r| r.source.id() == id)
    }

    /// All source ids in registration order
    pub fn ids(&self) -> Vec<String> {
        self.sources.iter().map(|r| r.source.id().to_string()).collect()
    }

    /// All sources in registration order
    pub fn sources(&self) -> Vec<Arc<dyn Source>> {
        self.sources.iter().map(|r| Arc::clone(&r.source)).collect()
    }

    /// Number of registered sources
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

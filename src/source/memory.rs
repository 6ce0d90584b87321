//! In-memory source
//!
//! Holds a fixed entity list and can be scripted to fail its fetch or its
//! count probe independently. Useful for embedding callers and for tests.

use super::traits::Source;
use super::types::{SourceEntity, SourceError, SourceResult};
use async_trait::async_trait;
use std::sync::RwLock;
use std::time::Duration;

#[derive(Debug, Clone, Default)]
struct Script {
    available: bool,
    fetch_error: Option<String>,
    count_error: Option<String>,
    delay: Option<Duration>,
}

/// A source backed by a `Vec<SourceEntity>`
#[derive(Debug)]
pub struct MemorySource {
    id: String,
    entities: RwLock<Vec<SourceEntity>>,
    script: RwLock<Script>,
}

impl MemorySource {
    /// Create an empty, available source
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            entities: RwLock::new(Vec::new()),
            script: RwLock::new(Script {
                available: true,
                ..Default::default()
            }),
        }
    }

    /// Set the entities. Each entity's `source_id` is stamped with this
    /// source's id.
    pub fn with_entities(self, entities: Vec<SourceEntity>) -> Self {
        self.set_entities(entities);
        self
    }

    /// Make every fetch fail with the given message
    pub fn failing_fetch(self, message: impl Into<String>) -> Self {
        self.write_script(|s| s.fetch_error = Some(message.into()));
        self
    }

    /// Make every count probe fail with the given message
    pub fn failing_count(self, message: impl Into<String>) -> Self {
        self.write_script(|s| s.count_error = Some(message.into()));
        self
    }

    /// Report the source as unavailable
    pub fn unavailable(self) -> Self {
        self.write_script(|s| s.available = false);
        self
    }

    /// Sleep before answering each call
    pub fn with_delay(self, delay: Duration) -> Self {
        self.write_script(|s| s.delay = Some(delay));
        self
    }

    /// Replace the held entities
    pub fn set_entities(&self, mut entities: Vec<SourceEntity>) {
        for entity in &mut entities {
            entity.source_id = self.id.clone();
        }
        let mut guard = self.entities.write().unwrap_or_else(|e| e.into_inner());
        *guard = entities;
    }

    fn write_script(&self, f: impl FnOnce(&mut Script)) {
        let mut guard = self.script.write().unwrap_or_else(|e| e.into_inner());
        f(&mut guard);
    }

    fn script(&self) -> Script {
        self.script.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    async fn settle(&self, script: &Script) {
        if let Some(delay) = script.delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl Source for MemorySource {
    fn id(&self) -> &str {
        &self.id
    }

    async fn is_available(&self) -> bool {
        self.script().available
    }

    async fn entity_count(&self) -> SourceResult<usize> {
        let script = self.script();
        self.settle(&script).await;
        if let Some(message) = script.count_error {
            return Err(SourceError::Fetch {
                source_id: self.id.clone(),
                message,
            });
        }
        Ok(self.entities.read().unwrap_or_else(|e| e.into_inner()).len())
    }

    async fn entities(&self) -> SourceResult<Vec<SourceEntity>> {
        let script = self.script();
        self.settle(&script).await;
        if !script.available {
            return Err(SourceError::Unavailable(self.id.clone()));
        }
        if let Some(message) = script.fetch_error {
            return Err(SourceError::Fetch {
                source_id: self.id.clone(),
                message,
            });
        }
        Ok(self.entities.read().unwrap_or_else(|e| e.into_inner()).clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::EntityType;

    #[tokio::test]
    async fn test_entities_are_stamped_with_source_id() {
        let source = MemorySource::new("collection:bookmarks").with_entities(vec![
            SourceEntity::new("W1", EntityType::Work, "W1", "somewhere-else"),
        ]);

        let entities = source.entities().await.unwrap();
        assert_eq!(entities[0].source_id, "collection:bookmarks");
    }

    #[tokio::test]
    async fn test_count_fails_independently_of_fetch() {
        let source = MemorySource::new("cache:local")
            .with_entities(vec![SourceEntity::new("W1", EntityType::Work, "W1", "")])
            .failing_count("index corrupt");

        assert!(source.entity_count().await.is_err());
        assert_eq!(source.entities().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_unavailable_source_fails_fetch() {
        let source = MemorySource::new("collection:history").unavailable();

        assert!(!source.is_available().await);
        assert!(matches!(
            source.entities().await,
            Err(SourceError::Unavailable(_))
        ));
    }
}

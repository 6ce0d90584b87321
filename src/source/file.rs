//! JSON file source
//!
//! Reads a JSON array of [`SourceEntity`] from disk on every fetch.

use super::traits::Source;
use super::types::{SourceEntity, SourceResult};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// A source backed by a JSON file
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    id: String,
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(id: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            id: id.into(),
            path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read(&self) -> SourceResult<Vec<SourceEntity>> {
        let raw = tokio::fs::read_to_string(&self.path).await?;
        let mut entities: Vec<SourceEntity> = serde_json::from_str(&raw)?;
        for entity in &mut entities {
            if entity.source_id.is_empty() {
                entity.source_id = self.id.clone();
            }
        }
        Ok(entities)
    }
}

#[async_trait]
impl Source for JsonFileSource {
    fn id(&self) -> &str {
        &self.id
    }

    async fn is_available(&self) -> bool {
        tokio::fs::try_exists(&self.path).await.unwrap_or(false)
    }

    async fn entity_count(&self) -> SourceResult<usize> {
        Ok(self.read().await?.len())
    }

    async fn entities(&self) -> SourceResult<Vec<SourceEntity>> {
        self.read().await
    }
}

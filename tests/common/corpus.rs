//! Corpus builder for aggregation tests

use mosaic::source::{BOOKMARKS_SOURCE, HISTORY_SOURCE, LOCAL_CACHE_SOURCE, WORKING_SET_SOURCE};
use mosaic::{
    Aggregator, EntityAttributes, EntityType, FixedLayout, JsonFileSource, KeyValueStore,
    MemorySource, MosaicConfig, OpenStore, Position, Relationship, RelationType,
    RelationshipStore, SourceEntity, SqliteStore,
};
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

pub fn work(id: &str, label: &str, year: i32) -> SourceEntity {
    SourceEntity::new(id, EntityType::Work, label, "")
        .with_attributes(EntityAttributes::new().with_year(year))
}

pub fn author(id: &str, name: &str) -> SourceEntity {
    SourceEntity::new(id, EntityType::Author, name, "")
}

/// A fully wired aggregator over a temporary database
pub struct Fixture {
    pub aggregator: Aggregator,
    pub store: Arc<SqliteStore>,
    pub dir: TempDir,
}

impl Fixture {
    pub fn db_path(&self) -> std::path::PathBuf {
        self.dir.path().join("mosaic.db")
    }
}

/// Builds the default corpus; individual sources can be swapped out
pub struct CorpusBuilder {
    working_set: MemorySource,
    bookmarks: MemorySource,
    history: MemorySource,
    cache: Vec<SourceEntity>,
}

impl Default for CorpusBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CorpusBuilder {
    /// Default corpus:
    /// - working set: W1 (resolved), A1
    /// - bookmarks: W1 (unresolved label), W2 citing W1, A1 authoring W2
    /// - history: W3 (2015), isolated
    /// - cache file: W4 authored by A1, plus a reference to an unknown work
    pub fn new() -> Self {
        Self {
            working_set: MemorySource::new(WORKING_SET_SOURCE).with_entities(vec![
                work("W1", "Graph aggregation in practice", 2020),
                author("A1", "Ada Lovelace"),
            ]),
            bookmarks: MemorySource::new(BOOKMARKS_SOURCE).with_entities(vec![
                work("W1", "W1", 2020),
                work("W2", "Deduplication at scale", 2022).with_relationship(Relationship::new(
                    "W1",
                    EntityType::Work,
                    RelationType::References,
                )),
                author("A1", "A1").with_relationship(
                    Relationship::new("W2", EntityType::Work, RelationType::Authorship)
                        .with_author_position("first")
                        .with_score(0.9),
                ),
            ]),
            history: MemorySource::new(HISTORY_SOURCE)
                .with_entities(vec![work("W3", "Forgotten survey", 2015)]),
            cache: vec![
                work("W4", "Cached preprint", 2023)
                    .with_relationship(Relationship::new(
                        "A1",
                        EntityType::Author,
                        RelationType::Authorship,
                    ))
                    .with_relationship(Relationship::new(
                        "W404",
                        EntityType::Work,
                        RelationType::References,
                    )),
            ],
        }
    }

    pub fn failing_history(mut self, message: &str) -> Self {
        self.history = MemorySource::new(HISTORY_SOURCE)
            .failing_fetch(message)
            .failing_count(message);
        self
    }

    fn write_cache(&self, dir: &Path) -> std::path::PathBuf {
        let path = dir.join("cache.json");
        let json = serde_json::to_string(&self.cache).expect("cache fixture serializes");
        std::fs::write(&path, json).expect("cache fixture written");
        path
    }

    pub fn build(self) -> Fixture {
        let dir = tempfile::tempdir().expect("tempdir");
        let cache_path = self.write_cache(dir.path());
        let store = Arc::new(SqliteStore::open(dir.path().join("mosaic.db")).expect("open db"));
        let kv: Arc<dyn KeyValueStore> = store.clone();
        let overlay: Arc<dyn RelationshipStore> = store.clone();

        let aggregator = Aggregator::new(MosaicConfig::default(), kv)
            .expect("default config")
            .with_layout(FixedLayout(Position::new(0.0, 0.0)))
            .with_overlay(overlay)
            .with_system_source(Arc::new(self.working_set))
            .with_system_source(Arc::new(self.bookmarks))
            .with_system_source(Arc::new(self.history))
            .with_system_source(Arc::new(JsonFileSource::new(LOCAL_CACHE_SOURCE, cache_path)));

        Fixture {
            aggregator,
            store,
            dir,
        }
    }
}

//! Storage backends
//!
//! Persistence is limited to two concerns: the enabled-source set (a single
//! key in a [`KeyValueStore`]) and the persisted relationship store used as
//! an edge overlay. `SqliteStore` serves both; the memory stores are for
//! embedding and tests.

mod memory;
mod sqlite;
mod toggles;
mod traits;

pub use memory::{MemoryKeyValueStore, MemoryRelationshipStore};
pub use sqlite::SqliteStore;
pub use toggles::ToggleStore;
pub use traits::{KeyValueStore, OpenStore, RelationshipStore, StorageError, StorageResult};

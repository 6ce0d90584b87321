//! Entity sources
//!
//! Every provider of entities (saved collections, history, local caches,
//! the persistent working set) implements the [`Source`] contract. The core
//! only ever polls sources; it never stores entities on their behalf.

mod file;
mod memory;
mod registry;
mod traits;
mod types;

pub use file::JsonFileSource;
pub use memory::MemorySource;
pub use registry::{SourceOrigin, SourceRegistry};
pub use traits::{Source, SourceCatalog};
pub use types::{
    Relationship, SourceEntity, SourceError, SourceResult, SourceState, BOOKMARKS_SOURCE,
    HISTORY_SOURCE, LOCAL_CACHE_SOURCE, SYSTEM_SOURCES, WORKING_SET_SOURCE,
};

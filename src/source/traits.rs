//! Source trait: the contract every entity provider implements
//!
//! Sources are polled, never pushed to. The core asks each enabled source for
//! its entities on every (re)load and treats each call as independent.

use super::types::{SourceEntity, SourceResult};
use async_trait::async_trait;
use std::sync::Arc;

/// An independent provider of entities
///
/// # Example
///
/// ```ignore
/// struct Bookmarks { store: BookmarkStore }
///
/// #[async_trait]
/// impl Source for Bookmarks {
///     fn id(&self) -> &str { "collection:bookmarks" }
///     async fn is_available(&self) -> bool { true }
///     async fn entity_count(&self) -> SourceResult<usize> { Ok(self.store.len()) }
///     async fn entities(&self) -> SourceResult<Vec<SourceEntity>> {
///         Ok(self.store.to_entities())
///     }
/// }
/// ```
#[async_trait]
pub trait Source: Send + Sync {
    /// Stable source id, e.g. `collection:bookmarks`
    fn id(&self) -> &str;

    /// Whether the source can currently be read
    async fn is_available(&self) -> bool;

    /// Number of entities the source holds
    ///
    /// May fail independently of [`Source::entities`].
    async fn entity_count(&self) -> SourceResult<usize>;

    /// All entities the source currently holds
    async fn entities(&self) -> SourceResult<Vec<SourceEntity>>;
}

/// The collection-listing collaborator that knows about user-defined sources
#[async_trait]
pub trait SourceCatalog: Send + Sync {
    /// List user-defined sources. System sources are not included.
    async fn list_sources(&self) -> SourceResult<Vec<Arc<dyn Source>>>;
}

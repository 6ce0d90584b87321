//! Entity collector: fan out across enabled sources
//!
//! Every source call runs as its own tokio task. Results are put back in
//! source order before anything downstream sees them, so completion order
//! never leaks into deduplication. A failing (or panicking) source
//! contributes nothing and is recorded in its [`SourceState`].

use crate::source::{Source, SourceEntity, SourceError, SourceResult, SourceState};
use std::future::Future;
use std::sync::Arc;
use tokio::task::JoinSet;

/// Entities and per-source bookkeeping from one collection pass
#[derive(Debug, Clone, Default)]
pub struct CollectionReport {
    /// Entities from every source that succeeded, in source order
    pub entities: Vec<SourceEntity>,
    /// One state per collected source, in source order
    pub states: Vec<SourceState>,
}

impl CollectionReport {
    /// Number of sources whose fetch failed
    pub fn failed_count(&self) -> usize {
        self.states.iter().filter(|s| s.is_failed()).count()
    }

    /// Whether at least one source was asked and all of them failed
    pub fn all_failed(&self) -> bool {
        !self.states.is_empty() && self.failed_count() == self.states.len()
    }
}

/// Run `call` against every source concurrently; results come back in
/// source order
async fn fan_out<T, F, Fut>(sources: &[Arc<dyn Source>], call: F) -> Vec<SourceResult<T>>
where
    T: Send + 'static,
    F: Fn(Arc<dyn Source>) -> Fut,
    Fut: Future<Output = SourceResult<T>> + Send + 'static,
{
    let mut tasks = JoinSet::new();
    for (i, source) in sources.iter().enumerate() {
        let fut = call(Arc::clone(source));
        tasks.spawn(async move { (i, fut.await) });
    }

    let mut slots: Vec<Option<SourceResult<T>>> = (0..sources.len()).map(|_| None).collect();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((i, result)) => slots[i] = Some(result),
            Err(e) => tracing::error!(error = %e, "source task did not complete"),
        }
    }

    slots
        .into_iter()
        .map(|slot| {
            slot.unwrap_or_else(|| {
                Err(SourceError::Aborted(
                    "task panicked or was cancelled".into(),
                ))
            })
        })
        .collect()
}

/// Collects entities from sources
#[derive(Debug, Clone, Copy, Default)]
pub struct EntityCollector;

impl EntityCollector {
    pub fn new() -> Self {
        Self
    }

    /// Fetch entities from every given source
    ///
    /// Never fails: a source that is unavailable or errors contributes zero
    /// entities and has its error recorded.
    pub async fn collect(&self, sources: &[Arc<dyn Source>]) -> CollectionReport {
        let results = fan_out(sources, |source| async move {
            if !source.is_available().await {
                return Err(SourceError::Unavailable(source.id().to_string()));
            }
            source.entities().await
        })
        .await;

        let mut report = CollectionReport::default();
        for (source, result) in sources.iter().zip(results) {
            let mut state = SourceState::new(source.id(), true);
            match result {
                Ok(entities) => {
                    state.succeeded(entities.len());
                    report.entities.extend(entities);
                }
                Err(e) => {
                    tracing::warn!(source = source.id(), error = %e, "source fetch failed");
                    state.failed(e);
                }
            }
            report.states.push(state);
        }
        report
    }

    /// Probe entity counts for every given source
    ///
    /// A failed probe leaves `entity_count` empty and records the error.
    /// `enabled` is reported as false; callers overlay their toggle state.
    pub async fn probe_counts(&self, sources: &[Arc<dyn Source>]) -> Vec<SourceState> {
        let results = fan_out(sources, |source| async move { source.entity_count().await }).await;

        sources
            .iter()
            .zip(results)
            .map(|(source, result)| {
                let mut state = SourceState::new(source.id(), false);
                match result {
                    Ok(count) => state.succeeded(count),
                    Err(e) => {
                        tracing::warn!(source = source.id(), error = %e, "count probe failed");
                        state.failed(e);
                    }
                }
                state
            })
            .collect()
    }
}

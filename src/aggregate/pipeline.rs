//! Aggregation session: collect, dedupe, build, overlay
//!
//! An [`Aggregator`] owns everything one session needs to turn its enabled
//! sources into a [`GraphState`]. Each `load` fully supersedes the previous
//! result; later discoveries go through [`Aggregator::merger`] instead.

use super::collector::EntityCollector;
use super::dedup::Deduplicator;
use super::edges::EdgeBuilder;
use super::merge::{IncrementalMerger, LabelPolicy};
use crate::config::{ConfigResult, MosaicConfig};
use crate::graph::{GraphEdge, GraphNode, GraphState, NodeId};
use crate::layout::{Layout, RandomLayout};
use crate::source::{Source, SourceCatalog, SourceEntity, SourceRegistry, SourceState};
use crate::storage::{KeyValueStore, RelationshipStore, ToggleStore};
use serde::Serialize;
use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;
use uuid::Uuid;

/// Result of one aggregation pass
#[derive(Debug, Clone, Default, Serialize)]
pub struct AggregatedGraph {
    pub graph: GraphState,
    /// True only for a placeholder handed out before a pass settles
    pub loading: bool,
    /// Set when every enabled source failed; partial failures are only
    /// visible in `sources`
    pub error: Option<String>,
    /// One entry per registered source, in registration order
    pub sources: Vec<SourceState>,
}

impl AggregatedGraph {
    /// Placeholder for a pass still in flight
    pub fn pending(sources: Vec<SourceState>) -> Self {
        Self {
            loading: true,
            sources,
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.graph.is_empty()
    }
}

/// Drives collection for one session
pub struct Aggregator {
    config: MosaicConfig,
    registry: SourceRegistry,
    toggles: ToggleStore,
    overlay: Option<Arc<dyn RelationshipStore>>,
    layout: Box<dyn Layout>,
    labels: LabelPolicy,
    dedup: Deduplicator,
    collector: EntityCollector,
}

impl Aggregator {
    /// Create an aggregator with no sources registered
    ///
    /// Fails only if the configured unresolved-label pattern is invalid.
    pub fn new(config: MosaicConfig, kv: Arc<dyn KeyValueStore>) -> ConfigResult<Self> {
        let labels = LabelPolicy::new(&config.unresolved_label_pattern)?;
        let toggles = ToggleStore::new(
            kv,
            config.toggle_key.clone(),
            config.default_enabled_source.clone(),
        );
        Ok(Self {
            registry: SourceRegistry::new(),
            toggles,
            overlay: None,
            layout: Box::new(RandomLayout::new(config.layout_spread)),
            labels,
            dedup: Deduplicator::new(config.privileged_source.clone()),
            collector: EntityCollector::new(),
            config,
        })
    }

    /// Use a persisted relationship store as an edge overlay
    pub fn with_overlay(mut self, store: Arc<dyn RelationshipStore>) -> Self {
        self.overlay = Some(store);
        self
    }

    /// Replace the placement strategy for new nodes
    pub fn with_layout(mut self, layout: impl Layout + 'static) -> Self {
        self.layout = Box::new(layout);
        self
    }

    pub fn with_system_source(mut self, source: Arc<dyn Source>) -> Self {
        self.registry.register_system(source);
        self
    }

    pub fn config(&self) -> &MosaicConfig {
        &self.config
    }

    pub fn registry(&self) -> &SourceRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut SourceRegistry {
        &mut self.registry
    }

    /// Merger sharing this session's layout and label policy
    pub fn merger(&self) -> IncrementalMerger<'_> {
        IncrementalMerger::new(self.layout.as_ref(), &self.labels)
    }

    /// Currently enabled source ids, as persisted
    pub fn enabled_sources(&self) -> BTreeSet<String> {
        self.toggles.load()
    }

    /// Registered sources with their enabled flag; no counts
    pub fn source_states(&self) -> Vec<SourceState> {
        let enabled = self.toggles.load();
        self.registry
            .ids()
            .into_iter()
            .map(|id| {
                let on = enabled.contains(&id);
                SourceState::new(id, on)
            })
            .collect()
    }

    /// Enable or disable a source and persist the new set
    ///
    /// Returns whether the set changed. Does not reload.
    pub fn set_enabled(&self, id: &str, enabled: bool) -> bool {
        if !self.registry.contains(id) {
            tracing::warn!(source = id, "toggling a source that is not registered");
        }
        let mut set = self.toggles.load();
        let changed = if enabled {
            set.insert(id.to_string())
        } else {
            set.remove(id)
        };
        if changed {
            self.toggles.save(&set);
        }
        changed
    }

    /// Flip a source's enabled flag, persist it, and reload
    pub async fn toggle_source(&self, id: &str) -> AggregatedGraph {
        let now_enabled = !self.toggles.load().contains(id);
        self.set_enabled(id, now_enabled);
        tracing::info!(source = id, enabled = now_enabled, "source toggled");
        self.load().await
    }

    /// Refresh user sources from a catalog
    pub async fn discover(&mut self, catalog: &dyn SourceCatalog) -> usize {
        self.registry.discover(catalog).await
    }

    /// Result to show while the first pass is still running
    ///
    /// Empty graph, `loading` set, and the registered sources with their
    /// enabled flags.
    pub fn placeholder(&self) -> AggregatedGraph {
        AggregatedGraph::pending(self.source_states())
    }

    /// Probe entity counts of every registered source, enabled or not
    pub async fn probe_counts(&self) -> Vec<SourceState> {
        let enabled = self.toggles.load();
        let mut states = self.collector.probe_counts(&self.registry.sources()).await;
        for state in &mut states {
            state.enabled = enabled.contains(&state.source);
        }
        states
    }

    /// Run a full collection pass
    ///
    /// Never fails. Source failures are isolated and recorded per source;
    /// `error` is set only when every enabled source failed.
    pub async fn load(&self) -> AggregatedGraph {
        let pass = Uuid::new_v4();
        let enabled = self.toggles.load();
        let active: Vec<Arc<dyn Source>> = self
            .registry
            .sources()
            .into_iter()
            .filter(|s| enabled.contains(s.id()))
            .collect();

        for id in &enabled {
            if !self.registry.contains(id) {
                tracing::debug!(%pass, source = %id, "enabled source is not registered");
            }
        }

        if active.is_empty() {
            tracing::info!(%pass, "no sources enabled; graph is empty");
            return AggregatedGraph {
                sources: self.source_states(),
                ..Default::default()
            };
        }

        tracing::info!(%pass, sources = active.len(), "collecting");
        let mut report = self.collector.collect(&active).await;
        let overlay = self.overlay_edges().await;

        // Everything has settled; the rest is a synchronous fold.
        let collected = report.entities.len();
        let entities = self.dedup.deduplicate(std::mem::take(&mut report.entities));
        let nodes = self.nodes_for(&entities);
        let known: HashSet<NodeId> = nodes.iter().map(|n| n.id.clone()).collect();

        let mut builder = EdgeBuilder::new(&known);
        let declared = builder.add_relationships(&entities);
        let overlaid = builder.overlay(overlay);
        let graph = GraphState::from_parts(nodes, builder.finish());

        tracing::info!(
            %pass,
            collected,
            nodes = graph.node_count(),
            declared_edges = declared,
            overlay_edges = overlaid,
            failed_sources = report.failed_count(),
            "graph loaded"
        );

        let error = report.all_failed().then(|| {
            let reasons: Vec<String> = report
                .states
                .iter()
                .map(|s| format!("{}: {}", s.source, s.error.as_deref().unwrap_or("unknown")))
                .collect();
            format!("all enabled sources failed ({})", reasons.join("; "))
        });

        let sources = self
            .registry
            .ids()
            .into_iter()
            .map(|id| {
                report
                    .states
                    .iter()
                    .find(|s| s.source == id)
                    .cloned()
                    .unwrap_or_else(|| SourceState::new(id, false))
            })
            .collect();

        AggregatedGraph {
            graph,
            loading: false,
            error,
            sources,
        }
    }

    async fn overlay_edges(&self) -> Vec<GraphEdge> {
        let Some(store) = &self.overlay else {
            return Vec::new();
        };
        match store.get_all_edges().await {
            Ok(edges) => edges,
            Err(e) => {
                tracing::warn!(error = %e, "relationship store unavailable; skipping overlay");
                Vec::new()
            }
        }
    }

    fn nodes_for(&self, entities: &[SourceEntity]) -> Vec<GraphNode> {
        entities
            .iter()
            .enumerate()
            .map(|(i, entity)| {
                GraphNode::new(
                    entity.entity_id.clone(),
                    entity.entity_type.clone(),
                    entity.label.clone(),
                )
                .at(self.layout.place(&entity.entity_id, i))
                .with_source(entity.source_id.clone())
                .with_attributes(entity.attributes.clone())
            })
            .collect()
    }
}

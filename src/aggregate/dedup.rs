//! Deduplicator: collapse records that share an entity id
//!
//! A record is privileged when it comes from the persistent working-set
//! source, or when its attributes mark it as a working-set member (a record
//! from another source can have been promoted). Between two records for the
//! same id:
//!
//! - exactly one privileged: the privileged one wins, whatever the order
//! - otherwise: the first one seen wins
//!
//! The losing record is dropped whole, relationships included.

use crate::graph::NodeId;
use crate::source::{SourceEntity, WORKING_SET_SOURCE};
use std::collections::HashMap;

/// Resolves duplicate entity ids to one record per id
#[derive(Debug, Clone)]
pub struct Deduplicator {
    privileged_source: String,
}

impl Default for Deduplicator {
    fn default() -> Self {
        Self::new(WORKING_SET_SOURCE)
    }
}

impl Deduplicator {
    /// Create a deduplicator that favours `privileged_source`
    pub fn new(privileged_source: impl Into<String>) -> Self {
        Self {
            privileged_source: privileged_source.into(),
        }
    }

    pub fn privileged_source(&self) -> &str {
        &self.privileged_source
    }

    /// Whether a record takes priority over non-privileged duplicates
    pub fn is_privileged(&self, entity: &SourceEntity) -> bool {
        entity.source_id == self.privileged_source || entity.attributes.is_persistent_set_member
    }

    /// Keep exactly one record per distinct entity id
    ///
    /// Output order is the order in which each id was first seen.
    pub fn deduplicate(&self, entities: Vec<SourceEntity>) -> Vec<SourceEntity> {
        let mut slots: HashMap<NodeId, usize> = HashMap::with_capacity(entities.len());
        let mut kept: Vec<SourceEntity> = Vec::with_capacity(entities.len());

        for entity in entities {
            match slots.get(&entity.entity_id) {
                Some(&i) => {
                    if self.is_privileged(&entity) && !self.is_privileged(&kept[i]) {
                        kept[i] = entity;
                    }
                }
                None => {
                    slots.insert(entity.entity_id.clone(), kept.len());
                    kept.push(entity);
                }
            }
        }

        kept
    }
}

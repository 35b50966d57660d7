//! Relationship remapping onto canonical entity ids.

use std::collections::HashSet;

use folio_core::{RelationshipRecord, RemapConfig, ResolutionMap};

use crate::resolver::Resolution;

/// Rewrites relationship endpoints through a resolution map and removes
/// duplicates.
pub struct RelationshipRemapper {
    config: RemapConfig,
}

impl Default for RelationshipRemapper {
    fn default() -> Self {
        Self::new(RemapConfig::default())
    }
}

impl RelationshipRemapper {
    /// Create a new remapper.
    pub fn new(config: RemapConfig) -> Self {
        Self { config }
    }

    /// Get the remap config.
    pub fn config(&self) -> &RemapConfig {
        &self.config
    }

    /// Remap relationships through a bare id map.
    ///
    /// Ids missing from the map pass through unchanged. With `valid_only`,
    /// the known canonical ids are the map's values.
    pub fn remap(
        &self,
        relationships: &[RelationshipRecord],
        map: &ResolutionMap,
    ) -> Vec<RelationshipRecord> {
        let known: HashSet<&str> = map.values().map(String::as_str).collect();
        self.remap_with(relationships, map, &known)
    }

    /// Remap relationships through a resolution pass.
    ///
    /// With `valid_only`, endpoints must map to one of the pass's canonical
    /// entities.
    pub fn remap_resolution(
        &self,
        relationships: &[RelationshipRecord],
        resolution: &Resolution,
    ) -> Vec<RelationshipRecord> {
        self.remap_with(relationships, &resolution.map, &resolution.canonical_ids())
    }

    fn remap_with(
        &self,
        relationships: &[RelationshipRecord],
        map: &ResolutionMap,
        known: &HashSet<&str>,
    ) -> Vec<RelationshipRecord> {
        let mut resolved = Vec::with_capacity(relationships.len());
        let mut seen: HashSet<(String, String, String)> = HashSet::new();
        let mut filtered = 0usize;
        let mut duplicates = 0usize;

        for rel in relationships {
            if self.config.valid_only && !(resolves(map, known, &rel.source) && resolves(map, known, &rel.target)) {
                filtered += 1;
                continue;
            }

            let source = map.get(&rel.source).unwrap_or(&rel.source);
            let target = map.get(&rel.target).unwrap_or(&rel.target);
            let key = (source.clone(), rel.relation.clone(), target.clone());

            if seen.contains(&key) {
                duplicates += 1;
                if self.config.log_duplicates {
                    tracing::info!(
                        "[Relationship Resolution] Duplicate removed: ({}, {}, {})",
                        key.0,
                        key.1,
                        key.2
                    );
                }
                continue;
            }

            let mut remapped = rel.clone();
            remapped.source = key.0.clone();
            remapped.target = key.2.clone();
            resolved.push(remapped);
            seen.insert(key);
        }

        tracing::debug!(
            input = relationships.len(),
            output = resolved.len(),
            filtered,
            duplicates,
            "Relationship remap complete"
        );

        resolved
    }
}

/// Whether `id` is in the map and maps to a known canonical id.
fn resolves(map: &ResolutionMap, known: &HashSet<&str>, id: &str) -> bool {
    map.get(id).is_some_and(|canonical| known.contains(canonical.as_str()))
}

/// Remap with the tolerant defaults: no filtering, no logging.
pub fn remap_relationships(
    relationships: &[RelationshipRecord],
    map: &ResolutionMap,
) -> Vec<RelationshipRecord> {
    RelationshipRemapper::default().remap(relationships, map)
}

//! Entity resolution: merge duplicate entity records into canonical ones.
//!
//! Entities are processed in input order. Each one is compared against the
//! canonical entities created so far, in creation order, and joins the first
//! candidate it matches:
//!
//! 1. **Exact**: its normalized name equals the candidate's normalized name or
//!    one of the candidate's normalized aliases.
//! 2. **Fuzzy**: the similarity of the normalized names reaches the threshold.
//!
//! First match wins, not best match. Later merges depend on earlier ones, so
//! a pass is inherently sequential.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use folio_core::{EntityRecord, ResolutionMap, ResolveConfig};

use crate::normalize::NameNormalizer;
use crate::similarity::similarity;

/// How an entity matched its canonical entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    /// Normalized name equal to the canonical name or one of its aliases.
    Exact,
    /// Similarity at or above the threshold.
    Fuzzy,
}

/// One merge decision made during a resolution pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergeEvent {
    /// Id of the merged input entity.
    pub entity_id: String,
    /// Raw name of the merged input entity.
    pub name: String,
    /// Id of the canonical entity it joined.
    pub canonical_id: String,
    /// Raw name of the canonical entity.
    pub canonical_name: String,
    /// Similarity score (1.0 for exact matches).
    pub similarity: f64,
    /// Match kind.
    pub kind: MatchKind,
}

/// Output of a resolution pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    /// Canonical entities in creation order.
    pub entities: Vec<EntityRecord>,
    /// Input id -> canonical id.
    pub map: ResolutionMap,
    /// Merge decisions in the order they were made.
    pub merges: Vec<MergeEvent>,
}

impl Resolution {
    /// Ids of all canonical entities.
    pub fn canonical_ids(&self) -> HashSet<&str> {
        self.entities.iter().map(|e| e.id.as_str()).collect()
    }

    /// Canonical id for an input id.
    pub fn canonical_id(&self, id: &str) -> Option<&str> {
        self.map.get(id).map(String::as_str)
    }

    /// Canonical entity for an input id.
    pub fn canonical_for(&self, id: &str) -> Option<&EntityRecord> {
        let canonical_id = self.canonical_id(id)?;
        self.entities.iter().find(|e| e.id == canonical_id)
    }
}

/// A canonical entity together with its cached normalized forms.
struct CanonicalSlot {
    record: EntityRecord,
    normalized_name: String,
    normalized_aliases: Vec<String>,
}

impl CanonicalSlot {
    fn new(record: EntityRecord, normalizer: &NameNormalizer) -> Self {
        let normalized_name = normalizer.normalize(&record.name);
        let normalized_aliases = record
            .aliases
            .iter()
            .map(|a| normalizer.normalize(a))
            .collect();
        Self {
            record,
            normalized_name,
            normalized_aliases,
        }
    }

    fn matches_exactly(&self, normalized: &str) -> bool {
        self.normalized_name == normalized || self.normalized_aliases.iter().any(|a| a == normalized)
    }
}

/// Resolves entity records into canonical entities.
pub struct EntityResolver {
    config: ResolveConfig,
    normalizer: NameNormalizer,
}

impl Default for EntityResolver {
    fn default() -> Self {
        Self::new(ResolveConfig::default())
    }
}

impl EntityResolver {
    /// Create a new resolver.
    pub fn new(config: ResolveConfig) -> Self {
        let normalizer = NameNormalizer::with_honorifics(&config.honorifics);
        Self { config, normalizer }
    }

    /// Get the resolve config.
    pub fn config(&self) -> &ResolveConfig {
        &self.config
    }

    /// Get the name normalizer.
    pub fn normalizer(&self) -> &NameNormalizer {
        &self.normalizer
    }

    /// Resolve a batch of entities.
    ///
    /// The input is never modified; canonical entities are independent
    /// copies. If the same id appears twice, the later occurrence decides its
    /// map entry.
    pub fn resolve(&self, entities: &[EntityRecord]) -> Resolution {
        let mut slots: Vec<CanonicalSlot> = Vec::new();
        let mut map = ResolutionMap::with_capacity(entities.len());
        let mut merges = Vec::new();

        for entity in entities {
            let normalized = self.normalizer.normalize(&entity.name);

            match self.find_match(&normalized, &slots) {
                Some((index, score, kind)) => {
                    let slot = &mut slots[index];
                    let merged = merge_into(&slot.record, entity);
                    *slot = CanonicalSlot::new(merged, &self.normalizer);

                    if self.config.log_merges {
                        tracing::info!(
                            "[Entity Resolution] Merged '{}' -> '{}' (sim={:.2})",
                            entity.name,
                            slot.record.name,
                            score
                        );
                    }

                    map.insert(entity.id.clone(), slot.record.id.clone());
                    merges.push(MergeEvent {
                        entity_id: entity.id.clone(),
                        name: entity.name.clone(),
                        canonical_id: slot.record.id.clone(),
                        canonical_name: slot.record.name.clone(),
                        similarity: score,
                        kind,
                    });
                }
                None => {
                    let mut record = entity.clone();
                    dedup_in_place(&mut record.aliases);
                    map.insert(record.id.clone(), record.id.clone());
                    slots.push(CanonicalSlot::new(record, &self.normalizer));
                }
            }
        }

        tracing::debug!(
            input = entities.len(),
            canonical = slots.len(),
            merges = merges.len(),
            "Entity resolution pass complete"
        );

        Resolution {
            entities: slots.into_iter().map(|s| s.record).collect(),
            map,
            merges,
        }
    }

    /// First canonical slot the normalized name matches, in creation order.
    fn find_match(
        &self,
        normalized: &str,
        slots: &[CanonicalSlot],
    ) -> Option<(usize, f64, MatchKind)> {
        for (index, slot) in slots.iter().enumerate() {
            if slot.matches_exactly(normalized) {
                return Some((index, 1.0, MatchKind::Exact));
            }

            let score = similarity(normalized, &slot.normalized_name);
            if score >= self.config.similarity_threshold {
                return Some((index, score, MatchKind::Fuzzy));
            }
        }
        None
    }
}

/// Resolve with the default configuration except for the threshold.
pub fn resolve_entities(entities: &[EntityRecord], threshold: f64) -> Resolution {
    EntityResolver::new(ResolveConfig::with_threshold(threshold)).resolve(entities)
}

/// Build the record that results from merging `incoming` into `canonical`.
///
/// Aliases are append-only: the incoming name, then the incoming aliases,
/// each added once and never equal to the canonical name. Attributes missing
/// on the canonical record are copied; arrays present on both are unioned.
/// Any other conflict keeps the canonical value.
fn merge_into(canonical: &EntityRecord, incoming: &EntityRecord) -> EntityRecord {
    let mut merged = canonical.clone();

    let surface_forms = std::iter::once(&incoming.name).chain(incoming.aliases.iter());
    for form in surface_forms {
        if *form != merged.name && !merged.has_alias(form) {
            merged.aliases.push(form.clone());
        }
    }

    merged.attributes = merge_attributes(&canonical.attributes, &incoming.attributes);
    merged
}

fn merge_attributes(canonical: &Map<String, Value>, incoming: &Map<String, Value>) -> Map<String, Value> {
    let mut merged = canonical.clone();
    for (key, value) in incoming {
        match (merged.get_mut(key), value) {
            (None, _) => {
                merged.insert(key.clone(), value.clone());
            }
            (Some(Value::Array(existing)), Value::Array(additional)) => {
                existing.extend(additional.iter().cloned());
                dedup_in_place(existing);
            }
            (Some(_), _) => {}
        }
    }
    merged
}

/// Remove repeated items, keeping the first occurrence of each.
fn dedup_in_place<T: PartialEq>(items: &mut Vec<T>) {
    let mut index = 0;
    while index < items.len() {
        if items[..index].contains(&items[index]) {
            items.remove(index);
        } else {
            index += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn quiet(threshold: f64) -> EntityResolver {
        EntityResolver::new(ResolveConfig::with_threshold(threshold).log_merges(false))
    }

    #[test]
    fn test_watson_example() {
        let entities = vec![
            EntityRecord::new("1", "Watson"),
            EntityRecord::new("2", "Dr Watson"),
            EntityRecord::new("3", "John"),
        ];

        let resolution = quiet(0.8).resolve(&entities);

        assert_eq!(
            resolution.entities,
            vec![
                EntityRecord::new("1", "Watson").with_alias("Dr Watson"),
                EntityRecord::new("3", "John"),
            ]
        );
        assert_eq!(resolution.map.len(), 3);
        assert_eq!(resolution.canonical_id("1"), Some("1"));
        assert_eq!(resolution.canonical_id("2"), Some("1"));
        assert_eq!(resolution.canonical_id("3"), Some("3"));
        assert_eq!(resolution.merges.len(), 1);
        assert_eq!(resolution.merges[0].kind, MatchKind::Exact);
        assert_eq!(resolution.merges[0].similarity, 1.0);
    }

    #[test]
    fn test_exact_match_ignores_threshold() {
        let entities = vec![
            EntityRecord::new("1", "Sherlock Holmes"),
            EntityRecord::new("2", "  sherlock   HOLMES"),
        ];

        let resolution = quiet(1.0).resolve(&entities);
        assert_eq!(resolution.entities.len(), 1);
        assert_eq!(resolution.entities[0].aliases, vec!["  sherlock   HOLMES"]);
    }

    #[test]
    fn test_fuzzy_match_records_score() {
        let entities = vec![EntityRecord::new("1", "Moriarty"), EntityRecord::new("2", "Moriarity")];

        let resolution = quiet(0.8).resolve(&entities);
        assert_eq!(resolution.entities.len(), 1);
        let merge = &resolution.merges[0];
        assert_eq!(merge.kind, MatchKind::Fuzzy);
        assert!((merge.similarity - 16.0 / 17.0).abs() < 1e-9);
        assert_eq!(merge.canonical_name, "Moriarty");
    }

    #[test]
    fn test_below_threshold_stays_separate() {
        let entities = vec![EntityRecord::new("1", "Holmes"), EntityRecord::new("2", "Sherlock Holmes")];

        let resolution = quiet(0.8).resolve(&entities);
        assert_eq!(resolution.entities.len(), 2);
        assert!(resolution.merges.is_empty());
    }

    #[test]
    fn test_first_match_wins_over_best_match() {
        // "watsen" scores 5/6 against "watson" and 6/7 against "watsen q",
        // but "watson" was created first.
        let entities = vec![
            EntityRecord::new("a", "Watson"),
            EntityRecord::new("b", "Watsen Q"),
            EntityRecord::new("c", "Watsen"),
        ];

        let resolution = quiet(0.8).resolve(&entities);
        assert_eq!(resolution.entities.len(), 2);
        assert_eq!(resolution.canonical_id("c"), Some("a"));
    }

    #[test]
    fn test_alias_match_is_exact() {
        let entities = vec![
            EntityRecord::new("1", "Sherlock Holmes").with_alias("Mr. Holmes"),
            EntityRecord::new("2", "holmes"),
        ];

        let resolution = quiet(0.99).resolve(&entities);
        assert_eq!(resolution.entities.len(), 1);
        assert_eq!(resolution.merges[0].kind, MatchKind::Exact);
        assert_eq!(resolution.entities[0].aliases, vec!["Mr. Holmes", "holmes"]);
    }

    #[test]
    fn test_alias_accumulation_is_duplicate_free() {
        let entities = vec![
            EntityRecord::new("1", "Dr Watson"),
            EntityRecord::new("2", "Watson"),
            EntityRecord::new("3", "watson"),
            EntityRecord::new("4", "Watson"),
            EntityRecord::new("5", "Dr Watson"),
        ];

        let resolution = quiet(0.8).resolve(&entities);
        assert_eq!(resolution.entities.len(), 1);
        assert_eq!(resolution.entities[0].name, "Dr Watson");
        assert_eq!(resolution.entities[0].aliases, vec!["Watson", "watson"]);
        assert_eq!(resolution.merges.len(), 4);
    }

    #[test]
    fn test_incoming_aliases_are_appended() {
        let entities = vec![
            EntityRecord::new("1", "Irene Adler"),
            EntityRecord::new("2", "irene adler").with_alias("The Woman").with_alias("Irene Adler"),
        ];

        let resolution = quiet(0.8).resolve(&entities);
        assert_eq!(resolution.entities[0].aliases, vec!["irene adler", "The Woman"]);
    }

    #[test]
    fn test_attribute_merge_is_non_destructive() {
        let entities = vec![
            EntityRecord::new("1", "Watson")
                .with_attribute("role", "doctor")
                .with_attribute("mentions", json!([1, 2])),
            EntityRecord::new("2", "Dr Watson")
                .with_attribute("role", "soldier")
                .with_attribute("mentions", json!([2, 3]))
                .with_attribute("address", "221B Baker Street"),
        ];

        let resolution = quiet(0.8).resolve(&entities);
        let canonical = &resolution.entities[0];
        assert_eq!(canonical.attribute("role"), Some(&json!("doctor")));
        assert_eq!(canonical.attribute("mentions"), Some(&json!([1, 2, 3])));
        assert_eq!(canonical.attribute("address"), Some(&json!("221B Baker Street")));
    }

    #[test]
    fn test_array_and_scalar_conflict_keeps_canonical() {
        let entities = vec![
            EntityRecord::new("1", "Watson").with_attribute("tags", json!(["a"])),
            EntityRecord::new("2", "Watson").with_attribute("tags", "b"),
        ];

        let resolution = quiet(0.8).resolve(&entities);
        assert_eq!(resolution.entities[0].attribute("tags"), Some(&json!(["a"])));
    }

    #[test]
    fn test_input_is_not_modified() {
        let entities = vec![EntityRecord::new("1", "Watson"), EntityRecord::new("2", "Dr Watson")];
        let before = entities.clone();

        let resolution = quiet(0.8).resolve(&entities);
        assert_eq!(entities, before);
        assert!(entities[0].aliases.is_empty());
        assert_eq!(resolution.entities[0].aliases, vec!["Dr Watson"]);
    }

    #[test]
    fn test_new_canonical_dedups_input_aliases() {
        let entities = vec![EntityRecord::new("1", "Holmes").with_alias("Sherlock").with_alias("Sherlock")];

        let resolution = quiet(0.8).resolve(&entities);
        assert_eq!(resolution.entities[0].aliases, vec!["Sherlock"]);
    }

    #[test]
    fn test_duplicate_input_id_last_write_wins() {
        let entities = vec![
            EntityRecord::new("1", "Watson"),
            EntityRecord::new("2", "Holmes"),
            EntityRecord::new("2", "Dr Watson"),
        ];

        let resolution = quiet(0.8).resolve(&entities);
        assert_eq!(resolution.map.len(), 2);
        assert_eq!(resolution.canonical_id("2"), Some("1"));
        // The canonical slot created for the first "2" is never deleted.
        assert_eq!(resolution.entities.len(), 2);
    }

    #[test]
    fn test_resolving_canonical_set_is_idempotent() {
        let entities = vec![
            EntityRecord::new("1", "Watson"),
            EntityRecord::new("2", "Dr Watson"),
            EntityRecord::new("3", "John"),
            EntityRecord::new("4", "Mycroft"),
        ];
        let resolver = quiet(0.8);

        let first = resolver.resolve(&entities);
        let second = resolver.resolve(&first.entities);

        assert_eq!(second.entities, first.entities);
        assert!(second.merges.is_empty());
        assert!(second.map.iter().all(|(k, v)| k == v));
    }

    #[test]
    fn test_empty_names_match_each_other() {
        let entities = vec![EntityRecord::new("1", ""), EntityRecord::new("2", "Dr.")];

        let resolution = quiet(0.8).resolve(&entities);
        assert_eq!(resolution.entities.len(), 1);
        assert_eq!(resolution.entities[0].aliases, vec!["Dr."]);
    }

    #[test]
    fn test_custom_honorifics() {
        let config = ResolveConfig::with_threshold(0.95)
            .log_merges(false)
            .honorifics(["inspector"]);
        let entities = vec![
            EntityRecord::new("1", "Lestrade"),
            EntityRecord::new("2", "Inspector Lestrade"),
        ];

        let resolution = EntityResolver::new(config).resolve(&entities);
        assert_eq!(resolution.entities.len(), 1);
    }

    #[test]
    fn test_canonical_for() {
        let entities = vec![EntityRecord::new("1", "Watson"), EntityRecord::new("2", "Dr Watson")];

        let resolution = quiet(0.8).resolve(&entities);
        assert_eq!(resolution.canonical_for("2").map(|e| e.name.as_str()), Some("Watson"));
        assert!(resolution.canonical_for("9").is_none());
        assert_eq!(resolution.canonical_ids().len(), 1);
    }
}

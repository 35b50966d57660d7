//! One-call resolution of an extraction batch.

use folio_core::{EntityRecord, IngestConfig, RelationshipRecord};

use crate::remap::RelationshipRemapper;
use crate::resolver::EntityResolver;

/// Resolve entities, then remap relationships onto the canonical entities.
///
/// Relationships are always filtered to endpoints that resolve to a canonical
/// entity, whatever `config.remap.valid_only` says; duplicate logging follows
/// `config.remap.log_duplicates`. Inputs are borrowed and left untouched.
pub fn finalize(
    entities: &[EntityRecord],
    relationships: &[RelationshipRecord],
    config: &IngestConfig,
) -> (Vec<EntityRecord>, Vec<RelationshipRecord>) {
    let resolution = EntityResolver::new(config.resolution.clone()).resolve(entities);

    let remap_config = config.remap.clone().valid_only(true);
    let resolved = RelationshipRemapper::new(remap_config).remap_resolution(relationships, &resolution);

    (resolution.entities, resolved)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finalize_watson_batch() {
        let entities = vec![
            EntityRecord::new("1", "Watson"),
            EntityRecord::new("2", "Dr Watson"),
            EntityRecord::new("3", "John"),
        ];
        let relationships = vec![
            RelationshipRecord::new("2", "works_with", "3").with_evidence("text1"),
            RelationshipRecord::new("1", "works_with", "3").with_evidence("text2"),
        ];

        let (canonical, resolved) = finalize(&entities, &relationships, &IngestConfig::default());

        assert_eq!(canonical.len(), 2);
        assert_eq!(canonical[0].aliases, vec!["Dr Watson"]);
        assert_eq!(
            resolved,
            vec![RelationshipRecord::new("1", "works_with", "3").with_evidence("text1")]
        );
    }

    #[test]
    fn test_finalize_drops_unknown_endpoints() {
        let entities = vec![EntityRecord::new("1", "Holmes")];
        let relationships = vec![
            RelationshipRecord::new("1", "knows", "2"),
            RelationshipRecord::new("1", "is", "1"),
        ];

        let (_, resolved) = finalize(&entities, &relationships, &IngestConfig::default());
        assert_eq!(resolved, vec![RelationshipRecord::new("1", "is", "1")]);
    }
}

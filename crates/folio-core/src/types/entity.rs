//! Entity records as produced by extraction and consumed by resolution.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Mapping from input entity id to canonical entity id.
pub type ResolutionMap = HashMap<String, String>;

/// An entity record, e.g. a person name extracted from text.
///
/// `id` and `name` are required; deserializing a record without them fails.
/// Any other keys land in `attributes`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityRecord {
    /// Identifier, unique within an input batch.
    pub id: String,
    /// Display form of the name.
    pub name: String,
    /// Surface forms merged into this entity, in the order they were seen.
    #[serde(default)]
    pub aliases: Vec<String>,
    /// Open attribute mapping. Array values are union-merged on resolution.
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl EntityRecord {
    /// Create a new entity record with no aliases or attributes.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            aliases: Vec::new(),
            attributes: Map::new(),
        }
    }

    /// Add an alias.
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Add an attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Get an attribute value.
    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    /// Check whether `alias` is already recorded.
    pub fn has_alias(&self, alias: &str) -> bool {
        self.aliases.iter().any(|a| a == alias)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_without_aliases() {
        let entity: EntityRecord =
            serde_json::from_value(json!({"id": "1", "name": "Watson", "role": "doctor"}))
                .unwrap();
        assert_eq!(entity.id, "1");
        assert!(entity.aliases.is_empty());
        assert_eq!(entity.attribute("role"), Some(&json!("doctor")));
    }

    #[test]
    fn test_missing_required_field_fails() {
        let result = serde_json::from_value::<EntityRecord>(json!({"id": "1"}));
        assert!(result.is_err());

        let result = serde_json::from_value::<EntityRecord>(json!({"name": "Watson"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_serialize_flattens_attributes() {
        let entity = EntityRecord::new("1", "Watson")
            .with_alias("Dr Watson")
            .with_attribute("mentions", json!([1, 2]));
        let value = serde_json::to_value(&entity).unwrap();
        assert_eq!(value["aliases"], json!(["Dr Watson"]));
        assert_eq!(value["mentions"], json!([1, 2]));
        assert!(value.get("attributes").is_none());
    }
}

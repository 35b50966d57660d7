//! Relationship records linking two entities.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A directed, labelled relationship between two entity ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationshipRecord {
    /// Source entity id.
    pub source: String,
    /// Target entity id.
    pub target: String,
    /// Relation label.
    pub relation: String,
    /// Provenance text. Not part of the identity key.
    #[serde(default)]
    pub evidence_span: String,
    /// Extra keys, carried through unchanged.
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl RelationshipRecord {
    /// Create a new relationship with empty evidence.
    pub fn new(
        source: impl Into<String>,
        relation: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            relation: relation.into(),
            evidence_span: String::new(),
            attributes: Map::new(),
        }
    }

    /// Set the evidence span.
    pub fn with_evidence(mut self, evidence: impl Into<String>) -> Self {
        self.evidence_span = evidence.into();
        self
    }

    /// The `(source, relation, target)` identity key.
    pub fn key(&self) -> (&str, &str, &str) {
        (&self.source, &self.relation, &self.target)
    }
}

//! folio-entities - Entity resolution for folio.
//!
//! Merges duplicate entity records (e.g. person names extracted from text)
//! into canonical entities with alias lists, and rewrites relationship
//! records onto the canonical ids.
//!
//! # Components
//!
//! - `normalize`: name canonicalization (case, whitespace, honorifics)
//! - `similarity`: symmetric edit-based similarity ratio
//! - `resolver`: first-match-wins entity merging
//! - `remap`: relationship endpoint rewriting and deduplication
//! - `finalize`: both steps in one call
//!
//! # Example
//!
//! ```
//! use folio_core::{EntityRecord, RelationshipRecord};
//! use folio_entities::{remap_relationships, resolve_entities};
//!
//! let entities = vec![
//!     EntityRecord::new("1", "Watson"),
//!     EntityRecord::new("2", "Dr Watson"),
//!     EntityRecord::new("3", "John"),
//! ];
//! let resolution = resolve_entities(&entities, 0.8);
//! assert_eq!(resolution.entities.len(), 2);
//!
//! let relationships = vec![RelationshipRecord::new("2", "works_with", "3")];
//! let resolved = remap_relationships(&relationships, &resolution.map);
//! assert_eq!(resolved[0].source, "1");
//! ```

pub mod finalize;
pub mod normalize;
pub mod remap;
pub mod resolver;
pub mod similarity;

pub use finalize::finalize;
pub use normalize::{normalize_name, NameNormalizer};
pub use remap::{remap_relationships, RelationshipRemapper};
pub use resolver::{resolve_entities, EntityResolver, MatchKind, MergeEvent, Resolution};
pub use similarity::{matching_blocks, similarity, MatchingBlock};

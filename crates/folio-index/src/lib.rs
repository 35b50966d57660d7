//! folio-index - Vector search and artifact persistence for folio.
//!
//! # Components
//!
//! - [`FlatL2Index`]: exact nearest-neighbour search by squared L2 distance
//! - [`SemanticIndex`]: embeds documents through an [`folio_core::Embedder`]
//!   and retrieves the closest ones for a query
//! - [`FileArtifactStore`]: saves and loads embeddings, index and documents
//!   as JSON files

pub mod flat;
pub mod semantic;
pub mod store;

pub use flat::FlatL2Index;
pub use semantic::SemanticIndex;
pub use store::{ArtifactPaths, ArtifactSet, ArtifactStore, FileArtifactStore};

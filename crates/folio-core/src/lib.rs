//! folio-core - Core library for folio.
//!
//! This crate provides the shared types, traits, configuration and error
//! handling for the folio ingestion utilities.
//!
//! # Example
//!
//! ```ignore
//! use folio_core::{EntityRecord, IngestConfig};
//!
//! let config = IngestConfig::from_file("folio.toml")?;
//! let entity = EntityRecord::new("1", "Dr Watson").with_attribute("book", "A Study in Scarlet");
//! ```

pub mod config;
pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use config::{
    ArtifactConfig, ChunkConfig, FetchConfig, IngestConfig, RemapConfig, ResolveConfig,
    DEFAULT_HONORIFICS,
};
pub use error::{ErrorCode, FolioError, FolioResult};
pub use traits::{Embedder, Fetcher, SearchHit, VectorIndex};
pub use types::{EntityRecord, RelationshipRecord, ResolutionMap};

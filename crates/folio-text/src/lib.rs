//! folio-text - Text cleaning and chunking for folio.
//!
//! Prepares long documents for embedding: strip publisher boilerplate, then
//! split the body into bounded, overlapping chunks.
//!
//! # Example
//!
//! ```
//! use folio_core::ChunkConfig;
//! use folio_text::{strip_boilerplate, TextChunker};
//!
//! let body = strip_boilerplate("*** START OF THE PROJECT GUTENBERG EBOOK X ***\nOne. Two.");
//! let chunker = TextChunker::new(ChunkConfig::new(4, 0)).unwrap();
//! assert_eq!(chunker.chunk(&body), vec!["One.", "Two."]);
//! ```

pub mod boilerplate;
pub mod chunker;

pub use boilerplate::{strip_boilerplate, BoilerplateMarkers, BoilerplateStripper};
pub use chunker::{chunk_text, TextChunker};

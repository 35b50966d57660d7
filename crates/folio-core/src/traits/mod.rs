//! Traits for the collaborators folio talks to.

mod embedder;
mod fetcher;
mod vector_index;

pub use embedder::*;
pub use fetcher::*;
pub use vector_index::*;

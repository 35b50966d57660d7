//! Vector index trait and related types.

use serde::{Deserialize, Serialize};

use crate::error::FolioResult;

/// A single search hit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    /// Insertion position of the matched vector.
    pub position: usize,
    /// Distance to the query (lower = closer).
    pub distance: f32,
}

/// Nearest-neighbour index over fixed-dimension vectors.
///
/// Vectors are addressed by insertion position, which lines up with the
/// document list they were embedded from.
pub trait VectorIndex: Send + Sync {
    /// Append vectors to the index.
    fn add(&mut self, vectors: &[Vec<f32>]) -> FolioResult<()>;

    /// Return up to `k` nearest vectors, closest first.
    fn search(&self, query: &[f32], k: usize) -> FolioResult<Vec<SearchHit>>;

    /// Number of indexed vectors.
    fn len(&self) -> usize;

    /// Check whether the index holds no vectors.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Vector dimension.
    fn dimension(&self) -> usize;
}

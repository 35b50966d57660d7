//! Exact (brute-force) L2 vector index.

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use folio_core::{FolioError, FolioResult, SearchHit, VectorIndex};

/// Flat index ranking every stored vector by squared Euclidean distance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlatL2Index {
    dimension: usize,
    vectors: Vec<Vec<f32>>,
}

impl FlatL2Index {
    /// Create an empty index for vectors of `dimension` components.
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            vectors: Vec::new(),
        }
    }

    /// Build an index holding `vectors`.
    pub fn from_vectors(dimension: usize, vectors: &[Vec<f32>]) -> FolioResult<Self> {
        let mut index = Self::new(dimension);
        index.add(vectors)?;
        Ok(index)
    }

    /// Stored vectors in insertion order.
    pub fn vectors(&self) -> &[Vec<f32>] {
        &self.vectors
    }

    fn check_dimension(&self, vector: &[f32]) -> FolioResult<()> {
        if vector.len() != self.dimension {
            return Err(FolioError::dimension_mismatch(self.dimension, vector.len()));
        }
        Ok(())
    }
}

impl VectorIndex for FlatL2Index {
    fn add(&mut self, vectors: &[Vec<f32>]) -> FolioResult<()> {
        // Validate the whole batch so a bad vector leaves the index unchanged.
        for vector in vectors {
            self.check_dimension(vector)?;
        }
        self.vectors.extend(vectors.iter().cloned());
        Ok(())
    }

    fn search(&self, query: &[f32], k: usize) -> FolioResult<Vec<SearchHit>> {
        self.check_dimension(query)?;

        let mut hits: Vec<SearchHit> = self
            .vectors
            .iter()
            .enumerate()
            .map(|(position, vector)| SearchHit {
                position,
                distance: squared_l2(query, vector),
            })
            .collect();

        hits.sort_by_key(|hit| (OrderedFloat(hit.distance), hit.position));
        hits.truncate(k);
        Ok(hits)
    }

    fn len(&self) -> usize {
        self.vectors.len()
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

fn squared_l2(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

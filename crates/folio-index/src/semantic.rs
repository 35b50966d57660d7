//! Embed-and-retrieve over a fixed document list.

use std::sync::Arc;

use folio_core::{Embedder, FolioError, FolioResult, SearchHit, VectorIndex};

use crate::flat::FlatL2Index;
use crate::store::ArtifactSet;

/// Documents, their embeddings and an exact index over them.
pub struct SemanticIndex {
    embedder: Arc<dyn Embedder>,
    vectors: Vec<Vec<f32>>,
    index: FlatL2Index,
    documents: Vec<String>,
}

impl SemanticIndex {
    /// Embed `documents` and index them.
    pub async fn build(embedder: Arc<dyn Embedder>, documents: Vec<String>) -> FolioResult<Self> {
        if documents.is_empty() {
            return Err(FolioError::empty_index("Cannot build an index from zero documents"));
        }

        let vectors = embedder.embed_batch(&documents).await?;
        if vectors.len() != documents.len() {
            return Err(FolioError::embedding_count_mismatch(documents.len(), vectors.len()));
        }

        let index = FlatL2Index::from_vectors(embedder.dimension(), &vectors)?;

        tracing::info!(
            documents = documents.len(),
            dimension = index.dimension(),
            model = embedder.model_name(),
            "Built semantic index"
        );

        Ok(Self {
            embedder,
            vectors,
            index,
            documents,
        })
    }

    /// Restore an index from saved artifacts.
    ///
    /// The embedder must produce vectors of the saved dimension.
    pub fn from_artifacts(embedder: Arc<dyn Embedder>, artifacts: ArtifactSet) -> FolioResult<Self> {
        artifacts.validate()?;
        if artifacts.index.dimension() != embedder.dimension() {
            return Err(FolioError::dimension_mismatch(
                artifacts.index.dimension(),
                embedder.dimension(),
            ));
        }

        Ok(Self {
            embedder,
            vectors: artifacts.vectors,
            index: artifacts.index,
            documents: artifacts.documents,
        })
    }

    /// Split into persistable artifacts.
    pub fn into_artifacts(self) -> ArtifactSet {
        ArtifactSet {
            vectors: self.vectors,
            index: self.index,
            documents: self.documents,
        }
    }

    /// Nearest documents to `query` with their distances, closest first.
    pub async fn search(&self, query: &str, top_k: usize) -> FolioResult<Vec<(SearchHit, &str)>> {
        let embedding = self.embedder.embed(query).await?;
        let hits = self.index.search(&embedding, top_k)?;

        Ok(hits
            .into_iter()
            .map(|hit| (hit, self.documents[hit.position].as_str()))
            .collect())
    }

    /// Up to `top_k` documents closest to `query`, closest first.
    pub async fn retrieve(&self, query: &str, top_k: usize) -> FolioResult<Vec<String>> {
        let hits = self.search(query, top_k).await?;
        tracing::debug!(query, top_k, returned = hits.len(), "Retrieved documents");
        Ok(hits.into_iter().map(|(_, doc)| doc.to_string()).collect())
    }

    pub fn documents(&self) -> &[String] {
        &self.documents
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

//! Persistence for embedding artifacts.
//!
//! An artifact set is the embedding matrix, the search index built over it
//! and the documents the rows were embedded from. [`FileArtifactStore`]
//! writes each part to its own JSON file:
//!
//! - `<prefix>_embeddings.json`
//! - `<prefix>_index.json`
//! - `<prefix>_documents.json`

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use folio_core::{ArtifactConfig, FolioError, FolioResult, VectorIndex};

use crate::flat::FlatL2Index;

/// Embeddings, index and documents, aligned by position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactSet {
    pub vectors: Vec<Vec<f32>>,
    pub index: FlatL2Index,
    pub documents: Vec<String>,
}

impl ArtifactSet {
    /// Check that every part has one entry per document.
    pub fn validate(&self) -> FolioResult<()> {
        let documents = self.documents.len();
        if self.vectors.len() != documents {
            return Err(FolioError::index(format!(
                "Artifact set has {} embeddings for {} documents",
                self.vectors.len(),
                documents
            )));
        }
        if self.index.len() != documents {
            return Err(FolioError::index(format!(
                "Artifact index holds {} vectors for {} documents",
                self.index.len(),
                documents
            )));
        }
        Ok(())
    }
}

/// Saves and loads artifact sets.
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Persist `artifacts` under `dir` with file names starting with `prefix`.
    async fn save(&self, artifacts: &ArtifactSet, dir: &Path, prefix: &str) -> FolioResult<()>;

    /// Load the artifact set saved under `dir` with `prefix`.
    async fn load(&self, dir: &Path, prefix: &str) -> FolioResult<ArtifactSet>;

    /// Save to the location named by `config`.
    async fn save_to(&self, artifacts: &ArtifactSet, config: &ArtifactConfig) -> FolioResult<()> {
        self.save(artifacts, &config.dir, &config.prefix).await
    }

    /// Load from the location named by `config`.
    async fn load_from(&self, config: &ArtifactConfig) -> FolioResult<ArtifactSet> {
        self.load(&config.dir, &config.prefix).await
    }
}

/// File paths of one artifact set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub embeddings: PathBuf,
    pub index: PathBuf,
    pub documents: PathBuf,
}

impl ArtifactPaths {
    pub fn new(dir: &Path, prefix: &str) -> Self {
        Self {
            embeddings: dir.join(format!("{}_embeddings.json", prefix)),
            index: dir.join(format!("{}_index.json", prefix)),
            documents: dir.join(format!("{}_documents.json", prefix)),
        }
    }
}

/// Artifact store backed by JSON files on the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileArtifactStore;

impl FileArtifactStore {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ArtifactStore for FileArtifactStore {
    async fn save(&self, artifacts: &ArtifactSet, dir: &Path, prefix: &str) -> FolioResult<()> {
        let paths = ArtifactPaths::new(dir, prefix);
        tokio::fs::create_dir_all(dir).await?;

        write_json(&paths.embeddings, &artifacts.vectors).await?;
        write_json(&paths.index, &artifacts.index).await?;
        write_json(&paths.documents, &artifacts.documents).await?;

        tracing::info!(
            dir = %dir.display(),
            prefix,
            documents = artifacts.documents.len(),
            "Saved artifacts"
        );
        Ok(())
    }

    async fn load(&self, dir: &Path, prefix: &str) -> FolioResult<ArtifactSet> {
        let paths = ArtifactPaths::new(dir, prefix);

        let artifacts = ArtifactSet {
            vectors: read_json(&paths.embeddings).await?,
            index: read_json(&paths.index).await?,
            documents: read_json(&paths.documents).await?,
        };

        tracing::debug!(
            dir = %dir.display(),
            prefix,
            documents = artifacts.documents.len(),
            "Loaded artifacts"
        );
        Ok(artifacts)
    }
}

async fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> FolioResult<()> {
    let json = serde_json::to_vec(value)?;
    tokio::fs::write(path, json).await?;
    Ok(())
}

async fn read_json<T: DeserializeOwned>(path: &Path) -> FolioResult<T> {
    let bytes = tokio::fs::read(path).await?;
    Ok(serde_json::from_slice(&bytes)?)
}

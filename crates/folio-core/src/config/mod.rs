//! Configuration system for folio.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{FolioError, FolioResult};

/// Honorifics dropped from the front of a name before comparison.
pub const DEFAULT_HONORIFICS: &[&str] = &["dr", "mr", "mrs", "ms", "prof", "sir"];

/// Configuration for entity resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolveConfig {
    /// Similarity at or above which two names are merged (0.0 - 1.0).
    /// Default: 0.8
    pub similarity_threshold: f64,
    /// Whether to log each merge.
    /// Default: true
    pub log_merges: bool,
    /// Leading name tokens ignored during comparison.
    pub honorifics: Vec<String>,
}

impl Default for ResolveConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: 0.8,
            log_merges: true,
            honorifics: DEFAULT_HONORIFICS.iter().map(|h| h.to_string()).collect(),
        }
    }
}

impl ResolveConfig {
    /// Create config with custom threshold, clamped to [0, 1].
    pub fn with_threshold(threshold: f64) -> Self {
        Self {
            similarity_threshold: threshold.clamp(0.0, 1.0),
            ..Default::default()
        }
    }

    /// Enable or disable merge logging.
    pub fn log_merges(mut self, enabled: bool) -> Self {
        self.log_merges = enabled;
        self
    }

    /// Replace the honorific list.
    pub fn honorifics<I, S>(mut self, honorifics: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.honorifics = honorifics.into_iter().map(Into::into).collect();
        self
    }
}

/// Configuration for relationship remapping.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemapConfig {
    /// Drop relationships whose endpoints do not resolve to a canonical id.
    pub valid_only: bool,
    /// Log each dropped duplicate.
    pub log_duplicates: bool,
}

impl RemapConfig {
    /// Keep only relationships between resolved canonical entities.
    pub fn valid_only(mut self, enabled: bool) -> Self {
        self.valid_only = enabled;
        self
    }

    /// Enable or disable duplicate logging.
    pub fn log_duplicates(mut self, enabled: bool) -> Self {
        self.log_duplicates = enabled;
        self
    }
}

/// Configuration for text chunking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkConfig {
    /// Maximum characters per chunk, before overlap. Must be > 0.
    pub max_chars: usize,
    /// Maximum characters of whole words carried over from the previous chunk.
    pub overlap: usize,
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            max_chars: 3000,
            overlap: 200,
        }
    }
}

impl ChunkConfig {
    /// Create a chunk config.
    pub fn new(max_chars: usize, overlap: usize) -> Self {
        Self { max_chars, overlap }
    }

    /// Reject configurations that cannot produce chunks.
    pub fn validate(&self) -> FolioResult<()> {
        if self.max_chars == 0 {
            return Err(FolioError::validation_with_suggestion(
                "max_chars must be > 0",
                "Set chunking.max_chars to a positive character count",
            ));
        }
        Ok(())
    }
}

/// Configuration for fetching source documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// User-Agent header value.
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: "folio/0.1".to_string(),
        }
    }
}

/// Where embedding/index/document artifacts are stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactConfig {
    /// Artifact directory.
    pub dir: PathBuf,
    /// File name prefix.
    pub prefix: String,
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("artifacts"),
            prefix: "mydata".to_string(),
        }
    }
}

/// Main ingestion configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Entity resolution.
    pub resolution: ResolveConfig,
    /// Relationship remapping.
    pub remap: RemapConfig,
    /// Text chunking.
    pub chunking: ChunkConfig,
    /// Document fetching.
    pub fetch: FetchConfig,
    /// Artifact storage.
    pub artifacts: ArtifactConfig,
}

impl IngestConfig {
    /// Load configuration from a file (TOML, JSON, or YAML).
    pub fn from_file(path: impl AsRef<std::path::Path>) -> FolioResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let ext = path.as_ref().extension().and_then(|e| e.to_str());

        let config: Self = match ext {
            Some("toml") => {
                toml::from_str(&content).map_err(|e| FolioError::Configuration(e.to_string()))?
            }
            Some("json") => serde_json::from_str(&content)
                .map_err(|e| FolioError::Configuration(e.to_string()))?,
            Some("yaml" | "yml") => serde_yaml::from_str(&content)
                .map_err(|e| FolioError::Configuration(e.to_string()))?,
            _ => {
                return Err(FolioError::Configuration(
                    "Unsupported config file format. Use .toml, .json, or .yaml".to_string(),
                ))
            }
        };

        config.chunking.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables.
    ///
    /// Unparseable values are ignored with a warning.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(threshold) = env_parse::<f64>("FOLIO_SIMILARITY_THRESHOLD") {
            config.resolution.similarity_threshold = threshold.clamp(0.0, 1.0);
        }
        if let Some(max_chars) = env_parse::<usize>("FOLIO_CHUNK_MAX_CHARS") {
            config.chunking.max_chars = max_chars;
        }
        if let Some(overlap) = env_parse::<usize>("FOLIO_CHUNK_OVERLAP") {
            config.chunking.overlap = overlap;
        }
        if let Some(timeout) = env_parse::<u64>("FOLIO_FETCH_TIMEOUT") {
            config.fetch.timeout_secs = timeout;
        }
        if let Ok(user_agent) = std::env::var("FOLIO_USER_AGENT") {
            config.fetch.user_agent = user_agent;
        }
        if let Ok(dir) = std::env::var("FOLIO_ARTIFACT_DIR") {
            config.artifacts.dir = PathBuf::from(dir);
        }
        if let Ok(prefix) = std::env::var("FOLIO_ARTIFACT_PREFIX") {
            config.artifacts.prefix = prefix;
        }

        config
    }

    /// Build configuration using builder pattern.
    pub fn builder() -> IngestConfigBuilder {
        IngestConfigBuilder::default()
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    let raw = std::env::var(key).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(key, value = %raw, "Ignoring unparseable environment override");
            None
        }
    }
}

/// Builder for IngestConfig.
#[derive(Default)]
pub struct IngestConfigBuilder {
    config: IngestConfig,
}

impl IngestConfigBuilder {
    /// Set entity resolution configuration.
    pub fn resolution(mut self, config: ResolveConfig) -> Self {
        self.config.resolution = config;
        self
    }

    /// Set relationship remapping configuration.
    pub fn remap(mut self, config: RemapConfig) -> Self {
        self.config.remap = config;
        self
    }

    /// Set chunking configuration.
    pub fn chunking(mut self, config: ChunkConfig) -> Self {
        self.config.chunking = config;
        self
    }

    /// Set fetch configuration.
    pub fn fetch(mut self, config: FetchConfig) -> Self {
        self.config.fetch = config;
        self
    }

    /// Set artifact configuration.
    pub fn artifacts(mut self, config: ArtifactConfig) -> Self {
        self.config.artifacts = config;
        self
    }

    /// Build the configuration, validating chunk settings.
    pub fn build(self) -> FolioResult<IngestConfig> {
        self.config.chunking.validate()?;
        Ok(self.config)
    }
}

//! Error types for folio operations.
//!
//! Errors carry a structured code for programmatic handling and, where it
//! helps, a suggestion for resolving them.

use thiserror::Error;

/// Result type alias for folio operations.
pub type FolioResult<T> = Result<T, FolioError>;

/// Main error type for all folio operations.
#[derive(Error, Debug)]
pub enum FolioError {
    /// Input or configuration value failed validation.
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        code: ErrorCode,
        suggestion: Option<String>,
    },

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Embedding generation failed.
    #[error("Embedding error: {message}")]
    Embedding {
        message: String,
        code: ErrorCode,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Vector index operation failed.
    #[error("Index error: {message}")]
    Index { message: String, code: ErrorCode },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error codes for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Validation (VAL_xxx)
    ValInvalidInput,
    ValInvalidPattern,
    ValDimensionMismatch,

    // Configuration (CFG_xxx)
    CfgInvalidFile,

    // Embedding (EMB_xxx)
    EmbGenerationFailed,
    EmbCountMismatch,

    // Index (IDX_xxx)
    IdxOperationFailed,
    IdxEmpty,

    // Serialization (SER_xxx)
    SerInvalidJson,

    // Internal
    Internal,
}

impl ErrorCode {
    /// Get the string representation of the error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ValInvalidInput => "VAL_001",
            ErrorCode::ValInvalidPattern => "VAL_002",
            ErrorCode::ValDimensionMismatch => "VAL_003",
            ErrorCode::CfgInvalidFile => "CFG_001",
            ErrorCode::EmbGenerationFailed => "EMB_001",
            ErrorCode::EmbCountMismatch => "EMB_002",
            ErrorCode::IdxOperationFailed => "IDX_001",
            ErrorCode::IdxEmpty => "IDX_002",
            ErrorCode::SerInvalidJson => "SER_001",
            ErrorCode::Internal => "INT_001",
        }
    }
}

impl FolioError {
    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            code: ErrorCode::ValInvalidInput,
            suggestion: None,
        }
    }

    /// Create a validation error with suggestion.
    pub fn validation_with_suggestion(
        message: impl Into<String>,
        suggestion: impl Into<String>,
    ) -> Self {
        Self::Validation {
            message: message.into(),
            code: ErrorCode::ValInvalidInput,
            suggestion: Some(suggestion.into()),
        }
    }

    /// Create an error for a pattern that failed to compile.
    pub fn invalid_pattern(pattern: &str, reason: impl std::fmt::Display) -> Self {
        Self::Validation {
            message: format!("Invalid pattern '{}': {}", pattern, reason),
            code: ErrorCode::ValInvalidPattern,
            suggestion: Some("Check the regular expression syntax".to_string()),
        }
    }

    /// Create an error for vectors whose dimension does not match.
    pub fn dimension_mismatch(expected: usize, actual: usize) -> Self {
        Self::Validation {
            message: format!(
                "Vector dimension mismatch: expected {}, got {}",
                expected, actual
            ),
            code: ErrorCode::ValDimensionMismatch,
            suggestion: None,
        }
    }

    /// Create an embedding error.
    pub fn embedding(message: impl Into<String>) -> Self {
        Self::Embedding {
            message: message.into(),
            code: ErrorCode::EmbGenerationFailed,
            source: None,
        }
    }

    /// Create an error for an embedder that returned the wrong number of vectors.
    pub fn embedding_count_mismatch(expected: usize, actual: usize) -> Self {
        Self::Embedding {
            message: format!("Expected {} embeddings, got {}", expected, actual),
            code: ErrorCode::EmbCountMismatch,
            source: None,
        }
    }

    /// Create an index error.
    pub fn index(message: impl Into<String>) -> Self {
        Self::Index {
            message: message.into(),
            code: ErrorCode::IdxOperationFailed,
        }
    }

    /// Create an error for an operation that needs a non-empty index.
    pub fn empty_index(message: impl Into<String>) -> Self {
        Self::Index {
            message: message.into(),
            code: ErrorCode::IdxEmpty,
        }
    }

    /// Get the error code.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Validation { code, .. } => *code,
            Self::Configuration(_) => ErrorCode::CfgInvalidFile,
            Self::Embedding { code, .. } => *code,
            Self::Index { code, .. } => *code,
            Self::Serialization(_) => ErrorCode::SerInvalidJson,
            _ => ErrorCode::Internal,
        }
    }

    /// Get a user-friendly suggestion for resolving this error.
    pub fn suggestion(&self) -> Option<&str> {
        match self {
            Self::Validation { suggestion, .. } => suggestion.as_deref(),
            Self::Configuration(_) => Some("Use a .toml, .json, or .yaml configuration file"),
            Self::Embedding { .. } => Some("Please check your embedding provider configuration"),
            _ => None,
        }
    }
}

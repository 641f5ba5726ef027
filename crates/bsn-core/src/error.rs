//! Error types for bsn operations.
//!
//! The computations over a loaded directory are total and never fail.
//! Errors only arise at the edges: parsing a document, reading or writing
//! local state, and validating configuration.

use thiserror::Error;

/// Result type for bsn operations.
pub type Result<T> = std::result::Result<T, BsnError>;

/// Errors that can occur around the account directory.
#[derive(Debug, Error)]
pub enum BsnError {
    /// Directory document errors.
    #[error("Document error: {0}")]
    Document(#[from] DocumentError),
    /// Local state store errors.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
    /// Configuration errors.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    /// I/O errors.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Serialization errors.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Directory document errors.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// Document file not found.
    #[error("Document not found: {0}")]
    NotFound(String),
    /// Document is not a JSON object with an `accounts` map.
    #[error("Invalid document format: {0}")]
    InvalidFormat(String),
    /// Neither the source nor the cache could be read.
    #[error("No usable document (source: {source_error}; cache: {cache_error})")]
    Unavailable {
        source_error: String,
        cache_error: String,
    },
}

/// Local state store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// State file could not be written.
    #[error("Save failed: {0}")]
    SaveFailed(String),
    /// State file could not be read.
    #[error("Load failed: {0}")]
    LoadFailed(String),
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid value.
    #[error("Invalid value for {field}: {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
    /// Missing required field.
    #[error("Missing required field: {0}")]
    MissingField(String),
}

// Convenience constructors
impl BsnError {
    pub fn document_not_found(path: impl Into<String>) -> Self {
        BsnError::Document(DocumentError::NotFound(path.into()))
    }

    pub fn invalid_document(reason: impl Into<String>) -> Self {
        BsnError::Document(DocumentError::InvalidFormat(reason.into()))
    }

    pub fn save_failed(reason: impl Into<String>) -> Self {
        BsnError::Store(StoreError::SaveFailed(reason.into()))
    }

    pub fn invalid_config(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        BsnError::Config(ConfigError::InvalidValue {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        })
    }

    pub fn missing_field(field: impl Into<String>) -> Self {
        BsnError::Config(ConfigError::MissingField(field.into()))
    }

    /// Whether falling back to a cached copy is worthwhile for this error.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            BsnError::Io(_)
                | BsnError::Serialization(_)
                | BsnError::Document(DocumentError::NotFound(_))
                | BsnError::Document(DocumentError::InvalidFormat(_))
        )
    }
}

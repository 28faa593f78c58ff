use core::result::Result as CoreResult;
use core::time::Duration;
use std::io::Error as IoError;

use reqwest::Error as ReqwestError;
use serde_json::Error as SerdeJsonError;
use thiserror::Error;
use toml::de::Error as TomlError;

/// Result type for SVO matching operations.
pub type Result<T> = CoreResult<T, Error>;

/// Errors that can occur while classifying terms or matching phrases.
#[derive(Debug, Error)]
pub enum Error {
    /// An I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] IoError),

    /// An HTTP request to the knowledge base failed.
    #[error("HTTP request failed: {0}")]
    Request(#[from] ReqwestError),

    /// JSON serialization or deserialization failed.
    #[error("JSON serialization error: {0}")]
    Json(#[from] SerdeJsonError),

    /// TOML deserialization failed.
    #[error("TOML deserialization error: {0}")]
    Toml(#[from] TomlError),

    /// A named category is not registered with the categorizer.
    #[error("Category not found: {0}")]
    NotFound(String),

    /// A taxonomy or category definition is malformed.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A reference sense could not be resolved against the lexical database.
    #[error("Could not resolve sense {index} for '{term}'")]
    UnresolvedSense {
        /// Term whose sense list was consulted
        term: String,
        /// Sense index that does not exist for the term
        index: usize,
    },

    /// The knowledge base answered with an error status or a malformed payload.
    #[error("Knowledge base error: {0}")]
    Gateway(String),

    /// A wrapping timeout elapsed before the operation completed.
    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    /// Boundary input failed validation.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A general error not covered by other variants.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Determines whether this error may succeed if retried.
    ///
    /// Returns `true` for transient failures of the knowledge base: network
    /// errors, error responses, and timeouts.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Request(_) | Self::Gateway(_) | Self::Timeout(_)
        )
    }
}

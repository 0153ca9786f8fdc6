//! Error types for node-selector
//!
//! Uses `thiserror` for library errors; the binary wraps them in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for node-selector operations
pub type SelectorResult<T> = Result<T, SelectorError>;

/// Main error type for node-selector operations
#[derive(Error, Debug)]
pub enum SelectorError {
    /// A hierarchical name that cannot be split into segments
    #[error("invalid name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    /// The name source could not be reached or returned garbage
    #[error("cannot discover nodes from {source_desc}: {message}")]
    SourceUnavailable {
        source_desc: String,
        message: String,
    },

    /// The discovery call did not return in time
    #[error("discovery via {source_desc} timed out after {timeout_ms} ms")]
    SourceTimeout { source_desc: String, timeout_ms: u64 },

    /// Filter pattern is not a valid regular expression
    #[error("invalid filter pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// Configuration file could not be parsed
    #[error("invalid config in {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    /// A setting required by the chosen source is absent
    #[error("missing setting '{key}'")]
    MissingSetting { key: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SelectorError {
    pub(crate) fn invalid_name(name: &str, reason: impl Into<String>) -> Self {
        SelectorError::InvalidName {
            name: name.to_string(),
            reason: reason.into(),
        }
    }

    /// Whether a manual refresh could plausibly fix this error
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            SelectorError::SourceUnavailable { .. } | SelectorError::SourceTimeout { .. }
        )
    }
}

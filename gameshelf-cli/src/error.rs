use thiserror::Error;

use gameshelf_catalog::YamlError;
use gameshelf_lib::{AggregationError, SettingsError};

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// The catalog root could not be listed
    #[error("{0}")]
    Catalog(#[from] AggregationError),

    /// Source descriptor file could not be used
    #[error("Sources error: {0}")]
    Sources(#[from] YamlError),

    /// Settings file could not be read or written
    #[error("Config error: {0}")]
    Settings(#[from] SettingsError),

    /// JSON output failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// No game with the requested key
    #[error("Game not found: {0}")]
    NotFound(String),

    /// Invalid command-line input
    #[error("{0}")]
    Usage(String),

    /// Runtime creation or async error
    #[error("Runtime error: {0}")]
    Runtime(String),
}

impl CliError {
    pub(crate) fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub(crate) fn usage(msg: impl Into<String>) -> Self {
        Self::Usage(msg.into())
    }

    pub(crate) fn runtime(msg: impl Into<String>) -> Self {
        Self::Runtime(msg.into())
    }
}

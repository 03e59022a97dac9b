use std::io;

use thiserror::Error;

/// The catalog could not be loaded at all.
///
/// This is the only failure a catalog load reports to its caller; everything
/// narrower is recorded as an [`EntryError`] and the load carries on.
#[derive(Debug, Error)]
pub enum AggregationError {
    /// The top-level catalog root could not be listed.
    #[error("Catalog unavailable: cannot list {path}: {source}")]
    RootUnavailable { path: String, source: io::Error },
}

/// A single record or sub-path that was skipped during a catalog load.
#[derive(Debug, Error)]
pub enum EntryError {
    /// A source or category directory could not be listed or stat'd.
    #[error("Cannot enumerate {path}: {source}")]
    Enumerate { path: String, source: io::Error },

    /// A record file could not be read.
    #[error("Cannot read record {path}: {source}")]
    Read { path: String, source: io::Error },

    /// A record file is not a valid JSON record.
    #[error("Invalid record {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },

    /// A record file's `categories` field is not a list of strings.
    #[error("Invalid record {path}: categories must be a list of strings")]
    InvalidCategories { path: String },

    /// A record with the same source and id was already loaded.
    #[error("Duplicate record {source_id}/{id} at {path}")]
    Duplicate {
        source_id: String,
        id: String,
        path: String,
    },
}

impl EntryError {
    /// Path of the entry this error refers to.
    pub fn path(&self) -> &str {
        match self {
            Self::Enumerate { path, .. }
            | Self::Read { path, .. }
            | Self::Parse { path, .. }
            | Self::InvalidCategories { path }
            | Self::Duplicate { path, .. } => path,
        }
    }
}

/// Errors reading or writing the settings file.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Could not parse {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },

    #[error("Could not serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Malformed settings: {0}")]
    Malformed(String),
}

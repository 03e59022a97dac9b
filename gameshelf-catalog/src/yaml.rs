//! YAML loading for declarative source descriptors.
//!
//! A catalog root may carry a `sources.yaml` listing its sources explicitly
//! instead of relying on directory discovery.

use crate::types::SourceDescriptor;
use std::path::Path;
use thiserror::Error;

/// Conventional descriptor file name inside a catalog root.
pub const SOURCES_FILE: &str = "sources.yaml";

#[derive(Debug, Error)]
pub enum YamlError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("YAML parse error in {path}: {source}")]
    Parse {
        path: String,
        source: serde_yml::Error,
    },
}

/// Load source descriptors from a YAML file containing a sequence of
/// `{ name, kind }` entries.
///
/// Returns `Ok(None)` when the file does not exist, so callers can fall back
/// to discovery.
///
/// ```text
/// - name: 1000webgames
///   kind: flat
/// - name: html5games
///   kind: category_partitioned
/// - kind: single_root
/// ```
pub fn load_sources(path: &Path) -> Result<Option<Vec<SourceDescriptor>>, YamlError> {
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(path).map_err(|e| YamlError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    let sources: Vec<SourceDescriptor> =
        serde_yml::from_str(&contents).map_err(|e| YamlError::Parse {
            path: path.display().to_string(),
            source: e,
        })?;

    Ok(Some(sources))
}

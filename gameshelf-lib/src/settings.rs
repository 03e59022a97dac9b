//! User settings: where the catalog lives and which sources are partitioned.
//!
//! The settings file is always `~/.config/gameshelf/settings.toml`. Edits go
//! through `toml::Value` so keys this crate does not know about survive.

use std::path::{Path, PathBuf};

use crate::aggregator::DEFAULT_PARTITIONED_SOURCES;
use crate::error::SettingsError;

/// Catalog root used when neither the command line nor the settings name one.
pub const DEFAULT_CATALOG_ROOT: &str = "scraped_data";

/// Canonical path to the settings file: `~/.config/gameshelf/settings.toml`.
pub fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("gameshelf").join("settings.toml")
}

/// The `[catalog]` table of the settings file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogSettings {
    pub root: Option<PathBuf>,
    pub partitioned: Option<Vec<String>>,
}

impl CatalogSettings {
    /// Resolve the catalog root using a priority chain:
    ///
    /// 1. CLI override (if `Some`)
    /// 2. Saved `catalog.root`
    /// 3. `./scraped_data`
    pub fn resolve_root(&self, cli_override: Option<PathBuf>) -> PathBuf {
        cli_override
            .or_else(|| self.root.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CATALOG_ROOT))
    }

    /// Names of the category-partitioned sources, falling back to the defaults.
    pub fn partitioned_sources(&self) -> Vec<String> {
        match &self.partitioned {
            Some(names) => names.clone(),
            None => DEFAULT_PARTITIONED_SOURCES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// Read the `[catalog]` table from `path`. A missing file yields defaults.
pub fn read_settings(path: &Path) -> Result<CatalogSettings, SettingsError> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Ok(CatalogSettings::default());
        }
        Err(e) => return Err(e.into()),
    };
    let doc: toml::Value = contents.parse().map_err(|source| SettingsError::Parse {
        path: path.display().to_string(),
        source,
    })?;

    let Some(catalog) = doc.get("catalog") else {
        return Ok(CatalogSettings::default());
    };
    let catalog = catalog
        .as_table()
        .ok_or_else(|| SettingsError::Malformed("[catalog] is not a table".to_string()))?;

    let root = match catalog.get("root") {
        None => None,
        Some(value) => {
            let root = value
                .as_str()
                .ok_or_else(|| SettingsError::Malformed("catalog.root is not a string".into()))?;
            (!root.is_empty()).then(|| PathBuf::from(root))
        }
    };

    let partitioned = match catalog.get("partitioned") {
        None => None,
        Some(value) => {
            let names = value.as_array().ok_or_else(|| {
                SettingsError::Malformed("catalog.partitioned is not an array".into())
            })?;
            let names = names
                .iter()
                .map(|n| {
                    n.as_str().map(str::to_string).ok_or_else(|| {
                        SettingsError::Malformed(
                            "catalog.partitioned must contain strings".into(),
                        )
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            Some(names)
        }
    };

    Ok(CatalogSettings { root, partitioned })
}

/// Read the settings file, falling back to defaults (with a warning) if it
/// cannot be used.
pub fn load_settings() -> CatalogSettings {
    let path = settings_path();
    read_settings(&path).unwrap_or_else(|e| {
        log::warn!("Ignoring settings file {}: {}", path.display(), e);
        CatalogSettings::default()
    })
}

/// Save (or clear) the catalog root in the user's settings file.
pub fn save_catalog_root(root: Option<&Path>) -> Result<(), SettingsError> {
    write_catalog_root(&settings_path(), root)
}

/// Save (or clear) `catalog.root` in the settings file at `settings`.
pub fn write_catalog_root(settings: &Path, root: Option<&Path>) -> Result<(), SettingsError> {
    let mut doc: toml::Value = match std::fs::read_to_string(settings) {
        Ok(contents) => contents.parse().map_err(|source| SettingsError::Parse {
            path: settings.display().to_string(),
            source,
        })?,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            toml::Value::Table(Default::default())
        }
        Err(e) => return Err(e.into()),
    };

    let table = doc
        .as_table_mut()
        .ok_or_else(|| SettingsError::Malformed("settings root is not a table".into()))?;
    let catalog = table
        .entry("catalog")
        .or_insert_with(|| toml::Value::Table(Default::default()))
        .as_table_mut()
        .ok_or_else(|| SettingsError::Malformed("[catalog] is not a table".into()))?;

    match root {
        Some(p) => {
            catalog.insert(
                "root".to_string(),
                toml::Value::String(p.to_string_lossy().into_owned()),
            );
        }
        None => {
            catalog.remove("root");
        }
    }

    // Write atomically
    if let Some(parent) = settings.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let serialized = toml::to_string_pretty(&doc)?;
    let tmp = settings.with_extension("toml.tmp");
    std::fs::write(&tmp, &serialized)?;
    std::fs::rename(&tmp, settings)?;

    log::debug!("Wrote {}", settings.display());
    Ok(())
}

/// Load the full settings file as a pretty-printed TOML string for display.
pub fn load_settings_string() -> Option<String> {
    let contents = std::fs::read_to_string(settings_path()).ok()?;
    let doc: toml::Value = contents.parse().ok()?;
    toml::to_string_pretty(&doc).ok()
}

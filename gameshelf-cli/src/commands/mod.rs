pub(crate) mod categories;
pub(crate) mod config;
pub(crate) mod list;
pub(crate) mod show;
pub(crate) mod sources;

use std::path::PathBuf;

use gameshelf_catalog::{SOURCES_FILE, SourceDescriptor, load_sources};
use gameshelf_lib::settings::CatalogSettings;
use gameshelf_lib::{FsStorage, LoadedCatalog, discover_sources, load_catalog};

use crate::error::CliError;

/// Where the catalog lives and how its sources are chosen, resolved once per run.
pub(crate) struct CatalogTarget {
    pub root: PathBuf,
    pub sources_file: Option<PathBuf>,
    pub settings: CatalogSettings,
}

impl CatalogTarget {
    pub(crate) fn new(
        root_override: Option<PathBuf>,
        sources_file: Option<PathBuf>,
        settings: CatalogSettings,
    ) -> Self {
        let root = settings.resolve_root(root_override);
        Self {
            root,
            sources_file,
            settings,
        }
    }

    /// Source descriptors from the descriptor file if there is one, otherwise
    /// discovered from the root's layout.
    pub(crate) async fn sources(&self) -> Result<Vec<SourceDescriptor>, CliError> {
        if let Some(path) = &self.sources_file {
            return load_sources(path)?.ok_or_else(|| {
                CliError::usage(format!("Sources file not found: {}", path.display()))
            });
        }

        let default_file = self.root.join(SOURCES_FILE);
        if let Some(sources) = load_sources(&default_file)? {
            log::debug!("Using sources from {}", default_file.display());
            return Ok(sources);
        }

        let partitioned = self.settings.partitioned_sources();
        Ok(discover_sources(&FsStorage, &self.root, partitioned.as_slice()).await?)
    }

    pub(crate) async fn load(&self) -> Result<LoadedCatalog, CliError> {
        let sources = self.sources().await?;
        Ok(load_catalog(&FsStorage, &self.root, &sources).await?)
    }
}

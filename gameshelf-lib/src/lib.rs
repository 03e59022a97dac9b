//! Catalog loading for gameshelf.
//!
//! Ties the data model in `gameshelf-catalog` to storage: enumerating the
//! scraped-data tree, aggregating every source into one catalog, and the
//! user settings that say where that tree lives.

pub mod aggregator;
pub mod error;
pub mod settings;
pub mod storage;

pub use aggregator::{DEFAULT_PARTITIONED_SOURCES, LoadedCatalog, discover_sources, load_catalog};
pub use error::{AggregationError, EntryError, SettingsError};
pub use settings::CatalogSettings;
pub use storage::{EntryKind, FsStorage, MemoryStorage, Storage};

pub use gameshelf_catalog::find_game;

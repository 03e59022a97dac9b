//! Game catalog data model, category taxonomy, and listing filters.
//!
//! This crate holds everything about the catalog that is pure transformation:
//! the record types, the canonical category table and its on-disk directory
//! tokens, and the filters the listing views run over a loaded catalog. It
//! performs no I/O apart from reading source descriptor YAML.

pub mod category;
pub mod filter;
pub mod types;
pub mod yaml;

pub use category::{
    CATEGORY_ALL, SIDEBAR_CATEGORIES, category_description, category_to_directory_token,
    directory_token_to_category, normalize_category,
};
pub use filter::{catalog_categories, filter_by_category, find_game};
pub use types::*;
pub use yaml::{SOURCES_FILE, YamlError, load_sources};

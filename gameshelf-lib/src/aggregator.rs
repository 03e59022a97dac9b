//! Catalog loading across heterogeneous scraped sources.
//!
//! Each source under the catalog root is walked with the strategy its
//! [`SourceKind`] names, every record is stamped with its provenance, and its
//! categories are normalized. One bad file or unreadable directory never
//! stops the load: it is logged, recorded in [`LoadedCatalog::errors`], and
//! its siblings carry on. Only an unlistable root fails the whole load.
//!
//! Sources and category partitions are walked one after another; the stat and
//! read calls inside each are overlapped up to [`MAX_CONCURRENT_READS`].

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use futures::stream::{self, StreamExt};

use gameshelf_catalog::{
    GameRecord, RawCategories, RawRecord, SourceDescriptor, SourceKind, directory_token_to_category,
    normalize_category,
};

use crate::error::{AggregationError, EntryError};
use crate::storage::{EntryKind, Storage};

/// Extension every record file carries.
const RECORD_EXTENSION: &str = ".json";

/// Upper bound on storage calls in flight at once. Keeps a large source well
/// under common open-file limits.
pub const MAX_CONCURRENT_READS: usize = 32;

/// Sources whose records are partitioned by category directory, unless configured otherwise.
pub const DEFAULT_PARTITIONED_SOURCES: &[&str] = &["html5games"];

/// The result of one catalog load: every record that loaded, plus what was skipped.
#[derive(Debug, Default)]
pub struct LoadedCatalog {
    pub games: Vec<GameRecord>,
    pub errors: Vec<EntryError>,
}

/// Where a loaded record's categories come from.
enum CategorySource {
    /// The record file's own `categories` list.
    Record,
    /// The category directory the file sits in; the file's list is ignored.
    Directory(String),
}

/// One record file to load.
struct RecordFile<'a> {
    path: PathBuf,
    source_id: &'a str,
    id: String,
}

/// A parsed record together with the file it came from.
struct LoadedRecord {
    path: String,
    game: GameRecord,
}

type SourceLoad = (Vec<LoadedRecord>, Vec<EntryError>);

/// Record id for a file name, or `None` if it is not a record file.
fn record_id(file_name: &str) -> Option<&str> {
    file_name
        .strip_suffix(RECORD_EXTENSION)
        .filter(|stem| !stem.is_empty())
}

/// Load every configured source under `root` into one catalog.
///
/// Sources are visited in the order given and records appear in listing
/// order within each source. When two records share a `(source, id)` key the
/// first one wins and the later one is reported as
/// [`EntryError::Duplicate`].
pub async fn load_catalog<S: Storage>(
    storage: &S,
    root: &Path,
    sources: &[SourceDescriptor],
) -> Result<LoadedCatalog, AggregationError> {
    let root_entries = list_root(storage, root).await?;

    if sources.is_empty() {
        log::warn!("No sources configured for catalog at {}", root.display());
    }

    let mut records = Vec::new();
    let mut errors = Vec::new();
    for descriptor in sources {
        let (loaded, skipped) = load_source(storage, root, &root_entries, descriptor).await;
        records.extend(loaded);
        errors.extend(skipped);
    }
    let catalog = dedup_records(records, errors);

    for error in &catalog.errors {
        log::warn!("Skipped: {}", error);
    }
    if catalog.games.is_empty() && !catalog.errors.is_empty() {
        log::warn!(
            "No games could be loaded from {} ({} entries skipped)",
            root.display(),
            catalog.errors.len()
        );
    }
    log::debug!(
        "Loaded {} games from {} sources ({} skipped)",
        catalog.games.len(),
        sources.len(),
        catalog.errors.len()
    );

    Ok(catalog)
}

/// Derive source descriptors from the layout of `root`.
///
/// Every directory becomes a source (category-partitioned if its name is in
/// `partitioned`, flat otherwise), in listing order. A single-root source is
/// appended if any record file sits directly in the root.
pub async fn discover_sources<S: Storage, P: AsRef<str>>(
    storage: &S,
    root: &Path,
    partitioned: &[P],
) -> Result<Vec<SourceDescriptor>, AggregationError> {
    let entries = list_root(storage, root).await?;
    let kinds = stat_all(storage, root, &entries).await;

    let mut sources = Vec::new();
    let mut has_root_records = false;
    for (name, kind) in entries.iter().zip(kinds) {
        match kind {
            Ok(EntryKind::Directory) => {
                if partitioned.iter().any(|p| p.as_ref() == name.as_str()) {
                    sources.push(SourceDescriptor::partitioned(name.as_str()));
                } else {
                    sources.push(SourceDescriptor::flat(name.as_str()));
                }
            }
            Ok(EntryKind::File) if record_id(name).is_some() => has_root_records = true,
            Ok(_) => {}
            Err(e) => log::warn!("Cannot stat {}: {}", root.join(name).display(), e),
        }
    }
    if has_root_records {
        sources.push(SourceDescriptor::single_root());
    }

    if sources.is_empty() {
        log::warn!("No sources found under {}", root.display());
    }
    Ok(sources)
}

/// Stat every entry of `dir`, results in entry order.
async fn stat_all<S: Storage>(
    storage: &S,
    dir: &Path,
    names: &[String],
) -> Vec<std::io::Result<EntryKind>> {
    stream::iter(names.iter().map(|name| {
        let path = dir.join(name);
        async move { storage.stat(&path).await }
    }))
    .buffered(MAX_CONCURRENT_READS)
    .collect()
    .await
}

async fn list_root<S: Storage>(storage: &S, root: &Path) -> Result<Vec<String>, AggregationError> {
    storage.list(root).await.map_err(|source| {
        log::error!("Cannot list catalog root {}: {}", root.display(), source);
        AggregationError::RootUnavailable {
            path: root.display().to_string(),
            source,
        }
    })
}

async fn load_source<S: Storage>(
    storage: &S,
    root: &Path,
    root_entries: &[String],
    descriptor: &SourceDescriptor,
) -> SourceLoad {
    if descriptor.kind != SourceKind::SingleRoot && descriptor.name.is_empty() {
        log::warn!("Ignoring {} source with an empty name", descriptor.kind);
        return (Vec::new(), Vec::new());
    }

    log::debug!(
        "Loading {} source '{}'",
        descriptor.kind,
        descriptor.source_id()
    );

    match descriptor.kind {
        SourceKind::Flat => {
            let dir = root.join(&descriptor.name);
            match storage.list(&dir).await {
                Ok(names) => {
                    let files = record_files(&dir, &names, descriptor.source_id());
                    load_records(storage, files, CategorySource::Record).await
                }
                Err(source) => (Vec::new(), vec![enumerate_error(&dir, source)]),
            }
        }
        SourceKind::CategoryPartitioned => load_partitioned(storage, root, descriptor).await,
        SourceKind::SingleRoot => {
            let candidates: Vec<String> = root_entries
                .iter()
                .filter(|n| record_id(n).is_some())
                .cloned()
                .collect();
            let kinds = stat_all(storage, root, &candidates).await;

            let mut errors = Vec::new();
            let mut names = Vec::new();
            for (name, kind) in candidates.iter().zip(kinds) {
                match kind {
                    Ok(EntryKind::File) => names.push(name.clone()),
                    Ok(_) => {}
                    Err(source) => errors.push(enumerate_error(&root.join(name), source)),
                }
            }

            let files = record_files(root, &names, descriptor.source_id());
            let (games, record_errors) =
                load_records(storage, files, CategorySource::Record).await;
            errors.extend(record_errors);
            (games, errors)
        }
    }
}

async fn load_partitioned<S: Storage>(
    storage: &S,
    root: &Path,
    descriptor: &SourceDescriptor,
) -> SourceLoad {
    let source_dir = root.join(&descriptor.name);
    let tokens = match storage.list(&source_dir).await {
        Ok(tokens) => tokens,
        Err(source) => return (Vec::new(), vec![enumerate_error(&source_dir, source)]),
    };

    let mut records = Vec::new();
    let mut errors = Vec::new();
    for token in &tokens {
        let (loaded, skipped) =
            load_partition(storage, &source_dir, token, descriptor.source_id()).await;
        records.extend(loaded);
        errors.extend(skipped);
    }
    (records, errors)
}

async fn load_partition<S: Storage>(
    storage: &S,
    source_dir: &Path,
    token: &str,
    source_id: &str,
) -> SourceLoad {
    let category_dir = source_dir.join(token);
    match storage.stat(&category_dir).await {
        Ok(EntryKind::Directory) => {}
        Ok(_) => return (Vec::new(), Vec::new()),
        Err(source) => return (Vec::new(), vec![enumerate_error(&category_dir, source)]),
    }

    let names = match storage.list(&category_dir).await {
        Ok(names) => names,
        Err(source) => return (Vec::new(), vec![enumerate_error(&category_dir, source)]),
    };

    let category = normalize_category(&directory_token_to_category(token)).to_string();
    log::debug!(
        "Category directory '{}' maps to '{}'",
        category_dir.display(),
        category
    );
    let files = record_files(&category_dir, &names, source_id);
    load_records(storage, files, CategorySource::Directory(category)).await
}

fn record_files<'a>(dir: &Path, names: &[String], source_id: &'a str) -> Vec<RecordFile<'a>> {
    names
        .iter()
        .filter_map(|name| {
            record_id(name).map(|id| RecordFile {
                path: dir.join(name),
                source_id,
                id: id.to_string(),
            })
        })
        .collect()
}

async fn load_records<S: Storage>(
    storage: &S,
    files: Vec<RecordFile<'_>>,
    categories: CategorySource,
) -> SourceLoad {
    let results: Vec<_> = stream::iter(
        files
            .iter()
            .map(|file| load_record(storage, file, &categories)),
    )
    .buffered(MAX_CONCURRENT_READS)
    .collect()
    .await;

    let mut records = Vec::new();
    let mut errors = Vec::new();
    for result in results {
        match result {
            Ok(record) => records.push(record),
            Err(e) => errors.push(e),
        }
    }
    (records, errors)
}

async fn load_record<S: Storage>(
    storage: &S,
    file: &RecordFile<'_>,
    categories: &CategorySource,
) -> Result<LoadedRecord, EntryError> {
    let path = file.path.display().to_string();
    let contents = storage
        .read_to_string(&file.path)
        .await
        .map_err(|source| EntryError::Read {
            path: path.clone(),
            source,
        })?;
    let raw: RawRecord = serde_json::from_str(&contents).map_err(|source| EntryError::Parse {
        path: path.clone(),
        source,
    })?;

    // Partitioned records take their category from the directory, so their
    // own field is never inspected.
    let categories = match categories {
        CategorySource::Directory(category) => vec![normalize_category(category).to_string()],
        CategorySource::Record => match raw.categories.as_ref().map(RawCategories::as_list) {
            None => Vec::new(),
            Some(Some(names)) => names
                .iter()
                .map(|c| normalize_category(c).to_string())
                .collect(),
            Some(None) => return Err(EntryError::InvalidCategories { path }),
        },
    };

    let game = GameRecord::from_raw(raw, file.source_id, file.id.as_str(), categories);
    Ok(LoadedRecord { path, game })
}

fn enumerate_error(path: &Path, source: std::io::Error) -> EntryError {
    EntryError::Enumerate {
        path: path.display().to_string(),
        source,
    }
}

/// Keep the first record for each `(source, id)` key.
fn dedup_records(records: Vec<LoadedRecord>, mut errors: Vec<EntryError>) -> LoadedCatalog {
    let mut seen: HashSet<(String, String)> = HashSet::new();
    let mut games = Vec::with_capacity(records.len());
    for LoadedRecord { path, game } in records {
        if seen.insert((game.source.clone(), game.id.clone())) {
            games.push(game);
        } else {
            errors.push(EntryError::Duplicate {
                source_id: game.source,
                id: game.id,
                path,
            });
        }
    }
    LoadedCatalog { games, errors }
}

#[cfg(test)]
#[path = "tests/aggregator_tests.rs"]
mod tests;

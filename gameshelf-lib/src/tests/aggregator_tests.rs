use std::cell::Cell;
use std::io;

use super::*;
use crate::storage::MemoryStorage;

const ROOT: &str = "/data";

fn root() -> &'static Path {
    Path::new(ROOT)
}

fn record(title: &str, categories: &[&str]) -> String {
    serde_json::json!({
        "title": title,
        "preview_image": format!("/img/{title}.png"),
        "categories": categories,
        "iframe_url": "https://play.example/embed",
    })
    .to_string()
}

fn mixed_storage() -> MemoryStorage {
    MemoryStorage::new()
        .with_file("/data/1000webgames/snake.json", record("Snake", &["Arcade", "Sport"]))
        .with_file("/data/1000webgames/tetra.json", record("Tetra", &["Puzzle"]))
        .with_file("/data/1000webgames/notes.txt", "not a record")
        .with_file("/data/html5games/girl/makeover.json", record("Makeover", &["Action"]))
        .with_file("/data/html5games/jump_run/hopper.json", record("Hopper", &[]))
        .with_file("/data/html5games/README.md", "ignored")
        .with_file("/data/loose.json", record("Loose", &["Girls"]))
}

fn sources() -> Vec<SourceDescriptor> {
    vec![
        SourceDescriptor::flat("1000webgames"),
        SourceDescriptor::partitioned("html5games"),
        SourceDescriptor::single_root(),
    ]
}

fn find<'a>(catalog: &'a LoadedCatalog, source: &str, id: &str) -> &'a GameRecord {
    catalog
        .games
        .iter()
        .find(|g| g.source == source && g.id == id)
        .unwrap_or_else(|| panic!("{source}/{id} not loaded"))
}

#[tokio::test]
async fn loads_all_source_kinds() {
    let storage = mixed_storage();
    let catalog = load_catalog(&storage, root(), &sources()).await.unwrap();

    let keys: Vec<String> = catalog.games.iter().map(GameRecord::key).collect();
    assert_eq!(
        keys,
        [
            "1000webgames/snake",
            "1000webgames/tetra",
            "html5games/makeover",
            "html5games/hopper",
            "root/loose",
        ]
    );
    assert!(catalog.errors.is_empty());
}

#[tokio::test]
async fn flat_categories_are_normalized() {
    let storage = mixed_storage();
    let catalog = load_catalog(&storage, root(), &sources()).await.unwrap();

    assert_eq!(find(&catalog, "1000webgames", "snake").categories, ["Arcade", "Sports"]);
    assert_eq!(find(&catalog, "root", "loose").categories, ["Girl"]);
}

#[tokio::test]
async fn partition_directory_overrides_record_categories() {
    let storage = mixed_storage();
    let catalog = load_catalog(&storage, root(), &sources()).await.unwrap();

    assert_eq!(find(&catalog, "html5games", "makeover").categories, ["Girl"]);
    assert_eq!(find(&catalog, "html5games", "hopper").categories, ["Jump Run"]);
}

#[tokio::test]
async fn partition_directory_alias_is_normalized() {
    let storage = MemoryStorage::new()
        .with_file("/data/html5games/girls/a.json", record("A", &["Puzzle"]))
        .with_file("/data/html5games/sport/b.json", record("B", &[]));
    let sources = [SourceDescriptor::partitioned("html5games")];
    let catalog = load_catalog(&storage, root(), &sources).await.unwrap();

    assert_eq!(find(&catalog, "html5games", "a").categories, ["Girl"]);
    assert_eq!(find(&catalog, "html5games", "b").categories, ["Sports"]);
}

#[tokio::test]
async fn record_fields_are_carried_over() {
    let storage = mixed_storage();
    let catalog = load_catalog(&storage, root(), &sources()).await.unwrap();
    let snake = find(&catalog, "1000webgames", "snake");

    assert_eq!(snake.title.as_deref(), Some("Snake"));
    assert_eq!(snake.preview_image.as_deref(), Some("/img/Snake.png"));
    assert_eq!(snake.iframe_url.as_deref(), Some("https://play.example/embed"));
    assert!(snake.html_content.is_none());
}

#[tokio::test]
async fn one_bad_record_does_not_affect_siblings() {
    let mut storage = MemoryStorage::new()
        .with_file("/data/jopi/a.json", record("A", &["Puzzle"]))
        .with_file("/data/jopi/b.json", "{ this is not json")
        .with_file("/data/jopi/c.json", record("C", &["Puzzle"]))
        .with_file("/data/jopi/d.json", record("D", &["Puzzle"]));
    storage.deny("/data/jopi/d.json");

    let sources = [SourceDescriptor::flat("jopi")];
    let catalog = load_catalog(&storage, root(), &sources).await.unwrap();

    let ids: Vec<&str> = catalog.games.iter().map(|g| g.id.as_str()).collect();
    assert_eq!(ids, ["a", "c"]);
    assert_eq!(catalog.errors.len(), 2);
    assert!(matches!(catalog.errors[0], EntryError::Parse { .. }));
    assert!(matches!(catalog.errors[1], EntryError::Read { .. }));
    assert_eq!(catalog.errors[0].path(), "/data/jopi/b.json");
}

#[tokio::test]
async fn missing_title_still_loads() {
    let storage = MemoryStorage::new().with_file("/data/jopi/x.json", r#"{"categories": ["Kids"]}"#);
    let sources = [SourceDescriptor::flat("jopi")];
    let catalog = load_catalog(&storage, root(), &sources).await.unwrap();

    let game = find(&catalog, "jopi", "x");
    assert!(game.title.is_none());
    assert!(!game.is_valid());
}

#[tokio::test]
async fn unknown_fields_and_null_categories_are_tolerated() {
    let storage = MemoryStorage::new().with_file(
        "/data/jopi/x.json",
        r#"{"title": "X", "categories": null, "rating": 4.5, "tags": ["a"]}"#,
    );
    let sources = [SourceDescriptor::flat("jopi")];
    let catalog = load_catalog(&storage, root(), &sources).await.unwrap();

    assert!(find(&catalog, "jopi", "x").categories.is_empty());
    assert!(catalog.errors.is_empty());
}

#[tokio::test]
async fn unlistable_source_yields_no_records() {
    let mut storage = mixed_storage();
    storage.deny("/data/1000webgames");

    let catalog = load_catalog(&storage, root(), &sources()).await.unwrap();

    assert!(catalog.games.iter().all(|g| g.source != "1000webgames"));
    assert_eq!(catalog.games.len(), 3);
    assert!(matches!(catalog.errors[0], EntryError::Enumerate { .. }));
}

#[tokio::test]
async fn unlistable_category_directory_is_isolated() {
    let mut storage = mixed_storage();
    storage.deny("/data/html5games/girl");

    let catalog = load_catalog(&storage, root(), &sources()).await.unwrap();

    assert!(catalog.games.iter().any(|g| g.id == "hopper"));
    assert!(catalog.games.iter().all(|g| g.id != "makeover"));
    assert_eq!(catalog.errors.len(), 1);
}

#[tokio::test]
async fn missing_source_directory_is_not_fatal() {
    let storage = mixed_storage();
    let sources = [SourceDescriptor::flat("jopi"), SourceDescriptor::single_root()];
    let catalog = load_catalog(&storage, root(), &sources).await.unwrap();

    assert_eq!(catalog.games.len(), 1);
    assert_eq!(catalog.errors.len(), 1);
}

#[tokio::test]
async fn unlistable_root_is_an_aggregation_failure() {
    let storage = MemoryStorage::new();
    let err = load_catalog(&storage, root(), &sources()).await.unwrap_err();
    assert!(matches!(err, AggregationError::RootUnavailable { .. }));
}

#[tokio::test]
async fn duplicate_keys_keep_first_record() {
    let storage = MemoryStorage::new()
        .with_file("/data/html5games/action/dup.json", record("First", &[]))
        .with_file("/data/html5games/arcade/dup.json", record("Second", &[]));
    let sources = [SourceDescriptor::partitioned("html5games")];
    let catalog = load_catalog(&storage, root(), &sources).await.unwrap();

    assert_eq!(catalog.games.len(), 1);
    assert_eq!(catalog.games[0].title.as_deref(), Some("First"));
    assert!(matches!(catalog.errors[0], EntryError::Duplicate { .. }));
    assert_eq!(catalog.errors[0].path(), "/data/html5games/arcade/dup.json");
}

#[tokio::test]
async fn empty_source_name_is_ignored() {
    let storage = mixed_storage();
    let sources = [SourceDescriptor::flat("")];
    let catalog = load_catalog(&storage, root(), &sources).await.unwrap();
    assert!(catalog.games.is_empty());
    assert!(catalog.errors.is_empty());
}

#[tokio::test]
async fn discovery_matches_directory_layout() {
    let storage = mixed_storage();
    let sources = discover_sources(&storage, root(), DEFAULT_PARTITIONED_SOURCES)
        .await
        .unwrap();

    assert_eq!(
        sources,
        vec![
            SourceDescriptor::flat("1000webgames"),
            SourceDescriptor::partitioned("html5games"),
            SourceDescriptor::single_root(),
        ]
    );
}

#[tokio::test]
async fn discovery_without_root_records_has_no_single_root() {
    let storage = MemoryStorage::new().with_file("/data/jopi/a.json", record("A", &[]));
    let sources = discover_sources(&storage, root(), &["html5games".to_string()][..])
        .await
        .unwrap();
    assert_eq!(sources, vec![SourceDescriptor::flat("jopi")]);
}

#[tokio::test]
async fn discovery_fails_on_unlistable_root() {
    let mut storage = mixed_storage();
    storage.deny(ROOT);
    let err = discover_sources(&storage, root(), DEFAULT_PARTITIONED_SOURCES)
        .await
        .unwrap_err();
    assert!(matches!(err, AggregationError::RootUnavailable { .. }));
}

#[tokio::test]
async fn partitioned_records_ignore_malformed_categories() {
    let storage = MemoryStorage::new()
        .with_file("/data/html5games/girl/a.json", r#"{"title": "A", "categories": "Action"}"#)
        .with_file("/data/html5games/girl/b.json", r#"{"title": "B", "categories": [1, 2]}"#);
    let sources = [SourceDescriptor::partitioned("html5games")];
    let catalog = load_catalog(&storage, root(), &sources).await.unwrap();

    let keys: Vec<String> = catalog.games.iter().map(GameRecord::key).collect();
    assert_eq!(keys, ["html5games/a", "html5games/b"]);
    assert!(catalog.games.iter().all(|g| g.categories == ["Girl"]));
    assert!(catalog.errors.is_empty());
}

#[tokio::test]
async fn flat_records_need_a_category_list() {
    let storage = MemoryStorage::new()
        .with_file("/data/jopi/a.json", r#"{"title": "A", "categories": "Action"}"#)
        .with_file("/data/jopi/b.json", record("B", &["Action"]));
    let sources = [SourceDescriptor::flat("jopi")];
    let catalog = load_catalog(&storage, root(), &sources).await.unwrap();

    assert_eq!(catalog.games.len(), 1);
    assert_eq!(catalog.games[0].id, "b");
    assert!(matches!(
        catalog.errors[0],
        EntryError::InvalidCategories { .. }
    ));
    assert_eq!(catalog.errors[0].path(), "/data/jopi/a.json");
}

/// Wraps a store and records the most reads it ever saw in flight.
struct CountingStorage {
    inner: MemoryStorage,
    in_flight: Cell<usize>,
    peak: Cell<usize>,
}

impl Storage for CountingStorage {
    async fn list(&self, path: &Path) -> io::Result<Vec<String>> {
        self.inner.list(path).await
    }

    async fn stat(&self, path: &Path) -> io::Result<EntryKind> {
        self.inner.stat(path).await
    }

    async fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.in_flight.set(self.in_flight.get() + 1);
        self.peak.set(self.peak.get().max(self.in_flight.get()));
        tokio::task::yield_now().await;
        let result = self.inner.read_to_string(path).await;
        self.in_flight.set(self.in_flight.get() - 1);
        result
    }
}

#[tokio::test]
async fn large_source_reads_are_bounded() {
    let mut inner = MemoryStorage::new();
    for i in 0..500 {
        inner.insert(format!("/data/jopi/g{i:04}.json"), record(&format!("G{i}"), &[]));
    }
    for i in 0..100 {
        inner.insert(
            format!("/data/html5games/puzzle/p{i:03}.json"),
            record(&format!("P{i}"), &[]),
        );
        inner.insert(
            format!("/data/html5games/racing/r{i:03}.json"),
            record(&format!("R{i}"), &[]),
        );
    }
    let storage = CountingStorage {
        inner,
        in_flight: Cell::new(0),
        peak: Cell::new(0),
    };
    let sources = [
        SourceDescriptor::flat("jopi"),
        SourceDescriptor::partitioned("html5games"),
    ];
    let catalog = load_catalog(&storage, root(), &sources).await.unwrap();

    assert_eq!(catalog.games.len(), 700);
    assert!(catalog.errors.is_empty());
    assert!(storage.peak.get() <= MAX_CONCURRENT_READS);
    assert!(storage.peak.get() > 1);
    assert_eq!(catalog.games[0].id, "g0000");
    assert_eq!(catalog.games[699].id, "r099");
}

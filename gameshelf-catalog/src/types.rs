//! Data model types for the game catalog.
//!
//! These types represent one catalog load: the records scraped from each
//! upstream source, the descriptors that say how to walk those sources, and
//! the on-disk JSON schema a record file is read from.

use serde::{Deserialize, Serialize};

/// Title shown for a record whose file carries none.
pub const UNTITLED_GAME: &str = "Untitled Game";

/// Preview image shown for a record whose file carries none.
pub const PLACEHOLDER_IMAGE: &str = "/placeholder.jpg";

/// Source id stamped on records that live directly in the catalog root.
pub const ROOT_SOURCE: &str = "root";

// ── Source ──────────────────────────────────────────────────────────────────

/// How the records of one source are laid out on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// `<root>/<name>/<id>.json`
    Flat,
    /// `<root>/<name>/<category_token>/<id>.json`; the directory decides the category.
    CategoryPartitioned,
    /// `<root>/<id>.json`, stamped with [`ROOT_SOURCE`].
    SingleRoot,
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Flat => write!(f, "flat"),
            Self::CategoryPartitioned => write!(f, "category-partitioned"),
            Self::SingleRoot => write!(f, "single-root"),
        }
    }
}

/// One upstream origin of scraped records, loaded from YAML or discovered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDescriptor {
    /// Directory name under the catalog root; also the source id of its records.
    #[serde(default)]
    pub name: String,
    pub kind: SourceKind,
}

impl SourceDescriptor {
    pub fn flat(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: SourceKind::Flat,
        }
    }

    pub fn partitioned(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: SourceKind::CategoryPartitioned,
        }
    }

    pub fn single_root() -> Self {
        Self {
            name: ROOT_SOURCE.to_string(),
            kind: SourceKind::SingleRoot,
        }
    }

    /// The source id stamped on every record this descriptor yields.
    pub fn source_id(&self) -> &str {
        match self.kind {
            SourceKind::SingleRoot => ROOT_SOURCE,
            SourceKind::Flat | SourceKind::CategoryPartitioned => &self.name,
        }
    }
}

// ── Record file ─────────────────────────────────────────────────────────────

/// The JSON object stored in one record file. Unknown fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRecord {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub preview_image: Option<String>,
    #[serde(default)]
    pub categories: Option<RawCategories>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub html_content: Option<String>,
    #[serde(default)]
    pub iframe_url: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// The `categories` field as found in a record file.
///
/// Anything other than a list of strings is kept as [`RawCategories::Malformed`]
/// so that sources which ignore the field can still load the record.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawCategories {
    List(Vec<String>),
    Malformed(serde::de::IgnoredAny),
}

impl RawCategories {
    /// The category list, or `None` if the field was not a list of strings.
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(names) => Some(names),
            Self::Malformed(_) => None,
        }
    }
}

// ── Game ────────────────────────────────────────────────────────────────────

/// One game in the unified catalog, stamped with its provenance.
///
/// `(source, id)` is unique across a single catalog load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub id: String,
    pub source: String,
    pub title: Option<String>,
    pub preview_image: Option<String>,
    /// Canonical category names, in file order.
    pub categories: Vec<String>,
    pub description: Option<String>,
    /// Raw embedded markup scraped from the upstream detail page.
    pub html_content: Option<String>,
    /// Embeddable URL of the playable game.
    pub iframe_url: Option<String>,
    /// Upstream page the record was scraped from.
    pub url: Option<String>,
}

impl GameRecord {
    /// Build a record from a parsed file, with categories already decided by the caller.
    pub fn from_raw(
        raw: RawRecord,
        source: impl Into<String>,
        id: impl Into<String>,
        categories: Vec<String>,
    ) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            title: raw.title,
            preview_image: raw.preview_image,
            categories,
            description: raw.description,
            html_content: raw.html_content,
            iframe_url: raw.iframe_url,
            url: raw.url,
        }
    }

    /// Title for display, falling back to [`UNTITLED_GAME`].
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or(UNTITLED_GAME)
    }

    /// Preview image for display, falling back to [`PLACEHOLDER_IMAGE`].
    pub fn preview_image_or_placeholder(&self) -> &str {
        self.preview_image
            .as_deref()
            .filter(|p| !p.is_empty())
            .unwrap_or(PLACEHOLDER_IMAGE)
    }

    /// A record is renderable only with a non-empty id, source and title.
    pub fn is_valid(&self) -> bool {
        !self.id.is_empty()
            && !self.source.is_empty()
            && self.title.as_deref().is_some_and(|t| !t.is_empty())
    }

    /// Detail-view key, e.g. `1000webgames/snake`.
    pub fn key(&self) -> String {
        format!("{}/{}", self.source, self.id)
    }
}

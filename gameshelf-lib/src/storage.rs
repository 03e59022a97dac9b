//! Storage enumeration behind the catalog loader.
//!
//! The loader only needs three fallible operations: list a directory, tell a
//! file from a directory, and read a file as text. [`FsStorage`] does this
//! over `tokio::fs`; [`MemoryStorage`] serves fixtures in tests and demos.

use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::{Path, PathBuf};

/// What a path names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
    Other,
}

/// Read-only access to the catalog tree.
#[allow(async_fn_in_trait)]
pub trait Storage {
    /// Names of the entries directly under `path`, in a stable order.
    async fn list(&self, path: &Path) -> io::Result<Vec<String>>;

    /// Whether `path` is a file or a directory.
    async fn stat(&self, path: &Path) -> io::Result<EntryKind>;

    /// Full contents of the file at `path`.
    async fn read_to_string(&self, path: &Path) -> io::Result<String>;
}

/// Local filesystem storage.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsStorage;

impl Storage for FsStorage {
    async fn list(&self, path: &Path) -> io::Result<Vec<String>> {
        let mut dir = tokio::fs::read_dir(path).await?;
        let mut names = Vec::new();
        while let Some(entry) = dir.next_entry().await? {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        names.sort();
        Ok(names)
    }

    async fn stat(&self, path: &Path) -> io::Result<EntryKind> {
        let meta = tokio::fs::metadata(path).await?;
        Ok(if meta.is_dir() {
            EntryKind::Directory
        } else if meta.is_file() {
            EntryKind::File
        } else {
            EntryKind::Other
        })
    }

    async fn read_to_string(&self, path: &Path) -> io::Result<String> {
        tokio::fs::read_to_string(path).await
    }
}

/// In-memory storage keyed by full file path. Directories are implied by
/// the files beneath them.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    files: BTreeMap<PathBuf, String>,
    unreadable: BTreeSet<PathBuf>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a file.
    pub fn insert(&mut self, path: impl Into<PathBuf>, contents: impl Into<String>) {
        self.files.insert(path.into(), contents.into());
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with_file(mut self, path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        self.insert(path, contents);
        self
    }

    /// Make every operation on `path` fail with `PermissionDenied`.
    pub fn deny(&mut self, path: impl Into<PathBuf>) {
        self.unreadable.insert(path.into());
    }

    fn check(&self, path: &Path) -> io::Result<()> {
        if self.unreadable.contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("{} is not readable", path.display()),
            ));
        }
        Ok(())
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.files
            .keys()
            .any(|file| file != path && file.starts_with(path))
    }
}

impl Storage for MemoryStorage {
    async fn list(&self, path: &Path) -> io::Result<Vec<String>> {
        self.check(path)?;
        if !self.is_dir(path) {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} is not a directory", path.display()),
            ));
        }

        let names: BTreeSet<String> = self
            .files
            .keys()
            .filter_map(|file| file.strip_prefix(path).ok())
            .filter_map(|rest| rest.components().next())
            .map(|first| first.as_os_str().to_string_lossy().into_owned())
            .collect();
        Ok(names.into_iter().collect())
    }

    async fn stat(&self, path: &Path) -> io::Result<EntryKind> {
        self.check(path)?;
        if self.files.contains_key(path) {
            Ok(EntryKind::File)
        } else if self.is_dir(path) {
            Ok(EntryKind::Directory)
        } else {
            Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} does not exist", path.display()),
            ))
        }
    }

    async fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.check(path)?;
        self.files.get(path).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} does not exist", path.display()),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> MemoryStorage {
        MemoryStorage::new()
            .with_file("/data/jopi/b.json", "{}")
            .with_file("/data/jopi/a.json", "{}")
            .with_file("/data/html5games/girl/c.json", "{}")
            .with_file("/data/loose.json", "{}")
    }

    #[tokio::test]
    async fn lists_immediate_children_sorted() {
        let storage = fixture();
        let names = storage.list(Path::new("/data")).await.unwrap();
        assert_eq!(names, ["html5games", "jopi", "loose.json"]);
        let names = storage.list(Path::new("/data/jopi")).await.unwrap();
        assert_eq!(names, ["a.json", "b.json"]);
    }

    #[tokio::test]
    async fn stat_distinguishes_files_and_directories() {
        let storage = fixture();
        assert_eq!(
            storage.stat(Path::new("/data/html5games")).await.unwrap(),
            EntryKind::Directory
        );
        assert_eq!(
            storage.stat(Path::new("/data/loose.json")).await.unwrap(),
            EntryKind::File
        );
        assert!(storage.stat(Path::new("/data/missing")).await.is_err());
    }

    #[tokio::test]
    async fn denied_paths_fail() {
        let mut storage = fixture();
        storage.deny("/data/jopi/a.json");
        let err = storage
            .read_to_string(Path::new("/data/jopi/a.json"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);
    }

    #[tokio::test]
    async fn fs_storage_lists_sorted_names() {
        let tmp = tempfile::TempDir::new().unwrap();
        std::fs::write(tmp.path().join("b.json"), "{}").unwrap();
        std::fs::write(tmp.path().join("a.json"), "{}").unwrap();
        std::fs::create_dir(tmp.path().join("sub")).unwrap();

        let names = FsStorage.list(tmp.path()).await.unwrap();
        assert_eq!(names, ["a.json", "b.json", "sub"]);
        assert_eq!(
            FsStorage.stat(&tmp.path().join("sub")).await.unwrap(),
            EntryKind::Directory
        );
    }
}

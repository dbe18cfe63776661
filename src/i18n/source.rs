//! Read-only access to the on-disk message store.
//!
//! Everything above this module sees the store through [`MessageSource`], so
//! discovery, merging and validation can run against [`MemorySource`] in tests
//! and against [`DiskSource`] in the binaries.

use crate::i18n::I18nError;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::future::Future;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// One entry of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct DirEntry {
    /// File or directory name (no path components)
    pub name: String,

    /// Whether the entry is a directory
    pub is_dir: bool,
}

impl DirEntry {
    /// Listing entry for a regular file.
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_dir: false,
        }
    }

    /// Listing entry for a directory.
    pub fn dir(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_dir: true,
        }
    }
}

/// Read-only view of a message store.
pub trait MessageSource: Send + Sync {
    /// Read a file as UTF-8.
    ///
    /// Returns `Ok(None)` when the file does not exist. Absence is never an
    /// error at this layer; callers decide whether to fall back.
    fn read_to_string(
        &self,
        path: &Path,
    ) -> impl Future<Output = Result<Option<String>, I18nError>> + Send;

    /// List the entries of a directory.
    ///
    /// Returns `I18nError::MissingDirectory` when the directory does not exist.
    fn list_dir(&self, path: &Path)
        -> impl Future<Output = Result<Vec<DirEntry>, I18nError>> + Send;
}

/// Read and parse a JSON file, returning `None` when it does not exist.
///
/// Malformed JSON is reported as `I18nError::Parse` naming the file.
pub async fn read_json<S: MessageSource>(
    source: &S,
    path: &Path,
) -> Result<Option<Value>, I18nError> {
    let Some(contents) = source.read_to_string(path).await? else {
        return Ok(None);
    };

    serde_json::from_str(&contents)
        .map(Some)
        .map_err(|source| I18nError::Parse {
            path: path.to_path_buf(),
            source,
        })
}

// ==================== Disk ====================

/// Message source backed by the local filesystem.
#[derive(Debug, Clone, Default)]
pub struct DiskSource;

impl DiskSource {
    pub fn new() -> Self {
        Self
    }
}

impl MessageSource for DiskSource {
    async fn read_to_string(&self, path: &Path) -> Result<Option<String>, I18nError> {
        match tokio::fs::read_to_string(path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(I18nError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    async fn list_dir(&self, path: &Path) -> Result<Vec<DirEntry>, I18nError> {
        let io_error = |source: std::io::Error| I18nError::Io {
            path: path.to_path_buf(),
            source,
        };

        let mut reader = match tokio::fs::read_dir(path).await {
            Ok(reader) => reader,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(I18nError::MissingDirectory(path.to_path_buf()))
            }
            Err(e) => return Err(io_error(e)),
        };

        let mut entries = Vec::new();
        while let Some(entry) = reader.next_entry().await.map_err(io_error)? {
            let file_type = entry.file_type().await.map_err(io_error)?;
            entries.push(DirEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                is_dir: file_type.is_dir(),
            });
        }
        entries.sort();
        Ok(entries)
    }
}

// ==================== Memory ====================

/// In-memory message source.
///
/// Directories are implied by the files stored beneath them; empty
/// directories can be declared with [`MemorySource::with_dir`].
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    files: BTreeMap<PathBuf, String>,
    dirs: BTreeSet<PathBuf>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file with the given contents.
    pub fn with_file(mut self, path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        self.insert_file(path, contents);
        self
    }

    /// Declare a directory, which may be empty.
    pub fn with_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.dirs.insert(path.into());
        self
    }

    /// Add or replace a file.
    pub fn insert_file(&mut self, path: impl Into<PathBuf>, contents: impl Into<String>) {
        self.files.insert(path.into(), contents.into());
    }

    /// Remove a file, returning its previous contents.
    pub fn remove_file(&mut self, path: impl AsRef<Path>) -> Option<String> {
        self.files.remove(path.as_ref())
    }

    fn children(&self, dir: &Path) -> Vec<DirEntry> {
        let mut seen = BTreeMap::new();
        let paths = self.files.keys().chain(self.dirs.iter());

        for path in paths {
            let Ok(rest) = path.strip_prefix(dir) else {
                continue;
            };
            let mut components = rest.components();
            let Some(first) = components.next() else {
                continue;
            };
            let name = first.as_os_str().to_string_lossy().into_owned();
            let is_dir = components.next().is_some() || self.dirs.contains(path);
            let entry = seen.entry(name).or_insert(false);
            *entry |= is_dir;
        }

        seen.into_iter()
            .map(|(name, is_dir)| DirEntry { name, is_dir })
            .collect()
    }

    fn dir_exists(&self, dir: &Path) -> bool {
        self.dirs.iter().any(|d| d.starts_with(dir))
            || self
                .files
                .keys()
                .any(|file| file.starts_with(dir) && file != dir)
    }
}

impl MessageSource for MemorySource {
    async fn read_to_string(&self, path: &Path) -> Result<Option<String>, I18nError> {
        Ok(self.files.get(path).cloned())
    }

    async fn list_dir(&self, path: &Path) -> Result<Vec<DirEntry>, I18nError> {
        if !self.dir_exists(path) {
            return Err(I18nError::MissingDirectory(path.to_path_buf()));
        }
        Ok(self.children(path))
    }
}

//! Message store layout and app/locale discovery.
//!
//! The store looks like:
//!
//! ```text
//! packages/i18n/shared/<locale>.json   # { "<app>": { ... }, ... }
//! apps/<app>/messages/<locale>.json    # per-app bundle
//! apps/<app>/messages/REVIEW.md        # translation sign-off
//! ```
//!
//! Apps and locales are found by scanning directories. The scanning rules are
//! plain functions over a [`DirEntry`] listing; [`discover`] only does the I/O.

use crate::i18n::source::{DirEntry, MessageSource};
use crate::i18n::{I18nError, Locale};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Shared bundle directory, relative to the store root.
pub const SHARED_DIR: &str = "packages/i18n/shared";

/// Directory containing one subdirectory per app.
pub const APPS_DIR: &str = "apps";

/// Per-app messages directory name.
pub const MESSAGES_DIR: &str = "messages";

/// Sign-off file every app messages directory must carry.
pub const REVIEW_FILE: &str = "REVIEW.md";

/// Paths of the message store under a root directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageLayout {
    root: PathBuf,
}

impl MessageLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn shared_dir(&self) -> PathBuf {
        self.root.join(SHARED_DIR)
    }

    pub fn apps_dir(&self) -> PathBuf {
        self.root.join(APPS_DIR)
    }

    pub fn app_messages_dir(&self, app: &str) -> PathBuf {
        self.apps_dir().join(app).join(MESSAGES_DIR)
    }

    pub fn shared_file(&self, locale: &Locale) -> PathBuf {
        self.shared_dir().join(locale.file_name())
    }

    pub fn app_file(&self, app: &str, locale: &Locale) -> PathBuf {
        self.app_messages_dir(app).join(locale.file_name())
    }

    pub fn review_file(&self, app: &str) -> PathBuf {
        self.app_messages_dir(app).join(REVIEW_FILE)
    }
}

/// An app that has a messages directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppMessages {
    /// App identifier (directory name under `apps/`)
    pub id: String,

    /// Path of `apps/<id>/messages`
    pub messages_dir: PathBuf,

    /// Whether `REVIEW.md` is present in the messages directory
    pub has_review: bool,
}

/// Result of scanning the message store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Discovery {
    /// Apps in name order
    pub apps: Vec<AppMessages>,

    /// Every locale that has a bundle file anywhere in the store
    pub locales: BTreeSet<Locale>,
}

impl Discovery {
    /// Discovered locales that are not reference locales.
    pub fn translated_locales(&self) -> impl Iterator<Item = &Locale> {
        self.locales.iter().filter(|locale| !locale.is_reference())
    }
}

/// App identifiers from a listing of `apps/`: visible directories, sorted.
pub fn app_ids_from_listing(entries: &[DirEntry]) -> Vec<String> {
    let mut ids: Vec<String> = entries
        .iter()
        .filter(|entry| entry.is_dir && !entry.name.starts_with('.'))
        .map(|entry| entry.name.clone())
        .collect();
    ids.sort();
    ids
}

/// Locales named by the `.json` files in a listing.
pub fn locales_from_listing(entries: &[DirEntry]) -> BTreeSet<Locale> {
    entries
        .iter()
        .filter(|entry| !entry.is_dir)
        .filter_map(|entry| Locale::from_file_name(&entry.name))
        .collect()
}

/// Whether a messages directory listing contains the review file.
pub fn has_review_file(entries: &[DirEntry]) -> bool {
    entries
        .iter()
        .any(|entry| !entry.is_dir && entry.name == REVIEW_FILE)
}

/// Scan the store for apps and locales.
///
/// A missing shared or apps directory is fatal. An app directory without a
/// `messages/` subdirectory is skipped.
pub async fn discover<S: MessageSource>(
    source: &S,
    layout: &MessageLayout,
) -> Result<Discovery, I18nError> {
    let shared = source.list_dir(&layout.shared_dir()).await?;
    let mut locales = locales_from_listing(&shared);

    let app_listing = source.list_dir(&layout.apps_dir()).await?;
    let mut apps = Vec::new();

    for id in app_ids_from_listing(&app_listing) {
        let messages_dir = layout.app_messages_dir(&id);
        let listing = match source.list_dir(&messages_dir).await {
            Ok(listing) => listing,
            Err(I18nError::MissingDirectory(_)) => {
                debug!("Skipping {}: no {} directory", id, MESSAGES_DIR);
                continue;
            }
            Err(e) => return Err(e),
        };

        locales.extend(locales_from_listing(&listing));
        apps.push(AppMessages {
            has_review: has_review_file(&listing),
            id,
            messages_dir,
        });
    }

    debug!(
        "Discovered {} apps and {} locales under {}",
        apps.len(),
        locales.len(),
        layout.root().display()
    );

    Ok(Discovery { apps, locales })
}

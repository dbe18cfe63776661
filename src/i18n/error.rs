//! Error type shared by the message store, merger and checkers.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading or resolving message bundles.
#[derive(Debug, Error)]
pub enum I18nError {
    /// A file or directory could not be read for a reason other than absence.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A bundle file exists but is not valid JSON.
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A directory the pipeline needs to scan does not exist.
    #[error("missing directory: {0}")]
    MissingDirectory(PathBuf),

    /// A locale identifier that cannot name a bundle file.
    #[error("invalid locale identifier: '{0}'")]
    InvalidLocale(String),

    /// A rule table entry failed to compile.
    #[error("invalid rule pattern: {0}")]
    Rule(#[from] regex::Error),
}

//! Message resolution and validation for the sites' i18n bundles.
//!
//! # Architecture
//!
//! - `source`: read-only access to the message store (disk or in-memory)
//! - `discovery`: store layout, app and locale discovery
//! - `locale`: validated locale identifiers and fallback chains
//! - `merge`: shared + app bundle resolution with locale fallback
//! - `flatten`: nested trees to dotted key paths
//! - `rules`: spelling, placeholder and stop-word tables
//! - `validator`: the sync checker (key parity, spelling, placeholders, review gate)
//! - `quickcheck`: advisory missing-key and English-leak scan
//! - `report`: text and JSON rendering
//!
//! # Example
//!
//! ```rust,ignore
//! use airnub_i18n::i18n::{DiskSource, Locale, MessageLayout, Merger};
//!
//! let merger = Merger::new(DiskSource::new(), MessageLayout::new("."));
//! let messages = merger.load_messages("airnub", &Locale::parse("fr")?).await?;
//! ```

pub mod discovery;
mod error;
pub mod flatten;
mod locale;
pub mod merge;
pub mod quickcheck;
pub mod report;
pub mod rules;
pub mod source;
pub mod validator;

pub use discovery::{discover, AppMessages, Discovery, MessageLayout};
pub use error::I18nError;
pub use flatten::{flatten, FlattenedBundle};
pub use locale::{
    candidate_locales, default_fallback_locales, Locale, DEFAULT_FALLBACK_LOCALES, EN_GB, EN_US,
    REFERENCE_LOCALES,
};
pub use merge::{deep_merge, Merger};
pub use quickcheck::QuickCheck;
pub use report::{render_text, ReportSummary};
pub use rules::{RuleTables, Rules};
pub use source::{DirEntry, DiskSource, MemorySource, MessageSource};
pub use validator::{
    CheckOutcome, Issue, IssueKind, IssueLevel, SyncChecker, ValidationReport,
};

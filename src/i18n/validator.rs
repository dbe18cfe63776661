//! Sync checker: key parity, spelling conventions, placeholder leaks and
//! review sign-off across every app and locale in the message store.
//!
//! The rule functions are pure and return [`Issue`]s. [`SyncChecker::run`]
//! does the I/O and concatenates the per-unit results; it never prints and
//! never exits, so callers decide what a failing report means.

use crate::i18n::discovery::{discover, AppMessages, Discovery, MessageLayout, REVIEW_FILE};
use crate::i18n::flatten::{flatten, FlattenedBundle};
use crate::i18n::rules::Rules;
use crate::i18n::source::MessageSource;
use crate::i18n::{I18nError, Locale, Merger, REFERENCE_LOCALES};
use futures::future::join_all;
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::{debug, info};

/// Severity of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueLevel {
    Error,
    Warning,
}

/// What an issue is about; used for grouping in reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    MissingReview,
    Parse,
    MissingKey,
    ExtraKey,
    Spelling,
    Placeholder,
    SuspectedEnglish,
}

impl IssueKind {
    /// Heading used when printing grouped issues.
    pub fn label(&self) -> &'static str {
        match self {
            IssueKind::MissingReview => "Missing review file",
            IssueKind::Parse => "Unreadable bundle",
            IssueKind::MissingKey => "Missing keys",
            IssueKind::ExtraKey => "Extra keys",
            IssueKind::Spelling => "Spelling convention",
            IssueKind::Placeholder => "Placeholder markers",
            IssueKind::SuspectedEnglish => "Suspected untranslated strings",
        }
    }
}

/// A single diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    pub level: IssueLevel,
    pub kind: IssueKind,
    pub message: String,
}

impl Issue {
    pub fn error(kind: IssueKind, message: impl Into<String>) -> Self {
        Self {
            level: IssueLevel::Error,
            kind,
            message: message.into(),
        }
    }

    pub fn warning(kind: IssueKind, message: impl Into<String>) -> Self {
        Self {
            level: IssueLevel::Warning,
            kind,
            message: message.into(),
        }
    }
}

/// Collected issues from one or more checks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationReport {
    issues: Vec<Issue>,
}

impl ValidationReport {
    /// Create a new empty validation report
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, issue: Issue) {
        self.issues.push(issue);
    }

    /// Append the issues of another report, keeping their order.
    pub fn merge(&mut self, other: ValidationReport) {
        self.issues.extend(other.issues);
    }

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    pub fn errors(&self) -> impl Iterator<Item = &Issue> {
        self.issues
            .iter()
            .filter(|issue| issue.level == IssueLevel::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Issue> {
        self.issues
            .iter()
            .filter(|issue| issue.level == IssueLevel::Warning)
    }

    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }

    /// Check if the report has any errors
    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    /// Check if the report has any warnings
    pub fn has_warnings(&self) -> bool {
        self.warnings().next().is_some()
    }

    /// Check if the report is clean (no errors or warnings)
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// Whether this report fails a run. Errors always fail; warnings fail
    /// only in strict mode.
    pub fn should_fail(&self, strict: bool) -> bool {
        self.has_errors() || (strict && self.has_warnings())
    }
}

impl Extend<Issue> for ValidationReport {
    fn extend<T: IntoIterator<Item = Issue>>(&mut self, iter: T) {
        self.issues.extend(iter);
    }
}

impl FromIterator<Issue> for ValidationReport {
    fn from_iter<T: IntoIterator<Item = Issue>>(iter: T) -> Self {
        Self {
            issues: iter.into_iter().collect(),
        }
    }
}

/// A finished check: what was scanned and what was found.
#[derive(Debug, Clone, Default)]
pub struct CheckOutcome {
    pub discovery: Discovery,
    pub report: ValidationReport,
}

// ==================== Rule Functions ====================

const EXCERPT_CHARS: usize = 60;

/// Shorten a string for inclusion in an issue message.
pub(crate) fn excerpt(text: &str) -> String {
    if text.chars().count() <= EXCERPT_CHARS {
        return text.to_string();
    }
    let head: String = text.chars().take(EXCERPT_CHARS).collect();
    format!("{}…", head)
}

/// Baseline keys absent from `keys`.
pub fn missing_keys<'a>(
    baseline: &'a BTreeSet<String>,
    keys: &'a BTreeSet<String>,
) -> impl Iterator<Item = &'a String> {
    baseline.difference(keys)
}

/// Keys absent from the baseline.
pub fn extra_keys<'a>(
    baseline: &'a BTreeSet<String>,
    keys: &'a BTreeSet<String>,
) -> impl Iterator<Item = &'a String> {
    keys.difference(baseline)
}

/// Compare a locale's keys against the reference baseline.
pub fn check_key_parity(
    app: &str,
    locale: &Locale,
    baseline: &BTreeSet<String>,
    keys: &BTreeSet<String>,
) -> Vec<Issue> {
    let missing = missing_keys(baseline, keys).map(|key| {
        Issue::error(
            IssueKind::MissingKey,
            format!("{}/{}: missing key '{}'", app, locale, key),
        )
    });
    let extra = extra_keys(baseline, keys).map(|key| {
        Issue::error(
            IssueKind::ExtraKey,
            format!("{}/{}: extra key '{}'", app, locale, key),
        )
    });
    missing.chain(extra).collect()
}

/// Check en-US strings for British spellings and en-GB strings for American
/// ones. Other locales produce no issues.
pub fn check_spelling(
    app: &str,
    locale: &Locale,
    bundle: &FlattenedBundle,
    rules: &Rules,
) -> Vec<Issue> {
    let variety = if locale.is_us() { "British" } else { "American" };

    bundle
        .strings()
        .flat_map(|(path, text)| {
            rules
                .spelling_violations(locale, text)
                .into_iter()
                .map(move |violation| {
                    Issue::error(
                        IssueKind::Spelling,
                        format!(
                            "{}/{}: {} spelling '{}' in '{}' (use '{}')",
                            app, locale, variety, violation.found, path, violation.expected
                        ),
                    )
                })
        })
        .collect()
}

/// Check translated strings for leftover TODO/TBD/FIXME markers and `@@`
/// placeholders. Reference locales are skipped.
pub fn check_placeholders(
    app: &str,
    locale: &Locale,
    bundle: &FlattenedBundle,
    rules: &Rules,
    strict: bool,
) -> Vec<Issue> {
    if locale.is_reference() {
        return Vec::new();
    }

    bundle
        .strings()
        .filter_map(|(path, text)| {
            let markers = rules.leak_markers(text);
            if markers.is_empty() {
                return None;
            }
            let message = format!(
                "{}/{}: placeholder marker {} in '{}': \"{}\"",
                app,
                locale,
                markers.join(", "),
                path,
                excerpt(text)
            );
            Some(if strict {
                Issue::error(IssueKind::Placeholder, message)
            } else {
                Issue::warning(IssueKind::Placeholder, message)
            })
        })
        .collect()
}

/// Require the review sign-off file in the app's messages directory.
pub fn check_review_file(app: &AppMessages) -> Option<Issue> {
    if app.has_review {
        return None;
    }
    Some(Issue::error(
        IssueKind::MissingReview,
        format!(
            "{}: missing {}",
            app.id,
            app.messages_dir.join(REVIEW_FILE).display()
        ),
    ))
}

/// Turn a per-unit load failure into an issue.
pub fn load_failure(app: &str, locale: &Locale, err: &I18nError, level: IssueLevel) -> Issue {
    Issue {
        level,
        kind: IssueKind::Parse,
        message: format!("{}/{}: {}", app, locale, err),
    }
}

// ==================== Sync Checker ====================

/// Reference bundles and their combined keys for one app.
pub(crate) struct ReferenceSet {
    pub bundles: Vec<(Locale, FlattenedBundle)>,
    /// `None` when a reference bundle failed to load
    pub baseline: Option<BTreeSet<String>>,
}

/// Load the reference locales for `app`.
///
/// `bundles` hold each reference locale's own files (no fallback) for the
/// spelling pass. The baseline is the union of keys of the fully resolved
/// reference bundles, using the merger's fallback chain.
pub(crate) async fn load_references<S: MessageSource>(
    merger: &Merger<S>,
    app: &str,
    failure_level: IssueLevel,
    report: &mut ValidationReport,
) -> ReferenceSet {
    let mut bundles = Vec::new();
    let mut baseline = Some(BTreeSet::new());

    for code in REFERENCE_LOCALES {
        let Ok(locale) = Locale::parse(code) else {
            continue;
        };
        let exact = match merger.load_exact(app, &locale).await {
            Ok(tree) => flatten(&tree),
            Err(e) => {
                report.push(load_failure(app, &locale, &e, failure_level));
                baseline = None;
                continue;
            }
        };

        if baseline.is_some() {
            let resolved = if merger.fallback_locales().is_empty() {
                Ok(exact.keys.clone())
            } else {
                merger
                    .load_messages(app, &locale)
                    .await
                    .map(|tree| flatten(&tree).keys)
            };
            match resolved {
                Ok(keys) => {
                    if let Some(baseline) = baseline.as_mut() {
                        baseline.extend(keys);
                    }
                }
                Err(e) => {
                    report.push(load_failure(app, &locale, &e, failure_level));
                    baseline = None;
                }
            }
        }

        bundles.push((locale, exact));
    }

    ReferenceSet { bundles, baseline }
}

/// Runs every sync rule over the message store.
pub struct SyncChecker<S> {
    merger: Merger<S>,
    rules: Rules,
    strict: bool,
}

impl<S: MessageSource> SyncChecker<S> {
    pub fn new(source: S, layout: MessageLayout, rules: Rules) -> Self {
        Self {
            merger: Merger::new(source, layout),
            rules,
            strict: false,
        }
    }

    /// Fallback chain used when resolving translated locales.
    pub fn with_fallback_locales(mut self, fallback_locales: Vec<Locale>) -> Self {
        self.merger = self.merger.with_fallback_locales(fallback_locales);
        self
    }

    /// In strict mode placeholder markers are errors instead of warnings.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Check every discovered app and locale.
    ///
    /// Only discovery failures (missing root directories) are returned as
    /// errors. Everything scoped to a single app/locale ends up in the report.
    pub async fn run(&self) -> Result<CheckOutcome, I18nError> {
        let discovery = discover(self.merger.source(), self.merger.layout()).await?;
        info!(
            "Checking {} apps across {} locales",
            discovery.apps.len(),
            discovery.locales.len()
        );

        let app_reports = join_all(
            discovery
                .apps
                .iter()
                .map(|app| self.check_app(app, &discovery)),
        )
        .await;

        let mut report = ValidationReport::new();
        for app_report in app_reports {
            report.merge(app_report);
        }

        info!(
            "Sync check finished: {} errors, {} warnings",
            report.error_count(),
            report.warning_count()
        );
        Ok(CheckOutcome { discovery, report })
    }

    async fn check_app(&self, app: &AppMessages, discovery: &Discovery) -> ValidationReport {
        let mut report = ValidationReport::new();
        report.extend(check_review_file(app));

        let references =
            load_references(&self.merger, &app.id, IssueLevel::Error, &mut report).await;
        for (locale, bundle) in &references.bundles {
            report.extend(check_spelling(&app.id, locale, bundle, &self.rules));
        }

        let baseline = references.baseline.as_ref();
        if baseline.is_none() {
            debug!("{}: reference bundles unreadable, skipping key parity", app.id);
        }

        let locale_reports = join_all(
            discovery
                .translated_locales()
                .map(|locale| self.check_locale(&app.id, locale, baseline)),
        )
        .await;
        for locale_report in locale_reports {
            report.merge(locale_report);
        }

        report
    }

    async fn check_locale(
        &self,
        app: &str,
        locale: &Locale,
        baseline: Option<&BTreeSet<String>>,
    ) -> ValidationReport {
        let tree = match self.merger.load_messages(app, locale).await {
            Ok(tree) => tree,
            Err(e) => {
                return std::iter::once(load_failure(app, locale, &e, IssueLevel::Error)).collect()
            }
        };

        let bundle = flatten(&tree);
        debug!("{}/{}: {} keys", app, locale, bundle.len());

        let mut report = ValidationReport::new();
        if let Some(baseline) = baseline {
            report.extend(check_key_parity(app, locale, baseline, &bundle.keys));
        }
        report.extend(check_placeholders(
            app,
            locale,
            &bundle,
            &self.rules,
            self.strict,
        ));
        report
    }
}

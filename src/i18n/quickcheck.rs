//! Quick check: a fast, advisory pass over translated locales.
//!
//! Unlike the sync checker, every locale is resolved exactly as written on
//! disk (no fallback), so a translation that is absent shows up as missing
//! keys instead of silently borrowing English. Strings that hit two or more
//! English stop words are flagged as probably untranslated. Everything is a
//! warning.

use crate::i18n::discovery::{discover, AppMessages, Discovery, MessageLayout};
use crate::i18n::flatten::{flatten, FlattenedBundle};
use crate::i18n::rules::Rules;
use crate::i18n::source::MessageSource;
use crate::i18n::validator::{
    excerpt, load_failure, load_references, missing_keys, CheckOutcome, Issue, IssueKind,
    IssueLevel, ValidationReport,
};
use crate::i18n::{I18nError, Locale, Merger};
use futures::future::join_all;
use std::collections::BTreeSet;
use tracing::info;

/// Flag strings that look like untranslated English.
pub fn check_suspected_english(
    app: &str,
    locale: &Locale,
    bundle: &FlattenedBundle,
    rules: &Rules,
) -> Vec<Issue> {
    if locale.is_reference() {
        return Vec::new();
    }

    bundle
        .strings()
        .filter(|(_, text)| rules.is_suspected_english(text))
        .map(|(path, text)| {
            let hits: Vec<String> = rules.stop_word_hits(text).into_iter().collect();
            Issue::warning(
                IssueKind::SuspectedEnglish,
                format!(
                    "{}/{}: '{}' looks untranslated ({}): \"{}\"",
                    app,
                    locale,
                    path,
                    hits.join(", "),
                    excerpt(text)
                ),
            )
        })
        .collect()
}

/// Report reference keys absent from a locale, as warnings.
pub fn check_missing_keys(
    app: &str,
    locale: &Locale,
    baseline: &BTreeSet<String>,
    keys: &BTreeSet<String>,
) -> Vec<Issue> {
    missing_keys(baseline, keys)
        .map(|key| {
            Issue::warning(
                IssueKind::MissingKey,
                format!("{}/{}: missing key '{}'", app, locale, key),
            )
        })
        .collect()
}

/// Advisory checker for missing translations and English leaks.
pub struct QuickCheck<S> {
    merger: Merger<S>,
    rules: Rules,
}

impl<S: MessageSource> QuickCheck<S> {
    pub fn new(source: S, layout: MessageLayout, rules: Rules) -> Self {
        Self {
            merger: Merger::new(source, layout).with_fallback_locales(Vec::new()),
            rules,
        }
    }

    /// Check every discovered app and translated locale.
    pub async fn run(&self) -> Result<CheckOutcome, I18nError> {
        let discovery = discover(self.merger.source(), self.merger.layout()).await?;
        info!(
            "Quick check over {} apps and {} translated locales",
            discovery.apps.len(),
            discovery.translated_locales().count()
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

        info!("Quick check found {} issues", report.issues().len());
        Ok(CheckOutcome { discovery, report })
    }

    async fn check_app(&self, app: &AppMessages, discovery: &Discovery) -> ValidationReport {
        let mut report = ValidationReport::new();
        let references =
            load_references(&self.merger, &app.id, IssueLevel::Warning, &mut report).await;

        for locale in discovery.translated_locales() {
            let tree = match self.merger.load_exact(&app.id, locale).await {
                Ok(tree) => tree,
                Err(e) => {
                    report.push(load_failure(&app.id, locale, &e, IssueLevel::Warning));
                    continue;
                }
            };

            let bundle = flatten(&tree);
            if let Some(baseline) = &references.baseline {
                report.extend(check_missing_keys(&app.id, locale, baseline, &bundle.keys));
            }
            report.extend(check_suspected_english(
                &app.id,
                locale,
                &bundle,
                &self.rules,
            ));
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::source::MemorySource;
    use serde_json::json;

    fn locale(code: &str) -> Locale {
        Locale::parse(code).expect("valid locale")
    }

    fn rules() -> Rules {
        Rules::standard().expect("built-in tables compile")
    }

    fn store() -> MemorySource {
        MemorySource::new()
            .with_dir("packages/i18n/shared")
            .with_file(
                "apps/speckit/messages/en-GB.json",
                r#"{"cta": "Please contact our team", "title": "Speckit"}"#,
            )
            .with_file(
                "apps/speckit/messages/en-US.json",
                r#"{"cta": "Please contact our team", "title": "Speckit"}"#,
            )
    }

    // ==================== Rule Tests ====================

    #[test]
    fn test_suspected_english_flags_untranslated() {
        let bundle = flatten(&json!({"cta": "Please contact our team"}));
        let issues = check_suspected_english("speckit", &locale("es"), &bundle, &rules());

        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].level, IssueLevel::Warning);
        assert_eq!(issues[0].kind, IssueKind::SuspectedEnglish);
        assert!(issues[0].message.contains("contact, our, please"));
    }

    #[test]
    fn test_suspected_english_ignores_translations() {
        let bundle = flatten(&json!({"cta": "Póngase en contacto con nuestro equipo"}));
        assert!(check_suspected_english("speckit", &locale("es"), &bundle, &rules()).is_empty());
    }

    #[test]
    fn test_suspected_english_skips_reference() {
        let bundle = flatten(&json!({"cta": "Please contact our team"}));
        assert!(check_suspected_english("speckit", &locale("en-GB"), &bundle, &rules()).is_empty());
    }

    #[test]
    fn test_missing_keys_are_warnings() {
        let baseline: BTreeSet<String> = ["a".to_string(), "b".to_string()].into();
        let found: BTreeSet<String> = ["a".to_string(), "extra".to_string()].into();

        let issues = check_missing_keys("speckit", &locale("es"), &baseline, &found);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].level, IssueLevel::Warning);
        assert_eq!(issues[0].message, "speckit/es: missing key 'b'");
    }

    // ==================== QuickCheck Tests ====================

    #[tokio::test]
    async fn test_run_flags_english_leak() {
        let store = store().with_file(
            "apps/speckit/messages/es.json",
            r#"{"cta": "Please contact our team", "title": "Speckit"}"#,
        );

        let outcome = QuickCheck::new(store, MessageLayout::new(""), rules())
            .run()
            .await
            .expect("run");

        let issues = outcome.report.issues();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].kind, IssueKind::SuspectedEnglish);
        assert!(!outcome.report.has_errors());
    }

    #[tokio::test]
    async fn test_run_does_not_fall_back_for_absent_locale() {
        // "es" exists for another app only, so speckit has no es bundle at all
        let store = store().with_file("apps/adf/messages/es.json", "{}");

        let outcome = QuickCheck::new(store, MessageLayout::new(""), rules())
            .run()
            .await
            .expect("run");

        let speckit_missing: Vec<_> = outcome
            .report
            .issues()
            .iter()
            .filter(|i| i.message.starts_with("speckit/es: missing key"))
            .collect();
        assert_eq!(speckit_missing.len(), 2);
        assert!(outcome
            .report
            .issues()
            .iter()
            .all(|i| i.kind != IssueKind::SuspectedEnglish));
    }

    #[tokio::test]
    async fn test_run_clean_translation() {
        let store = store().with_file(
            "apps/speckit/messages/es.json",
            r#"{"cta": "Contacte con nuestro equipo", "title": "Speckit"}"#,
        );

        let outcome = QuickCheck::new(store, MessageLayout::new(""), rules())
            .run()
            .await
            .expect("run");
        assert!(outcome.report.is_clean());
    }

    #[tokio::test]
    async fn test_run_parse_error_is_warning() {
        let store = store().with_file("apps/speckit/messages/es.json", "{");

        let outcome = QuickCheck::new(store, MessageLayout::new(""), rules())
            .run()
            .await
            .expect("run");
        let issues = outcome.report.issues();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].kind, IssueKind::Parse);
        assert_eq!(issues[0].level, IssueLevel::Warning);
    }
}

//! Report rendering for the command-line tools.
//!
//! Text output groups issues by level, then by kind. JSON output serializes a
//! [`ReportSummary`] for CI tooling that wants to post-process results.

use crate::i18n::validator::{CheckOutcome, Issue, IssueKind, IssueLevel, ValidationReport};
use crate::i18n::Locale;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Write;

/// Machine-readable summary of a check run.
#[derive(Debug, Clone, Serialize)]
pub struct ReportSummary {
    /// When the summary was produced
    pub generated_at: DateTime<Utc>,

    /// Whether warnings fail the run
    pub strict: bool,

    /// App identifiers that were checked
    pub apps: Vec<String>,

    /// Locales that were discovered
    pub locales: Vec<Locale>,

    /// Number of error-level issues
    pub error_count: usize,

    /// Number of warning-level issues
    pub warning_count: usize,

    /// Whether the run passes under the given strictness
    pub passed: bool,

    /// Every issue, in discovery order
    pub issues: Vec<Issue>,
}

impl ReportSummary {
    /// Summarize a finished check.
    pub fn from_outcome(outcome: &CheckOutcome, strict: bool) -> Self {
        let report = &outcome.report;
        Self {
            generated_at: Utc::now(),
            strict,
            apps: outcome
                .discovery
                .apps
                .iter()
                .map(|app| app.id.clone())
                .collect(),
            locales: outcome.discovery.locales.iter().cloned().collect(),
            error_count: report.error_count(),
            warning_count: report.warning_count(),
            passed: !report.should_fail(strict),
            issues: report.issues().to_vec(),
        }
    }
}

fn level_heading(level: IssueLevel) -> &'static str {
    match level {
        IssueLevel::Error => "Errors",
        IssueLevel::Warning => "Warnings",
    }
}

/// Render issues grouped by level and kind, followed by a summary line.
pub fn render_text(report: &ValidationReport) -> String {
    let mut grouped: BTreeMap<IssueLevel, BTreeMap<IssueKind, Vec<&Issue>>> = BTreeMap::new();
    for issue in report.issues() {
        grouped
            .entry(issue.level)
            .or_default()
            .entry(issue.kind)
            .or_default()
            .push(issue);
    }

    let mut out = String::new();
    for (level, kinds) in &grouped {
        let total: usize = kinds.values().map(Vec::len).sum();
        let _ = writeln!(out, "{} ({}):", level_heading(*level), total);
        for (kind, issues) in kinds {
            let _ = writeln!(out, "  {} ({}):", kind.label(), issues.len());
            for issue in issues {
                let _ = writeln!(out, "    - {}", issue.message);
            }
        }
        out.push('\n');
    }

    let _ = writeln!(
        out,
        "{} error(s), {} warning(s)",
        report.error_count(),
        report.warning_count()
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::discovery::{AppMessages, Discovery};
    use std::path::PathBuf;

    fn sample_report() -> ValidationReport {
        vec![
            Issue::warning(IssueKind::Placeholder, "airnub/fr: placeholder marker TODO"),
            Issue::error(IssueKind::MissingKey, "airnub/fr: missing key 'a'"),
            Issue::error(IssueKind::MissingReview, "adf: missing apps/adf/messages/REVIEW.md"),
            Issue::error(IssueKind::MissingKey, "airnub/ga: missing key 'a'"),
        ]
        .into_iter()
        .collect()
    }

    // ==================== render_text Tests ====================

    #[test]
    fn test_render_groups_by_level_then_kind() {
        let text = render_text(&sample_report());
        let expected = "\
Errors (3):
  Missing review file (1):
    - adf: missing apps/adf/messages/REVIEW.md
  Missing keys (2):
    - airnub/fr: missing key 'a'
    - airnub/ga: missing key 'a'

Warnings (1):
  Placeholder markers (1):
    - airnub/fr: placeholder marker TODO

3 error(s), 1 warning(s)
";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_render_clean_report() {
        let text = render_text(&ValidationReport::new());
        assert_eq!(text, "0 error(s), 0 warning(s)\n");
    }

    // ==================== ReportSummary Tests ====================

    #[test]
    fn test_summary_counts_and_pass_state() {
        let outcome = CheckOutcome {
            discovery: Discovery {
                apps: vec![AppMessages {
                    id: "airnub".to_string(),
                    messages_dir: PathBuf::from("apps/airnub/messages"),
                    has_review: true,
                }],
                locales: [Locale::parse("fr").expect("locale")].into(),
            },
            report: sample_report(),
        };

        let summary = ReportSummary::from_outcome(&outcome, false);
        assert_eq!(summary.apps, vec!["airnub"]);
        assert_eq!(summary.error_count, 3);
        assert_eq!(summary.warning_count, 1);
        assert!(!summary.passed);
    }

    #[test]
    fn test_summary_warnings_pass_unless_strict() {
        let outcome = CheckOutcome {
            discovery: Discovery::default(),
            report: std::iter::once(Issue::warning(IssueKind::SuspectedEnglish, "x")).collect(),
        };

        assert!(ReportSummary::from_outcome(&outcome, false).passed);
        assert!(!ReportSummary::from_outcome(&outcome, true).passed);
    }

    #[test]
    fn test_summary_serializes() {
        let outcome = CheckOutcome {
            discovery: Discovery::default(),
            report: sample_report(),
        };
        let summary = ReportSummary::from_outcome(&outcome, true);
        let json = serde_json::to_value(&summary).expect("serialize");

        assert_eq!(json["strict"], true);
        assert_eq!(json["passed"], false);
        assert_eq!(json["issues"][0]["level"], "warning");
        assert_eq!(json["issues"][0]["kind"], "placeholder");
        assert!(json["generated_at"].is_string());
    }
}

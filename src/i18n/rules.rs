//! Rule tables for the checkers and their compiled form.
//!
//! The tables are plain constant data. [`Rules::new`] compiles a
//! [`RuleTables`] once and the result is handed to the checkers; nothing here
//! is global or mutable at runtime.

use crate::i18n::{I18nError, Locale};
use regex::Regex;
use std::collections::BTreeSet;

/// One American/British spelling pair.
///
/// `us` and `gb` are the display forms used in messages. The patterns are
/// regex fragments covering the inflections of each form; they are wrapped in
/// word boundaries and matched case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpellingPair {
    pub us: &'static str,
    pub gb: &'static str,
    pub us_pattern: &'static str,
    pub gb_pattern: &'static str,
}

const fn pair(
    us: &'static str,
    gb: &'static str,
    us_pattern: &'static str,
    gb_pattern: &'static str,
) -> SpellingPair {
    SpellingPair {
        us,
        gb,
        us_pattern,
        gb_pattern,
    }
}

pub const SPELLING_PAIRS: &[SpellingPair] = &[
    pair("color", "colour", "color(?:s|ed|ful|ing)?", "colour(?:s|ed|ful|ing)?"),
    pair("favorite", "favourite", "favorite(?:s|d)?", "favourite(?:s|d)?"),
    pair(
        "organize",
        "organise",
        "organiz(?:e|es|ed|er|ers|ing|ation|ations|ational)",
        "organis(?:e|es|ed|er|ers|ing|ation|ations|ational)",
    ),
    pair("center", "centre", "center(?:s|ed)?", "centre(?:s|d)?"),
    pair("license", "licence", "license(?:s)?", "licence(?:s)?"),
    pair(
        "analyze",
        "analyse",
        "analyz(?:e|ed|er|ers|ing)",
        "analys(?:e|ed|er|ers|ing)",
    ),
    pair("behavior", "behaviour", "behavior(?:s|al)?", "behaviour(?:s|al)?"),
    pair(
        "customize",
        "customise",
        "customiz(?:e|es|ed|ing|ation|able)",
        "customis(?:e|es|ed|ing|ation|able)",
    ),
    pair(
        "optimize",
        "optimise",
        "optimiz(?:e|es|ed|er|ing|ation|ations)",
        "optimis(?:e|es|ed|er|ing|ation|ations)",
    ),
    pair(
        "prioritize",
        "prioritise",
        "prioritiz(?:e|es|ed|ing|ation)",
        "prioritis(?:e|es|ed|ing|ation)",
    ),
    pair(
        "recognize",
        "recognise",
        "recogniz(?:e|es|ed|ing)",
        "recognis(?:e|es|ed|ing)",
    ),
    pair("realize", "realise", "realiz(?:e|es|ed|ing)", "realis(?:e|es|ed|ing)"),
    pair(
        "authorize",
        "authorise",
        "authoriz(?:e|es|ed|ing|ation)",
        "authoris(?:e|es|ed|ing|ation)",
    ),
    pair(
        "standardize",
        "standardise",
        "standardiz(?:e|es|ed|ing|ation)",
        "standardis(?:e|es|ed|ing|ation)",
    ),
    pair(
        "utilize",
        "utilise",
        "utiliz(?:e|es|ed|ing|ation)",
        "utilis(?:e|es|ed|ing|ation)",
    ),
    pair(
        "minimize",
        "minimise",
        "minimiz(?:e|es|ed|ing)",
        "minimis(?:e|es|ed|ing)",
    ),
    pair(
        "maximize",
        "maximise",
        "maximiz(?:e|es|ed|ing)",
        "maximis(?:e|es|ed|ing)",
    ),
    pair("catalog", "catalogue", "catalog(?:s|ed|ing)?", "catalogue(?:s|d)?"),
    pair("honor", "honour", "honor(?:s|ed|ing)?", "honour(?:s|ed|ing)?"),
    pair("labor", "labour", "labor(?:s|ed|ing)?", "labour(?:s|ed|ing)?"),
    pair("defense", "defence", "defense(?:s)?", "defence(?:s)?"),
    pair("canceled", "cancelled", "cancel(?:ed|ing)", "cancel(?:led|ling)"),
    pair(
        "traveling",
        "travelling",
        "travel(?:ed|ing|er|ers)",
        "travel(?:led|ling|ler|lers)",
    ),
    pair("modeling", "modelling", "model(?:ed|ing)", "model(?:led|ling)"),
    pair("labeled", "labelled", "label(?:ed|ing)", "label(?:led|ling)"),
    pair("fulfill", "fulfil", "fulfill(?:s|ment)?", "fulfil(?:s|ment)?"),
    pair("enroll", "enrol", "enroll(?:s|ment|ments)?", "enrol(?:s|ment|ments)?"),
];

/// Phrases exempt from spelling checks in every locale (product names).
pub const SPELLING_EXCEPTIONS: &[&str] = &["trust center", "trust centre"];

/// Word markers left behind by unfinished translations. Case-sensitive.
pub const LEAK_MARKERS: &[&str] = &["TODO", "TBD", "FIXME"];

/// Literal sequences used as placeholders while drafting.
pub const PLACEHOLDER_SEQUENCES: &[&str] = &["@@"];

/// English words that rarely appear in other languages' UI copy.
pub const STOP_WORDS: &[&str] = &[
    "the", "and", "for", "with", "your", "you", "our", "please", "this", "that", "from",
    "about", "contact", "email", "color", "learn", "more", "privacy", "policy", "terms", "here",
    "click", "read", "now", "sign",
];

/// Distinct stop words a string needs before it is flagged as English.
pub const STOP_WORD_THRESHOLD: usize = 2;

/// The full set of tables used by the checkers.
#[derive(Debug, Clone, Copy)]
pub struct RuleTables {
    pub spelling_pairs: &'static [SpellingPair],
    pub spelling_exceptions: &'static [&'static str],
    pub leak_markers: &'static [&'static str],
    pub placeholder_sequences: &'static [&'static str],
    pub stop_words: &'static [&'static str],
    pub stop_word_threshold: usize,
}

impl Default for RuleTables {
    fn default() -> Self {
        Self {
            spelling_pairs: SPELLING_PAIRS,
            spelling_exceptions: SPELLING_EXCEPTIONS,
            leak_markers: LEAK_MARKERS,
            placeholder_sequences: PLACEHOLDER_SEQUENCES,
            stop_words: STOP_WORDS,
            stop_word_threshold: STOP_WORD_THRESHOLD,
        }
    }
}

/// A spelling from the wrong variety of English.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpellingViolation {
    /// The text as it appears in the string
    pub found: String,

    /// The spelling the locale expects
    pub expected: &'static str,
}

struct CompiledPair {
    pair: SpellingPair,
    us: Regex,
    gb: Regex,
}

/// Compiled rule tables.
pub struct Rules {
    spelling: Vec<CompiledPair>,
    exceptions: Option<Regex>,
    leak_markers: Option<Regex>,
    placeholder_sequences: Vec<&'static str>,
    stop_words: Option<Regex>,
    stop_word_threshold: usize,
}

fn word_pattern(fragment: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(r"(?i)\b(?:{})\b", fragment))
}

fn alternation(words: &[&str], case_insensitive: bool) -> Result<Option<Regex>, regex::Error> {
    if words.is_empty() {
        return Ok(None);
    }
    let escaped: Vec<String> = words.iter().map(|w| regex::escape(w)).collect();
    let flags = if case_insensitive { "(?i)" } else { "" };
    Regex::new(&format!(r"{}\b(?:{})\b", flags, escaped.join("|"))).map(Some)
}

impl Rules {
    /// Compile a set of rule tables.
    pub fn new(tables: &RuleTables) -> Result<Self, I18nError> {
        let spelling = tables
            .spelling_pairs
            .iter()
            .map(|pair| {
                Ok(CompiledPair {
                    pair: *pair,
                    us: word_pattern(pair.us_pattern)?,
                    gb: word_pattern(pair.gb_pattern)?,
                })
            })
            .collect::<Result<Vec<_>, regex::Error>>()?;

        let exceptions = if tables.spelling_exceptions.is_empty() {
            None
        } else {
            let escaped: Vec<String> = tables
                .spelling_exceptions
                .iter()
                .map(|phrase| regex::escape(phrase))
                .collect();
            Some(Regex::new(&format!("(?i)(?:{})", escaped.join("|")))?)
        };

        Ok(Self {
            spelling,
            exceptions,
            leak_markers: alternation(tables.leak_markers, false)?,
            placeholder_sequences: tables.placeholder_sequences.to_vec(),
            stop_words: alternation(tables.stop_words, true)?,
            stop_word_threshold: tables.stop_word_threshold,
        })
    }

    /// Compile the built-in tables.
    pub fn standard() -> Result<Self, I18nError> {
        Self::new(&RuleTables::default())
    }

    /// Spellings in `text` that belong to the other variety of English.
    ///
    /// en-US strings are checked for British spellings and en-GB strings for
    /// American ones; every other locale yields nothing. Exception phrases
    /// are removed before matching. At most one violation per pair.
    pub fn spelling_violations(&self, locale: &Locale, text: &str) -> Vec<SpellingViolation> {
        if !locale.is_us() && !locale.is_gb() {
            return Vec::new();
        }

        let text = match &self.exceptions {
            Some(exceptions) => exceptions.replace_all(text, " "),
            None => text.into(),
        };

        self.spelling
            .iter()
            .filter_map(|compiled| {
                let (wrong, expected) = if locale.is_us() {
                    (&compiled.gb, compiled.pair.us)
                } else {
                    (&compiled.us, compiled.pair.gb)
                };
                wrong.find(&text).map(|m| SpellingViolation {
                    found: m.as_str().to_string(),
                    expected,
                })
            })
            .collect()
    }

    /// Leak markers (in order of appearance) followed by placeholder
    /// sequences present in `text`, without duplicates.
    pub fn leak_markers(&self, text: &str) -> Vec<String> {
        let mut found: Vec<String> = Vec::new();

        if let Some(regex) = &self.leak_markers {
            for m in regex.find_iter(text) {
                if !found.iter().any(|f| f == m.as_str()) {
                    found.push(m.as_str().to_string());
                }
            }
        }

        for sequence in &self.placeholder_sequences {
            if text.contains(sequence) {
                found.push(sequence.to_string());
            }
        }

        found
    }

    /// Distinct stop words in `text`, lowercased.
    pub fn stop_word_hits(&self, text: &str) -> BTreeSet<String> {
        match &self.stop_words {
            Some(regex) => regex
                .find_iter(text)
                .map(|m| m.as_str().to_lowercase())
                .collect(),
            None => BTreeSet::new(),
        }
    }

    /// Whether `text` looks like untranslated English.
    pub fn is_suspected_english(&self, text: &str) -> bool {
        self.stop_word_threshold > 0 && self.stop_word_hits(text).len() >= self.stop_word_threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> Rules {
        Rules::standard().expect("built-in tables compile")
    }

    fn locale(code: &str) -> Locale {
        Locale::parse(code).expect("valid locale")
    }

    // ==================== Spelling Tests ====================

    #[test]
    fn test_us_flags_british_spellings() {
        let violations = rules().spelling_violations(&locale("en-US"), "Favourite colour");
        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0].found, "colour");
        assert_eq!(violations[0].expected, "color");
        assert_eq!(violations[1].found, "Favourite");
        assert_eq!(violations[1].expected, "favorite");
    }

    #[test]
    fn test_gb_flags_american_spellings() {
        let violations = rules().spelling_violations(&locale("en-GB"), "Favorite color");
        let found: Vec<_> = violations.iter().map(|v| v.found.as_str()).collect();
        assert_eq!(found, vec!["color", "Favorite"]);
    }

    #[test]
    fn test_matching_variety_is_clean() {
        let rules = rules();
        assert!(rules
            .spelling_violations(&locale("en-US"), "Organize your favorite colors")
            .is_empty());
        assert!(rules
            .spelling_violations(&locale("en-GB"), "Organise your favourite colours")
            .is_empty());
    }

    #[test]
    fn test_inflections_are_covered() {
        let rules = rules();
        let violations = rules.spelling_violations(&locale("en-US"), "We organised it");
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].expected, "organize");

        let violations = rules.spelling_violations(&locale("en-GB"), "Canceled orders");
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].expected, "cancelled");
    }

    #[test]
    fn test_word_boundaries() {
        let rules = rules();
        assert!(rules
            .spelling_violations(&locale("en-US"), "Colourado")
            .is_empty());
        assert!(rules
            .spelling_violations(&locale("en-GB"), "decentered")
            .is_empty());
    }

    #[test]
    fn test_trust_center_exception_both_locales() {
        let rules = rules();
        assert!(rules
            .spelling_violations(&locale("en-US"), "Visit our Trust Center")
            .is_empty());
        assert!(rules
            .spelling_violations(&locale("en-GB"), "Visit our Trust Center")
            .is_empty());
    }

    #[test]
    fn test_trust_centre_exception_both_locales() {
        let rules = rules();
        assert!(rules
            .spelling_violations(&locale("en-US"), "Visit our Trust Centre")
            .is_empty());
        assert!(rules
            .spelling_violations(&locale("en-GB"), "Visit our Trust Centre")
            .is_empty());
    }

    #[test]
    fn test_exception_does_not_hide_other_violations() {
        let violations =
            rules().spelling_violations(&locale("en-GB"), "Trust Center for your data center");
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].found, "center");
    }

    #[test]
    fn test_other_locales_skip_spelling() {
        assert!(rules()
            .spelling_violations(&locale("fr"), "colour color")
            .is_empty());
    }

    // ==================== Leak Marker Tests ====================

    #[test]
    fn test_leak_markers_found() {
        let rules = rules();
        assert_eq!(rules.leak_markers("TODO: translate this"), vec!["TODO"]);
        assert_eq!(rules.leak_markers("Prix @@price@@"), vec!["@@"]);
        assert_eq!(rules.leak_markers("FIXME TBD FIXME"), vec!["FIXME", "TBD"]);
    }

    #[test]
    fn test_leak_markers_case_sensitive_and_bounded() {
        let rules = rules();
        assert!(rules.leak_markers("todo list").is_empty());
        assert!(rules.leak_markers("TODOS").is_empty());
        assert!(rules.leak_markers("Bonjour à tous").is_empty());
    }

    // ==================== Stop Word Tests ====================

    #[test]
    fn test_stop_word_hits_distinct() {
        let hits = rules().stop_word_hits("The cat and the dog");
        assert_eq!(
            hits.into_iter().collect::<Vec<_>>(),
            vec!["and".to_string(), "the".to_string()]
        );
    }

    #[test]
    fn test_suspected_english_threshold() {
        let rules = rules();
        assert!(rules.is_suspected_english("Please contact our team"));
        assert!(!rules.is_suspected_english("Contactez-nous par email"));
        assert!(!rules.is_suspected_english("the the the"));
        assert!(!rules.is_suspected_english("Ár bhfoireann"));
    }

    // ==================== Table Tests ====================

    #[test]
    fn test_custom_tables() {
        let tables = RuleTables {
            spelling_pairs: &[],
            spelling_exceptions: &[],
            leak_markers: &["XXX"],
            placeholder_sequences: &[],
            stop_words: &[],
            stop_word_threshold: 2,
        };
        let rules = Rules::new(&tables).expect("compile");
        assert!(rules
            .spelling_violations(&locale("en-US"), "colour")
            .is_empty());
        assert_eq!(rules.leak_markers("XXX TODO @@"), vec!["XXX"]);
        assert!(!rules.is_suspected_english("please contact the team"));
    }

    #[test]
    fn test_invalid_pattern_is_error() {
        const BAD: &[SpellingPair] = &[SpellingPair {
            us: "x",
            gb: "y",
            us_pattern: "(unclosed",
            gb_pattern: "y",
        }];
        let tables = RuleTables {
            spelling_pairs: BAD,
            ..RuleTables::default()
        };
        assert!(matches!(Rules::new(&tables), Err(I18nError::Rule(_))));
    }
}

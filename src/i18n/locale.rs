//! Locale type: validated locale identifiers and fallback chains.
//!
//! Locales carry no hierarchy of their own. "en-GB" does not implicitly fall
//! back to "en"; the only relationship between locales is the configured
//! fallback chain, which defaults to [`DEFAULT_FALLBACK_LOCALES`].

use crate::i18n::I18nError;
use serde::Serialize;
use std::fmt;

/// American English, one half of the reference key set.
pub const EN_US: &str = "en-US";

/// British English, the other half of the reference key set.
pub const EN_GB: &str = "en-GB";

/// Locales whose combined keys define the schema every other locale must match.
pub const REFERENCE_LOCALES: [&str; 2] = [EN_US, EN_GB];

/// Fallback chain used when the caller does not provide one.
pub const DEFAULT_FALLBACK_LOCALES: [&str; 2] = [EN_US, EN_GB];

/// A validated locale identifier (e.g. "en-US", "fr", "ga").
///
/// Validation is structural only: the identifier must be usable as a bundle
/// file stem. No registry of known locales is consulted, since locales are
/// discovered from the message store.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Locale(String);

impl Locale {
    /// Parse a locale identifier.
    ///
    /// # Returns
    /// * `Ok(Locale)` if the identifier is non-empty and contains only
    ///   ASCII letters, digits, `-` or `_`
    /// * `Err(I18nError::InvalidLocale)` otherwise
    pub fn parse(code: &str) -> Result<Locale, I18nError> {
        let valid = !code.is_empty()
            && code
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

        if valid {
            Ok(Locale(code.to_string()))
        } else {
            Err(I18nError::InvalidLocale(code.to_string()))
        }
    }

    /// Derive a locale from a bundle file name such as `fr.json`.
    ///
    /// Returns `None` for anything that is not a `.json` file with a valid
    /// stem (`REVIEW.md`, `.DS_Store`, `.json`).
    pub fn from_file_name(name: &str) -> Option<Locale> {
        let stem = name.strip_suffix(".json")?;
        Locale::parse(stem).ok()
    }

    /// The raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File name of this locale's bundle (`<locale>.json`).
    pub fn file_name(&self) -> String {
        format!("{}.json", self.0)
    }

    /// Whether this locale is one of the reference locales.
    pub fn is_reference(&self) -> bool {
        REFERENCE_LOCALES.contains(&self.0.as_str())
    }

    /// Whether this locale is American English.
    pub fn is_us(&self) -> bool {
        self.0 == EN_US
    }

    /// Whether this locale is British English.
    pub fn is_gb(&self) -> bool {
        self.0 == EN_GB
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Locale {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// The default fallback chain as owned locales.
pub fn default_fallback_locales() -> Vec<Locale> {
    DEFAULT_FALLBACK_LOCALES
        .iter()
        .map(|code| Locale(code.to_string()))
        .collect()
}

/// Build the ordered list of locales to try for a request.
///
/// The requested locale comes first, followed by each fallback locale that is
/// not already in the list. Order within the fallbacks is preserved.
pub fn candidate_locales(requested: &Locale, fallbacks: &[Locale]) -> Vec<Locale> {
    let mut candidates = vec![requested.clone()];
    for fallback in fallbacks {
        if !candidates.contains(fallback) {
            candidates.push(fallback.clone());
        }
    }
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locale(code: &str) -> Locale {
        Locale::parse(code).expect("valid locale")
    }

    // ==================== parse Tests ====================

    #[test]
    fn test_parse_region_tagged() {
        let locale = Locale::parse("en-US").expect("Should succeed");
        assert_eq!(locale.as_str(), "en-US");
        assert!(locale.is_reference());
        assert!(locale.is_us());
    }

    #[test]
    fn test_parse_bare_language() {
        let locale = Locale::parse("ga").expect("Should succeed");
        assert_eq!(locale.to_string(), "ga");
        assert!(!locale.is_reference());
    }

    #[test]
    fn test_parse_empty() {
        let result = Locale::parse("");
        assert!(matches!(result, Err(I18nError::InvalidLocale(_))));
    }

    #[test]
    fn test_parse_rejects_path_separators() {
        assert!(Locale::parse("../fr").is_err());
        assert!(Locale::parse("fr/ca").is_err());
        assert!(Locale::parse("en US").is_err());
    }

    // ==================== from_file_name Tests ====================

    #[test]
    fn test_from_file_name_json() {
        assert_eq!(Locale::from_file_name("fr.json"), Some(locale("fr")));
        assert_eq!(Locale::from_file_name("en-GB.json"), Some(locale("en-GB")));
    }

    #[test]
    fn test_from_file_name_ignores_other_files() {
        assert_eq!(Locale::from_file_name("REVIEW.md"), None);
        assert_eq!(Locale::from_file_name(".DS_Store"), None);
        assert_eq!(Locale::from_file_name(".json"), None);
        assert_eq!(Locale::from_file_name("fr.json.bak"), None);
    }

    #[test]
    fn test_file_name() {
        assert_eq!(locale("es").file_name(), "es.json");
    }

    // ==================== candidate_locales Tests ====================

    #[test]
    fn test_candidates_requested_first() {
        let candidates = candidate_locales(&locale("fr"), &default_fallback_locales());
        let codes: Vec<_> = candidates.iter().map(Locale::as_str).collect();
        assert_eq!(codes, vec!["fr", "en-US", "en-GB"]);
    }

    #[test]
    fn test_candidates_skip_duplicates() {
        let candidates = candidate_locales(&locale("en-GB"), &default_fallback_locales());
        let codes: Vec<_> = candidates.iter().map(Locale::as_str).collect();
        assert_eq!(codes, vec!["en-GB", "en-US"]);
    }

    #[test]
    fn test_candidates_without_fallbacks() {
        let candidates = candidate_locales(&locale("ga"), &[]);
        assert_eq!(candidates, vec![locale("ga")]);
    }

    #[test]
    fn test_candidates_preserve_custom_order() {
        let fallbacks = vec![locale("en-GB"), locale("fr"), locale("en-GB")];
        let candidates = candidate_locales(&locale("ga"), &fallbacks);
        let codes: Vec<_> = candidates.iter().map(Locale::as_str).collect();
        assert_eq!(codes, vec!["ga", "en-GB", "fr"]);
    }
}

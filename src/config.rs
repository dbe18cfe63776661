use crate::i18n::{default_fallback_locales, Locale};
use anyhow::{bail, Context, Result};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    // Message store
    pub root: PathBuf,
    pub fallback_locales: Vec<Locale>,

    // Reporting
    pub strict: bool,
    pub json_output: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            fallback_locales: default_fallback_locales(),
            strict: false,
            json_output: false,
        }
    }
}

fn env_flag(name: &str) -> bool {
    std::env::var(name)
        .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Parse a comma-separated locale list, skipping blank entries.
pub fn parse_locale_list(value: &str) -> Result<Vec<Locale>> {
    value
        .split(',')
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .map(|code| Locale::parse(code).with_context(|| format!("Invalid locale '{}'", code)))
        .collect()
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let fallback_locales = match std::env::var("I18N_FALLBACK_LOCALES") {
            Ok(value) => parse_locale_list(&value).context("I18N_FALLBACK_LOCALES is invalid")?,
            Err(_) => default_fallback_locales(),
        };

        Ok(Self {
            // Message store
            root: std::env::var("I18N_ROOT")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".")),
            fallback_locales,

            // Reporting
            strict: env_flag("I18N_STRICT"),
            json_output: env_flag("I18N_JSON"),
        })
    }

    /// Layer command-line flags over the environment configuration.
    ///
    /// Accepts `--strict` and `--json`; anything else is an error.
    pub fn apply_args<I, A>(mut self, args: I) -> Result<Self>
    where
        I: IntoIterator<Item = A>,
        A: AsRef<str>,
    {
        for arg in args {
            match arg.as_ref() {
                "--strict" => self.strict = true,
                "--json" => self.json_output = true,
                other => bail!("Unknown argument: {} (expected --strict or --json)", other),
            }
        }
        Ok(self)
    }
}

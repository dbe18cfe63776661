//! Merger: resolve the shared and app-specific bundles for an (app, locale)
//! pair and combine them into one message tree.
//!
//! # Resolution
//!
//! Both halves walk the same candidate list (requested locale, then each
//! fallback locale not already listed), but stop on different conditions:
//!
//! | Half | File | Stops at first candidate where |
//! |------|------|--------------------------------|
//! | shared | `packages/i18n/shared/<locale>.json` | the file has a non-empty object under the app id |
//! | app | `apps/<app>/messages/<locale>.json` | the file exists |
//!
//! A missing file moves on to the next candidate. A malformed file fails the
//! whole resolution; it is never skipped.
//!
//! # Merge rule
//!
//! Object + object recurse. Anything else: the app value replaces the shared
//! value. Arrays are replaced wholesale, never merged element-wise.

use crate::i18n::discovery::MessageLayout;
use crate::i18n::locale::{candidate_locales, default_fallback_locales};
use crate::i18n::source::{read_json, MessageSource};
use crate::i18n::{I18nError, Locale};
use serde_json::{Map, Value};
use tracing::debug;

/// Deep-merge `overlay` into `base`, with `overlay` winning on conflicts.
pub fn deep_merge(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Object(mut base), Value::Object(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(existing) => {
                        let shared = existing.take();
                        *existing = deep_merge(shared, value);
                    }
                    None => {
                        base.insert(key, value);
                    }
                }
            }
            Value::Object(base)
        }
        (_, overlay) => overlay,
    }
}

fn empty_tree() -> Value {
    Value::Object(Map::new())
}

/// Resolves merged message trees from a [`MessageSource`].
///
/// Every call re-reads the store; nothing is cached between calls.
#[derive(Debug, Clone)]
pub struct Merger<S> {
    source: S,
    layout: MessageLayout,
    fallback_locales: Vec<Locale>,
}

impl<S: MessageSource> Merger<S> {
    /// Create a merger with the default fallback chain (en-US, en-GB).
    pub fn new(source: S, layout: MessageLayout) -> Self {
        Self {
            source,
            layout,
            fallback_locales: default_fallback_locales(),
        }
    }

    /// Replace the fallback chain. An empty chain resolves the requested
    /// locale only.
    pub fn with_fallback_locales(mut self, fallback_locales: Vec<Locale>) -> Self {
        self.fallback_locales = fallback_locales;
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn layout(&self) -> &MessageLayout {
        &self.layout
    }

    pub fn fallback_locales(&self) -> &[Locale] {
        &self.fallback_locales
    }

    /// Resolve the merged message tree for `app` in `locale`.
    ///
    /// Shared values act as defaults and app values as overrides. If neither
    /// half resolves, the result is an empty object.
    pub async fn load_messages(&self, app: &str, locale: &Locale) -> Result<Value, I18nError> {
        let candidates = candidate_locales(locale, &self.fallback_locales);
        self.resolve(app, locale, &candidates).await
    }

    /// Resolve `app` in exactly `locale`, ignoring the fallback chain.
    pub async fn load_exact(&self, app: &str, locale: &Locale) -> Result<Value, I18nError> {
        self.resolve(app, locale, std::slice::from_ref(locale)).await
    }

    /// Resolve the app's section of the shared bundle.
    pub async fn load_shared_section(
        &self,
        app: &str,
        locale: &Locale,
    ) -> Result<Value, I18nError> {
        let candidates = candidate_locales(locale, &self.fallback_locales);
        self.shared_section(app, locale, &candidates).await
    }

    /// Resolve the app-specific bundle.
    pub async fn load_app_bundle(&self, app: &str, locale: &Locale) -> Result<Value, I18nError> {
        let candidates = candidate_locales(locale, &self.fallback_locales);
        self.app_bundle(app, locale, &candidates).await
    }

    async fn resolve(
        &self,
        app: &str,
        locale: &Locale,
        candidates: &[Locale],
    ) -> Result<Value, I18nError> {
        let shared = self.shared_section(app, locale, candidates).await?;
        let app_bundle = self.app_bundle(app, locale, candidates).await?;
        Ok(deep_merge(shared, app_bundle))
    }

    async fn shared_section(
        &self,
        app: &str,
        locale: &Locale,
        candidates: &[Locale],
    ) -> Result<Value, I18nError> {
        for candidate in candidates {
            let path = self.layout.shared_file(candidate);
            let Some(Value::Object(mut bundle)) = read_json(&self.source, &path).await? else {
                continue;
            };

            match bundle.remove(app) {
                Some(Value::Object(section)) if !section.is_empty() => {
                    debug!("{}/{}: shared section from {}", app, locale, path.display());
                    return Ok(Value::Object(section));
                }
                _ => continue,
            }
        }

        debug!("{}/{}: no shared section", app, locale);
        Ok(empty_tree())
    }

    async fn app_bundle(
        &self,
        app: &str,
        locale: &Locale,
        candidates: &[Locale],
    ) -> Result<Value, I18nError> {
        for candidate in candidates {
            let path = self.layout.app_file(app, candidate);
            if let Some(bundle) = read_json(&self.source, &path).await? {
                debug!("{}/{}: app bundle from {}", app, locale, path.display());
                return Ok(bundle);
            }
        }

        debug!("{}/{}: no app bundle", app, locale);
        Ok(empty_tree())
    }
}

//! Translation resolution.
//!
//! [`Translator::translate`] turns a key into display text for the culture
//! currently selected in its [`CultureState`]. Lookup order is the current
//! culture, then the default culture, then the key itself. Whenever a
//! non-default culture has no variant for a key, the (key, culture) pair is
//! written to the [`MissingTranslations`] store, even if the default culture
//! then supplied the text.

use crate::i18n::format::format_positional;
use crate::i18n::{CultureState, MissingTranslations, TranslationMetrics, TranslationStore};
use std::fmt::{self, Display};
use std::sync::Arc;
use tracing::debug;

/// Resolved display text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Translated(String);

impl Translated {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl Display for Translated {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Translated {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for Translated {
    fn from(text: String) -> Self {
        Self(text)
    }
}

impl From<&str> for Translated {
    fn from(text: &str) -> Self {
        Self(text.to_string())
    }
}

impl From<Translated> for String {
    fn from(translated: Translated) -> Self {
        translated.0
    }
}

impl PartialEq<str> for Translated {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Translated {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Resolves keys against a session's culture state.
///
/// Holds shared handles only; several translators (one per session) can
/// point at the same stores.
#[derive(Debug, Clone)]
pub struct Translator {
    culture: Arc<CultureState>,
    translations: Arc<TranslationStore>,
    missing: Arc<MissingTranslations>,
    metrics: Arc<TranslationMetrics>,
}

impl Translator {
    pub fn new(
        culture: Arc<CultureState>,
        translations: Arc<TranslationStore>,
        missing: Arc<MissingTranslations>,
    ) -> Self {
        Self {
            culture,
            translations,
            missing,
            metrics: Arc::new(TranslationMetrics::new()),
        }
    }

    /// Share a metrics sink with other translators.
    pub fn with_metrics(mut self, metrics: Arc<TranslationMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn culture(&self) -> &Arc<CultureState> {
        &self.culture
    }

    pub fn translations(&self) -> &Arc<TranslationStore> {
        &self.translations
    }

    pub fn missing(&self) -> &Arc<MissingTranslations> {
        &self.missing
    }

    pub fn metrics(&self) -> &TranslationMetrics {
        &self.metrics
    }

    /// Translate `key` without arguments.
    pub fn t(&self, key: &str) -> Translated {
        self.translate(key, &[])
    }

    /// Translate `key`, filling `{n}` placeholders from `args`.
    ///
    /// Never fails: a blank key yields empty text and an unknown key yields
    /// the key itself.
    pub fn translate(&self, key: &str, args: &[&dyn Display]) -> Translated {
        if key.trim().is_empty() {
            return Translated::empty();
        }

        let current = self.culture.culture();
        let default = self.culture.default_culture();
        let is_default = current == *default;

        if let Some(content) = self.translations.lookup(key, current.as_str()) {
            self.metrics.record_exact_hit();
            return Translated(format_positional(&content, args));
        }

        if !is_default && self.missing.record(key, &current) {
            self.metrics.record_miss();
            debug!(key = %key, culture = %current, "Recorded missing translation");
        }

        if !is_default {
            if let Some(content) = self.translations.lookup(key, default.as_str()) {
                self.metrics.record_default_fallback();
                return Translated(format_positional(&content, args));
            }
        }

        self.metrics.record_key_fallback();
        Translated(format_positional(key, args))
    }
}

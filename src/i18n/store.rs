//! Translation entries and the stores that own them.
//!
//! [`TranslationStore`] holds loaded translations. [`MissingTranslations`]
//! has the same shape but only records which (key, culture) pairs failed to
//! resolve; its variants always have empty content.

use crate::i18n::CultureCode;
use serde::{Deserialize, Serialize};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Text for one culture. `content` is a template with `{0}`, `{1}`, ...
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationVariant {
    pub culture: CultureCode,
    pub content: String,
}

impl TranslationVariant {
    /// Create a variant for `culture` with the given template.
    pub fn new(culture: CultureCode, content: impl Into<String>) -> Self {
        Self {
            culture,
            content: content.into(),
        }
    }
}

/// A translatable key with at most one variant per culture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationEntry {
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    variants: Vec<TranslationVariant>,
}

impl TranslationEntry {
    /// Create an entry with no description and no variants.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            description: None,
            variants: Vec::new(),
        }
    }

    /// Attach a note for translators.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Builder form of [`TranslationEntry::set_variant`].
    pub fn with_variant(mut self, culture: CultureCode, content: impl Into<String>) -> Self {
        self.set_variant(TranslationVariant::new(culture, content));
        self
    }

    /// Add `variant` unless one already exists for its culture.
    ///
    /// Returns whether the variant was inserted.
    pub fn add_variant(&mut self, variant: TranslationVariant) -> bool {
        if self.get_variant(variant.culture.as_str()).is_some() {
            return false;
        }
        self.variants.push(variant);
        true
    }

    /// Insert or replace the variant for `variant.culture`.
    pub fn set_variant(&mut self, variant: TranslationVariant) {
        match self
            .variants
            .iter_mut()
            .find(|v| v.culture == variant.culture)
        {
            Some(existing) => existing.content = variant.content,
            None => self.variants.push(variant),
        }
    }

    /// Variant for `culture`, compared case-insensitively.
    pub fn get_variant(&self, culture: &str) -> Option<&TranslationVariant> {
        self.variants.iter().find(|v| v.culture.matches(culture))
    }

    /// Remove the variant for `culture`. The entry itself stays even when
    /// its last variant goes.
    pub fn remove_variant(&mut self, culture: &str) -> bool {
        let before = self.variants.len();
        self.variants.retain(|v| !v.culture.matches(culture));
        self.variants.len() != before
    }

    /// All variants in insertion order.
    pub fn variants(&self) -> &[TranslationVariant] {
        &self.variants
    }
}

/// Ordered collection of translation entries.
///
/// The store does not deduplicate on [`add`](TranslationStore::add); lookups
/// return the first entry with a matching key. Use
/// [`merge`](TranslationStore::merge) to fold variants into an existing key.
#[derive(Debug, Default)]
pub struct TranslationStore {
    entries: RwLock<Vec<TranslationEntry>>,
}

impl TranslationStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `entry` as-is, even if its key already exists.
    pub fn add(&self, entry: TranslationEntry) {
        self.write().push(entry);
    }

    /// Append several entries, keeping their order.
    pub fn add_range(&self, entries: impl IntoIterator<Item = TranslationEntry>) {
        self.write().extend(entries);
    }

    /// Fold `entry` into the first entry with the same key, overwriting
    /// variants by culture, or append it if the key is new.
    pub fn merge(&self, entry: TranslationEntry) {
        let mut entries = self.write();
        match entries.iter_mut().find(|e| e.key == entry.key) {
            Some(existing) => {
                if entry.description.is_some() {
                    existing.description = entry.description;
                }
                for variant in entry.variants {
                    existing.set_variant(variant);
                }
            }
            None => entries.push(entry),
        }
    }

    /// Snapshot of all entries in insertion order.
    pub fn get_all(&self) -> Vec<TranslationEntry> {
        self.read().clone()
    }

    /// First entry whose key matches exactly.
    pub fn find(&self, key: &str) -> Option<TranslationEntry> {
        self.read().iter().find(|e| e.key == key).cloned()
    }

    /// Content of the variant for (`key`, `culture`), if any.
    pub fn lookup(&self, key: &str, culture: &str) -> Option<String> {
        self.read()
            .iter()
            .find(|e| e.key == key)
            .and_then(|e| e.get_variant(culture))
            .map(|v| v.content.clone())
    }

    /// Remove every entry.
    pub fn clear(&self) {
        self.write().clear();
    }

    /// Number of entries, counting repeated keys separately.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Check whether the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<TranslationEntry>> {
        self.entries
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<TranslationEntry>> {
        self.entries
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Side-channel sink for keys that had no text for a culture.
///
/// Append-only apart from [`clear`](MissingTranslations::clear).
#[derive(Debug, Default)]
pub struct MissingTranslations {
    store: TranslationStore,
}

impl MissingTranslations {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `key` had no text for `culture`.
    ///
    /// Idempotent per (key, culture); returns whether anything new was
    /// recorded.
    ///
    /// ```
    /// use culture_kit::i18n::{CultureCode, MissingTranslations};
    ///
    /// let missing = MissingTranslations::new();
    /// let polish = CultureCode::parse("pl-PL").unwrap();
    /// assert!(missing.record("settings", &polish));
    /// assert!(!missing.record("settings", &polish));
    /// assert!(missing.contains("settings", "pl-pl"));
    /// assert_eq!(missing.len(), 1);
    /// ```
    pub fn record(&self, key: &str, culture: &CultureCode) -> bool {
        let mut entries = self.store.write();
        let missing = TranslationVariant::new(culture.clone(), String::new());

        match entries.iter_mut().find(|e| e.key == key) {
            Some(entry) => entry.add_variant(missing),
            None => {
                let mut entry = TranslationEntry::new(key);
                entry.add_variant(missing);
                entries.push(entry);
                true
            }
        }
    }

    /// Recorded misses, one entry per key with an empty variant per culture.
    pub fn get_all(&self) -> Vec<TranslationEntry> {
        self.store.get_all()
    }

    /// Check whether (`key`, `culture`) was recorded.
    ///
    /// # Arguments
    /// * `key` - The translation key, compared exactly
    /// * `culture` - The culture code, compared case-insensitively
    pub fn contains(&self, key: &str, culture: &str) -> bool {
        self.store.lookup(key, culture).is_some()
    }

    /// Forget every recorded miss.
    pub fn clear(&self) {
        self.store.clear();
    }

    /// Number of keys with at least one recorded miss.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Check whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}

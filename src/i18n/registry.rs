//! Language registry: maps culture codes to language descriptors.
//!
//! Lookups are tolerant. An exact code wins, then any registered code sharing
//! the primary subtag (`"en-gb"` finds `"en-us"`), then the registry's
//! default language. A registry whose default language is missing is a
//! configuration error.

use crate::error::CultureError;
use crate::i18n::languages::BUILTIN_LANGUAGES;
use crate::i18n::CultureCode;
use serde::Serialize;
use std::sync::OnceLock;
use tracing::debug;

/// Static description of a language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageDescriptor {
    /// Normalized culture code (e.g., "en-us", "pl-pl")
    pub code: CultureCode,

    /// English name of the language (e.g., "English", "Polish")
    pub english_name: String,

    /// Flag of the language's primary country
    pub flag: String,
}

impl LanguageDescriptor {
    /// Create a descriptor from a normalized code and display metadata.
    pub fn new(code: CultureCode, english_name: impl Into<String>, flag: impl Into<String>) -> Self {
        Self {
            code,
            english_name: english_name.into(),
            flag: flag.into(),
        }
    }
}

/// Registry of language descriptors, kept in registration order.
#[derive(Debug, Clone)]
pub struct LanguageRegistry {
    languages: Vec<LanguageDescriptor>,
    default_code: CultureCode,
}

/// Built-in registry instance (initialized lazily)
static BUILTIN: OnceLock<LanguageRegistry> = OnceLock::new();

impl LanguageRegistry {
    /// Create an empty registry that falls back to `default_code`.
    pub fn new(default_code: CultureCode) -> Self {
        Self {
            languages: Vec::new(),
            default_code,
        }
    }

    /// Create a registry seeded with the built-in languages.
    pub fn with_builtin(default_code: CultureCode) -> Self {
        let mut registry = Self::new(default_code);
        for (code, name, flag) in BUILTIN_LANGUAGES {
            registry.register(LanguageDescriptor::new(
                CultureCode::from_trusted(code),
                *name,
                *flag,
            ));
        }
        registry
    }

    /// Shared built-in registry with `en-us` as its default language.
    pub fn builtin() -> &'static LanguageRegistry {
        BUILTIN.get_or_init(|| Self::with_builtin(CultureCode::from_trusted("en-us")))
    }

    /// Insert a descriptor, replacing any descriptor with the same code.
    ///
    /// A replaced descriptor keeps its original registration position.
    pub fn register(&mut self, descriptor: LanguageDescriptor) {
        match self
            .languages
            .iter_mut()
            .find(|lang| lang.code == descriptor.code)
        {
            Some(existing) => *existing = descriptor,
            None => self.languages.push(descriptor),
        }
    }

    /// Get the code the registry falls back to when nothing else matches.
    ///
    /// # Returns
    /// The default culture code given at construction.
    pub fn default_code(&self) -> &CultureCode {
        &self.default_code
    }

    /// Get a language descriptor by its exact code.
    ///
    /// # Arguments
    /// * `code` - The culture code (e.g., "en-us"); case and `_`/`-` are ignored
    ///
    /// # Returns
    /// * `Some(&LanguageDescriptor)` if exactly this code is registered
    /// * `None` otherwise (no primary-subtag or default fallback)
    pub fn get_by_code(&self, code: &str) -> Option<&LanguageDescriptor> {
        let wanted = normalize_lookup(code);
        self.languages
            .iter()
            .find(|lang| lang.code.as_str() == wanted)
    }

    /// Resolve a code to a descriptor, falling back to the registry default.
    ///
    /// Returns an error only when neither the code, its primary subtag, nor
    /// the default language is registered.
    pub fn resolve(&self, code: &str) -> Result<&LanguageDescriptor, CultureError> {
        self.resolve_or(code, &self.default_code)
    }

    /// Resolve a code to a descriptor, falling back to `default`.
    ///
    /// Used when the default culture comes from configuration rather than
    /// from the registry itself.
    ///
    /// # Arguments
    /// * `code` - The requested culture code
    /// * `default` - The culture to use when neither the code nor its primary subtag matches
    ///
    /// # Returns
    /// * `Ok(&LanguageDescriptor)` for the exact, primary-subtag or default match
    /// * `Err(CultureError::DefaultLanguageMissing)` if `default` is not registered
    pub fn resolve_or(
        &self,
        code: &str,
        default: &CultureCode,
    ) -> Result<&LanguageDescriptor, CultureError> {
        if let Some(lang) = self.get_by_code(code) {
            return Ok(lang);
        }

        let wanted = normalize_lookup(code);
        let primary = wanted.split('-').next().unwrap_or_default();
        if !primary.is_empty() {
            let prefix = format!("{}-", primary);
            if let Some(lang) = self
                .languages
                .iter()
                .find(|lang| lang.code.as_str().starts_with(&prefix))
            {
                debug!(requested = %code, resolved = %lang.code, "Resolved language by primary subtag");
                return Ok(lang);
            }
        }

        match self.get_by_code(default.as_str()) {
            Some(lang) => {
                debug!(requested = %code, resolved = %lang.code, "Resolved language to default");
                Ok(lang)
            }
            None => Err(CultureError::DefaultLanguageMissing {
                default: default.to_string(),
            }),
        }
    }

    /// Get all registered descriptors in registration order.
    pub fn list_all(&self) -> Vec<&LanguageDescriptor> {
        self.languages.iter().collect()
    }

    /// Number of registered languages.
    pub fn len(&self) -> usize {
        self.languages.len()
    }

    /// Check whether no language is registered.
    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }
}

fn normalize_lookup(code: &str) -> String {
    code.trim().to_ascii_lowercase().replace('_', "-")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(tag: &str) -> CultureCode {
        CultureCode::from_trusted(tag)
    }

    fn registry_with(codes: &[&str], default: &str) -> LanguageRegistry {
        let mut registry = LanguageRegistry::new(code(default));
        for c in codes {
            registry.register(LanguageDescriptor::new(code(c), c.to_uppercase(), ""));
        }
        registry
    }

    // ==================== Builtin Tests ====================

    #[test]
    fn test_builtin_returns_singleton() {
        let registry1 = LanguageRegistry::builtin();
        let registry2 = LanguageRegistry::builtin();

        assert!(std::ptr::eq(registry1, registry2));
    }

    #[test]
    fn test_builtin_contains_english_and_polish() {
        let registry = LanguageRegistry::builtin();

        let english = registry.get_by_code("en-us").expect("English should exist");
        assert_eq!(english.english_name, "English");

        let polish = registry.get_by_code("pl-pl").expect("Polish should exist");
        assert_eq!(polish.english_name, "Polish");
        assert_eq!(registry.len(), 17);
    }

    // ==================== register Tests ====================

    #[test]
    fn test_register_overwrites_by_code() {
        let mut registry = registry_with(&["en-us", "pl-pl"], "en-us");
        registry.register(LanguageDescriptor::new(code("en-us"), "American English", "🇺🇸"));

        assert_eq!(registry.len(), 2);
        let english = registry.get_by_code("en-us").unwrap();
        assert_eq!(english.english_name, "American English");
        // Overwrite keeps registration position
        assert_eq!(registry.list_all()[0].code.as_str(), "en-us");
    }

    #[test]
    fn test_register_is_idempotent() {
        let mut registry = registry_with(&["en-us"], "en-us");
        let descriptor = registry.get_by_code("en-us").unwrap().clone();
        registry.register(descriptor.clone());
        registry.register(descriptor);
        assert_eq!(registry.len(), 1);
    }

    // ==================== resolve Tests ====================

    #[test]
    fn test_resolve_exact_match_case_insensitive() {
        let registry = registry_with(&["en-us", "pl-pl"], "en-us");
        let lang = registry.resolve("PL-pl").unwrap();
        assert_eq!(lang.code.as_str(), "pl-pl");
    }

    #[test]
    fn test_resolve_primary_subtag_fallback() {
        let registry = registry_with(&["pl-pl", "en-us"], "pl-pl");
        let lang = registry.resolve("en-gb").unwrap();
        assert_eq!(lang.code.as_str(), "en-us");
    }

    #[test]
    fn test_resolve_primary_subtag_uses_registration_order() {
        let registry = registry_with(&["en-gb", "en-us"], "en-us");
        let lang = registry.resolve("en-au").unwrap();
        assert_eq!(lang.code.as_str(), "en-gb");
    }

    #[test]
    fn test_resolve_bare_language_matches_region_variant() {
        let registry = registry_with(&["en-us", "de-de"], "en-us");
        let lang = registry.resolve("de").unwrap();
        assert_eq!(lang.code.as_str(), "de-de");
    }

    #[test]
    fn test_resolve_unknown_returns_default() {
        let registry = registry_with(&["pl-pl", "en-us"], "en-us");
        let lang = registry.resolve("zz-zz").unwrap();
        assert_eq!(lang.code.as_str(), "en-us");
    }

    #[test]
    fn test_resolve_garbage_returns_default() {
        let registry = registry_with(&["en-us"], "en-us");
        assert_eq!(registry.resolve("").unwrap().code.as_str(), "en-us");
        assert_eq!(registry.resolve("!!!").unwrap().code.as_str(), "en-us");
    }

    #[test]
    fn test_resolve_without_default_is_configuration_error() {
        let registry = registry_with(&["pl-pl"], "en-us");
        let err = registry.resolve("zz-zz").unwrap_err();
        assert_eq!(
            err,
            CultureError::DefaultLanguageMissing {
                default: "en-us".to_string()
            }
        );
    }

    #[test]
    fn test_resolve_or_uses_given_default() {
        let registry = registry_with(&["en-us", "pl-pl"], "en-us");
        let lang = registry.resolve_or("zz-zz", &code("pl-pl")).unwrap();
        assert_eq!(lang.code.as_str(), "pl-pl");
    }

    #[test]
    fn test_resolve_or_missing_default_is_configuration_error() {
        let registry = registry_with(&["en-us"], "en-us");
        let err = registry.resolve_or("zz-zz", &code("qq-qq")).unwrap_err();
        assert_eq!(
            err,
            CultureError::DefaultLanguageMissing {
                default: "qq-qq".to_string()
            }
        );
    }

    #[test]
    fn test_get_by_code_has_no_fallback() {
        let registry = registry_with(&["en-us"], "en-us");
        assert!(registry.get_by_code("en-gb").is_none());
        assert!(registry.get_by_code("EN_us").is_some());
    }

    #[test]
    fn test_resolve_does_not_match_bare_prefix() {
        // "e" must not match "en-us" through the primary-subtag rule
        let registry = registry_with(&["en-us", "pl-pl"], "pl-pl");
        assert_eq!(registry.resolve("e").unwrap().code.as_str(), "pl-pl");
    }
}

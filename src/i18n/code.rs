//! Culture codes: normalized, lowercase BCP-47-like tags.
//!
//! Every culture code that enters the system goes through [`CultureCode::parse`]
//! so that comparisons and storage always see one canonical spelling
//! (`"EN_us"`, `"en-US"` and `" en-us "` all become `"en-us"`).

use serde::{Deserialize, Serialize};
use std::fmt;
use unic_langid::LanguageIdentifier;

/// A normalized culture code such as `"en-us"` or `"pl-pl"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CultureCode(String);

impl CultureCode {
    /// Parse and normalize a locale tag.
    ///
    /// Returns `None` for blank or unparseable input. Callers decide which
    /// default to substitute.
    pub fn parse(tag: &str) -> Option<CultureCode> {
        let trimmed = tag.trim();
        if trimmed.is_empty() {
            return None;
        }

        let langid: LanguageIdentifier = trimmed.parse().ok()?;
        Some(CultureCode(langid.to_string().to_ascii_lowercase()))
    }

    /// Parse `tag`, substituting `default` when it cannot be parsed.
    pub fn parse_or(tag: &str, default: &CultureCode) -> CultureCode {
        Self::parse(tag).unwrap_or_else(|| default.clone())
    }

    /// Build a code from a tag that is already known to be well formed
    /// (built-in tables). Only the casing is normalized.
    pub(crate) fn from_trusted(tag: &str) -> CultureCode {
        CultureCode(tag.trim().to_ascii_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The primary language subtag (`"en"` for `"en-us"`).
    pub fn primary(&self) -> &str {
        self.0.split('-').next().unwrap_or(&self.0)
    }

    /// Case-insensitive comparison against a raw tag.
    pub fn matches(&self, other: &str) -> bool {
        self.0.eq_ignore_ascii_case(other.trim())
    }
}

impl fmt::Display for CultureCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CultureCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CultureCode {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        CultureCode::parse(&value).ok_or_else(|| format!("invalid culture code: '{}'", value))
    }
}

impl From<CultureCode> for String {
    fn from(code: CultureCode) -> Self {
        code.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Parsing Tests ====================

    #[test]
    fn test_parse_lowercases_region() {
        let code = CultureCode::parse("en-US").expect("Should parse");
        assert_eq!(code.as_str(), "en-us");
    }

    #[test]
    fn test_parse_accepts_underscore_separator() {
        let code = CultureCode::parse("pl_PL").expect("Should parse");
        assert_eq!(code.as_str(), "pl-pl");
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let code = CultureCode::parse("  fr-fr \n").expect("Should parse");
        assert_eq!(code.as_str(), "fr-fr");
    }

    #[test]
    fn test_parse_language_only() {
        let code = CultureCode::parse("DE").expect("Should parse");
        assert_eq!(code.as_str(), "de");
    }

    #[test]
    fn test_parse_rejects_blank() {
        assert!(CultureCode::parse("").is_none());
        assert!(CultureCode::parse("   ").is_none());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(CultureCode::parse("not a locale!").is_none());
        assert!(CultureCode::parse("e").is_none());
    }

    #[test]
    fn test_parse_or_substitutes_default() {
        let default = CultureCode::from_trusted("en-us");
        assert_eq!(CultureCode::parse_or("???", &default), default);
        assert_eq!(CultureCode::parse_or("pl-PL", &default).as_str(), "pl-pl");
    }

    // ==================== Accessor Tests ====================

    #[test]
    fn test_primary_subtag() {
        assert_eq!(CultureCode::from_trusted("en-gb").primary(), "en");
        assert_eq!(CultureCode::from_trusted("de").primary(), "de");
    }

    #[test]
    fn test_matches_is_case_insensitive() {
        let code = CultureCode::from_trusted("pt-pt");
        assert!(code.matches("PT-pt"));
        assert!(!code.matches("pt-br"));
    }

    // ==================== Serde Tests ====================

    #[test]
    fn test_deserialize_normalizes() {
        let code: CultureCode = serde_json::from_str("\"SV-se\"").expect("Should deserialize");
        assert_eq!(code.as_str(), "sv-se");
    }

    #[test]
    fn test_deserialize_rejects_invalid() {
        let result: Result<CultureCode, _> = serde_json::from_str("\"###\"");
        assert!(result.is_err());
    }
}

//! Translation quality validation module.
//!
//! Checks that every variant of an entry uses the same positional
//! placeholders as the reference (default culture) variant, so a translation
//! cannot silently drop or invent an argument.

use crate::i18n::{CultureCode, TranslationEntry};
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::OnceLock;

/// Validation report containing errors and warnings about a translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Critical errors that indicate translation issues
    pub errors: Vec<String>,

    /// Non-critical warnings about potential issues
    pub warnings: Vec<String>,
}

impl ValidationReport {
    /// Create a new empty validation report
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Check if the report is clean (no errors or warnings)
    pub fn is_clean(&self) -> bool {
        !self.has_errors() && !self.has_warnings()
    }

    fn merge(&mut self, other: ValidationReport) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Validator for translation entries.
pub struct TranslationValidator;

/// `{{` and `}}` escapes, or a `{n}` placeholder capturing its index
const PLACEHOLDER_PATTERN: &str = r"\{\{|\}\}|\{\s*(\d+)\}";

static PLACEHOLDER_REGEX: OnceLock<Regex> = OnceLock::new();

impl TranslationValidator {
    /// Validate one entry against its `reference` culture variant.
    ///
    /// - Missing reference variant: warning
    /// - Variant missing a placeholder the reference uses: error
    /// - Variant using a placeholder the reference lacks: error
    /// - Empty variant content: warning
    pub fn validate_entry(entry: &TranslationEntry, reference: &CultureCode) -> ValidationReport {
        let mut report = ValidationReport::new();

        let Some(reference_variant) = entry.get_variant(reference.as_str()) else {
            report.warnings.push(format!(
                "'{}' has no {} variant to validate against",
                entry.key, reference
            ));
            return report;
        };
        let expected = Self::extract_placeholders(&reference_variant.content);

        for variant in entry.variants() {
            if variant.culture == *reference {
                continue;
            }

            if variant.content.trim().is_empty() {
                report.warnings.push(format!(
                    "'{}' has empty content for {}",
                    entry.key, variant.culture
                ));
                continue;
            }

            let found = Self::extract_placeholders(&variant.content);
            let missing: Vec<_> = expected.difference(&found).collect();
            if !missing.is_empty() {
                report.errors.push(format!(
                    "'{}' ({}) is missing placeholders {:?}",
                    entry.key, variant.culture, missing
                ));
            }
            let extra: Vec<_> = found.difference(&expected).collect();
            if !extra.is_empty() {
                report.errors.push(format!(
                    "'{}' ({}) uses unknown placeholders {:?}",
                    entry.key, variant.culture, extra
                ));
            }
        }

        report
    }

    /// Validate every entry and combine the results.
    pub fn validate_all(entries: &[TranslationEntry], reference: &CultureCode) -> ValidationReport {
        let mut report = ValidationReport::new();
        for entry in entries {
            report.merge(Self::validate_entry(entry, reference));
        }
        report
    }

    /// Positional placeholder indexes used in `text`, ignoring `{{` escapes.
    fn extract_placeholders(text: &str) -> BTreeSet<usize> {
        let regex = PLACEHOLDER_REGEX
            .get_or_init(|| Regex::new(PLACEHOLDER_PATTERN).expect("placeholder pattern is a valid regex"));

        regex
            .captures_iter(text)
            .filter_map(|cap| cap.get(1))
            .filter_map(|m| m.as_str().parse().ok())
            .collect()
    }
}

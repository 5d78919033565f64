//! JSON import of translations and export of the missing-translation report.
//!
//! Translation files are arrays of:
//!
//! ```json
//! { "key": "welcome_message", "description": "Greeting", "translations": { "en-us": "Welcome, {0}!" } }
//! ```

use crate::i18n::{
    CultureCode, MissingTranslations, TranslationEntry, TranslationStore, TranslationVariant,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{info, warn};

#[derive(Debug, Deserialize)]
struct RawEntry {
    key: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    translations: BTreeMap<String, String>,
}

/// One row of the missing-translation report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingReportRow {
    pub key: String,
    pub cultures: Vec<String>,
}

/// Parse translation entries from JSON text.
///
/// Entries with a blank key and variants with an unparseable culture are
/// skipped with a warning.
pub fn parse_translations(json: &str) -> Result<Vec<TranslationEntry>> {
    let raw: Vec<RawEntry> =
        serde_json::from_str(json).context("Failed to parse translations JSON")?;

    let mut entries = Vec::with_capacity(raw.len());
    for item in raw {
        if item.key.trim().is_empty() {
            warn!("Skipping translation entry with a blank key");
            continue;
        }

        let mut entry = TranslationEntry::new(item.key);
        entry.description = item.description;
        for (culture, content) in item.translations {
            match CultureCode::parse(&culture) {
                Some(code) => entry.set_variant(TranslationVariant::new(code, content)),
                None => warn!(key = %entry.key, culture = %culture, "Skipping variant with invalid culture"),
            }
        }
        entries.push(entry);
    }

    Ok(entries)
}

/// Read a translations file and merge it into `store`.
///
/// Returns the number of entries read.
pub fn load_translations_file(store: &TranslationStore, path: impl AsRef<Path>) -> Result<usize> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read translations file {}", path.display()))?;

    let entries = parse_translations(&json)?;
    let count = entries.len();
    for entry in entries {
        store.merge(entry);
    }

    info!("Loaded {} translation entries from {}", count, path.display());
    Ok(count)
}

/// Missing translations as (key, cultures) rows, in recording order.
pub fn missing_report(missing: &MissingTranslations) -> Vec<MissingReportRow> {
    missing
        .get_all()
        .into_iter()
        .map(|entry| MissingReportRow {
            cultures: entry
                .variants()
                .iter()
                .map(|v| v.culture.to_string())
                .collect(),
            key: entry.key,
        })
        .collect()
}

pub fn missing_report_json(missing: &MissingTranslations) -> Result<String> {
    serde_json::to_string_pretty(&missing_report(missing))
        .context("Failed to serialize missing translation report")
}

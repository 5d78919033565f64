//! Missing translation report - resolves every key under every supported culture
//!
//! Usage:
//!   cargo run --bin missing-report -- translations.json
//!
//! Prints the missing-translation report and resolution metrics as JSON.
//! Placeholder problems found by the validator are logged as warnings.

use anyhow::{Context, Result};
use culture_kit::config::CultureConfig;
use culture_kit::i18n::{
    CultureState, LanguageRegistry, MissingTranslations, TranslationStore, TranslationValidator,
    Translator,
};
use culture_kit::loader;
use std::sync::Arc;
use tracing::{info, warn};

fn main() -> Result<()> {
    // Load .env file
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("missing_report=info".parse()?)
                .add_directive("culture_kit=warn".parse()?),
        )
        .init();

    let path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("CULTURE_TRANSLATIONS_FILE").ok())
        .context("Pass a translations file or set CULTURE_TRANSLATIONS_FILE")?;

    let config = CultureConfig::from_env()?;
    let state = Arc::new(CultureState::new(&config, LanguageRegistry::builtin())?);
    let store = Arc::new(TranslationStore::new());
    loader::load_translations_file(&store, &path)?;

    let validation = TranslationValidator::validate_all(&store.get_all(), state.default_culture());
    for warning in &validation.warnings {
        warn!("{}", warning);
    }
    for error in &validation.errors {
        warn!("{}", error);
    }

    let missing = Arc::new(MissingTranslations::new());
    let translator = Translator::new(Arc::clone(&state), Arc::clone(&store), Arc::clone(&missing));

    let keys: Vec<String> = store.get_all().into_iter().map(|e| e.key).collect();
    for language in state.supported() {
        state.set_culture(language.code.as_str());
        for key in &keys {
            translator.t(key);
        }
    }

    info!(
        "Checked {} keys across {} cultures",
        keys.len(),
        state.supported().len()
    );

    println!("{}", loader::missing_report_json(&missing)?);
    println!(
        "{}",
        serde_json::to_string_pretty(&translator.metrics().report())
            .context("Failed to serialize metrics report")?
    );

    Ok(())
}

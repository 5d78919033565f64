//! Resolve one translation key from the command line.
//!
//! Usage:
//!   cargo run -- [--culture pl-pl] [--tz Asia/Tokyo] <key> [args...]
//!
//! Optional environment variables:
//! - CULTURE_DEFAULT (defaults to en-us)
//! - CULTURE_DEFAULT_TIME_ZONE (defaults to Europe/Warsaw)
//! - CULTURE_SUPPORTED (comma separated, defaults to the built-in languages)
//! - CULTURE_TRANSLATIONS_FILE (JSON translations to load)

use anyhow::{bail, Result};
use chrono::Utc;
use culture_kit::config::CultureConfig;
use culture_kit::i18n::{
    CultureState, LanguageRegistry, MissingTranslations, TimeZoneConverter, TranslationStore,
    Translator,
};
use culture_kit::loader;
use std::fmt::Display;
use std::sync::Arc;
use tracing::info;

struct Args {
    culture: Option<String>,
    time_zone: Option<String>,
    key: String,
    values: Vec<String>,
}

fn parse_args() -> Result<Args> {
    let mut culture = None;
    let mut time_zone = None;
    let mut positional = Vec::new();

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--culture" => culture = args.next(),
            "--tz" => time_zone = args.next(),
            _ => positional.push(arg),
        }
    }

    if positional.is_empty() {
        bail!("Usage: culture-kit [--culture CODE] [--tz ZONE] <key> [args...]");
    }
    let key = positional.remove(0);

    Ok(Args {
        culture,
        time_zone,
        key,
        values: positional,
    })
}

fn main() -> Result<()> {
    // Load .env file (ignored when absent)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("culture_kit=info".parse()?),
        )
        .init();

    let args = parse_args()?;
    let config = CultureConfig::from_env()?;
    let state = Arc::new(CultureState::new(&config, LanguageRegistry::builtin())?);

    let store = Arc::new(TranslationStore::new());
    if let Ok(path) = std::env::var("CULTURE_TRANSLATIONS_FILE") {
        loader::load_translations_file(&store, &path)?;
    }

    state.subscribe(|snapshot| {
        info!("Now using {} ({})", snapshot.culture, snapshot.time_zone);
        Ok(())
    });
    if let Some(culture) = &args.culture {
        state.set_culture(culture);
    }
    if let Some(time_zone) = &args.time_zone {
        state.set_time_zone(time_zone);
    }

    let missing = Arc::new(MissingTranslations::new());
    let translator = Translator::new(Arc::clone(&state), store, Arc::clone(&missing));
    let converter = TimeZoneConverter::new(Arc::clone(&state));

    let values: Vec<&dyn Display> = args.values.iter().map(|v| v as &dyn Display).collect();
    println!("{}", translator.translate(&args.key, &values));
    println!("{}", converter.convert(Utc::now()).format("%Y-%m-%d %H:%M:%S %:z"));

    if !missing.is_empty() {
        info!("Missing translations:\n{}", loader::missing_report_json(&missing)?);
    }

    Ok(())
}

//! Culture and translation core.
//!
//! # Architecture
//!
//! - `code`: normalized culture codes
//! - `registry`: language descriptors with tolerant code matching
//! - `state`: per-session current culture and time zone, with change listeners
//! - `store`: translation entries, the translation store and the missing-translation sink
//! - `resolver`: key lookup with current → default → key fallback
//! - `timezone`: UTC to session time zone conversion
//! - `metrics`: how lookups were satisfied
//! - `validator`: placeholder consistency across variants
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use culture_kit::config::CultureConfig;
//! use culture_kit::i18n::*;
//!
//! let state = Arc::new(CultureState::new(&CultureConfig::default(), LanguageRegistry::builtin())?);
//! let translator = Translator::new(state.clone(), Arc::new(TranslationStore::new()), Arc::new(MissingTranslations::new()));
//!
//! state.set_culture("pl-PL");
//! let text = translator.translate("welcome_message", &[&"Jan"]);
//! ```

mod code;
pub(crate) mod languages;
mod format;
mod metrics;
mod registry;
mod resolver;
mod state;
mod store;
mod timezone;
mod validator;

pub use code::CultureCode;
pub use format::format_positional;
pub use metrics::{MetricsReport, TranslationMetrics};
pub use registry::{LanguageDescriptor, LanguageRegistry};
pub use resolver::{Translated, Translator};
pub use state::{CultureSnapshot, CultureState, Subscription};
pub use store::{MissingTranslations, TranslationEntry, TranslationStore, TranslationVariant};
pub use timezone::TimeZoneConverter;
pub use validator::{TranslationValidator, ValidationReport};

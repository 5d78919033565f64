pub mod config;
pub mod error;
pub mod i18n;
pub mod loader;

pub use error::CultureError;

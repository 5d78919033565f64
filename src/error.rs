//! Typed errors raised by the culture core.
//!
//! Only misconfiguration crosses the library boundary as an error. Invalid
//! caller input is substituted with configured defaults and translation misses
//! are absorbed by the fallback chain, so neither shows up here.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CultureError {
    /// The configured default culture has no registered language descriptor.
    #[error("language '{default}' is not registered and no fallback language is available")]
    DefaultLanguageMissing { default: String },

    /// The configured default culture is not a parseable locale tag.
    #[error("default culture '{0}' is not a valid locale tag")]
    InvalidDefaultCulture(String),

    /// The configured default time zone is unknown to the tz database.
    #[error("default time zone '{0}' is not a known IANA time zone")]
    InvalidDefaultTimeZone(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_offending_value() {
        let err = CultureError::DefaultLanguageMissing {
            default: "xx-yy".to_string(),
        };
        assert!(err.to_string().contains("xx-yy"));

        let err = CultureError::InvalidDefaultTimeZone("Mars/Olympus".to_string());
        assert!(err.to_string().contains("Mars/Olympus"));
    }

    #[test]
    fn test_errors_convert_into_anyhow() {
        let err: anyhow::Error = CultureError::InvalidDefaultCulture("!!".to_string()).into();
        assert!(err.to_string().contains("not a valid locale tag"));
    }
}

use crate::error::CultureError;
use crate::i18n::languages::DEFAULT_SUPPORTED;
use crate::i18n::{CultureCode, LanguageRegistry};
use anyhow::Result;
use chrono_tz::Tz;

pub const DEFAULT_CULTURE: &str = "en-us";
pub const DEFAULT_TIME_ZONE: &str = "Europe/Warsaw";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CultureConfig {
    /// Culture used when input is invalid or unsupported
    pub default_culture: String,

    /// IANA time zone used when input is invalid
    pub default_time_zone: String,

    /// Supported culture codes, in display order
    pub supported_cultures: Vec<String>,
}

impl Default for CultureConfig {
    fn default() -> Self {
        Self {
            default_culture: DEFAULT_CULTURE.to_string(),
            default_time_zone: DEFAULT_TIME_ZONE.to_string(),
            supported_cultures: DEFAULT_SUPPORTED.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl CultureConfig {
    /// Load configuration from `CULTURE_*` environment variables, using the
    /// defaults for anything unset or blank.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        Ok(Self {
            default_culture: std::env::var("CULTURE_DEFAULT")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.default_culture),
            default_time_zone: std::env::var("CULTURE_DEFAULT_TIME_ZONE")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.default_time_zone),
            supported_cultures: std::env::var("CULTURE_SUPPORTED")
                .ok()
                .map(|v| parse_list(&v))
                .filter(|list| !list.is_empty())
                .unwrap_or(defaults.supported_cultures),
        })
    }

    /// Normalized default culture.
    ///
    /// # Returns
    /// * `Ok(CultureCode)` if `default_culture` parses as a locale tag
    /// * `Err(CultureError::InvalidDefaultCulture)` otherwise
    pub fn default_culture_code(&self) -> Result<CultureCode, CultureError> {
        CultureCode::parse(&self.default_culture)
            .ok_or_else(|| CultureError::InvalidDefaultCulture(self.default_culture.clone()))
    }

    /// Default time zone looked up in the tz database (case-insensitive).
    pub fn default_tz(&self) -> Result<Tz, CultureError> {
        Tz::from_str_insensitive(self.default_time_zone.trim())
            .map_err(|_| CultureError::InvalidDefaultTimeZone(self.default_time_zone.clone()))
    }

    /// Check that the defaults are usable against `registry`.
    ///
    /// The default culture must be registered under exactly its own code;
    /// a primary-subtag or registry-default match is not enough.
    pub fn validate(&self, registry: &LanguageRegistry) -> Result<(), CultureError> {
        let default = self.default_culture_code()?;
        if registry.get_by_code(default.as_str()).is_none() {
            return Err(CultureError::DefaultLanguageMissing {
                default: default.to_string(),
            });
        }
        self.default_tz()?;
        Ok(())
    }
}

fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        std::env::remove_var("CULTURE_DEFAULT");
        std::env::remove_var("CULTURE_DEFAULT_TIME_ZONE");
        std::env::remove_var("CULTURE_SUPPORTED");
    }

    // ==================== Default Tests ====================

    #[test]
    fn test_default_config() {
        let config = CultureConfig::default();
        assert_eq!(config.default_culture, "en-us");
        assert_eq!(config.default_time_zone, "Europe/Warsaw");
        assert_eq!(config.supported_cultures.len(), 17);
        assert_eq!(config.supported_cultures[0], "en-us");
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = CultureConfig::default();
        assert!(config.validate(LanguageRegistry::builtin()).is_ok());
    }

    // ==================== from_env Tests ====================

    #[test]
    #[serial]
    fn test_from_env_uses_defaults_when_unset() {
        clear_env();
        let config = CultureConfig::from_env().expect("Should load");
        assert_eq!(config, CultureConfig::default());
    }

    #[test]
    #[serial]
    fn test_from_env_reads_overrides() {
        clear_env();
        std::env::set_var("CULTURE_DEFAULT", "pl-PL");
        std::env::set_var("CULTURE_DEFAULT_TIME_ZONE", "America/New_York");
        std::env::set_var("CULTURE_SUPPORTED", "pl-pl, en-us,, de-de ");

        let config = CultureConfig::from_env().expect("Should load");
        clear_env();

        assert_eq!(config.default_culture, "pl-PL");
        assert_eq!(config.default_time_zone, "America/New_York");
        assert_eq!(config.supported_cultures, vec!["pl-pl", "en-us", "de-de"]);
    }

    #[test]
    #[serial]
    fn test_from_env_blank_values_fall_back() {
        clear_env();
        std::env::set_var("CULTURE_DEFAULT", "  ");
        std::env::set_var("CULTURE_SUPPORTED", " , ");

        let config = CultureConfig::from_env().expect("Should load");
        clear_env();

        assert_eq!(config.default_culture, "en-us");
        assert_eq!(config.supported_cultures.len(), 17);
    }

    // ==================== validate Tests ====================

    #[test]
    fn test_validate_rejects_unparseable_default_culture() {
        let config = CultureConfig {
            default_culture: "not a culture".to_string(),
            ..CultureConfig::default()
        };
        assert!(matches!(
            config.validate(LanguageRegistry::builtin()),
            Err(CultureError::InvalidDefaultCulture(_))
        ));
    }

    #[test]
    fn test_validate_rejects_unknown_time_zone() {
        let config = CultureConfig {
            default_time_zone: "Mars/Olympus_Mons".to_string(),
            ..CultureConfig::default()
        };
        assert!(matches!(
            config.validate(LanguageRegistry::builtin()),
            Err(CultureError::InvalidDefaultTimeZone(_))
        ));
    }

    #[test]
    fn test_validate_rejects_unregistered_default_language() {
        let registry = LanguageRegistry::new(CultureCode::from_trusted("xx-yy"));
        let config = CultureConfig {
            default_culture: "xx-yy".to_string(),
            ..CultureConfig::default()
        };
        assert!(matches!(
            config.validate(&registry),
            Err(CultureError::DefaultLanguageMissing { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_default_only_reachable_by_fallback() {
        // The builtin registry would resolve "qq-qq" to its own en-us fallback
        let config = CultureConfig {
            default_culture: "qq-qq".to_string(),
            ..CultureConfig::default()
        };
        assert_eq!(
            config.validate(LanguageRegistry::builtin()),
            Err(CultureError::DefaultLanguageMissing {
                default: "qq-qq".to_string()
            })
        );
    }

    #[test]
    fn test_validate_rejects_default_matching_only_primary_subtag() {
        let config = CultureConfig {
            default_culture: "en-gb".to_string(),
            ..CultureConfig::default()
        };
        assert!(matches!(
            config.validate(LanguageRegistry::builtin()),
            Err(CultureError::DefaultLanguageMissing { .. })
        ));
    }

    #[test]
    fn test_validate_accepts_registered_non_english_default() {
        let config = CultureConfig {
            default_culture: "PL-pl".to_string(),
            ..CultureConfig::default()
        };
        assert!(config.validate(LanguageRegistry::builtin()).is_ok());
    }

    #[test]
    fn test_default_tz_is_case_insensitive() {
        let config = CultureConfig {
            default_time_zone: "europe/warsaw".to_string(),
            ..CultureConfig::default()
        };
        assert_eq!(config.default_tz().unwrap(), chrono_tz::Europe::Warsaw);
    }
}

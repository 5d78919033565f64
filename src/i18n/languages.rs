//! Built-in language descriptors.
//!
//! This is the table the built-in registry is seeded from. Order matters:
//! it is the registration order used to break ties in primary-subtag matching.

/// (code, English name, flag glyph)
pub(crate) const BUILTIN_LANGUAGES: &[(&str, &str, &str)] = &[
    ("ar-sa", "Arabic", "🇸🇦"),
    ("cs-cz", "Czech", "🇨🇿"),
    ("da-dk", "Danish", "🇩🇰"),
    ("nl-nl", "Dutch", "🇳🇱"),
    ("en-us", "English", "🇺🇸"),
    ("fi-fi", "Finnish", "🇫🇮"),
    ("fr-fr", "French", "🇫🇷"),
    ("de-de", "German", "🇩🇪"),
    ("hu-hu", "Hungarian", "🇭🇺"),
    ("it-it", "Italian", "🇮🇹"),
    ("no-no", "Norwegian", "🇳🇴"),
    ("pl-pl", "Polish", "🇵🇱"),
    ("pt-pt", "Portuguese", "🇵🇹"),
    ("ru-ru", "Russian", "🇷🇺"),
    ("sk-sk", "Slovak", "🇸🇰"),
    ("es-es", "Spanish", "🇪🇸"),
    ("sv-se", "Swedish", "🇸🇪"),
];

/// Supported cultures when nothing else is configured, default culture first.
pub(crate) const DEFAULT_SUPPORTED: &[&str] = &[
    "en-us", "ar-sa", "fr-fr", "de-de", "es-es", "it-it", "nl-nl", "sv-se", "da-dk", "no-no",
    "fi-fi", "ru-ru", "pl-pl", "cs-cz", "hu-hu", "sk-sk", "pt-pt",
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::CultureCode;

    #[test]
    fn test_builtin_codes_are_normalized() {
        for (code, _, _) in BUILTIN_LANGUAGES {
            let parsed = CultureCode::parse(code).expect("Built-in code should parse");
            assert_eq!(parsed.as_str(), *code);
        }
    }

    #[test]
    fn test_every_default_supported_code_is_builtin() {
        for code in DEFAULT_SUPPORTED {
            assert!(
                BUILTIN_LANGUAGES.iter().any(|(c, _, _)| c == code),
                "{} missing from built-in table",
                code
            );
        }
    }
}

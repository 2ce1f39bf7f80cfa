//! Caller-facing message language

use serde::{Deserialize, Serialize};

/// Language used when rendering errors for the person at the keyboard.
///
/// Log output always stays in English; only the text handed back to the
/// caller through [`crate::domain::AccountError::localized`] changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Locale {
    /// English
    #[default]
    #[serde(rename = "en", alias = "en-us", alias = "en_us")]
    En,
    /// Simplified Chinese
    #[serde(rename = "zh-cn", alias = "zh_cn", alias = "zh")]
    ZhCn,
}

impl Locale {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "en" | "en-us" | "en_us" => Some(Self::En),
            "zh" | "zh-cn" | "zh_cn" => Some(Self::ZhCn),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_from_str() {
        assert_eq!(Locale::from_str("en"), Some(Locale::En));
        assert_eq!(Locale::from_str("EN-US"), Some(Locale::En));
        assert_eq!(Locale::from_str("zh-CN"), Some(Locale::ZhCn));
        assert_eq!(Locale::from_str("zh"), Some(Locale::ZhCn));
        assert_eq!(Locale::from_str("fr"), None);
    }

    #[test]
    fn test_locale_deserialize() {
        let locale: Locale = serde_json::from_str("\"zh_cn\"").unwrap();
        assert_eq!(locale, Locale::ZhCn);

        let locale: Locale = serde_json::from_str("\"en\"").unwrap();
        assert_eq!(locale, Locale::En);
    }

    #[test]
    fn test_default_locale() {
        assert_eq!(Locale::default(), Locale::En);
    }
}

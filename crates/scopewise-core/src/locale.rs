use serde::{Deserialize, Serialize};
use std::fmt;

/// Active display language, as a lowercase BCP-47 tag such as `en` or `de`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Locale(String);

impl Locale {
    pub fn new(tag: impl AsRef<str>) -> Self {
        let tag = tag.as_ref().trim().to_ascii_lowercase().replace('_', "-");
        if tag.is_empty() {
            Self::default()
        } else {
            Self(tag)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self("en".to_string())
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Locale {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

impl From<String> for Locale {
    fn from(tag: String) -> Self {
        Self::new(tag)
    }
}

impl From<Locale> for String {
    fn from(locale: Locale) -> Self {
        locale.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_normalization() {
        assert_eq!(Locale::new(" DE_at ").as_str(), "de-at");
        assert_eq!(Locale::new(""), Locale::default());
        assert_eq!(Locale::from("EN"), Locale::default());
    }

    #[test]
    fn test_locale_deserialization_normalizes() {
        let locale: Locale = serde_json::from_str("\"FR\"").unwrap();
        assert_eq!(locale.as_str(), "fr");
        assert_eq!(serde_json::to_string(&locale).unwrap(), "\"fr\"");
    }
}

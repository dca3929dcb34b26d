//! Site configuration, compiled in from `site.toml`.

use std::time::Duration;

use once_cell::sync::Lazy;
use serde::Deserialize;

const EMBEDDED: &str = include_str!("../site.toml");

static SITE: Lazy<SiteConfig> = Lazy::new(|| match SiteConfig::from_toml(EMBEDDED) {
    Ok(config) => config,
    Err(err) => {
        tracing::warn!(%err, "Embedded site.toml is malformed; using defaults");
        SiteConfig::default()
    }
});

/// One entry of the language switcher.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LanguageOption {
    pub code: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub default_language: String,
    /// Local storage key holding the chosen language code.
    pub storage_key: String,
    /// Attribute that marks an element as translatable.
    pub key_attribute: String,
    pub brand_title: String,
    /// Page identifier used when the pathname ends with `/`.
    pub root_page: String,
    /// Remote translation document; `None` keeps the embedded table only.
    pub translations_url: Option<String>,
    pub fetch_timeout_ms: u64,
    /// Element id the language switcher is mounted into.
    pub switcher_root: String,
    pub languages: Vec<LanguageOption>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            default_language: "en".into(),
            storage_key: "playfluence_lang".into(),
            key_attribute: "data-i18n".into(),
            brand_title: "Playfluence".into(),
            root_page: "index.html".into(),
            translations_url: None,
            fetch_timeout_ms: 3000,
            switcher_root: "language-switcher".into(),
            languages: vec![
                LanguageOption { code: "en".into(), label: "EN".into() },
                LanguageOption { code: "zh".into(), label: "中文".into() },
                LanguageOption { code: "ja".into(), label: "日本語".into() },
            ],
        }
    }
}

impl SiteConfig {
    pub fn from_toml(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }

    /// The configuration shipped with the crate.
    pub fn embedded() -> &'static SiteConfig {
        &SITE
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }

    /// CSS selector matching every tracked element.
    pub fn key_selector(&self) -> String {
        format!("[{}]", self.key_attribute)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_config_parses() {
        let config = SiteConfig::from_toml(EMBEDDED).expect("site.toml is valid");
        assert_eq!(config.default_language, "en");
        assert_eq!(config.storage_key, "playfluence_lang");
        assert_eq!(config.key_attribute, "data-i18n");
        let codes: Vec<_> = config.languages.iter().map(|l| l.code.as_str()).collect();
        assert_eq!(codes, ["en", "zh", "ja"]);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let config = SiteConfig::from_toml("brand_title = \"Acme\"").unwrap();
        assert_eq!(config.brand_title, "Acme");
        assert_eq!(config.default_language, "en");
        assert_eq!(config.translations_url, None);
        assert_eq!(config.fetch_timeout(), Duration::from_secs(3));
    }

    #[test]
    fn key_selector_wraps_attribute() {
        assert_eq!(SiteConfig::default().key_selector(), "[data-i18n]");
    }
}

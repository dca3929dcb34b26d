//! The translation context: table plus active language.
//!
//! Built once per page load and handed to whatever needs lookups. Lookups
//! follow active language, then default language, then the bare key.

use super::table::TranslationTable;
use crate::core::platform::primary_language;

#[derive(Debug, Clone)]
pub struct TranslationStore {
    table: TranslationTable,
    active: String,
    default: String,
}

impl TranslationStore {
    /// The active language starts out as the default.
    pub fn new(table: TranslationTable, default_language: impl Into<String>) -> Self {
        let default = default_language.into();
        Self {
            table,
            active: default.clone(),
            default,
        }
    }

    pub fn active_language(&self) -> &str {
        &self.active
    }

    pub fn default_language(&self) -> &str {
        &self.default
    }

    pub fn table(&self) -> &TranslationTable {
        &self.table
    }

    /// Whether `code` has any entries in the table.
    pub fn is_known(&self, code: &str) -> bool {
        self.table.contains_language(code)
    }

    pub fn lookup<'a>(&'a self, key: &'a str) -> &'a str {
        self.lookup_in(&self.active, key)
    }

    pub fn lookup_in<'a>(&'a self, lang: &str, key: &'a str) -> &'a str {
        self.table
            .get(lang, key)
            .or_else(|| self.table.get(&self.default, key))
            .unwrap_or(key)
    }

    /// Pick the starting language: a stored preference naming a known
    /// language, else the locale hint's primary subtag if known, else the
    /// default.
    pub fn resolve_initial_language(&mut self, persisted: Option<&str>, locale: Option<&str>) -> &str {
        let from_preference = persisted.filter(|code| self.is_known(code)).map(str::to_string);
        let resolved = from_preference
            .or_else(|| {
                locale
                    .and_then(primary_language)
                    .filter(|code| self.is_known(code))
            })
            .unwrap_or_else(|| self.default.clone());
        tracing::debug!(
            language = %resolved,
            ?persisted,
            ?locale,
            "Initial language resolved"
        );
        self.active = resolved;
        &self.active
    }

    /// Returns `false` when `code` is already active. Unknown codes are
    /// stored as given.
    pub fn set_active_language(&mut self, code: &str) -> bool {
        if self.active == code {
            return false;
        }
        self.active = code.to_string();
        true
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn greet_store() -> TranslationStore {
        let table = TranslationTable::from_json(r#"{"en":{"greet":"Hi"},"zh":{"greet":"你好"}}"#).unwrap();
        TranslationStore::new(table, "en")
    }

    fn site_store() -> TranslationStore {
        TranslationStore::new(TranslationTable::embedded().unwrap(), "en")
    }

    #[rstest]
    #[case("en")]
    #[case("zh")]
    #[case("ja")]
    #[case("fr")]
    fn every_default_key_resolves_to_text(#[case] lang: &str) {
        let store = site_store();
        for key in store.table().keys("en") {
            let text = store.lookup_in(lang, key);
            assert!(!text.is_empty(), "{lang}/{key} resolved empty");
        }
    }

    #[test]
    fn missing_key_falls_back_to_default_language() {
        let mut table = TranslationTable::from_json(r#"{"en":{"only_en":"English"},"zh":{}}"#).unwrap();
        table.insert("zh", "both", "两者");
        table.insert("en", "both", "Both");
        let store = TranslationStore::new(table, "en");

        assert_eq!(store.lookup_in("zh", "only_en"), store.lookup_in("en", "only_en"));
        assert_eq!(store.lookup_in("zh", "both"), "两者");
    }

    #[rstest]
    #[case("en")]
    #[case("zh")]
    #[case("xx")]
    fn unknown_key_returns_key(#[case] lang: &str) {
        assert_eq!(greet_store().lookup_in(lang, "no.such.key"), "no.such.key");
    }

    #[test]
    fn lookup_uses_active_language() {
        let mut store = greet_store();
        assert_eq!(store.lookup("greet"), "Hi");
        assert!(store.set_active_language("zh"));
        assert_eq!(store.lookup("greet"), "你好");
        assert!(store.set_active_language("fr"));
        assert_eq!(store.active_language(), "fr");
        assert_eq!(store.lookup("greet"), "Hi");
    }

    #[test]
    fn setting_the_same_language_reports_no_change() {
        let mut store = greet_store();
        assert!(!store.set_active_language("en"));
    }

    #[rstest]
    #[case(Some("zh"), Some("ja-JP"), "zh")]
    #[case(Some("fr"), Some("zh-CN"), "zh")]
    #[case(None, Some("zh-Hant-TW"), "zh")]
    #[case(None, Some("de-DE"), "en")]
    #[case(Some("de"), None, "en")]
    #[case(None, None, "en")]
    fn initial_language_resolution(
        #[case] persisted: Option<&str>,
        #[case] locale: Option<&str>,
        #[case] expected: &str,
    ) {
        let mut store = greet_store();
        assert_eq!(store.resolve_initial_language(persisted, locale), expected);
        assert_eq!(store.active_language(), expected);
    }
}

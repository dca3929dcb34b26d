//! Language-keyed translation table.
//!
//! The embedded copy lives in `i18n/locales/<code>.json`, one flat
//! `{ "key": "text" }` object per language. Remote documents use the
//! combined shape `{ "<code>": { "key": "text" } }`.

use std::collections::{BTreeMap, HashMap};

use rust_embed::Embed;
use serde::Deserialize;

use crate::error::I18nError;

#[derive(Embed)]
#[folder = "i18n/locales"]
struct Locales;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct TranslationTable {
    languages: BTreeMap<String, HashMap<String, String>>,
}

impl TranslationTable {
    /// Parse a combined multi-language document.
    pub fn from_json(raw: &str) -> Result<Self, I18nError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Build the table compiled into the binary.
    pub fn embedded() -> Result<Self, I18nError> {
        let mut table = Self::default();
        for path in Locales::iter() {
            let Some(code) = path.strip_suffix(".json") else {
                continue;
            };
            let Some(file) = Locales::get(&path) else {
                continue;
            };
            let entries: HashMap<String, String> = serde_json::from_slice(&file.data)?;
            table.languages.insert(code.to_string(), entries);
        }
        Ok(table)
    }

    /// Text for `key` in `lang`. Empty strings count as missing.
    pub fn get(&self, lang: &str, key: &str) -> Option<&str> {
        self.languages
            .get(lang)
            .and_then(|entries| entries.get(key))
            .map(String::as_str)
            .filter(|text| !text.is_empty())
    }

    pub fn contains_language(&self, lang: &str) -> bool {
        self.languages.contains_key(lang)
    }

    /// Language codes in sorted order.
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.languages.keys().map(String::as_str)
    }

    pub fn keys<'a>(&'a self, lang: &str) -> impl Iterator<Item = &'a str> {
        self.languages
            .get(lang)
            .into_iter()
            .flat_map(|entries| entries.keys().map(String::as_str))
    }

    pub fn insert(&mut self, lang: impl Into<String>, key: impl Into<String>, text: impl Into<String>) {
        self.languages
            .entry(lang.into())
            .or_default()
            .insert(key.into(), text.into());
    }

    /// Overlay `other` on top of this table; its entries win key by key.
    pub fn layer(&mut self, other: TranslationTable) {
        for (lang, entries) in other.languages {
            self.languages.entry(lang).or_default().extend(entries);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.languages.values().all(HashMap::is_empty)
    }
}

//! Per-page document titles.
//!
//! Kept apart from the translation table: titles are keyed by page
//! identifier, not by translation key.

use std::collections::{BTreeMap, HashMap};

use serde::Deserialize;

use crate::error::I18nError;

const EMBEDDED: &str = include_str!("../../i18n/page-titles.json");

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct PageTitles {
    pages: BTreeMap<String, HashMap<String, String>>,
}

impl PageTitles {
    pub fn from_json(raw: &str) -> Result<Self, I18nError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn embedded() -> Result<Self, I18nError> {
        Self::from_json(EMBEDDED)
    }

    pub fn contains_page(&self, page: &str) -> bool {
        self.pages.contains_key(page)
    }

    pub fn pages(&self) -> impl Iterator<Item = &str> {
        self.pages.keys().map(String::as_str)
    }

    /// Map a location pathname to a page identifier.
    ///
    /// `"dir/file"` wins when the table knows it, otherwise the last
    /// segment alone. A trailing slash means `root_page`.
    pub fn page_identifier(&self, pathname: &str, root_page: &str) -> String {
        let mut segments = pathname.rsplit('/');
        let file = match segments.next() {
            Some(last) if !last.is_empty() => last,
            _ => root_page,
        };
        if let Some(dir) = segments.next().filter(|dir| !dir.is_empty()) {
            let nested = format!("{dir}/{file}");
            if self.contains_page(&nested) {
                return nested;
            }
        }
        file.to_string()
    }

    /// Title for `page`: `lang`, then `default_lang`, then `brand`. An empty
    /// title counts as missing at each step.
    pub fn resolve<'a>(&'a self, page: &str, lang: &str, default_lang: &str, brand: &'a str) -> &'a str {
        let Some(titles) = self.pages.get(page) else {
            return brand;
        };
        let title = move |code: &str| {
            titles
                .get(code)
                .map(String::as_str)
                .filter(|title| !title.is_empty())
        };
        title(lang).or_else(|| title(default_lang)).unwrap_or(brand)
    }
}

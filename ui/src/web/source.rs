use std::future::Future;

use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

use super::dom_error;
use crate::error::I18nError;
use crate::i18n::{TranslationSource, TranslationTable};

/// Fetches a combined translation document over HTTP.
#[derive(Debug, Clone)]
pub struct HttpSource {
    url: String,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    async fn fetch_table(&self) -> Result<TranslationTable, I18nError> {
        let window = web_sys::window().ok_or(I18nError::NoWindow)?;
        let response = JsFuture::from(window.fetch_with_str(&self.url))
            .await
            .map_err(|err| I18nError::Network(format!("{err:?}")))?;
        let response: Response = response.dyn_into().map_err(dom_error)?;
        if !response.ok() {
            return Err(I18nError::Status(response.status()));
        }
        let body = JsFuture::from(response.text().map_err(dom_error)?)
            .await
            .map_err(|err| I18nError::Network(format!("{err:?}")))?;
        let body = body
            .as_string()
            .ok_or_else(|| I18nError::Network("response body is not text".into()))?;
        TranslationTable::from_json(&body)
    }
}

impl TranslationSource for HttpSource {
    fn fetch(&self) -> impl Future<Output = Result<TranslationTable, I18nError>> {
        tracing::debug!(url = %self.url, "Fetching translations");
        self.fetch_table()
    }
}

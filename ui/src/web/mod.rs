//! Browser host: `web-sys` bindings for the synchronizer and the page glue
//! that reacts to language switches.

mod document;
mod glue;
mod source;

pub use document::WebDocument;
pub use glue::{start, SharedSync, LANGUAGE_CHANGED_EVENT};
pub use source::HttpSource;

use wasm_bindgen::JsValue;

use crate::error::I18nError;

fn dom_error(err: JsValue) -> I18nError {
    I18nError::Dom(format!("{err:?}"))
}

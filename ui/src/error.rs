//! Error type shared by the translation subsystem.
//!
//! None of these reach the page: loading failures turn into a fallback
//! table, storage failures are logged and the switch proceeds.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum I18nError {
    #[error("translation request failed: {0}")]
    Network(String),

    #[error("translation request returned HTTP {0}")]
    Status(u16),

    #[error("translation request timed out after {0} ms")]
    Timeout(u64),

    #[error("failed to parse translation data: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("no remote translation source configured")]
    RemoteDisabled,

    #[error("DOM operation failed: {0}")]
    Dom(String),

    #[error("browser window is not available")]
    NoWindow,

    #[error("preference storage failed: {0}")]
    Storage(String),
}

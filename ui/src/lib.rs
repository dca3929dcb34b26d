//! Client-side translation layer for the Playfluence site.
//!
//! Platform-agnostic logic lives here; the browser bindings are in `web`
//! (wasm32 only) and the `playfluence-web` crate launches them.

pub mod config;
pub mod core;
pub mod dom;
pub mod error;
pub mod forms;
pub mod i18n;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub mod components {
    // Language picker rendered by the web entry point (components/language_switcher.rs)
    pub mod language_switcher;
    pub use language_switcher::LanguageSwitcher;
}

pub use config::SiteConfig;
pub use error::I18nError;

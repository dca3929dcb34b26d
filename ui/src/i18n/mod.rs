//! Translation store and its supporting tables.
//!
//! - `table`  – language → key → text, embedded JSON plus remote overlay
//! - `load`   – startup loading with explicit fallback outcome
//! - `store`  – the per-page translation context (active language, lookups)
//! - `titles` – page identifier → per-language document title

pub mod load;
pub mod store;
pub mod table;
pub mod titles;

pub use load::{load, LoadOutcome, NoRemote, TranslationSource};
pub use store::TranslationStore;
pub use table::TranslationTable;
pub use titles::PageTitles;

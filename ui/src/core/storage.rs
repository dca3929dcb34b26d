//! Local persistence for user preferences (the chosen language code).

use std::collections::HashMap;

use crate::error::I18nError;

/// Key/value preference storage.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), I18nError>;
}

/// Non-persistent storage, used in tests and when no backend is available.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut storage = Self::default();
        storage.entries.insert(key.to_string(), value.to_string());
        storage
    }
}

impl PreferenceStore for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), I18nError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub use browser::BrowserStorage;

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::PreferenceStore;
    use crate::error::I18nError;

    /// `window.localStorage`.
    #[derive(Debug, Clone)]
    pub struct BrowserStorage {
        storage: web_sys::Storage,
    }

    impl BrowserStorage {
        pub fn local() -> Result<Self, I18nError> {
            let window = web_sys::window().ok_or(I18nError::NoWindow)?;
            let storage = window
                .local_storage()
                .map_err(|err| I18nError::Storage(format!("{err:?}")))?
                .ok_or_else(|| I18nError::Storage("localStorage unavailable".into()))?;
            Ok(Self { storage })
        }
    }

    impl PreferenceStore for BrowserStorage {
        fn get(&self, key: &str) -> Option<String> {
            self.storage.get_item(key).ok().flatten()
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), I18nError> {
            self.storage
                .set_item(key, value)
                .map_err(|err| I18nError::Storage(format!("{err:?}")))
        }
    }
}

//! # Browser `localStorage` store
//!
//! [`LocalStorage`] is the [`KeyValueStore`] used on the **web platform**. Every
//! operation looks up `window.localStorage` afresh; the browser caches the
//! handle internally.
//!
//! Reads swallow errors and return `None`, so an unavailable storage area
//! (private browsing, disabled cookies) degrades to "no persisted session".

use crate::kv::{KeyValueStore, StoreError};

/// `window.localStorage`-backed KeyValueStore for the web platform.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorage;

impl LocalStorage {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let storage = Self::storage()
            .ok_or_else(|| StoreError::Unavailable("localStorage".to_string()))?;
        storage
            .set_item(key, value)
            .map_err(|e| StoreError::Unavailable(format!("{e:?}")))
    }

    fn remove(&self, key: &str) {
        let Some(storage) = Self::storage() else {
            return;
        };
        if let Err(e) = storage.remove_item(key) {
            tracing::warn!("Failed to remove key {}: {:?}", key, e);
        }
    }
}

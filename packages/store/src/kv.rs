//! # The [`KeyValueStore`] trait
//!
//! A string-keyed, string-valued store with `localStorage` semantics: reads
//! never fail (an unreadable entry is simply absent), writes may fail and
//! report a [`StoreError`], removals are best-effort.
//!
//! Implementations must be usable from behind an `Arc` shared between the
//! session state and its readers, hence the `Send + Sync` bound.

use thiserror::Error;

/// Failure to persist a value.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to write key `{key}`: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
}

/// Synchronous key-value persistence.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str);
}

//! Persistent key-value storage for client session state.
//!
//! The [`KeyValueStore`] trait is the seam between the session layer and
//! whatever survives a process restart on the current platform:
//! - **Tests / ephemeral runs**: [`MemoryStore`]
//! - **Desktop / Mobile** (native): [`FileStore`], one file per key
//! - **Web** (WASM + `web` feature): [`LocalStorage`], the browser's `localStorage`

pub mod kv;

mod memory;
pub use memory::MemoryStore;

mod file_store;
pub use file_store::FileStore;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod local_storage;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use local_storage::LocalStorage;

pub use kv::{KeyValueStore, StoreError};

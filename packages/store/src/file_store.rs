//! # Filesystem-backed key-value store
//!
//! [`FileStore`] is a [`KeyValueStore`] implementation that persists each key
//! as a file under a base directory. It is used on desktop and mobile
//! platforms to retain the session across app restarts.
//!
//! ## Layout
//!
//! ```text
//! <base_dir>/
//! └── kv/
//!     ├── authToken      # raw bearer token
//!     └── authUser       # serialized identity JSON
//! ```
//!
//! ## Platform data directories
//!
//! Use [`dirs::data_dir()`](https://docs.rs/dirs) to obtain a platform-appropriate base:
//!
//! | Platform | Path |
//! |----------|------|
//! | macOS / iOS | `~/Library/Application Support/donations/` |
//! | Linux | `~/.local/share/donations/` |
//! | Windows | `C:\Users\<user>\AppData\Roaming\donations\` |

use std::path::{Path, PathBuf};

use crate::kv::{KeyValueStore, StoreError};

/// Filesystem-backed KeyValueStore for desktop and mobile persistence.
#[derive(Clone, Debug)]
pub struct FileStore {
    base: PathBuf,
}

impl FileStore {
    pub fn new(base: PathBuf) -> Self {
        Self { base }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    fn kv_dir(&self) -> PathBuf {
        self.base.join("kv")
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.kv_dir().join(sanitize_key(key))
    }
}

/// Keys become file names; anything outside `[A-Za-z0-9_.-]` is replaced.
fn sanitize_key(key: &str) -> String {
    key.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        std::fs::read_to_string(self.key_path(key)).ok()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let io_err = |source| StoreError::Io {
            key: key.to_string(),
            source,
        };
        std::fs::create_dir_all(self.kv_dir()).map_err(io_err)?;
        std::fs::write(self.key_path(key), value).map_err(io_err)
    }

    fn remove(&self, key: &str) {
        match std::fs::remove_file(self.key_path(key)) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!("Failed to remove key {}: {}", key, e),
        }
    }
}

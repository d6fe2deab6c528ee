//! Key-value persistence port.
//!
//! The controller depends on [`KeyValueStore`] rather than on a concrete
//! medium. [`FileStore`] keeps one file per key under a data directory;
//! [`InMemoryStore`] is a shared in-process map used by tests and headless
//! runs.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::InMemoryStore;

/// Key under which the canonical task list is stored.
pub const STORAGE_KEY: &str = "todos";

/// Key that receives an unreadable stored list before it is replaced.
pub const CORRUPT_BACKUP_KEY: &str = "todos.corrupt";

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A read from the underlying medium failed.
    #[error("read failed for key {key}: {reason}")]
    Read {
        /// Key being read.
        key: String,
        /// Description of the failure.
        reason: String,
    },

    /// A write to the underlying medium failed.
    #[error("write failed for key {key}: {reason}")]
    Write {
        /// Key being written.
        key: String,
        /// Description of the failure.
        reason: String,
    },

    /// The key cannot be used with this store.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),
}

/// Synchronous string key-value store.
pub trait KeyValueStore: Send + Sync {
    /// Returns the value stored under `key`, or `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the medium cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the medium cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Moves whatever is stored under `key` to `backup_key` without
    /// reading it as text, replacing any previous backup.
    ///
    /// Returns `Ok(false)` if `key` holds nothing or the medium can't move
    /// values. The default does nothing.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the move was attempted and failed.
    fn set_aside(&self, key: &str, backup_key: &str) -> Result<bool, StoreError> {
        let _ = (key, backup_key);
        Ok(false)
    }
}

/// Rejects keys that are empty or could escape a storage directory.
///
/// # Errors
///
/// Returns [`StoreError::InvalidKey`] for an unusable key.
pub fn validate_key(key: &str) -> Result<(), StoreError> {
    let bad = key.is_empty()
        || key == "."
        || key == ".."
        || key.chars().any(|c| matches!(c, '/' | '\\' | '\0'));
    if bad {
        return Err(StoreError::InvalidKey(key.to_string()));
    }
    Ok(())
}

//! In-memory [`KeyValueStore`].

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use super::{KeyValueStore, StoreError, validate_key};

/// In-memory implementation of [`KeyValueStore`].
///
/// Cloning yields another handle to the same map, so a test can hand one
/// clone to a controller and inspect writes through the other. Data is
/// lost when the last handle is dropped.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl InMemoryStore {
    /// Create a new, empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with one entry.
    #[must_use]
    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::new();
        store
            .entries
            .lock()
            .insert(key.to_string(), value.to_string());
        store
    }

    /// Number of keys currently stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Returns true if nothing has been stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl KeyValueStore for InMemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        validate_key(key)?;
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        validate_key(key)?;
        self.entries
            .lock()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn set_aside(&self, key: &str, backup_key: &str) -> Result<bool, StoreError> {
        validate_key(key)?;
        validate_key(backup_key)?;
        let mut entries = self.entries.lock();
        let Some(value) = entries.remove(key) else {
            return Ok(false);
        };
        entries.insert(backup_key.to_string(), value);
        Ok(true)
    }
}

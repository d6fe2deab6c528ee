//! Directory-backed [`KeyValueStore`].
//!
//! Each key maps to `<dir>/<key>.json`. Writes go to a sibling temporary
//! file which is then renamed over the target, so a value is either the
//! old one or the new one, never a truncated mix.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{KeyValueStore, StoreError, validate_key};

/// Persistent store keeping one file per key.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `dir`. The directory is created lazily on
    /// the first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Default data directory (`~/.local/share/taskdeck` on Linux).
    ///
    /// Returns `None` if the platform has no data directory.
    #[must_use]
    pub fn default_dir() -> Option<PathBuf> {
        dirs::data_dir().map(|d| d.join("taskdeck"))
    }

    /// Root directory of this store.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        validate_key(key)?;
        let path = self.path_for(key);
        match std::fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if is_absent(&e) => Ok(None),
            Err(e) => Err(StoreError::Read {
                key: key.to_string(),
                reason: format!("{}: {e}", path.display()),
            }),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        validate_key(key)?;
        let write_err = |e: std::io::Error| StoreError::Write {
            key: key.to_string(),
            reason: e.to_string(),
        };

        std::fs::create_dir_all(&self.dir).map_err(write_err)?;
        let target = self.path_for(key);
        let tmp = self.dir.join(format!(".{key}.json.tmp"));
        std::fs::write(&tmp, value).map_err(write_err)?;
        if let Err(e) = std::fs::rename(&tmp, &target) {
            let _ = std::fs::remove_file(&tmp);
            return Err(write_err(e));
        }
        tracing::trace!(key, bytes = value.len(), path = %target.display(), "stored value");
        Ok(())
    }

    /// Renames `<key>.json` to `<backup_key>.json`, so bytes that are not
    /// valid UTF-8 survive untouched.
    fn set_aside(&self, key: &str, backup_key: &str) -> Result<bool, StoreError> {
        validate_key(key)?;
        validate_key(backup_key)?;
        let from = self.path_for(key);
        let to = self.path_for(backup_key);
        match std::fs::rename(&from, &to) {
            Ok(()) => {
                tracing::info!(from = %from.display(), to = %to.display(), "stored value set aside");
                Ok(true)
            }
            Err(e) if is_absent(&e) => Ok(false),
            Err(e) => Err(StoreError::Write {
                key: backup_key.to_string(),
                reason: format!("{}: {e}", from.display()),
            }),
        }
    }
}

/// Nothing is stored at a path that is missing or sits below a regular file.
fn is_absent(err: &std::io::Error) -> bool {
    matches!(err.kind(), ErrorKind::NotFound | ErrorKind::NotADirectory)
}

//! Directory-backed [`PersistentStore`]: one file per key.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use klondike_engine::errors::StoreError;
use klondike_engine::persist::PersistentStore;

use crate::io_utils::ensure_parent_dir;

#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// File holding the bytes for `key`.
    pub fn path_for(&self, key: u32) -> PathBuf {
        self.dir.join(format!("key-{}.bin", key))
    }
}

impl PersistentStore for FileStore {
    fn read(&self, key: u32, len: usize) -> Option<Vec<u8>> {
        let path = self.path_for(key);
        match fs::read(&path) {
            Ok(mut bytes) => {
                bytes.truncate(len);
                Some(bytes)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to read save");
                None
            }
        }
    }

    fn write(&mut self, key: u32, bytes: &[u8]) -> Result<(), StoreError> {
        let path = self.path_for(key);
        ensure_parent_dir(&path).map_err(|reason| StoreError::Write { key, reason })?;
        fs::write(&path, bytes).map_err(|e| StoreError::Write {
            key,
            reason: e.to_string(),
        })?;
        tracing::debug!(path = %path.display(), len = bytes.len(), "wrote save");
        Ok(())
    }
}

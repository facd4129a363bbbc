//! Cart storage adapters.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tempfile::NamedTempFile;

use crate::domain::aggregates::CART_STORAGE_KEY;
use crate::ports::{CartStorage, CartStorageError};

/// Saves the cart as `<dir>/<key>.json`.
#[derive(Clone, Debug)]
pub struct FileCartStorage {
    path: PathBuf,
}

impl FileCartStorage {
    pub fn new(dir: impl AsRef<Path>) -> Self { Self::with_key(dir, CART_STORAGE_KEY) }

    pub fn with_key(dir: impl AsRef<Path>, key: &str) -> Self {
        Self { path: dir.as_ref().join(format!("{key}.json")) }
    }

    pub fn path(&self) -> &Path { &self.path }
}

impl CartStorage for FileCartStorage {
    fn load(&self) -> Result<Option<String>, CartStorageError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, payload: &str) -> Result<(), CartStorageError> {
        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(dir)?;
        // same directory as the target so persist is a rename
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(payload.as_bytes())?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

/// In-memory storage; clones share the same slot.
#[derive(Clone, Debug, Default)]
pub struct MemoryCartStorage {
    slot: Arc<Mutex<Option<String>>>,
    read_only: bool,
}

impl MemoryCartStorage {
    pub fn with_contents(raw: &str) -> Self {
        Self { slot: Arc::new(Mutex::new(Some(raw.to_string()))), read_only: false }
    }

    /// A store that refuses every write.
    pub fn read_only() -> Self { Self { read_only: true, ..Self::default() } }

    pub fn contents(&self) -> Option<String> {
        self.slot.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

impl CartStorage for MemoryCartStorage {
    fn load(&self) -> Result<Option<String>, CartStorageError> {
        self.slot.lock().map(|s| s.clone()).map_err(|e| CartStorageError::Unavailable(e.to_string()))
    }

    fn save(&self, payload: &str) -> Result<(), CartStorageError> {
        if self.read_only {
            return Err(CartStorageError::Unavailable("storage is read-only".into()));
        }
        let mut slot = self.slot.lock().map_err(|e| CartStorageError::Unavailable(e.to_string()))?;
        *slot = Some(payload.to_string());
        Ok(())
    }
}

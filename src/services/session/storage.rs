//! Durable storage interface for the client session store.
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A minimal string-keyed blob store.
///
/// This is intentionally small: the session store only ever reads, writes
/// and removes a single key. Backends decide where the bytes live (a file
/// on disk for an embedded client, an in-memory map in tests).
pub trait SessionStorage: Send {
    // Returns the storage backend name (for logging).
    fn backend_name(&self) -> &'static str;

    // Read the blob for a key. Absent keys are `Ok(None)`, not errors.
    fn read(&self, key: &str) -> StorageResult<Option<String>>;

    // Write (create or replace) the blob for a key.
    fn write(&mut self, key: &str, value: &str) -> StorageResult<()>;

    // Remove the blob for a key. Removing an absent key is `Ok(())`.
    fn remove(&mut self, key: &str) -> StorageResult<()>;
}

/// File-backed storage: one file per key inside a base directory.
#[derive(Debug)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl SessionStorage for FileStorage {
    fn backend_name(&self) -> &'static str {
        "file"
    }

    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(blob) => Ok(Some(blob)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> StorageResult<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path_for(key), value)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

//! Key-value stores backing the journal.
//!
//! Values are serialized JSON documents kept as text, one per key, and are
//! always read and written whole.
use std::{
    collections::HashMap,
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use log::{debug, error, trace};
use tempfile::NamedTempFile;

use crate::{LifeLogError, Result};

/// Durable string-keyed document storage.
pub trait KeyValueStore {
    /// Returns the stored document, or `None` if the key was never written.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replaces the document stored under `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Stores each key as `<data_dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    data_dir: PathBuf,
}

impl FileStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key);
        trace!("Reading document {} from {}", key, path.display());

        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => {
                error!("Failed to read {}: {}", path.display(), e);
                Err(LifeLogError::Io(e))
            }
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        if !self.data_dir.exists() {
            debug!("Creating data directory: {}", self.data_dir.display());
            fs::create_dir_all(&self.data_dir).map_err(|e| {
                error!("Failed to create data directory: {}", e);
                LifeLogError::DirectoryError {
                    path: self.data_dir.clone(),
                }
            })?;
        }

        let path = self.key_path(key);
        write_atomically(&path, value)?;

        debug!("Wrote document {} to {}", key, path.display());
        Ok(())
    }
}

/// Writes `contents` to a temporary file next to `path` and moves it into place,
/// so readers never observe a half-written document.
pub(crate) fn write_atomically(path: &Path, contents: &str) -> Result<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut temp_file = NamedTempFile::new_in(dir).map_err(|e| {
        error!("Failed to create temporary file: {}", e);
        LifeLogError::Io(e)
    })?;

    temp_file.write_all(contents.as_bytes()).map_err(|e| {
        error!("Failed to write to temporary file: {}", e);
        LifeLogError::Io(e)
    })?;

    temp_file.flush().map_err(|e| {
        error!("Failed to flush temporary file: {}", e);
        LifeLogError::Io(e)
    })?;

    temp_file.persist(path).map_err(|e| {
        error!("Failed to persist file {}: {}", path.display(), e.error);
        LifeLogError::Io(e.error)
    })?;

    Ok(())
}

/// In-process store, mainly for tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    documents: HashMap<String, String>,
    fail_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent `set` fail, as a full disk or quota would.
    pub fn fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.documents.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        if self.fail_writes {
            return Err(LifeLogError::Io(io::Error::new(
                io::ErrorKind::Other,
                format!("write rejected for {}", key),
            )));
        }
        self.documents.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_store_missing_key_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        assert!(store.get("nothing").unwrap().is_none());
    }

    #[test]
    fn file_store_creates_directory_and_replaces_documents() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join("nested").join("data"));

        store.set("doc", "{\"a\":1}").unwrap();
        store.set("doc", "{\"a\":2}").unwrap();

        assert_eq!(store.get("doc").unwrap().as_deref(), Some("{\"a\":2}"));
        assert!(store.data_dir().join("doc.json").is_file());
    }

    #[test]
    fn memory_store_can_reject_writes() {
        let mut store = MemoryStore::new();
        store.set("doc", "1").unwrap();

        store.fail_writes(true);
        assert!(store.set("doc", "2").is_err());
        assert_eq!(store.get("doc").unwrap().as_deref(), Some("1"));
    }
}

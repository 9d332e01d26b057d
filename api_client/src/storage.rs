//! Persistent key-value storage for the access token
//!
//! The token is read at request time, written after a refresh and cleared on
//! logout. Nothing else is persisted by the client.

use crate::errors::StorageError;
use std::collections::HashMap;
use std::fmt::Debug;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

pub trait TokenStorage: Send + Sync + Debug {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Process-local storage; lost when the session ends
#[derive(Debug, Default)]
pub struct MemoryTokenStorage {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryTokenStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(key: &str, value: &str) -> Self {
        let storage = Self::new();
        if let Ok(mut values) = storage.values.write() {
            values.insert(key.to_string(), value.to_string());
        }
        storage
    }
}

impl TokenStorage for MemoryTokenStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self
            .values
            .read()
            .ok()
            .and_then(|values| values.get(key).cloned()))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if let Ok(mut values) = self.values.write() {
            values.insert(key.to_string(), value.to_string());
        }
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        if let Ok(mut values) = self.values.write() {
            values.remove(key);
        }
        Ok(())
    }
}

/// JSON object on disk, one string value per key
#[derive(Debug)]
pub struct FileTokenStorage {
    path: PathBuf,
}

impl FileTokenStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<HashMap<String, String>, StorageError> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) if content.trim().is_empty() => Ok(HashMap::new()),
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(err) => Err(err.into()),
        }
    }

    fn save(&self, values: &HashMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(values)?)?;
        Ok(())
    }
}

impl TokenStorage for FileTokenStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut values = self.load()?;
        values.insert(key.to_string(), value.to_string());
        self.save(&values)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut values = self.load()?;
        if values.remove(key).is_some() {
            self.save(&values)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage() {
        let storage = MemoryTokenStorage::with_value("access_token", "abc");
        assert_eq!(storage.get("access_token").unwrap().as_deref(), Some("abc"));
        storage.remove("access_token").unwrap();
        assert_eq!(storage.get("access_token").unwrap(), None);
    }

    #[test]
    fn test_file_storage_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("storage.json");

        FileTokenStorage::new(&path).set("access_token", "abc").unwrap();
        let reopened = FileTokenStorage::new(&path);
        assert_eq!(reopened.get("access_token").unwrap().as_deref(), Some("abc"));

        reopened.remove("access_token").unwrap();
        assert_eq!(FileTokenStorage::new(&path).get("access_token").unwrap(), None);
    }

    #[test]
    fn test_missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileTokenStorage::new(dir.path().join("absent.json"));
        assert_eq!(storage.get("access_token").unwrap(), None);
    }

    #[test]
    fn test_corrupt_file_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, "not json").unwrap();
        let err = FileTokenStorage::new(&path).get("access_token").unwrap_err();
        assert!(matches!(err, StorageError::Corrupt(_)));
    }
}

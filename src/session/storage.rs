use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::utils::ScamwatchError;

/// Async key/value storage for locally persisted state
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionStorage: Send + Sync {
    /// Read the value under `key`; `None` when nothing is stored
    async fn read(&self, key: &str) -> Result<Option<String>, ScamwatchError>;

    async fn write(&self, key: &str, value: &str) -> Result<(), ScamwatchError>;

    /// Remove `key`; removing a missing key is not an error
    async fn remove(&self, key: &str) -> Result<(), ScamwatchError>;
}

/// One JSON file per key inside a data directory
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

#[async_trait]
impl SessionStorage for FileStorage {
    async fn read(&self, key: &str) -> Result<Option<String>, ScamwatchError> {
        match tokio::fs::read_to_string(self.path_for(key)).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn write(&self, key: &str, value: &str) -> Result<(), ScamwatchError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        tokio::fs::write(self.path_for(key), value).await?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), ScamwatchError> {
        match tokio::fs::remove_file(self.path_for(key)).await {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}

/// Process-local storage; nothing survives the process
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

#[async_trait]
impl SessionStorage for MemoryStorage {
    async fn read(&self, key: &str) -> Result<Option<String>, ScamwatchError> {
        Ok(self.entries.lock().get(key).cloned())
    }

    async fn write(&self, key: &str, value: &str) -> Result<(), ScamwatchError> {
        self.entries.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), ScamwatchError> {
        self.entries.lock().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_file_storage_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path().join("data"));

        assert_eq!(storage.read("user").await.unwrap(), None);

        storage.write("user", r#"{"id":1}"#).await.unwrap();
        assert!(storage.path_for("user").exists());
        assert_eq!(storage.read("user").await.unwrap().as_deref(), Some(r#"{"id":1}"#));

        storage.remove("user").await.unwrap();
        assert_eq!(storage.read("user").await.unwrap(), None);
        storage.remove("user").await.unwrap();
    }

    #[tokio::test]
    async fn test_file_storage_surfaces_io_errors() {
        let temp_dir = TempDir::new().unwrap();
        // A regular file where the data directory should be
        let blocker = temp_dir.path().join("blocked");
        std::fs::write(&blocker, "x").unwrap();

        let storage = FileStorage::new(&blocker);
        let err = storage.write("user", "{}").await.unwrap_err();
        assert!(matches!(err, ScamwatchError::StorageError(_)));
    }

    #[tokio::test]
    async fn test_memory_storage() {
        let storage = MemoryStorage::default();
        storage.write("user", "a").await.unwrap();
        storage.write("user", "b").await.unwrap();
        assert_eq!(storage.read("user").await.unwrap().as_deref(), Some("b"));
        storage.remove("user").await.unwrap();
        assert_eq!(storage.read("user").await.unwrap(), None);
    }
}

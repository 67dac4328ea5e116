//! Durable key-value blob storage for the daily log collection and the user
//! profile. Blobs are JSON text; the store itself never interprets them.

use async_trait::async_trait;
#[cfg(test)]
use std::collections::HashMap;
use std::io;
use std::path::PathBuf;
#[cfg(test)]
use std::sync::Mutex;

/// Key under which the serialized daily log collection is stored.
pub const DAILY_LOGS_KEY: &str = "daily_logs";
/// Key under which the serialized user profile is stored.
pub const USER_PROFILE_KEY: &str = "user_profile";

#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Returns the blob for `key`, or `None` if nothing was ever stored.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Writes the blob for `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Filesystem-backed store: one JSON file per key under the data directory.
#[derive(Clone)]
pub struct FileStore {
    data_dir: PathBuf,
}

impl FileStore {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    pub fn path(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!("{}.json", key))
    }
}

#[async_trait]
impl BlobStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path(key);
        match tokio::fs::read_to_string(&path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Io(path, e)),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        tokio::fs::create_dir_all(&self.data_dir)
            .await
            .map_err(|e| StorageError::Io(self.data_dir.clone(), e))?;

        let path = self.path(key);
        tokio::fs::write(&path, value)
            .await
            .map_err(|e| StorageError::Io(path, e))
    }
}

/// In-memory store used by tests.
#[cfg(test)]
#[derive(Default)]
pub struct MemoryStore {
    blobs: Mutex<HashMap<String, String>>,
}

#[cfg(test)]
impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a blob directly, bypassing the async interface.
    pub fn insert(&self, key: &str, value: &str) {
        self.blobs
            .lock()
            .expect("memory store lock poisoned")
            .insert(key.to_string(), value.to_string());
    }
}

#[cfg(test)]
#[async_trait]
impl BlobStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self
            .blobs
            .lock()
            .expect("memory store lock poisoned")
            .get(key)
            .cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.blobs
            .lock()
            .expect("memory store lock poisoned")
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Errors from the blob store.
#[derive(Debug)]
pub enum StorageError {
    /// I/O error reading or writing a blob.
    Io(PathBuf, io::Error),
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::Io(path, e) => {
                write!(f, "I/O error for {}: {}", path.display(), e)
            }
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::Io(_, e) => Some(e),
        }
    }
}

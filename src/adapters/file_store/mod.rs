// File store adapter - One JSON file per key under a root directory

use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::domain::errors::*;
use crate::ports::*;
use crate::utils::path::is_safe_file_stem;

const VALUE_EXTENSION: &str = "json";

/// Key-value store persisted as files; each write replaces the whole file atomically
pub struct FileKeyValueStore {
    root: PathBuf,
}

impl FileKeyValueStore {
    /// Create new file store rooted at `root`, creating the directory if needed
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, DomainError> {
        let root = root.into();
        std::fs::create_dir_all(&root).map_err(|e| {
            DomainError::Config(format!(
                "Failed to create storage directory {}: {}",
                root.display(),
                e
            ))
        })?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, DomainError> {
        if !is_safe_file_stem(key) {
            return Err(DomainError::BadArgs(format!("Invalid storage key: {:?}", key)));
        }
        Ok(self.root.join(format!("{}.{}", key, VALUE_EXTENSION)))
    }
}

fn replace_file(root: &Path, path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut tmp = NamedTempFile::new_in(root)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[async_trait]
impl KeyValueStorePort for FileKeyValueStore {
    async fn read(&self, key: &str) -> Result<Option<Vec<u8>>, DomainError> {
        let path = self.path_for(key)?;
        match tokio::fs::read(&path).await {
            Ok(bytes) => {
                debug!(key, bytes = bytes.len(), "Read value from file store");
                Ok(Some(bytes))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(DomainError::storage_read(key, e)),
        }
    }

    async fn write(&self, key: &str, value: &[u8]) -> Result<(), DomainError> {
        let path = self.path_for(key)?;
        let root = self.root.clone();
        let bytes = value.to_vec();

        tokio::task::spawn_blocking(move || replace_file(&root, &path, &bytes))
            .await
            .map_err(|e| DomainError::storage_write(key, e))?
            .map_err(|e| DomainError::storage_write(key, e))?;

        debug!(key, bytes = value.len(), "Wrote value to file store");
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), DomainError> {
        let path = self.path_for(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(DomainError::storage_write(key, e)),
        }
    }

    async fn clear(&self) -> Result<(), DomainError> {
        let root_key = self.root.to_string_lossy().to_string();
        let mut entries = tokio::fs::read_dir(&self.root)
            .await
            .map_err(|e| DomainError::storage_write(&root_key, e))?;

        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| DomainError::storage_write(&root_key, e))?
        {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) == Some(VALUE_EXTENSION) {
                tokio::fs::remove_file(&path)
                    .await
                    .map_err(|e| DomainError::storage_write(&root_key, e))?;
            }
        }
        Ok(())
    }
}

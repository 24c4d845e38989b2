// Memory store adapter - In-process key-value store

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::errors::*;
use crate::ports::*;

/// Key-value store held in memory.
///
/// Reads and writes can be switched to fail, which lets callers exercise the
/// storage error paths without touching a disk.
#[derive(Default)]
pub struct MemoryKeyValueStore {
    entries: Mutex<HashMap<String, Vec<u8>>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    writes: AtomicUsize,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with a raw value
    pub fn with_entry(self, key: &str, value: impl Into<Vec<u8>>) -> Self {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), value.into());
        }
        self
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of successful writes so far
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn entries(&self, key: &str) -> Result<MutexGuard<'_, HashMap<String, Vec<u8>>>, DomainError> {
        self.entries
            .lock()
            .map_err(|_| DomainError::storage_read(key, "memory store lock poisoned"))
    }
}

#[async_trait]
impl KeyValueStorePort for MemoryKeyValueStore {
    async fn read(&self, key: &str) -> Result<Option<Vec<u8>>, DomainError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(DomainError::storage_read(key, "store unavailable"));
        }
        Ok(self.entries(key)?.get(key).cloned())
    }

    async fn write(&self, key: &str, value: &[u8]) -> Result<(), DomainError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(DomainError::storage_write(key, "store unavailable"));
        }
        self.entries(key)?.insert(key.to_string(), value.to_vec());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), DomainError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(DomainError::storage_write(key, "store unavailable"));
        }
        self.entries(key)?.remove(key);
        Ok(())
    }

    async fn clear(&self) -> Result<(), DomainError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(DomainError::storage_write("*", "store unavailable"));
        }
        self.entries("*")?.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_failure_switches() {
        let store = MemoryKeyValueStore::new().with_entry("videos", "[]");
        assert_eq!(store.read("videos").await.unwrap(), Some(b"[]".to_vec()));

        store.set_fail_reads(true);
        assert!(matches!(
            store.read("videos").await,
            Err(DomainError::StorageRead { .. })
        ));

        store.set_fail_writes(true);
        assert!(matches!(
            store.write("videos", b"[1]").await,
            Err(DomainError::StorageWrite { .. })
        ));
        assert_eq!(store.write_count(), 0);
    }
}

// Clip catalog - Durable ordered list of saved clips

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::KeyValueStorePort;

/// Storage key used by earlier versions of the app
pub const DEFAULT_CATALOG_KEY: &str = "videos";

/// Catalog of saved clips backed by a single snapshot in a key-value store.
///
/// Every mutation reads the full snapshot, applies the change and writes the
/// full snapshot back; the in-memory view is only replaced after that write
/// succeeds. Two mutations in flight at once are not merged: whichever writes
/// last wins.
pub struct ClipCatalog {
    store: Arc<dyn KeyValueStorePort>,
    key: String,
    cache: RwLock<Option<Vec<Clip>>>,
    last_issued: Mutex<i64>,
}

impl ClipCatalog {
    /// Create new catalog over `store`, using `key` for the snapshot
    pub fn new(store: Arc<dyn KeyValueStorePort>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            cache: RwLock::new(None),
            last_issued: Mutex::new(0),
        }
    }

    /// Create new catalog using the default snapshot key
    pub fn with_default_key(store: Arc<dyn KeyValueStorePort>) -> Self {
        Self::new(store, DEFAULT_CATALOG_KEY)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Every persisted clip in insertion order
    pub async fn list_all(&self) -> Result<Vec<Clip>, DomainError> {
        let clips = self.load_snapshot().await?;
        *self.cache.write().await = Some(clips.clone());
        Ok(clips)
    }

    /// The clip with `id`, or `None` when there is no such clip
    pub async fn get(&self, id: &ClipId) -> Result<Option<Clip>, DomainError> {
        let clips = self.list_all().await?;
        Ok(clips.into_iter().find(|clip| &clip.id == id))
    }

    /// The view from the last successful read or write, without touching the store
    pub async fn cached(&self) -> Option<Vec<Clip>> {
        self.cache.read().await.clone()
    }

    /// Append a new clip and persist the catalog, returning the assigned id
    pub async fn add(&self, new: NewClip) -> Result<ClipId, DomainError> {
        let mut clips = self.load_snapshot().await?;

        let created_at = Utc::now();
        let id = self.issue_id(created_at, &clips).await;
        let clip = Clip::from_new(id.clone(), created_at, new);
        debug!(id = %clip.id, name = %clip.name, "Adding clip to catalog");
        clips.push(clip);

        self.persist(&clips).await?;
        *self.cache.write().await = Some(clips);

        info!(id = %id, "Clip added to catalog");
        Ok(id)
    }

    /// Remove the clip with `id`; returns whether anything was removed.
    ///
    /// The media file referenced by the clip is left alone.
    pub async fn remove(&self, id: &ClipId) -> Result<bool, DomainError> {
        let mut clips = self.load_snapshot().await?;
        let before = clips.len();
        clips.retain(|clip| &clip.id != id);

        if clips.len() == before {
            debug!(id = %id, "Clip not in catalog, nothing to remove");
            *self.cache.write().await = Some(clips);
            return Ok(false);
        }

        self.persist(&clips).await?;
        *self.cache.write().await = Some(clips);

        info!(id = %id, "Clip removed from catalog");
        Ok(true)
    }

    async fn load_snapshot(&self) -> Result<Vec<Clip>, DomainError> {
        match self.store.read(&self.key).await? {
            None => Ok(Vec::new()),
            Some(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                DomainError::storage_read(&self.key, format!("malformed catalog snapshot: {}", e))
            }),
        }
    }

    async fn persist(&self, clips: &[Clip]) -> Result<(), DomainError> {
        let bytes = serde_json::to_vec(clips)
            .map_err(|e| DomainError::storage_write(&self.key, e))?;
        self.store.write(&self.key, &bytes).await
    }

    /// Millisecond creation timestamp, bumped past anything already issued or stored
    async fn issue_id(&self, created_at: DateTime<Utc>, existing: &[Clip]) -> ClipId {
        let mut last = self.last_issued.lock().await;
        let mut candidate = created_at.timestamp_millis().max(*last + 1);
        while existing
            .iter()
            .any(|clip| clip.id.as_str() == candidate.to_string())
        {
            candidate += 1;
        }
        *last = candidate;
        ClipId::new(candidate.to_string())
    }
}

// Ports - Interface definitions (contracts)

use async_trait::async_trait;
use tokio::sync::mpsc::UnboundedSender;

use crate::domain::errors::*;
use crate::domain::model::*;

/// Channel on which a running trim reports progress
pub type ProgressSender = UnboundedSender<TrimProgress>;

/// Port for the persisted key-value store
#[async_trait]
pub trait KeyValueStorePort: Send + Sync {
    /// Read the raw value under `key`, `None` if nothing was ever written
    async fn read(&self, key: &str) -> Result<Option<Vec<u8>>, DomainError>;

    /// Replace the value under `key`
    async fn write(&self, key: &str, value: &[u8]) -> Result<(), DomainError>;

    /// Remove a single key; absent keys are not an error
    async fn remove(&self, key: &str) -> Result<(), DomainError>;

    /// Remove every key held by this store
    async fn clear(&self) -> Result<(), DomainError>;
}

/// Port for the video-processing engine
#[async_trait]
pub trait VideoProcessingPort: Send + Sync {
    /// Duration of the media at `uri` in seconds
    async fn probe_duration(&self, uri: &str) -> Result<f64, DomainError>;

    /// Cut `range` out of `source_uri` into `output_uri` and return the result's URI.
    ///
    /// When `progress` is given, percent-complete events are sent on it while
    /// the trim runs.
    async fn trim(
        &self,
        source_uri: &str,
        range: &TrimRange,
        output_uri: &str,
        progress: Option<ProgressSender>,
    ) -> Result<String, DomainError>;

    /// Copy `input_uri` to `output_uri` with `metadata` attached
    async fn write_metadata(
        &self,
        input_uri: &str,
        output_uri: &str,
        metadata: &ClipMetadata,
    ) -> Result<String, DomainError>;
}

/// Port for the device media library
#[async_trait]
pub trait MediaLibraryPort: Send + Sync {
    /// Register the file at `local_uri`, optionally inside `album`
    async fn save(&self, local_uri: &str, album: Option<&str>) -> Result<MediaAsset, DomainError>;

    /// Delete a previously saved asset
    async fn delete(&self, asset_id: &str) -> Result<(), DomainError>;
}

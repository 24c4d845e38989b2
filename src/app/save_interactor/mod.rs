// Save interactor - Trims a selection and commits it to the catalog

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use crate::app::catalog::ClipCatalog;
use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules::*;
use crate::ports::*;
use crate::utils::path::{file_uri, local_path};

/// Output of the trim step, waiting for the user to name it
#[derive(Debug, Clone, PartialEq)]
pub struct TrimmedClip {
    pub source_uri: String,
    pub uri: String,
    pub range: TrimRange,
}

/// Everything needed to trim and save in one go
#[derive(Debug, Clone)]
pub struct SaveClipRequest {
    pub source_uri: String,
    pub range: TrimRange,
    pub name: String,
    pub description: String,
}

/// Result of a committed save
#[derive(Debug, Clone, PartialEq)]
pub struct SavedClip {
    pub id: ClipId,
    pub video_uri: String,
    pub asset: MediaAsset,
}

/// Interactor for the trim-and-save workflow
pub struct SaveClipInteractor {
    processing: Arc<dyn VideoProcessingPort>,
    media_library: Arc<dyn MediaLibraryPort>,
    catalog: Arc<ClipCatalog>,
    naming: OutputNaming,
    album: Option<String>,
}

impl SaveClipInteractor {
    /// Create new save interactor with injected ports
    pub fn new(
        processing: Arc<dyn VideoProcessingPort>,
        media_library: Arc<dyn MediaLibraryPort>,
        catalog: Arc<ClipCatalog>,
        naming: OutputNaming,
        album: Option<String>,
    ) -> Self {
        Self {
            processing,
            media_library,
            catalog,
            naming,
            album,
        }
    }

    /// Cut `range` out of `source_uri` into the work directory.
    ///
    /// Failures are returned as-is; nothing is retried.
    pub async fn trim(
        &self,
        source_uri: &str,
        range: TrimRange,
        progress: Option<ProgressSender>,
    ) -> Result<TrimmedClip, DomainError> {
        let output = self
            .naming
            .cropped_path(&local_path(source_uri), Utc::now());
        info!(source = source_uri, %range, "Starting trim");

        let uri = self
            .processing
            .trim(source_uri, &range, &file_uri(&output), progress)
            .await?;

        Ok(TrimmedClip {
            source_uri: source_uri.to_string(),
            uri,
            range,
        })
    }

    /// Attach metadata, file the clip in the media library and add it to the catalog
    pub async fn commit(
        &self,
        trimmed: &TrimmedClip,
        name: &str,
        description: &str,
    ) -> Result<SavedClip, DomainError> {
        let metadata = SaveFormRules::validate(name, description)?;

        let saved_path = self.naming.saved_path(Utc::now());
        let saved_uri = self
            .processing
            .write_metadata(&trimmed.uri, &file_uri(&saved_path), &metadata)
            .await?;

        let asset = self
            .media_library
            .save(&saved_uri, self.album.as_deref())
            .await?;

        let new = NewClip::new(metadata.title, asset.uri.clone(), trimmed.range.duration())
            .with_description(metadata.description)
            .with_asset_id(asset.id.clone());
        let id = self.catalog.add(new).await?;

        remove_scratch_file(&trimmed.uri).await;
        if saved_uri != asset.uri {
            remove_scratch_file(&saved_uri).await;
        }

        info!(id = %id, asset_id = %asset.id, "Clip saved");
        Ok(SavedClip {
            id,
            video_uri: asset.uri.clone(),
            asset,
        })
    }

    /// Trim and commit in one call
    pub async fn execute(
        &self,
        request: SaveClipRequest,
        progress: Option<ProgressSender>,
    ) -> Result<SavedClip, DomainError> {
        SaveFormRules::validate(&request.name, &request.description)?;
        let trimmed = self
            .trim(&request.source_uri, request.range, progress)
            .await?;
        self.commit(&trimmed, &request.name, &request.description)
            .await
    }
}

async fn remove_scratch_file(uri: &str) {
    let path = local_path(uri);
    if let Err(e) = tokio::fs::remove_file(&path).await {
        debug!(path = %path.display(), error = %e, "Scratch file not removed");
    }
}

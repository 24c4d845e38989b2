// Filesystem media library adapter - Albums as directories under a library root

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;
use crate::utils::path::{file_uri, is_safe_file_stem, local_path};

const SERVICE: &str = "media library";
const DEFAULT_ALBUM: &str = "Camera";

/// Media library stored as `<root>/<album>/<asset-id>.<ext>`
pub struct FsMediaLibraryAdapter {
    root: PathBuf,
}

impl FsMediaLibraryAdapter {
    /// Create new media library rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, DomainError> {
        let root = root.into();
        std::fs::create_dir_all(&root).map_err(|e| {
            DomainError::Config(format!(
                "Failed to create media library {}: {}",
                root.display(),
                e
            ))
        })?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn find_asset(&self, asset_id: &str) -> Option<PathBuf> {
        WalkDir::new(&self.root)
            .min_depth(1)
            .max_depth(2)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_file())
            .find(|entry| {
                entry.path().file_stem().and_then(|stem| stem.to_str()) == Some(asset_id)
            })
            .map(|entry| entry.into_path())
    }
}

fn asset_id_for(source: &Path) -> String {
    let stem: String = source
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("clip")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-'))
        .collect();
    format!("{}-{}", Utc::now().timestamp_micros(), stem)
}

#[async_trait]
impl MediaLibraryPort for FsMediaLibraryAdapter {
    async fn save(&self, local_uri: &str, album: Option<&str>) -> Result<MediaAsset, DomainError> {
        let source = local_path(local_uri);
        let album_name = album.unwrap_or(DEFAULT_ALBUM);
        if !is_safe_file_stem(album_name) {
            return Err(DomainError::BadArgs(format!("Invalid album name: {:?}", album_name)));
        }

        let album_dir = self.root.join(album_name);
        tokio::fs::create_dir_all(&album_dir)
            .await
            .map_err(|e| DomainError::external(SERVICE, e))?;

        let id = asset_id_for(&source);
        let mut target = album_dir.join(&id);
        if let Some(ext) = source.extension() {
            target.set_extension(ext);
        }

        tokio::fs::copy(&source, &target).await.map_err(|e| {
            DomainError::external(SERVICE, format!("cannot import {}: {}", source.display(), e))
        })?;

        info!(asset_id = %id, album = album_name, "Saved clip to media library");
        Ok(MediaAsset {
            id,
            uri: file_uri(&target),
            album: album.map(str::to_string),
        })
    }

    async fn delete(&self, asset_id: &str) -> Result<(), DomainError> {
        if !is_safe_file_stem(asset_id) {
            return Err(DomainError::BadArgs(format!("Invalid asset id: {:?}", asset_id)));
        }

        let path = self
            .find_asset(asset_id)
            .ok_or_else(|| DomainError::external(SERVICE, format!("asset {} not found", asset_id)))?;

        tokio::fs::remove_file(&path)
            .await
            .map_err(|e| DomainError::external(SERVICE, e))?;
        debug!(asset_id, path = %path.display(), "Deleted media asset");
        Ok(())
    }
}

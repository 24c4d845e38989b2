// Remove interactor - Drops a clip from the catalog, then its media asset

use std::sync::Arc;

use tracing::{info, warn};

use crate::app::catalog::ClipCatalog;
use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;

/// What a removal actually did
#[derive(Debug, Clone, PartialEq)]
pub struct RemoveOutcome {
    /// The catalog entry existed and is gone
    pub removed: bool,
    /// The media asset was deleted as well
    pub media_deleted: bool,
    /// Why the media asset could not be deleted, if it could not
    pub media_error: Option<DomainError>,
}

/// Interactor for removing a saved clip
pub struct RemoveClipInteractor {
    catalog: Arc<ClipCatalog>,
    media_library: Arc<dyn MediaLibraryPort>,
}

impl RemoveClipInteractor {
    /// Create new remove interactor with injected ports
    pub fn new(catalog: Arc<ClipCatalog>, media_library: Arc<dyn MediaLibraryPort>) -> Self {
        Self {
            catalog,
            media_library,
        }
    }

    /// Remove the clip with `id`.
    ///
    /// The catalog entry goes first. A media-library failure afterwards is
    /// reported in the outcome but leaves the removal in place, so at worst an
    /// orphaned file remains.
    pub async fn execute(&self, id: &ClipId) -> Result<RemoveOutcome, DomainError> {
        let asset_id = self
            .catalog
            .get(id)
            .await?
            .and_then(|clip| clip.asset_id);

        let removed = self.catalog.remove(id).await?;
        if !removed {
            return Ok(RemoveOutcome {
                removed: false,
                media_deleted: false,
                media_error: None,
            });
        }

        let Some(asset_id) = asset_id else {
            info!(id = %id, "Removed clip without a media asset");
            return Ok(RemoveOutcome {
                removed: true,
                media_deleted: false,
                media_error: None,
            });
        };

        match self.media_library.delete(&asset_id).await {
            Ok(()) => {
                info!(id = %id, asset_id = %asset_id, "Removed clip and media asset");
                Ok(RemoveOutcome {
                    removed: true,
                    media_deleted: true,
                    media_error: None,
                })
            }
            Err(e) => {
                warn!(id = %id, asset_id = %asset_id, error = %e, "Media asset left behind");
                Ok(RemoveOutcome {
                    removed: true,
                    media_deleted: false,
                    media_error: Some(e),
                })
            }
        }
    }
}

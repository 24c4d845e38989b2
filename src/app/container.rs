use std::sync::Arc;

use crate::adapters::{AppConfig, FfmpegCliAdapter, FileKeyValueStore, FsMediaLibraryAdapter};
use crate::app::{
    catalog::ClipCatalog, remove_interactor::RemoveClipInteractor,
    save_interactor::SaveClipInteractor,
};
use crate::domain::errors::DomainError;
use crate::domain::rules::OutputNaming;
use crate::ports::{KeyValueStorePort, MediaLibraryPort, VideoProcessingPort};

pub trait AppContainer: Send + Sync {
    fn catalog(&self) -> Arc<ClipCatalog>;
    fn processing(&self) -> Arc<dyn VideoProcessingPort>;
    fn save_interactor(&self) -> Arc<SaveClipInteractor>;
    fn remove_interactor(&self) -> Arc<RemoveClipInteractor>;
}

pub struct DefaultAppContainer {
    catalog: Arc<ClipCatalog>,
    processing: Arc<dyn VideoProcessingPort>,
    save_interactor: Arc<SaveClipInteractor>,
    remove_interactor: Arc<RemoveClipInteractor>,
}

impl DefaultAppContainer {
    /// Wire the filesystem and ffmpeg adapters described by `config`
    pub fn new(config: &AppConfig) -> Result<Self, DomainError> {
        config.validate()?;

        let store = Arc::new(FileKeyValueStore::new(&config.storage.dir)?);
        let media_library = Arc::new(FsMediaLibraryAdapter::new(&config.media.library_dir)?);
        let processing = Arc::new(FfmpegCliAdapter::new(
            &config.ffmpeg.ffmpeg_path,
            &config.ffmpeg.ffprobe_path,
        ));

        Ok(Self::with_ports(
            config,
            store as Arc<dyn KeyValueStorePort>,
            processing as Arc<dyn VideoProcessingPort>,
            media_library as Arc<dyn MediaLibraryPort>,
        ))
    }

    /// Wire the interactors around caller-supplied ports
    pub fn with_ports(
        config: &AppConfig,
        store: Arc<dyn KeyValueStorePort>,
        processing: Arc<dyn VideoProcessingPort>,
        media_library: Arc<dyn MediaLibraryPort>,
    ) -> Self {
        let catalog = Arc::new(ClipCatalog::new(store, config.storage.catalog_key.clone()));

        let album = Some(config.media.album.clone()).filter(|album| !album.is_empty());
        let save_interactor = Arc::new(SaveClipInteractor::new(
            Arc::clone(&processing),
            Arc::clone(&media_library),
            Arc::clone(&catalog),
            OutputNaming::new(&config.media.work_dir),
            album,
        ));

        let remove_interactor = Arc::new(RemoveClipInteractor::new(
            Arc::clone(&catalog),
            Arc::clone(&media_library),
        ));

        Self {
            catalog,
            processing,
            save_interactor,
            remove_interactor,
        }
    }
}

impl AppContainer for DefaultAppContainer {
    fn catalog(&self) -> Arc<ClipCatalog> {
        Arc::clone(&self.catalog)
    }

    fn processing(&self) -> Arc<dyn VideoProcessingPort> {
        Arc::clone(&self.processing)
    }

    fn save_interactor(&self) -> Arc<SaveClipInteractor> {
        Arc::clone(&self.save_interactor)
    }

    fn remove_interactor(&self) -> Arc<RemoveClipInteractor> {
        Arc::clone(&self.remove_interactor)
    }
}

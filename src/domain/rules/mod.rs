// Domain rules - Business logic and policies

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::domain::errors::*;
use crate::domain::model::*;

/// Checks applied to the save form before a clip is committed
pub struct SaveFormRules;

impl SaveFormRules {
    /// Validate user-entered metadata and return it in muxable form
    pub fn validate(name: &str, description: &str) -> Result<ClipMetadata, DomainError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::Validation("Clip name is required".to_string()));
        }

        Ok(ClipMetadata {
            title: name.to_string(),
            description: description.trim().to_string(),
        })
    }
}

/// Percentage of a trim that has been written, given the encoder's elapsed
/// output time in milliseconds
pub fn trim_progress_percent(elapsed_ms: f64, clip_seconds: f64) -> f64 {
    if clip_seconds <= 0.0 || !elapsed_ms.is_finite() {
        return 0.0;
    }
    (elapsed_ms / (clip_seconds * 1000.0) * 100.0).clamp(0.0, 100.0)
}

/// File naming for intermediate and saved clips
pub struct OutputNaming {
    work_dir: PathBuf,
}

impl OutputNaming {
    pub fn new(work_dir: impl Into<PathBuf>) -> Self {
        Self {
            work_dir: work_dir.into(),
        }
    }

    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// `cropped_<millis>.<source extension>` for the raw trim output
    pub fn cropped_path(&self, source: &Path, at: DateTime<Utc>) -> PathBuf {
        let extension = source
            .extension()
            .and_then(|ext| ext.to_str())
            .filter(|ext| !ext.is_empty())
            .unwrap_or("mp4");
        self.work_dir
            .join(format!("cropped_{}.{}", at.timestamp_millis(), extension))
    }

    /// `saved_<millis>.mp4` for the metadata-muxed file handed to the library
    pub fn saved_path(&self, at: DateTime<Utc>) -> PathBuf {
        self.work_dir
            .join(format!("saved_{}.mp4", at.timestamp_millis()))
    }
}

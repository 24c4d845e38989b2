// TOML config adapter - Configuration management using TOML files

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::errors::*;
use crate::utils::logging::parse_level;

/// Default config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "video_diary.toml";

/// Complete application configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub storage: StorageConfig,
    pub media: MediaConfig,
    pub selection: SelectionConfig,
    pub ffmpeg: FfmpegConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding the persisted key-value store
    pub dir: PathBuf,
    /// Key under which the clip snapshot is stored
    pub catalog_key: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaConfig {
    /// Root directory of the media library
    pub library_dir: PathBuf,
    /// Scratch directory for trimmed and metadata-muxed files
    pub work_dir: PathBuf,
    /// Album saved clips are filed under
    pub album: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    pub max_window_seconds: f64,
    pub track_width: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FfmpegConfig {
    pub ffmpeg_path: PathBuf,
    pub ffprobe_path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
}

fn data_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(|home| PathBuf::from(home).join(".video_diary"))
        .unwrap_or_else(|| PathBuf::from(".video_diary"))
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: data_dir().join("storage"),
            catalog_key: "videos".to_string(),
        }
    }
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            library_dir: data_dir().join("library"),
            work_dir: std::env::temp_dir().join("video_diary"),
            album: "VideoDiary".to_string(),
        }
    }
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            max_window_seconds: 5.0,
            track_width: 300.0,
        }
    }
}

impl Default for FfmpegConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: PathBuf::from("ffmpeg"),
            ffprobe_path: PathBuf::from("ffprobe"),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

impl AppConfig {
    /// Check cross-field constraints
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.storage.catalog_key.trim().is_empty() {
            return Err(DomainError::Config("storage.catalog_key cannot be empty".to_string()));
        }
        if !is_positive(self.selection.max_window_seconds) {
            return Err(DomainError::Config(
                "selection.max_window_seconds must be positive".to_string(),
            ));
        }
        if !is_positive(self.selection.track_width) {
            return Err(DomainError::Config(
                "selection.track_width must be positive".to_string(),
            ));
        }
        parse_level(&self.logging.level)
            .map_err(|e| DomainError::Config(e.to_string()))?;
        Ok(())
    }
}

/// TOML configuration adapter
pub struct TomlConfigAdapter;

impl TomlConfigAdapter {
    /// Parse configuration from TOML text; missing tables and keys keep their defaults
    pub fn parse(content: &str) -> Result<AppConfig, DomainError> {
        toml::from_str(content)
            .map_err(|e| DomainError::Config(format!("Failed to parse TOML config: {}", e)))
    }

    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<AppConfig, DomainError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            DomainError::Config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;
        Self::parse(&content)
    }

    /// Serialize configuration to TOML text
    pub fn render(config: &AppConfig) -> Result<String, DomainError> {
        toml::to_string_pretty(config)
            .map_err(|e| DomainError::Config(format!("Failed to serialize config: {}", e)))
    }

    /// Save configuration to a file, creating parent directories
    pub fn save(config: &AppConfig, path: &Path) -> Result<(), DomainError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                DomainError::Config(format!("Failed to create config directory: {}", e))
            })?;
        }
        std::fs::write(path, Self::render(config)?)
            .map_err(|e| DomainError::Config(format!("Failed to write config file: {}", e)))
    }
}

//! Configuration initialization and hierarchy management

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::adapters::toml_config::{AppConfig, TomlConfigAdapter, DEFAULT_CONFIG_FILE};
use crate::domain::errors::DomainError;

/// Overrides coming from command-line flags
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub config_file: Option<PathBuf>,
    pub log_level: Option<String>,
    pub json_logs: bool,
}

/// A resolved configuration and where its values came from
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub config: AppConfig,
    /// The TOML file that was loaded, if any
    pub file: Option<PathBuf>,
    /// Number of `VIDEO_DIARY_*` variables applied
    pub env_overrides: usize,
}

impl ResolvedConfig {
    /// Report the sources; call once a subscriber is installed
    pub fn log_sources(&self) {
        match &self.file {
            Some(path) => info!(path = %path.display(), "Loaded configuration file"),
            None => debug!("No configuration file found, using defaults"),
        }
        if self.env_overrides > 0 {
            info!("Applied {} environment variable overrides", self.env_overrides);
        }
    }
}

/// Resolve configuration following precedence: CLI > Env > File > Defaults
pub fn initialize_configuration_hierarchy(cli: &CliOverrides) -> Result<ResolvedConfig, DomainError> {
    resolve_configuration(cli, |name| std::env::var(name).ok())
}

/// Same as [`initialize_configuration_hierarchy`] with an explicit environment
pub fn resolve_configuration<F>(cli: &CliOverrides, lookup: F) -> Result<ResolvedConfig, DomainError>
where
    F: Fn(&str) -> Option<String>,
{
    let file = config_file_path(cli.config_file.as_deref());
    let mut config = match &file {
        Some(path) => TomlConfigAdapter::load(path)?,
        None => AppConfig::default(),
    };

    let env_overrides = apply_environment(&mut config, lookup)?;

    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
    }
    if cli.json_logs {
        config.logging.json = true;
    }

    config.validate()?;
    Ok(ResolvedConfig {
        config,
        file,
        env_overrides,
    })
}

/// An explicitly requested file must exist; the default file is optional
fn config_file_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    let default = PathBuf::from(DEFAULT_CONFIG_FILE);
    default.exists().then_some(default)
}

/// Apply `VIDEO_DIARY_*` variables, returning how many were set
pub fn apply_environment<F>(config: &mut AppConfig, lookup: F) -> Result<usize, DomainError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut applied = 0;

    if let Some(value) = lookup("VIDEO_DIARY_STORAGE_DIR") {
        config.storage.dir = PathBuf::from(value);
        applied += 1;
    }
    if let Some(value) = lookup("VIDEO_DIARY_LIBRARY_DIR") {
        config.media.library_dir = PathBuf::from(value);
        applied += 1;
    }
    if let Some(value) = lookup("VIDEO_DIARY_WORK_DIR") {
        config.media.work_dir = PathBuf::from(value);
        applied += 1;
    }
    if let Some(value) = lookup("VIDEO_DIARY_ALBUM") {
        config.media.album = value;
        applied += 1;
    }
    if let Some(value) = lookup("VIDEO_DIARY_MAX_WINDOW") {
        config.selection.max_window_seconds = value.trim().parse().map_err(|_| {
            DomainError::Config(format!("VIDEO_DIARY_MAX_WINDOW is not a number: {}", value))
        })?;
        applied += 1;
    }
    if let Some(value) = lookup("VIDEO_DIARY_FFMPEG") {
        config.ffmpeg.ffmpeg_path = PathBuf::from(value);
        applied += 1;
    }
    if let Some(value) = lookup("VIDEO_DIARY_FFPROBE") {
        config.ffmpeg.ffprobe_path = PathBuf::from(value);
        applied += 1;
    }
    if let Some(value) = lookup("VIDEO_DIARY_LOG_LEVEL") {
        config.logging.level = value;
        applied += 1;
    }

    Ok(applied)
}

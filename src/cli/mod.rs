//! CLI module for Video Diary
//!
//! This module handles command-line argument parsing and command execution.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config_initialization::CliOverrides;

pub mod args;
pub mod commands;

/// Video Diary
///
/// Trim short clips out of videos, file them in the media library and keep a
/// catalog of what was saved.
#[derive(Parser, Debug)]
#[command(name = "diary")]
#[command(about = "Video Diary - trim, save and browse short clips")]
#[command(version)]
#[command(long_about = None)]
pub struct Cli {
    /// Configuration file (default: ./video_diary.toml when present)
    #[arg(long, global = true, env = "VIDEO_DIARY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Logging level
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            config_file: self.config.clone(),
            log_level: self.log_level.clone(),
            json_logs: self.json_logs,
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List saved clips
    List(args::ListArgs),
    /// Show one saved clip
    Show(args::ShowArgs),
    /// Print the duration of a video
    Probe(args::ProbeArgs),
    /// Trim a segment and save it as a clip
    Save(args::SaveArgs),
    /// Remove a saved clip and its media asset
    Remove(args::RemoveArgs),
    /// Replay drag gestures over the selection track
    Window(args::WindowArgs),
}

//! Command-line argument definitions

use clap::Args;

/// Arguments for the list command
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the show command
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Clip id
    #[arg(long)]
    pub id: String,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the probe command
#[derive(Args, Debug)]
pub struct ProbeArgs {
    /// Input video path or file:// URI
    #[arg(short, long)]
    pub input: String,
}

/// Arguments for the save command
#[derive(Args, Debug)]
pub struct SaveArgs {
    /// Input video path or file:// URI
    #[arg(short, long)]
    pub input: String,

    /// Start time (seconds or M:SS.ms)
    #[arg(short, long)]
    pub start: String,

    /// End time (seconds or M:SS.ms)
    #[arg(short, long)]
    pub end: String,

    /// Clip name
    #[arg(short, long)]
    pub name: String,

    /// Clip description
    #[arg(short, long, default_value = "")]
    pub description: String,
}

/// Arguments for the remove command
#[derive(Args, Debug)]
pub struct RemoveArgs {
    /// Clip id
    #[arg(long)]
    pub id: String,
}

/// Arguments for the window command
#[derive(Args, Debug)]
pub struct WindowArgs {
    /// Video duration in seconds
    #[arg(long)]
    pub duration: f64,

    /// Maximum clip length in seconds (default: from config)
    #[arg(long)]
    pub max: Option<f64>,

    /// Track width in pixels (default: from config)
    #[arg(long)]
    pub track_width: Option<f64>,

    /// Drag delta in pixels; repeat for successive gestures
    #[arg(long, allow_hyphen_values = true)]
    pub drag: Vec<f64>,
}

//! Video Diary Library
//!
//! Trim a short segment out of a video, save it with a title and description,
//! and keep a persisted catalog of the saved clips.
//!
//! The selection window ([`domain::selection::SelectionWindow`]) turns a drag
//! over a fixed-width track into a clamped start/end time. The catalog
//! ([`app::ClipCatalog`]) owns the list of saved clips. Video processing, the
//! media library and the key-value store sit behind the traits in [`ports`].

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config_initialization;
pub mod domain;
pub mod error;
pub mod ports;
pub mod utils;

// Re-export commonly used types
pub use app::{ClipCatalog, RemoveClipInteractor, SaveClipInteractor};
pub use domain::errors::DomainError;
pub use domain::model::{Clip, ClipId, NewClip, TrimRange};
pub use domain::selection::{SelectionRange, SelectionWindow};
pub use error::{DiaryError, DiaryResult};

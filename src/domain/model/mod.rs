// Domain models - Core types and data structures

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

/// Opaque clip identifier, unique within a catalog
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClipId(String);

impl ClipId {
    /// Wrap an existing identifier (e.g. one read back from a snapshot or typed by a user)
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ClipId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// A saved, trimmed clip with user metadata
///
/// The serialized form is the snapshot schema shared with earlier versions of
/// the app: `{id, name, description, videoUri, createdAt, duration}` plus an
/// optional `assetId`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Clip {
    pub id: ClipId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub video_uri: String,
    pub created_at: DateTime<Utc>,
    #[serde(rename = "duration")]
    pub duration_seconds: f64,
    /// Media-library handle of the saved file, if the library returned one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_id: Option<String>,
}

impl Clip {
    /// Build the stored clip for a new entry. Only the catalog calls this.
    pub(crate) fn from_new(id: ClipId, created_at: DateTime<Utc>, new: NewClip) -> Self {
        Self {
            id,
            name: new.name,
            description: new.description,
            video_uri: new.video_uri,
            created_at,
            duration_seconds: stored_duration(new.duration_seconds),
            asset_id: new.asset_id,
        }
    }

    /// The caller-supplied part of this clip
    pub fn to_new(&self) -> NewClip {
        NewClip {
            name: self.name.clone(),
            description: self.description.clone(),
            video_uri: self.video_uri.clone(),
            duration_seconds: self.duration_seconds,
            asset_id: self.asset_id.clone(),
        }
    }
}

/// JSON has no representation for non-finite numbers
fn stored_duration(seconds: f64) -> f64 {
    if seconds.is_finite() {
        seconds.max(0.0)
    } else {
        0.0
    }
}

/// A clip as handed to the catalog, before it has an id
#[derive(Debug, Clone, PartialEq)]
pub struct NewClip {
    pub name: String,
    pub description: String,
    pub video_uri: String,
    pub duration_seconds: f64,
    pub asset_id: Option<String>,
}

impl NewClip {
    pub fn new(name: impl Into<String>, video_uri: impl Into<String>, duration_seconds: f64) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            video_uri: video_uri.into(),
            duration_seconds,
            asset_id: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_asset_id(mut self, asset_id: impl Into<String>) -> Self {
        self.asset_id = Some(asset_id.into());
        self
    }
}

/// Time range to keep from a source video, in seconds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrimRange {
    start: f64,
    end: f64,
}

impl TrimRange {
    /// Create a new range with validation
    pub fn new(start: f64, end: f64) -> Result<Self, DomainError> {
        if !start.is_finite() || !end.is_finite() {
            return Err(DomainError::BadArgs("Trim times must be finite".to_string()));
        }
        if start < 0.0 {
            return Err(DomainError::BadArgs("Start time cannot be negative".to_string()));
        }
        if end <= start {
            return Err(DomainError::BadArgs(
                "End time must be greater than start time".to_string(),
            ));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    /// Length of the kept segment
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

impl fmt::Display for TrimRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}s..{:.2}s", self.start, self.end)
    }
}

/// Metadata muxed into a saved clip file
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ClipMetadata {
    pub title: String,
    pub description: String,
}

impl ClipMetadata {
    /// `(key, value)` pairs in container-metadata form, empty values skipped
    pub fn entries(&self) -> Vec<(&'static str, &str)> {
        [("title", self.title.as_str()), ("description", self.description.as_str())]
            .into_iter()
            .filter(|(_, value)| !value.is_empty())
            .collect()
    }
}

/// Handle to a file registered with the media library
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaAsset {
    pub id: String,
    pub uri: String,
    pub album: Option<String>,
}

/// Progress event emitted while a trim runs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrimProgress {
    /// Percent complete, `0.0..=100.0`
    pub percent: f64,
}

#[cfg(test)]
mod tests;

//! Data structures for download requests

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Output format selector, the only choice the user makes besides the URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaFormat {
    Video,
    Audio,
}

impl MediaFormat {
    pub const ALL: [MediaFormat; 2] = [MediaFormat::Video, MediaFormat::Audio];

    /// Name of the fixed output folder for this format
    pub fn folder_name(&self) -> &'static str {
        match self {
            MediaFormat::Video => "Videos",
            MediaFormat::Audio => "Audios",
        }
    }
}

impl std::fmt::Display for MediaFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaFormat::Video => write!(f, "Video"),
            MediaFormat::Audio => write!(f, "Audio"),
        }
    }
}

/// A single queued download
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadRequest {
    pub id: String,
    pub url: String,
    pub format: MediaFormat,
    pub queued_at: DateTime<Utc>,
}

impl DownloadRequest {
    pub fn new(url: impl Into<String>, format: MediaFormat) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            url: url.into(),
            format,
            queued_at: Utc::now(),
        }
    }
}

/// What a finished download reports back
#[derive(Debug, Clone)]
pub struct DownloadOutcome {
    /// Media title as reported by the extractor, if it reported one
    pub title: Option<String>,
}

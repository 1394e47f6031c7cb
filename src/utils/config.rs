//! Application configuration

use crate::utils::paths::default_download_dir;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Application settings
///
/// Everything here is an input to the yt-dlp invocation or to where its
/// output lands; the download mechanics themselves are not configurable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    /// Base download location; `Videos/` and `Audios/` live under it
    pub download_dir: PathBuf,

    /// Upper bound on video resolution (pixels of height)
    pub max_video_height: u32,

    /// Target codec for audio extraction
    pub audio_codec: String,

    /// Target bitrate for audio extraction, in yt-dlp notation
    pub audio_quality: String,

    /// Concurrent fragment downloads inside a single yt-dlp job
    pub concurrent_fragments: u32,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            download_dir: default_download_dir(),
            max_video_height: 1440,
            audio_codec: "mp3".to_string(),
            audio_quality: "192K".to_string(),
            concurrent_fragments: 4,
        }
    }
}

impl AppSettings {
    /// Load settings from the platform config directory.
    ///
    /// A missing or unreadable file falls back to defaults; a broken
    /// settings file should never keep the app from starting.
    pub fn load() -> Self {
        let path = config_path();
        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(e) => {
                warn!("using default settings, could not read {:?}: {}", path, e);
                Self::default()
            }
        }
    }

    /// Save settings to the platform config directory.
    pub fn save(&self) -> Result<()> {
        self.save_to(&config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read settings from {:?}", path))?;
        let settings = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse settings in {:?}", path))?;
        Ok(settings)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write settings to {:?}", path))?;
        Ok(())
    }
}

/// Path of the settings file: `<config_dir>/tubeload/settings.json`
pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tubeload")
        .join("settings.json")
}

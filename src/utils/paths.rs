//! Platform path resolution
//!
//! All paths are resolved absolutely. When the app is launched from a
//! desktop shell (Finder, Dock, a .desktop entry) the working directory
//! is not the project directory, so relative paths resolve to the wrong
//! place or fail silently.

use crate::downloader::MediaFormat;
use anyhow::Result;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Get the application data directory for Tubeload.
///
/// Uses the platform-standard data location (e.g. `~/.local/share/tubeload`
/// on Linux, `~/Library/Application Support/tubeload` on macOS). Creates
/// the directory if it doesn't exist.
pub fn app_data_dir() -> PathBuf {
    let dir = dirs::data_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("/tmp"))
        .join("tubeload");

    if let Err(e) = std::fs::create_dir_all(&dir) {
        warn!("failed to create app data directory {:?}: {}", dir, e);
    }

    debug!("app data directory: {:?}", dir);
    dir
}

/// Get the user's download directory.
///
/// Falls back to `~/Downloads` if the standard lookup fails.
pub fn default_download_dir() -> PathBuf {
    dirs::download_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join("Downloads")))
        .unwrap_or_else(|| {
            warn!("could not determine a downloads directory, using /tmp");
            PathBuf::from("/tmp")
        })
}

/// The two fixed output folders, one per media format.
#[derive(Debug, Clone)]
pub struct DownloadDirs {
    base: PathBuf,
}

impl DownloadDirs {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    /// Destination folder for a given output format.
    pub fn dir_for(&self, format: MediaFormat) -> PathBuf {
        self.base.join(format.folder_name())
    }

    /// Create both output folders if absent.
    pub async fn ensure_all(&self) -> Result<()> {
        for format in MediaFormat::ALL {
            tokio::fs::create_dir_all(self.dir_for(format)).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_data_dir_is_absolute() {
        let path = app_data_dir();
        assert!(path.is_absolute(), "app data dir must be an absolute path");
        assert!(path.to_string_lossy().contains("tubeload"));
    }

    #[test]
    fn test_default_download_dir_is_absolute() {
        let path = default_download_dir();
        assert!(path.is_absolute(), "download dir must be an absolute path");
    }

    #[test]
    fn test_dir_for_appends_format_folder() {
        let dirs = DownloadDirs::new("/tmp/dl");
        assert_eq!(
            dirs.dir_for(MediaFormat::Video),
            PathBuf::from("/tmp/dl/Videos")
        );
        assert_eq!(
            dirs.dir_for(MediaFormat::Audio),
            PathBuf::from("/tmp/dl/Audios")
        );
    }

    #[tokio::test]
    async fn test_ensure_all_creates_both_folders() {
        let temp = tempfile::TempDir::new().expect("temp dir");
        let dirs = DownloadDirs::new(temp.path());
        dirs.ensure_all().await.expect("create dirs");

        assert!(temp.path().join("Videos").is_dir());
        assert!(temp.path().join("Audios").is_dir());
    }
}

//! Utility modules for error handling, configuration, and paths

pub mod config;
pub mod error;
pub mod paths;

// Re-export for convenience
pub use config::AppSettings;
pub use error::TubeloadError;
pub use paths::{app_data_dir, default_download_dir, DownloadDirs};

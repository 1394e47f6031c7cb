//! Tubeload library

pub mod backend;
pub mod downloader;
pub mod gui;
pub mod queue;
pub mod utils;

// Re-export main types for easier use
pub use backend::{BackendActor, BackendCommand, BackendEvent};
pub use downloader::{DownloadRequest, MediaDownloader, MediaFormat, ProgressEvent, YtDlpDownloader};
pub use gui::{Message, TubeloadApp, View};
pub use queue::{DownloadQueue, QueueEvent, QueueSummary};
pub use utils::{AppSettings, TubeloadError};

use crate::downloader::MediaFormat;
use crate::queue::QueueSummary;

/// Commands sent from GUI to Backend
#[derive(Debug, Clone)]
pub enum BackendCommand {
    Enqueue { url: String, format: MediaFormat },
    OpenDownloadFolder(MediaFormat),
    // System
    Shutdown,
}

/// Events sent from Backend to GUI
#[derive(Debug, Clone)]
pub enum BackendEvent {
    // Download life-cycle
    DownloadStarted {
        url: String,
        format: MediaFormat,
    },
    DownloadProgress {
        percent: f32,
        title: Option<String>,
    },
    DownloadFinished {
        title: String,
    },
    DownloadFailed {
        url: String,
        error: String,
    },

    // Queue bookkeeping
    QueueChanged {
        summary: QueueSummary,
        pending: Vec<String>,
    },
    QueueIdle,

    // System
    Error(String),
}

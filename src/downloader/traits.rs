use crate::downloader::models::{DownloadOutcome, DownloadRequest};
use crate::downloader::progress::ProgressEvent;
use anyhow::Result;
use async_trait::async_trait;
use std::path::Path;
use tokio::sync::mpsc;

/// The delegation boundary to the external download tool.
///
/// This trait isolates the queue from the specific fetch mechanism so the
/// queue can be exercised with a stub in tests.
#[async_trait]
pub trait MediaDownloader: Send + Sync {
    /// Returns a unique identifier for this downloader (e.g., "yt-dlp")
    fn id(&self) -> &'static str;

    /// Download one item into `dest_dir`, streaming progress events into
    /// `progress_tx` while the fetch runs.
    ///
    /// Runs to completion or fails; there is no cancellation path. The
    /// sender is dropped when the call returns, which is how consumers
    /// learn the event stream is over.
    async fn download(
        &self,
        request: &DownloadRequest,
        dest_dir: &Path,
        progress_tx: mpsc::Sender<ProgressEvent>,
    ) -> Result<DownloadOutcome>;
}

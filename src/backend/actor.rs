use super::messages::{BackendCommand, BackendEvent};
use crate::downloader::{YtDlpDownloader, YtDlpOptions};
use crate::queue::{DownloadQueue, History, QueueEvent};
use crate::utils::{app_data_dir, AppSettings, DownloadDirs};
use anyhow::Result;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{info, warn};

/// Owns the queue on the tokio runtime and bridges it to the GUI.
///
/// Commands come in over one channel, events leave over another; the GUI
/// drains events on its own thread, which is the marshalling point for
/// progress updates arriving from downloader tasks.
pub struct BackendActor {
    receiver: mpsc::Receiver<BackendCommand>,
    sender: mpsc::Sender<BackendEvent>,
    queue_events: mpsc::Receiver<QueueEvent>,

    // Components
    queue: DownloadQueue,
    dirs: DownloadDirs,
}

impl BackendActor {
    pub async fn new(
        settings: AppSettings,
        receiver: mpsc::Receiver<BackendCommand>,
        sender: mpsc::Sender<BackendEvent>,
    ) -> Result<Self> {
        let downloader = Arc::new(YtDlpDownloader::new(YtDlpOptions::from_settings(&settings))?);

        let dirs = DownloadDirs::new(settings.download_dir.clone());
        dirs.ensure_all().await?;

        let history = History::new(&app_data_dir()).await?;

        let (queue_tx, queue_events) = mpsc::channel::<QueueEvent>(256);
        let queue = DownloadQueue::new(downloader, dirs.clone(), queue_tx, history);

        Ok(Self {
            receiver,
            sender,
            queue_events,
            queue,
            dirs,
        })
    }

    pub async fn run(mut self) {
        info!("backend actor started");

        loop {
            tokio::select! {
                cmd = self.receiver.recv() => match cmd {
                    Some(BackendCommand::Enqueue { url, format }) => {
                        // Blank URLs are filtered in the GUI already; the
                        // queue rejects them again as a no-op.
                        if !self.queue.enqueue(&url, format).await {
                            let _ = self
                                .sender
                                .send(BackendEvent::Error("Cannot queue an empty URL".to_string()))
                                .await;
                        }
                    }
                    Some(BackendCommand::OpenDownloadFolder(format)) => {
                        let dir = self.dirs.dir_for(format);
                        if let Err(e) = open::that(&dir) {
                            warn!("failed to open {:?}: {}", dir, e);
                            let _ = self
                                .sender
                                .send(BackendEvent::Error(format!("Could not open folder: {e}")))
                                .await;
                        }
                    }
                    Some(BackendCommand::Shutdown) | None => break,
                },
                event = self.queue_events.recv() => match event {
                    Some(event) => {
                        let _ = self.sender.send(map_queue_event(event)).await;
                    }
                    None => break,
                },
            }
        }

        info!("backend actor stopped");
    }
}

fn map_queue_event(event: QueueEvent) -> BackendEvent {
    match event {
        QueueEvent::Started { url, format } => BackendEvent::DownloadStarted { url, format },
        QueueEvent::Progress { percent, title } => {
            BackendEvent::DownloadProgress { percent, title }
        }
        QueueEvent::Finished { title } => BackendEvent::DownloadFinished { title },
        QueueEvent::Failed { url, error } => BackendEvent::DownloadFailed { url, error },
        QueueEvent::QueueChanged { summary, pending } => {
            BackendEvent::QueueChanged { summary, pending }
        }
        QueueEvent::Idle => BackendEvent::QueueIdle,
    }
}

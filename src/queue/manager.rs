//! Download queue with single-flight processing
//!
//! The queue admits one download at a time: a new job starts only from
//! the completion or error path of the previous one, so effective
//! concurrency is always 1 no matter how fast items are enqueued.

use crate::downloader::{
    clean_partial_files, DownloadRequest, MediaDownloader, MediaFormat, ProgressEvent,
};
use crate::queue::events::{QueueEvent, QueueSummary};
use crate::queue::history::{History, HistoryEvent};
use crate::utils::DownloadDirs;
use chrono::Utc;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tracing::{debug, info, warn};

/// The item currently being downloaded
#[derive(Debug, Clone)]
pub struct ActiveDownload {
    pub url: String,
    pub format: MediaFormat,
    pub title: Option<String>,
    pub percent: f32,
}

struct QueueState {
    pending: VecDeque<DownloadRequest>,
    active: Option<ActiveDownload>,
    completed: Vec<String>,
    worker_running: bool,
}

/// Ordered download queue delegating each item to a [`MediaDownloader`]
#[derive(Clone)]
pub struct DownloadQueue {
    state: Arc<Mutex<QueueState>>,
    downloader: Arc<dyn MediaDownloader>,
    dirs: DownloadDirs,
    events: mpsc::Sender<QueueEvent>,
    history: History,
}

impl DownloadQueue {
    pub fn new(
        downloader: Arc<dyn MediaDownloader>,
        dirs: DownloadDirs,
        events: mpsc::Sender<QueueEvent>,
        history: History,
    ) -> Self {
        Self {
            state: Arc::new(Mutex::new(QueueState {
                pending: VecDeque::new(),
                active: None,
                completed: Vec::new(),
                worker_running: false,
            })),
            downloader,
            dirs,
            events,
            history,
        }
    }

    /// Append a request and start processing if nothing is active.
    ///
    /// A blank or whitespace-only URL is rejected as a no-op; the queue
    /// length does not change and no worker is started. Returns whether
    /// the item was accepted.
    pub async fn enqueue(&self, url: &str, format: MediaFormat) -> bool {
        let url = url.trim();
        if url.is_empty() {
            debug!("ignoring enqueue of blank URL");
            return false;
        }

        let start_worker = {
            let mut state = self.state.lock().await;
            state.pending.push_back(DownloadRequest::new(url, format));
            if state.worker_running {
                false
            } else {
                state.worker_running = true;
                true
            }
        };

        info!("queued {} ({})", url, format);
        self.emit_queue_changed().await;

        if start_worker {
            let queue = self.clone();
            tokio::spawn(async move {
                queue.run_worker().await;
            });
        }

        true
    }

    /// Current counters
    pub async fn summary(&self) -> QueueSummary {
        let state = self.state.lock().await;
        summary_of(&state)
    }

    /// Titles of everything finished so far, in completion order
    pub async fn completed_titles(&self) -> Vec<String> {
        let state = self.state.lock().await;
        state.completed.clone()
    }

    /// Snapshot of the item currently downloading, if any
    pub async fn active(&self) -> Option<ActiveDownload> {
        let state = self.state.lock().await;
        state.active.clone()
    }

    /// Drain the queue to completion, one download at a time.
    async fn run_worker(self) {
        loop {
            let request = {
                let mut state = self.state.lock().await;
                match state.pending.pop_front() {
                    Some(request) => {
                        state.active = Some(ActiveDownload {
                            url: request.url.clone(),
                            format: request.format,
                            title: None,
                            percent: 0.0,
                        });
                        request
                    }
                    None => {
                        state.worker_running = false;
                        break;
                    }
                }
            };

            self.emit_queue_changed().await;
            let _ = self
                .events
                .send(QueueEvent::Started {
                    url: request.url.clone(),
                    format: request.format,
                })
                .await;

            self.process_one(request).await;
        }

        let _ = self.events.send(QueueEvent::Idle).await;
    }

    /// Run one download, relaying its progress and absorbing its failure.
    async fn process_one(&self, request: DownloadRequest) {
        let dest_dir = self.dirs.dir_for(request.format);

        let (progress_tx, progress_rx) = mpsc::channel::<ProgressEvent>(64);
        let relay = self.spawn_progress_relay(progress_rx);

        let result = match self.dirs.ensure_all().await {
            Ok(()) => {
                self.downloader
                    .download(&request, &dest_dir, progress_tx)
                    .await
            }
            Err(e) => {
                drop(progress_tx);
                Err(e)
            }
        };

        // The downloader dropped its sender, so the relay is done too.
        let _ = relay.await;

        match result {
            Ok(outcome) => {
                let title = outcome.title.unwrap_or_else(|| request.url.clone());
                {
                    let mut state = self.state.lock().await;
                    if let Some(active) = state.active.as_mut() {
                        active.percent = 100.0;
                    }
                    state.completed.push(title.clone());
                    state.active = None;
                }
                info!("finished {}", title);
                let _ = self
                    .events
                    .send(QueueEvent::Finished {
                        title: title.clone(),
                    })
                    .await;
                if let Err(e) = self
                    .history
                    .record(HistoryEvent::Finished {
                        url: request.url.clone(),
                        title,
                        format: request.format,
                        timestamp: Utc::now(),
                    })
                    .await
                {
                    warn!("failed to record history entry: {}", e);
                }
            }
            Err(e) => {
                let error = e.to_string();
                warn!("download failed for {}: {}", request.url, error);

                match clean_partial_files(&dest_dir).await {
                    Ok(removed) if removed > 0 => {
                        info!("removed {} partial file(s) from {:?}", removed, dest_dir)
                    }
                    Ok(_) => {}
                    Err(e) => warn!("partial-file cleanup failed: {}", e),
                }

                {
                    let mut state = self.state.lock().await;
                    state.active = None;
                }
                let _ = self
                    .events
                    .send(QueueEvent::Failed {
                        url: request.url.clone(),
                        error: error.clone(),
                    })
                    .await;
                if let Err(e) = self
                    .history
                    .record(HistoryEvent::Failed {
                        url: request.url.clone(),
                        error,
                        timestamp: Utc::now(),
                    })
                    .await
                {
                    warn!("failed to record history entry: {}", e);
                }
            }
        }

        self.emit_queue_changed().await;
    }

    /// Mirror downloader progress into the active slot and forward it.
    ///
    /// Progress is forwarded with `try_send` so a slow consumer drops
    /// updates instead of stalling the subprocess read loop.
    fn spawn_progress_relay(
        &self,
        mut progress_rx: mpsc::Receiver<ProgressEvent>,
    ) -> tokio::task::JoinHandle<()> {
        let state = Arc::clone(&self.state);
        let events = self.events.clone();

        tokio::spawn(async move {
            while let Some(event) = progress_rx.recv().await {
                match event {
                    ProgressEvent::Downloading { percent, title } => {
                        {
                            let mut state = state.lock().await;
                            if let Some(active) = state.active.as_mut() {
                                active.percent = percent;
                                if let Some(title) = &title {
                                    active.title = Some(title.clone());
                                }
                            }
                        }
                        if events
                            .try_send(QueueEvent::Progress { percent, title })
                            .is_err()
                        {
                            debug!("dropping progress update, event channel full");
                        }
                    }
                    // Terminal outcome is taken from the download result.
                    ProgressEvent::Finished { .. } => {}
                }
            }
        })
    }

    async fn emit_queue_changed(&self) {
        let (summary, pending) = {
            let state = self.state.lock().await;
            let pending = state.pending.iter().map(|r| r.url.clone()).collect();
            (summary_of(&state), pending)
        };
        let _ = self
            .events
            .send(QueueEvent::QueueChanged { summary, pending })
            .await;
    }
}

fn summary_of(state: &QueueState) -> QueueSummary {
    QueueSummary {
        completed: state.completed.len(),
        remaining: state.pending.len(),
        in_progress: usize::from(state.active.is_some()),
    }
}

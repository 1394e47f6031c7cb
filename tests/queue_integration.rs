//! Integration tests covering the queue lifecycle with a stubbed downloader,
//! without hitting the network or spawning yt-dlp.

use anyhow::anyhow;
use async_trait::async_trait;
use std::collections::HashSet;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;
use tokio::sync::{mpsc, Mutex};
use tokio::time::{timeout, Duration};
use tubeload::downloader::{
    DownloadOutcome, DownloadRequest, MediaDownloader, MediaFormat, ProgressEvent,
};
use tubeload::queue::{DownloadQueue, History, QueueEvent, QueueSummary};
use tubeload::utils::DownloadDirs;

/// Downloader stub: emits one scripted progress event per item, then
/// succeeds or fails depending on the URL. Tracks how many downloads
/// were ever running at once.
struct StubDownloader {
    active: AtomicUsize,
    max_active: AtomicUsize,
    fail_urls: HashSet<String>,
    /// When present, each download waits for one permit before finishing
    gate: Option<Mutex<mpsc::Receiver<()>>>,
}

impl StubDownloader {
    fn new() -> Self {
        Self {
            active: AtomicUsize::new(0),
            max_active: AtomicUsize::new(0),
            fail_urls: HashSet::new(),
            gate: None,
        }
    }

    fn failing(urls: &[&str]) -> Self {
        let mut stub = Self::new();
        stub.fail_urls = urls.iter().map(|u| u.to_string()).collect();
        stub
    }

    fn gated() -> (Self, mpsc::Sender<()>) {
        let (release_tx, release_rx) = mpsc::channel(16);
        let mut stub = Self::new();
        stub.gate = Some(Mutex::new(release_rx));
        (stub, release_tx)
    }

    fn max_active(&self) -> usize {
        self.max_active.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MediaDownloader for StubDownloader {
    fn id(&self) -> &'static str {
        "stub"
    }

    async fn download(
        &self,
        request: &DownloadRequest,
        _dest_dir: &Path,
        progress_tx: mpsc::Sender<ProgressEvent>,
    ) -> anyhow::Result<DownloadOutcome> {
        let now_active = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_active.fetch_max(now_active, Ordering::SeqCst);

        let title = format!("Title of {}", request.url);
        let _ = progress_tx
            .send(ProgressEvent::Downloading {
                percent: 45.0,
                title: Some(title.clone()),
            })
            .await;

        if let Some(gate) = &self.gate {
            let mut release = gate.lock().await;
            let _ = release.recv().await;
        }

        self.active.fetch_sub(1, Ordering::SeqCst);

        if self.fail_urls.contains(&request.url) {
            return Err(anyhow!("simulated network failure"));
        }

        let _ = progress_tx
            .send(ProgressEvent::Finished {
                title: Some(title.clone()),
            })
            .await;
        Ok(DownloadOutcome { title: Some(title) })
    }
}

async fn make_queue(
    stub: Arc<StubDownloader>,
) -> (DownloadQueue, mpsc::Receiver<QueueEvent>, TempDir) {
    let temp = TempDir::new().expect("temp dir");
    let history = History::new(temp.path()).await.expect("history");
    let dirs = DownloadDirs::new(temp.path().join("downloads"));
    let (events_tx, events_rx) = mpsc::channel(256);
    let queue = DownloadQueue::new(stub, dirs, events_tx, history);
    (queue, events_rx, temp)
}

async fn next_event(events: &mut mpsc::Receiver<QueueEvent>) -> QueueEvent {
    timeout(Duration::from_secs(5), events.recv())
        .await
        .expect("timed out waiting for a queue event")
        .expect("event channel closed")
}

async fn collect_until_idle(events: &mut mpsc::Receiver<QueueEvent>) -> Vec<QueueEvent> {
    let mut seen = Vec::new();
    loop {
        let event = next_event(events).await;
        let is_idle = matches!(event, QueueEvent::Idle);
        seen.push(event);
        if is_idle {
            return seen;
        }
    }
}

async fn wait_for_started(events: &mut mpsc::Receiver<QueueEvent>) -> String {
    loop {
        if let QueueEvent::Started { url, .. } = next_event(events).await {
            return url;
        }
    }
}

#[tokio::test]
async fn blank_url_enqueue_is_noop() {
    let stub = Arc::new(StubDownloader::new());
    let (queue, mut events, _temp) = make_queue(stub).await;

    assert!(!queue.enqueue("", MediaFormat::Video).await);
    assert!(!queue.enqueue("   ", MediaFormat::Audio).await);
    assert!(!queue.enqueue("\t\n", MediaFormat::Video).await);

    let summary = queue.summary().await;
    assert_eq!(summary, QueueSummary::default());
    assert!(events.try_recv().is_err(), "no events for rejected URLs");
}

#[tokio::test]
async fn all_enqueued_downloads_complete() {
    let stub = Arc::new(StubDownloader::new());
    let (queue, mut events, _temp) = make_queue(Arc::clone(&stub)).await;

    assert!(queue.enqueue("https://example.com/u1", MediaFormat::Video).await);
    assert!(queue.enqueue("https://example.com/u2", MediaFormat::Audio).await);

    let seen = collect_until_idle(&mut events).await;

    let summary = queue.summary().await;
    assert_eq!(summary.completed, 2);
    assert_eq!(summary.remaining, 0);
    assert_eq!(summary.in_progress, 0);
    assert!(summary.all_done());

    assert_eq!(
        queue.completed_titles().await,
        vec![
            "Title of https://example.com/u1".to_string(),
            "Title of https://example.com/u2".to_string(),
        ]
    );

    // Items started in FIFO order
    let starts: Vec<String> = seen
        .iter()
        .filter_map(|e| match e {
            QueueEvent::Started { url, .. } => Some(url.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(
        starts,
        vec![
            "https://example.com/u1".to_string(),
            "https://example.com/u2".to_string(),
        ]
    );

    assert!(stub.max_active() <= 1, "queue must be single-flight");
}

#[tokio::test]
async fn failure_advances_queue_without_counting_as_completed() {
    let stub = Arc::new(StubDownloader::failing(&["https://example.com/bad"]));
    let (queue, mut events, _temp) = make_queue(Arc::clone(&stub)).await;

    queue.enqueue("https://example.com/bad", MediaFormat::Video).await;
    queue.enqueue("https://example.com/good", MediaFormat::Video).await;

    let seen = collect_until_idle(&mut events).await;

    let failed: Vec<(&String, &String)> = seen
        .iter()
        .filter_map(|e| match e {
            QueueEvent::Failed { url, error } => Some((url, error)),
            _ => None,
        })
        .collect();
    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0].0, "https://example.com/bad");
    assert!(failed[0].1.contains("simulated network failure"));

    let summary = queue.summary().await;
    assert_eq!(summary.completed, 1, "failed item must not count");
    assert_eq!(summary.remaining, 0);
    assert_eq!(
        queue.completed_titles().await,
        vec!["Title of https://example.com/good".to_string()]
    );
    assert!(stub.max_active() <= 1);
}

#[tokio::test]
async fn second_enqueue_waits_while_first_is_active() {
    let (stub, release) = StubDownloader::gated();
    let stub = Arc::new(stub);
    let (queue, mut events, _temp) = make_queue(Arc::clone(&stub)).await;

    queue.enqueue("https://example.com/u1", MediaFormat::Video).await;
    let started = wait_for_started(&mut events).await;
    assert_eq!(started, "https://example.com/u1");

    queue.enqueue("https://example.com/u2", MediaFormat::Audio).await;

    // u1 active, u2 waiting
    let summary = queue.summary().await;
    assert_eq!(summary.completed, 0);
    assert_eq!(summary.remaining, 1);
    assert_eq!(summary.in_progress, 1);
    assert_eq!(summary.to_string(), "Completed: 0 | Remaining: 1");

    // The active slot mirrors the scripted progress event
    let mut tries = 0;
    loop {
        if let Some(active) = queue.active().await {
            if active.percent > 44.0 {
                assert_eq!(active.url, "https://example.com/u1");
                assert_eq!(active.title.as_deref(), Some("Title of https://example.com/u1"));
                break;
            }
        }
        tries += 1;
        assert!(tries < 200, "active download never reported progress");
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    // Let both downloads finish
    release.send(()).await.expect("release u1");
    release.send(()).await.expect("release u2");

    collect_until_idle(&mut events).await;
    let summary = queue.summary().await;
    assert_eq!(summary.completed, 2);
    assert!(stub.max_active() <= 1);
}

#[tokio::test]
async fn progress_events_reach_the_presentation_layer() {
    let stub = Arc::new(StubDownloader::new());
    let (queue, mut events, _temp) = make_queue(stub).await;

    queue.enqueue("https://example.com/clip", MediaFormat::Video).await;
    let seen = collect_until_idle(&mut events).await;

    let progress: Vec<(f32, Option<&str>)> = seen
        .iter()
        .filter_map(|e| match e {
            QueueEvent::Progress { percent, title } => Some((*percent, title.as_deref())),
            _ => None,
        })
        .collect();
    assert!(
        progress.contains(&(45.0, Some("Title of https://example.com/clip"))),
        "expected the scripted 45.0% event, got {:?}",
        progress
    );

    let finished: Vec<&String> = seen
        .iter()
        .filter_map(|e| match e {
            QueueEvent::Finished { title } => Some(title),
            _ => None,
        })
        .collect();
    assert_eq!(finished, vec!["Title of https://example.com/clip"]);
}

#[tokio::test]
async fn failed_download_cleans_partial_files() {
    let stub = Arc::new(StubDownloader::failing(&["https://example.com/bad"]));
    let (queue, mut events, temp) = make_queue(stub).await;

    // Plant leftovers the way an interrupted yt-dlp run leaves them
    let videos_dir = temp.path().join("downloads").join("Videos");
    tokio::fs::create_dir_all(&videos_dir).await.unwrap();
    tokio::fs::write(videos_dir.join("clip.mp4.part"), b"x").await.unwrap();
    tokio::fs::write(videos_dir.join("clip.ytdl"), b"x").await.unwrap();
    tokio::fs::write(videos_dir.join("earlier.mp4"), b"x").await.unwrap();

    queue.enqueue("https://example.com/bad", MediaFormat::Video).await;
    collect_until_idle(&mut events).await;

    assert!(!videos_dir.join("clip.mp4.part").exists());
    assert!(!videos_dir.join("clip.ytdl").exists());
    assert!(videos_dir.join("earlier.mp4").exists(), "finished outputs stay");
}

#[tokio::test]
async fn queue_events_carry_fresh_summaries() {
    let stub = Arc::new(StubDownloader::new());
    let (queue, mut events, _temp) = make_queue(stub).await;

    queue.enqueue("https://example.com/u1", MediaFormat::Video).await;
    let seen = collect_until_idle(&mut events).await;

    let summaries: Vec<&QueueSummary> = seen
        .iter()
        .filter_map(|e| match e {
            QueueEvent::QueueChanged { summary, .. } => Some(summary),
            _ => None,
        })
        .collect();
    assert!(!summaries.is_empty());

    // The last bookkeeping event reflects a drained queue
    let last = summaries.last().unwrap();
    assert_eq!(last.completed, 1);
    assert_eq!(last.remaining, 0);
    assert!(last.all_done());
}

//! Tubeload - Queue-Based Media Downloader
//!
//! A small desktop app: paste a video URL, pick Video or Audio, queue it.
//! yt-dlp does the actual fetching, format selection, and transcoding;
//! this app is the queue and the progress display around it.

use anyhow::Result;
use clap::Parser;
use iced::Application;
use tubeload::downloader::{
    clean_partial_files, find_ytdlp, DownloadRequest, MediaDownloader, MediaFormat, ProgressEvent,
    YtDlpDownloader, YtDlpOptions,
};
use tubeload::gui;
use tubeload::utils::{AppSettings, DownloadDirs, TubeloadError};

#[derive(Parser)]
#[command(name = "tubeload", about = "Queue-based media downloader built on yt-dlp")]
struct Args {
    /// Download a single URL without starting the GUI
    #[arg(long)]
    fetch: Option<String>,

    /// With --fetch: download audio instead of video
    #[arg(long)]
    audio: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    tracing_subscriber::fmt::init();

    check_ytdlp_installed();

    if let Some(url) = args.fetch {
        let format = if args.audio {
            MediaFormat::Audio
        } else {
            MediaFormat::Video
        };
        let rt = tokio::runtime::Runtime::new()?;
        rt.block_on(fetch_cli(url, format))?;
        return Ok(());
    }

    // Start the GUI application (synchronous entrypoint)
    gui::TubeloadApp::run(iced::Settings {
        window: iced::window::Settings {
            size: iced::Size::new(680.0, 640.0),
            min_size: Some(iced::Size::new(560.0, 520.0)),
            ..Default::default()
        },
        antialiasing: true,
        ..Default::default()
    })?;

    Ok(())
}

fn check_ytdlp_installed() {
    // yt-dlp missing is not fatal here; the app still launches and the
    // user sees the error when the first download starts.
    if find_ytdlp().is_none() {
        eprintln!("WARNING: yt-dlp not found in PATH or common locations");
        eprintln!("The app will run, but downloads will fail.");
        eprintln!("Please install yt-dlp:");
        eprintln!("  pip install yt-dlp");
        eprintln!("  or: brew install yt-dlp");
        eprintln!("  or visit: https://github.com/yt-dlp/yt-dlp");
    }
}

/// Headless single-download path, mirrors what the queue does for one item
async fn fetch_cli(url: String, format: MediaFormat) -> Result<()> {
    if url.trim().is_empty() {
        return Err(TubeloadError::InvalidUrl("URL is empty".to_string()).into());
    }

    let settings = AppSettings::load();
    let downloader = YtDlpDownloader::new(YtDlpOptions::from_settings(&settings))?;

    let dirs = DownloadDirs::new(settings.download_dir.clone());
    dirs.ensure_all().await?;
    let dest_dir = dirs.dir_for(format);

    let (progress_tx, mut progress_rx) = tokio::sync::mpsc::channel::<ProgressEvent>(64);
    let printer = tokio::spawn(async move {
        while let Some(event) = progress_rx.recv().await {
            if let ProgressEvent::Downloading { percent, title } = event {
                println!("{:>5.1}%  {}", percent, title.as_deref().unwrap_or("..."));
            }
        }
    });

    let request = DownloadRequest::new(url.trim(), format);
    println!("Fetching {} into {:?}", request.url, dest_dir);

    let result = downloader.download(&request, &dest_dir, progress_tx).await;
    let _ = printer.await;

    match result {
        Ok(outcome) => {
            println!(
                "Finished: {}",
                outcome.title.as_deref().unwrap_or(&request.url)
            );
            Ok(())
        }
        Err(e) => {
            if let Ok(removed) = clean_partial_files(&dest_dir).await {
                if removed > 0 {
                    eprintln!("Cleaned up {removed} partial file(s)");
                }
            }
            Err(e)
        }
    }
}

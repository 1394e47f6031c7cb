//! yt-dlp wrapper
//!
//! All of the hard work (URL resolution, format negotiation, fragment
//! downloading, muxing/transcoding) happens inside yt-dlp. This module
//! only locates the binary, translates a request into an argument list,
//! and relays the subprocess's progress lines as events.

use crate::downloader::models::{DownloadOutcome, DownloadRequest, MediaFormat};
use crate::downloader::progress::{parse_progress_line, ProgressEvent, PROGRESS_TEMPLATE};
use crate::downloader::traits::MediaDownloader;
use crate::utils::config::AppSettings;
use crate::utils::error::TubeloadError;
use anyhow::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command as AsyncCommand;
use tracing::{debug, info, warn};

/// Knobs forwarded into the yt-dlp invocation
#[derive(Debug, Clone)]
pub struct YtDlpOptions {
    pub max_video_height: u32,
    pub audio_codec: String,
    pub audio_quality: String,
    pub concurrent_fragments: u32,
}

impl Default for YtDlpOptions {
    fn default() -> Self {
        Self::from_settings(&AppSettings::default())
    }
}

impl YtDlpOptions {
    pub fn from_settings(settings: &AppSettings) -> Self {
        Self {
            max_video_height: settings.max_video_height,
            audio_codec: settings.audio_codec.clone(),
            audio_quality: settings.audio_quality.clone(),
            concurrent_fragments: settings.concurrent_fragments,
        }
    }
}

/// Downloader backed by the yt-dlp binary
pub struct YtDlpDownloader {
    ytdlp_path: PathBuf,
    opts: YtDlpOptions,
}

impl YtDlpDownloader {
    /// Initialize and verify yt-dlp availability
    pub fn new(opts: YtDlpOptions) -> Result<Self> {
        let ytdlp_path = match find_ytdlp() {
            Some(path) => {
                info!("found yt-dlp at: {}", path.display());
                path
            }
            None => return Err(TubeloadError::YtDlpNotFound.into()),
        };

        Ok(Self { ytdlp_path, opts })
    }

    /// Get the path to the yt-dlp binary being used
    pub fn ytdlp_path(&self) -> &Path {
        &self.ytdlp_path
    }

    /// Build the argument list for one request.
    ///
    /// The interesting part is the format selector: Video caps resolution
    /// and merges best video + best audio into mp4, Audio takes the best
    /// audio stream and transcodes it to a fixed codec/bitrate.
    fn build_args(&self, request: &DownloadRequest, dest_dir: &Path) -> Vec<String> {
        let mut args = vec![
            "--newline".to_string(),
            "--no-warnings".to_string(),
            "--no-playlist".to_string(),
            "--force-overwrites".to_string(),
            "--concurrent-fragments".to_string(),
            self.opts.concurrent_fragments.to_string(),
            "--progress-template".to_string(),
            PROGRESS_TEMPLATE.to_string(),
            "-o".to_string(),
            format!("{}/%(title)s.%(ext)s", dest_dir.display()),
        ];

        match request.format {
            MediaFormat::Video => {
                let h = self.opts.max_video_height;
                args.extend_from_slice(&[
                    "-f".to_string(),
                    format!("bestvideo[height<={h}]+bestaudio/best[height<={h}]/best[height<={h}]"),
                    "--merge-output-format".to_string(),
                    "mp4".to_string(),
                ]);
            }
            MediaFormat::Audio => {
                args.extend_from_slice(&[
                    "-f".to_string(),
                    "bestaudio/best".to_string(),
                    "-x".to_string(),
                    "--audio-format".to_string(),
                    self.opts.audio_codec.clone(),
                    "--audio-quality".to_string(),
                    self.opts.audio_quality.clone(),
                ]);
            }
        }

        args.push(request.url.clone());
        args
    }
}

#[async_trait]
impl MediaDownloader for YtDlpDownloader {
    fn id(&self) -> &'static str {
        "yt-dlp"
    }

    async fn download(
        &self,
        request: &DownloadRequest,
        dest_dir: &Path,
        progress_tx: tokio::sync::mpsc::Sender<ProgressEvent>,
    ) -> Result<DownloadOutcome> {
        let args = self.build_args(request, dest_dir);
        debug!("spawning yt-dlp for {}: {:?}", request.url, args);

        let mut child = AsyncCommand::new(&self.ytdlp_path)
            .args(&args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| TubeloadError::DownloadFailed(format!("failed to start yt-dlp: {e}")))?;

        let stdout = child.stdout.take().ok_or_else(|| {
            TubeloadError::DownloadFailed("failed to capture yt-dlp stdout".to_string())
        })?;
        let stderr = child.stderr.take();

        let mut title: Option<String> = None;
        let mut lines = BufReader::new(stdout).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            if let Some((percent, line_title)) = parse_progress_line(&line) {
                if line_title.is_some() {
                    title = line_title.clone();
                }
                let _ = progress_tx
                    .send(ProgressEvent::Downloading {
                        percent,
                        title: line_title,
                    })
                    .await;
            }
        }

        // Errors land on stderr; with --no-warnings it stays small enough
        // to drain after stdout closes.
        let stderr_output = match stderr {
            Some(stderr) => {
                let mut output = String::new();
                let mut lines = BufReader::new(stderr).lines();
                while let Ok(Some(line)) = lines.next_line().await {
                    if !line.trim().is_empty() {
                        output.push_str(&line);
                        output.push('\n');
                    }
                }
                output
            }
            None => String::new(),
        };

        let status = child.wait().await?;
        if status.success() {
            info!("yt-dlp finished for {}", request.url);
            let _ = progress_tx
                .send(ProgressEvent::Finished {
                    title: title.clone(),
                })
                .await;
            Ok(DownloadOutcome { title })
        } else {
            let message = if stderr_output.trim().is_empty() {
                format!("yt-dlp exited with {status}")
            } else {
                stderr_output.trim().to_string()
            };
            Err(TubeloadError::DownloadFailed(message).into())
        }
    }
}

// ============================================================
// yt-dlp Detection Functions
// ============================================================

/// Find the yt-dlp binary: system PATH first, then common install paths.
pub fn find_ytdlp() -> Option<PathBuf> {
    if let Ok(path) = which::which("yt-dlp") {
        if path.exists() {
            return Some(path);
        }
    }

    if let Some(common) = find_in_common_paths() {
        return Some(common);
    }

    warn!("yt-dlp not found anywhere");
    None
}

/// Check common installation paths for launches where PATH is minimal
/// (Finder, Dock, desktop entries).
fn find_in_common_paths() -> Option<PathBuf> {
    let common_paths = [
        // macOS Homebrew (Apple Silicon)
        "/opt/homebrew/bin/yt-dlp",
        // macOS Homebrew (Intel) / manual installs
        "/usr/local/bin/yt-dlp",
        // System
        "/usr/bin/yt-dlp",
        // pip user install
        "~/.local/bin/yt-dlp",
    ];

    for path_str in common_paths {
        let expanded = if let Some(rest) = path_str.strip_prefix("~/") {
            match dirs::home_dir() {
                Some(home) => home.join(rest),
                None => continue,
            }
        } else {
            PathBuf::from(path_str)
        };

        if expanded.exists() && is_executable(&expanded) {
            return Some(expanded);
        }
    }

    None
}

/// Check if a file is executable
fn is_executable(path: &Path) -> bool {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;

        match std::fs::metadata(path) {
            Ok(metadata) => metadata.permissions().mode() & 0o111 != 0,
            Err(_) => false,
        }
    }

    #[cfg(not(unix))]
    {
        path.exists()
    }
}

// ============================================================
// Tests
// ============================================================

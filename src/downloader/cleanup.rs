//! Partial-file cleanup after a failed download
//!
//! yt-dlp leaves `.part` (and sometimes `.ytdl` bookkeeping) files behind
//! when a download dies mid-flight. Transcode steps can also leave `.tmp`
//! files. These are removed from the destination folder on error.

use anyhow::Result;
use std::path::Path;
use tracing::{debug, warn};

const PARTIAL_EXTENSIONS: [&str; 3] = ["part", "ytdl", "tmp"];

/// Remove leftover partial files from `dir`, returning how many were removed.
///
/// Finished outputs are untouched; only the known temporary extensions go.
pub async fn clean_partial_files(dir: &Path) -> Result<usize> {
    if !dir.is_dir() {
        return Ok(0);
    }

    let mut removed = 0;
    let mut entries = tokio::fs::read_dir(dir).await?;

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        let is_partial = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| PARTIAL_EXTENSIONS.contains(&ext))
            .unwrap_or(false);

        if !is_partial {
            continue;
        }

        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                debug!("removed partial file {:?}", path);
                removed += 1;
            }
            Err(e) => warn!("failed to remove partial file {:?}: {}", path, e),
        }
    }

    Ok(removed)
}

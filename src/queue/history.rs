//! Append-only download history
//!
//! One JSON object per line in `history.jsonl` under the app data
//! directory. This is a journal of finished and failed downloads, not
//! queue state; nothing is replayed into the queue from it.

use crate::downloader::MediaFormat;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs::{File, OpenOptions};
use tokio::io::{AsyncWriteExt, BufWriter};
use tokio::sync::Mutex;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum HistoryEvent {
    Finished {
        url: String,
        title: String,
        format: MediaFormat,
        timestamp: DateTime<Utc>,
    },
    Failed {
        url: String,
        error: String,
        timestamp: DateTime<Utc>,
    },
}

#[derive(Debug, Clone)]
pub struct History {
    file_path: PathBuf,
    writer: Arc<Mutex<BufWriter<File>>>,
}

impl History {
    pub async fn new(base_dir: &Path) -> Result<Self> {
        let file_path = base_dir.join("history.jsonl");

        if let Some(parent) = file_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&file_path)
            .await
            .context("failed to open download history")?;

        Ok(Self {
            file_path,
            writer: Arc::new(Mutex::new(BufWriter::new(file))),
        })
    }

    /// Append one event, flushing immediately so a crash loses nothing.
    pub async fn record(&self, event: HistoryEvent) -> Result<()> {
        let json = serde_json::to_string(&event)?;
        let mut writer = self.writer.lock().await;
        writer.write_all(json.as_bytes()).await?;
        writer.write_all(b"\n").await?;
        writer.flush().await?;
        Ok(())
    }

    /// Read back all recorded events, skipping lines that fail to parse.
    pub async fn load(&self) -> Result<Vec<HistoryEvent>> {
        if !self.file_path.exists() {
            return Ok(Vec::new());
        }

        let content = tokio::fs::read_to_string(&self.file_path).await?;
        let mut events = Vec::new();

        for line in content.lines() {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<HistoryEvent>(line) {
                Ok(event) => events.push(event),
                Err(e) => {
                    tracing::warn!("skipping unreadable history line: {}", e);
                }
            }
        }
        Ok(events)
    }
}

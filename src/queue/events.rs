//! Events that describe changes in the download queue state

use crate::downloader::MediaFormat;

/// Derived counters, recomputed after every state change
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueueSummary {
    pub completed: usize,
    pub remaining: usize,
    pub in_progress: usize,
}

impl QueueSummary {
    /// True once everything ever queued has been drained
    pub fn all_done(&self) -> bool {
        self.remaining == 0 && self.in_progress == 0 && self.completed > 0
    }
}

impl std::fmt::Display for QueueSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.all_done() {
            write!(f, "All downloads finished")
        } else {
            write!(
                f,
                "Completed: {} | Remaining: {}",
                self.completed, self.remaining
            )
        }
    }
}

/// Events relayed from the queue to whatever presentation layer is attached
#[derive(Debug, Clone)]
pub enum QueueEvent {
    /// The head item left the queue and its download began
    Started { url: String, format: MediaFormat },
    /// The active download reported progress
    Progress { percent: f32, title: Option<String> },
    /// The active download finished
    Finished { title: String },
    /// The active download failed; the queue moves on
    Failed { url: String, error: String },
    /// Queue contents or counters changed
    QueueChanged {
        summary: QueueSummary,
        pending: Vec<String>,
    },
    /// Queue drained and nothing is active
    Idle,
}

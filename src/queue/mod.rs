//! Download queue and its event surface

pub mod events;
pub mod history;
pub mod manager;

// Re-export for convenience
pub use events::{QueueEvent, QueueSummary};
pub use history::{History, HistoryEvent};
pub use manager::{ActiveDownload, DownloadQueue};

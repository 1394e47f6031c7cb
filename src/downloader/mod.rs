//! yt-dlp delegation layer

pub mod cleanup;
pub mod models;
pub mod progress;
pub mod traits;
pub mod ytdlp;

// Re-export for convenience
pub use cleanup::clean_partial_files;
pub use models::{DownloadOutcome, DownloadRequest, MediaFormat};
pub use progress::{parse_progress_line, ProgressEvent};
pub use traits::MediaDownloader;
pub use ytdlp::{find_ytdlp, YtDlpDownloader, YtDlpOptions};

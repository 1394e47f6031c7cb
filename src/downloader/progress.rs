//! Progress events and yt-dlp output parsing
//!
//! yt-dlp is invoked with `--newline` and a `--progress-template` that
//! prints `<percent>|<title>` per progress line, so parsing stays a
//! string split instead of a screen-scrape of the default output.

/// Progress events emitted by a running download
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    Downloading {
        percent: f32,
        title: Option<String>,
    },
    Finished {
        title: Option<String>,
    },
}

/// Template handed to yt-dlp via `--progress-template`
pub const PROGRESS_TEMPLATE: &str = "download:%(progress._percent_str)s|%(info.title)s";

/// Parse one line of yt-dlp stdout into `(percent, title)`.
///
/// Fields are best-effort: the percent string may be padded, carry a `%`
/// suffix, or be `NA`; the title may be missing or `NA`. Anything that
/// doesn't look like a progress line yields `None`.
pub fn parse_progress_line(line: &str) -> Option<(f32, Option<String>)> {
    // Some yt-dlp builds keep the template key prefix on output lines.
    let line = line.strip_prefix("download:").unwrap_or(line);

    let (percent_part, title_part) = match line.split_once('|') {
        Some((percent, title)) => (percent, Some(title)),
        None => (line, None),
    };

    let percent_str = percent_part.trim().trim_end_matches('%').trim();
    let percent: f32 = percent_str.parse().ok()?;
    if !percent.is_finite() {
        return None;
    }
    let percent = percent.clamp(0.0, 100.0);

    let title = title_part
        .map(str::trim)
        .filter(|t| !t.is_empty() && *t != "NA")
        .map(str::to_string);

    Some((percent, title))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_percent_and_title() {
        let parsed = parse_progress_line("  45.0%|Some Clip");
        assert_eq!(parsed, Some((45.0, Some("Some Clip".to_string()))));
    }

    #[test]
    fn test_parse_with_template_prefix() {
        let parsed = parse_progress_line("download:  12.3%|Another Clip");
        assert_eq!(parsed, Some((12.3, Some("Another Clip".to_string()))));
    }

    #[test]
    fn test_parse_percent_without_title() {
        let parsed = parse_progress_line(" 99.9%");
        assert_eq!(parsed, Some((99.9, None)));
    }

    #[test]
    fn test_parse_na_title_dropped() {
        let parsed = parse_progress_line("100.0%|NA");
        assert_eq!(parsed, Some((100.0, None)));
    }

    #[test]
    fn test_parse_na_percent_rejected() {
        assert_eq!(parse_progress_line("NA|Some Clip"), None);
    }

    #[test]
    fn test_parse_garbage_rejected() {
        assert_eq!(parse_progress_line("[Merger] Merging formats"), None);
        assert_eq!(parse_progress_line(""), None);
        assert_eq!(parse_progress_line("WARNING: unable to"), None);
    }

    #[test]
    fn test_parse_title_containing_pipe() {
        // Only the first '|' separates; the rest belongs to the title.
        let parsed = parse_progress_line("50.0%|A | B");
        assert_eq!(parsed, Some((50.0, Some("A | B".to_string()))));
    }

    #[test]
    fn test_parse_clamps_out_of_range() {
        assert_eq!(parse_progress_line("150.0%|t"), Some((100.0, Some("t".to_string()))));
        assert_eq!(parse_progress_line("-3.0%|t"), Some((0.0, Some("t".to_string()))));
    }

    proptest! {
        #[test]
        fn parse_never_panics(line in ".*") {
            let _ = parse_progress_line(&line);
        }

        #[test]
        fn parse_round_trips_percent(pct in 0.0f32..=100.0) {
            let line = format!("{:.1}%|Title", pct);
            let (parsed, title) = parse_progress_line(&line).expect("valid line");
            // Formatting rounds to one decimal, so parsed is within half a step.
            prop_assert!((parsed - pct).abs() <= 0.051);
            prop_assert_eq!(title, Some("Title".to_string()));
        }
    }
}

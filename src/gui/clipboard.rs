//! Clipboard access for the URL field

use arboard::Clipboard;

/// Read the clipboard, trimmed, for pasting into the URL input.
pub fn paste_text() -> Result<String, String> {
    let mut clipboard =
        Clipboard::new().map_err(|e| format!("Failed to access clipboard: {e}"))?;

    clipboard
        .get_text()
        .map(|text| text.trim().to_string())
        .map_err(|e| format!("Failed to read clipboard: {e}"))
}

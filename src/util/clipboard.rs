//! Clipboard sink for generated code
//!
//! Copy failures are logged and swallowed: losing the clipboard must never
//! abort or degrade a generation that already succeeded.

use tracing::{debug, warn};

/// Writes the given text to the system clipboard.
///
/// Returns whether the copy succeeded; callers that do not care may ignore
/// the result.
pub fn copy_to_clipboard(text: &str) -> bool {
    match arboard::Clipboard::new() {
        Ok(mut clipboard) => match clipboard.set_text(text.to_string()) {
            Ok(()) => {
                debug!("Copied {} chars to clipboard", text.len());
                true
            }
            Err(e) => {
                warn!("Failed to write clipboard: {}", e);
                false
            }
        },
        Err(e) => {
            warn!("Clipboard unavailable: {}", e);
            false
        }
    }
}

//! Read plain text from the system clipboard with `arboard`.
//!
//! A short-lived [`arboard::Clipboard`] handle is opened per call, since
//! `arboard::Clipboard` is not `Send` on every platform.

use arboard::Clipboard;
use thiserror::Error;

/// Errors from reading the clipboard.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClipboardError {
    /// The OS clipboard could not be opened or read.
    #[error("cannot access clipboard: {0}")]
    Access(String),

    /// The clipboard is empty, holds non-text data, or only whitespace.
    #[error("the clipboard does not contain any text")]
    Empty,
}

/// Current clipboard text, rejecting blank content.
pub fn read_clipboard_text() -> Result<String, ClipboardError> {
    let mut clipboard = Clipboard::new().map_err(|e| ClipboardError::Access(e.to_string()))?;

    match clipboard.get_text() {
        Ok(text) => usable_text(text),
        Err(arboard::Error::ContentNotAvailable) => Err(ClipboardError::Empty),
        Err(e) => Err(ClipboardError::Access(e.to_string())),
    }
}

fn usable_text(text: String) -> Result<String, ClipboardError> {
    if text.trim().is_empty() {
        Err(ClipboardError::Empty)
    } else {
        Ok(text)
    }
}

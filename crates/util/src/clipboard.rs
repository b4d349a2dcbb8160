//! Clipboard access.
//!
//! [`ClipboardSink`] is the write-only seam the UI copies through;
//! [`SystemClipboard`] backs it with the host clipboard via `arboard`.

use thiserror::Error;

/// Clipboard write failure (no clipboard, access denied, unsupported content).
#[derive(Debug, Error)]
#[error("clipboard unavailable: {0}")]
pub struct ClipboardError(String);

impl ClipboardError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

impl From<arboard::Error> for ClipboardError {
    fn from(error: arboard::Error) -> Self {
        Self(error.to_string())
    }
}

/// Destination for copied text.
pub trait ClipboardSink: Send + Sync {
    fn set_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// Host clipboard. A fresh `arboard::Clipboard` is opened per write so no
/// platform handle outlives the call.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl ClipboardSink for SystemClipboard {
    fn set_text(&self, text: &str) -> Result<(), ClipboardError> {
        let mut clipboard = arboard::Clipboard::new()?;
        clipboard.set_text(text.to_owned())?;
        Ok(())
    }
}

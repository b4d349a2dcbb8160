//! # Quill TUI Library
//!
//! Terminal front end for the article creation assistant. The user fills in
//! the article details form, generates an article through the completion
//! endpoint, reads it in the article panel and copies it to the clipboard.
//!
//! ## Architecture
//!
//! - [`app`] holds all state and the pure `update` function.
//! - `cmd` turns the effects `update` returns into clipboard writes and
//!   background completion requests.
//! - `ui` renders components with Ratatui and runs the event loop.

pub mod app;
mod cmd;
mod theme;
mod ui;

use anyhow::Result;

pub use app::SharedCtx;

/// Runs the main TUI application loop until the user quits.
///
/// # Errors
///
/// Returns an error if the terminal cannot be put into (or restored from)
/// raw mode and the alternate screen, or if drawing fails.
pub async fn run(ctx: SharedCtx) -> Result<()> {
    ui::runtime::run_app(ctx).await
}

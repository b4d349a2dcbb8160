//! Component system for the Quill TUI.
//!
//! Components are self-contained UI elements that render into a provided
//! `Rect`, react to key and mouse events, and report side effects back to the
//! runtime as [`Effect`]s. Persistent state lives on [`App`]; components keep
//! only layout bookkeeping such as the rects they last drew.

use crossterm::event::{KeyEvent, MouseEvent};
use quill_types::{Effect, Msg};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Span;

use crate::app::App;

/// A UI component with its own rendering and event handling.
pub(crate) trait Component {
    /// Handle an application message the component cares about.
    ///
    /// The default forwards to [`App::update`].
    fn handle_message(&mut self, app: &mut App, msg: Msg) -> Vec<Effect> {
        app.update(&msg)
    }

    /// Handle a key event while the component owns focus.
    fn handle_key_events(&mut self, _app: &mut App, _key: KeyEvent) -> Vec<Effect> {
        Vec::new()
    }

    /// Handle a mouse event; components hit-test against their last layout.
    fn handle_mouse_events(&mut self, _app: &mut App, _mouse: MouseEvent) -> Vec<Effect> {
        Vec::new()
    }

    /// Draw the component into `rect`.
    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App);

    /// Key hints shown in the hint bar while the component owns focus.
    fn get_hint_spans(&self, _app: &App) -> Vec<Span<'static>> {
        Vec::new()
    }
}


//! Theme and styling for the Quill TUI.
//!
//! A dark palette with a sky-blue accent (the loading indicator color of the
//! original form) and green action buttons.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders, Paragraph};

/// Accent color for highlights, focus indicators and the throbber.
pub const ACCENT: Color = Color::Rgb(0, 191, 255);

/// Primary foreground color for normal text.
pub const FG: Color = Color::Rgb(224, 224, 230);

/// Muted foreground color for hints, labels and secondary information.
pub const FG_MUTED: Color = Color::Rgb(168, 168, 175);

/// Default border color for unfocused elements.
pub const BORDER: Color = Color::Rgb(72, 72, 80);

pub const BORDER_FOCUS: Color = ACCENT;

/// Background color for focused inputs.
pub const BG_HIGHLIGHT: Color = Color::Rgb(20, 32, 44);

/// Primary ("Generate Article") button fill.
pub const BUTTON_PRIMARY: Color = Color::Rgb(59, 130, 246);

/// Article action ("Copy", "Generate New") button fill.
pub const BUTTON_SECONDARY: Color = Color::Rgb(34, 197, 94);

/// Success notices.
pub const OK: Color = Color::Rgb(110, 200, 140);

/// Warnings and the usage note.
pub const WARN: Color = Color::Rgb(248, 113, 113);

/// Creates a border style based on focus state.
pub fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(BORDER_FOCUS)
    } else {
        Style::default().fg(BORDER)
    }
}

/// Titles and field questions.
pub fn title_style() -> Style {
    Style::default().fg(FG_MUTED).add_modifier(Modifier::BOLD)
}

pub fn text_style() -> Style {
    Style::default().fg(FG)
}

pub fn text_muted() -> Style {
    Style::default().fg(FG_MUTED)
}

/// Focused input rows; keep a subtle background hint.
pub fn highlight_style() -> Style {
    Style::default().fg(FG).bg(BG_HIGHLIGHT)
}

pub fn warn_style() -> Style {
    Style::default().fg(WARN)
}

pub fn ok_style() -> Style {
    Style::default().fg(OK).add_modifier(Modifier::BOLD)
}

/// Render a bordered, centered button label.
///
/// Focused buttons get the accent border and a bold label; `fill` is the
/// button's resting background.
pub fn render_button(frame: &mut Frame, area: Rect, label: &str, fill: Color, is_focused: bool) {
    let mut style = Style::default().fg(Color::White).bg(fill);
    if is_focused {
        style = style.add_modifier(Modifier::BOLD);
    }
    frame.render_widget(
        Paragraph::new(label)
            .centered()
            .block(Block::bordered().borders(Borders::ALL).border_style(border_style(is_focused)))
            .style(style),
        area,
    );
}

/// Build `key description` hint spans for the hint bar.
pub fn build_hint_spans(hints: &[(&'static str, &'static str)]) -> Vec<Span<'static>> {
    let mut spans = Vec::with_capacity(hints.len() * 2);
    for (key, description) in hints {
        spans.push(Span::styled(*key, Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)));
        spans.push(Span::styled(*description, text_muted()));
    }
    spans
}

//! Diagnostics panel showing the most recent log lines.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::App;
use crate::theme;
use crate::ui::components::component::Component;

#[derive(Debug, Default)]
pub struct LogsComponent;

impl Component for LogsComponent {
    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App) {
        let block = Block::bordered()
            .borders(Borders::ALL)
            .border_style(theme::border_style(false))
            .title(Span::styled(" Logs ", theme::title_style()));
        let inner = block.inner(rect);

        // Newest entries stay pinned to the bottom.
        let visible = usize::from(inner.height);
        let skip = app.logs.entries.len().saturating_sub(visible);
        let lines: Vec<Line> = app
            .logs
            .entries
            .iter()
            .skip(skip)
            .map(|entry| Line::from(Span::styled(entry.clone(), theme::text_muted())))
            .collect();

        frame.render_widget(Paragraph::new(lines).block(block), rect);
    }
}

//! Generated article panel with its "Generate New" and "Copy" actions.

use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use quill_types::{Effect, Msg};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::app::{App, FocusTarget};
use crate::theme;
use crate::ui::components::component::Component;

const THROBBER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const BUTTON_WIDTH: u16 = 16;

#[derive(Debug, Default)]
pub struct ArticleComponent {
    copy_area: Rect,
    generate_new_area: Rect,
    body_area: Rect,
    line_count: u16,
}

impl ArticleComponent {
    fn scroll_by(&self, app: &mut App, delta: i32) {
        let max = self.line_count.saturating_sub(self.body_area.height);
        let next = (i32::from(app.article_scroll) + delta).clamp(0, i32::from(max));
        app.article_scroll = u16::try_from(next).unwrap_or(max);
    }
}

impl Component for ArticleComponent {
    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => match app.focus {
                FocusTarget::CopyButton => app.update(&Msg::CopyArticle),
                FocusTarget::GenerateNewButton => app.update(&Msg::Submit),
                _ => Vec::new(),
            },
            KeyCode::Left if app.focus == FocusTarget::CopyButton => {
                app.set_focus(FocusTarget::GenerateNewButton);
                Vec::new()
            }
            KeyCode::Right if app.focus == FocusTarget::GenerateNewButton => {
                app.set_focus(FocusTarget::CopyButton);
                Vec::new()
            }
            KeyCode::PageDown => {
                self.scroll_by(app, i32::from(self.body_area.height.max(1)));
                Vec::new()
            }
            KeyCode::PageUp => {
                self.scroll_by(app, -i32::from(self.body_area.height.max(1)));
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    fn handle_mouse_events(&mut self, app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
        let position = Position::new(mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) if self.copy_area.contains(position) => {
                app.set_focus(FocusTarget::CopyButton);
                app.update(&Msg::CopyArticle)
            }
            MouseEventKind::Down(MouseButton::Left) if self.generate_new_area.contains(position) => {
                app.set_focus(FocusTarget::GenerateNewButton);
                app.update(&Msg::Submit)
            }
            MouseEventKind::ScrollDown if self.body_area.contains(position) => {
                self.scroll_by(app, 1);
                Vec::new()
            }
            MouseEventKind::ScrollUp if self.body_area.contains(position) => {
                self.scroll_by(app, -1);
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App) {
        let block = Block::bordered()
            .borders(Borders::ALL)
            .border_style(theme::border_style(app.focus.is_article_action()))
            .title(Span::styled(" Generated Article: ", theme::title_style()));
        let inner = block.inner(rect);
        frame.render_widget(block, rect);

        let loading_height = if app.loading { 1 } else { 0 };
        let [loading_area, body_area, buttons_area] =
            Layout::vertical([Constraint::Length(loading_height), Constraint::Min(1), Constraint::Length(3)]).areas(inner);

        if app.loading {
            let frame_glyph = THROBBER[app.throbber_idx % THROBBER.len()];
            frame.render_widget(
                Paragraph::new(Line::from(vec![
                    Span::styled(format!("{frame_glyph} "), theme::title_style().fg(theme::ACCENT)),
                    Span::styled("Loading...", theme::text_style()),
                ])),
                loading_area,
            );
        }

        let body = Paragraph::new(app.article_text().to_string())
            .style(theme::text_style())
            .wrap(Wrap { trim: false });
        self.line_count = u16::try_from(body.line_count(body_area.width)).unwrap_or(u16::MAX);
        self.body_area = body_area;
        let max_scroll = self.line_count.saturating_sub(body_area.height);
        app.article_scroll = app.article_scroll.min(max_scroll);
        frame.render_widget(body.scroll((app.article_scroll, 0)), body_area);

        let [generate_new_area, _, copy_area] =
            Layout::horizontal([Constraint::Length(BUTTON_WIDTH), Constraint::Min(0), Constraint::Length(BUTTON_WIDTH)]).areas(buttons_area);
        self.generate_new_area = generate_new_area;
        self.copy_area = copy_area;
        theme::render_button(
            frame,
            generate_new_area,
            "Generate New",
            theme::BUTTON_SECONDARY,
            app.focus == FocusTarget::GenerateNewButton,
        );
        theme::render_button(frame, copy_area, "Copy", theme::BUTTON_SECONDARY, app.focus == FocusTarget::CopyButton);
    }

    fn get_hint_spans(&self, _app: &App) -> Vec<Span<'static>> {
        theme::build_hint_spans(&[(" Enter", " activate "), (" ←/→", " switch "), (" PgUp/PgDn", " scroll ")])
    }
}

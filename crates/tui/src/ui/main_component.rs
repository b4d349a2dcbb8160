use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};
use quill_types::{Effect, Msg};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::components::{ArticleComponent, Component, FormComponent, LogsComponent};
use crate::app::{App, FocusTarget, WORD_GUIDELINE};
use crate::theme;

const TITLE: &str = "⭐ Article Creation Assistant ⭐";
const SUBTITLE: &str = "powered by ChatGPT";
const USAGE_NOTE: &str =
    "Rough 750-word limit across all fields. No response usually means the prompt is too long or the service is too busy.";
/// Terminals at least this wide show the form and article side by side.
const SIDE_BY_SIDE_MIN_WIDTH: u16 = 100;
const LOGS_HEIGHT: u16 = 6;

/// Regions produced by [`MainView::get_preferred_layout`].
struct MainLayout {
    header: Rect,
    form: Rect,
    article: Rect,
    logs: Rect,
    status: Rect,
    hints: Rect,
}

#[derive(Debug, Default)]
pub struct MainView {
    pub form_view: FormComponent,
    pub article_view: ArticleComponent,
    pub logs_view: LogsComponent,
}

impl MainView {
    fn get_preferred_layout(&self, app: &App, area: Rect) -> MainLayout {
        let logs_height = if app.logs.is_visible { LOGS_HEIGHT } else { 0 };
        let [header, body, logs, status, hints] = Layout::vertical([
            Constraint::Length(2),           // Title and subtitle
            Constraint::Min(8),              // Form and article
            Constraint::Length(logs_height), // Diagnostics
            Constraint::Length(1),           // Word count / notices
            Constraint::Length(1),           // Hints
        ])
        .areas(area);

        let [form, article] = if body.width >= SIDE_BY_SIDE_MIN_WIDTH {
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(body)
        } else {
            Layout::vertical([Constraint::Percentage(60), Constraint::Percentage(40)]).areas(body)
        };

        MainLayout {
            header,
            form,
            article,
            logs,
            status,
            hints,
        }
    }

    fn render_header(frame: &mut Frame, area: Rect) {
        let lines = vec![
            Line::from(Span::styled(TITLE, theme::text_style().add_modifier(Modifier::BOLD))).centered(),
            Line::from(Span::styled(SUBTITLE, theme::text_muted())).centered(),
        ];
        frame.render_widget(Paragraph::new(lines), area);
    }

    fn render_status(frame: &mut Frame, area: Rect, app: &App) {
        let line = if let Some(notice) = app.notice.as_ref() {
            Line::from(Span::styled(notice.text.clone(), theme::ok_style()))
        } else {
            let words = app.form.word_count();
            let count_style = if words > WORD_GUIDELINE { theme::warn_style() } else { theme::text_muted() };
            Line::from(vec![
                Span::styled(format!(" Words: {words} / {WORD_GUIDELINE}  "), count_style),
                Span::styled(USAGE_NOTE, theme::warn_style()),
            ])
        };
        frame.render_widget(Paragraph::new(line), area);
    }
}

impl Component for MainView {
    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        let control = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('g') if control => return app.update(&Msg::Submit),
            KeyCode::Char('y') if control => return app.update(&Msg::CopyArticle),
            KeyCode::Char('l') if control => {
                app.logs.toggle_visible();
                return Vec::new();
            }
            KeyCode::Tab | KeyCode::Down => {
                app.cycle_focus(true);
                return Vec::new();
            }
            KeyCode::BackTab | KeyCode::Up => {
                app.cycle_focus(false);
                return Vec::new();
            }
            KeyCode::PageUp | KeyCode::PageDown => return self.article_view.handle_key_events(app, key),
            _ => {}
        }

        match app.focus {
            FocusTarget::Field(_) | FocusTarget::GenerateButton => self.form_view.handle_key_events(app, key),
            FocusTarget::CopyButton | FocusTarget::GenerateNewButton => self.article_view.handle_key_events(app, key),
        }
    }

    fn handle_mouse_events(&mut self, app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
        let mut effects = self.form_view.handle_mouse_events(app, mouse);
        effects.extend(self.article_view.handle_mouse_events(app, mouse));
        effects
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, app: &mut App) {
        let layout = self.get_preferred_layout(app, area);

        Self::render_header(frame, layout.header);
        self.form_view.render(frame, layout.form, app);
        self.article_view.render(frame, layout.article, app);
        if app.logs.is_visible {
            self.logs_view.render(frame, layout.logs, app);
        }
        Self::render_status(frame, layout.status, app);

        let mut hint_spans = match app.focus {
            FocusTarget::Field(_) | FocusTarget::GenerateButton => self.form_view.get_hint_spans(app),
            FocusTarget::CopyButton | FocusTarget::GenerateNewButton => self.article_view.get_hint_spans(app),
        };
        hint_spans.extend(self.get_hint_spans(app));
        frame.render_widget(Paragraph::new(Line::from(hint_spans)).style(theme::text_muted()), layout.hints);
    }

    fn get_hint_spans(&self, _app: &App) -> Vec<Span<'static>> {
        theme::build_hint_spans(&[
            (" Ctrl+G", " generate "),
            (" Ctrl+Y", " copy "),
            (" Ctrl+L", " logs "),
            (" Ctrl+C", " quit "),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::build_app;
    use quill_types::{Article, ExecOutcome};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for row in 0..buffer.area.height {
            for column in 0..buffer.area.width {
                text.push_str(buffer[(column, row)].symbol());
            }
            text.push('\n');
        }
        text
    }

    fn draw(terminal: &mut Terminal<TestBackend>, view: &mut MainView, app: &mut App) {
        terminal.draw(|frame| view.render(frame, frame.area(), app)).expect("draw");
    }

    #[test]
    fn renders_form_article_and_loading_state() {
        let mut app = build_app();
        let mut view = MainView::default();
        let mut terminal = Terminal::new(TestBackend::new(120, 50)).expect("terminal");

        draw(&mut terminal, &mut view, &mut app);
        let idle = screen_text(&terminal);
        assert!(idle.contains("Article Creation Assistant"));
        assert!(idle.contains("What is the main topic of your article?"));
        assert!(idle.contains("Generate Article"));
        assert!(idle.contains("Generate New"));
        assert!(!idle.contains("Loading..."));

        app.update(&Msg::Submit);
        draw(&mut terminal, &mut view, &mut app);
        assert!(screen_text(&terminal).contains("Loading..."));

        app.update(&Msg::ExecCompleted(Box::new(ExecOutcome::ArticleReady {
            request_id: 1,
            article: Article::from_content("Hello world"),
        })));
        draw(&mut terminal, &mut view, &mut app);
        let done = screen_text(&terminal);
        assert!(done.contains("Hello world"));
        assert!(!done.contains("Loading..."));
    }

    #[test]
    fn global_shortcuts_reach_the_app() {
        let mut app = build_app();
        let mut view = MainView::default();
        app.article = Some(Article::from_content("Hello world"));

        let copy = view.handle_key_events(&mut app, KeyEvent::new(KeyCode::Char('y'), KeyModifiers::CONTROL));
        assert_eq!(copy, vec![Effect::CopyToClipboardRequested("Hello world".into())]);

        let generate = view.handle_key_events(&mut app, KeyEvent::new(KeyCode::Char('g'), KeyModifiers::CONTROL));
        assert!(matches!(generate.as_slice(), [Effect::GenerateArticle { .. }]));

        view.handle_key_events(&mut app, KeyEvent::new(KeyCode::Char('l'), KeyModifiers::CONTROL));
        assert!(!app.logs.is_visible);
    }
}

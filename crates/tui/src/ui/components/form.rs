//! Article details form: the ten questions plus the "Generate Article" button.
//!
//! Each field takes three rows (question, value, spacer). The list scrolls so
//! the focused field stays visible on short terminals.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use quill_types::{Effect, FieldId, FieldKind, Msg, fold_line_breaks};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::app::{App, FocusTarget};
use crate::theme;
use crate::ui::components::common::TextEditor;
use crate::ui::components::component::Component;

const ROWS_PER_FIELD: u16 = 3;
const VALUE_PREFIX: &str = "› ";
const UNSET_CHOICE: &str = "Select an option";

#[derive(Debug, Default)]
pub struct FormComponent {
    fields_area: Rect,
    button_area: Rect,
    scroll: u16,
}

impl FormComponent {
    /// Apply a key to the focused field. Returns `true` when the key was used.
    fn edit_field(app: &mut App, field: FieldId, key: KeyEvent) -> bool {
        match field.kind() {
            FieldKind::Choice => match key.code {
                KeyCode::Right | KeyCode::Char(' ') => {
                    app.form.cycle_option(field, true);
                    true
                }
                KeyCode::Left => {
                    app.form.cycle_option(field, false);
                    true
                }
                _ => false,
            },
            FieldKind::Text => {
                let App { form, cursor, .. } = app;
                let Some(value) = form.text_mut(field) else {
                    return false;
                };
                let mut editor = TextEditor::new(value, cursor);
                match key.code {
                    KeyCode::Char(c) if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => editor.insert_char(c),
                    KeyCode::Backspace => editor.backspace(),
                    KeyCode::Delete => editor.delete(),
                    KeyCode::Left => editor.move_left(),
                    KeyCode::Right => editor.move_right(),
                    KeyCode::Home => editor.move_home(),
                    KeyCode::End => editor.move_end(),
                    _ => return false,
                }
                true
            }
        }
    }

    /// Adjust the scroll offset so the focused field is fully visible.
    fn ensure_visible(&mut self, app: &App, viewport_height: u16) {
        let FocusTarget::Field(field) = app.focus else {
            return;
        };
        let index = FieldId::ALL.iter().position(|candidate| *candidate == field).unwrap_or(0) as u16;
        let top = index * ROWS_PER_FIELD;
        let bottom = top + ROWS_PER_FIELD - 1;
        if top < self.scroll {
            self.scroll = top;
        } else if bottom >= self.scroll + viewport_height {
            self.scroll = bottom + 1 - viewport_height.max(1);
        }
    }

    fn field_at_row(&self, row: u16) -> Option<FieldId> {
        let offset = row.checked_sub(self.fields_area.y)? + self.scroll;
        FieldId::ALL.get(usize::from(offset / ROWS_PER_FIELD)).copied()
    }
}

impl Component for FormComponent {
    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        match app.focus {
            FocusTarget::GenerateButton if matches!(key.code, KeyCode::Enter | KeyCode::Char(' ')) => app.update(&Msg::Submit),
            FocusTarget::Field(field) => {
                if !Self::edit_field(app, field, key) && key.code == KeyCode::Enter {
                    app.cycle_focus(true);
                }
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    fn handle_mouse_events(&mut self, app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return Vec::new();
        }
        let position = Position::new(mouse.column, mouse.row);
        if self.button_area.contains(position) {
            app.set_focus(FocusTarget::GenerateButton);
            return app.update(&Msg::Submit);
        }
        if self.fields_area.contains(position)
            && let Some(field) = self.field_at_row(mouse.row)
        {
            app.set_focus(FocusTarget::Field(field));
        }
        Vec::new()
    }

    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App) {
        let form_focused = matches!(app.focus, FocusTarget::Field(_) | FocusTarget::GenerateButton);
        let block = Block::bordered()
            .borders(Borders::ALL)
            .border_style(theme::border_style(form_focused))
            .title(Span::styled(" Article Details ", theme::title_style()));
        let inner = block.inner(rect);
        frame.render_widget(block, rect);

        let [fields_area, button_area] = Layout::vertical([Constraint::Min(1), Constraint::Length(3)]).areas(inner);
        self.fields_area = fields_area;
        self.button_area = button_area;
        self.ensure_visible(app, fields_area.height);

        let value_width = usize::from(fields_area.width).saturating_sub(VALUE_PREFIX.width());
        let mut lines: Vec<Line> = Vec::with_capacity(FieldId::ALL.len() * usize::from(ROWS_PER_FIELD));
        let mut cursor_row: Option<(u16, u16)> = None;

        for field in FieldId::ALL {
            let focused = app.focus == FocusTarget::Field(field);
            lines.push(Line::from(Span::styled(field.question(), theme::title_style())));

            let value_style = if focused { theme::highlight_style() } else { theme::text_style() };
            let value_line = match field.kind() {
                FieldKind::Text => {
                    let text = app.form.text(field).unwrap_or_default();
                    let cursor = if focused { floor_char_boundary(text, app.cursor) } else { 0 };
                    let (visible, cursor_col) = visible_window(text, cursor, value_width);
                    if focused {
                        cursor_row = Some((lines.len() as u16, (VALUE_PREFIX.width() + cursor_col) as u16));
                    }
                    Line::from(vec![Span::styled(VALUE_PREFIX, theme::text_muted()), Span::styled(visible.to_string(), value_style)])
                }
                FieldKind::Choice => {
                    let labels = field.option_labels();
                    let selected = app.form.selected_option(field).and_then(|index| labels.get(index).copied());
                    let (label, style) = match selected {
                        Some(label) => (label, value_style),
                        None => (UNSET_CHOICE, theme::text_muted()),
                    };
                    let arrow_style = if focused { theme::title_style().fg(theme::ACCENT) } else { theme::text_muted() };
                    Line::from(vec![
                        Span::styled(VALUE_PREFIX, theme::text_muted()),
                        Span::styled("◀ ", arrow_style),
                        Span::styled(label, style),
                        Span::styled(" ▶", arrow_style),
                    ])
                }
            };
            lines.push(value_line);
            lines.push(Line::default());
        }

        frame.render_widget(Paragraph::new(lines).scroll((self.scroll, 0)), fields_area);

        if let Some((row, column)) = cursor_row
            && row >= self.scroll
            && row - self.scroll < fields_area.height
        {
            frame.set_cursor_position(Position::new(fields_area.x + column.min(fields_area.width.saturating_sub(1)), fields_area.y + row - self.scroll));
        }

        theme::render_button(
            frame,
            button_area,
            "Generate Article",
            theme::BUTTON_PRIMARY,
            app.focus == FocusTarget::GenerateButton,
        );
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'static>> {
        match app.focus {
            FocusTarget::Field(field) if field.kind() == FieldKind::Choice => theme::build_hint_spans(&[(" ←/→", " choose "), (" Tab", " next ")]),
            FocusTarget::Field(_) => theme::build_hint_spans(&[(" Type", " to edit "), (" Enter/Tab", " next ")]),
            _ => theme::build_hint_spans(&[(" Enter", " generate "), (" Tab", " next ")]),
        }
    }
}

/// Insert pasted text into the focused text field, if any.
///
/// Inputs are single-line, so line breaks in the paste fold to spaces.
pub(crate) fn paste_into_focused_field(app: &mut App, text: &str) {
    let FocusTarget::Field(field) = app.focus else {
        return;
    };
    let App { form, cursor, .. } = app;
    if let Some(value) = form.text_mut(field) {
        TextEditor::new(value, cursor).insert_str(&fold_line_breaks(text));
    }
}

fn floor_char_boundary(text: &str, index: usize) -> usize {
    let mut index = index.min(text.len());
    while !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}

/// Slice of `text` that fits in `width` columns while keeping the cursor in
/// view, plus the cursor's column within that slice.
fn visible_window(text: &str, cursor: usize, width: usize) -> (&str, usize) {
    let mut start = 0;
    let limit = width.saturating_sub(1);
    while text[start..cursor].width() > limit {
        let step = text[start..].chars().next().map(char::len_utf8).unwrap_or(1);
        start += step;
    }
    let cursor_col = text[start..cursor].width();

    let mut end = start;
    let mut used = 0;
    for ch in text[start..].chars() {
        let ch_width = ch.width().unwrap_or(0);
        if used + ch_width > width {
            break;
        }
        used += ch_width;
        end += ch.len_utf8();
    }
    (&text[start..end], cursor_col)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::build_app;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn typing_edits_the_focused_field() {
        let mut app = build_app();
        let mut form = FormComponent::default();
        for c in "Cats".chars() {
            form.handle_key_events(&mut app, key(KeyCode::Char(c)));
        }
        form.handle_key_events(&mut app, key(KeyCode::Backspace));
        assert_eq!(app.form.topic, "Cat");
        assert_eq!(app.cursor, 3);
    }

    #[test]
    fn arrows_cycle_choice_fields() {
        let mut app = build_app();
        let mut form = FormComponent::default();
        app.set_focus(FocusTarget::Field(FieldId::Tone));
        form.handle_key_events(&mut app, key(KeyCode::Right));
        assert_eq!(app.form.selected_option(FieldId::Tone), Some(0));
        form.handle_key_events(&mut app, key(KeyCode::Left));
        form.handle_key_events(&mut app, key(KeyCode::Left));
        assert_eq!(app.form.selected_option(FieldId::Tone), Some(1));
    }

    #[test]
    fn enter_on_text_field_advances_focus() {
        let mut app = build_app();
        let mut form = FormComponent::default();
        form.handle_key_events(&mut app, key(KeyCode::Enter));
        assert_eq!(app.focus, FocusTarget::Field(FieldId::Audience));
    }

    #[test]
    fn enter_on_generate_button_submits() {
        let mut app = build_app();
        let mut form = FormComponent::default();
        app.set_focus(FocusTarget::GenerateButton);
        let effects = form.handle_key_events(&mut app, key(KeyCode::Enter));
        assert!(matches!(effects.as_slice(), [Effect::GenerateArticle { .. }]));
        assert!(app.loading);
    }

    #[test]
    fn paste_lands_in_text_fields_only() {
        let mut app = build_app();
        paste_into_focused_field(&mut app, "Cats and dogs");
        assert_eq!(app.form.topic, "Cats and dogs");

        app.set_focus(FocusTarget::Field(FieldId::Tone));
        paste_into_focused_field(&mut app, "ignored");
        assert_eq!(app.form.tone, None);
    }

    #[test]
    fn multi_line_paste_stays_on_one_line() {
        let mut app = build_app();
        paste_into_focused_field(&mut app, "Cats\r\nand\n\ndogs");
        assert_eq!(app.form.topic, "Cats and dogs");
        assert_eq!(app.cursor, "Cats and dogs".len());
    }

    #[test]
    fn window_keeps_cursor_visible() {
        assert_eq!(visible_window("hello", 5, 10), ("hello", 5));
        let (visible, column) = visible_window("abcdefghij", 10, 4);
        assert_eq!(visible, "hij");
        assert_eq!(column, 3);
    }
}

//! UTF-8 safe text editing over a borrowed buffer.
//!
//! Form values live in `FormState`, so the editor borrows the focused field's
//! `String` together with the form's cursor instead of owning a copy. The
//! cursor is a byte index that always sits on a UTF-8 boundary.

#[derive(Debug)]
pub struct TextEditor<'a> {
    /// The underlying text buffer
    input: &'a mut String,
    /// Cursor byte index into `input`
    cursor: &'a mut usize,
}

impl<'a> TextEditor<'a> {
    /// Wrap a buffer, clamping the cursor onto a valid boundary.
    pub fn new(input: &'a mut String, cursor: &'a mut usize) -> Self {
        let mut clamped = (*cursor).min(input.len());
        while !input.is_char_boundary(clamped) {
            clamped -= 1;
        }
        *cursor = clamped;
        Self { input, cursor }
    }

    /// Move cursor one Unicode scalar to the left.
    pub fn move_left(&mut self) {
        if *self.cursor == 0 {
            return;
        }
        let prev_len = self.input[..*self.cursor].chars().last().map(|c| c.len_utf8()).unwrap_or(1);
        *self.cursor = self.cursor.saturating_sub(prev_len);
    }

    /// Move cursor one Unicode scalar to the right.
    pub fn move_right(&mut self) {
        if *self.cursor >= self.input.len() {
            return;
        }
        if let Some(next) = self.input[*self.cursor..].chars().next() {
            *self.cursor = self.cursor.saturating_add(next.len_utf8());
        }
    }

    pub fn move_home(&mut self) {
        *self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        *self.cursor = self.input.len();
    }

    /// Insert a char at the cursor.
    pub fn insert_char(&mut self, c: char) {
        self.input.insert(*self.cursor, c);
        *self.cursor += c.len_utf8();
    }

    /// Insert a pasted string at the cursor.
    pub fn insert_str(&mut self, text: &str) {
        self.input.insert_str(*self.cursor, text);
        *self.cursor += text.len();
    }

    /// Backspace the char immediately before the cursor.
    pub fn backspace(&mut self) {
        if *self.cursor == 0 {
            return;
        }
        let prev = self.input[..*self.cursor].chars().last().map(|c| c.len_utf8()).unwrap_or(1);
        let start = *self.cursor - prev;
        self.input.drain(start..*self.cursor);
        *self.cursor = start;
    }

    /// Delete the char under the cursor.
    pub fn delete(&mut self) {
        if let Some(next) = self.input[*self.cursor..].chars().next() {
            let end = *self.cursor + next.len_utf8();
            self.input.drain(*self.cursor..end);
        }
    }
}

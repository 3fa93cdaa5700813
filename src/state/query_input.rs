//! Query field editing (pure state transitions).
//!
//! All functions take the current input by value and return the next one,
//! testable without a terminal. The cursor counts characters, not bytes.

/// Text of the query field plus cursor position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryInput {
    text: String,
    cursor: usize,
}

impl QueryInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Input pre-filled with `text`, cursor at the end.
    pub fn with_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.chars().count();
        Self { text, cursor }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Cursor position in characters.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn byte_offset(&self, char_index: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }
}

/// Insert `ch` at the cursor and advance it.
pub fn handle_char_input(mut input: QueryInput, ch: char) -> QueryInput {
    let at = input.byte_offset(input.cursor);
    input.text.insert(at, ch);
    input.cursor += 1;
    input
}

/// Delete the character before the cursor. No-op at position 0.
pub fn handle_backspace(mut input: QueryInput) -> QueryInput {
    if input.cursor == 0 {
        return input;
    }
    let at = input.byte_offset(input.cursor - 1);
    input.text.remove(at);
    input.cursor -= 1;
    input
}

/// Move the cursor left, saturating at 0.
pub fn handle_cursor_left(mut input: QueryInput) -> QueryInput {
    input.cursor = input.cursor.saturating_sub(1);
    input
}

/// Move the cursor right, saturating at the end of the text.
pub fn handle_cursor_right(mut input: QueryInput) -> QueryInput {
    let max_cursor = input.text.chars().count();
    input.cursor = (input.cursor + 1).min(max_cursor);
    input
}

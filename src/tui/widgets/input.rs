/// Single-line text field used by the login and task forms.
///
/// The cursor is a character index, not a byte offset, so multi-byte input
/// edits cleanly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Input {
    value: String,
    cursor: usize,
    masked: bool,
}

impl Input {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_string(value: &str) -> Self {
        Self {
            value: value.to_string(),
            cursor: value.chars().count(),
            masked: false,
        }
    }

    /// A field whose contents render as `*`
    pub fn masked() -> Self {
        Self {
            masked: true,
            ..Self::default()
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Text as it should appear on screen
    pub fn display(&self) -> String {
        if self.masked {
            "*".repeat(self.value.chars().count())
        } else {
            self.value.clone()
        }
    }

    pub fn insert_char(&mut self, ch: char) {
        let idx = self.byte_index(self.cursor);
        self.value.insert(idx, ch);
        self.cursor += 1;
    }

    /// Delete the character before the cursor
    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let idx = self.byte_index(self.cursor);
        self.value.remove(idx);
    }

    /// Delete the character under the cursor
    pub fn delete(&mut self) {
        if self.cursor < self.value.chars().count() {
            let idx = self.byte_index(self.cursor);
            self.value.remove(idx);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.value.chars().count());
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.value.chars().count();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    fn byte_index(&self, char_idx: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_idx)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edits_at_cursor() {
        let mut input = Input::from_string("ac");
        input.move_left();
        input.insert_char('b');
        assert_eq!(input.value(), "abc");
        input.move_end();
        input.backspace();
        assert_eq!(input.value(), "ab");
        input.move_home();
        input.delete();
        assert_eq!(input.value(), "b");
        assert_eq!(input.cursor(), 0);
    }

    #[test]
    fn handles_multibyte_characters() {
        let mut input = Input::from_string("café");
        input.backspace();
        input.insert_char('é');
        input.insert_char('!');
        assert_eq!(input.value(), "café!");
        assert_eq!(input.cursor(), 5);
    }

    #[test]
    fn masked_display_hides_value() {
        let mut input = Input::masked();
        for c in "pass".chars() {
            input.insert_char(c);
        }
        assert_eq!(input.display(), "****");
        assert_eq!(input.value(), "pass");
    }
}

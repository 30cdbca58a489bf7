//! The numeric literal currently being typed, not yet committed to the stack.

use std::fmt;

const EMPTY: &str = "0";

/// In-progress numeric input.
///
/// Content collapses to `"0"` whenever it becomes empty. Malformed intermediate text
/// (a lone `.`, two dots) is tolerated here and only rejected by [`InputBuffer::parse`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputBuffer {
    text: String,
}

impl Default for InputBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl InputBuffer {
    pub fn new() -> Self {
        Self {
            text: EMPTY.to_string(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// True when the buffer holds something other than the reset sentinel.
    pub fn is_pending(&self) -> bool {
        self.text != EMPTY
    }

    /// Appends a digit or `.`. A buffer holding exactly `"0"` is replaced instead.
    pub fn append(self, token: char) -> Self {
        let previous = self.text;
        let mut next = previous.clone();
        next.push(token);
        Self::normalized(&previous, next)
    }

    /// Removes the last character.
    pub fn backspace(self) -> Self {
        let mut text = self.text;
        text.pop();
        Self::from_text(text)
    }

    pub fn clear(self) -> Self {
        Self::new()
    }

    /// Replaces the whole content, as the editable text field does.
    ///
    /// Same rule as [`append`](Self::append): if the buffer was `"0"` and the new text
    /// is that `"0"` with more typed after it, the leading `"0"` is dropped.
    pub fn replace(self, text: &str) -> Self {
        Self::normalized(&self.text, text.to_string())
    }

    /// Strict literal parse: optional sign at position 0, digits, at most one `.`,
    /// at least one digit, finite result.
    pub fn parse(&self) -> Option<f64> {
        parse_literal(&self.text)
    }

    fn normalized(previous: &str, next: String) -> Self {
        if previous == EMPTY && next.len() > EMPTY.len() && next.starts_with(EMPTY) {
            return Self::from_text(next[EMPTY.len()..].to_string());
        }
        Self::from_text(next)
    }

    fn from_text(text: String) -> Self {
        if text.is_empty() {
            Self::new()
        } else {
            Self { text }
        }
    }
}

impl fmt::Display for InputBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

fn parse_literal(text: &str) -> Option<f64> {
    let body = text
        .strip_prefix('-')
        .or_else(|| text.strip_prefix('+'))
        .unwrap_or(text);

    let mut digits = 0usize;
    let mut dots = 0usize;
    for c in body.chars() {
        match c {
            '0'..='9' => digits += 1,
            '.' => dots += 1,
            _ => return None,
        }
    }
    if digits == 0 || dots > 1 {
        return None;
    }

    text.parse::<f64>().ok().filter(|v| v.is_finite())
}

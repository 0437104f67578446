//! Character cursor over the source text, plus trivia skipping.
//!
//! The cursor is the only place that touches raw indices. Every read is
//! bounds-checked: running off the end yields `None` or an empty slice, never
//! a panic. Positions count `char`s, not bytes.

/// A read position over a decoded source text.
#[derive(Debug, Clone)]
pub struct Cursor {
    chars: Vec<char>,
    pos: usize,
}

impl Cursor {
    pub fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
            pos: 0,
        }
    }

    /// Current position, in characters from the start of the text.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Move to an absolute position (clamped to the end of the text).
    pub fn set_position(&mut self, pos: usize) {
        self.pos = pos.min(self.chars.len());
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn is_at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }

    /// The character under the cursor, or `None` at end of input.
    pub fn current(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    /// The character right before the cursor.
    pub fn previous(&self) -> Option<char> {
        self.pos.checked_sub(1).and_then(|i| self.chars.get(i).copied())
    }

    /// The character `offset` positions ahead of the cursor.
    pub fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    /// Up to `n` characters starting at the cursor (fewer near the end).
    pub fn peek(&self, n: usize) -> &[char] {
        let end = (self.pos + n).min(self.chars.len());
        &self.chars[self.pos.min(end)..end]
    }

    pub fn starts_with(&self, token: &str) -> bool {
        let mut ahead = self.chars[self.pos.min(self.chars.len())..].iter();
        token.chars().all(|c| ahead.next() == Some(&c))
    }

    /// Like [`starts_with`](Self::starts_with), but the token must not run
    /// straight into more identifier characters (`true` matches, `trueish` does not).
    pub fn starts_with_word(&self, word: &str) -> bool {
        self.starts_with(word)
            && !self
                .peek_at(word.chars().count())
                .is_some_and(is_identifier_part)
    }

    pub fn advance(&mut self) {
        self.advance_by(1);
    }

    pub fn advance_by(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.chars.len());
    }

    /// Collect the characters in `start..end` into a `String`.
    pub fn slice(&self, start: usize, end: usize) -> String {
        let end = end.min(self.chars.len());
        self.chars[start.min(end)..end].iter().collect()
    }

    /// Consume whitespace, `//` line comments and `/* */` block comments until
    /// the cursor rests on meaningful content (or the end of input).
    ///
    /// Block comments do not nest; an unterminated one runs to end of input.
    pub fn skip_trivia(&mut self) {
        loop {
            match self.current() {
                Some(c) if is_whitespace(c) => self.advance(),
                Some('/') if self.starts_with("//") => {
                    while self.current().is_some_and(|c| c != '\n') {
                        self.advance();
                    }
                }
                Some('/') if self.starts_with("/*") => {
                    self.advance_by(2);
                    while !self.is_at_end() && !self.starts_with("*/") {
                        self.advance();
                    }
                    self.advance_by(2);
                }
                _ => return,
            }
        }
    }

    /// Read a bare identifier (`[A-Za-z_$][A-Za-z0-9_$]*`, Unicode letters allowed).
    pub fn read_identifier(&mut self) -> Option<String> {
        self.skip_trivia();
        if !self.current().is_some_and(is_identifier_start) {
            return None;
        }
        let start = self.pos;
        while self.current().is_some_and(is_identifier_part) {
            self.advance();
        }
        Some(self.slice(start, self.pos))
    }
}

pub(crate) fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}

pub(crate) fn is_identifier_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

pub(crate) fn is_identifier_part(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

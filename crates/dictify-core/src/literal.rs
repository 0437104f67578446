//! Token readers for scalar literals and object keys.
//!
//! Each reader expects the cursor to sit on the first character of its token
//! and returns `None` when the token is not a supported literal. The number
//! and key readers restore the cursor on failure; the string reader only fails
//! at end of input, where there is nothing left to restore to.

use crate::cursor::{is_identifier_start, Cursor};
use crate::types::{Key, Value};

/// A numeric literal, typed by its written form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Integer(i64),
    Float(f64),
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        match n {
            Number::Integer(i) => Value::Integer(i),
            Number::Float(f) => Value::Float(f),
        }
    }
}

const RADIX_PREFIXES: [(char, u32); 3] = [('x', 16), ('b', 2), ('o', 8)];

impl Cursor {
    /// Read a `"..."` or `'...'` string literal.
    ///
    /// Recognized escapes are `\n \t \r \\ \" \'`; any other escaped character
    /// stands for itself (`\u0041` reads as `u0041`).
    pub fn read_string(&mut self) -> Option<String> {
        let quote = self.current().filter(|c| matches!(c, '"' | '\''))?;
        self.advance();

        let mut out = String::new();
        while let Some(c) = self.current() {
            self.advance();
            match c {
                '\\' => {
                    let escaped = self.current()?;
                    self.advance();
                    out.push(unescape(escaped));
                }
                c if c == quote => return Some(out),
                c => out.push(c),
            }
        }
        None
    }

    /// Read a number: optional `-`, then a `0x`/`0b`/`0o` radix integer or a
    /// decimal with optional fraction and exponent.
    ///
    /// Decimal literals without `.` or exponent are integers; integers too large
    /// for `i64` fall back to a float. On failure the cursor is left where it was.
    pub fn read_number(&mut self) -> Option<Number> {
        let start = self.position();
        let number = self.scan_number(start);
        if number.is_none() {
            self.set_position(start);
        }
        number
    }

    fn scan_number(&mut self, start: usize) -> Option<Number> {
        let negative = self.current() == Some('-');
        if negative {
            self.advance();
            if !self.current().is_some_and(|c| c.is_ascii_digit() || c == '.') {
                return None;
            }
        }

        if let Some(radix) = self.radix_prefix() {
            self.advance_by(2);
            let digits_start = self.position();
            while self.current().is_some_and(|c| c.is_digit(radix)) {
                self.advance();
            }
            let digits = self.slice(digits_start, self.position());
            if digits.is_empty() {
                return None;
            }
            let signed = if negative { format!("-{digits}") } else { digits };
            return i64::from_str_radix(&signed, radix).ok().map(Number::Integer);
        }

        let mut has_digit = self.skip_digits();
        let mut is_float = false;

        if self.current() == Some('.') {
            is_float = true;
            self.advance();
            has_digit |= self.skip_digits();
        }

        if matches!(self.current(), Some('e' | 'E')) {
            is_float = true;
            self.advance();
            if matches!(self.current(), Some('+' | '-')) {
                self.advance();
            }
            if !self.skip_digits() {
                return None;
            }
        }

        if !has_digit {
            return None;
        }

        let text = self.slice(start, self.position());
        if !is_float {
            if let Ok(n) = text.parse::<i64>() {
                return Some(Number::Integer(n));
            }
        }
        let f: f64 = text.parse().ok()?;
        f.is_finite().then_some(Number::Float(f))
    }

    fn radix_prefix(&self) -> Option<u32> {
        if self.current() != Some('0') {
            return None;
        }
        let marker = self.peek_at(1)?.to_ascii_lowercase();
        RADIX_PREFIXES
            .iter()
            .find(|(prefix, _)| *prefix == marker)
            .map(|(_, radix)| *radix)
    }

    /// Consume a run of ASCII digits, reporting whether there was at least one.
    fn skip_digits(&mut self) -> bool {
        let start = self.position();
        while self.current().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
        self.position() > start
    }

    /// Read an object member key: a quoted string, a bare identifier, or a
    /// non-negative integer. Computed keys (`[expr]`) are rejected.
    pub fn read_key(&mut self) -> Option<Key> {
        self.skip_trivia();
        match self.current()? {
            '"' | '\'' => self.read_string().map(Key::Str),
            '[' => None,
            c if c.is_ascii_digit() => match self.read_number()? {
                Number::Integer(n) => u64::try_from(n).ok().map(Key::Index),
                Number::Float(_) => None,
            },
            c if is_identifier_start(c) => self.read_identifier().map(Key::Str),
            _ => None,
        }
    }
}

fn unescape(c: char) -> char {
    match c {
        'n' => '\n',
        't' => '\t',
        'r' => '\r',
        other => other,
    }
}

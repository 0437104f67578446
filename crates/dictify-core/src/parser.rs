//! Structure parser: turns `{...}` and `[...]` literals into [`Value`] trees.
//!
//! The parser never errors. A member that is not pure data (identifier,
//! call, arrow function, spread, computed key, template or regex literal) is
//! dropped and the parser resynchronizes on the next member boundary of the
//! same container via [`recover`](Parser::recover). A container that runs off
//! the end of the input yields nothing at all.
//!
//! # Depth counters
//!
//! [`DepthCounters`] tracks how many `{` and `[` are open anywhere in the
//! current parse, including inside skipped regions. Recovery compares against
//! a snapshot of these counters to tell the closer of the container it is
//! recovering in apart from a same-character closer of skipped code. Every
//! structure holds a [`DepthGuard`] for its own level, so the counter is
//! released on every exit path.

use crate::cursor::{is_identifier_part, is_whitespace, Cursor};
use crate::recovery::Resync;
use crate::types::{Key, Object, Value};
use std::cell::Cell;
use tracing::trace;

const DECLARATION_KEYWORDS: [&str; 3] = ["const", "let", "var"];

/// Deepest `{`/`[` nesting a parse may reach. A structure that would open one
/// more level is dropped like any other unsupported member.
pub const MAX_DEPTH: usize = 128;

/// Literal keywords accepted in value position.
static KEYWORDS: [(&str, Value); 3] = [
    ("true", Value::Bool(true)),
    ("false", Value::Bool(false)),
    ("null", Value::Null),
];

/// The two container kinds the parser builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Container {
    Object,
    Array,
}

impl Container {
    pub fn from_opener(c: char) -> Option<Self> {
        match c {
            '{' => Some(Container::Object),
            '[' => Some(Container::Array),
            _ => None,
        }
    }

    pub fn from_closer(c: char) -> Option<Self> {
        match c {
            '}' => Some(Container::Object),
            ']' => Some(Container::Array),
            _ => None,
        }
    }

    pub fn closer(self) -> char {
        match self {
            Container::Object => '}',
            Container::Array => ']',
        }
    }
}

/// Open brace/bracket counts for one parse. Never negative.
#[derive(Debug, Default)]
pub struct DepthCounters {
    brace: Cell<usize>,
    bracket: Cell<usize>,
}

impl DepthCounters {
    pub fn brace(&self) -> usize {
        self.brace.get()
    }

    pub fn bracket(&self) -> usize {
        self.bracket.get()
    }

    pub fn get(&self, kind: Container) -> usize {
        self.cell(kind).get()
    }

    pub(crate) fn open(&self, kind: Container) {
        let cell = self.cell(kind);
        cell.set(cell.get() + 1);
    }

    pub(crate) fn close(&self, kind: Container) {
        let cell = self.cell(kind);
        cell.set(cell.get().saturating_sub(1));
    }

    fn cell(&self, kind: Container) -> &Cell<usize> {
        match kind {
            Container::Object => &self.brace,
            Container::Array => &self.bracket,
        }
    }
}

/// Holds one level of a container's depth counter; releases it on drop.
struct DepthGuard<'d> {
    counters: &'d DepthCounters,
    kind: Container,
}

impl<'d> DepthGuard<'d> {
    fn enter(counters: &'d DepthCounters, kind: Container) -> Self {
        counters.open(kind);
        Self { counters, kind }
    }
}

impl Drop for DepthGuard<'_> {
    fn drop(&mut self) {
        self.counters.close(self.kind);
    }
}

/// Restores both counters to their entry values on drop, so a top-level
/// operation leaves no depth behind whatever the input looked like.
struct DepthScope<'d> {
    counters: &'d DepthCounters,
    brace: usize,
    bracket: usize,
}

impl<'d> DepthScope<'d> {
    fn enter(counters: &'d DepthCounters) -> Self {
        Self {
            counters,
            brace: counters.brace(),
            bracket: counters.bracket(),
        }
    }
}

impl Drop for DepthScope<'_> {
    fn drop(&mut self) {
        self.counters.brace.set(self.brace);
        self.counters.bracket.set(self.bracket);
    }
}

/// What the structure loop does after a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Next,
    Close,
}

enum Members {
    Object(Object),
    Array(Vec<Value>),
}

impl Members {
    fn new(kind: Container) -> Self {
        match kind {
            Container::Object => Members::Object(Object::new()),
            Container::Array => Members::Array(Vec::new()),
        }
    }

    fn into_value(self) -> Value {
        match self {
            Members::Object(object) => Value::Object(object),
            Members::Array(items) => Value::Array(items),
        }
    }
}

/// A literal miner over one source text.
///
/// The parser owns its cursor and borrows the depth counters, which the
/// caller creates fresh for the parse:
///
/// ```
/// use dictify_core::{DepthCounters, Parser};
///
/// let depth = DepthCounters::default();
/// let mut parser = Parser::new("const cfg = { port: 8080, host: env() }", &depth);
/// let (name, value) = parser.try_parse_assignment().unwrap();
/// assert_eq!(name, "cfg");
/// assert_eq!(value.get("port").and_then(|v| v.as_i64()), Some(8080));
/// assert!(value.get("host").is_none());
/// ```
#[derive(Debug)]
pub struct Parser<'d> {
    pub(crate) cursor: Cursor,
    pub(crate) depth: &'d DepthCounters,
}

impl<'d> Parser<'d> {
    pub fn new(text: &str, depth: &'d DepthCounters) -> Self {
        Self {
            cursor: Cursor::new(text),
            depth,
        }
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn cursor_mut(&mut self) -> &mut Cursor {
        &mut self.cursor
    }

    pub fn depth(&self) -> &DepthCounters {
        self.depth
    }

    /// Parse one object or array literal at the cursor (after trivia).
    ///
    /// On success the cursor sits just past the structure. On failure its
    /// position is unspecified; callers must advance on their own.
    pub fn parse_value(&mut self) -> Option<Value> {
        let _scope = DepthScope::enter(self.depth);
        self.cursor.skip_trivia();
        self.parse_structure()
    }

    /// Match `const|let|var name [: Type] = {...}` (or `[...]`) at the cursor.
    ///
    /// On any mismatch the cursor is put back where it was, so the caller can
    /// interpret the same position another way.
    pub fn try_parse_assignment(&mut self) -> Option<(String, Value)> {
        let _scope = DepthScope::enter(self.depth);
        let saved = self.cursor.position();
        let assignment = self.match_assignment();
        if assignment.is_none() {
            self.cursor.set_position(saved);
        }
        assignment
    }

    fn match_assignment(&mut self) -> Option<(String, Value)> {
        self.cursor.skip_trivia();
        // Deliberately stricter than a bare prefix match: `xconst y = {}` is
        // not a declaration.
        if self.cursor.previous().is_some_and(is_identifier_part) {
            return None;
        }

        let keyword = DECLARATION_KEYWORDS
            .iter()
            .find(|keyword| self.cursor.starts_with(keyword))?;
        self.cursor.advance_by(keyword.len());
        if let Some(c) = self.cursor.current() {
            if !is_whitespace(c) {
                return None;
            }
        }

        let name = self.cursor.read_identifier()?;
        self.cursor.skip_trivia();

        if self.cursor.current() == Some(':') {
            self.skip_type_annotation()?;
        }
        if self.cursor.current() != Some('=') {
            return None;
        }
        self.cursor.advance();
        self.cursor.skip_trivia();

        let value = self.parse_structure()?;
        Some((name, value))
    }

    /// Skip `: Type` textually, leaving the cursor on the top-level `=`.
    fn skip_type_annotation(&mut self) -> Option<()> {
        self.recover(&['='], None)?;
        let at_equals = self.cursor.position().saturating_sub(1);
        self.cursor.set_position(at_equals);
        Some(())
    }

    /// Parse the container at the cursor, which must be on `{` or `[`.
    fn parse_structure(&mut self) -> Option<Value> {
        let kind = Container::from_opener(self.cursor.current()?)?;
        if self.depth.brace() + self.depth.bracket() >= MAX_DEPTH {
            trace!(offset = self.cursor.position(), "nesting limit reached");
            return None;
        }
        self.cursor.advance();
        let _guard = DepthGuard::enter(self.depth, kind);

        let closer = kind.closer();
        let mut members = Members::new(kind);
        loop {
            self.cursor.skip_trivia();
            match self.cursor.current() {
                Some(c) if c == closer => {
                    self.cursor.advance();
                    return Some(members.into_value());
                }
                None => return None,
                Some(_) => {}
            }

            let step = match &mut members {
                Members::Object(object) => match self.read_property() {
                    Some((key, value)) => {
                        object.insert(key, value);
                        self.finish_member(kind)
                    }
                    None => self.resync(kind),
                },
                Members::Array(items) => match self.read_value() {
                    Some(value) => {
                        items.push(value);
                        self.finish_member(kind)
                    }
                    None => self.resync(kind),
                },
            }?;

            if step == Step::Close {
                return Some(members.into_value());
            }
        }
    }

    /// `key : value`, or `None` if any part is not a supported literal.
    fn read_property(&mut self) -> Option<(Key, Value)> {
        let key = self.cursor.read_key()?;
        self.cursor.skip_trivia();
        if self.cursor.current() != Some(':') {
            return None;
        }
        self.cursor.advance();
        let value = self.read_value()?;
        Some((key, value))
    }

    /// Read one value: string, number, `true`/`false`/`null`, or a nested
    /// structure. `None` means the value is not pure data; an explicit `null`
    /// is `Some(Value::Null)`.
    pub fn read_value(&mut self) -> Option<Value> {
        self.cursor.skip_trivia();
        match self.cursor.current()? {
            '"' | '\'' => self.cursor.read_string().map(Value::String),
            '`' => None,
            c if c.is_ascii_digit() || c == '-' => self.cursor.read_number().map(Value::from),
            '{' | '[' => self.parse_structure(),
            _ => self.read_keyword(),
        }
    }

    /// Deliberately requires a word boundary: `trueValue` is an identifier
    /// and gets dropped rather than read as `true`.
    fn read_keyword(&mut self) -> Option<Value> {
        let (word, value) = KEYWORDS
            .iter()
            .find(|(word, _)| self.cursor.starts_with_word(word))?;
        self.cursor.advance_by(word.len());
        Some(value.clone())
    }

    /// After a stored member: expect `,` or the closer, else resynchronize.
    fn finish_member(&mut self, kind: Container) -> Option<Step> {
        self.cursor.skip_trivia();
        match self.cursor.current() {
            Some(',') => {
                self.cursor.advance();
                Some(Step::Next)
            }
            Some(c) if c == kind.closer() => {
                self.cursor.advance();
                Some(Step::Close)
            }
            _ => self.resync(kind),
        }
    }

    /// Drop the member under the cursor and find the next boundary of the
    /// current container. `None` means the input ended first.
    fn resync(&mut self, kind: Container) -> Option<Step> {
        let closer = kind.closer();
        let resync = self.recover(&[',', closer], Some(kind));
        trace!(
            offset = self.cursor.position(),
            ?resync,
            "skipped unsupported member"
        );
        match resync? {
            Resync::ContainerEnd => Some(Step::Close),
            Resync::Separator(c) if c == closer => Some(Step::Close),
            Resync::Separator(_) => Some(Step::Next),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(src: &str) -> Option<serde_json::Value> {
        let depth = DepthCounters::default();
        let mut parser = Parser::new(src, &depth);
        parser.parse_value().map(|v| v.to_json())
    }

    #[test]
    fn parses_nested_literals() {
        assert_eq!(
            parse("{ a: { b: [1, 'two', true, null] } }"),
            Some(json!({"a": {"b": [1, "two", true, null]}}))
        );
    }

    #[test]
    fn explicit_null_is_kept_and_failures_are_dropped() {
        assert_eq!(
            parse("{ n: null, x: undefined, y: nullish }"),
            Some(json!({"n": null}))
        );
    }

    #[test]
    fn keywords_need_a_word_boundary() {
        assert_eq!(parse("{ a: trueValue, b: true }"), Some(json!({"b": true})));
    }

    #[test]
    fn duplicate_keys_last_write_wins() {
        assert_eq!(parse("{ a: 1, b: 2, a: 3 }"), Some(json!({"a": 3, "b": 2})));
    }

    #[test]
    fn truncated_structure_yields_nothing() {
        assert_eq!(parse("{ a: 1, b: "), None);
        assert_eq!(parse("[1, 2"), None);
        assert_eq!(parse("{ a: [1, 2 }"), None);
    }

    #[test]
    fn non_structure_yields_nothing() {
        assert_eq!(parse("42"), None);
        assert_eq!(parse(""), None);
    }

    #[test]
    fn leftover_after_value_is_skipped() {
        assert_eq!(parse("{ a: 1 + 2, b: 3 }"), Some(json!({"a": 1, "b": 3})));
    }

    #[test]
    fn depth_returns_to_zero_after_success_and_failure() {
        let depth = DepthCounters::default();
        for src in ["{ a: [1, {b: 2}] }", "{ a: [1, {b: 2", "{ a: f([{ }), b: 1 }"] {
            let mut parser = Parser::new(src, &depth);
            parser.parse_value();
            assert_eq!((depth.brace(), depth.bracket()), (0, 0), "after {src:?}");
        }
    }

    #[test]
    fn guard_balances_nested_structures_without_scope() {
        let depth = DepthCounters::default();
        let mut parser = Parser::new("{ a: { b: [1] }, c: [ { } ] }", &depth);
        assert!(parser.parse_structure().is_some());
        assert_eq!((depth.brace(), depth.bracket()), (0, 0));
    }

    #[test]
    fn nesting_beyond_the_limit_is_dropped() {
        let at_limit = format!("{}{}", "[".repeat(MAX_DEPTH), "]".repeat(MAX_DEPTH));
        assert!(parse(&at_limit).is_some());

        let over = format!("{}{}", "[".repeat(MAX_DEPTH + 1), "]".repeat(MAX_DEPTH + 1));
        let value = parse(&over).unwrap();
        let mut levels = 0;
        let mut current = &value;
        while let Some(items) = current.as_array() {
            levels += 1;
            match items.first() {
                Some(inner) => current = inner,
                None => break,
            }
        }
        assert_eq!(levels, MAX_DEPTH);
        assert_eq!(parse(&"[".repeat(100_000)), None);
    }

    #[test]
    fn assignment_with_type_annotation() {
        let depth = DepthCounters::default();
        let mut parser = Parser::new(
            "const routes: Record<string, { path: string }> = { home: '/' }",
            &depth,
        );
        let (name, value) = parser.try_parse_assignment().unwrap();
        assert_eq!(name, "routes");
        assert_eq!(value.to_json(), json!({"home": "/"}));
    }

    #[test]
    fn assignment_mismatch_restores_cursor() {
        let depth = DepthCounters::default();
        for src in ["constant = { a: 1 }", "const x = 5", "let = {}", "var y = { a: "] {
            let mut parser = Parser::new(src, &depth);
            assert!(parser.try_parse_assignment().is_none(), "{src:?}");
            assert_eq!(parser.cursor().position(), 0, "{src:?}");
        }
    }

    #[test]
    fn assignment_keyword_must_start_a_word() {
        let depth = DepthCounters::default();
        let mut parser = Parser::new("xconst y = { a: 1 }", &depth);
        parser.cursor_mut().advance();
        assert!(parser.try_parse_assignment().is_none());
        assert_eq!(parser.cursor().position(), 1);
    }
}

//! Top-level driver: scan a whole source text for literal structures.
//!
//! Two modes share one loop over the same [`Parser`]:
//!
//! - [`Mode::Named`] records `const`/`let`/`var` declarations whose
//!   initializer is a literal, keyed by the declared name (last one wins).
//! - [`Mode::Anonymous`] records every top-level `{...}` (and optionally
//!   `[...]`) in source order.
//!
//! Whatever the mode, a failed match never stops the scan: the driver moves
//! one character on and tries again.

use crate::error::{DictifyError, Result};
use crate::parser::{DepthCounters, Parser};
use crate::types::{Key, Object, Value};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

/// Which structures the driver collects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Named,
    Anonymous,
}

impl FromStr for Mode {
    type Err = DictifyError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "named" => Ok(Mode::Named),
            "anonymous" => Ok(Mode::Anonymous),
            _ => Err(DictifyError::UnknownMode(s.to_string())),
        }
    }
}

/// Extraction settings.
///
/// By default only non-empty objects are kept, in either mode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractOptions {
    pub mode: Mode,
    /// Keep `{}` (and `[]`, with `include_arrays`) results.
    pub keep_empty: bool,
    /// Keep array literals as well as objects.
    pub include_arrays: bool,
}

impl ExtractOptions {
    pub fn named() -> Self {
        Self::default()
    }

    pub fn anonymous() -> Self {
        Self {
            mode: Mode::Anonymous,
            ..Self::default()
        }
    }

    pub fn keep_empty(mut self, keep: bool) -> Self {
        self.keep_empty = keep;
        self
    }

    pub fn include_arrays(mut self, include: bool) -> Self {
        self.include_arrays = include;
        self
    }

    fn accepts(&self, value: &Value) -> bool {
        match value {
            Value::Object(object) => self.keep_empty || !object.is_empty(),
            Value::Array(items) => self.include_arrays && (self.keep_empty || !items.is_empty()),
            _ => false,
        }
    }
}

/// The structures found in one source text.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Extraction {
    /// Declared name → value.
    Named(Object),
    /// Top-level literals in source order.
    Anonymous(Vec<Value>),
}

impl Extraction {
    pub fn len(&self) -> usize {
        match self {
            Extraction::Named(object) => object.len(),
            Extraction::Anonymous(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Extraction::Named(object) => object.to_json(),
            Extraction::Anonymous(values) => {
                serde_json::Value::Array(values.iter().map(Value::to_json).collect())
            }
        }
    }

    /// Serialize as a JSON string, pretty-printed or compact.
    pub fn to_json_string(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }
}

/// Extract literal structures from `source` according to `options`.
///
/// ```
/// use dictify_core::{extract, ExtractOptions, Extraction};
///
/// let src = "const a = { x: 1 }; let skip = {}; var b = { y: [true, fn()] };";
/// let Extraction::Named(found) = extract(src, &ExtractOptions::named()) else {
///     unreachable!()
/// };
/// assert_eq!(found.to_json(), serde_json::json!({"a": {"x": 1}, "b": {"y": [true]}}));
/// ```
pub fn extract(source: &str, options: &ExtractOptions) -> Extraction {
    let depth = DepthCounters::default();
    let mut parser = Parser::new(source, &depth);
    match options.mode {
        Mode::Named => Extraction::Named(scan_declarations(&mut parser, options)),
        Mode::Anonymous => Extraction::Anonymous(scan_literals(&mut parser, options)),
    }
}

/// Read a file and extract from its contents.
pub fn extract_file(path: impl AsRef<Path>, options: &ExtractOptions) -> Result<Extraction> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path).map_err(|source| DictifyError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), chars = source.chars().count(), "read source");
    Ok(extract(&source, options))
}

/// Named declarations with non-empty object initializers.
pub fn parse_declarations(source: &str) -> Object {
    let depth = DepthCounters::default();
    let mut parser = Parser::new(source, &depth);
    scan_declarations(&mut parser, &ExtractOptions::named())
}

/// Non-empty top-level object literals, in source order.
pub fn parse_literals(source: &str) -> Vec<Value> {
    let depth = DepthCounters::default();
    let mut parser = Parser::new(source, &depth);
    scan_literals(&mut parser, &ExtractOptions::anonymous())
}

/// Parse the single object or array literal at the start of `source`.
pub fn parse_literal(source: &str) -> Option<Value> {
    let depth = DepthCounters::default();
    Parser::new(source, &depth).parse_value()
}

fn scan_declarations(parser: &mut Parser<'_>, options: &ExtractOptions) -> Object {
    let mut declarations = Object::new();
    while !parser.cursor().is_at_end() {
        parser.cursor_mut().skip_trivia();
        match parser.try_parse_assignment() {
            Some((name, value)) if options.accepts(&value) => {
                debug!(%name, "recorded declaration");
                declarations.insert(Key::Str(name), value);
            }
            Some((name, _)) => debug!(%name, "discarded declaration"),
            None => parser.cursor_mut().advance(),
        }
    }
    declarations
}

fn scan_literals(parser: &mut Parser<'_>, options: &ExtractOptions) -> Vec<Value> {
    let mut literals = Vec::new();
    while !parser.cursor().is_at_end() {
        parser.cursor_mut().skip_trivia();
        let start = parser.cursor().position();
        if !matches!(parser.cursor().current(), Some('{' | '[')) {
            parser.cursor_mut().advance();
            continue;
        }
        match parser.parse_value() {
            Some(value) if options.accepts(&value) => {
                debug!(offset = start, "recorded literal");
                literals.push(value);
            }
            Some(_) => debug!(offset = start, "discarded literal"),
            None => parser.cursor_mut().set_position(start + 1),
        }
    }
    literals
}

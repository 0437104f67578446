//! Literal emitter: writes a [`Value`] back out as a minimal JS literal.
//!
//! The output only uses forms the parser reads back to an equal value:
//!
//! - Bare keys when the key is identifier-shaped, quoted keys otherwise,
//!   numeric keys as plain digits
//! - Strings in double quotes, escaping only `\\ \" \n \t \r`
//! - Floats always carry a `.` or an exponent so they stay floats
//!
//! # Example
//! ```
//! use dictify_core::parse_literal;
//! let value = parse_literal("{ 'a-b': [1, 2.0, null], ok: true }").unwrap();
//! assert_eq!(value.to_string(), r#"{"a-b":[1,2.0,null],ok:true}"#);
//! ```

use crate::cursor::{is_identifier_part, is_identifier_start};
use crate::types::{Key, Object, Value};
use std::fmt::{self, Display, Formatter, Write};

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Integer(n) => write!(f, "{n}"),
            // Debug always keeps a fraction or exponent (`1.0`, `1e-7`).
            Value::Float(x) => write!(f, "{x:?}"),
            Value::String(s) => write_quoted(s, f),
            Value::Array(items) => {
                f.write_char('[')?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_char(',')?;
                    }
                    Display::fmt(item, f)?;
                }
                f.write_char(']')
            }
            Value::Object(object) => Display::fmt(object, f),
        }
    }
}

impl Display for Object {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_char('{')?;
        for (i, (key, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_char(',')?;
            }
            write_key(key, f)?;
            f.write_char(':')?;
            Display::fmt(value, f)?;
        }
        f.write_char('}')
    }
}

fn write_key(key: &Key, f: &mut Formatter<'_>) -> fmt::Result {
    match key {
        Key::Index(n) => write!(f, "{n}"),
        Key::Str(s) if is_bare_key(s) => f.write_str(s),
        Key::Str(s) => write_quoted(s, f),
    }
}

fn is_bare_key(s: &str) -> bool {
    let mut chars = s.chars();
    chars.next().is_some_and(is_identifier_start) && chars.all(is_identifier_part)
}

fn write_quoted(s: &str, f: &mut Formatter<'_>) -> fmt::Result {
    f.write_char('"')?;
    for c in s.chars() {
        match c {
            '\\' => f.write_str("\\\\")?,
            '"' => f.write_str("\\\"")?,
            '\n' => f.write_str("\\n")?,
            '\t' => f.write_str("\\t")?,
            '\r' => f.write_str("\\r")?,
            c => f.write_char(c)?,
        }
    }
    f.write_char('"')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalars() {
        assert_eq!(Value::Null.to_string(), "null");
        assert_eq!(Value::Bool(false).to_string(), "false");
        assert_eq!(Value::Integer(-7).to_string(), "-7");
        assert_eq!(Value::Float(1_000_000.0).to_string(), "1000000.0");
        assert_eq!(Value::Float(0.5).to_string(), "0.5");
    }

    #[test]
    fn strings_are_escaped() {
        let value = Value::String("say \"hi\"\n\tC:\\dir\r".into());
        assert_eq!(value.to_string(), r#""say \"hi\"\n\tC:\\dir\r""#);
    }

    #[test]
    fn keys_are_bare_only_when_identifier_shaped() {
        let object: Object = [
            (Key::from("plain_$1"), Value::Integer(1)),
            (Key::from("with-dash"), Value::Integer(2)),
            (Key::from(""), Value::Integer(3)),
            (Key::Index(42), Value::Integer(4)),
        ]
        .into_iter()
        .collect();
        assert_eq!(
            Value::Object(object).to_string(),
            r#"{plain_$1:1,"with-dash":2,"":3,42:4}"#
        );
    }

    #[test]
    fn empty_containers() {
        assert_eq!(Value::Array(vec![]).to_string(), "[]");
        assert_eq!(Value::Object(Object::new()).to_string(), "{}");
    }
}

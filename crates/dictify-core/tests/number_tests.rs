use dictify_core::{parse_declarations, parse_literal, Value};

fn first(src: &str) -> Value {
    match parse_literal(&format!("[{src}]")) {
        Some(Value::Array(mut items)) if items.len() == 1 => items.remove(0),
        other => panic!("expected a single element for {src:?}, got {other:?}"),
    }
}

#[test]
fn radix_integers() {
    assert_eq!(first("0xFF"), Value::Integer(255));
    assert_eq!(first("0b1010"), Value::Integer(10));
    assert_eq!(first("0o755"), Value::Integer(493));
    assert_eq!(first("-0x10"), Value::Integer(-16));
}

#[test]
fn decimal_forms_keep_their_kind() {
    assert_eq!(first("-10"), Value::Integer(-10));
    assert_eq!(first("3.14"), Value::Float(3.14));
    assert_eq!(first("1e6"), Value::Float(1_000_000.0));
    assert_eq!(first("-.5"), Value::Float(-0.5));
    assert_eq!(first("5."), Value::Float(5.0));
}

#[test]
fn leading_dot_is_not_a_number() {
    assert_eq!(
        parse_literal("[.5, 1]"),
        Some(Value::Array(vec![Value::Integer(1)]))
    );
}

#[test]
fn integer_and_float_are_distinct() {
    assert_ne!(first("1"), first("1.0"));
}

#[test]
fn i64_limits() {
    assert_eq!(first("9223372036854775807"), Value::Integer(i64::MAX));
    assert_eq!(first("-9223372036854775808"), Value::Integer(i64::MIN));
    assert_eq!(first("9223372036854775808"), Value::Float(9.223372036854775808e18));
}

#[test]
fn unsupported_numeric_forms_are_dropped() {
    let parsed = parse_literal("[0x, 1_000, Infinity, NaN, -Infinity, 7]");
    // `1_000` reads as 1 and the trailing `_000` is skipped.
    assert_eq!(
        parsed,
        Some(Value::Array(vec![Value::Integer(1), Value::Integer(7)]))
    );
}

#[test]
fn numeric_keys_become_indices() {
    let decls = parse_declarations("const codes = { 200: 'ok', 0x194: 'missing' };");
    let codes = decls.get_str("codes").and_then(Value::as_object);
    let codes = codes.expect("codes recorded");
    assert_eq!(codes.get_index(200).and_then(Value::as_str), Some("ok"));
    assert_eq!(codes.get_index(404).and_then(Value::as_str), Some("missing"));
}

/// Property-based tests for the literal parser.
///
/// Uses the `proptest` crate to generate random value trees and random source
/// text, and checks the properties the parser must hold for every input:
///
/// - Re-parse idempotence: `parse(emit(v)) == v` for any object/array `v`
/// - Unsupported members are dropped without disturbing their siblings
/// - Depth counters always return to zero after a parse
/// - The whole-text driver never panics, whatever the input
use dictify_core::{
    extract, parse_literal, DepthCounters, ExtractOptions, Key, Object, Parser, Value,
};
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

/// Keys: identifier-shaped, arbitrary quoted text, or numeric.
fn arb_key() -> impl Strategy<Value = Key> {
    prop_oneof![
        "[a-zA-Z_$][a-zA-Z0-9_$]{0,10}".prop_map(Key::Str),
        any::<String>().prop_map(Key::Str),
        (0u64..=i64::MAX as u64).prop_map(Key::Index),
    ]
}

fn arb_string() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z0-9 ]{0,20}",
        // Characters that matter to the scanner
        "[\"'`\\\\{}\\[\\]():,/*\n\t\r ]{0,20}",
        any::<String>(),
    ]
}

fn arb_scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Integer),
        any::<f64>()
            .prop_filter("finite", |f| f.is_finite())
            .prop_map(Value::Float),
        arb_string().prop_map(Value::String),
    ]
}

/// Nested values up to a few levels deep.
fn arb_value() -> impl Strategy<Value = Value> {
    arb_scalar().prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::vec((arb_key(), inner), 0..6)
                .prop_map(|members| Value::Object(members.into_iter().collect())),
        ]
    })
}

/// A top-level structure: object or array.
fn arb_structure() -> impl Strategy<Value = Value> {
    prop_oneof![
        prop::collection::vec(arb_value(), 0..6).prop_map(Value::Array),
        prop::collection::vec((arb_key(), arb_value()), 0..6)
            .prop_map(|members| Value::Object(members.into_iter().collect::<Object>())),
    ]
}

/// Members that are never pure data.
fn arb_unsupported() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        "fn({x: [1, {y: 2}]})",
        "() => { return { a: 1 }; }",
        "`tpl ${ {a: [1]} } }`",
        "SOME_CONST",
        "a + b",
        "new Map([[1, {}]])",
        "-Infinity",
    ])
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn reparse_is_idempotent(value in arb_structure()) {
        let literal = value.to_string();
        let reparsed = parse_literal(&literal);
        prop_assert_eq!(reparsed.as_ref(), Some(&value), "literal: {}", literal);
    }

    #[test]
    fn unsupported_member_is_dropped(
        members in prop::collection::vec((arb_key(), arb_value()), 0..6),
        junk in arb_unsupported(),
        at in 0usize..6,
    ) {
        let object: Object = members.into_iter().collect();
        let expected = Value::Object(object.clone());

        let mut parts: Vec<String> = object
            .iter()
            .map(|(k, v)| {
                let single: Object = [(k.clone(), v.clone())].into_iter().collect();
                let text = Value::Object(single).to_string();
                text[1..text.len() - 1].to_string()
            })
            .collect();
        let at = at.min(parts.len());
        parts.insert(at, format!("dropped: {junk}"));
        let source = format!("{{ {} }}", parts.join(", "));

        let parsed = parse_literal(&source);
        prop_assert_eq!(parsed.as_ref(), Some(&expected), "source: {}", source);
    }

    #[test]
    fn depth_counters_return_to_zero(src in "[{}\\[\\]()'\"`,:a-z0-9 \\\\/*-]{0,64}") {
        let depth = DepthCounters::default();
        let mut parser = Parser::new(&src, &depth);
        while !parser.cursor().is_at_end() {
            parser.cursor_mut().skip_trivia();
            let start = parser.cursor().position();
            if parser.try_parse_assignment().is_none() && parser.parse_value().is_none() {
                parser.cursor_mut().set_position(start + 1);
            }
            prop_assert_eq!((depth.brace(), depth.bracket()), (0, 0));
        }
    }

    #[test]
    fn driver_never_panics(src in any::<String>()) {
        let _ = extract(&src, &ExtractOptions::named());
        let _ = extract(&src, &ExtractOptions::anonymous().include_arrays(true));
    }

    #[test]
    fn driver_on_js_like_noise(src in "(const|let|var| |=|\\{|\\}|\\[|\\]|\\(|\\)|:|,|x|1|'|`|//|/\\*|\\*/|\n){0,40}") {
        let found = extract(&src, &ExtractOptions::named());
        // Only non-empty objects are ever recorded by default.
        if let dictify_core::Extraction::Named(object) = found {
            for (_, value) in object.iter() {
                let recorded = value.as_object().map(|o| !o.is_empty()).unwrap_or(false);
                prop_assert!(recorded);
            }
        }
    }
}

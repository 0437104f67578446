//! WASM bindings for dictify-core.
//!
//! Exposes `extract` and `parseLiteral` as `#[wasm_bindgen]` functions that
//! can be called from JavaScript/TypeScript. Results cross the boundary as
//! JSON strings.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p dictify-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target nodejs --out-dir pkg/ \
//!   target/wasm32-unknown-unknown/release/dictify_wasm.wasm
//! ```

use dictify_core::ExtractOptions;
use wasm_bindgen::prelude::*;

fn to_js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Extract literal structures from JS/TS source, returned as compact JSON.
///
/// `options` is an optional JSON object such as
/// `{"mode": "anonymous", "keepEmpty": false, "includeArrays": true}`;
/// omitted fields take their defaults. Throws a JS error if `options` is not
/// valid JSON.
#[wasm_bindgen]
pub fn extract(source: &str, options: Option<String>) -> std::result::Result<String, JsValue> {
    let options = match options.as_deref() {
        Some(json) => parse_options(json).map_err(to_js_error)?,
        None => ExtractOptions::default(),
    };
    dictify_core::extract(source, &options)
        .to_json_string(false)
        .map_err(to_js_error)
}

/// Parse the literal structure at the start of `source` into compact JSON,
/// or `undefined` when there is none.
#[wasm_bindgen(js_name = parseLiteral)]
pub fn parse_literal(source: &str) -> Option<String> {
    dictify_core::parse_literal(source).map(|value| value.to_json().to_string())
}

/// Accepts both `keep_empty` and `keepEmpty` spellings.
fn parse_options(json: &str) -> serde_json::Result<ExtractOptions> {
    let mut value: serde_json::Value = serde_json::from_str(json)?;
    if let Some(map) = value.as_object_mut() {
        for (camel, snake) in [("keepEmpty", "keep_empty"), ("includeArrays", "include_arrays")] {
            if let Some(v) = map.remove(camel) {
                map.insert(snake.to_string(), v);
            }
        }
    }
    serde_json::from_value(value)
}

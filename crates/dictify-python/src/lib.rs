//! # dictify-python
//!
//! Python bindings for the dictify literal extractor, built with PyO3.
//!
//! Exposes the following functions to Python as the `dictify_js` module:
//!
//! - `parse_file(source, mode="named")`: JS/TS source text -> JSON string
//! - `parse_path(path, mode="named")`: same, reading the source from a file
//! - `parse_literal(source)`: first literal at the start of `source` -> JSON
//!   string, or `None`

use dictify_core::{DictifyError, ExtractOptions, Mode};
use pyo3::exceptions::{PyFileNotFoundError, PyValueError};
use pyo3::prelude::*;

fn to_py_err(e: DictifyError) -> PyErr {
    match e {
        DictifyError::Io { .. } => PyFileNotFoundError::new_err(e.to_string()),
        other => PyValueError::new_err(other.to_string()),
    }
}

fn options_for(mode: &str) -> PyResult<ExtractOptions> {
    let mode: Mode = mode.parse().map_err(to_py_err)?;
    Ok(ExtractOptions {
        mode,
        ..ExtractOptions::default()
    })
}

/// Extract object literals from JS/TS source text.
///
/// Args:
///     source: JavaScript or TypeScript source text.
///     mode: "named" for `const`/`let`/`var` declarations keyed by name, or
///         "anonymous" for every top-level object literal in source order.
///
/// Returns:
///     A JSON string: an object in named mode, an array in anonymous mode.
///
/// Raises:
///     ValueError: If `mode` is not recognized.
#[pyfunction]
#[pyo3(signature = (source, mode="named"))]
fn parse_file(source: &str, mode: &str) -> PyResult<String> {
    let options = options_for(mode)?;
    dictify_core::extract(source, &options)
        .to_json_string(false)
        .map_err(to_py_err)
}

/// Extract object literals from a JS/TS file on disk.
///
/// Raises:
///     FileNotFoundError: If the file cannot be read.
///     ValueError: If `mode` is not recognized.
#[pyfunction]
#[pyo3(signature = (path, mode="named"))]
fn parse_path(path: &str, mode: &str) -> PyResult<String> {
    let options = options_for(mode)?;
    dictify_core::extract_file(path, &options)
        .and_then(|found| found.to_json_string(false))
        .map_err(to_py_err)
}

/// Parse the object or array literal at the start of `source`.
///
/// Returns:
///     The literal as a JSON string, or None if there is no literal there.
#[pyfunction]
fn parse_literal(source: &str) -> Option<String> {
    dictify_core::parse_literal(source).map(|value| value.to_json().to_string())
}

/// The `dictify_js` Python module, implemented in Rust via PyO3.
#[pymodule]
fn dictify_js(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(parse_file, m)?)?;
    m.add_function(wrap_pyfunction!(parse_path, m)?)?;
    m.add_function(wrap_pyfunction!(parse_literal, m)?)?;
    Ok(())
}

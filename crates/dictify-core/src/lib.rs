//! # dictify-core
//!
//! Fault-tolerant extraction of literal data from JavaScript/TypeScript source.
//!
//! The parser walks arbitrary, possibly invalid JS/TS text and pulls out the
//! object and array literals that are pure data: strings, numbers, booleans,
//! `null`, and nested objects/arrays of those. Anything that would need
//! evaluating (identifiers, calls, arrow functions, spreads, computed keys,
//! template and regex literals) is dropped member by member, and parsing
//! resumes inside the same structure.
//!
//! ## Quick start
//!
//! ```rust
//! use dictify_core::parse_declarations;
//!
//! let src = r##"
//!     import x from "y";
//!     export const theme = {
//!         primary: "#ff0066",
//!         spacing: [4, 8, 16],
//!         onClick: () => alert("hi"),
//!         ...base,
//!     };
//! "##;
//! let found = parse_declarations(src);
//! assert_eq!(
//!     found.to_json(),
//!     serde_json::json!({"theme": {"primary": "#ff0066", "spacing": [4, 8, 16]}})
//! );
//! ```
//!
//! ## Modules
//!
//! - [`cursor`]: character cursor and whitespace/comment skipping
//! - [`literal`]: string, number and key readers
//! - [`parser`]: structure parser, value reader, declaration matcher
//! - [`recovery`]: resynchronization after unsupported members
//! - [`extract`]: whole-text driver (named / anonymous modes)
//! - [`encoder`]: minimal JS literal output for values
//! - [`types`]: `Value`, `Key`, `Object`
//! - [`error`]: error types for file and JSON boundaries

pub mod cursor;
pub mod encoder;
pub mod error;
pub mod extract;
pub mod literal;
pub mod parser;
pub mod recovery;
pub mod types;

pub use cursor::Cursor;
pub use error::DictifyError;
pub use extract::{
    extract, extract_file, parse_declarations, parse_literal, parse_literals, ExtractOptions,
    Extraction, Mode,
};
pub use literal::Number;
pub use parser::{Container, DepthCounters, Parser, MAX_DEPTH};
pub use recovery::Resync;
pub use types::{Key, Object, Value};

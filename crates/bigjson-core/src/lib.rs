//! # bigjson-core
//!
//! Precision-preserving JSON codec. The parser keeps the exact lexical form
//! of numbers a double would corrupt: integers beyond the safe range parse
//! to arbitrary-precision values (or, on request, to their verbatim source
//! text), and each node's original JSON type is recorded in a side-channel
//! schema. The matching serializers consult that schema to re-emit a
//! numeral kept as a string back out as a bare number, so
//! `{"id":123456989987654321}` survives a parse/serialize round-trip intact
//! instead of coming back as `123456989987654320`.
//!
//! ## Quick start
//!
//! ```rust
//! use bigjson_core::{parse, stringify_with_schema, ParseOptions};
//!
//! let options = ParseOptions { store_as_string: true, ..Default::default() };
//! let parsed = parse(r#"{"id":123456989987654321}"#, &options).unwrap();
//!
//! // The plain tree holds the digits as a string...
//! assert_eq!(
//!     serde_json::to_value(&parsed.data).unwrap(),
//!     serde_json::json!({"id": "123456989987654321"})
//! );
//!
//! // ...and the schema knows it was written as a number, so it goes back
//! // out unquoted.
//! let out = stringify_with_schema(&parsed.data, &parsed.data_schema, None);
//! assert_eq!(out, r#"{"id":123456989987654321}"#);
//! ```
//!
//! Without `store_as_string`, out-of-range integers still stay exact: they
//! parse to [`Number::Big`] and the ordinary [`stringify`](crate::stringify())
//! renders them digit for digit.
//!
//! ## Modules
//!
//! - [`parser`] — recursive-descent parser, parse options, security policy
//! - [`types`] — [`JsonValue`] / [`SchemaNode`] trees and schema extraction
//! - [`stringify`](crate::stringify()) — generic serialization (replacer, indentation)
//! - [`schema_stringify`] — schema-directed and type-directed serialization
//! - [`quote`](crate::quote()) — JSON string literal escaping
//! - [`error`] — error types for parse failures

pub mod error;
pub mod parser;
pub mod quote;
pub mod schema_stringify;
pub mod stringify;
pub mod types;

pub use error::{Error, Result};
pub use parser::{parse, ParseOptions, Parsed, SuspectAction, MAX_SAFE_INTEGER};
pub use quote::quote;
pub use schema_stringify::{
    stringify_node, stringify_with_json_schema_hints, stringify_with_schema, SchemaHint,
};
pub use stringify::{stringify, Replacer, Space};
pub use types::{JsonType, JsonValue, Number, SchemaNode};

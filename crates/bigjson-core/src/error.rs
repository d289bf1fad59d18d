//! Error types for parsing and option handling.

use thiserror::Error;

/// Errors raised by the parser and by option plumbing.
///
/// `at` is the byte offset just past the offending character, so callers
/// holding the source text can point at the failure. Serialization never
/// fails: the stringifiers are total functions over their inputs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Malformed JSON syntax, including duplicate keys in strict mode and
    /// unexpected trailing content. Non-recoverable: no partial tree is
    /// produced.
    #[error("syntax error at offset {at}: {message}")]
    Syntax { message: String, at: usize },

    /// A key matched a forbidden prototype/constructor pattern while the
    /// corresponding action is `error`. Same abort semantics as a syntax
    /// error, but distinguishable for callers that branch on it.
    #[error("security error at offset {at}: {message}")]
    Security { message: String, at: usize },

    /// An enumerated option was given an unrecognized value.
    #[error("unrecognized suspect-key action {value:?}, expected \"error\", \"ignore\" or \"preserve\"")]
    Config { value: String },
}

/// Convenience alias used throughout bigjson-core.
pub type Result<T> = std::result::Result<T, Error>;

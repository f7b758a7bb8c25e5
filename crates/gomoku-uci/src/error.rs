//! Front-end command errors.
//!
//! The core stays total (spec.md §7); this is the small ambient error
//! surface a text front-end needs on top of it.

/// Errors that can occur while parsing a line of front-end input.
#[derive(Debug, thiserror::Error)]
pub enum UciError {
    /// The `position` command is missing its `startpos` keyword.
    #[error("malformed position command: expected startpos")]
    MalformedPosition,

    /// A move in the `position ... moves ...` list could not be parsed.
    #[error("invalid move text: {text}")]
    InvalidMove {
        /// The move text that failed to parse.
        text: String,
    },

    /// A `go` parameter is missing its required value.
    #[error("missing value for go parameter: {param}")]
    MissingGoValue {
        /// The parameter name (e.g. "movetime", "nodes", "depth").
        param: String,
    },

    /// A `go` parameter value could not be parsed as an integer.
    #[error("invalid value for go parameter {param}: {value}")]
    InvalidGoValue {
        /// The parameter name.
        param: String,
        /// The value string that failed to parse.
        value: String,
    },

    /// The `perft` command's depth argument could not be parsed.
    #[error("invalid perft depth: {value}")]
    InvalidPerftDepth {
        /// The depth string that failed to parse.
        value: String,
    },

    /// An I/O error occurred while reading from stdin.
    #[error("I/O error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },
}

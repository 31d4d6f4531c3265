//! Error types for pattern expansion
//!
//! Every failure is a synchronous, caller-visible error raised by the call
//! that triggers it. Parse errors carry the byte offset at which they were
//! detected; for errors raised while parsing an alias body the offset refers
//! to that body.

use thiserror::Error;

/// The main error type for pattern expansion
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExpandError {
    /// A `)` with no matching opener at the current depth
    #[error("unbalanced group close at position {position}")]
    UnbalancedGroupClose {
        /// Position of the stray `)`
        position: usize,
    },

    /// End of input reached while a group is still open
    #[error("premature end of pattern: group opened at position {position} is never closed")]
    PrematureEndOfGroup {
        /// Position of the unclosed group opener
        position: usize,
    },

    /// Unrecognized character inside a `{...}` quantifier
    #[error("malformed quantifier: unexpected character '{found}' at position {position}")]
    MalformedQuantifier {
        /// Position of the offending character
        position: usize,
        /// The offending character
        found: char,
    },

    /// End of input reached with a `{` quantifier still open
    #[error("premature end of quantifier opened at position {position}")]
    PrematureEndOfQuantifier {
        /// Position of the opening `{`
        position: usize,
    },

    /// An alias references itself, directly or transitively
    #[error("circular alias reference to '{name}' (via {})", chain.join(" -> "))]
    CircularAliasReference {
        /// The alias that closed the cycle
        name: String,
        /// Aliases being resolved when the cycle was found, outermost first
        chain: Vec<String>,
    },

    /// An alias name that could never be referenced from a pattern, or
    /// that cannot name a group when named alias groups are enabled
    #[error("invalid alias name '{0}'")]
    InvalidAliasName(String),

    /// The expanded pattern would exceed the compiler's size limit
    #[error("expanded pattern exceeds the size limit of {limit} bytes")]
    OutputTooLarge {
        /// The limit in bytes
        limit: usize,
    },

    /// The host engine rejected the expanded pattern
    #[error("compilation error: {0}")]
    Compile(String),

    /// The host engine failed while matching
    #[error("runtime error: {0}")]
    Runtime(String),
}

/// Result type alias for expansion operations
pub type Result<T> = std::result::Result<T, ExpandError>;

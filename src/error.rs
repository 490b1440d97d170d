//! Error types produced by the lexer, parser, and interpreter.
//!
//! Lexical and syntax errors abort before any match attempt is made.
//! Semantic errors (an unresolved back-reference) abort the current match
//! attempt and stop the driver from trying further start positions.

/// An error raised while lexing, parsing, or interpreting a pattern.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// An escape sequence the lexer doesn't recognize, e.g. `\z`.
    #[error("unexpected escape: \\{0}")]
    UnexpectedEscape(char),

    /// A `)` or `]` with no matching opener.
    #[error("unexpected close: {0}")]
    UnexpectedClose(char),

    /// A `{` quantifier with no closing `}`.
    #[error("unterminated quantifier")]
    UnterminatedQuantifier,

    /// A `{...}` quantifier whose bounds don't parse as a valid count.
    #[error("malformed quantifier")]
    MalformedQuantifier,

    /// A pattern ran out of tokens mid-construct, e.g. `(abc` or `[abc`.
    #[error("unexpected end of pattern")]
    UnexpectedEnd,

    /// `\n` referred to a capture group that doesn't exist.
    #[error("undefined back-reference: \\{0}")]
    UndefinedBackReference(usize),
}

impl EngineError {
    /// True for errors the interpreter can only discover mid-match (as
    /// opposed to lexical/syntax errors, which abort before any attempt).
    pub fn is_semantic(&self) -> bool {
        matches!(self, EngineError::UndefinedBackReference(_))
    }
}

//! `regrep` — a small byte-oriented regular expression matcher.
//!
//! The crate is a three-stage pipeline, leaves first: [`lexer`] turns a
//! pattern into tokens, [`parser`] turns tokens into an [`ast::Expr`] tree,
//! and [`interpreter`] walks that tree against a line under the control of
//! [`driver`], which tries successive start offsets. [`Pattern`] wires the
//! three together so a pattern is lexed and parsed exactly once and then
//! reused: compile once, search as many lines as you like.

pub mod ast;
pub mod cli;
pub mod driver;
pub mod error;
pub mod interpreter;
pub mod lexer;
pub mod parser;
pub mod token;

pub use ast::Expr;
pub use cli::run;
pub use driver::Match;
pub use error::EngineError;

/// A compiled pattern, ready to search any number of lines.
#[derive(Debug, Clone)]
pub struct Pattern {
    ast: Expr,
    capture_count: usize,
    source: Vec<u8>,
}

impl Pattern {
    /// Lex and parse `pattern`. Fails before any match attempt is made if
    /// the pattern is lexically or syntactically invalid.
    pub fn compile(pattern: &[u8]) -> Result<Self, EngineError> {
        let tokens = lexer::lex(pattern)?;
        let (ast, capture_count) = parser::parse(tokens)?;
        Ok(Pattern { ast, capture_count, source: pattern.to_vec() })
    }

    /// The pattern bytes this `Pattern` was compiled from.
    pub fn source(&self) -> &[u8] {
        &self.source
    }

    /// The parsed tree, exposed for diagnostics (the CLI's `--debug-ast`).
    pub fn ast(&self) -> &Expr {
        &self.ast
    }

    /// Search `line` for a substring this pattern matches.
    pub fn search<'a>(&self, line: &'a [u8]) -> Result<Option<Match<'a>>, EngineError> {
        driver::search(&self.ast, self.capture_count, line)
    }
}

/// Compile `pattern` and search `line` in one call.
pub fn search<'a>(pattern: &[u8], line: &'a [u8]) -> Result<Option<Match<'a>>, EngineError> {
    Pattern::compile(pattern)?.search(line)
}

#[cfg(test)]
mod lib_tests {
    use super::*;

    #[test]
    fn compile_then_search_reuses_the_pattern() {
        let pattern = Pattern::compile(br"a(bc|de)f").unwrap();
        assert!(pattern.search(b"adef").unwrap().is_some());
        assert!(pattern.search(b"abcf").unwrap().is_some());
        assert!(pattern.search(b"axyf").unwrap().is_none());
    }

    #[test]
    fn invalid_pattern_fails_before_any_match_attempt() {
        assert!(Pattern::compile(br"\z").is_err());
    }
}

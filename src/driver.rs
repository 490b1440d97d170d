//! The driver: walks start offsets across the line until the interpreter
//! reports a match, a `^` anchor forecloses further attempts, or a
//! semantic error aborts the search outright.

use crate::ast::Expr;
use crate::error::EngineError;
use crate::interpreter::Interpreter;

/// A successful match: the byte range it spans and the substrings each
/// capture group recorded (`None` for a group the matched path never
/// entered).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match<'a> {
    pub start: usize,
    pub end: usize,
    pub text: &'a [u8],
    pub captures: Vec<Option<&'a [u8]>>,
}

/// Try every start offset in `[0, line.len()]`, in order, stopping at the
/// first success, the first `^`-anchored refusal, or the first semantic
/// error.
pub fn search<'a>(
    ast: &Expr,
    capture_count: usize,
    line: &'a [u8],
) -> Result<Option<Match<'a>>, EngineError> {
    for start in 0..=line.len() {
        let mut interp = Interpreter::new(&line[start..], capture_count);
        let (matched, consumed) = interp.interpret(ast);
        if let Some(err) = interp.fatal() {
            return Err(err.clone());
        }
        if matched {
            let captures = interp.into_captures();
            return Ok(Some(Match {
                start,
                end: start + consumed,
                text: &line[start..start + consumed],
                captures,
            }));
        }
        if interp.must_match() {
            break;
        }
    }
    Ok(None)
}

//! The interpreter: walks the AST against a byte slice, maintaining a
//! cursor, a capture table, and the `must_match` flag a `^` anchor raises
//! for the driver.
//!
//! One `Interpreter` is scoped to a single attempt from a single start
//! offset; it is discarded (along with its capture table) the moment that
//! attempt finishes, successful or not.

use crate::ast::{Bound, Expr};
use crate::error::EngineError;

pub struct Interpreter<'a> {
    line: &'a [u8],
    pos: usize,
    captures: Vec<Option<&'a [u8]>>,
    must_match: bool,
    fatal: Option<EngineError>,
}

impl<'a> Interpreter<'a> {
    pub fn new(line: &'a [u8], capture_count: usize) -> Self {
        Interpreter {
            line,
            pos: 0,
            captures: vec![None; capture_count],
            must_match: false,
            fatal: None,
        }
    }

    /// Attempt to match `expr` starting at offset 0. Returns whether it
    /// succeeded and how many bytes were consumed.
    pub fn interpret(&mut self, expr: &Expr) -> (bool, usize) {
        let ok = self.eval(expr) && self.fatal.is_none();
        (ok, self.pos)
    }

    pub fn must_match(&self) -> bool {
        self.must_match
    }

    pub fn fatal(&self) -> Option<&EngineError> {
        self.fatal.as_ref()
    }

    pub fn into_captures(self) -> Vec<Option<&'a [u8]>> {
        self.captures
    }

    fn eval(&mut self, expr: &Expr) -> bool {
        if self.fatal.is_some() {
            return false;
        }
        match expr {
            Expr::Empty => true,
            Expr::CharLiteral(b) => self.match_byte(|x| x == *b),
            Expr::Any => self.match_byte(|_| true),
            Expr::CharClass(class) => self.match_byte(|b| class.matches(b)),
            Expr::Concat(l, r) => self.eval(l) && self.eval(r),
            Expr::Alternation(l, r) => {
                let saved = self.pos;
                if self.eval(l) {
                    true
                } else if self.fatal.is_some() {
                    false
                } else {
                    self.pos = saved;
                    self.eval(r)
                }
            }
            Expr::Quantified { child, min, max } => self.eval_quantified(child, *min, *max),
            Expr::Group { child, index } => {
                let entry = self.pos;
                if self.eval(child) {
                    self.captures[*index] = Some(&self.line[entry..self.pos]);
                    true
                } else {
                    false
                }
            }
            Expr::BackRef(n) => self.eval_backref(*n),
            Expr::StartAnchor => {
                self.must_match = true;
                self.pos == 0
            }
            Expr::EndAnchor => self.pos == self.line.len(),
        }
    }

    fn match_byte(&mut self, pred: impl Fn(u8) -> bool) -> bool {
        if self.pos < self.line.len() && pred(self.line[self.pos]) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Greedy, non-backtracking repetition: attempt `child` at least `min`
    /// times, then keep attempting (up to `max`) until it fails once. A
    /// repetition that stops is never retried with fewer matches.
    fn eval_quantified(&mut self, child: &Expr, min: usize, max: Bound) -> bool {
        let mut count = 0;
        while count < min {
            if !self.eval(child) {
                return false;
            }
            count += 1;
        }
        loop {
            if let Bound::Finite(m) = max {
                if count >= m {
                    break;
                }
            }
            let before = self.pos;
            if !self.eval(child) {
                self.pos = before;
                break;
            }
            count += 1;
            if self.pos == before {
                // zero-width match (e.g. an empty group): one repetition is
                // as good as infinitely many, and looping would never end.
                break;
            }
        }
        true
    }

    fn eval_backref(&mut self, n: usize) -> bool {
        if n == 0 || n > self.captures.len() {
            self.fatal = Some(EngineError::UndefinedBackReference(n));
            return false;
        }
        let Some(captured) = self.captures[n - 1] else {
            self.fatal = Some(EngineError::UndefinedBackReference(n));
            return false;
        };
        let end = self.pos + captured.len();
        if end <= self.line.len() && &self.line[self.pos..end] == captured {
            self.pos = end;
            true
        } else {
            false
        }
    }
}

//! Recursive-descent parser: token list -> AST.
//!
//! ```text
//! regex         := alternation
//! alternation   := concatenation ( '|' concatenation )*
//! concatenation := quantified_atom*
//! quantified_atom := atom quantifier?
//! quantifier    := '?' | '*' | '+'
//!                | '{' number '}'
//!                | '{' number ',' '}'
//!                | '{' number ',' number '}'
//! atom          := group | class | literal | shorthand | anchor | backref | '.'
//! group         := '(' regex ')'
//! class         := '[' '^'? range+ ']'
//! range         := char ( '-' char )?
//! ```
//!
//! Capture indices are assigned here, in left-to-right order of first
//! entry, rather than at match time: sizing the interpreter's capture
//! table up front turns back-reference resolution into a plain bounds
//! check instead of a mutable counter threaded through evaluation.

use crate::ast::{Bound, ByteRange, CharClass, Expr};
use crate::error::EngineError;
use crate::token::{Token, TokenKind};

/// Parse a token stream into an AST plus the total number of capture
/// groups it contains (used to size the interpreter's capture table).
pub fn parse(tokens: Vec<Token>) -> Result<(Expr, usize), EngineError> {
    let mut parser = Parser { tokens, pos: 0, next_capture: 0 };
    let expr = parser.alternation()?;
    if !parser.is_at_end() {
        return Err(parser.unexpected_close_here());
    }
    Ok((expr, parser.next_capture))
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    next_capture: usize,
}

impl Parser {
    fn alternation(&mut self) -> Result<Expr, EngineError> {
        let mut expr = self.concatenation()?;
        while self.match_kind(TokenKind::Pipe) {
            let right = self.concatenation()?;
            expr = Expr::Alternation(Box::new(expr), Box::new(right));
        }
        Ok(expr)
    }

    fn concatenation(&mut self) -> Result<Expr, EngineError> {
        let mut expr: Option<Expr> = None;
        while !self.is_at_end()
            && self.peek().kind != TokenKind::Pipe
            && self.peek().kind != TokenKind::RightParen
        {
            let atom = self.quantified_atom()?;
            expr = Some(match expr {
                Some(left) => Expr::Concat(Box::new(left), Box::new(atom)),
                None => atom,
            });
        }
        Ok(expr.unwrap_or(Expr::Empty))
    }

    fn quantified_atom(&mut self) -> Result<Expr, EngineError> {
        let atom = self.atom()?;
        if self.match_kind(TokenKind::Plus) {
            return Ok(Expr::Quantified { child: Box::new(atom), min: 1, max: Bound::Unbounded });
        }
        if self.match_kind(TokenKind::Question) {
            return Ok(Expr::Quantified { child: Box::new(atom), min: 0, max: Bound::Finite(1) });
        }
        if self.match_kind(TokenKind::Star) {
            return Ok(Expr::Quantified { child: Box::new(atom), min: 0, max: Bound::Unbounded });
        }
        if self.match_kind(TokenKind::LeftBrace) {
            return self.counted_quantifier(atom);
        }
        Ok(atom)
    }

    fn counted_quantifier(&mut self, atom: Expr) -> Result<Expr, EngineError> {
        let min = self.number()?;
        let max = if self.match_kind(TokenKind::Comma) {
            if self.match_kind(TokenKind::RightBrace) {
                Bound::Unbounded
            } else {
                let max = self.number()?;
                if !self.match_kind(TokenKind::RightBrace) {
                    return Err(EngineError::UnterminatedQuantifier);
                }
                if max < min {
                    return Err(EngineError::MalformedQuantifier);
                }
                Bound::Finite(max)
            }
        } else if self.match_kind(TokenKind::RightBrace) {
            Bound::Finite(min)
        } else {
            return Err(EngineError::UnterminatedQuantifier);
        };
        Ok(Expr::Quantified { child: Box::new(atom), min, max })
    }

    fn number(&mut self) -> Result<usize, EngineError> {
        let mut digits = String::new();
        while self.check(TokenKind::CharLiteral) && self.peek().literal.is_ascii_digit() {
            digits.push(self.advance().literal as char);
        }
        if digits.is_empty() {
            return Err(EngineError::MalformedQuantifier);
        }
        digits.parse().map_err(|_| EngineError::MalformedQuantifier)
    }

    fn atom(&mut self) -> Result<Expr, EngineError> {
        if self.match_kind(TokenKind::LeftParen) {
            let index = self.next_capture;
            self.next_capture += 1;
            let child = self.alternation()?;
            if !self.match_kind(TokenKind::RightParen) {
                return Err(EngineError::UnexpectedEnd);
            }
            return Ok(Expr::Group { child: Box::new(child), index });
        }
        if self.match_kind(TokenKind::LeftBracket) {
            let inverted = self.match_kind(TokenKind::Caret);
            let ranges = self.char_ranges()?;
            if !self.match_kind(TokenKind::RightBracket) {
                return Err(EngineError::UnexpectedEnd);
            }
            return Ok(Expr::CharClass(CharClass { ranges, inverted }));
        }
        if self.match_kind(TokenKind::Dot) {
            return Ok(Expr::Any);
        }
        if self.match_kind(TokenKind::Digit) {
            return Ok(Expr::CharClass(CharClass::digit()));
        }
        if self.match_kind(TokenKind::Word) {
            return Ok(Expr::CharClass(CharClass::word()));
        }
        if self.check(TokenKind::BackRef) {
            let n = (self.advance().literal - b'0') as usize;
            return Ok(Expr::BackRef(n));
        }
        if self.match_kind(TokenKind::Caret) {
            return Ok(Expr::StartAnchor);
        }
        if self.match_kind(TokenKind::Dollar) {
            return Ok(Expr::EndAnchor);
        }
        if self.check(TokenKind::CharLiteral)
            || self.check(TokenKind::Comma)
            || self.check(TokenKind::Dash)
        {
            return Ok(Expr::CharLiteral(self.advance().literal));
        }
        if self.check(TokenKind::RightParen) || self.check(TokenKind::RightBracket) {
            return Err(self.unexpected_close_here());
        }
        Err(EngineError::UnexpectedEnd)
    }

    /// Ranges inside `[...]`. A bare char is a single-byte range; a
    /// `char '-' char` trio is a range. A `-` with nothing but `]` after it
    /// is treated as a literal dash rather than a dangling range operator.
    fn char_ranges(&mut self) -> Result<Vec<ByteRange>, EngineError> {
        let mut ranges = Vec::new();
        while !self.check(TokenKind::RightBracket) && !self.is_at_end() {
            let start = self.advance().literal;
            if self.check(TokenKind::Dash) && !self.check_ahead(1, TokenKind::RightBracket) {
                self.advance();
                if self.is_at_end() {
                    return Err(EngineError::UnexpectedEnd);
                }
                let end = self.advance().literal;
                ranges.push(ByteRange { start, end });
            } else {
                ranges.push(ByteRange::single(start));
            }
        }
        Ok(ranges)
    }

    fn unexpected_close_here(&self) -> EngineError {
        let ch = match self.peek().kind {
            TokenKind::RightParen => ')',
            TokenKind::RightBracket => ']',
            _ => self.peek().literal as char,
        };
        EngineError::UnexpectedClose(ch)
    }

    fn peek(&self) -> Token {
        self.tokens[self.pos]
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    fn check_ahead(&self, offset: usize, kind: TokenKind) -> bool {
        let idx = (self.pos + offset).min(self.tokens.len() - 1);
        self.tokens[idx].kind == kind
    }

    fn match_kind(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn advance(&mut self) -> Token {
        let tok = self.peek();
        if !self.is_at_end() {
            self.pos += 1;
        }
        tok
    }

    fn is_at_end(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::lex;

    fn parse_str(pattern: &str) -> Result<Expr, EngineError> {
        parse(lex(pattern.as_bytes()).unwrap()).map(|(expr, _)| expr)
    }

    #[test]
    fn literal_concat() {
        let expr = parse_str("ab").unwrap();
        assert_eq!(
            expr,
            Expr::Concat(
                Box::new(Expr::CharLiteral(b'a')),
                Box::new(Expr::CharLiteral(b'b')),
            )
        );
    }

    #[test]
    fn alternation_is_left_associative() {
        let expr = parse_str("a|b|c").unwrap();
        assert_eq!(
            expr,
            Expr::Alternation(
                Box::new(Expr::Alternation(
                    Box::new(Expr::CharLiteral(b'a')),
                    Box::new(Expr::CharLiteral(b'b')),
                )),
                Box::new(Expr::CharLiteral(b'c')),
            )
        );
    }

    #[test]
    fn quantifiers() {
        assert_eq!(
            parse_str("a+").unwrap(),
            Expr::Quantified { child: Box::new(Expr::CharLiteral(b'a')), min: 1, max: Bound::Unbounded }
        );
        assert_eq!(
            parse_str("a?").unwrap(),
            Expr::Quantified { child: Box::new(Expr::CharLiteral(b'a')), min: 0, max: Bound::Finite(1) }
        );
        assert_eq!(
            parse_str("a{2,5}").unwrap(),
            Expr::Quantified { child: Box::new(Expr::CharLiteral(b'a')), min: 2, max: Bound::Finite(5) }
        );
        assert_eq!(
            parse_str("a{3,}").unwrap(),
            Expr::Quantified { child: Box::new(Expr::CharLiteral(b'a')), min: 3, max: Bound::Unbounded }
        );
        assert_eq!(
            parse_str("a{4}").unwrap(),
            Expr::Quantified { child: Box::new(Expr::CharLiteral(b'a')), min: 4, max: Bound::Finite(4) }
        );
    }

    #[test]
    fn empty_group() {
        assert_eq!(
            parse_str("()").unwrap(),
            Expr::Group { child: Box::new(Expr::Empty), index: 0 }
        );
    }

    #[test]
    fn nested_group_capture_order() {
        // outer group enters before the inner one, so it gets index 0.
        let expr = parse_str("((a)b)").unwrap();
        match expr {
            Expr::Group { index: 0, child } => match *child {
                Expr::Concat(left, _) => match *left {
                    Expr::Group { index: 1, .. } => {}
                    other => panic!("expected inner group, got {other:?}"),
                },
                other => panic!("expected concat, got {other:?}"),
            },
            other => panic!("expected outer group, got {other:?}"),
        }
    }

    #[test]
    fn backreference() {
        assert_eq!(parse_str(r"(a)\1").unwrap(), {
            let group = Expr::Group { child: Box::new(Expr::CharLiteral(b'a')), index: 0 };
            Expr::Concat(Box::new(group), Box::new(Expr::BackRef(1)))
        });
    }

    #[test]
    fn char_class_with_range_and_inversion() {
        let expr = parse_str("[^a-z0]").unwrap();
        match expr {
            Expr::CharClass(class) => {
                assert!(class.inverted);
                assert_eq!(
                    class.ranges,
                    vec![ByteRange { start: b'a', end: b'z' }, ByteRange::single(b'0')]
                );
            }
            other => panic!("expected char class, got {other:?}"),
        }
    }

    #[test]
    fn trailing_dash_in_class_is_literal() {
        let expr = parse_str("[a-]").unwrap();
        match expr {
            Expr::CharClass(class) => {
                assert_eq!(class.ranges, vec![ByteRange::single(b'a'), ByteRange::single(b'-')]);
            }
            other => panic!("expected char class, got {other:?}"),
        }
    }

    #[test]
    fn capture_count_is_total_groups_seen() {
        let (_, count) = parse(lex(r"([abc]+)-([def]+)".as_bytes()).unwrap()).unwrap();
        assert_eq!(count, 2);
    }

    #[test]
    fn unmatched_close_paren_is_an_error() {
        assert_eq!(parse_str("a)"), Err(EngineError::UnexpectedClose(')')));
    }

    #[test]
    fn unterminated_group_is_an_error() {
        assert_eq!(parse_str("(ab"), Err(EngineError::UnexpectedEnd));
    }

    #[test]
    fn missing_closing_brace_is_an_error() {
        assert_eq!(parse_str("a{2,5"), Err(EngineError::UnterminatedQuantifier));
    }

    #[test]
    fn max_below_min_is_a_malformed_quantifier() {
        assert_eq!(parse_str("a{5,2}"), Err(EngineError::MalformedQuantifier));
    }

    #[test]
    fn shorthand_classes_desugar() {
        assert_eq!(parse_str(r"\d").unwrap(), Expr::CharClass(CharClass::digit()));
        assert_eq!(parse_str(r"\w").unwrap(), Expr::CharClass(CharClass::word()));
    }

    #[test]
    fn anchors_are_atoms() {
        assert_eq!(
            parse_str("^a$").unwrap(),
            Expr::Concat(
                Box::new(Expr::Concat(
                    Box::new(Expr::StartAnchor),
                    Box::new(Expr::CharLiteral(b'a')),
                )),
                Box::new(Expr::EndAnchor),
            )
        );
    }
}

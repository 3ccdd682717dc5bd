//! Recursive-descent parser over a lexed token sequence.
//!
//! The grammar, from lowest to highest precedence:
//!
//! ```text
//! expr   := term (('+' | '-') term)*
//! term   := factor (('*' | '/') factor)*
//! factor := INTEGER | '(' expr ')'
//! ```
//!
//! Both binary levels fold left so `a - b - c` parses as `(a - b) - c`. The
//! parser looks at a single token at a time and never moves its cursor
//! backwards.
//!
//! Parsing, code generation and dropping a tree all recurse once per level,
//! so both tree depth and parenthesis nesting are capped at [`MAX_DEPTH`].

use crate::ast::{BinaryOp, ExprNode};
use crate::diagnostic::{Diagnostic, Locate};
use crate::lexer::{Token, TokenKind};
use crate::seq::Seq;

/// The deepest tree, and the deepest parenthesis nesting, the parser accepts.
/// A lone literal has a depth of one.
pub const MAX_DEPTH: usize = 512;

/// A subtree paired with its depth.
type Subtree = (ExprNode, usize);

/// ParseErr represents a token sequence that doesn't form a valid expression.
#[derive(Clone, PartialEq, Eq)]
pub enum ParseErr {
    /// A factor was expected but the token is neither an integer nor `(`.
    UnexpectedToken { offset: usize, found: TokenKind },
    /// A parenthesized expression was not followed by `)`.
    UnclosedParenthesis { offset: usize },
    /// A complete expression was followed by more tokens.
    TrailingInput { offset: usize },
    /// The expression, or its parenthesis nesting, exceeds [`MAX_DEPTH`].
    NestingTooDeep { offset: usize },
}

impl ParseErr {
    pub fn diagnostic(&self, source: &str) -> Diagnostic {
        let message = match self {
            Self::UnexpectedToken { .. } => "expected a number or opening parenthesis",
            Self::UnclosedParenthesis { .. } => {
                "no closing parenthesis matches the opening parenthesis"
            }
            Self::TrailingInput { .. } => "unexpected input after expression",
            Self::NestingTooDeep { .. } => "expression nests too deeply",
        };

        Diagnostic::new(source, self.offset(), message)
    }
}

impl Locate for ParseErr {
    fn offset(&self) -> usize {
        match self {
            Self::UnexpectedToken { offset, .. }
            | Self::UnclosedParenthesis { offset }
            | Self::TrailingInput { offset }
            | Self::NestingTooDeep { offset } => *offset,
        }
    }
}

impl std::fmt::Debug for ParseErr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedToken { offset, found } => {
                write!(f, "unexpected token `{}` at offset {}", found, offset)
            }
            Self::UnclosedParenthesis { offset } => {
                write!(f, "unclosed parenthesis at offset {}", offset)
            }
            Self::TrailingInput { offset } => {
                write!(f, "trailing input at offset {}", offset)
            }
            Self::NestingTooDeep { offset } => {
                write!(f, "nesting exceeds {} levels at offset {}", MAX_DEPTH, offset)
            }
        }
    }
}

impl std::fmt::Display for ParseErr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", &self)
    }
}

pub type ParseResult<T> = Result<T, ParseErr>;

/// Parses a whole token sequence as a single expression, requiring that no
/// tokens other than `Eof` follow it.
pub fn parse(tokens: Seq<Token>, source: &str) -> ParseResult<ExprNode> {
    let mut parser = Parser::new(tokens, source);
    let (expr, depth) = parser.expr_tree()?;

    let next = parser.current();
    if next.kind != TokenKind::Eof {
        return Err(ParseErr::TrailingInput {
            offset: next.offset,
        });
    }

    tracing::debug!(
        nodes = expr.size(),
        depth,
        "parsed expression"
    );
    tracing::trace!(ast = %expr);

    Ok(expr)
}

/// Parser holds a token sequence and a cursor into it.
#[derive(Debug)]
pub struct Parser<'a> {
    source: &'a str,
    tokens: Seq<Token>,
    pos: usize,
    nesting: usize,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: Seq<Token>, source: &'a str) -> Self {
        Self {
            source,
            tokens,
            pos: 0,
            nesting: 0,
        }
    }

    /// Returns the index of the token under the cursor.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Returns the token under the cursor. A cursor that has run past the
    /// sequence observes an `Eof` positioned at the end of the source.
    pub fn current(&self) -> Token {
        self.tokens
            .get(self.pos)
            .copied()
            .unwrap_or_else(|| Token::new(self.source.len(), TokenKind::Eof))
    }

    /// Advances the cursor if the current token is of `kind`, returning
    /// whether it did.
    pub fn consume(&mut self, kind: TokenKind) -> bool {
        if self.current().kind != kind {
            return false;
        }

        self.pos += 1;
        true
    }

    /// expr := term (('+' | '-') term)*
    pub fn expr(&mut self) -> ParseResult<ExprNode> {
        self.expr_tree().map(|(node, _)| node)
    }

    fn expr_tree(&mut self) -> ParseResult<Subtree> {
        let (mut node, mut depth) = self.term()?;

        loop {
            let offset = self.current().offset;
            let op = if self.consume(TokenKind::Plus) {
                BinaryOp::Add
            } else if self.consume(TokenKind::Minus) {
                BinaryOp::Sub
            } else {
                return Ok((node, depth));
            };

            let (rhs, rhs_depth) = self.term()?;
            depth = deepen(depth.max(rhs_depth), offset)?;
            node = ExprNode::binary(op, node, rhs);
        }
    }

    /// term := factor (('*' | '/') factor)*
    fn term(&mut self) -> ParseResult<Subtree> {
        let (mut node, mut depth) = self.factor()?;

        loop {
            let offset = self.current().offset;
            let op = if self.consume(TokenKind::Star) {
                BinaryOp::Mul
            } else if self.consume(TokenKind::Slash) {
                BinaryOp::Div
            } else {
                return Ok((node, depth));
            };

            let (rhs, rhs_depth) = self.factor()?;
            depth = deepen(depth.max(rhs_depth), offset)?;
            node = ExprNode::binary(op, node, rhs);
        }
    }

    /// factor := INTEGER | '(' expr ')'
    fn factor(&mut self) -> ParseResult<Subtree> {
        let offset = self.current().offset;
        if self.consume(TokenKind::LeftParen) {
            self.nesting += 1;
            if self.nesting > MAX_DEPTH {
                return Err(ParseErr::NestingTooDeep { offset });
            }

            let subtree = self.expr_tree()?;
            self.nesting -= 1;

            return if self.consume(TokenKind::RightParen) {
                Ok(subtree)
            } else {
                Err(ParseErr::UnclosedParenthesis {
                    offset: self.current().offset,
                })
            };
        }

        match self.current() {
            Token {
                kind: TokenKind::IntLiteral,
                value: Some(value),
                ..
            } => {
                self.pos += 1;
                Ok((literal_expr!(value), 1))
            }
            Token { offset, kind, .. } => Err(ParseErr::UnexpectedToken {
                offset,
                found: kind,
            }),
        }
    }
}

/// Returns the depth of a binary node whose deepest child is `child_depth`
/// deep, failing at the operator's `offset` once it exceeds [`MAX_DEPTH`].
fn deepen(child_depth: usize, offset: usize) -> ParseResult<usize> {
    let depth = child_depth + 1;

    if depth > MAX_DEPTH {
        Err(ParseErr::NestingTooDeep { offset })
    } else {
        Ok(depth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::lex;

    fn parse_source(source: &str) -> ParseResult<ExprNode> {
        let tokens = lex(source).expect("source should lex");
        parse(tokens, source)
    }

    #[test]
    fn should_parse_complex_arithmetic_expression() {
        // 13 - 6 + 4 * 5 + 8 / 3
        let tokens: Seq<Token> = vec![
            Token::with_value(0, 13),
            Token::new(0, TokenKind::Minus),
            Token::with_value(0, 6),
            Token::new(0, TokenKind::Plus),
            Token::with_value(0, 4),
            Token::new(0, TokenKind::Star),
            Token::with_value(0, 5),
            Token::new(0, TokenKind::Plus),
            Token::with_value(0, 8),
            Token::new(0, TokenKind::Slash),
            Token::with_value(0, 3),
            Token::new(0, TokenKind::Eof),
        ]
        .into_iter()
        .collect();

        assert_eq!(
            Ok(term_expr!(
                term_expr!(
                    term_expr!(literal_expr!(13), '-', literal_expr!(6)),
                    '+',
                    factor_expr!(literal_expr!(4), '*', literal_expr!(5))
                ),
                '+',
                factor_expr!(literal_expr!(8), '/', literal_expr!(3))
            )),
            parse(tokens, "")
        )
    }

    #[test]
    fn should_fold_same_precedence_operators_left() {
        assert_eq!(
            Ok("(- (- 10 4) 3)".to_string()),
            parse_source("10 - 4 - 3").map(|e| e.to_string())
        );
        assert_eq!(
            Ok("(/ (* (/ 100 5) 2) 4)".to_string()),
            parse_source("100 / 5 * 2 / 4").map(|e| e.to_string())
        );
    }

    #[test]
    fn should_bind_multiplication_tighter_than_addition() {
        assert_eq!(
            Ok(term_expr!(
                literal_expr!(2),
                '+',
                factor_expr!(literal_expr!(3), '*', literal_expr!(4))
            )),
            parse_source("2 + 3 * 4")
        )
    }

    #[test]
    fn should_override_precedence_with_parentheses() {
        assert_eq!(
            Ok(factor_expr!(
                term_expr!(literal_expr!(2), '+', literal_expr!(3)),
                '*',
                literal_expr!(4)
            )),
            parse_source("(2 + 3) * 4")
        );
        assert_eq!(Ok(literal_expr!(42)), parse_source("((((42))))"));
    }

    #[test]
    fn should_advance_cursor_only_on_match() {
        let source = "1 + 2";
        let mut parser = Parser::new(lex(source).unwrap(), source);

        assert!(!parser.consume(TokenKind::Plus));
        assert_eq!(0, parser.position());

        assert_eq!(Ok(term_expr!(literal_expr!(1), '+', literal_expr!(2))), parser.expr());
        assert_eq!(3, parser.position());
        assert_eq!(TokenKind::Eof, parser.current().kind);
    }

    #[test]
    fn should_stop_at_tokens_outside_the_grammar_level() {
        let source = "1 * 2 )";
        let mut parser = Parser::new(lex(source).unwrap(), source);

        assert_eq!(
            Ok(factor_expr!(literal_expr!(1), '*', literal_expr!(2))),
            parser.expr()
        );
        assert_eq!(TokenKind::RightParen, parser.current().kind);
    }

    #[test]
    fn should_treat_missing_eof_as_end_of_input() {
        let tokens: Seq<Token> = vec![Token::with_value(0, 7)].into_iter().collect();
        let mut parser = Parser::new(tokens, "7");

        assert_eq!(Ok(literal_expr!(7)), parser.expr());
        assert_eq!(Token::new(1, TokenKind::Eof), parser.current());
    }

    #[test]
    fn should_reject_trailing_operator() {
        let source = "1 + ";
        let err = parse_source(source).unwrap_err();

        assert_eq!(
            ParseErr::UnexpectedToken {
                offset: 4,
                found: TokenKind::Eof
            },
            err
        );
        assert_eq!(
            "expected a number or opening parenthesis: end of input",
            err.diagnostic(source).to_string()
        );
    }

    #[test]
    fn should_reject_invalid_factor() {
        let source = "2 * * 3";

        assert_eq!(
            Err(ParseErr::UnexpectedToken {
                offset: 4,
                found: TokenKind::Star
            }),
            parse_source(source)
        );
        assert_eq!(
            Err(ParseErr::UnexpectedToken {
                offset: 0,
                found: TokenKind::Eof
            }),
            parse_source("")
        );
    }

    #[test]
    fn should_reject_unclosed_parenthesis() {
        let source = "(1 + 2";
        let err = parse_source(source).unwrap_err();

        assert_eq!(ParseErr::UnclosedParenthesis { offset: 6 }, err);
        assert_eq!(
            "no closing parenthesis matches the opening parenthesis: end of input",
            err.diagnostic(source).to_string()
        );

        assert_eq!(
            Err(ParseErr::UnclosedParenthesis { offset: 9 }),
            parse_source("((1 + 2) 3")
        );
    }

    #[test]
    fn should_reject_trailing_input() {
        assert_eq!(
            Err(ParseErr::TrailingInput { offset: 2 }),
            parse_source("1 2")
        );
        assert_eq!(
            Err(ParseErr::TrailingInput { offset: 5 }),
            parse_source("(1+2))")
        );
    }

    #[test]
    fn should_bound_tree_depth_of_long_chains() {
        // n terms fold into a tree n levels deep.
        let at_limit = vec!["1"; MAX_DEPTH].join("+");
        let over_limit = vec!["1"; MAX_DEPTH + 1].join("+");

        assert_eq!(
            Ok(MAX_DEPTH),
            parse_source(&at_limit).map(|expr| expr.depth())
        );

        let err = parse_source(&over_limit).unwrap_err();
        // the offending `+` sits just before the last term.
        assert_eq!(
            ParseErr::NestingTooDeep {
                offset: over_limit.len() - 2
            },
            err
        );
        assert_eq!(
            "expression nests too deeply: +1",
            err.diagnostic(&over_limit).to_string()
        );
    }

    #[test]
    fn should_bound_parenthesis_nesting() {
        let nested = |levels: usize| format!("{}1{}", "(".repeat(levels), ")".repeat(levels));

        assert_eq!(Ok(literal_expr!(1)), parse_source(&nested(MAX_DEPTH)));
        assert_eq!(
            Err(ParseErr::NestingTooDeep { offset: MAX_DEPTH }),
            parse_source(&nested(MAX_DEPTH + 1))
        );
    }
}

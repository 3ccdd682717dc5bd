use parcel::parsers::character::{any_character, expect_character};
use parcel::prelude::v1::*;

use crate::diagnostic::{Diagnostic, Locate};
use crate::seq::Seq;

/// LexErr represents a failure to convert source text into tokens.
#[derive(Clone, PartialEq, Eq)]
pub enum LexErr {
    /// A character that cannot begin any token.
    UnexpectedCharacter { offset: usize },
    /// A digit run whose value does not fit a machine word.
    IntegerOutOfRange { offset: usize },
    Unspecified { offset: usize, reason: String },
}

impl LexErr {
    pub fn diagnostic(&self, source: &str) -> Diagnostic {
        let message = match self {
            Self::UnexpectedCharacter { .. } => "unable to tokenize".to_string(),
            Self::IntegerOutOfRange { .. } => "integer literal out of range".to_string(),
            Self::Unspecified { reason, .. } => format!("unspecified lexer err ({})", reason),
        };

        Diagnostic::new(source, self.offset(), message)
    }
}

impl Locate for LexErr {
    fn offset(&self) -> usize {
        match self {
            Self::UnexpectedCharacter { offset }
            | Self::IntegerOutOfRange { offset }
            | Self::Unspecified { offset, .. } => *offset,
        }
    }
}

impl std::fmt::Debug for LexErr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedCharacter { offset } => {
                write!(f, "unexpected character at offset {}", offset)
            }
            Self::IntegerOutOfRange { offset } => {
                write!(f, "integer literal out of range at offset {}", offset)
            }
            Self::Unspecified { offset, reason } => {
                write!(f, "unspecified lexer err at offset {}: {}", offset, reason)
            }
        }
    }
}

impl std::fmt::Display for LexErr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", &self)
    }
}

/// LexResult returns either a terminated token sequence or the first error
/// encountered.
pub type LexResult = Result<Seq<Token>, LexErr>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Eof,

    // Binary operators
    Plus,
    Minus,
    Star,
    Slash,

    // Structural tokens
    IntLiteral,
    LeftParen,
    RightParen,
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let repr = match self {
            TokenKind::Eof => "end of input",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::IntLiteral => "integer literal",
            TokenKind::LeftParen => "(",
            TokenKind::RightParen => ")",
        };

        write!(f, "{}", repr)
    }
}

/// A single lexical unit. `offset` is the byte offset of the token's first
/// character and is only consulted when reporting errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub offset: usize,
    pub kind: TokenKind,
    pub value: Option<i64>,
}

impl Token {
    pub fn new(offset: usize, kind: TokenKind) -> Self {
        Self {
            offset,
            kind,
            value: None,
        }
    }

    pub fn with_value(offset: usize, value: i64) -> Self {
        Self {
            offset,
            kind: TokenKind::IntLiteral,
            value: Some(value),
        }
    }
}

/// The raw match for a single token before any value conversion.
#[derive(Debug, Clone, PartialEq)]
enum Lexeme {
    Punctuator(TokenKind),
    Digits(String),
}

/// Converts `source` into a token sequence terminated by exactly one
/// `TokenKind::Eof`.
pub fn lex(source: &str) -> LexResult {
    let input: Vec<(usize, char)> = source.char_indices().collect();
    let mut tokens = Seq::new();
    let mut remainder: &[(usize, char)] = &input;

    loop {
        remainder = skip_whitespace(remainder);
        let offset = match remainder.first() {
            Some(&(offset, _)) => offset,
            None => break,
        };

        match lexeme().parse(remainder) {
            Ok(MatchStatus::Match {
                span: _,
                remainder: rem,
                inner,
            }) => {
                tokens.push_mut(to_token(offset, inner)?);
                remainder = rem;
            }
            Ok(MatchStatus::NoMatch(_)) => return Err(LexErr::UnexpectedCharacter { offset }),
            Err(reason) => return Err(LexErr::Unspecified { offset, reason }),
        }
    }

    tokens.push_mut(Token::new(source.len(), TokenKind::Eof));
    tracing::debug!(tokens = tokens.len(), "lexed source");

    Ok(tokens)
}

fn to_token(offset: usize, lexeme: Lexeme) -> Result<Token, LexErr> {
    match lexeme {
        Lexeme::Punctuator(kind) => Ok(Token::new(offset, kind)),
        // a digit-only run can only fail to parse on overflow.
        Lexeme::Digits(digits) => digits
            .parse::<i64>()
            .map(|value| Token::with_value(offset, value))
            .map_err(|_| LexErr::IntegerOutOfRange { offset }),
    }
}

fn skip_whitespace(input: &[(usize, char)]) -> &[(usize, char)] {
    match parcel::zero_or_more(whitespace()).parse(input) {
        Ok(MatchStatus::Match { remainder, .. }) => remainder,
        _ => input,
    }
}

fn lexeme<'a>() -> impl parcel::Parser<'a, &'a [(usize, char)], Lexeme> {
    punctuator()
        .map(Lexeme::Punctuator)
        .or(|| digits().map(Lexeme::Digits))
}

fn punctuator<'a>() -> impl parcel::Parser<'a, &'a [(usize, char)], TokenKind> {
    parcel::one_of(vec![
        expect_character('+').map(|_| TokenKind::Plus),
        expect_character('-').map(|_| TokenKind::Minus),
        expect_character('*').map(|_| TokenKind::Star),
        expect_character('/').map(|_| TokenKind::Slash),
        expect_character('(').map(|_| TokenKind::LeftParen),
        expect_character(')').map(|_| TokenKind::RightParen),
    ])
}

fn digits<'a>() -> impl parcel::Parser<'a, &'a [(usize, char)], String> {
    parcel::one_or_more(any_character().predicate(|c| c.is_ascii_digit()))
        .map(|digits| digits.into_iter().collect::<String>())
}

fn whitespace<'a>() -> impl parcel::Parser<'a, &'a [(usize, char)], char> {
    // matches C's isspace, which includes the vertical tab.
    any_character().predicate(|c| c.is_ascii_whitespace() || *c == '\x0b')
}

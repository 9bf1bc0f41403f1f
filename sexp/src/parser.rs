//! Build s-expression trees from tokens.
//!
//! The [`Parser`] pulls tokens from a [`Tokenizer`] on demand. When it reads
//! an opening parenthesis inside a list it pushes the token back onto the
//! tokenizer and recurses, so it keeps no buffer of its own.
use delegate::delegate;
use std::io::BufRead;
use std::str::Chars;

use crate::lexer::{Tokenizer, UnreadError};
use crate::source::{ReadChars, ReadError};
use crate::token::{Span, Token, TokenKind};
use crate::tree::Sexp;

/// Result of reading one expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The input held no more tokens.
    Empty,
    /// The input ended inside a list.
    Incomplete,
    /// A complete expression.
    Complete(Sexp),
}

impl Outcome {
    /// Converts into the expression, collapsing empty and incomplete input.
    pub fn into_sexp(self) -> Option<Sexp> {
        match self {
            Outcome::Complete(sexp) => Some(sexp),
            Outcome::Empty | Outcome::Incomplete => None,
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, Outcome::Complete(_))
    }
}

/// A parse error.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("expected an opening delimiter but found {found}")]
    Unexpected { found: TokenKind, span: Span },
    #[error("lists nested deeper than {limit} levels")]
    TooDeep { limit: usize, span: Span },
    #[error("unexpected end of input")]
    Incomplete { span: Span },
    #[error(transparent)]
    Unread(#[from] UnreadError),
    #[error("failed to read input: {0}")]
    Read(#[from] ReadError),
}

impl ParseError {
    /// Location of the error in the input, where there is one.
    pub fn span(&self) -> Option<Span> {
        match self {
            ParseError::Unexpected { span, .. } => Some(span.clone()),
            ParseError::TooDeep { span, .. } => Some(span.clone()),
            ParseError::Incomplete { span } => Some(span.clone()),
            ParseError::Unread(_) | ParseError::Read(_) => None,
        }
    }
}

/// Shorthand for a result specialised to parse errors.
pub type Result<T, E = ParseError> = std::result::Result<T, E>;

/// A recursive descent parser driving a [`Tokenizer`].
#[derive(Debug, Clone)]
pub struct Parser<I> {
    tokenizer: Tokenizer<I>,
    max_depth: Option<usize>,
}

impl<I: Iterator<Item = char>> Parser<I> {
    pub fn new(tokenizer: Tokenizer<I>) -> Self {
        Self {
            tokenizer,
            max_depth: None,
        }
    }

    /// Fail on lists nested more than `limit` levels deep, instead of
    /// recursing without bound.
    pub fn with_max_depth(mut self, limit: usize) -> Self {
        self.max_depth = Some(limit);
        self
    }

    /// Reads the next expression.
    ///
    /// Empty and incomplete input are reported as [`Outcome`]s; a closing
    /// parenthesis where an expression should start is an error.
    pub fn read(&mut self) -> Result<Outcome> {
        self.read_nested(0)
    }

    /// Parses the next expression, or returns `None` when the input is empty
    /// or ends before the expression is complete.
    pub fn parse(&mut self) -> Result<Option<Sexp>> {
        self.read().map(Outcome::into_sexp)
    }

    /// Parses expressions until the input is exhausted.
    ///
    /// Unlike [`Parser::parse`], input that ends in the middle of an
    /// expression is an error here.
    pub fn parse_all(&mut self) -> Result<Vec<Sexp>> {
        let mut forms = Vec::new();

        loop {
            match self.read()? {
                Outcome::Complete(sexp) => {
                    forms.push(sexp);
                    self.tokenizer.commit();
                }
                Outcome::Empty => return Ok(forms),
                Outcome::Incomplete => {
                    let offset = self.tokenizer.offset();
                    return Err(ParseError::Incomplete {
                        span: offset..offset,
                    });
                }
            }
        }
    }

    #[inline]
    pub fn tokenizer(&self) -> &Tokenizer<I> {
        &self.tokenizer
    }

    #[inline]
    pub fn into_tokenizer(self) -> Tokenizer<I> {
        self.tokenizer
    }

    delegate! {
        to self.tokenizer {
            pub fn peek(&mut self) -> Option<Token>;
            pub fn history(&self) -> &[Token];
            pub fn offset(&self) -> usize;
        }
    }

    fn read_nested(&mut self, depth: usize) -> Result<Outcome> {
        let Some(token) = self.tokenizer.next_token() else {
            return Ok(Outcome::Empty);
        };

        match token.kind() {
            TokenKind::OpenParen => {}
            kind if kind.is_atom() => return Ok(Outcome::Complete(Sexp::Atom(token))),
            found => {
                tracing::debug!(%found, span = ?token.span(), "unexpected token");
                return Err(ParseError::Unexpected {
                    found,
                    span: token.span(),
                });
            }
        }

        if let Some(limit) = self.max_depth {
            if depth >= limit {
                tracing::debug!(limit, span = ?token.span(), "nesting limit reached");
                return Err(ParseError::TooDeep {
                    limit,
                    span: token.span(),
                });
            }
        }

        let mut children = Vec::new();

        loop {
            let Some(token) = self.tokenizer.next_token() else {
                tracing::debug!(offset = self.tokenizer.offset(), "input ended inside a list");
                return Ok(Outcome::Incomplete);
            };

            match token.kind() {
                TokenKind::OpenParen => {
                    self.tokenizer.unread()?;
                    match self.read_nested(depth + 1)? {
                        Outcome::Complete(child) => children.push(child),
                        Outcome::Empty | Outcome::Incomplete => return Ok(Outcome::Incomplete),
                    }
                }
                TokenKind::CloseParen => break,
                _ => children.push(Sexp::Atom(token)),
            }
        }

        Ok(Outcome::Complete(Sexp::List(children)))
    }
}

impl<R: BufRead> Parser<ReadChars<R>> {
    /// Takes the read failure that ended the input early, if any.
    pub fn take_read_error(&mut self) -> Option<ReadError> {
        self.tokenizer.chars_mut().take_error()
    }
}

fn text_parser(text: &str) -> Parser<Chars<'_>> {
    Parser::new(Tokenizer::new(text))
}

/// Parse one s-expression from a string.
///
/// Returns `None` when the string is empty or ends before the expression is
/// complete. Anything after the first expression is ignored.
pub fn parse(text: &str) -> Result<Option<Sexp>> {
    text_parser(text).parse()
}

/// Parse one s-expression from a string, telling empty and incomplete
/// input apart.
pub fn read(text: &str) -> Result<Outcome> {
    text_parser(text).read()
}

/// Parse all top-level s-expressions in a string.
pub fn parse_all(text: &str) -> Result<Vec<Sexp>> {
    text_parser(text).parse_all()
}

/// Parse one s-expression from UTF-8 text in a buffered reader.
pub fn from_reader<R: BufRead>(reader: R) -> Result<Option<Sexp>> {
    let mut parser = Parser::new(Tokenizer::from_reader(reader));
    let parsed = parser.parse();

    // A failed read ends the input early, so it takes precedence.
    if let Some(err) = parser.take_read_error() {
        return Err(err.into());
    }

    parsed
}

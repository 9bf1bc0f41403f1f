//! Lexical tokens produced by the [`Tokenizer`].
//!
//! [`Tokenizer`]: crate::lexer::Tokenizer
use smol_str::SmolStr;
use std::fmt::Display;
use std::ops::Range;

use crate::escape::unescape;

/// Span within the input, in bytes.
pub type Span = Range<usize>;

/// The lexical class of a [`Token`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    OpenParen,
    CloseParen,
    Symbol,
    Number,
    String,
}

impl TokenKind {
    /// Whether tokens of this kind can stand alone as an atom.
    #[inline]
    pub fn is_atom(self) -> bool {
        matches!(self, TokenKind::Symbol | TokenKind::Number | TokenKind::String)
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TokenKind::OpenParen => "`(`",
            TokenKind::CloseParen => "`)`",
            TokenKind::Symbol => "symbol",
            TokenKind::Number => "number",
            TokenKind::String => "string",
        };
        f.write_str(name)
    }
}

/// A classified substring of the input.
///
/// The text is kept verbatim: string tokens include their quotes and any
/// escape sequences. Two tokens are equal when their kind and text are,
/// regardless of where in the input they were found.
#[derive(Debug, Clone)]
pub struct Token {
    kind: TokenKind,
    text: SmolStr,
    span: Span,
}

impl Token {
    pub(crate) fn new(kind: TokenKind, text: impl Into<SmolStr>, span: Span) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
        }
    }

    /// Creates a token that did not come from any input.
    pub(crate) fn detached(kind: TokenKind, text: impl Into<SmolStr>) -> Self {
        Self::new(kind, text, 0..0)
    }

    #[inline]
    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn span(&self) -> Span {
        self.span.clone()
    }

    /// Returns `false` for a string token that ran into the end of the input
    /// before its closing quote.
    pub fn is_terminated(&self) -> bool {
        if self.kind != TokenKind::String {
            return true;
        }

        let text = self.text.as_str();
        text.len() >= 2
            && text.starts_with('"')
            && text.ends_with('"')
            && !ends_in_escape(&text[..text.len() - 1])
    }

    /// Decodes the value of a string token, with its quotes removed and its
    /// escape sequences replaced.
    ///
    /// Returns `None` for tokens of other kinds, unterminated strings and
    /// strings containing an invalid escape sequence.
    pub fn unescaped(&self) -> Option<String> {
        if self.kind != TokenKind::String || !self.is_terminated() {
            return None;
        }

        unescape(&self.text[1..self.text.len() - 1])
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.text == other.text
    }
}

impl Eq for Token {}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// Whether `text` ends in an odd number of backslashes, i.e. whether a quote
/// appended to it would be escaped.
pub(crate) fn ends_in_escape(text: &str) -> bool {
    text.chars().rev().take_while(|c| *c == '\\').count() % 2 == 1
}

#[cfg(test)]
mod test {
    use super::{ends_in_escape, Token, TokenKind};
    use rstest::rstest;

    #[test]
    fn equality_ignores_span() {
        let a = Token::new(TokenKind::Symbol, "a", 0..1);
        let b = Token::new(TokenKind::Symbol, "a", 7..8);
        assert_eq!(a, b);
        assert_ne!(a, Token::new(TokenKind::String, "a", 0..1));
    }

    #[rstest]
    #[case(r#""abc""#, true)]
    #[case(r#""""#, true)]
    #[case(r#""a\\""#, true)]
    #[case(r#""a\""#, false)]
    #[case(r#""abc"#, false)]
    #[case(r#"""#, false)]
    #[case("é\"", false)]
    #[case("ab", false)]
    fn test_is_terminated(#[case] text: &str, #[case] expected: bool) {
        let token = Token::new(TokenKind::String, text, 0..text.len());
        assert_eq!(expected, token.is_terminated());
    }

    #[rstest]
    #[case(r#""he said \"hello\"""#, Some(r#"he said "hello""#))]
    #[case(r#""tab\there""#, Some("tab\there"))]
    #[case(r#""\u{1F60A}""#, Some("\u{1F60A}"))]
    #[case(r#""open"#, None)]
    #[case("é\"", None)]
    fn test_unescaped(#[case] text: &str, #[case] expected: Option<&str>) {
        let token = Token::new(TokenKind::String, text, 0..text.len());
        assert_eq!(expected.map(String::from), token.unescaped());
    }

    #[test]
    fn symbols_have_no_unescaped_value() {
        assert_eq!(None, Token::new(TokenKind::Symbol, "add", 0..3).unescaped());
    }

    #[rstest]
    #[case("abc", false)]
    #[case(r"abc\", true)]
    #[case(r"abc\\", false)]
    #[case(r"\\\", true)]
    fn test_ends_in_escape(#[case] text: &str, #[case] expected: bool) {
        assert_eq!(expected, ends_in_escape(text));
    }
}

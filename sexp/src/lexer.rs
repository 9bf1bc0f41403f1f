//! Tokenize s-expressions with unbounded backtracking.
use std::io::BufRead;
use std::str::Chars;

use crate::source::{CharSource, ReadChars};
use crate::token::{ends_in_escape, Token, TokenKind};

/// Error returned when unreading more tokens than have been read.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unable to unread")]
pub struct UnreadError;

/// Converts a character stream into [`Token`]s.
///
/// Every token handed out is kept on a history stack until it is unread.
/// Unread tokens go onto a second stack, from which they are handed out again
/// before any more input is scanned. This allows backtracking to any depth
/// without scanning a character twice.
#[derive(Debug, Clone)]
pub struct Tokenizer<I> {
    source: CharSource<I>,
    history: Vec<Token>,
    unread: Vec<Token>,
}

impl<'a> Tokenizer<Chars<'a>> {
    pub fn new(text: &'a str) -> Self {
        Self::from_chars(text.chars())
    }
}

impl<R: BufRead> Tokenizer<ReadChars<R>> {
    /// Tokenizes UTF-8 text read from `reader`.
    ///
    /// Reading stops at the first I/O or decoding error, which looks like the
    /// end of the input to the tokenizer. Use [`Tokenizer::chars_mut`] and
    /// [`ReadChars::take_error`] to tell the two apart.
    pub fn from_reader(reader: R) -> Self {
        Self::from_chars(ReadChars::new(reader))
    }
}

impl<I: Iterator<Item = char>> Tokenizer<I> {
    pub fn from_chars(chars: impl IntoIterator<IntoIter = I>) -> Self {
        Self {
            source: CharSource::new(chars.into_iter()),
            history: Vec::new(),
            unread: Vec::new(),
        }
    }

    /// Returns the next token, or `None` at the end of the input.
    pub fn next_token(&mut self) -> Option<Token> {
        let token = match self.unread.pop() {
            Some(token) => token,
            None => self.scan()?,
        };

        self.history.push(token.clone());
        Some(token)
    }

    /// Reverses the most recent [`next_token`](Tokenizer::next_token).
    pub fn unread(&mut self) -> Result<(), UnreadError> {
        let token = self.history.pop().ok_or(UnreadError)?;
        tracing::trace!(kind = ?token.kind(), text = token.text(), "unread token");
        self.unread.push(token);
        Ok(())
    }

    /// Returns the next token without consuming it.
    pub fn peek(&mut self) -> Option<Token> {
        let token = self.next_token()?;
        self.unread().ok()?;
        Some(token)
    }

    /// Tokens that have been read and not unread, oldest first.
    #[inline]
    pub fn history(&self) -> &[Token] {
        &self.history
    }

    /// Forgets the history, so that the tokens read so far can no longer be
    /// unread.
    pub fn commit(&mut self) {
        self.history.clear();
    }

    /// Byte offset of the input cursor.
    ///
    /// Unread tokens do not move the cursor back; it always points past the
    /// last character scanned.
    #[inline]
    pub fn offset(&self) -> usize {
        self.source.offset()
    }

    #[inline]
    pub fn chars_mut(&mut self) -> &mut I {
        self.source.inner_mut()
    }

    fn scan(&mut self) -> Option<Token> {
        let first = loop {
            let c = self.source.read()?;
            if !c.is_whitespace() {
                break c;
            }
        };

        let start = self.source.offset() - first.len_utf8();
        let mut text = String::from(first);

        let kind = match first {
            '(' => TokenKind::OpenParen,
            ')' => TokenKind::CloseParen,
            '"' => {
                self.take_string(&mut text);
                TokenKind::String
            }
            c if is_number_start(c) => {
                self.take_while(&mut text, is_number_char);
                TokenKind::Number
            }
            _ => {
                self.take_while(&mut text, is_symbol_char);
                TokenKind::Symbol
            }
        };

        let token = Token::new(kind, text, start..self.source.offset());
        tracing::trace!(kind = ?token.kind(), text = token.text(), span = ?token.span(), "scanned token");
        Some(token)
    }

    fn take_while(&mut self, text: &mut String, accept: impl Fn(char) -> bool) {
        while let Some(c) = self.source.read() {
            if !accept(c) {
                let pushed = self.source.unread();
                debug_assert!(pushed, "a character that was just read can be pushed back");
                break;
            }
            text.push(c);
        }
    }

    /// Consumes the rest of a quoted string, up to and including a closing
    /// quote that is not escaped by an odd run of backslashes.
    fn take_string(&mut self, text: &mut String) {
        while let Some(c) = self.source.read() {
            let closes = c == '"' && !ends_in_escape(text);
            text.push(c);
            if closes {
                return;
            }
        }

        tracing::debug!(text = text.as_str(), "string is not terminated");
    }
}

impl<I: Iterator<Item = char>> Iterator for Tokenizer<I> {
    type Item = Token;

    #[inline]
    fn next(&mut self) -> Option<Token> {
        self.next_token()
    }
}

fn is_number_start(c: char) -> bool {
    c.is_numeric() || c == '-'
}

fn is_number_char(c: char) -> bool {
    c.is_numeric() || matches!(c, '-' | '.' | 'e')
}

fn is_symbol_char(c: char) -> bool {
    !(c.is_whitespace() || matches!(c, '(' | ')' | '"'))
}

//! S-expressions as a data format.
//!
//! # Syntax
//!
//! This crate reads the plain s-expressions used by test-script and
//! configuration languages such as WebAssembly's `.wast` scripts:
//!
//! ```text
//! (assert_return (invoke "add" (i32.const 1) (i32.const 1)) (i32.const 2))
//! ```
//!
//! - **Lists** are sequences of values, delimited on the outside by `(` and `)`
//!   and separated by whitespace.
//!
//! - **Atoms** are one of three lexical classes, kept verbatim:
//!
//!    - **Numbers** start with a digit or `-` and extend over any run of
//!      digits, `-`, `.` and `e`. The run is not checked to be a well formed
//!      number.
//!    - **Strings** are enclosed within double quotes. A quote preceded by an
//!      odd number of backslashes does not end the string. Escape sequences
//!      are kept as written; see [`Token::unescaped`] to decode them.
//!    - **Symbols** are any other run of characters other than whitespace,
//!      `(`, `)` and `"`.
//!
//! # Parsing
//!
//! [`parse`] reads one expression and returns `None` when the input is empty
//! or ends before the expression is complete. [`read`] tells those two cases
//! apart, and [`parse_all`] reads every top-level expression. Input that
//! places a `)` where an expression should start is an error.
//!
//! [`to_text`] prints the canonical text of a tree, which parses back to an
//! equal tree.

pub(crate) mod escape;
pub mod lexer;
pub mod parser;
pub mod printer;
pub(crate) mod source;
pub mod token;
pub mod tree;

pub use lexer::{Tokenizer, UnreadError};
pub use parser::{from_reader, parse, parse_all, read, Outcome, ParseError, Parser};
pub use printer::{to_text, to_text_pretty};
pub use source::{ReadChars, ReadError};
pub use token::{Span, Token, TokenKind};
pub use tree::Sexp;

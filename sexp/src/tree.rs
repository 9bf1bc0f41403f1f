use proptest::arbitrary::Arbitrary;
use std::fmt::Display;

use crate::escape::escape_string;
use crate::lexer::Tokenizer;
use crate::printer::to_text;
use crate::token::{Token, TokenKind};

/// An s-expression represented as a recursive enum.
///
/// Atoms hold a symbol, number or string token exactly as it was lexed.
/// Equality is structural: spans are not compared.
///
/// Tokens only come from a [`Tokenizer`] or the constructors below, but the
/// `Atom` variant does not check the token kind: wrapping a `(` or `)` token
/// by hand gives a tree that does not print back to the same structure.
/// [`Sexp::atom`] checks the kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sexp {
    Atom(Token),
    List(Vec<Sexp>),
}

impl Sexp {
    /// Wraps a token as an atom. Delimiter tokens are rejected.
    pub fn atom(token: Token) -> Option<Self> {
        token.kind().is_atom().then_some(Sexp::Atom(token))
    }

    pub fn list(children: impl IntoIterator<Item = Sexp>) -> Self {
        Sexp::List(children.into_iter().collect())
    }

    /// Creates a symbol atom, if `name` would be read back as a single symbol.
    pub fn symbol(name: &str) -> Option<Self> {
        lex_single(name, TokenKind::Symbol).map(Sexp::Atom)
    }

    /// Creates a number atom, if `text` would be read back as a single number.
    ///
    /// Numbers are lexical: any run of digits, `-`, `.` and `e` starting
    /// with a digit or `-` is accepted.
    pub fn number(text: &str) -> Option<Self> {
        lex_single(text, TokenKind::Number).map(Sexp::Atom)
    }

    /// Creates a string atom holding `value`, quoting and escaping it.
    pub fn string(value: &str) -> Self {
        Sexp::Atom(Token::detached(TokenKind::String, escape_string(value)))
    }

    #[inline]
    pub fn is_atom(&self) -> bool {
        matches!(self, Sexp::Atom(_))
    }

    #[inline]
    pub fn is_list(&self) -> bool {
        matches!(self, Sexp::List(_))
    }

    pub fn as_atom(&self) -> Option<&Token> {
        match self {
            Sexp::Atom(token) => Some(token),
            Sexp::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Sexp]> {
        match self {
            Sexp::Atom(_) => None,
            Sexp::List(children) => Some(children),
        }
    }

    /// The symbol at the head of a list, such as `module` in `(module ...)`.
    pub fn head_symbol(&self) -> Option<&str> {
        match self.as_list()?.first()? {
            Sexp::Atom(token) if token.kind() == TokenKind::Symbol => Some(token.text()),
            _ => None,
        }
    }

    /// Renders the canonical text of this expression.
    #[inline]
    pub fn to_text(&self) -> String {
        to_text(self)
    }
}

impl Display for Sexp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&to_text(self))
    }
}

impl From<Vec<Sexp>> for Sexp {
    fn from(value: Vec<Sexp>) -> Self {
        Self::List(value)
    }
}

fn lex_single(text: &str, kind: TokenKind) -> Option<Token> {
    let mut tokenizer = Tokenizer::new(text);
    let token = tokenizer.next_token()?;

    let exact = token.kind() == kind && token.text() == text && tokenizer.next_token().is_none();
    exact.then(|| Token::detached(kind, text))
}

impl Arbitrary for Sexp {
    type Parameters = ();
    type Strategy = proptest::strategy::BoxedStrategy<Self>;

    fn arbitrary_with(_args: Self::Parameters) -> Self::Strategy {
        use proptest::prelude::*;

        let atom = |kind: TokenKind| move |text: String| Sexp::Atom(Token::detached(kind, text));

        let leaf = proptest::prop_oneof![
            "[a-zA-Z_$!?<>=+*/][a-zA-Z0-9_.$!?<>=+*/-]{0,12}".prop_map(atom(TokenKind::Symbol)),
            "-?[0-9]{1,6}(\\.[0-9]{1,4})?(e[0-9]{1,2})?".prop_map(atom(TokenKind::Number)),
            any::<String>().prop_map(|value| Sexp::string(&value)),
        ];

        leaf.prop_recursive(8, 256, 10, |inner| {
            proptest::collection::vec(inner, 0..10).prop_map(Sexp::List)
        })
        .boxed()
    }
}

//! Print s-expressions as text.
//!
//! [`to_text`] produces the canonical single line rendering: atoms verbatim,
//! list items separated by one space. [`to_text_pretty`] breaks lists that do
//! not fit into the given width over several indented lines. The output of
//! either printer parses back to an equal tree.
mod pretty;
mod simple;
pub use pretty::to_text_pretty;
pub use simple::to_text;

use crate::token::Token;
use crate::tree::Sexp;

/// Trait for types that can print s-expressions.
pub trait Printer: Sized {
    type Error;

    /// Print an atom.
    fn atom(&mut self, token: &Token) -> Result<(), Self::Error>;

    /// Print a list given a function that prints the contents.
    fn list<F>(&mut self, f: F) -> Result<(), Self::Error>
    where
        F: FnOnce(&mut Self) -> Result<(), Self::Error>;

    /// Print an expression and everything nested within it.
    fn print(&mut self, sexp: &Sexp) -> Result<(), Self::Error> {
        match sexp {
            Sexp::Atom(token) => self.atom(token),
            Sexp::List(children) => self.list(|printer| {
                for child in children {
                    printer.print(child)?;
                }
                Ok(())
            }),
        }
    }
}

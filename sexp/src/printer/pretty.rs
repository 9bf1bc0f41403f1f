use std::convert::Infallible;

use super::Printer;
use crate::token::Token;
use crate::tree::Sexp;
use pretty::DocAllocator as _;

/// A pretty printer that uses the `pretty` crate to format the output.
struct PrettyPrinter<'a> {
    arena: &'a pretty::Arena<'a>,
    items: Vec<pretty::DocBuilder<'a, pretty::Arena<'a>>>,
}

impl<'a> Printer for PrettyPrinter<'a> {
    type Error = Infallible;

    fn atom(&mut self, token: &Token) -> Result<(), Self::Error> {
        let doc = self.arena.text(token.text().to_string());
        self.items.push(doc);
        Ok(())
    }

    fn list<F>(&mut self, f: F) -> Result<(), Self::Error>
    where
        F: FnOnce(&mut Self) -> Result<(), Self::Error>,
    {
        let position = self.items.len();
        f(self)?;
        let items = self.items.drain(position..);

        let docs = self
            .arena
            .intersperse(items, self.arena.line())
            .nest(2)
            .group();

        self.items.push(
            self.arena
                .text("(")
                .append(docs)
                .append(self.arena.text(")")),
        );

        Ok(())
    }
}

/// Pretty print an s-expression, breaking lists that are wider than `width`
/// over multiple indented lines.
pub fn to_text_pretty(sexp: &Sexp, width: usize) -> String {
    let arena = pretty::Arena::new();
    let mut printer = PrettyPrinter {
        items: vec![],
        arena: &arena,
    };

    let _ = printer.print(sexp);

    let doc = arena.concat(printer.items);

    let mut string = String::new();
    let _ = doc.render_fmt(width, &mut string);
    string
}

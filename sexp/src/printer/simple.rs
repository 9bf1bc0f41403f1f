use std::convert::Infallible;

use super::Printer;
use crate::token::Token;
use crate::tree::Sexp;

/// A printer that formats the output on a single line.
struct SimplePrinter {
    needs_whitespace: bool,
    string: String,
}

impl SimplePrinter {
    pub fn new() -> Self {
        Self {
            needs_whitespace: false,
            string: String::new(),
        }
    }

    #[inline]
    fn separate(&mut self) {
        if self.needs_whitespace {
            self.string.push(' ');
        }
    }
}

impl Printer for SimplePrinter {
    type Error = Infallible;

    fn atom(&mut self, token: &Token) -> Result<(), Self::Error> {
        self.separate();
        self.needs_whitespace = true;
        self.string.push_str(token.text());
        Ok(())
    }

    fn list<F>(&mut self, f: F) -> Result<(), Self::Error>
    where
        F: FnOnce(&mut Self) -> Result<(), Self::Error>,
    {
        self.separate();
        self.string.push('(');
        self.needs_whitespace = false;
        f(self)?;
        self.string.push(')');
        self.needs_whitespace = true;
        Ok(())
    }
}

/// Print an s-expression as canonical text.
///
/// This function does not produce any line breaks, indentation, or unnecessary whitespace.
/// Atoms appear exactly as they were lexed, so string atoms keep their quotes and escapes.
/// Where human readability is a concern, consider using the [`to_text_pretty`] function instead.
///
/// [`to_text_pretty`]: `crate::printer::to_text_pretty`
pub fn to_text(sexp: &Sexp) -> String {
    let mut printer = SimplePrinter::new();
    let _ = printer.print(sexp);
    printer.string
}

#[cfg(test)]
mod test {
    use super::to_text;
    use crate::tree::Sexp;
    use rstest::rstest;

    fn symbol(name: &str) -> Sexp {
        Sexp::symbol(name).unwrap()
    }

    #[test]
    fn atoms_verbatim() {
        assert_eq!("i32.const", to_text(&symbol("i32.const")));
        assert_eq!("-0.0", to_text(&Sexp::number("-0.0").unwrap()));
        assert_eq!(r#""a\tb""#, to_text(&Sexp::string("a\tb")));
    }

    #[rstest]
    #[case(Sexp::List(vec![]), "()")]
    #[case(Sexp::list([symbol("a")]), "(a)")]
    #[case(Sexp::list([symbol("a"), Sexp::List(vec![])]), "(a ())")]
    #[case(Sexp::list([Sexp::List(vec![]), Sexp::List(vec![])]), "(() ())")]
    #[case(
        Sexp::list([symbol("a"), Sexp::list([symbol("b"), symbol("c")])]),
        "(a (b c))"
    )]
    fn lists(#[case] sexp: Sexp, #[case] expected: &str) {
        assert_eq!(expected, to_text(&sexp));
    }
}

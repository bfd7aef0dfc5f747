use super::{number_text, string_text, symbol_text, Print, PrintError, Printer};
use crate::value::Number;
use pretty::DocAllocator as _;

/// A pretty printer that uses the `pretty` crate to format the output.
struct PrettyPrinter<'a> {
    arena: &'a pretty::Arena<'a>,
    items: Vec<pretty::DocBuilder<'a, pretty::Arena<'a>>>,
}

impl<'a> PrettyPrinter<'a> {
    fn push_text(&mut self, text: String) {
        let doc = self.arena.text(text);
        self.items.push(doc);
    }
}

impl<'a> Printer for PrettyPrinter<'a> {
    type Error = PrintError;

    fn nil(&mut self) -> Result<(), Self::Error> {
        self.push_text("()".to_string());
        Ok(())
    }

    fn symbol(&mut self, name: &str) -> Result<(), Self::Error> {
        let escaped = symbol_text(name)?;
        self.push_text(escaped);
        Ok(())
    }

    fn string(&mut self, string: &str) -> Result<(), Self::Error> {
        self.push_text(string_text(string));
        Ok(())
    }

    fn number(&mut self, number: Number) -> Result<(), Self::Error> {
        let text = number_text(number)?;
        self.push_text(text);
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

    fn dot(&mut self) -> Result<(), Self::Error> {
        self.push_text(".".to_string());
        Ok(())
    }
}

/// Pretty print a `T` into an s-expression string that tries to stay within
/// `width` columns. Consecutive top-level forms are separated by a blank line.
pub fn to_string_pretty<T: Print>(value: T, width: usize) -> Result<String, PrintError> {
    let arena = pretty::Arena::new();
    let mut printer = PrettyPrinter {
        items: vec![],
        arena: &arena,
    };

    value.print(&mut printer)?;

    let double_line = arena.line().append(arena.line());
    let doc = arena.intersperse(printer.items, double_line);

    let mut string = String::new();
    let _ = doc.render_fmt(width, &mut string);
    Ok(string)
}

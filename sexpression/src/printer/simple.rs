use super::{number_text, string_text, symbol_text, Print, PrintError, Printer};
use crate::value::Number;

/// A printer that writes everything on a single line.
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
    fn push_atom(&mut self, atom: &str) {
        if self.needs_whitespace {
            self.string.push(' ');
        }

        self.needs_whitespace = true;
        self.string.push_str(atom);
    }
}

impl Printer for SimplePrinter {
    type Error = PrintError;

    fn nil(&mut self) -> Result<(), Self::Error> {
        self.push_atom("()");
        Ok(())
    }

    fn symbol(&mut self, name: &str) -> Result<(), Self::Error> {
        self.push_atom(&symbol_text(name)?);
        Ok(())
    }

    fn string(&mut self, string: &str) -> Result<(), Self::Error> {
        self.push_atom(&string_text(string));
        Ok(())
    }

    fn number(&mut self, number: Number) -> Result<(), Self::Error> {
        self.push_atom(&number_text(number)?);
        Ok(())
    }

    fn list<F>(&mut self, f: F) -> Result<(), Self::Error>
    where
        F: FnOnce(&mut Self) -> Result<(), Self::Error>,
    {
        if self.needs_whitespace {
            self.string.push(' ');
        }

        self.string.push('(');
        self.needs_whitespace = false;
        f(self)?;
        self.string.push(')');
        self.needs_whitespace = true;

        Ok(())
    }

    #[inline]
    fn dot(&mut self) -> Result<(), Self::Error> {
        self.push_atom(".");
        Ok(())
    }
}

/// Print a `T` into an s-expression string.
///
/// This function does not produce any line breaks, indentation, or unnecessary whitespace.
/// It is intended to be used when the output is intended to be consumed by another program.
/// Where human readability is a concern, consider using the [`to_string_pretty`] function instead.
///
/// [`to_string_pretty`]: `crate::printer::to_string_pretty`
pub fn to_string<T: Print>(value: T) -> Result<String, PrintError> {
    let mut printer = SimplePrinter::new();
    value.print(&mut printer)?;
    Ok(printer.string)
}

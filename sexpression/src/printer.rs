//! Print values into s-expressions.
//!
//! A [`Printer`] receives a stream of atoms and delimited lists from a
//! [`Print`] implementation and decides how to lay them out. Two printers are
//! provided: [`to_string`] writes everything on one line, [`to_string_pretty`]
//! breaks lists to fit a target width.
use std::rc::Rc;
use std::sync::Arc;

use crate::escape::{escape_string, escape_symbol};
use crate::value::{Number, Value};

mod pretty;
mod simple;
pub use pretty::to_string_pretty;
pub use simple::to_string;

/// Failure to print a value that has no s-expression text form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PrintError {
    #[error("unsupported value: {0}")]
    UnsupportedValue(String),
}

/// Trait for types that can print s-expressions.
pub trait Printer: Sized {
    type Error;

    /// Print the empty list.
    fn nil(&mut self) -> Result<(), Self::Error>;

    /// Print a symbol given its unescaped name.
    fn symbol(&mut self, name: &str) -> Result<(), Self::Error>;

    /// Print a string.
    fn string(&mut self, string: &str) -> Result<(), Self::Error>;

    /// Print a number.
    fn number(&mut self, number: Number) -> Result<(), Self::Error>;

    /// Print a list given a function that prints the contents.
    fn list<F>(&mut self, f: F) -> Result<(), Self::Error>
    where
        F: FnOnce(&mut Self) -> Result<(), Self::Error>;

    /// Print the `.` that separates the tail of a dotted list.
    fn dot(&mut self) -> Result<(), Self::Error>;

    /// Print a printable value.
    fn print(&mut self, value: impl Print) -> Result<(), Self::Error> {
        value.print(self)
    }
}

/// Trait for types that can be printed as an s-expression.
pub trait Print {
    fn print<P: Printer>(&self, printer: &mut P) -> Result<(), P::Error>;
}

pub(crate) fn symbol_text(name: &str) -> Result<String, PrintError> {
    escape_symbol(name)
        .ok_or_else(|| PrintError::UnsupportedValue("symbol with an empty name".into()))
}

pub(crate) fn string_text(string: &str) -> String {
    escape_string(string)
}

pub(crate) fn number_text(number: Number) -> Result<String, PrintError> {
    if !number.is_finite() {
        return Err(PrintError::UnsupportedValue(format!(
            "non-finite number {}",
            number
        )));
    }
    Ok(number.to_string())
}

impl Print for Number {
    fn print<P: Printer>(&self, printer: &mut P) -> Result<(), P::Error> {
        printer.number(*self)
    }
}

impl Print for Value {
    fn print<P: Printer>(&self, printer: &mut P) -> Result<(), P::Error> {
        match self {
            Value::Nil => printer.nil(),
            Value::Number(number) => printer.number(*number),
            Value::String(string) => printer.string(string),
            Value::Symbol(symbol) => printer.symbol(symbol.name()),
            Value::Cons(cell) => printer.list(|printer| {
                for item in cell.iter() {
                    printer.print(item)?;
                }
                match cell.tail() {
                    Value::Nil => Ok(()),
                    tail => {
                        printer.dot()?;
                        printer.print(tail)
                    }
                }
            }),
        }
    }
}

impl<T: Print + ?Sized> Print for &T {
    #[inline]
    fn print<P: Printer>(&self, printer: &mut P) -> Result<(), P::Error> {
        (**self).print(printer)
    }
}

impl<T: Print> Print for Box<T> {
    #[inline]
    fn print<P: Printer>(&self, printer: &mut P) -> Result<(), P::Error> {
        printer.print(self.as_ref())
    }
}

impl<T: Print> Print for Rc<T> {
    #[inline]
    fn print<P: Printer>(&self, printer: &mut P) -> Result<(), P::Error> {
        printer.print(self.as_ref())
    }
}

impl<T: Print> Print for Arc<T> {
    #[inline]
    fn print<P: Printer>(&self, printer: &mut P) -> Result<(), P::Error> {
        printer.print(self.as_ref())
    }
}

/// Prints the items as consecutive top-level forms.
impl<T: Print> Print for Vec<T> {
    #[inline]
    fn print<P: Printer>(&self, printer: &mut P) -> Result<(), P::Error> {
        for item in self {
            printer.print(item)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::PrintError;
    use crate::symbol::intern;
    use crate::value::{list, list_with_tail, Cons, Value};
    use crate::{parse, parse_all, to_string, to_string_pretty};
    use proptest::prelude::*;
    use rstest::rstest;

    fn sym(name: &str) -> Value {
        Value::Symbol(intern(name))
    }

    #[rstest]
    #[case(Value::Nil, "()")]
    #[case(Value::from(-124i64), "-124")]
    #[case(Value::from(2.5f64), "2.5")]
    #[case(Value::from("a \"b\"\n"), r#""a \"b\"\n""#)]
    #[case(sym("aaa bbb"), r"aaa\ bbb")]
    #[case(sym("42"), r"\42")]
    #[case(list([1i64, 2, 3]), "(1 2 3)")]
    #[case(list([list([1i64]), Value::Nil]), "((1) ())")]
    #[case(Cons::new(sym("hoge"), sym("fuga")).into(), "(hoge . fuga)")]
    #[case(list_with_tail([1i64, 2], 3i64), "(1 2 . 3)")]
    fn test_to_string(#[case] value: Value, #[case] expected: &str) {
        assert_eq!(expected, to_string(&value).unwrap());
    }

    #[test]
    fn test_vec_prints_forms() {
        let values = vec![Value::from(1i64), sym("x"), list([2i64])];
        assert_eq!("1 x (2)", to_string(&values).unwrap());
    }

    #[test]
    fn test_unsupported_values() {
        assert!(matches!(
            to_string(&Value::from(f64::NAN)),
            Err(PrintError::UnsupportedValue(_))
        ));
        assert!(matches!(
            to_string(&list([Value::from(f64::INFINITY)])),
            Err(PrintError::UnsupportedValue(_))
        ));
        assert!(matches!(
            to_string_pretty(&sym(""), 80),
            Err(PrintError::UnsupportedValue(_))
        ));
    }

    #[test]
    fn test_pretty_breaks_long_lists() {
        let value = parse("(define (square x) (* x x))").unwrap();
        assert_eq!(
            "(define (square x) (* x x))",
            to_string_pretty(&value, 80).unwrap()
        );
        let narrow = to_string_pretty(&value, 10).unwrap();
        assert!(narrow.contains('\n'));
        assert_eq!(parse(&narrow).unwrap(), value);
    }

    proptest! {
        #[test]
        fn print_then_parse(values: Vec<Value>) {
            let sexp = to_string(&values).unwrap();
            let parsed = parse_all(&sexp).unwrap();
            prop_assert_eq!(values, parsed);
        }

        #[test]
        fn pretty_print_then_parse(value: Value, width in 0..120usize) {
            let sexp = to_string_pretty(&value, width).unwrap();
            let parsed = parse(&sexp).unwrap();
            prop_assert_eq!(value, parsed);
        }
    }
}

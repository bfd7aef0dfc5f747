//! Lisp-style s-expressions, read into cons cells and printed from
//! JSON-compatible trees.
//!
//! # Syntax
//!
//! - **Whitespace** is exactly space, tab, newline, carriage return and form
//!   feed. Any other character, including a vertical tab or a Unicode space
//!   such as U+00A0, is an ordinary symbol character.
//!
//! - **Lists** are sequences of forms delimited by `(` and `)` and separated
//!   by whitespace. `()` is the empty list. Lists may nest at most
//!   [`reader::DEFAULT_MAX_DEPTH`] levels deep unless a [`Reader`] is given
//!   another limit. A bare `.` before the last form makes the list dotted:
//!   `(a . b)` is a single pair, `(a b . c)` a chain of two pairs ending in
//!   `c`.
//!
//! - **Numbers** are decimal integers or floats with an optional leading `-`,
//!   e.g. `1`, `-124`, `10.309`. No exponents or other radixes. Integers
//!   beyond the `u64` range are read as floats.
//!
//! - **Strings** are enclosed in double quotes. A backslash escapes the next
//!   character; `\n` and `\t` stand for newline and tab.
//!
//! - **Symbols** are any other run of characters up to whitespace, `(`, `)`,
//!   `"`, `'` or `` ` ``. A backslash includes the next character verbatim,
//!   so `aaa\ bbb` is the single symbol `aaa bbb`. Symbols are interned in a
//!   [`SymbolTable`] and compare by identity.
//!
//! # Round trips
//!
//! [`parse`] reads one form into a [`Value`]. [`stringify`] prints a [`Tree`]
//! (the JSON-shaped model) and [`Tree::try_from`] converts a [`Value`] back.
//! [`to_string`] prints any [`Value`] so that it reads back unchanged.

pub(crate) mod escape;
pub(crate) mod lexer;
pub mod printer;
pub mod reader;
pub mod symbol;
pub mod tree;
pub mod value;

pub use printer::{to_string, to_string_pretty, PrintError};
pub use reader::{parse, parse_all, parse_with, ParseError, ParseErrorKind, Reader, DEFAULT_MAX_DEPTH};
pub use symbol::{intern, Symbol, SymbolTable};
pub use tree::{ConvertError, Tree};
pub use value::{list, list_with_tail, Cons, Number, Value};

/// Print a [`Tree`] as a single-line s-expression.
pub fn stringify(tree: &Tree) -> Result<String, PrintError> {
    to_string(tree)
}

/// Print a [`Tree`] as an s-expression laid out to fit `width` columns.
pub fn stringify_pretty(tree: &Tree, width: usize) -> Result<String, PrintError> {
    to_string_pretty(tree, width)
}

use logos::Logos;

use crate::lexer::{is_delimiter, starts_numeric};

/// Escape sequences inside a quoted string.
#[derive(Debug, Clone, Logos)]
enum StringEscape {
    #[token(r"\n", |_| '\n', priority = 10)]
    #[token(r"\t", |_| '\t', priority = 10)]
    #[regex(r"\\(.|\n)", |lex| lex.slice().chars().nth(1))]
    Escaped(char),

    #[regex(r"[^\\]")]
    Literal,
}

/// Escape sequences inside a bare symbol. Every escaped character stands for
/// itself.
#[derive(Debug, Clone, Logos)]
enum SymbolEscape {
    #[regex(r"\\(.|\n)", |lex| lex.slice().chars().nth(1))]
    Escaped(char),

    #[regex(r"[^\\]")]
    Literal,
}

/// Decodes the body of a quoted string (without the surrounding quotes).
///
/// Returns `None` if the body ends in a dangling backslash.
pub fn unescape_string(str: &str) -> Option<String> {
    let mut lexer = StringEscape::lexer(str);
    let mut output = String::with_capacity(str.len());

    while let Some(token) = lexer.next() {
        match token.ok()? {
            StringEscape::Escaped(c) => output.push(c),
            StringEscape::Literal => output.push_str(lexer.slice()),
        }
    }

    Some(output)
}

/// Decodes the raw text of a bare atom into a symbol name.
pub fn unescape_symbol(str: &str) -> Option<String> {
    let mut lexer = SymbolEscape::lexer(str);
    let mut output = String::with_capacity(str.len());

    while let Some(token) = lexer.next() {
        match token.ok()? {
            SymbolEscape::Escaped(c) => output.push(c),
            SymbolEscape::Literal => output.push_str(lexer.slice()),
        }
    }

    Some(output)
}

/// Encodes a symbol name so that it reads back as the same symbol.
///
/// The empty name has no bare form and yields `None`.
pub fn escape_symbol(str: &str) -> Option<String> {
    if str.is_empty() {
        return None;
    }

    let mut output = String::with_capacity(str.len() + 2);

    // A leading escape keeps `.` and number-like names from being read as
    // the dot separator or as a number.
    if str == "." || starts_numeric(str) {
        output.push('\\');
    }

    for c in str.chars() {
        if is_delimiter(c) {
            output.push('\\');
        }
        output.push(c);
    }

    Some(output)
}

pub fn escape_string(str: &str) -> String {
    let mut output = String::with_capacity(str.len() + 2);
    output.push('"');

    for c in str.chars() {
        match c {
            '\n' => output.push_str(r"\n"),
            '\t' => output.push_str(r"\t"),
            '"' => output.push_str(r#"\""#),
            '\\' => output.push_str(r"\\"),
            c => output.push(c),
        }
    }

    output.push('"');
    output
}

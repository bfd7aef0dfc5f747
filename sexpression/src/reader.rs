//! Read values from s-expressions.
use crate::escape::{unescape_string, unescape_symbol};
use crate::lexer::{starts_numeric, Token};
use crate::symbol::SymbolTable;
use crate::value::{list, list_with_tail, Number, Value};
use delegate::delegate;
use logos::Logos;
use ordered_float::OrderedFloat;
use smol_str::SmolStr;
use std::ops::Range;

/// Span within a string.
pub type Span = Range<usize>;

/// Shorthand for a result specialised to parse errors.
pub type Result<T, E = ParseError> = std::result::Result<T, E>;

/// The kind of failure encountered while reading.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseErrorKind {
    #[error("unterminated string")]
    UnterminatedString,
    #[error("unterminated list")]
    UnterminatedList,
    #[error("invalid number literal `{0}`")]
    InvalidNumber(SmolStr),
    #[error("unexpected )")]
    UnexpectedClose,
    #[error("unexpected .")]
    UnexpectedDot,
    #[error("expected exactly one form between . and )")]
    MalformedDottedList,
    #[error("unexpected end of input")]
    UnexpectedEof,
    #[error("syntax error")]
    Syntax,
    #[error("lists nested deeper than {0} levels")]
    TooDeep(usize),
}

/// A parse error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at {}..{}", span.start, span.end)]
pub struct ParseError {
    kind: ParseErrorKind,
    span: Span,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, span: Span) -> Self {
        ParseError { kind, span }
    }

    pub fn kind(&self) -> &ParseErrorKind {
        &self.kind
    }

    pub fn span(&self) -> Span {
        self.span.clone()
    }
}

/// Maximum list nesting accepted by [`Reader::new`].
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Reads values from the front of a string, one form at a time.
///
/// The cursor only moves forward. Each call to [`Reader::read`] consumes
/// exactly the tokens of one form and leaves the rest of the input untouched.
/// Lists nested deeper than the reader's maximum depth fail with
/// [`ParseErrorKind::TooDeep`].
pub struct Reader<'a> {
    source: &'a str,
    lexer: logos::Lexer<'a, Token>,
    symbols: &'a SymbolTable,
    depth: usize,
    max_depth: usize,
    failed: bool,
}

impl<'a> Reader<'a> {
    /// Creates a reader that interns symbols into `symbols`.
    pub fn new(source: &'a str, symbols: &'a SymbolTable) -> Self {
        Self {
            source,
            lexer: Token::lexer(source),
            symbols,
            depth: 0,
            max_depth: DEFAULT_MAX_DEPTH,
            failed: false,
        }
    }

    /// Sets the deepest list nesting this reader accepts.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Reads the next form, or `None` once only whitespace remains.
    pub fn read(&mut self) -> Result<Option<Value>> {
        match self.next_token()? {
            Some((token, span)) => self.form(token, span).map(Some),
            None => Ok(None),
        }
    }

    delegate! {
        to self.lexer {
            /// The span of the last token consumed.
            pub fn span(&self) -> Span;
            /// The unread remainder of the input.
            pub fn remainder(&self) -> &'a str;
        }
    }

    fn next_token(&mut self) -> Result<Option<(Token, Span)>> {
        let Some(token) = self.lexer.next() else {
            return Ok(None);
        };
        let span = self.lexer.span();

        match token {
            Ok(token) => Ok(Some((token, span))),
            // The only way a token starting with `"` can fail to lex is by
            // running out of input before the closing quote.
            Err(()) if self.source[span.start..].starts_with('"') => Err(ParseError::new(
                ParseErrorKind::UnterminatedString,
                span.start..self.source.len(),
            )),
            Err(()) => Err(ParseError::new(ParseErrorKind::Syntax, span)),
        }
    }

    fn form(&mut self, token: Token, span: Span) -> Result<Value> {
        match token {
            Token::OpenList => self.list(span),
            Token::CloseList => Err(ParseError::new(ParseErrorKind::UnexpectedClose, span)),
            Token::Dot => Err(ParseError::new(ParseErrorKind::UnexpectedDot, span)),
            Token::Number => self.number(span),
            Token::String => {
                let body = &self.source[span.start + 1..span.end - 1];
                let string = unescape_string(body)
                    .ok_or_else(|| ParseError::new(ParseErrorKind::Syntax, span))?;
                Ok(Value::String(string.into()))
            }
            Token::Atom => self.atom(span),
        }
    }

    fn list(&mut self, open: Span) -> Result<Value> {
        if self.depth >= self.max_depth {
            return Err(ParseError::new(
                ParseErrorKind::TooDeep(self.max_depth),
                open,
            ));
        }

        self.depth += 1;
        let result = self.list_items(&open);
        self.depth -= 1;
        result
    }

    fn list_items(&mut self, open: &Span) -> Result<Value> {
        let mut items = Vec::new();

        loop {
            let Some((token, span)) = self.next_token()? else {
                return Err(self.unterminated(open));
            };

            match token {
                Token::CloseList => return Ok(list(items)),
                Token::Dot if items.is_empty() => {
                    return Err(ParseError::new(ParseErrorKind::UnexpectedDot, span));
                }
                Token::Dot => {
                    let tail = match self.next_token()? {
                        None => return Err(self.unterminated(open)),
                        Some((Token::CloseList | Token::Dot, span)) => {
                            return Err(ParseError::new(
                                ParseErrorKind::MalformedDottedList,
                                span,
                            ));
                        }
                        Some((token, span)) => self.form(token, span)?,
                    };

                    return match self.next_token()? {
                        None => Err(self.unterminated(open)),
                        Some((Token::CloseList, _)) => Ok(list_with_tail(items, tail)),
                        Some((_, span)) => Err(ParseError::new(
                            ParseErrorKind::MalformedDottedList,
                            span,
                        )),
                    };
                }
                token => items.push(self.form(token, span)?),
            }
        }
    }

    fn unterminated(&self, open: &Span) -> ParseError {
        ParseError::new(
            ParseErrorKind::UnterminatedList,
            open.start..self.source.len(),
        )
    }

    fn number(&self, span: Span) -> Result<Value> {
        let text = &self.source[span.clone()];
        let invalid = || {
            ParseError::new(ParseErrorKind::InvalidNumber(text.into()), span.clone())
        };

        // Integers too large for i64 fall back to u64, then to floats.
        let number = if text.contains('.') {
            Number::Float(OrderedFloat(text.parse().map_err(|_| invalid())?))
        } else if let Ok(int) = text.parse::<i64>() {
            Number::Int(int)
        } else if let Ok(uint) = text.parse::<u64>() {
            Number::UInt(uint)
        } else {
            Number::Float(OrderedFloat(text.parse().map_err(|_| invalid())?))
        };

        Ok(Value::Number(number))
    }

    fn atom(&self, span: Span) -> Result<Value> {
        let text = &self.source[span.clone()];

        if starts_numeric(text) {
            return Err(ParseError::new(
                ParseErrorKind::InvalidNumber(text.into()),
                span,
            ));
        }

        let name =
            unescape_symbol(text).ok_or_else(|| ParseError::new(ParseErrorKind::Syntax, span))?;
        Ok(Value::Symbol(self.symbols.intern(&name)))
    }
}

/// Yields every remaining form. Iteration stops after the first error.
impl Iterator for Reader<'_> {
    type Item = Result<Value>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        match self.read() {
            Ok(value) => value.map(Ok),
            Err(err) => {
                self.failed = true;
                Some(Err(err))
            }
        }
    }
}

/// Reads the first form of `source`, interning symbols in the global table.
///
/// Anything after the first form is ignored.
pub fn parse(source: &str) -> Result<Value> {
    parse_with(source, SymbolTable::global())
}

/// Reads the first form of `source`, interning symbols in `symbols`.
pub fn parse_with(source: &str, symbols: &SymbolTable) -> Result<Value> {
    let mut reader = Reader::new(source, symbols);
    reader
        .read()?
        .ok_or_else(|| ParseError::new(ParseErrorKind::UnexpectedEof, source.len()..source.len()))
}

/// Reads every form of `source`, interning symbols in the global table.
pub fn parse_all(source: &str) -> Result<Vec<Value>> {
    Reader::new(source, SymbolTable::global()).collect()
}

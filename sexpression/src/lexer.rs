use logos::Logos;

/// Tokens of the s-expression grammar.
///
/// Tokens are pulled one at a time by the reader, so nothing past the end of
/// the form being read is ever lexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Logos)]
#[logos(skip r"[ \t\n\r\f]+")]
pub(crate) enum Token {
    #[token("(")]
    OpenList,
    #[token(")")]
    CloseList,
    /// The bare `.` separating the tail of a dotted list.
    #[token(".", priority = 5)]
    Dot,
    #[regex(r"-?[0-9]+(\.[0-9]+)?", priority = 3)]
    Number,
    #[regex(r#""([^"\\]|\\(.|\n))*""#)]
    String,
    #[regex(r#"([^ \t\n\r\f()"'`\\]|\\(.|\n))+"#)]
    Atom,
}

/// Characters that end a bare atom unless escaped with `\`.
pub(crate) fn is_delimiter(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0c' | '(' | ')' | '"' | '\'' | '`' | '\\')
}

/// Whether the raw text of an atom starts out like a number literal.
///
/// Such an atom did not lex as a [`Token::Number`], so it is a malformed
/// number rather than a symbol.
pub(crate) fn starts_numeric(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some('-') => chars.next().is_some_and(|c| c.is_ascii_digit()),
        Some(c) => c.is_ascii_digit(),
        None => false,
    }
}

#[cfg(test)]
mod test {
    use super::{starts_numeric, Token};
    use logos::Logos;
    use rstest::rstest;

    fn lex(source: &str) -> Vec<Result<(Token, &str), ()>> {
        let mut lexer = Token::lexer(source);
        let mut tokens = Vec::new();
        while let Some(token) = lexer.next() {
            tokens.push(token.map(|token| (token, lexer.slice())));
        }
        tokens
    }

    #[rstest]
    #[case("1", Token::Number)]
    #[case("-124", Token::Number)]
    #[case("10.309", Token::Number)]
    #[case(".", Token::Dot)]
    #[case("..", Token::Atom)]
    #[case("a.b", Token::Atom)]
    #[case("-", Token::Atom)]
    #[case("-abc", Token::Atom)]
    #[case("1.2.3", Token::Atom)]
    #[case(r"aaa\ bbb", Token::Atom)]
    #[case(r#""a \" b""#, Token::String)]
    #[case("\"\"", Token::String)]
    fn test_single_token(#[case] source: &str, #[case] expected: Token) {
        assert_eq!(lex(source), vec![Ok((expected, source))]);
    }

    #[test]
    fn test_delimiters_split_atoms() {
        let tokens: Vec<_> = lex("(cat\"dog\")x")
            .into_iter()
            .map(|token| token.unwrap())
            .collect();
        assert_eq!(
            tokens,
            vec![
                (Token::OpenList, "("),
                (Token::Atom, "cat"),
                (Token::String, "\"dog\""),
                (Token::CloseList, ")"),
                (Token::Atom, "x"),
            ]
        );
    }

    #[test]
    fn test_quote_is_not_a_token() {
        assert_eq!(lex("cat'dog")[0], Ok((Token::Atom, "cat")));
        assert!(lex("cat'dog")[1].is_err());
    }

    #[rstest]
    #[case("1", true)]
    #[case("-1x", true)]
    #[case("12abc", true)]
    #[case("-", false)]
    #[case("-x", false)]
    #[case("x1", false)]
    #[case("", false)]
    fn test_starts_numeric(#[case] text: &str, #[case] expected: bool) {
        assert_eq!(expected, starts_numeric(text));
    }
}

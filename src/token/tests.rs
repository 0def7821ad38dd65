//! Tests for the token module.

use super::*;

use crate::error::LexError;

use pretty_assertions::assert_eq;

/// Lexes the whole input, with no argument name positions.
fn lex_all(input: &str) -> Result<Vec<Token>, LexError> {
    let mut lexer = Lexer::new(input);
    let mut tokens = vec![];
    loop {
        let token = lexer.next_token(false)?;
        let done = token.terminal == Terminal::Eos;
        tokens.push(token);
        if done {
            return Ok(tokens);
        }
    }
}

fn terminals(input: &str) -> Vec<Terminal> {
    lex_all(input).unwrap().into_iter().map(|token| token.terminal).collect()
}

#[test]
fn punctuation_and_words() {
    use Terminal as T;

    assert_eq!(
        terminals("B(.a = list<A>[[0] = A()] 'x')"),
        vec![
            T::Bos,
            T::Ident,
            T::LeftParenthesis,
            T::Dot,
            T::Name,
            T::Equals,
            T::List,
            T::Less,
            T::Ident,
            T::Greater,
            T::LeftSquareBracket,
            T::LeftSquareBracket,
            T::Num,
            T::RightSquareBracket,
            T::Equals,
            T::Ident,
            T::LeftParenthesis,
            T::RightParenthesis,
            T::RightSquareBracket,
            T::Str,
            T::RightParenthesis,
            T::Eos,
        ]
    );
}

#[test]
fn names_versus_identifiers() {
    let tokens = lex_all("abc a_1 _x Abc aBc ABC").unwrap();
    let kinds: Vec<_> = tokens[1..tokens.len() - 1].iter().map(|t| (t.terminal, t.text.as_str())).collect();

    assert_eq!(
        kinds,
        vec![
            (Terminal::Name, "abc"),
            (Terminal::Name, "a_1"),
            (Terminal::Name, "_x"),
            (Terminal::Ident, "Abc"),
            (Terminal::Ident, "aBc"),
            (Terminal::Ident, "ABC"),
        ]
    );
}

#[test]
fn list_is_a_name_in_argument_context() {
    let mut lexer = Lexer::new("list list");
    assert_eq!(lexer.next_token(false).unwrap().terminal, Terminal::Bos);
    assert_eq!(lexer.next_token(true).unwrap().terminal, Terminal::Name);
    assert_eq!(lexer.next_token(false).unwrap().terminal, Terminal::List);
}

#[test]
fn literals_keep_raw_text() {
    let tokens = lex_all(r#"'it\'s' "say \"hi\"" 'a\
b'"#).unwrap();

    assert_eq!(tokens[1].text, r"it\'s");
    assert_eq!(tokens[2].text, r#"say \"hi\""#);
    assert_eq!(tokens[3].text, "a\\\nb");
    assert_eq!(tokens[4].terminal, Terminal::Eos);
}

#[test]
fn positions_track_lines_and_columns() {
    let tokens = lex_all("A(\n  .x = 'y'\n)\n").unwrap();
    let positions: Vec<_> = tokens.iter().map(|t| (t.pos.line, t.pos.col)).collect();

    assert_eq!(positions, vec![(1, 1), (1, 1), (1, 2), (2, 3), (2, 4), (2, 6), (2, 8), (3, 1), (3, 2)]);
}

#[test]
fn trailing_newline_belongs_to_eos() {
    let tokens = lex_all("A()\n").unwrap();
    let eos = tokens.last().unwrap();

    assert_eq!(eos.terminal, Terminal::Eos);
    assert_eq!(eos.pos, Pos::new(1, 4));
}

#[test]
fn consecutive_comments_are_skipped() {
    assert_eq!(
        terminals("# one\n# two\n  # three\nA() # trailing"),
        vec![
            Terminal::Bos,
            Terminal::Ident,
            Terminal::LeftParenthesis,
            Terminal::RightParenthesis,
            Terminal::Eos
        ]
    );
}

#[test]
fn vertical_tab_and_form_feed_are_whitespace() {
    assert_eq!(
        terminals("\x0bA(\x0b\x0c\r\t)"),
        vec![
            Terminal::Bos,
            Terminal::Ident,
            Terminal::LeftParenthesis,
            Terminal::RightParenthesis,
            Terminal::Eos
        ]
    );
}

#[test]
fn literal_errors() {
    let err = lex_all("A('abc").unwrap_err();
    assert_eq!(err, LexError::new("end of input inside literal", Pos::new(1, 7)));

    let err = lex_all("A('abc\n')").unwrap_err();
    assert_eq!(err, LexError::new("end of input line inside literal", Pos::new(1, 7)));

    let err = lex_all("A('a\tb')").unwrap_err();
    assert_eq!(err.message, "unexpected char '\\t'");
    assert_eq!(err.pos, Pos::new(1, 5));

    let err = lex_all("A('abc\\").unwrap_err();
    assert_eq!(err.message, "end of input inside literal");
}

#[test]
fn stray_characters_are_errors() {
    let err = lex_all("A(,)").unwrap_err();
    assert_eq!(err, LexError::new("unexpected char ','", Pos::new(1, 3)));

    let err = lex_all("A(\u{e9})").unwrap_err();
    assert_eq!(err, LexError::new("unexpected non-ascii char '\\xc3'", Pos::new(1, 3)));
}

#[test]
fn token_sets() {
    let set = Terminal::Dot | Terminal::RightParenthesis;

    assert!(set.contains(Terminal::Dot));
    assert!(set.contains(Terminal::RightParenthesis));
    assert!(!set.contains(Terminal::Str));
    assert_eq!(set.describe(), "')' or '.'");

    let set = set | Terminal::Str;
    assert_eq!(set.describe(), "one of ')', '.', or a string literal");
    assert_eq!(TokenSet::from(Terminal::Num).describe(), "a number");
    assert!(TokenSet::EMPTY.is_empty());
}

#[test]
fn terminal_bits_are_distinct() {
    let mut seen = 0u16;
    for terminal in Terminal::ALL {
        assert_eq!(seen & terminal.bit(), 0);
        seen |= terminal.bit();
    }
    assert_eq!(Terminal::Bos.bit(), 1);
    assert_eq!(Terminal::List.bit(), 1 << 14);
}

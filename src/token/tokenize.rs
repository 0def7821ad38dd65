//! Provides the lexing algorithm.

use super::token_types::{Pos, Terminal, Token};

use crate::error::LexError;
use crate::util::escape_byte;

/// Produces tokens from an input string on demand.
///
/// The parser asks for one token at a time, telling the lexer whether it is at
/// an argument name position (right after a `.`). There the keyword `list` is
/// not recognized, so it can be used as an ordinary argument name.
pub struct Lexer<'a> {
    input: &'a [u8],
    /// One past the last byte that counts as content. A newline ending the input
    /// is part of the `EOS` token, so it lies beyond this.
    end: usize,
    offset: usize,
    pos: Pos,
    started: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        let input = input.as_bytes();
        let end = if input.last() == Some(&b'\n') { input.len() - 1 } else { input.len() };

        Lexer { input, end, offset: 0, pos: Pos::default(), started: false }
    }

    /// Returns the next token. The first call always yields `BOS`, and once the
    /// input is exhausted every call yields `EOS`.
    pub fn next_token(&mut self, arg_ctxt: bool) -> Result<Token, LexError> {
        if !self.started {
            self.started = true;
            return Ok(Token { terminal: Terminal::Bos, text: String::new(), pos: self.pos });
        }

        self.skip_spaces();

        let pos = self.pos;
        let Some(&ch) = self.peek() else {
            return Ok(Token { terminal: Terminal::Eos, text: String::new(), pos });
        };

        let (terminal, text) = if let Some(punct) = Terminal::punctuation(ch) {
            self.advance(1);
            (punct, (ch as char).to_string())
        } else if ch == b'\'' || ch == b'"' {
            (Terminal::Str, self.take_literal(ch)?)
        } else if ch.is_ascii_digit() {
            (Terminal::Num, self.take_while(|ch| ch.is_ascii_digit()))
        } else if ch.is_ascii_alphabetic() || ch == b'_' {
            let text = self.take_while(is_identifier_char);
            (classify_identifier(&text, arg_ctxt), text)
        } else {
            return Err(unexpected_char(ch, pos));
        };

        tracing::trace!(%terminal, text = %text, %pos, "token");

        Ok(Token { terminal, text, pos })
    }

    /// The current position, i.e. where the next token would start if there were
    /// no whitespace to skip.
    pub fn pos(&self) -> Pos {
        self.pos
    }

    /* Movement */

    fn peek(&self) -> Option<&u8> {
        if self.offset < self.end {
            self.input.get(self.offset)
        } else {
            None
        }
    }

    /// Moves forward `count` bytes, keeping the line and column up to date.
    fn advance(&mut self, count: usize) {
        let stop = (self.offset + count).min(self.input.len());

        for &byte in &self.input[self.offset..stop] {
            if byte == b'\n' {
                self.pos.line += 1;
                self.pos.col = 1;
            } else {
                self.pos.col += 1;
            }
        }

        self.offset = stop;
    }

    /// Skips whitespace and `#` comments, as many as there are in a row.
    fn skip_spaces(&mut self) {
        loop {
            // Vertical tab is not ASCII whitespace to Rust, but is to C.
            while matches!(self.peek(), Some(ch) if ch.is_ascii_whitespace() || *ch == 0x0b) {
                self.advance(1);
            }

            if self.peek() == Some(&b'#') {
                while matches!(self.peek(), Some(ch) if *ch != b'\n') {
                    self.advance(1);
                }
            } else {
                return;
            }
        }
    }

    fn take_while(&mut self, pred: impl Fn(u8) -> bool) -> String {
        let start = self.offset;
        while matches!(self.peek(), Some(ch) if pred(*ch)) {
            self.advance(1);
        }

        // Only ASCII bytes pass any of the predicates used here.
        String::from_utf8_lossy(&self.input[start..self.offset]).into_owned()
    }

    /* Literals */

    /// Scans a literal starting at its opening `quote`, returning the raw text
    /// between the quotes.
    ///
    /// A backslash escapes whatever follows it, a newline included. Unescaped
    /// newlines and non-printable or non-ASCII characters are errors.
    fn take_literal(&mut self, quote: u8) -> Result<String, LexError> {
        self.advance(1);
        let start = self.offset;

        loop {
            let Some(&ch) = self.peek() else {
                return Err(LexError::new("end of input inside literal", self.pos));
            };

            if ch == quote {
                let text = String::from_utf8_lossy(&self.input[start..self.offset]).into_owned();
                self.advance(1);
                return Ok(text);
            } else if ch == b'\\' {
                self.advance(1);
                if self.peek().is_none() {
                    return Err(LexError::new("end of input inside literal", self.pos));
                }
                self.advance(1);
            } else if ch == b'\n' {
                return Err(LexError::new("end of input line inside literal", self.pos));
            } else if !is_printable(ch) {
                return Err(unexpected_char(ch, self.pos));
            } else {
                self.advance(1);
            }
        }
    }
}

/* Helpers */

fn is_identifier_char(ch: u8) -> bool {
    ch.is_ascii_alphanumeric() || ch == b'_'
}

fn is_printable(ch: u8) -> bool {
    (0x20..=0x7e).contains(&ch)
}

fn classify_identifier(text: &str, arg_ctxt: bool) -> Terminal {
    if text == "list" && !arg_ctxt {
        Terminal::List
    } else if text.bytes().all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == b'_') {
        Terminal::Name
    } else {
        Terminal::Ident
    }
}

fn unexpected_char(ch: u8, pos: Pos) -> LexError {
    let kind = if ch.is_ascii() { "" } else { "non-ascii " };
    LexError::new(format!("unexpected {kind}char '{}'", escape_byte(ch)), pos)
}

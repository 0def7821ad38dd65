//! Defines data structures related to [`Tokens`](Token)

use std::fmt::Display;
use std::ops::BitOr;

/// Represents a single token of a tree document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// What kind of token this is.
    pub terminal: Terminal,

    /// The text of the token. For string literals, this is the raw text between
    /// the quotes, with escapes left as written. Empty for `BOS` and `EOS`.
    pub text: String,

    /// Where the token starts.
    pub pos: Pos,
}

/// A 1-based line and column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pos {
    pub line: usize,
    pub col: usize,
}

impl Pos {
    pub fn new(line: usize, col: usize) -> Self {
        Pos { line, col }
    }
}

impl Default for Pos {
    fn default() -> Self {
        Pos { line: 1, col: 1 }
    }
}

impl Display for Pos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

/* Terminals */

/// Every kind of token. Each terminal owns one bit, so a lookahead token can be
/// tested against several alternatives at once with a [`TokenSet`].
///
/// The order controls the order in which the elements are displayed in some error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Terminal {
    /// Beginning of input.
    Bos,
    /// End of input. A newline that ends the input belongs to this token.
    Eos,
    LeftParenthesis,
    RightParenthesis,
    LeftSquareBracket,
    RightSquareBracket,
    Less,
    Greater,
    Dot,
    Equals,
    /// An identifier made only of lowercase letters, digits, and underscores.
    Name,
    /// Any other identifier.
    Ident,
    /// A quoted literal.
    Str,
    /// A run of decimal digits.
    Num,
    /// The `list` keyword. Not recognized right after a `.`, so that `list` may
    /// be an argument name.
    List,
}

impl Terminal {
    pub const ALL: [Terminal; 15] = [
        Terminal::Bos,
        Terminal::Eos,
        Terminal::LeftParenthesis,
        Terminal::RightParenthesis,
        Terminal::LeftSquareBracket,
        Terminal::RightSquareBracket,
        Terminal::Less,
        Terminal::Greater,
        Terminal::Dot,
        Terminal::Equals,
        Terminal::Name,
        Terminal::Ident,
        Terminal::Str,
        Terminal::Num,
        Terminal::List,
    ];

    pub fn bit(self) -> u16 {
        1 << (self as u16)
    }

    /// Maps single character punctuation to its terminal.
    pub fn punctuation(ch: u8) -> Option<Terminal> {
        Some(match ch {
            b'(' => Terminal::LeftParenthesis,
            b')' => Terminal::RightParenthesis,
            b'[' => Terminal::LeftSquareBracket,
            b']' => Terminal::RightSquareBracket,
            b'<' => Terminal::Less,
            b'>' => Terminal::Greater,
            b'.' => Terminal::Dot,
            b'=' => Terminal::Equals,
            _ => return None,
        })
    }

    /// A description of the terminal for use in prose, e.g. "an argument name".
    pub fn pretty_string(self) -> &'static str {
        #[allow(clippy::enum_glob_use)]
        use Terminal::*;

        match self {
            Bos => "the beginning of input",
            Eos => "the end of input",
            LeftParenthesis => "'('",
            RightParenthesis => "')'",
            LeftSquareBracket => "'['",
            RightSquareBracket => "']'",
            Less => "'<'",
            Greater => "'>'",
            Dot => "'.'",
            Equals => "'='",
            Name => "a name",
            Ident => "an identifier",
            Str => "a string literal",
            Num => "a number",
            List => "'list'",
        }
    }
}

/// The short form used by parse errors: `"("`, `NAME`, `EOS`, ...
impl Display for Terminal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Terminal::Bos => "BOS",
            Terminal::Eos => "EOS",
            Terminal::LeftParenthesis => "\"(\"",
            Terminal::RightParenthesis => "\")\"",
            Terminal::LeftSquareBracket => "\"[\"",
            Terminal::RightSquareBracket => "\"]\"",
            Terminal::Less => "\"<\"",
            Terminal::Greater => "\">\"",
            Terminal::Dot => "\".\"",
            Terminal::Equals => "\"=\"",
            Terminal::Name => "NAME",
            Terminal::Ident => "IDENT",
            Terminal::Str => "STR",
            Terminal::Num => "NUM",
            Terminal::List => "\"list\"",
        })
    }
}

/* Token Sets */

/// A set of terminals, stored as the union of their bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TokenSet(u16);

impl TokenSet {
    pub const EMPTY: TokenSet = TokenSet(0);

    pub fn contains(self, terminal: Terminal) -> bool {
        self.0 & terminal.bit() != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = Terminal> {
        Terminal::ALL.into_iter().filter(move |terminal| self.contains(*terminal))
    }

    /// Returns a pretty description of the set, for use in the case where the
    /// user should pick one of them, e.g. "one of '(', a name, or a number".
    pub fn describe(self) -> String {
        let terminals: Vec<&'static str> = self.iter().map(Terminal::pretty_string).collect();

        match terminals.as_slice() {
            [] => "nothing".to_string(),
            [only] => (*only).to_string(),
            [first, second] => format!("{first} or {second}"),
            [init @ .., last] => format!("one of {}, or {last}", init.join(", ")),
        }
    }
}

impl From<Terminal> for TokenSet {
    fn from(terminal: Terminal) -> Self {
        TokenSet(terminal.bit())
    }
}

impl BitOr for Terminal {
    type Output = TokenSet;

    fn bitor(self, rhs: Terminal) -> TokenSet {
        TokenSet(self.bit() | rhs.bit())
    }
}

impl BitOr<Terminal> for TokenSet {
    type Output = TokenSet;

    fn bitor(self, rhs: Terminal) -> TokenSet {
        TokenSet(self.0 | rhs.bit())
    }
}

impl BitOr for TokenSet {
    type Output = TokenSet;

    fn bitor(self, rhs: TokenSet) -> TokenSet {
        TokenSet(self.0 | rhs.0)
    }
}

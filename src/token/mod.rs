//! This module handles lexing: turning source text into [`Tokens`](Token), one
//! token of lookahead at a time.

mod token_types;
mod tokenize;

#[cfg(test)]
mod tests;

pub use token_types::{Pos, Terminal, Token, TokenSet};
pub use tokenize::Lexer;

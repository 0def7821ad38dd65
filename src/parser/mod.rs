//! This module handles parsing: turning text into a generic [`Ast`].
//!
//! The grammar is small enough for one method per rule:
//!
//! ```text
//! Tree      := TreeNode
//! TreeNode  := NodeName "(" NodeArgs ")"
//! NodeName  := IDENT
//! NodeArgs  := NodeArg* | Literal
//! NodeArg   := "." ArgName "=" ArgValue
//! ArgName   := NAME
//! ArgValue  := TreeNode | "list" "<" NodeName ">" "[" ListElem* "]" | Literal
//! ListElem  := "[" NUM "]" "=" TreeNode
//! Literal   := STR
//! ```


use crate::arena::Limits;
use crate::ast::{Ast, NodeRef};
use crate::error::{source_context, ParseError, ParseErrorKind, SyntaxError};
use crate::token::{Lexer, Terminal, Token, TokenSet};

/// Settings for one parse.
#[derive(Debug, Clone, Copy)]
pub struct ParseOptions {
    /// Attach the offending source line and a caret to errors.
    pub verbose: bool,
    pub node_limits: Limits,
    pub raw_limits: Limits,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions { verbose: false, node_limits: Limits::NODE, raw_limits: Limits::RAW }
    }
}

/// Parses `input`, named `input_name` in error messages (a path, or `<text>`).
pub fn parse(input_name: &str, input: &str, options: &ParseOptions) -> Result<Ast, ParseError> {
    let result = Parser::new(input, options).and_then(Parser::parse);

    result.map_err(|kind| {
        let context = match (&kind, options.verbose) {
            (ParseErrorKind::Lex(err), true) => Some(source_context(input, err.pos.line, err.pos.col)),
            (ParseErrorKind::Syntax(err), true) => Some(source_context(input, err.pos().line, err.pos().col)),
            _ => None,
        };

        ParseError { input_name: input_name.to_string(), kind, context }
    })
}

type ParseResult<T> = Result<T, ParseErrorKind>;

/// A recursive descent parser holding exactly one token of lookahead.
struct Parser<'a> {
    lexer: Lexer<'a>,
    tok: Token,
    ast: Ast,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str, options: &ParseOptions) -> ParseResult<Self> {
        let mut lexer = Lexer::new(input);
        let tok = lexer.next_token(false)?;

        Ok(Parser { lexer, tok, ast: Ast::with_limits(options.node_limits, options.raw_limits) })
    }

    fn parse(mut self) -> ParseResult<Ast> {
        self.need(Terminal::Bos)?;
        self.parse_tree()?;
        self.need(Terminal::Eos)?;

        tracing::debug!(nodes = self.ast.node_count(), "parsed tree");

        Ok(self.ast)
    }

    /* Token Handling */

    /// Returns true if the lookahead token is one of `set`.
    fn peek(&self, set: impl Into<TokenSet>) -> bool {
        set.into().contains(self.tok.terminal)
    }

    /// Consumes the lookahead token, which must be `terminal`, and returns it.
    fn need(&mut self, terminal: Terminal) -> ParseResult<Token> {
        self.need_in(terminal, false)
    }

    /// As [`Parser::need`], lexing the following token as an argument name
    /// position when `arg_ctxt` is set.
    fn need_in(&mut self, terminal: Terminal, arg_ctxt: bool) -> ParseResult<Token> {
        if self.tok.terminal != terminal {
            return Err(SyntaxError::Expected { expected: terminal, got: self.tok.terminal, pos: self.tok.pos }.into());
        }

        // Nothing follows the end of input.
        if terminal == Terminal::Eos {
            return Ok(self.tok.clone());
        }

        let next = self.lexer.next_token(arg_ctxt)?;
        Ok(std::mem::replace(&mut self.tok, next))
    }

    /// The error for a lookahead token that no alternative of `rule` accepts.
    fn missed(&self, rule: &'static str) -> ParseErrorKind {
        SyntaxError::Unexpected { got: self.tok.terminal, rule, pos: self.tok.pos }.into()
    }

    /* Rules */

    fn parse_tree(&mut self) -> ParseResult<NodeRef> {
        let root = self.parse_tree_node()?;
        Ok(self.ast.new_tree(root)?)
    }

    fn parse_tree_node(&mut self) -> ParseResult<NodeRef> {
        // Prevent stack overflow by allocating additional stack as required.
        stacker::maybe_grow(32 * 1024, 1024 * 1024, || {
            let name = self.parse_node_name()?;
            self.need(Terminal::LeftParenthesis)?;
            let args = self.parse_node_args()?;
            self.need(Terminal::RightParenthesis)?;

            Ok(self.ast.new_tree_node(name, args)?)
        })
    }

    fn parse_node_name(&mut self) -> ParseResult<NodeRef> {
        let token = self.need(Terminal::Ident)?;
        Ok(self.ast.new_node_name(&token.text)?)
    }

    fn parse_node_args(&mut self) -> ParseResult<NodeRef> {
        if self.peek(Terminal::Str) {
            let literal = self.parse_literal()?;
            Ok(self.ast.new_literal_args(literal)?)
        } else if self.peek(Terminal::Dot | Terminal::RightParenthesis) {
            let mut args = vec![];
            while self.peek(Terminal::Dot) {
                args.push(self.parse_node_arg()?);
            }
            Ok(self.ast.new_list_args(args)?)
        } else {
            Err(self.missed("node_args"))
        }
    }

    fn parse_node_arg(&mut self) -> ParseResult<NodeRef> {
        self.need_in(Terminal::Dot, true)?;
        let name = self.parse_arg_name()?;
        self.need(Terminal::Equals)?;
        let value = self.parse_arg_value()?;

        Ok(self.ast.new_node_arg(name, value)?)
    }

    fn parse_arg_name(&mut self) -> ParseResult<NodeRef> {
        let token = self.need(Terminal::Name)?;
        Ok(self.ast.new_arg_name(&token.text)?)
    }

    fn parse_arg_value(&mut self) -> ParseResult<NodeRef> {
        if self.peek(Terminal::Ident) {
            let node = self.parse_tree_node()?;
            Ok(self.ast.new_node_value(node)?)
        } else if self.peek(Terminal::List) {
            let list = self.parse_node_list()?;
            Ok(self.ast.new_list_value(list)?)
        } else if self.peek(Terminal::Str) {
            let literal = self.parse_literal()?;
            Ok(self.ast.new_literal_value(literal)?)
        } else {
            Err(self.missed("arg_value"))
        }
    }

    fn parse_node_list(&mut self) -> ParseResult<NodeRef> {
        self.need(Terminal::List)?;
        self.need(Terminal::Less)?;
        let base = self.parse_node_name()?;
        self.need(Terminal::Greater)?;
        self.need(Terminal::LeftSquareBracket)?;

        let mut elems = vec![];
        while self.peek(Terminal::LeftSquareBracket) {
            elems.push(self.parse_list_elem()?);
        }
        self.need(Terminal::RightSquareBracket)?;

        Ok(self.ast.new_node_list(base, elems)?)
    }

    fn parse_list_elem(&mut self) -> ParseResult<NodeRef> {
        self.need(Terminal::LeftSquareBracket)?;
        let num = self.need(Terminal::Num)?;
        let index = num.text.parse::<u8>().map_err(|_| SyntaxError::ListIndex { text: num.text.clone(), pos: num.pos })?;
        self.need(Terminal::RightSquareBracket)?;
        self.need(Terminal::Equals)?;
        let node = self.parse_tree_node()?;

        Ok(self.ast.new_list_elem(index, node)?)
    }

    fn parse_literal(&mut self) -> ParseResult<NodeRef> {
        let token = self.need(Terminal::Str)?;
        Ok(self.ast.new_literal(&token.text)?)
    }
}

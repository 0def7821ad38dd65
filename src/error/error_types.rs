//! Defines the types of errors that may occur at any stage of processing.
//! Also defines simple conversions between strings and errors, and the stage
//! errors and the overall [`TreeError`].

use crate::ast::NodeKind;
use crate::token::{Pos, Terminal};

use thiserror::Error;

/* Stage Level Errors */

// We do approximately one error type per stage. Stages whose errors have a
// fixed shape get an enum; the top level error still accepts plain strings.

/// Raised by an [`Arena`](crate::arena::Arena) that cannot hand out another slot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AllocError {
    #[error("{name} arena exceeded object limit [max_objects={max_objects}, max_bytes={max_bytes}]")]
    Objects { name: &'static str, max_objects: usize, max_bytes: usize },
    #[error("{name} arena exceeded byte limit [max_objects={max_objects}, max_bytes={max_bytes}]")]
    Bytes { name: &'static str, max_objects: usize, max_bytes: usize },
    /// The size or alignment arithmetic itself would overflow, or the alignment
    /// is not a power of two.
    #[error("{name} arena cannot place {size} bytes at alignment {align}")]
    Layout { name: &'static str, size: usize, align: usize },
}

/// Misuse of [`Arena::rollback`](crate::arena::Arena::rollback). Always our bug,
/// never the user's.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RollbackError {
    #[error("bad rollback: {name} arena is empty")]
    Empty { name: &'static str },
    #[error("bad rollback: handle is not the last allocation of the {name} arena")]
    NotLast { name: &'static str },
}

/// Problems while building generic nodes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AstError {
    #[error(transparent)]
    Alloc(#[from] AllocError),
    #[error(transparent)]
    Rollback(#[from] RollbackError),
    /// A child handle that does not belong to the node arena of this tree.
    #[error("invalid node pointer")]
    InvalidNode,
    /// A string handle that does not belong to the raw arena of this tree.
    #[error("invalid string pointer")]
    InvalidString,
    /// A child of the right arena but the wrong kind.
    #[error("invalid node kind: expected {expected}, got {got}")]
    Kind { expected: NodeKind, got: NodeKind },
    #[error("tree has no root node")]
    NoRoot,
}

/// A lexical problem, localized at a position.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct LexError {
    pub message: String,
    pub pos: Pos,
}

impl LexError {
    pub fn new(message: impl Into<String>, pos: Pos) -> Self {
        LexError { message: message.into(), pos }
    }
}

/// A grammatical problem, localized at the offending token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    #[error("expected token {expected} but got {got}")]
    Expected { expected: Terminal, got: Terminal, pos: Pos },
    #[error("unexpected token {got} in {rule}")]
    Unexpected { got: Terminal, rule: &'static str, pos: Pos },
    #[error("invalid list-elem-index '{text}'")]
    ListIndex { text: String, pos: Pos },
}

impl SyntaxError {
    pub fn pos(&self) -> Pos {
        match self {
            SyntaxError::Expected { pos, .. }
            | SyntaxError::Unexpected { pos, .. }
            | SyntaxError::ListIndex { pos, .. } => *pos,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    #[error(transparent)]
    Ast(#[from] AstError),
}

/// Any failure to turn text into a generic tree. There is never a partial result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// The file path, or `<text>` for direct input.
    pub input_name: String,
    pub kind: ParseErrorKind,
    /// The offending source line plus a caret line, present in verbose mode.
    pub context: Option<String>,
}

impl ParseError {
    pub fn pos(&self) -> Option<Pos> {
        match &self.kind {
            ParseErrorKind::Lex(err) => Some(err.pos),
            ParseErrorKind::Syntax(err) => Some(err.pos()),
            ParseErrorKind::Ast(_) => None,
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.pos() {
            Some(pos) => write!(f, "{}:{}: {}", self.input_name, pos, self.kind)?,
            None => write!(f, "{}: {}", self.input_name, self.kind)?,
        }
        if let Some(context) = &self.context {
            write!(f, "\n{context}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.kind)
    }
}

/// Problems with the schema an embedding program declares.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("ast-type {0}: declared more than once")]
    Duplicate(String),
    #[error("ast-type {ty}: unknown base type '{base}'")]
    UnknownBase { ty: String, base: String },
    #[error("ast-type {ty}: arg '{arg}': unknown type '{name}'")]
    UnknownArgType { ty: String, arg: String, name: String },
    #[error("literal type {0}: declared more than once")]
    DuplicateLiteral(String),
    #[error("ast-type {0}: cycle in base types")]
    Cycle(String),
}

/// Everything that can stop an evaluation. User input problems name the schema
/// type and argument number; [`EvalError::Stack`] marks an internal inconsistency.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("unknown AST type name '{0}'")]
    UnknownType(String),
    #[error("ast-type {ty}: expected {expected} args, but got one")]
    LiteralArgCount { ty: String, expected: usize },
    #[error("ast-type {ty}: expected {expected} args, but got {got}")]
    ArgCount { ty: String, expected: usize, got: usize },
    #[error("ast-type {ty}: arg #{arg}: expected name '{expected}', but got '{got}'")]
    ArgName { ty: String, arg: usize, expected: String, got: String },
    #[error("ast-type {ty}: arg #{arg}: cannot cast from type '{from}' to '{to}'")]
    ArgCast { ty: String, arg: usize, from: String, to: String },
    #[error("list<{base}>: arg #{arg}: cannot cast from type '{from}'")]
    ListCast { base: String, arg: usize, from: String },
    #[error("invalid list index '{got}' -- expected '{expected}'")]
    ListIndex { got: u8, expected: usize },
    #[error("ast-type {ty}: arg #{arg}: {message}")]
    InvalidValue { ty: String, arg: usize, message: String },
    #[error("unexpected visit to node '{0}'")]
    UnexpectedNode(NodeKind),
    #[error("{0}")]
    Stack(String),
    #[error(transparent)]
    Ast(#[from] AstError),
    #[error(transparent)]
    Alloc(#[from] AllocError),
}

impl EvalError {
    /// True for errors that point at a bug rather than at the input.
    pub fn is_internal(&self) -> bool {
        matches!(self, EvalError::Stack(_) | EvalError::UnexpectedNode(_))
    }
}

/* Project Level Error */

#[derive(Debug, Error)]
pub enum TreeError {
    /// An error associated with the driver itself, not any one stage.
    #[error("{0}")]
    Direct(String),
    #[error("cannot read '{path}': {error}")]
    Io {
        path: String,
        #[source]
        error: std::io::Error,
    },
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// A generic tree that cannot be walked, e.g. by a printer.
    #[error(transparent)]
    Ast(#[from] AstError),
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error(transparent)]
    Eval(#[from] EvalError),
}

impl From<&str> for TreeError {
    fn from(value: &str) -> Self {
        TreeError::Direct(value.to_string())
    }
}

impl From<String> for TreeError {
    fn from(value: String) -> Self {
        TreeError::Direct(value)
    }
}

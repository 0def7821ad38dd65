//! Data types describing the schema.

use std::fmt::Display;

/// Index of a [`NodeType`] within its [`Schema`](super::Schema).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(pub(super) usize);

/// Index of a [`LiteralType`] within its [`Schema`](super::Schema).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LiteralTypeId(pub(super) usize);

#[derive(Debug, Clone)]
pub struct NodeType {
    pub name: String,
    pub base: Option<TypeId>,
    pub args: Vec<ArgDef>,
}

#[derive(Debug, Clone)]
pub struct ArgDef {
    pub name: String,
    pub ty: ArgType,
}

/// What an argument slot holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgType {
    Node(TypeId),
    List(TypeId),
    Literal(LiteralTypeId),
}

/// A literal type: a name, and how literal text becomes a [`Scalar`].
#[derive(Debug, Clone)]
pub struct LiteralType {
    pub name: String,
    pub convert: fn(&str) -> Result<Scalar, String>,
}

/// The converted value of a literal argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scalar {
    Str(String),
    Bool(bool),
    Int(i64),
}

impl Display for Scalar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Scalar::Str(text) => f.write_str(&crate::util::repr(text)),
            Scalar::Bool(value) => write!(f, "{value}"),
            Scalar::Int(value) => write!(f, "{value}"),
        }
    }
}

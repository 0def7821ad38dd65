//! The objects an evaluation produces: type descriptors, and typed trees.

use crate::arena::{Arena, Handle, Limits};
use crate::error::AllocError;
use crate::schema::{ArgType, LiteralTypeId, Scalar, Schema, TypeId};

use std::mem::{align_of, size_of};

/// The type of an evaluated object. Doubles as the result of type checking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjType {
    Node(TypeId),
    List(TypeId),
    Literal(LiteralTypeId),
}

impl ObjType {
    /// E.g. `A`, `list<A>`, or `str`.
    pub fn name(self, schema: &Schema) -> String {
        match self {
            ObjType::Node(id) => schema.type_name(id).to_string(),
            ObjType::List(id) => format!("list<{}>", schema.type_name(id)),
            ObjType::Literal(id) => schema.literal(id).name.clone(),
        }
    }
}

impl From<ArgType> for ObjType {
    fn from(value: ArgType) -> Self {
        match value {
            ArgType::Node(id) => ObjType::Node(id),
            ArgType::List(id) => ObjType::List(id),
            ArgType::Literal(id) => ObjType::Literal(id),
        }
    }
}

/// One checked argument, handed to an [`ObjMaker`](super::ObjMaker) in slot order.
#[derive(Debug, Clone, PartialEq)]
pub enum Field<V> {
    Node(V),
    List(V),
    Literal(Scalar),
}

/* Typed Trees */

pub type TypedRef = Handle<TypedNode>;
pub type ListRef = Handle<Box<[TypedRef]>>;

/// A node of the typed output tree.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedNode {
    pub ty: TypeId,
    /// One per argument slot of `ty`, in declaration order.
    pub fields: Vec<FieldValue>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Node(TypedRef),
    List(ListRef),
    Scalar(Scalar),
}

/// A value built by construction mode.
#[derive(Debug, Clone, PartialEq)]
pub enum ObjValue {
    Node(TypedRef),
    List(ListRef),
    /// A literal as written, before conversion to its slot's type.
    Literal(String),
}

impl std::fmt::Display for ObjValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ObjValue::Node(node) => write!(f, "node {node}"),
            ObjValue::List(list) => write!(f, "list {list}"),
            ObjValue::Literal(text) => write!(f, "literal {}", crate::util::repr(text)),
        }
    }
}

/// Owns the typed nodes of one constructed tree, and their element arrays.
#[derive(Debug)]
pub struct TypedTree {
    nodes: Arena<TypedNode>,
    lists: Arena<Box<[TypedRef]>>,
}

impl TypedTree {
    pub fn new(node_limits: Limits, raw_limits: Limits) -> Self {
        TypedTree { nodes: Arena::new("typed node", node_limits), lists: Arena::new("typed raw", raw_limits) }
    }

    pub fn node(&self, handle: TypedRef) -> Option<&TypedNode> {
        self.nodes.get(handle)
    }

    pub fn list(&self, handle: ListRef) -> Option<&[TypedRef]> {
        self.lists.get(handle).map(|elems| &**elems)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub(super) fn add_node(&mut self, node: TypedNode) -> Result<TypedRef, AllocError> {
        let size = size_of::<TypedNode>() + node.fields.len() * size_of::<FieldValue>();
        self.nodes.allocate_sized(node, size, align_of::<TypedNode>())
    }

    pub(super) fn add_list(&mut self, elems: Vec<TypedRef>) -> Result<ListRef, AllocError> {
        let size = elems.len() * size_of::<TypedRef>();
        self.lists.allocate_sized(elems.into_boxed_slice(), size, align_of::<TypedRef>())
    }

    pub(super) fn contains(&self, handle: TypedRef) -> bool {
        self.nodes.contains(handle)
    }
}

/// The result of construction mode: the typed tree, and its root node.
#[derive(Debug)]
pub struct Built {
    pub tree: TypedTree,
    pub root: TypedRef,
    pub ty: TypeId,
}

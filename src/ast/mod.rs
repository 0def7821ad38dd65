//! The generic tree: the untyped result of parsing, shaped only by the grammar.
//!
//! Nodes live in an [`Arena`] owned by the [`Ast`], and refer to their children
//! through [`NodeRef`] handles into that same arena. Strings (literals and
//! identifiers) are copied into a second, raw arena. Every constructor checks
//! that each child handle really belongs to this tree and has the kind the
//! grammar allows in that position, so a finished tree never needs rechecking.

mod node_types;

#[cfg(test)]
mod tests;

pub use node_types::*;

use crate::arena::{Arena, Handle, Limits};
use crate::error::AstError;

use std::mem::{align_of, size_of};

pub type NodeRef = Handle<Node>;
pub type StrRef = Handle<Box<str>>;

/// Owns one document's generic nodes and their strings.
pub struct Ast {
    nodes: Arena<Node>,
    raw: Arena<Box<str>>,
    root: Option<NodeRef>,
}

impl Ast {
    /// Constructs an empty `Ast` with the default arena limits.
    pub fn new() -> Self {
        Ast::with_limits(Limits::NODE, Limits::RAW)
    }

    pub fn with_limits(node_limits: Limits, raw_limits: Limits) -> Self {
        let nodes = Arena::new("node", node_limits)
            .with_init(|node: &mut Node, index| tracing::trace!(index, kind = %node.kind(), "new node"));

        Ast { nodes, raw: Arena::new("raw", raw_limits), root: None }
    }

    /* Access */

    pub fn node(&self, handle: NodeRef) -> Result<&Node, AstError> {
        self.nodes.get(handle).ok_or(AstError::InvalidNode)
    }

    pub fn str(&self, handle: StrRef) -> Result<&str, AstError> {
        self.raw.get(handle).map(|text| &**text).ok_or(AstError::InvalidString)
    }

    /// The `Tree` node, set by [`Ast::new_tree`].
    pub fn root(&self) -> Result<NodeRef, AstError> {
        self.root.ok_or(AstError::NoRoot)
    }

    /// The root as a [`Tree`].
    pub fn tree(&self) -> Result<&Tree, AstError> {
        match self.node(self.root()?)? {
            Node::Tree(tree) => Ok(tree),
            other => Err(AstError::Kind { expected: NodeKind::Tree, got: other.kind() }),
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn contains(&self, handle: NodeRef) -> bool {
        self.nodes.contains(handle)
    }

    /// Dispatches `visitor` on the node behind `handle`.
    pub fn accept<V: Visitor + ?Sized>(&self, handle: NodeRef, visitor: &mut V) -> Result<V::Output, AstError> {
        Ok(self.node(handle)?.accept(visitor))
    }

    /* Construction */

    pub fn new_literal(&mut self, text: &str) -> Result<NodeRef, AstError> {
        self.new_str_node(text, |text| Node::Literal(Literal { text }))
    }

    pub fn new_node_name(&mut self, ident: &str) -> Result<NodeRef, AstError> {
        self.new_str_node(ident, |ident| Node::NodeName(NodeName { ident }))
    }

    pub fn new_arg_name(&mut self, name: &str) -> Result<NodeRef, AstError> {
        self.new_str_node(name, |name| Node::ArgName(ArgName { name }))
    }

    pub fn new_node_arg(&mut self, name: NodeRef, value: NodeRef) -> Result<NodeRef, AstError> {
        self.check(name, NodeKind::ArgName)?;
        self.check(value, NodeKind::ArgValue)?;
        self.add(Node::NodeArg(NodeArg { name, value }))
    }

    pub fn new_list_args(&mut self, args: Vec<NodeRef>) -> Result<NodeRef, AstError> {
        for arg in &args {
            self.check(*arg, NodeKind::NodeArg)?;
        }
        self.add(Node::ListArgs(ListArgs { args }))
    }

    pub fn new_literal_args(&mut self, literal: NodeRef) -> Result<NodeRef, AstError> {
        self.check(literal, NodeKind::Literal)?;
        self.add(Node::LiteralArgs(LiteralArgs { literal }))
    }

    pub fn new_list_elem(&mut self, index: u8, node: NodeRef) -> Result<NodeRef, AstError> {
        self.check(node, NodeKind::TreeNode)?;
        self.add(Node::ListElem(ListElem { index, node }))
    }

    pub fn new_node_list(&mut self, base: NodeRef, elems: Vec<NodeRef>) -> Result<NodeRef, AstError> {
        self.check(base, NodeKind::NodeName)?;
        for elem in &elems {
            self.check(*elem, NodeKind::ListElem)?;
        }
        self.add(Node::NodeList(NodeList { base, elems }))
    }

    pub fn new_node_value(&mut self, node: NodeRef) -> Result<NodeRef, AstError> {
        self.check(node, NodeKind::TreeNode)?;
        self.add(Node::NodeValue(NodeValue { node }))
    }

    pub fn new_list_value(&mut self, list: NodeRef) -> Result<NodeRef, AstError> {
        self.check(list, NodeKind::NodeList)?;
        self.add(Node::ListValue(ListValue { list }))
    }

    pub fn new_literal_value(&mut self, literal: NodeRef) -> Result<NodeRef, AstError> {
        self.check(literal, NodeKind::Literal)?;
        self.add(Node::LiteralValue(LiteralValue { literal }))
    }

    pub fn new_tree_node(&mut self, name: NodeRef, args: NodeRef) -> Result<NodeRef, AstError> {
        self.check(name, NodeKind::NodeName)?;
        self.check(args, NodeKind::NodeArgs)?;
        self.add(Node::TreeNode(TreeNode { name, args }))
    }

    /// Creates the `Tree` node and makes it the root of this `Ast`.
    pub fn new_tree(&mut self, root: NodeRef) -> Result<NodeRef, AstError> {
        self.check(root, NodeKind::TreeNode)?;
        let tree = self.add(Node::Tree(Tree { root }))?;
        self.root = Some(tree);
        Ok(tree)
    }

    /* Private Helpers */

    /// Ensures `handle` is a node of this tree whose kind fits `category`.
    fn check(&self, handle: NodeRef, category: NodeKind) -> Result<(), AstError> {
        let got = self.node(handle)?.kind();
        if got.fits(category) {
            Ok(())
        } else {
            Err(AstError::Kind { expected: category, got })
        }
    }

    /// Places a node, charging the arena for any child list it carries.
    fn add(&mut self, node: Node) -> Result<NodeRef, AstError> {
        let size = size_of::<Node>() + node.child_list_len() * size_of::<NodeRef>();
        Ok(self.nodes.allocate_sized(node, size, align_of::<Node>())?)
    }

    /// Copies `text` into the raw arena and places the node `make` builds around
    /// it. Should the node not fit, the copied string is released again.
    fn new_str_node(&mut self, text: &str, make: impl FnOnce(StrRef) -> Node) -> Result<NodeRef, AstError> {
        let string = self.raw.allocate_sized(text.into(), text.len(), 1)?;

        match self.add(make(string)) {
            Ok(node) => Ok(node),
            Err(err) => {
                self.raw.rollback(string)?;
                Err(err)
            }
        }
    }

    /* Comparison */

    /// Compares the trees below `a` in `self` and `b` in `other`, looking only at
    /// their shape and text, not at where they were allocated.
    pub fn same_structure(&self, a: NodeRef, other: &Ast, b: NodeRef) -> Result<bool, AstError> {
        // Trees may nest deeply, so grow the stack when required.
        stacker::maybe_grow(32 * 1024, 1024 * 1024, || {
            let same_str = |x: StrRef, y: StrRef| -> Result<bool, AstError> { Ok(self.str(x)? == other.str(y)?) };
            let same_all = |xs: &[NodeRef], ys: &[NodeRef]| -> Result<bool, AstError> {
                if xs.len() != ys.len() {
                    return Ok(false);
                }
                for (x, y) in xs.iter().zip(ys) {
                    if !self.same_structure(*x, other, *y)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            };

            Ok(match (self.node(a)?, other.node(b)?) {
                (Node::Literal(x), Node::Literal(y)) => same_str(x.text, y.text)?,
                (Node::NodeName(x), Node::NodeName(y)) => same_str(x.ident, y.ident)?,
                (Node::ArgName(x), Node::ArgName(y)) => same_str(x.name, y.name)?,
                (Node::NodeArg(x), Node::NodeArg(y)) => same_all(&[x.name, x.value], &[y.name, y.value])?,
                (Node::ListArgs(x), Node::ListArgs(y)) => same_all(x.args.as_slice(), y.args.as_slice())?,
                (Node::LiteralArgs(x), Node::LiteralArgs(y)) => same_all(&[x.literal], &[y.literal])?,
                (Node::ListElem(x), Node::ListElem(y)) => x.index == y.index && same_all(&[x.node], &[y.node])?,
                (Node::NodeList(x), Node::NodeList(y)) => {
                    same_all(&[x.base], &[y.base])? && same_all(x.elems.as_slice(), y.elems.as_slice())?
                }
                (Node::NodeValue(x), Node::NodeValue(y)) => same_all(&[x.node], &[y.node])?,
                (Node::ListValue(x), Node::ListValue(y)) => same_all(&[x.list], &[y.list])?,
                (Node::LiteralValue(x), Node::LiteralValue(y)) => same_all(&[x.literal], &[y.literal])?,
                (Node::TreeNode(x), Node::TreeNode(y)) => same_all(&[x.name, x.args], &[y.name, y.args])?,
                (Node::Tree(x), Node::Tree(y)) => same_all(&[x.root], &[y.root])?,
                _ => false,
            })
        })
    }
}

impl Default for Ast {
    fn default() -> Self {
        Ast::new()
    }
}

impl std::fmt::Debug for Ast {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ast")
            .field("nodes", &self.nodes)
            .field("raw", &self.raw)
            .field("root", &self.root)
            .finish()
    }
}

//! Defines the node kinds of the generic tree, and the [`Visitor`] protocol
//! used to walk them.

use super::{NodeRef, StrRef};

use std::fmt::Display;

/// The kind tag of a node. Besides the concrete kinds, three abstract kinds name
/// the categories the grammar allows in some positions: `Node` (anything),
/// `ArgValue`, and `NodeArgs`. No node ever has an abstract kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Node,
    Literal,
    ListElem,
    NodeName,
    NodeList,
    ArgName,
    ArgValue,
    NodeValue,
    ListValue,
    LiteralValue,
    NodeArg,
    NodeArgs,
    ListArgs,
    LiteralArgs,
    TreeNode,
    Tree,
}

impl NodeKind {
    pub fn name(self) -> &'static str {
        match self {
            NodeKind::Node => "Node",
            NodeKind::Literal => "Literal",
            NodeKind::ListElem => "ListElem",
            NodeKind::NodeName => "NodeName",
            NodeKind::NodeList => "NodeList",
            NodeKind::ArgName => "ArgName",
            NodeKind::ArgValue => "ArgValue",
            NodeKind::NodeValue => "NodeValue",
            NodeKind::ListValue => "ListValue",
            NodeKind::LiteralValue => "LiteralValue",
            NodeKind::NodeArg => "NodeArg",
            NodeKind::NodeArgs => "NodeArgs",
            NodeKind::ListArgs => "ListArgs",
            NodeKind::LiteralArgs => "LiteralArgs",
            NodeKind::TreeNode => "TreeNode",
            NodeKind::Tree => "Tree",
        }
    }

    pub fn is_abstract(self) -> bool {
        matches!(self, NodeKind::Node | NodeKind::ArgValue | NodeKind::NodeArgs)
    }

    /// Returns true if a node of this kind may stand where `category` is expected.
    pub fn fits(self, category: NodeKind) -> bool {
        match category {
            NodeKind::Node => true,
            NodeKind::ArgValue => {
                matches!(self, NodeKind::NodeValue | NodeKind::ListValue | NodeKind::LiteralValue)
            }
            NodeKind::NodeArgs => matches!(self, NodeKind::ListArgs | NodeKind::LiteralArgs),
            concrete => self == concrete,
        }
    }
}

impl Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/* Nodes */

/// A quoted literal. The text is kept exactly as written between the quotes.
#[derive(Debug, Clone)]
pub struct Literal {
    pub text: StrRef,
}

/// The type name of a node, e.g. `B` in `B(.a = A())`.
#[derive(Debug, Clone)]
pub struct NodeName {
    pub ident: StrRef,
}

/// The name of an argument, e.g. `a` in `.a = A()`.
#[derive(Debug, Clone)]
pub struct ArgName {
    pub name: StrRef,
}

/// `.name = value`
#[derive(Debug, Clone)]
pub struct NodeArg {
    pub name: NodeRef,
    pub value: NodeRef,
}

/// The argument list form of a node's arguments: zero or more `NodeArg`s.
#[derive(Debug, Clone)]
pub struct ListArgs {
    pub args: Vec<NodeRef>,
}

/// The literal form of a node's arguments, e.g. `D('text')`.
#[derive(Debug, Clone)]
pub struct LiteralArgs {
    pub literal: NodeRef,
}

/// `[index] = node`
#[derive(Debug, Clone)]
pub struct ListElem {
    pub index: u8,
    pub node: NodeRef,
}

/// `list<Base>[...]`
#[derive(Debug, Clone)]
pub struct NodeList {
    pub base: NodeRef,
    pub elems: Vec<NodeRef>,
}

#[derive(Debug, Clone)]
pub struct NodeValue {
    pub node: NodeRef,
}

#[derive(Debug, Clone)]
pub struct ListValue {
    pub list: NodeRef,
}

#[derive(Debug, Clone)]
pub struct LiteralValue {
    pub literal: NodeRef,
}

/// `Name(args)`
#[derive(Debug, Clone)]
pub struct TreeNode {
    pub name: NodeRef,
    pub args: NodeRef,
}

/// The document root.
#[derive(Debug, Clone)]
pub struct Tree {
    pub root: NodeRef,
}

/// A node of the generic tree.
#[derive(Debug, Clone)]
pub enum Node {
    Literal(Literal),
    NodeName(NodeName),
    ArgName(ArgName),
    NodeArg(NodeArg),
    ListArgs(ListArgs),
    LiteralArgs(LiteralArgs),
    ListElem(ListElem),
    NodeList(NodeList),
    NodeValue(NodeValue),
    ListValue(ListValue),
    LiteralValue(LiteralValue),
    TreeNode(TreeNode),
    Tree(Tree),
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Literal(_) => NodeKind::Literal,
            Node::NodeName(_) => NodeKind::NodeName,
            Node::ArgName(_) => NodeKind::ArgName,
            Node::NodeArg(_) => NodeKind::NodeArg,
            Node::ListArgs(_) => NodeKind::ListArgs,
            Node::LiteralArgs(_) => NodeKind::LiteralArgs,
            Node::ListElem(_) => NodeKind::ListElem,
            Node::NodeList(_) => NodeKind::NodeList,
            Node::NodeValue(_) => NodeKind::NodeValue,
            Node::ListValue(_) => NodeKind::ListValue,
            Node::LiteralValue(_) => NodeKind::LiteralValue,
            Node::TreeNode(_) => NodeKind::TreeNode,
            Node::Tree(_) => NodeKind::Tree,
        }
    }

    pub fn name(&self) -> &'static str {
        self.kind().name()
    }

    /// The length of the child sequence this node carries, if any.
    pub(super) fn child_list_len(&self) -> usize {
        match self {
            Node::ListArgs(ListArgs { args }) => args.len(),
            Node::NodeList(NodeList { elems, .. }) => elems.len(),
            _ => 0,
        }
    }

    /// Calls the method of `visitor` matching this node's kind.
    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> V::Output {
        match self {
            Node::Literal(node) => visitor.visit_literal(node),
            Node::NodeName(node) => visitor.visit_node_name(node),
            Node::ArgName(node) => visitor.visit_arg_name(node),
            Node::NodeArg(node) => visitor.visit_node_arg(node),
            Node::ListArgs(node) => visitor.visit_list_args(node),
            Node::LiteralArgs(node) => visitor.visit_literal_args(node),
            Node::ListElem(node) => visitor.visit_list_elem(node),
            Node::NodeList(node) => visitor.visit_node_list(node),
            Node::NodeValue(node) => visitor.visit_node_value(node),
            Node::ListValue(node) => visitor.visit_list_value(node),
            Node::LiteralValue(node) => visitor.visit_literal_value(node),
            Node::TreeNode(node) => visitor.visit_tree_node(node),
            Node::Tree(node) => visitor.visit_tree(node),
        }
    }
}

/// One method per concrete node kind. Traversals that only produce side effects
/// use an `Output` like `fmt::Result`; evaluations return their values.
pub trait Visitor {
    type Output;

    fn visit_literal(&mut self, node: &Literal) -> Self::Output;
    fn visit_node_name(&mut self, node: &NodeName) -> Self::Output;
    fn visit_arg_name(&mut self, node: &ArgName) -> Self::Output;
    fn visit_node_arg(&mut self, node: &NodeArg) -> Self::Output;
    fn visit_list_args(&mut self, node: &ListArgs) -> Self::Output;
    fn visit_literal_args(&mut self, node: &LiteralArgs) -> Self::Output;
    fn visit_list_elem(&mut self, node: &ListElem) -> Self::Output;
    fn visit_node_list(&mut self, node: &NodeList) -> Self::Output;
    fn visit_node_value(&mut self, node: &NodeValue) -> Self::Output;
    fn visit_list_value(&mut self, node: &ListValue) -> Self::Output;
    fn visit_literal_value(&mut self, node: &LiteralValue) -> Self::Output;
    fn visit_tree_node(&mut self, node: &TreeNode) -> Self::Output;
    fn visit_tree(&mut self, node: &Tree) -> Self::Output;
}

//! Tests for the ast module.

use super::*;

use crate::arena::Limits;
use crate::error::{AllocError, AstError};

/// Builds `B(.a = A())` by hand.
fn build_b_of_a(ast: &mut Ast) -> NodeRef {
    let a_name = ast.new_node_name("A").unwrap();
    let a_args = ast.new_list_args(vec![]).unwrap();
    let a = ast.new_tree_node(a_name, a_args).unwrap();

    let value = ast.new_node_value(a).unwrap();
    let arg_name = ast.new_arg_name("a").unwrap();
    let arg = ast.new_node_arg(arg_name, value).unwrap();

    let b_name = ast.new_node_name("B").unwrap();
    let b_args = ast.new_list_args(vec![arg]).unwrap();
    let b = ast.new_tree_node(b_name, b_args).unwrap();

    ast.new_tree(b).unwrap()
}

#[test]
fn builds_and_reads_back() {
    let mut ast = Ast::new();
    let tree = build_b_of_a(&mut ast);

    assert_eq!(ast.root().unwrap(), tree);
    let root = ast.tree().unwrap().root;

    let Node::TreeNode(node) = ast.node(root).unwrap() else { panic!("root is not a TreeNode") };
    let Node::NodeName(name) = ast.node(node.name).unwrap() else { panic!("expected a NodeName") };
    assert_eq!(ast.str(name.ident).unwrap(), "B");
    assert_eq!(ast.node(node.args).unwrap().kind(), NodeKind::ListArgs);
}

#[test]
fn children_must_come_from_the_same_tree() {
    let mut first = Ast::new();
    let mut second = Ast::new();

    let name = first.new_node_name("A").unwrap();
    let args = second.new_list_args(vec![]).unwrap();

    assert_eq!(first.new_tree_node(name, args), Err(AstError::InvalidNode));
}

#[test]
fn children_must_have_the_right_kind() {
    let mut ast = Ast::new();

    let name = ast.new_node_name("A").unwrap();
    let literal = ast.new_literal("x").unwrap();

    assert_eq!(
        ast.new_tree_node(name, literal),
        Err(AstError::Kind { expected: NodeKind::NodeArgs, got: NodeKind::Literal })
    );
    assert_eq!(
        ast.new_node_arg(name, literal),
        Err(AstError::Kind { expected: NodeKind::ArgName, got: NodeKind::NodeName })
    );
    assert_eq!(
        ast.new_list_args(vec![literal]).unwrap_err().to_string(),
        "invalid node kind: expected NodeArg, got Literal"
    );
}

#[test]
fn no_root_before_tree() {
    let mut ast = Ast::new();
    ast.new_literal("x").unwrap();

    assert_eq!(ast.root(), Err(AstError::NoRoot));
}

#[test]
fn string_is_released_when_node_does_not_fit() {
    let mut ast = Ast::with_limits(Limits { max_objects: 1, max_bytes: 4096 }, Limits::RAW);

    ast.new_literal("first").unwrap();
    let err = ast.new_literal("second").unwrap_err();

    assert!(matches!(err, AstError::Alloc(AllocError::Objects { name: "node", .. })));
    assert_eq!(ast.node_count(), 1);
    assert_eq!(ast.raw.len(), 1);
}

#[test]
fn abstract_kinds() {
    assert!(NodeKind::Node.is_abstract());
    assert!(NodeKind::ArgValue.is_abstract());
    assert!(NodeKind::NodeArgs.is_abstract());
    assert!(!NodeKind::TreeNode.is_abstract());

    assert!(NodeKind::ListValue.fits(NodeKind::ArgValue));
    assert!(NodeKind::LiteralArgs.fits(NodeKind::NodeArgs));
    assert!(NodeKind::Tree.fits(NodeKind::Node));
    assert!(!NodeKind::ListArgs.fits(NodeKind::ArgValue));
}

#[test]
fn structure_ignores_allocation() {
    let mut first = Ast::new();
    let mut second = Ast::new();

    // Some unrelated nodes first, so the handles differ.
    second.new_literal("noise").unwrap();
    second.new_node_name("Noise").unwrap();

    let a = build_b_of_a(&mut first);
    let b = build_b_of_a(&mut second);

    assert!(first.same_structure(a, &second, b).unwrap());

    let mut third = Ast::new();
    let name = third.new_node_name("B").unwrap();
    let args = third.new_list_args(vec![]).unwrap();
    let node = third.new_tree_node(name, args).unwrap();
    let c = third.new_tree(node).unwrap();

    assert!(!first.same_structure(a, &third, c).unwrap());
}

struct KindCounter(Vec<NodeKind>);

impl Visitor for KindCounter {
    type Output = NodeKind;

    fn visit_literal(&mut self, _: &Literal) -> NodeKind {
        self.0.push(NodeKind::Literal);
        NodeKind::Literal
    }
    fn visit_node_name(&mut self, _: &NodeName) -> NodeKind {
        NodeKind::NodeName
    }
    fn visit_arg_name(&mut self, _: &ArgName) -> NodeKind {
        NodeKind::ArgName
    }
    fn visit_node_arg(&mut self, _: &NodeArg) -> NodeKind {
        NodeKind::NodeArg
    }
    fn visit_list_args(&mut self, _: &ListArgs) -> NodeKind {
        NodeKind::ListArgs
    }
    fn visit_literal_args(&mut self, _: &LiteralArgs) -> NodeKind {
        NodeKind::LiteralArgs
    }
    fn visit_list_elem(&mut self, _: &ListElem) -> NodeKind {
        NodeKind::ListElem
    }
    fn visit_node_list(&mut self, _: &NodeList) -> NodeKind {
        NodeKind::NodeList
    }
    fn visit_node_value(&mut self, _: &NodeValue) -> NodeKind {
        NodeKind::NodeValue
    }
    fn visit_list_value(&mut self, _: &ListValue) -> NodeKind {
        NodeKind::ListValue
    }
    fn visit_literal_value(&mut self, _: &LiteralValue) -> NodeKind {
        NodeKind::LiteralValue
    }
    fn visit_tree_node(&mut self, _: &TreeNode) -> NodeKind {
        NodeKind::TreeNode
    }
    fn visit_tree(&mut self, _: &Tree) -> NodeKind {
        NodeKind::Tree
    }
}

#[test]
fn dispatch_matches_kind() {
    let mut ast = Ast::new();
    let tree = build_b_of_a(&mut ast);
    let literal = ast.new_literal("x").unwrap();

    let mut visitor = KindCounter(vec![]);
    assert_eq!(ast.accept(tree, &mut visitor).unwrap(), NodeKind::Tree);
    assert_eq!(ast.accept(literal, &mut visitor).unwrap(), NodeKind::Literal);
    assert_eq!(visitor.0, vec![NodeKind::Literal]);
}

//! The `print` and `dump` formats, showing the generic tree node by node.

use super::{quote, Out};
use crate::ast::{
    ArgName, Ast, ListArgs, ListElem, ListValue, Literal, LiteralArgs, LiteralValue, NodeArg, NodeList, NodeName,
    NodeRef, NodeValue, Tree, TreeNode, Visitor,
};
use crate::error::AstError;

pub(super) struct StructurePrinter<'a> {
    ast: &'a Ast,
    out: &'a mut Out,
    /// Level of the node being printed.
    level: usize,
    /// Name attributes and list positions, or leave them out.
    named: bool,
}

type PrintResult = Result<(), AstError>;

impl<'a> StructurePrinter<'a> {
    pub fn new(ast: &'a Ast, out: &'a mut Out, named: bool) -> Self {
        StructurePrinter { ast, out, level: 0, named }
    }

    fn child(&mut self, handle: NodeRef) -> PrintResult {
        // Prevent stack overflow by allocating additional stack as required.
        stacker::maybe_grow(32 * 1024, 1024 * 1024, || {
            self.level += 1;
            let ast = self.ast;
            let result = ast.accept(handle, self);
            self.level -= 1;
            result?
        })
    }

    fn attr(&mut self, name: &str) {
        self.out.endl(self.level + 1);
        if self.named {
            self.out.push(&format!(".{name} = "));
        }
    }

    fn open(&mut self, name: &str) {
        self.out.push(name);
        self.out.push("(");
    }

    fn close(&mut self) {
        self.out.endl(self.level);
        self.out.push(")");
    }

    fn text(&mut self, name: &str, text: &str) {
        self.out.push(&format!("{name}({})", quote(text)));
    }

    fn list(&mut self, kind: &str, items: &[NodeRef]) -> PrintResult {
        self.level += 1;
        self.out.push(&format!("list<{kind}> ["));
        for (k, item) in items.iter().enumerate() {
            self.out.endl(self.level + 1);
            if self.named {
                self.out.push(&format!("[{k}] = "));
            }
            self.child(*item)?;
        }
        if !items.is_empty() {
            self.out.endl(self.level);
        }
        self.out.push("]");
        self.level -= 1;
        Ok(())
    }
}

impl<'a> Visitor for StructurePrinter<'a> {
    type Output = PrintResult;

    fn visit_literal(&mut self, node: &Literal) -> PrintResult {
        let text = self.ast.str(node.text)?;
        self.text("Literal", text);
        Ok(())
    }

    fn visit_node_name(&mut self, node: &NodeName) -> PrintResult {
        let ident = self.ast.str(node.ident)?;
        self.text("NodeName", ident);
        Ok(())
    }

    fn visit_arg_name(&mut self, node: &ArgName) -> PrintResult {
        let name = self.ast.str(node.name)?;
        self.text("ArgName", name);
        Ok(())
    }

    fn visit_node_arg(&mut self, node: &NodeArg) -> PrintResult {
        self.open("NodeArg");
        self.attr("name");
        self.child(node.name)?;
        self.attr("value");
        self.child(node.value)?;
        self.close();
        Ok(())
    }

    fn visit_list_args(&mut self, node: &ListArgs) -> PrintResult {
        self.open("ListArgs");
        self.attr("list");
        self.list("NodeArg", &node.args)?;
        self.close();
        Ok(())
    }

    fn visit_literal_args(&mut self, node: &LiteralArgs) -> PrintResult {
        self.open("LiteralArgs");
        self.attr("literal");
        self.child(node.literal)?;
        self.close();
        Ok(())
    }

    fn visit_list_elem(&mut self, node: &ListElem) -> PrintResult {
        self.open("ListElem");
        self.attr("index");
        self.out.push(&node.index.to_string());
        self.attr("node");
        self.child(node.node)?;
        self.close();
        Ok(())
    }

    fn visit_node_list(&mut self, node: &NodeList) -> PrintResult {
        self.open("NodeList");
        self.attr("base");
        self.child(node.base)?;
        self.attr("elems");
        self.list("ListElem", &node.elems)?;
        self.close();
        Ok(())
    }

    fn visit_node_value(&mut self, node: &NodeValue) -> PrintResult {
        self.open("NodeValue");
        self.attr("node");
        self.child(node.node)?;
        self.close();
        Ok(())
    }

    fn visit_list_value(&mut self, node: &ListValue) -> PrintResult {
        self.open("ListValue");
        self.attr("list");
        self.child(node.list)?;
        self.close();
        Ok(())
    }

    fn visit_literal_value(&mut self, node: &LiteralValue) -> PrintResult {
        self.open("LiteralValue");
        self.attr("literal");
        self.child(node.literal)?;
        self.close();
        Ok(())
    }

    fn visit_tree_node(&mut self, node: &TreeNode) -> PrintResult {
        self.open("TreeNode");
        self.attr("name");
        self.child(node.name)?;
        self.attr("args");
        self.child(node.args)?;
        self.close();
        Ok(())
    }

    fn visit_tree(&mut self, node: &Tree) -> PrintResult {
        self.open("Tree");
        self.attr("root");
        self.child(node.root)?;
        self.close();
        Ok(())
    }
}

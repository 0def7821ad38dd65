//! The `pretty` and `terse` formats, which print source text that parses back
//! to the same tree.

use super::{quote, Out};
use crate::ast::{
    ArgName, Ast, ListArgs, ListElem, ListValue, Literal, LiteralArgs, LiteralValue, NodeArg, NodeList, NodeName,
    NodeRef, NodeValue, Tree, TreeNode, Visitor,
};
use crate::error::AstError;

pub(super) struct SourcePrinter<'a> {
    ast: &'a Ast,
    out: &'a mut Out,
    level: usize,
    pretty: bool,
}

type PrintResult = Result<(), AstError>;

impl<'a> SourcePrinter<'a> {
    pub fn new(ast: &'a Ast, out: &'a mut Out, pretty: bool) -> Self {
        SourcePrinter { ast, out, level: 0, pretty }
    }

    fn print(&mut self, handle: NodeRef) -> PrintResult {
        // Prevent stack overflow by allocating additional stack as required.
        stacker::maybe_grow(32 * 1024, 1024 * 1024, || {
            let ast = self.ast;
            ast.accept(handle, self)?
        })
    }

    /// Prints `items` one level deeper; in pretty mode each on its own line.
    fn sequence(&mut self, items: &[NodeRef]) -> PrintResult {
        self.level += 1;
        for item in items {
            if self.pretty {
                self.out.endl(self.level);
            }
            self.print(*item)?;
        }
        self.level -= 1;

        if self.pretty && !items.is_empty() {
            self.out.endl(self.level);
        }
        Ok(())
    }

    fn punct<'s>(&self, pretty: &'s str, terse: &'s str) -> &'s str {
        if self.pretty {
            pretty
        } else {
            terse
        }
    }
}

impl<'a> Visitor for SourcePrinter<'a> {
    type Output = PrintResult;

    fn visit_literal(&mut self, node: &Literal) -> PrintResult {
        let text = self.ast.str(node.text)?;
        self.out.push(&quote(text));
        Ok(())
    }

    fn visit_node_name(&mut self, node: &NodeName) -> PrintResult {
        let ident = self.ast.str(node.ident)?;
        self.out.push(ident);
        Ok(())
    }

    fn visit_arg_name(&mut self, node: &ArgName) -> PrintResult {
        let name = self.ast.str(node.name)?;
        let equals = self.punct(" = ", "=");
        self.out.push(&format!(".{name}{equals}"));
        Ok(())
    }

    fn visit_node_arg(&mut self, node: &NodeArg) -> PrintResult {
        self.print(node.name)?;
        self.print(node.value)
    }

    fn visit_list_args(&mut self, node: &ListArgs) -> PrintResult {
        self.sequence(&node.args)
    }

    fn visit_literal_args(&mut self, node: &LiteralArgs) -> PrintResult {
        self.print(node.literal)
    }

    fn visit_list_elem(&mut self, node: &ListElem) -> PrintResult {
        let equals = self.punct("] = ", "]=");
        self.out.push(&format!("[{}{equals}", node.index));
        self.print(node.node)
    }

    fn visit_node_list(&mut self, node: &NodeList) -> PrintResult {
        self.out.push("list<");
        self.print(node.base)?;
        let open = self.punct("> [", ">[");
        self.out.push(open);
        self.sequence(&node.elems)?;
        self.out.push("]");
        Ok(())
    }

    fn visit_node_value(&mut self, node: &NodeValue) -> PrintResult {
        self.print(node.node)
    }

    fn visit_list_value(&mut self, node: &ListValue) -> PrintResult {
        self.print(node.list)
    }

    fn visit_literal_value(&mut self, node: &LiteralValue) -> PrintResult {
        self.print(node.literal)
    }

    fn visit_tree_node(&mut self, node: &TreeNode) -> PrintResult {
        self.print(node.name)?;
        self.out.push("(");
        self.print(node.args)?;
        self.out.push(")");
        Ok(())
    }

    fn visit_tree(&mut self, node: &Tree) -> PrintResult {
        self.print(node.root)
    }
}

//! Output formatters. Everything here is a read-only traversal: the generic
//! tree is walked with the [`Visitor`](crate::ast::Visitor) protocol, typed trees
//! by following their handles.

mod source;
mod structure;
mod typed;

#[cfg(test)]
mod tests;

pub use typed::print_typed;

use crate::ast::Ast;
use crate::error::AstError;

/// How to print a generic tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Every node by kind, with its attributes named.
    Print,
    /// Every node by kind, attributes by position.
    Dump,
    /// Source text, one argument per line.
    Pretty,
    /// Source text without whitespace.
    Terse,
}

/// Prints `ast` in the given format. `indent_dots` marks each indentation level
/// with `.   ` instead of four spaces.
pub fn print_ast(ast: &Ast, format: Format, indent_dots: bool) -> Result<String, AstError> {
    let root = ast.root()?;
    let mut out = Out::new(indent_dots);

    match format {
        Format::Print | Format::Dump => {
            let mut printer = structure::StructurePrinter::new(ast, &mut out, format == Format::Print);
            ast.accept(root, &mut printer)??;
        }
        Format::Pretty | Format::Terse => {
            let mut printer = source::SourcePrinter::new(ast, &mut out, format == Format::Pretty);
            ast.accept(root, &mut printer)??;
        }
    }

    out.text.push('\n');
    Ok(out.text)
}

/// Quotes raw literal text the way it can be read back: with `'`, or with `"`
/// when the text holds an unescaped `'`.
pub fn quote(text: &str) -> String {
    let mut escaped = false;
    let mut single = false;
    for c in text.chars() {
        match c {
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            '\'' => single = true,
            _ => {}
        }
    }

    let quote = if single { '"' } else { '\'' };
    format!("{quote}{text}{quote}")
}

/* Output */

/// Text under construction, with indentation.
struct Out {
    text: String,
    dots: bool,
}

impl Out {
    fn new(dots: bool) -> Self {
        Out { text: String::new(), dots }
    }

    fn push(&mut self, text: &str) {
        self.text.push_str(text);
    }

    /// Starts a new line, indented to `level`.
    fn endl(&mut self, level: usize) {
        self.text.push('\n');
        for _ in 0..level {
            self.text.push_str(if self.dots { ".   " } else { "    " });
        }
    }
}

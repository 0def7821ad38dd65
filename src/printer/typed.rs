//! Prints a constructed tree with the names its schema gives each argument.

use super::{quote, Out};
use crate::error::AstError;
use crate::eval::{FieldValue, TypedRef, TypedTree};
use crate::schema::{ArgType, Scalar, Schema};

/// Prints the typed tree under `root`, e.g.
///
/// ```text
/// B(
///     .a = A()
/// )
/// ```
pub fn print_typed(tree: &TypedTree, schema: &Schema, root: TypedRef, indent_dots: bool) -> Result<String, AstError> {
    let mut printer = TypedPrinter { tree, schema, out: Out::new(indent_dots), level: 0 };
    printer.node(root)?;
    printer.out.text.push('\n');
    Ok(printer.out.text)
}

struct TypedPrinter<'a> {
    tree: &'a TypedTree,
    schema: &'a Schema,
    out: Out,
    level: usize,
}

impl<'a> TypedPrinter<'a> {
    fn node(&mut self, handle: TypedRef) -> Result<(), AstError> {
        // Prevent stack overflow by allocating additional stack as required.
        stacker::maybe_grow(32 * 1024, 1024 * 1024, || {
            let (tree, schema) = (self.tree, self.schema);
            let node = tree.node(handle).ok_or(AstError::InvalidNode)?;
            let node_type = schema.get(node.ty);

            self.out.push(&node_type.name);
            self.out.push("(");
            if node.fields.is_empty() {
                self.out.push(")");
                return Ok(());
            }

            for (def, field) in node_type.args.iter().zip(&node.fields) {
                self.out.endl(self.level + 1);
                self.out.push(&format!(".{} = ", def.name));

                match field {
                    FieldValue::Node(child) => self.child(*child)?,
                    FieldValue::List(list) => {
                        let elems = tree.list(*list).ok_or(AstError::InvalidNode)?;
                        let ArgType::List(base) = def.ty else { return Err(AstError::InvalidNode) };
                        self.list(schema.type_name(base), elems)?;
                    }
                    FieldValue::Scalar(scalar) => self.out.push(&scalar_text(scalar)),
                }
            }

            self.out.endl(self.level);
            self.out.push(")");
            Ok(())
        })
    }

    fn child(&mut self, handle: TypedRef) -> Result<(), AstError> {
        self.level += 1;
        let result = self.node(handle);
        self.level -= 1;
        result
    }

    fn list(&mut self, base: &str, elems: &[TypedRef]) -> Result<(), AstError> {
        self.level += 1;
        self.out.push(&format!("list<{base}> ["));
        for (k, elem) in elems.iter().enumerate() {
            self.out.endl(self.level + 1);
            self.out.push(&format!("[{k}] = "));
            self.child(*elem)?;
        }
        if !elems.is_empty() {
            self.out.endl(self.level);
        }
        self.out.push("]");
        self.level -= 1;
        Ok(())
    }
}

fn scalar_text(scalar: &Scalar) -> String {
    match scalar {
        Scalar::Str(text) => quote(text),
        Scalar::Bool(value) => value.to_string(),
        Scalar::Int(value) => value.to_string(),
    }
}

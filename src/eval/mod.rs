//! Evaluates a generic tree against a [`Schema`].
//!
//! One stack machine walks the tree bottom up. Arguments are evaluated onto the
//! stack, then each node checks and pops them: count, names, and casts. What the
//! machine builds is left to an [`ObjMaker`], so type checking ([`TypeMaker`])
//! and construction ([`NodeMaker`]) accept exactly the same documents.

mod makers;
mod obj_types;
mod stack;


pub use makers::{NodeMaker, ObjMaker, TypeMaker};
pub use obj_types::*;

use crate::arena::Limits;
use crate::ast::{
    ArgName, Ast, ListArgs, ListElem, ListValue, Literal, LiteralArgs, LiteralValue, Node, NodeArg, NodeKind,
    NodeList, NodeName, NodeRef, NodeValue, Tree, TreeNode, Visitor,
};
use crate::error::{AstError, EvalError};
use crate::schema::{ArgDef, ArgType, CastMode, Schema, TypeId};

use stack::{ObjStack, StackObj};

/// The `tracing` target of the per-object events emitted with `trace_eval`.
pub const TRACE_TARGET: &str = "treelang::eval";

#[derive(Debug, Clone, Copy)]
pub struct EvalOptions {
    pub casts: CastMode,
    /// Emit an event for every object the evaluator creates.
    pub trace_eval: bool,
    /// Limits of the typed tree's arenas in construction mode.
    pub node_limits: Limits,
    pub raw_limits: Limits,
}

impl Default for EvalOptions {
    fn default() -> Self {
        EvalOptions { casts: CastMode::Strict, trace_eval: false, node_limits: Limits::NODE, raw_limits: Limits::RAW }
    }
}

/* Entry Points */

/// Checks `ast` against `schema` without building anything. Returns the type of the root node.
pub fn type_check(ast: &Ast, schema: &Schema, options: &EvalOptions) -> Result<TypeId, EvalError> {
    let (ty, _) = eval(ast, schema, &mut TypeMaker, options)?;
    tracing::debug!("type check passed: {}", schema.type_name(ty));
    Ok(ty)
}

/// Checks `ast` against `schema`, building the typed tree as it goes.
pub fn build(ast: &Ast, schema: &Schema, options: &EvalOptions) -> Result<Built, EvalError> {
    let mut maker = NodeMaker::new(options.node_limits, options.raw_limits);
    let (ty, value) = eval(ast, schema, &mut maker, options)?;

    let ObjValue::Node(root) = value else {
        return Err(EvalError::Stack("top of AST expression stack is not of type 'node'".to_string()));
    };

    let tree = maker.into_tree();
    tracing::debug!("built {} typed nodes", tree.node_count());
    Ok(Built { tree, root, ty })
}

/// Runs the evaluator with any object representation.
pub fn eval<M: ObjMaker>(
    ast: &Ast,
    schema: &Schema,
    maker: &mut M,
    options: &EvalOptions,
) -> Result<(TypeId, M::Value), EvalError> {
    let root = ast.root()?;
    let mut evaluator = Evaluator { ast, schema, maker, options, stack: ObjStack::new() };
    evaluator.eval(root)?;

    let obj = evaluator.stack.finish()?;
    match obj.ty {
        ObjType::Node(ty) => Ok((ty, obj.value)),
        _ => Err(EvalError::Stack("top of AST expression stack is not of type 'node'".to_string())),
    }
}

/* Evaluator */

struct Evaluator<'a, M: ObjMaker> {
    ast: &'a Ast,
    schema: &'a Schema,
    maker: &'a mut M,
    options: &'a EvalOptions,
    stack: ObjStack<M::Value>,
}

impl<'a, M: ObjMaker> Evaluator<'a, M> {
    fn eval(&mut self, handle: NodeRef) -> Result<(), EvalError> {
        // Prevent stack overflow by allocating additional stack as required.
        stacker::maybe_grow(32 * 1024, 1024 * 1024, || {
            let ast = self.ast;
            ast.accept(handle, self)?
        })
    }

    fn push(&mut self, kind: NodeKind, obj: StackObj<M::Value>) {
        if self.options.trace_eval {
            tracing::info!(
                target: TRACE_TARGET,
                "visit({kind}): {} {:?} (depth {})",
                obj.ty.name(self.schema),
                obj.value,
                self.stack.len() + 1
            );
        }
        self.stack.push(obj);
    }

    /// The identifier of a `NodeName`.
    fn ident(&self, handle: NodeRef) -> Result<&'a str, EvalError> {
        let ast = self.ast;
        match ast.node(handle)? {
            Node::NodeName(NodeName { ident }) => Ok(ast.str(*ident)?),
            other => Err(AstError::Kind { expected: NodeKind::NodeName, got: other.kind() }.into()),
        }
    }

    fn lookup(&self, name: &str) -> Result<TypeId, EvalError> {
        self.schema.lookup(name).ok_or_else(|| EvalError::UnknownType(name.to_string()))
    }

    /// Pops the arguments of a node of type `ty`, checking each against its slot.
    fn take_args(&mut self, ty: TypeId, args: NodeRef) -> Result<Vec<Field<M::Value>>, EvalError> {
        let ast = self.ast;
        let node_type = self.schema.get(ty);
        let defs = &node_type.args;

        match ast.node(args)? {
            Node::LiteralArgs(_) => {
                if defs.len() != 1 {
                    return Err(EvalError::LiteralArgCount { ty: node_type.name.clone(), expected: defs.len() });
                }

                let objs = self.stack.pop(1)?;
                defs.iter().zip(objs).map(|(def, obj)| self.fill_slot(&node_type.name, 1, def, obj)).collect()
            }
            Node::ListArgs(ListArgs { args }) => {
                if args.len() != defs.len() {
                    return Err(EvalError::ArgCount { ty: node_type.name.clone(), expected: defs.len(), got: args.len() });
                }

                let objs = self.stack.pop(defs.len())?;
                defs.iter()
                    .zip(objs)
                    .enumerate()
                    .map(|(i, (def, obj))| {
                        let got = obj.name.as_deref().unwrap_or_default();
                        if got != def.name {
                            return Err(EvalError::ArgName {
                                ty: node_type.name.clone(),
                                arg: i + 1,
                                expected: def.name.clone(),
                                got: got.to_string(),
                            });
                        }
                        self.fill_slot(&node_type.name, i + 1, def, obj)
                    })
                    .collect()
            }
            other => Err(AstError::Kind { expected: NodeKind::NodeArgs, got: other.kind() }.into()),
        }
    }

    /// Checks that `obj` may fill the slot `def`, converting literals to the slot's type.
    fn fill_slot(&self, ty: &str, arg: usize, def: &ArgDef, obj: StackObj<M::Value>) -> Result<Field<M::Value>, EvalError> {
        let schema = self.schema;
        let mode = self.options.casts;

        match (def.ty, obj.ty) {
            (ArgType::Node(to), ObjType::Node(from)) if schema.cast(from, to, mode) => Ok(Field::Node(obj.value)),
            (ArgType::List(to), ObjType::List(from)) if schema.cast(from, to, mode) => Ok(Field::List(obj.value)),
            (ArgType::Literal(to), ObjType::Literal(_)) => {
                let text = obj.text.as_deref().unwrap_or_default();
                (schema.literal(to).convert)(text)
                    .map(Field::Literal)
                    .map_err(|message| EvalError::InvalidValue { ty: ty.to_string(), arg, message })
            }
            (expected, _) => Err(EvalError::ArgCast {
                ty: ty.to_string(),
                arg,
                from: obj.ty.name(schema),
                to: ObjType::from(expected).name(schema),
            }),
        }
    }
}

impl<'a, M: ObjMaker> Visitor for Evaluator<'a, M> {
    type Output = Result<(), EvalError>;

    fn visit_literal(&mut self, node: &Literal) -> Self::Output {
        let text = self.ast.str(node.text)?;
        let value = self.maker.make_literal(self.schema, text)?;
        let ty = ObjType::Literal(self.schema.text_type());
        self.push(NodeKind::Literal, StackObj { name: None, ty, text: Some(text.to_string()), value });
        Ok(())
    }

    fn visit_node_name(&mut self, _node: &NodeName) -> Self::Output {
        Err(EvalError::UnexpectedNode(NodeKind::NodeName))
    }

    fn visit_arg_name(&mut self, node: &ArgName) -> Self::Output {
        let name = self.ast.str(node.name)?;
        let top = self.stack.top_mut()?;
        if let Some(existing) = &top.name {
            return Err(EvalError::Stack(format!("invalid AST expression stack: obj name is not null: '{existing}'")));
        }
        top.name = Some(name.to_string());
        Ok(())
    }

    fn visit_node_arg(&mut self, node: &NodeArg) -> Self::Output {
        self.eval(node.value)?;
        self.eval(node.name)
    }

    fn visit_list_args(&mut self, node: &ListArgs) -> Self::Output {
        node.args.iter().try_for_each(|arg| self.eval(*arg))
    }

    fn visit_literal_args(&mut self, node: &LiteralArgs) -> Self::Output {
        self.eval(node.literal)
    }

    fn visit_list_elem(&mut self, _node: &ListElem) -> Self::Output {
        Err(EvalError::UnexpectedNode(NodeKind::ListElem))
    }

    fn visit_node_list(&mut self, node: &NodeList) -> Self::Output {
        let ast = self.ast;
        for (k, elem) in node.elems.iter().enumerate() {
            let ListElem { index, node: child } = match ast.node(*elem)? {
                Node::ListElem(list_elem) => list_elem,
                other => return Err(AstError::Kind { expected: NodeKind::ListElem, got: other.kind() }.into()),
            };

            if usize::from(*index) != k {
                return Err(EvalError::ListIndex { got: *index, expected: k });
            }
            self.eval(*child)?;
        }

        let base_name = self.ident(node.base)?;
        let base = self.lookup(base_name)?;

        let schema = self.schema;
        let mode = self.options.casts;
        let mut values = Vec::with_capacity(node.elems.len());
        for (k, obj) in self.stack.pop(node.elems.len())?.into_iter().enumerate() {
            match obj.ty {
                ObjType::Node(from) if schema.cast(from, base, mode) => values.push(obj.value),
                _ => {
                    return Err(EvalError::ListCast { base: base_name.to_string(), arg: k, from: obj.ty.name(schema) })
                }
            }
        }

        let value = self.maker.make_list(schema, base, values)?;
        self.push(NodeKind::NodeList, StackObj { name: None, ty: ObjType::List(base), text: None, value });
        Ok(())
    }

    fn visit_node_value(&mut self, node: &NodeValue) -> Self::Output {
        self.eval(node.node)
    }

    fn visit_list_value(&mut self, node: &ListValue) -> Self::Output {
        self.eval(node.list)
    }

    fn visit_literal_value(&mut self, node: &LiteralValue) -> Self::Output {
        self.eval(node.literal)
    }

    fn visit_tree_node(&mut self, node: &TreeNode) -> Self::Output {
        self.eval(node.args)?;

        let ty = self.lookup(self.ident(node.name)?)?;
        let fields = self.take_args(ty, node.args)?;
        let value = self.maker.make_node(self.schema, ty, fields)?;
        self.push(NodeKind::TreeNode, StackObj { name: None, ty: ObjType::Node(ty), text: None, value });
        Ok(())
    }

    fn visit_tree(&mut self, node: &Tree) -> Self::Output {
        self.eval(node.root)
    }
}

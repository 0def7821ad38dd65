//! The two object representations: bare types for checking, and typed trees
//! for construction.

use super::obj_types::{Field, FieldValue, ObjType, ObjValue, TypedNode, TypedTree};
use crate::arena::Limits;
use crate::error::EvalError;
use crate::schema::{Schema, TypeId};

/// Builds the value of each evaluated object. The evaluator does every check
/// before calling in, so a maker only has to represent what it is given.
pub trait ObjMaker {
    type Value: std::fmt::Debug;

    fn make_literal(&mut self, schema: &Schema, text: &str) -> Result<Self::Value, EvalError>;

    /// `fields` holds one accepted value per argument slot of `ty`, in order.
    fn make_node(&mut self, schema: &Schema, ty: TypeId, fields: Vec<Field<Self::Value>>) -> Result<Self::Value, EvalError>;

    fn make_list(&mut self, schema: &Schema, base: TypeId, elems: Vec<Self::Value>) -> Result<Self::Value, EvalError>;
}

/// Type check mode. Values are the object types themselves.
#[derive(Debug, Default)]
pub struct TypeMaker;

impl ObjMaker for TypeMaker {
    type Value = ObjType;

    fn make_literal(&mut self, schema: &Schema, _text: &str) -> Result<ObjType, EvalError> {
        Ok(ObjType::Literal(schema.text_type()))
    }

    fn make_node(&mut self, _schema: &Schema, ty: TypeId, _fields: Vec<Field<ObjType>>) -> Result<ObjType, EvalError> {
        Ok(ObjType::Node(ty))
    }

    fn make_list(&mut self, _schema: &Schema, base: TypeId, _elems: Vec<ObjType>) -> Result<ObjType, EvalError> {
        Ok(ObjType::List(base))
    }
}

/// Construction mode. Materializes typed nodes into its own arenas.
#[derive(Debug)]
pub struct NodeMaker {
    tree: TypedTree,
}

impl NodeMaker {
    pub fn new(node_limits: Limits, raw_limits: Limits) -> Self {
        NodeMaker { tree: TypedTree::new(node_limits, raw_limits) }
    }

    pub fn into_tree(self) -> TypedTree {
        self.tree
    }
}

impl Default for NodeMaker {
    fn default() -> Self {
        NodeMaker::new(Limits::NODE, Limits::RAW)
    }
}

fn mismatch(ty: &str, value: &ObjValue) -> EvalError {
    EvalError::Stack(format!("ast-type {ty}: field holds unexpected {value}"))
}

impl ObjMaker for NodeMaker {
    type Value = ObjValue;

    fn make_literal(&mut self, _schema: &Schema, text: &str) -> Result<ObjValue, EvalError> {
        Ok(ObjValue::Literal(text.to_string()))
    }

    fn make_node(&mut self, schema: &Schema, ty: TypeId, fields: Vec<Field<ObjValue>>) -> Result<ObjValue, EvalError> {
        let fields = fields
            .into_iter()
            .map(|field| match field {
                Field::Node(ObjValue::Node(node)) if self.tree.contains(node) => Ok(FieldValue::Node(node)),
                Field::List(ObjValue::List(list)) if self.tree.list(list).is_some() => Ok(FieldValue::List(list)),
                Field::Literal(scalar) => Ok(FieldValue::Scalar(scalar)),
                Field::Node(other) | Field::List(other) => Err(mismatch(schema.type_name(ty), &other)),
            })
            .collect::<Result<Vec<_>, _>>()?;

        let node = self.tree.add_node(TypedNode { ty, fields })?;
        Ok(ObjValue::Node(node))
    }

    fn make_list(&mut self, schema: &Schema, base: TypeId, elems: Vec<ObjValue>) -> Result<ObjValue, EvalError> {
        let elems = elems
            .into_iter()
            .map(|elem| match elem {
                ObjValue::Node(node) if self.tree.contains(node) => Ok(node),
                other => Err(mismatch(&format!("list<{}>", schema.type_name(base)), &other)),
            })
            .collect::<Result<Vec<_>, _>>()?;

        let list = self.tree.add_list(elems)?;
        Ok(ObjValue::List(list))
    }
}

//! The schema registry: the closed set of node types a document may use.
//!
//! Each [`NodeType`] has a name, an optional base type, and an ordered list of
//! argument slots. Slots hold a single node, a list of nodes, or a literal that
//! is converted to a [`Scalar`] by its [`LiteralType`]. A [`Schema`] is built once
//! through a [`SchemaBuilder`] and is immutable afterwards. Names are looked up
//! through a sorted index, and base relationships are walked as parent indices.

mod abc;
mod schema_types;

#[cfg(test)]
mod tests;

pub use abc::abc;
pub use schema_types::*;

use crate::error::SchemaError;

use std::collections::HashMap;

/// Whether a type satisfies only itself, or also any type on its base chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CastMode {
    #[default]
    Strict,
    Relaxed,
}

/// An immutable registry of node types and literal types.
#[derive(Debug, Clone)]
pub struct Schema {
    /// In declaration order; [`TypeId`] indexes this.
    types: Vec<NodeType>,
    /// Indices into `types`, sorted by name.
    by_name: Vec<TypeId>,
    literals: Vec<LiteralType>,
}

impl Schema {
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::new()
    }

    /// Finds a node type by name, using a binary search over the sorted index.
    pub fn lookup(&self, name: &str) -> Option<TypeId> {
        self.by_name
            .binary_search_by(|id| self.types[id.0].name.as_str().cmp(name))
            .ok()
            .map(|found| self.by_name[found])
    }

    pub fn lookup_literal(&self, name: &str) -> Option<LiteralTypeId> {
        self.literals.iter().position(|literal| literal.name == name).map(LiteralTypeId)
    }

    pub fn get(&self, id: TypeId) -> &NodeType {
        &self.types[id.0]
    }

    pub fn literal(&self, id: LiteralTypeId) -> &LiteralType {
        &self.literals[id.0]
    }

    /// The literal type of literals as they appear in a document, before conversion.
    pub fn text_type(&self) -> LiteralTypeId {
        LiteralTypeId(0)
    }

    /// All node types, in declaration order.
    pub fn types(&self) -> impl Iterator<Item = (TypeId, &NodeType)> + '_ {
        self.types.iter().enumerate().map(|(index, ty)| (TypeId(index), ty))
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Yields `id`, then its base, then the base's base, and so on. The walk is
    /// bounded by the number of types, so it ends even on a malformed schema.
    pub fn base_chain(&self, id: TypeId) -> impl Iterator<Item = TypeId> + '_ {
        std::iter::successors(Some(id), |current| self.types[current.0].base).take(self.types.len())
    }

    /// Decides whether an object of type `src` may stand where `target` is expected.
    pub fn cast(&self, src: TypeId, target: TypeId, mode: CastMode) -> bool {
        match mode {
            CastMode::Strict => src == target,
            CastMode::Relaxed => self.base_chain(src).any(|id| id == target),
        }
    }

    pub fn type_name(&self, id: TypeId) -> &str {
        &self.types[id.0].name
    }

    /// Renders the declared types, one per line, e.g.
    /// `<M> : Node @ <A>* [a], list<B> [b], <str> [c];`
    pub fn print_types(&self) -> String {
        let mut out = String::new();

        for ty in &self.types {
            out.push('<');
            out.push_str(&ty.name);
            out.push('>');

            if let Some(base) = ty.base {
                out.push_str(" : ");
                out.push_str(self.type_name(base));
            }

            if !ty.args.is_empty() {
                out.push_str(" @ ");
                let args: Vec<String> = ty
                    .args
                    .iter()
                    .map(|arg| {
                        let shape = match arg.ty {
                            ArgType::Node(id) => format!("<{}>*", self.type_name(id)),
                            ArgType::List(id) => format!("list<{}>", self.type_name(id)),
                            ArgType::Literal(id) => format!("<{}>", self.literal(id).name),
                        };
                        format!("{shape} [{}]", arg.name)
                    })
                    .collect();
                out.push_str(&args.join(", "));
            }

            out.push_str(";\n");
        }

        out
    }
}

/* Building */

/// One argument slot, as declared by the embedding program.
#[derive(Debug, Clone)]
pub struct ArgSpec {
    name: String,
    shape: ArgShape,
    type_name: String,
}

#[derive(Debug, Clone, Copy)]
enum ArgShape {
    Node,
    List,
    Literal,
}

impl ArgSpec {
    /// A slot holding one node of type `type_name`.
    pub fn node(name: &str, type_name: &str) -> Self {
        ArgSpec { name: name.to_string(), shape: ArgShape::Node, type_name: type_name.to_string() }
    }

    /// A slot holding a list of nodes of type `type_name`.
    pub fn list(name: &str, type_name: &str) -> Self {
        ArgSpec { name: name.to_string(), shape: ArgShape::List, type_name: type_name.to_string() }
    }

    /// A slot holding a literal, converted by the literal type `type_name`.
    pub fn literal(name: &str, type_name: &str) -> Self {
        ArgSpec { name: name.to_string(), shape: ArgShape::Literal, type_name: type_name.to_string() }
    }
}

/// Collects type declarations, then resolves them into a [`Schema`].
///
/// Declarations may refer to types declared later. The literal types `str`,
/// `bool` and `int` are always available.
#[derive(Debug, Clone)]
pub struct SchemaBuilder {
    literals: Vec<LiteralType>,
    decls: Vec<(String, Option<String>, Vec<ArgSpec>)>,
}

impl SchemaBuilder {
    pub fn new() -> Self {
        SchemaBuilder {
            literals: vec![
                LiteralType { name: "str".to_string(), convert: convert_str },
                LiteralType { name: "bool".to_string(), convert: convert_bool },
                LiteralType { name: "int".to_string(), convert: convert_int },
            ],
            decls: vec![],
        }
    }

    /// Adds a literal type with its own conversion.
    #[must_use]
    pub fn literal_type(mut self, name: &str, convert: fn(&str) -> Result<Scalar, String>) -> Self {
        self.literals.push(LiteralType { name: name.to_string(), convert });
        self
    }

    /// Declares a node type.
    #[must_use]
    pub fn node(mut self, name: &str, base: Option<&str>, args: impl IntoIterator<Item = ArgSpec>) -> Self {
        self.decls.push((name.to_string(), base.map(str::to_string), args.into_iter().collect()));
        self
    }

    pub fn build(self) -> Result<Schema, SchemaError> {
        let mut ids: HashMap<&str, TypeId> = HashMap::new();
        for (index, (name, _, _)) in self.decls.iter().enumerate() {
            if ids.insert(name.as_str(), TypeId(index)).is_some() {
                return Err(SchemaError::Duplicate(name.clone()));
            }
        }

        let mut literal_names = std::collections::HashSet::new();
        for literal in &self.literals {
            if !literal_names.insert(literal.name.as_str()) {
                return Err(SchemaError::DuplicateLiteral(literal.name.clone()));
            }
        }
        let literal_id = |name: &str| self.literals.iter().position(|literal| literal.name == name).map(LiteralTypeId);

        let mut types = Vec::with_capacity(self.decls.len());
        for (name, base, specs) in &self.decls {
            let base = match base {
                Some(base) => Some(
                    *ids.get(base.as_str())
                        .ok_or_else(|| SchemaError::UnknownBase { ty: name.clone(), base: base.clone() })?,
                ),
                None => None,
            };

            let mut args = Vec::with_capacity(specs.len());
            for spec in specs {
                let unknown =
                    || SchemaError::UnknownArgType { ty: name.clone(), arg: spec.name.clone(), name: spec.type_name.clone() };

                let ty = match spec.shape {
                    ArgShape::Node => ArgType::Node(*ids.get(spec.type_name.as_str()).ok_or_else(unknown)?),
                    ArgShape::List => ArgType::List(*ids.get(spec.type_name.as_str()).ok_or_else(unknown)?),
                    ArgShape::Literal => ArgType::Literal(literal_id(&spec.type_name).ok_or_else(unknown)?),
                };
                args.push(ArgDef { name: spec.name.clone(), ty });
            }

            types.push(NodeType { name: name.clone(), base, args });
        }

        // A base chain longer than the number of types must revisit some type.
        for (index, ty) in types.iter().enumerate() {
            let mut current = ty.base;
            for _ in 0..types.len() {
                match current {
                    Some(id) => current = types[id.0].base,
                    None => break,
                }
            }
            if current.is_some() {
                return Err(SchemaError::Cycle(types[index].name.clone()));
            }
        }

        let mut by_name: Vec<TypeId> = (0..types.len()).map(TypeId).collect();
        by_name.sort_by(|a, b| types[a.0].name.cmp(&types[b.0].name));

        tracing::debug!(types = types.len(), literals = self.literals.len(), "schema built");

        Ok(Schema { types, by_name, literals: self.literals })
    }
}

impl Default for SchemaBuilder {
    fn default() -> Self {
        SchemaBuilder::new()
    }
}

/* Built-in literal conversions */

#[allow(clippy::unnecessary_wraps)]
fn convert_str(text: &str) -> Result<Scalar, String> {
    Ok(Scalar::Str(text.to_string()))
}

fn convert_bool(text: &str) -> Result<Scalar, String> {
    match text {
        "0" => Ok(Scalar::Bool(false)),
        "1" => Ok(Scalar::Bool(true)),
        _ => Err(format!("invalid bool value '{text}'")),
    }
}

fn convert_int(text: &str) -> Result<Scalar, String> {
    text.parse().map(Scalar::Int).map_err(|_| format!("invalid int value '{text}'"))
}

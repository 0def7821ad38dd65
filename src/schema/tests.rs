//! Tests for the schema module.

use super::*;

use crate::error::SchemaError;

use pretty_assertions::assert_eq;

#[test]
fn lookup_finds_every_type() {
    let schema = abc();

    for (id, ty) in schema.types() {
        assert_eq!(schema.lookup(&ty.name), Some(id));
    }
    assert_eq!(schema.lookup("Z"), None);
    assert_eq!(schema.lookup(""), None);
    assert_eq!(schema.len(), 12);
}

#[test]
fn base_chains() {
    let schema = abc();
    let id = |name| schema.lookup(name).unwrap();

    let chain: Vec<_> = schema.base_chain(id("S")).map(|id| schema.type_name(id).to_string()).collect();
    assert_eq!(chain, vec!["S", "Q", "A", "Node"]);

    assert!(schema.cast(id("R"), id("A"), CastMode::Relaxed));
    assert!(!schema.cast(id("R"), id("A"), CastMode::Strict));
    assert!(schema.cast(id("A"), id("A"), CastMode::Strict));
    assert!(!schema.cast(id("A"), id("Q"), CastMode::Relaxed));
    assert!(!schema.cast(id("B"), id("A"), CastMode::Relaxed));
}

#[test]
fn print_types_of_abc() {
    let expected = "\
<Node>;
<A> : Node;
<B> : Node @ <A>* [a];
<C> : Node @ list<B> [b];
<D> : Node @ <str> [c];
<N> : Node @ <B>* [x], <C>* [y], <D>* [z];
<M> : Node @ <A>* [a], list<B> [b], <str> [c];
<P> : Node @ <A>* [x], <A>* [y];
<Q> : A;
<R> : Q;
<L> : Node @ list<Q> [q];
<S> : Q @ <bool> [b];
";
    assert_eq!(abc().print_types(), expected);
}

#[test]
fn builtin_literal_types() {
    let schema = abc();
    let convert = |name: &str, text: &str| (schema.literal(schema.lookup_literal(name).unwrap()).convert)(text);

    assert_eq!(convert("str", "a\\'b"), Ok(Scalar::Str("a\\'b".to_string())));
    assert_eq!(convert("bool", "1"), Ok(Scalar::Bool(true)));
    assert_eq!(convert("bool", "0"), Ok(Scalar::Bool(false)));
    assert_eq!(convert("bool", "2"), Err("invalid bool value '2'".to_string()));
    assert_eq!(convert("int", "-42"), Ok(Scalar::Int(-42)));
    assert_eq!(convert("int", "x"), Err("invalid int value 'x'".to_string()));

    assert_eq!(schema.literal(schema.text_type()).name, "str");
}

#[test]
fn custom_literal_types() {
    fn upper(text: &str) -> Result<Scalar, String> {
        Ok(Scalar::Str(text.to_uppercase()))
    }

    let schema = Schema::builder()
        .literal_type("upper", upper)
        .node("Shout", None, [ArgSpec::literal("text", "upper")])
        .build()
        .unwrap();

    let shout = schema.get(schema.lookup("Shout").unwrap());
    let ArgType::Literal(id) = shout.args[0].ty else { panic!("expected a literal slot") };
    assert_eq!((schema.literal(id).convert)("hey"), Ok(Scalar::Str("HEY".to_string())));
}

#[test]
fn forward_references_resolve() {
    let schema =
        Schema::builder().node("Pair", None, [ArgSpec::node("left", "Leaf")]).node("Leaf", None, []).build().unwrap();

    let pair = schema.get(schema.lookup("Pair").unwrap());
    assert_eq!(pair.args[0].ty, ArgType::Node(schema.lookup("Leaf").unwrap()));
}

#[test]
fn malformed_schemas() {
    let err = Schema::builder().node("A", None, []).node("A", None, []).build().unwrap_err();
    assert_eq!(err, SchemaError::Duplicate("A".to_string()));

    let err = Schema::builder().node("A", Some("Missing"), []).build().unwrap_err();
    assert_eq!(err.to_string(), "ast-type A: unknown base type 'Missing'");

    let err = Schema::builder().node("A", None, [ArgSpec::node("x", "Missing")]).build().unwrap_err();
    assert_eq!(err.to_string(), "ast-type A: arg 'x': unknown type 'Missing'");

    let err = Schema::builder().node("A", None, [ArgSpec::literal("x", "float")]).build().unwrap_err();
    assert!(matches!(err, SchemaError::UnknownArgType { .. }));

    let err = Schema::builder().literal_type("bool", |_| Ok(Scalar::Bool(true))).build().unwrap_err();
    assert_eq!(err, SchemaError::DuplicateLiteral("bool".to_string()));
}

#[test]
fn cycles_anywhere_in_a_chain_are_rejected() {
    // The cycle does not pass through `Start`, only through types above it.
    let err = Schema::builder()
        .node("Start", Some("X"), [])
        .node("X", Some("Y"), [])
        .node("Y", Some("X"), [])
        .build()
        .unwrap_err();

    assert!(matches!(err, SchemaError::Cycle(_)));
}

use super::{ArgSpec, Schema};

/// A small demonstration schema, exercising every kind of argument slot and a
/// few levels of base types:
///
/// ```text
/// Node
/// ├── A
/// │   └── Q
/// │       ├── R
/// │       └── S (b: bool)
/// ├── B (a: A)
/// ├── C (b: list<B>)
/// ├── D (c: str)
/// ├── N (x: B, y: C, z: D)
/// ├── M (a: A, b: list<B>, c: str)
/// ├── P (x: A, y: A)
/// └── L (q: list<Q>)
/// ```
pub fn abc() -> Schema {
    Schema::builder()
        .node("Node", None, [])
        .node("A", Some("Node"), [])
        .node("B", Some("Node"), [ArgSpec::node("a", "A")])
        .node("C", Some("Node"), [ArgSpec::list("b", "B")])
        .node("D", Some("Node"), [ArgSpec::literal("c", "str")])
        .node("N", Some("Node"), [ArgSpec::node("x", "B"), ArgSpec::node("y", "C"), ArgSpec::node("z", "D")])
        .node("M", Some("Node"), [ArgSpec::node("a", "A"), ArgSpec::list("b", "B"), ArgSpec::literal("c", "str")])
        .node("P", Some("Node"), [ArgSpec::node("x", "A"), ArgSpec::node("y", "A")])
        .node("Q", Some("A"), [])
        .node("R", Some("Q"), [])
        .node("L", Some("Node"), [ArgSpec::list("q", "Q")])
        .node("S", Some("Q"), [ArgSpec::literal("b", "bool")])
        .build()
        .expect("The abc schema should be well formed")
}

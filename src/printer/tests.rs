//! Tests for the printer module.

use super::*;

use crate::eval::{build, EvalOptions};
use crate::parser::{parse, ParseOptions};
use crate::schema::abc;

use pretty_assertions::assert_eq;

fn parsed(input: &str) -> Ast {
    parse("<text>", input, &ParseOptions::default()).unwrap_or_else(|err| panic!("{input:?} failed to parse: {err}"))
}

fn printed(input: &str, format: Format) -> String {
    print_ast(&parsed(input), format, false).unwrap()
}

const LIST_DOC: &str = "C(.b = list<B>[[0] = B(.a = A())])";

const LIST_PRETTY: &str = "\
C(
    .b = list<B> [
        [0] = B(
            .a = A()
        )
    ]
)
";

#[test]
fn pretty() {
    assert_eq!(printed("A()", Format::Pretty), "A()\n");
    assert_eq!(printed("B(.a=A())", Format::Pretty), "B(\n    .a = A()\n)\n");
    assert_eq!(printed("D('x')", Format::Pretty), "D('x')\n");
    assert_eq!(printed("C(.b=list<B>[])", Format::Pretty), "C(\n    .b = list<B> []\n)\n");
    assert_eq!(printed(LIST_DOC, Format::Pretty), LIST_PRETTY);
}

#[test]
fn terse() {
    assert_eq!(printed("B( .a = A() )", Format::Terse), "B(.a=A())\n");
    assert_eq!(printed(LIST_DOC, Format::Terse), "C(.b=list<B>[[0]=B(.a=A())])\n");
    assert_eq!(printed("M(.a = A()\n  .b = list<B>[]\n  .c = 'x')", Format::Terse), "M(.a=A().b=list<B>[].c='x')\n");
}

#[test]
fn indent_dots() {
    let ast = parsed(LIST_DOC);
    assert_eq!(
        print_ast(&ast, Format::Pretty, true).unwrap(),
        "C(\n.   .b = list<B> [\n.   .   [0] = B(\n.   .   .   .a = A()\n.   .   )\n.   ]\n)\n"
    );
}

#[test]
fn literals_keep_their_escapes() {
    assert_eq!(printed(r"D('a\'b')", Format::Terse), "D('a\\'b')\n");
    assert_eq!(printed("D(\"it's\")", Format::Terse), "D(\"it's\")\n");
    assert_eq!(printed(r"D('tab\there')", Format::Terse), "D('tab\\there')\n");
}

#[test]
fn quote_choice() {
    assert_eq!(quote("plain"), "'plain'");
    assert_eq!(quote("it's"), "\"it's\"");
    assert_eq!(quote(r"it\'s"), r"'it\'s'");
    assert_eq!(quote(r"back\\'"), "\"back\\\\'\"");
    assert_eq!(quote(""), "''");
}

#[test]
fn print_names_attributes() {
    let expected = "\
Tree(
    .root = TreeNode(
        .name = NodeName('A')
        .args = ListArgs(
            .list = list<NodeArg> []
        )
    )
)
";
    assert_eq!(printed("A()", Format::Print), expected);
}

#[test]
fn print_lists() {
    let expected = "\
Tree(
    .root = TreeNode(
        .name = NodeName('C')
        .args = ListArgs(
            .list = list<NodeArg> [
                [0] = NodeArg(
                    .name = ArgName('b')
                    .value = ListValue(
                        .list = NodeList(
                            .base = NodeName('B')
                            .elems = list<ListElem> []
                        )
                    )
                )
            ]
        )
    )
)
";
    assert_eq!(printed("C(.b = list<B>[])", Format::Print), expected);
}

#[test]
fn dump_is_positional() {
    let expected = "\
Tree(
    TreeNode(
        NodeName('D')
        LiteralArgs(
            Literal('x')
        )
    )
)
";
    assert_eq!(printed("D('x')", Format::Dump), expected);
}

#[test]
fn pretty_output_parses_to_the_same_tree() {
    for input in [
        "A()",
        "D('x')",
        "D(\"it's\")",
        LIST_DOC,
        "N(.x = B(.a = A()) .y = C(.b = list<B>[]) .z = D('z'))",
        "M(.a=A().b=list<B>[[0]=B(.a=A())[1]=B(.a=A())].c=\"\")",
    ] {
        let ast = parsed(input);
        for format in [Format::Pretty, Format::Terse] {
            let text = print_ast(&ast, format, false).unwrap();
            let again = parsed(&text);
            assert!(
                ast.same_structure(ast.root().unwrap(), &again, again.root().unwrap()).unwrap(),
                "{input:?} printed as {text:?}"
            );
        }
    }
}

#[test]
fn missing_root() {
    assert_eq!(print_ast(&Ast::new(), Format::Pretty, false), Err(AstError::NoRoot));
}

/* Typed Trees */

fn typed(input: &str) -> String {
    let schema = abc();
    let built = build(&parsed(input), &schema, &EvalOptions::default()).unwrap();
    print_typed(&built.tree, &schema, built.root, false).unwrap()
}

#[test]
fn typed_nodes() {
    assert_eq!(typed("A()"), "A()\n");
    assert_eq!(typed("B(.a = A())"), "B(\n    .a = A()\n)\n");
    assert_eq!(typed(LIST_DOC), LIST_PRETTY);
}

#[test]
fn typed_literals() {
    assert_eq!(typed("D('x')"), "D(\n    .c = 'x'\n)\n");
    assert_eq!(typed("S(.b = '1')"), "S(\n    .b = true\n)\n");
    assert_eq!(typed("S('0')"), "S(\n    .b = false\n)\n");
}

#[test]
fn typed_empty_list() {
    assert_eq!(typed("L(.q = list<Q>[])"), "L(\n    .q = list<Q> []\n)\n");
}

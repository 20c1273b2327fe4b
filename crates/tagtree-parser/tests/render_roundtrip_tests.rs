//! Tests that rendering a parsed tree produces markup that parses back to
//! the same tree.

use tagtree_dom::{DomTree, NodeId};
use tagtree_parser::parse;

/// Helper to parse, render the root, and parse the rendering again.
fn reparse(input: &str) -> (DomTree, String, DomTree) {
    let first = parse(input).unwrap_or_else(|e| panic!("{input:?}: {e}"));
    let root = first.root().expect("root");
    let rendered = first.render(root);
    let second = parse(&rendered).unwrap_or_else(|e| panic!("{rendered:?}: {e}"));
    (first, rendered, second)
}

/// Helper to describe a subtree as (tag, attributes, child count) in
/// document order.
fn shape(tree: &DomTree, id: NodeId, out: &mut Vec<String>) {
    if let Some(element) = tree.as_element(id) {
        out.push(format!(
            "{} {:?} {}",
            element.tag_name,
            element.attrs,
            tree.children(id).len()
        ));
    } else if let Some(text) = tree.as_text(id) {
        out.push(format!("#text {text:?}"));
    }
    for &child in tree.children(id) {
        shape(tree, child, out);
    }
}

#[test]
fn test_rerender_is_stable() {
    let corpus = [
        "<tag>text</tag>",
        "<html x>A<div y>B</div></html>",
        "<html foo='bar'></html>",
        "<a><b></b></a>",
        "<a  z='1'   b =  \"2\" m>x<y k=''>z</y   ></a>",
        "<p> spaced  text > with = grammar / chars </p>",
    ];
    for input in corpus {
        let (first, rendered, second) = reparse(input);

        let mut first_shape = Vec::new();
        let mut second_shape = Vec::new();
        shape(&first, first.root().unwrap(), &mut first_shape);
        shape(&second, second.root().unwrap(), &mut second_shape);
        assert_eq!(first_shape, second_shape, "{input}");
        assert_eq!(first, second, "{input}");

        // Rendering is a fixed point after the first pass.
        assert_eq!(second.render(second.root().unwrap()), rendered, "{input}");
    }
}

#[test]
fn test_rendering_normalizes_quotes_and_booleans() {
    let (_, rendered, _) = reparse("<a  z='1'   b =  \"2\" m>x</a  >");
    assert_eq!(rendered, r#"<a b="2" m="m" z="1">x</a>"#);
}

#[test]
fn test_deeply_nested_document_round_trips() {
    const DEPTH: usize = 100_000;

    let input = format!(
        "{}x{}",
        "<a k='v'>".repeat(DEPTH),
        "</a>".repeat(DEPTH)
    );
    let tree = parse(&input).unwrap_or_else(|e| panic!("deep document: {e}"));
    let root = tree.root().unwrap();

    assert_eq!(tree.len(), DEPTH + 1);
    assert_eq!(tree.text_content(root), "x");
    assert_eq!(
        tree.render(root),
        format!("{}x{}", "<a k=\"v\">".repeat(DEPTH), "</a>".repeat(DEPTH))
    );
}

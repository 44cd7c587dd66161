//! Property tests for element tree structure.
//!
//! 1. Parent and child links always agree, whatever sequence of moves runs.
//! 2. Moves that would create a cycle are rejected and leave the tree as is.
//! 3. Serialized text is always escaped.

use litext_core::dom::{Document, NodeId};
use litext_core::error::DomError;
use litext_core::fragment::{Fragment, VNode};
use litext_core::template::Template;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Append(usize, usize),
    Prepend(usize, usize),
    Detach(usize),
    Clear(usize),
}

fn op_strategy(n: usize) -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..n, 0..n).prop_map(|(p, c)| Op::Append(p, c)),
        (0..n, 0..n).prop_map(|(p, c)| Op::Prepend(p, c)),
        (0..n).prop_map(Op::Detach),
        (0..n).prop_map(Op::Clear),
    ]
}

fn check_links(doc: &Document, nodes: &[NodeId]) -> Result<(), TestCaseError> {
    for &node in nodes {
        for &child in doc.children(node) {
            prop_assert_eq!(doc.parent(child), Some(node));
        }
        if let Some(parent) = doc.parent(node) {
            let count = doc.children(parent).iter().filter(|c| **c == node).count();
            prop_assert_eq!(count, 1);
            prop_assert!(!doc.contains(node, parent) || node == parent);
        }
    }
    Ok(())
}

proptest! {
    #[test]
    fn links_stay_consistent(ops in proptest::collection::vec(op_strategy(6), 0..40)) {
        let mut doc = Document::new();
        let mut nodes = vec![doc.body()];
        for _ in 0..5 {
            nodes.push(doc.create_element("div"));
        }
        for op in ops {
            let result = match op {
                Op::Append(p, c) => doc.append_child(nodes[p], nodes[c]),
                Op::Prepend(p, c) => doc.prepend_child(nodes[p], nodes[c]),
                Op::Detach(n) => doc.detach(nodes[n]),
                Op::Clear(n) => doc.clear_children(nodes[n]),
            };
            match result {
                Ok(()) | Err(DomError::HierarchyRequest { .. }) => {}
                Err(other) => prop_assert!(false, "unexpected error {other}"),
            }
            check_links(&doc, &nodes)?;
        }
    }

    #[test]
    fn text_is_escaped(text in ".*") {
        let html = Fragment::from(VNode::element("p").with_text(text.clone())).to_html();
        prop_assert!(!html[3..html.len() - 4].contains('<'));
        let mut doc = Document::new();
        let body = doc.body();
        let node = doc.create_element("p");
        doc.set_text_content(node, text.clone()).unwrap();
        doc.append_child(body, node).unwrap();
        prop_assert_eq!(doc.inner_html(body), html);
        prop_assert_eq!(doc.text_content(node), text);
    }
}

#[test]
fn cycle_is_rejected_without_change() {
    let mut doc = Document::new();
    let outer = doc.create_element("div");
    let inner = doc.create_element("div");
    doc.append_child(outer, inner).unwrap();
    let err = doc.append_child(inner, outer).unwrap_err();
    assert_eq!(
        err,
        DomError::HierarchyRequest {
            parent: inner,
            child: outer
        }
    );
    assert_eq!(doc.children(outer), &[inner]);
    assert_eq!(doc.parent(outer), None);
}

#[test]
fn template_renders_list() {
    struct Row {
        name: &'static str,
        qty: u32,
    }
    let tpl = Template::new(|rows: &Vec<Row>| {
        rows.iter()
            .map(|row| {
                VNode::element("li")
                    .class("row")
                    .with_text(format!("{} x{}", row.name, row.qty))
            })
            .collect::<Fragment>()
    });
    let rows = vec![Row { name: "a&b", qty: 2 }, Row { name: "c", qty: 1 }];
    assert_eq!(
        tpl.apply(&rows),
        r#"<li class="row">a&amp;b x2</li><li class="row">c x1</li>"#
    );

    let mut doc = Document::new();
    let list = doc.create_element("ul");
    let built = tpl.overwrite(&mut doc, list, &rows).unwrap();
    assert_eq!(built.len(), 2);
    assert_eq!(doc.children(list), built.as_slice());
}

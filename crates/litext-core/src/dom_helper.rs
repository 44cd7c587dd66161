#![forbid(unsafe_code)]

//! Fragment insertion helpers.

use crate::dom::{Document, NodeId};
use crate::error::DomError;
use crate::fragment::Fragment;
use crate::template::Template;

/// Build `fragment` and append it after the existing children of `target`.
pub fn append(
    doc: &mut Document,
    target: NodeId,
    fragment: &Fragment,
) -> Result<Vec<NodeId>, DomError> {
    require_element(doc, target)?;
    let nodes = fragment.build(doc)?;
    for node in &nodes {
        doc.append_child(target, *node)?;
    }
    Ok(nodes)
}

/// Clear `target` and build `fragment` into it.
pub fn overwrite(
    doc: &mut Document,
    target: NodeId,
    fragment: &Fragment,
) -> Result<Vec<NodeId>, DomError> {
    require_element(doc, target)?;
    doc.clear_children(target)?;
    append(doc, target, fragment)
}

/// Build `fragment` into detached nodes.
pub fn create_fragment(doc: &mut Document, fragment: &Fragment) -> Result<Vec<NodeId>, DomError> {
    fragment.build(doc)
}

/// [`append`] with a template evaluated against `data`.
pub fn append_template<T>(
    doc: &mut Document,
    target: NodeId,
    template: &Template<T>,
    data: &T,
) -> Result<Vec<NodeId>, DomError> {
    append(doc, target, &template.template(data))
}

/// [`overwrite`] with a template evaluated against `data`.
pub fn overwrite_template<T>(
    doc: &mut Document,
    target: NodeId,
    template: &Template<T>,
    data: &T,
) -> Result<Vec<NodeId>, DomError> {
    overwrite(doc, target, &template.template(data))
}

fn require_element(doc: &Document, id: NodeId) -> Result<(), DomError> {
    if !doc.is_alive(id) {
        return Err(DomError::UnknownNode(id));
    }
    if !doc.is_element(id) {
        return Err(DomError::NotAnElement(id));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fragment::VNode;

    fn item(text: &str) -> Fragment {
        VNode::element("li").with_text(text).into()
    }

    #[test]
    fn append_preserves_existing_content() {
        let mut doc = Document::new();
        let list = doc.create_element("ul");
        append(&mut doc, list, &item("one")).unwrap();
        append(&mut doc, list, &item("two")).unwrap();
        assert_eq!(doc.inner_html(list), "<li>one</li><li>two</li>");
    }

    #[test]
    fn overwrite_discards_existing_content() {
        let mut doc = Document::new();
        let list = doc.create_element("ul");
        append(&mut doc, list, &item("one")).unwrap();
        overwrite(&mut doc, list, &item("two")).unwrap();
        assert_eq!(doc.inner_html(list), "<li>two</li>");
    }

    #[test]
    fn create_fragment_leaves_nodes_detached() {
        let mut doc = Document::new();
        let nodes = create_fragment(&mut doc, &item("x")).unwrap();
        assert_eq!(nodes.len(), 1);
        assert_eq!(doc.parent(nodes[0]), None);
        assert_eq!(doc.text_content(nodes[0]), "x");
    }

    #[test]
    fn template_variants_evaluate_data() {
        let mut doc = Document::new();
        let list = doc.create_element("ul");
        let tpl = Template::new(|n: &u32| VNode::element("li").with_text(n.to_string()).into());
        append_template(&mut doc, list, &tpl, &1).unwrap();
        append_template(&mut doc, list, &tpl, &2).unwrap();
        assert_eq!(doc.text_content(list), "12");
        overwrite_template(&mut doc, list, &tpl, &3).unwrap();
        assert_eq!(doc.text_content(list), "3");
    }

    #[test]
    fn text_target_is_rejected() {
        let mut doc = Document::new();
        let text = doc.create_text("t");
        assert_eq!(
            append(&mut doc, text, &item("x")),
            Err(DomError::NotAnElement(text))
        );
    }
}

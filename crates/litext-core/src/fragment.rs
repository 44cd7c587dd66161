#![forbid(unsafe_code)]

//! Declarative element descriptions.
//!
//! A [`Fragment`] is what a template function returns: a list of [`VNode`]s
//! that can be built into a [`Document`] or serialized to HTML without
//! touching any tree.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use crate::dom::{Document, NodeId, escape_html};
use crate::error::DomError;

/// One node of a declarative description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VNode {
    Element {
        tag: String,
        classes: Vec<String>,
        attributes: BTreeMap<String, String>,
        children: Vec<VNode>,
    },
    Text(String),
}

impl VNode {
    /// An element with no classes, attributes or children.
    #[must_use]
    pub fn element(tag: impl Into<String>) -> Self {
        Self::Element {
            tag: tag.into(),
            classes: Vec::new(),
            attributes: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    /// A text node.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Add a class. No-op on text nodes.
    #[must_use]
    pub fn class(mut self, class: impl Into<String>) -> Self {
        if let Self::Element { classes, .. } = &mut self {
            classes.push(class.into());
        }
        self
    }

    /// Set an attribute. No-op on text nodes.
    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        if let Self::Element { attributes, .. } = &mut self {
            attributes.insert(name.into(), value.into());
        }
        self
    }

    /// Append a child. No-op on text nodes.
    #[must_use]
    pub fn child(mut self, child: VNode) -> Self {
        if let Self::Element { children, .. } = &mut self {
            children.push(child);
        }
        self
    }

    /// Append a text child.
    #[must_use]
    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.child(Self::text(text))
    }

    /// Build into detached document nodes.
    pub fn build(&self, doc: &mut Document) -> Result<NodeId, DomError> {
        match self {
            Self::Text(text) => Ok(doc.create_text(text.clone())),
            Self::Element {
                tag,
                classes,
                attributes,
                children,
            } => {
                let el = doc.create_element(tag.clone());
                for class in classes {
                    doc.add_class(el, class)?;
                }
                for (name, value) in attributes {
                    doc.set_attribute(el, name, value.clone())?;
                }
                for child in children {
                    let built = child.build(doc)?;
                    doc.append_child(el, built)?;
                }
                Ok(el)
            }
        }
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Self::Text(text) => out.push_str(&escape_html(text)),
            Self::Element {
                tag,
                classes,
                attributes,
                children,
            } => {
                out.push('<');
                out.push_str(tag);
                if !classes.is_empty() {
                    let _ = write!(out, " class=\"{}\"", escape_html(&classes.join(" ")));
                }
                for (name, value) in attributes {
                    let _ = write!(out, " {name}=\"{}\"", escape_html(value));
                }
                out.push('>');
                for child in children {
                    child.write_html(out);
                }
                let _ = write!(out, "</{tag}>");
            }
        }
    }
}

/// An ordered list of top-level nodes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Fragment {
    nodes: Vec<VNode>,
}

impl Fragment {
    /// An empty fragment.
    #[must_use]
    pub const fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Append a top-level node.
    #[must_use]
    pub fn push(mut self, node: VNode) -> Self {
        self.nodes.push(node);
        self
    }

    /// Top-level nodes.
    #[must_use]
    pub fn nodes(&self) -> &[VNode] {
        &self.nodes
    }

    /// Whether the fragment has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Build every top-level node as a detached subtree.
    pub fn build(&self, doc: &mut Document) -> Result<Vec<NodeId>, DomError> {
        self.nodes.iter().map(|node| node.build(doc)).collect()
    }

    /// Serialize to HTML.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for node in &self.nodes {
            node.write_html(&mut out);
        }
        out
    }
}

impl From<VNode> for Fragment {
    fn from(node: VNode) -> Self {
        Self { nodes: vec![node] }
    }
}

impl FromIterator<VNode> for Fragment {
    fn from_iter<I: IntoIterator<Item = VNode>>(iter: I) -> Self {
        Self {
            nodes: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_ignores_element_ops_on_text() {
        let node = VNode::text("plain").class("x").attr("a", "b");
        assert_eq!(node, VNode::text("plain"));
    }

    #[test]
    fn build_matches_serialization() {
        let mut doc = Document::new();
        let vnode = VNode::element("button")
            .class("ext-btn")
            .attr("type", "button")
            .with_text("Save & close");
        let el = vnode.build(&mut doc).unwrap();
        let fragment = Fragment::from(vnode);
        assert_eq!(doc.to_html(el), fragment.to_html());
        assert_eq!(
            fragment.to_html(),
            "<button class=\"ext-btn\" type=\"button\">Save &amp; close</button>"
        );
    }

    #[test]
    fn fragment_builds_detached_roots() {
        let mut doc = Document::new();
        let fragment: Fragment = ["a", "b"].into_iter().map(VNode::text).collect();
        let nodes = fragment.build(&mut doc).unwrap();
        assert_eq!(nodes.len(), 2);
        assert!(nodes.iter().all(|n| doc.parent(*n).is_none()));
    }
}

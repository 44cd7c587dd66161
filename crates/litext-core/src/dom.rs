#![forbid(unsafe_code)]

//! Host-driven element tree.
//!
//! [`Document`] is an arena of element and text nodes addressed by copyable
//! [`NodeId`]s. The embedding host mirrors it onto a real DOM (or any other
//! surface) and reports rendered sizes back through
//! [`Document::set_rendered_size`]. Nothing in here blocks or measures on
//! its own.
//!
//! Destroyed nodes keep their slot, so a stale id never aliases a newer node.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::error::DomError;
use crate::geometry::Size;

/// Prefix of document-allocated component ids.
pub const COMPONENT_ID_PREFIX: &str = "ext-comp-";

/// First numeric suffix handed out by [`Document::allocate_component_id`].
pub const FIRST_COMPONENT_ID: u64 = 1001;

/// Stable identifier for a node in a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(u32);

impl NodeId {
    /// Rebuild an id from its raw value (e.g. one received from the host).
    #[must_use]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Get the raw numeric value.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    const fn index(self) -> usize {
        self.0 as usize
    }
}

/// CSS `position` values the toolkit writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Position {
    #[default]
    Static,
    Relative,
    Absolute,
}

impl Position {
    /// CSS keyword.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Static => "static",
            Self::Relative => "relative",
            Self::Absolute => "absolute",
        }
    }
}

/// Inline box style of an element. `None` means "not set".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BoxStyle {
    pub position: Option<Position>,
    pub top: Option<i32>,
    pub right: Option<i32>,
    pub bottom: Option<i32>,
    pub left: Option<i32>,
    pub width: Option<i32>,
    pub height: Option<i32>,
}

impl BoxStyle {
    /// Whether no property is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Serialize to an inline `style` attribute value.
    #[must_use]
    pub fn to_css(&self) -> String {
        let mut out = String::new();
        if let Some(position) = self.position {
            let _ = write!(out, "position: {};", position.as_str());
        }
        let props = [
            ("top", self.top),
            ("right", self.right),
            ("bottom", self.bottom),
            ("left", self.left),
            ("width", self.width),
            ("height", self.height),
        ];
        for (name, value) in props {
            if let Some(px) = value {
                if !out.is_empty() {
                    out.push(' ');
                }
                let _ = write!(out, "{name}: {px}px;");
            }
        }
        out
    }
}

#[derive(Debug, Clone)]
enum NodeKind {
    Element(String),
    Text(String),
}

#[derive(Debug, Clone)]
struct NodeData {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    style: BoxStyle,
    rendered: Size,
    alive: bool,
}

impl NodeData {
    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            parent: None,
            children: Vec::new(),
            classes: Vec::new(),
            attributes: BTreeMap::new(),
            style: BoxStyle::default(),
            rendered: Size::ZERO,
            alive: true,
        }
    }
}

/// Arena-backed element tree with a `body` root.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<NodeData>,
    body: NodeId,
    next_component_id: u64,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty document containing only `body`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![NodeData::new(NodeKind::Element("body".to_string()))],
            body: NodeId(0),
            next_component_id: FIRST_COMPONENT_ID,
        }
    }

    /// The document root.
    #[must_use]
    pub const fn body(&self) -> NodeId {
        self.body
    }

    /// Hand out the next `ext-comp-<n>` id.
    pub fn allocate_component_id(&mut self) -> String {
        let id = format!("{COMPONENT_ID_PREFIX}{}", self.next_component_id);
        self.next_component_id += 1;
        id
    }

    /// Create a detached element.
    pub fn create_element(&mut self, tag: impl Into<String>) -> NodeId {
        self.push(NodeKind::Element(tag.into()))
    }

    /// Create a detached text node.
    pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
        self.push(NodeKind::Text(text.into()))
    }

    fn push(&mut self, kind: NodeKind) -> NodeId {
        let raw = u32::try_from(self.nodes.len()).unwrap_or(u32::MAX);
        self.nodes.push(NodeData::new(kind));
        NodeId(raw)
    }

    fn node(&self, id: NodeId) -> Result<&NodeData, DomError> {
        self.nodes
            .get(id.index())
            .filter(|n| n.alive)
            .ok_or(DomError::UnknownNode(id))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut NodeData, DomError> {
        self.nodes
            .get_mut(id.index())
            .filter(|n| n.alive)
            .ok_or(DomError::UnknownNode(id))
    }

    fn element_mut(&mut self, id: NodeId) -> Result<&mut NodeData, DomError> {
        let node = self.node_mut(id)?;
        match node.kind {
            NodeKind::Element(_) => Ok(node),
            NodeKind::Text(_) => Err(DomError::NotAnElement(id)),
        }
    }

    /// Whether `id` refers to a live node.
    #[must_use]
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.node(id).is_ok()
    }

    /// Whether `id` refers to a live element.
    #[must_use]
    pub fn is_element(&self, id: NodeId) -> bool {
        matches!(self.node(id).map(|n| &n.kind), Ok(NodeKind::Element(_)))
    }

    /// Tag name of an element.
    #[must_use]
    pub fn tag(&self, id: NodeId) -> Option<&str> {
        match &self.node(id).ok()?.kind {
            NodeKind::Element(tag) => Some(tag),
            NodeKind::Text(_) => None,
        }
    }

    /// Parent of a node, if attached to one.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).ok()?.parent
    }

    /// Children in document order. Empty for unknown nodes.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Inclusive containment: a node contains itself.
    #[must_use]
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        if !self.is_alive(ancestor) {
            return false;
        }
        let mut cursor = Some(node);
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            cursor = self.parent(current);
        }
        false
    }

    /// Whether the node is reachable from `body`.
    #[must_use]
    pub fn is_attached(&self, id: NodeId) -> bool {
        self.contains(self.body, id)
    }

    /// Append `child` as the last child of `parent`, moving it if attached elsewhere.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        self.insert_child(parent, child, false)
    }

    /// Insert `child` as the first child of `parent`, moving it if attached elsewhere.
    pub fn prepend_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        self.insert_child(parent, child, true)
    }

    fn insert_child(&mut self, parent: NodeId, child: NodeId, front: bool) -> Result<(), DomError> {
        self.element_mut(parent)?;
        self.node(child)?;
        if self.contains(child, parent) {
            return Err(DomError::HierarchyRequest { parent, child });
        }
        self.detach(child)?;
        let siblings = &mut self.node_mut(parent)?.children;
        if front {
            siblings.insert(0, child);
        } else {
            siblings.push(child);
        }
        self.node_mut(child)?.parent = Some(parent);
        Ok(())
    }

    /// Remove a node from its parent. The node stays alive.
    pub fn detach(&mut self, id: NodeId) -> Result<(), DomError> {
        let Some(parent) = self.node(id)?.parent else {
            return Ok(());
        };
        if let Ok(p) = self.node_mut(parent) {
            p.children.retain(|c| *c != id);
        }
        self.node_mut(id)?.parent = None;
        Ok(())
    }

    /// Detach every child (`innerHTML = ''`). Children stay alive.
    pub fn clear_children(&mut self, id: NodeId) -> Result<(), DomError> {
        let children = std::mem::take(&mut self.node_mut(id)?.children);
        for child in children {
            if let Ok(c) = self.node_mut(child) {
                c.parent = None;
            }
        }
        Ok(())
    }

    /// Detach a node and destroy it together with its subtree.
    pub fn remove(&mut self, id: NodeId) -> Result<(), DomError> {
        self.detach(id)?;
        let mut doomed = self.descendants(id);
        doomed.push(id);
        for node in doomed {
            if let Some(n) = self.nodes.get_mut(node.index()) {
                n.alive = false;
                n.parent = None;
                n.children.clear();
            }
        }
        Ok(())
    }

    /// All descendants of `root` in pre-order, excluding `root`.
    #[must_use]
    pub fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(root).iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }
        out
    }

    // ---------------------------------------------------------------------
    // Classes
    // ---------------------------------------------------------------------

    /// Class list of an element.
    #[must_use]
    pub fn classes(&self, id: NodeId) -> &[String] {
        self.node(id).map(|n| n.classes.as_slice()).unwrap_or(&[])
    }

    /// Whether the element carries `class`.
    #[must_use]
    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.classes(id).iter().any(|c| c == class)
    }

    /// Add a class if not already present.
    pub fn add_class(&mut self, id: NodeId, class: &str) -> Result<(), DomError> {
        let node = self.element_mut(id)?;
        if !node.classes.iter().any(|c| c == class) {
            node.classes.push(class.to_string());
        }
        Ok(())
    }

    /// Remove a class if present.
    pub fn remove_class(&mut self, id: NodeId, class: &str) -> Result<(), DomError> {
        self.element_mut(id)?.classes.retain(|c| c != class);
        Ok(())
    }

    /// `classList.toggle`: flips the class, or forces it with `Some(state)`.
    ///
    /// Returns whether the class is present afterwards.
    pub fn toggle_class(
        &mut self,
        id: NodeId,
        class: &str,
        force: Option<bool>,
    ) -> Result<bool, DomError> {
        let present = force.unwrap_or(!self.has_class(id, class));
        if present {
            self.add_class(id, class)?;
        } else {
            self.remove_class(id, class)?;
        }
        Ok(present)
    }

    /// Replace the whole class list from a space separated string.
    pub fn set_class_name(&mut self, id: NodeId, class_name: &str) -> Result<(), DomError> {
        let node = self.element_mut(id)?;
        node.classes = class_name.split_whitespace().map(str::to_string).collect();
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Attributes, text, style
    // ---------------------------------------------------------------------

    /// Set an attribute.
    pub fn set_attribute(
        &mut self,
        id: NodeId,
        name: &str,
        value: impl Into<String>,
    ) -> Result<(), DomError> {
        self.element_mut(id)?
            .attributes
            .insert(name.to_string(), value.into());
        Ok(())
    }

    /// Read an attribute.
    #[must_use]
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.node(id).ok()?.attributes.get(name).map(String::as_str)
    }

    /// Remove an attribute.
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> Result<(), DomError> {
        self.element_mut(id)?.attributes.remove(name);
        Ok(())
    }

    /// Concatenated text of the node and its descendants.
    #[must_use]
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        if let Ok(NodeKind::Text(text)) = self.node(id).map(|n| &n.kind) {
            out.push_str(text);
        }
        for node in self.descendants(id) {
            if let Ok(NodeKind::Text(text)) = self.node(node).map(|n| &n.kind) {
                out.push_str(text);
            }
        }
        out
    }

    /// Replace the children of an element with a single text node, or
    /// rewrite a text node in place.
    pub fn set_text_content(&mut self, id: NodeId, text: impl Into<String>) -> Result<(), DomError> {
        let text = text.into();
        if let NodeKind::Text(current) = &mut self.node_mut(id)?.kind {
            *current = text;
            return Ok(());
        }
        self.clear_children(id)?;
        if !text.is_empty() {
            let node = self.create_text(text);
            self.append_child(id, node)?;
        }
        Ok(())
    }

    /// Inline style of an element (default for unknown nodes).
    #[must_use]
    pub fn style(&self, id: NodeId) -> BoxStyle {
        self.node(id).map(|n| n.style).unwrap_or_default()
    }

    /// Mutable inline style of an element.
    pub fn style_mut(&mut self, id: NodeId) -> Result<&mut BoxStyle, DomError> {
        Ok(&mut self.element_mut(id)?.style)
    }

    // ---------------------------------------------------------------------
    // Measurement
    // ---------------------------------------------------------------------

    /// Record the size the host rendered an element at.
    pub fn set_rendered_size(&mut self, id: NodeId, size: Size) -> Result<(), DomError> {
        self.element_mut(id)?.rendered = size;
        Ok(())
    }

    /// Last host-reported size.
    #[must_use]
    pub fn rendered_size(&self, id: NodeId) -> Size {
        self.node(id).map(|n| n.rendered).unwrap_or_default()
    }

    /// `offsetWidth`: the explicit style width wins over the host measurement.
    #[must_use]
    pub fn offset_width(&self, id: NodeId) -> i32 {
        self.style(id)
            .width
            .unwrap_or_else(|| self.rendered_size(id).width)
    }

    /// `offsetHeight`: the explicit style height wins over the host measurement.
    #[must_use]
    pub fn offset_height(&self, id: NodeId) -> i32 {
        self.style(id)
            .height
            .unwrap_or_else(|| self.rendered_size(id).height)
    }

    // ---------------------------------------------------------------------
    // Queries
    // ---------------------------------------------------------------------

    /// Descendants of `root` carrying `class`, in document order.
    #[must_use]
    pub fn query_class(&self, root: NodeId, class: &str) -> Vec<NodeId> {
        self.descendants(root)
            .into_iter()
            .filter(|id| self.has_class(*id, class))
            .collect()
    }

    /// First descendant of `root` carrying `class`.
    #[must_use]
    pub fn first_by_class(&self, root: NodeId, class: &str) -> Option<NodeId> {
        self.descendants(root)
            .into_iter()
            .find(|id| self.has_class(*id, class))
    }

    /// First descendant of `root` with the given tag.
    #[must_use]
    pub fn first_by_tag(&self, root: NodeId, tag: &str) -> Option<NodeId> {
        self.descendants(root)
            .into_iter()
            .find(|id| self.tag(*id) == Some(tag))
    }

    // ---------------------------------------------------------------------
    // Cloning and serialization
    // ---------------------------------------------------------------------

    /// `cloneNode(true)`: copy a subtree into new detached nodes.
    pub fn deep_clone(&mut self, id: NodeId) -> Result<NodeId, DomError> {
        let source = self.node(id)?.clone();
        let copy = self.push(source.kind);
        {
            let node = self.node_mut(copy)?;
            node.classes = source.classes;
            node.attributes = source.attributes;
            node.style = source.style;
            node.rendered = source.rendered;
        }
        for child in source.children {
            let child_copy = self.deep_clone(child)?;
            self.append_child(copy, child_copy)?;
        }
        Ok(copy)
    }

    /// Outer HTML of a node. Unknown nodes serialize to an empty string.
    #[must_use]
    pub fn to_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_html(id, &mut out);
        out
    }

    /// Inner HTML of a node.
    #[must_use]
    pub fn inner_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        for child in self.children(id) {
            self.write_html(*child, &mut out);
        }
        out
    }

    fn write_html(&self, id: NodeId, out: &mut String) {
        let Ok(node) = self.node(id) else {
            return;
        };
        match &node.kind {
            NodeKind::Text(text) => out.push_str(&escape_html(text)),
            NodeKind::Element(tag) => {
                out.push('<');
                out.push_str(tag);
                if !node.classes.is_empty() {
                    let _ = write!(out, " class=\"{}\"", escape_html(&node.classes.join(" ")));
                }
                for (name, value) in &node.attributes {
                    let _ = write!(out, " {name}=\"{}\"", escape_html(value));
                }
                if !node.style.is_empty() {
                    let _ = write!(out, " style=\"{}\"", node.style.to_css());
                }
                out.push('>');
                for child in &node.children {
                    self.write_html(*child, out);
                }
                let _ = write!(out, "</{tag}>");
            }
        }
    }
}

/// Escape text for HTML element content and attribute values.
#[must_use]
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

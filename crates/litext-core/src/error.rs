#![forbid(unsafe_code)]

//! Element tree errors.

use std::fmt;

use crate::dom::NodeId;

/// Errors raised by [`Document`](crate::dom::Document) operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomError {
    /// The node id does not refer to a live node.
    UnknownNode(NodeId),
    /// The operation requires an element but the node is a text node.
    NotAnElement(NodeId),
    /// Inserting `child` under `parent` would create a cycle.
    HierarchyRequest { parent: NodeId, child: NodeId },
}

impl fmt::Display for DomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownNode(id) => write!(f, "node {} does not exist", id.get()),
            Self::NotAnElement(id) => write!(f, "node {} is not an element", id.get()),
            Self::HierarchyRequest { parent, child } => write!(
                f,
                "cannot insert node {} under its own descendant {}",
                child.get(),
                parent.get()
            ),
        }
    }
}

impl std::error::Error for DomError {}

#![forbid(unsafe_code)]

//! Widget-layer errors.

use std::fmt;

use litext_core::error::DomError;
use litext_layout::DragError;

/// Errors raised while building or rendering components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LitextError {
    /// An element tree operation failed (e.g. a dead mount target).
    Dom(DomError),
    /// `render` was called on a component that has no template.
    MissingTemplate { component: String },
    /// A component with this id is already registered.
    DuplicateComponent(String),
    /// No factory is registered for this xtype.
    UnknownXtype(String),
    /// A factory rejected its configuration.
    InvalidConfig { xtype: String, reason: String },
    /// A splitter could not be attached.
    Drag(DragError),
}

impl fmt::Display for LitextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dom(err) => write!(f, "element tree: {err}"),
            Self::MissingTemplate { component } => {
                write!(f, "component {component} has no template to render")
            }
            Self::DuplicateComponent(id) => write!(f, "component {id} is already registered"),
            Self::UnknownXtype(xtype) => write!(f, "component xtype \"{xtype}\" not registered"),
            Self::InvalidConfig { xtype, reason } => {
                write!(f, "invalid {xtype} config: {reason}")
            }
            Self::Drag(err) => write!(f, "splitter: {err}"),
        }
    }
}

impl std::error::Error for LitextError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Dom(err) => Some(err),
            Self::Drag(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DomError> for LitextError {
    fn from(err: DomError) -> Self {
        Self::Dom(err)
    }
}

impl From<DragError> for LitextError {
    fn from(err: DragError) -> Self {
        Self::Drag(err)
    }
}

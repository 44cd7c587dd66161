#![forbid(unsafe_code)]

//! Core: element tree, geometry, pointer events and templating.

pub mod dom;
pub mod dom_helper;
pub mod error;
pub mod event;
pub mod fragment;
pub mod geometry;
pub mod logging;
pub mod template;

pub use dom::{BoxStyle, Document, NodeId, Position};
pub use error::DomError;
pub use event::{EventOutcome, Modifiers, PointerButton, PointerEvent, PointerEventKind};
pub use fragment::{Fragment, VNode};
pub use geometry::{Offsets, Rect, Size};
pub use template::Template;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};

#![forbid(unsafe_code)]

//! Viewport-width class switching.

use litext_core::dom::{Document, NodeId};
use litext_core::error::DomError;

/// Widest viewport still treated as mobile.
pub const MOBILE_MAX_WIDTH: i32 = 600;

/// Class toggled on the target when the viewport is mobile-sized.
pub const MOBILE_CLASS: &str = "is-mobile";

/// Whether a viewport of `width` pixels counts as mobile.
#[must_use]
pub const fn is_mobile(width: i32) -> bool {
    width <= MOBILE_MAX_WIDTH
}

/// Toggle [`MOBILE_CLASS`] on `target` for the given viewport width.
///
/// Call once at startup and again from the host's resize handler.
/// Returns whether the class is now present.
pub fn apply_responsive_class(
    doc: &mut Document,
    target: NodeId,
    viewport_width: i32,
) -> Result<bool, DomError> {
    doc.toggle_class(target, MOBILE_CLASS, Some(is_mobile(viewport_width)))
}

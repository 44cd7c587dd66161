#![forbid(unsafe_code)]

//! litext public facade crate.
//!
//! Re-exports the element tree, layout engine and widgets behind one
//! import, plus a prelude for day-to-day usage.

// --- Core re-exports -------------------------------------------------------

pub use litext_core::dom::{BoxStyle, Document, NodeId, Position};
pub use litext_core::event::{
    EventOutcome, Modifiers, PointerButton, PointerEvent, PointerEventKind,
};
pub use litext_core::fragment::{Fragment, VNode};
pub use litext_core::geometry::{Offsets, Rect, Size};
pub use litext_core::template::Template;
pub use litext_core::{DomError, dom_helper};

#[cfg(feature = "tracing-json")]
pub use litext_core::logging::init_json_logging;

// --- Layout re-exports -----------------------------------------------------

pub use litext_layout::{
    Alignment, Axis, BorderLayout, LayoutMode, Region, RegionBounds, SizeBounds, SplitterDrag,
    apply_responsive_class, is_mobile,
};

// --- Widget re-exports -----------------------------------------------------

pub use litext_widgets::{
    Button, ButtonConfig, Component, ComponentConfig, ComponentRegistry, Container,
    ContainerConfig, Item, LitextError, Panel, PanelConfig, RegionItem, RenderReport, ToggleGroup,
    Widget,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type.
pub type Error = LitextError;

/// Standard result type for litext APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Alignment, Button, ButtonConfig, ComponentRegistry, Container, ContainerConfig, Document,
        Error, EventOutcome, Item, LayoutMode, NodeId, Panel, PanelConfig, PointerEvent, Region,
        RegionBounds, RegionItem, Result, Template, Widget,
    };

    pub use crate::{core, layout, widgets};
}

pub use litext_core as core;
pub use litext_layout as layout;
pub use litext_widgets as widgets;

#[cfg(test)]
mod tests {
    use super::prelude::*;

    fn build() -> Result<(Document, Container)> {
        let mut doc = Document::new();
        let body = doc.body();
        let center = doc.create_element("div");
        let container = Container::new(
            &mut doc,
            ContainerConfig::new(body)
                .with_layout(LayoutMode::Border)
                .with_item(RegionItem::new(Region::Center, center)),
        )?;
        Ok((doc, container))
    }

    #[test]
    fn prelude_builds_a_border_container() {
        let (doc, container) = build().unwrap();
        assert!(doc.has_class(container.core().root(), "layout-border"));
        assert!(container.last_report().is_clean());
    }
}

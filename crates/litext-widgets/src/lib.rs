#![forbid(unsafe_code)]

//! Widgets: components, containers, buttons and the component registry.
//!
//! Every widget owns a [`ComponentCore`] (id, root element, mount point)
//! and receives host pointer events through [`Widget::handle_event`].
//! Widgets never hold the [`Document`]; every operation that touches the
//! element tree takes it as an argument.

pub mod button;
pub mod collapse;
pub mod component;
pub mod container;
pub mod error;
pub mod panel;
pub mod registry;
pub mod toggle_group;

use std::any::Any;

use litext_core::dom::Document;
use litext_core::event::{EventOutcome, PointerEvent};

pub use button::{Button, ButtonClick, ButtonConfig, ButtonState, ClickHandler, ToggleHandler};
pub use collapse::{COLLAPSE_TOGGLE_CLASS, COLLAPSED_CLASS, CollapseToggle};
pub use component::{Component, ComponentConfig, ComponentCore};
pub use container::{
    CONTAINER_CLASS, Container, ContainerConfig, Item, RegionItem, RenderReport, SPLITTER_CLASS,
    SkipReason, SkippedItem,
};
pub use error::LitextError;
pub use panel::{Panel, PanelConfig};
pub use registry::{BuildContext, ComponentFactory, ComponentRegistry};
pub use toggle_group::ToggleGroup;

/// Behaviour shared by every widget.
pub trait Widget: Any {
    fn core(&self) -> &ComponentCore;

    /// Registry type name (`button`, `container`, ...).
    fn xtype(&self) -> &'static str;

    /// React to a host pointer event.
    fn handle_event(
        &mut self,
        doc: &mut Document,
        event: &PointerEvent,
    ) -> Result<EventOutcome, LitextError> {
        let _ = (doc, event);
        Ok(EventOutcome::Ignored)
    }

    /// Release decorations and detach the root.
    fn destroy(&mut self, doc: &mut Document) -> Result<(), LitextError>;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

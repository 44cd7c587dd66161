#![forbid(unsafe_code)]

//! Panels: containers with an optional title header.

use std::any::Any;

use litext_core::dom::{Document, NodeId};
use litext_core::event::{EventOutcome, PointerEvent};
use litext_layout::LayoutMode;

use crate::Widget;
use crate::component::ComponentCore;
use crate::container::{Container, ContainerConfig, Item, RenderReport};
use crate::error::LitextError;

/// Class of the panel root.
pub const PANEL_CLASS: &str = "ext-panel";
/// Class of the header element.
pub const PANEL_HEADER_CLASS: &str = "ext-panel-header";

/// Construction options for [`Panel`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelConfig {
    pub container: ContainerConfig,
    pub title: Option<String>,
}

impl PanelConfig {
    #[must_use]
    pub fn new(render_to: NodeId) -> Self {
        Self {
            container: ContainerConfig::new(render_to),
            title: None,
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Adjust the underlying container options.
    #[must_use]
    pub fn with_container(mut self, f: impl FnOnce(ContainerConfig) -> ContainerConfig) -> Self {
        self.container = f(self.container);
        self
    }
}

/// A container whose first child is a title header.
#[derive(Debug)]
pub struct Panel {
    container: Container,
    header: Option<NodeId>,
}

impl Panel {
    pub fn new(doc: &mut Document, config: PanelConfig) -> Result<Self, LitextError> {
        let container = Container::new(doc, config.container)?;
        doc.add_class(container.core().root(), PANEL_CLASS)?;
        let mut panel = Self {
            container,
            header: None,
        };
        if let Some(title) = config.title {
            panel.set_title(doc, Some(&title))?;
        }
        Ok(panel)
    }

    #[must_use]
    pub const fn container(&self) -> &Container {
        &self.container
    }

    #[must_use]
    pub const fn header(&self) -> Option<NodeId> {
        self.header
    }

    /// Current title text.
    #[must_use]
    pub fn title(&self, doc: &Document) -> Option<String> {
        self.header.map(|header| doc.text_content(header))
    }

    /// Set or clear the title header.
    pub fn set_title(&mut self, doc: &mut Document, title: Option<&str>) -> Result<(), LitextError> {
        match (title, self.header) {
            (Some(title), Some(header)) => doc.set_text_content(header, title)?,
            (Some(title), None) => {
                let header = doc.create_element("div");
                doc.add_class(header, PANEL_HEADER_CLASS)?;
                doc.set_text_content(header, title)?;
                doc.prepend_child(self.container.core().root(), header)?;
                self.header = Some(header);
            }
            (None, Some(header)) => {
                doc.remove(header)?;
                self.header = None;
            }
            (None, None) => {}
        }
        Ok(())
    }

    /// Re-render the container, keeping the header first.
    pub fn render(&mut self, doc: &mut Document) -> Result<RenderReport, LitextError> {
        let report = self.container.render(doc)?;
        self.restore_header(doc)?;
        Ok(report)
    }

    pub fn add(&mut self, doc: &mut Document, item: impl Into<Item>) -> Result<RenderReport, LitextError> {
        let report = self.container.add(doc, item)?;
        self.restore_header(doc)?;
        Ok(report)
    }

    pub fn set_layout(
        &mut self,
        doc: &mut Document,
        layout: LayoutMode,
    ) -> Result<RenderReport, LitextError> {
        let report = self.container.set_layout(doc, layout)?;
        self.restore_header(doc)?;
        Ok(report)
    }

    fn restore_header(&self, doc: &mut Document) -> Result<(), LitextError> {
        if let Some(header) = self.header {
            doc.prepend_child(self.container.core().root(), header)?;
        }
        Ok(())
    }
}

impl Widget for Panel {
    fn core(&self) -> &ComponentCore {
        self.container.core()
    }

    fn xtype(&self) -> &'static str {
        "panel"
    }

    fn handle_event(
        &mut self,
        doc: &mut Document,
        event: &PointerEvent,
    ) -> Result<EventOutcome, LitextError> {
        self.container.handle_event(doc, event)
    }

    fn destroy(&mut self, doc: &mut Document) -> Result<(), LitextError> {
        self.container.destroy(doc)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

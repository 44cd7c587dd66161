#![forbid(unsafe_code)]

//! Base component: a root element, an id and a mount point.

use std::any::Any;

use litext_core::debug;
use litext_core::dom::{Document, NodeId};
use litext_core::error::DomError;
use litext_core::template::Template;

use crate::Widget;
use crate::error::LitextError;

/// Tag of every component root.
pub const ROOT_TAG: &str = "div";

/// Identity and root element shared by every widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentCore {
    id: String,
    root: NodeId,
    mount_point: NodeId,
}

impl ComponentCore {
    /// Allocate an id and a detached root `div` for a component that will
    /// mount under `render_to`.
    ///
    /// Fails when `render_to` is not a live element.
    pub fn new(doc: &mut Document, render_to: NodeId) -> Result<Self, DomError> {
        if !doc.is_alive(render_to) {
            return Err(DomError::UnknownNode(render_to));
        }
        if !doc.is_element(render_to) {
            return Err(DomError::NotAnElement(render_to));
        }
        let id = doc.allocate_component_id();
        let root = doc.create_element(ROOT_TAG);
        doc.set_attribute(root, "id", &id)?;
        debug!(component = %id, root = root.get(), "component created");
        Ok(Self {
            id,
            root,
            mount_point: render_to,
        })
    }

    /// Unique component id (`ext-comp-1001`, ...).
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub const fn root(&self) -> NodeId {
        self.root
    }

    #[must_use]
    pub const fn mount_point(&self) -> NodeId {
        self.mount_point
    }

    /// Whether the root currently sits under the mount point.
    #[must_use]
    pub fn is_mounted(&self, doc: &Document) -> bool {
        doc.parent(self.root) == Some(self.mount_point)
    }

    /// Append the root to the mount point unless it is already inside it.
    pub fn mount(&self, doc: &mut Document) -> Result<(), DomError> {
        if !doc.contains(self.mount_point, self.root) {
            doc.append_child(self.mount_point, self.root)?;
        }
        Ok(())
    }

    /// Detach the root from its parent. The subtree stays alive.
    pub fn destroy(&self, doc: &mut Document) -> Result<(), DomError> {
        if doc.is_alive(self.root) {
            doc.detach(self.root)?;
        }
        Ok(())
    }
}

/// Construction options for [`Component`].
pub struct ComponentConfig<T> {
    pub render_to: NodeId,
    pub template: Option<Template<T>>,
    pub initial_data: Option<T>,
}

impl<T> ComponentConfig<T> {
    /// A component mounted under `render_to`, with no template yet.
    #[must_use]
    pub fn new(render_to: NodeId) -> Self {
        Self {
            render_to,
            template: None,
            initial_data: None,
        }
    }

    #[must_use]
    pub fn with_template(mut self, template: Template<T>) -> Self {
        self.template = Some(template);
        self
    }

    /// Data rendered right after construction.
    #[must_use]
    pub fn with_initial_data(mut self, data: T) -> Self {
        self.initial_data = Some(data);
        self
    }
}

/// A templated component over data of type `T`.
#[derive(Debug)]
pub struct Component<T> {
    core: ComponentCore,
    template: Option<Template<T>>,
}

impl<T: 'static> Component<T> {
    /// Create the component; renders immediately when initial data is set.
    pub fn new(doc: &mut Document, config: ComponentConfig<T>) -> Result<Self, LitextError> {
        let core = ComponentCore::new(doc, config.render_to)?;
        let mut component = Self {
            core,
            template: config.template,
        };
        if let Some(data) = config.initial_data {
            component.render(doc, &data)?;
        }
        Ok(component)
    }

    /// Replace the root's content with the template output and mount the
    /// root if needed.
    pub fn render(&mut self, doc: &mut Document, data: &T) -> Result<(), LitextError> {
        let Some(template) = &self.template else {
            return Err(LitextError::MissingTemplate {
                component: self.core.id().to_string(),
            });
        };
        template.overwrite(doc, self.core.root(), data)?;
        self.core.mount(doc)?;
        Ok(())
    }

    pub fn set_template(&mut self, template: Template<T>) {
        self.template = Some(template);
    }

    #[must_use]
    pub fn has_template(&self) -> bool {
        self.template.is_some()
    }
}

impl<T: 'static> Widget for Component<T> {
    fn core(&self) -> &ComponentCore {
        &self.core
    }

    fn xtype(&self) -> &'static str {
        "component"
    }

    fn destroy(&mut self, doc: &mut Document) -> Result<(), LitextError> {
        self.core.destroy(doc)?;
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

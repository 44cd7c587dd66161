#![forbid(unsafe_code)]

//! Component registry.
//!
//! A caller-owned index of live widgets by id, plus a table of factories
//! keyed by xtype for building widgets from JSON configs:
//!
//! ```json
//! { "xtype": "container", "renderTo": 1, "layout": "border",
//!   "items": [ { "region": "west", "el": 5, "split": true, "minWidth": 50 },
//!              { "region": "center", "el": 6 } ] }
//! ```
//!
//! Node ids in configs are raw [`NodeId`] values. A plain item is either
//! `{ "el": n }` or `{ "id": "ext-comp-1001" }` for a registered widget.

use std::collections::BTreeMap;
use std::fmt;

use litext_core::dom::{Document, NodeId};
use litext_core::event::{EventOutcome, PointerEvent};
use litext_core::{debug, warn};
use litext_layout::{Alignment, LayoutMode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::Widget;
use crate::button::{Button, ButtonConfig};
use crate::container::{Container, ContainerConfig, Item, RegionItem};
use crate::error::LitextError;
use crate::panel::{Panel, PanelConfig};
use crate::toggle_group::ToggleGroup;

/// Builds a widget from its JSON config.
pub type ComponentFactory =
    Box<dyn Fn(&mut BuildContext<'_>, &Value) -> Result<Box<dyn Widget>, LitextError>>;

/// Callback waiting for a component id to be registered.
pub type AvailableCallback = Box<dyn FnOnce(&mut dyn Widget)>;

/// What a factory may touch while building.
pub struct BuildContext<'a> {
    pub doc: &'a mut Document,
    groups: &'a mut BTreeMap<String, ToggleGroup>,
    widgets: &'a [Box<dyn Widget>],
}

impl BuildContext<'_> {
    /// Toggle group by name, created on first use.
    pub fn toggle_group(&mut self, name: &str) -> ToggleGroup {
        self.groups
            .entry(name.to_string())
            .or_insert_with(|| ToggleGroup::new(name))
            .clone()
    }

    /// Root element of a registered widget.
    #[must_use]
    pub fn component_root(&self, id: &str) -> Option<NodeId> {
        self.widgets
            .iter()
            .find(|w| w.core().id() == id)
            .map(|w| w.core().root())
    }
}

/// Registry of live widgets and widget factories.
#[derive(Default)]
pub struct ComponentRegistry {
    widgets: Vec<Box<dyn Widget>>,
    types: BTreeMap<String, ComponentFactory>,
    pending: Vec<(String, AvailableCallback)>,
    groups: BTreeMap<String, ToggleGroup>,
}

impl fmt::Debug for ComponentRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentRegistry")
            .field("widgets", &self.ids().collect::<Vec<_>>())
            .field("types", &self.types.keys().collect::<Vec<_>>())
            .field("pending", &self.pending.len())
            .finish_non_exhaustive()
    }
}

impl ComponentRegistry {
    /// An empty registry with no factories.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with the `button`, `container` and `panel` factories.
    #[must_use]
    pub fn with_builtin_types() -> Self {
        let mut registry = Self::new();
        registry.register_type("button", build_button);
        registry.register_type("container", build_container);
        registry.register_type("panel", build_panel);
        registry
    }

    /// Add a widget and run callbacks waiting for its id.
    pub fn register(&mut self, widget: Box<dyn Widget>) -> Result<String, LitextError> {
        let id = widget.core().id().to_string();
        if self.get(&id).is_some() {
            return Err(LitextError::DuplicateComponent(id));
        }
        self.widgets.push(widget);
        let (ready, waiting): (Vec<_>, Vec<_>) = std::mem::take(&mut self.pending)
            .into_iter()
            .partition(|(target, _)| *target == id);
        self.pending = waiting;
        if let Some(widget) = self.widgets.last_mut() {
            for (_, callback) in ready {
                callback(widget.as_mut());
            }
        }
        debug!(component = %id, "component registered");
        Ok(id)
    }

    /// Remove a widget without destroying it.
    pub fn unregister(&mut self, id: &str) -> Option<Box<dyn Widget>> {
        let index = self.widgets.iter().position(|w| w.core().id() == id)?;
        Some(self.widgets.remove(index))
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&dyn Widget> {
        self.widgets
            .iter()
            .find(|w| w.core().id() == id)
            .map(|w| w.as_ref())
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut dyn Widget> {
        match self.widgets.iter_mut().find(|w| w.core().id() == id) {
            Some(widget) => Some(widget.as_mut()),
            None => None,
        }
    }

    /// Typed lookup.
    #[must_use]
    pub fn get_as<T: Widget>(&self, id: &str) -> Option<&T> {
        self.get(id)?.as_any().downcast_ref::<T>()
    }

    /// Typed mutable lookup.
    pub fn get_as_mut<T: Widget>(&mut self, id: &str) -> Option<&mut T> {
        self.get_mut(id)?.as_any_mut().downcast_mut::<T>()
    }

    /// Ids of registered widgets, in registration order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.widgets.iter().map(|w| w.core().id())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    /// Run `callback` once the widget `id` is registered: now if it already
    /// is, otherwise on registration.
    pub fn on_available(&mut self, id: &str, callback: impl FnOnce(&mut dyn Widget) + 'static) {
        match self.get_mut(id) {
            Some(widget) => callback(widget),
            None => self.pending.push((id.to_string(), Box::new(callback))),
        }
    }

    /// Register a factory for `xtype`, replacing any previous one.
    pub fn register_type(
        &mut self,
        xtype: &str,
        factory: impl Fn(&mut BuildContext<'_>, &Value) -> Result<Box<dyn Widget>, LitextError>
        + 'static,
    ) {
        self.types.insert(xtype.to_string(), Box::new(factory));
    }

    #[must_use]
    pub fn has_type(&self, xtype: &str) -> bool {
        self.types.contains_key(xtype)
    }

    /// Toggle group by name, created on first use. Shared with factories.
    pub fn toggle_group(&mut self, name: &str) -> ToggleGroup {
        self.groups
            .entry(name.to_string())
            .or_insert_with(|| ToggleGroup::new(name))
            .clone()
    }

    /// Build a widget from `config` and register it.
    ///
    /// The factory is picked by the config's `xtype`, else `default_xtype`.
    pub fn create(
        &mut self,
        doc: &mut Document,
        config: &Value,
        default_xtype: &str,
    ) -> Result<String, LitextError> {
        let xtype = config
            .get("xtype")
            .and_then(Value::as_str)
            .unwrap_or(default_xtype)
            .to_string();
        let Some(factory) = self.types.get(&xtype) else {
            return Err(LitextError::UnknownXtype(xtype));
        };
        let mut ctx = BuildContext {
            doc,
            groups: &mut self.groups,
            widgets: &self.widgets,
        };
        let widget = factory(&mut ctx, config)?;
        debug!(xtype = %xtype, component = %widget.core().id(), "component created from config");
        self.register(widget)
    }

    /// Offer an event to every widget. Consumed if any widget consumed it.
    pub fn dispatch(
        &mut self,
        doc: &mut Document,
        event: &PointerEvent,
    ) -> Result<EventOutcome, LitextError> {
        let mut outcome = EventOutcome::Ignored;
        for widget in &mut self.widgets {
            outcome = widget.handle_event(doc, event)?.or(outcome);
        }
        Ok(outcome)
    }

    /// Unregister and destroy a widget. Returns whether it existed.
    pub fn destroy(&mut self, doc: &mut Document, id: &str) -> Result<bool, LitextError> {
        let Some(mut widget) = self.unregister(id) else {
            return Ok(false);
        };
        widget.destroy(doc)?;
        debug!(component = %id, "component destroyed");
        Ok(true)
    }
}

const fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ButtonSpec {
    render_to: NodeId,
    #[serde(default)]
    text: String,
    #[serde(default)]
    enable_toggle: bool,
    toggle_group: Option<String>,
    #[serde(default)]
    pressed: bool,
    #[serde(default = "default_true")]
    allow_depress: bool,
    #[serde(default)]
    disabled: bool,
    #[serde(default)]
    hidden: bool,
    min_width: Option<i32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContainerSpec {
    render_to: NodeId,
    #[serde(default)]
    layout: LayoutMode,
    align: Option<Alignment>,
    justify: Option<Alignment>,
    #[serde(default)]
    items: Vec<Value>,
    #[serde(default = "default_true")]
    auto_render: bool,
    title: Option<String>,
}

/// A plain item. Objects carrying a `region` key never parse as one.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PlainItemSpec {
    Element { el: NodeId },
    Component { id: String },
}

#[derive(Debug)]
enum ItemSpec {
    Region(RegionItem),
    Plain(PlainItemSpec),
}

fn parse_item(raw: &Value) -> Result<ItemSpec, serde_json::Error> {
    if raw.get("region").is_some() {
        RegionItem::deserialize(raw).map(ItemSpec::Region)
    } else {
        PlainItemSpec::deserialize(raw).map(ItemSpec::Plain)
    }
}

fn parse<T: DeserializeOwned>(xtype: &str, config: &Value) -> Result<T, LitextError> {
    T::deserialize(config).map_err(|err| LitextError::InvalidConfig {
        xtype: xtype.to_string(),
        reason: err.to_string(),
    })
}

fn build_button(ctx: &mut BuildContext<'_>, config: &Value) -> Result<Box<dyn Widget>, LitextError> {
    let spec: ButtonSpec = parse("button", config)?;
    let mut button = ButtonConfig::new(spec.render_to, spec.text)
        .with_toggle(spec.enable_toggle)
        .with_pressed(spec.pressed)
        .with_allow_depress(spec.allow_depress)
        .with_disabled(spec.disabled)
        .with_hidden(spec.hidden);
    if let Some(min_width) = spec.min_width {
        button = button.with_min_width(min_width);
    }
    if let Some(group) = spec.toggle_group.as_deref() {
        button = button.with_toggle_group(ctx.toggle_group(group));
    }
    Ok(Box::new(Button::new(ctx.doc, button)?))
}

#[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
fn container_config(ctx: &BuildContext<'_>, spec: ContainerSpec) -> ContainerConfig {
    let mut config = ContainerConfig::new(spec.render_to)
        .with_layout(spec.layout)
        .with_auto_render(spec.auto_render);
    config.align = spec.align;
    config.justify = spec.justify;
    for (index, raw) in spec.items.iter().enumerate() {
        match parse_item(raw) {
            Ok(ItemSpec::Region(region)) => config.items.push(Item::Region(region)),
            Ok(ItemSpec::Plain(PlainItemSpec::Element { el })) => {
                config.items.push(Item::Element(el));
            }
            Ok(ItemSpec::Plain(PlainItemSpec::Component { id })) => {
                match ctx.component_root(&id) {
                    Some(root) => config.items.push(Item::Component { id, root }),
                    None => {
                        warn!(index, component = %id, "item references unknown component");
                    }
                }
            }
            Err(err) => {
                warn!(index, error = %err, "malformed container item skipped");
            }
        }
    }
    config
}

fn build_container(
    ctx: &mut BuildContext<'_>,
    config: &Value,
) -> Result<Box<dyn Widget>, LitextError> {
    let spec: ContainerSpec = parse("container", config)?;
    let config = container_config(ctx, spec);
    Ok(Box::new(Container::new(ctx.doc, config)?))
}

fn build_panel(ctx: &mut BuildContext<'_>, config: &Value) -> Result<Box<dyn Widget>, LitextError> {
    let mut spec: ContainerSpec = parse("panel", config)?;
    let title = spec.title.take();
    let container = container_config(ctx, spec);
    let config = PanelConfig {
        container,
        title,
    };
    Ok(Box::new(Panel::new(ctx.doc, config)?))
}

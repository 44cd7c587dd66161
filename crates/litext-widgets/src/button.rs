#![forbid(unsafe_code)]

//! Push and toggle buttons.

use std::any::Any;
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use bitflags::bitflags;
use litext_core::debug;
use litext_core::dom::{Document, NodeId};
use litext_core::event::{EventOutcome, PointerEvent, PointerEventKind};
use litext_core::fragment::{Fragment, VNode};
use litext_core::template::Template;

use crate::Widget;
use crate::component::ComponentCore;
use crate::error::LitextError;
use crate::toggle_group::ToggleGroup;

/// Class of the inner `<button>` element.
pub const BUTTON_CLASS: &str = "ext-btn";
/// Root class while pressed.
pub const PRESSED_CLASS: &str = "x-btn-pressed";
/// Root class while disabled.
pub const DISABLED_CLASS: &str = "x-btn-disabled";
/// Root class while the primary button is held down.
pub const CLICK_CLASS: &str = "x-btn-click";
/// Root class while hidden.
pub const HIDDEN_CLASS: &str = "x-hidden";

bitflags! {
    /// Button state flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ButtonState: u8 {
        const PRESSED        = 0b0000_0001;
        const DISABLED       = 0b0000_0010;
        const HIDDEN         = 0b0000_0100;
        const TOGGLE_ENABLED = 0b0000_1000;
        /// A pressed toggle button may be released by clicking it again.
        const ALLOW_DEPRESS  = 0b0001_0000;
        /// Primary button went down inside the button.
        const CLICK_ARMED    = 0b0010_0000;
    }
}

/// Payload passed to a click handler.
#[derive(Debug, Clone, Copy)]
pub struct ButtonClick<'a> {
    pub button_id: &'a str,
    /// Pressed state after any toggle caused by this click.
    pub pressed: bool,
    pub event: &'a PointerEvent,
}

/// Click callback.
pub type ClickHandler = Box<dyn FnMut(&ButtonClick<'_>)>;

/// Toggle callback, called with the button id and the new pressed state.
pub type ToggleHandler = Box<dyn FnMut(&str, bool)>;

/// Construction options for [`Button`].
pub struct ButtonConfig {
    pub render_to: NodeId,
    pub text: String,
    pub enable_toggle: bool,
    /// Joining a group implies `enable_toggle`.
    pub toggle_group: Option<ToggleGroup>,
    pub pressed: bool,
    pub allow_depress: bool,
    pub disabled: bool,
    pub hidden: bool,
    pub min_width: Option<i32>,
    pub handler: Option<ClickHandler>,
    pub toggle_handler: Option<ToggleHandler>,
}

impl fmt::Debug for ButtonConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ButtonConfig")
            .field("render_to", &self.render_to)
            .field("text", &self.text)
            .field("enable_toggle", &self.enable_toggle)
            .field("toggle_group", &self.toggle_group)
            .field("pressed", &self.pressed)
            .field("allow_depress", &self.allow_depress)
            .field("disabled", &self.disabled)
            .field("hidden", &self.hidden)
            .field("min_width", &self.min_width)
            .field("handler", &self.handler.is_some())
            .finish_non_exhaustive()
    }
}

impl ButtonConfig {
    #[must_use]
    pub fn new(render_to: NodeId, text: impl Into<String>) -> Self {
        Self {
            render_to,
            text: text.into(),
            enable_toggle: false,
            toggle_group: None,
            pressed: false,
            allow_depress: true,
            disabled: false,
            hidden: false,
            min_width: None,
            handler: None,
            toggle_handler: None,
        }
    }

    #[must_use]
    pub fn with_toggle(mut self, enable: bool) -> Self {
        self.enable_toggle = enable;
        self
    }

    #[must_use]
    pub fn with_toggle_group(mut self, group: ToggleGroup) -> Self {
        self.toggle_group = Some(group);
        self
    }

    #[must_use]
    pub fn with_pressed(mut self, pressed: bool) -> Self {
        self.pressed = pressed;
        self
    }

    #[must_use]
    pub fn with_allow_depress(mut self, allow: bool) -> Self {
        self.allow_depress = allow;
        self
    }

    #[must_use]
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    #[must_use]
    pub fn with_hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    #[must_use]
    pub fn with_min_width(mut self, min_width: i32) -> Self {
        self.min_width = Some(min_width);
        self
    }

    #[must_use]
    pub fn with_handler(mut self, handler: impl FnMut(&ButtonClick<'_>) + 'static) -> Self {
        self.handler = Some(Box::new(handler));
        self
    }

    #[must_use]
    pub fn with_toggle_handler(mut self, handler: impl FnMut(&str, bool) + 'static) -> Self {
        self.toggle_handler = Some(Box::new(handler));
        self
    }
}

fn button_template() -> Template<String> {
    Template::new(|text: &String| {
        let label = if text.is_empty() { "\u{a0}" } else { text.as_str() };
        Fragment::from(
            VNode::element("button")
                .class(BUTTON_CLASS)
                .attr("type", "button")
                .with_text(label),
        )
    })
}

/// A clickable button, optionally toggling.
pub struct Button {
    core: ComponentCore,
    template: Template<String>,
    text: String,
    state: Rc<Cell<ButtonState>>,
    group: Option<ToggleGroup>,
    min_width: Option<i32>,
    handler: Option<ClickHandler>,
    toggle_handler: Option<ToggleHandler>,
}

impl fmt::Debug for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Button")
            .field("id", &self.core.id())
            .field("text", &self.text)
            .field("state", &self.state.get())
            .field("group", &self.group)
            .finish_non_exhaustive()
    }
}

impl Button {
    /// Create, render and mount a button.
    pub fn new(doc: &mut Document, config: ButtonConfig) -> Result<Self, LitextError> {
        let core = ComponentCore::new(doc, config.render_to)?;

        let mut state = ButtonState::empty();
        state.set(
            ButtonState::TOGGLE_ENABLED,
            config.enable_toggle || config.toggle_group.is_some(),
        );
        state.set(ButtonState::ALLOW_DEPRESS, config.allow_depress);
        state.set(
            ButtonState::PRESSED,
            config.pressed && state.contains(ButtonState::TOGGLE_ENABLED),
        );
        state.set(ButtonState::DISABLED, config.disabled);
        state.set(ButtonState::HIDDEN, config.hidden);

        let mut button = Self {
            core,
            template: button_template(),
            text: config.text,
            state: Rc::new(Cell::new(state)),
            group: config.toggle_group,
            min_width: config.min_width,
            handler: config.handler,
            toggle_handler: config.toggle_handler,
        };
        if let Some(group) = &button.group {
            group.register(button.core.id(), button.core.root(), Rc::clone(&button.state));
        }
        button.render(doc)?;
        if button.pressed() {
            if let Some(group) = &button.group {
                group.notify(doc, button.core.id())?;
            }
        }
        Ok(button)
    }

    fn render(&mut self, doc: &mut Document) -> Result<(), LitextError> {
        let root = self.core.root();
        self.template.overwrite(doc, root, &self.text)?;
        let state = self.state.get();
        doc.toggle_class(root, PRESSED_CLASS, Some(state.contains(ButtonState::PRESSED)))?;
        doc.toggle_class(root, HIDDEN_CLASS, Some(state.contains(ButtonState::HIDDEN)))?;
        self.sync_disabled(doc)?;
        self.core.mount(doc)?;
        self.auto_width(doc)?;
        Ok(())
    }

    /// The inner `<button>` element.
    #[must_use]
    pub fn button_element(&self, doc: &Document) -> Option<NodeId> {
        doc.first_by_tag(self.core.root(), "button")
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the label and re-render.
    pub fn set_text(&mut self, doc: &mut Document, text: impl Into<String>) -> Result<(), LitextError> {
        self.text = text.into();
        self.render(doc)
    }

    #[must_use]
    pub fn state(&self) -> ButtonState {
        self.state.get()
    }

    #[must_use]
    pub fn pressed(&self) -> bool {
        self.state.get().contains(ButtonState::PRESSED)
    }

    #[must_use]
    pub fn disabled(&self) -> bool {
        self.state.get().contains(ButtonState::DISABLED)
    }

    #[must_use]
    pub fn hidden(&self) -> bool {
        self.state.get().contains(ButtonState::HIDDEN)
    }

    /// Flip the pressed state, or force it with `Some(state)`.
    ///
    /// Pressing a grouped button releases the other members. Returns the
    /// pressed state afterwards.
    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    pub fn toggle(&mut self, doc: &mut Document, state: Option<bool>) -> Result<bool, LitextError> {
        let current = self.pressed();
        let next = state.unwrap_or(!current);
        if next == current {
            return Ok(current);
        }
        let mut flags = self.state.get();
        flags.set(ButtonState::PRESSED, next);
        self.state.set(flags);
        doc.toggle_class(self.core.root(), PRESSED_CLASS, Some(next))?;
        if next {
            if let Some(group) = &self.group {
                let released = group.notify(doc, self.core.id())?;
                debug!(button = %self.core.id(), group = group.name(), released = ?released, "toggle group");
            }
        }
        if let Some(handler) = self.toggle_handler.as_mut() {
            handler(self.core.id(), next);
        }
        Ok(next)
    }

    pub fn set_disabled(&mut self, doc: &mut Document, disabled: bool) -> Result<(), LitextError> {
        let mut flags = self.state.get();
        flags.set(ButtonState::DISABLED, disabled);
        self.state.set(flags);
        self.sync_disabled(doc)?;
        Ok(())
    }

    pub fn set_hidden(&mut self, doc: &mut Document, hidden: bool) -> Result<(), LitextError> {
        let mut flags = self.state.get();
        flags.set(ButtonState::HIDDEN, hidden);
        self.state.set(flags);
        doc.toggle_class(self.core.root(), HIDDEN_CLASS, Some(hidden))?;
        Ok(())
    }

    pub fn set_handler(&mut self, handler: impl FnMut(&ButtonClick<'_>) + 'static) {
        self.handler = Some(Box::new(handler));
    }

    pub fn set_toggle_handler(&mut self, handler: impl FnMut(&str, bool) + 'static) {
        self.toggle_handler = Some(Box::new(handler));
    }

    /// Give the root `min_width` when its measured width is smaller.
    pub fn auto_width(&mut self, doc: &mut Document) -> Result<(), LitextError> {
        let root = self.core.root();
        doc.style_mut(root)?.width = None;
        if let Some(min) = self.min_width.filter(|m| *m > 0) {
            if doc.offset_width(root) < min {
                doc.style_mut(root)?.width = Some(min);
            }
        }
        Ok(())
    }

    fn sync_disabled(&self, doc: &mut Document) -> Result<(), LitextError> {
        let disabled = self.disabled();
        let root = self.core.root();
        doc.toggle_class(root, DISABLED_CLASS, Some(disabled))?;
        if let Some(inner) = self.button_element(doc) {
            if disabled {
                doc.set_attribute(inner, "disabled", "disabled")?;
            } else {
                doc.remove_attribute(inner, "disabled")?;
            }
        }
        Ok(())
    }

    fn is_inside(&self, doc: &Document, event: &PointerEvent) -> bool {
        event
            .target
            .is_some_and(|target| doc.contains(self.core.root(), target))
    }

    fn on_click(&mut self, doc: &mut Document, event: &PointerEvent) -> Result<EventOutcome, LitextError> {
        if !self.is_inside(doc, event) || !event.is_primary() || self.disabled() {
            return Ok(EventOutcome::Ignored);
        }
        let flags = self.state.get();
        if flags.contains(ButtonState::TOGGLE_ENABLED)
            && (flags.contains(ButtonState::ALLOW_DEPRESS) || !flags.contains(ButtonState::PRESSED))
        {
            self.toggle(doc, None)?;
        }
        let pressed = self.pressed();
        if let Some(handler) = self.handler.as_mut() {
            handler(&ButtonClick {
                button_id: self.core.id(),
                pressed,
                event,
            });
        }
        Ok(EventOutcome::Consumed)
    }
}

impl Widget for Button {
    fn core(&self) -> &ComponentCore {
        &self.core
    }

    fn xtype(&self) -> &'static str {
        "button"
    }

    fn handle_event(
        &mut self,
        doc: &mut Document,
        event: &PointerEvent,
    ) -> Result<EventOutcome, LitextError> {
        match event.kind {
            PointerEventKind::Click => self.on_click(doc, event),
            PointerEventKind::Down => {
                if !self.is_inside(doc, event) || !event.is_primary() || self.disabled() {
                    return Ok(EventOutcome::Ignored);
                }
                self.state.set(self.state.get() | ButtonState::CLICK_ARMED);
                doc.add_class(self.core.root(), CLICK_CLASS)?;
                Ok(EventOutcome::Consumed)
            }
            PointerEventKind::Up => {
                let flags = self.state.get();
                if !flags.contains(ButtonState::CLICK_ARMED) || !event.is_primary() {
                    return Ok(EventOutcome::Ignored);
                }
                self.state.set(flags - ButtonState::CLICK_ARMED);
                doc.remove_class(self.core.root(), CLICK_CLASS)?;
                Ok(EventOutcome::Consumed)
            }
            PointerEventKind::Move => Ok(EventOutcome::Ignored),
        }
    }

    fn destroy(&mut self, doc: &mut Document) -> Result<(), LitextError> {
        if let Some(group) = &self.group {
            group.unregister(self.core.id());
        }
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

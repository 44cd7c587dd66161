#![forbid(unsafe_code)]

//! Pointer events pushed in by the host.
//!
//! The host translates native `mousedown`/`mousemove`/`mouseup`/`click`
//! events into [`PointerEvent`]s. `target` is the node the native event was
//! dispatched to; window-level events (moves and releases outside any
//! element) carry `None`.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::dom::NodeId;

bitflags! {
    /// Modifier keys held during a pointer event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// No modifiers.
        const NONE  = 0b0000;
        /// Shift key.
        const SHIFT = 0b0001;
        /// Alt/Option key.
        const ALT   = 0b0010;
        /// Control key.
        const CTRL  = 0b0100;
        /// Meta/Command key.
        const META  = 0b1000;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}

/// Pointer buttons, numbered like `MouseEvent.button`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PointerButton {
    #[default]
    Left,
    Middle,
    Right,
}

impl PointerButton {
    /// Map a DOM `button` index. Unknown indices are treated as secondary.
    #[must_use]
    pub const fn from_index(index: u8) -> Self {
        match index {
            0 => Self::Left,
            1 => Self::Middle,
            _ => Self::Right,
        }
    }
}

/// The type of pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PointerEventKind {
    /// Button pressed down.
    Down,
    /// Pointer moved.
    Move,
    /// Button released.
    Up,
    /// Press and release on the same element.
    Click,
}

/// A pointer event in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    /// Node the event was dispatched to. `None` for window-level events.
    pub target: Option<NodeId>,
    /// `clientX`.
    pub x: i32,
    /// `clientY`.
    pub y: i32,
    pub button: PointerButton,
    /// Distinguishes concurrent pointers (touch, pen). Mice use 0.
    pub pointer_id: u32,
    pub modifiers: Modifiers,
}

impl PointerEvent {
    /// Create a primary-pointer, left-button event.
    #[must_use]
    pub const fn new(kind: PointerEventKind, target: Option<NodeId>, x: i32, y: i32) -> Self {
        Self {
            kind,
            target,
            x,
            y,
            button: PointerButton::Left,
            pointer_id: 0,
            modifiers: Modifiers::NONE,
        }
    }

    /// Pointer pressed on `target`.
    #[must_use]
    pub const fn down(target: NodeId, x: i32, y: i32) -> Self {
        Self::new(PointerEventKind::Down, Some(target), x, y)
    }

    /// Window-level move.
    #[must_use]
    pub const fn moved(x: i32, y: i32) -> Self {
        Self::new(PointerEventKind::Move, None, x, y)
    }

    /// Window-level release.
    #[must_use]
    pub const fn up(x: i32, y: i32) -> Self {
        Self::new(PointerEventKind::Up, None, x, y)
    }

    /// Click on `target`.
    #[must_use]
    pub const fn click(target: NodeId) -> Self {
        Self::new(PointerEventKind::Click, Some(target), 0, 0)
    }

    /// Set the button.
    #[must_use]
    pub const fn with_button(mut self, button: PointerButton) -> Self {
        self.button = button;
        self
    }

    /// Set the pointer id.
    #[must_use]
    pub const fn with_pointer_id(mut self, pointer_id: u32) -> Self {
        self.pointer_id = pointer_id;
        self
    }

    /// Set the modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Get the position as a tuple.
    #[must_use]
    pub const fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    /// Whether the primary button triggered the event.
    #[must_use]
    pub fn is_primary(&self) -> bool {
        self.button == PointerButton::Left
    }
}

/// Whether a component acted on an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventOutcome {
    /// The event did not concern the component.
    #[default]
    Ignored,
    /// The component handled the event (`preventDefault` semantics).
    Consumed,
}

impl EventOutcome {
    /// Whether the event was consumed.
    #[must_use]
    pub const fn is_consumed(self) -> bool {
        matches!(self, Self::Consumed)
    }

    /// Combine two outcomes; consumed wins.
    #[must_use]
    pub const fn or(self, other: Self) -> Self {
        if self.is_consumed() { self } else { other }
    }
}

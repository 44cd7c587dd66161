#![forbid(unsafe_code)]

//! Splitter drag lifecycle.
//!
//! ```text
//! Idle --pointer down--> Dragging --pointer up--> Idle
//!                          |   ^
//!                          +---+ pointer move (resize + reflow)
//! ```
//!
//! A session captures the pointer origin and the region's size at the time
//! of the press. Every move recomputes the size from that origin, so the
//! result depends only on the latest pointer position. There is no cancel
//! path: the last size applied during the drag stays.

use std::fmt;

use litext_core::event::PointerEvent;
use litext_core::geometry::Size;
use serde::{Deserialize, Serialize};

use crate::region::{Axis, Region, RegionBounds};

/// State captured on pointer-down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragSession {
    pub pointer_id: u32,
    pub start_x: i32,
    pub start_y: i32,
    pub start_width: i32,
    pub start_height: i32,
    /// Last size written during this session.
    pub last_size: Option<i32>,
}

/// Splitter lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragSession),
}

/// Why an event left the machine untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragNoopReason {
    IdleWithoutActiveDrag,
    ActiveDragAlreadyInProgress,
    PointerMismatch,
}

/// Effect of feeding one event to a [`SplitterDrag`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum DragEffect {
    Started {
        region: Region,
        origin: (i32, i32),
        start_size: i32,
    },
    Resized {
        region: Region,
        axis: Axis,
        size: i32,
    },
    Ended {
        region: Region,
        final_size: Option<i32>,
    },
    Noop {
        reason: DragNoopReason,
    },
}

impl DragEffect {
    /// New size to write, if the effect is a resize.
    #[must_use]
    pub const fn resized_to(&self) -> Option<i32> {
        match self {
            Self::Resized { size, .. } => Some(*size),
            _ => None,
        }
    }
}

/// Splitter construction errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragError {
    /// The center region always takes the residual space and has no splitter.
    CenterNotResizable,
}

impl fmt::Display for DragError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CenterNotResizable => write!(f, "the center region cannot carry a splitter"),
        }
    }
}

impl std::error::Error for DragError {}

/// Drag controller for the splitter of one side region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitterDrag {
    region: Region,
    axis: Axis,
    bounds: RegionBounds,
    state: DragState,
}

impl SplitterDrag {
    /// Create an idle controller for `region`.
    pub fn new(region: Region, bounds: RegionBounds) -> Result<Self, DragError> {
        let Some(axis) = region.axis() else {
            return Err(DragError::CenterNotResizable);
        };
        Ok(Self {
            region,
            axis,
            bounds,
            state: DragState::Idle,
        })
    }

    /// Region resized by this splitter.
    #[must_use]
    pub const fn region(&self) -> Region {
        self.region
    }

    /// Axis of movement.
    #[must_use]
    pub const fn axis(&self) -> Axis {
        self.axis
    }

    /// Configured bounds.
    #[must_use]
    pub const fn bounds(&self) -> RegionBounds {
        self.bounds
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> DragState {
        self.state
    }

    /// Whether a drag session is active.
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    /// Continue the drag session of `previous` when it resizes the same
    /// region and this controller is idle. Returns whether a session moved.
    pub fn adopt_session(&mut self, previous: &SplitterDrag) -> bool {
        if previous.region != self.region || self.is_dragging() {
            return false;
        }
        let DragState::Dragging(session) = previous.state else {
            return false;
        };
        self.state = DragState::Dragging(session);
        true
    }

    /// Pointer pressed on the splitter. `start` is the region's current
    /// `offsetWidth`/`offsetHeight`.
    pub fn begin(&mut self, event: &PointerEvent, start: Size) -> DragEffect {
        if self.is_dragging() {
            return DragEffect::Noop {
                reason: DragNoopReason::ActiveDragAlreadyInProgress,
            };
        }
        self.state = DragState::Dragging(DragSession {
            pointer_id: event.pointer_id,
            start_x: event.x,
            start_y: event.y,
            start_width: start.width,
            start_height: start.height,
            last_size: None,
        });
        DragEffect::Started {
            region: self.region,
            origin: event.position(),
            start_size: match self.axis {
                Axis::Horizontal => start.width,
                Axis::Vertical => start.height,
            },
        }
    }

    /// Pointer moved anywhere in the window.
    pub fn update(&mut self, event: &PointerEvent) -> DragEffect {
        let DragState::Dragging(mut session) = self.state else {
            return DragEffect::Noop {
                reason: DragNoopReason::IdleWithoutActiveDrag,
            };
        };
        if session.pointer_id != event.pointer_id {
            return DragEffect::Noop {
                reason: DragNoopReason::PointerMismatch,
            };
        }
        let size = self.size_for(&session, event);
        session.last_size = Some(size);
        self.state = DragState::Dragging(session);
        DragEffect::Resized {
            region: self.region,
            axis: self.axis,
            size,
        }
    }

    /// Pointer released anywhere in the window.
    pub fn end(&mut self, event: &PointerEvent) -> DragEffect {
        let DragState::Dragging(session) = self.state else {
            return DragEffect::Noop {
                reason: DragNoopReason::IdleWithoutActiveDrag,
            };
        };
        if session.pointer_id != event.pointer_id {
            return DragEffect::Noop {
                reason: DragNoopReason::PointerMismatch,
            };
        }
        self.state = DragState::Idle;
        DragEffect::Ended {
            region: self.region,
            final_size: session.last_size,
        }
    }

    fn size_for(&self, session: &DragSession, event: &PointerEvent) -> i32 {
        let (start_size, delta) = match self.axis {
            Axis::Horizontal => (session.start_width, event.x.saturating_sub(session.start_x)),
            Axis::Vertical => (session.start_height, event.y.saturating_sub(session.start_y)),
        };
        resize(self.region, start_size, delta, self.bounds)
    }
}

/// Size of `region` after dragging its splitter by `delta` pixels along the
/// region's axis, clamped to its bounds. Saturates at the `i32` range.
#[must_use]
pub fn resize(region: Region, start_size: i32, delta: i32, bounds: RegionBounds) -> i32 {
    let Some(axis) = region.axis() else {
        return start_size;
    };
    let requested = start_size.saturating_add(delta.saturating_mul(region.growth_sign()));
    bounds.for_axis(axis).clamp(requested)
}

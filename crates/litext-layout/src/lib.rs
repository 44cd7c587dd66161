#![forbid(unsafe_code)]

//! Layout primitives for litext containers.
//!
//! - [`LayoutMode`] - how a container arranges its items
//! - [`Alignment`] - passive `align`/`justify` attribute values
//! - [`border`] - the border-region reflow engine
//! - [`splitter`] - the splitter drag state machine
//! - [`responsive`] - viewport-width class switching
//!
//! Everything here is pure over its inputs; writing results back into the
//! element tree is the container's job.

pub mod border;
pub mod region;
pub mod responsive;
pub mod splitter;

use std::fmt;
use std::str::FromStr;

pub use border::{BorderLayout, DEFAULT_SIDE_WIDTH, RegionInput, RegionPlacement};
pub use litext_core::geometry::{Offsets, Rect, Size};
pub use region::{Axis, Region, RegionBounds, SizeBounds};
pub use responsive::{MOBILE_CLASS, apply_responsive_class, is_mobile};
pub use splitter::{DragEffect, DragError, DragNoopReason, DragSession, DragState, SplitterDrag};

use serde::{Deserialize, Serialize};

/// How a container lays out its items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutMode {
    /// Items side by side, flex row.
    #[serde(alias = "row-box", alias = "row")]
    Hbox,
    /// Items stacked, flex column.
    #[default]
    #[serde(alias = "column-box", alias = "column")]
    Vbox,
    /// Only the first item is mounted.
    Fit,
    /// Five named regions with absolute positioning.
    Border,
}

impl LayoutMode {
    /// Short name used in the layout class.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hbox => "hbox",
            Self::Vbox => "vbox",
            Self::Fit => "fit",
            Self::Border => "border",
        }
    }

    /// CSS class carried by the container root.
    #[must_use]
    pub const fn class_name(self) -> &'static str {
        match self {
            Self::Hbox => "layout-hbox",
            Self::Vbox => "layout-vbox",
            Self::Fit => "layout-fit",
            Self::Border => "layout-border",
        }
    }
}

impl fmt::Display for LayoutMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LayoutMode {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hbox" | "row-box" | "row" => Ok(Self::Hbox),
            "vbox" | "column-box" | "column" => Ok(Self::Vbox),
            "fit" => Ok(Self::Fit),
            "border" => Ok(Self::Border),
            other => Err(ParseEnumError::new("layout", other)),
        }
    }
}

/// Alignment of items within a container.
///
/// Written verbatim as the `align` / `justify` attributes; stylesheets do the
/// actual positioning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Alignment {
    /// Align items to the start (left/top).
    #[default]
    Start,
    /// Center items within available space.
    Center,
    /// Align items to the end (right/bottom).
    End,
    /// Distribute space evenly between items (no outer space).
    SpaceBetween,
    /// Distribute space evenly around each item.
    SpaceAround,
}

impl Alignment {
    /// Attribute value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Center => "center",
            Self::End => "end",
            Self::SpaceBetween => "space-between",
            Self::SpaceAround => "space-around",
        }
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Alignment {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "start" => Ok(Self::Start),
            "center" => Ok(Self::Center),
            "end" => Ok(Self::End),
            "space-between" => Ok(Self::SpaceBetween),
            "space-around" => Ok(Self::SpaceAround),
            other => Err(ParseEnumError::new("alignment", other)),
        }
    }
}

/// An unrecognized configuration keyword.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseEnumError {
    kind: &'static str,
    value: String,
}

impl ParseEnumError {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }

    /// Which keyword family failed to parse.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        self.kind
    }
}

impl fmt::Display for ParseEnumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {} `{}`", self.kind, self.value)
    }
}

impl std::error::Error for ParseEnumError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_aliases_parse() {
        assert_eq!("row-box".parse::<LayoutMode>(), Ok(LayoutMode::Hbox));
        assert_eq!("column".parse::<LayoutMode>(), Ok(LayoutMode::Vbox));
        assert_eq!("border".parse::<LayoutMode>(), Ok(LayoutMode::Border));
        let err = "grid".parse::<LayoutMode>().unwrap_err();
        assert_eq!(err.to_string(), "unknown layout `grid`");
    }

    #[test]
    fn default_layout_is_column() {
        assert_eq!(LayoutMode::default(), LayoutMode::Vbox);
        assert_eq!(LayoutMode::default().class_name(), "layout-vbox");
    }

    #[test]
    fn layout_deserializes_aliases() {
        let mode: LayoutMode = serde_json::from_str("\"row-box\"").unwrap();
        assert_eq!(mode, LayoutMode::Hbox);
        let mode: LayoutMode = serde_json::from_str("\"fit\"").unwrap();
        assert_eq!(mode, LayoutMode::Fit);
    }

    #[test]
    fn alignment_round_trips_keywords() {
        for a in [
            Alignment::Start,
            Alignment::Center,
            Alignment::End,
            Alignment::SpaceBetween,
            Alignment::SpaceAround,
        ] {
            assert_eq!(a.as_str().parse::<Alignment>(), Ok(a));
        }
    }
}

#![forbid(unsafe_code)]

//! Border-region reflow.
//!
//! Translates the set of north/south/west/east/center regions into absolute
//! box offsets. Regions are visited in [`Region::REFLOW_ORDER`]:
//!
//! 1. `north` is pinned to the top edge at its height; `top += height`.
//! 2. `south` is pinned to the bottom edge; `bottom += height`.
//! 3. `west` is pinned to the left edge between `top` and `bottom`;
//!    `left += width`.
//! 4. `east` mirrors west on the right edge.
//! 5. `center` gets the four accumulated offsets and no explicit size.
//!
//! Collapsed regions contribute nothing. [`BorderLayout::compute`] is pure:
//! it carries no state between calls, so every reflow starts from scratch.

use litext_core::dom::{BoxStyle, Position};
use litext_core::geometry::{Offsets, Rect, Size};
use serde::{Deserialize, Serialize};

use crate::region::Region;

/// Width used for a west/east region that has neither an explicit style
/// width nor a positive rendered width.
pub const DEFAULT_SIDE_WIDTH: i32 = 100;

/// Measured state of one region, as read from the element tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionInput {
    pub region: Region,
    pub collapsed: bool,
    /// Explicit inline style width, if any.
    pub style_width: Option<i32>,
    /// Explicit inline style height, if any.
    pub style_height: Option<i32>,
    /// Host-reported rendered size.
    pub rendered: Size,
}

impl RegionInput {
    /// An expanded region with nothing measured yet.
    #[must_use]
    pub const fn new(region: Region) -> Self {
        Self {
            region,
            collapsed: false,
            style_width: None,
            style_height: None,
            rendered: Size::ZERO,
        }
    }

    /// Set the collapsed flag.
    #[must_use]
    pub const fn collapsed(mut self, collapsed: bool) -> Self {
        self.collapsed = collapsed;
        self
    }

    /// Set the explicit style width.
    #[must_use]
    pub const fn style_width(mut self, width: i32) -> Self {
        self.style_width = Some(width);
        self
    }

    /// Set the explicit style height.
    #[must_use]
    pub const fn style_height(mut self, height: i32) -> Self {
        self.style_height = Some(height);
        self
    }

    /// Set the rendered size.
    #[must_use]
    pub const fn rendered(mut self, size: Size) -> Self {
        self.rendered = size;
        self
    }

    /// Width of a side region: style width, then rendered width, then
    /// [`DEFAULT_SIDE_WIDTH`]. Only positive values count.
    #[must_use]
    pub fn side_width(&self) -> i32 {
        self.style_width
            .filter(|w| *w > 0)
            .or(Some(self.rendered.width).filter(|w| *w > 0))
            .unwrap_or(DEFAULT_SIDE_WIDTH)
    }

    /// Height of a top/bottom region: style height, else rendered height.
    #[must_use]
    pub fn edge_height(&self) -> i32 {
        self.style_height
            .unwrap_or(self.rendered.height)
            .max(0)
    }
}

/// Absolute box of one region, expressed as CSS edge offsets.
///
/// `None` fields are left unset (`auto`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionPlacement {
    pub region: Region,
    pub top: Option<i32>,
    pub right: Option<i32>,
    pub bottom: Option<i32>,
    pub left: Option<i32>,
    pub width: Option<i32>,
    pub height: Option<i32>,
}

impl RegionPlacement {
    const fn empty(region: Region) -> Self {
        Self {
            region,
            top: None,
            right: None,
            bottom: None,
            left: None,
            width: None,
            height: None,
        }
    }

    /// Write this placement onto an inline style, replacing every box property.
    pub fn apply_to(&self, style: &mut BoxStyle) {
        *style = BoxStyle {
            position: Some(Position::Absolute),
            top: self.top,
            right: self.right,
            bottom: self.bottom,
            left: self.left,
            width: self.width,
            height: self.height,
        };
    }

    /// Absolute rectangle inside a container of the given extent.
    #[must_use]
    pub fn resolve(&self, extent: Size) -> Rect {
        let (x, width) = resolve_axis(extent.width, self.left, self.right, self.width);
        let (y, height) = resolve_axis(extent.height, self.top, self.bottom, self.height);
        Rect::new(x, y, width, height)
    }
}

fn resolve_axis(
    extent: i32,
    start: Option<i32>,
    end: Option<i32>,
    size: Option<i32>,
) -> (i32, i32) {
    match (start, end, size) {
        (Some(start), _, Some(size)) => (start, size),
        (None, Some(end), Some(size)) => (extent.saturating_sub(end).saturating_sub(size), size),
        (start, end, None) => {
            let start = start.unwrap_or(0);
            (start, extent.saturating_sub(start).saturating_sub(end.unwrap_or(0)))
        }
        (None, None, Some(size)) => (0, size),
    }
}

/// Result of one reflow.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BorderLayout {
    placements: Vec<RegionPlacement>,
    splitters: Vec<RegionPlacement>,
    collapsed: Vec<Region>,
    offsets: Offsets,
}

impl BorderLayout {
    /// Run a reflow over the given regions.
    ///
    /// When a region appears more than once, the last entry wins.
    #[must_use]
    pub fn compute(inputs: &[RegionInput]) -> Self {
        let mut latest: [Option<&RegionInput>; 5] = [None; 5];
        for input in inputs {
            latest[input.region.index()] = Some(input);
        }

        let mut layout = Self::default();
        let mut off = Offsets::default();

        for region in Region::REFLOW_ORDER {
            let Some(input) = latest[region.index()] else {
                continue;
            };
            if input.collapsed {
                layout.collapsed.push(region);
                if region != Region::Center {
                    layout.splitters.push(splitter_at(region, off));
                }
                continue;
            }
            let mut placement = RegionPlacement::empty(region);
            match region {
                Region::North => {
                    let height = input.edge_height();
                    placement.top = Some(off.top);
                    placement.left = Some(0);
                    placement.right = Some(0);
                    placement.height = Some(height);
                    off.top = off.top.saturating_add(height);
                }
                Region::South => {
                    let height = input.edge_height();
                    placement.bottom = Some(off.bottom);
                    placement.left = Some(0);
                    placement.right = Some(0);
                    placement.height = Some(height);
                    off.bottom = off.bottom.saturating_add(height);
                }
                Region::West => {
                    let width = input.side_width();
                    placement.top = Some(off.top);
                    placement.bottom = Some(off.bottom);
                    placement.left = Some(off.left);
                    placement.width = Some(width);
                    off.left = off.left.saturating_add(width);
                }
                Region::East => {
                    let width = input.side_width();
                    placement.top = Some(off.top);
                    placement.bottom = Some(off.bottom);
                    placement.right = Some(off.right);
                    placement.width = Some(width);
                    off.right = off.right.saturating_add(width);
                }
                Region::Center => {
                    placement.top = Some(off.top);
                    placement.bottom = Some(off.bottom);
                    placement.left = Some(off.left);
                    placement.right = Some(off.right);
                }
            }
            layout.placements.push(placement);
            if region != Region::Center {
                layout.splitters.push(splitter_at(region, off));
            }
        }

        layout.offsets = off;
        layout
    }

    /// Placements of expanded regions, in reflow order.
    #[must_use]
    pub fn placements(&self) -> &[RegionPlacement] {
        &self.placements
    }

    /// Placement of a region, if present and expanded.
    #[must_use]
    pub fn placement(&self, region: Region) -> Option<&RegionPlacement> {
        self.placements.iter().find(|p| p.region == region)
    }

    /// Placement of the splitter on the inner edge of `region`.
    ///
    /// Splitters of collapsed regions sit on the edge the region would have
    /// started from. Splitters carry no size; their thickness is styling.
    #[must_use]
    pub fn splitter(&self, region: Region) -> Option<&RegionPlacement> {
        self.splitters.iter().find(|p| p.region == region)
    }

    /// Regions that were present but collapsed.
    #[must_use]
    pub fn collapsed(&self) -> &[Region] {
        &self.collapsed
    }

    /// Space claimed on each edge after all side regions.
    #[must_use]
    pub const fn offsets(&self) -> Offsets {
        self.offsets
    }

    /// Absolute rectangles of every expanded region.
    #[must_use]
    pub fn resolve(&self, extent: Size) -> Vec<(Region, Rect)> {
        self.placements
            .iter()
            .map(|p| (p.region, p.resolve(extent)))
            .collect()
    }
}

/// Splitter placement once `region` has been accounted for in `off`.
fn splitter_at(region: Region, off: Offsets) -> RegionPlacement {
    let mut placement = RegionPlacement::empty(region);
    match region {
        Region::North => {
            placement.top = Some(off.top);
            placement.left = Some(0);
            placement.right = Some(0);
        }
        Region::South => {
            placement.bottom = Some(off.bottom);
            placement.left = Some(0);
            placement.right = Some(0);
        }
        Region::West => {
            placement.top = Some(off.top);
            placement.bottom = Some(off.bottom);
            placement.left = Some(off.left);
        }
        Region::East => {
            placement.top = Some(off.top);
            placement.bottom = Some(off.bottom);
            placement.right = Some(off.right);
        }
        Region::Center => {}
    }
    placement
}

#![forbid(unsafe_code)]

//! Border-layout regions and their size bounds.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ParseEnumError;

/// One of the five fixed zones of a border layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Region {
    North,
    South,
    West,
    East,
    Center,
}

impl Region {
    /// Order in which a reflow visits regions. Later regions see the
    /// finalized offsets of earlier ones.
    pub const REFLOW_ORDER: [Region; 5] = [
        Region::North,
        Region::South,
        Region::West,
        Region::East,
        Region::Center,
    ];

    /// Lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::North => "north",
            Self::South => "south",
            Self::West => "west",
            Self::East => "east",
            Self::Center => "center",
        }
    }

    /// CSS class put on the region element.
    #[must_use]
    pub const fn class_name(self) -> &'static str {
        match self {
            Self::North => "region-north",
            Self::South => "region-south",
            Self::West => "region-west",
            Self::East => "region-east",
            Self::Center => "region-center",
        }
    }

    /// Position in [`Region::REFLOW_ORDER`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::North => 0,
            Self::South => 1,
            Self::West => 2,
            Self::East => 3,
            Self::Center => 4,
        }
    }

    /// Axis along which a splitter resizes the region. `None` for center.
    #[must_use]
    pub const fn axis(self) -> Option<Axis> {
        match self {
            Self::West | Self::East => Some(Axis::Horizontal),
            Self::North | Self::South => Some(Axis::Vertical),
            Self::Center => None,
        }
    }

    /// Sign applied to a pointer delta: west and north grow with positive
    /// deltas, east and south with negative ones.
    #[must_use]
    pub const fn growth_sign(self) -> i32 {
        match self {
            Self::West | Self::North => 1,
            Self::East | Self::South => -1,
            Self::Center => 0,
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Region {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "north" => Ok(Self::North),
            "south" => Ok(Self::South),
            "west" => Ok(Self::West),
            "east" => Ok(Self::East),
            "center" => Ok(Self::Center),
            other => Err(ParseEnumError::new("region", other)),
        }
    }
}

/// Resize axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Lower/upper bound along one axis.
///
/// A bound of `0` counts as unset, matching how region configs treat a
/// zero `minWidth`. `min` is applied before `max`, so an inverted pair
/// resolves to `max`. Results never go below zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SizeBounds {
    pub min: Option<i32>,
    pub max: Option<i32>,
}

impl SizeBounds {
    /// No bounds.
    pub const UNBOUNDED: Self = Self {
        min: None,
        max: None,
    };

    /// Create bounds.
    #[must_use]
    pub const fn new(min: Option<i32>, max: Option<i32>) -> Self {
        Self { min, max }
    }

    /// Clamp a requested size.
    #[must_use]
    pub fn clamp(self, value: i32) -> i32 {
        let mut size = value;
        if let Some(min) = self.min.filter(|m| *m > 0) {
            size = size.max(min);
        }
        if let Some(max) = self.max.filter(|m| *m > 0) {
            size = size.min(max);
        }
        size.max(0)
    }
}

/// Per-region drag bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionBounds {
    pub min_width: Option<i32>,
    pub max_width: Option<i32>,
    pub min_height: Option<i32>,
    pub max_height: Option<i32>,
}

impl RegionBounds {
    /// Width bounds.
    #[must_use]
    pub fn with_width(mut self, min: Option<i32>, max: Option<i32>) -> Self {
        self.min_width = min;
        self.max_width = max;
        self
    }

    /// Height bounds.
    #[must_use]
    pub fn with_height(mut self, min: Option<i32>, max: Option<i32>) -> Self {
        self.min_height = min;
        self.max_height = max;
        self
    }

    /// Bounds relevant to `axis`.
    #[must_use]
    pub const fn for_axis(&self, axis: Axis) -> SizeBounds {
        match axis {
            Axis::Horizontal => SizeBounds::new(self.min_width, self.max_width),
            Axis::Vertical => SizeBounds::new(self.min_height, self.max_height),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_round_trips_names() {
        for region in Region::REFLOW_ORDER {
            assert_eq!(region.as_str().parse::<Region>(), Ok(region));
            assert_eq!(region.class_name(), format!("region-{region}"));
        }
        assert!("middle".parse::<Region>().is_err());
    }

    #[test]
    fn reflow_order_matches_index() {
        for (i, region) in Region::REFLOW_ORDER.iter().enumerate() {
            assert_eq!(region.index(), i);
        }
    }

    #[test]
    fn growth_direction_per_region() {
        assert_eq!(Region::West.growth_sign(), 1);
        assert_eq!(Region::North.growth_sign(), 1);
        assert_eq!(Region::East.growth_sign(), -1);
        assert_eq!(Region::South.growth_sign(), -1);
        assert_eq!(Region::Center.axis(), None);
    }

    #[test]
    fn clamp_applies_configured_bounds() {
        let bounds = SizeBounds::new(Some(50), Some(200));
        assert_eq!(bounds.clamp(20), 50);
        assert_eq!(bounds.clamp(500), 200);
        assert_eq!(bounds.clamp(120), 120);
    }

    #[test]
    fn zero_bounds_are_ignored() {
        let bounds = SizeBounds::new(Some(0), Some(0));
        assert_eq!(bounds.clamp(500), 500);
        assert_eq!(bounds.clamp(-20), 0);
    }

    #[test]
    fn inverted_bounds_resolve_to_max() {
        let bounds = SizeBounds::new(Some(300), Some(100));
        assert_eq!(bounds.clamp(10), 100);
        assert_eq!(bounds.clamp(1000), 100);
    }

    #[test]
    fn region_bounds_deserialize_from_camel_case() {
        let bounds: RegionBounds =
            serde_json::from_str(r#"{"minWidth":50,"maxWidth":200}"#).unwrap();
        assert_eq!(
            bounds.for_axis(Axis::Horizontal),
            SizeBounds::new(Some(50), Some(200))
        );
        assert_eq!(bounds.for_axis(Axis::Vertical), SizeBounds::UNBOUNDED);
    }
}

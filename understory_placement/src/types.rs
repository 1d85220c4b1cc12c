// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placement model: which side of the trigger, and how the floating box lines up along it.

use alloc::string::String;
use core::fmt;
use core::str::FromStr;

/// Side of the trigger that a floating element renders against.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum Side {
    /// Above the trigger.
    Top,
    /// Below the trigger.
    Bottom,
    /// Left of the trigger.
    Left,
    /// Right of the trigger.
    Right,
}

impl Side {
    /// All sides in tie-breaking order.
    ///
    /// When two sides offer the same amount of space, the one that appears
    /// first in this list wins.
    pub const ALL: [Self; 4] = [Self::Top, Self::Bottom, Self::Left, Self::Right];

    /// The CSS-style keyword for this side.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
        }
    }

    /// Whether the floating element sits above or below the trigger.
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }
}

/// Alignment of the floating element along the chosen side.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum Align {
    /// Line up with the start edge (left for top/bottom, top for left/right).
    Start,
    /// Centered on the trigger.
    #[default]
    Center,
    /// Line up with the end edge (right for top/bottom, bottom for left/right).
    End,
}

/// Where a floating element renders relative to its trigger.
///
/// Renders and parses as `top`, `top-start`, `top-end`, `bottom`, ...,
/// `right-end`. Centered placements have no suffix.
///
/// ```
/// use understory_placement::{Align, Placement, Side};
///
/// let p: Placement = "left-end".parse().unwrap();
/// assert_eq!(p, Placement::new(Side::Left, Align::End));
/// assert_eq!(Placement::BOTTOM.to_string(), "bottom");
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct Placement {
    /// Side of the trigger.
    pub side: Side,
    /// Alignment along that side.
    pub align: Align,
}

impl Placement {
    /// Centered above the trigger.
    pub const TOP: Self = Self::new(Side::Top, Align::Center);
    /// Centered below the trigger.
    pub const BOTTOM: Self = Self::new(Side::Bottom, Align::Center);
    /// Centered left of the trigger.
    pub const LEFT: Self = Self::new(Side::Left, Align::Center);
    /// Centered right of the trigger.
    pub const RIGHT: Self = Self::new(Side::Right, Align::Center);

    /// Create a placement from a side and an alignment.
    pub const fn new(side: Side, align: Align) -> Self {
        Self { side, align }
    }

    /// The keyword form, e.g. `"bottom-start"`.
    pub const fn as_str(self) -> &'static str {
        match (self.side, self.align) {
            (Side::Top, Align::Start) => "top-start",
            (Side::Top, Align::Center) => "top",
            (Side::Top, Align::End) => "top-end",
            (Side::Bottom, Align::Start) => "bottom-start",
            (Side::Bottom, Align::Center) => "bottom",
            (Side::Bottom, Align::End) => "bottom-end",
            (Side::Left, Align::Start) => "left-start",
            (Side::Left, Align::Center) => "left",
            (Side::Left, Align::End) => "left-end",
            (Side::Right, Align::Start) => "right-start",
            (Side::Right, Align::Center) => "right",
            (Side::Right, Align::End) => "right-end",
        }
    }
}

impl From<Side> for Placement {
    fn from(side: Side) -> Self {
        Self::new(side, Align::Center)
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not a valid [`Placement`] keyword.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown placement `{0}`")]
pub struct ParsePlacementError(pub String);

impl FromStr for Placement {
    type Err = ParsePlacementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (side, align) = match s.split_once('-') {
            Some((side, "start")) => (side, Align::Start),
            Some((side, "end")) => (side, Align::End),
            Some(_) => return Err(ParsePlacementError(s.into())),
            None => (s, Align::Center),
        };
        let side = match side {
            "top" => Side::Top,
            "bottom" => Side::Bottom,
            "left" => Side::Left,
            "right" => Side::Right,
            _ => return Err(ParsePlacementError(s.into())),
        };
        Ok(Self::new(side, align))
    }
}

impl TryFrom<String> for Placement {
    type Error = ParsePlacementError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Placement> for String {
    fn from(value: Placement) -> Self {
        value.as_str().into()
    }
}

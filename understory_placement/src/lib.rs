// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_placement --heading-base-level=0

//! Understory Placement: where should a floating element go?
//!
//! This crate answers the geometric half of tooltips and popovers: given a
//! trigger's bounding rectangle in viewport coordinates and the viewport size,
//! pick the side of the trigger to render the floating element on, and
//! optionally compute a concrete top-left position for it.
//!
//! It has no notion of elements, events, or time; see `understory_tooltip`
//! for the controller that decides *when* to show things.
//!
//! ## Auto-placement
//!
//! [`compute_placement`] measures the [`ViewportSpace`] around the trigger.
//! Bottom is the default home for a floating element: whenever the space below
//! is at least the threshold ([`SUITABLE_SPACE`] by default) the answer is
//! [`Side::Bottom`], even if another side has more room. Otherwise the side
//! with the strictly largest space wins, with ties resolved in
//! `top, bottom, left, right` order.
//!
//! [`compute_placement_for_size`] refines the fallback when the floating
//! element's size is known: sides where the element would cross a
//! [`SAFE_MARGIN`] around the viewport are skipped.
//!
//! ## Positioning
//!
//! Hosts with native anchor positioning only need the [`Placement`]. Others
//! can use [`position_floating`] to compute an origin for all twelve
//! placements (`top`, `top-start`, `top-end`, ...), kept inside the viewport.
//!
//! ```
//! use kurbo::{Rect, Size};
//! use understory_placement::{Placement, SUITABLE_SPACE, compute_placement};
//!
//! let viewport = Size::new(800.0, 600.0);
//! let trigger = Rect::new(10.0, 560.0, 790.0, 590.0);
//!
//! // Only 10px below, so take the roomiest side instead.
//! assert_eq!(compute_placement(trigger, viewport, SUITABLE_SPACE), Placement::TOP);
//! ```
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for `kurbo`.
//! - `libm`: `no_std` builds relying on `libm` for floating-point math.
//! - `serde`: `Serialize`/`Deserialize` for [`Placement`], [`Side`], and [`Align`].
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod heuristic;
mod position;
mod types;

pub use heuristic::{
    SAFE_MARGIN, SUITABLE_SPACE, ViewportSpace, compute_placement, compute_placement_for_size,
};
pub use position::{
    ARROW_SIZE, DEFAULT_GAP, VIEWPORT_PADDING, constrain_to_viewport, floating_origin,
    position_floating,
};
pub use types::{Align, ParsePlacementError, Placement, Side};

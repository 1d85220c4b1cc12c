// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The popover host seam.

use kurbo::{Point, Rect, Size};
use understory_placement::Placement;

/// Everything the controller needs from the platform that renders the tooltip.
///
/// `K` is the host's element handle. Implementations are expected to be cheap
/// views over the host's document; the controller never caches geometry.
pub trait PopoverHost<K> {
    /// Whether `el` is still attached to the document.
    fn is_connected(&self, el: K) -> bool;

    /// Bounding rectangle of `el` in viewport coordinates, if it is laid out.
    fn bounding_rect(&self, el: K) -> Option<Rect>;

    /// Current viewport size.
    fn viewport(&self) -> Size;

    /// Whether the floating element `el` is currently shown as a popover.
    fn is_popover_open(&self, el: K) -> bool;

    /// Show `el` as a popover.
    fn show_popover(&mut self, el: K);

    /// Hide the popover `el`.
    fn hide_popover(&mut self, el: K);

    /// Record the resolved placement on `el` (e.g. as a `data-placement` attribute).
    fn set_placement(&mut self, el: K, placement: Placement);

    /// Move `el` so its top-left corner sits at `origin`.
    ///
    /// Only called with [`PositioningStrategy::Fixed`](crate::PositioningStrategy::Fixed).
    fn set_position(&mut self, el: K, origin: Point) {
        let _ = (el, origin);
    }

    /// Whether `node` is `ancestor` or inside it. Used for outside-click dismissal.
    fn contains(&self, ancestor: K, node: K) -> bool;
}

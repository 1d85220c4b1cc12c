// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Auto-placement: pick the side of a trigger that has room for a floating element.

use kurbo::{Rect, Size};

use crate::types::{Placement, Side};

/// Default amount of space below the trigger that is considered "enough".
///
/// When at least this much room is available below the trigger, auto-placement
/// returns [`Side::Bottom`] without looking at the other sides.
pub const SUITABLE_SPACE: f64 = 100.0;

/// Margin kept between a floating element and the viewport edge when checking
/// whether it fits on a side.
pub const SAFE_MARGIN: f64 = 16.0;

/// Free space between a trigger's bounding rectangle and each viewport edge.
///
/// All values are in viewport coordinates; they may be negative when the
/// trigger is partially scrolled out of view.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ViewportSpace {
    /// Space above the trigger.
    pub top: f64,
    /// Space below the trigger.
    pub bottom: f64,
    /// Space left of the trigger.
    pub left: f64,
    /// Space right of the trigger.
    pub right: f64,
}

impl ViewportSpace {
    /// Measure the space around `rect` inside a viewport of the given size.
    pub fn new(rect: Rect, viewport: Size) -> Self {
        Self {
            top: rect.y0,
            bottom: viewport.height - rect.y1,
            left: rect.x0,
            right: viewport.width - rect.x1,
        }
    }

    /// Space available on `side`.
    pub fn on(&self, side: Side) -> f64 {
        match side {
            Side::Top => self.top,
            Side::Bottom => self.bottom,
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    /// The side with the strictly largest space.
    ///
    /// Ties resolve to the earliest side in [`Side::ALL`] (`top`, `bottom`,
    /// `left`, `right`).
    pub fn roomiest(&self) -> Side {
        roomiest_of(Side::ALL, |side| self.on(side))
    }

    /// The preferred side for a floating element.
    ///
    /// Bottom wins whenever it has at least `threshold` of space, even if
    /// another side has more; otherwise this is [`ViewportSpace::roomiest`].
    pub fn preferred(&self, threshold: f64) -> Side {
        if self.bottom >= threshold {
            Side::Bottom
        } else {
            self.roomiest()
        }
    }
}

fn roomiest_of(sides: impl IntoIterator<Item = Side>, space: impl Fn(Side) -> f64) -> Side {
    let mut sides = sides.into_iter();
    let Some(first) = sides.next() else {
        return Side::Bottom;
    };
    let mut best = (first, space(first));
    for side in sides {
        let s = space(side);
        if s > best.1 {
            best = (side, s);
        }
    }
    best.0
}

/// Compute an automatic placement for a trigger.
///
/// `rect` is the trigger's bounding rectangle in viewport coordinates and
/// `viewport` the viewport size. Returns a centered placement on the side
/// chosen by [`ViewportSpace::preferred`].
///
/// ```
/// use kurbo::{Rect, Size};
/// use understory_placement::{Placement, SUITABLE_SPACE, compute_placement};
///
/// let viewport = Size::new(1024.0, 768.0);
///
/// // Plenty of room below: bottom wins even though there is more room above.
/// let trigger = Rect::new(100.0, 500.0, 160.0, 530.0);
/// assert_eq!(compute_placement(trigger, viewport, SUITABLE_SPACE), Placement::BOTTOM);
///
/// // Pinned near the bottom edge: fall back to the roomiest side.
/// let trigger = Rect::new(400.0, 700.0, 460.0, 748.0);
/// assert_eq!(compute_placement(trigger, viewport, SUITABLE_SPACE), Placement::TOP);
/// ```
pub fn compute_placement(rect: Rect, viewport: Size, threshold: f64) -> Placement {
    ViewportSpace::new(rect, viewport).preferred(threshold).into()
}

/// Compute an automatic placement that also accounts for the floating element's size.
///
/// Bottom still wins whenever it has at least `threshold` of space. Otherwise,
/// each side is checked (in `bottom`, `top`, `right`, `left` order) for whether
/// a box of `floating` size placed there stays [`SAFE_MARGIN`] away from the
/// viewport edges while centered on the trigger. Among the sides that fit, the
/// one with the most space wins (earliest on ties). If nothing fits this falls
/// back to [`compute_placement`].
pub fn compute_placement_for_size(
    rect: Rect,
    floating: Size,
    viewport: Size,
    threshold: f64,
) -> Placement {
    let space = ViewportSpace::new(rect, viewport);
    if space.bottom >= threshold {
        return Placement::BOTTOM;
    }

    let center = rect.center();
    let fits_horizontally = center.x - floating.width / 2.0 >= SAFE_MARGIN
        && center.x + floating.width / 2.0 <= viewport.width - SAFE_MARGIN;
    let fits_vertically = center.y - floating.height / 2.0 >= SAFE_MARGIN
        && center.y + floating.height / 2.0 <= viewport.height - SAFE_MARGIN;

    let fits = |side: Side| match side {
        Side::Bottom => {
            rect.y1 + floating.height + SAFE_MARGIN <= viewport.height && fits_horizontally
        }
        Side::Top => rect.y0 - floating.height - SAFE_MARGIN >= 0.0 && fits_horizontally,
        Side::Right => rect.x1 + floating.width + SAFE_MARGIN <= viewport.width && fits_vertically,
        Side::Left => rect.x0 - floating.width - SAFE_MARGIN >= 0.0 && fits_vertically,
    };

    let candidates = [Side::Bottom, Side::Top, Side::Right, Side::Left];
    if candidates.iter().any(|&side| fits(side)) {
        let fitting = candidates.into_iter().filter(|&side| fits(side));
        return roomiest_of(fitting, |side| space.on(side)).into();
    }

    space.roomiest().into()
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Size = Size::new(1000.0, 800.0);

    #[test]
    fn bottom_wins_with_enough_room_below() {
        // A trigger near the top of a tall viewport.
        let rect = Rect::new(200.0, 10.0, 260.0, 60.0);
        assert_eq!(compute_placement(rect, VIEWPORT, 100.0), Placement::BOTTOM);
    }

    #[test]
    fn bottom_wins_even_when_top_has_more_room() {
        let rect = Rect::new(200.0, 600.0, 260.0, 650.0);
        let space = ViewportSpace::new(rect, VIEWPORT);
        assert!(space.top > space.bottom);
        assert_eq!(compute_placement(rect, VIEWPORT, 100.0), Placement::BOTTOM);
    }

    #[test]
    fn falls_back_to_top_near_bottom_edge() {
        // Bottom space 20, top space 500.
        let rect = Rect::new(450.0, 500.0, 550.0, 780.0);
        let space = ViewportSpace::new(rect, VIEWPORT);
        assert_eq!(space.bottom, 20.0);
        assert_eq!(space.top, 500.0);
        assert_eq!(compute_placement(rect, VIEWPORT, 100.0), Placement::TOP);
    }

    #[test]
    fn falls_back_to_roomiest_horizontal_side() {
        // Full-height trigger on the left edge.
        let rect = Rect::new(10.0, 0.0, 60.0, 790.0);
        assert_eq!(compute_placement(rect, VIEWPORT, 100.0), Placement::RIGHT);
    }

    #[test]
    fn ties_resolve_in_declaration_order() {
        // top == left == 300, bottom == 10, right == 300.
        let viewport = Size::new(700.0, 400.0);
        let rect = Rect::new(300.0, 300.0, 400.0, 390.0);
        let space = ViewportSpace::new(rect, viewport);
        assert_eq!(space.top, space.left);
        assert_eq!(space.left, space.right);
        assert_eq!(space.roomiest(), Side::Top);

        // left == right, both above top.
        let rect = Rect::new(300.0, 100.0, 400.0, 390.0);
        assert_eq!(ViewportSpace::new(rect, viewport).roomiest(), Side::Left);
    }

    #[test]
    fn threshold_is_inclusive() {
        let rect = Rect::new(0.0, 0.0, 50.0, 700.0);
        assert_eq!(ViewportSpace::new(rect, VIEWPORT).bottom, 100.0);
        assert_eq!(compute_placement(rect, VIEWPORT, 100.0), Placement::BOTTOM);
        assert_ne!(compute_placement(rect, VIEWPORT, 100.5), Placement::BOTTOM);
    }

    #[test]
    fn sized_placement_prefers_a_side_that_fits() {
        // Tall trigger hugging the right edge: left has the most room and the
        // box fits there.
        let rect = Rect::new(940.0, 300.0, 990.0, 760.0);
        let floating = Size::new(200.0, 40.0);
        assert_eq!(compute_placement(rect, VIEWPORT, 100.0), Placement::LEFT);
        assert_eq!(
            compute_placement_for_size(rect, floating, VIEWPORT, 100.0),
            Placement::LEFT
        );

        // Narrow box: top now fits and has the most room.
        let rect = Rect::new(400.0, 500.0, 600.0, 760.0);
        let floating = Size::new(80.0, 40.0);
        assert_eq!(
            compute_placement_for_size(rect, floating, VIEWPORT, 100.0),
            Placement::TOP
        );
    }

    #[test]
    fn sized_placement_picks_fitting_side_over_roomier_one() {
        // Top has the most room, but a wide box centered above the trigger
        // would cross the right edge. Left is smaller yet fits.
        let viewport = Size::new(460.0, 400.0);
        let rect = Rect::new(300.0, 350.0, 340.0, 390.0);
        let floating = Size::new(260.0, 20.0);
        assert_eq!(compute_placement(rect, viewport, 100.0), Placement::TOP);
        assert_eq!(
            compute_placement_for_size(rect, floating, viewport, 100.0),
            Placement::LEFT
        );
    }

    #[test]
    fn sized_placement_keeps_bottom_preference() {
        let rect = Rect::new(10.0, 10.0, 20.0, 20.0);
        // Huge floating box that fits nowhere: bottom still wins on space alone.
        let floating = Size::new(5000.0, 5000.0);
        assert_eq!(
            compute_placement_for_size(rect, floating, VIEWPORT, 100.0),
            Placement::BOTTOM
        );
    }
}

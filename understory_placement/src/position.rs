// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fixed-offset positioning for hosts without native anchor positioning.

use kurbo::{Point, Rect, Size};

use crate::types::{Align, Placement, Side};

/// Default distance between the trigger and the floating element.
pub const DEFAULT_GAP: f64 = 8.0;

/// Size of the arrow drawn on the floating element; half of it is added to the gap.
pub const ARROW_SIZE: f64 = 4.0;

/// Default minimum distance kept between the floating element and the viewport edges.
pub const VIEWPORT_PADDING: f64 = 8.0;

/// Top-left corner of a floating box of `size` placed against `trigger`.
///
/// The floating box is offset from the trigger by `gap + ARROW_SIZE / 2`.
/// Centered placements center the box on the trigger's cross axis; start and
/// end placements line up the matching edges.
pub fn floating_origin(trigger: Rect, size: Size, placement: Placement, gap: f64) -> Point {
    let offset = gap + ARROW_SIZE / 2.0;
    let center = trigger.center();

    let main = match placement.side {
        Side::Top => trigger.y0 - size.height - offset,
        Side::Bottom => trigger.y1 + offset,
        Side::Left => trigger.x0 - size.width - offset,
        Side::Right => trigger.x1 + offset,
    };

    if placement.side.is_vertical() {
        let x = match placement.align {
            Align::Start => trigger.x0,
            Align::Center => center.x - size.width / 2.0,
            Align::End => trigger.x1 - size.width,
        };
        Point::new(x, main)
    } else {
        let y = match placement.align {
            Align::Start => trigger.y0,
            Align::Center => center.y - size.height / 2.0,
            Align::End => trigger.y1 - size.height,
        };
        Point::new(main, y)
    }
}

/// Clamp `origin` so a box of `size` stays `padding` away from the viewport edges.
///
/// When the box is larger than the viewport the leading edge wins, so the
/// top-left corner of the content stays reachable.
pub fn constrain_to_viewport(origin: Point, size: Size, viewport: Size, padding: f64) -> Point {
    fn clamp_axis(pos: f64, extent: f64, limit: f64, padding: f64) -> f64 {
        let mut pos = pos;
        if pos + extent > limit - padding {
            pos = limit - extent - padding;
        }
        if pos < padding {
            pos = padding;
        }
        pos
    }

    Point::new(
        clamp_axis(origin.x, size.width, viewport.width, padding),
        clamp_axis(origin.y, size.height, viewport.height, padding),
    )
}

/// Compute the viewport-constrained origin of a floating box.
///
/// ```
/// use kurbo::{Point, Rect, Size};
/// use understory_placement::{Placement, VIEWPORT_PADDING, position_floating};
///
/// let trigger = Rect::new(100.0, 100.0, 140.0, 120.0);
/// let origin = position_floating(
///     trigger,
///     Size::new(60.0, 20.0),
///     Placement::BOTTOM,
///     8.0,
///     Size::new(800.0, 600.0),
///     VIEWPORT_PADDING,
/// );
/// // Centered under the trigger, 8 + 2 below it.
/// assert_eq!(origin, Point::new(90.0, 130.0));
/// ```
pub fn position_floating(
    trigger: Rect,
    size: Size,
    placement: Placement,
    gap: f64,
    viewport: Size,
    padding: f64,
) -> Point {
    constrain_to_viewport(
        floating_origin(trigger, size, placement, gap),
        size,
        viewport,
        padding,
    )
}

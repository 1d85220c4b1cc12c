// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The show/hide state machine for one tooltip.
//!
//! ## Timing
//!
//! The controller never reads a clock and never schedules anything itself.
//! Two kinds of waiting are expressed as host calls instead:
//!
//! - Showing waits [`MEASURE_FRAMES`] animation frames so the trigger has been
//!   laid out before it is measured. While [`needs_animation_frame`] is true,
//!   the host calls [`on_animation_frame`] once per frame.
//! - Hiding after a grace period records a deadline. The host asks for it with
//!   [`next_deadline`] and calls [`poll`] with the current time once it passes.
//!
//! All timestamps are milliseconds from an arbitrary host-chosen epoch.
//!
//! [`needs_animation_frame`]: TooltipController::needs_animation_frame
//! [`on_animation_frame`]: TooltipController::on_animation_frame
//! [`next_deadline`]: TooltipController::next_deadline
//! [`poll`]: TooltipController::poll
//!
//! ## Debounced hiding
//!
//! There is at most one pending hide, stored in the state itself. Scheduling
//! another replaces it, and any show or [`cancel_hide`] drops it.
//!
//! ```
//! use kurbo::{Rect, Size};
//! use understory_tooltip::{MemoryHost, PopoverHost, TooltipConfig, TooltipController};
//!
//! let mut host = MemoryHost::new(Size::new(800.0, 600.0));
//! let body = host.document.body();
//! let trigger = host.document.create_element(Some(body));
//! let floating = host.document.create_element(Some(body));
//! host.set_rect(trigger, Rect::new(100.0, 100.0, 180.0, 130.0));
//!
//! let mut tooltip = TooltipController::new(floating, trigger, TooltipConfig::default());
//! tooltip.show(&host);
//! tooltip.on_animation_frame(&mut host);
//! tooltip.on_animation_frame(&mut host);
//! assert!(host.is_popover_open(floating));
//!
//! tooltip.hide(100, 1_000, &mut host);
//! tooltip.hide(100, 1_050, &mut host);
//! assert_eq!(tooltip.next_deadline(), Some(1_150));
//! tooltip.poll(1_100, &mut host);
//! assert!(host.is_popover_open(floating));
//! tooltip.poll(1_150, &mut host);
//! assert!(!host.is_popover_open(floating));
//! ```
//!
//! [`cancel_hide`]: TooltipController::cancel_hide

use kurbo::Rect;
use understory_placement::{
    Placement, compute_placement, compute_placement_for_size, position_floating,
};

use crate::config::{PositioningStrategy, TooltipConfig};
use crate::host::PopoverHost;

/// Animation frames to wait before measuring the trigger.
pub const MEASURE_FRAMES: u8 = 2;

/// Where a [`TooltipController`] is in its show/hide cycle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ControllerState {
    /// Nothing pending. The popover may still be open if something else opened it.
    Idle,
    /// Waiting for animation frames before measuring and showing.
    PendingShow {
        /// Frames left before measuring.
        frames_remaining: u8,
        /// A deferred hide requested while waiting; it is armed once the show completes.
        hide_deadline: Option<u64>,
    },
    /// Shown, nothing pending.
    Shown,
    /// Shown, hiding at `deadline` unless cancelled.
    PendingHide {
        /// Timestamp at which the hide fires.
        deadline: u64,
    },
}

/// Show/hide controller for one trigger/floating pair.
///
/// Element handles are resolved once at construction. If either element is
/// later disconnected, operations drop their pending work and do nothing
/// else; after [`dispose`](Self::dispose) every operation is a no-op.
#[derive(Clone, Debug)]
pub struct TooltipController<K> {
    floating: K,
    trigger: K,
    config: TooltipConfig,
    state: ControllerState,
    placement: Option<Placement>,
    disposed: bool,
}

impl<K: Copy> TooltipController<K> {
    /// Create a controller for `floating`, anchored to `trigger`.
    ///
    /// An explicit placement in `config` disables auto-placement.
    pub fn new(floating: K, trigger: K, config: TooltipConfig) -> Self {
        Self {
            floating,
            trigger,
            config,
            state: ControllerState::Idle,
            placement: None,
            disposed: false,
        }
    }

    /// The floating element.
    pub fn floating(&self) -> K {
        self.floating
    }

    /// The trigger element.
    pub fn trigger(&self) -> K {
        self.trigger
    }

    /// The configuration this controller was built with.
    pub fn config(&self) -> &TooltipConfig {
        &self.config
    }

    /// Current state.
    pub fn state(&self) -> ControllerState {
        self.state
    }

    /// The placement resolved by the most recent completed show or reposition.
    pub fn placement(&self) -> Option<Placement> {
        self.placement
    }

    /// Whether [`dispose`](Self::dispose) has been called.
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Whether the floating element is currently open.
    pub fn is_open<H: PopoverHost<K>>(&self, host: &H) -> bool {
        host.is_popover_open(self.floating)
    }

    /// Whether the host should deliver an animation frame.
    pub fn needs_animation_frame(&self) -> bool {
        matches!(self.state, ControllerState::PendingShow { .. })
    }

    /// When the pending hide fires, if one is armed.
    pub fn next_deadline(&self) -> Option<u64> {
        match self.state {
            ControllerState::PendingHide { deadline } => Some(deadline),
            _ => None,
        }
    }

    /// Request that the tooltip be shown.
    ///
    /// Drops any pending hide and starts a measurement; the popover opens
    /// after [`MEASURE_FRAMES`] calls to [`on_animation_frame`](Self::on_animation_frame).
    /// An in-flight measurement keeps its frame count. Showing an already open
    /// tooltip re-resolves the placement without toggling it a second time.
    pub fn show<H: PopoverHost<K>>(&mut self, host: &H) {
        if !self.check_live(host) {
            return;
        }
        self.state = match self.state {
            ControllerState::PendingShow {
                frames_remaining, ..
            } => ControllerState::PendingShow {
                frames_remaining,
                hide_deadline: None,
            },
            _ => ControllerState::PendingShow {
                frames_remaining: MEASURE_FRAMES,
                hide_deadline: None,
            },
        };
    }

    /// Advance an in-flight measurement by one frame.
    pub fn on_animation_frame<H: PopoverHost<K>>(&mut self, host: &mut H) {
        let ControllerState::PendingShow {
            frames_remaining,
            hide_deadline,
        } = self.state
        else {
            return;
        };
        if frames_remaining > 1 {
            self.state = ControllerState::PendingShow {
                frames_remaining: frames_remaining - 1,
                hide_deadline,
            };
            return;
        }
        self.finish_show(hide_deadline, host);
    }

    /// Request that the tooltip be hidden.
    ///
    /// With `delay_ms == 0` the popover is hidden now (if open) and all
    /// pending work is dropped, including an in-flight measurement.
    /// Otherwise a single hide is scheduled at `now + delay_ms`, replacing any
    /// earlier one. A deferred hide requested during a measurement does not
    /// abort it: the show completes and the hide is armed afterwards.
    pub fn hide<H: PopoverHost<K>>(&mut self, delay_ms: u64, now: u64, host: &mut H) {
        if !self.check_live(host) {
            return;
        }
        if delay_ms == 0 {
            self.hide_now(host);
            return;
        }
        let deadline = now.saturating_add(delay_ms);
        self.state = match self.state {
            ControllerState::PendingShow {
                frames_remaining, ..
            } => ControllerState::PendingShow {
                frames_remaining,
                hide_deadline: Some(deadline),
            },
            ControllerState::Shown | ControllerState::PendingHide { .. } => {
                ControllerState::PendingHide { deadline }
            }
            ControllerState::Idle if host.is_popover_open(self.floating) => {
                ControllerState::PendingHide { deadline }
            }
            ControllerState::Idle => ControllerState::Idle,
        };
    }

    /// Drop a pending hide without hiding.
    pub fn cancel_hide(&mut self) {
        self.state = match self.state {
            ControllerState::PendingHide { .. } => ControllerState::Shown,
            ControllerState::PendingShow {
                frames_remaining, ..
            } => ControllerState::PendingShow {
                frames_remaining,
                hide_deadline: None,
            },
            other => other,
        };
    }

    /// Fire the pending hide if `now` has reached its deadline.
    pub fn poll<H: PopoverHost<K>>(&mut self, now: u64, host: &mut H) {
        let ControllerState::PendingHide { deadline } = self.state else {
            return;
        };
        if now < deadline || !self.check_live(host) {
            return;
        }
        #[cfg(feature = "tracing")]
        tracing::trace!(deadline, now, "tooltip grace period elapsed");
        self.hide_now(host);
    }

    /// Show if closed, hide immediately if open or opening.
    pub fn toggle<H: PopoverHost<K>>(&mut self, now: u64, host: &mut H) {
        let opening = matches!(self.state, ControllerState::PendingShow { .. });
        if opening || host.is_popover_open(self.floating) {
            self.hide(0, now, host);
        } else {
            self.show(&*host);
        }
    }

    /// Re-resolve and re-apply the placement of an open tooltip.
    ///
    /// Call this when the viewport resizes or an ancestor scrolls.
    pub fn reposition<H: PopoverHost<K>>(&mut self, host: &mut H) {
        if !matches!(
            self.state,
            ControllerState::Shown | ControllerState::PendingHide { .. }
        ) || !self.check_live(host)
        {
            return;
        }
        let Some(trigger_rect) = host.bounding_rect(self.trigger) else {
            return;
        };
        let placement = self.resolve_placement(trigger_rect, host);
        host.set_placement(self.floating, placement);
        self.apply_position(trigger_rect, placement, host);
        self.placement = Some(placement);
    }

    /// Drop all pending work and ignore every later call.
    ///
    /// Does not change the popover's visibility.
    pub fn dispose(&mut self) {
        self.disposed = true;
        self.state = ControllerState::Idle;
    }

    fn finish_show<H: PopoverHost<K>>(&mut self, hide_deadline: Option<u64>, host: &mut H) {
        if !self.check_live(host) {
            return;
        }
        let Some(trigger_rect) = host.bounding_rect(self.trigger) else {
            #[cfg(feature = "tracing")]
            tracing::debug!("tooltip trigger has no layout; not showing");
            self.state = ControllerState::Idle;
            return;
        };
        // A closed popover has no box, so open it before measuring its size.
        let measure_floating = self.config.size_aware && self.config.placement.is_none();
        if measure_floating && !host.is_popover_open(self.floating) {
            host.show_popover(self.floating);
        }
        let placement = self.resolve_placement(trigger_rect, host);
        host.set_placement(self.floating, placement);
        if !host.is_popover_open(self.floating) {
            host.show_popover(self.floating);
        }
        self.apply_position(trigger_rect, placement, host);
        self.placement = Some(placement);
        self.state = match hide_deadline {
            Some(deadline) => ControllerState::PendingHide { deadline },
            None => ControllerState::Shown,
        };
        #[cfg(feature = "tracing")]
        tracing::trace!(placement = placement.as_str(), "tooltip shown");
    }

    fn resolve_placement<H: PopoverHost<K>>(&self, trigger_rect: Rect, host: &H) -> Placement {
        if let Some(explicit) = self.config.placement {
            return explicit;
        }
        let viewport = host.viewport();
        let floating_size = self
            .config
            .size_aware
            .then(|| host.bounding_rect(self.floating))
            .flatten()
            .map(|r| r.size());
        match floating_size {
            Some(size) => compute_placement_for_size(
                trigger_rect,
                size,
                viewport,
                self.config.suitable_space,
            ),
            None => compute_placement(trigger_rect, viewport, self.config.suitable_space),
        }
    }

    fn apply_position<H: PopoverHost<K>>(
        &self,
        trigger_rect: Rect,
        placement: Placement,
        host: &mut H,
    ) {
        if self.config.strategy != PositioningStrategy::Fixed {
            return;
        }
        let Some(floating_rect) = host.bounding_rect(self.floating) else {
            return;
        };
        let origin = position_floating(
            trigger_rect,
            floating_rect.size(),
            placement,
            self.config.gap,
            host.viewport(),
            self.config.viewport_padding,
        );
        host.set_position(self.floating, origin);
    }

    fn hide_now<H: PopoverHost<K>>(&mut self, host: &mut H) {
        if host.is_popover_open(self.floating) {
            host.hide_popover(self.floating);
        }
        self.state = ControllerState::Idle;
    }

    /// Returns false (dropping pending work) if disposed or either element is gone.
    fn check_live<H: PopoverHost<K>>(&mut self, host: &H) -> bool {
        if self.disposed {
            return false;
        }
        if host.is_connected(self.floating) && host.is_connected(self.trigger) {
            return true;
        }
        #[cfg(feature = "tracing")]
        tracing::debug!("tooltip element disconnected; dropping pending work");
        self.state = ControllerState::Idle;
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryHost;
    use kurbo::{Point, Size};
    use understory_trigger::ElementId;

    struct Fixture {
        host: MemoryHost,
        trigger: ElementId,
        floating: ElementId,
    }

    fn fixture(trigger_rect: Rect) -> Fixture {
        let mut host = MemoryHost::new(Size::new(1000.0, 800.0));
        let body = host.document.body();
        let trigger = host.document.create_element(Some(body));
        let floating = host.document.create_element(Some(body));
        host.set_rect(trigger, trigger_rect);
        host.set_rect(floating, Rect::new(0.0, 0.0, 120.0, 40.0));
        host.make_popover(floating);
        Fixture {
            host,
            trigger,
            floating,
        }
    }

    fn shown(f: &mut Fixture, config: TooltipConfig) -> TooltipController<ElementId> {
        let mut c = TooltipController::new(f.floating, f.trigger, config);
        c.show(&f.host);
        c.on_animation_frame(&mut f.host);
        c.on_animation_frame(&mut f.host);
        assert_eq!(c.state(), ControllerState::Shown);
        c
    }

    #[test]
    fn show_waits_two_frames() {
        let mut f = fixture(Rect::new(100.0, 100.0, 200.0, 130.0));
        let mut c = TooltipController::new(f.floating, f.trigger, TooltipConfig::default());
        c.show(&f.host);
        assert!(c.needs_animation_frame());
        c.on_animation_frame(&mut f.host);
        assert!(!f.host.is_popover_open(f.floating));
        c.on_animation_frame(&mut f.host);
        assert!(f.host.is_popover_open(f.floating));
        assert!(!c.needs_animation_frame());
        assert_eq!(f.host.placement_of(f.floating), Some(Placement::BOTTOM));
        assert_eq!(c.placement(), Some(Placement::BOTTOM));
    }

    #[test]
    fn repeated_show_keeps_frame_count_and_toggles_once() {
        let mut f = fixture(Rect::new(100.0, 100.0, 200.0, 130.0));
        let mut c = TooltipController::new(f.floating, f.trigger, TooltipConfig::default());
        c.show(&f.host);
        c.on_animation_frame(&mut f.host);
        c.show(&f.host);
        c.on_animation_frame(&mut f.host);
        assert_eq!(c.state(), ControllerState::Shown);

        c.show(&f.host);
        c.on_animation_frame(&mut f.host);
        c.on_animation_frame(&mut f.host);
        assert_eq!(f.host.show_calls(), 1);
        assert!(f.host.is_popover_open(f.floating));
    }

    #[test]
    fn size_aware_placement_measures_closed_popover_on_first_show() {
        // Top has the most room, but a 260px-wide tooltip only fits on the left.
        let mut host = MemoryHost::new(Size::new(460.0, 400.0));
        let body = host.document.body();
        let trigger = host.document.create_element(Some(body));
        let floating = host.document.create_element(Some(body));
        host.set_rect(trigger, Rect::new(300.0, 350.0, 340.0, 390.0));
        host.set_rect(floating, Rect::new(0.0, 0.0, 260.0, 20.0));
        host.make_popover(floating);

        let config = TooltipConfig::default().with_size_aware(true);
        let mut c = TooltipController::new(floating, trigger, config);
        c.show(&host);
        c.on_animation_frame(&mut host);
        c.on_animation_frame(&mut host);
        assert_eq!(host.placement_of(floating), Some(Placement::LEFT));
        assert_eq!(c.placement(), Some(Placement::LEFT));
        assert!(host.is_popover_open(floating));
        assert_eq!(host.show_calls(), 1);

        // Without size awareness the roomiest side wins.
        let mut c = TooltipController::new(floating, trigger, TooltipConfig::default());
        host.hide_popover(floating);
        c.show(&host);
        c.on_animation_frame(&mut host);
        c.on_animation_frame(&mut host);
        assert_eq!(c.placement(), Some(Placement::TOP));
    }

    #[test]
    fn explicit_placement_skips_heuristic() {
        // Plenty of room below, but the caller asked for left-start.
        let mut f = fixture(Rect::new(300.0, 100.0, 400.0, 130.0));
        let placement: Placement = "left-start".parse().unwrap();
        shown(&mut f, TooltipConfig::default().with_placement(placement));
        assert_eq!(f.host.placement_of(f.floating), Some(placement));
    }

    #[test]
    fn auto_placement_uses_configured_threshold() {
        // 150px below the trigger; enough by default, not with a 200px threshold.
        let mut f = fixture(Rect::new(10.0, 600.0, 990.0, 650.0));
        shown(&mut f, TooltipConfig::default());
        assert_eq!(f.host.placement_of(f.floating), Some(Placement::BOTTOM));

        let mut f = fixture(Rect::new(10.0, 600.0, 990.0, 650.0));
        shown(&mut f, TooltipConfig::default().with_suitable_space(200.0));
        assert_eq!(f.host.placement_of(f.floating), Some(Placement::TOP));
    }

    #[test]
    fn hide_zero_is_immediate() {
        let mut f = fixture(Rect::new(100.0, 100.0, 200.0, 130.0));
        let mut c = shown(&mut f, TooltipConfig::default());
        c.hide(0, 0, &mut f.host);
        assert!(!f.host.is_popover_open(f.floating));
        assert_eq!(c.state(), ControllerState::Idle);
        assert_eq!(c.next_deadline(), None);
    }

    #[test]
    fn immediate_hide_aborts_measurement() {
        let mut f = fixture(Rect::new(100.0, 100.0, 200.0, 130.0));
        let mut c = TooltipController::new(f.floating, f.trigger, TooltipConfig::default());
        c.show(&f.host);
        c.on_animation_frame(&mut f.host);
        c.hide(0, 5, &mut f.host);
        c.on_animation_frame(&mut f.host);
        assert!(!f.host.is_popover_open(f.floating));
        assert_eq!(f.host.show_calls(), 0);
    }

    #[test]
    fn deferred_hide_during_measurement_arms_after_show() {
        let mut f = fixture(Rect::new(100.0, 100.0, 200.0, 130.0));
        let mut c = TooltipController::new(f.floating, f.trigger, TooltipConfig::default());
        c.show(&f.host);
        c.hide(100, 0, &mut f.host);
        assert_eq!(c.next_deadline(), None);
        c.on_animation_frame(&mut f.host);
        c.on_animation_frame(&mut f.host);
        assert!(f.host.is_popover_open(f.floating));
        assert_eq!(c.state(), ControllerState::PendingHide { deadline: 100 });
        c.poll(100, &mut f.host);
        assert!(!f.host.is_popover_open(f.floating));
    }

    #[test]
    fn cancel_hide_keeps_tooltip_open() {
        let mut f = fixture(Rect::new(100.0, 100.0, 200.0, 130.0));
        let mut c = shown(&mut f, TooltipConfig::default());
        c.hide(100, 0, &mut f.host);
        c.cancel_hide();
        assert_eq!(c.state(), ControllerState::Shown);
        c.poll(1_000, &mut f.host);
        assert!(f.host.is_popover_open(f.floating));
    }

    #[test]
    fn deferred_hide_when_idle_and_closed_does_nothing() {
        let mut f = fixture(Rect::new(100.0, 100.0, 200.0, 130.0));
        let mut c = TooltipController::new(f.floating, f.trigger, TooltipConfig::default());
        c.hide(100, 0, &mut f.host);
        assert_eq!(c.state(), ControllerState::Idle);
        assert_eq!(c.next_deadline(), None);
    }

    #[test]
    fn deferred_hide_closes_externally_opened_popover() {
        let mut f = fixture(Rect::new(100.0, 100.0, 200.0, 130.0));
        let mut c = TooltipController::new(f.floating, f.trigger, TooltipConfig::default());
        // Opened declaratively by the host, not through the controller.
        f.host.show_popover(f.floating);
        c.hide(100, 0, &mut f.host);
        c.poll(100, &mut f.host);
        assert!(!f.host.is_popover_open(f.floating));
    }

    #[test]
    fn toggle_opens_and_closes() {
        let mut f = fixture(Rect::new(100.0, 100.0, 200.0, 130.0));
        let mut c = TooltipController::new(f.floating, f.trigger, TooltipConfig::default());
        c.toggle(0, &mut f.host);
        c.on_animation_frame(&mut f.host);
        c.on_animation_frame(&mut f.host);
        assert!(c.is_open(&f.host));
        c.toggle(10, &mut f.host);
        assert!(!c.is_open(&f.host));
        assert_eq!(c.state(), ControllerState::Idle);
    }

    #[test]
    fn fixed_strategy_writes_constrained_position() {
        let mut f = fixture(Rect::new(100.0, 100.0, 200.0, 130.0));
        shown(
            &mut f,
            TooltipConfig::default().with_strategy(PositioningStrategy::Fixed),
        );
        // Centered under the trigger: x = 150 - 60, y = 130 + 8 + 2.
        assert_eq!(
            f.host.position_of(f.floating),
            Some(Point::new(90.0, 140.0))
        );
    }

    #[test]
    fn anchor_strategy_leaves_position_alone() {
        let mut f = fixture(Rect::new(100.0, 100.0, 200.0, 130.0));
        shown(&mut f, TooltipConfig::default());
        assert_eq!(f.host.position_of(f.floating), None);
    }

    #[test]
    fn reposition_follows_the_trigger() {
        let mut f = fixture(Rect::new(100.0, 100.0, 200.0, 130.0));
        let mut c = shown(&mut f, TooltipConfig::default());
        assert_eq!(c.placement(), Some(Placement::BOTTOM));

        // Scrolled to the bottom edge with the most room above.
        f.host.set_rect(f.trigger, Rect::new(100.0, 760.0, 900.0, 790.0));
        c.reposition(&mut f.host);
        assert_eq!(c.placement(), Some(Placement::TOP));
        assert_eq!(f.host.placement_of(f.floating), Some(Placement::TOP));
        assert_eq!(f.host.show_calls(), 1);
    }

    #[test]
    fn reposition_ignores_closed_tooltips() {
        let mut f = fixture(Rect::new(100.0, 100.0, 200.0, 130.0));
        let mut c = TooltipController::new(f.floating, f.trigger, TooltipConfig::default());
        c.reposition(&mut f.host);
        assert_eq!(c.placement(), None);
        assert_eq!(f.host.placement_of(f.floating), None);
    }

    #[test]
    fn trigger_without_layout_does_not_show() {
        let mut host = MemoryHost::new(Size::new(1000.0, 800.0));
        let body = host.document.body();
        let trigger = host.document.create_element(Some(body));
        let floating = host.document.create_element(Some(body));
        let mut c = TooltipController::new(floating, trigger, TooltipConfig::default());
        c.show(&host);
        c.on_animation_frame(&mut host);
        c.on_animation_frame(&mut host);
        assert!(!host.is_popover_open(floating));
        assert_eq!(c.state(), ControllerState::Idle);
    }

    #[test]
    fn disconnected_elements_turn_operations_into_no_ops() {
        let mut f = fixture(Rect::new(100.0, 100.0, 200.0, 130.0));
        let mut c = shown(&mut f, TooltipConfig::default());
        c.hide(100, 0, &mut f.host);
        f.host.document.detach(f.trigger);
        c.poll(100, &mut f.host);
        assert_eq!(c.state(), ControllerState::Idle);
        // Visibility is left alone; the element is simply forgotten.
        assert_eq!(f.host.hide_calls(), 0);
        c.show(&f.host);
        assert!(!c.needs_animation_frame());
    }

    #[test]
    fn dispose_drops_pending_work_without_hiding() {
        let mut f = fixture(Rect::new(100.0, 100.0, 200.0, 130.0));
        let mut c = shown(&mut f, TooltipConfig::default());
        c.hide(100, 0, &mut f.host);
        c.dispose();
        assert_eq!(c.next_deadline(), None);
        c.poll(500, &mut f.host);
        c.hide(0, 500, &mut f.host);
        c.show(&f.host);
        assert!(c.is_disposed());
        assert!(!c.needs_animation_frame());
        assert!(f.host.is_popover_open(f.floating));
        assert_eq!(f.host.hide_calls(), 0);
    }
}

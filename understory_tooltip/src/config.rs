// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-tooltip configuration.

use understory_placement::{DEFAULT_GAP, Placement, SUITABLE_SPACE, VIEWPORT_PADDING};
use understory_trigger::TriggerMode;

/// Default delay between a pointer leaving and the tooltip hiding, in milliseconds.
pub const DEFAULT_GRACE_PERIOD_MS: u64 = 100;

/// How the resolved placement is applied to the floating element.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum PositioningStrategy {
    /// The host positions the floating element itself (e.g. CSS anchor
    /// positioning); only the placement is written.
    #[default]
    Anchor,
    /// The controller also computes a viewport-constrained origin and writes
    /// it with [`PopoverHost::set_position`](crate::PopoverHost::set_position).
    Fixed,
}

/// Error returned by [`TooltipConfig::validate`].
#[derive(Copy, Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// The suitable-space threshold was negative or not finite.
    #[error("suitable space must be finite and non-negative, got {0}")]
    SuitableSpace(f64),
    /// The gap was negative or not finite.
    #[error("gap must be finite and non-negative, got {0}")]
    Gap(f64),
    /// The viewport padding was negative or not finite.
    #[error("viewport padding must be finite and non-negative, got {0}")]
    ViewportPadding(f64),
}

/// Configuration for one tooltip.
///
/// ```
/// use understory_placement::Placement;
/// use understory_tooltip::{PositioningStrategy, TooltipConfig};
/// use understory_trigger::TriggerMode;
///
/// let config = TooltipConfig::default()
///     .with_trigger_mode(TriggerMode::Hover)
///     .with_placement(Placement::TOP)
///     .with_strategy(PositioningStrategy::Fixed);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.grace_period_ms, 100);
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, rename_all = "kebab-case")
)]
pub struct TooltipConfig {
    /// Explicit placement; `None` means auto-placement on every show.
    pub placement: Option<Placement>,
    /// Which gestures show and hide the tooltip.
    pub trigger_mode: TriggerMode,
    /// Delay before hiding after the pointer leaves, in milliseconds.
    ///
    /// Zero hides immediately.
    pub grace_period_ms: u64,
    /// Space below the trigger that is always good enough for auto-placement.
    pub suitable_space: f64,
    /// Distance between trigger and floating element, for [`PositioningStrategy::Fixed`].
    pub gap: f64,
    /// Skip sides where the measured floating element would not fit.
    ///
    /// The popover is opened before it is measured, since a closed popover has no box.
    pub size_aware: bool,
    /// How the placement is applied.
    pub strategy: PositioningStrategy,
    /// Distance kept from the viewport edges, for [`PositioningStrategy::Fixed`].
    pub viewport_padding: f64,
}

impl Default for TooltipConfig {
    fn default() -> Self {
        Self {
            placement: None,
            trigger_mode: TriggerMode::default(),
            grace_period_ms: DEFAULT_GRACE_PERIOD_MS,
            suitable_space: SUITABLE_SPACE,
            gap: DEFAULT_GAP,
            size_aware: false,
            strategy: PositioningStrategy::default(),
            viewport_padding: VIEWPORT_PADDING,
        }
    }
}

impl TooltipConfig {
    /// Use a fixed placement instead of auto-placement.
    #[must_use]
    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = Some(placement);
        self
    }

    /// Set the trigger mode.
    #[must_use]
    pub fn with_trigger_mode(mut self, mode: TriggerMode) -> Self {
        self.trigger_mode = mode;
        self
    }

    /// Set the hover grace period.
    #[must_use]
    pub fn with_grace_period_ms(mut self, ms: u64) -> Self {
        self.grace_period_ms = ms;
        self
    }

    /// Set the suitable-space threshold.
    #[must_use]
    pub fn with_suitable_space(mut self, px: f64) -> Self {
        self.suitable_space = px;
        self
    }

    /// Set the gap.
    #[must_use]
    pub fn with_gap(mut self, px: f64) -> Self {
        self.gap = px;
        self
    }

    /// Enable or disable size-aware auto-placement.
    #[must_use]
    pub fn with_size_aware(mut self, size_aware: bool) -> Self {
        self.size_aware = size_aware;
        self
    }

    /// Set the positioning strategy.
    #[must_use]
    pub fn with_strategy(mut self, strategy: PositioningStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Set the viewport padding.
    #[must_use]
    pub fn with_viewport_padding(mut self, px: f64) -> Self {
        self.viewport_padding = px;
        self
    }

    /// Check that the geometric parameters are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let usable = |v: f64| v.is_finite() && v >= 0.0;
        if !usable(self.suitable_space) {
            return Err(ConfigError::SuitableSpace(self.suitable_space));
        }
        if !usable(self.gap) {
            return Err(ConfigError::Gap(self.gap));
        }
        if !usable(self.viewport_padding) {
            return Err(ConfigError::ViewportPadding(self.viewport_padding));
        }
        Ok(())
    }
}

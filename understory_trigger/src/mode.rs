// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trigger modes and the gesture classes they listen for.

bitflags::bitflags! {
    /// Gesture classes that drive a tooltip's visibility.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ModeEvents: u8 {
        /// Pointer enter/leave on the trigger and the floating element.
        const HOVER = 0b0000_0001;
        /// Focus/blur on the trigger.
        const FOCUS = 0b0000_0010;
        /// Click on the trigger toggles; outside click and Escape dismiss.
        const CLICK = 0b0000_0100;
    }
}

/// Which gestures show and hide a tooltip.
///
/// Fixed for the lifetime of a binding.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum TriggerMode {
    /// Pointer hover only.
    Hover,
    /// Keyboard focus only.
    Focus,
    /// Hover and focus.
    #[default]
    All,
    /// Click to toggle; stays open until an outside click or Escape.
    Persisted,
}

impl TriggerMode {
    /// The gesture classes this mode listens for.
    pub const fn events(self) -> ModeEvents {
        match self {
            Self::Hover => ModeEvents::HOVER,
            Self::Focus => ModeEvents::FOCUS,
            Self::All => ModeEvents::HOVER.union(ModeEvents::FOCUS),
            Self::Persisted => ModeEvents::CLICK,
        }
    }

    /// Whether the trigger should also carry a declarative popover target.
    ///
    /// Modes whose show/hide is fully managed by event handlers must not,
    /// since the browser's own toggle would race with them.
    pub const fn uses_popover_target(self) -> bool {
        !matches!(self, Self::Focus | Self::Persisted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_combines_hover_and_focus() {
        let events = TriggerMode::All.events();
        assert!(events.contains(ModeEvents::HOVER | ModeEvents::FOCUS));
        assert!(!events.contains(ModeEvents::CLICK));
    }

    #[test]
    fn handler_managed_modes_skip_popover_target() {
        assert!(TriggerMode::Hover.uses_popover_target());
        assert!(TriggerMode::All.uses_popover_target());
        assert!(!TriggerMode::Focus.uses_popover_target());
        assert!(!TriggerMode::Persisted.uses_popover_target());
    }
}

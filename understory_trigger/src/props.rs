// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Attributes a trigger element must carry.

use alloc::format;
use alloc::string::String;

use crate::id::TooltipId;
use crate::mode::TriggerMode;

/// Attribute marking an element as the trigger for a tooltip id.
pub const TRIGGER_MARKER_ATTR: &str = "data-tooltip-trigger";

/// Declarative popover target attribute understood by the browser.
pub const POPOVER_TARGET_ATTR: &str = "popovertarget";

/// Style property naming the trigger as a CSS anchor.
pub const ANCHOR_NAME_PROPERTY: &str = "anchor-name";

/// The attribute set to spread onto a trigger element.
///
/// Built by [`make_trigger_props`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TriggerProps {
    /// Value of [`TRIGGER_MARKER_ATTR`], used by trigger discovery.
    pub marker: TooltipId,
    /// Value of the [`ANCHOR_NAME_PROPERTY`] style property (`--<id>`).
    pub anchor_name: String,
    /// Value of [`POPOVER_TARGET_ATTR`], absent for handler-managed modes.
    pub popover_target: Option<TooltipId>,
}

impl TriggerProps {
    /// Attribute name/value pairs, marker first.
    pub fn attributes(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        core::iter::once((TRIGGER_MARKER_ATTR, self.marker.as_str())).chain(
            self.popover_target
                .as_ref()
                .map(|target| (POPOVER_TARGET_ATTR, target.as_str())),
        )
    }

    /// The inline style declaration, e.g. `anchor-name: --save-hint`.
    pub fn style(&self) -> String {
        format!("{ANCHOR_NAME_PROPERTY}: {}", self.anchor_name)
    }
}

/// Build the attributes a trigger for `id` must carry in `mode`.
///
/// ```
/// use understory_trigger::{TooltipId, TriggerMode, make_trigger_props};
///
/// let id = TooltipId::new("save-hint").unwrap();
///
/// let hover = make_trigger_props(&id, TriggerMode::Hover);
/// let attrs: Vec<_> = hover.attributes().collect();
/// assert_eq!(attrs, [("data-tooltip-trigger", "save-hint"), ("popovertarget", "save-hint")]);
/// assert_eq!(hover.style(), "anchor-name: --save-hint");
///
/// // Focus-driven tooltips are managed by handlers alone.
/// let focus = make_trigger_props(&id, TriggerMode::Focus);
/// assert!(focus.popover_target.is_none());
/// ```
pub fn make_trigger_props(id: &TooltipId, mode: TriggerMode) -> TriggerProps {
    TriggerProps {
        marker: id.clone(),
        anchor_name: id.anchor_name(),
        popover_target: mode.uses_popover_target().then(|| id.clone()),
    }
}

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_trigger --heading-base-level=0

//! Understory Trigger: pairing a floating element with the element that opens it.
//!
//! A tooltip is two elements sharing a [`TooltipId`]: the trigger the user
//! points at, focuses, or clicks, and the floating element that appears next
//! to it. This crate covers how the two find each other.
//!
//! - [`make_trigger_props`] builds the attributes a trigger must carry: the
//!   [`TRIGGER_MARKER_ATTR`] marker, the `anchor-name: --<id>` style, and a
//!   declarative popover target for modes that want one.
//! - [`find_trigger`] walks upward from the floating element over any
//!   [`DocumentTree`], searching each ancestor's subtree for the marker, and
//!   stops at the body.
//! - [`TooltipRegistry`] is the explicit alternative: both sides register
//!   under their id and a lookup returns the pair once both are present.
//!
//! [`Document`] is a small arena-backed [`DocumentTree`] for hosts without a
//! DOM, and for tests.
//!
//! ```
//! use understory_trigger::{Document, TooltipId, TriggerMode, find_trigger, make_trigger_props};
//!
//! let mut doc = Document::new();
//! let card = doc.create_element(Some(doc.body()));
//! let toolbar = doc.create_element(Some(card));
//! let button = doc.create_element(Some(toolbar));
//! let tooltip = doc.create_element(Some(card));
//!
//! let id = TooltipId::new("delete-hint").unwrap();
//! let props = make_trigger_props(&id, TriggerMode::All);
//! doc.apply_trigger_props(button, &props);
//!
//! // The trigger is not a sibling; the walk finds it through `card`.
//! assert_eq!(find_trigger(&doc, tooltip, &id), Some(button));
//! ```
//!
//! ## Features
//!
//! - `tracing`: emit `tracing` events when discovery fails and on registration.
//! - `serde`: `Serialize`/`Deserialize` for [`TooltipId`] and [`TriggerMode`].
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod document;
mod id;
mod locate;
mod mode;
mod props;
mod registry;

pub use document::{Document, ElementId};
pub use id::{InvalidTooltipId, TooltipId};
pub use locate::{DocumentTree, find_trigger};
pub use mode::{ModeEvents, TriggerMode};
pub use props::{
    ANCHOR_NAME_PROPERTY, POPOVER_TARGET_ATTR, TRIGGER_MARKER_ATTR, TriggerProps,
    make_trigger_props,
};
pub use registry::{Lookup, RegistryError, Role, TooltipPair, TooltipRegistry};

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_tooltip --heading-base-level=0

//! Understory Tooltip: a headless tooltip controller.
//!
//! This crate decides *when* a floating element is shown next to its trigger,
//! and hands off to [`understory_placement`] for *where*. It is
//! platform-agnostic: the document, the popover primitive, and event
//! listeners are reached through the [`PopoverHost`] and [`ListenerRegistry`]
//! traits, and time is passed in explicitly.
//!
//! ## Pieces
//!
//! - [`TooltipController`]: an explicit state machine
//!   ([`ControllerState`]) with a two-frame measured show, an immediate or
//!   deferred hide, and at most one pending hide at any time.
//! - [`TooltipBinding`]: owns a controller and the listeners that drive it for
//!   a [`TriggerMode`](understory_trigger::TriggerMode). Install and remove
//!   them with [`attach`](TooltipBinding::attach) and
//!   [`detach`](TooltipBinding::detach).
//! - [`TooltipConfig`]: placement, mode, grace period, and positioning knobs.
//! - [`MemoryHost`] and [`ListenerTable`]: in-memory implementations of the
//!   host traits for tests, simulations, and custom renderers.
//!
//! ## Example
//!
//! ```
//! use kurbo::{Rect, Size};
//! use understory_tooltip::{
//!     EventKind, ListenerTable, ListenerTarget, MemoryHost, PopoverHost, TooltipBinding, TooltipConfig,
//!     TooltipEvent,
//! };
//! use understory_trigger::{TooltipId, TriggerMode, make_trigger_props};
//!
//! let mut host = MemoryHost::new(Size::new(800.0, 600.0));
//! let body = host.document.body();
//! let button = host.document.create_element(Some(body));
//! let tooltip = host.document.create_element(Some(body));
//! host.set_rect(button, Rect::new(20.0, 20.0, 120.0, 50.0));
//!
//! let id = TooltipId::new("save").unwrap();
//! host.document.apply_trigger_props(button, &make_trigger_props(&id, TriggerMode::Focus));
//!
//! let config = TooltipConfig::default().with_trigger_mode(TriggerMode::Focus);
//! let mut listeners = ListenerTable::new();
//! let mut binding = TooltipBinding::locate(&host.document, tooltip, &id, config).unwrap();
//! binding.attach(&mut listeners);
//!
//! let target = ListenerTarget::Element(button);
//! for handle in listeners.listeners_for(target, EventKind::Focus) {
//!     binding.handle_event(handle, TooltipEvent::Focus, 0, &mut host);
//! }
//! while binding.needs_animation_frame() {
//!     binding.on_animation_frame(&mut host);
//! }
//! assert!(host.is_popover_open(tooltip));
//!
//! for handle in listeners.listeners_for(target, EventKind::Blur) {
//!     binding.handle_event(handle, TooltipEvent::Blur, 16, &mut host);
//! }
//! assert!(!host.is_popover_open(tooltip));
//!
//! binding.unmount(&mut listeners);
//! ```
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for `kurbo`.
//! - `libm`: `no_std` builds relying on `libm` for floating-point math.
//! - `tracing`: emit `tracing` events for dropped work and state transitions.
//! - `serde`: `Serialize`/`Deserialize` for [`TooltipConfig`].
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod binder;
mod config;
mod controller;
mod host;
mod listeners;
mod memory;

pub use binder::TooltipBinding;
pub use config::{ConfigError, DEFAULT_GRACE_PERIOD_MS, PositioningStrategy, TooltipConfig};
pub use controller::{ControllerState, MEASURE_FRAMES, TooltipController};
pub use host::PopoverHost;
pub use listeners::{
    EventKind, Key, ListenerHandle, ListenerRegistry, ListenerTable, ListenerTarget, TooltipEvent,
};
pub use memory::MemoryHost;

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hover, focus, and click-to-pin tooltips driven by a simulated event loop.
//!
//! This example shows how to combine:
//! - `understory_trigger` for trigger attributes and trigger discovery,
//! - `understory_tooltip` for the show/hide controller and listener wiring,
//! - `understory_placement` for auto-placement near the viewport edges.
//!
//! The "browser" is a `MemoryHost` plus a `ListenerTable`; the loop below
//! delivers events, animation frames, and timer ticks the way a real host would.
//!
//! Run:
//! - `cargo run -p understory_demos --example tooltip_hover`

use kurbo::{Rect, Size};
use understory_placement::{SUITABLE_SPACE, compute_placement};
use understory_tooltip::{
    Key, ListenerTable, ListenerTarget, MemoryHost, PopoverHost, PositioningStrategy,
    TooltipBinding, TooltipConfig, TooltipEvent,
};
use understory_trigger::{ElementId, TooltipId, TriggerMode, make_trigger_props};

/// Frame interval of the simulated display.
const FRAME_MS: u64 = 16;

struct Page {
    host: MemoryHost,
    listeners: ListenerTable<ElementId>,
    bindings: Vec<TooltipBinding<ElementId>>,
    now: u64,
}

impl Page {
    /// Offer an event on `target` to every binding that listens for it.
    fn dispatch(&mut self, target: ListenerTarget<ElementId>, event: TooltipEvent<ElementId>) {
        for handle in self.listeners.listeners_for(target, event.kind()) {
            for binding in &mut self.bindings {
                if binding.handle_event(handle, event, self.now, &mut self.host) {
                    break;
                }
            }
        }
    }

    /// Advance time by `ms`, delivering frames and firing due hides.
    fn advance(&mut self, ms: u64) {
        let end = self.now + ms;
        while self.now < end {
            self.now = (self.now + FRAME_MS).min(end);
            for binding in &mut self.bindings {
                if binding.needs_animation_frame() {
                    binding.on_animation_frame(&mut self.host);
                }
                binding.poll(self.now, &mut self.host);
            }
        }
    }

    fn report(&self, label: &str) {
        println!("t={:>5}ms  {label}", self.now);
        for binding in &self.bindings {
            let floating = binding.controller().floating();
            let open = self.host.is_popover_open(floating);
            let placement = self
                .host
                .placement_of(floating)
                .map_or("-", |p| p.as_str());
            println!(
                "           {:<12} open={open:<5} placement={placement:<12} state={:?}",
                binding.id().as_str(),
                binding.controller().state(),
            );
        }
    }
}

/// Create a trigger/tooltip pair under `parent` and mark the trigger for `mode`.
fn mount(
    host: &mut MemoryHost,
    parent: ElementId,
    id: &TooltipId,
    mode: TriggerMode,
    rect: Rect,
) -> (ElementId, ElementId) {
    let trigger = host.document.create_element(Some(parent));
    let floating = host.document.create_element(Some(parent));
    host.document
        .apply_trigger_props(trigger, &make_trigger_props(id, mode));
    host.set_rect(trigger, rect);
    host.set_rect(floating, Rect::new(0.0, 0.0, 160.0, 32.0));
    host.make_popover(floating);
    (trigger, floating)
}

fn main() {
    let viewport = Size::new(1024.0, 768.0);
    let mut host = MemoryHost::new(viewport);
    let body = host.document.body();
    let toolbar = host.document.create_element(Some(body));
    let footer = host.document.create_element(Some(body));

    let save = TooltipId::new("save").unwrap();
    let status = TooltipId::new("status").unwrap();
    let details = TooltipId::new("details").unwrap();

    let save_rect = Rect::new(16.0, 8.0, 96.0, 40.0);
    let status_rect = Rect::new(880.0, 736.0, 1008.0, 760.0);
    let (save_trigger, save_tip) = mount(&mut host, toolbar, &save, TriggerMode::All, save_rect);
    let (status_trigger, status_tip) =
        mount(&mut host, footer, &status, TriggerMode::Hover, status_rect);
    let (details_trigger, details_tip) = mount(
        &mut host,
        toolbar,
        &details,
        TriggerMode::Persisted,
        Rect::new(112.0, 8.0, 192.0, 40.0),
    );

    println!(
        "auto placement: save -> {}, status -> {}",
        compute_placement(save_rect, viewport, SUITABLE_SPACE),
        compute_placement(status_rect, viewport, SUITABLE_SPACE),
    );

    let mut listeners = ListenerTable::new();
    let mut bindings = Vec::new();
    for (id, floating, mode) in [
        (&save, save_tip, TriggerMode::All),
        (&status, status_tip, TriggerMode::Hover),
        (&details, details_tip, TriggerMode::Persisted),
    ] {
        let config = TooltipConfig::default()
            .with_trigger_mode(mode)
            .with_strategy(PositioningStrategy::Fixed);
        match TooltipBinding::locate(&host.document, floating, id, config) {
            Some(mut binding) => {
                binding.attach(&mut listeners);
                bindings.push(binding);
            }
            None => println!("{id}: no trigger found, tooltip is inert"),
        }
    }

    let mut page = Page {
        host,
        listeners,
        bindings,
        now: 0,
    };
    page.report("mounted");

    // Hover the save button, then move onto its tooltip within the grace period.
    page.dispatch(ListenerTarget::Element(save_trigger), TooltipEvent::PointerEnter);
    page.advance(40);
    page.report("pointer over save");
    page.dispatch(ListenerTarget::Element(save_trigger), TooltipEvent::PointerLeave);
    page.advance(48);
    page.report("left save, grace period running");
    page.advance(80);
    page.report("grace period elapsed");

    // The status trigger sits in the bottom-right corner; the tooltip flips above it.
    page.dispatch(ListenerTarget::Element(status_trigger), TooltipEvent::PointerEnter);
    page.advance(40);
    page.report("pointer over status");
    page.dispatch(ListenerTarget::Element(status_trigger), TooltipEvent::PointerLeave);
    page.advance(200);

    // Click to pin, then dismiss with Escape.
    let click = TooltipEvent::Click {
        target: details_trigger,
    };
    page.dispatch(ListenerTarget::Element(details_trigger), click);
    page.dispatch(ListenerTarget::Document, click);
    page.advance(40);
    page.report("details pinned");
    page.dispatch(
        ListenerTarget::Document,
        TooltipEvent::KeyDown { key: Key::Escape },
    );
    page.report("escape pressed");

    for binding in &mut page.bindings {
        binding.unmount(&mut page.listeners);
    }
    println!("unmounted, {} listeners left", page.listeners.len());
}

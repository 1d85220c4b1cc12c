// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Wiring gestures to a controller.
//!
//! A [`TooltipBinding`] is what a host keeps per mounted tooltip: the
//! controller plus the handles of the listeners it installed. Mounting is
//! [`locate`](TooltipBinding::locate) or [`from_registry`](TooltipBinding::from_registry)
//! followed by [`attach`](TooltipBinding::attach); unmounting is
//! [`unmount`](TooltipBinding::unmount).
//!
//! Which listeners are installed depends on the [`TriggerMode`]:
//!
//! | Mode        | Target   | Event          | Action                    |
//! |-------------|----------|----------------|---------------------------|
//! | hover, all  | trigger  | pointer enter  | show                      |
//! | hover, all  | trigger  | pointer leave  | hide after grace period   |
//! | hover, all  | floating | pointer enter  | cancel hide               |
//! | hover, all  | floating | pointer leave  | hide after grace period   |
//! | focus, all  | trigger  | focus          | show                      |
//! | focus, all  | trigger  | blur           | hide now                  |
//! | persisted   | trigger  | click          | toggle                    |
//! | persisted   | document | click outside  | hide now                  |
//! | persisted   | document | Escape         | hide now                  |

use smallvec::SmallVec;
use understory_trigger::{
    DocumentTree, ModeEvents, TooltipId, TooltipRegistry, TriggerMode, find_trigger,
};

use crate::config::TooltipConfig;
use crate::controller::{ControllerState, TooltipController};
use crate::host::PopoverHost;
use crate::listeners::{
    EventKind, Key, ListenerHandle, ListenerRegistry, ListenerTarget, TooltipEvent,
};

/// What an installed listener is for.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Listener {
    TriggerEnter,
    TriggerLeave,
    FloatingEnter,
    FloatingLeave,
    TriggerFocus,
    TriggerBlur,
    TriggerClick,
    DocumentClick,
    DocumentKeyDown,
}

impl Listener {
    const HOVER: [Self; 4] = [
        Self::TriggerEnter,
        Self::TriggerLeave,
        Self::FloatingEnter,
        Self::FloatingLeave,
    ];
    const FOCUS: [Self; 2] = [Self::TriggerFocus, Self::TriggerBlur];
    const CLICK: [Self; 3] = [Self::TriggerClick, Self::DocumentClick, Self::DocumentKeyDown];

    fn install<K: Copy>(self, trigger: K, floating: K) -> (ListenerTarget<K>, EventKind) {
        use ListenerTarget::{Document, Element};
        match self {
            Self::TriggerEnter => (Element(trigger), EventKind::PointerEnter),
            Self::TriggerLeave => (Element(trigger), EventKind::PointerLeave),
            Self::FloatingEnter => (Element(floating), EventKind::PointerEnter),
            Self::FloatingLeave => (Element(floating), EventKind::PointerLeave),
            Self::TriggerFocus => (Element(trigger), EventKind::Focus),
            Self::TriggerBlur => (Element(trigger), EventKind::Blur),
            Self::TriggerClick => (Element(trigger), EventKind::Click),
            Self::DocumentClick => (Document, EventKind::Click),
            Self::DocumentKeyDown => (Document, EventKind::KeyDown),
        }
    }
}

/// A mounted tooltip: one controller and the listeners driving it.
#[derive(Clone, Debug)]
pub struct TooltipBinding<K> {
    id: TooltipId,
    controller: TooltipController<K>,
    attached: SmallVec<[(ListenerHandle, Listener); 6]>,
}

impl<K: Copy + Eq> TooltipBinding<K> {
    /// Bind an already resolved trigger/floating pair.
    pub fn new(id: TooltipId, trigger: K, floating: K, config: TooltipConfig) -> Self {
        Self {
            id,
            controller: TooltipController::new(floating, trigger, config),
            attached: SmallVec::new(),
        }
    }

    /// Find the trigger for `floating` by walking `tree`, then bind.
    ///
    /// Returns `None` when no trigger carries `id`; the tooltip is then inert.
    pub fn locate<D>(tree: &D, floating: K, id: &TooltipId, config: TooltipConfig) -> Option<Self>
    where
        D: DocumentTree<Element = K>,
    {
        let trigger = find_trigger(tree, floating, id)?;
        Some(Self::new(id.clone(), trigger, floating, config))
    }

    /// Look up both sides of `id` in `registry`, then bind.
    ///
    /// Returns `None` until both sides have registered.
    pub fn from_registry(
        registry: &TooltipRegistry<K>,
        id: &TooltipId,
        config: TooltipConfig,
    ) -> Option<Self> {
        let Some(pair) = registry.lookup(id).ready() else {
            #[cfg(feature = "tracing")]
            tracing::debug!(id = id.as_str(), "tooltip pair not registered yet");
            return None;
        };
        Some(Self::new(id.clone(), pair.trigger, pair.floating, config))
    }

    /// The tooltip id.
    pub fn id(&self) -> &TooltipId {
        &self.id
    }

    /// The trigger mode.
    pub fn mode(&self) -> TriggerMode {
        self.controller.config().trigger_mode
    }

    /// The controller.
    pub fn controller(&self) -> &TooltipController<K> {
        &self.controller
    }

    /// Mutable access to the controller, for programmatic show/hide.
    pub fn controller_mut(&mut self) -> &mut TooltipController<K> {
        &mut self.controller
    }

    /// Whether listeners are currently installed.
    pub fn is_attached(&self) -> bool {
        !self.attached.is_empty()
    }

    /// Install the listeners for this binding's mode.
    ///
    /// Attaching an already attached binding does nothing.
    pub fn attach<L: ListenerRegistry<K>>(&mut self, listeners: &mut L) {
        if self.is_attached() || self.controller.is_disposed() {
            return;
        }
        let trigger = self.controller.trigger();
        let floating = self.controller.floating();
        let events = self.mode().events();
        let groups: [(ModeEvents, &[Listener]); 3] = [
            (ModeEvents::HOVER, &Listener::HOVER),
            (ModeEvents::FOCUS, &Listener::FOCUS),
            (ModeEvents::CLICK, &Listener::CLICK),
        ];
        for (class, group) in groups {
            if !events.contains(class) {
                continue;
            }
            for &listener in group {
                let (target, kind) = listener.install(trigger, floating);
                let handle = listeners.add_listener(target, kind);
                self.attached.push((handle, listener));
            }
        }
        #[cfg(feature = "tracing")]
        tracing::trace!(
            id = self.id.as_str(),
            count = self.attached.len(),
            "tooltip listeners attached"
        );
    }

    /// Remove exactly the listeners [`attach`](Self::attach) installed.
    pub fn detach<L: ListenerRegistry<K>>(&mut self, listeners: &mut L) {
        for (handle, _) in self.attached.drain(..) {
            listeners.remove_listener(handle);
        }
    }

    /// Detach and dispose. The binding is inert afterwards.
    pub fn unmount<L: ListenerRegistry<K>>(&mut self, listeners: &mut L) {
        self.detach(listeners);
        self.controller.dispose();
    }

    /// Deliver `event` to the listener `handle`.
    ///
    /// Returns false if `handle` is not one of this binding's listeners, so a
    /// host can offer every event to every binding.
    pub fn handle_event<H: PopoverHost<K>>(
        &mut self,
        handle: ListenerHandle,
        event: TooltipEvent<K>,
        now: u64,
        host: &mut H,
    ) -> bool {
        let Some(&(_, listener)) = self.attached.iter().find(|(h, _)| *h == handle) else {
            return false;
        };
        let grace = self.controller.config().grace_period_ms;
        let c = &mut self.controller;
        match (listener, event) {
            (Listener::TriggerEnter, TooltipEvent::PointerEnter)
            | (Listener::TriggerFocus, TooltipEvent::Focus) => c.show(&*host),
            (Listener::TriggerLeave | Listener::FloatingLeave, TooltipEvent::PointerLeave) => {
                c.hide(grace, now, host);
            }
            (Listener::FloatingEnter, TooltipEvent::PointerEnter) => c.cancel_hide(),
            (Listener::TriggerBlur, TooltipEvent::Blur) => c.hide(0, now, host),
            (Listener::TriggerClick, TooltipEvent::Click { .. }) => c.toggle(now, host),
            (Listener::DocumentClick, TooltipEvent::Click { target }) => {
                let inside =
                    host.contains(c.trigger(), target) || host.contains(c.floating(), target);
                if !inside && Self::dismissable(c, host) {
                    c.hide(0, now, host);
                }
            }
            (Listener::DocumentKeyDown, TooltipEvent::KeyDown { key: Key::Escape }) => {
                if Self::dismissable(c, host) {
                    c.hide(0, now, host);
                }
            }
            _ => return false,
        }
        true
    }

    fn dismissable<H: PopoverHost<K>>(c: &TooltipController<K>, host: &H) -> bool {
        c.is_open(host) || matches!(c.state(), ControllerState::PendingShow { .. })
    }

    /// See [`TooltipController::needs_animation_frame`].
    pub fn needs_animation_frame(&self) -> bool {
        self.controller.needs_animation_frame()
    }

    /// See [`TooltipController::on_animation_frame`].
    pub fn on_animation_frame<H: PopoverHost<K>>(&mut self, host: &mut H) {
        self.controller.on_animation_frame(host);
    }

    /// See [`TooltipController::next_deadline`].
    pub fn next_deadline(&self) -> Option<u64> {
        self.controller.next_deadline()
    }

    /// See [`TooltipController::poll`].
    pub fn poll<H: PopoverHost<K>>(&mut self, now: u64, host: &mut H) {
        self.controller.poll(now, host);
    }

    /// See [`TooltipController::reposition`].
    pub fn reposition<H: PopoverHost<K>>(&mut self, host: &mut H) {
        self.controller.reposition(host);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listeners::ListenerTable;
    use crate::memory::MemoryHost;
    use kurbo::{Rect, Size};
    use understory_trigger::{ElementId, make_trigger_props};

    struct Page {
        host: MemoryHost,
        listeners: ListenerTable<ElementId>,
        trigger: ElementId,
        floating: ElementId,
        elsewhere: ElementId,
        id: TooltipId,
    }

    fn page(mode: TriggerMode) -> Page {
        let mut host = MemoryHost::new(Size::new(1000.0, 800.0));
        let body = host.document.body();
        let wrapper = host.document.create_element(Some(body));
        let trigger = host.document.create_element(Some(wrapper));
        let floating = host.document.create_element(Some(wrapper));
        let elsewhere = host.document.create_element(Some(body));
        let id = TooltipId::new("tip").unwrap();
        host.document
            .apply_trigger_props(trigger, &make_trigger_props(&id, mode));
        host.set_rect(trigger, Rect::new(100.0, 100.0, 200.0, 130.0));
        Page {
            host,
            listeners: ListenerTable::new(),
            trigger,
            floating,
            elsewhere,
            id,
        }
    }

    fn bind(p: &mut Page, mode: TriggerMode) -> TooltipBinding<ElementId> {
        let config = TooltipConfig::default().with_trigger_mode(mode);
        let mut binding =
            TooltipBinding::locate(&p.host.document, p.floating, &p.id, config).unwrap();
        binding.attach(&mut p.listeners);
        binding
    }

    fn fire(
        p: &mut Page,
        b: &mut TooltipBinding<ElementId>,
        target: ListenerTarget<ElementId>,
        event: TooltipEvent<ElementId>,
        now: u64,
    ) {
        for handle in p.listeners.listeners_for(target, event.kind()) {
            b.handle_event(handle, event, now, &mut p.host);
        }
    }

    fn frames(p: &mut Page, b: &mut TooltipBinding<ElementId>) {
        while b.needs_animation_frame() {
            b.on_animation_frame(&mut p.host);
        }
    }

    #[test]
    fn listener_counts_follow_mode() {
        for (mode, count) in [
            (TriggerMode::Hover, 4),
            (TriggerMode::Focus, 2),
            (TriggerMode::All, 6),
            (TriggerMode::Persisted, 3),
        ] {
            let mut p = page(mode);
            bind(&mut p, mode);
            assert_eq!(p.listeners.len(), count, "{mode:?}");
        }
    }

    #[test]
    fn attach_twice_does_not_double_register() {
        let mut p = page(TriggerMode::All);
        let mut b = bind(&mut p, TriggerMode::All);
        b.attach(&mut p.listeners);
        assert_eq!(p.listeners.len(), 6);
    }

    #[test]
    fn detach_removes_only_own_listeners() {
        let mut p = page(TriggerMode::Hover);
        let foreign = p
            .listeners
            .add_listener(ListenerTarget::Element(p.trigger), EventKind::PointerEnter);
        let mut b = bind(&mut p, TriggerMode::Hover);
        b.detach(&mut p.listeners);
        assert!(!b.is_attached());
        assert_eq!(p.listeners.len(), 1);
        assert!(p.listeners.contains(foreign));

        // Reattaching after detach works.
        b.attach(&mut p.listeners);
        assert_eq!(p.listeners.len(), 5);
    }

    #[test]
    fn missing_trigger_is_inert() {
        let mut p = page(TriggerMode::Hover);
        let other = TooltipId::new("other").unwrap();
        assert!(
            TooltipBinding::locate(
                &p.host.document,
                p.floating,
                &other,
                TooltipConfig::default()
            )
            .is_none()
        );
        assert!(p.listeners.is_empty());
        p.host.document.set_trigger_marker(p.trigger, None);
        assert!(
            TooltipBinding::locate(&p.host.document, p.floating, &p.id, TooltipConfig::default())
                .is_none()
        );
    }

    #[test]
    fn hover_shows_and_hides_after_grace() {
        let mut p = page(TriggerMode::Hover);
        let mut b = bind(&mut p, TriggerMode::Hover);
        let trigger = ListenerTarget::Element(p.trigger);
        fire(&mut p, &mut b, trigger, TooltipEvent::PointerEnter, 0);
        frames(&mut p, &mut b);
        assert!(p.host.is_popover_open(p.floating));

        fire(&mut p, &mut b, trigger, TooltipEvent::PointerLeave, 500);
        assert_eq!(b.next_deadline(), Some(600));
        b.poll(599, &mut p.host);
        assert!(p.host.is_popover_open(p.floating));
        b.poll(600, &mut p.host);
        assert!(!p.host.is_popover_open(p.floating));
    }

    #[test]
    fn focus_events_ignored_in_hover_mode() {
        let mut p = page(TriggerMode::Hover);
        let mut b = bind(&mut p, TriggerMode::Hover);
        let trigger = p.trigger;
        fire(
            &mut p,
            &mut b,
            ListenerTarget::Element(trigger),
            TooltipEvent::Focus,
            0,
        );
        assert!(!b.needs_animation_frame());
    }

    #[test]
    fn foreign_handles_are_rejected() {
        let mut p = page(TriggerMode::Focus);
        let mut b = bind(&mut p, TriggerMode::Focus);
        let foreign = p
            .listeners
            .add_listener(ListenerTarget::Element(p.trigger), EventKind::Focus);
        assert!(!b.handle_event(foreign, TooltipEvent::Focus, 0, &mut p.host));
    }

    #[test]
    fn persisted_click_toggles_and_outside_click_dismisses() {
        let mut p = page(TriggerMode::Persisted);
        let mut b = bind(&mut p, TriggerMode::Persisted);
        let click_trigger = TooltipEvent::Click { target: p.trigger };

        let trigger = p.trigger;
        fire(&mut p, &mut b, ListenerTarget::Element(trigger), click_trigger, 0);
        // The same click bubbles to the document; it is inside the trigger.
        fire(&mut p, &mut b, ListenerTarget::Document, click_trigger, 0);
        frames(&mut p, &mut b);
        assert!(p.host.is_popover_open(p.floating));

        // Clicking inside the tooltip keeps it open.
        let inside = TooltipEvent::Click { target: p.floating };
        fire(&mut p, &mut b, ListenerTarget::Document, inside, 10);
        assert!(p.host.is_popover_open(p.floating));

        let outside = TooltipEvent::Click {
            target: p.elsewhere,
        };
        fire(&mut p, &mut b, ListenerTarget::Document, outside, 20);
        assert!(!p.host.is_popover_open(p.floating));
    }

    #[test]
    fn persisted_escape_dismisses() {
        let mut p = page(TriggerMode::Persisted);
        let mut b = bind(&mut p, TriggerMode::Persisted);
        let click = TooltipEvent::Click { target: p.trigger };
        let trigger = p.trigger;
        fire(&mut p, &mut b, ListenerTarget::Element(trigger), click, 0);
        frames(&mut p, &mut b);

        let other_key = TooltipEvent::KeyDown { key: Key::Other };
        fire(&mut p, &mut b, ListenerTarget::Document, other_key, 5);
        assert!(p.host.is_popover_open(p.floating));

        let escape = TooltipEvent::KeyDown { key: Key::Escape };
        fire(&mut p, &mut b, ListenerTarget::Document, escape, 10);
        assert!(!p.host.is_popover_open(p.floating));
        assert_eq!(p.host.hide_calls(), 1);
    }

    #[test]
    fn unmount_detaches_and_disposes() {
        let mut p = page(TriggerMode::All);
        let mut b = bind(&mut p, TriggerMode::All);
        b.unmount(&mut p.listeners);
        assert!(p.listeners.is_empty());
        assert!(b.controller().is_disposed());
        b.attach(&mut p.listeners);
        assert!(p.listeners.is_empty());
    }

    #[test]
    fn registry_mount_waits_for_both_sides() {
        let p = page(TriggerMode::Hover);
        let mut registry = TooltipRegistry::new();
        registry.register_floating(&p.id, p.floating).unwrap();
        assert!(TooltipBinding::from_registry(&registry, &p.id, TooltipConfig::default()).is_none());
        registry.register_trigger(&p.id, p.trigger).unwrap();
        let b = TooltipBinding::from_registry(&registry, &p.id, TooltipConfig::default()).unwrap();
        assert_eq!(b.controller().trigger(), p.trigger);
        assert_eq!(b.controller().floating(), p.floating);
        assert_eq!(b.id(), &p.id);
    }
}

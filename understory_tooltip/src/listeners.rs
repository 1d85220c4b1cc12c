// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Listener registration seam and an in-memory table.

use alloc::vec::Vec;
use hashbrown::HashMap;

/// Opaque handle for one registered listener.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerHandle(pub u64);

/// Where a listener is installed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ListenerTarget<K> {
    /// A single element.
    Element(K),
    /// The whole document (for outside clicks and key presses).
    Document,
}

/// Kinds of events a tooltip listens for.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Pointer entered the target.
    PointerEnter,
    /// Pointer left the target.
    PointerLeave,
    /// Target gained focus.
    Focus,
    /// Target lost focus.
    Blur,
    /// Primary click.
    Click,
    /// Key pressed.
    KeyDown,
}

/// The keys a tooltip cares about.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Escape dismisses a persisted tooltip.
    Escape,
    /// Anything else.
    Other,
}

/// An event delivered to a [`TooltipBinding`](crate::TooltipBinding).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TooltipEvent<K> {
    /// Pointer entered the listener's target.
    PointerEnter,
    /// Pointer left the listener's target.
    PointerLeave,
    /// The listener's target gained focus.
    Focus,
    /// The listener's target lost focus.
    Blur,
    /// A click whose innermost target is `target`.
    Click {
        /// Element that was clicked.
        target: K,
    },
    /// A key press.
    KeyDown {
        /// The key.
        key: Key,
    },
}

impl<K> TooltipEvent<K> {
    /// The listener kind this event is delivered to.
    pub fn kind(&self) -> EventKind {
        match self {
            Self::PointerEnter => EventKind::PointerEnter,
            Self::PointerLeave => EventKind::PointerLeave,
            Self::Focus => EventKind::Focus,
            Self::Blur => EventKind::Blur,
            Self::Click { .. } => EventKind::Click,
            Self::KeyDown { .. } => EventKind::KeyDown,
        }
    }
}

/// Something listeners can be added to and removed from.
///
/// In a browser binding this wraps `addEventListener`/`removeEventListener`
/// and routes fired events back to the binding by handle.
pub trait ListenerRegistry<K> {
    /// Install a listener for `kind` on `target`.
    fn add_listener(&mut self, target: ListenerTarget<K>, kind: EventKind) -> ListenerHandle;

    /// Remove a listener. Unknown handles are ignored.
    fn remove_listener(&mut self, handle: ListenerHandle);
}

/// An in-memory [`ListenerRegistry`].
///
/// Hosts that dispatch events themselves look up which handles should
/// receive an event with [`listeners_for`](Self::listeners_for).
#[derive(Clone, Debug)]
pub struct ListenerTable<K> {
    next: u64,
    listeners: HashMap<ListenerHandle, (ListenerTarget<K>, EventKind)>,
}

impl<K> Default for ListenerTable<K> {
    fn default() -> Self {
        Self {
            next: 0,
            listeners: HashMap::new(),
        }
    }
}

impl<K: Copy + Eq> ListenerTable<K> {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Handles listening for `kind` on `target`, in registration order.
    pub fn listeners_for(&self, target: ListenerTarget<K>, kind: EventKind) -> Vec<ListenerHandle> {
        let mut out: Vec<_> = self
            .listeners
            .iter()
            .filter(|(_, (t, k))| *t == target && *k == kind)
            .map(|(h, _)| *h)
            .collect();
        out.sort_unstable();
        out
    }

    /// Whether `handle` is installed.
    pub fn contains(&self, handle: ListenerHandle) -> bool {
        self.listeners.contains_key(&handle)
    }

    /// Number of installed listeners.
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Whether no listeners are installed.
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl<K: Copy + Eq> ListenerRegistry<K> for ListenerTable<K> {
    fn add_listener(&mut self, target: ListenerTarget<K>, kind: EventKind) -> ListenerHandle {
        let handle = ListenerHandle(self.next);
        self.next += 1;
        self.listeners.insert(handle, (target, kind));
        handle
    }

    fn remove_listener(&mut self, handle: ListenerHandle) {
        self.listeners.remove(&handle);
    }
}

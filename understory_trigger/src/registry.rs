// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Explicit trigger/floating registration.
//!
//! An alternative to the upward walk in [`find_trigger`](crate::find_trigger):
//! both sides register themselves under their [`TooltipId`] when mounted, and
//! a binding looks the pair up once both are present. The registry is a plain
//! value owned by the host (or by whatever scope renders the tooltips), so
//! separate trees can keep separate registries.
//!
//! Unmounting either side drops the whole entry. A side that stays mounted
//! must register again when its partner remounts, so hosts re-register both
//! sides on every mount of either one.

use hashbrown::HashMap;

use crate::id::TooltipId;

/// A resolved trigger/floating pair.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TooltipPair<K> {
    /// The trigger element.
    pub trigger: K,
    /// The floating element.
    pub floating: K,
}

/// Result of [`TooltipRegistry::lookup`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Lookup<K> {
    /// Both sides are registered.
    Ready(TooltipPair<K>),
    /// At most one side is registered so far.
    Pending,
}

impl<K> Lookup<K> {
    /// The pair, if ready.
    pub fn ready(self) -> Option<TooltipPair<K>> {
        match self {
            Self::Ready(pair) => Some(pair),
            Self::Pending => None,
        }
    }
}

/// Which side of a tooltip an element was registered as.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    /// The element the user interacts with.
    Trigger,
    /// The tooltip content element.
    Floating,
}

/// Error returned when registering into an occupied slot.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// A different element is already registered for this id and role.
    #[error("a different {role:?} element is already registered for tooltip `{id}`")]
    Occupied {
        /// The contested id.
        id: TooltipId,
        /// The contested side.
        role: Role,
    },
}

#[derive(Copy, Clone, Debug)]
struct Slots<K> {
    trigger: Option<K>,
    floating: Option<K>,
}

impl<K> Default for Slots<K> {
    fn default() -> Self {
        Self {
            trigger: None,
            floating: None,
        }
    }
}

/// Map from [`TooltipId`] to its registered trigger and floating elements.
///
/// ```
/// use understory_trigger::{Lookup, TooltipId, TooltipRegistry};
///
/// let id = TooltipId::new("hint").unwrap();
/// let mut registry = TooltipRegistry::new();
/// registry.register_floating(&id, 2_u32).unwrap();
/// assert_eq!(registry.lookup(&id), Lookup::Pending);
///
/// registry.register_trigger(&id, 1).unwrap();
/// let pair = registry.lookup(&id).ready().unwrap();
/// assert_eq!((pair.trigger, pair.floating), (1, 2));
/// ```
#[derive(Clone, Debug)]
pub struct TooltipRegistry<K> {
    entries: HashMap<TooltipId, Slots<K>>,
}

impl<K> Default for TooltipRegistry<K> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<K: Copy + Eq> TooltipRegistry<K> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `el` as the trigger for `id`.
    pub fn register_trigger(&mut self, id: &TooltipId, el: K) -> Result<(), RegistryError> {
        self.register(id, Role::Trigger, el)
    }

    /// Register `el` as the floating element for `id`.
    pub fn register_floating(&mut self, id: &TooltipId, el: K) -> Result<(), RegistryError> {
        self.register(id, Role::Floating, el)
    }

    fn register(&mut self, id: &TooltipId, role: Role, el: K) -> Result<(), RegistryError> {
        let slots = self.entries.entry(id.clone()).or_default();
        let slot = match role {
            Role::Trigger => &mut slots.trigger,
            Role::Floating => &mut slots.floating,
        };
        match *slot {
            Some(existing) if existing != el => Err(RegistryError::Occupied {
                id: id.clone(),
                role,
            }),
            Some(_) => Ok(()),
            None => {
                *slot = Some(el);
                #[cfg(feature = "tracing")]
                tracing::trace!(id = id.as_str(), ?role, "tooltip element registered");
                Ok(())
            }
        }
    }

    /// Unregister the trigger for `id`, dropping the whole entry.
    ///
    /// The floating element's registration goes with it and must be repeated.
    pub fn unregister_trigger(&mut self, id: &TooltipId) {
        self.entries.remove(id.as_str());
    }

    /// Unregister the floating element for `id`, dropping the whole entry.
    ///
    /// The trigger's registration goes with it and must be repeated.
    pub fn unregister_floating(&mut self, id: &TooltipId) {
        self.entries.remove(id.as_str());
    }

    /// Look up the pair for `id`.
    pub fn lookup(&self, id: &TooltipId) -> Lookup<K> {
        match self.entries.get(id.as_str()) {
            Some(Slots {
                trigger: Some(trigger),
                floating: Some(floating),
            }) => Lookup::Ready(TooltipPair {
                trigger: *trigger,
                floating: *floating,
            }),
            _ => Lookup::Pending,
        }
    }

    /// Number of ids with at least one registered side.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A minimal in-memory document for hosts without a DOM, and for tests.

use alloc::vec::Vec;

use crate::id::TooltipId;
use crate::locate::DocumentTree;
use crate::props::TriggerProps;

/// Identifier for an element in a [`Document`] (generational).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ElementId(u32, u32);

impl ElementId {
    const fn idx(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Debug)]
struct Element {
    generation: u32,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    marker: Option<TooltipId>,
}

/// An element tree with an `html` root and a `body`.
///
/// Elements are either connected (reachable from the root), detached (alive
/// but without a path to the root), or removed (their [`ElementId`] is
/// stale). Trigger discovery and stale-element checks only need this much.
///
/// ```
/// use understory_trigger::{Document, TooltipId, TriggerMode, find_trigger, make_trigger_props};
///
/// let mut doc = Document::new();
/// let row = doc.create_element(Some(doc.body()));
/// let button = doc.create_element(Some(row));
/// let tooltip = doc.create_element(Some(row));
///
/// let id = TooltipId::new("hint").unwrap();
/// doc.apply_trigger_props(button, &make_trigger_props(&id, TriggerMode::Hover));
///
/// assert_eq!(find_trigger(&doc, tooltip, &id), Some(button));
/// ```
#[derive(Clone, Debug)]
pub struct Document {
    /// slots
    elements: Vec<Option<Element>>,
    /// last generation per slot (persists across frees)
    generations: Vec<u32>,
    free_list: Vec<usize>,
    root: ElementId,
    body: ElementId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create a document containing only `html` and `body`.
    pub fn new() -> Self {
        let mut doc = Self {
            elements: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            root: ElementId(0, 0),
            body: ElementId(0, 0),
        };
        doc.root = doc.create_element(None);
        doc.body = doc.create_element(Some(doc.root));
        doc
    }

    /// The `html` root.
    pub fn root(&self) -> ElementId {
        self.root
    }

    /// The `body` element.
    pub fn body(&self) -> ElementId {
        self.body
    }

    /// Create an element, appended to `parent` if given, detached otherwise.
    pub fn create_element(&mut self, parent: Option<ElementId>) -> ElementId {
        let element = |generation| Element {
            generation,
            parent: None,
            children: Vec::new(),
            marker: None,
        };
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.elements[idx] = Some(element(generation));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "ElementId indices are 32-bit."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.elements.push(Some(element(generation)));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "ElementId indices are 32-bit."
            )]
            ((self.elements.len() - 1) as u32, generation)
        };
        let id = ElementId(idx, generation);
        if let Some(p) = parent {
            self.append_child(p, id);
        }
        id
    }

    /// Returns true if `id` refers to an element that has not been removed.
    pub fn is_alive(&self, id: ElementId) -> bool {
        self.element(id).is_some()
    }

    /// Returns true if `id` is alive and reachable from the root.
    pub fn is_connected(&self, id: ElementId) -> bool {
        let mut cur = id;
        loop {
            if cur == self.root {
                return self.is_alive(cur);
            }
            match self.element(cur).and_then(|e| e.parent) {
                Some(parent) => cur = parent,
                None => return false,
            }
        }
    }

    /// Returns true if `node` is `ancestor` or one of its descendants.
    pub fn contains(&self, ancestor: ElementId, node: ElementId) -> bool {
        let mut cur = Some(node);
        while let Some(el) = cur {
            if el == ancestor {
                return self.is_alive(el);
            }
            cur = self.element(el).and_then(|e| e.parent);
        }
        false
    }

    /// Move `child` to the end of `parent`'s children.
    ///
    /// Does nothing if either element is stale or if the move would create a cycle.
    pub fn append_child(&mut self, parent: ElementId, child: ElementId) {
        if !self.is_alive(parent) || !self.is_alive(child) || self.contains(child, parent) {
            return;
        }
        self.detach(child);
        if let Some(p) = self.element_mut(parent) {
            p.children.push(child);
        }
        if let Some(c) = self.element_mut(child) {
            c.parent = Some(parent);
        }
    }

    /// Unlink `id` (and its subtree) from its parent without destroying it.
    pub fn detach(&mut self, id: ElementId) {
        let Some(parent) = self.element(id).and_then(|e| e.parent) else {
            return;
        };
        if let Some(p) = self.element_mut(parent) {
            p.children.retain(|c| *c != id);
        }
        if let Some(e) = self.element_mut(id) {
            e.parent = None;
        }
    }

    /// Remove an element and its subtree; their ids become stale.
    ///
    /// The root and body cannot be removed.
    pub fn remove(&mut self, id: ElementId) {
        if id == self.root || id == self.body || !self.is_alive(id) {
            return;
        }
        self.detach(id);
        self.free_subtree(id);
    }

    fn free_subtree(&mut self, id: ElementId) {
        let Some(element) = self.elements[id.idx()].take() else {
            return;
        };
        self.free_list.push(id.idx());
        for child in element.children {
            self.free_subtree(child);
        }
    }

    /// Children of `id` in document order, or an empty slice if stale.
    pub fn children_of(&self, id: ElementId) -> &[ElementId] {
        self.element(id).map_or(&[], |e| &e.children)
    }

    /// Set or clear the trigger marker on `id`.
    pub fn set_trigger_marker(&mut self, id: ElementId, marker: Option<TooltipId>) {
        if let Some(e) = self.element_mut(id) {
            e.marker = marker;
        }
    }

    /// Apply the marker from a [`TriggerProps`] to `id`.
    pub fn apply_trigger_props(&mut self, id: ElementId, props: &TriggerProps) {
        self.set_trigger_marker(id, Some(props.marker.clone()));
    }

    fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements
            .get(id.idx())?
            .as_ref()
            .filter(|e| e.generation == id.1)
    }

    fn element_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        let e = self.elements.get_mut(id.idx())?.as_mut()?;
        if e.generation != id.1 {
            return None;
        }
        Some(e)
    }
}

impl DocumentTree for Document {
    type Element = ElementId;

    fn parent(&self, el: ElementId) -> Option<ElementId> {
        self.element(el)?.parent
    }

    fn first_child(&self, el: ElementId) -> Option<ElementId> {
        self.element(el)?.children.first().copied()
    }

    fn next_sibling(&self, el: ElementId) -> Option<ElementId> {
        let parent = self.parent(el)?;
        let siblings = self.children_of(parent);
        let pos = siblings.iter().position(|&c| c == el)?;
        siblings.get(pos + 1).copied()
    }

    fn trigger_marker(&self, el: ElementId) -> Option<&str> {
        self.element(el)?.marker.as_ref().map(TooltipId::as_str)
    }

    fn is_body(&self, el: ElementId) -> bool {
        el == self.body
    }
}

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! An in-memory [`PopoverHost`] over a [`Document`].

use hashbrown::{HashMap, HashSet};
use kurbo::{Point, Rect, Size};
use understory_placement::Placement;
use understory_trigger::{Document, ElementId};

use crate::host::PopoverHost;

/// A [`PopoverHost`] backed by a [`Document`] and explicitly assigned layout.
///
/// Layout is whatever the caller says it is: [`set_rect`](Self::set_rect)
/// assigns a bounding rectangle, and hidden popovers report no rectangle, as
/// a closed popover has no box in a browser. Show and hide calls are counted
/// so callers can check that toggles happen exactly once.
#[derive(Clone, Debug)]
pub struct MemoryHost {
    /// The element tree.
    pub document: Document,
    viewport: Size,
    rects: HashMap<ElementId, Rect>,
    popovers: HashSet<ElementId>,
    open: HashSet<ElementId>,
    placements: HashMap<ElementId, Placement>,
    positions: HashMap<ElementId, Point>,
    show_calls: usize,
    hide_calls: usize,
}

impl MemoryHost {
    /// Create a host with an empty document and the given viewport.
    pub fn new(viewport: Size) -> Self {
        Self {
            document: Document::new(),
            viewport,
            rects: HashMap::new(),
            popovers: HashSet::new(),
            open: HashSet::new(),
            placements: HashMap::new(),
            positions: HashMap::new(),
            show_calls: 0,
            hide_calls: 0,
        }
    }

    /// Resize the viewport.
    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
    }

    /// Assign the layout rectangle of `el`.
    pub fn set_rect(&mut self, el: ElementId, rect: Rect) {
        self.rects.insert(el, rect);
    }

    /// Mark `el` as a popover: it only has a box while open.
    pub fn make_popover(&mut self, el: ElementId) {
        self.popovers.insert(el);
    }

    /// Last placement written to `el`.
    pub fn placement_of(&self, el: ElementId) -> Option<Placement> {
        self.placements.get(&el).copied()
    }

    /// Last position written to `el`.
    pub fn position_of(&self, el: ElementId) -> Option<Point> {
        self.positions.get(&el).copied()
    }

    /// Number of [`show_popover`](PopoverHost::show_popover) calls so far.
    pub fn show_calls(&self) -> usize {
        self.show_calls
    }

    /// Number of [`hide_popover`](PopoverHost::hide_popover) calls so far.
    pub fn hide_calls(&self) -> usize {
        self.hide_calls
    }
}

impl PopoverHost<ElementId> for MemoryHost {
    fn is_connected(&self, el: ElementId) -> bool {
        self.document.is_connected(el)
    }

    fn bounding_rect(&self, el: ElementId) -> Option<Rect> {
        if !self.document.is_connected(el) {
            return None;
        }
        if self.popovers.contains(&el) && !self.open.contains(&el) {
            return None;
        }
        let rect = self.rects.get(&el).copied()?;
        match self.positions.get(&el) {
            Some(origin) => Some(rect.with_origin(*origin)),
            None => Some(rect),
        }
    }

    fn viewport(&self) -> Size {
        self.viewport
    }

    fn is_popover_open(&self, el: ElementId) -> bool {
        self.open.contains(&el)
    }

    fn show_popover(&mut self, el: ElementId) {
        self.show_calls += 1;
        self.open.insert(el);
    }

    fn hide_popover(&mut self, el: ElementId) {
        self.hide_calls += 1;
        self.open.remove(&el);
    }

    fn set_placement(&mut self, el: ElementId, placement: Placement) {
        self.placements.insert(el, placement);
    }

    fn set_position(&mut self, el: ElementId, origin: Point) {
        self.positions.insert(el, origin);
    }

    fn contains(&self, ancestor: ElementId, node: ElementId) -> bool {
        self.document.contains(ancestor, node)
    }
}

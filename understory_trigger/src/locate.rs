// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trigger discovery by bounded upward walk.

use crate::id::TooltipId;

/// Read-only view of a document tree, as needed for trigger discovery.
///
/// Implement this for your DOM binding or scene graph. The element handle
/// should be a small copyable key.
pub trait DocumentTree {
    /// Handle of an element in the tree.
    type Element: Copy + Eq;

    /// Parent of `el`, or `None` for the root and for detached elements.
    fn parent(&self, el: Self::Element) -> Option<Self::Element>;

    /// First child of `el` in document order.
    fn first_child(&self, el: Self::Element) -> Option<Self::Element>;

    /// Next sibling of `el` in document order.
    fn next_sibling(&self, el: Self::Element) -> Option<Self::Element>;

    /// Value of the trigger marker attribute on `el`, if any.
    fn trigger_marker(&self, el: Self::Element) -> Option<&str>;

    /// Whether `el` is the document body.
    fn is_body(&self, el: Self::Element) -> bool;

    /// First descendant of `scope` (in document order, `scope` excluded) whose
    /// trigger marker equals `id`.
    fn find_marked_descendant(&self, scope: Self::Element, id: &str) -> Option<Self::Element> {
        let mut next = self.first_child(scope);
        while let Some(el) = next {
            if self.trigger_marker(el) == Some(id) {
                return Some(el);
            }
            next = self.first_child(el).or_else(|| {
                let mut cur = el;
                loop {
                    if let Some(sibling) = self.next_sibling(cur) {
                        return Some(sibling);
                    }
                    match self.parent(cur) {
                        Some(parent) if parent != scope => cur = parent,
                        _ => return None,
                    }
                }
            });
        }
        None
    }
}

/// Find the trigger element for the floating element `floating`.
///
/// Walks upward from the floating element's parent. At each ancestor, the
/// ancestor's subtree is searched for an element marked with `id`, and the
/// first match wins. The walk stops once the body has been searched, so an
/// unrelated element elsewhere in a large page is never picked up through
/// `html`-level siblings of the body.
///
/// Returns `None` if no trigger is found; callers treat that as an inert
/// binding, not as an error.
pub fn find_trigger<D: DocumentTree>(
    tree: &D,
    floating: D::Element,
    id: &TooltipId,
) -> Option<D::Element> {
    let mut ancestor = tree.parent(floating);
    while let Some(scope) = ancestor {
        if let Some(trigger) = tree.find_marked_descendant(scope, id.as_str()) {
            return Some(trigger);
        }
        if tree.is_body(scope) {
            break;
        }
        ancestor = tree.parent(scope);
    }
    #[cfg(feature = "tracing")]
    tracing::debug!(id = id.as_str(), "no trigger found for tooltip");
    None
}

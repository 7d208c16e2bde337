// Copyright 2025 the Icezone Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory [`Document`] backend over generational node slots.
//!
//! Nodes live in a slot vector with a free list; each slot remembers its
//! last generation so a handle to a removed node can never alias a later
//! occupant. Overlay and stylesheet side effects are recorded rather than
//! rendered, which is what makes this backend suitable for tests and
//! headless walkthroughs.

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Rect, Vec2};

use crate::document::Document;
use crate::types::{DocumentLocation, ZoneCategory, ZoneRef, ZoneTarget};

/// Generational handle for nodes in a [`MemoryDocument`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(u32, u32);

impl NodeId {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Slot indices are intentionally 32-bit; documents never approach that many nodes."
    )]
    const fn new(idx: usize, generation: u32) -> Self {
        Self(idx as u32, generation)
    }

    const fn idx(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Debug)]
enum Node {
    Element {
        rect: Rect,
        category: Option<ZoneCategory>,
        zone_link: Option<ZoneRef>,
    },
    Indicator {
        at: Point,
        trigger: ZoneRef,
    },
}

/// Recorded state of the shared highlight overlay.
#[derive(Clone, Debug, PartialEq)]
pub struct OverlayState {
    /// Current overlay geometry (meaningful while visible).
    pub rect: Rect,
    /// Whether the overlay is currently shown.
    pub visible: bool,
    /// Fade duration of the most recent show/hide, in milliseconds.
    pub last_fade_ms: u64,
}

impl Default for OverlayState {
    fn default() -> Self {
        Self {
            rect: Rect::ZERO,
            visible: false,
            last_fade_ms: 0,
        }
    }
}

/// An in-memory guest document.
///
/// ## Example
///
/// ```rust
/// use icezone_document::{Document, MemoryDocument, ZoneCategory};
/// use kurbo::{Rect, Vec2};
///
/// let mut doc = MemoryDocument::new();
/// let zone = doc.insert_zone(
///     ZoneCategory::new("teaser").unwrap(),
///     Rect::new(10.0, 20.0, 110.0, 60.0),
/// );
/// doc.set_scroll(Vec2::new(0.0, 15.0));
///
/// let targets = doc.zone_targets();
/// assert_eq!(targets.len(), 1);
/// assert_eq!(targets[0].node, zone);
/// assert_eq!(doc.scroll_offset().y, 15.0);
/// ```
#[derive(Clone, Debug)]
pub struct MemoryDocument {
    /// slots
    nodes: Vec<Option<Node>>,
    /// last generation per slot (persists across frees)
    generations: Vec<u32>,
    free_list: Vec<usize>,
    scroll: Vec2,
    overlay: OverlayState,
    location: DocumentLocation,
    stylesheets: Vec<String>,
}

impl MemoryDocument {
    /// Create an empty document with a placeholder localhost location.
    pub fn new() -> Self {
        Self::with_location(DocumentLocation {
            href: String::from("http://127.0.0.1:8080/"),
            origin: String::from("http://127.0.0.1:8080"),
        })
    }

    /// Create an empty document at an explicit location.
    pub fn with_location(location: DocumentLocation) -> Self {
        Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            scroll: Vec2::ZERO,
            overlay: OverlayState::default(),
            location,
            stylesheets: Vec::new(),
        }
    }

    /// Insert an element that carries the zone marker.
    pub fn insert_zone(&mut self, category: ZoneCategory, rect: Rect) -> NodeId {
        self.alloc(Node::Element {
            rect,
            category: Some(category),
            zone_link: None,
        })
    }

    /// Insert a plain element without the zone marker.
    pub fn insert_element(&mut self, rect: Rect) -> NodeId {
        self.alloc(Node::Element {
            rect,
            category: None,
            zone_link: None,
        })
    }

    /// Move/resize an element, simulating a layout shift. No-op for dead
    /// nodes and indicators.
    pub fn set_rect(&mut self, node: NodeId, rect: Rect) {
        if let Some(Node::Element { rect: r, .. }) = self.get_mut(node) {
            *r = rect;
        }
    }

    /// Set the page scroll offsets.
    pub fn set_scroll(&mut self, scroll: Vec2) {
        self.scroll = scroll;
    }

    /// Whether a node handle still refers to a live node.
    pub fn is_alive(&self, node: NodeId) -> bool {
        self.get(node).is_some()
    }

    /// The linkage reference recorded on a target, if any.
    pub fn zone_link(&self, node: NodeId) -> Option<&ZoneRef> {
        match self.get(node)? {
            Node::Element { zone_link, .. } => zone_link.as_ref(),
            Node::Indicator { .. } => None,
        }
    }

    /// Number of live indicator nodes.
    pub fn indicator_count(&self) -> usize {
        self.indicators().count()
    }

    /// Iterate live indicators as `(node, position, trigger reference)`.
    pub fn indicators(&self) -> impl Iterator<Item = (NodeId, Point, &ZoneRef)> {
        self.nodes.iter().enumerate().filter_map(|(idx, slot)| {
            match slot.as_ref()? {
                Node::Indicator { at, trigger } => {
                    Some((NodeId::new(idx, self.generations[idx]), *at, trigger))
                }
                Node::Element { .. } => None,
            }
        })
    }

    /// Recorded overlay state.
    pub fn overlay(&self) -> &OverlayState {
        &self.overlay
    }

    /// Stylesheet URLs requested so far, in request order.
    pub fn stylesheets(&self) -> &[String] {
        &self.stylesheets
    }

    fn alloc(&mut self, node: Node) -> NodeId {
        if let Some(idx) = self.free_list.pop() {
            self.generations[idx] += 1;
            self.nodes[idx] = Some(node);
            NodeId::new(idx, self.generations[idx])
        } else {
            self.nodes.push(Some(node));
            self.generations.push(1);
            NodeId::new(self.nodes.len() - 1, 1)
        }
    }

    fn get(&self, node: NodeId) -> Option<&Node> {
        if self.generations.get(node.idx()) != Some(&node.1) {
            return None;
        }
        self.nodes.get(node.idx())?.as_ref()
    }

    fn get_mut(&mut self, node: NodeId) -> Option<&mut Node> {
        if self.generations.get(node.idx()) != Some(&node.1) {
            return None;
        }
        self.nodes.get_mut(node.idx())?.as_mut()
    }
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl Document for MemoryDocument {
    type NodeId = NodeId;

    fn zone_targets(&self) -> Vec<ZoneTarget<NodeId>> {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(idx, slot)| match slot.as_ref()? {
                Node::Element {
                    rect,
                    category: Some(category),
                    ..
                } => Some(ZoneTarget {
                    node: NodeId::new(idx, self.generations[idx]),
                    category: category.clone(),
                    rect: *rect,
                }),
                _ => None,
            })
            .collect()
    }

    fn offset_rect(&self, node: NodeId) -> Option<Rect> {
        match self.get(node)? {
            Node::Element { rect, .. } => Some(*rect),
            Node::Indicator { at, .. } => Some(Rect::from_origin_size(*at, (0.0, 0.0))),
        }
    }

    fn scroll_offset(&self) -> Vec2 {
        self.scroll
    }

    fn mark_zone_target(&mut self, node: NodeId, reference: &ZoneRef) {
        if let Some(Node::Element { zone_link, .. }) = self.get_mut(node) {
            *zone_link = Some(reference.clone());
        }
    }

    fn append_indicator(&mut self, at: Point, reference: &ZoneRef) -> NodeId {
        self.alloc(Node::Indicator {
            at,
            trigger: reference.clone(),
        })
    }

    fn remove_node(&mut self, node: NodeId) {
        if self.get(node).is_some() {
            self.nodes[node.idx()] = None;
            self.free_list.push(node.idx());
        }
    }

    fn show_overlay(&mut self, rect: Rect, fade_ms: u64) {
        self.overlay = OverlayState {
            rect,
            visible: true,
            last_fade_ms: fade_ms,
        };
    }

    fn hide_overlay(&mut self, fade_ms: u64) {
        self.overlay.visible = false;
        self.overlay.last_fade_ms = fade_ms;
    }

    fn location(&self) -> DocumentLocation {
        self.location.clone()
    }

    fn request_stylesheet(&mut self, url: &str) {
        self.stylesheets.push(String::from(url));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(value: &str) -> ZoneCategory {
        ZoneCategory::new(value).unwrap()
    }

    #[test]
    fn zone_targets_report_marked_elements_only() {
        let mut doc = MemoryDocument::new();
        let zone = doc.insert_zone(category("article"), Rect::new(0.0, 0.0, 10.0, 10.0));
        doc.insert_element(Rect::new(20.0, 0.0, 30.0, 10.0));

        let targets = doc.zone_targets();
        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].node, zone);
        assert_eq!(targets[0].category.as_str(), "article");
    }

    #[test]
    fn removed_node_handle_goes_stale() {
        let mut doc = MemoryDocument::new();
        let zone = doc.insert_zone(category("a"), Rect::new(0.0, 0.0, 10.0, 10.0));
        doc.remove_node(zone);

        assert!(!doc.is_alive(zone));
        assert!(doc.offset_rect(zone).is_none());
        assert!(doc.zone_targets().is_empty());
    }

    #[test]
    fn reused_slot_does_not_alias_old_handle() {
        let mut doc = MemoryDocument::new();
        let first = doc.insert_zone(category("a"), Rect::new(0.0, 0.0, 1.0, 1.0));
        doc.remove_node(first);
        let second = doc.insert_zone(category("b"), Rect::new(2.0, 2.0, 3.0, 3.0));

        // Same slot, different generation.
        assert_ne!(first, second);
        assert!(doc.offset_rect(first).is_none());
        assert!(doc.offset_rect(second).is_some());
    }

    #[test]
    fn indicators_are_tracked_and_removable() {
        let mut doc = MemoryDocument::new();
        let reference = ZoneRef::mint(&category("a"), 0);
        let indicator = doc.append_indicator(Point::new(5.0, 8.0), &reference);

        assert_eq!(doc.indicator_count(), 1);
        let (node, at, trigger) = doc.indicators().next().unwrap();
        assert_eq!(node, indicator);
        assert_eq!(at, Point::new(5.0, 8.0));
        assert_eq!(trigger, &reference);

        doc.remove_node(indicator);
        assert_eq!(doc.indicator_count(), 0);
    }

    #[test]
    fn linkage_attribute_is_recorded_on_targets() {
        let mut doc = MemoryDocument::new();
        let zone = doc.insert_zone(category("feature"), Rect::new(0.0, 0.0, 4.0, 4.0));
        let reference = ZoneRef::mint(&category("feature"), 3);

        assert!(doc.zone_link(zone).is_none());
        doc.mark_zone_target(zone, &reference);
        assert_eq!(doc.zone_link(zone), Some(&reference));
    }

    #[test]
    fn overlay_state_records_show_and_hide() {
        let mut doc = MemoryDocument::new();
        let rect = Rect::new(1.0, 2.0, 3.0, 4.0);

        doc.show_overlay(rect, 200);
        assert!(doc.overlay().visible);
        assert_eq!(doc.overlay().rect, rect);
        assert_eq!(doc.overlay().last_fade_ms, 200);

        doc.hide_overlay(200);
        assert!(!doc.overlay().visible);
        // Geometry survives a hide; only visibility changes.
        assert_eq!(doc.overlay().rect, rect);
    }

    #[test]
    fn stylesheet_requests_are_recorded_in_order() {
        let mut doc = MemoryDocument::new();
        doc.request_stylesheet("/styles/a.css");
        doc.request_stylesheet("/styles/b.css");
        assert_eq!(doc.stylesheets(), ["/styles/a.css", "/styles/b.css"]);
    }
}

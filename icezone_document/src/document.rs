// Copyright 2025 the Icezone Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The [`Document`] trait: everything the icezone core needs from the guest
//! document.
//!
//! The trait deliberately exposes a narrow, read-mostly surface. The core
//! never walks the document tree and never edits content; it queries for zone
//! targets, reads live geometry and scroll offsets, and performs exactly
//! three kinds of writes: linkage attributes, indicator lifecycle, and the
//! shared overlay. All writes are best-effort — a node that has disappeared
//! is simply skipped.

use alloc::vec::Vec;
use core::fmt::Debug;
use core::hash::Hash;

use kurbo::{Point, Rect, Vec2};

use crate::types::{DocumentLocation, ZoneRef, ZoneTarget};

/// Facade over the guest document.
///
/// Implementations bind the core to a concrete document toolkit. The node
/// identifier is an associated type so bindings can use whatever small,
/// copyable handle is natural for them (an element handle, a slot key, …).
///
/// All geometry is in document space: offsets are measured from the document
/// origin, not the viewport, and are unaffected by scrolling.
pub trait Document {
    /// Small, copyable handle identifying a node in this document.
    type NodeId: Copy + Eq + Hash + Debug;

    /// Snapshot of every element currently matching the zone-marker
    /// convention, in document order.
    ///
    /// The snapshot is consistent: every reported target is alive at return
    /// time and carries its geometry as of the query. Zero targets is a
    /// legitimate result, not an error.
    fn zone_targets(&self) -> Vec<ZoneTarget<Self::NodeId>>;

    /// Live document-space bounds of a node, or `None` once the node is gone.
    fn offset_rect(&self, node: Self::NodeId) -> Option<Rect>;

    /// Current page scroll offsets: `x` is the horizontal (left) scroll,
    /// `y` the vertical (top) scroll.
    fn scroll_offset(&self) -> Vec2;

    /// Record `reference` on a target via its linkage attribute, replacing
    /// any earlier value. No-op if the node is gone.
    fn mark_zone_target(&mut self, node: Self::NodeId, reference: &ZoneRef);

    /// Append an indicator element, absolutely positioned at `at`, carrying
    /// `reference` as its trigger linkage. Indicators are visual-only and
    /// carry no behavior of their own.
    fn append_indicator(&mut self, at: Point, reference: &ZoneRef) -> Self::NodeId;

    /// Remove a node appended by [`Document::append_indicator`]. No-op if it
    /// is already gone.
    fn remove_node(&mut self, node: Self::NodeId);

    /// Reposition the shared highlight overlay to `rect` and fade it in over
    /// `fade_ms` milliseconds. Repeated calls overwrite the geometry.
    fn show_overlay(&mut self, rect: Rect, fade_ms: u64);

    /// Fade the shared highlight overlay out over `fade_ms` milliseconds.
    fn hide_overlay(&mut self, fade_ms: u64);

    /// Location of this document.
    fn location(&self) -> DocumentLocation;

    /// Request a stylesheet by URL. Purely cosmetic and fire-and-forget:
    /// implementations must not block, and a failed load must not affect
    /// anything else.
    fn request_stylesheet(&mut self, url: &str);
}

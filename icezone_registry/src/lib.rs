// Copyright 2025 the Icezone Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Icezone Registry: indicator lifecycle and zone-reference resolution.
//!
//! ## Overview
//!
//! The registry owns the mapping between editable zones and their visual
//! indicators. A [`scan`](IndicatorRegistry::scan) destroys every existing
//! indicator, re-queries the document for current zone targets, and creates
//! one fresh indicator per target, each under a newly minted [`ZoneRef`].
//! References are never reused within a session: the serial counter is a
//! field of the registry and only ever increases, even across rebuilds.
//!
//! ## Resolution
//!
//! Interactions hold a [`ZoneRef`], not a node handle. They re-resolve it
//! through [`resolve_target`](IndicatorRegistry::resolve_target) at event
//! time, which returns the target together with its **fresh** geometry. A
//! reference minted before the most recent scan — or whose target has since
//! left the document — resolves to [`ResolveError::NotFound`]; callers treat
//! that as an expected outcome and abandon the interaction.
//!
//! ```rust
//! use icezone_document::{MemoryDocument, ZoneCategory};
//! use icezone_registry::IndicatorRegistry;
//! use kurbo::Rect;
//!
//! let mut doc = MemoryDocument::new();
//! doc.insert_zone(
//!     ZoneCategory::new("teaser").unwrap(),
//!     Rect::new(30.0, 50.0, 230.0, 90.0),
//! );
//!
//! let mut registry = IndicatorRegistry::new();
//! let outcome = registry.scan(&mut doc);
//! assert_eq!(outcome.created, 1);
//!
//! let reference = registry.indicators().next().unwrap().reference.clone();
//! let resolved = registry.resolve_target(&doc, &reference).unwrap();
//! assert_eq!(resolved.rect, Rect::new(30.0, 50.0, 230.0, 90.0));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use core::fmt;
use core::fmt::Debug;
use core::hash::Hash;

use hashbrown::HashMap;
use kurbo::{Point, Rect};
use log::debug;
use smallvec::SmallVec;

use icezone_document::{Document, ZoneRef};

/// One live indicator: the visual affordance paired with a zone target for
/// the current scan generation.
///
/// Indicators are created during a scan and destroyed in bulk at the start
/// of the next one; they are never mutated in place. The pairing with the
/// target is by [`ZoneRef`], re-resolved through the registry — holding an
/// `Indicator` does not keep the target alive or current.
#[derive(Clone, Debug)]
pub struct Indicator<K> {
    /// The reference minted for this pairing.
    pub reference: ZoneRef,
    /// The indicator element appended to the document.
    pub node: K,
    /// The target element the indicator points at, as of scan time.
    pub target: K,
    /// Document-space position captured at scan time.
    pub at: Point,
}

/// Batched report of what a scan changed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ScanOutcome {
    /// Indicators destroyed at the start of the scan.
    pub removed: usize,
    /// Indicators created by the scan; equals the number of zone targets
    /// matching the marker convention at scan time.
    pub created: usize,
}

/// Failure to resolve a [`ZoneRef`] back to a live target.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ResolveError {
    /// The reference belongs to a prior scan generation, or its target has
    /// left the document.
    NotFound,
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => f.write_str("zone reference does not resolve to a live target"),
        }
    }
}

impl core::error::Error for ResolveError {}

/// A successfully resolved zone: the target and its live geometry at
/// resolution time.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ResolvedZone<K> {
    /// The target element.
    pub target: K,
    /// Document-space bounds read at the moment of resolution, reflecting
    /// any layout shift since the last scan.
    pub rect: Rect,
}

/// Registry of zone indicators for one guest document.
///
/// Owns the indicator set, the reference→target lookup, and the monotonic
/// reference serial. One registry exists per guest; it is constructed
/// explicitly and passed by reference to collaborators rather than living in
/// ambient module state.
#[derive(Clone, Debug)]
pub struct IndicatorRegistry<K> {
    indicators: SmallVec<[Indicator<K>; 8]>,
    by_ref: HashMap<ZoneRef, K>,
    serial: u64,
}

impl<K: Copy + Eq + Hash + Debug> Default for IndicatorRegistry<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Copy + Eq + Hash + Debug> IndicatorRegistry<K> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            indicators: SmallVec::new(),
            by_ref: HashMap::new(),
            serial: 0,
        }
    }

    /// Rebuild the indicator set from the document's current zone targets.
    ///
    /// Every existing indicator is removed first, then one indicator is
    /// created per target reported by [`Document::zone_targets`], positioned
    /// at the target's capture-time offset and linked through a freshly
    /// minted [`ZoneRef`]. The scan is idempotent with respect to indicator
    /// *count* but not reference *values*: references change on every
    /// rebuild, and stale ones simply stop resolving.
    pub fn scan<D>(&mut self, doc: &mut D) -> ScanOutcome
    where
        D: Document<NodeId = K>,
    {
        let removed = self.indicators.len();
        for indicator in self.indicators.drain(..) {
            doc.remove_node(indicator.node);
        }
        self.by_ref.clear();

        for target in doc.zone_targets() {
            let reference = ZoneRef::mint(&target.category, self.serial);
            self.serial += 1;

            doc.mark_zone_target(target.node, &reference);
            let node = doc.append_indicator(target.rect.origin(), &reference);

            self.by_ref.insert(reference.clone(), target.node);
            self.indicators.push(Indicator {
                reference,
                node,
                target: target.node,
                at: target.rect.origin(),
            });
        }

        let outcome = ScanOutcome {
            removed,
            created: self.indicators.len(),
        };
        debug!(
            "zone scan: removed {} indicator(s), created {}",
            outcome.removed, outcome.created
        );
        outcome
    }

    /// Resolve a reference to its target and the target's live geometry.
    ///
    /// Geometry is read fresh from the document at call time, never replayed
    /// from scan time. Stale references (prior generation, or a target that
    /// has since disappeared) yield [`ResolveError::NotFound`].
    pub fn resolve_target<D>(
        &self,
        doc: &D,
        reference: &ZoneRef,
    ) -> Result<ResolvedZone<K>, ResolveError>
    where
        D: Document<NodeId = K>,
    {
        let target = *self.by_ref.get(reference).ok_or(ResolveError::NotFound)?;
        let rect = doc.offset_rect(target).ok_or(ResolveError::NotFound)?;
        Ok(ResolvedZone { target, rect })
    }

    /// Number of live indicators.
    pub fn len(&self) -> usize {
        self.indicators.len()
    }

    /// Whether the registry currently holds no indicators.
    pub fn is_empty(&self) -> bool {
        self.indicators.is_empty()
    }

    /// Whether a reference belongs to the current scan generation.
    pub fn contains(&self, reference: &ZoneRef) -> bool {
        self.by_ref.contains_key(reference)
    }

    /// Iterate the live indicators in creation order.
    pub fn indicators(&self) -> impl Iterator<Item = &Indicator<K>> {
        self.indicators.iter()
    }
}

// Copyright 2025 the Icezone Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Icezone Document: the document facade and zone-marker vocabulary.
//!
//! ## Overview
//!
//! The icezone core runs inside a sandboxed guest document and needs to read
//! and lightly annotate that document: find the elements flagged as editable
//! zones, read their live geometry and the page scroll, append and remove
//! indicator affordances, and drive the single shared highlight overlay. This
//! crate defines that surface as the [`Document`] trait so the core stays
//! independent of any particular document toolkit — a DOM binding, a native
//! scene graph, or the bundled in-memory backend all plug in the same way.
//!
//! ## Zone marker convention
//!
//! An element is a zone target when the hosting document reports it from
//! [`Document::zone_targets`] with a non-empty [`ZoneCategory`]. Elements
//! without the marker are invisible to the core. Once a target has been
//! indicated, the document records the minted [`ZoneRef`] on both sides of
//! the pairing (target linkage and indicator trigger), enabling id-based
//! resolution instead of geometric recomputation.
//!
//! ## In-memory backend
//!
//! [`MemoryDocument`] is a complete [`Document`] implementation over
//! generational node slots. It backs every test in the workspace and the
//! demo walkthrough, and records overlay and stylesheet side effects so they
//! can be asserted on.
//!
//! ```rust
//! use icezone_document::{Document, MemoryDocument, ZoneCategory};
//! use kurbo::Rect;
//!
//! let mut doc = MemoryDocument::new();
//! doc.insert_zone(
//!     ZoneCategory::new("article").unwrap(),
//!     Rect::new(30.0, 50.0, 230.0, 90.0),
//! );
//! doc.insert_element(Rect::new(0.0, 0.0, 800.0, 40.0)); // not a zone
//!
//! assert_eq!(doc.zone_targets().len(), 1);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod document;
mod memory;
mod types;

pub use document::Document;
pub use memory::{MemoryDocument, NodeId, OverlayState};
pub use types::{DocumentLocation, ZoneCategory, ZoneRef, ZoneTarget};

// Copyright 2025 the Icezone Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Icezone Overlay: the single shared highlight box.
//!
//! ## Overview
//!
//! Exactly one overlay exists for the lifetime of a guest document. It is
//! reused across every hover interaction: [`show`](OverlayHighlighter::show)
//! repositions it and fades it in, [`hide`](OverlayHighlighter::hide) fades
//! it out. Rapid repeated calls simply overwrite the pending geometry — there
//! is no queueing, the last writer wins.
//!
//! The highlighter owns the overlay's logical state (geometry, visibility,
//! fade speed) and delegates the visual effect to the document facade. That
//! keeps idempotence decidable here: a `hide` on an already-hidden overlay
//! never reaches the document at all.
//!
//! ```rust
//! use icezone_document::MemoryDocument;
//! use icezone_overlay::OverlayHighlighter;
//! use kurbo::Rect;
//!
//! let mut doc = MemoryDocument::new();
//! let mut overlay = OverlayHighlighter::new();
//!
//! overlay.show(&mut doc, Rect::new(30.0, 50.0, 230.0, 90.0));
//! assert!(overlay.is_visible());
//!
//! overlay.hide(&mut doc);
//! overlay.hide(&mut doc); // no-op, already hidden
//! assert!(!overlay.is_visible());
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use kurbo::Rect;

use icezone_document::Document;

/// Fade duration for overlay transitions.
///
/// The named speeds match the conventional toolkit presets the guest
/// stylesheet is tuned for.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FadeSpeed {
    /// 200 ms.
    Fast,
    /// 600 ms.
    Slow,
    /// Explicit duration in milliseconds.
    Millis(u64),
}

impl FadeSpeed {
    /// The duration in milliseconds.
    pub const fn millis(self) -> u64 {
        match self {
            Self::Fast => 200,
            Self::Slow => 600,
            Self::Millis(ms) => ms,
        }
    }
}

impl Default for FadeSpeed {
    fn default() -> Self {
        Self::Fast
    }
}

/// The shared highlight box and its lifecycle.
///
/// Construct one per guest document and keep it for the document's lifetime;
/// it is never recreated on scan.
#[derive(Clone, Debug)]
pub struct OverlayHighlighter {
    geometry: Rect,
    visible: bool,
    fade: FadeSpeed,
}

impl OverlayHighlighter {
    /// Create a hidden overlay with the default fade speed.
    pub fn new() -> Self {
        Self::with_fade(FadeSpeed::default())
    }

    /// Create a hidden overlay with an explicit fade speed.
    pub fn with_fade(fade: FadeSpeed) -> Self {
        Self {
            geometry: Rect::ZERO,
            visible: false,
            fade,
        }
    }

    /// Reposition the overlay to `rect` and make it visible with a fade-in.
    ///
    /// Calling `show` while already visible overwrites the geometry in
    /// place; there is no accumulation and no queue.
    pub fn show<D: Document>(&mut self, doc: &mut D, rect: Rect) {
        self.geometry = rect;
        self.visible = true;
        doc.show_overlay(rect, self.fade.millis());
    }

    /// Fade the overlay out. No-op when already hidden.
    pub fn hide<D: Document>(&mut self, doc: &mut D) {
        if !self.visible {
            return;
        }
        self.visible = false;
        doc.hide_overlay(self.fade.millis());
    }

    /// Whether the overlay is currently shown.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// The most recently applied geometry.
    pub fn geometry(&self) -> Rect {
        self.geometry
    }

    /// The configured fade speed.
    pub fn fade(&self) -> FadeSpeed {
        self.fade
    }
}

impl Default for OverlayHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use icezone_document::MemoryDocument;

    #[test]
    fn show_positions_and_reveals() {
        let mut doc = MemoryDocument::new();
        let mut overlay = OverlayHighlighter::new();
        let rect = Rect::new(10.0, 20.0, 110.0, 60.0);

        overlay.show(&mut doc, rect);

        assert!(overlay.is_visible());
        assert_eq!(overlay.geometry(), rect);
        assert!(doc.overlay().visible);
        assert_eq!(doc.overlay().rect, rect);
        assert_eq!(doc.overlay().last_fade_ms, FadeSpeed::Fast.millis());
    }

    #[test]
    fn repeated_show_overwrites_geometry() {
        let mut doc = MemoryDocument::new();
        let mut overlay = OverlayHighlighter::new();

        overlay.show(&mut doc, Rect::new(0.0, 0.0, 10.0, 10.0));
        overlay.show(&mut doc, Rect::new(5.0, 5.0, 15.0, 15.0));

        assert_eq!(overlay.geometry(), Rect::new(5.0, 5.0, 15.0, 15.0));
        assert_eq!(doc.overlay().rect, Rect::new(5.0, 5.0, 15.0, 15.0));
    }

    #[test]
    fn show_with_identical_geometry_has_no_cumulative_effect() {
        let mut doc = MemoryDocument::new();
        let mut overlay = OverlayHighlighter::new();
        let rect = Rect::new(1.0, 2.0, 3.0, 4.0);

        overlay.show(&mut doc, rect);
        let after_first = doc.overlay().clone();
        overlay.show(&mut doc, rect);

        assert_eq!(doc.overlay(), &after_first);
        assert!(overlay.is_visible());
    }

    #[test]
    fn hide_when_hidden_is_a_no_op() {
        let mut doc = MemoryDocument::new();
        let mut overlay = OverlayHighlighter::new();

        // The document never hears about a hide of an already-hidden overlay.
        overlay.hide(&mut doc);
        assert_eq!(doc.overlay().last_fade_ms, 0);

        overlay.show(&mut doc, Rect::new(0.0, 0.0, 1.0, 1.0));
        overlay.hide(&mut doc);
        overlay.hide(&mut doc);
        assert!(!overlay.is_visible());
        assert!(!doc.overlay().visible);
    }

    #[test]
    fn custom_fade_speed_reaches_the_document() {
        let mut doc = MemoryDocument::new();
        let mut overlay = OverlayHighlighter::with_fade(FadeSpeed::Millis(50));

        overlay.show(&mut doc, Rect::new(0.0, 0.0, 1.0, 1.0));
        assert_eq!(doc.overlay().last_fade_ms, 50);
    }
}

// Copyright 2025 the Icezone Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Icezone Guest: bootstrap and wiring for the in-context-editing guest core.
//!
//! ## Overview
//!
//! A [`Guest`] owns one of everything: the document facade, the indicator
//! registry, the shared overlay, the interaction controller, and the host
//! channel. [`Guest::start`] performs the startup sequence:
//!
//! 1. Announce readiness to the host (`GUEST_SITE_LOAD`, exactly once per
//!    document lifetime, as early as possible).
//! 2. Request the guest stylesheet — purely cosmetic; a failed load must not
//!    hold anything else up, so this is fire-and-forget.
//! 3. Run the initial indicator scan.
//!
//! After startup the embedding layer forwards every delegated indicator
//! event and viewport resize to [`Guest::handle`], the single dispatch point.
//!
//! ```rust
//! use icezone_channel::{NotificationChannel, Origin, RecordingTransport};
//! use icezone_document::{MemoryDocument, ZoneCategory};
//! use icezone_guest::{Guest, GuestConfig};
//! use kurbo::Rect;
//!
//! let mut doc = MemoryDocument::new();
//! doc.insert_zone(
//!     ZoneCategory::new("teaser").unwrap(),
//!     Rect::new(30.0, 50.0, 230.0, 90.0),
//! );
//! let channel = NotificationChannel::new(
//!     RecordingTransport::new(),
//!     Origin::parse("http://127.0.0.1:8080").unwrap(),
//! );
//!
//! let guest = Guest::start(doc, channel, GuestConfig::default());
//! assert_eq!(guest.registry().len(), 1);
//! assert_eq!(guest.channel().transport().len(), 1); // the load announcement
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::string::String;

use log::{debug, warn};

use icezone_channel::{NotificationChannel, SiteLoad, Topic, Transport};
use icezone_document::Document;
use icezone_overlay::OverlayHighlighter;
use icezone_registry::IndicatorRegistry;
use icezone_responder::{InteractionController, InteractionEvent, InteractionState, Reaction};

/// Default URL of the guest stylesheet.
pub const DEFAULT_STYLESHEET: &str = "/static-assets/styles/icezone-guest.css";

/// Startup options.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GuestConfig {
    /// Stylesheet to request at startup; `None` skips the request entirely.
    pub stylesheet_url: Option<String>,
}

impl Default for GuestConfig {
    fn default() -> Self {
        Self {
            stylesheet_url: Some(String::from(DEFAULT_STYLESHEET)),
        }
    }
}

impl GuestConfig {
    /// Configuration that skips the stylesheet request (headless use).
    pub fn headless() -> Self {
        Self {
            stylesheet_url: None,
        }
    }
}

/// The assembled guest core.
///
/// All collaborators are explicitly constructed fields of this one object;
/// nothing lives in ambient module state. The guest is single-threaded and
/// event-driven: each [`handle`](Guest::handle) call runs to completion
/// before the next.
#[derive(Debug)]
pub struct Guest<D: Document, T> {
    doc: D,
    registry: IndicatorRegistry<D::NodeId>,
    overlay: OverlayHighlighter,
    controller: InteractionController,
    channel: NotificationChannel<T>,
}

impl<D: Document, T: Transport> Guest<D, T> {
    /// Run the startup sequence and return the wired guest.
    pub fn start(mut doc: D, channel: NotificationChannel<T>, config: GuestConfig) -> Self {
        let location = doc.location();
        let announcement = SiteLoad::for_location(&location.href, &location.origin);
        if let Err(err) = channel.publish(Topic::GuestSiteLoad, &announcement) {
            // Best-effort affordance layer: a failed announcement degrades to
            // a host that never hears from us, nothing more.
            warn!("failed to announce guest load: {err}");
        }

        if let Some(url) = &config.stylesheet_url {
            doc.request_stylesheet(url);
        }

        let mut registry = IndicatorRegistry::new();
        let outcome = registry.scan(&mut doc);
        debug!(
            "guest started at {} with {} zone(s)",
            location.href, outcome.created
        );

        Self {
            doc,
            registry,
            overlay: OverlayHighlighter::new(),
            controller: InteractionController::new(),
            channel,
        }
    }

    /// Feed one interaction event through the state machine.
    pub fn handle(&mut self, event: InteractionEvent) -> Reaction {
        self.controller.dispatch(
            event,
            &mut self.doc,
            &mut self.registry,
            &mut self.overlay,
            &self.channel,
        )
    }

    /// The document facade.
    pub fn document(&self) -> &D {
        &self.doc
    }

    /// Mutable access to the document facade (layout shifts, scrolling).
    pub fn document_mut(&mut self) -> &mut D {
        &mut self.doc
    }

    /// The indicator registry.
    pub fn registry(&self) -> &IndicatorRegistry<D::NodeId> {
        &self.registry
    }

    /// The shared overlay.
    pub fn overlay(&self) -> &OverlayHighlighter {
        &self.overlay
    }

    /// The current interaction state.
    pub fn state(&self) -> &InteractionState {
        self.controller.state()
    }

    /// The host channel.
    pub fn channel(&self) -> &NotificationChannel<T> {
        &self.channel
    }
}

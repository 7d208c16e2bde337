// Copyright 2025 the Icezone Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Icezone Responder: the hover/click interaction state machine.
//!
//! ## Overview
//!
//! The guest's interactions form a small, explicit state machine with states
//! `Idle` and `Hovering(reference)`. All document events funnel through one
//! dispatch point, [`InteractionController::dispatch`], which makes
//! transition order deterministic and testable instead of depending on a
//! toolkit's implicit bubbling order.
//!
//! | From          | Trigger                       | Action                              | To            |
//! |---------------|-------------------------------|-------------------------------------|---------------|
//! | `Idle`        | pointer enters indicator `r`  | resolve target; show overlay        | `Hovering(r)` |
//! | `Hovering(r)` | pointer leaves that indicator | hide overlay                        | `Idle`        |
//! | `Hovering(r)` | indicator `r` clicked         | resolve target + scroll; publish    | `Hovering(r)` |
//! | any           | viewport resize               | hide overlay; rescan                | `Idle`        |
//!
//! Geometry for show and click is always recomputed from the live target at
//! event time, never replayed from scan time, so it reflects any layout
//! shift since the last rebuild.
//!
//! ## Stale references
//!
//! A scan tears the whole indicator set down, so an event can legitimately
//! arrive carrying a reference from a prior generation. Resolution failure
//! is an expected outcome, not an error: the interaction is abandoned
//! silently — no overlay, no message, no state change — and the dispatch
//! reports [`Reaction::StaleReference`] so callers can observe it.
//!
//! Every dispatch returns a [`Reaction`] describing what actually happened,
//! in the spirit of a click recognizer returning a typed result rather than
//! mutating shared flags.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::string::String;

use log::{debug, warn};

use icezone_channel::{NotificationChannel, Topic, Transport, ZoneSelection};
use icezone_document::{Document, ZoneRef};
use icezone_overlay::OverlayHighlighter;
use icezone_registry::{IndicatorRegistry, ScanOutcome};

/// Interaction state, owned solely by the controller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InteractionState {
    /// No indicator is hovered.
    Idle,
    /// The indicator with this reference is hovered.
    Hovering(ZoneRef),
}

impl Default for InteractionState {
    fn default() -> Self {
        Self::Idle
    }
}

/// Document events the controller reacts to.
///
/// The embedding layer translates raw toolkit events (delegated listeners on
/// indicators, the window resize hook) into these values; each carries the
/// reference the indicator holds in its trigger linkage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InteractionEvent {
    /// The pointer entered the indicator carrying this reference.
    PointerEnter(ZoneRef),
    /// The pointer left the indicator carrying this reference.
    PointerLeave(ZoneRef),
    /// The indicator carrying this reference was clicked.
    Click(ZoneRef),
    /// The viewport was resized.
    ViewportResize,
}

/// What one dispatch did.
#[derive(Clone, Debug, PartialEq)]
pub enum Reaction {
    /// The overlay was shown over the referenced target.
    OverlayShown(ZoneRef),
    /// The overlay was hidden.
    OverlayHidden,
    /// A zone selection was published to the host.
    SelectionPublished(ZoneSelection),
    /// Indicators were rebuilt after a resize.
    Rescanned(ScanOutcome),
    /// The event referenced a reference that no longer resolves; the
    /// interaction was abandoned with no visible effect.
    StaleReference(ZoneRef),
    /// The event did not apply in the current state.
    Ignored,
}

/// The interaction state machine.
///
/// One controller exists per guest document. It owns nothing but the current
/// [`InteractionState`]; document, registry, overlay, and channel are passed
/// in per dispatch, which keeps every collaborator explicitly constructed
/// and borrow-checked instead of ambient.
#[derive(Clone, Debug, Default)]
pub struct InteractionController {
    state: InteractionState,
}

impl InteractionController {
    /// Create a controller in the `Idle` state.
    pub fn new() -> Self {
        Self {
            state: InteractionState::Idle,
        }
    }

    /// The current interaction state.
    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    /// Feed one event through the state machine.
    ///
    /// This is the single dispatch point: the embedding layer calls it for
    /// every delegated indicator event and every viewport resize, in the
    /// order the event loop delivers them. Each call runs to completion
    /// before the next — there is no queueing or re-entrancy here.
    pub fn dispatch<D, T>(
        &mut self,
        event: InteractionEvent,
        doc: &mut D,
        registry: &mut IndicatorRegistry<D::NodeId>,
        overlay: &mut OverlayHighlighter,
        channel: &NotificationChannel<T>,
    ) -> Reaction
    where
        D: Document,
        T: Transport,
    {
        match event {
            InteractionEvent::PointerEnter(reference) => {
                self.on_pointer_enter(reference, doc, registry, overlay)
            }
            InteractionEvent::PointerLeave(reference) => {
                self.on_pointer_leave(&reference, doc, overlay)
            }
            InteractionEvent::Click(reference) => {
                self.on_click(reference, doc, registry, channel)
            }
            InteractionEvent::ViewportResize => self.on_resize(doc, registry, overlay),
        }
    }

    /// Pointer entered an indicator: highlight its target.
    ///
    /// Entering while another indicator is hovered is treated as an implicit
    /// leave + enter; the overlay geometry is last-write-wins.
    fn on_pointer_enter<D>(
        &mut self,
        reference: ZoneRef,
        doc: &mut D,
        registry: &IndicatorRegistry<D::NodeId>,
        overlay: &mut OverlayHighlighter,
    ) -> Reaction
    where
        D: Document,
    {
        let Ok(resolved) = registry.resolve_target(doc, &reference) else {
            debug!("hover on stale reference {reference}, abandoning");
            return Reaction::StaleReference(reference);
        };
        overlay.show(doc, resolved.rect);
        self.state = InteractionState::Hovering(reference.clone());
        Reaction::OverlayShown(reference)
    }

    /// Pointer left the hovered indicator: drop the highlight.
    ///
    /// A leave for anything other than the currently hovered reference is
    /// ignored — it belongs to an interaction this machine is no longer in.
    fn on_pointer_leave<D>(
        &mut self,
        reference: &ZoneRef,
        doc: &mut D,
        overlay: &mut OverlayHighlighter,
    ) -> Reaction
    where
        D: Document,
    {
        match &self.state {
            InteractionState::Hovering(hovered) if hovered == reference => {
                overlay.hide(doc);
                self.state = InteractionState::Idle;
                Reaction::OverlayHidden
            }
            _ => Reaction::Ignored,
        }
    }

    /// Indicator clicked: publish the selection.
    ///
    /// Interaction state is left unchanged — a click does not end the hover,
    /// and a click arriving outside `Hovering` (touch input, synthetic
    /// events) still publishes.
    fn on_click<D, T>(
        &mut self,
        reference: ZoneRef,
        doc: &mut D,
        registry: &IndicatorRegistry<D::NodeId>,
        channel: &NotificationChannel<T>,
    ) -> Reaction
    where
        D: Document,
        T: Transport,
    {
        let Ok(resolved) = registry.resolve_target(doc, &reference) else {
            debug!("click on stale reference {reference}, abandoning");
            return Reaction::StaleReference(reference);
        };
        let scroll = doc.scroll_offset();
        let selection = ZoneSelection {
            top: resolved.rect.y0,
            left: resolved.rect.x0,
            width: resolved.rect.width(),
            height: resolved.rect.height(),
            zone_reference: String::from(reference.as_str()),
            scroll_top: scroll.y,
            scroll_left: scroll.x,
        };
        if let Err(err) = channel.publish(Topic::IceZoneOn, &selection) {
            warn!("failed to publish zone selection for {reference}: {err}");
            return Reaction::Ignored;
        }
        Reaction::SelectionPublished(selection)
    }

    /// Viewport resized: the indicator set is rebuilt.
    ///
    /// The overlay is force-hidden first so a highlight positioned against
    /// the old layout cannot survive the rebuild.
    fn on_resize<D>(
        &mut self,
        doc: &mut D,
        registry: &mut IndicatorRegistry<D::NodeId>,
        overlay: &mut OverlayHighlighter,
    ) -> Reaction
    where
        D: Document,
    {
        overlay.hide(doc);
        let outcome = registry.scan(doc);
        self.state = InteractionState::Idle;
        Reaction::Rescanned(outcome)
    }
}

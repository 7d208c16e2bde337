// Copyright 2025 the Icezone Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Icezone Channel: restricted one-way messaging from guest to host.
//!
//! ## Overview
//!
//! The guest document announces itself and reports zone selections to the
//! embedding host over a cross-window channel. This crate models that channel
//! as a strictly one-way, fire-and-forget abstraction: a
//! [`NotificationChannel`] is bound at construction to one target window
//! (behind the [`Transport`] trait) and one expected [`Origin`], and every
//! outbound message is stamped with that origin. There is no acknowledgment,
//! no retry, and no response type — the underlying transport is assumed to
//! deliver asynchronously, at most once, preserving send order per channel.
//!
//! ## Security contract
//!
//! The outgoing side always stamps the configured origin, so a conforming
//! transport can never deliver to a window of a different origin. The
//! receiving counterpart applies the same rule in reverse: [`OriginFilter`]
//! discards any inbound message whose sender origin does not equal the
//! expected origin exactly, before the payload is even parsed.
//!
//! ```rust
//! use icezone_channel::{NotificationChannel, Origin, RecordingTransport, SiteLoad, Topic};
//!
//! let origin = Origin::parse("http://127.0.0.1:8080").unwrap();
//! let channel = NotificationChannel::new(RecordingTransport::new(), origin);
//!
//! let payload = SiteLoad::for_location("http://127.0.0.1:8080/about", "http://127.0.0.1:8080");
//! channel.publish(Topic::GuestSiteLoad, &payload).unwrap();
//!
//! let sent = channel.transport().sent();
//! assert_eq!(sent.len(), 1);
//! assert_eq!(sent[0].origin, "http://127.0.0.1:8080");
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod wire;

pub use wire::{SiteLoad, Topic, ZoneSelection};

use alloc::string::String;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;

use log::{debug, warn};
use serde::Serialize;

/// A validated origin string (`scheme://host[:port]`).
///
/// The channel refuses to exist without one: [`Origin::parse`] rejects the
/// empty string, and [`NotificationChannel::new`] takes the origin by value.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Origin(String);

impl Origin {
    /// Parse an origin, rejecting the empty string.
    pub fn parse(value: impl Into<String>) -> Result<Self, OriginError> {
        let value = value.into();
        if value.is_empty() {
            return Err(OriginError::Empty);
        }
        Ok(Self(value))
    }

    /// The origin string as stamped on outbound messages.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Exact, case-sensitive comparison against a sender origin.
    pub fn matches(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Failure to construct an [`Origin`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OriginError {
    /// The origin string was empty.
    Empty,
}

impl fmt::Display for OriginError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("channel origin must not be empty"),
        }
    }
}

impl core::error::Error for OriginError {}

/// Failure to publish a message.
///
/// Publishing is fire-and-forget, so the only local failure mode is
/// serialization; transport-side failures are invisible by design.
#[derive(Debug)]
pub enum PublishError {
    /// The payload could not be serialized.
    Serialize(serde_json::Error),
}

impl fmt::Display for PublishError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Serialize(err) => write!(f, "failed to serialize payload: {err}"),
        }
    }
}

impl core::error::Error for PublishError {}

impl From<serde_json::Error> for PublishError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialize(err)
    }
}

/// The pre-bound cross-window send mechanism.
///
/// A transport wraps exactly one target window, fixed before the channel is
/// constructed. `post` requests asynchronous delivery scoped to
/// `target_origin` and returns immediately; it must never block the caller,
/// and it reports nothing back.
pub trait Transport {
    /// Request delivery of `message` to the bound window, restricted to
    /// `target_origin`.
    fn post(&self, message: &str, target_origin: &str);
}

/// The serialized shape of every outbound message.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Envelope<'a, P> {
    event_name: &'a str,
    payload: &'a P,
}

/// Origin-scoped one-way channel from the guest to its host.
#[derive(Clone, Debug)]
pub struct NotificationChannel<T> {
    transport: T,
    origin: Origin,
}

impl<T: Transport> NotificationChannel<T> {
    /// Bind a channel to a transport and an expected origin, both fixed for
    /// the channel's lifetime.
    pub fn new(transport: T, origin: Origin) -> Self {
        Self { transport, origin }
    }

    /// The configured origin.
    pub fn origin(&self) -> &Origin {
        &self.origin
    }

    /// The underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Serialize `{eventName, payload}` and request delivery to the bound
    /// window, stamped with the configured origin.
    ///
    /// Fire-and-forget: the call never blocks and nothing is reported back
    /// from the far side. Sends are handed to the transport in call order.
    pub fn publish<P: Serialize>(&self, topic: Topic, payload: &P) -> Result<(), PublishError> {
        let message = serde_json::to_string(&Envelope {
            event_name: topic.as_str(),
            payload,
        })?;
        debug!("publishing {topic} to {}", self.origin);
        self.transport.post(&message, self.origin.as_str());
        Ok(())
    }
}

/// A decoded inbound envelope, as produced by [`OriginFilter::screen`].
#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InboundEnvelope {
    /// The event name from the envelope.
    pub event_name: String,
    /// The raw payload.
    pub payload: serde_json::Value,
}

/// Receiving-side origin enforcement.
///
/// A counterpart listening on the host window screens every inbound message
/// through this filter before processing: messages from any origin other
/// than the expected one are dropped without being parsed, and malformed
/// envelopes from the right origin are dropped as well. Dropping is silent
/// toward users (a debug log only) — a mismatched message is not an error,
/// it is simply not for us.
#[derive(Clone, Debug)]
pub struct OriginFilter {
    expected: Origin,
}

impl OriginFilter {
    /// Create a filter for one expected origin.
    pub fn new(expected: Origin) -> Self {
        Self { expected }
    }

    /// The origin this filter accepts.
    pub fn expected(&self) -> &Origin {
        &self.expected
    }

    /// Screen an inbound message: returns the decoded envelope when
    /// `sender_origin` matches exactly and the message parses, `None`
    /// otherwise.
    pub fn screen(&self, sender_origin: &str, raw: &str) -> Option<InboundEnvelope> {
        if !self.expected.matches(sender_origin) {
            debug!(
                "dropping message from origin {sender_origin} (expected {})",
                self.expected
            );
            return None;
        }
        match serde_json::from_str(raw) {
            Ok(envelope) => Some(envelope),
            Err(err) => {
                warn!("dropping malformed message from {sender_origin}: {err}");
                None
            }
        }
    }
}

/// One message captured by a [`RecordingTransport`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sent {
    /// The serialized envelope.
    pub message: String,
    /// The origin the send was scoped to.
    pub origin: String,
}

/// A [`Transport`] that records every send instead of delivering it.
///
/// The in-memory counterpart to a real cross-window binding, used by tests
/// and the demo to observe the outbound side of the protocol.
#[derive(Debug, Default)]
pub struct RecordingTransport {
    sent: RefCell<Vec<Sent>>,
}

impl RecordingTransport {
    /// Create an empty recording transport.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every send so far, in send order.
    pub fn sent(&self) -> Vec<Sent> {
        self.sent.borrow().clone()
    }

    /// Number of sends so far.
    pub fn len(&self) -> usize {
        self.sent.borrow().len()
    }

    /// Whether nothing has been sent yet.
    pub fn is_empty(&self) -> bool {
        self.sent.borrow().is_empty()
    }
}

impl Transport for RecordingTransport {
    fn post(&self, message: &str, target_origin: &str) {
        self.sent.borrow_mut().push(Sent {
            message: String::from(message),
            origin: String::from(target_origin),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use serde_json::json;

    fn origin(value: &str) -> Origin {
        Origin::parse(value).unwrap()
    }

    #[test]
    fn empty_origin_is_refused() {
        assert_eq!(Origin::parse(""), Err(OriginError::Empty));
        assert!(Origin::parse("http://host.example").is_ok());
    }

    #[test]
    fn publish_wraps_payload_in_envelope() {
        let channel = NotificationChannel::new(RecordingTransport::new(), origin("http://h"));
        channel
            .publish(Topic::GuestSiteLoad, &json!({"location": "http://h/"}))
            .unwrap();

        let sent = channel.transport().sent();
        assert_eq!(sent.len(), 1);
        let value: serde_json::Value = serde_json::from_str(&sent[0].message).unwrap();
        assert_eq!(value["eventName"], "GUEST_SITE_LOAD");
        assert_eq!(value["payload"]["location"], "http://h/");
    }

    #[test]
    fn every_send_is_stamped_with_the_configured_origin() {
        let channel =
            NotificationChannel::new(RecordingTransport::new(), origin("http://host.example"));
        for i in 0..20 {
            channel.publish(Topic::IceZoneOn, &json!({ "n": i })).unwrap();
        }
        assert!(
            channel
                .transport()
                .sent()
                .iter()
                .all(|s| s.origin == "http://host.example")
        );
    }

    #[test]
    fn sends_preserve_call_order() {
        let channel = NotificationChannel::new(RecordingTransport::new(), origin("http://h"));
        channel.publish(Topic::GuestSiteLoad, &json!({"a": 1})).unwrap();
        channel.publish(Topic::IceZoneOn, &json!({"b": 2})).unwrap();

        let sent = channel.transport().sent();
        assert!(sent[0].message.contains("GUEST_SITE_LOAD"));
        assert!(sent[1].message.contains("ICE_ZONE_ON"));
    }

    #[test]
    fn filter_accepts_exact_origin_only() {
        let filter = OriginFilter::new(origin("http://host.example"));
        let raw = r#"{"eventName":"ICE_ZONE_ON","payload":{}}"#;

        assert!(filter.screen("http://host.example", raw).is_some());
        assert!(filter.screen("http://other.example", raw).is_none());
        assert!(filter.screen("http://host.example:80", raw).is_none());
        assert!(filter.screen("", raw).is_none());
    }

    #[test]
    fn filter_decodes_the_envelope() {
        let filter = OriginFilter::new(origin("http://h"));
        let envelope = filter
            .screen("http://h", r#"{"eventName":"GUEST_SITE_LOAD","payload":{"url":"/"}}"#)
            .unwrap();
        assert_eq!(envelope.event_name, "GUEST_SITE_LOAD");
        assert_eq!(envelope.payload, json!({"url": "/"}));
    }

    #[test]
    fn filter_drops_malformed_messages() {
        let filter = OriginFilter::new(origin("http://h"));
        assert!(filter.screen("http://h", "not json").is_none());
    }

    #[test]
    fn topics_render_their_wire_names() {
        assert_eq!(Topic::GuestSiteLoad.to_string(), "GUEST_SITE_LOAD");
        assert_eq!(Topic::IceZoneOn.to_string(), "ICE_ZONE_ON");
    }
}

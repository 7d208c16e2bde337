// Copyright 2025 the Icezone Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Wire contract toward the host: topics and payload shapes.
//!
//! Field names on the wire are camelCase; the structs here are the single
//! source of truth for them.

use alloc::string::String;
use core::fmt;

use serde::{Deserialize, Serialize};

/// Events the guest core publishes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Topic {
    /// Guest readiness announcement; sent exactly once per document
    /// lifetime, as early as possible.
    GuestSiteLoad,
    /// One zone selection; sent exactly once per qualifying click.
    IceZoneOn,
}

impl Topic {
    /// The event name as it appears on the wire.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::GuestSiteLoad => "GUEST_SITE_LOAD",
            Self::IceZoneOn => "ICE_ZONE_ON",
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload of [`Topic::GuestSiteLoad`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteLoad {
    /// Absolute URL of the guest document.
    pub location: String,
    /// The same URL with its origin stripped.
    pub url: String,
}

impl SiteLoad {
    /// Build the payload for a document at `href` under `origin`.
    pub fn for_location(href: &str, origin: &str) -> Self {
        let url = match href.strip_prefix(origin) {
            Some(rest) => String::from(rest),
            None => String::from(href),
        };
        Self {
            location: String::from(href),
            url,
        }
    }
}

/// Payload of [`Topic::IceZoneOn`]: one zone selection.
///
/// Produced at click time from the target's live geometry and the page
/// scroll offsets; never stored, only transmitted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneSelection {
    /// Document-space top of the target.
    pub top: f64,
    /// Document-space left of the target.
    pub left: f64,
    /// Rendered width of the target.
    pub width: f64,
    /// Rendered height of the target.
    pub height: f64,
    /// The reference of the clicked indicator.
    pub zone_reference: String,
    /// Vertical page scroll at click time.
    pub scroll_top: f64,
    /// Horizontal page scroll at click time.
    pub scroll_left: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn site_load_strips_the_origin() {
        let payload = SiteLoad::for_location("http://127.0.0.1:8080/news/1", "http://127.0.0.1:8080");
        assert_eq!(payload.location, "http://127.0.0.1:8080/news/1");
        assert_eq!(payload.url, "/news/1");
    }

    #[test]
    fn site_load_keeps_foreign_hrefs_whole() {
        let payload = SiteLoad::for_location("http://elsewhere/x", "http://127.0.0.1:8080");
        assert_eq!(payload.url, "http://elsewhere/x");
    }

    #[test]
    fn zone_selection_serializes_with_wire_names() {
        let selection = ZoneSelection {
            top: 50.0,
            left: 30.0,
            width: 200.0,
            height: 40.0,
            zone_reference: "feature-0".to_string(),
            scroll_top: 10.0,
            scroll_left: 0.0,
        };
        let value = serde_json::to_value(&selection).unwrap();
        assert_eq!(value["zoneReference"], "feature-0");
        assert_eq!(value["scrollTop"], 10.0);
        assert_eq!(value["scrollLeft"], 0.0);
        assert_eq!(value["top"], 50.0);
        assert_eq!(value["width"], 200.0);
    }
}

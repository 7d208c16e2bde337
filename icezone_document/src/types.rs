// Copyright 2025 the Icezone Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Zone-marker vocabulary shared across the icezone crates.

use alloc::format;
use alloc::string::String;
use core::fmt;

use kurbo::Rect;

/// Category value carried by a zone marker.
///
/// The marker convention treats any element bearing the designated attribute
/// with a **non-empty** value as a target; the value is the category. Empty
/// values are rejected at construction so a `ZoneCategory` held by the core
/// is always meaningful.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ZoneCategory(String);

impl ZoneCategory {
    /// Create a category from a marker value. Returns `None` for the empty
    /// string, which the convention excludes from scanning.
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        if value.is_empty() { None } else { Some(Self(value)) }
    }

    /// The raw category value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ZoneCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Session-unique reference binding an indicator to its target for one scan
/// generation.
///
/// A reference is formed from the target's category plus a monotonically
/// increasing serial (`"{category}-{serial}"`). The serial counter is owned
/// by the registry and never resets, so no reference string is ever reused
/// within a session, even across rebuilds. References are opaque to the host:
/// the only supported operations are equality and lookup.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ZoneRef(String);

impl ZoneRef {
    /// Mint the reference for one (target, scan-generation) pairing.
    pub fn mint(category: &ZoneCategory, serial: u64) -> Self {
        Self(format!("{}-{}", category.as_str(), serial))
    }

    /// The reference string as it appears in linkage attributes and on the
    /// wire.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ZoneRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One zone target as reported by a document scan: the node, its category,
/// and its document-space geometry at capture time.
#[derive(Clone, Debug, PartialEq)]
pub struct ZoneTarget<K> {
    /// The element carrying the zone marker.
    pub node: K,
    /// The marker's category value.
    pub category: ZoneCategory,
    /// Document-space bounds at the moment of the query.
    pub rect: Rect,
}

/// Location of the guest document, used for the startup notification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocumentLocation {
    /// Absolute URL of the document.
    pub href: String,
    /// Scheme + host (+ port) portion of `href`.
    pub origin: String,
}

impl DocumentLocation {
    /// The document URL with its origin stripped, leaving the site-relative
    /// path. Falls back to the absolute URL when `href` does not start with
    /// `origin`.
    pub fn site_relative(&self) -> String {
        match self.href.strip_prefix(self.origin.as_str()) {
            Some(rest) => String::from(rest),
            None => self.href.clone(),
        }
    }
}

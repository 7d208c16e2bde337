// Copyright 2025 the Icezone Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A full guest lifecycle over the in-memory document backend.
//!
//! This example walks the whole core: startup announcement, initial scan,
//! hover highlighting, click publishing, a layout shift, a viewport resize
//! rebuild, and a stale interaction that quietly does nothing.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p icezone_demos --example guest_walkthrough`

use icezone_channel::{NotificationChannel, Origin, Transport};
use icezone_document::{DocumentLocation, MemoryDocument, ZoneCategory, ZoneRef};
use icezone_guest::{Guest, GuestConfig};
use icezone_responder::InteractionEvent;
use kurbo::{Rect, Vec2};

/// Transport that prints every send instead of crossing a window boundary.
struct ConsoleTransport;

impl Transport for ConsoleTransport {
    fn post(&self, message: &str, target_origin: &str) {
        println!("  → host [{target_origin}]: {message}");
    }
}

fn main() {
    env_logger::init();

    // A small page with two editable zones and one plain element.
    let mut doc = MemoryDocument::with_location(DocumentLocation {
        href: String::from("http://127.0.0.1:8080/news/launch"),
        origin: String::from("http://127.0.0.1:8080"),
    });
    doc.insert_element(Rect::new(0.0, 0.0, 800.0, 40.0)); // nav bar, not editable
    let headline = doc.insert_zone(
        ZoneCategory::new("headline").unwrap(),
        Rect::new(30.0, 50.0, 230.0, 90.0),
    );
    doc.insert_zone(
        ZoneCategory::new("body").unwrap(),
        Rect::new(30.0, 110.0, 630.0, 400.0),
    );
    doc.set_scroll(Vec2::new(0.0, 10.0));

    println!("== Startup ==");
    let channel = NotificationChannel::new(
        ConsoleTransport,
        Origin::parse("http://127.0.0.1:8080").unwrap(),
    );
    let mut guest = Guest::start(doc, channel, GuestConfig::default());
    println!(
        "scanned {} zone(s); stylesheet requests: {:?}",
        guest.registry().len(),
        guest.document().stylesheets()
    );

    let refs: Vec<ZoneRef> = guest
        .registry()
        .indicators()
        .map(|i| i.reference.clone())
        .collect();

    println!("\n== Hover the headline ==");
    guest.handle(InteractionEvent::PointerEnter(refs[0].clone()));
    println!(
        "overlay visible={} at {:?}",
        guest.overlay().is_visible(),
        guest.overlay().geometry()
    );

    println!("\n== Click it ==");
    guest.handle(InteractionEvent::Click(refs[0].clone()));

    println!("\n== The headline moves, then gets clicked again ==");
    guest
        .document_mut()
        .set_rect(headline, Rect::new(30.0, 120.0, 230.0, 160.0));
    guest.handle(InteractionEvent::Click(refs[0].clone()));

    println!("\n== Viewport resize rebuilds every indicator ==");
    guest.handle(InteractionEvent::ViewportResize);
    println!(
        "indicators after rebuild: {} (references all fresh)",
        guest.registry().len()
    );

    println!("\n== A stale reference quietly does nothing ==");
    let reaction = guest.handle(InteractionEvent::Click(refs[0].clone()));
    println!("stale click reaction: {reaction:?}");
}

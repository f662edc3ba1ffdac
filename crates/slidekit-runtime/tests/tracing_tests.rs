#![forbid(unsafe_code)]

//! Tracing instrumentation tests.
//!
//! Engine spans and events enabled:
//!   cargo test -p slidekit-runtime --features tracing --test tracing_tests
//!
//! Without the feature only the no-op check runs.

#![cfg_attr(not(feature = "tracing"), allow(dead_code, unused_imports))]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use slidekit_core::Slide;
use slidekit_core::event::{CarouselEvent, ScrollBehavior};
use slidekit_runtime::simulator::{HostSimulator, run_until_settled};
use slidekit_runtime::{Carousel, CarouselConfig};

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;

// ============================================================================
// Test Infrastructure
// ============================================================================

/// A captured span or event with its fields.
#[derive(Debug, Clone)]
struct Captured {
    name: String,
    level: tracing::Level,
    fields: HashMap<String, String>,
    parent_name: Option<String>,
}

#[derive(Default)]
struct Store {
    spans: Vec<Captured>,
    events: Vec<Captured>,
}

struct Capture {
    store: Arc<Mutex<Store>>,
}

struct CaptureHandle {
    store: Arc<Mutex<Store>>,
}

impl CaptureHandle {
    fn spans(&self) -> Vec<Captured> {
        self.store.lock().unwrap().spans.clone()
    }

    fn events(&self) -> Vec<Captured> {
        self.store.lock().unwrap().events.clone()
    }
}

struct FieldVisitor(Vec<(String, String)>);

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0.push((field.name().to_string(), format!("{value:?}")));
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.0.push((field.name().to_string(), value.to_string()));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
}

impl<S> tracing_subscriber::Layer<S> for Capture
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(
        &self,
        attrs: &tracing::span::Attributes<'_>,
        _id: &tracing::span::Id,
        ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let mut visitor = FieldVisitor(Vec::new());
        attrs.record(&mut visitor);
        let parent_name = ctx
            .current_span()
            .id()
            .and_then(|id| ctx.span(id))
            .map(|span_ref| span_ref.name().to_string());
        self.store.lock().unwrap().spans.push(Captured {
            name: attrs.metadata().name().to_string(),
            level: *attrs.metadata().level(),
            fields: visitor.0.into_iter().collect(),
            parent_name,
        });
    }

    fn on_event(&self, event: &tracing::Event<'_>, ctx: tracing_subscriber::layer::Context<'_, S>) {
        let mut visitor = FieldVisitor(Vec::new());
        event.record(&mut visitor);
        let fields: HashMap<String, String> = visitor.0.into_iter().collect();
        let parent_name = ctx
            .event_span(event)
            .map(|span_ref| span_ref.name().to_string());
        self.store.lock().unwrap().events.push(Captured {
            name: fields.get("message").cloned().unwrap_or_default(),
            level: *event.metadata().level(),
            fields,
            parent_name,
        });
    }
}

fn with_captured<F>(f: F) -> CaptureHandle
where
    F: FnOnce(),
{
    let store = Arc::new(Mutex::new(Store::default()));
    let layer = Capture {
        store: store.clone(),
    };
    let subscriber = tracing_subscriber::registry().with(layer);
    tracing::subscriber::with_default(subscriber, f);
    CaptureHandle { store }
}

fn looped_carousel(t0: Instant) -> Carousel<HostSimulator> {
    let config = CarouselConfig::default().with_loop(true);
    let mut carousel = Carousel::new(config, HostSimulator::new()).expect("valid config");
    carousel.set_slides((0..4).map(Slide::new).collect());
    carousel.start(t0).expect("start");
    carousel
}

// ============================================================================
// Tests
// ============================================================================

#[test]
#[cfg(feature = "tracing")]
fn handle_event_opens_carousel_event_span() {
    let handle = with_captured(|| {
        let t0 = Instant::now();
        let mut carousel = looped_carousel(t0);
        carousel.handle_event(CarouselEvent::Scroll, t0).unwrap();
        carousel.handle_event(CarouselEvent::Frame, t0).unwrap();
    });

    let spans = handle.spans();
    let kinds: Vec<&str> = spans
        .iter()
        .filter(|s| s.name == "carousel_event")
        .filter_map(|s| s.fields.get("kind").map(String::as_str))
        .collect();
    assert_eq!(kinds, vec!["scroll", "frame"]);
    assert!(spans.iter().all(|s| s.level == tracing::Level::DEBUG || s.name != "carousel_event"));
}

#[test]
#[cfg(feature = "tracing")]
fn clone_correction_is_logged_with_target() {
    let handle = with_captured(|| {
        let t0 = Instant::now();
        let mut carousel = looped_carousel(t0);
        let now = run_until_settled(&mut carousel, t0);
        carousel.prev_slide(ScrollBehavior::Smooth).unwrap();
        run_until_settled(&mut carousel, now);
    });

    let events = handle.events();
    let issued = events
        .iter()
        .find(|e| e.name == "clone correction issued")
        .expect("correction event");
    assert_eq!(issued.fields.get("target_index").map(String::as_str), Some("3"));
    assert!(issued.fields.contains_key("generation"));
    let settled = events
        .iter()
        .find(|e| e.name == "clone settled in view")
        .expect("settle event");
    assert!(settled.fields.contains_key("generation"));
    assert!(events.iter().any(|e| e.name == "clone correction confirmed"));

    let emitted: Vec<_> = events
        .iter()
        .filter(|e| e.name == "slide-change emitted")
        .collect();
    assert_eq!(emitted.len(), 1);
}

#[test]
#[cfg(feature = "tracing")]
fn stale_report_warns_inside_tick() {
    use slidekit_core::event::IntersectionEntry;
    use slidekit_core::{SlideId, SlideKey};

    let handle = with_captured(|| {
        let t0 = Instant::now();
        let mut carousel = looped_carousel(t0);
        let ghost = SlideKey::real(SlideId::new(99));
        carousel
            .handle_event(
                CarouselEvent::Intersections(vec![IntersectionEntry::visible(ghost)]),
                t0,
            )
            .unwrap();
        carousel.tick(t0 + std::time::Duration::from_millis(100));
    });

    let warnings: Vec<_> = handle
        .events()
        .into_iter()
        .filter(|e| e.level == tracing::Level::WARN)
        .collect();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].name, "report for unregistered slide ignored");
    assert_eq!(warnings[0].parent_name, None);
}

#[test]
fn zero_overhead_without_subscriber() {
    let t0 = Instant::now();
    let mut carousel = looped_carousel(t0);
    let now = run_until_settled(&mut carousel, t0);
    carousel.next_slide(ScrollBehavior::Smooth).unwrap();
    run_until_settled(&mut carousel, now);
    assert_eq!(carousel.active_index(), 1);
}

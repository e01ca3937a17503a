#![cfg(feature = "tracing")]
//! Capability degradation is reported once, as a structured warning.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use reel_carousel::{Diagnostic, LoopConfig, LoopController, NavOptions, Strip};
use reel_core::capability::Capabilities;
use tracing_subscriber::layer::SubscriberExt;

#[derive(Debug, Clone)]
struct CapturedEvent {
    level: tracing::Level,
    fields: Vec<(String, String)>,
}

impl CapturedEvent {
    fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

struct FieldVisitor(Vec<(String, String)>);

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0.push((field.name().to_string(), format!("{value:?}")));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
}

struct Capture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for Capture {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
        let mut visitor = FieldVisitor(Vec::new());
        event.record(&mut visitor);
        self.events.lock().unwrap().push(CapturedEvent {
            level: *event.metadata().level(),
            fields: visitor.0,
        });
    }
}

fn with_captured<F: FnOnce()>(f: F) -> Vec<CapturedEvent> {
    let events = Arc::new(Mutex::new(Vec::new()));
    let subscriber = tracing_subscriber::registry().with(Capture {
        events: Arc::clone(&events),
    });
    tracing::subscriber::with_default(subscriber, f);
    let captured = events.lock().unwrap().clone();
    captured
}

fn warnings(events: &[CapturedEvent]) -> Vec<&CapturedEvent> {
    events
        .iter()
        .filter(|e| e.level == tracing::Level::WARN)
        .collect()
}

fn exercise(caps: Capabilities) -> Vec<Diagnostic> {
    let strip = Strip::uniform(6, 100.0, 0.0, 300.0);
    let items = strip.items();
    let mut carousel = LoopController::builder(strip, items)
        .config(LoopConfig::default().with_draggable(true))
        .capabilities(caps)
        .build();
    carousel.next(NavOptions::over(Duration::from_millis(200)));
    for _ in 0..20 {
        carousel.tick(Duration::from_millis(16));
    }
    carousel.on_layout_change();
    carousel.on_layout_change();
    carousel.diagnostics().to_vec()
}

#[test]
fn missing_drag_warns_once() {
    let mut diagnostics = Vec::new();
    let events = with_captured(|| diagnostics = exercise(Capabilities::none()));
    let warns = warnings(&events);
    assert_eq!(warns.len(), 1);
    assert_eq!(warns[0].field("message"), Some("loop.capability"));
    assert_eq!(warns[0].field("capability"), Some("drag"));
    assert_eq!(diagnostics, vec![Diagnostic::DragUnavailable]);
}

#[test]
fn missing_inertia_warns_once() {
    let mut diagnostics = Vec::new();
    let events = with_captured(|| diagnostics = exercise(Capabilities::drag_only()));
    let warns = warnings(&events);
    assert_eq!(warns.len(), 1);
    assert_eq!(warns[0].field("capability"), Some("inertia"));
    assert_eq!(diagnostics, vec![Diagnostic::InertiaUnavailable]);
}

#[test]
fn full_capabilities_are_silent() {
    let mut diagnostics = Vec::new();
    let events = with_captured(|| diagnostics = exercise(Capabilities::full()));
    assert!(warnings(&events).is_empty());
    assert!(diagnostics.is_empty());
}

#[test]
fn refresh_and_navigation_emit_structured_events() {
    let events = with_captured(|| {
        exercise(Capabilities::full());
    });
    let names: Vec<&str> = events.iter().filter_map(|e| e.field("message")).collect();
    assert!(names.contains(&"loop.navigate"));
    assert!(names.contains(&"loop.refresh"));
}

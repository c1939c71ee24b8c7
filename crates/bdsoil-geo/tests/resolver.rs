//! Resolver behaviour against in-process provider doubles.
//!
//! All tests run on a paused Tokio clock, so debounce periods and provider
//! timeouts elapse instantly and deterministically.

#![allow(clippy::unwrap_used, clippy::float_cmp)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use bdsoil_geo::{
    ForwardGeocoder, GeoError, GeoResolver, ResolveState, ResolverSettings, ReverseGeocoder,
};
use bdsoil_types::GeoLocation;

// ---------------------------------------------------------------------------
// Doubles
// ---------------------------------------------------------------------------

#[derive(Clone, Default)]
struct RecordingReverse {
    calls: Arc<Mutex<Vec<(f64, f64)>>>,
    fail: bool,
    delay: Option<Duration>,
}

impl RecordingReverse {
    fn calls(&self) -> Vec<(f64, f64)> {
        self.calls.lock().unwrap().clone()
    }
}

impl ReverseGeocoder for RecordingReverse {
    fn name(&self) -> &'static str {
        "recording"
    }

    async fn reverse(&self, lat: f64, lng: f64) -> Result<String, GeoError> {
        self.calls.lock().unwrap().push((lat, lng));
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail {
            return Err(GeoError::Provider {
                provider: "recording",
                message: "service unavailable".to_owned(),
            });
        }
        Ok(format!("Near {lat}, {lng}"))
    }
}

#[derive(Clone)]
struct StubForward {
    name: &'static str,
    result: Option<GeoLocation>,
    delay: Option<Duration>,
    calls: Arc<AtomicUsize>,
}

impl StubForward {
    fn ok(name: &'static str, lat: f64, lng: f64, address: &str) -> Self {
        Self {
            name,
            result: Some(GeoLocation {
                lat,
                lng,
                address: address.to_owned(),
            }),
            delay: None,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn failing(name: &'static str) -> Self {
        Self {
            name,
            result: None,
            delay: None,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }
}

impl ForwardGeocoder for StubForward {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn locate(&self) -> Result<GeoLocation, GeoError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.result.clone().ok_or_else(|| GeoError::Provider {
            provider: self.name,
            message: "returned 429 Too Many Requests".to_owned(),
        })
    }
}

fn reverse_only(reverse: RecordingReverse) -> GeoResolver<RecordingReverse, StubForward> {
    GeoResolver::new(reverse, Vec::new(), ResolverSettings::default())
}

// ---------------------------------------------------------------------------
// Debounce
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn rapid_edits_resolve_once_for_the_last_value() {
    let reverse = RecordingReverse::default();
    let resolver = reverse_only(reverse.clone());

    assert_eq!(resolver.edit("23.1, 90.1"), ResolveState::Debouncing);
    tokio::time::sleep(Duration::from_millis(300)).await;
    resolver.edit("23.2, 90.2");
    tokio::time::sleep(Duration::from_millis(300)).await;
    resolver.edit("23.3, 90.3");
    assert!(reverse.calls().is_empty());

    tokio::time::sleep(Duration::from_millis(900)).await;

    assert_eq!(reverse.calls(), vec![(23.3, 90.3)]);
    let field = resolver.field();
    assert_eq!(field.state, ResolveState::Resolved);
    assert_eq!(field.address, "Near 23.3, 90.3");
    assert!(field.confirmed);
}

#[tokio::test(start_paused = true)]
async fn nothing_resolves_before_the_quiet_period() {
    let reverse = RecordingReverse::default();
    let resolver = reverse_only(reverse.clone());

    resolver.edit("23.8103, 90.4125");
    tokio::time::sleep(Duration::from_millis(700)).await;
    assert!(reverse.calls().is_empty());
    assert_eq!(resolver.field().state, ResolveState::Debouncing);

    resolver.settle().await;
    assert_eq!(reverse.calls().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn invalid_edit_cancels_the_pending_resolution() {
    let reverse = RecordingReverse::default();
    let resolver = reverse_only(reverse.clone());

    resolver.edit("23.8103, 90.4125");
    assert_eq!(resolver.edit("23.8"), ResolveState::Invalid);
    assert!(!resolver.can_fetch());

    tokio::time::sleep(Duration::from_secs(2)).await;
    assert!(reverse.calls().is_empty());
    assert_eq!(resolver.field().state, ResolveState::Invalid);
}

#[tokio::test(start_paused = true)]
async fn manual_fetch_bypasses_and_cancels_the_debounce() {
    let reverse = RecordingReverse::default();
    let resolver = reverse_only(reverse.clone());

    resolver.edit("23.8103, 90.4125");
    assert!(resolver.can_fetch());
    let field = resolver.fetch_now().await.unwrap();
    assert_eq!(field.address, "Near 23.8103, 90.4125");

    tokio::time::sleep(Duration::from_secs(2)).await;
    assert_eq!(reverse.calls().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn edit_during_a_slow_lookup_supersedes_it() {
    let reverse = RecordingReverse {
        delay: Some(Duration::from_secs(3)),
        ..RecordingReverse::default()
    };
    let resolver = reverse_only(reverse.clone());

    resolver.edit("23.1, 90.1");
    tokio::time::sleep(Duration::from_millis(1000)).await;
    assert_eq!(reverse.calls(), vec![(23.1, 90.1)]);
    assert_eq!(resolver.field().state, ResolveState::Resolving);

    resolver.edit("23.2, 90.2");
    tokio::time::sleep(Duration::from_secs(5)).await;

    assert_eq!(reverse.calls(), vec![(23.1, 90.1), (23.2, 90.2)]);
    let field = resolver.field();
    assert_eq!(field.gps_text, "23.2, 90.2");
    assert_eq!(field.address, "Near 23.2, 90.2");
    assert_eq!(field.state, ResolveState::Resolved);
    assert!(field.confirmed);
}

#[tokio::test(start_paused = true)]
async fn current_location_cancels_the_debounce() {
    let reverse = RecordingReverse::default();
    let resolver = GeoResolver::new(
        reverse.clone(),
        vec![StubForward::ok("a", 23.7104, 90.4074, "Dhaka, BD")],
        ResolverSettings::default(),
    );

    resolver.edit("23.1, 90.1");
    let field = resolver.use_current_location().await.unwrap();
    assert_eq!(field.address, "Dhaka, BD");

    tokio::time::sleep(Duration::from_secs(2)).await;

    assert!(reverse.calls().is_empty());
    let field = resolver.field();
    assert_eq!(field.gps_text, "23.7104, 90.4074");
    assert_eq!(field.address, "Dhaka, BD");
    assert_eq!(field.state, ResolveState::Resolved);
}

#[tokio::test(start_paused = true)]
async fn manual_fetch_rejects_invalid_text() {
    let resolver = reverse_only(RecordingReverse::default());
    resolver.edit("abc,90");
    assert!(matches!(
        resolver.fetch_now().await,
        Err(GeoError::InvalidCoordinates(_))
    ));
}

// ---------------------------------------------------------------------------
// Reverse fallback
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn reverse_failure_shows_the_coordinates() {
    let reverse = RecordingReverse {
        fail: true,
        ..RecordingReverse::default()
    };
    let resolver = reverse_only(reverse);

    let field = resolver.resolve_text("23.8103, 90.4125").await.unwrap();
    assert_eq!(field.address, "23.8103, 90.4125");
    assert_eq!(field.state, ResolveState::Resolved);
}

#[tokio::test(start_paused = true)]
async fn reverse_timeout_shows_the_coordinates() {
    let reverse = RecordingReverse {
        delay: Some(Duration::from_secs(30)),
        ..RecordingReverse::default()
    };
    let resolver = reverse_only(reverse);

    let field = resolver.resolve_text("-23.8,90.4").await.unwrap();
    assert_eq!(field.address, "-23.8, 90.4");
}

// ---------------------------------------------------------------------------
// Forward chain
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn second_provider_answers_when_the_first_fails() {
    let first = StubForward::failing("a");
    let second = StubForward::ok("b", 23.7104, 90.4074, "Dhaka, BD");
    let resolver = GeoResolver::new(
        RecordingReverse::default(),
        vec![first.clone(), second.clone()],
        ResolverSettings::default(),
    );

    let field = resolver.use_current_location().await.unwrap();
    assert_eq!(field.gps_text, "23.7104, 90.4074");
    assert_eq!(field.address, "Dhaka, BD");
    assert_eq!(field.state, ResolveState::Resolved);
    assert_eq!(first.calls.load(Ordering::SeqCst), 1);
    assert_eq!(second.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn first_provider_success_skips_the_second() {
    let first = StubForward::ok("a", 1.0, 2.0, "Here");
    let second = StubForward::ok("b", 3.0, 4.0, "There");
    let resolver = GeoResolver::new(
        RecordingReverse::default(),
        vec![first, second.clone()],
        ResolverSettings::default(),
    );

    assert_eq!(resolver.use_current_location().await.unwrap().address, "Here");
    assert_eq!(second.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test(start_paused = true)]
async fn hung_provider_times_out_and_falls_through() {
    let mut first = StubForward::ok("a", 1.0, 2.0, "Too late");
    first.delay = Some(Duration::from_secs(60));
    let second = StubForward::ok("b", 3.0, 4.0, "There");
    let resolver = GeoResolver::new(
        RecordingReverse::default(),
        vec![first, second],
        ResolverSettings::default(),
    );

    assert_eq!(resolver.use_current_location().await.unwrap().address, "There");
}

#[tokio::test(start_paused = true)]
async fn all_providers_failing_is_reported() {
    let resolver = GeoResolver::new(
        RecordingReverse::default(),
        vec![StubForward::failing("a"), StubForward::failing("b")],
        ResolverSettings::default(),
    );

    let err = resolver.use_current_location().await.unwrap_err();
    assert!(matches!(err, GeoError::AllProvidersFailed(_)));
    assert_eq!(resolver.field().state, ResolveState::Failed);
}

// ---------------------------------------------------------------------------
// Map picks
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn map_pick_after_resolution_wins() {
    let resolver = reverse_only(RecordingReverse::default());
    resolver.resolve_text("23.8103, 90.4125").await.unwrap();

    let raw = r#"{"lat": 22.3569, "lng": 91.7832, "address": "Chattogram"}"#;
    let picked = bdsoil_geo::receive_map_message(raw).unwrap();
    let field = resolver.accept_map_pick(&picked);

    assert_eq!(field.gps_text, "22.356900, 91.783200");
    assert_eq!(field.address, "Chattogram");
    assert_eq!(resolver.field(), field);
}

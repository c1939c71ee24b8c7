//! Location resolution for a single GPS input field.
//!
//! # States
//!
//! ```text
//! Idle -> (Invalid | Debouncing) -> Resolving -> (Resolved | Failed)
//! ```
//!
//! Every edit is validated on the spot. A valid edit re-arms an 800 ms
//! debounce timer and aborts whatever the previous timer started, so at
//! most one debounce-triggered resolution is ever in flight. The manual
//! actions ([`GeoResolver::fetch_now`], [`GeoResolver::use_current_location`])
//! cancel the timer and resolve immediately.
//!
//! Reverse lookups never fail from the caller's point of view: a provider
//! error or timeout leaves the coordinate text in the address slot.
//! Forward lookups walk the provider chain in order and only fail when
//! every provider has failed.
//!
//! Map picks ([`GeoResolver::accept_map_pick`]) write the field directly.
//! Whichever write lands last wins.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use bdsoil_types::GeoLocation;
use serde::Serialize;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::coords::{format_map_coords, is_valid_gps, parse_coords};
use crate::error::GeoError;
use crate::provider::{ForwardGeocoder, ReverseGeocoder, coords_fallback};

/// Default quiet period before an edit is resolved.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(800);

/// Default bound on a single provider call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Where the field is in its resolution lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ResolveState {
    /// Nothing entered yet.
    Idle,
    /// The current text is not a coordinate pair. Fetching is disabled.
    Invalid,
    /// Waiting for the quiet period to elapse.
    Debouncing,
    /// A provider call is in flight.
    Resolving,
    /// The field holds a resolved address.
    Resolved,
    /// A forward lookup exhausted every provider.
    Failed,
}

/// Snapshot of the location input field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationField {
    /// GPS text as typed or filled in.
    pub gps_text: String,
    /// Address text (the land's location).
    pub address: String,
    /// Whether the address came from a resolution or a map pick.
    pub confirmed: bool,
    /// Lifecycle state.
    pub state: ResolveState,
}

impl Default for LocationField {
    fn default() -> Self {
        Self {
            gps_text: String::new(),
            address: String::new(),
            confirmed: false,
            state: ResolveState::Idle,
        }
    }
}

/// Timing knobs for the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolverSettings {
    /// Quiet period after an edit.
    pub debounce: Duration,
    /// Bound on each provider call.
    pub timeout: Duration,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

struct Shared<R, F> {
    reverse: R,
    forward: Vec<F>,
    settings: ResolverSettings,
    field: Mutex<LocationField>,
    /// Bumped by every edit and manual action. A resolution only writes
    /// its result if the generation it started under is still current.
    generation: AtomicU64,
}

impl<R: ReverseGeocoder, F: ForwardGeocoder> Shared<R, F> {
    fn field(&self) -> MutexGuard<'_, LocationField> {
        self.field.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn next_generation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst).wrapping_add(1)
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    /// Reverse-geocode, degrading to the coordinate text on any failure.
    async fn reverse_address(&self, lat: f64, lng: f64) -> String {
        let provider = self.reverse.name();
        match tokio::time::timeout(self.settings.timeout, self.reverse.reverse(lat, lng)).await {
            Ok(Ok(address)) => address,
            Ok(Err(e)) => {
                warn!(provider, error = %e, "reverse geocode failed, using coordinates");
                coords_fallback(lat, lng)
            }
            Err(_) => {
                warn!(provider, "reverse geocode timed out, using coordinates");
                coords_fallback(lat, lng)
            }
        }
    }

    /// Resolve a coordinate pair and write it to the field if still current.
    async fn resolve_reverse(&self, generation: u64, lat: f64, lng: f64) -> LocationField {
        self.field().state = ResolveState::Resolving;
        let address = self.reverse_address(lat, lng).await;

        let mut field = self.field();
        if self.is_current(generation) {
            field.address = address;
            field.confirmed = true;
            field.state = ResolveState::Resolved;
            info!(lat, lng, address = %field.address, "location resolved");
        } else {
            debug!(generation, "resolution superseded, result discarded");
        }
        field.clone()
    }

    /// Walk the forward chain in order, returning the first success.
    async fn forward_locate(&self) -> Result<GeoLocation, GeoError> {
        let mut failures = Vec::with_capacity(self.forward.len());
        for provider in &self.forward {
            let name = provider.name();
            match tokio::time::timeout(self.settings.timeout, provider.locate()).await {
                Ok(Ok(location)) => {
                    info!(provider = name, lat = location.lat, lng = location.lng, "current location found");
                    return Ok(location);
                }
                Ok(Err(e)) => {
                    warn!(provider = name, error = %e, "location provider failed, trying next");
                    failures.push(e.to_string());
                }
                Err(_) => {
                    warn!(provider = name, "location provider timed out, trying next");
                    failures.push(GeoError::Timeout { provider: name }.to_string());
                }
            }
        }
        if failures.is_empty() {
            failures.push("no location providers configured".to_owned());
        }
        Err(GeoError::AllProvidersFailed(failures.join("; ")))
    }
}

/// Debounced location resolver for one input field.
pub struct GeoResolver<R, F> {
    shared: Arc<Shared<R, F>>,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl<R: ReverseGeocoder, F: ForwardGeocoder> GeoResolver<R, F> {
    /// Create a resolver over a reverse provider and an ordered forward chain.
    pub fn new(reverse: R, forward: Vec<F>, settings: ResolverSettings) -> Self {
        Self {
            shared: Arc::new(Shared {
                reverse,
                forward,
                settings,
                field: Mutex::new(LocationField::default()),
                generation: AtomicU64::new(0),
            }),
            pending: Mutex::new(None),
        }
    }

    /// Current field contents.
    pub fn field(&self) -> LocationField {
        self.shared.field().clone()
    }

    /// Whether the manual fetch action is enabled.
    pub fn can_fetch(&self) -> bool {
        is_valid_gps(&self.shared.field().gps_text)
    }

    /// Record an edit of the GPS text.
    ///
    /// Invalid text cancels any pending resolution. Valid text arms the
    /// debounce timer, superseding the previous one. Must be called from
    /// within a Tokio runtime.
    pub fn edit(&self, text: &str) -> ResolveState {
        self.cancel_pending();
        let generation = self.shared.next_generation();

        let valid = is_valid_gps(text);
        {
            let mut field = self.shared.field();
            field.gps_text = text.to_owned();
            field.confirmed = false;
            field.state = if valid {
                ResolveState::Debouncing
            } else {
                ResolveState::Invalid
            };
        }

        let Ok((lat, lng)) = parse_coords(text) else {
            return ResolveState::Invalid;
        };

        let shared = Arc::clone(&self.shared);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(shared.settings.debounce).await;
            if shared.is_current(generation) {
                shared.resolve_reverse(generation, lat, lng).await;
            }
        });
        *self.pending_slot() = Some(handle);
        debug!(generation, "debounce re-armed");
        ResolveState::Debouncing
    }

    /// Resolve the current GPS text now, bypassing the debounce timer.
    pub async fn fetch_now(&self) -> Result<LocationField, GeoError> {
        self.cancel_pending();
        let text = self.shared.field().gps_text.clone();
        let (lat, lng) = parse_coords(&text)?;
        let generation = self.shared.next_generation();
        Ok(self.shared.resolve_reverse(generation, lat, lng).await)
    }

    /// Replace the GPS text and resolve it now.
    pub async fn resolve_text(&self, text: &str) -> Result<LocationField, GeoError> {
        self.cancel_pending();
        let (lat, lng) = parse_coords(text)?;
        {
            let mut field = self.shared.field();
            field.gps_text = text.trim().to_owned();
            field.confirmed = false;
        }
        let generation = self.shared.next_generation();
        Ok(self.shared.resolve_reverse(generation, lat, lng).await)
    }

    /// Fill the field from the caller's network location.
    ///
    /// Providers are tried in order; the error is returned only when all
    /// of them fail.
    pub async fn use_current_location(&self) -> Result<LocationField, GeoError> {
        self.cancel_pending();
        let generation = self.shared.next_generation();
        self.shared.field().state = ResolveState::Resolving;

        let result = self.shared.forward_locate().await;

        let mut field = self.shared.field();
        if !self.shared.is_current(generation) {
            debug!(generation, "current location superseded, result discarded");
            return result.map(|_| field.clone());
        }
        match result {
            Ok(location) => {
                field.gps_text = location.coords_text();
                field.address = location.address;
                field.confirmed = true;
                field.state = ResolveState::Resolved;
                Ok(field.clone())
            }
            Err(e) => {
                field.state = ResolveState::Failed;
                Err(e)
            }
        }
    }

    /// Fill the field from a map click.
    ///
    /// Does not touch the debounce timer. A resolution that finishes
    /// afterwards overwrites the address.
    pub fn accept_map_pick(&self, location: &GeoLocation) -> LocationField {
        let mut field = self.shared.field();
        field.gps_text = format_map_coords(location.lat, location.lng);
        field.address.clone_from(&location.address);
        field.confirmed = true;
        field.state = ResolveState::Resolved;
        info!(lat = location.lat, lng = location.lng, "map location accepted");
        field.clone()
    }

    /// Wait for a pending debounce-triggered resolution to finish.
    ///
    /// Returns immediately when nothing is pending.
    pub async fn settle(&self) {
        let handle = self.pending_slot().take();
        if let Some(handle) = handle
            && let Err(e) = handle.await
            && !e.is_cancelled()
        {
            warn!(error = %e, "debounce task failed");
        }
    }

    fn pending_slot(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn cancel_pending(&self) {
        if let Some(handle) = self.pending_slot().take()
            && !handle.is_finished()
        {
            handle.abort();
            debug!("pending resolution superseded");
        }
    }
}

impl<R, F> Drop for GeoResolver<R, F> {
    fn drop(&mut self) {
        if let Some(handle) = self
            .pending
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            handle.abort();
        }
    }
}

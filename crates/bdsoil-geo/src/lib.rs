//! Land geocoding for the BDSoil farm advisory tool.
//!
//! Turns what the user types (or clicks) into a confirmed location for a
//! new land parcel.
//!
//! # Modules
//!
//! - [`coords`] -- The `lat, lng` grammar and parsing
//! - [`provider`] -- Reverse (Nominatim) and forward (ipapi.co, ipinfo.io) providers
//! - [`resolver`] -- [`GeoResolver`]: validation, debounce, fallback chain
//! - [`bridge`] -- Map-bridge message decoding
//! - [`error`] -- [`GeoError`]

pub mod bridge;
pub mod coords;
pub mod error;
pub mod provider;
pub mod resolver;

pub use bridge::{parse_map_message, receive_map_message};
pub use coords::{format_map_coords, is_valid_gps, parse_coords};
pub use error::GeoError;
pub use provider::{
    ForwardBackend, ForwardGeocoder, IpApiClient, IpInfoClient, NominatimClient, ProviderConfig,
    ReverseGeocoder, coords_fallback, join_address,
};
pub use resolver::{
    DEFAULT_DEBOUNCE, DEFAULT_TIMEOUT, GeoResolver, LocationField, ResolveState, ResolverSettings,
};

/// The resolver wired to the production HTTP providers.
pub type HttpGeoResolver = GeoResolver<NominatimClient, ForwardBackend>;

/// Build a resolver over the production HTTP providers.
pub fn http_resolver(
    config: &ProviderConfig,
    debounce: std::time::Duration,
) -> Result<HttpGeoResolver, GeoError> {
    Ok(GeoResolver::new(
        NominatimClient::new(config)?,
        ForwardBackend::chain(config)?,
        ResolverSettings {
            debounce,
            timeout: config.timeout,
        },
    ))
}

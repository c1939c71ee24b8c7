//! Error types for the `bdsoil-geo` crate.

/// Errors that can occur while resolving a location.
#[derive(Debug, thiserror::Error)]
pub enum GeoError {
    /// The text is not a `lat, lng` coordinate pair.
    #[error("invalid GPS coordinates: {0:?} (expected e.g. 23.8103, 90.4125)")]
    InvalidCoordinates(String),

    /// A provider call failed or returned an unusable response.
    #[error("{provider} geocoding failed: {message}")]
    Provider {
        /// Provider name for logging.
        provider: &'static str,
        /// What went wrong.
        message: String,
    },

    /// A provider did not answer within the configured timeout.
    #[error("{provider} geocoding timed out")]
    Timeout {
        /// Provider name for logging.
        provider: &'static str,
    },

    /// Every provider in the forward chain failed.
    #[error("location lookup failed: {0}")]
    AllProvidersFailed(String),

    /// A map-bridge message could not be decoded.
    #[error("malformed map message: {0}")]
    MalformedMessage(String),

    /// The HTTP client could not be built.
    #[error("HTTP client setup failed: {0}")]
    Client(String),
}

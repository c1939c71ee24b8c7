//! Messages from the embedded map surface.
//!
//! The map sends one JSON object per click:
//! `{ "lat": number, "lng": number, "address": string }`.

use bdsoil_types::GeoLocation;
use serde::Deserialize;
use tracing::warn;

use crate::error::GeoError;

#[derive(Debug, Deserialize)]
struct MapMessage {
    lat: f64,
    lng: f64,
    address: String,
}

/// Decode a map-bridge message.
pub fn parse_map_message(raw: &str) -> Result<GeoLocation, GeoError> {
    let message: MapMessage =
        serde_json::from_str(raw).map_err(|e| GeoError::MalformedMessage(e.to_string()))?;
    if !message.lat.is_finite() || !message.lng.is_finite() {
        return Err(GeoError::MalformedMessage(
            "coordinates must be finite numbers".to_owned(),
        ));
    }
    Ok(GeoLocation {
        lat: message.lat,
        lng: message.lng,
        address: message.address,
    })
}

/// Decode a map-bridge message, logging and dropping it when malformed.
pub fn receive_map_message(raw: &str) -> Option<GeoLocation> {
    match parse_map_message(raw) {
        Ok(location) => Some(location),
        Err(e) => {
            warn!(error = %e, "map message dropped");
            None
        }
    }
}

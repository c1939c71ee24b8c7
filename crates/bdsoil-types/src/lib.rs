//! Shared type definitions for the BDSoil farm advisory tool.
//!
//! This crate is the single source of truth for the records that flow
//! between the reference catalog, the advisory engine, the geocoder, the
//! land ledger and the report exporters.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe wrappers around SQLite row ids
//! - [`enums`] -- Soil types, water availability, season choices
//! - [`structs`] -- Crops, fertilizer profiles, pests, lands, users, locations

pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{ParseLabelError, SEASON_CHOICES, SoilType, WaterAvailability};
pub use ids::{LandId, UserId};
pub use structs::{
    ACRES_PER_HECTARE, Crop, DEFAULT_YIELD_PER_HECTARE, FertilizerProfile, GeoLocation, Land,
    PestRecord, User, WaterNeed,
};

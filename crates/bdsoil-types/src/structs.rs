//! Record types for reference data, land parcels, users and resolved
//! locations.

use serde::{Deserialize, Serialize};

use crate::enums::SoilType;
use crate::ids::{LandId, UserId};

/// Conversion factor from a per-acre to a per-hectare quantity.
pub const ACRES_PER_HECTARE: f64 = 2.471_05;

/// Yield assumed when the crop table leaves `yield_per_acre` blank.
pub const DEFAULT_YIELD_PER_HECTARE: f64 = 5.0;

// ---------------------------------------------------------------------------
// Crop
// ---------------------------------------------------------------------------

/// Irrigation demand of a crop, derived from its season label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WaterNeed {
    /// Monsoon crops.
    High,
    /// Everything else.
    Medium,
}

impl WaterNeed {
    /// Derive the water need from a season label: anything grown in the
    /// monsoon needs a lot of water.
    pub fn for_season(season: &str) -> Self {
        if season.contains("Monsoon") {
            Self::High
        } else {
            Self::Medium
        }
    }

    /// Display label.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
        }
    }
}

impl core::fmt::Display for WaterNeed {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A crop from the reference table. Immutable once the catalog is loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Crop {
    /// Unique crop name, e.g. `Rice (Aman)`.
    pub name: String,
    /// Free-text season label, e.g. `Kharif (Monsoon)`.
    pub season: String,
    /// Free-text soil label, e.g. `Clay Loam`.
    pub soil_type: String,
    /// Expected yield in tons per hectare.
    pub yield_per_hectare: f64,
    /// Water need derived from the season.
    pub water_need: WaterNeed,
}

impl Crop {
    /// Build a crop, deriving its water need from the season label.
    pub fn new(name: String, season: String, soil_type: String, yield_per_hectare: f64) -> Self {
        let water_need = WaterNeed::for_season(&season);
        Self {
            name,
            season,
            soil_type,
            yield_per_hectare,
            water_need,
        }
    }

    /// Whether this crop grows on the given soil (case-insensitive exact).
    pub fn grows_on(&self, soil: SoilType) -> bool {
        soil.matches_label(&self.soil_type)
    }
}

// ---------------------------------------------------------------------------
// FertilizerProfile
// ---------------------------------------------------------------------------

/// Nutrient recommendation for one crop, per acre.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FertilizerProfile {
    /// Crop the profile applies to.
    pub crop: String,
    /// Nitrogen, kg/acre.
    pub nitrogen: f64,
    /// Phosphorus, kg/acre.
    pub phosphorus: f64,
    /// Potassium, kg/acre.
    pub potassium: f64,
    /// Organic matter, tons/acre.
    pub organic_matter: f64,
    /// Lime, kg/acre.
    pub lime: f64,
}

impl core::fmt::Display for FertilizerProfile {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "Recommended for {}:", self.crop)?;
        writeln!(f, "• Nitrogen: {} kg/acre", self.nitrogen)?;
        writeln!(f, "• Phosphorus: {} kg/acre", self.phosphorus)?;
        writeln!(f, "• Potassium: {} kg/acre", self.potassium)?;
        writeln!(f, "• Organic Matter: {} tons/acre", self.organic_matter)?;
        write!(f, "• Lime: {} kg/acre", self.lime)
    }
}

// ---------------------------------------------------------------------------
// PestRecord
// ---------------------------------------------------------------------------

/// A pest or disease and how to control it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PestRecord {
    /// Pest or disease name, e.g. `Brown Planthopper`.
    pub name: String,
    /// Recommended control measure.
    pub control_measure: String,
}

// ---------------------------------------------------------------------------
// Land
// ---------------------------------------------------------------------------

/// A registered land parcel, exclusively owned by one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Land {
    /// Row id.
    pub id: LandId,
    /// Owning user.
    pub user_id: UserId,
    /// Human-readable location or address.
    pub location: String,
    /// Area in hectares, always positive.
    pub area: f64,
    /// Soil classification.
    pub soil_type: SoilType,
    /// `lat, lng` text, if the owner supplied coordinates.
    pub gps_coords: Option<String>,
}

// ---------------------------------------------------------------------------
// User
// ---------------------------------------------------------------------------

/// A registered farmer account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Row id.
    pub id: UserId,
    /// Unique login name.
    pub username: String,
    /// Lowercase hex SHA-256 of the password.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// National id number.
    pub national_id: String,
    /// Full name.
    pub name: String,
    /// Phone number.
    pub phone: String,
    /// Path to a profile picture, if one was uploaded.
    pub profile_pic: Option<String>,
}

// ---------------------------------------------------------------------------
// GeoLocation
// ---------------------------------------------------------------------------

/// A resolved location: coordinates plus a human-readable address.
///
/// Produced by the geocoding providers and by the map bridge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
    /// Address text.
    pub address: String,
}

impl GeoLocation {
    /// The coordinate pair as `lat, lng` text.
    pub fn coords_text(&self) -> String {
        format!("{}, {}", self.lat, self.lng)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]

    use super::*;

    #[test]
    fn monsoon_crops_need_more_water() {
        assert_eq!(WaterNeed::for_season("Kharif (Monsoon)"), WaterNeed::High);
        assert_eq!(WaterNeed::for_season("Rabi (Winter)"), WaterNeed::Medium);
        // The match is case-sensitive, as in the reference data.
        assert_eq!(WaterNeed::for_season("monsoon"), WaterNeed::Medium);
    }

    #[test]
    fn crop_soil_match_ignores_case() {
        let crop = Crop::new(
            "Jute".to_owned(),
            "Kharif (Monsoon)".to_owned(),
            "clay loam".to_owned(),
            5.0,
        );
        assert!(crop.grows_on(SoilType::ClayLoam));
        assert!(!crop.grows_on(SoilType::Loam));
        assert_eq!(crop.water_need, WaterNeed::High);
    }

    #[test]
    fn fertilizer_profile_renders_five_lines() {
        let profile = FertilizerProfile {
            crop: "Wheat".to_owned(),
            nitrogen: 40.0,
            phosphorus: 20.5,
            potassium: 15.0,
            organic_matter: 2.0,
            lime: 0.0,
        };
        let text = profile.to_string();
        assert!(text.starts_with("Recommended for Wheat:"));
        assert!(text.contains("• Phosphorus: 20.5 kg/acre"));
        assert!(text.ends_with("• Lime: 0 kg/acre"));
        assert_eq!(text.lines().count(), 6);
    }

    #[test]
    fn coords_text_uses_comma_space() {
        let loc = GeoLocation {
            lat: 23.8103,
            lng: 90.4125,
            address: String::new(),
        };
        assert_eq!(loc.coords_text(), "23.8103, 90.4125");
    }
}

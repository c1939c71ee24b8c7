//! The immutable reference catalog.
//!
//! [`Catalog::load`] reads the crop, fertilizer and pest tables from CSV
//! and attaches the fixed [`MarketPrices`]. Loading never fails as a
//! whole: a table that cannot be read is logged and its category is left
//! empty so the rest of the tool keeps working.
//!
//! Expected CSV headers:
//!
//! | Table | Columns |
//! |-------|---------|
//! | crops | `crop_name, season, soil_type, yield_per_acre` |
//! | fertilizer | `crop_name, nitrogen_kg_per_acre, phosphorus_kg_per_acre, potassium_kg_per_acre, organic_matter_tons_per_acre, lime_kg_per_acre` |
//! | pests | `pest_disease, control_measure` |
//!
//! Extra columns are ignored.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use bdsoil_types::{
    ACRES_PER_HECTARE, Crop, DEFAULT_YIELD_PER_HECTARE, FertilizerProfile, PestRecord,
};
use serde::Deserialize;
use tracing::{info, warn};

use crate::error::CatalogError;
use crate::market::MarketPrices;

/// File locations of the three reference tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogSources {
    /// Crop table.
    pub crops_csv: PathBuf,
    /// Fertilizer table.
    pub fertilizer_csv: PathBuf,
    /// Pest and disease table.
    pub pest_csv: PathBuf,
}

impl CatalogSources {
    /// The conventional file names inside a data directory.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            crops_csv: dir.join("bangladesh_crops.csv"),
            fertilizer_csv: dir.join("fertilizer_data.csv"),
            pest_csv: dir.join("pest_disease_data.csv"),
        }
    }
}

// ---------------------------------------------------------------------------
// CSV row shapes
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct CropRow {
    crop_name: String,
    season: String,
    soil_type: String,
    #[serde(default)]
    yield_per_acre: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FertilizerRow {
    crop_name: String,
    nitrogen_kg_per_acre: f64,
    phosphorus_kg_per_acre: f64,
    potassium_kg_per_acre: f64,
    organic_matter_tons_per_acre: f64,
    lime_kg_per_acre: f64,
}

#[derive(Debug, Deserialize)]
struct PestRow {
    pest_disease: String,
    control_measure: String,
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// Immutable in-memory snapshot of all reference datasets.
///
/// Crops and pests keep file order; lookups that return "the first match"
/// rely on it.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    crops: Vec<Crop>,
    fertilizers: BTreeMap<String, FertilizerProfile>,
    pests: Vec<PestRecord>,
    market: MarketPrices,
}

impl Catalog {
    /// Load every table from disk. Unreadable tables degrade to empty.
    pub fn load(sources: &CatalogSources) -> Self {
        let crops = degrade("crops", open(&sources.crops_csv).and_then(parse_crops));
        let fertilizers = degrade(
            "fertilizer",
            open(&sources.fertilizer_csv).and_then(parse_fertilizers),
        );
        let pests = degrade("pests", open(&sources.pest_csv).and_then(parse_pests));

        info!(
            crops = crops.len(),
            fertilizer_profiles = fertilizers.len(),
            pests = pests.len(),
            "reference catalog loaded"
        );

        Self::from_parts(crops, fertilizers, pests, MarketPrices::standard())
    }

    /// Assemble a catalog from already-parsed parts.
    ///
    /// Duplicate crop names keep their first position and the last row's
    /// values, matching how the tables are keyed by name.
    pub fn from_parts(
        crops: Vec<Crop>,
        fertilizers: Vec<FertilizerProfile>,
        pests: Vec<PestRecord>,
        market: MarketPrices,
    ) -> Self {
        let mut unique: Vec<Crop> = Vec::with_capacity(crops.len());
        for crop in crops {
            if let Some(existing) = unique.iter_mut().find(|c| c.name == crop.name) {
                *existing = crop;
            } else {
                unique.push(crop);
            }
        }
        Self {
            crops: unique,
            fertilizers: fertilizers
                .into_iter()
                .map(|profile| (profile.crop.clone(), profile))
                .collect(),
            pests,
            market,
        }
    }

    /// All crops in table order.
    pub fn crops(&self) -> &[Crop] {
        &self.crops
    }

    /// Look up a crop by exact name.
    pub fn crop(&self, name: &str) -> Option<&Crop> {
        self.crops.iter().find(|c| c.name == name)
    }

    /// Fertilizer profile for an exact crop name.
    pub fn fertilizer(&self, crop: &str) -> Option<&FertilizerProfile> {
        self.fertilizers.get(crop)
    }

    /// Number of crops that have a fertilizer profile.
    pub fn fertilizer_count(&self) -> usize {
        self.fertilizers.len()
    }

    /// Pest records in table order.
    pub fn pests(&self) -> &[PestRecord] {
        &self.pests
    }

    /// The market price table.
    pub const fn market(&self) -> &MarketPrices {
        &self.market
    }
}

/// Open a table file for reading.
fn open(path: &Path) -> Result<File, CatalogError> {
    File::open(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Log a failed category and fall back to an empty collection.
fn degrade<T: Default>(category: &str, result: Result<T, CatalogError>) -> T {
    result.unwrap_or_else(|e| {
        warn!(category, error = %e, "reference table unavailable, category left empty");
        T::default()
    })
}

/// Parse the crop table.
///
/// `yield_per_acre` holds a magnitude followed by a unit (e.g. `2.5 tons`);
/// the magnitude is converted to tons per hectare. A blank cell yields
/// [`DEFAULT_YIELD_PER_HECTARE`]. Any malformed row fails the whole table.
pub fn parse_crops<R: Read>(reader: R) -> Result<Vec<Crop>, CatalogError> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut crops = Vec::new();
    for row in rdr.deserialize::<CropRow>() {
        let row = row?;
        let yield_per_hectare = match row.yield_per_acre.as_deref().map(str::trim) {
            None | Some("") => DEFAULT_YIELD_PER_HECTARE,
            Some(raw) => {
                let magnitude = raw
                    .split_whitespace()
                    .next()
                    .and_then(|token| token.parse::<f64>().ok())
                    .ok_or_else(|| CatalogError::InvalidYield {
                        crop: row.crop_name.clone(),
                        value: raw.to_owned(),
                    })?;
                magnitude * ACRES_PER_HECTARE
            }
        };
        crops.push(Crop::new(row.crop_name, row.season, row.soil_type, yield_per_hectare));
    }
    Ok(crops)
}

/// Parse the fertilizer table.
pub fn parse_fertilizers<R: Read>(reader: R) -> Result<Vec<FertilizerProfile>, CatalogError> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    rdr.deserialize::<FertilizerRow>()
        .map(|row| {
            let row = row?;
            Ok(FertilizerProfile {
                crop: row.crop_name,
                nitrogen: row.nitrogen_kg_per_acre,
                phosphorus: row.phosphorus_kg_per_acre,
                potassium: row.potassium_kg_per_acre,
                organic_matter: row.organic_matter_tons_per_acre,
                lime: row.lime_kg_per_acre,
            })
        })
        .collect()
}

/// Parse the pest and disease table.
pub fn parse_pests<R: Read>(reader: R) -> Result<Vec<PestRecord>, CatalogError> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    rdr.deserialize::<PestRow>()
        .map(|row| {
            let row = row?;
            Ok(PestRecord {
                name: row.pest_disease,
                control_measure: row.control_measure,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::float_cmp)]

    use bdsoil_types::WaterNeed;

    use super::*;

    const CROPS: &str = "\
crop_name,season,soil_type,yield_per_acre,notes
Rice (Aman),Kharif (Monsoon),Clay Loam,2 tons,main paddy
Wheat,Rabi (Winter),Loam,,
Jute,Kharif (Monsoon),clay loam,1.5 tons/acre,fibre
";

    #[test]
    fn crop_yields_are_converted_per_hectare() {
        let crops = parse_crops(CROPS.as_bytes()).unwrap();
        assert_eq!(crops.len(), 3);
        let rice = crops.first().unwrap();
        assert!((rice.yield_per_hectare - 2.0 * ACRES_PER_HECTARE).abs() < 1e-9);
        assert_eq!(rice.water_need, WaterNeed::High);
    }

    #[test]
    fn blank_yield_defaults_without_conversion() {
        let crops = parse_crops(CROPS.as_bytes()).unwrap();
        let wheat = crops.iter().find(|c| c.name == "Wheat").unwrap();
        assert_eq!(wheat.yield_per_hectare, DEFAULT_YIELD_PER_HECTARE);
        assert_eq!(wheat.water_need, WaterNeed::Medium);
    }

    #[test]
    fn malformed_yield_fails_the_table() {
        let bad = "crop_name,season,soil_type,yield_per_acre\nRice,Summer,Loam,lots\n";
        assert!(matches!(
            parse_crops(bad.as_bytes()),
            Err(CatalogError::InvalidYield { .. })
        ));
    }

    #[test]
    fn missing_files_degrade_to_empty() {
        let sources = CatalogSources::in_dir(Path::new("/nonexistent/bdsoil-data"));
        let catalog = Catalog::load(&sources);
        assert!(catalog.crops().is_empty());
        assert!(catalog.pests().is_empty());
        assert_eq!(catalog.fertilizer_count(), 0);
        // Market prices are built in and unaffected.
        assert!(catalog.market().get("Wheat").is_some());
    }

    #[test]
    fn fertilizer_and_pest_tables_parse() {
        let fert = "crop_name,nitrogen_kg_per_acre,phosphorus_kg_per_acre,potassium_kg_per_acre,organic_matter_tons_per_acre,lime_kg_per_acre\nWheat,40,20,15,2,0\n";
        let profiles = parse_fertilizers(fert.as_bytes()).unwrap();
        assert_eq!(profiles.first().map(|p| p.nitrogen), Some(40.0));

        let pests = "pest_disease,control_measure\nStem Borer,Use light traps\n";
        let records = parse_pests(pests.as_bytes()).unwrap();
        assert_eq!(records.first().map(|p| p.name.as_str()), Some("Stem Borer"));
    }

    #[test]
    fn duplicate_crop_names_keep_first_position() {
        let crops = vec![
            Crop::new("A".into(), "Summer".into(), "Loam".into(), 1.0),
            Crop::new("B".into(), "Summer".into(), "Loam".into(), 2.0),
            Crop::new("A".into(), "Summer".into(), "Loam".into(), 3.0),
        ];
        let catalog = Catalog::from_parts(crops, Vec::new(), Vec::new(), MarketPrices::standard());
        let names: Vec<&str> = catalog.crops().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["A", "B"]);
        assert_eq!(catalog.crop("A").map(|c| c.yield_per_hectare), Some(3.0));
    }
}

//! Advisory queries over the reference catalog.
//!
//! Every query is a pure function of the [`Catalog`] snapshot and its
//! arguments. Matching rules differ per query and are documented on each
//! method; in particular crop recommendation matches soil exactly but
//! season by substring.

use bdsoil_catalog::Catalog;
use bdsoil_types::{Crop, FertilizerProfile, WaterAvailability};

/// Placeholder returned by [`RecommendationEngine::recommend_crops`] when
/// nothing qualifies. It is not a crop name.
pub const NO_SUITABLE_CROPS: &str = "No suitable crops";

/// Text shown when a crop has no fertilizer profile.
pub const NO_FERTILIZER_RECOMMENDATION: &str = "No recommendation";

/// Result of [`RecommendationEngine::identify_pest`] when nothing matches.
pub const UNKNOWN_PEST: &str = "Unknown";

/// Result of [`RecommendationEngine::control_for`] for an unknown pest.
pub const NO_CONTROL_MEASURES: &str = "No control measures";

/// Irrigation advice for low water availability.
pub const DRIP_IRRIGATION: &str = "Drip irrigation, consider mulching";

/// Irrigation advice for rice when water is not scarce.
pub const FLOOD_IRRIGATION: &str = "Flood irrigation, 5-10cm depth";

/// Irrigation advice for high water availability.
pub const SPRINKLER_IRRIGATION: &str = "Sprinkler irrigation";

/// Default irrigation advice.
pub const FURROW_IRRIGATION: &str = "Furrow irrigation, every 7-10 days";

/// Whether a crop recommendation list is the "no results" placeholder.
pub fn is_no_suitable_crops(recommendations: &[String]) -> bool {
    matches!(recommendations, [only] if only == NO_SUITABLE_CROPS)
}

/// Stateless advisory queries bound to a catalog snapshot.
#[derive(Debug, Clone, Copy)]
pub struct RecommendationEngine<'a> {
    catalog: &'a Catalog,
}

impl<'a> RecommendationEngine<'a> {
    /// Bind the engine to a catalog.
    pub const fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /// Crops suited to a soil and season.
    ///
    /// A crop qualifies when its soil label equals `soil_type`
    /// (case-insensitive) and its season label contains `season`
    /// (case-insensitive substring). When nothing qualifies the result is
    /// the single element [`NO_SUITABLE_CROPS`].
    pub fn recommend_crops(&self, soil_type: &str, season: &str) -> Vec<String> {
        let soil = soil_type.to_lowercase();
        let season = season.to_lowercase();
        let matches: Vec<String> = self
            .catalog
            .crops()
            .iter()
            .filter(|crop| {
                crop.soil_type.to_lowercase() == soil && crop.season.to_lowercase().contains(&season)
            })
            .map(|crop| crop.name.clone())
            .collect();

        if matches.is_empty() {
            vec![NO_SUITABLE_CROPS.to_owned()]
        } else {
            matches
        }
    }

    /// Details of a crop by exact name.
    pub fn crop_info(&self, name: &str) -> Option<&'a Crop> {
        self.catalog.crop(name)
    }

    /// Fertilizer profile for a crop, or `None` when the table has no row
    /// for it. Callers render `None` as [`NO_FERTILIZER_RECOMMENDATION`].
    pub fn fertilizer_for(&self, crop: &str) -> Option<&'a FertilizerProfile> {
        self.catalog.fertilizer(crop)
    }

    /// Irrigation method for a crop given the available water.
    ///
    /// Evaluated in priority order: low water always gets drip advice, then
    /// rice gets flood irrigation, then high water gets sprinklers, and
    /// everything else gets furrows.
    pub fn irrigation_for(crop: &str, water: WaterAvailability) -> &'static str {
        if water == WaterAvailability::Low {
            DRIP_IRRIGATION
        } else if crop.contains("Rice") {
            FLOOD_IRRIGATION
        } else if water == WaterAvailability::High {
            SPRINKLER_IRRIGATION
        } else {
            FURROW_IRRIGATION
        }
    }

    /// Name of the first pest (in table order) whose name appears in the
    /// description, case-insensitively. [`UNKNOWN_PEST`] when the
    /// description is blank or nothing matches.
    pub fn identify_pest(&self, description: &str) -> &'a str {
        let description = description.trim().to_lowercase();
        if description.is_empty() {
            return UNKNOWN_PEST;
        }
        self.catalog
            .pests()
            .iter()
            .find(|pest| description.contains(&pest.name.to_lowercase()))
            .map_or(UNKNOWN_PEST, |pest| pest.name.as_str())
    }

    /// Control measure for an exact pest name.
    pub fn control_for(&self, pest: &str) -> &'a str {
        self.catalog
            .pests()
            .iter()
            .find(|record| record.name == pest)
            .map_or(NO_CONTROL_MEASURES, |record| record.control_measure.as_str())
    }

    /// Market price text for a crop, or `Not available`.
    pub fn price_for(&self, crop: &str) -> String {
        self.catalog.market().price_text(crop)
    }
}

#[cfg(test)]
mod tests {
    use bdsoil_catalog::MarketPrices;
    use bdsoil_types::PestRecord;

    use super::*;

    fn crop(name: &str, season: &str, soil: &str) -> Crop {
        Crop::new(name.to_owned(), season.to_owned(), soil.to_owned(), 5.0)
    }

    fn catalog() -> Catalog {
        Catalog::from_parts(
            vec![
                crop("Rice (Aman)", "Kharif (Monsoon)", "Clay Loam"),
                crop("Jute", "Kharif (Monsoon)", "clay loam"),
                crop("Wheat", "Rabi (Winter)", "Loam"),
                crop("Potato", "Rabi (Winter)", "Sandy Loam"),
            ],
            vec![FertilizerProfile {
                crop: "Wheat".to_owned(),
                nitrogen: 40.0,
                phosphorus: 20.0,
                potassium: 15.0,
                organic_matter: 2.0,
                lime: 0.0,
            }],
            vec![
                PestRecord {
                    name: "Stem Borer".to_owned(),
                    control_measure: "Light traps".to_owned(),
                },
                PestRecord {
                    name: "Borer".to_owned(),
                    control_measure: "Generic".to_owned(),
                },
                PestRecord {
                    name: "Brown Planthopper".to_owned(),
                    control_measure: "Drain the field".to_owned(),
                },
            ],
            MarketPrices::standard(),
        )
    }

    #[test]
    fn soil_is_exact_and_season_is_substring() {
        let catalog = catalog();
        let engine = RecommendationEngine::new(&catalog);
        assert_eq!(
            engine.recommend_crops("CLAY LOAM", "monsoon"),
            ["Rice (Aman)", "Jute"]
        );
        // "Loam" must not match "Clay Loam" or "Sandy Loam".
        assert_eq!(engine.recommend_crops("Loam", "Rabi"), ["Wheat"]);
    }

    #[test]
    fn no_match_returns_the_placeholder() {
        let catalog = catalog();
        let engine = RecommendationEngine::new(&catalog);
        let recs = engine.recommend_crops("Sandy", "Summer");
        assert_eq!(recs, [NO_SUITABLE_CROPS]);
        assert!(is_no_suitable_crops(&recs));
        assert!(!is_no_suitable_crops(&engine.recommend_crops("Loam", "")));
    }

    #[test]
    fn irrigation_priority_order() {
        use WaterAvailability::{High, Low, Medium};
        assert_eq!(RecommendationEngine::irrigation_for("Rice (Boro)", Low), DRIP_IRRIGATION);
        assert_eq!(RecommendationEngine::irrigation_for("Rice (Boro)", High), FLOOD_IRRIGATION);
        assert_eq!(RecommendationEngine::irrigation_for("Wheat", High), SPRINKLER_IRRIGATION);
        assert_eq!(RecommendationEngine::irrigation_for("Wheat", Medium), FURROW_IRRIGATION);
        // The rice check is case-sensitive.
        assert_eq!(RecommendationEngine::irrigation_for("rice", Medium), FURROW_IRRIGATION);
    }

    #[test]
    fn first_pest_in_table_order_wins() {
        let catalog = catalog();
        let engine = RecommendationEngine::new(&catalog);
        assert_eq!(engine.identify_pest("holes from a STEM BORER larva"), "Stem Borer");
        assert_eq!(engine.identify_pest("a borer"), "Borer");
        assert_eq!(engine.identify_pest("leaves are yellow"), UNKNOWN_PEST);
        assert_eq!(engine.identify_pest("   "), UNKNOWN_PEST);
    }

    #[test]
    fn control_measure_lookup() {
        let catalog = catalog();
        let engine = RecommendationEngine::new(&catalog);
        assert_eq!(engine.control_for("Brown Planthopper"), "Drain the field");
        assert_eq!(engine.control_for(UNKNOWN_PEST), NO_CONTROL_MEASURES);
    }

    #[test]
    fn fertilizer_absent_is_explicit() {
        let catalog = catalog();
        let engine = RecommendationEngine::new(&catalog);
        assert!(engine.fertilizer_for("Wheat").is_some());
        assert!(engine.fertilizer_for("Jute").is_none());
    }

    #[test]
    fn price_text() {
        let catalog = catalog();
        let engine = RecommendationEngine::new(&catalog);
        assert_eq!(engine.price_for("Jute"), "40,000 BDT/ton");
        assert_eq!(engine.price_for("Lentil"), "Not available");
    }
}

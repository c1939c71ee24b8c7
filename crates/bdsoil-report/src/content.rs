//! What goes into a report.
//!
//! A report covers one user's lands, the catalog crops that grow on any
//! of those soils (in catalog order) and the market price list.

use bdsoil_catalog::{Catalog, MarketPrices};
use bdsoil_types::{Crop, Land};
use chrono::{DateTime, Local};

use crate::error::ReportError;
use crate::layout::{Section, TextStyle};

/// Title printed on the summary page.
pub const REPORT_TITLE: &str = "BDSoil - Agricultural Report";

/// Everything a report export needs, gathered up front.
#[derive(Debug, Clone)]
pub struct ReportContent {
    /// Owner's full name.
    pub owner_name: String,
    /// When the report was generated.
    pub generated_at: DateTime<Local>,
    /// Owner's lands, oldest first.
    pub lands: Vec<Land>,
    /// Crops suited to at least one of the lands' soils.
    pub crops: Vec<Crop>,
    /// Market prices.
    pub market: MarketPrices,
}

impl ReportContent {
    /// Gather report content for a user.
    ///
    /// Fails with [`ReportError::NoLands`] when the user has no land.
    pub fn gather(
        owner_name: &str,
        generated_at: DateTime<Local>,
        lands: Vec<Land>,
        catalog: &Catalog,
    ) -> Result<Self, ReportError> {
        if lands.is_empty() {
            return Err(ReportError::NoLands);
        }
        let crops = catalog
            .crops()
            .iter()
            .filter(|crop| lands.iter().any(|land| crop.grows_on(land.soil_type)))
            .cloned()
            .collect();
        Ok(Self {
            owner_name: owner_name.to_owned(),
            generated_at,
            lands,
            crops,
            market: catalog.market().clone(),
        })
    }

    /// `{name}_BDSoil_Report_{YYYYmmdd_HHMMSS}` with the given extension.
    pub fn file_name(&self, extension: &str) -> String {
        format!(
            "{}_BDSoil_Report_{}.{extension}",
            self.owner_name,
            self.generated_at.format("%Y%m%d_%H%M%S")
        )
    }

    /// The document sections, one per page group.
    pub fn sections(&self) -> Vec<Section> {
        vec![
            Section {
                heading: REPORT_TITLE.to_owned(),
                heading_style: TextStyle::Title,
                lines: vec![
                    format!("User: {}", self.owner_name),
                    format!("Date: {}", self.generated_at.format("%Y-%m-%d %H:%M:%S")),
                ],
            },
            Section {
                heading: "Land Information".to_owned(),
                heading_style: TextStyle::Heading,
                lines: self.lands.iter().map(land_line).collect(),
            },
            Section {
                heading: "Crop Recommendations".to_owned(),
                heading_style: TextStyle::Heading,
                lines: self
                    .crops
                    .iter()
                    .map(|crop| format!("Crop: {} | Yield: {:.2} t/ha", crop.name, crop.yield_per_hectare))
                    .collect(),
            },
            Section {
                heading: "Market Prices".to_owned(),
                heading_style: TextStyle::Heading,
                lines: self
                    .market
                    .crops()
                    .map(|crop| format!("{crop}: {}", self.market.price_text(crop)))
                    .collect(),
            },
        ]
    }
}

fn land_line(land: &Land) -> String {
    format!(
        "Location: {} | Area: {} ha | Soil: {} | GPS: {}",
        land.location,
        land.area,
        land.soil_type,
        land.gps_coords.as_deref().unwrap_or("-")
    )
}

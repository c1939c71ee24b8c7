//! Profit and loss estimate for the crops a user's land can grow.
//!
//! `profit = market_price × yield_per_hectare − assumed_cost`
//!
//! The price is per ton and the yield is tons per hectare, so the result
//! is really "revenue for one hectare at one ton-price" minus a flat cost.
//! The formula is kept as-is for compatibility with existing reports; the
//! units are not reconciled.

use bdsoil_catalog::{Catalog, MarketPrices};
use bdsoil_types::Land;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::Serialize;
use tracing::debug;

use crate::error::AdvisorError;

/// Flat per-crop cultivation cost in BDT. Crops not listed cost nothing.
const CROP_COSTS: [(&str, i64); 5] = [
    ("Rice (Aman)", 5_000),
    ("Rice (Boro)", 6_000),
    ("Wheat", 4_000),
    ("Maize", 3_000),
    ("Tomato", 2_500),
];

/// Assumed cultivation cost for a crop.
pub fn assumed_cost(crop: &str) -> Decimal {
    CROP_COSTS
        .iter()
        .find(|(name, _)| *name == crop)
        .map_or(Decimal::ZERO, |(_, cost)| Decimal::new(*cost, 0))
}

/// Estimated profit (negative for a loss) of one candidate crop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CropProfit {
    /// Crop name.
    pub crop: String,
    /// Estimated profit in BDT.
    pub profit: Decimal,
}

impl CropProfit {
    /// Whether the estimate is a loss.
    pub fn is_loss(&self) -> bool {
        self.profit.is_sign_negative() && !self.profit.is_zero()
    }
}

/// Compute a single profit figure.
pub fn profit(price: Decimal, yield_per_hectare: f64, cost: Decimal) -> Result<Decimal, AdvisorError> {
    let yield_dec =
        Decimal::from_f64(yield_per_hectare).ok_or(AdvisorError::NonFiniteYield(yield_per_hectare))?;
    price
        .checked_mul(yield_dec)
        .and_then(|revenue| revenue.checked_sub(cost))
        .ok_or(AdvisorError::ArithmeticOverflow)
}

/// Estimate profit for every catalog crop that grows on at least one of the
/// user's land soil types, in catalog order.
///
/// Crops without a market price are valued at zero.
pub fn estimate(
    lands: &[Land],
    catalog: &Catalog,
    market: &MarketPrices,
) -> Result<Vec<CropProfit>, AdvisorError> {
    let estimates = catalog
        .crops()
        .iter()
        .filter(|crop| lands.iter().any(|land| crop.grows_on(land.soil_type)))
        .map(|crop| {
            let price = market.get(&crop.name).unwrap_or(Decimal::ZERO);
            let value = profit(price, crop.yield_per_hectare, assumed_cost(&crop.name))?;
            Ok(CropProfit {
                crop: crop.name.clone(),
                profit: value,
            })
        })
        .collect::<Result<Vec<_>, AdvisorError>>()?;

    debug!(lands = lands.len(), candidates = estimates.len(), "profit estimate computed");
    Ok(estimates)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use bdsoil_types::{Crop, LandId, SoilType, UserId};

    use super::*;

    fn land(soil: SoilType) -> Land {
        Land {
            id: LandId(1),
            user_id: UserId(1),
            location: "Gazipur".to_owned(),
            area: 1.5,
            soil_type: soil,
            gps_coords: None,
        }
    }

    fn catalog() -> Catalog {
        Catalog::from_parts(
            vec![
                Crop::new("Rice (Aman)".into(), "Kharif (Monsoon)".into(), "Clay Loam".into(), 5.0),
                Crop::new("Wheat".into(), "Rabi (Winter)".into(), "Loam".into(), 1.0),
                Crop::new("Lentil".into(), "Rabi (Winter)".into(), "loam".into(), 2.0),
                Crop::new("Potato".into(), "Rabi (Winter)".into(), "Sandy".into(), 8.0),
            ],
            Vec::new(),
            Vec::new(),
            MarketPrices::standard(),
        )
    }

    #[test]
    fn reference_profit_figure() {
        let value = profit(Decimal::new(30_000, 0), 5.0, Decimal::new(5_000, 0)).unwrap();
        assert_eq!(value, Decimal::new(145_000, 0));
    }

    #[test]
    fn candidates_follow_land_soils() {
        let catalog = catalog();
        let result = estimate(
            &[land(SoilType::ClayLoam), land(SoilType::Loam)],
            &catalog,
            catalog.market(),
        )
        .unwrap();
        let crops: Vec<&str> = result.iter().map(|p| p.crop.as_str()).collect();
        assert_eq!(crops, ["Rice (Aman)", "Wheat", "Lentil"]);

        let rice = result.first().unwrap();
        assert_eq!(rice.profit, Decimal::new(145_000, 0));
    }

    #[test]
    fn missing_price_values_at_zero() {
        let catalog = catalog();
        let result = estimate(&[land(SoilType::Loam)], &catalog, catalog.market()).unwrap();
        let lentil = result.iter().find(|p| p.crop == "Lentil").unwrap();
        assert_eq!(lentil.profit, Decimal::ZERO);
        assert!(!lentil.is_loss());

        let wheat = result.iter().find(|p| p.crop == "Wheat").unwrap();
        assert_eq!(wheat.profit, Decimal::new(28_000, 0));
    }

    #[test]
    fn costs_can_produce_a_loss() {
        let value = profit(Decimal::ZERO, 5.0, assumed_cost("Tomato")).unwrap();
        assert_eq!(value, Decimal::new(-2_500, 0));
        let entry = CropProfit {
            crop: "Tomato".to_owned(),
            profit: value,
        };
        assert!(entry.is_loss());
    }

    #[test]
    fn no_lands_no_candidates() {
        let catalog = catalog();
        assert!(estimate(&[], &catalog, catalog.market()).unwrap().is_empty());
    }
}

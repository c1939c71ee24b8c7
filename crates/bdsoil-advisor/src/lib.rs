//! Advisory engine for the BDSoil farm advisory tool.
//!
//! Pure query functions over an immutable [`Catalog`](bdsoil_catalog::Catalog):
//! crop suitability, fertilizer, irrigation, pest identification, market
//! prices and a per-crop profit estimate for a user's land.
//!
//! # Modules
//!
//! - [`recommend`] -- [`RecommendationEngine`] queries and their placeholder texts
//! - [`profit`] -- Profit/loss estimate over the crops a user's soils support
//! - [`weather`] -- Fixed weather snapshot
//! - [`error`] -- [`AdvisorError`]

pub mod error;
pub mod profit;
pub mod recommend;
pub mod weather;

pub use error::AdvisorError;
pub use profit::{CropProfit, assumed_cost, estimate};
pub use recommend::{
    DRIP_IRRIGATION, FLOOD_IRRIGATION, FURROW_IRRIGATION, NO_CONTROL_MEASURES,
    NO_FERTILIZER_RECOMMENDATION, NO_SUITABLE_CROPS, RecommendationEngine, SPRINKLER_IRRIGATION,
    UNKNOWN_PEST, is_no_suitable_crops,
};
pub use weather::WeatherSnapshot;

//! Reference catalog for the BDSoil farm advisory tool.
//!
//! Loads the crop, fertilizer and pest tables into an immutable
//! [`Catalog`] and carries the fixed [`MarketPrices`] table. The catalog
//! is built once at startup and passed by reference to every component
//! that needs it; nothing mutates it afterwards.
//!
//! # Modules
//!
//! - [`catalog`] -- [`Catalog`] snapshot and CSV table parsers
//! - [`market`] -- Fixed per-ton market prices and price formatting
//! - [`error`] -- [`CatalogError`] for table loading failures

pub mod catalog;
pub mod error;
pub mod market;

pub use catalog::{Catalog, CatalogSources, parse_crops, parse_fertilizers, parse_pests};
pub use error::CatalogError;
pub use market::{MarketPrices, PRICE_NOT_AVAILABLE, format_thousands};

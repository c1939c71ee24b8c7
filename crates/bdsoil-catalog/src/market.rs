//! Fixed market price table.
//!
//! Prices are in BDT per ton and are not loaded from a file. The order of
//! the table is the order crops are offered in the market price picker.

use rust_decimal::Decimal;

/// Text returned when a crop has no market price.
pub const PRICE_NOT_AVAILABLE: &str = "Not available";

/// Market price per ton for a fixed set of crops.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketPrices {
    prices: Vec<(String, Decimal)>,
}

impl MarketPrices {
    /// The built-in price list.
    pub fn standard() -> Self {
        let table: [(&str, i64); 13] = [
            ("Rice (Aman)", 30_000),
            ("Rice (Boro)", 35_000),
            ("Rice (Aus)", 28_000),
            ("Wheat", 32_000),
            ("Jute", 40_000),
            ("Maize", 25_000),
            ("Potato", 20_000),
            ("Onion", 30_000),
            ("Garlic", 60_000),
            ("Tomato", 25_000),
            ("Chili", 50_000),
            ("Banana", 20_000),
            ("Mango", 40_000),
        ];
        Self {
            prices: table
                .into_iter()
                .map(|(crop, price)| (crop.to_owned(), Decimal::new(price, 0)))
                .collect(),
        }
    }

    /// Build a price list from explicit entries. Later duplicates replace
    /// earlier ones in place.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, Decimal)>,
    {
        let mut prices: Vec<(String, Decimal)> = Vec::new();
        for (crop, price) in entries {
            if let Some(slot) = prices.iter_mut().find(|(name, _)| *name == crop) {
                slot.1 = price;
            } else {
                prices.push((crop, price));
            }
        }
        Self { prices }
    }

    /// Price per ton for an exact crop name.
    pub fn get(&self, crop: &str) -> Option<Decimal> {
        self.prices
            .iter()
            .find(|(name, _)| name == crop)
            .map(|(_, price)| *price)
    }

    /// Human-readable price, e.g. `30,000 BDT/ton`, or `Not available`.
    pub fn price_text(&self, crop: &str) -> String {
        self.get(crop).map_or_else(
            || PRICE_NOT_AVAILABLE.to_owned(),
            |price| format!("{} BDT/ton", format_thousands(price)),
        )
    }

    /// Crop names in table order.
    pub fn crops(&self) -> impl Iterator<Item = &str> {
        self.prices.iter().map(|(name, _)| name.as_str())
    }

    /// All entries in table order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.prices.iter().map(|(name, price)| (name.as_str(), *price))
    }
}

impl Default for MarketPrices {
    fn default() -> Self {
        Self::standard()
    }
}

/// Format the whole part of an amount with comma thousands separators.
pub fn format_thousands(amount: Decimal) -> String {
    let whole = amount.trunc().abs().to_string();
    let mut grouped = String::with_capacity(whole.len().saturating_add(whole.len() / 3));
    for (i, c) in whole.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if amount.is_sign_negative() && !amount.trunc().is_zero() {
        grouped.push('-');
    }
    grouped.chars().rev().collect()
}

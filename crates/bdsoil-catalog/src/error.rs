//! Error types for reference-table loading.
//!
//! A [`CatalogError`] never escapes [`Catalog::load`](crate::Catalog::load):
//! the affected category is logged and replaced by an empty collection.
//! The per-table parsers return it so tests and callers that want strict
//! loading can see what went wrong.

use std::path::PathBuf;

/// Errors that can occur while reading a reference table.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The table file could not be opened or read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path of the table.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A row could not be decoded from CSV.
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    /// The `yield_per_acre` cell did not start with a number.
    #[error("crop {crop}: unparseable yield {value:?}")]
    InvalidYield {
        /// Crop whose row is malformed.
        crop: String,
        /// The raw cell value.
        value: String,
    },
}

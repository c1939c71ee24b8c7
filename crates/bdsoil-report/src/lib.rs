//! Report export for the BDSoil farm advisory tool.
//!
//! Two outputs over the same [`ReportContent`]:
//!
//! - a CSV crop table (crop, season, soil type, yield, price)
//! - a paginated PDF with summary, land, crop and market sections
//!
//! # Modules
//!
//! - [`content`] -- Gathering a user's report content
//! - [`csv_export`] -- CSV table
//! - [`layout`] -- Backend-independent pagination
//! - [`pdf`] -- PDF rendering via `printpdf`
//! - [`error`] -- [`ReportError`]

pub mod content;
pub mod csv_export;
pub mod error;
pub mod layout;
pub mod pdf;

pub use content::{REPORT_TITLE, ReportContent};
pub use csv_export::{CSV_HEADERS, export_csv, write_csv};
pub use error::ReportError;
pub use layout::{Page, PageLayout, PlacedLine, Section, TextStyle};
pub use pdf::{export_pdf, render_pdf};

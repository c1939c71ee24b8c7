//! Error types for the `bdsoil-report` crate.

use std::path::PathBuf;

/// Errors that can occur while exporting a report.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// The user has no land, so there is nothing to report on.
    #[error("No lands found. Add land first.")]
    NoLands,

    /// Writing the CSV table failed.
    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    /// Building or saving the PDF failed.
    #[error("PDF export failed: {0}")]
    Pdf(String),

    /// A report file could not be created or written.
    #[error("cannot write {path}: {source}")]
    Io {
        /// Target path.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },
}

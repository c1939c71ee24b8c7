//! Error types for the `bdsoil` binary.
//!
//! Wraps every library error so command handlers can use `?` throughout.
//! The `Display` text of each variant is what the user sees.

use bdsoil_advisor::AdvisorError;
use bdsoil_db::DbError;
use bdsoil_geo::GeoError;
use bdsoil_ledger::LedgerError;
use bdsoil_report::ReportError;

use crate::config::ConfigError;

/// Errors that can occur while running a command.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The store could not be opened or prepared.
    #[error("{0}")]
    Db(#[from] DbError),

    /// A ledger or account operation was refused.
    #[error("{0}")]
    Ledger(#[from] LedgerError),

    /// Location resolution failed.
    #[error("{0}")]
    Geo(#[from] GeoError),

    /// Report export failed.
    #[error("{0}")]
    Report(#[from] ReportError),

    /// Profit estimation failed.
    #[error("{0}")]
    Advisor(#[from] AdvisorError),

    /// Missing or unusable command-line input.
    #[error("{0}")]
    Input(String),

    /// Terminal I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A blocking task panicked or was cancelled.
    #[error("background task failed: {0}")]
    Task(String),
}

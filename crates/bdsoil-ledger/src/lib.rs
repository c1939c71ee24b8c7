//! Land ledger and accounts for the BDSoil farm advisory tool.
//!
//! Validates input and enforces ownership on top of the `bdsoil-db`
//! stores. Nothing here runs without a user id obtained from
//! [`Accounts::login`] or [`Accounts::register`].
//!
//! # Modules
//!
//! - [`land_ledger`] -- [`LandLedger`]: create, list, count, password-gated delete
//! - [`accounts`] -- [`Accounts`]: register, login, profile
//! - [`auth`] -- Password hashing and verification
//! - [`ordinal`] -- Position labels for land lists
//! - [`error`] -- [`LedgerError`]

pub mod accounts;
pub mod auth;
pub mod error;
pub mod land_ledger;
pub mod ordinal;

pub use accounts::{Accounts, ProfileChanges, Registration};
pub use auth::{hash_password, verify_password};
pub use error::LedgerError;
pub use land_ledger::LandLedger;
pub use ordinal::{label_lands, ordinal};

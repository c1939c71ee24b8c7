//! Error types for the `bdsoil-advisor` crate.

/// Errors that can occur while computing advice.
#[derive(Debug, thiserror::Error)]
pub enum AdvisorError {
    /// A crop yield could not be represented as a decimal.
    #[error("yield {0} is not a finite number")]
    NonFiniteYield(f64),

    /// Arithmetic overflow in a checked money calculation.
    #[error("arithmetic overflow in profit calculation")]
    ArithmeticOverflow,
}

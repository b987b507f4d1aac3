//! Error types for the optstrat library.
//!
//! All fallible operations return `Result<T, StrategyError>` rather than
//! panicking, providing meaningful diagnostics for invalid market inputs,
//! malformed strategy definitions, and numerical issues.

use thiserror::Error;

/// Convenience type alias for results in this crate.
pub type Result<T> = std::result::Result<T, StrategyError>;

/// Errors that can occur during pricing, composition, and scenario analysis.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StrategyError {
    /// Input data is invalid (e.g., non-positive spot or strike, zero
    /// quantity, malformed grid).
    #[error("invalid input: {message}")]
    InvalidInput { message: String },

    /// Strikes violate the relative ordering a multi-leg template requires.
    #[error("unordered strikes: {message}")]
    UnorderedStrikes {
        message: String,
        /// Template that rejected the strikes (e.g., "Iron Condor").
        template: &'static str,
    },

    /// The spot grid fails to bracket every referenced strike plus the
    /// current spot, so breakeven detection would be unreliable.
    #[error("grid coverage: {message}")]
    GridCoverage { message: String },

    /// Numerical computation failed (e.g., non-finite d1/d2 or payoff).
    #[error("numerical error: {message}")]
    NumericalError { message: String },
}

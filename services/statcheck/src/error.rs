//! Error types for claim analysis

use thiserror::Error;

/// Numerical failure while computing a significance test
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalculationError {
    /// Pooled or per-group variance collapsed to zero
    #[error("degenerate variance: standard error is {0}")]
    DegenerateVariance(f64),

    /// t statistic or p-value came out NaN or infinite
    #[error("non-finite {name}: {value}")]
    NonFiniteStatistic { name: &'static str, value: f64 },

    /// Student's t distribution could not be constructed
    #[error("t distribution error: {0}")]
    Distribution(String),
}

/// Rejected claim input, raised before the analysis core is reached
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClaimError {
    #[error("claim text is empty")]
    BlankClaim,

    #[error("{field} must be non-negative, got {value}")]
    NegativeInput { field: &'static str, value: f64 },
}

use thiserror::Error;

/// Errors returned by the scoring engine.
///
/// Most formulas clamp bad input instead of failing; only the build-to-profit
/// ranker rejects it.
#[derive(Debug, Error, PartialEq)]
pub enum ScoringError {
    /// A factor that must be non-negative was negative or not a number.
    #[error("invalid input for {field}: {value} (must be a non-negative number)")]
    InvalidInput { field: &'static str, value: f64 },
}

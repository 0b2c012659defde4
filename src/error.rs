//! Error types for deal cost calculations

use thiserror::Error;

/// Errors surfaced by the deal calculator
///
/// No partial result is ever returned alongside an error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DealError {
    /// Structurally invalid parameters (negative property value, zero hold years, ...)
    #[error("Invalid input: {field} {reason}")]
    InvalidInput { field: &'static str, reason: String },

    /// Valid-looking parameters that produce a mathematically undefined result
    #[error("Computation undefined: {0}")]
    ComputationUndefined(String),
}

impl DealError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        DealError::InvalidInput { field, reason: reason.into() }
    }
}

/// Result alias used throughout the calculator
pub type DealResult<T> = Result<T, DealError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = DealError::invalid("hold_years", "must be greater than zero");
        assert_eq!(err.to_string(), "Invalid input: hold_years must be greater than zero");

        let err = DealError::ComputationUndefined("net cash is zero".into());
        assert_eq!(err.to_string(), "Computation undefined: net cash is zero");
    }
}

//! Error types for Parley
//!
//! Provides a unified error type and domain-specific error variants

use thiserror::Error;

/// Result type alias using ParleyError
pub type Result<T> = std::result::Result<T, ParleyError>;

/// Unified error type for Parley operations
#[derive(Debug, Error)]
pub enum ParleyError {
    // Domain model errors
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    // Preference elicitation errors
    #[error("Insufficient preference data: {0}")]
    InsufficientPreferenceData(String),

    // Linear program could not be solved
    #[error("Utility estimation failed: {0}")]
    EstimationFailure(String),

    // Genetic search invariant violation
    #[error("Population exhausted at generation {generation}")]
    PopulationExhausted { generation: u64 },

    // Host offered no action kind the policy can use
    #[error("No allowed action kind can express the decision")]
    NoAllowedAction,

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Domain model errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Unsupported issue type for issue '{issue}': {kind}")]
    UnsupportedIssueType { issue: String, kind: String },

    #[error("Issue '{0}' has no values")]
    EmptyIssue(String),

    #[error("Invalid bid: {0}")]
    InvalidBid(String),

    #[error("Value '{value}' is not defined for issue '{issue}'")]
    UnknownValue { issue: String, value: String },

    #[error("Utility shape mismatch: {0}")]
    ShapeMismatch(String),
}

impl From<serde_json::Error> for ParleyError {
    fn from(err: serde_json::Error) -> Self {
        ParleyError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ParleyError::Domain(DomainError::UnsupportedIssueType {
            issue: "price".to_string(),
            kind: "real".to_string(),
        });
        assert!(err.to_string().contains("price"));
        assert!(err.to_string().contains("real"));
    }

    #[test]
    fn test_population_exhausted() {
        let err = ParleyError::PopulationExhausted { generation: 7 };
        assert!(err.to_string().contains('7'));
    }
}

//! Error types for u-knapsack.

use thiserror::Error;

/// Errors reported by the knapsack solver.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum KnapsackError {
    /// The problem data is malformed: mismatched lengths, a negative or
    /// non-finite capacity, weight or value.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The solver configuration failed validation.
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Result type alias for knapsack operations.
pub type Result<T> = std::result::Result<T, KnapsackError>;

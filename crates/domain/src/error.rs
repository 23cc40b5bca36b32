//! Order workflow error types.

use policy::{PolicyError, RuleViolation};
use thiserror::Error;

/// Errors that can occur while creating an order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    /// An admission rule rejected the order.
    #[error("Order rejected: {0}")]
    Rejected(#[from] RuleViolation),

    /// A policy was queried out of order.
    #[error("Policy error: {0}")]
    Policy(#[from] PolicyError),
}

/// Convenience type alias for order results.
pub type Result<T> = std::result::Result<T, OrderError>;

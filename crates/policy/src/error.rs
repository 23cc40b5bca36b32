//! Policy error types.

use thiserror::Error;

/// A business rule violation recorded by a specification.
///
/// Violations are collected on the specification that produced them and
/// surfaced through `Policy::get_errors` once the policy has run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct RuleViolation {
    rule: String,
    message: String,
}

impl RuleViolation {
    /// Creates a violation raised by the named rule.
    pub fn new(rule: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            rule: rule.into(),
            message: message.into(),
        }
    }

    /// Returns the name of the rule that raised this violation.
    pub fn rule(&self) -> &str {
        &self.rule
    }

    /// Returns the human-readable message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Errors caused by misusing a policy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyError {
    /// A query was made before any run.
    #[error("You must run the policy before {operation}")]
    NotExecuted { operation: &'static str },
}

/// Convenience type alias for policy results.
pub type Result<T> = std::result::Result<T, PolicyError>;

//! Specification trait and outcome tracking.

use async_trait::async_trait;

use crate::error::RuleViolation;

/// A single business check over context captured at construction.
///
/// The check is asynchronous so rules may perform I/O, although most rules
/// are pure and resolve on their first poll.
#[async_trait]
pub trait Rule: Send + Sync {
    /// Returns the rule identifier.
    ///
    /// Used as the default specification name and for callback matching.
    fn name(&self) -> &'static str;

    /// Evaluates the rule.
    ///
    /// Returns `Ok(true)` when satisfied, `Ok(false)` when not satisfied
    /// without a violation, and `Err` when the rule rejects the candidate.
    async fn check(&self) -> Result<bool, RuleViolation>;
}

/// A named rule together with the state of its last evaluation.
pub struct Specification {
    name: String,
    satisfied: bool,
    error: Option<RuleViolation>,
    rule: Box<dyn Rule>,
}

impl Specification {
    /// Wraps a rule, naming the specification after the rule identifier.
    pub fn new(rule: impl Rule + 'static) -> Self {
        let name = rule.name().to_string();
        Self::with_name(name, rule)
    }

    /// Wraps a rule under an explicit name.
    pub fn with_name(name: impl Into<String>, rule: impl Rule + 'static) -> Self {
        Self {
            name: name.into(),
            satisfied: false,
            error: None,
            rule: Box::new(rule),
        }
    }

    /// Returns the specification name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the outcome of the last evaluation.
    ///
    /// Always `false` before the first evaluation completes.
    pub fn satisfied(&self) -> bool {
        self.satisfied
    }

    /// Evaluates the rule and records the outcome.
    ///
    /// A violation is recorded as the specification error and yields `false`.
    pub async fn is_satisfied(&mut self) -> bool {
        let satisfied = match self.rule.check().await {
            Ok(satisfied) => satisfied,
            Err(violation) => {
                self.set_error(violation);
                false
            }
        };
        self.satisfied = satisfied;
        satisfied
    }

    /// Records an error, replacing any previous one.
    pub fn set_error(&mut self, error: RuleViolation) {
        self.error = Some(error);
    }

    /// Returns the recorded error, if any.
    pub fn has_error(&self) -> Option<&RuleViolation> {
        self.error.as_ref()
    }
}

impl std::fmt::Debug for Specification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Specification")
            .field("name", &self.name)
            .field("satisfied", &self.satisfied)
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

//! Policy: an ordered aggregate of specifications.

use futures_util::FutureExt;

use crate::error::{PolicyError, Result, RuleViolation};
use crate::outcome::{PendingOutcome, RunOutcomes, SyncRun};
use crate::specification::Specification;

/// An ordered set of specifications with bulk run and aggregate queries.
///
/// State transitions:
/// ```text
/// Unexecuted ──► Executed
/// ```
/// Satisfaction and error queries fail with `PolicyError::NotExecuted`
/// until one of the run methods has been called.
#[derive(Debug)]
pub struct Policy {
    name: String,
    specifications: Vec<Specification>,
    executed: bool,
}

impl Policy {
    /// Creates an empty, unexecuted policy.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            specifications: Vec::new(),
            executed: false,
        }
    }

    /// Returns the policy name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Appends a specification. Names are not required to be unique.
    pub fn add_specification(&mut self, specification: Specification) {
        self.specifications.push(specification);
    }

    /// Returns the specifications in insertion order.
    pub fn specifications(&self) -> &[Specification] {
        &self.specifications
    }

    /// Returns the first specification with the given name.
    pub fn specification(&self, name: &str) -> Option<&Specification> {
        self.specifications.iter().find(|spec| spec.name() == name)
    }

    /// Returns the number of specifications.
    pub fn len(&self) -> usize {
        self.specifications.len()
    }

    /// Returns true if the policy has no specifications.
    pub fn is_empty(&self) -> bool {
        self.specifications.is_empty()
    }

    /// Returns true once any run method has been called.
    pub fn is_executed(&self) -> bool {
        self.executed
    }

    /// Evaluates every specification in insertion order, one at a time.
    ///
    /// Each check completes before the next one starts. A failing check does
    /// not stop the run, so every violation is available afterwards.
    #[tracing::instrument(skip(self), fields(policy = %self.name, specifications = self.specifications.len()))]
    pub async fn run_all_async(&mut self) -> RunOutcomes {
        metrics::counter!("policy_runs_total", "mode" => "async").increment(1);
        self.executed = true;

        let mut outcomes = RunOutcomes::new();
        for specification in &mut self.specifications {
            let satisfied = specification.is_satisfied().await;
            record_outcome(specification, satisfied);
            outcomes.insert(specification.name(), satisfied);
        }

        outcomes
    }

    /// Starts every specification in insertion order without waiting on any.
    ///
    /// Each check is polled once. Checks that resolve immediately are
    /// returned as `PendingOutcome::Ready` and their specification state is
    /// already updated. Checks that suspend are returned as
    /// `PendingOutcome::Pending` and must be driven by the caller; until then
    /// their specification still reports `satisfied == false`.
    #[tracing::instrument(skip(self), fields(policy = %self.name, specifications = self.specifications.len()))]
    pub fn run_all_sync(&mut self) -> SyncRun<'_> {
        metrics::counter!("policy_runs_total", "mode" => "sync").increment(1);
        self.executed = true;

        let mut run = SyncRun::default();
        for specification in &mut self.specifications {
            let name = specification.name().to_string();
            let mut check = specification.is_satisfied().boxed();
            let outcome = match (&mut check).now_or_never() {
                Some(satisfied) => PendingOutcome::Ready(satisfied),
                None => {
                    tracing::debug!(specification = %name, "check still in flight");
                    PendingOutcome::Pending(check)
                }
            };
            run.push(name, outcome);
        }

        run
    }

    /// Returns true if every specification is satisfied.
    pub fn check_if_all_specifications_are_satisfied(&self) -> Result<bool> {
        self.ensure_executed("checking satisfaction")?;
        Ok(self.specifications.iter().all(Specification::satisfied))
    }

    /// Returns true if any specification recorded an error.
    pub fn has_error(&self) -> Result<bool> {
        self.ensure_executed("checking for errors")?;
        Ok(self.specifications.iter().any(|spec| spec.has_error().is_some()))
    }

    /// Returns the recorded errors in specification order.
    pub fn get_errors(&self) -> Result<Vec<&RuleViolation>> {
        self.ensure_executed("reading errors")?;
        Ok(self
            .specifications
            .iter()
            .filter_map(Specification::has_error)
            .collect())
    }

    fn ensure_executed(&self, operation: &'static str) -> Result<()> {
        if self.executed {
            Ok(())
        } else {
            Err(PolicyError::NotExecuted { operation })
        }
    }
}

fn record_outcome(specification: &Specification, satisfied: bool) {
    if let Some(error) = specification.has_error() {
        metrics::counter!("policy_specifications_failed_total").increment(1);
        tracing::debug!(
            specification = specification.name(),
            satisfied,
            error = %error,
            "specification evaluated"
        );
    } else {
        tracing::debug!(
            specification = specification.name(),
            satisfied,
            "specification evaluated"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::specification::Rule;
    use async_trait::async_trait;

    struct Always(&'static str, bool);

    #[async_trait]
    impl Rule for Always {
        fn name(&self) -> &'static str {
            self.0
        }

        async fn check(&self) -> std::result::Result<bool, RuleViolation> {
            Ok(self.1)
        }
    }

    struct Rejects(&'static str);

    #[async_trait]
    impl Rule for Rejects {
        fn name(&self) -> &'static str {
            self.0
        }

        async fn check(&self) -> std::result::Result<bool, RuleViolation> {
            Err(RuleViolation::new(self.0, format!("{} rejected", self.0)))
        }
    }

    #[test]
    fn queries_before_run_fail() {
        let mut policy = Policy::new("test");
        policy.add_specification(Specification::new(Always("a", true)));

        assert!(matches!(
            policy.check_if_all_specifications_are_satisfied(),
            Err(PolicyError::NotExecuted { .. })
        ));
        assert!(matches!(
            policy.has_error(),
            Err(PolicyError::NotExecuted { .. })
        ));
        assert!(matches!(
            policy.get_errors(),
            Err(PolicyError::NotExecuted { .. })
        ));
    }

    #[tokio::test]
    async fn run_all_async_collects_outcomes_in_order() {
        let mut policy = Policy::new("test");
        policy.add_specification(Specification::new(Always("a", true)));
        policy.add_specification(Specification::new(Rejects("b")));
        policy.add_specification(Specification::new(Always("c", false)));

        let outcomes = policy.run_all_async().await;

        assert!(policy.is_executed());
        assert_eq!(
            outcomes.iter().collect::<Vec<_>>(),
            vec![("a", true), ("b", false), ("c", false)]
        );
    }

    #[tokio::test]
    async fn failing_specification_does_not_stop_the_run() {
        let mut policy = Policy::new("test");
        policy.add_specification(Specification::new(Rejects("a")));
        policy.add_specification(Specification::new(Rejects("b")));

        policy.run_all_async().await;

        let errors = policy.get_errors().unwrap();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].rule(), "a");
        assert_eq!(errors[1].rule(), "b");
        assert!(policy.has_error().unwrap());
    }

    #[tokio::test]
    async fn errors_exclude_specifications_without_error() {
        let mut policy = Policy::new("test");
        policy.add_specification(Specification::new(Always("a", true)));
        policy.add_specification(Specification::new(Always("b", false)));

        policy.run_all_async().await;

        assert!(policy.get_errors().unwrap().is_empty());
        assert!(!policy.has_error().unwrap());
        assert!(!policy.check_if_all_specifications_are_satisfied().unwrap());
    }

    #[tokio::test]
    async fn all_satisfied_when_every_check_passes() {
        let mut policy = Policy::new("test");
        policy.add_specification(Specification::new(Always("a", true)));
        policy.add_specification(Specification::new(Always("b", true)));

        policy.run_all_async().await;

        assert!(policy.check_if_all_specifications_are_satisfied().unwrap());
    }

    #[test]
    fn run_all_sync_resolves_immediate_checks() {
        let mut policy = Policy::new("test");
        policy.add_specification(Specification::new(Always("a", true)));
        policy.add_specification(Specification::new(Rejects("b")));

        let run = policy.run_all_sync();
        assert_eq!(run.len(), 2);
        assert_eq!(run.pending_count(), 0);
        assert_eq!(run.ready("a"), Some(true));
        assert_eq!(run.ready("b"), Some(false));
        drop(run);

        assert!(policy.is_executed());
        assert!(policy.has_error().unwrap());
        assert!(policy.specification("a").unwrap().satisfied());
    }

    #[test]
    fn empty_policy_is_trivially_satisfied_after_run() {
        let mut policy = Policy::new("empty");
        assert!(policy.run_all_sync().is_empty());
        assert!(policy.check_if_all_specifications_are_satisfied().unwrap());
        assert!(policy.get_errors().unwrap().is_empty());
    }

    #[test]
    fn specification_lookup_returns_first_match() {
        let mut policy = Policy::new("test");
        policy.add_specification(Specification::new(Always("dup", true)));
        policy.add_specification(Specification::with_name("dup", Always("other", false)));

        assert_eq!(policy.len(), 2);
        assert_eq!(policy.specification("dup").unwrap().name(), "dup");
        assert!(policy.specification("missing").is_none());
    }
}

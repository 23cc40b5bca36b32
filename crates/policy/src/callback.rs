//! Binding specification outcomes to side effects.

use futures_util::StreamExt;
use futures_util::stream::FuturesUnordered;

use crate::outcome::PendingOutcome;
use crate::policy::Policy;

/// A side effect fired when a specification produces an expected outcome.
///
/// Actions capture whatever arguments they need.
pub type CallbackAction = Box<dyn Fn() + Send + Sync>;

/// Binds a (specification name, expected outcome) pair to an action.
pub struct PolicyCallback {
    specification: String,
    condition: bool,
    action: CallbackAction,
}

impl PolicyCallback {
    /// Creates a binding that fires `action` when `specification` yields `condition`.
    pub fn new(
        specification: impl Into<String>,
        condition: bool,
        action: impl Fn() + Send + Sync + 'static,
    ) -> Self {
        Self {
            specification: specification.into(),
            condition,
            action: Box::new(action),
        }
    }

    /// Creates a binding that fires when the specification is satisfied.
    pub fn on_satisfied(
        specification: impl Into<String>,
        action: impl Fn() + Send + Sync + 'static,
    ) -> Self {
        Self::new(specification, true, action)
    }

    /// Creates a binding that fires when the specification is not satisfied.
    pub fn on_unsatisfied(
        specification: impl Into<String>,
        action: impl Fn() + Send + Sync + 'static,
    ) -> Self {
        Self::new(specification, false, action)
    }

    /// Returns the specification name this binding listens to.
    pub fn specification(&self) -> &str {
        &self.specification
    }

    /// Returns the outcome this binding expects.
    pub fn condition(&self) -> bool {
        self.condition
    }

    /// Returns true if this binding matches the outcome of `specification`.
    pub fn matches(&self, specification: &str, outcome: bool) -> bool {
        self.specification == specification && self.condition == outcome
    }
}

impl std::fmt::Debug for PolicyCallback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PolicyCallback")
            .field("specification", &self.specification)
            .field("condition", &self.condition)
            .finish_non_exhaustive()
    }
}

/// Runs a policy and fires the callbacks bound to its outcomes.
///
/// For each outcome only the first matching binding fires.
pub struct PolicyCallbackHandler<'p> {
    policy: &'p mut Policy,
    callbacks: Vec<PolicyCallback>,
}

impl<'p> PolicyCallbackHandler<'p> {
    /// Creates a handler over a policy and its bindings.
    pub fn new(policy: &'p mut Policy, callbacks: Vec<PolicyCallback>) -> Self {
        Self { policy, callbacks }
    }

    /// Returns the wrapped policy.
    pub fn policy(&self) -> &Policy {
        self.policy
    }

    /// Runs the policy sequentially, then fires bindings in run order.
    ///
    /// Returns the number of callbacks fired.
    #[tracing::instrument(skip(self), fields(policy = %self.policy.name()))]
    pub async fn run_all_async_with_callbacks(&mut self) -> usize {
        let outcomes = self.policy.run_all_async().await;

        let mut fired = 0;
        for (specification, outcome) in outcomes.iter() {
            if fire_first_match(&self.callbacks, specification, outcome) {
                fired += 1;
            }
        }

        fired
    }

    /// Starts the policy without waiting, firing bindings as outcomes resolve.
    ///
    /// Outcomes that are known immediately fire first, in insertion order.
    /// Checks still in flight are driven concurrently and fire in completion
    /// order, which may differ from insertion order.
    ///
    /// Returns the number of callbacks fired.
    #[tracing::instrument(skip(self), fields(policy = %self.policy.name()))]
    pub async fn run_all_sync_with_callbacks(&mut self) -> usize {
        let callbacks = &self.callbacks;
        let run = self.policy.run_all_sync();

        let mut fired = 0;
        let mut in_flight = FuturesUnordered::new();
        for (specification, outcome) in run {
            match outcome {
                PendingOutcome::Ready(outcome) => {
                    if fire_first_match(callbacks, &specification, outcome) {
                        fired += 1;
                    }
                }
                PendingOutcome::Pending(check) => {
                    in_flight.push(async move { (specification, check.await) });
                }
            }
        }

        while let Some((specification, outcome)) = in_flight.next().await {
            if fire_first_match(callbacks, &specification, outcome) {
                fired += 1;
            }
        }

        fired
    }
}

fn fire_first_match(callbacks: &[PolicyCallback], specification: &str, outcome: bool) -> bool {
    match callbacks
        .iter()
        .find(|callback| callback.matches(specification, outcome))
    {
        Some(callback) => {
            tracing::debug!(specification, outcome, "firing policy callback");
            metrics::counter!("policy_callbacks_fired_total").increment(1);
            (callback.action)();
            true
        }
        None => false,
    }
}

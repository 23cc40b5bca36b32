//! Integration tests for policy execution and callback ordering.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use policy::{
    PendingOutcome, Policy, PolicyCallback, PolicyCallbackHandler, PolicyError, Rule,
    RuleViolation, Specification,
};

type Log = Arc<Mutex<Vec<String>>>;

fn new_log() -> Log {
    Arc::new(Mutex::new(Vec::new()))
}

fn entries(log: &Log) -> Vec<String> {
    log.lock().unwrap().clone()
}

/// A rule that sleeps before answering and logs when it starts and ends.
struct Delayed {
    name: &'static str,
    delay: Duration,
    outcome: bool,
    log: Log,
}

impl Delayed {
    fn new(name: &'static str, delay_ms: u64, outcome: bool, log: &Log) -> Self {
        Self {
            name,
            delay: Duration::from_millis(delay_ms),
            outcome,
            log: Arc::clone(log),
        }
    }
}

#[async_trait]
impl Rule for Delayed {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn check(&self) -> Result<bool, RuleViolation> {
        self.log.lock().unwrap().push(format!("start {}", self.name));
        tokio::time::sleep(self.delay).await;
        self.log.lock().unwrap().push(format!("end {}", self.name));
        Ok(self.outcome)
    }
}

struct Rejecting(&'static str);

#[async_trait]
impl Rule for Rejecting {
    fn name(&self) -> &'static str {
        self.0
    }

    async fn check(&self) -> Result<bool, RuleViolation> {
        Err(RuleViolation::new(self.0, format!("{} failed", self.0)))
    }
}

fn logging_callback(name: &'static str, condition: bool, log: &Log) -> PolicyCallback {
    let log = Arc::clone(log);
    PolicyCallback::new(name, condition, move || {
        log.lock().unwrap().push(format!("fired {name}"));
    })
}

mod async_runs {
    use super::*;

    #[tokio::test]
    async fn specifications_run_strictly_sequentially() {
        let log = new_log();
        let mut policy = Policy::new("sequential");
        policy.add_specification(Specification::new(Delayed::new("slow", 20, true, &log)));
        policy.add_specification(Specification::new(Delayed::new("fast", 1, true, &log)));

        policy.run_all_async().await;

        assert_eq!(
            entries(&log),
            vec!["start slow", "end slow", "start fast", "end fast"]
        );
    }

    #[tokio::test]
    async fn callbacks_fire_in_insertion_order_after_run() {
        let log = new_log();
        let mut policy = Policy::new("ordered");
        policy.add_specification(Specification::new(Delayed::new("first", 10, true, &log)));
        policy.add_specification(Specification::new(Delayed::new("second", 1, false, &log)));

        let callbacks = vec![
            logging_callback("second", false, &log),
            logging_callback("first", true, &log),
        ];
        let fired = PolicyCallbackHandler::new(&mut policy, callbacks)
            .run_all_async_with_callbacks()
            .await;

        assert_eq!(fired, 2);
        assert_eq!(
            entries(&log),
            vec![
                "start first",
                "end first",
                "start second",
                "end second",
                "fired first",
                "fired second",
            ]
        );
    }

    #[tokio::test]
    async fn error_count_never_exceeds_specification_count() {
        let log = new_log();
        let mut policy = Policy::new("errors");
        policy.add_specification(Specification::new(Rejecting("a")));
        policy.add_specification(Specification::new(Delayed::new("b", 1, true, &log)));
        policy.add_specification(Specification::new(Rejecting("c")));

        policy.run_all_async().await;

        let errors = policy.get_errors().unwrap();
        assert!(errors.len() <= policy.len());
        assert_eq!(
            errors.iter().map(|e| e.message()).collect::<Vec<_>>(),
            vec!["a failed", "c failed"]
        );
    }

    #[tokio::test]
    async fn queries_fail_until_run() {
        let mut policy = Policy::new("guarded");
        policy.add_specification(Specification::new(Rejecting("a")));

        assert_eq!(
            policy.has_error(),
            Err(PolicyError::NotExecuted {
                operation: "checking for errors"
            })
        );

        policy.run_all_async().await;
        assert_eq!(policy.has_error(), Ok(true));
    }
}

mod sync_runs {
    use super::*;

    #[tokio::test]
    async fn suspended_checks_are_returned_pending() {
        let log = new_log();
        let mut policy = Policy::new("pending");
        policy.add_specification(Specification::new(Delayed::new("slow", 5, true, &log)));

        let run = policy.run_all_sync();
        assert_eq!(run.pending_count(), 1);

        let outcomes = run.resolve_all().await;
        assert_eq!(outcomes.get("slow"), Some(true));
        assert!(policy.check_if_all_specifications_are_satisfied().unwrap());
    }

    #[tokio::test]
    async fn dropped_pending_check_leaves_specification_unsatisfied() {
        let log = new_log();
        let mut policy = Policy::new("dropped");
        policy.add_specification(Specification::new(Delayed::new("slow", 5, true, &log)));

        let pending: Vec<_> = policy
            .run_all_sync()
            .into_iter()
            .map(|(_, outcome)| matches!(outcome, PendingOutcome::Pending(_)))
            .collect();
        assert_eq!(pending, vec![true]);

        assert!(!policy.check_if_all_specifications_are_satisfied().unwrap());
        assert_eq!(entries(&log), vec!["start slow"]);
    }

    #[tokio::test]
    async fn pending_callbacks_fire_in_completion_order() {
        let log = new_log();
        let mut policy = Policy::new("concurrent");
        policy.add_specification(Specification::new(Delayed::new("slow", 50, true, &log)));
        policy.add_specification(Specification::new(Delayed::new("fast", 1, true, &log)));

        let callbacks = vec![
            logging_callback("slow", true, &log),
            logging_callback("fast", true, &log),
        ];
        let fired = PolicyCallbackHandler::new(&mut policy, callbacks)
            .run_all_sync_with_callbacks()
            .await;

        assert_eq!(fired, 2);
        let log = entries(&log);
        let fast = log.iter().position(|e| e == "fired fast").unwrap();
        let slow = log.iter().position(|e| e == "fired slow").unwrap();
        assert!(fast < slow);
        assert_eq!(&log[..2], &["start slow", "start fast"]);
    }

    #[tokio::test]
    async fn pending_condition_is_matched_against_resolved_outcome() {
        let log = new_log();
        let mut policy = Policy::new("resolved");
        policy.add_specification(Specification::new(Delayed::new("slow", 5, false, &log)));

        let fired = PolicyCallbackHandler::new(
            &mut policy,
            vec![
                logging_callback("slow", true, &log),
                logging_callback("slow", false, &log),
            ],
        )
        .run_all_sync_with_callbacks()
        .await;

        assert_eq!(fired, 1);
        assert_eq!(entries(&log).last().map(String::as_str), Some("fired slow"));
        assert!(!policy.specification("slow").unwrap().satisfied());
    }
}

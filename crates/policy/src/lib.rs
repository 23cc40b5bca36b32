//! Rule-evaluation engine.
//!
//! This crate provides:
//! - `Rule` trait for declaring a single business check
//! - `Specification` which tracks a rule's outcome and recorded error
//! - `Policy` for running an ordered set of specifications and querying them
//! - `PolicyCallbackHandler` for binding specification outcomes to side effects

pub mod callback;
pub mod error;
pub mod outcome;
pub mod policy;
pub mod specification;

pub use callback::{CallbackAction, PolicyCallback, PolicyCallbackHandler};
pub use error::{PolicyError, Result, RuleViolation};
pub use outcome::{PendingOutcome, RunOutcomes, SyncRun};
pub use policy::Policy;
pub use specification::{Rule, Specification};

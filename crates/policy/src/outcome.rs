//! Run outcomes for policies.

use futures_util::future::BoxFuture;

/// Outcomes of a completed run, keyed by specification name.
///
/// Iteration follows the order in which specifications ran. Recording the
/// same name twice keeps its original position and the latest outcome.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOutcomes {
    entries: Vec<(String, bool)>,
}

impl RunOutcomes {
    /// Creates an empty set of outcomes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the outcome for a specification name.
    pub fn insert(&mut self, name: impl Into<String>, outcome: bool) {
        let name = name.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = outcome,
            None => self.entries.push((name, outcome)),
        }
    }

    /// Returns the outcome recorded for a name.
    pub fn get(&self, name: &str) -> Option<bool> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, outcome)| *outcome)
    }

    /// Returns the number of distinct names recorded.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(name, outcome)` pairs in run order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.entries
            .iter()
            .map(|(name, outcome)| (name.as_str(), *outcome))
    }
}

/// The outcome of a specification started by `Policy::run_all_sync`.
///
/// Checks that complete on their first poll are `Ready`. Checks that suspend
/// are handed back as `Pending` and only update their specification once
/// driven to completion. Dropping a pending outcome cancels the check.
pub enum PendingOutcome<'a> {
    Ready(bool),
    Pending(BoxFuture<'a, bool>),
}

impl PendingOutcome<'_> {
    /// Returns true if the outcome is already known.
    pub fn is_ready(&self) -> bool {
        matches!(self, PendingOutcome::Ready(_))
    }

    /// Returns the outcome if it is already known.
    pub fn ready(&self) -> Option<bool> {
        match self {
            PendingOutcome::Ready(outcome) => Some(*outcome),
            PendingOutcome::Pending(_) => None,
        }
    }

    /// Drives the check to completion.
    pub async fn resolve(self) -> bool {
        match self {
            PendingOutcome::Ready(outcome) => outcome,
            PendingOutcome::Pending(check) => check.await,
        }
    }
}

impl std::fmt::Debug for PendingOutcome<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PendingOutcome::Ready(outcome) => f.debug_tuple("Ready").field(outcome).finish(),
            PendingOutcome::Pending(_) => f.write_str("Pending"),
        }
    }
}

/// Outcomes of a synchronous run, one entry per name in insertion order.
///
/// A repeated name keeps its first position and its latest check, matching
/// `RunOutcomes::insert`. The earlier check for that name is dropped.
///
/// Entries borrow their specifications, so the policy cannot be queried
/// until the run is resolved or dropped.
#[derive(Debug, Default)]
pub struct SyncRun<'a> {
    entries: Vec<(String, PendingOutcome<'a>)>,
}

impl<'a> SyncRun<'a> {
    pub(crate) fn push(&mut self, name: String, outcome: PendingOutcome<'a>) {
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = outcome,
            None => self.entries.push((name, outcome)),
        }
    }

    /// Returns the number of distinct names started.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the policy had no specifications.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of checks still in flight.
    pub fn pending_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|(_, outcome)| !outcome.is_ready())
            .count()
    }

    /// Returns the known outcome for a name, if resolved.
    pub fn ready(&self, name: &str) -> Option<bool> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .and_then(|(_, outcome)| outcome.ready())
    }

    /// Drives every check to completion in insertion order.
    pub async fn resolve_all(self) -> RunOutcomes {
        let mut outcomes = RunOutcomes::new();
        for (name, outcome) in self.entries {
            outcomes.insert(name, outcome.resolve().await);
        }
        outcomes
    }
}

impl<'a> IntoIterator for SyncRun<'a> {
    type Item = (String, PendingOutcome<'a>);
    type IntoIter = std::vec::IntoIter<(String, PendingOutcome<'a>)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

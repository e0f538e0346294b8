// src/fuzz/aggregator.rs
// =============================================================================
// Thread-safe accumulator for everything the workers find.
//
// - `total_requests` is an atomic counter: workers bump it on every response
//   that made it back, no lock needed
// - The result list and the found counter live behind ONE mutex, so
//   `found_count == results.len()` holds at every instant
//
// Nothing outside this type touches the counters or the list directly.
// =============================================================================

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

use crate::probe::ProbeOutcome;

#[derive(Debug, Default)]
struct Found {
    results: Vec<ProbeOutcome>,
    count: u64,
}

#[derive(Debug, Default)]
pub struct ResultAggregator {
    total_requests: AtomicU64,
    found: Mutex<Found>,
}

/// Aggregated state of a finished (or interrupted) run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSnapshot {
    pub total_requests: u64,
    pub found_count: u64,
    /// Outcomes in the order they were recorded.
    pub results: Vec<ProbeOutcome>,
}

impl RunSnapshot {
    /// Results ordered by status code. Stable, so equal codes keep the
    /// order in which they were found.
    pub fn sorted_by_status(&self) -> Vec<ProbeOutcome> {
        let mut sorted = self.results.clone();
        sorted.sort_by_key(|outcome| outcome.status);
        sorted
    }
}

impl ResultAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_attempt(&self) {
        self.total_requests.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_outcome(&self, outcome: ProbeOutcome) {
        let mut found = self.lock_found();
        found.results.push(outcome);
        found.count += 1;
    }

    /// Only meaningful once every worker has been joined; while workers are
    /// still running the counters and the list may be from different moments.
    pub fn snapshot(&self) -> RunSnapshot {
        let found = self.lock_found();
        RunSnapshot {
            total_requests: self.total_requests.load(Ordering::Acquire),
            found_count: found.count,
            results: found.results.clone(),
        }
    }

    // A worker that panicked mid-push can't leave `Found` half-updated
    // (push and increment are both infallible), so a poisoned lock is safe
    // to keep using.
    fn lock_found(&self) -> MutexGuard<'_, Found> {
        self.found.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

// src/fuzz/pool.rs
// =============================================================================
// A fixed-size pool of workers draining a FIFO queue of candidates.
//
// How it works:
// 1. The pool is created with every candidate already queued (Created)
// 2. `run` spawns exactly `threads` worker tasks (Running)
// 3. Each worker pops one candidate, awaits the probe closure, repeats
// 4. When the last candidate is handed out, the pool is Draining: the queue
//    is empty but some workers may still be waiting on a response
// 5. `run` joins every worker before returning (Stopped)
//
// A worker only exits after the probe it is running has finished, so joining
// all of them is the drain: nothing is still in flight when `run` returns.
//
// Cancellation: a `ShutdownSignal` (set from the Ctrl-C handler) makes
// workers stop picking up new candidates. In-flight probes finish or hit
// their timeout, and the pool still joins every worker.
//
// A worker that panics is counted, not propagated: the other workers keep
// draining the queue and whatever they recorded is still reported.
//
// Rust concepts:
// - JoinSet: owns a group of spawned tasks and lets us await each one
// - Atomics: lock-free counters and the pool state shared with workers
// - Generics with trait bounds: the pool takes any async closure
// =============================================================================

use std::collections::VecDeque;
use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicU8, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use thiserror::Error;
use tokio::task::{JoinError, JoinSet};
use tracing::{debug, trace, warn};

use crate::wordlist::Candidate;

/// Lifecycle of a pool. Transitions only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum PoolState {
    Created = 0,
    Running = 1,
    Draining = 2,
    Stopped = 3,
}

impl PoolState {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => PoolState::Created,
            1 => PoolState::Running,
            2 => PoolState::Draining,
            _ => PoolState::Stopped,
        }
    }
}

/// Read-only view of a pool's state that can be moved into other tasks.
#[derive(Debug, Clone)]
pub struct PoolStateHandle(Arc<AtomicU8>);

impl PoolStateHandle {
    pub fn get(&self) -> PoolState {
        PoolState::from_u8(self.0.load(Ordering::Acquire))
    }

    fn advance(&self, from: PoolState, to: PoolState) -> bool {
        let moved = self
            .0
            .compare_exchange(from as u8, to as u8, Ordering::AcqRel, Ordering::Acquire)
            .is_ok();
        if moved {
            debug!(?from, ?to, "worker pool state changed");
        }
        moved
    }

    fn stop(&self) {
        let from = PoolState::from_u8(self.0.swap(PoolState::Stopped as u8, Ordering::AcqRel));
        debug!(?from, to = ?PoolState::Stopped, "worker pool state changed");
    }
}

/// Cooperative stop flag shared between the Ctrl-C handler and the workers.
#[derive(Debug, Clone, Default)]
pub struct ShutdownSignal(Arc<AtomicBool>);

impl ShutdownSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trigger(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_triggered(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

#[derive(Debug, Error)]
pub enum PoolError {
    #[error("worker pool is {0:?}; a new pool is needed for another run")]
    NotReusable(PoolState),
}

/// What happened during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolReport {
    /// Candidates handed to the probe closure.
    pub dispatched: usize,
    /// Probe calls that ran to completion.
    pub completed: usize,
    /// The shutdown signal fired before the pool stopped.
    pub interrupted: bool,
    /// Workers that ended in a panic instead of draining the queue.
    pub failed_workers: usize,
}

#[derive(Debug)]
struct WorkQueue {
    items: Mutex<VecDeque<Candidate>>,
}

impl WorkQueue {
    fn new(candidates: Vec<Candidate>) -> Self {
        Self {
            items: Mutex::new(candidates.into()),
        }
    }

    // Returns the candidate together with how many are left behind it.
    fn pop(&self) -> Option<(Candidate, usize)> {
        let mut items = self.items.lock().unwrap_or_else(PoisonError::into_inner);
        let item = items.pop_front()?;
        Some((item, items.len()))
    }

    fn len(&self) -> usize {
        self.items.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Default)]
struct Progress {
    dispatched: AtomicUsize,
    completed: AtomicUsize,
}

#[derive(Debug)]
pub struct WorkerPool {
    threads: usize,
    queue: Arc<WorkQueue>,
    state: PoolStateHandle,
    shutdown: ShutdownSignal,
}

impl WorkerPool {
    /// Creates a pool with `candidates` queued in order. A `threads` of 0 is
    /// treated as 1.
    pub fn new(threads: usize, candidates: Vec<Candidate>, shutdown: ShutdownSignal) -> Self {
        Self {
            threads: threads.max(1),
            queue: Arc::new(WorkQueue::new(candidates)),
            state: PoolStateHandle(Arc::new(AtomicU8::new(PoolState::Created as u8))),
            shutdown,
        }
    }

    pub fn state(&self) -> PoolState {
        self.state.get()
    }

    #[cfg(test)]
    pub fn state_handle(&self) -> PoolStateHandle {
        self.state.clone()
    }

    /// Candidates not yet handed to a worker.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Runs `probe` once for every queued candidate on `threads` workers and
    /// returns after all of them have finished.
    ///
    /// A pool runs once; calling `run` again returns
    /// [`PoolError::NotReusable`].
    pub async fn run<F, Fut>(&mut self, probe: F) -> Result<PoolReport, PoolError>
    where
        F: Fn(Candidate) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        if !self.state.advance(PoolState::Created, PoolState::Running) {
            return Err(PoolError::NotReusable(self.state()));
        }

        let probe = Arc::new(probe);
        let progress = Arc::new(Progress::default());

        // Nothing queued: drained before anyone starts.
        if self.queue.is_empty() {
            self.state.advance(PoolState::Running, PoolState::Draining);
        }

        debug!(threads = self.threads, queued = self.queue.len(), "starting workers");

        let mut workers = JoinSet::new();
        for id in 0..self.threads {
            workers.spawn(worker_loop(
                id,
                Arc::clone(&self.queue),
                Arc::clone(&probe),
                Arc::clone(&progress),
                self.state.clone(),
                self.shutdown.clone(),
            ));
        }

        // Join every worker even if one of them failed, so none outlives the pool.
        let mut failed_workers = 0;
        while let Some(joined) = workers.join_next().await {
            if let Err(err) = joined {
                log_worker_failure(&err);
                failed_workers += 1;
            }
        }
        // Read before Stopped: a Ctrl-C while the last probes were still in
        // flight counts as an interruption even though the queue is empty.
        let interrupted = self.shutdown.is_triggered();
        self.state.stop();

        let report = PoolReport {
            dispatched: progress.dispatched.load(Ordering::Acquire),
            completed: progress.completed.load(Ordering::Acquire),
            interrupted,
            failed_workers,
        };
        debug!(?report, "worker pool stopped");
        Ok(report)
    }
}

fn log_worker_failure(err: &JoinError) {
    if err.is_panic() {
        warn!(error = %err, "worker panicked");
    } else {
        warn!(error = %err, "worker cancelled");
    }
}

async fn worker_loop<F, Fut>(
    id: usize,
    queue: Arc<WorkQueue>,
    probe: Arc<F>,
    progress: Arc<Progress>,
    state: PoolStateHandle,
    shutdown: ShutdownSignal,
) where
    F: Fn(Candidate) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    trace!(worker = id, "worker started");

    loop {
        if shutdown.is_triggered() {
            state.advance(PoolState::Running, PoolState::Draining);
            break;
        }

        let Some((candidate, remaining)) = queue.pop() else {
            break;
        };
        if remaining == 0 {
            state.advance(PoolState::Running, PoolState::Draining);
        }

        progress.dispatched.fetch_add(1, Ordering::AcqRel);
        probe(candidate).await;
        progress.completed.fetch_add(1, Ordering::AcqRel);
    }

    trace!(worker = id, "worker exiting");
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why not just check "is the queue empty?" to know we're done?
//    - The queue can be empty while workers are still waiting on responses
//    - Those responses still have to be counted and recorded
//    - Awaiting every JoinHandle waits for the work, not just the queue
//
// 2. Why Arc<F> for the probe closure?
//    - Every worker needs to call the same closure
//    - Arc gives each task a shared, thread-safe handle to it
//    - Calling `probe(candidate)` on an Arc<F> derefs to the closure
//
// 3. What is compare_exchange?
//    - "If the value is still X, set it to Y" as one atomic step
//    - Several workers may notice the drain at once; only the first one
//      moves the state, the rest see it already moved
// -----------------------------------------------------------------------------

// src/fuzz/mod.rs
// =============================================================================
// The concurrent probing engine.
//
// Submodules:
// - aggregator: Thread-safe counters and result list
// - pool: Fixed-size worker pool over a FIFO queue of candidates
// - run: Ties wordlist, pool, aggregator and output together
// =============================================================================

mod aggregator;
mod pool;
mod run;

pub use aggregator::{ResultAggregator, RunSnapshot};
pub use pool::ShutdownSignal;
pub use run::FuzzRun;

// src/probe/prober.rs
// =============================================================================
// Probes one candidate path and decides what the result means.
//
// Every probe ends in exactly one of three ways:
// - Success: the server answered with an interesting code -> count + record
// - Filtered: the server answered with anything else -> count only
// - TransportFailure: timeout, refused connection, broken body -> nothing
//
// Transport failures are dropped on purpose. A scan sends thousands of
// requests to hosts that are often flaky; printing or logging every failure
// would bury the actual findings.
// =============================================================================

use std::sync::Arc;

use serde::Serialize;
use tracing::trace;

use super::classify::is_interesting;
use super::transport::Transport;
use crate::config::Target;
use crate::fuzz::ResultAggregator;
use crate::report::console;

/// A path that answered with an interesting status code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeOutcome {
    pub path: String,
    pub url: String,
    pub status: u16,
    pub size: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeResult {
    Success(ProbeOutcome),
    Filtered { status: u16 },
    TransportFailure,
}

/// Called once per recorded finding. Defaults to the console found-line.
pub type FoundReporter = Arc<dyn Fn(&ProbeOutcome) + Send + Sync>;

/// Sends one GET per candidate against a fixed target.
#[derive(Clone)]
pub struct Prober {
    target: Target,
    transport: Arc<dyn Transport>,
    on_found: FoundReporter,
}

impl Prober {
    pub fn new(target: Target, transport: Arc<dyn Transport>) -> Self {
        Self {
            target,
            transport,
            on_found: Arc::new(console::print_found),
        }
    }

    #[cfg(test)]
    pub fn with_found_reporter(mut self, on_found: FoundReporter) -> Self {
        self.on_found = on_found;
        self
    }

    pub async fn probe(&self, path: &str) -> ProbeResult {
        let url = match self.target.resolve(path) {
            Ok(url) => url,
            Err(_) => return ProbeResult::TransportFailure,
        };

        let response = match self.transport.get(&url).await {
            Ok(response) => response,
            Err(_) => return ProbeResult::TransportFailure,
        };

        if is_interesting(response.status) {
            ProbeResult::Success(ProbeOutcome {
                path: path.to_string(),
                url: url.to_string(),
                status: response.status,
                size: response.size,
            })
        } else {
            ProbeResult::Filtered {
                status: response.status,
            }
        }
    }

    /// Probes `path` and feeds the result into `aggregator`.
    ///
    /// The found-line is printed after the outcome has been recorded, from
    /// the outcome this call owns.
    pub async fn probe_and_record(&self, path: &str, aggregator: &ResultAggregator) {
        match self.probe(path).await {
            ProbeResult::Success(outcome) => {
                aggregator.record_attempt();
                aggregator.record_outcome(outcome.clone());
                (self.on_found)(&outcome);
            }
            ProbeResult::Filtered { status } => {
                trace!(path, status, "response filtered");
                aggregator.record_attempt();
            }
            ProbeResult::TransportFailure => {}
        }
    }
}

impl std::fmt::Debug for Prober {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Prober")
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}

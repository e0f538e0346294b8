// src/probe/mod.rs
// =============================================================================
// This module contains everything needed to probe a single candidate path.
//
// Submodules:
// - classify: Which status codes are interesting and how they are labeled
// - transport: The HTTP layer (reqwest in production, stubs in tests)
// - prober: Resolves the URL, sends the request, classifies the response
// =============================================================================

mod classify;
mod prober;
mod transport;

pub use classify::{status_tag, StatusCategory};
pub use prober::{ProbeOutcome, Prober};
pub use transport::{HttpTransport, Transport};

#[cfg(test)]
pub use transport::{FetchedResponse, TransportError};

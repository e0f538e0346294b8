// src/probe/transport.rs
// =============================================================================
// The HTTP layer the prober talks to.
//
// `Transport` is a small trait with one method: GET a URL, hand back the
// status code and the body size. The real implementation wraps a reqwest
// `Client`; tests plug in stubs that answer from a table.
//
// Client settings (shared by every worker, built once per run):
// - Per-request timeout covering connect, headers and body
// - Redirects are NOT followed: a 301 is reported as a 301
// - A fixed browser-like User-Agent
//
// Rust concepts:
// - Trait objects: `Arc<dyn Transport>` lets the prober ignore which
//   implementation it is using
// - BoxFuture: an async method in a trait object needs a boxed future
// =============================================================================

use std::time::Duration;

use futures::future::BoxFuture;
use reqwest::{redirect, Client};
use thiserror::Error;
use url::Url;

pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// What we keep from a completed HTTP round trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchedResponse {
    pub status: u16,
    pub size: u64,
}

/// A request that never produced a full response.
///
/// These never leave the prober: they are soft failures.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("request failed: {0}")]
    Other(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            TransportError::Timeout
        } else if error.is_connect() {
            TransportError::Connect(error.to_string())
        } else {
            TransportError::Other(error.to_string())
        }
    }
}

pub trait Transport: Send + Sync {
    fn get<'a>(&'a self, url: &'a Url) -> BoxFuture<'a, Result<FetchedResponse, TransportError>>;
}

/// reqwest-backed transport used for real scans.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .redirect(redirect::Policy::none())
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn get<'a>(&'a self, url: &'a Url) -> BoxFuture<'a, Result<FetchedResponse, TransportError>> {
        Box::pin(async move {
            let response = self.client.get(url.clone()).send().await?;
            let status = response.status().as_u16();

            // The size is the body we actually received, not Content-Length.
            // A body that times out halfway is a failed request.
            let body = response.bytes().await?;

            Ok(FetchedResponse {
                status,
                size: body.len() as u64,
            })
        })
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why a trait here?
//    - The prober only needs "GET this URL, give me status and size"
//    - Tests can answer from a HashMap instead of opening sockets
//
// 2. Why Box::pin(async move { ... })?
//    - Trait objects can't have plain `async fn` methods
//    - Boxing the future gives it a fixed size the caller can store
//
// 3. Why is Client cheap to share?
//    - reqwest::Client is an Arc around a connection pool
//    - Every worker goes through the same pool
// -----------------------------------------------------------------------------

// src/testing.rs
// =============================================================================
// Test-only helpers: a tiny HTTP/1.1 server that answers from a route table.
//
// Each connection handles exactly one request and is closed afterwards.
// Paths not in the table get a 404. Every request path and User-Agent is
// recorded so tests can assert on what actually hit the wire.
// =============================================================================

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

#[derive(Debug, Clone)]
pub enum Reply {
    Status {
        code: u16,
        body: &'static str,
        location: Option<&'static str>,
    },
    /// Close the connection without answering.
    Drop,
    /// Keep the connection open and never answer.
    Hang,
}

impl Reply {
    pub fn status(code: u16, body: &'static str) -> Self {
        Reply::Status {
            code,
            body,
            location: None,
        }
    }

    pub fn redirect(code: u16, location: &'static str) -> Self {
        Reply::Status {
            code,
            body: "",
            location: Some(location),
        }
    }
}

#[derive(Debug, Default)]
struct Recorded {
    paths: Vec<String>,
    user_agents: Vec<String>,
}

pub struct StubServer {
    base_url: String,
    recorded: Arc<Mutex<Recorded>>,
}

impl StubServer {
    pub async fn start(routes: Vec<(&'static str, Reply)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let port = listener.local_addr().expect("local addr").port();
        let routes: Arc<HashMap<&'static str, Reply>> = Arc::new(routes.into_iter().collect());
        let recorded = Arc::new(Mutex::new(Recorded::default()));

        let task_recorded = Arc::clone(&recorded);
        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let routes = Arc::clone(&routes);
                let recorded = Arc::clone(&task_recorded);
                tokio::spawn(handle(stream, routes, recorded));
            }
        });

        Self {
            base_url: format!("http://127.0.0.1:{}/", port),
            recorded,
        }
    }

    /// "http://127.0.0.1:<port>/"
    pub fn base_url(&self) -> String {
        self.base_url.clone()
    }

    pub fn hits(&self) -> Vec<String> {
        self.recorded.lock().unwrap().paths.clone()
    }

    pub fn user_agents(&self) -> Vec<String> {
        self.recorded.lock().unwrap().user_agents.clone()
    }
}

async fn handle(
    mut stream: TcpStream,
    routes: Arc<HashMap<&'static str, Reply>>,
    recorded: Arc<Mutex<Recorded>>,
) {
    let mut request = Vec::new();
    let mut buf = [0u8; 4096];
    while !request.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut buf).await {
            Ok(0) | Err(_) => return,
            Ok(n) => request.extend_from_slice(&buf[..n]),
        }
    }

    let text = String::from_utf8_lossy(&request);
    let mut lines = text.lines();
    let path = lines
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("/")
        .to_string();
    let user_agent = lines
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("user-agent"))
        .map(|(_, value)| value.trim().to_string());

    let reply = routes
        .get(path.as_str())
        .cloned()
        .unwrap_or(Reply::status(404, "not found"));

    {
        let mut recorded = recorded.lock().unwrap();
        recorded.paths.push(path);
        recorded.user_agents.extend(user_agent);
    }

    match reply {
        Reply::Status {
            code,
            body,
            location,
        } => {
            let reason = reqwest::StatusCode::from_u16(code)
                .ok()
                .and_then(|s| s.canonical_reason())
                .unwrap_or("Unknown");
            let location = location
                .map(|l| format!("Location: {}\r\n", l))
                .unwrap_or_default();
            let response = format!(
                "HTTP/1.1 {} {}\r\nContent-Length: {}\r\n{}Connection: close\r\n\r\n{}",
                code,
                reason,
                body.len(),
                location,
                body
            );
            let _ = stream.write_all(response.as_bytes()).await;
            let _ = stream.shutdown().await;
        }
        Reply::Drop => {}
        Reply::Hang => {
            tokio::time::sleep(Duration::from_secs(30)).await;
        }
    }
}

/// A base URL on a port nothing listens on, so connecting is refused.
pub async fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let port = listener.local_addr().expect("local addr").port();
    drop(listener);
    format!("http://127.0.0.1:{}/", port)
}

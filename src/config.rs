// src/config.rs
// =============================================================================
// This module turns raw command-line input into a validated configuration.
//
// What gets checked here (before any request is made):
// - The target URL parses and uses http or https
// - The target has its trailing slashes stripped exactly once
// - At least one worker and a non-zero timeout were requested
// - The extension list is split and cleaned up
//
// Rust concepts:
// - thiserror: derive std::error::Error for our own error enum
// - Newtypes: `Target` wraps a Url so only normalized targets exist
// =============================================================================

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::cli::{Cli, ReportFormat};
use crate::wordlist::parse_extensions;

/// Problems with the user-supplied settings. All of them are fatal at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("target URL is empty")]
    EmptyTarget,

    #[error("invalid target URL '{url}': {source}")]
    InvalidTarget {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("unsupported scheme '{0}' (expected http or https)")]
    UnsupportedScheme(String),

    #[error("thread count must be at least 1")]
    ZeroThreads,

    #[error("timeout must be at least 1 second")]
    ZeroTimeout,
}

/// A normalized scan target.
///
/// `as_str()` is the target without trailing slashes (what we show the user);
/// candidates are joined onto the same URL with exactly one trailing slash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    normalized: String,
    base: Url,
}

impl Target {
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::EmptyTarget);
        }

        let normalized = trimmed.trim_end_matches('/').to_string();
        let base = Url::parse(&format!("{}/", normalized)).map_err(|source| {
            ConfigError::InvalidTarget {
                url: trimmed.to_string(),
                source,
            }
        })?;

        if base.scheme() != "http" && base.scheme() != "https" {
            return Err(ConfigError::UnsupportedScheme(base.scheme().to_string()));
        }

        Ok(Self { normalized, base })
    }

    pub fn as_str(&self) -> &str {
        &self.normalized
    }

    // Standard URL-join: "admin" lands under the base path,
    // "/admin" replaces the base path entirely.
    pub fn resolve(&self, path: &str) -> Result<Url, url::ParseError> {
        self.base.join(path)
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.normalized)
    }
}

/// Everything a fuzz run needs, already validated.
#[derive(Debug, Clone)]
pub struct FuzzConfig {
    pub target: Target,
    pub wordlist: PathBuf,
    pub threads: usize,
    pub timeout: Duration,
    pub extensions: Vec<String>,
    pub output: Option<PathBuf>,
    pub format: ReportFormat,
}

impl FuzzConfig {
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        if cli.threads == 0 {
            return Err(ConfigError::ZeroThreads);
        }
        if cli.timeout == 0 {
            return Err(ConfigError::ZeroTimeout);
        }

        Ok(Self {
            target: Target::parse(&cli.url)?,
            wordlist: cli.wordlist.clone(),
            threads: cli.threads,
            timeout: Duration::from_secs(cli.timeout),
            extensions: cli
                .extensions
                .as_deref()
                .map(parse_extensions)
                .unwrap_or_default(),
            output: cli.output.clone(),
            format: cli.format,
        })
    }
}

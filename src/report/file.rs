// src/report/file.rs
// =============================================================================
// Writes the final report file once the scan is over.
//
// Two formats:
// - text: a header block followed by one entry per finding
// - json: one document with the same information, for other tools
//
// Findings are always written sorted by status code. A failure here never
// affects the scan: the caller prints a warning and moves on.
// =============================================================================

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Local};
use serde::Serialize;
use thiserror::Error;

use crate::cli::ReportFormat;
use crate::fuzz::RunSnapshot;
use crate::probe::ProbeOutcome;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("could not write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not serialize report: {0}")]
    Json(#[from] serde_json::Error),
}

/// Run details that go into the report header.
#[derive(Debug, Clone)]
pub struct ReportHeader<'a> {
    pub target: &'a str,
    pub wordlist: &'a Path,
    pub generated_at: DateTime<Local>,
    pub elapsed: Duration,
    pub interrupted: bool,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    target: &'a str,
    wordlist: String,
    generated_at: String,
    elapsed_secs: f64,
    total_requests: u64,
    found_count: u64,
    interrupted: bool,
    results: Vec<ProbeOutcome>,
}

pub fn render_text(header: &ReportHeader<'_>, snapshot: &RunSnapshot) -> String {
    let rule = "=".repeat(70);
    let mut out = String::new();

    out.push_str("Directory Fuzzing Report\n");
    out.push_str(&format!("{}\n\n", rule));
    out.push_str(&format!("Target: {}\n", header.target));
    out.push_str(&format!("Wordlist: {}\n", header.wordlist.display()));
    out.push_str(&format!(
        "Date: {}\n",
        header.generated_at.format("%Y-%m-%d %H:%M:%S")
    ));
    out.push_str(&format!("Elapsed: {:.2} seconds\n", header.elapsed.as_secs_f64()));
    out.push_str(&format!("Total requests: {}\n", snapshot.total_requests));
    out.push_str(&format!("Found: {}\n", snapshot.found_count));
    if header.interrupted {
        out.push_str("Status: interrupted (partial results)\n");
    }
    out.push('\n');

    if snapshot.results.is_empty() {
        return out;
    }

    out.push_str("Results:\n");
    out.push_str(&format!("{}\n\n", "-".repeat(70)));
    for outcome in snapshot.sorted_by_status() {
        out.push_str(&format!("[{}] {}\n", outcome.status, outcome.url));
        out.push_str(&format!("  Size: {} bytes\n\n", outcome.size));
    }

    out
}

pub fn render_json(header: &ReportHeader<'_>, snapshot: &RunSnapshot) -> Result<String, ReportError> {
    let report = JsonReport {
        target: header.target,
        wordlist: header.wordlist.display().to_string(),
        generated_at: header.generated_at.to_rfc3339(),
        elapsed_secs: header.elapsed.as_secs_f64(),
        total_requests: snapshot.total_requests,
        found_count: snapshot.found_count,
        interrupted: header.interrupted,
        results: snapshot.sorted_by_status(),
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

pub fn write_report(
    path: &Path,
    format: ReportFormat,
    header: &ReportHeader<'_>,
    snapshot: &RunSnapshot,
) -> Result<(), ReportError> {
    let contents = match format {
        ReportFormat::Text => render_text(header, snapshot),
        ReportFormat::Json => render_json(header, snapshot)?,
    };

    std::fs::write(path, contents).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })
}

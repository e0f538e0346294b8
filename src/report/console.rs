// src/report/console.rs
// =============================================================================
// Everything the operator sees on the terminal.
//
// - A banner before the scan (target, wordlist, threads, timeout, extensions)
// - One colored line per discovered path, printed as soon as it is found
// - A summary after the scan (totals, timing, sorted findings)
//
// Colors come from the `colored` crate:
//   200 green, redirects yellow, 403 cyan, 401 magenta, anything else white
//
// Result lines go to stdout; logs go to stderr (see logging.rs), so piping
// stdout into a file gives a clean list of findings.
// =============================================================================

use std::time::Duration;

use colored::{ColoredString, Colorize};

use crate::config::FuzzConfig;
use crate::fuzz::RunSnapshot;
use crate::probe::{status_tag, ProbeOutcome, StatusCategory};

const RULE_WIDTH: usize = 70;

// --no-color. Without it `colored` decides on its own (NO_COLOR, tty checks).
pub fn disable_colors() {
    colored::control::set_override(false);
}

fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

pub fn print_banner(config: &FuzzConfig) {
    println!();
    println!("{}", rule().cyan());
    println!("{}", "  dirfuzz - Directory and file discovery".cyan());
    println!("{}", rule().cyan());
    println!();
    println!("{}", format!("[*] Target: {}", config.target).yellow());
    println!("{}", format!("[*] Wordlist: {}", config.wordlist.display()).yellow());
    println!("{}", format!("[*] Threads: {}", config.threads).yellow());
    println!("{}", format!("[*] Timeout: {}s", config.timeout.as_secs()).yellow());
    if !config.extensions.is_empty() {
        println!(
            "{}",
            format!("[*] Extensions: {}", config.extensions.join(", ")).yellow()
        );
    }
    println!();
}

pub fn print_plan(candidates: usize) {
    println!("{}", format!("[*] Total URLs to test: {}", candidates).yellow());
    println!();
    println!("{}", "[+] Starting fuzzing...".green());
    println!();
}

/// "[200 OK] http://example.com/admin (1234 bytes)"
pub fn found_line(outcome: &ProbeOutcome) -> String {
    format!(
        "{} {} ({} bytes)",
        status_tag(outcome.status),
        outcome.url,
        outcome.size
    )
}

fn paint(status: u16, text: String) -> ColoredString {
    match StatusCategory::of(status) {
        StatusCategory::Ok => text.green(),
        StatusCategory::Redirect => text.yellow(),
        StatusCategory::Forbidden => text.cyan(),
        StatusCategory::Unauthorized => text.magenta(),
        StatusCategory::Other => text.white(),
    }
}

// One println! per finding: the line is formatted up front so that two
// workers printing at once can't interleave inside a line.
pub fn print_found(outcome: &ProbeOutcome) {
    println!("{}", paint(outcome.status, found_line(outcome)));
}

pub fn print_interrupted() {
    println!();
    println!("{}", "[!] Fuzzing interrupted by user".yellow());
}

/// Requests per second, 0 when no measurable time has passed.
pub fn request_rate(total_requests: u64, elapsed: Duration) -> f64 {
    let secs = elapsed.as_secs_f64();
    if secs > 0.0 {
        total_requests as f64 / secs
    } else {
        0.0
    }
}

pub fn print_summary(snapshot: &RunSnapshot, elapsed: Duration) {
    println!();
    println!("{}", rule().cyan());
    println!("{}", "  Results summary".cyan());
    println!("{}", rule().cyan());
    println!();
    println!(
        "{}",
        format!("[*] Total requests: {}", snapshot.total_requests).yellow()
    );
    println!(
        "{}",
        format!("[*] Directories/files found: {}", snapshot.found_count).yellow()
    );
    println!(
        "{}",
        format!("[*] Total time: {:.2} seconds", elapsed.as_secs_f64()).yellow()
    );
    println!(
        "{}",
        format!(
            "[*] Speed: {:.2} requests/second",
            request_rate(snapshot.total_requests, elapsed)
        )
        .yellow()
    );
    println!();

    if snapshot.results.is_empty() {
        return;
    }

    println!("{}", "[+] Resources found:".green());
    println!();
    for outcome in snapshot.sorted_by_status() {
        println!("  [{}] {} ({} bytes)", outcome.status, outcome.url, outcome.size);
    }
}

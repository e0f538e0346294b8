// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things). The parsed `Cli` is raw
// user input; `config::FuzzConfig::from_cli` turns it into validated settings.
//
// Rust concepts:
// - Structs: Custom data types that group related data
// - Derive macros: Automatically generate code for our types
// - ValueEnum: Lets clap parse a fixed set of string values into an enum
// =============================================================================

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

// This struct represents our entire CLI application
//
// #[derive(Parser)] tells clap to automatically generate parsing code
// The #[command(...)] attributes configure how the CLI behaves
#[derive(Parser, Debug)]
#[command(
    name = "dirfuzz",
    version = "0.1.0",
    about = "Discover hidden directories and files on a web server using a wordlist",
    long_about = "dirfuzz requests every word of a wordlist (optionally combined with file \
                  extensions) against a target URL and reports the paths that answer with \
                  an interesting status code.\n\n\
                  Only use this tool against systems you are explicitly authorized to test.",
    after_help = "Examples:\n  \
                  dirfuzz -u http://example.com -w wordlist.txt\n  \
                  dirfuzz -u http://example.com -w wordlist.txt -e php,html,txt -t 20\n  \
                  dirfuzz -u http://example.com -w wordlist.txt -o report.txt"
)]
pub struct Cli {
    /// Target URL (e.g., http://example.com)
    #[arg(short = 'u', long = "url")]
    pub url: String,

    /// Path to the wordlist file (one word per line)
    #[arg(short = 'w', long = "wordlist")]
    pub wordlist: PathBuf,

    /// Number of concurrent workers
    #[arg(short = 't', long = "threads", default_value_t = 10)]
    pub threads: usize,

    /// Per-request timeout in seconds
    ///
    /// Capital -T because -t is already taken by --threads
    #[arg(short = 'T', long = "timeout", default_value_t = 5)]
    pub timeout: u64,

    /// Comma-separated extensions to try for every word (e.g., php,html,txt)
    #[arg(short = 'e', long = "extensions")]
    pub extensions: Option<String>,

    /// Write a report file to this path when the scan is over
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Report file format
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,

    /// Disable colored terminal output
    #[arg(long)]
    pub no_color: bool,

    /// Show debug logs on stderr (RUST_LOG overrides this)
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

// Formats the report writer understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Plain text with a header block and one entry per finding
    Text,
    /// A single JSON document
    Json,
}

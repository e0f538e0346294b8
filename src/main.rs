// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Validate them into a FuzzConfig (bad input stops us right here)
// 3. Install the Ctrl-C listener
// 4. Run the scan and print the summary
// 5. Write the report file if one was requested
// 6. Exit with proper code (0 = finished or interrupted, 1 = startup error)
//
// Rust concepts used:
// - async/await: The scan runs on the tokio runtime
// - Result<T, E>: Startup errors bubble up to main with `?`
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cli;      // src/cli.rs - command-line parsing
mod config;   // src/config.rs - validated settings and target normalization
mod fuzz;     // src/fuzz/ - worker pool, aggregator, the scan itself
mod logging;  // src/logging.rs - tracing setup
mod probe;    // src/probe/ - one HTTP request per candidate
mod report;   // src/report/ - terminal output and report files
mod wordlist; // src/wordlist/ - wordlist loading and candidate generation

#[cfg(test)]
mod testing;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use tracing::{debug, info, warn};

use cli::Cli;
use config::FuzzConfig;
use fuzz::{FuzzRun, ShutdownSignal};
use report::console;

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // Startup errors (bad URL, missing wordlist, ...) end up here
            eprintln!("{}", format!("[!] Error: {:#}", e).red());
            1
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();

    logging::init_logging(cli.verbose);
    if cli.no_color {
        console::disable_colors();
    }

    let config = FuzzConfig::from_cli(&cli)?;
    debug!(?config, "configuration loaded");

    let shutdown = ShutdownSignal::new();
    listen_for_interrupt(shutdown.clone());

    let fuzz = FuzzRun::new(config, shutdown);
    let summary = fuzz.execute().await?;
    fuzz.save_report(&summary);

    Ok(0)
}

// First Ctrl-C: stop handing out candidates and let in-flight requests
// finish, so partial results still get summarized and saved.
// Second Ctrl-C: leave immediately.
fn listen_for_interrupt(shutdown: ShutdownSignal) {
    tokio::spawn(async move {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "cannot listen for Ctrl-C");
            return;
        }
        info!("interrupt received, waiting for in-flight requests");
        shutdown.trigger();

        if tokio::signal::ctrl_c().await.is_ok() {
            console::print_interrupted();
            std::process::exit(0);
        }
    });
}

// src/logging.rs
// =============================================================================
// Diagnostic logging with `tracing`.
//
// Logs go to stderr so they never mix with the findings on stdout.
// RUST_LOG wins when set; otherwise only warnings are shown, or our own
// debug events too with --verbose.
// =============================================================================

use tracing_subscriber::EnvFilter;

pub fn init_logging(verbose: bool) {
    let default_filter = if verbose { "warn,dirfuzz=debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

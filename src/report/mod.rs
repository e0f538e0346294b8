// src/report/mod.rs
// =============================================================================
// Output of a scan: the live terminal view and the optional report file.
//
// Submodules:
// - console: Banner, per-finding lines and the final summary
// - file: Plain text / JSON report writer
// =============================================================================

pub mod console;
mod file;

pub use file::{write_report, ReportHeader};

// src/wordlist/mod.rs
// =============================================================================
// This module produces the candidate paths we are going to probe.
//
// Submodules:
// - load: Reads the wordlist file into trimmed, non-empty words
// - generate: Combines words with extensions into the ordered candidate list
//
// Rust concepts:
// - pub use: Re-export items so callers write `wordlist::load_wordlist()`
// =============================================================================

mod generate;
mod load;

pub use generate::{generate_candidates, parse_extensions, Candidate};
pub use load::load_wordlist;

#[cfg(test)]
pub use load::WordlistError;

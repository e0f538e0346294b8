// src/wordlist/load.rs
// =============================================================================
// Reads a wordlist file from disk.
//
// - One word per line, surrounding whitespace trimmed
// - Blank lines are skipped
// - Invalid UTF-8 is replaced rather than rejected (wordlists in the wild are
//   messy and a single odd byte shouldn't abort the scan)
//
// A missing or unreadable file is fatal: the run stops before any worker
// starts.
// =============================================================================

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WordlistError {
    #[error("wordlist file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("could not read wordlist {}: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub async fn load_wordlist(path: &Path) -> Result<Vec<String>, WordlistError> {
    let bytes = tokio::fs::read(path).await.map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            WordlistError::NotFound(path.to_path_buf())
        } else {
            WordlistError::Unreadable {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    Ok(parse_words(&String::from_utf8_lossy(&bytes)))
}

fn parse_words(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

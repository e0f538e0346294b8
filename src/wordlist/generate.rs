// src/wordlist/generate.rs
// =============================================================================
// Builds the full candidate set from words and extensions.
//
// For every word we emit the bare word first, then `word.ext` for each
// extension in the order given. Nothing is deduplicated or filtered: the
// caller hands us trimmed, non-empty words and duplicates are probed twice.
// =============================================================================

/// One path to probe against the target, e.g. "admin" or "admin.php".
pub type Candidate = String;

/// Expands `words` with `extensions`, preserving order.
///
/// ```text
/// words = ["a", "b"], extensions = ["php", "txt"]
///   -> ["a", "a.php", "a.txt", "b", "b.php", "b.txt"]
/// ```
pub fn generate_candidates(words: &[String], extensions: &[String]) -> Vec<Candidate> {
    let mut candidates = Vec::with_capacity(words.len() * (extensions.len() + 1));

    for word in words {
        candidates.push(word.clone());
        for ext in extensions {
            candidates.push(format!("{}.{}", word, ext));
        }
    }

    candidates
}

// Splits the `-e php,html,txt` argument.
// Entries are trimmed, a single leading dot is dropped (".php" == "php"),
// and empty entries are skipped.
pub fn parse_extensions(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .map(|ext| ext.strip_prefix('.').unwrap_or(ext))
        .filter(|ext| !ext.is_empty())
        .map(str::to_string)
        .collect()
}

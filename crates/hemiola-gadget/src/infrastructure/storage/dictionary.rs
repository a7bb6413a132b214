//! Word list loading for anagram lookup.
//!
//! Accepts plain lists (`/usr/share/dict/words`, one word per line) and
//! Hunspell `.dic` files, whose first line is a word count and whose entries
//! may carry `/FLAGS` suffixes.

use std::path::{Path, PathBuf};

use hemiola_core::Anagrammer;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum DictionaryError {
    #[error("failed to read word list {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Reads the word list at `path` into an anagram index.
///
/// # Errors
///
/// Returns [`DictionaryError::Io`] if the file cannot be read.
pub fn load_word_list(path: &Path) -> Result<Anagrammer, DictionaryError> {
    let bytes = std::fs::read(path).map_err(|source| DictionaryError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    // System word lists are not always UTF-8 clean.
    let index = parse_word_list(&String::from_utf8_lossy(&bytes));
    info!("loaded {} words from {}", index.len(), path.display());
    Ok(index)
}

/// Builds an anagram index from word list text.
pub fn parse_word_list(content: &str) -> Anagrammer {
    content
        .lines()
        .map(|line| line.split('/').next().unwrap_or_default().trim())
        .filter(|word| !word.is_empty() && !word.chars().all(|c| c.is_ascii_digit()))
        .collect()
}

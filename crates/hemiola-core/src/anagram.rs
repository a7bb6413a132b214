//! Anagram index over a word list.
//!
//! Words are filed under their letters lowercased and sorted, so every
//! rearrangement of the same letters finds the same bucket:
//!
//! ```
//! use hemiola_core::Anagrammer;
//!
//! let index: Anagrammer = ["listen", "silent", "enlist", "tinsel"].into_iter().collect();
//! assert_eq!(index.lookup("Tensil").len(), 4);
//! ```

use std::collections::HashMap;

use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct Anagrammer {
    anagrams: HashMap<String, Vec<String>>,
}

/// Lowercased, sorted letters of `word`.
fn letters_key(word: &str) -> String {
    let mut letters: Vec<char> = word.chars().flat_map(char::to_lowercase).collect();
    letters.sort_unstable();
    letters.into_iter().collect()
}

impl Anagrammer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `word` to the index. Empty words and exact duplicates are ignored.
    pub fn insert(&mut self, word: impl Into<String>) {
        let word = word.into();
        if word.is_empty() {
            return;
        }
        let bucket = self.anagrams.entry(letters_key(&word)).or_default();
        if !bucket.contains(&word) {
            bucket.push(word);
        }
    }

    /// Words made of exactly the letters of `letters`, in insertion order.
    pub fn lookup(&self, letters: &str) -> &[String] {
        if letters.is_empty() {
            return &[];
        }
        let key = letters_key(letters);
        match self.anagrams.get(&key) {
            Some(words) => {
                debug!("anagrams of {key}: {}", words.join(", "));
                words
            }
            None => &[],
        }
    }

    /// Number of distinct words indexed.
    pub fn len(&self) -> usize {
        self.anagrams.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.anagrams.is_empty()
    }
}

impl<S: Into<String>> Extend<S> for Anagrammer {
    fn extend<I: IntoIterator<Item = S>>(&mut self, words: I) {
        for word in words {
            self.insert(word);
        }
    }
}

impl<S: Into<String>> FromIterator<S> for Anagrammer {
    fn from_iter<I: IntoIterator<Item = S>>(words: I) -> Self {
        let mut index = Self::new();
        index.extend(words);
        index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_finds_every_rearrangement() {
        // Arrange
        let index: Anagrammer = ["stop", "pots", "tops", "spot", "post"].into_iter().collect();

        // Act
        let found = index.lookup("opts");

        // Assert
        assert_eq!(found, ["stop", "pots", "tops", "spot", "post"]);
    }

    #[test]
    fn test_lookup_ignores_case_but_keeps_original_spelling() {
        let index: Anagrammer = ["Hemiola"].into_iter().collect();
        assert_eq!(index.lookup("aeHILMO"), ["Hemiola"]);
        assert_eq!(index.lookup("hemiola"), ["Hemiola"]);
    }

    #[test]
    fn test_lookup_requires_exact_letter_counts() {
        let index: Anagrammer = ["loop"].into_iter().collect();
        assert!(index.lookup("lop").is_empty());
        assert!(index.lookup("looop").is_empty());
    }

    #[test]
    fn test_empty_input_finds_nothing() {
        let mut index = Anagrammer::new();
        index.insert("");
        assert!(index.is_empty());
        assert!(index.lookup("").is_empty());
    }

    #[test]
    fn test_duplicate_words_are_indexed_once() {
        let index: Anagrammer = ["act", "cat", "act"].into_iter().collect();
        assert_eq!(index.len(), 2);
        assert_eq!(index.lookup("tac"), ["act", "cat"]);
    }
}

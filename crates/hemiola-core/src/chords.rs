//! Chord → word table.
//!
//! A chord is a set of keys pressed together that stands for a whole word.
//! Chords are written as text: the letter keys first, then optional
//! `+`-separated special keys that mark a variant of the same word.
//!
//! ```text
//! "th"      -> { T, H }
//! "th+;"    -> { T, H, ; }        plural variant
//! "th+,"    -> { T, H, , }        past-tense variant
//! "g o"     -> { G, O }           whitespace is ignored
//! ```
//!
//! Only the three configured specials (dup, plural and past) may follow a
//! `+`. Key order inside a chord does not matter: `"ht"` and `"th"` are the
//! same chord.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::keymap::{HidKeyCode, KeymapError, US_ASCII};

/// Separator between the letter keys and each special key.
pub const SEPARATOR: char = '+';

/// Error type for chord parsing and table building.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ChordError {
    #[error("chord has no letter keys")]
    Empty,

    #[error(transparent)]
    Keymap(#[from] KeymapError),

    /// Text after a `+` that is not one of the configured special keys.
    #[error("unknown special {0:?} in chord")]
    UnknownSpecial(String),

    /// The chord for `word` is already bound to `existing`.
    #[error("chord for {word:?} clashes with the chord for {existing:?}")]
    Clash { word: String, existing: String },
}

/// Characters of the special keys that may follow a `+`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChordSpecials {
    pub dup: char,
    pub plural: char,
    pub past: char,
}

impl Default for ChordSpecials {
    fn default() -> Self {
        Self {
            dup: '=',
            plural: ';',
            past: ',',
        }
    }
}

impl ChordSpecials {
    fn contains(&self, c: char) -> bool {
        c == self.dup || c == self.plural || c == self.past
    }
}

/// The set of keys making up one chord.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Chord(BTreeSet<HidKeyCode>);

impl Chord {
    pub fn keys(&self) -> impl Iterator<Item = HidKeyCode> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Lookup table from chords to the words they type.
#[derive(Debug, Clone, Default)]
pub struct ChordTable {
    specials: ChordSpecials,
    words: HashMap<Chord, String>,
}

impl ChordTable {
    pub fn new(specials: ChordSpecials) -> Self {
        Self {
            specials,
            words: HashMap::new(),
        }
    }

    /// Builds a table from `(word, chord)` pairs.
    ///
    /// Entries whose chord does not parse, or whose chord is already taken by
    /// an earlier entry, are logged with `warn!` and left out. The first
    /// binding of a chord wins.
    pub fn from_entries<I, W, C>(specials: ChordSpecials, entries: I) -> Self
    where
        I: IntoIterator<Item = (W, C)>,
        W: Into<String>,
        C: AsRef<str>,
    {
        let mut table = Self::new(specials);
        for (word, chord) in entries {
            let word = word.into();
            if let Err(e) = table.insert(word.clone(), chord.as_ref()) {
                warn!("ignoring chord {:?} for {word:?}: {e}", chord.as_ref());
            }
        }
        debug!("chord table holds {} words", table.len());
        table
    }

    pub fn specials(&self) -> ChordSpecials {
        self.specials
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Binds `chord` to `word`.
    ///
    /// # Errors
    ///
    /// Returns the parse error for a malformed chord, or
    /// [`ChordError::Clash`] if the chord is already bound.
    pub fn insert(&mut self, word: impl Into<String>, chord: &str) -> Result<(), ChordError> {
        let word = word.into();
        let chord = self.parse_chord(chord)?;
        if let Some(existing) = self.words.get(&chord) {
            return Err(ChordError::Clash {
                word,
                existing: existing.clone(),
            });
        }
        self.words.insert(chord, word);
        Ok(())
    }

    /// Parses chord text into its key set.
    ///
    /// Whitespace is removed first. Every character before the first `+` is a
    /// letter key, looked up in the US-ASCII table with the Shift layer
    /// ignored. Each `+`-separated segment after it must be exactly one of the
    /// special characters.
    ///
    /// # Errors
    ///
    /// - [`ChordError::Empty`] when there are no letter keys.
    /// - [`ChordError::Keymap`] for a letter the key table cannot type.
    /// - [`ChordError::UnknownSpecial`] for any other segment after a `+`.
    pub fn parse_chord(&self, chord: &str) -> Result<Chord, ChordError> {
        let compact: String = chord.chars().filter(|c| !c.is_whitespace()).collect();
        let mut segments = compact.split(SEPARATOR);
        let letters = segments.next().unwrap_or_default();
        if letters.is_empty() {
            return Err(ChordError::Empty);
        }

        let mut keys = BTreeSet::new();
        for c in letters.chars() {
            keys.insert(key_for(c)?);
        }

        for special in segments {
            let mut chars = special.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if self.specials.contains(c) => {
                    keys.insert(key_for(c)?);
                }
                _ => return Err(ChordError::UnknownSpecial(special.to_string())),
            }
        }

        Ok(Chord(keys))
    }

    /// Looks up the word bound to `chord`.
    ///
    /// # Errors
    ///
    /// Returns the parse error if `chord` is malformed.
    pub fn word(&self, chord: &str) -> Result<Option<&str>, ChordError> {
        let chord = self.parse_chord(chord)?;
        Ok(self.words.get(&chord).map(String::as_str))
    }

    /// Returns the word bound to `chord`, or `chord` itself when it is not
    /// bound or does not parse.
    pub fn get_word<'a>(&'a self, chord: &'a str) -> &'a str {
        match self.word(chord) {
            Ok(Some(word)) => word,
            Ok(None) => chord,
            Err(e) => {
                debug!("typing {chord:?} literally: {e}");
                chord
            }
        }
    }
}

fn key_for(c: char) -> Result<HidKeyCode, KeymapError> {
    US_ASCII
        .lookup(c)
        .map(|(_, key)| key)
        .ok_or(KeymapError::UnsupportedCharacter(c))
}

//! # hemiola-core
//!
//! Encoding of USB HID boot-protocol keyboard reports, the payload a Linux
//! HID gadget (`/dev/hidgN`) expects for each keyboard state change.
//!
//! This crate is pure: it performs no I/O and keeps no mutable state, so every
//! function may be called from any thread. Writing reports to a device is the
//! job of the caller (see the `hemiola-gadget` crate).
//!
//! - **`report`** – [`KeyEvent`], [`Modifiers`], and the 8-byte [`KeyReport`].
//! - **`keymap`** – HID Usage IDs and the US-ASCII character table.
//! - **`typing`** – [`encode_string`], the lazy report stream for a piece of text.
//! - **`chords`** – [`ChordTable`], words typed from a single chord of keys.
//! - **`anagram`** – [`Anagrammer`], a word index keyed by sorted letters.
//!
//! ```
//! use hemiola_core::{encode_string, KeyReport};
//!
//! let reports: Vec<KeyReport> = encode_string("Hi")
//!     .collect::<Result<_, _>>()
//!     .unwrap();
//! assert_eq!(reports.len(), 4);
//! assert_eq!(reports[0].as_bytes(), &[0x20, 0, 0x0B, 0, 0, 0, 0, 0]);
//! assert!(reports[1].is_release());
//! ```

pub mod anagram;
pub mod chords;
pub mod keymap;
pub mod report;
pub mod typing;

pub use anagram::Anagrammer;
pub use chords::{Chord, ChordError, ChordSpecials, ChordTable};
pub use keymap::{char_to_event, event_to_char, CharacterKeyMap, HidKeyCode, KeymapError};
pub use report::{encode, release_event, KeyEvent, KeyReport, Modifiers, ReportError};
pub use typing::{encode_string, encode_string_with, TypeReports};

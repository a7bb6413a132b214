//! Key code tables.
//!
//! - **`hid`** – USB HID Usage IDs (page 0x07), the values a report carries.
//! - **`ascii`** – the US-QWERTY character table used to type text.

pub mod ascii;
pub mod hid;

use thiserror::Error;

pub use ascii::{char_to_event, event_to_char, CharacterKeyMap, US_ASCII};
pub use hid::HidKeyCode;

/// Error type for character translation.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum KeymapError {
    /// The character has no entry in the key table.
    #[error("unsupported character {0:?}")]
    UnsupportedCharacter(char),
}

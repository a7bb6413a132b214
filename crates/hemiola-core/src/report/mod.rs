//! USB HID boot-protocol keyboard reports.
//!
//! - **`modifiers`** – the 8-bit modifier mask carried in byte 0.
//! - **`event`** – [`KeyEvent`], the logical keyboard state a report describes.
//! - **`encoder`** – [`encode`] and [`KeyReport`], the 8-byte wire form.

pub mod encoder;
pub mod event;
pub mod modifiers;

use thiserror::Error;

use crate::keymap::hid::HidKeyCode;

pub use encoder::{encode, KeyReport, REPORT_LEN};
pub use event::{release_event, KeyEvent, KEY_SLOTS};
pub use modifiers::Modifiers;

/// Errors raised while building or decoding keyboard reports.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReportError {
    /// All six key slots are already occupied.
    #[error("cannot press {0:?}: all 6 key slots are in use")]
    RollOver(HidKeyCode),

    /// Raw report was not exactly 8 bytes.
    #[error("keyboard report must be 8 bytes, got {0}")]
    InvalidLength(usize),

    /// Byte 1 of a raw report was not zero.
    #[error("reserved report byte must be 0x00, got 0x{0:02X}")]
    ReservedByteSet(u8),
}

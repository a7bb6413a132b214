//! Modifier byte of the boot keyboard report.

use std::ops::{BitOr, BitOrAssign};

use serde::{Deserialize, Serialize};

use crate::keymap::hid::HidKeyCode;

/// Bitmask of held modifier keys, in report byte 0 order.
///
/// | Bit | Key         |
/// |-----|-------------|
/// | 0   | Left Ctrl   |
/// | 1   | Left Shift  |
/// | 2   | Left Alt    |
/// | 3   | Left GUI    |
/// | 4   | Right Ctrl  |
/// | 5   | Right Shift |
/// | 6   | Right Alt   |
/// | 7   | Right GUI   |
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Modifiers(pub u8);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const LEFT_CTRL: Modifiers = Modifiers(1 << 0);
    pub const LEFT_SHIFT: Modifiers = Modifiers(1 << 1);
    pub const LEFT_ALT: Modifiers = Modifiers(1 << 2);
    pub const LEFT_GUI: Modifiers = Modifiers(1 << 3);
    pub const RIGHT_CTRL: Modifiers = Modifiers(1 << 4);
    pub const RIGHT_SHIFT: Modifiers = Modifiers(1 << 5);
    pub const RIGHT_ALT: Modifiers = Modifiers(1 << 6);
    pub const RIGHT_GUI: Modifiers = Modifiers(1 << 7);

    /// Raw byte as it appears on the wire.
    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if every bit of `other` is set in `self`.
    pub fn contains(self, other: Modifiers) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn insert(&mut self, other: Modifiers) {
        self.0 |= other.0;
    }

    pub fn remove(&mut self, other: Modifiers) {
        self.0 &= !other.0;
    }

    /// Returns `true` if either Ctrl modifier is active.
    pub fn ctrl(self) -> bool {
        self.0 & (Self::LEFT_CTRL.0 | Self::RIGHT_CTRL.0) != 0
    }

    /// Returns `true` if either Shift modifier is active.
    pub fn shift(self) -> bool {
        self.0 & (Self::LEFT_SHIFT.0 | Self::RIGHT_SHIFT.0) != 0
    }

    /// Returns `true` if either Alt modifier is active.
    pub fn alt(self) -> bool {
        self.0 & (Self::LEFT_ALT.0 | Self::RIGHT_ALT.0) != 0
    }

    /// Returns `true` if either GUI (Win/Cmd/Super) modifier is active.
    pub fn gui(self) -> bool {
        self.0 & (Self::LEFT_GUI.0 | Self::RIGHT_GUI.0) != 0
    }

    /// The single-bit mask for a modifier key, or `None` for ordinary keys.
    pub fn from_key(key: HidKeyCode) -> Option<Modifiers> {
        key.modifier_bit().map(Modifiers)
    }
}

impl BitOr for Modifiers {
    type Output = Modifiers;

    fn bitor(self, rhs: Modifiers) -> Modifiers {
        Modifiers(self.0 | rhs.0)
    }
}

impl BitOrAssign for Modifiers {
    fn bitor_assign(&mut self, rhs: Modifiers) {
        self.0 |= rhs.0;
    }
}

impl From<u8> for Modifiers {
    fn from(bits: u8) -> Self {
        Modifiers(bits)
    }
}

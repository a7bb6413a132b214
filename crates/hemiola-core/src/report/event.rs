//! Logical keyboard state for one report.

use serde::{Deserialize, Serialize};

use crate::keymap::hid::HidKeyCode;

use super::{modifiers::Modifiers, ReportError};

/// Number of simultaneous non-modifier keys a boot keyboard report carries.
pub const KEY_SLOTS: usize = 6;

/// One instant of keyboard state: held modifiers plus up to six keys.
///
/// `keycodes` always has exactly [`KEY_SLOTS`] entries; unused slots hold
/// `0x00`. Slot order is positional assignment, not priority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyEvent {
    pub modifiers: Modifiers,
    pub keycodes: [u8; KEY_SLOTS],
}

impl KeyEvent {
    /// Builds an event from raw parts.
    pub fn new(modifiers: Modifiers, keycodes: [u8; KEY_SLOTS]) -> Self {
        Self { modifiers, keycodes }
    }

    /// A single key in slot 0 with the given modifiers.
    pub fn single(modifiers: Modifiers, key: HidKeyCode) -> Self {
        let mut keycodes = [0u8; KEY_SLOTS];
        keycodes[0] = key.as_u8();
        Self { modifiers, keycodes }
    }

    /// Marks `key` as held.
    ///
    /// Modifier keys set their bit in `modifiers` and never consume a slot.
    /// Other keys go into the first empty slot; pressing a key that is
    /// already held is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::RollOver`] when all six slots are occupied by
    /// other keys. The event is left unchanged.
    pub fn press(&mut self, key: HidKeyCode) -> Result<(), ReportError> {
        if let Some(bit) = Modifiers::from_key(key) {
            self.modifiers.insert(bit);
            return Ok(());
        }

        let code = key.as_u8();
        if code == 0 || self.keycodes.contains(&code) {
            return Ok(());
        }

        match self.keycodes.iter_mut().find(|slot| **slot == 0) {
            Some(slot) => {
                *slot = code;
                Ok(())
            }
            None => Err(ReportError::RollOver(key)),
        }
    }

    /// Marks `key` as no longer held. Releasing a key that is not held is a no-op.
    pub fn release(&mut self, key: HidKeyCode) {
        if let Some(bit) = Modifiers::from_key(key) {
            self.modifiers.remove(bit);
            return;
        }

        let code = key.as_u8();
        if code == 0 {
            return;
        }
        if let Some(slot) = self.keycodes.iter_mut().find(|slot| **slot == code) {
            *slot = 0;
        }
    }

    /// `true` for the all-keys-up state.
    pub fn is_release(&self) -> bool {
        self.modifiers.is_empty() && self.keycodes.iter().all(|&k| k == 0)
    }

    /// Non-empty slots, in slot order.
    pub fn pressed_keys(&self) -> impl Iterator<Item = u8> + '_ {
        self.keycodes.iter().copied().filter(|&k| k != 0)
    }
}

/// The all-zero event: no modifiers, every slot empty.
///
/// Must be sent between two key-down reports whenever the host would
/// otherwise see an unchanged report (e.g. the same character twice).
pub fn release_event() -> KeyEvent {
    KeyEvent::default()
}

//! Wire encoding of the 8-byte boot keyboard report.
//!
//! ```text
//! Byte 0:    Modifier bitmask (bit0 = Left Ctrl … bit7 = Right GUI)
//! Byte 1:    Reserved, always 0x00
//! Byte 2..7: Six keycode slots, 0x00 = empty
//! ```
//!
//! Encoding is a pure function of the [`KeyEvent`]; it cannot fail and holds
//! no state, so any number of threads may call [`encode`] concurrently.

use super::{event::KeyEvent, modifiers::Modifiers, ReportError};

/// Size of a boot keyboard report in bytes.
pub const REPORT_LEN: usize = 8;

const MODIFIER_BYTE: usize = 0;
const RESERVED_BYTE: usize = 1;
const KEYS_START: usize = 2;

/// An encoded boot keyboard report, ready to be written to a gadget device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyReport([u8; REPORT_LEN]);

impl KeyReport {
    /// The all-keys-up report (eight zero bytes).
    pub const RELEASE: KeyReport = KeyReport([0; REPORT_LEN]);

    pub fn as_bytes(&self) -> &[u8; REPORT_LEN] {
        &self.0
    }

    pub fn into_bytes(self) -> [u8; REPORT_LEN] {
        self.0
    }

    pub fn is_release(&self) -> bool {
        *self == Self::RELEASE
    }

    /// Decodes raw report bytes back into a [`KeyEvent`].
    ///
    /// # Errors
    ///
    /// - [`ReportError::InvalidLength`] if `bytes` is not exactly 8 bytes long.
    /// - [`ReportError::ReservedByteSet`] if byte 1 is not zero.
    pub fn parse(bytes: &[u8]) -> Result<KeyEvent, ReportError> {
        if bytes.len() != REPORT_LEN {
            return Err(ReportError::InvalidLength(bytes.len()));
        }
        if bytes[RESERVED_BYTE] != 0 {
            return Err(ReportError::ReservedByteSet(bytes[RESERVED_BYTE]));
        }

        let mut keycodes = [0u8; 6];
        keycodes.copy_from_slice(&bytes[KEYS_START..]);
        Ok(KeyEvent::new(Modifiers(bytes[MODIFIER_BYTE]), keycodes))
    }
}

impl AsRef<[u8]> for KeyReport {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<KeyEvent> for KeyReport {
    fn from(event: KeyEvent) -> Self {
        encode(&event)
    }
}

/// Encodes `event` into its 8-byte wire form.
pub fn encode(event: &KeyEvent) -> KeyReport {
    let mut bytes = [0u8; REPORT_LEN];
    bytes[MODIFIER_BYTE] = event.modifiers.bits();
    bytes[KEYS_START..].copy_from_slice(&event.keycodes);
    KeyReport(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{keymap::hid::HidKeyCode, report::event::release_event};

    #[test]
    fn test_encode_release_is_eight_zero_bytes() {
        let report = encode(&release_event());
        assert_eq!(report.as_bytes(), &[0u8; 8]);
        assert!(report.is_release());
        assert_eq!(report, KeyReport::RELEASE);
    }

    #[test]
    fn test_encode_shift_h_matches_demo_bytes() {
        // Arrange
        let event = KeyEvent::single(Modifiers::RIGHT_SHIFT, HidKeyCode::KeyH);

        // Act
        let report = encode(&event);

        // Assert
        assert_eq!(report.as_bytes(), &[0x20, 0x00, 0x0B, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_encode_keeps_slot_order_and_reserved_zero() {
        let event = KeyEvent::new(
            Modifiers(0xFF),
            [0x04, 0x00, 0x28, 0x2C, 0x00, 0xE7],
        );

        let bytes = encode(&event).into_bytes();

        assert_eq!(bytes.len(), REPORT_LEN);
        assert_eq!(bytes[0], 0xFF);
        assert_eq!(bytes[1], 0x00, "reserved byte must always be zero");
        assert_eq!(&bytes[2..], &[0x04, 0x00, 0x28, 0x2C, 0x00, 0xE7]);
    }

    #[test]
    fn test_from_key_event_matches_encode() {
        let event = KeyEvent::single(Modifiers::LEFT_CTRL, HidKeyCode::KeyC);
        assert_eq!(KeyReport::from(event), encode(&event));
    }

    #[test]
    fn test_parse_recovers_encoded_event() {
        let event = KeyEvent::new(Modifiers::LEFT_ALT, [0x1E, 0x1F, 0, 0, 0, 0]);
        let parsed = KeyReport::parse(encode(&event).as_ref()).unwrap();
        assert_eq!(parsed, event);
    }

    #[test]
    fn test_parse_rejects_wrong_length() {
        assert!(matches!(
            KeyReport::parse(&[0u8; 7]),
            Err(ReportError::InvalidLength(7))
        ));
        assert!(matches!(
            KeyReport::parse(&[0u8; 9]),
            Err(ReportError::InvalidLength(9))
        ));
    }

    #[test]
    fn test_parse_rejects_reserved_byte() {
        let bytes = [0x00, 0x01, 0x04, 0, 0, 0, 0, 0];
        assert!(matches!(
            KeyReport::parse(&bytes),
            Err(ReportError::ReservedByteSet(0x01))
        ));
    }
}

//! US-QWERTY table from ASCII characters to (modifiers, key) pairs.
//!
//! The table is compiled in and never mutated, so it can be read from any
//! number of threads without synchronisation.
//!
//! Covered characters:
//!
//! - `a`–`z`, and `A`–`Z` with Shift
//! - `0`–`9`, and their shifted symbols `!@#$%^&*()`
//! - US punctuation on both layers: `` -=[]\;',./` `` and `_+{}|:"<>?~`
//! - space, tab, backspace (`\x08`), and RETURN for both `\n` and `\r`
//!
//! Everything else is reported as [`KeymapError::UnsupportedCharacter`].

use crate::{
    keymap::{hid::HidKeyCode, KeymapError},
    report::{KeyEvent, Modifiers},
};

/// Read-only character → key table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharacterKeyMap {
    /// Modifier bit sent for characters on the shifted layer.
    shift: Modifiers,
}

/// The process-wide US-ASCII table.
///
/// Shifted characters use Right Shift (0x20), matching the bytes the reference
/// gadget demo sent for its capital `H`.
pub static US_ASCII: CharacterKeyMap = CharacterKeyMap {
    shift: Modifiers::RIGHT_SHIFT,
};

impl CharacterKeyMap {
    /// A US table that sends `shift` for characters on the shifted layer.
    pub const fn with_shift(shift: Modifiers) -> Self {
        Self { shift }
    }

    /// Looks up the key and modifiers that produce `c`.
    pub fn lookup(&self, c: char) -> Option<(Modifiers, HidKeyCode)> {
        let (shifted, key) = us_key_for_char(c)?;
        let modifiers = if shifted { self.shift } else { Modifiers::NONE };
        Some((modifiers, key))
    }

    /// Translates `c` into a single-key event.
    ///
    /// # Errors
    ///
    /// Returns [`KeymapError::UnsupportedCharacter`] when `c` is not in the table.
    pub fn char_to_event(&self, c: char) -> Result<KeyEvent, KeymapError> {
        let (modifiers, key) = self
            .lookup(c)
            .ok_or(KeymapError::UnsupportedCharacter(c))?;
        Ok(KeyEvent::single(modifiers, key))
    }

    /// Recovers the character a single-key event types.
    ///
    /// Only events with exactly one key and no modifier other than Shift
    /// (either side) are reversible; everything else yields `None`.
    pub fn event_to_char(&self, event: &KeyEvent) -> Option<char> {
        let shift_mask = Modifiers::LEFT_SHIFT | Modifiers::RIGHT_SHIFT;
        if !shift_mask.contains(event.modifiers) {
            return None;
        }

        let mut keys = event.pressed_keys();
        let key = HidKeyCode::from_u8(keys.next()?);
        if keys.next().is_some() {
            return None;
        }
        us_char_for_key(key, event.modifiers.shift())
    }
}

/// Translates `c` into a single-key event using [`US_ASCII`].
///
/// # Errors
///
/// Returns [`KeymapError::UnsupportedCharacter`] when `c` is not in the table.
pub fn char_to_event(c: char) -> Result<KeyEvent, KeymapError> {
    US_ASCII.char_to_event(c)
}

/// Reverse of [`char_to_event`] using [`US_ASCII`].
pub fn event_to_char(event: &KeyEvent) -> Option<char> {
    US_ASCII.event_to_char(event)
}

/// `(needs_shift, key)` for a character on a US keyboard.
fn us_key_for_char(c: char) -> Option<(bool, HidKeyCode)> {
    if c.is_ascii_lowercase() {
        return Some((false, letter_key(c as u8 - b'a')));
    }
    if c.is_ascii_uppercase() {
        return Some((true, letter_key(c as u8 - b'A')));
    }

    let entry = match c {
        '1' => (false, HidKeyCode::Digit1),
        '2' => (false, HidKeyCode::Digit2),
        '3' => (false, HidKeyCode::Digit3),
        '4' => (false, HidKeyCode::Digit4),
        '5' => (false, HidKeyCode::Digit5),
        '6' => (false, HidKeyCode::Digit6),
        '7' => (false, HidKeyCode::Digit7),
        '8' => (false, HidKeyCode::Digit8),
        '9' => (false, HidKeyCode::Digit9),
        '0' => (false, HidKeyCode::Digit0),
        '!' => (true, HidKeyCode::Digit1),
        '@' => (true, HidKeyCode::Digit2),
        '#' => (true, HidKeyCode::Digit3),
        '$' => (true, HidKeyCode::Digit4),
        '%' => (true, HidKeyCode::Digit5),
        '^' => (true, HidKeyCode::Digit6),
        '&' => (true, HidKeyCode::Digit7),
        '*' => (true, HidKeyCode::Digit8),
        '(' => (true, HidKeyCode::Digit9),
        ')' => (true, HidKeyCode::Digit0),
        '\n' | '\r' => (false, HidKeyCode::Enter),
        '\x08' => (false, HidKeyCode::Backspace),
        '\t' => (false, HidKeyCode::Tab),
        ' ' => (false, HidKeyCode::Space),
        '-' => (false, HidKeyCode::Minus),
        '_' => (true, HidKeyCode::Minus),
        '=' => (false, HidKeyCode::Equal),
        '+' => (true, HidKeyCode::Equal),
        '[' => (false, HidKeyCode::BracketLeft),
        '{' => (true, HidKeyCode::BracketLeft),
        ']' => (false, HidKeyCode::BracketRight),
        '}' => (true, HidKeyCode::BracketRight),
        '\\' => (false, HidKeyCode::Backslash),
        '|' => (true, HidKeyCode::Backslash),
        ';' => (false, HidKeyCode::Semicolon),
        ':' => (true, HidKeyCode::Semicolon),
        '\'' => (false, HidKeyCode::Quote),
        '"' => (true, HidKeyCode::Quote),
        '`' => (false, HidKeyCode::Backquote),
        '~' => (true, HidKeyCode::Backquote),
        ',' => (false, HidKeyCode::Comma),
        '<' => (true, HidKeyCode::Comma),
        '.' => (false, HidKeyCode::Period),
        '>' => (true, HidKeyCode::Period),
        '/' => (false, HidKeyCode::Slash),
        '?' => (true, HidKeyCode::Slash),
        _ => return None,
    };
    Some(entry)
}

fn us_char_for_key(key: HidKeyCode, shifted: bool) -> Option<char> {
    let code = key.as_u8();
    if (HidKeyCode::KeyA.as_u8()..=HidKeyCode::KeyZ.as_u8()).contains(&code) {
        let base = if shifted { b'A' } else { b'a' };
        return Some((base + (code - HidKeyCode::KeyA.as_u8())) as char);
    }

    let (plain, upper) = match key {
        HidKeyCode::Digit1 => ('1', '!'),
        HidKeyCode::Digit2 => ('2', '@'),
        HidKeyCode::Digit3 => ('3', '#'),
        HidKeyCode::Digit4 => ('4', '$'),
        HidKeyCode::Digit5 => ('5', '%'),
        HidKeyCode::Digit6 => ('6', '^'),
        HidKeyCode::Digit7 => ('7', '&'),
        HidKeyCode::Digit8 => ('8', '*'),
        HidKeyCode::Digit9 => ('9', '('),
        HidKeyCode::Digit0 => ('0', ')'),
        HidKeyCode::Minus => ('-', '_'),
        HidKeyCode::Equal => ('=', '+'),
        HidKeyCode::BracketLeft => ('[', '{'),
        HidKeyCode::BracketRight => (']', '}'),
        HidKeyCode::Backslash => ('\\', '|'),
        HidKeyCode::Semicolon => (';', ':'),
        HidKeyCode::Quote => ('\'', '"'),
        HidKeyCode::Backquote => ('`', '~'),
        HidKeyCode::Comma => (',', '<'),
        HidKeyCode::Period => ('.', '>'),
        HidKeyCode::Slash => ('/', '?'),
        // Layer-independent keys only reverse without Shift.
        HidKeyCode::Enter if !shifted => return Some('\n'),
        HidKeyCode::Tab if !shifted => return Some('\t'),
        HidKeyCode::Space if !shifted => return Some(' '),
        HidKeyCode::Backspace if !shifted => return Some('\x08'),
        _ => return None,
    };
    Some(if shifted { upper } else { plain })
}

fn letter_key(offset: u8) -> HidKeyCode {
    HidKeyCode::from_u8(HidKeyCode::KeyA.as_u8() + offset)
}

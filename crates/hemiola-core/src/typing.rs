//! Turning text into the report stream a host needs to "type" it.
//!
//! Every character becomes a key-down report followed by a release report.
//! The release is sent unconditionally: hosts only act on report *changes*,
//! so two identical key-down reports in a row (e.g. the `ll` in "hello")
//! would otherwise register as one key press.

use std::str::Chars;

use tracing::trace;

use crate::{
    keymap::{CharacterKeyMap, KeymapError, US_ASCII},
    report::{encode, KeyReport},
};

/// Lazy report stream for a string; see [`encode_string`].
///
/// Yields `Ok(report)` for each key-down and release. On the first character
/// missing from the key table it yields one `Err` and then stays exhausted.
/// Cloning the iterator (or calling [`encode_string`] again) restarts
/// production from that point.
#[derive(Debug, Clone)]
pub struct TypeReports<'a> {
    keymap: &'a CharacterKeyMap,
    chars: Chars<'a>,
    release_pending: bool,
    failed: bool,
}

impl<'a> TypeReports<'a> {
    /// Text not yet consumed.
    ///
    /// After an `Err` this is the text following the rejected character, which
    /// lets a caller skip it and continue with a fresh [`encode_string`].
    pub fn remaining(&self) -> &'a str {
        self.chars.as_str()
    }
}

impl Iterator for TypeReports<'_> {
    type Item = Result<KeyReport, KeymapError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        if self.release_pending {
            self.release_pending = false;
            return Some(Ok(KeyReport::RELEASE));
        }

        let c = self.chars.next()?;
        match self.keymap.char_to_event(c) {
            Ok(event) => {
                trace!(?c, ?event, "key down");
                self.release_pending = true;
                Some(Ok(encode(&event)))
            }
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.failed {
            return (0, Some(0));
        }
        let pending = usize::from(self.release_pending);
        // Chars can only bound its count between len/4 and len.
        let (_, upper) = self.chars.size_hint();
        (pending, upper.map(|n| pending + 2 * n))
    }
}

impl std::iter::FusedIterator for TypeReports<'_> {}

/// Encodes `s` with the [`US_ASCII`] table.
pub fn encode_string(s: &str) -> TypeReports<'_> {
    encode_string_with(&US_ASCII, s)
}

/// Encodes `s` with an explicit key table.
pub fn encode_string_with<'a>(keymap: &'a CharacterKeyMap, s: &'a str) -> TypeReports<'a> {
    TypeReports {
        keymap,
        chars: s.chars(),
        release_pending: false,
        failed: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::Modifiers;

    #[test]
    fn test_empty_string_yields_nothing() {
        let mut reports = encode_string("");
        assert!(reports.next().is_none());
        assert!(reports.next().is_none());
    }

    #[test]
    fn test_each_character_is_followed_by_release() {
        // Arrange / Act
        let reports: Vec<KeyReport> = encode_string("aa").map(Result::unwrap).collect();

        // Assert
        assert_eq!(reports.len(), 4);
        assert_eq!(reports[0].as_bytes(), &[0, 0, 0x04, 0, 0, 0, 0, 0]);
        assert!(reports[1].is_release());
        assert_eq!(reports[2], reports[0]);
        assert!(reports[3].is_release());
    }

    #[test]
    fn test_shifted_character_carries_modifier() {
        let first = encode_string("H").next().unwrap().unwrap();
        assert_eq!(first.as_bytes()[0], Modifiers::RIGHT_SHIFT.bits());
        assert_eq!(first.as_bytes()[2], 0x0B);
    }

    #[test]
    fn test_unsupported_character_stops_stream_after_prior_reports() {
        // Arrange
        let mut reports = encode_string("ab€cd");

        // Act
        let produced: Vec<_> = reports.by_ref().collect();

        // Assert: a, release, b, release, then the error and nothing more.
        assert_eq!(produced.len(), 5);
        assert!(produced[..4].iter().all(Result::is_ok));
        assert_eq!(produced[4], Err(KeymapError::UnsupportedCharacter('€')));
        assert_eq!(reports.remaining(), "cd");
        assert!(reports.next().is_none());
    }

    #[test]
    fn test_clone_restarts_from_the_same_point() {
        let mut reports = encode_string("xyz");
        reports.next();
        let snapshot = reports.clone();

        let rest: Vec<_> = reports.collect();
        let again: Vec<_> = snapshot.collect();

        assert_eq!(rest, again);
        assert_eq!(rest.len(), 5);
    }

    #[test]
    fn test_size_hint_upper_bound_covers_releases() {
        let reports = encode_string("abc");
        let (lower, upper) = reports.size_hint();
        assert_eq!(lower, 0);
        assert_eq!(upper, Some(6));
        assert_eq!(reports.count(), 6);
    }
}

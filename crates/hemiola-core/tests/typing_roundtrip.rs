//! Integration tests for the public encoding API.
//!
//! These exercise the key table, the encoder, the typing stream and the word
//! lookups together through the crate root re-exports.

use hemiola_core::{
    char_to_event, encode, encode_string, event_to_char, release_event, Anagrammer, ChordSpecials,
    ChordTable, KeyEvent, KeyReport, KeymapError, Modifiers,
};

/// Collects the key-down reports (every even index) of a successful stream.
fn key_downs(text: &str) -> Vec<KeyReport> {
    encode_string(text)
        .collect::<Result<Vec<_>, _>>()
        .expect("text must be fully supported")
        .into_iter()
        .step_by(2)
        .collect()
}

#[test]
fn test_hemiola_produces_fourteen_reports() {
    let reports: Vec<KeyReport> = encode_string("Hemiola")
        .collect::<Result<_, _>>()
        .expect("all characters are in the table");

    assert_eq!(reports.len(), 14, "7 characters x (key-down, release)");
    for release in reports.iter().skip(1).step_by(2) {
        assert_eq!(release.as_bytes(), &[0u8; 8]);
    }
}

#[test]
fn test_hemiola_key_downs_match_usage_ids() {
    let expected: [(u8, u8); 7] = [
        (Modifiers::RIGHT_SHIFT.bits(), 0x0B), // H
        (0, 0x08),                             // e
        (0, 0x10),                             // m
        (0, 0x0C),                             // i
        (0, 0x12),                             // o
        (0, 0x0F),                             // l
        (0, 0x04),                             // a
    ];

    let downs = key_downs("Hemiola");

    assert_eq!(downs.len(), expected.len());
    for (report, (modifiers, key)) in downs.iter().zip(expected) {
        assert_eq!(report.as_bytes(), &[modifiers, 0, key, 0, 0, 0, 0, 0]);
    }
}

#[test]
fn test_demo_text_with_return_matches_reference_device_bytes() {
    // "Hemiola", RETURN, "works" as sent by the gadget demo.
    let downs = key_downs("Hemiola\nworks");
    let keys: Vec<u8> = downs.iter().map(|r| r.as_bytes()[2]).collect();

    assert_eq!(
        keys,
        vec![0x0B, 0x08, 0x10, 0x0C, 0x12, 0x0F, 0x04, 0x28, 0x1A, 0x12, 0x15, 0x0E, 0x16]
    );
    assert_eq!(downs[0].as_bytes()[0], 0x20);
    assert!(downs[1..].iter().all(|r| r.as_bytes()[0] == 0));
}

#[test]
fn test_every_report_is_eight_bytes_with_zero_reserved_byte() {
    for report in encode_string("Hello, World! ~ 1+1=2\t(ok)?\n") {
        let report = report.expect("supported text");
        assert_eq!(report.as_bytes().len(), 8);
        assert_eq!(report.as_bytes()[1], 0x00);
    }
}

#[test]
fn test_release_event_encodes_to_zeros() {
    assert_eq!(encode(&release_event()).as_bytes(), &[0u8; 8]);
}

#[test]
fn test_unsupported_character_surfaces_after_prior_reports() {
    let results: Vec<_> = encode_string("ok\u{7}").collect();

    assert_eq!(results.len(), 5);
    assert!(results[..4].iter().all(Result::is_ok));
    assert_eq!(results[4], Err(KeymapError::UnsupportedCharacter('\u{7}')));
}

#[test]
fn test_parse_and_reverse_lookup_recover_typed_text() {
    let text = "Typed by Hemiola: 42 keys & <counting>...";

    let recovered: String = key_downs(text)
        .iter()
        .map(|report| {
            let event: KeyEvent = KeyReport::parse(report.as_ref()).expect("valid report");
            event_to_char(&event).expect("single-key report")
        })
        .collect();

    assert_eq!(recovered, text);
}

#[test]
fn test_char_to_event_is_deterministic_for_whole_table() {
    for byte in 0x20u8..0x7F {
        let c = byte as char;
        assert_eq!(char_to_event(c), char_to_event(c), "{c:?}");
    }
}

#[test]
fn test_chord_word_is_typed_like_plain_text() {
    // Arrange
    let table = ChordTable::from_entries(ChordSpecials::default(), [("works", "wk+;")]);

    // Act
    let word = table.get_word("k w + ;");
    let reports: Vec<KeyReport> = encode_string(word).map(Result::unwrap).collect();

    // Assert
    assert_eq!(word, "works");
    assert_eq!(reports.len(), 10);
    assert_eq!(reports[0].as_bytes()[2], 0x1A);
}

#[test]
fn test_anagram_lookup_recovers_demo_word() {
    let index: Anagrammer = ["Hemiola", "works"].into_iter().collect();
    let found = index.lookup("hailmoe");
    assert_eq!(found, ["Hemiola"]);
    let first = encode_string(&found[0]).next().unwrap().unwrap();
    assert_eq!(first.as_bytes(), &[0x20, 0, 0x0B, 0, 0, 0, 0, 0]);
}

//! Integration tests for the typing pipeline.
//!
//! These exercise `TypeTextUseCase` end-to-end against the infrastructure
//! sinks: the recording mock and a gadget sink backed by a regular file.

use std::sync::Arc;

use hemiola_core::{event_to_char, KeyReport};
use hemiola_gadget::application::type_text::{
    ReportSink, SinkError, TypeError, TypeTextUseCase, UnsupportedCharPolicy,
};
use hemiola_gadget::infrastructure::output_sink::{HidGadgetSink, MockReportSink};

fn use_case_with(sink: &Arc<MockReportSink>) -> TypeTextUseCase {
    TypeTextUseCase::new(Arc::clone(sink) as Arc<dyn ReportSink>)
}

/// Decodes the key-down reports of a recorded stream back into text.
fn typed_text(reports: &[KeyReport]) -> String {
    reports
        .iter()
        .filter(|r| !r.is_release())
        .map(|r| {
            let event = KeyReport::parse(r.as_ref()).expect("recorded report is valid");
            event_to_char(&event).expect("single-key report")
        })
        .collect()
}

#[test]
fn test_demo_text_reaches_sink_with_release_after_every_key() {
    let sink = Arc::new(MockReportSink::new());
    let uc = use_case_with(&sink);

    let summary = uc.type_text("Hemiola\nworks").unwrap();

    let reports = sink.reports();
    assert_eq!(reports.len(), 26);
    assert_eq!(summary.reports_written, 26);
    assert_eq!(summary.chars_typed, 13);
    for pair in reports.chunks(2) {
        assert!(!pair[0].is_release(), "even positions are key-downs");
        assert!(pair[1].is_release(), "every key-down is followed by a release");
    }
    assert_eq!(typed_text(&reports), "Hemiola\nworks");
}

#[test]
fn test_repeated_characters_are_each_delivered() {
    let sink = Arc::new(MockReportSink::new());
    let uc = use_case_with(&sink);

    uc.type_text("aaa").unwrap();

    assert_eq!(typed_text(&sink.reports()), "aaa");
}

#[test]
fn test_skip_policy_types_everything_else() {
    let sink = Arc::new(MockReportSink::new());
    let uc = use_case_with(&sink).with_policy(UnsupportedCharPolicy::Skip);

    let summary = uc.type_text("naïve café").unwrap();

    assert_eq!(summary.skipped, vec!['ï', 'é']);
    assert_eq!(typed_text(&sink.reports()), "nave caf");
}

#[test]
fn test_abort_policy_keeps_already_written_reports() {
    let sink = Arc::new(MockReportSink::new());
    let uc = use_case_with(&sink);

    let result = uc.type_text("ok→no");

    assert!(matches!(result, Err(TypeError::Keymap(_))));
    assert_eq!(typed_text(&sink.reports()), "ok");
    assert!(sink.reports().last().unwrap().is_release());
}

#[test]
fn test_device_failure_mid_string_is_returned_not_retried() {
    // Accept "H" down + release, then fail on "i" down.
    let sink = Arc::new(MockReportSink::fail_after(2));
    let uc = use_case_with(&sink);

    let result = uc.type_text("Hi");

    assert!(matches!(result, Err(TypeError::Sink(SinkError::Mock(_)))));
    assert_eq!(sink.reports().len(), 2);
}

#[test]
fn test_failing_sink_rejects_release_all() {
    let sink = Arc::new(MockReportSink {
        should_fail: true,
        ..MockReportSink::default()
    });
    let uc = use_case_with(&sink);

    assert!(uc.release_all().is_err());
    assert!(sink.reports().is_empty());
}

#[test]
fn test_gadget_sink_file_receives_exact_report_bytes() {
    // Arrange – a regular file stands in for /dev/hidg0
    let path = std::env::temp_dir().join(format!("hemiola_hidg_{}", uuid::Uuid::new_v4()));
    std::fs::write(&path, b"").unwrap();
    let sink = HidGadgetSink::open(&path).unwrap();
    let uc = TypeTextUseCase::new(Arc::new(sink));

    // Act
    uc.type_text("He").unwrap();

    // Assert
    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(
        bytes,
        [
            [0x20, 0, 0x0B, 0, 0, 0, 0, 0],
            [0; 8],
            [0x00, 0, 0x08, 0, 0, 0, 0, 0],
            [0; 8],
        ]
        .concat()
    );

    std::fs::remove_file(&path).ok();
}

//! Mock report sink for testing.
//!
//! # Why a mock sink?
//!
//! The real [`HidGadgetSink`](super::HidGadgetSink) needs a configured USB
//! gadget and a connected host, and what it "types" cannot be observed from
//! test code. `MockReportSink` instead pushes every report into a
//! `Mutex<Vec<KeyReport>>` so assertions can inspect exactly what was written
//! and in what order.
//!
//! # Usage in tests
//!
//! ```ignore
//! let sink = Arc::new(MockReportSink::new());
//! let use_case = TypeTextUseCase::new(Arc::clone(&sink) as Arc<dyn ReportSink>);
//!
//! use_case.type_text("hi").unwrap();
//!
//! assert_eq!(sink.reports().len(), 4);
//! ```
//!
//! # Failure injection
//!
//! `should_fail` makes every write fail; `fail_after(n)` lets the first `n`
//! writes succeed, which exercises "device vanished mid-string" paths.

use std::sync::Mutex;

use hemiola_core::KeyReport;

use crate::application::type_text::{ReportSink, SinkError};

/// A sink that records reports without touching any device.
#[derive(Default)]
pub struct MockReportSink {
    /// Every report accepted so far, in write order.
    pub written: Mutex<Vec<KeyReport>>,
    /// When `true`, every write returns [`SinkError::Mock`].
    pub should_fail: bool,
    /// When set, writes fail once this many reports have been accepted.
    pub fail_after: Option<usize>,
}

impl MockReportSink {
    /// Creates a new `MockReportSink` that accepts every write.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a sink that accepts `n` reports and then fails.
    pub fn fail_after(n: usize) -> Self {
        Self {
            fail_after: Some(n),
            ..Self::default()
        }
    }

    /// Snapshot of the recorded reports.
    pub fn reports(&self) -> Vec<KeyReport> {
        self.written.lock().unwrap().clone()
    }
}

impl ReportSink for MockReportSink {
    fn write_report(&self, report: &KeyReport) -> Result<(), SinkError> {
        if self.should_fail {
            return Err(SinkError::Mock("mock failure".into()));
        }
        let mut written = self.written.lock().unwrap();
        if self.fail_after.is_some_and(|n| written.len() >= n) {
            return Err(SinkError::Mock("mock device disconnected".into()));
        }
        written.push(*report);
        Ok(())
    }
}

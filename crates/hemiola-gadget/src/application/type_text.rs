//! TypeTextUseCase: drives encoded reports into an output sink, in order.
//!
//! The use case sits at the application layer and delegates the actual write
//! to a [`ReportSink`] trait object. Device-backed and test implementations
//! live in the infrastructure layer.

use std::{path::PathBuf, sync::Arc, time::Duration};

use hemiola_core::{encode_string, KeyReport, KeymapError};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Error type for report sink operations.
#[derive(Debug, Error)]
pub enum SinkError {
    /// The output device could not be opened.
    #[error("failed to open HID device {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A report could not be written to the device.
    #[error("failed to write report to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failure injected by a test sink.
    #[error("mock sink error: {0}")]
    Mock(String),
}

/// Destination for keyboard reports.
///
/// Implementations must write each report atomically and block until the
/// underlying driver accepts it. Failures are returned, never retried.
pub trait ReportSink: Send + Sync {
    /// Writes one 8-byte report.
    fn write_report(&self, report: &KeyReport) -> Result<(), SinkError>;
}

/// What to do with a character the key table cannot type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnsupportedCharPolicy {
    /// Stop typing and return the error.
    #[default]
    Abort,
    /// Log a warning, drop the character, and keep typing.
    Skip,
}

/// Error type for [`TypeTextUseCase`].
#[derive(Debug, Error)]
pub enum TypeError {
    #[error(transparent)]
    Keymap(#[from] KeymapError),
    #[error(transparent)]
    Sink(#[from] SinkError),
}

/// Outcome of a successful [`TypeTextUseCase::type_text`] call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeSummary {
    /// Reports handed to the sink, releases included.
    pub reports_written: usize,
    /// Characters fully typed (key-down and release written).
    pub chars_typed: usize,
    /// Characters dropped under [`UnsupportedCharPolicy::Skip`], in input order.
    pub skipped: Vec<char>,
}

/// The Type Text use case.
pub struct TypeTextUseCase {
    sink: Arc<dyn ReportSink>,
    report_delay: Duration,
    policy: UnsupportedCharPolicy,
}

impl TypeTextUseCase {
    /// Creates a use case writing to `sink` with no delay and the
    /// [`UnsupportedCharPolicy::Abort`] policy.
    pub fn new(sink: Arc<dyn ReportSink>) -> Self {
        Self {
            sink,
            report_delay: Duration::ZERO,
            policy: UnsupportedCharPolicy::default(),
        }
    }

    /// Pause inserted after every report write.
    pub fn with_report_delay(mut self, delay: Duration) -> Self {
        self.report_delay = delay;
        self
    }

    pub fn with_policy(mut self, policy: UnsupportedCharPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Types `text` by writing its key-down/release reports to the sink.
    ///
    /// Reports are written strictly in the order [`encode_string`] yields them.
    ///
    /// # Errors
    ///
    /// - [`TypeError::Keymap`] for an unsupported character under
    ///   [`UnsupportedCharPolicy::Abort`]. Reports for earlier characters have
    ///   already been written.
    /// - [`TypeError::Sink`] as soon as any write fails.
    pub fn type_text(&self, text: &str) -> Result<TypeSummary, TypeError> {
        let mut summary = TypeSummary::default();
        let mut remaining = text;

        loop {
            let mut reports = encode_string(remaining);
            let mut rejected = None;

            for result in reports.by_ref() {
                match result {
                    Ok(report) => {
                        self.write(&report)?;
                        summary.reports_written += 1;
                        if report.is_release() {
                            summary.chars_typed += 1;
                        }
                    }
                    Err(e) => {
                        rejected = Some(e);
                        break;
                    }
                }
            }

            match rejected {
                None => break,
                Some(KeymapError::UnsupportedCharacter(c))
                    if self.policy == UnsupportedCharPolicy::Skip =>
                {
                    warn!("skipping unsupported character {c:?}");
                    summary.skipped.push(c);
                    remaining = reports.remaining();
                }
                Some(e) => return Err(e.into()),
            }
        }

        info!(
            "typed {} characters ({} reports, {} skipped)",
            summary.chars_typed,
            summary.reports_written,
            summary.skipped.len()
        );
        Ok(summary)
    }

    /// Writes a single all-keys-up report.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError`] if the write fails.
    pub fn release_all(&self) -> Result<(), SinkError> {
        self.write(&KeyReport::RELEASE)
    }

    fn write(&self, report: &KeyReport) -> Result<(), SinkError> {
        debug!(bytes = ?report.as_bytes(), "writing report");
        self.sink.write_report(report)?;
        if !self.report_delay.is_zero() {
            std::thread::sleep(self.report_delay);
        }
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

//! Dry-run sink printing one line of hex per report.

use std::{io::Write, path::PathBuf, sync::Mutex};

use hemiola_core::KeyReport;

use crate::application::type_text::{ReportSink, SinkError};

/// Writes each report as `20 00 0b 00 00 00 00 00` followed by a newline.
pub struct HexDumpSink<W: Write + Send> {
    out: Mutex<W>,
}

impl HexDumpSink<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> HexDumpSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    /// Returns the wrapped writer.
    pub fn into_inner(self) -> W {
        self.out
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<W: Write + Send> ReportSink for HexDumpSink<W> {
    fn write_report(&self, report: &KeyReport) -> Result<(), SinkError> {
        let line = report
            .as_bytes()
            .iter()
            .map(|b| format!("{b:02x}"))
            .collect::<Vec<_>>()
            .join(" ");

        let mut out = self.out.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        writeln!(out, "{line}").map_err(|source| SinkError::Write {
            path: PathBuf::from("<dry-run>"),
            source,
        })
    }
}

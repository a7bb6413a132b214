//! Linux HID gadget output via the `/dev/hidgN` character device.
//!
//! # What is a HID gadget? (for beginners)
//!
//! On boards with a USB device controller (Raspberry Pi Zero, Pi 4 in OTG
//! mode, ...) the kernel's USB gadget framework can make the board look like
//! a USB keyboard to whatever computer it is plugged into. Once the gadget
//! has been set up through configfs, the kernel exposes a character device
//! such as `/dev/hidg0`.
//!
//! Every `write(2)` of an 8-byte boot keyboard report to that device is
//! forwarded to the host as one input report. The host acts on report
//! *changes*, which is why the typing stream releases every key before
//! pressing the next one.
//!
//! # Permissions
//!
//! The device node is normally owned by root. Run as root or add a udev rule
//! granting write access; otherwise [`HidGadgetSink::open`] fails with
//! [`SinkError::Open`].

use std::{
    fs::{File, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
    sync::Mutex,
};

use hemiola_core::KeyReport;
use tracing::{debug, info};

use crate::application::type_text::{ReportSink, SinkError};

/// Default gadget device node.
pub const DEFAULT_DEVICE: &str = "/dev/hidg0";

/// Report sink backed by a HID gadget device file.
///
/// The file handle sits behind a `Mutex` so a shared sink never interleaves
/// bytes from two reports.
#[derive(Debug)]
pub struct HidGadgetSink {
    path: PathBuf,
    file: Mutex<File>,
}

impl HidGadgetSink {
    /// Opens `path` write-only.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError::Open`] if the device does not exist or cannot be
    /// opened for writing.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SinkError> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .write(true)
            .open(&path)
            .map_err(|source| SinkError::Open {
                path: path.clone(),
                source,
            })?;
        info!("opened HID gadget {}", path.display());
        Ok(Self {
            path,
            file: Mutex::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ReportSink for HidGadgetSink {
    /// Writes the report with a single `write_all` and flushes it.
    fn write_report(&self, report: &KeyReport) -> Result<(), SinkError> {
        let mut file = self
            .file
            .lock()
            .map_err(|_| SinkError::Write {
                path: self.path.clone(),
                source: std::io::Error::other("device lock poisoned"),
            })?;

        file.write_all(report.as_bytes())
            .and_then(|()| file.flush())
            .map_err(|source| SinkError::Write {
                path: self.path.clone(),
                source,
            })?;
        debug!("wrote {:02X?} to {}", report.as_bytes(), self.path.display());
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use hemiola_core::{encode, KeyEvent, Modifiers};

    fn scratch_file(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("hemiola_{name}_{}", std::process::id()))
    }

    #[test]
    fn test_open_missing_device_returns_open_error() {
        // Arrange
        let path = PathBuf::from("/nonexistent/dir/hidg0");

        // Act
        let result = HidGadgetSink::open(&path);

        // Assert
        match result {
            Err(SinkError::Open { path: p, .. }) => assert_eq!(p, path),
            other => panic!("expected Open error, got {other:?}"),
        }
    }

    #[test]
    fn test_reports_are_appended_byte_exact_in_order() {
        // Arrange – a regular file stands in for the character device
        let path = scratch_file("sink_order");
        std::fs::write(&path, b"").unwrap();
        let sink = HidGadgetSink::open(&path).unwrap();
        let shift_h = encode(&KeyEvent::new(Modifiers::RIGHT_SHIFT, [0x0B, 0, 0, 0, 0, 0]));

        // Act
        sink.write_report(&shift_h).unwrap();
        sink.write_report(&KeyReport::RELEASE).unwrap();

        // Assert
        let written = std::fs::read(&path).unwrap();
        assert_eq!(
            written,
            vec![0x20, 0, 0x0B, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]
        );
        assert_eq!(sink.path(), path.as_path());

        std::fs::remove_file(&path).ok();
    }
}

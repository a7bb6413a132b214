//! Report sink implementations.
//!
//! - **`gadget`** – writes to a Linux HID gadget character device (`/dev/hidgN`).
//! - **`hex_dump`** – prints each report as hex, for `--dry-run`.
//! - **`mock`** – records reports in memory, for tests.

pub mod gadget;
pub mod hex_dump;
pub mod mock;

pub use gadget::HidGadgetSink;
pub use hex_dump::HexDumpSink;
pub use mock::MockReportSink;

//! Infrastructure layer for the gadget typer.
//!
//! Contains the OS-facing adapters.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `hemiola_core`, but MUST NOT be imported by the `application` layer.
//!
//! # Sub-modules
//!
//! - **`output_sink`** – [`ReportSink`](crate::application::type_text::ReportSink)
//!   implementations: the HID gadget device, a dry-run hex printer, and an
//!   in-memory mock for tests.
//!
//! - **`storage`** – loading and saving the TOML configuration file, and
//!   reading word lists for anagram lookup.

pub mod output_sink;
pub mod storage;

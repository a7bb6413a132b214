//! Application layer use cases for the gadget typer.
//!
//! - **`type_text`** – Encodes text with `hemiola_core::encode_string` and
//!   writes every report, in order, to an injected `ReportSink`. The sink
//!   decides where the bytes go (a `/dev/hidgN` device, stdout, or memory).

pub mod type_text;

//! hemiola-gadget library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.
//!
//! # What does hemiola-gadget do?
//!
//! A board running Linux with a USB device port can pretend to be a USB
//! keyboard. This crate takes text, turns it into boot keyboard reports with
//! `hemiola-core`, and writes those reports to the HID gadget device so the
//! host computer on the other end of the cable "types" the text.

/// Application layer: use cases.
pub mod application;

/// Infrastructure layer: output sinks and configuration storage.
pub mod infrastructure;

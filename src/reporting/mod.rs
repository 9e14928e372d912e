//! Human-readable console report.
//!
//! Progress and summary lines carry a bracketed tag (`[INFO]`, `[PROCESS]`,
//! `[SUMMARY]`, ...) and go to stdout. The wording is for people, not for
//! parsing; structured diagnostics go through `tracing` instead.

mod reporter;

pub use reporter::{ConsoleReporter, Reporter};

//! Reporting utilities: terminal summaries of a report run.

pub mod format;

pub use format::*;

//! Reporting utilities: text summaries of decoded values and binned output.

pub mod format;

pub use format::*;

//! Reporting utilities: value formatting and plain-text summaries.

pub mod format;

pub use format::*;

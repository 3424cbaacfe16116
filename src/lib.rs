//! `econ-timeline` library crate.
//!
//! The binary (`timeline`) is a thin wrapper around this library so that:
//!
//! - parsing, loading and cursor sync are testable without a terminal
//! - the dashboard and the `series` exporter share one load pipeline
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod logging;
pub mod plot;
pub mod report;
pub mod series;
pub mod sync;
pub mod tui;

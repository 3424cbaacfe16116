//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the indicator catalog (`IndicatorDescriptor`, `ValueFormat`)
//! - parsed export rows (`RawRow`, `TabularDataset`)
//! - chart observations (`SeriesPoint`) and selectable `Entity`s

pub mod indicators;
pub mod types;

pub use indicators::*;
pub use types::*;

//! Shared domain types.
//!
//! These types are intentionally small and plain so they can be:
//!
//! - produced by the tabular parser
//! - projected into chart series
//! - exported to JSON/CSV

use std::collections::BTreeMap;

use serde::Serialize;

/// First calendar year that counts as a year column.
pub const YEAR_MIN: i32 = 1960;
/// Last calendar year that counts as a year column.
pub const YEAR_MAX: i32 = 2024;

/// Placeholder shown wherever a value is missing.
pub const MISSING_GLYPH: &str = "—";

/// Whether `year` lies in the supported time axis.
pub fn is_axis_year(year: i32) -> bool {
    (YEAR_MIN..=YEAR_MAX).contains(&year)
}

/// How an indicator's values are rendered for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueFormat {
    /// Scaled with a `K`/`M`/`B`/`T` suffix, two decimals.
    LargeNumber,
    /// Fixed decimals followed by `%`.
    Percent { decimals: usize },
    /// Fixed decimals followed by a unit suffix (e.g. `" years"`).
    Unit {
        decimals: usize,
        suffix: &'static str,
    },
}

/// Display color (sRGB).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Static description of one tracked indicator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndicatorDescriptor {
    /// Stable slug used as the registry key and on the command line.
    pub id: &'static str,
    /// World Bank indicator code (e.g. `NY.GDP.MKTP.CD`).
    pub code: &'static str,
    pub name: &'static str,
    pub title: &'static str,
    pub subtitle: &'static str,
    pub color: Rgb,
    pub format: ValueFormat,
    /// File name of the export, relative to the data root.
    pub file_name: &'static str,
}

/// One entity's parsed record.
///
/// `values` holds every year column from the header; `None` marks a missing
/// value and is never conflated with zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RawRow {
    pub name: String,
    pub code: String,
    pub values: BTreeMap<i32, Option<f64>>,
}

/// Parsed export for one indicator.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TabularDataset {
    /// Header fields (empty when the export had fewer than five lines).
    pub headers: Vec<String>,
    /// `(year, column index)` pairs in header order.
    pub year_columns: Vec<(i32, usize)>,
    pub rows: Vec<RawRow>,
}

impl TabularDataset {
    /// True when the export was too short to carry a header line.
    pub fn is_structurally_empty(&self) -> bool {
        self.headers.is_empty()
    }

    /// First row with an exactly matching entity code.
    pub fn find(&self, code: &str) -> Option<&RawRow> {
        self.rows.iter().find(|row| row.code == code)
    }
}

/// A single observation on a chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub year: i32,
    pub value: f64,
}

/// A selectable country or aggregate region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entity {
    pub code: String,
    pub name: String,
}

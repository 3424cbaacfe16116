//! World Bank export parsing.
//!
//! The bulk CSV downloads share one fixed shape:
//!
//! ```text
//! "Data Source","World Development Indicators",
//! (blank)
//! "Last Updated Date","2024-06-28",
//! (blank)
//! "Country Name","Country Code","Indicator Name","Indicator Code","1960",...,"2024",
//! "Aruba","ABW","GDP (current US$)","NY.GDP.MKTP.CD","","",...
//! ```
//!
//! This module turns that text into a `TabularDataset`. It never fails:
//! - exports shorter than five lines produce an empty dataset
//! - rows with fewer than five fields are skipped (and counted)
//! - blank or non-numeric cells become explicit missing values

use std::collections::BTreeMap;

use crate::domain::{RawRow, TabularDataset, is_axis_year};
use crate::io::csv_line::parse_line;

/// Number of metadata lines preceding the header.
const METADATA_LINES: usize = 4;

/// Data rows need at least name, code, two descriptor columns and one value.
const MIN_ROW_FIELDS: usize = 5;

/// Row-level bookkeeping from one parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseStats {
    pub rows_read: usize,
    pub rows_skipped: usize,
}

/// Parse an export, discarding the stats.
pub fn parse_dataset(text: &str) -> TabularDataset {
    parse_dataset_with_stats(text).0
}

/// Parse an export and report how many data lines were skipped.
pub fn parse_dataset_with_stats(text: &str) -> (TabularDataset, ParseStats) {
    let mut lines = text.lines().skip(METADATA_LINES);

    let Some(header_line) = lines.next() else {
        return (TabularDataset::default(), ParseStats::default());
    };

    let headers = parse_line(header_line);
    let year_columns = year_columns(&headers);

    let mut rows = Vec::new();
    let mut stats = ParseStats::default();

    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        stats.rows_read += 1;

        let fields = parse_line(line);
        if fields.len() < MIN_ROW_FIELDS {
            stats.rows_skipped += 1;
            continue;
        }

        let values: BTreeMap<i32, Option<f64>> = year_columns
            .iter()
            .map(|&(year, idx)| (year, fields.get(idx).and_then(|raw| parse_value(raw))))
            .collect();

        let mut fields = fields.into_iter();
        let name = fields.next().unwrap_or_default();
        let code = fields.next().unwrap_or_default();

        rows.push(RawRow { name, code, values });
    }

    (
        TabularDataset {
            headers,
            year_columns,
            rows,
        },
        stats,
    )
}

/// `(year, index)` for every header field naming a year on the time axis.
fn year_columns(headers: &[String]) -> Vec<(i32, usize)> {
    headers
        .iter()
        .enumerate()
        .filter_map(|(idx, field)| {
            let year = field.trim().parse::<i32>().ok()?;
            is_axis_year(year).then_some((year, idx))
        })
        .collect()
}

/// Numeric cell parse: blank, non-numeric and non-finite inputs are missing.
fn parse_value(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let v = trimmed.parse::<f64>().ok()?;
    if v.is_finite() { Some(v) } else { None }
}

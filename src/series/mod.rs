//! Series extraction: `(dataset, entity code) -> Vec<SeriesPoint>`.
//!
//! An unknown entity code is not an error; it yields an empty series, which
//! the charts render as their "no data" state.

use crate::domain::{SeriesPoint, TabularDataset};

/// Project one entity's year values into an ascending, gap-free series.
///
/// Missing values are dropped. The first row with an exactly matching
/// (case-sensitive) code wins.
pub fn extract_series(dataset: &TabularDataset, code: &str) -> Vec<SeriesPoint> {
    let Some(row) = dataset.find(code) else {
        return Vec::new();
    };

    let mut points: Vec<SeriesPoint> = row
        .values
        .iter()
        .filter_map(|(&year, value)| value.map(|value| SeriesPoint { year, value }))
        .collect();

    // `values` is a BTreeMap so this is already ordered; keep the contract explicit.
    points.sort_by_key(|p| p.year);
    points
}

/// Most recent observation.
pub fn latest(series: &[SeriesPoint]) -> Option<SeriesPoint> {
    series.last().copied()
}

/// Observation at exactly `year` (no interpolation).
pub fn value_at(series: &[SeriesPoint], year: i32) -> Option<SeriesPoint> {
    series
        .binary_search_by_key(&year, |p| p.year)
        .ok()
        .map(|idx| series[idx])
}

/// `(min, max)` of the series values.
pub fn extent(series: &[SeriesPoint]) -> Option<(f64, f64)> {
    let mut iter = series.iter().map(|p| p.value);
    let first = iter.next()?;
    Some(iter.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
}

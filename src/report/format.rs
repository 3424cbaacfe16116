//! Value formatting and text reports.
//!
//! We keep formatting code in one place so:
//! - the parsing/sync code stays free of presentation details
//! - the TUI and the `series` subcommand render numbers identically

use crate::domain::{Entity, IndicatorDescriptor, MISSING_GLYPH, SeriesPoint, ValueFormat};
use crate::series::{extent, latest};

impl ValueFormat {
    /// Render a value for display; missing or non-finite input gives `—`.
    pub fn format(self, value: Option<f64>) -> String {
        let Some(v) = value.filter(|v| v.is_finite()) else {
            return MISSING_GLYPH.to_string();
        };
        match self {
            ValueFormat::LargeNumber => format_large_number(v),
            ValueFormat::Percent { decimals } => format!("{v:.decimals$}%"),
            ValueFormat::Unit { decimals, suffix } => format!("{v:.decimals$}{suffix}"),
        }
    }
}

/// `1.23T`, `4.50B`, `12.00M`, `3.40K`, or two decimals below a thousand.
///
/// Negative values are never scaled.
pub fn format_large_number(v: f64) -> String {
    if !v.is_finite() {
        return MISSING_GLYPH.to_string();
    }
    if v >= 1e12 {
        format!("{:.2}T", v / 1e12)
    } else if v >= 1e9 {
        format!("{:.2}B", v / 1e9)
    } else if v >= 1e6 {
        format!("{:.2}M", v / 1e6)
    } else if v >= 1e3 {
        format!("{:.2}K", v / 1e3)
    } else {
        format!("{v:.2}")
    }
}

/// Format one indicator's series as a plain-text block.
pub fn format_series_table(
    descriptor: &IndicatorDescriptor,
    entity: &Entity,
    series: &[SeriesPoint],
) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "=== {} — {} ({}) ===\n",
        descriptor.title, entity.name, entity.code
    ));
    out.push_str(&format!("{}\n", descriptor.subtitle));

    if series.is_empty() {
        out.push_str("No data\n");
        return out;
    }

    let (lo, hi) = extent(series).unwrap_or((f64::NAN, f64::NAN));
    let last = latest(series);
    out.push_str(&format!(
        "Points: n={} | years=[{}, {}] | range=[{}, {}] | latest={} ({})\n",
        series.len(),
        series[0].year,
        series[series.len() - 1].year,
        descriptor.format.format(Some(lo)),
        descriptor.format.format(Some(hi)),
        descriptor.format.format(last.map(|p| p.value)),
        last.map(|p| p.year.to_string()).unwrap_or_default(),
    ));

    out.push_str(&format!("{:>6}  {:>18}\n", "year", "value"));
    for p in series {
        out.push_str(&format!(
            "{:>6}  {:>18}\n",
            p.year,
            descriptor.format.format(Some(p.value))
        ));
    }

    out
}

/// Format the entity list grouped the way the picker shows it.
pub fn format_entity_groups(groups: &crate::data::EntityGroups) -> String {
    let mut out = String::new();

    out.push_str(crate::data::EntityGroups::MAJOR_LABEL);
    out.push_str(":\n");
    for e in &groups.major {
        out.push_str(&format!("  {:<4} {}\n", e.code, e.name));
    }

    out.push('\n');
    out.push_str(crate::data::EntityGroups::OTHERS_LABEL);
    out.push_str(":\n");
    for e in &groups.others {
        out.push_str(&format!("  {:<4} {}\n", e.code, e.name));
    }

    out
}

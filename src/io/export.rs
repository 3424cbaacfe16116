//! Export derived series to CSV or JSON.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream scripts.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{Entity, IndicatorDescriptor, SeriesPoint};
use crate::error::AppError;

/// One indicator's series for the exported entity.
pub struct SeriesExport<'a> {
    pub descriptor: &'a IndicatorDescriptor,
    pub series: &'a [SeriesPoint],
}

#[derive(Serialize)]
struct ExportFile<'a> {
    tool: &'static str,
    exported_at: DateTime<Utc>,
    entity: &'a Entity,
    indicators: Vec<IndicatorSeries<'a>>,
}

#[derive(Serialize)]
struct IndicatorSeries<'a> {
    id: &'static str,
    code: &'static str,
    title: &'static str,
    subtitle: &'static str,
    points: &'a [SeriesPoint],
}

/// Long-format CSV: one line per `(indicator, year)`.
pub fn write_series_csv(
    out: &mut dyn Write,
    entity: &Entity,
    exports: &[SeriesExport<'_>],
) -> Result<(), AppError> {
    writeln!(out, "indicator,indicator_code,entity_code,entity_name,year,value")
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV header: {e}")))?;

    for export in exports {
        for p in export.series {
            writeln!(
                out,
                "{},{},{},{},{},{}",
                export.descriptor.id,
                export.descriptor.code,
                entity.code,
                csv_field(&entity.name),
                p.year,
                p.value,
            )
            .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
        }
    }

    Ok(())
}

/// Pretty JSON document with every indicator's points.
pub fn write_series_json(
    out: &mut dyn Write,
    entity: &Entity,
    exports: &[SeriesExport<'_>],
    exported_at: DateTime<Utc>,
) -> Result<(), AppError> {
    let file = ExportFile {
        tool: "timeline",
        exported_at,
        entity,
        indicators: exports
            .iter()
            .map(|e| IndicatorSeries {
                id: e.descriptor.id,
                code: e.descriptor.code,
                title: e.descriptor.title,
                subtitle: e.descriptor.subtitle,
                points: e.series,
            })
            .collect(),
    };

    serde_json::to_writer_pretty(&mut *out, &file)
        .map_err(|e| AppError::new(2, format!("Failed to write export JSON: {e}")))?;
    writeln!(out).map_err(|e| AppError::new(2, format!("Failed to write export JSON: {e}")))?;
    Ok(())
}

/// Quote a field when it contains a delimiter or quote.
fn csv_field(raw: &str) -> String {
    if raw.contains([',', '"', '\n']) {
        format!("\"{}\"", raw.replace('"', "\"\""))
    } else {
        raw.to_string()
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::domain::find_indicator;

    fn korea() -> Entity {
        Entity {
            code: "KOR".to_string(),
            name: "Korea, Rep.".to_string(),
        }
    }

    #[test]
    fn csv_quotes_names_with_commas() {
        let series = [SeriesPoint { year: 1990, value: 2.5e11 }];
        let exports = [SeriesExport {
            descriptor: find_indicator("gdp").unwrap(),
            series: &series,
        }];

        let mut buf = Vec::new();
        write_series_csv(&mut buf, &korea(), &exports).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "gdp,NY.GDP.MKTP.CD,KOR,\"Korea, Rep.\",1990,250000000000");
    }

    #[test]
    fn json_lists_indicators_and_points() {
        let gdp_series = [SeriesPoint { year: 1990, value: 2.5e11 }];
        let exports = [
            SeriesExport {
                descriptor: find_indicator("gdp").unwrap(),
                series: &gdp_series,
            },
            SeriesExport {
                descriptor: find_indicator("inflation").unwrap(),
                series: &[],
            },
        ];
        let at = Utc.with_ymd_and_hms(2024, 7, 1, 12, 0, 0).unwrap();

        let mut buf = Vec::new();
        write_series_json(&mut buf, &korea(), &exports, at).unwrap();
        let v: serde_json::Value = serde_json::from_slice(&buf).unwrap();

        assert_eq!(v["entity"]["code"], "KOR");
        assert_eq!(v["indicators"][0]["id"], "gdp");
        assert_eq!(v["indicators"][0]["points"][0]["year"], 1990);
        assert_eq!(v["indicators"][1]["points"].as_array().unwrap().len(), 0);
        assert_eq!(v["exported_at"], "2024-07-01T12:00:00Z");
    }
}

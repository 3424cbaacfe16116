//! Indicator registry and the batch loader that fills it.
//!
//! Loading fans out one fetch+parse per indicator on the rayon pool and joins
//! before anything is published. Any single failure aborts the batch: callers
//! get either a complete `Registry` or a `LoadError`, never a partial one.

use std::collections::HashMap;
use std::time::Instant;

use rayon::prelude::*;
use reqwest::blocking::Client;

use crate::data::entities::entities_from;
use crate::data::source::DataRoot;
use crate::domain::{Entity, IndicatorDescriptor, SeriesPoint, TabularDataset};
use crate::error::LoadError;
use crate::io::tabular::parse_dataset_with_stats;
use crate::series::extract_series;

/// Parsed datasets keyed by indicator id. Read-only once built.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    indicators: Vec<&'static IndicatorDescriptor>,
    datasets: HashMap<&'static str, TabularDataset>,
    entities: Vec<Entity>,
}

impl Registry {
    /// Build from datasets given in the same order as `indicators`.
    ///
    /// The entity list comes from the first dataset; every export is assumed
    /// to cover the same entities.
    pub fn from_datasets(
        indicators: Vec<&'static IndicatorDescriptor>,
        datasets: Vec<TabularDataset>,
    ) -> Self {
        let entities = datasets.first().map(entities_from).unwrap_or_default();
        let datasets = indicators.iter().map(|d| d.id).zip(datasets).collect();
        Self {
            indicators,
            datasets,
            entities,
        }
    }

    pub fn indicators(&self) -> &[&'static IndicatorDescriptor] {
        &self.indicators
    }

    pub fn dataset(&self, indicator: &str) -> Option<&TabularDataset> {
        self.datasets.get(indicator)
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn entity(&self, code: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.code == code)
    }

    /// Series for `(indicator, entity)`; empty when either is unknown.
    pub fn series(&self, indicator: &str, code: &str) -> Vec<SeriesPoint> {
        self.dataset(indicator)
            .map(|ds| extract_series(ds, code))
            .unwrap_or_default()
    }
}

/// Fetches and parses every indicator export under one data root.
pub struct Loader {
    root: DataRoot,
    client: Client,
}

impl Loader {
    pub fn new(root: DataRoot) -> Self {
        Self {
            root,
            client: Client::new(),
        }
    }

    /// Load all indicators concurrently; the first failure aborts the batch.
    pub fn load(&self, indicators: &[&'static IndicatorDescriptor]) -> Result<Registry, LoadError> {
        if indicators.is_empty() {
            return Err(LoadError::Empty);
        }

        let started = Instant::now();
        tracing::info!(root = %self.root, count = indicators.len(), "loading indicator exports");

        let datasets = indicators
            .par_iter()
            .map(|&descriptor| self.load_one(descriptor))
            .collect::<Result<Vec<_>, _>>()?;

        let registry = Registry::from_datasets(indicators.to_vec(), datasets);
        tracing::info!(
            entities = registry.entities().len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "indicator exports loaded"
        );
        Ok(registry)
    }

    fn load_one(&self, descriptor: &'static IndicatorDescriptor) -> Result<TabularDataset, LoadError> {
        let source = self.root.locate(descriptor);
        let started = Instant::now();
        let text = source.read(descriptor.id, &self.client)?;

        let (dataset, stats) = parse_dataset_with_stats(&text);
        if dataset.is_structurally_empty() {
            return Err(LoadError::Malformed {
                indicator: descriptor.id,
                location: source.location(),
            });
        }

        tracing::debug!(
            indicator = descriptor.id,
            location = %source.location(),
            rows = dataset.rows.len(),
            years = dataset.year_columns.len(),
            skipped = stats.rows_skipped,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "parsed export"
        );
        Ok(dataset)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use super::*;
    use crate::domain::find_indicator;

    const PREAMBLE: &str = "\"Data Source\",\"World Development Indicators\",\n\n\"Last Updated Date\",\"2024-06-28\",\n\n";

    fn write_export(dir: &Path, descriptor: &IndicatorDescriptor, rows: &[&str]) {
        let mut text = String::from(PREAMBLE);
        text.push_str("\"Country Name\",\"Country Code\",\"Indicator Name\",\"Indicator Code\",\"1974\",\"1975\",\n");
        for row in rows {
            text.push_str(row);
            text.push('\n');
        }
        fs::write(dir.join(descriptor.file_name), text).unwrap();
    }

    fn indicators() -> Vec<&'static IndicatorDescriptor> {
        vec![find_indicator("gdp").unwrap(), find_indicator("inflation").unwrap()]
    }

    #[test]
    fn loads_every_indicator_and_derives_entities() {
        let dir = tempfile::tempdir().unwrap();
        let [gdp, inflation] = [indicators()[0], indicators()[1]];
        write_export(
            dir.path(),
            gdp,
            &[
                r#""World","WLD","GDP","NY.GDP.MKTP.CD","1.0e13","1.1e13","#,
                r#""Nigeria","NGA","GDP","NY.GDP.MKTP.CD","2.0e10","","#,
            ],
        );
        write_export(dir.path(), inflation, &[r#""Nigeria","NGA","CPI","FP.CPI.TOTL.ZG","","33.9","#]);

        let loader = Loader::new(DataRoot::Local(dir.path().to_path_buf()));
        let registry = loader.load(&indicators()).unwrap();

        let codes: Vec<&str> = registry.entities().iter().map(|e| e.code.as_str()).collect();
        assert_eq!(codes, vec!["NGA", "WLD"]);

        assert_eq!(
            registry.series("gdp", "NGA"),
            vec![SeriesPoint { year: 1974, value: 2.0e10 }]
        );
        assert_eq!(
            registry.series("inflation", "NGA"),
            vec![SeriesPoint { year: 1975, value: 33.9 }]
        );
        assert!(registry.series("inflation", "WLD").is_empty());
        assert!(registry.series("population", "NGA").is_empty());
    }

    #[test]
    fn latin1_bytes_in_an_export_do_not_fail_the_load() {
        let dir = tempfile::tempdir().unwrap();
        let gdp = indicators()[0];

        let mut bytes = PREAMBLE.as_bytes().to_vec();
        bytes.extend_from_slice(b"\"Country Name\",\"Country Code\",\"a\",\"b\",\"1974\",\n");
        bytes.extend_from_slice(b"\"C\xF4te d'Ivoire\",\"CIV\",\"a\",\"b\",\"3.1e9\",\n");
        bytes.extend_from_slice(b"\"World\",\"WLD\",\"a\",\"b\",\"1.0e13\",\n");
        fs::write(dir.path().join(gdp.file_name), bytes).unwrap();

        let loader = Loader::new(DataRoot::Local(dir.path().to_path_buf()));
        let registry = loader.load(&[gdp]).unwrap();

        assert_eq!(registry.entities().len(), 2);
        let civ = registry.entity("CIV").unwrap();
        assert!(civ.name.starts_with('C') && civ.name.ends_with("te d'Ivoire"));
        assert!(civ.name.contains('\u{FFFD}'));
        assert_eq!(registry.series("gdp", "CIV"), vec![SeriesPoint { year: 1974, value: 3.1e9 }]);
    }

    #[test]
    fn one_missing_export_aborts_the_batch() {
        let dir = tempfile::tempdir().unwrap();
        write_export(dir.path(), indicators()[0], &[r#""World","WLD","a","b","1","2""#]);

        let loader = Loader::new(DataRoot::Local(dir.path().to_path_buf()));
        let err = loader.load(&indicators()).unwrap_err();
        assert!(matches!(err, LoadError::Io { indicator: "inflation", .. }), "{err}");
    }

    #[test]
    fn truncated_export_aborts_the_batch() {
        let dir = tempfile::tempdir().unwrap();
        let [gdp, inflation] = [indicators()[0], indicators()[1]];
        write_export(dir.path(), gdp, &[r#""World","WLD","a","b","1","2""#]);
        fs::write(dir.path().join(inflation.file_name), "only\nthree\nlines\n").unwrap();

        let loader = Loader::new(DataRoot::Local(dir.path().to_path_buf()));
        let err = loader.load(&indicators()).unwrap_err();
        assert!(matches!(err, LoadError::Malformed { indicator: "inflation", .. }), "{err}");
    }

    #[test]
    fn empty_indicator_list_is_rejected() {
        let loader = Loader::new(DataRoot::parse("Datasets"));
        assert!(matches!(loader.load(&[]), Err(LoadError::Empty)));
    }
}

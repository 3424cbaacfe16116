//! Where indicator exports come from.
//!
//! The data root is either a local directory or an `http(s)` base URL. Each
//! indicator resolves to `<root>/<file_name>`. World Bank downloads carry a
//! version suffix (`API_SP.POP.TOTL_DS2_en_csv_v2_<n>.csv`) that changes on
//! every refresh, so for local roots a missing exact file falls back to any
//! `API_<code>_*.csv` in the directory.

use std::fs;
use std::path::{Path, PathBuf};

use reqwest::blocking::Client;

use crate::domain::IndicatorDescriptor;
use crate::error::LoadError;

/// Environment variable naming the default data root.
pub const DATA_ENV: &str = "TIMELINE_DATA";

/// Data root used when neither a flag nor the environment names one.
pub const DEFAULT_DATA_ROOT: &str = "Datasets";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataRoot {
    Local(PathBuf),
    Remote(String),
}

impl DataRoot {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.starts_with("http://") || raw.starts_with("https://") {
            DataRoot::Remote(raw.trim_end_matches('/').to_string())
        } else {
            DataRoot::Local(PathBuf::from(raw))
        }
    }

    /// Resolve the root: explicit flag, then `TIMELINE_DATA` (from the
    /// environment or `.env`), then `Datasets`.
    pub fn resolve(flag: Option<&str>) -> Self {
        if let Some(raw) = flag {
            return Self::parse(raw);
        }
        dotenvy::dotenv().ok();
        match std::env::var(DATA_ENV) {
            Ok(raw) if !raw.trim().is_empty() => Self::parse(&raw),
            _ => Self::parse(DEFAULT_DATA_ROOT),
        }
    }

    pub fn locate(&self, descriptor: &IndicatorDescriptor) -> Source {
        match self {
            DataRoot::Remote(base) => Source::Url(format!("{base}/{}", descriptor.file_name)),
            DataRoot::Local(dir) => {
                let exact = dir.join(descriptor.file_name);
                if exact.is_file() {
                    return Source::File(exact);
                }
                match discover_export(dir, descriptor.code) {
                    Some(found) => {
                        tracing::debug!(
                            indicator = descriptor.id,
                            path = %found.display(),
                            "using discovered export"
                        );
                        Source::File(found)
                    }
                    None => Source::File(exact),
                }
            }
        }
    }
}

impl std::fmt::Display for DataRoot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataRoot::Local(dir) => write!(f, "{}", dir.display()),
            DataRoot::Remote(base) => write!(f, "{base}"),
        }
    }
}

/// A single resolved export location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    File(PathBuf),
    Url(String),
}

impl Source {
    pub fn location(&self) -> String {
        match self {
            Source::File(path) => path.display().to_string(),
            Source::Url(url) => url.clone(),
        }
    }

    /// Read the raw export text. Invalid UTF-8 is replaced, never an error.
    pub fn read(&self, indicator: &'static str, client: &Client) -> Result<String, LoadError> {
        match self {
            Source::File(path) => {
                let bytes = fs::read(path).map_err(|source| LoadError::Io {
                    indicator,
                    location: self.location(),
                    source,
                })?;
                // Same replacement policy as `Response::text` on the remote path.
                Ok(String::from_utf8_lossy(&bytes).into_owned())
            }
            Source::Url(url) => {
                let http_err = |source| LoadError::Http {
                    indicator,
                    location: url.clone(),
                    source,
                };
                let resp = client.get(url).send().map_err(http_err)?;
                if !resp.status().is_success() {
                    return Err(LoadError::Status {
                        indicator,
                        location: url.clone(),
                        status: resp.status().as_u16(),
                    });
                }
                resp.text().map_err(http_err)
            }
        }
    }
}

/// Find `API_<code>_*.csv` in `dir` (deterministic: lexicographically first).
fn discover_export(dir: &Path, code: &str) -> Option<PathBuf> {
    let prefix = format!("API_{code}_");
    let entries = fs::read_dir(dir).ok()?;

    let mut found: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .filter(|path| {
            let name = path.file_name().and_then(|s| s.to_str()).unwrap_or("");
            let is_csv = path
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| ext.eq_ignore_ascii_case("csv"))
                == Some(true);
            is_csv && name.starts_with(&prefix)
        })
        .collect();

    found.sort();
    found.into_iter().next()
}

//! Shared "load" logic used by both CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! resolve data root -> pick indicators -> concurrent fetch + parse -> registry
//!
//! The CLI and the TUI can then focus on presentation (printing vs widgets).

use crate::cli::SourceArgs;
use crate::data::{DataRoot, Loader, Registry};
use crate::domain::{IndicatorDescriptor, resolve_indicators};
use crate::error::AppError;

/// A resolved load: where to read from and which indicators to read.
#[derive(Debug, Clone)]
pub struct LoadRequest {
    pub root: DataRoot,
    pub indicators: Vec<&'static IndicatorDescriptor>,
}

impl LoadRequest {
    pub fn from_args(args: &SourceArgs) -> Result<Self, AppError> {
        let indicators = resolve_indicators(&args.indicators).map_err(|msg| AppError::new(2, msg))?;
        Ok(Self {
            root: DataRoot::resolve(args.data.as_deref()),
            indicators,
        })
    }
}

/// Fetch and parse every requested indicator; any failure fails the whole load.
pub fn load_registry(request: &LoadRequest) -> Result<Registry, AppError> {
    let loader = Loader::new(request.root.clone());
    let registry = loader.load(&request.indicators)?;
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LOAD_FAILED_MESSAGE;

    #[test]
    fn unknown_indicator_is_a_usage_error() {
        let args = SourceArgs {
            data: Some("Datasets".to_string()),
            indicators: vec!["gini".to_string()],
        };
        let err = LoadRequest::from_args(&args).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn failed_load_shows_one_generic_message() {
        let dir = tempfile::tempdir().unwrap();
        let args = SourceArgs {
            data: Some(dir.path().display().to_string()),
            indicators: vec!["gdp".to_string()],
        };
        let request = LoadRequest::from_args(&args).unwrap();
        let err = load_registry(&request).unwrap_err();
        assert_eq!(err.exit_code(), 4);
        assert_eq!(err.to_string(), LOAD_FAILED_MESSAGE);
    }
}

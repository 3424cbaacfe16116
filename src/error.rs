use thiserror::Error;

/// Message shown in place of the dashboard when a load batch fails.
///
/// It deliberately does not say which indicator failed; the log has that.
pub const LOAD_FAILED_MESSAGE: &str =
    "Error loading data. Please ensure the CSV files are in the data directory.";

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

/// Failure of a single source within a load batch.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("{indicator}: failed to read {location}: {source}")]
    Io {
        indicator: &'static str,
        location: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{indicator}: request to {location} failed: {source}")]
    Http {
        indicator: &'static str,
        location: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{indicator}: {location} answered with status {status}")]
    Status {
        indicator: &'static str,
        location: String,
        status: u16,
    },

    #[error("{indicator}: {location} is not a tabular export (fewer than five lines)")]
    Malformed {
        indicator: &'static str,
        location: String,
    },

    #[error("no indicators selected")]
    Empty,
}

impl From<LoadError> for AppError {
    fn from(err: LoadError) -> Self {
        tracing::error!(error = %err, "data load failed");
        AppError::new(4, LOAD_FAILED_MESSAGE)
    }
}

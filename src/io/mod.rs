//! Input/output helpers.
//!
//! - single-line CSV tokenizing (`csv_line`)
//! - World Bank export parsing (`tabular`)
//! - series exports (CSV/JSON) (`export`)

pub mod csv_line;
pub mod export;
pub mod tabular;

pub use csv_line::parse_line;
pub use export::*;
pub use tabular::{ParseStats, parse_dataset, parse_dataset_with_stats};

//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - sets up logging
//! - loads the indicator exports
//! - runs the dashboard or prints/exports series

use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;

use crate::cli::{Command, DashboardArgs, OutputFormat, SeriesArgs, SourceArgs};
use crate::data::EntityGroups;
use crate::domain::Entity;
use crate::error::AppError;
use crate::io::export::{SeriesExport, write_series_csv, write_series_json};
use crate::logging::{self, LOG_FILE_ENV, LogTarget};

pub mod pipeline;
pub mod state;

/// Entry point for the `timeline` binary.
pub fn run() -> Result<(), AppError> {
    // We want `timeline` and `timeline -c NGA` to behave like `timeline tui ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of the
    // argv list before parsing.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Tui(args) => handle_tui(args),
        Command::Series(args) => handle_series(args),
        Command::Countries(args) => handle_countries(args),
    }
}

fn handle_tui(args: DashboardArgs) -> Result<(), AppError> {
    let log_file = resolve_log_file(args.log_file.clone());
    match &log_file {
        Some(path) => logging::init(LogTarget::File(path))?,
        None => logging::init(LogTarget::Off)?,
    }
    crate::tui::run(args)
}

fn handle_series(args: SeriesArgs) -> Result<(), AppError> {
    logging::init(LogTarget::Stderr)?;

    let request = pipeline::LoadRequest::from_args(&args.source)?;
    let registry = pipeline::load_registry(&request)?;

    let entity = registry.entity(&args.country).cloned().unwrap_or_else(|| {
        tracing::warn!(code = %args.country, "entity not found in exports");
        Entity {
            code: args.country.clone(),
            name: args.country.clone(),
        }
    });

    let series: Vec<_> = registry
        .indicators()
        .iter()
        .map(|&d| (d, registry.series(d.id, &entity.code)))
        .collect();

    let mut out: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(File::create(path).map_err(|e| {
            AppError::new(2, format!("Failed to create output '{}': {e}", path.display()))
        })?),
        None => Box::new(io::stdout().lock()),
    };

    match args.format {
        OutputFormat::Table => {
            for (descriptor, points) in &series {
                let mut block = crate::report::format_series_table(descriptor, &entity, points);
                if args.plot {
                    block.push_str(&crate::plot::render_series_plot(points, args.width, args.height));
                }
                writeln!(out, "{block}")
                    .map_err(|e| AppError::new(2, format!("Failed to write output: {e}")))?;
            }
        }
        OutputFormat::Csv => {
            let exports = as_exports(&series);
            write_series_csv(&mut out, &entity, &exports)?;
        }
        OutputFormat::Json => {
            let exports = as_exports(&series);
            write_series_json(&mut out, &entity, &exports, chrono::Utc::now())?;
        }
    }

    out.flush()
        .map_err(|e| AppError::new(2, format!("Failed to write output: {e}")))?;
    Ok(())
}

fn handle_countries(args: SourceArgs) -> Result<(), AppError> {
    logging::init(LogTarget::Stderr)?;

    let request = pipeline::LoadRequest::from_args(&args)?;
    let registry = pipeline::load_registry(&request)?;
    let groups = EntityGroups::from_entities(registry.entities());

    print!("{}", crate::report::format_entity_groups(&groups));
    Ok(())
}

fn as_exports<'a>(
    series: &'a [(&'static crate::domain::IndicatorDescriptor, Vec<crate::domain::SeriesPoint>)],
) -> Vec<SeriesExport<'a>> {
    series
        .iter()
        .map(|(descriptor, points)| SeriesExport {
            descriptor,
            series: points,
        })
        .collect()
}

/// `--log-file`, then `TIMELINE_LOG_FILE` (environment or `.env`).
fn resolve_log_file(flag: Option<PathBuf>) -> Option<PathBuf> {
    if flag.is_some() {
        return flag;
    }
    dotenvy::dotenv().ok();
    std::env::var(LOG_FILE_ENV)
        .ok()
        .filter(|s| !s.trim().is_empty())
        .map(PathBuf::from)
}

/// Rewrite argv so `timeline` defaults to `timeline tui`.
///
/// Rules:
/// - `timeline`                      -> `timeline tui`
/// - `timeline -c NGA ...`           -> `timeline tui -c NGA ...`
/// - `timeline --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "tui" | "series" | "countries");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}

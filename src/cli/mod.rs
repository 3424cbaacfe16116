//! Command-line parsing for the economic timeline dashboard.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the parsing/sync code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "timeline",
    version,
    about = "Economic indicator timelines (World Bank exports) with synchronized charts"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Launch the interactive dashboard.
    Tui(DashboardArgs),
    /// Print (or export) one entity's series for the selected indicators.
    Series(SeriesArgs),
    /// List the entities found in the exports.
    Countries(SourceArgs),
}

/// Where the exports live.
#[derive(Debug, Args, Clone)]
pub struct SourceArgs {
    /// Data root: a directory or an http(s) base URL (default: $TIMELINE_DATA or ./Datasets).
    #[arg(short = 'd', long, value_name = "DIR|URL")]
    pub data: Option<String>,

    /// Indicator to include (id, World Bank code, or name). Repeatable; default: all.
    #[arg(short = 'i', long = "indicator", value_name = "ID")]
    pub indicators: Vec<String>,
}

#[derive(Debug, Args, Clone)]
pub struct DashboardArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Entity code selected at startup.
    #[arg(short = 'c', long, value_name = "CODE")]
    pub country: Option<String>,

    /// Write logs to this file (default: $TIMELINE_LOG_FILE; otherwise no logs).
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct SeriesArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Entity code (e.g. NGA, WLD).
    #[arg(short = 'c', long, value_name = "CODE")]
    pub country: String,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Write to a file instead of stdout.
    #[arg(short = 'o', long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Render an ASCII plot under each table.
    #[arg(long)]
    pub plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 80)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 16)]
    pub height: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Csv,
    Json,
}

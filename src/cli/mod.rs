//! Command-line parsing for the World Bank indicator report builder.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the fetch/chart code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::{FetchMode, FigureFormat};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "wbc", version, about = "World Bank indicator chart builder")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch the indicators and print a per-indicator status summary.
    Summary(ReportArgs),
    /// Emit the six chart descriptors as JSON.
    Figures(FiguresArgs),
    /// Print table statistics and optionally export the flattened records.
    Tables(TablesArgs),
    /// Render chart descriptors as ASCII plots.
    ///
    /// Reads a previously exported bundle with `--figures`, otherwise fetches.
    Preview(PreviewArgs),
}

/// Options shared by every command that builds a report.
#[derive(Debug, Parser, Clone)]
pub struct ReportArgs {
    /// Country to include, as NAME=CODE (repeatable; order is kept).
    /// Without any, Yemen, Malawi, Niger, Mozambique and the Central African
    /// Republic are used.
    #[arg(short = 'c', long = "country", value_name = "NAME=CODE", value_parser = parse_country)]
    pub countries: Vec<(String, String)>,

    /// API base URL (overrides WB_API_BASE_URL).
    #[arg(long)]
    pub base_url: Option<String>,

    /// Per-request timeout in seconds (transport default when unset).
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Issue indicator requests one by one or on a worker pool.
    #[arg(long, value_enum, default_value_t = FetchMode::Sequential)]
    pub fetch: FetchMode,

    /// Worker threads for `--fetch parallel`.
    #[arg(long, default_value_t = 5)]
    pub workers: usize,
}

#[derive(Debug, Parser)]
pub struct FiguresArgs {
    #[command(flatten)]
    pub report: ReportArgs,

    /// Write to a file instead of stdout.
    #[arg(long, value_name = "JSON")]
    pub out: Option<PathBuf>,

    /// `neutral` descriptors (re-readable) or plotly.js figures.
    #[arg(long, value_enum, default_value_t = FigureFormat::Neutral)]
    pub format: FigureFormat,
}

#[derive(Debug, Parser)]
pub struct TablesArgs {
    #[command(flatten)]
    pub report: ReportArgs,

    /// Export all flattened records to CSV.
    #[arg(long = "export-csv", value_name = "CSV")]
    pub export_csv: Option<PathBuf>,
}

#[derive(Debug, Parser)]
pub struct PreviewArgs {
    #[command(flatten)]
    pub report: ReportArgs,

    /// Neutral bundle produced by `wbc figures --out`.
    #[arg(long, value_name = "JSON")]
    pub figures: Option<PathBuf>,

    /// Only render chart N (1-based, in report order).
    #[arg(long)]
    pub chart: Option<usize>,

    /// Plot width (columns).
    #[arg(long, default_value_t = 72)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 18)]
    pub height: usize,
}

/// Parse `NAME=CODE`. The last `=` separates the code so names may contain `=`.
pub fn parse_country(raw: &str) -> Result<(String, String), String> {
    let (name, code) = raw
        .rsplit_once('=')
        .ok_or_else(|| format!("expected NAME=CODE, got '{raw}'"))?;
    let (name, code) = (name.trim(), code.trim());
    if name.is_empty() || code.is_empty() {
        return Err(format!("expected NAME=CODE, got '{raw}'"));
    }
    Ok((name.to_string(), code.to_string()))
}

//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - builds the report (fetch, tables, descriptors)
//! - prints summaries/JSON/previews
//! - writes optional exports

use std::time::Duration;

use clap::Parser;

use crate::cli::{Command, FiguresArgs, PreviewArgs, ReportArgs, TablesArgs};
use crate::domain::{ChartDescriptor, CountrySelection, ReportConfig};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `wbc` binary.
pub fn run() -> Result<(), AppError> {
    // `wbc` and `wbc -c Chad=TD` behave like `wbc summary ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Summary(args) => handle_summary(args),
        Command::Figures(args) => handle_figures(args),
        Command::Tables(args) => handle_tables(args),
        Command::Preview(args) => handle_preview(args),
    }
}

fn handle_summary(args: ReportArgs) -> Result<(), AppError> {
    let config = report_config_from_args(&args);
    let out = pipeline::run_report(&config)?;
    println!("{}", crate::report::format_summary(&out));
    Ok(())
}

fn handle_figures(args: FiguresArgs) -> Result<(), AppError> {
    let config = report_config_from_args(&args.report);
    let out = pipeline::run_report(&config)?;
    let bundle = crate::io::figure_bundle(&out.country_order, &out.figures);

    match &args.out {
        Some(path) => {
            crate::io::write_figures_json(path, &bundle, args.format)?;
            log::info!("wrote {} figures to {}", bundle.figures.len(), path.display());
        }
        None => println!("{}", crate::io::figures_to_json(&bundle, args.format)?),
    }
    Ok(())
}

fn handle_tables(args: TablesArgs) -> Result<(), AppError> {
    let config = report_config_from_args(&args.report);
    let out = pipeline::run_report(&config)?;
    println!("{}", crate::report::format_tables(&out));

    if let Some(path) = &args.export_csv {
        crate::io::write_tables_csv(path, &out.tables)?;
        log::info!("wrote flattened records to {}", path.display());
    }
    Ok(())
}

fn handle_preview(args: PreviewArgs) -> Result<(), AppError> {
    let figures = match &args.figures {
        Some(path) => crate::io::read_figures_json(path)?.figures,
        None => {
            let config = report_config_from_args(&args.report);
            pipeline::run_report(&config)?.figures
        }
    };

    for chart in select_charts(&figures, args.chart)? {
        println!("{}", crate::plot::render_ascii_chart(chart, args.width, args.height));
    }
    Ok(())
}

/// All charts, or only the 1-based `chart`.
fn select_charts(figures: &[ChartDescriptor], chart: Option<usize>) -> Result<&[ChartDescriptor], AppError> {
    match chart {
        None => Ok(figures),
        Some(n) if n >= 1 && n <= figures.len() => Ok(&figures[n - 1..n]),
        Some(n) => Err(AppError::new(
            2,
            format!("Chart {n} out of range (1..={}).", figures.len()),
        )),
    }
}

pub fn report_config_from_args(args: &ReportArgs) -> ReportConfig {
    ReportConfig {
        countries: CountrySelection::from_pairs(args.countries.iter().cloned()),
        base_url: args.base_url.clone(),
        timeout: args.timeout_secs.map(Duration::from_secs),
        fetch_mode: args.fetch,
        workers: args.workers,
    }
}

/// Rewrite argv so `wbc` defaults to `wbc summary`.
///
/// Rules:
/// - `wbc`                      -> `wbc summary`
/// - `wbc -c Chad=TD ...`       -> `wbc summary -c Chad=TD ...`
/// - `wbc --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("summary".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(arg1.as_str(), "-h" | "--help" | "-V" | "--version" | "help");
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "summary" | "figures" | "tables" | "preview");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "summary flags".
    if arg1.starts_with('-') {
        argv.insert(1, "summary".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}

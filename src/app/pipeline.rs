//! Shared "report pipeline" logic used by every subcommand.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! country selection -> fetch (per indicator) -> tables -> country order -> descriptors
//!
//! The subcommands can then focus on presentation (summary, JSON, CSV, preview).

use crate::charts::{build_figures, country_order};
use crate::data::{IndicatorFetch, IndicatorSource, IndicatorTables, WorldBankClient, fetch_all};
use crate::domain::{ChartDescriptor, CountrySelection, ReportConfig};
use crate::error::{AppError, FetchError};

/// All computed outputs of a single report build.
#[derive(Debug)]
pub struct ReportOutput {
    /// The selection actually queried (defaults substituted when empty).
    pub countries: CountrySelection,
    /// Per-indicator outcomes in declaration order.
    pub fetches: Vec<IndicatorFetch>,
    pub tables: IndicatorTables,
    pub country_order: Vec<String>,
    pub figures: Vec<ChartDescriptor>,
}

impl ReportOutput {
    pub fn failures(&self) -> impl Iterator<Item = &FetchError> {
        self.fetches.iter().filter_map(|f| f.outcome.as_ref().err())
    }
}

/// Build the report against the live World Bank API.
pub fn run_report(config: &ReportConfig) -> Result<ReportOutput, AppError> {
    let client = WorldBankClient::from_config(config)?;
    run_report_with_source(config, &client)
}

/// Build the report against any indicator source.
///
/// Indicator failures do not fail the build: they surface in
/// `ReportOutput::fetches` and their charts are built from empty tables.
pub fn run_report_with_source<S: IndicatorSource + ?Sized>(
    config: &ReportConfig,
    source: &S,
) -> Result<ReportOutput, AppError> {
    let countries = config.countries.clone().or_defaults();

    let fetches = fetch_all(source, &countries, config.fetch_mode, config.workers)?;
    let tables = IndicatorTables::from_fetches(&fetches);

    let country_order = country_order(&tables, &countries);
    let figures = build_figures(&tables, &country_order);

    Ok(ReportOutput {
        countries,
        fetches,
        tables,
        country_order,
        figures,
    })
}

//! Flattening API observations into per-indicator tables.
//!
//! A fetch that fails is kept as an explicit `Err` in `IndicatorFetch`;
//! `IndicatorTables` then substitutes an empty table so chart building never
//! sees a missing indicator.

use std::cmp::Ordering;

use indexmap::IndexSet;
use rayon::prelude::*;

use crate::data::worldbank::{IndicatorSource, RawObservation, parse_observations};
use crate::domain::{CountrySelection, FetchMode, Indicator, IndicatorRecord, IndicatorTable};
use crate::error::{AppError, FetchError};

/// Outcome of loading one indicator.
#[derive(Debug)]
pub struct IndicatorFetch {
    pub indicator: Indicator,
    pub outcome: Result<IndicatorTable, FetchError>,
}

/// Replace the nested indicator/country objects with their readable names.
pub fn flatten(indicator: Indicator, raw: Vec<RawObservation>) -> IndicatorTable {
    let records = raw
        .into_iter()
        .map(|obs| IndicatorRecord {
            country: obs.country.into_name(),
            indicator: obs.indicator.into_name(),
            date: obs.date,
            value: obs.value,
        })
        .collect();
    IndicatorTable { indicator, records }
}

impl IndicatorTable {
    pub fn empty(indicator: Indicator) -> Self {
        Self {
            indicator,
            records: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Unique country names in first-seen order.
    pub fn countries(&self) -> Vec<String> {
        unique_in_order(self.records.iter().map(|r| r.country.as_str()))
    }

    /// Unique years in first-seen order.
    pub fn years(&self) -> Vec<String> {
        unique_in_order(self.records.iter().map(|r| r.date.as_str()))
    }

    /// `(years, values)` for one country, in response order.
    pub fn series_for(&self, country: &str) -> (Vec<String>, Vec<Option<f64>>) {
        self.records
            .iter()
            .filter(|r| r.country == country)
            .map(|r| (r.date.clone(), r.value))
            .unzip()
    }

    /// Records of `year`, highest value first. Missing values go last and
    /// ties keep response order.
    pub fn ranked_for_year(&self, year: &str) -> Vec<&IndicatorRecord> {
        let mut slice: Vec<&IndicatorRecord> = self.records.iter().filter(|r| r.date == year).collect();
        slice.sort_by(|a, b| match (a.value, b.value) {
            (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });
        slice
    }
}

fn unique_in_order<'a>(items: impl Iterator<Item = &'a str>) -> Vec<String> {
    items.collect::<IndexSet<&str>>().into_iter().map(str::to_string).collect()
}

/// Exactly one table per indicator, in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorTables {
    tables: [IndicatorTable; 5],
}

impl IndicatorTables {
    /// Failed fetches become empty tables.
    pub fn from_fetches(fetches: &[IndicatorFetch]) -> Self {
        let tables = Indicator::ALL.map(|indicator| {
            fetches
                .iter()
                .find(|f| f.indicator == indicator)
                .and_then(|f| f.outcome.as_ref().ok())
                .cloned()
                .unwrap_or_else(|| IndicatorTable::empty(indicator))
        });
        Self { tables }
    }

    /// Build from loose tables; indicators not supplied are empty.
    pub fn from_tables(tables: impl IntoIterator<Item = IndicatorTable>) -> Self {
        let mut out = Indicator::ALL.map(IndicatorTable::empty);
        for table in tables {
            let idx = table.indicator.index();
            out[idx] = table;
        }
        Self { tables: out }
    }

    pub fn get(&self, indicator: Indicator) -> &IndicatorTable {
        &self.tables[indicator.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &IndicatorTable> {
        self.tables.iter()
    }
}

/// Fetch, parse and flatten a single indicator.
pub fn fetch_indicator<S: IndicatorSource + ?Sized>(
    source: &S,
    country_filter: &str,
    indicator: Indicator,
) -> Result<IndicatorTable, FetchError> {
    let body = source.fetch_body(country_filter, indicator)?;
    let raw = parse_observations(indicator, &body)?;
    Ok(flatten(indicator, raw))
}

/// Load all five indicators for `countries`.
///
/// Individual failures are logged and returned as `Err` outcomes; only a
/// worker pool that cannot start is fatal. The result is always in
/// `Indicator::ALL` order.
pub fn fetch_all<S: IndicatorSource + ?Sized>(
    source: &S,
    countries: &CountrySelection,
    mode: FetchMode,
    workers: usize,
) -> Result<Vec<IndicatorFetch>, AppError> {
    let country_filter = countries.country_filter();
    let fetch_one = |indicator: Indicator| {
        let outcome = fetch_indicator(source, &country_filter, indicator);
        match &outcome {
            Ok(table) => log::info!("loaded {} records for {indicator}", table.len()),
            Err(err) => log::error!("could not load data for {indicator}: {err}"),
        }
        IndicatorFetch { indicator, outcome }
    };

    match mode {
        FetchMode::Sequential => Ok(Indicator::ALL.iter().map(|&ind| fetch_one(ind)).collect()),
        FetchMode::Parallel => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(workers.max(1))
                .build()
                .map_err(|e| AppError::new(4, format!("Failed to start fetch worker pool: {e}")))?;
            // Indexed parallel collect keeps input order.
            Ok(pool.install(|| Indicator::ALL[..].par_iter().map(|&ind| fetch_one(ind)).collect()))
        }
    }
}

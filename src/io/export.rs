//! Export flattened indicator records to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream scripts.

use std::path::Path;

use serde::Serialize;

use crate::data::IndicatorTables;
use crate::error::AppError;

#[derive(Serialize)]
struct CsvRow<'a> {
    indicator_code: &'a str,
    indicator: &'a str,
    country: &'a str,
    date: &'a str,
    value: Option<f64>,
}

/// Write every record of every table, in indicator then response order.
/// Missing values are left empty.
pub fn write_tables_csv(path: &Path, tables: &IndicatorTables) -> Result<(), AppError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display())))?;

    // Header
    writer
        .write_record(["indicator_code", "indicator", "country", "date", "value"])
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV header: {e}")))?;

    for table in tables.iter() {
        for r in &table.records {
            writer
                .serialize(CsvRow {
                    indicator_code: table.indicator.code(),
                    indicator: &r.indicator,
                    country: &r.country,
                    date: &r.date,
                    value: r.value,
                })
                .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
        }
    }

    writer
        .flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush export CSV: {e}")))?;
    Ok(())
}

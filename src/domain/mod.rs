//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the fixed indicator set and country selection (`Indicator`, `CountrySelection`)
//! - flattened observations and tables (`IndicatorRecord`, `IndicatorTable`)
//! - chart descriptors (`ChartDescriptor`, `Series`, `ChartLayout`)
//! - run configuration (`ReportConfig`)

pub mod types;

pub use types::*;

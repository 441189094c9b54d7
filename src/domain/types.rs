//! Shared domain types.
//!
//! These types are kept lightweight and serializable so they can be:
//!
//! - passed through the fetch -> table -> chart pipeline
//! - exported to JSON/CSV
//! - reloaded later for previews

use std::time::Duration;

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Countries used when the caller does not select any.
pub const DEFAULT_COUNTRIES: [(&str, &str); 5] = [
    ("Yemen", "YE"),
    ("Malawi", "MW"),
    ("Niger", "NE"),
    ("Mozambique", "MZ"),
    ("Central African Republic", "CF"),
];

/// The fixed set of World Bank indicators a report is built from.
///
/// Declaration order matters: tables, fetch results and the canonical
/// country order all follow `Indicator::ALL`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Indicator {
    AgriImports,
    AgriExports,
    ExportValueIndex,
    ImportValueIndex,
    Undernourishment,
}

impl Indicator {
    pub const ALL: [Indicator; 5] = [
        Indicator::AgriImports,
        Indicator::AgriExports,
        Indicator::ExportValueIndex,
        Indicator::ImportValueIndex,
        Indicator::Undernourishment,
    ];

    /// World Bank indicator code.
    pub fn code(self) -> &'static str {
        match self {
            Indicator::AgriImports => "TM.VAL.AGRI.ZS.UN",
            Indicator::AgriExports => "TX.VAL.AGRI.ZS.UN",
            Indicator::ExportValueIndex => "TX.VAL.MRCH.XD.WD",
            Indicator::ImportValueIndex => "TM.VAL.MRCH.XD.WD",
            Indicator::Undernourishment => "SN.ITK.DEFC.ZS",
        }
    }

    /// Human-readable label for terminal output.
    pub fn label(self) -> &'static str {
        match self {
            Indicator::AgriImports => "Agricultural raw materials imports",
            Indicator::AgriExports => "Agricultural raw materials exports",
            Indicator::ExportValueIndex => "Export value index",
            Indicator::ImportValueIndex => "Import value index",
            Indicator::Undernourishment => "Prevalence of undernourishment",
        }
    }

    /// Position in `Indicator::ALL`.
    pub fn index(self) -> usize {
        match self {
            Indicator::AgriImports => 0,
            Indicator::AgriExports => 1,
            Indicator::ExportValueIndex => 2,
            Indicator::ImportValueIndex => 3,
            Indicator::Undernourishment => 4,
        }
    }
}

impl std::fmt::Display for Indicator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Ordered mapping of country display name -> country code.
///
/// Insertion order is preserved; re-inserting a name replaces its code but
/// keeps its original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountrySelection {
    entries: IndexMap<String, String>,
}

impl CountrySelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// The five default countries, in their fixed order.
    pub fn defaults() -> Self {
        Self::from_pairs(DEFAULT_COUNTRIES)
    }

    pub fn from_pairs<I, N, C>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (N, C)>,
        N: Into<String>,
        C: Into<String>,
    {
        let mut selection = Self::new();
        for (name, code) in pairs {
            selection.insert(name, code);
        }
        selection
    }

    pub fn insert(&mut self, name: impl Into<String>, code: impl Into<String>) {
        self.entries.insert(name.into(), code.into());
    }

    /// Substitute the defaults when nothing was selected.
    pub fn or_defaults(self) -> Self {
        if self.is_empty() { Self::defaults() } else { self }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, c)| (n.as_str(), c.as_str()))
    }

    /// Display names in insertion order.
    pub fn names(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    /// Lower-cased codes joined with `;`, as the API expects.
    pub fn country_filter(&self) -> String {
        self.entries
            .values()
            .map(|code| code.to_lowercase())
            .collect::<Vec<_>>()
            .join(";")
    }
}

/// One flattened observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorRecord {
    pub country: String,
    pub indicator: String,
    /// Year as reported by the API (e.g. `"2015"`).
    pub date: String,
    /// `None` when the source has no observation for that year.
    pub value: Option<f64>,
}

/// All records of one indicator, in API response order.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorTable {
    pub indicator: Indicator,
    pub records: Vec<IndicatorRecord>,
}

/// Chart type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Line,
    Bar,
}

/// One named series: x and y have the same length and order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub x: Vec<String>,
    pub y: Vec<Option<f64>>,
}

/// Manual tick placement (`autotick` off) for one axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TickSpec {
    pub tick0: f64,
    pub dtick: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisSpec {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticks: Option<TickSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartLayout {
    pub title: String,
    pub x_axis: AxisSpec,
    pub y_axis: AxisSpec,
    pub width: u32,
    pub height: u32,
}

/// A renderer-independent chart description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDescriptor {
    pub kind: ChartKind,
    pub series: Vec<Series>,
    pub layout: ChartLayout,
}

/// Portable export of a report's descriptors.
///
/// Written by `wbc figures --format neutral` and read back by `wbc preview`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FigureBundle {
    pub tool: String,
    pub generated_at: DateTime<Utc>,
    /// Canonical country order used by the per-country charts.
    pub countries: Vec<String>,
    pub figures: Vec<ChartDescriptor>,
}

/// How the five indicator requests are issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FetchMode {
    /// One request after another on the calling thread.
    Sequential,
    /// Fan out on a bounded worker pool; results keep declaration order.
    Parallel,
}

/// JSON shape used when exporting descriptors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FigureFormat {
    /// `ChartDescriptor` as-is (can be re-read by `wbc preview`).
    Neutral,
    /// plotly.js `{data, layout}` figures.
    Plotly,
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus environment and defaults).
#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub countries: CountrySelection,
    /// Overrides `WB_API_BASE_URL` and the built-in default.
    pub base_url: Option<String>,
    pub timeout: Option<Duration>,
    pub fetch_mode: FetchMode,
    pub workers: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            countries: CountrySelection::defaults(),
            base_url: None,
            timeout: None,
            fetch_mode: FetchMode::Sequential,
            workers: Indicator::ALL.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_selection_falls_back_to_defaults_verbatim() {
        let resolved = CountrySelection::new().or_defaults();
        let pairs: Vec<(&str, &str)> = resolved.iter().collect();
        assert_eq!(pairs, DEFAULT_COUNTRIES.to_vec());
    }

    #[test]
    fn non_empty_selection_is_kept() {
        let selection = CountrySelection::from_pairs([("Chad", "TD")]);
        assert_eq!(selection.clone().or_defaults(), selection);
    }

    #[test]
    fn country_filter_lowercases_in_insertion_order() {
        assert_eq!(CountrySelection::defaults().country_filter(), "ye;mw;ne;mz;cf");

        let selection = CountrySelection::from_pairs([("Brazil", "BR"), ("United States", "US")]);
        assert_eq!(selection.country_filter(), "br;us");
    }

    #[test]
    fn reinserting_a_name_keeps_its_position() {
        let mut selection = CountrySelection::from_pairs([("Niger", "NE"), ("Chad", "TD")]);
        selection.insert("Niger", "NER");
        assert_eq!(selection.names(), vec!["Niger".to_string(), "Chad".to_string()]);
        assert_eq!(selection.country_filter(), "ner;td");
    }

    #[test]
    fn indicator_index_matches_declaration_order() {
        for (i, indicator) in Indicator::ALL.iter().enumerate() {
            assert_eq!(indicator.index(), i);
        }
        assert_eq!(Indicator::ALL[0].code(), "TM.VAL.AGRI.ZS.UN");
        assert_eq!(Indicator::ALL[4].to_string(), "SN.ITK.DEFC.ZS");
    }
}

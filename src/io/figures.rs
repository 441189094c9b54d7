//! Read/write figure bundle JSON.
//!
//! The neutral format is `domain::FigureBundle` and round-trips; the plotly
//! format is a bare array of plotly.js figures for the dashboard.

use std::fs::File;
use std::path::Path;

use chrono::Utc;
use serde_json::Value;

use crate::domain::{ChartDescriptor, FigureBundle, FigureFormat};
use crate::error::AppError;

pub fn figure_bundle(countries: &[String], figures: &[ChartDescriptor]) -> FigureBundle {
    FigureBundle {
        tool: "wbc".to_string(),
        generated_at: Utc::now(),
        countries: countries.to_vec(),
        figures: figures.to_vec(),
    }
}

/// Pretty-printed JSON for `bundle` in the requested format.
pub fn figures_to_json(bundle: &FigureBundle, format: FigureFormat) -> Result<String, AppError> {
    let out = match format {
        FigureFormat::Neutral => serde_json::to_string_pretty(bundle),
        FigureFormat::Plotly => {
            let figures: Vec<Value> = bundle.figures.iter().map(ChartDescriptor::to_plotly).collect();
            serde_json::to_string_pretty(&figures)
        }
    };
    out.map_err(|e| AppError::new(2, format!("Failed to serialize figures: {e}")))
}

pub fn write_figures_json(path: &Path, bundle: &FigureBundle, format: FigureFormat) -> Result<(), AppError> {
    let json = figures_to_json(bundle, format)?;
    std::fs::write(path, json)
        .map_err(|e| AppError::new(2, format!("Failed to write figures JSON '{}': {e}", path.display())))
}

/// Read a neutral bundle written by `write_figures_json`.
pub fn read_figures_json(path: &Path) -> Result<FigureBundle, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open figures JSON '{}': {e}", path.display())))?;
    serde_json::from_reader(file).map_err(|e| AppError::new(2, format!("Invalid figures JSON: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AxisSpec, ChartKind, ChartLayout, Series};

    fn bundle() -> FigureBundle {
        let figure = ChartDescriptor {
            kind: ChartKind::Bar,
            series: vec![Series {
                name: None,
                x: vec!["Yemen".to_string(), "Niger".to_string()],
                y: vec![Some(26.1), None],
            }],
            layout: ChartLayout {
                title: "Prevalence of Malnutrition in 2015".to_string(),
                x_axis: AxisSpec {
                    title: "Country".to_string(),
                    ticks: None,
                },
                y_axis: AxisSpec {
                    title: "% of population".to_string(),
                    ticks: None,
                },
                width: 600,
                height: 500,
            },
        };
        figure_bundle(&["Yemen".to_string(), "Niger".to_string()], &[figure])
    }

    #[test]
    fn neutral_bundle_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("figures.json");
        let original = bundle();

        write_figures_json(&path, &original, FigureFormat::Neutral).unwrap();
        let loaded = read_figures_json(&path).unwrap();

        assert_eq!(loaded, original);
        assert_eq!(loaded.tool, "wbc");
    }

    #[test]
    fn plotly_format_is_an_array_of_figures() {
        let json = figures_to_json(&bundle(), FigureFormat::Plotly).unwrap();
        let parsed: Value = serde_json::from_str(&json).unwrap();
        let figures = parsed.as_array().unwrap();
        assert_eq!(figures.len(), 1);
        assert_eq!(figures[0]["data"][0]["type"], "bar");
        assert_eq!(figures[0]["layout"]["title"], "Prevalence of Malnutrition in 2015");
    }

    #[test]
    fn invalid_json_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "[1, 2").unwrap();
        let err = read_figures_json(&path).unwrap_err();
        assert!(err.to_string().starts_with("Invalid figures JSON"));
    }
}

//! Turning indicator tables into the six report charts.

use crate::data::IndicatorTables;
use crate::domain::{
    AxisSpec, ChartDescriptor, ChartKind, ChartLayout, CountrySelection, Indicator, IndicatorTable, Series, TickSpec,
};

/// Year used for the single-period ranking chart (end of the query window).
pub const RANKING_YEAR: &str = "2015";

pub const CANVAS_WIDTH: u32 = 600;
pub const CANVAS_HEIGHT: u32 = 500;

const YEAR_TICKS: TickSpec = TickSpec { tick0: 2000.0, dtick: 1.0 };

/// Number of descriptors `build_figures` returns.
pub const FIGURE_COUNT: usize = 6;

struct TimeSeriesPlan {
    indicator: Indicator,
    kind: ChartKind,
    title: &'static str,
    y_title: &'static str,
    y_ticks: Option<TickSpec>,
}

// Per-country charts, in output order.
const TIME_SERIES: [TimeSeriesPlan; 5] = [
    TimeSeriesPlan {
        indicator: Indicator::AgriImports,
        kind: ChartKind::Line,
        title: "Agricultural Raw Materials Imports",
        y_title: "% of merchandise imports",
        y_ticks: Some(TickSpec { tick0: 0.0, dtick: 5.0 }),
    },
    TimeSeriesPlan {
        indicator: Indicator::ImportValueIndex,
        kind: ChartKind::Bar,
        title: "Import Value Index (2000 = 100)",
        y_title: "value (thousand)",
        y_ticks: None,
    },
    TimeSeriesPlan {
        indicator: Indicator::AgriExports,
        kind: ChartKind::Line,
        title: "Agricultural Raw Materials Exports",
        y_title: "% of merchandise exports",
        y_ticks: None,
    },
    TimeSeriesPlan {
        indicator: Indicator::ExportValueIndex,
        kind: ChartKind::Bar,
        title: "Export Value Index (2000 = 100)",
        y_title: "value (thousand)",
        y_ticks: None,
    },
    TimeSeriesPlan {
        indicator: Indicator::Undernourishment,
        kind: ChartKind::Bar,
        title: "Prevalence of Undernourishment",
        y_title: "% of population",
        y_ticks: None,
    },
];

/// Canonical country order shared by every per-country chart.
///
/// This is the first-seen order of countries in the first indicator's
/// table (agricultural imports), not the order of the selection. When that
/// table is empty, the selection's display names are used instead.
pub fn country_order(tables: &IndicatorTables, fallback: &CountrySelection) -> Vec<String> {
    let from_first = tables.get(Indicator::ALL[0]).countries();
    if from_first.is_empty() {
        fallback.names()
    } else {
        from_first
    }
}

/// Build the six descriptors in their fixed order: imports (line), import
/// index (bar), exports (line), export index (bar), undernourishment by year
/// (bar), undernourishment ranking (bar).
///
/// Empty tables still produce a descriptor so positions never shift.
pub fn build_figures(tables: &IndicatorTables, countries: &[String]) -> Vec<ChartDescriptor> {
    let mut figures: Vec<ChartDescriptor> = TIME_SERIES
        .iter()
        .map(|plan| time_series_chart(tables.get(plan.indicator), countries, plan))
        .collect();
    figures.push(ranking_chart(tables.get(Indicator::Undernourishment), RANKING_YEAR));
    figures
}

fn time_series_chart(table: &IndicatorTable, countries: &[String], plan: &TimeSeriesPlan) -> ChartDescriptor {
    let series = countries
        .iter()
        .map(|country| {
            let (x, y) = table.series_for(country);
            Series {
                name: Some(country.clone()),
                x,
                y,
            }
        })
        .collect();

    ChartDescriptor {
        kind: plan.kind,
        series,
        layout: layout(
            plan.title.to_string(),
            AxisSpec {
                title: "Year".to_string(),
                ticks: Some(YEAR_TICKS),
            },
            AxisSpec {
                title: plan.y_title.to_string(),
                ticks: plan.y_ticks,
            },
        ),
    }
}

/// Single bar series: one bar per country for `year`, highest first.
fn ranking_chart(table: &IndicatorTable, year: &str) -> ChartDescriptor {
    let (x, y) = table
        .ranked_for_year(year)
        .into_iter()
        .map(|r| (r.country.clone(), r.value))
        .unzip();

    ChartDescriptor {
        kind: ChartKind::Bar,
        series: vec![Series { name: None, x, y }],
        layout: layout(
            format!("Prevalence of Malnutrition in {year}"),
            AxisSpec {
                title: "Country".to_string(),
                ticks: None,
            },
            AxisSpec {
                title: "% of population".to_string(),
                ticks: None,
            },
        ),
    }
}

fn layout(title: String, x_axis: AxisSpec, y_axis: AxisSpec) -> ChartLayout {
    ChartLayout {
        title,
        x_axis,
        y_axis,
        width: CANVAS_WIDTH,
        height: CANVAS_HEIGHT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::IndicatorRecord;

    fn record(indicator: Indicator, country: &str, date: &str, value: Option<f64>) -> IndicatorRecord {
        IndicatorRecord {
            country: country.to_string(),
            indicator: indicator.label().to_string(),
            date: date.to_string(),
            value,
        }
    }

    fn table(indicator: Indicator, rows: &[(&str, &str, Option<f64>)]) -> IndicatorTable {
        IndicatorTable {
            indicator,
            records: rows
                .iter()
                .map(|&(c, d, v)| record(indicator, c, d, v))
                .collect(),
        }
    }

    fn sample_tables() -> IndicatorTables {
        let rows = [
            ("Niger", "2015", Some(1.0)),
            ("Niger", "2014", Some(2.0)),
            ("Yemen", "2015", Some(3.0)),
            ("Yemen", "2014", None),
        ];
        let under = [
            ("Yemen", "2015", Some(30.0)),
            ("Yemen", "2014", Some(28.0)),
            ("Niger", "2015", Some(12.5)),
            ("Niger", "2014", Some(11.0)),
            ("Chad", "2015", Some(40.0)),
        ];
        IndicatorTables::from_tables(
            Indicator::ALL[..4]
                .iter()
                .map(|&ind| table(ind, &rows))
                .chain([table(Indicator::Undernourishment, &under)]),
        )
    }

    #[test]
    fn country_order_comes_from_first_indicator() {
        let tables = sample_tables();
        let selection = CountrySelection::from_pairs([("Yemen", "YE"), ("Niger", "NE")]);
        assert_eq!(country_order(&tables, &selection), vec!["Niger", "Yemen"]);
    }

    #[test]
    fn country_order_falls_back_to_selection_when_first_table_empty() {
        let tables = IndicatorTables::from_tables([table(
            Indicator::Undernourishment,
            &[("Chad", "2015", Some(1.0))],
        )]);
        let selection = CountrySelection::defaults();
        assert_eq!(country_order(&tables, &selection), selection.names());
    }

    #[test]
    fn figures_have_fixed_kinds_titles_and_canvas() {
        let tables = sample_tables();
        let countries = vec!["Niger".to_string(), "Yemen".to_string()];
        let figures = build_figures(&tables, &countries);
        assert_eq!(figures.len(), FIGURE_COUNT);

        let kinds: Vec<ChartKind> = figures.iter().map(|f| f.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ChartKind::Line,
                ChartKind::Bar,
                ChartKind::Line,
                ChartKind::Bar,
                ChartKind::Bar,
                ChartKind::Bar
            ]
        );

        let titles: Vec<&str> = figures.iter().map(|f| f.layout.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "Agricultural Raw Materials Imports",
                "Import Value Index (2000 = 100)",
                "Agricultural Raw Materials Exports",
                "Export Value Index (2000 = 100)",
                "Prevalence of Undernourishment",
                "Prevalence of Malnutrition in 2015",
            ]
        );

        for fig in &figures {
            assert_eq!((fig.layout.width, fig.layout.height), (600, 500));
        }
        for fig in &figures[..5] {
            assert_eq!(fig.layout.x_axis.title, "Year");
            assert_eq!(fig.layout.x_axis.ticks, Some(TickSpec { tick0: 2000.0, dtick: 1.0 }));
        }
        assert_eq!(figures[0].layout.y_axis.ticks, Some(TickSpec { tick0: 0.0, dtick: 5.0 }));
        assert_eq!(figures[5].layout.x_axis.title, "Country");
    }

    #[test]
    fn per_country_series_share_order_and_values() {
        let tables = sample_tables();
        let countries = vec!["Niger".to_string(), "Yemen".to_string()];
        let figures = build_figures(&tables, &countries);

        for fig in &figures[..5] {
            let names: Vec<Option<&str>> = fig.series.iter().map(|s| s.name.as_deref()).collect();
            assert_eq!(names, vec![Some("Niger"), Some("Yemen")]);
        }

        let yemen = &figures[0].series[1];
        assert_eq!(yemen.x, vec!["2015", "2014"]);
        assert_eq!(yemen.y, vec![Some(3.0), None]);

        // Chad only appears in the undernourishment table, so it has no
        // per-country series.
        assert!(figures[4].series.iter().all(|s| s.name.as_deref() != Some("Chad")));
    }

    #[test]
    fn ranking_chart_is_single_series_sorted_descending() {
        let figures = build_figures(&sample_tables(), &["Niger".to_string()]);
        let ranking = &figures[5];
        assert_eq!(ranking.series.len(), 1);
        assert_eq!(ranking.series[0].name, None);
        assert_eq!(ranking.series[0].x, vec!["Chad", "Yemen", "Niger"]);
        assert_eq!(ranking.series[0].y, vec![Some(40.0), Some(30.0), Some(12.5)]);
    }

    #[test]
    fn empty_tables_still_yield_six_descriptors() {
        let tables = IndicatorTables::from_tables(Vec::new());
        let countries = vec!["Yemen".to_string()];
        let figures = build_figures(&tables, &countries);
        assert_eq!(figures.len(), FIGURE_COUNT);
        assert!(figures[0].series[0].x.is_empty());
        assert!(figures[5].series[0].x.is_empty());
    }
}

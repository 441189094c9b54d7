//! Formatted terminal output for report runs.
//!
//! We keep formatting code in one place so:
//! - the fetch/chart code stays clean and testable
//! - output changes are localized

use crate::app::pipeline::ReportOutput;
use crate::charts::RANKING_YEAR;
use crate::data::IndicatorFetch;
use crate::domain::{Indicator, IndicatorTable};

/// Full run summary: selection, per-indicator status, country order, ranking.
pub fn format_summary(out: &ReportOutput) -> String {
    let mut s = String::new();

    s.push_str("=== wbc - World Bank indicator report ===\n");
    let selected: Vec<String> = out
        .countries
        .iter()
        .map(|(name, code)| format!("{name} ({})", code.to_lowercase()))
        .collect();
    s.push_str(&format!("Countries: {}\n", selected.join(", ")));
    s.push_str(&format!("Filter: {}\n", out.countries.country_filter()));

    s.push_str("\nIndicators:\n");
    s.push_str(&format_fetch_table(&out.fetches));

    s.push_str(&format!("\nChart country order: {}\n", out.country_order.join(", ")));

    s.push_str(&format!(
        "\n{}, {RANKING_YEAR} (highest first):\n",
        Indicator::Undernourishment.label()
    ));
    s.push_str(&format_ranking(out.tables.get(Indicator::Undernourishment)));

    s
}

/// Per-table statistics (records, countries, year span, missing values).
pub fn format_tables(out: &ReportOutput) -> String {
    let mut s = String::new();
    s.push_str(
        format!(
            "{:<20} {:<36} {:>7} {:>9} {:<11} {:>7}\n",
            "code", "indicator", "records", "countries", "years", "missing"
        )
        .trim_end(),
    );
    s.push('\n');
    s.push_str(format!("{:-<20} {:-<36} {:-<7} {:-<9} {:-<11} {:-<7}\n", "", "", "", "", "", "").trim_end());
    s.push('\n');

    for table in out.tables.iter() {
        let missing = table.records.iter().filter(|r| r.value.is_none()).count();
        s.push_str(
            format!(
                "{:<20} {:<36} {:>7} {:>9} {:<11} {:>7}\n",
                table.indicator.code(),
                truncate(table.indicator.label(), 36),
                table.len(),
                table.countries().len(),
                year_span(table),
                missing,
            )
            .trim_end(),
        );
        s.push('\n');
    }

    s
}

fn format_fetch_table(fetches: &[IndicatorFetch]) -> String {
    let mut s = String::new();
    s.push_str(format!("{:<20} {:>7} {:>9} {}\n", "code", "records", "countries", "status").trim_end());
    s.push('\n');
    s.push_str(format!("{:-<20} {:-<7} {:-<9} {:-<6}\n", "", "", "", "").trim_end());
    s.push('\n');

    for fetch in fetches {
        let line = match &fetch.outcome {
            Ok(table) => format!(
                "{:<20} {:>7} {:>9} ok",
                fetch.indicator.code(),
                table.len(),
                table.countries().len()
            ),
            Err(err) => format!("{:<20} {:>7} {:>9} FAILED: {err}", fetch.indicator.code(), "-", "-"),
        };
        s.push_str(line.trim_end());
        s.push('\n');
    }
    s
}

fn format_ranking(table: &IndicatorTable) -> String {
    let ranked = table.ranked_for_year(RANKING_YEAR);
    if ranked.is_empty() {
        return "  (no observations)\n".to_string();
    }

    let mut s = String::new();
    for (i, r) in ranked.iter().enumerate() {
        let value = r.value.map(|v| format!("{v:.2}")).unwrap_or_else(|| "-".to_string());
        s.push_str(&format!("{:>3}. {:<28} {:>8}\n", i + 1, truncate(&r.country, 28), value));
    }
    s
}

fn year_span(table: &IndicatorTable) -> String {
    let years = table.years();
    match (years.iter().min(), years.iter().max()) {
        (Some(lo), Some(hi)) => format!("{lo}-{hi}"),
        _ => "-".to_string(),
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('.');
    out
}

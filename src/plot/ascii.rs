//! ASCII plotting of chart descriptors for terminal previews.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks before the dashboard picks the JSON up
//! - deterministic output (helpful for golden tests)
//!
//! Each series gets its own glyph; line charts connect consecutive
//! observations, bar charts draw a column from zero. Missing values leave
//! a gap.

use indexmap::IndexSet;

use crate::domain::{ChartDescriptor, ChartKind};

const GLYPHS: [char; 6] = ['#', '*', 'o', '+', 'x', '@'];

/// Render one descriptor into a `width` x `height` character grid plus a
/// header line and, when series are named, a legend line.
pub fn render_ascii_chart(chart: &ChartDescriptor, width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);
    let layout = &chart.layout;

    let categories = x_categories(chart);
    let mut out = String::new();
    if categories.is_empty() {
        out.push_str(&format!("{} | (no data)\n", layout.title));
        return out;
    }

    let (y_min, y_max) = y_range(chart).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = match chart.kind {
        ChartKind::Bar => (y_min.min(0.0), y_max.max(0.0)),
        ChartKind::Line => (y_min, y_max),
    };
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];
    let baseline = map_y(0.0, y_min, y_max, height);

    for (idx, series) in chart.series.iter().enumerate() {
        let glyph = GLYPHS[idx % GLYPHS.len()];

        // (column, row) per category, None where the value is missing.
        let mut cells: Vec<(usize, Option<usize>)> = series
            .x
            .iter()
            .zip(&series.y)
            .filter_map(|(x, y)| {
                let pos = categories.iter().position(|c| c == x)?;
                let col = map_x(pos, categories.len(), width);
                Some((col, y.map(|v| map_y(v, y_min, y_max, height))))
            })
            .collect();
        cells.sort_by_key(|&(col, _)| col);

        match chart.kind {
            ChartKind::Line => {
                let mut prev: Option<(usize, usize)> = None;
                for &(col, row) in &cells {
                    match row {
                        Some(row) => {
                            match prev {
                                Some((c0, r0)) => draw_line(&mut grid, c0, r0, col, row, glyph),
                                None => grid[row][col] = glyph,
                            }
                            prev = Some((col, row));
                        }
                        None => prev = None,
                    }
                }
            }
            ChartKind::Bar => {
                for &(col, row) in &cells {
                    if let Some(row) = row {
                        let (top, bottom) = if row <= baseline { (row, baseline) } else { (baseline, row) };
                        for line in grid.iter_mut().take(bottom + 1).skip(top) {
                            line[col] = glyph;
                        }
                    }
                }
            }
        }
    }

    out.push_str(&format!(
        "{} | x: {} [{} .. {}] | y: {} [{y_min:.2}, {y_max:.2}]\n",
        layout.title,
        layout.x_axis.title,
        categories[0],
        categories[categories.len() - 1],
        layout.y_axis.title,
    ));

    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    let legend: Vec<String> = chart
        .series
        .iter()
        .enumerate()
        .filter_map(|(idx, s)| {
            s.name
                .as_ref()
                .map(|name| format!("{} {name}", GLYPHS[idx % GLYPHS.len()]))
        })
        .collect();
    if !legend.is_empty() {
        out.push_str(&legend.join("  "));
        out.push('\n');
    }

    out
}

/// Distinct x values across all series. Year-like axes are sorted
/// ascending; anything else keeps first-seen order.
fn x_categories(chart: &ChartDescriptor) -> Vec<String> {
    let cats: Vec<String> = chart
        .series
        .iter()
        .flat_map(|s| s.x.iter().cloned())
        .collect::<IndexSet<String>>()
        .into_iter()
        .collect();

    let numeric: Option<Vec<i64>> = cats.iter().map(|c| c.parse::<i64>().ok()).collect();
    if let Some(keys) = numeric {
        let mut keyed: Vec<(i64, String)> = keys.into_iter().zip(cats).collect();
        keyed.sort_by_key(|(k, _)| *k);
        return keyed.into_iter().map(|(_, c)| c).collect();
    }
    cats
}

fn y_range(chart: &ChartDescriptor) -> Option<(f64, f64)> {
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for v in chart.series.iter().flat_map(|s| s.y.iter().flatten()) {
        min_y = min_y.min(*v);
        max_y = max_y.max(*v);
    }

    if min_y.is_finite() && max_y.is_finite() && max_y > min_y {
        Some((min_y, max_y))
    } else if min_y.is_finite() {
        // Single distinct value: centre it.
        Some((min_y - 1.0, min_y + 1.0))
    } else {
        None
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(idx: usize, n: usize, width: usize) -> usize {
    if n <= 1 {
        return (width - 1) / 2;
    }
    let u = idx as f64 / (n as f64 - 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

/// Integer line drawing (Bresenham-ish).
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0 && (y0 as usize) < grid.len() && x0 >= 0 && (x0 as usize) < grid[0].len() {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AxisSpec, ChartLayout, Series};

    fn chart(kind: ChartKind, series: Vec<Series>, x_title: &str) -> ChartDescriptor {
        ChartDescriptor {
            kind,
            series,
            layout: ChartLayout {
                title: "T".to_string(),
                x_axis: AxisSpec {
                    title: x_title.to_string(),
                    ticks: None,
                },
                y_axis: AxisSpec {
                    title: "V".to_string(),
                    ticks: None,
                },
                width: 600,
                height: 500,
            },
        }
    }

    fn series(name: Option<&str>, points: &[(&str, Option<f64>)]) -> Series {
        Series {
            name: name.map(str::to_string),
            x: points.iter().map(|(x, _)| x.to_string()).collect(),
            y: points.iter().map(|(_, y)| *y).collect(),
        }
    }

    #[test]
    fn bar_golden_snapshot_small() {
        let c = chart(
            ChartKind::Bar,
            vec![series(None, &[("B", Some(4.0)), ("A", Some(2.0))])],
            "Country",
        );
        let txt = render_ascii_chart(&c, 10, 5);
        let expected = concat!(
            "T | x: Country [B .. A] | y: V [-0.20, 4.20]\n",
            "#         \n",
            "#         \n",
            "#        #\n",
            "#        #\n",
            "#        #\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn line_years_sort_ascending_and_flat_line_spans_width() {
        let c = chart(
            ChartKind::Line,
            vec![
                series(Some("Yemen"), &[("2015", Some(5.0)), ("2014", Some(5.0)), ("2013", Some(5.0))]),
                series(Some("Niger"), &[("2015", None)]),
            ],
            "Year",
        );
        let txt = render_ascii_chart(&c, 10, 5);
        let lines: Vec<&str> = txt.lines().collect();

        assert_eq!(lines[0], "T | x: Year [2013 .. 2015] | y: V [3.90, 6.10]");
        assert_eq!(lines[3], "##########");
        assert_eq!(lines.last().copied(), Some("# Yemen  * Niger"));
        assert_eq!(lines.len(), 1 + 5 + 1);
    }

    #[test]
    fn missing_values_break_lines() {
        let c = chart(
            ChartKind::Line,
            vec![series(
                Some("A"),
                &[("2000", Some(1.0)), ("2001", None), ("2002", Some(1.0))],
            )],
            "Year",
        );
        let txt = render_ascii_chart(&c, 11, 5);
        let row = txt.lines().nth(3).unwrap();
        assert_eq!(row, "#         #");
    }

    #[test]
    fn empty_chart_says_no_data() {
        let c = chart(ChartKind::Bar, vec![series(Some("A"), &[])], "Year");
        assert_eq!(render_ascii_chart(&c, 10, 5), "T | (no data)\n");
    }

    #[test]
    fn categories_are_unique_across_series() {
        let names = chart(
            ChartKind::Bar,
            vec![
                series(Some("a"), &[("Niger", Some(1.0)), ("Chad", Some(2.0))]),
                series(Some("b"), &[("Chad", Some(3.0)), ("Yemen", None), ("Niger", None)]),
            ],
            "Country",
        );
        assert_eq!(x_categories(&names), vec!["Niger", "Chad", "Yemen"]);

        let years = chart(
            ChartKind::Line,
            vec![
                series(Some("a"), &[("2015", Some(1.0)), ("2013", Some(2.0))]),
                series(Some("b"), &[("2014", Some(3.0)), ("2015", Some(4.0))]),
            ],
            "Year",
        );
        assert_eq!(x_categories(&years), vec!["2013", "2014", "2015"]);
    }
}

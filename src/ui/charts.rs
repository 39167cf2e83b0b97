use std::collections::BTreeMap;

use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, GridMark, Legend, Line, Plot, PlotPoints, Points};

use crate::color::generate_palette;
use crate::data::model::{COL_FUNDING, COL_INNOVATION, StartupRecord};
use crate::state::AppState;

const CHART_HEIGHT: f32 = 320.0;

/// Largest scatter marker, used for the biggest employer in view.
const MAX_MARKER_RADIUS: f32 = 16.0;
const MIN_MARKER_RADIUS: f32 = 2.5;

// ---------------------------------------------------------------------------
// Funding by startup (bar chart, grouped by region)
// ---------------------------------------------------------------------------

pub fn funding_bar_chart(ui: &mut Ui, state: &AppState) {
    ui.strong("Funding by Startup");

    let rows: Vec<&StartupRecord> = state
        .visible_indices
        .iter()
        .map(|&i| &state.table.records[i])
        .collect();
    let (names, layout) = bar_layout(rows.iter().map(|r| (r.name.as_str(), r.funding)));

    let mut by_region: BTreeMap<&str, Vec<Bar>> = BTreeMap::new();
    for (rec, (pos, base)) in rows.iter().zip(layout) {
        if rec.funding.is_nan() {
            continue;
        }
        by_region.entry(rec.region.as_str()).or_default().push(
            Bar::new(pos as f64, rec.funding)
                .base_offset(base)
                .name(&rec.name)
                .width(0.7),
        );
    }

    Plot::new("funding_by_startup")
        .legend(Legend::default())
        .height(CHART_HEIGHT)
        .y_axis_label(COL_FUNDING)
        .x_axis_formatter(move |mark: GridMark, _range| category_label(&names, mark.value))
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for (region, bars) in by_region {
                let chart = BarChart::new(bars)
                    .name(region)
                    .color(state.region_colors.color_for(region))
                    .element_formatter(Box::new(|bar: &Bar, _chart: &BarChart| {
                        format!("{}\n{:.2} M$", bar.name, bar.value)
                    }));
                plot_ui.bar_chart(chart);
            }
        });
}

/// One category per distinct startup name, in first-seen order.
///
/// Returns the category names and, per input row, its category position
/// and the height already stacked there by earlier rows. Missing (`NaN`)
/// values keep their category but add no height.
fn bar_layout<'a>(
    rows: impl IntoIterator<Item = (&'a str, f64)>,
) -> (Vec<String>, Vec<(usize, f64)>) {
    let mut names: Vec<String> = Vec::new();
    let mut stacked: Vec<f64> = Vec::new();
    let mut layout = Vec::new();

    for (name, value) in rows {
        let pos = match names.iter().position(|n| n == name) {
            Some(pos) => pos,
            None => {
                names.push(name.to_string());
                stacked.push(0.0);
                names.len() - 1
            }
        };
        layout.push((pos, stacked[pos]));
        if !value.is_nan() {
            stacked[pos] += value;
        }
    }
    (names, layout)
}

/// Axis text for a categorical position; blank between categories.
fn category_label(names: &[String], value: f64) -> String {
    let pos = value.round();
    if (value - pos).abs() > 1e-6 || pos < 0.0 {
        return String::new();
    }
    names.get(pos as usize).cloned().unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Funding vs revenue (scatter sized by employees)
// ---------------------------------------------------------------------------

pub fn funding_revenue_scatter(ui: &mut Ui, state: &AppState) {
    ui.strong("Funding vs Revenue (Startup Performance)");

    let table = &state.table;
    let max_employees = state
        .visible_indices
        .iter()
        .map(|&i| table.records[i].employees)
        .max()
        .unwrap_or(0);

    Plot::new("funding_vs_revenue")
        .legend(Legend::default())
        .height(CHART_HEIGHT)
        .x_axis_label(COL_FUNDING)
        .y_axis_label("Revenue(Million$)")
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for &idx in &state.visible_indices {
                let rec = &table.records[idx];
                if rec.funding.is_nan() || rec.revenue.is_nan() {
                    continue;
                }
                let points = Points::new(vec![[rec.funding, rec.revenue]])
                    .name(&rec.name)
                    .color(state.startup_colors.color_for(&rec.name))
                    .radius(marker_radius(rec.employees, max_employees))
                    .filled(true);
                plot_ui.points(points);
            }
        });
}

/// Marker radius with area proportional to the employee count.
fn marker_radius(employees: u32, max_employees: u32) -> f32 {
    if max_employees == 0 {
        return MIN_MARKER_RADIUS;
    }
    let share = employees as f32 / max_employees as f32;
    (MAX_MARKER_RADIUS * share.sqrt()).max(MIN_MARKER_RADIUS)
}

// ---------------------------------------------------------------------------
// Innovation & funding trend (lines with markers)
// ---------------------------------------------------------------------------

pub fn trend_chart(ui: &mut Ui, state: &AppState) {
    ui.strong("Innovation & Funding Trend Over Years");

    let colors = generate_palette(2);
    let funding: Vec<[f64; 2]> = state
        .trend
        .iter()
        .filter(|t| !t.avg_funding.is_nan())
        .map(|t| [t.year as f64, t.avg_funding])
        .collect();
    let innovation: Vec<[f64; 2]> = state
        .trend
        .iter()
        .filter(|t| !t.avg_innovation.is_nan())
        .map(|t| [t.year as f64, t.avg_innovation])
        .collect();

    Plot::new("trend_over_years")
        .legend(Legend::default())
        .height(CHART_HEIGHT)
        .x_axis_label("Year")
        .x_axis_formatter(|mark: GridMark, _range| year_label(mark.value))
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for ((name, series), color) in [(COL_FUNDING, funding), (COL_INNOVATION, innovation)]
                .into_iter()
                .zip(colors)
            {
                // Same name for line and markers so the legend toggles both.
                plot_ui.line(
                    Line::new(PlotPoints::from(series.clone()))
                        .name(name)
                        .color(color)
                        .width(2.0),
                );
                plot_ui.points(Points::new(series).name(name).color(color).radius(4.0));
            }
        });
}

fn year_label(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        String::new()
    }
}

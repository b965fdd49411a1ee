use std::ops::RangeInclusive;

use eframe::egui::{Color32, Stroke, Ui};
use egui_plot::{
    Bar, BarChart, BoxElem, BoxPlot, BoxSpread, GridMark, Legend, Line, LineStyle, Plot,
    PlotPoints, Points,
};

use crate::color::{ColorMap, ColorScale};
use crate::data::model::FieldValue;
use crate::summary::{format_usd, DashboardSummary};

const CHART_HEIGHT: f32 = 300.0;
const ACCENT: Color32 = Color32::from_rgb(0x2c, 0x7f, 0xb8);
const SECONDARY: Color32 = Color32::from_rgb(0xf0, 0x8a, 0x24);

fn usd_axis(mark: GridMark, _range: &RangeInclusive<f64>) -> String {
    format_usd(Some(mark.value))
}

/// Axis formatter that labels integer positions with `labels[i]`.
fn category_axis(labels: Vec<String>) -> impl Fn(GridMark, &RangeInclusive<f64>) -> String {
    move |mark, _range| {
        let v = mark.value;
        if v < 0.0 || (v - v.round()).abs() > 1e-6 {
            return String::new();
        }
        labels.get(v.round() as usize).cloned().unwrap_or_default()
    }
}

fn value_range(series: &[(FieldValue, f64)]) -> (f64, f64) {
    series
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), (_, v)| {
            (lo.min(*v), hi.max(*v))
        })
}

fn empty_chart(ui: &mut Ui) {
    ui.weak("No records match the current filters.");
}

// ---------------------------------------------------------------------------
// 1. Median salary per year
// ---------------------------------------------------------------------------

fn year_points(series: &[(FieldValue, f64)]) -> Vec<[f64; 2]> {
    series
        .iter()
        .filter_map(|(year, v)| Some([year.as_f64()?, *v]))
        .collect()
}

/// Line chart of the yearly median USD salary, with the mean for reference.
pub fn yearly_trend(ui: &mut Ui, summary: &DashboardSummary) {
    ui.strong("Annual median salary (USD)");
    if summary.yearly_median.is_empty() {
        empty_chart(ui);
        return;
    }

    let points = year_points(&summary.yearly_median);
    let means = year_points(&summary.yearly_mean);

    Plot::new("yearly_trend")
        .height(CHART_HEIGHT)
        .x_axis_label("Year")
        .y_axis_label("Salary USD")
        .x_axis_formatter(|mark, _range| {
            let v = mark.value;
            if (v - v.round()).abs() < 1e-6 {
                format!("{}", v.round() as i64)
            } else {
                String::new()
            }
        })
        .y_axis_formatter(usd_axis)
        .allow_scroll(false)
        .legend(Legend::default())
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(PlotPoints::from(means))
                    .name("mean")
                    .color(SECONDARY)
                    .style(LineStyle::dashed_loose())
                    .width(1.5),
            );
            plot_ui.line(
                Line::new(PlotPoints::from(points.clone()))
                    .name("median")
                    .color(ACCENT)
                    .width(2.0),
            );
            plot_ui.points(
                Points::new(PlotPoints::from(points))
                    .name("median")
                    .color(ACCENT)
                    .radius(4.0),
            );
        });
}

// ---------------------------------------------------------------------------
// 2. Top job titles
// ---------------------------------------------------------------------------

/// Horizontal bars of the best-paid job titles, largest on top.
pub fn top_titles(ui: &mut Ui, summary: &DashboardSummary) {
    ui.strong(format!("Top {} job titles (median USD)", summary.top_titles.len()));
    if summary.top_titles.is_empty() {
        empty_chart(ui);
        return;
    }

    let n = summary.top_titles.len();
    let (min, max) = value_range(&summary.top_titles);
    // Rank 0 sits at the highest y position.
    let mut labels = vec![String::new(); n];
    let bars: Vec<Bar> = summary
        .top_titles
        .iter()
        .enumerate()
        .map(|(rank, (title, median))| {
            let y = n - 1 - rank;
            labels[y] = title.to_string();
            Bar::new(y as f64, *median)
                .name(format!("{title}: {}", format_usd(Some(*median))))
                .fill(ColorScale::Blues.for_value(*median, min, max))
        })
        .collect();

    Plot::new("top_titles")
        .height(CHART_HEIGHT)
        .x_axis_label("Salary USD")
        .x_axis_formatter(usd_axis)
        .y_axis_formatter(category_axis(labels))
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).horizontal().width(0.7));
        });
}

// ---------------------------------------------------------------------------
// 3. Distribution per experience level
// ---------------------------------------------------------------------------

/// Box plots of USD salary per experience level, in seniority order.
pub fn level_distribution(ui: &mut Ui, summary: &DashboardSummary, colors: Option<&ColorMap>) {
    ui.strong("Salary distribution by experience level");
    if summary.level_boxes.is_empty() {
        empty_chart(ui);
        return;
    }

    let color_of = |level: &str| colors.map_or(ACCENT, |cm| cm.color_for(level));
    let labels: Vec<String> = summary
        .level_boxes
        .iter()
        .map(|b| b.category.clone())
        .collect();

    Plot::new("level_distribution")
        .height(CHART_HEIGHT)
        .x_axis_label("Level")
        .y_axis_label("Salary USD")
        .x_axis_formatter(category_axis(labels))
        .y_axis_formatter(usd_axis)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for (i, stats) in summary.level_boxes.iter().enumerate() {
                let x = i as f64;
                let color = color_of(&stats.category);
                let elem = BoxElem::new(
                    x,
                    BoxSpread::new(
                        stats.lower_whisker,
                        stats.q1,
                        stats.median,
                        stats.q3,
                        stats.upper_whisker,
                    ),
                )
                .name(format!("{} (n = {})", stats.category, stats.count))
                .box_width(0.5)
                .fill(color.gamma_multiply(0.4))
                .stroke(Stroke::new(1.5, color));
                plot_ui.box_plot(BoxPlot::new(vec![elem]).name(&stats.category));

                if !stats.outliers.is_empty() {
                    let outliers: PlotPoints = stats.outliers.iter().map(|&y| [x, y]).collect();
                    plot_ui.points(Points::new(outliers).color(color).radius(2.5));
                }
            }
        });
}

// ---------------------------------------------------------------------------
// 4. Work arrangement
// ---------------------------------------------------------------------------

/// Vertical bars of the median USD salary per work arrangement.
pub fn work_arrangement(ui: &mut Ui, summary: &DashboardSummary) {
    ui.strong("Median salary by work arrangement");
    if summary.arrangement_medians.is_empty() {
        empty_chart(ui);
        return;
    }

    let (min, max) = value_range(&summary.arrangement_medians);
    let labels: Vec<String> = summary
        .arrangement_medians
        .iter()
        .map(|(k, _)| k.to_string())
        .collect();
    let bars: Vec<Bar> = summary
        .arrangement_medians
        .iter()
        .enumerate()
        .map(|(i, (arrangement, median))| {
            Bar::new(i as f64, *median)
                .name(format!("{arrangement}: {}", format_usd(Some(*median))))
                .fill(ColorScale::Viridis.for_value(*median, min, max))
        })
        .collect();

    Plot::new("work_arrangement")
        .height(CHART_HEIGHT)
        .x_axis_label("Arrangement")
        .y_axis_label("Salary USD")
        .x_axis_formatter(category_axis(labels))
        .y_axis_formatter(usd_axis)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).width(0.6));
        });
}

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::state::AppState;
use crate::summary::{format_count, format_usd, DashboardSummary, NOT_AVAILABLE};

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let dataset = match &state.dataset {
        Some(ds) => ds,
        None => {
            ui.label("No dataset loaded.");
            return;
        }
    };

    // Clone what we need so we can mutate state inside the loop.
    let years: Vec<i32> = dataset.years().into_iter().collect();
    let levels = dataset.levels();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            let header = format!("Years  ({}/{})", state.selection.years.len(), years.len());
            egui::CollapsingHeader::new(RichText::new(header).strong())
                .id_salt("years")
                .default_open(true)
                .show(ui, |ui: &mut Ui| {
                    ui.horizontal(|ui: &mut Ui| {
                        if ui.small_button("All").clicked() {
                            state.select_all_years();
                        }
                        if ui.small_button("None").clicked() {
                            state.select_no_years();
                        }
                    });

                    for &year in &years {
                        let mut checked = state.selection.years.contains(&year);
                        if ui.checkbox(&mut checked, year.to_string()).changed() {
                            state.toggle_year(year);
                        }
                    }
                });

            let header = format!(
                "Experience level  ({}/{})",
                state.selection.levels.len(),
                levels.len()
            );
            egui::CollapsingHeader::new(RichText::new(header).strong())
                .id_salt("levels")
                .default_open(true)
                .show(ui, |ui: &mut Ui| {
                    ui.horizontal(|ui: &mut Ui| {
                        if ui.small_button("All").clicked() {
                            state.select_all_levels();
                        }
                        if ui.small_button("None").clicked() {
                            state.select_no_levels();
                        }
                    });

                    for level in &levels {
                        let mut text = RichText::new(level);
                        if let Some(cm) = &state.level_colors {
                            text = text.color(cm.color_for(level));
                        }
                        let mut checked = state.selection.levels.contains(level);
                        if ui.checkbox(&mut checked, text).changed() {
                            state.toggle_level(level);
                        }
                    }
                });
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(summary) = &state.summary {
            ui.label(format!(
                "{} records loaded, {} visible",
                format_count(summary.total_count),
                format_count(summary.record_count)
            ));
        }
        if let Some(path) = &state.source_path {
            ui.separator();
            ui.weak(path.display().to_string());
        }

        ui.separator();
        let (hits, misses) = state.cache_stats();
        ui.weak(format!("cache {hits} hits / {misses} misses"));

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// KPI row
// ---------------------------------------------------------------------------

/// Four headline metrics side by side.
pub fn kpi_row(ui: &mut Ui, summary: &DashboardSummary) {
    let metrics = [
        ("Total records", format_count(summary.record_count)),
        ("Mean salary (USD)", format_usd(summary.mean_usd)),
        ("Median salary (USD)", format_usd(summary.median_usd)),
        ("Unique job titles", format_count(summary.unique_titles)),
    ];

    ui.columns(metrics.len(), |cols| {
        for (col, (label, value)) in cols.iter_mut().zip(metrics.iter()) {
            col.group(|ui: &mut Ui| {
                ui.set_min_width(ui.available_width());
                ui.label(*label);
                let mut text = RichText::new(value).size(24.0).strong();
                if value == NOT_AVAILABLE {
                    text = text.weak();
                }
                ui.label(text);
            });
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open salary data")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.open_path(&path);
    }
}

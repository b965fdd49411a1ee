use eframe::egui::{self, RichText, ScrollArea, Ui};

use crate::state::AppState;
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct SalaryInsightsApp {
    pub state: AppState,
}

impl SalaryInsightsApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for SalaryInsightsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: dashboard ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| dashboard(ui, &self.state));
        });
    }
}

fn dashboard(ui: &mut Ui, state: &AppState) {
    let Some(summary) = &state.summary else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a salary CSV to start  (File → Open…)");
        });
        return;
    };

    ui.heading("Data Salary Insights");
    ui.label(RichText::new(summary.headline()).italics());
    ui.add_space(8.0);
    panels::kpi_row(ui, summary);
    ui.separator();

    plot::yearly_trend(ui, summary);
    ui.add_space(12.0);

    ui.columns(2, |cols| {
        plot::top_titles(&mut cols[0], summary);
        plot::level_distribution(&mut cols[1], summary, state.level_colors.as_ref());
    });
    ui.add_space(12.0);

    plot::work_arrangement(ui, summary);
    ui.separator();

    egui::CollapsingHeader::new("Raw data")
        .id_salt("raw_data")
        .default_open(false)
        .show(ui, |ui: &mut Ui| table::raw_data(ui, summary));
}

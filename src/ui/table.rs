use eframe::egui::{self, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::Field;
use crate::summary::DashboardSummary;

const ROW_HEIGHT: f32 = 18.0;

/// Raw rows of the current selection, capped at the preview limit.
pub fn raw_data(ui: &mut Ui, summary: &DashboardSummary) {
    let rows = &summary.preview;

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .columns(Column::auto().at_least(60.0), Field::COUNT)
        .max_scroll_height(360.0)
        .header(20.0, |mut header| {
            for field in Field::ALL {
                header.col(|ui| {
                    ui.strong(field.name());
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, rows.len(), |mut row| {
                let record = &rows[row.index()];
                for field in Field::ALL {
                    row.col(|ui| {
                        ui.label(record.display(field));
                    });
                }
            });
        });

    ui.label(summary.preview_caption());
}

use eframe::egui::{self, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::COLUMNS;
use crate::state::AppState;

const ROW_HEIGHT: f32 = 20.0;

/// Full data grid of the filtered subset.
pub fn data_table(ui: &mut Ui, state: &AppState) {
    if state.visible_indices.is_empty() {
        ui.label("No startups match the current filters.");
    }

    let table = &state.table;
    TableBuilder::new(ui)
        .id_salt("detailed_data")
        .striped(true)
        .resizable(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .columns(Column::auto().at_least(70.0), COLUMNS.len())
        .min_scrolled_height(0.0)
        .max_scroll_height(360.0)
        .header(ROW_HEIGHT + 4.0, |mut header| {
            for name in COLUMNS {
                header.col(|ui: &mut Ui| {
                    ui.strong(name);
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, state.visible_indices.len(), |mut row| {
                let rec = &table.records[state.visible_indices[row.index()]];
                for name in COLUMNS {
                    row.col(|ui: &mut Ui| {
                        ui.label(rec.cell(name));
                    });
                }
            });
        });
}

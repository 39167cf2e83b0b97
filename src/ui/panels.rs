use std::collections::BTreeSet;
use std::sync::Arc;

use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::filter::Choice;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filter Data");
    ui.separator();

    // The table is shared, so holding our own handle lets the combo boxes
    // borrow its value sets while `state` is mutated.
    let table = Arc::clone(&state.table);

    ui.strong("Select Year");
    let mut year = state.selection.year;
    egui::ComboBox::from_id_salt("select_year")
        .selected_text(year.to_string())
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for &y in &table.years {
                ui.selectable_value(&mut year, y, y.to_string());
            }
        });
    state.set_year(year);
    ui.add_space(8.0);

    let mut region = state.selection.region.clone();
    choice_combo(ui, "select_region", "Select Region", &table.regions, &mut region);
    state.set_region(region);
    ui.add_space(8.0);

    let mut program = state.selection.program.clone();
    choice_combo(ui, "select_program", "Select Program", &table.programs, &mut program);
    state.set_program(program);
}

/// A combo box offering "All" followed by the sorted values.
fn choice_combo(
    ui: &mut Ui,
    id: &str,
    label: &str,
    options: &BTreeSet<String>,
    current: &mut Choice,
) {
    ui.strong(label);
    egui::ComboBox::from_id_salt(id)
        .selected_text(current.to_string())
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            ui.selectable_value(&mut *current, Choice::All, "All");
            for opt in options {
                ui.selectable_value(&mut *current, Choice::Only(opt.clone()), opt.as_str());
            }
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

        ui.label(format!(
            "{} startups loaded, {} shown",
            state.table.len(),
            state.visible_indices.len()
        ));

        ui.separator();

        let source = state
            .source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| state.source.display().to_string());
        ui.label(RichText::new(source).weak());

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open startup data")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.open(&path);
    }
}

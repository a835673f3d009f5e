use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::color;
use crate::data::filter::category_options;
use crate::data::export::CSV_MIME;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(RichText::new("Movement Lab").strong().color(Color32::from(color::COBALT)));
        ui.label("Student Fitness Analytics");
    });
    ui.separator();

    ui.heading("Filters");

    let Some(table) = state.table.clone() else {
        ui.label("No dataset loaded.");
        return;
    };

    // ---- BMI category selector ----
    ui.strong("Filter by BMI Category");
    let current = state.filters.category;
    egui::ComboBox::from_id_salt("bmi_category")
        .selected_text(current.to_string())
        .show_ui(ui, |ui: &mut Ui| {
            for option in category_options(&table) {
                if ui
                    .selectable_label(current == option, option.to_string())
                    .clicked()
                {
                    state.set_category(option);
                }
            }
        });
    ui.separator();

    // ---- Student multi-select ----
    let n_selected = state.filters.names.len();
    let n_total = table.len();
    ui.strong(format!("Select Students  ({n_selected}/{n_total})"));
    ui.horizontal(|ui: &mut Ui| {
        if ui.small_button("All").clicked() {
            state.select_all();
        }
        if ui.small_button("None").clicked() {
            state.select_none();
        }
    });

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for record in table.iter() {
                let mut checked = state.filters.names.contains(&record.name);
                ui.horizontal(|ui: &mut Ui| {
                    if ui.checkbox(&mut checked, &record.name).changed() {
                        state.toggle_name(&record.name);
                    }
                    if let Some(cat) = record.bmi_category {
                        ui.weak(cat.label());
                    }
                });
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
            if ui.button("Reload data").clicked() {
                state.reload();
                ui.close_menu();
            }
            if ui
                .add_enabled(state.snapshot.is_some(), egui::Button::new("Export filtered CSV…"))
                .clicked()
            {
                save_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let (Some(table), Some(snap)) = (&state.table, &state.snapshot) {
            ui.label(format!(
                "{} students loaded, {} in view",
                table.len(),
                snap.view.len()
            ));
        }

        if state.source_changed() {
            ui.separator();
            ui.label(RichText::new("Source file changed").color(Color32::YELLOW));
            if ui.small_button("Reload").clicked() {
                state.reload();
            }
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

/// Ask where to save the filtered view and write it there.
pub fn save_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Download filtered data")
        .set_file_name(&state.config.export_file_name)
        .add_filter(format!("CSV ({CSV_MIME})"), &["csv"])
        .save_file();

    if let Some(path) = file {
        match state.save_export(&path) {
            Ok(()) => {
                state.status_message = None;
            }
            Err(e) => {
                log::error!("Failed to export: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}

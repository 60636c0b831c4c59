use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::DatePickerButton;

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel: platform multi-select + date range.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let Some(dataset) = &state.dataset else {
        ui.label("No dataset loaded.");
        return;
    };

    // Clone what we need so we can mutate state inside the loop.
    let platforms: Vec<String> = dataset.platforms.iter().cloned().collect();
    let date_range = dataset.date_range;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Platform multi-select ----
            ui.strong(format!(
                "Platforms  ({}/{})",
                state.criteria.platforms.len(),
                platforms.len()
            ));
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    state.select_all_platforms();
                }
                if ui.small_button("None").clicked() {
                    state.select_no_platforms();
                }
            });

            for platform in &platforms {
                let mut checked = state.criteria.platforms.contains(platform);
                let text =
                    RichText::new(platform).color(state.color_map.color_for(platform));
                if ui.checkbox(&mut checked, text).changed() {
                    state.toggle_platform(platform);
                }
            }

            ui.separator();

            // ---- Date range (inclusive on both ends) ----
            ui.strong("Date range");
            let Some((min, max)) = date_range else {
                ui.label(RichText::new("No dated rows in this file.").weak());
                return;
            };

            let mut start = state.criteria.start;
            let mut end = state.criteria.end;
            let mut changed = false;

            ui.horizontal(|ui: &mut Ui| {
                ui.label("From");
                changed |= ui
                    .add(DatePickerButton::new(&mut start).id_salt("date_start"))
                    .changed();
            });
            ui.horizontal(|ui: &mut Ui| {
                ui.label("To");
                changed |= ui
                    .add(DatePickerButton::new(&mut end).id_salt("date_end"))
                    .changed();
            });
            if changed {
                state.set_date_range(start, end);
            }

            ui.label(
                RichText::new(format!(
                    "Data: {} – {}",
                    min.format("%d/%m/%Y"),
                    max.format("%d/%m/%Y")
                ))
                .weak(),
            );
            if ui.small_button("Reset range").clicked() {
                state.reset_date_range();
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

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} rows loaded, {} visible",
                ds.len(),
                state.visible_indices.len()
            ));
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

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open metrics file")
        .add_filter("Supported files", &["xlsx", "xlsm", "xls", "ods", "csv", "json"])
        .add_filter("Spreadsheets", &["xlsx", "xlsm", "xls", "ods"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .pick_file();

    if let Some(path) = file {
        state.loading = true;
        match crate::data::loader::load_file(&path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} rows across {} platforms",
                    dataset.len(),
                    dataset.platforms.len()
                );
                state.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load file: {e}");
                state.status_message = Some(format!("Error: {e}"));
                state.loading = false;
            }
        }
    }
}

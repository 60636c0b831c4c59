use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::data::model::{columns, Dataset};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Filtered record table
// ---------------------------------------------------------------------------

/// Render the visible records as a table, columns in source-header order.
/// Missing cells are blank, like the empty cells of the source spreadsheet.
pub fn filtered_table(ui: &mut Ui, state: &AppState, dataset: &Dataset) {
    let labels = &dataset.columns;
    if labels.is_empty() {
        return;
    }

    TableBuilder::new(ui)
        .striped(true)
        .vscroll(false)
        .columns(Column::auto().resizable(true), labels.len())
        .header(20.0, |mut header| {
            for label in labels {
                header.col(|ui: &mut Ui| {
                    ui.strong(label);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, state.visible_indices.len(), |mut row| {
                let rec = &dataset.records[state.visible_indices[row.index()]];
                for label in labels {
                    row.col(|ui: &mut Ui| {
                        let text = match label.as_str() {
                            columns::PLATFORM => rec.platform.clone().unwrap_or_default(),
                            columns::DATE => rec
                                .date
                                .map(|d| d.format("%d/%m/%Y").to_string())
                                .unwrap_or_default(),
                            _ => rec
                                .metrics
                                .get(label)
                                .map(|c| c.to_string())
                                .unwrap_or_default(),
                        };
                        ui.label(text);
                    });
                }
            });
        });
}

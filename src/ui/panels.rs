use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let Some(sample) = &state.sample else {
        ui.label("No dataset loaded.");
        return;
    };

    // Clone what we need so we can mutate state inside the loop.
    let options = sample.options.clone();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Import / Export ----
            let header = format!(
                "Select Import/Export  ({}/{})",
                state.selection.flows.len(),
                options.flows.len()
            );
            egui::CollapsingHeader::new(RichText::new(header).strong())
                .id_salt("flow_filter")
                .default_open(true)
                .show(ui, |ui: &mut Ui| {
                    for flow in &options.flows {
                        let mut checked = state.selection.flows.contains(flow);
                        if ui.checkbox(&mut checked, flow.as_str()).changed() {
                            state.toggle_flow(*flow);
                        }
                    }
                });

            // ---- Category ----
            let header = format!(
                "Select Category  ({}/{})",
                state.selection.categories.len(),
                options.categories.len()
            );
            egui::CollapsingHeader::new(RichText::new(header).strong())
                .id_salt("category_filter")
                .default_open(true)
                .show(ui, |ui: &mut Ui| {
                    for category in &options.categories {
                        let mut checked = state.selection.categories.contains(category);
                        if ui.checkbox(&mut checked, category.as_str()).changed() {
                            state.toggle_category(category);
                        }
                    }
                });

            ui.separator();
            if ui.button("Reset Filters").clicked() {
                state.reset_filters();
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

        if let Some((total, sampled, visible)) = state.counts() {
            ui.label(format!(
                "{total} transactions loaded, {sampled} sampled, {visible} visible"
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
        .set_title("Open trade data")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.open(&path);
    }
}

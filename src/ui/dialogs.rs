use eframe::egui::{self, RichText, Ui};

use crate::state::{AppState, DialogKind};

// ---------------------------------------------------------------------------
// Message dialog
// ---------------------------------------------------------------------------

/// Show the pending info / warning / error message, if any.
pub fn message_dialog(ctx: &egui::Context, state: &mut AppState) {
    let Some(dialog) = &state.dialog else {
        return;
    };
    let visuals = ctx.style().visuals.clone();
    let (icon, color) = match dialog.kind {
        DialogKind::Info => ("ℹ", visuals.hyperlink_color),
        DialogKind::Warning => ("⚠", visuals.warn_fg_color),
        DialogKind::Error => ("❌", visuals.error_fg_color),
    };
    let mut close = false;

    let modal = egui::Modal::new(egui::Id::new("message_dialog")).show(ctx, |ui: &mut Ui| {
        ui.set_max_width(420.0);
        ui.heading(RichText::new(format!("{icon} {}", dialog.title)).color(color));
        ui.add_space(8.0);
        ui.label(&dialog.message);
        ui.add_space(12.0);
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui: &mut Ui| {
            if ui.button("OK").clicked() {
                close = true;
            }
        });
    });

    if close || modal.should_close() {
        state.dialog = None;
    }
}

// ---------------------------------------------------------------------------
// Clear-dataset confirmation
// ---------------------------------------------------------------------------

pub fn confirm_clear(ctx: &egui::Context, state: &mut AppState) {
    if !state.confirm_clear {
        return;
    }
    let mut answer = None;

    let modal = egui::Modal::new(egui::Id::new("confirm_clear")).show(ctx, |ui: &mut Ui| {
        ui.set_max_width(420.0);
        ui.heading("Clear Dataset");
        ui.add_space(8.0);
        ui.label(
            "Are you sure you want to clear the current dataset?\n\n\
             This removes all data and disables analysis until a new dataset is uploaded.",
        );
        ui.add_space(12.0);
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui: &mut Ui| {
            if ui.button("Clear").clicked() {
                answer = Some(true);
            }
            if ui.button("Cancel").clicked() {
                answer = Some(false);
            }
        });
    });

    match answer {
        Some(true) => state.clear_dataset(),
        Some(false) => state.confirm_clear = false,
        None if modal.should_close() => state.confirm_clear = false,
        None => {}
    }
}

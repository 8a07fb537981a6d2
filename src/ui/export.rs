use std::path::Path;

use eframe::egui::{self, RichText, Ui};

use crate::export::{ChartFormat, ChartKind, REPORT_FILE_STEM};
use crate::state::AppState;
use crate::theme::ThemePalette;
use crate::ui::charts::save_chart_dialog;

// ---------------------------------------------------------------------------
// Export page
// ---------------------------------------------------------------------------

pub fn export_page(ui: &mut Ui, state: &mut AppState) {
    let palette = state.theme.palette();
    let visible = state.visible_indices.len();

    ui.heading("Export");
    ui.label(
        RichText::new(format!("Exports use the active filters ({visible} movies)."))
            .color(palette.muted),
    );
    ui.separator();

    // ---- Data ----
    section(ui, &palette, "Data", |ui: &mut Ui| {
        if ui.button("📄 Filtered movies (CSV)").clicked() {
            save_csv_dialog(state, "filtered_movies.csv", AppState::export_filtered_csv);
        }
        if ui
            .add_enabled(visible > 0, egui::Button::new("🏆 Top 10 table (CSV)"))
            .clicked()
        {
            save_csv_dialog(state, "top_10_movies.csv", AppState::export_top_csv);
        }
    });

    // ---- Charts ----
    section(ui, &palette, "Charts", |ui: &mut Ui| {
        ui.horizontal(|ui: &mut Ui| {
            ui.label("Format:");
            for format in [ChartFormat::Png, ChartFormat::Svg] {
                ui.radio_value(&mut state.chart_format, format, format.label());
            }
        });
        ui.add_enabled_ui(visible > 0, |ui: &mut Ui| {
            for kind in ChartKind::ALL {
                if ui.button(kind.title()).clicked() {
                    save_chart_dialog(state, kind);
                }
            }
            if ui.button("📑 Summary report with all charts").clicked() {
                save_report_dialog(state);
            }
            if ui.button("📁 All charts to folder…").clicked() {
                if let Some(dir) = rfd::FileDialog::new()
                    .set_title("Choose export folder")
                    .pick_folder()
                {
                    state.export_all_charts(&dir);
                }
            }
        });
    });
}

fn section(
    ui: &mut Ui,
    palette: &ThemePalette,
    title: &str,
    add_contents: impl FnOnce(&mut Ui),
) {
    egui::Frame::new()
        .fill(palette.card)
        .stroke(egui::Stroke::new(1.0, palette.border))
        .corner_radius(8.0)
        .inner_margin(16.0)
        .show(ui, |ui: &mut Ui| {
            ui.set_min_width(ui.available_width());
            ui.strong(title);
            ui.add_space(6.0);
            add_contents(ui);
        });
    ui.add_space(12.0);
}

fn save_csv_dialog(state: &mut AppState, file_name: &str, export: fn(&mut AppState, &Path)) {
    let path = rfd::FileDialog::new()
        .set_title("Export CSV")
        .add_filter("CSV", &["csv"])
        .set_file_name(file_name)
        .save_file();

    if let Some(path) = path {
        export(state, &path);
    }
}

fn save_report_dialog(state: &mut AppState) {
    let ext = state.chart_format.extension();
    let path = rfd::FileDialog::new()
        .set_title("Export summary report")
        .add_filter(state.chart_format.label(), &[ext])
        .set_file_name(format!("{REPORT_FILE_STEM}.{ext}"))
        .save_file();

    if let Some(path) = path {
        state.export_summary_report(&path);
    }
}

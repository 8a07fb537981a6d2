use eframe::egui::{self, RichText, Ui};

use crate::data::model::format_rating;
use crate::state::{AppState, Page};
use crate::theme::ThemePalette;
use crate::ui::panels::open_file_dialog;

// ---------------------------------------------------------------------------
// Landing page
// ---------------------------------------------------------------------------

/// Upload entry point plus a summary of the loaded dataset.
pub fn home_page(ui: &mut Ui, state: &mut AppState) {
    let palette = state.theme.palette();

    ui.vertical_centered(|ui: &mut Ui| {
        ui.add_space(40.0);
        ui.label(RichText::new("CineMatic Analyzer").size(36.0).strong());
        ui.label(
            RichText::new("Explore movie ratings by year, genre and more")
                .size(16.0)
                .color(palette.muted),
        );
        ui.add_space(24.0);

        let upload = egui::Button::new(RichText::new("📂 Upload Dataset").size(18.0).color(egui::Color32::WHITE))
            .fill(palette.accent)
            .min_size(egui::vec2(220.0, 44.0));
        if ui.add(upload).clicked() {
            open_file_dialog(state);
        }
    });

    if state.dataset.is_none() {
        ui.add_space(24.0);
        ui.vertical_centered(|ui: &mut Ui| {
            ui.label(
                RichText::new("Expected columns: Series_Title, Released_Year, Genre, IMDB_Rating")
                    .color(palette.muted),
            );
        });
        return;
    }

    let summary = state.summary();
    ui.add_space(32.0);
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading("Dataset Summary");
    });
    ui.add_space(12.0);

    let cards = summary.fields();

    ui.columns(cards.len(), |columns| {
        for (col, (label, value)) in columns.iter_mut().zip(cards.iter()) {
            summary_card(col, &palette, label, value);
        }
    });

    ui.add_space(24.0);
    ui.vertical_centered(|ui: &mut Ui| {
        if let Some(&best) = state.top_movies().first() {
            if let Some(ds) = &state.dataset {
                let movie = &ds.movies[best];
                ui.label(
                    RichText::new(format!(
                        "Highest rated: {} ({}) ⭐ {}",
                        movie.title,
                        movie.year,
                        format_rating(movie.rating)
                    ))
                    .color(palette.muted),
                );
            }
        }
        ui.add_space(8.0);
        if ui.button("Browse the dashboard →").clicked() {
            state.navigate(Page::Dashboard);
        }
    });
}

fn summary_card(ui: &mut Ui, palette: &ThemePalette, label: &str, value: &str) {
    egui::Frame::new()
        .fill(palette.card)
        .stroke(egui::Stroke::new(1.0, palette.border))
        .corner_radius(8.0)
        .inner_margin(16.0)
        .show(ui, |ui: &mut Ui| {
            ui.set_min_width(ui.available_width());
            ui.label(RichText::new(label).color(palette.muted));
            ui.label(RichText::new(value).size(24.0).strong().color(palette.accent));
        });
}

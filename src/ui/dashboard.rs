use eframe::egui::{self, Align2, FontId, RichText, ScrollArea, Sense, Ui};

use crate::data::model::{format_rating, Movie};
use crate::export::truncate_title;
use crate::state::AppState;
use crate::theme::ThemePalette;

const CARD_WIDTH: f32 = 180.0;
const CARD_HEIGHT: f32 = 330.0;
const POSTER_SIZE: egui::Vec2 = egui::vec2(140.0, 210.0);

// ---------------------------------------------------------------------------
// Poster helpers
// ---------------------------------------------------------------------------

/// Turn a poster reference into a URI egui's image loaders understand.
///
/// URLs pass through; anything else is treated as a local file path.
pub fn poster_uri(reference: &str) -> String {
    let lower = reference.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") || lower.starts_with("file://")
    {
        reference.to_string()
    } else {
        format!("file://{reference}")
    }
}

fn poster(ui: &mut Ui, movie: &Movie, size: egui::Vec2, palette: &ThemePalette) {
    match &movie.poster {
        Some(reference) => {
            ui.add(
                egui::Image::new(poster_uri(reference))
                    .fit_to_exact_size(size)
                    .show_loading_spinner(true),
            );
        }
        None => {
            let (rect, _) = ui.allocate_exact_size(size, Sense::hover());
            ui.painter().rect_filled(rect, 4.0, palette.border);
            ui.painter().text(
                rect.center(),
                Align2::CENTER_CENTER,
                "No Image",
                FontId::proportional(14.0),
                palette.muted,
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Dashboard – grid of movie cards
// ---------------------------------------------------------------------------

pub fn dashboard_page(ui: &mut Ui, state: &mut AppState) {
    let palette = state.theme.palette();
    let Some(ds) = &state.dataset else {
        return;
    };

    ui.heading("Dashboard");
    ui.label(
        RichText::new(format!("{} of {} movies", state.visible_indices.len(), ds.len()))
            .color(palette.muted),
    );
    ui.separator();

    if state.visible_indices.is_empty() {
        ui.vertical_centered(|ui: &mut Ui| {
            ui.add_space(80.0);
            ui.label(
                RichText::new("No movies found with the specified filters")
                    .size(20.0)
                    .color(palette.muted),
            );
            ui.label(RichText::new("Try adjusting your search criteria").color(palette.muted));
        });
        return;
    }

    let spacing = ui.spacing().item_spacing;
    let per_row = ((ui.available_width() + spacing.x) / (CARD_WIDTH + spacing.x))
        .floor()
        .max(1.0) as usize;
    let n_rows = state.visible_indices.len().div_ceil(per_row);

    let mut clicked = None;

    // Only the visible rows are laid out, so large result sets stay responsive.
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show_rows(ui, CARD_HEIGHT, n_rows, |ui: &mut Ui, row_range| {
            for row in row_range {
                let start = row * per_row;
                let end = (start + per_row).min(state.visible_indices.len());
                ui.horizontal(|ui: &mut Ui| {
                    for &idx in &state.visible_indices[start..end] {
                        if movie_card(ui, &ds.movies[idx], &palette) {
                            clicked = Some(idx);
                        }
                    }
                });
            }
        });

    if clicked.is_some() {
        state.selected = clicked;
    }
}

/// Draw one card; returns `true` when it was clicked.
fn movie_card(ui: &mut Ui, movie: &Movie, palette: &ThemePalette) -> bool {
    let mut open = false;
    let response = egui::Frame::new()
        .fill(palette.card)
        .stroke(egui::Stroke::new(1.0, palette.border))
        .corner_radius(8.0)
        .inner_margin(12.0)
        .show(ui, |ui: &mut Ui| {
            ui.set_width(CARD_WIDTH - 24.0);
            ui.set_height(CARD_HEIGHT - 24.0);
            ui.vertical_centered(|ui: &mut Ui| {
                poster(ui, movie, POSTER_SIZE, palette);
            });
            ui.add_space(6.0);
            ui.label(RichText::new(truncate_title(&movie.title, 40)).strong());
            ui.label(
                RichText::new(format!("{} • ⭐ {:.1}", movie.year, movie.rating))
                    .color(palette.muted),
            );
            ui.label(
                RichText::new(truncate_title(&movie.genre_text(), 50))
                    .small()
                    .color(palette.muted),
            );
            if ui.small_button("View Details").clicked() {
                open = true;
            }
        })
        .response
        .interact(Sense::click());

    open || response.clicked()
}

// ---------------------------------------------------------------------------
// Details modal
// ---------------------------------------------------------------------------

pub fn details_modal(ctx: &egui::Context, state: &mut AppState) {
    let (Some(idx), Some(ds)) = (state.selected, &state.dataset) else {
        return;
    };
    let Some(movie) = ds.movies.get(idx) else {
        state.selected = None;
        return;
    };
    let palette = state.theme.palette();
    let mut close = false;

    let modal = egui::Modal::new(egui::Id::new("movie_details")).show(ctx, |ui: &mut Ui| {
        ui.set_width(720.0);
        ui.heading(RichText::new(&movie.title).size(22.0));
        ui.separator();

        ui.horizontal_top(|ui: &mut Ui| {
            poster(ui, movie, egui::vec2(200.0, 300.0), &palette);
            ui.add_space(12.0);

            ScrollArea::vertical()
                .max_height(320.0)
                .auto_shrink([false, true])
                .show(ui, |ui: &mut Ui| {
                    detail_row(ui, &palette, "Year", &movie.year.to_string());
                    detail_row(ui, &palette, "Rating", &format_rating(movie.rating));
                    detail_row(ui, &palette, "Genre", &movie.genre_text());
                    for header in ds.extra_headers() {
                        if let Some(value) = movie.extra.get(header).filter(|v| !v.trim().is_empty()) {
                            detail_row(ui, &palette, &header.replace('_', " "), value);
                        }
                    }
                });
        });

        ui.separator();
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui: &mut Ui| {
            if ui.button("Close").clicked() {
                close = true;
            }
        });
    });

    if close || modal.should_close() {
        state.selected = None;
    }
}

fn detail_row(ui: &mut Ui, palette: &ThemePalette, label: &str, value: &str) {
    ui.label(RichText::new(label).small().color(palette.muted));
    ui.label(value);
    ui.add_space(6.0);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_pass_through() {
        assert_eq!(
            poster_uri("https://m.media-amazon.com/images/x.jpg"),
            "https://m.media-amazon.com/images/x.jpg"
        );
        assert_eq!(poster_uri("file:///tmp/a.png"), "file:///tmp/a.png");
    }

    #[test]
    fn local_paths_become_file_uris() {
        assert_eq!(poster_uri("/srv/posters/heat.jpg"), "file:///srv/posters/heat.jpg");
    }
}

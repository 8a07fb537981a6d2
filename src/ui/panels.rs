use eframe::egui::{self, RichText, ScrollArea, Ui};

use crate::state::{AppState, Page};

// ---------------------------------------------------------------------------
// Left side panel – navigation and filter widgets
// ---------------------------------------------------------------------------

/// Render the left panel: page navigation, then filters once data is loaded.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    let accent = state.theme.palette().accent;

    ui.add_space(8.0);
    ui.heading(RichText::new("🎬 CineMatic").color(accent).strong());
    ui.separator();

    for page in Page::ALL {
        let enabled = !page.requires_dataset() || state.dataset.is_some();
        let response = ui.add_enabled(
            enabled,
            egui::Button::new(page.label())
                .selected(state.page == page)
                .min_size(egui::vec2(ui.available_width(), 28.0)),
        );
        if response.clicked() {
            state.navigate(page);
        }
    }

    if state.dataset.is_some() {
        ui.add_space(4.0);
        if ui.button("🗑 Clear Dataset").clicked() {
            state.confirm_clear = true;
        }
    }

    if state.dataset.is_none() || !matches!(state.page, Page::Home | Page::Export) {
        ui.separator();
        filter_panel(ui, state);
    }
}

fn filter_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");

    let (genres, bounds) = match &state.dataset {
        Some(ds) => (ds.genres.clone(), ds.year_bounds),
        None => {
            ui.label("No dataset loaded.");
            return;
        }
    };

    let mut changed = false;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Title search ----
            ui.strong("Title");
            changed |= ui
                .add(
                    egui::TextEdit::singleline(&mut state.criteria.search)
                        .hint_text("Search by movie title..."),
                )
                .changed();
            ui.add_space(6.0);

            // ---- Year range ----
            if let Some((lo, hi)) = bounds {
                ui.strong("Year range");
                let mut from = state.criteria.min_year.unwrap_or(lo);
                let mut to = state.criteria.max_year.unwrap_or(hi);
                changed |= ui
                    .add(egui::Slider::new(&mut from, lo..=hi).text("from"))
                    .changed();
                changed |= ui
                    .add(egui::Slider::new(&mut to, lo..=hi).text("to"))
                    .changed();
                state.criteria.min_year = Some(from);
                state.criteria.max_year = Some(to);

                if !state.criteria.year_range_is_valid() {
                    ui.label(
                        RichText::new("End year must be greater than or equal to start year.")
                            .color(ui.visuals().error_fg_color),
                    );
                }
                ui.add_space(6.0);
            }

            // ---- Rating threshold ----
            ui.strong("Minimum rating");
            changed |= ui
                .add(
                    egui::Slider::new(&mut state.criteria.min_rating, 0.0..=10.0)
                        .step_by(0.1)
                        .fixed_decimals(1),
                )
                .changed();
            ui.add_space(6.0);

            // ---- Genres (collapsible) ----
            let n_selected = state.criteria.genres.len();
            let header = if n_selected == 0 {
                format!("Genres  (all {})", genres.len())
            } else {
                format!("Genres  ({n_selected}/{})", genres.len())
            };
            egui::CollapsingHeader::new(RichText::new(header).strong())
                .id_salt("genre_filter")
                .default_open(false)
                .show(ui, |ui: &mut Ui| {
                    if ui.small_button("Any genre").clicked() {
                        state.criteria.genres.clear();
                        changed = true;
                    }
                    for genre in &genres {
                        let mut checked = state.criteria.genres.contains(genre);
                        if ui.checkbox(&mut checked, genre).changed() {
                            if checked {
                                state.criteria.genres.insert(genre.clone());
                            } else {
                                state.criteria.genres.remove(genre);
                            }
                            changed = true;
                        }
                    }
                });

            ui.add_space(8.0);
            if ui.button("Reset filters").clicked() {
                state.reset_filters();
            }
        });

    if changed {
        state.refilter();
    }
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
            if ui
                .add_enabled(state.dataset.is_some(), egui::Button::new("Clear dataset"))
                .clicked()
            {
                state.confirm_clear = true;
                ui.close_menu();
            }
            ui.separator();
            if ui.button("Quit").clicked() {
                ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            let name = state
                .source
                .as_ref()
                .and_then(|p| p.file_name())
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            ui.label(format!(
                "{name}: {} movies loaded, {} visible",
                ds.len(),
                state.visible_indices.len()
            ));
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui: &mut Ui| {
            if ui.button(state.theme.toggle_label()).clicked() {
                state.toggle_theme();
            }
        });
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Select CSV")
        .add_filter("CSV Files", &["csv"])
        .add_filter("All Files", &["*"])
        .pick_file();

    if let Some(path) = file {
        state.load_path(&path);
    }
}

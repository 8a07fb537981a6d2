use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use eframe::egui::{self, RichText, Ui};
use egui_extras::{Column, TableBuilder};
use egui_plot::{Bar, BarChart, GridMark, Line, Plot, PlotPoints, Points};

use crate::data::analysis;
use crate::data::model::format_rating;
use crate::export::{truncate_title, ChartFormat, ChartKind, GENRE_CHART_LIMIT};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Shared page chrome
// ---------------------------------------------------------------------------

/// Heading plus export controls. Returns `false` when there is nothing to plot.
fn chart_header(ui: &mut Ui, state: &mut AppState, kind: ChartKind, heading: &str) -> bool {
    ui.horizontal(|ui: &mut Ui| {
        ui.heading(heading);
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui: &mut Ui| {
            let enabled = !state.visible_indices.is_empty();
            if ui
                .add_enabled(enabled, egui::Button::new("💾 Export chart"))
                .clicked()
            {
                save_chart_dialog(state, kind);
            }
            egui::ComboBox::from_id_salt("chart_format")
                .selected_text(state.chart_format.label())
                .show_ui(ui, |ui: &mut Ui| {
                    for format in [ChartFormat::Png, ChartFormat::Svg] {
                        ui.selectable_value(&mut state.chart_format, format, format.label());
                    }
                });
        });
    });
    ui.separator();

    if state.visible_indices.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label(RichText::new("No data available").size(18.0));
        });
        return false;
    }
    true
}

pub fn save_chart_dialog(state: &mut AppState, kind: ChartKind) {
    let ext = state.chart_format.extension();
    let path = rfd::FileDialog::new()
        .set_title(format!("Save {}", kind.title()))
        .add_filter(state.chart_format.label(), &[ext])
        .set_file_name(format!("{}.{ext}", kind.file_stem()))
        .save_file();

    if let Some(path) = path {
        state.export_chart(kind, &path);
    }
}

// ---------------------------------------------------------------------------
// Year-wise trend (line chart)
// ---------------------------------------------------------------------------

pub fn year_trend_page(ui: &mut Ui, state: &mut AppState) {
    if !chart_header(
        ui,
        state,
        ChartKind::YearTrend,
        "Year-wise Trends - Average Ratings Over Time",
    ) {
        return;
    }
    let Some(ds) = &state.dataset else {
        return;
    };

    let trend = analysis::year_trend(ds, &state.visible_indices);
    let accent = state.theme.palette().accent;
    let points: Vec<[f64; 2]> = trend
        .iter()
        .map(|p| [p.year as f64, p.mean_rating])
        .collect();
    let counts: BTreeMap<i32, usize> = trend.iter().map(|p| (p.year, p.count)).collect();

    Plot::new("year_trend_plot")
        .x_axis_label("Year")
        .y_axis_label("Average Rating")
        .label_formatter(move |_, value| year_hover_label(&counts, value.x, value.y))
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(PlotPoints::from(points.clone()))
                    .name("Average rating")
                    .color(accent)
                    .width(2.0),
            );
            plot_ui.points(
                Points::new(PlotPoints::from(points))
                    .radius(3.0)
                    .color(accent),
            );
        });
}

/// Hover text for the trend plot; the movie count is shown when the cursor
/// sits on a year that has data.
fn year_hover_label(counts: &BTreeMap<i32, usize>, x: f64, y: f64) -> String {
    let year = x.round() as i32;
    match counts.get(&year) {
        Some(1) => format!("{year}: {y:.2} (1 movie)"),
        Some(n) => format!("{year}: {y:.2} ({n} movies)"),
        None => format!("{x:.0}: {y:.2}"),
    }
}

// ---------------------------------------------------------------------------
// Genre averages (bar chart)
// ---------------------------------------------------------------------------

/// Axis formatter that maps integer grid marks onto category labels.
fn category_formatter(
    labels: Vec<String>,
) -> impl Fn(GridMark, &RangeInclusive<f64>) -> String + 'static {
    move |mark, _range| {
        let v = mark.value;
        if v.fract() != 0.0 || v < 0.0 {
            return String::new();
        }
        labels.get(v as usize).cloned().unwrap_or_default()
    }
}

pub fn genre_page(ui: &mut Ui, state: &mut AppState) {
    if !chart_header(
        ui,
        state,
        ChartKind::GenreAverage,
        "Genre Analysis - Average Ratings by Genre",
    ) {
        return;
    }
    let (Some(ds), Some(colors)) = (&state.dataset, &state.genre_colors) else {
        return;
    };

    let mut genres = analysis::genre_averages(ds, &state.visible_indices);
    genres.truncate(GENRE_CHART_LIMIT);
    let labels: Vec<String> = genres.iter().map(|g| g.genre.clone()).collect();

    let bars: Vec<Bar> = genres
        .iter()
        .enumerate()
        .map(|(i, g)| {
            Bar::new(i as f64, g.mean_rating)
                .name(format!("{} ({} movies)", g.genre, g.count))
                .fill(colors.color_for(&g.genre))
                .width(0.7)
        })
        .collect();

    Plot::new("genre_plot")
        .x_axis_label("Genre")
        .y_axis_label("Average Rating")
        .x_axis_formatter(category_formatter(labels))
        .include_y(0.0)
        .include_y(10.0)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name("Average rating"));
        });
}

// ---------------------------------------------------------------------------
// Top 10 (table + horizontal bar chart)
// ---------------------------------------------------------------------------

pub fn top_rated_page(ui: &mut Ui, state: &mut AppState) {
    if !chart_header(ui, state, ChartKind::TopRated, "Top 10 Movies by Rating") {
        return;
    }
    let top = state.top_movies();
    let Some(ds) = &state.dataset else {
        return;
    };
    let accent = state.theme.palette().accent;
    let mut clicked = None;

    ui.columns(2, |columns| {
        // ---- Table ----
        let table_ui = &mut columns[0];
        table_ui.label(RichText::new("Click a row for details").small());
        TableBuilder::new(table_ui)
            .striped(true)
            .resizable(true)
            .sense(egui::Sense::click())
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .column(Column::auto())
            .column(Column::remainder().at_least(140.0).clip(true))
            .column(Column::auto())
            .column(Column::auto())
            .header(22.0, |mut header| {
                for title in ["#", "Title", "Year", "Rating"] {
                    header.col(|ui: &mut Ui| {
                        ui.strong(title);
                    });
                }
            })
            .body(|mut body| {
                for (rank, &idx) in top.iter().enumerate() {
                    let movie = &ds.movies[idx];
                    body.row(24.0, |mut row| {
                        row.col(|ui: &mut Ui| {
                            ui.label((rank + 1).to_string());
                        });
                        row.col(|ui: &mut Ui| {
                            ui.label(&movie.title);
                        });
                        row.col(|ui: &mut Ui| {
                            ui.label(movie.year.to_string());
                        });
                        row.col(|ui: &mut Ui| {
                            ui.label(format_rating(movie.rating));
                        });
                        if row.response().clicked() {
                            clicked = Some(idx);
                        }
                    });
                }
            });

        // ---- Chart: best movie on top ----
        let n = top.len();
        let labels: Vec<String> = top
            .iter()
            .rev()
            .map(|&i| truncate_title(&ds.movies[i].title, 30))
            .collect();
        let bars: Vec<Bar> = top
            .iter()
            .enumerate()
            .map(|(rank, &i)| {
                let movie = &ds.movies[i];
                Bar::new((n - 1 - rank) as f64, movie.rating)
                    .name(&movie.title)
                    .fill(accent)
                    .width(0.7)
            })
            .collect();

        Plot::new("top_rated_plot")
            .x_axis_label("Rating")
            .y_axis_formatter(category_formatter(labels))
            .include_x(0.0)
            .include_x(10.0)
            .allow_drag(false)
            .allow_zoom(false)
            .allow_scroll(false)
            .show(&mut columns[1], |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).horizontal().name("Rating"));
            });
    });

    if clicked.is_some() {
        state.selected = clicked;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mark(value: f64) -> GridMark {
        GridMark {
            value,
            step_size: 1.0,
        }
    }

    #[test]
    fn hover_label_shows_movies_per_year() {
        let counts = BTreeMap::from([(1995, 3), (2010, 1)]);
        assert_eq!(year_hover_label(&counts, 1995.2, 8.2666), "1995: 8.27 (3 movies)");
        assert_eq!(year_hover_label(&counts, 2010.0, 8.8), "2010: 8.80 (1 movie)");
        assert_eq!(year_hover_label(&counts, 2003.0, 8.0), "2003: 8.00");
    }

    #[test]
    fn category_labels_only_on_whole_marks() {
        let fmt = category_formatter(vec!["Drama".into(), "Crime".into()]);
        let range = 0.0..=2.0;
        assert_eq!(fmt(mark(0.0), &range), "Drama");
        assert_eq!(fmt(mark(1.0), &range), "Crime");
        assert_eq!(fmt(mark(0.5), &range), "");
        assert_eq!(fmt(mark(2.0), &range), "");
        assert_eq!(fmt(mark(-1.0), &range), "");
    }
}

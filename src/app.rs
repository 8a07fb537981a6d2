use eframe::egui;

use crate::state::{AppState, Page};
use crate::ui::{charts, dashboard, dialogs, export, home, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct CinematicApp {
    pub state: AppState,
}

impl eframe::App for CinematicApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.state.theme.apply(ctx);

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: navigation + filters ----
        egui::SidePanel::left("nav_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: current page ----
        egui::CentralPanel::default().show(ctx, |ui| match self.state.page {
            Page::Home => home::home_page(ui, &mut self.state),
            Page::Dashboard => dashboard::dashboard_page(ui, &mut self.state),
            Page::YearTrends => charts::year_trend_page(ui, &mut self.state),
            Page::GenreAnalysis => charts::genre_page(ui, &mut self.state),
            Page::TopRated => charts::top_rated_page(ui, &mut self.state),
            Page::Export => export::export_page(ui, &mut self.state),
        });

        // ---- Modals ----
        dashboard::details_modal(ctx, &mut self.state);
        dialogs::confirm_clear(ctx, &mut self.state);
        dialogs::message_dialog(ctx, &mut self.state);
    }
}

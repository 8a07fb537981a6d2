mod app;
mod color;
mod data;
mod error;
mod export;
mod state;
mod theme;
mod ui;

use app::CinematicApp;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([1024.0, 700.0]),
        ..Default::default()
    };

    eframe::run_native(
        "CineMatic Analyzer",
        options,
        Box::new(|cc| {
            // Install image loaders so posters can be fetched from URLs and files.
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Ok(Box::new(CinematicApp::default()))
        }),
    )
}

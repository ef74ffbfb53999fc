mod app;
mod color;
mod data;
mod export;
mod predict;
mod state;
mod ui;
mod view;

use std::path::Path;

use app::EmpleoApp;
use eframe::egui;

/// The survey data file; its absence is fatal for the session.
const DATA_FILE: &str = "data/empleodesempleo.csv";

fn main() -> eframe::Result {
    env_logger::init();

    let dataset = match data::loader::load_file(Path::new(DATA_FILE)) {
        Ok(ds) => {
            log::info!("Loaded {} rows covering years {:?}", ds.len(), ds.years());
            ds
        }
        Err(e) => {
            log::error!("Failed to load {DATA_FILE}: {e:#}");
            std::process::exit(1);
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Empleo y Desempleo en el Estado de México",
        options,
        Box::new(move |cc| {
            // Install image loaders so egui can render the Home header image.
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Ok(Box::new(EmpleoApp::new(dataset)))
        }),
    )
}

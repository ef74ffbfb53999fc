use eframe::egui;

use crate::data::model::Dataset;
use crate::state::AppState;
use crate::ui::panels;
use crate::view::View;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct EmpleoApp {
    /// Loaded once at startup; read-only for the rest of the session.
    dataset: Dataset,
    state: AppState,
}

impl EmpleoApp {
    pub fn new(dataset: Dataset) -> Self {
        let state = AppState::new(&dataset);
        EmpleoApp { dataset, state }
    }
}

impl eframe::App for EmpleoApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: title + navigation ----
        egui::TopBottomPanel::top("nav_bar").show(ctx, |ui| {
            panels::nav_bar(ui, &mut self.state);
        });

        // ---- Central panel: the page selected by the view router ----
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| match self.state.view {
                    View::Home => panels::home_view(ui, &self.dataset),
                    View::Year(year) => panels::year_view(ui, &self.dataset, year),
                    View::Prediction => {
                        panels::prediction_view(ui, &self.dataset, &mut self.state)
                    }
                    View::Downloads => {
                        panels::downloads_view(ui, &self.dataset, &mut self.state)
                    }
                });
        });
    }
}

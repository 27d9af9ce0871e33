use eframe::egui;

use crate::analysis::Figure;
use crate::state::ViewerState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct BeanLensApp {
    pub state: ViewerState,
}

impl BeanLensApp {
    pub fn new(figures: Vec<Figure>) -> Self {
        Self {
            state: ViewerState::new(figures),
        }
    }
}

impl eframe::App for BeanLensApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        panels::handle_keys(ctx, &mut self.state);

        // ---- Top panel: navigation ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Central panel: current figure ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::figure_view(ui, &self.state);
        });
    }
}

use eframe::egui::{self, Button, Key, Ui};

use crate::state::ViewerState;

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the navigation bar: previous / next and the figure position.
pub fn top_bar(ui: &mut Ui, state: &mut ViewerState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        if ui
            .add_enabled(state.has_previous(), Button::new("◀ Previous"))
            .clicked()
        {
            state.previous();
        }
        if ui
            .add_enabled(state.has_next(), Button::new("Next ▶"))
            .clicked()
        {
            state.next();
        }

        ui.separator();

        if !state.figures.is_empty() {
            ui.label(state.position_label());
        }
    });
}

/// Arrow keys step through the figures.
pub fn handle_keys(ctx: &egui::Context, state: &mut ViewerState) {
    let (left, right) = ctx.input(|i| {
        (
            i.key_pressed(Key::ArrowLeft),
            i.key_pressed(Key::ArrowRight),
        )
    });
    if left {
        state.previous();
    }
    if right {
        state.next();
    }
}

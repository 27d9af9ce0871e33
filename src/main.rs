mod analysis;
mod app;
mod color;
mod data;
mod state;
mod ui;

use std::path::Path;

use anyhow::anyhow;
use app::BeanLensApp;
use eframe::egui;

/// Where the Dry Bean workbook is expected, relative to the working directory.
const DATA_PATH: &str = "DryBeanDataset/Dry_Bean_Dataset.xlsx";

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut stdout = std::io::stdout().lock();
    let mut dataset = data::loader::load_data(Path::new(DATA_PATH), &mut stdout);
    let figures = analysis::analyze_data(dataset.as_mut(), &mut stdout)?;
    drop(stdout);

    if figures.is_empty() {
        return Ok(());
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Bean Lens – Dry Bean Analysis",
        options,
        Box::new(|_cc| Ok(Box::new(BeanLensApp::new(figures)))),
    )
    .map_err(|e| anyhow!("viewer failed: {e}"))
}

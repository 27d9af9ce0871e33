use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, Plot};

use crate::analysis::Figure;
use crate::color::{BAR_BLUE, SKY_BLUE};
use crate::data::histogram::Histogram;
use crate::state::ViewerState;
use crate::ui::heatmap;

// ---------------------------------------------------------------------------
// Figure view (central panel)
// ---------------------------------------------------------------------------

/// Render the current figure in the central panel.
pub fn figure_view(ui: &mut Ui, state: &ViewerState) {
    let figure = match state.current_figure() {
        Some(figure) => figure,
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("No figures to show");
            });
            return;
        }
    };

    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(figure.title());
    });
    ui.add_space(4.0);

    let (x_label, y_label) = figure.axis_labels().unwrap_or_default();

    match figure {
        Figure::Histogram { histogram, .. } => {
            histogram_plot(ui, state.current, histogram, x_label, y_label);
        }
        Figure::ClassDistribution { counts } => {
            let labels = counts.iter().map(|(code, _)| code.to_string()).collect();
            let values = counts.iter().map(|(_, count)| *count as f64).collect();
            category_plot(ui, state.current, labels, values, BAR_BLUE, x_label, y_label);
        }
        Figure::CorrelationHeatmap { matrix } => {
            heatmap::correlation_heatmap(ui, matrix);
        }
        Figure::MissingValues { percentages } => {
            let labels = percentages.iter().map(|(name, _)| name.clone()).collect();
            let values = percentages.iter().map(|(_, pct)| *pct).collect();
            category_plot(ui, state.current, labels, values, SKY_BLUE, x_label, y_label);
        }
    }
}

// ---------------------------------------------------------------------------
// Histogram
// ---------------------------------------------------------------------------

fn histogram_plot(ui: &mut Ui, id: usize, histogram: &Histogram, x_label: String, y_label: String) {
    let width = histogram.bin_width();
    let bars: Vec<Bar> = histogram
        .bars()
        .map(|(center, count)| {
            Bar::new(center, count as f64)
                .width(width)
                .name(format!(
                    "{:.3} – {:.3}",
                    center - width / 2.0,
                    center + width / 2.0
                ))
                .fill(BAR_BLUE)
                .stroke((1.0, Color32::BLACK))
        })
        .collect();

    Plot::new(("figure", id))
        .x_axis_label(x_label)
        .y_axis_label(y_label)
        .include_y(0.0)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).color(BAR_BLUE));
        });
}

// ---------------------------------------------------------------------------
// Bar chart over named categories
// ---------------------------------------------------------------------------

/// One bar per label at x = 0, 1, 2, …; the x axis shows the labels.
fn category_plot(
    ui: &mut Ui,
    id: usize,
    labels: Vec<String>,
    values: Vec<f64>,
    fill: Color32,
    x_label: String,
    y_label: String,
) {
    let bars: Vec<Bar> = labels
        .iter()
        .zip(&values)
        .enumerate()
        .map(|(i, (label, value))| {
            Bar::new(i as f64, *value)
                .width(0.5)
                .name(label)
                .fill(fill)
        })
        .collect();

    let axis_labels = labels;
    Plot::new(("figure", id))
        .x_axis_label(x_label)
        .y_axis_label(y_label)
        .x_axis_formatter(move |mark, _range| category_label(&axis_labels, mark.value))
        .include_y(0.0)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).color(fill));
        });
}

/// Label for grid marks that fall on a category position, blank elsewhere.
fn category_label(labels: &[String], value: f64) -> String {
    let idx = value.round();
    if (value - idx).abs() > 1e-6 || idx < 0.0 {
        return String::new();
    }
    labels.get(idx as usize).cloned().unwrap_or_default()
}

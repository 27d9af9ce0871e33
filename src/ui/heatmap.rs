use std::f32::consts::FRAC_PI_2;

use eframe::egui::epaint::TextShape;
use eframe::egui::{
    Align2, Color32, FontId, Painter, Pos2, Rect, Sense, Stroke, StrokeKind, Ui, Vec2,
};

use crate::color::DivergingScale;
use crate::data::correlation::CorrelationMatrix;

const LABEL_FONT: f32 = 12.0;
const GAP: f32 = 6.0;
const COLORBAR_WIDTH: f32 = 18.0;
const COLORBAR_STEPS: usize = 64;

// ---------------------------------------------------------------------------
// Correlation heatmap
// ---------------------------------------------------------------------------

/// Paint `matrix` as a grid of coloured cells annotated with two-decimal
/// coefficients, row labels on the left, column labels rotated underneath and
/// a colour bar on the right.
pub fn correlation_heatmap(ui: &mut Ui, matrix: &CorrelationMatrix) {
    let n = matrix.size();
    if n == 0 {
        return;
    }
    let scale = DivergingScale::coolwarm();

    let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::hover());
    let area = response.rect;
    let label_font = FontId::proportional(LABEL_FONT);
    let label_color = ui.visuals().text_color();

    let galleys: Vec<_> = matrix
        .labels
        .iter()
        .map(|label| painter.layout_no_wrap(label.clone(), label_font.clone(), label_color))
        .collect();
    let label_extent = galleys
        .iter()
        .map(|g| g.size().x)
        .fold(0.0_f32, f32::max)
        + GAP;

    // Square grid in whatever space the labels and colour bar leave.
    let colorbar_extent = COLORBAR_WIDTH + 6.0 * LABEL_FONT;
    let avail = Vec2::new(
        area.width() - label_extent - colorbar_extent - GAP,
        area.height() - label_extent,
    );
    let cell = (avail.x.min(avail.y) / n as f32).max(4.0);
    let grid = Rect::from_min_size(
        Pos2::new(area.left() + label_extent, area.top()),
        Vec2::splat(cell * n as f32),
    );

    let annotation_font = FontId::proportional((cell * 0.3).clamp(6.0, 14.0));
    for row in 0..n {
        for col in 0..n {
            let value = matrix.get(row, col);
            let min = grid.min + Vec2::new(col as f32 * cell, row as f32 * cell);
            let rect = Rect::from_min_size(min, Vec2::splat(cell));
            painter.rect_filled(rect, 0.0, scale.color_for(value));
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                format_coefficient(value),
                annotation_font.clone(),
                scale.text_color_for(value),
            );
        }
    }

    for (i, galley) in galleys.into_iter().enumerate() {
        let center = grid.top() + (i as f32 + 0.5) * cell;
        // Row label, right-aligned against the grid.
        painter.galley(
            Pos2::new(grid.left() - GAP - galley.size().x, center - galley.size().y / 2.0),
            galley.clone(),
            label_color,
        );
        // Column label, rotated to read bottom-up, ending at the grid edge.
        let x = grid.left() + (i as f32 + 0.5) * cell - galley.size().y / 2.0;
        let y = grid.bottom() + GAP + galley.size().x;
        painter.add(TextShape::new(Pos2::new(x, y), galley, label_color).with_angle(-FRAC_PI_2));
    }

    colorbar(&painter, &scale, grid, &label_font, label_color);
}

fn colorbar(
    painter: &Painter,
    scale: &DivergingScale,
    grid: Rect,
    font: &FontId,
    text_color: Color32,
) {
    let bar = Rect::from_min_size(
        Pos2::new(grid.right() + 2.0 * GAP, grid.top()),
        Vec2::new(COLORBAR_WIDTH, grid.height()),
    );
    let (min, max) = scale.range();
    let step = bar.height() / COLORBAR_STEPS as f32;

    for i in 0..COLORBAR_STEPS {
        // Top of the bar is the maximum.
        let t = 1.0 - (i as f64 + 0.5) / COLORBAR_STEPS as f64;
        let value = min + (max - min) * t;
        let rect = Rect::from_min_size(
            Pos2::new(bar.left(), bar.top() + i as f32 * step),
            Vec2::new(bar.width(), step + 0.5),
        );
        painter.rect_filled(rect, 0.0, scale.color_for(value));
    }
    painter.rect_stroke(bar, 0.0, Stroke::new(1.0, text_color), StrokeKind::Outside);

    for tick in [max, (min + max) / 2.0, min] {
        let t = ((max - tick) / (max - min)) as f32;
        painter.text(
            Pos2::new(bar.right() + GAP, bar.top() + t * bar.height()),
            Align2::LEFT_CENTER,
            format!("{tick:.1}"),
            font.clone(),
            text_color,
        );
    }
}

/// Two-decimal annotation; undefined coefficients show as `nan`.
fn format_coefficient(value: f64) -> String {
    if value.is_nan() {
        "nan".to_string()
    } else {
        format!("{value:.2}")
    }
}

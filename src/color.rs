use eframe::egui::Color32;
use palette::{IntoColor, Lab, LinSrgb, Mix, Srgb};

/// Default bar fill for histograms and the class chart.
pub const BAR_BLUE: Color32 = Color32::from_rgb(31, 119, 180);
/// Fill for the missing-value chart.
pub const SKY_BLUE: Color32 = Color32::from_rgb(135, 206, 235);
/// Heatmap cells whose coefficient is undefined.
pub const UNDEFINED_CELL: Color32 = Color32::from_gray(60);

// ---------------------------------------------------------------------------
// Diverging cool-warm scale
// ---------------------------------------------------------------------------

/// Blue → light grey → red, interpolated in Lab so lightness changes evenly
/// on both sides of the midpoint.
#[derive(Debug, Clone)]
pub struct DivergingScale {
    low: Lab,
    mid: Lab,
    high: Lab,
    min: f64,
    max: f64,
}

impl DivergingScale {
    /// The cool-warm scale over `[-1, 1]`, centered on 0.
    pub fn coolwarm() -> Self {
        Self::new(
            Srgb::new(0.230, 0.299, 0.754),
            Srgb::new(0.865, 0.865, 0.865),
            Srgb::new(0.706, 0.016, 0.150),
            -1.0,
            1.0,
        )
    }

    pub fn new(low: Srgb, mid: Srgb, high: Srgb, min: f64, max: f64) -> Self {
        Self {
            low: to_lab(low),
            mid: to_lab(mid),
            high: to_lab(high),
            min,
            max,
        }
    }

    /// Colour for `value`; values outside the range are clamped and NaN maps
    /// to [`UNDEFINED_CELL`].
    pub fn color_for(&self, value: f64) -> Color32 {
        if value.is_nan() {
            return UNDEFINED_CELL;
        }
        let center = (self.min + self.max) / 2.0;
        let value = value.clamp(self.min, self.max);

        let lab = if value < center {
            let t = (value - self.min) / (center - self.min);
            self.low.mix(self.mid, t as f32)
        } else {
            let t = (value - center) / (self.max - center);
            self.mid.mix(self.high, t as f32)
        };

        let linear: LinSrgb = lab.into_color();
        to_color32(Srgb::from_linear(linear))
    }

    /// Black or white, whichever reads better on top of `color_for(value)`.
    pub fn text_color_for(&self, value: f64) -> Color32 {
        let c = self.color_for(value);
        let luma = 0.299 * c.r() as f32 + 0.587 * c.g() as f32 + 0.114 * c.b() as f32;
        if luma > 140.0 {
            Color32::BLACK
        } else {
            Color32::WHITE
        }
    }

    pub fn range(&self) -> (f64, f64) {
        (self.min, self.max)
    }
}

fn to_lab(rgb: Srgb) -> Lab {
    let linear: LinSrgb = rgb.into_linear();
    linear.into_color()
}

fn to_color32(rgb: Srgb) -> Color32 {
    let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color32::from_rgb(channel(rgb.red), channel(rgb.green), channel(rgb.blue))
}

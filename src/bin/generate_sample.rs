//! Writes a synthetic workbook shaped like the UCI Dry Bean dataset so the
//! analyzer can be run without the real file.
//!
//! Usage: `generate_sample [output.xlsx]`

use std::f64::consts::PI;
use std::path::PathBuf;

use anyhow::{Context, Result};
use rust_xlsxwriter::Workbook;

const DEFAULT_OUTPUT: &str = "DryBeanDataset/Dry_Bean_Dataset.xlsx";

/// Share of measurement cells left blank.
const BLANK_RATE: f64 = 0.01;

const HEADERS: [&str; 17] = [
    "Area",
    "Perimeter",
    "MajorAxisLength",
    "MinorAxisLength",
    "AspectRation",
    "Eccentricity",
    "ConvexArea",
    "EquivDiameter",
    "Extent",
    "Solidity",
    "roundness",
    "Compactness",
    "ShapeFactor1",
    "ShapeFactor2",
    "ShapeFactor3",
    "ShapeFactor4",
    "Class",
];

/// Variety, count, mean major axis, mean minor axis (pixels).
const VARIETIES: [(&str, usize, f64, f64); 7] = [
    ("SEKER", 203, 251.3, 201.9),
    ("BARBUNYA", 132, 370.0, 240.3),
    ("BOMBAY", 52, 593.2, 374.4),
    ("CALI", 163, 408.2, 247.8),
    ("HOROZ", 193, 372.6, 184.2),
    ("SIRA", 264, 299.4, 190.8),
    ("DERMASON", 355, 246.6, 160.0),
];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos();
        mean + std_dev * z
    }
}

/// The 16 shape measurements of one bean, derived from an ellipse with some
/// outline roughness.
fn measure_bean(major_mean: f64, minor_mean: f64, rng: &mut SimpleRng) -> [f64; 16] {
    let major = rng.gauss(major_mean, major_mean * 0.06);
    let minor = rng.gauss(minor_mean, minor_mean * 0.06).min(major);
    let solidity = rng.gauss(0.987, 0.004).min(0.999);
    let extent = rng.gauss(0.75, 0.04);

    let (a, b) = (major / 2.0, minor / 2.0);
    let area = PI * a * b * solidity;
    let h = ((a - b) / (a + b)).powi(2);
    let ellipse_perimeter = PI * (a + b) * (1.0 + 3.0 * h / (10.0 + (4.0 - 3.0 * h).sqrt()));
    let perimeter = ellipse_perimeter * rng.gauss(1.02, 0.005);
    let convex_area = area / solidity;
    let equiv_diameter = (4.0 * area / PI).sqrt();

    [
        area.round(),
        perimeter,
        major,
        minor,
        major / minor,
        (1.0 - (minor / major).powi(2)).sqrt(),
        convex_area.round(),
        equiv_diameter,
        extent,
        solidity,
        4.0 * PI * area / perimeter.powi(2),
        equiv_diameter / major,
        major / area,
        minor / area,
        area / (PI * a * a),
        area / (PI * a * b),
    ]
}

fn main() -> Result<()> {
    let output: PathBuf = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_OUTPUT.to_string())
        .into();
    let mut rng = SimpleRng::new(42);

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    for (col, header) in HEADERS.iter().enumerate() {
        sheet.write_string(0, col as u16, *header)?;
    }

    let mut row: u32 = 1;
    let mut blanks = 0usize;
    for (variety, count, major, minor) in VARIETIES {
        for _ in 0..count {
            let measurements = measure_bean(major, minor, &mut rng);
            for (col, value) in measurements.iter().enumerate() {
                if rng.next_f64() < BLANK_RATE {
                    blanks += 1;
                    continue;
                }
                sheet.write_number(row, col as u16, *value)?;
            }
            sheet.write_string(row, measurements.len() as u16, variety)?;
            row += 1;
        }
    }

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    workbook
        .save(&output)
        .with_context(|| format!("writing {}", output.display()))?;

    println!(
        "Wrote {} beans ({blanks} blank cells) to {}",
        row - 1,
        output.display()
    );
    Ok(())
}

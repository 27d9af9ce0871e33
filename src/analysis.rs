use std::io::Write;

use anyhow::{Context, Result};

use crate::data::correlation::CorrelationMatrix;
use crate::data::describe::describe;
use crate::data::encoding::{encode_column, value_counts};
use crate::data::histogram::Histogram;
use crate::data::missing::missing_percentages;
use crate::data::model::Dataset;

pub const CLASS_COLUMN: &str = "Class";
pub const HISTOGRAM_BINS: usize = 10;

// ---------------------------------------------------------------------------
// Figures produced by the analysis
// ---------------------------------------------------------------------------

/// One plot, ready for the viewer. Holds computed data only, no UI state.
#[derive(Debug, Clone, PartialEq)]
pub enum Figure {
    /// Frequency histogram of a numeric column.
    Histogram { column: String, histogram: Histogram },
    /// Bar per label code, most frequent first.
    ClassDistribution { counts: Vec<(i64, usize)> },
    /// Annotated heatmap of the numeric correlation matrix.
    CorrelationHeatmap { matrix: CorrelationMatrix },
    /// Bar per column, highest missing percentage first.
    MissingValues { percentages: Vec<(String, f64)> },
}

impl Figure {
    pub fn title(&self) -> String {
        match self {
            Figure::Histogram { column, .. } => column.clone(),
            Figure::ClassDistribution { .. } => "Class Label Distribution".to_string(),
            Figure::CorrelationHeatmap { .. } => "Correlation Matrix".to_string(),
            Figure::MissingValues { .. } => {
                "Percentage of Missing Values in Each Column".to_string()
            }
        }
    }

    /// `(x, y)` axis labels; the heatmap has none.
    pub fn axis_labels(&self) -> Option<(String, String)> {
        match self {
            Figure::Histogram { column, .. } => Some((column.clone(), "Frequency".to_string())),
            Figure::ClassDistribution { .. } => {
                Some(("Class Label".to_string(), "Count".to_string()))
            }
            Figure::CorrelationHeatmap { .. } => None,
            Figure::MissingValues { .. } => Some((
                "Columns".to_string(),
                "Percentage of Missing Values".to_string(),
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// Analysis steps
// ---------------------------------------------------------------------------

/// Runs the analysis when a dataset was loaded. An absent dataset produces
/// no output and no figures.
pub fn analyze_data(dataset: Option<&mut Dataset>, out: &mut impl Write) -> Result<Vec<Figure>> {
    match dataset {
        Some(ds) => analyze(ds, out),
        None => Ok(Vec::new()),
    }
}

/// Prints the summary and builds every figure, in display order.
///
/// The `Class` column, when present, is label-encoded in place.
pub fn analyze(dataset: &mut Dataset, out: &mut impl Write) -> Result<Vec<Figure>> {
    let mut figures = Vec::new();

    writeln!(out, "Summary Statistics:")?;
    writeln!(out, "{}", describe(dataset).to_table())?;

    writeln!(out, "Histograms:")?;
    for column in dataset.numeric_columns() {
        let histogram = Histogram::new(&column.numeric_values(), HISTOGRAM_BINS);
        log::debug!(
            "Histogram for {} ({} values): {:?}",
            column.name,
            histogram.total(),
            histogram.counts
        );
        figures.push(Figure::Histogram {
            column: column.name.clone(),
            histogram,
        });
    }

    match dataset.column_mut(CLASS_COLUMN) {
        Some(class) => {
            let encoding = encode_column(class);
            log::info!(
                "Encoded {} {CLASS_COLUMN} labels: {:?}",
                encoding.n_classes(),
                encoding.classes
            );
            figures.push(Figure::ClassDistribution {
                counts: value_counts(&encoding.codes),
            });
        }
        None => writeln!(out, "Class column not found.")?,
    }

    if dataset.numeric_columns().is_empty() {
        writeln!(out, "No numeric columns found for correlation analysis.")?;
    } else {
        writeln!(out, "Correlation Matrix:")?;
        figures.push(Figure::CorrelationHeatmap {
            matrix: CorrelationMatrix::from_dataset(dataset),
        });
    }

    figures.push(Figure::MissingValues {
        percentages: missing_percentages(dataset),
    });

    out.flush().context("flushing analysis output")?;
    log::info!("Analysis produced {} figures", figures.len());
    Ok(figures)
}

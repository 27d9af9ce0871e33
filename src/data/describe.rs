//! Descriptive statistics for the summary table printed before plotting.

use std::collections::BTreeMap;

use tabled::builder::Builder;
use tabled::settings::Style;

use super::model::{CellValue, Column, Dataset};

/// count / mean / std / min / quartiles / max of one numeric column.
/// Nulls are excluded; every statistic but `count` is NaN for an empty column.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericSummary {
    pub column: String,
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

impl NumericSummary {
    pub fn from_column(column: &Column) -> Self {
        let mut values = column.numeric_values();
        values.sort_by(f64::total_cmp);
        let count = values.len();

        Self {
            column: column.name.clone(),
            count,
            mean: mean(&values),
            std: sample_std(&values),
            min: values.first().copied().unwrap_or(f64::NAN),
            q25: quantile_sorted(&values, 0.25),
            median: quantile_sorted(&values, 0.5),
            q75: quantile_sorted(&values, 0.75),
            max: values.last().copied().unwrap_or(f64::NAN),
        }
    }

    fn stats(&self) -> [f64; 8] {
        [
            self.count as f64,
            self.mean,
            self.std,
            self.min,
            self.q25,
            self.median,
            self.q75,
            self.max,
        ]
    }
}

/// count / unique / top / freq of one column, used when a table has no
/// numeric columns at all.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoricalSummary {
    pub column: String,
    pub count: usize,
    pub unique: usize,
    pub top: Option<CellValue>,
    pub freq: usize,
}

impl CategoricalSummary {
    pub fn from_column(column: &Column) -> Self {
        // value -> (count, first row), so ties resolve to the earliest value
        let mut counts: BTreeMap<&CellValue, (usize, usize)> = BTreeMap::new();
        for (row, value) in column.values.iter().enumerate() {
            if value.is_null() {
                continue;
            }
            counts.entry(value).or_insert((0, row)).0 += 1;
        }

        let top = counts
            .iter()
            .max_by(|(_, (ca, ra)), (_, (cb, rb))| ca.cmp(cb).then(rb.cmp(ra)))
            .map(|(value, (count, _))| ((*value).clone(), *count));

        Self {
            column: column.name.clone(),
            count: counts.values().map(|(c, _)| c).sum(),
            unique: counts.len(),
            freq: top.as_ref().map_or(0, |(_, c)| *c),
            top: top.map(|(v, _)| v),
        }
    }
}

/// Result of describing a dataset.
#[derive(Debug, Clone, PartialEq)]
pub enum Summary {
    Numeric(Vec<NumericSummary>),
    Categorical(Vec<CategoricalSummary>),
}

/// Describes the numeric columns, or every column categorically when there
/// are none.
pub fn describe(dataset: &Dataset) -> Summary {
    let numeric = dataset.numeric_columns();
    if numeric.is_empty() {
        Summary::Categorical(
            dataset
                .columns
                .iter()
                .map(CategoricalSummary::from_column)
                .collect(),
        )
    } else {
        Summary::Numeric(numeric.into_iter().map(NumericSummary::from_column).collect())
    }
}

impl Summary {
    /// Renders the summary with one row per statistic and one column per
    /// dataset column.
    pub fn to_table(&self) -> String {
        let mut builder = Builder::default();
        match self {
            Summary::Numeric(columns) => {
                builder.push_record(
                    std::iter::once(String::new()).chain(columns.iter().map(|c| c.column.clone())),
                );
                let labels = ["count", "mean", "std", "min", "25%", "50%", "75%", "max"];
                for (i, label) in labels.iter().enumerate() {
                    builder.push_record(
                        std::iter::once(label.to_string())
                            .chain(columns.iter().map(|c| format_stat(c.stats()[i]))),
                    );
                }
            }
            Summary::Categorical(columns) => {
                builder.push_record(
                    std::iter::once(String::new()).chain(columns.iter().map(|c| c.column.clone())),
                );
                builder.push_record(
                    std::iter::once("count".to_string())
                        .chain(columns.iter().map(|c| c.count.to_string())),
                );
                builder.push_record(
                    std::iter::once("unique".to_string())
                        .chain(columns.iter().map(|c| c.unique.to_string())),
                );
                builder.push_record(std::iter::once("top".to_string()).chain(
                    columns.iter().map(|c| {
                        c.top.as_ref().map_or_else(|| "NaN".to_string(), |v| v.to_string())
                    }),
                ));
                builder.push_record(
                    std::iter::once("freq".to_string())
                        .chain(columns.iter().map(|c| c.freq.to_string())),
                );
            }
        }

        let mut table = builder.build();
        table.with(Style::psql());
        table.to_string()
    }
}

fn format_stat(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else {
        format!("{value:.6}")
    }
}

// ---------------------------------------------------------------------------
// Scalar statistics
// ---------------------------------------------------------------------------

pub(crate) fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Standard deviation with one delta degree of freedom.
pub(crate) fn sample_std(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return f64::NAN;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (n - 1) as f64;
    variance.sqrt()
}

/// Linear-interpolation quantile of already-sorted values.
pub(crate) fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    match sorted.len() {
        0 => f64::NAN,
        1 => sorted[0],
        n => {
            let pos = q * (n - 1) as f64;
            let lo = pos.floor() as usize;
            let hi = pos.ceil() as usize;
            let frac = pos - lo as f64;
            sorted[lo] + (sorted[hi] - sorted[lo]) * frac
        }
    }
}

use super::model::{Column, Dataset};

/// Square matrix of pairwise Pearson coefficients between numeric columns.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    pub labels: Vec<String>,
    /// Row-major, `labels.len()²` entries. NaN where undefined.
    pub values: Vec<f64>,
}

impl CorrelationMatrix {
    /// Correlates every pair of numeric columns in `dataset`.
    pub fn from_dataset(dataset: &Dataset) -> Self {
        Self::from_columns(&dataset.numeric_columns())
    }

    pub fn from_columns(columns: &[&Column]) -> Self {
        let series: Vec<Vec<Option<f64>>> = columns
            .iter()
            .map(|c| c.values.iter().map(|v| v.as_f64()).collect())
            .collect();

        let n = columns.len();
        let mut values = vec![f64::NAN; n * n];
        for i in 0..n {
            for j in i..n {
                let r = pearson(&series[i], &series[j]);
                values[i * n + j] = r;
                values[j * n + i] = r;
            }
        }

        Self {
            labels: columns.iter().map(|c| c.name.clone()).collect(),
            values,
        }
    }

    pub fn size(&self) -> usize {
        self.labels.len()
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.values[row * self.size() + col]
    }
}

/// Pearson correlation over the rows where both sides are present.
/// NaN with fewer than two such rows or when either side is constant.
pub fn pearson(a: &[Option<f64>], b: &[Option<f64>]) -> f64 {
    let pairs: Vec<(f64, f64)> = a
        .iter()
        .zip(b)
        .filter_map(|(x, y)| Some(((*x)?, (*y)?)))
        .collect();

    let n = pairs.len();
    if n < 2 {
        return f64::NAN;
    }

    let mean_x = pairs.iter().map(|p| p.0).sum::<f64>() / n as f64;
    let mean_y = pairs.iter().map(|p| p.1).sum::<f64>() / n as f64;

    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (x, y) in &pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    if sxx == 0.0 || syy == 0.0 {
        return f64::NAN;
    }
    (sxy / (sxx.sqrt() * syy.sqrt())).clamp(-1.0, 1.0)
}

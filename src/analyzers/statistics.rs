//! Descriptive statistics and Pearson correlations over the cleaned dataset.
//!
//! Two numeric policies are fixed here rather than left to chance:
//! percentiles interpolate linearly between order statistics, and the mode
//! resolves ties to the smallest value.

use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, warn};

use crate::error::{ProcessingError, Result};
use crate::models::{CategorizedRecord, Variable};

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Bessel-corrected (n - 1) variance; undefined below two values.
pub fn sample_variance(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let mean = mean(values)?;
    let squares: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    Some(squares / (values.len() - 1) as f64)
}

/// Linear interpolation between the order statistics of `sorted`, with the
/// rank taken as `p * (n - 1)`. `p` is a fraction in `[0, 1]`.
pub fn percentile(sorted: &[f64], p: f64) -> Option<f64> {
    if sorted.is_empty() || !(0.0..=1.0).contains(&p) {
        return None;
    }

    let rank = p * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let fraction = rank - lower as f64;

    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * fraction)
}

/// Most frequent value of `sorted`; ties go to the smallest value.
pub fn mode(sorted: &[f64]) -> Option<f64> {
    let mut best: Option<(f64, usize)> = None;

    for run in sorted.chunk_by(|a, b| a == b) {
        let count = run.len();
        if best.map_or(true, |(_, best_count)| count > best_count) {
            best = Some((run[0], count));
        }
    }

    best.map(|(value, _)| value)
}

/// `None` when fewer than two pairs exist or either side has zero variance.
pub fn pearson(x: &[f64], y: &[f64]) -> Option<f64> {
    if x.len() != y.len() || x.len() < 2 {
        return None;
    }

    let mean_x = mean(x)?;
    let mean_y = mean(y)?;

    let (mut sxx, mut syy, mut sxy) = (0.0, 0.0, 0.0);
    for (a, b) in x.iter().zip(y) {
        let dx = a - mean_x;
        let dy = b - mean_y;
        sxx += dx * dx;
        syy += dy * dy;
        sxy += dx * dy;
    }

    if sxx == 0.0 || syy == 0.0 {
        return None;
    }

    Some((sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DescriptiveStatistics {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub mode: f64,
    pub variance: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    pub p10: f64,
    pub p25: f64,
    pub p75: f64,
    pub p90: f64,
    pub iqr: f64,
}

impl DescriptiveStatistics {
    pub fn from_values(variable: Variable, values: &[f64]) -> Result<Self> {
        let insufficient = || ProcessingError::InsufficientData {
            variable: variable.name().to_string(),
            count: values.len(),
            required: 2,
        };

        let variance = sample_variance(values).ok_or_else(insufficient)?;
        let mean = mean(values).ok_or_else(insufficient)?;

        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let quantile = |p: f64| percentile(&sorted, p).ok_or_else(insufficient);
        let p25 = quantile(0.25)?;
        let p75 = quantile(0.75)?;

        Ok(Self {
            count: values.len(),
            mean,
            median: quantile(0.5)?,
            mode: mode(&sorted).ok_or_else(insufficient)?,
            variance,
            std_dev: variance.sqrt(),
            min: sorted[0],
            max: sorted[sorted.len() - 1],
            p10: quantile(0.10)?,
            p25,
            p75,
            p90: quantile(0.90)?,
            iqr: p75 - p25,
        })
    }
}

/// Symmetric Pearson matrix. Cells are `None` where the coefficient is
/// undefined (a constant column or too few rows).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    pub variables: Vec<Variable>,
    pub values: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    pub fn from_columns(columns: &[(Variable, Vec<f64>)]) -> Self {
        let n = columns.len();
        let mut values = vec![vec![None; n]; n];

        for i in 0..n {
            let varies = sample_variance(&columns[i].1).is_some_and(|v| v > 0.0);
            values[i][i] = varies.then_some(1.0);

            for j in (i + 1)..n {
                let r = pearson(&columns[i].1, &columns[j].1);
                values[i][j] = r;
                values[j][i] = r;
            }
        }

        Self {
            variables: columns.iter().map(|(v, _)| *v).collect(),
            values,
        }
    }

    fn index_of(&self, variable: Variable) -> Option<usize> {
        self.variables.iter().position(|v| *v == variable)
    }

    pub fn get(&self, a: Variable, b: Variable) -> Option<f64> {
        let i = self.index_of(a)?;
        let j = self.index_of(b)?;
        self.values[i][j]
    }

    /// One column of the matrix, paired with the row variables.
    pub fn column(&self, variable: Variable) -> Vec<(Variable, Option<f64>)> {
        match self.index_of(variable) {
            Some(j) => self
                .variables
                .iter()
                .zip(&self.values)
                .map(|(v, row)| (*v, row[j]))
                .collect(),
            None => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatisticsSummary {
    pub records: usize,
    pub variables: BTreeMap<Variable, DescriptiveStatistics>,
    pub correlations: CorrelationMatrix,
}

impl StatisticsSummary {
    pub fn rain_correlations(&self) -> Vec<(Variable, Option<f64>)> {
        self.correlations.column(Variable::Rain)
    }
}

pub struct StatisticsEngine;

impl StatisticsEngine {
    pub fn new() -> Self {
        Self
    }

    /// Descriptive statistics for each continuous variable. Variables are
    /// independent, so they are computed in parallel over the shared slice.
    pub fn describe(
        &self,
        records: &[CategorizedRecord],
    ) -> Result<BTreeMap<Variable, DescriptiveStatistics>> {
        Variable::CONTINUOUS
            .par_iter()
            .map(|&variable| {
                let values = column_values(records, variable);
                DescriptiveStatistics::from_values(variable, &values).map(|stats| (variable, stats))
            })
            .collect()
    }

    pub fn correlation_matrix(&self, records: &[CategorizedRecord]) -> CorrelationMatrix {
        let columns: Vec<(Variable, Vec<f64>)> = Variable::CORRELATED
            .iter()
            .map(|&variable| (variable, column_values(records, variable)))
            .collect();

        let matrix = CorrelationMatrix::from_columns(&columns);
        for (variable, r) in matrix.column(Variable::Rain) {
            match r {
                Some(r) => debug!("corr({}, rain) = {:.4}", variable, r),
                None => warn!("corr({}, rain) is undefined", variable),
            }
        }
        matrix
    }

    pub fn analyze(&self, records: &[CategorizedRecord]) -> Result<StatisticsSummary> {
        Ok(StatisticsSummary {
            records: records.len(),
            variables: self.describe(records)?,
            correlations: self.correlation_matrix(records),
        })
    }
}

impl Default for StatisticsEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn column_values(records: &[CategorizedRecord], variable: Variable) -> Vec<f64> {
    records.iter().map(|r| variable.value(&r.record)).collect()
}

use serde::Serialize;
use std::fmt;
use tracing::{debug, warn};

use crate::models::{Bin, CategorizedRecord, CleanedRecord, HumidityCategory, TempCategory};

/// Equal-width, three-bin partition of one variable's observed range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Binning {
    /// `[min, lower_cut]`, `(lower_cut, upper_cut]`, `(upper_cut, max]`.
    Ranged {
        min: f64,
        lower_cut: f64,
        upper_cut: f64,
        max: f64,
    },
    /// Every observation has the same value; all records land in the
    /// middle bin.
    Constant { value: f64 },
}

impl Binning {
    /// `None` for an empty series.
    pub fn from_values<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let (min, max) = values.into_iter().fold(None, |bounds, value| match bounds {
            None => Some((value, value)),
            Some((min, max)) => Some((f64::min(min, value), f64::max(max, value))),
        })?;

        if min == max {
            return Some(Binning::Constant { value: min });
        }

        let width = (max - min) / 3.0;
        Some(Binning::Ranged {
            min,
            lower_cut: min + width,
            upper_cut: min + 2.0 * width,
            max,
        })
    }

    /// Boundary values belong to the lower bin.
    pub fn bin(&self, value: f64) -> Bin {
        match *self {
            Binning::Constant { .. } => Bin::Middle,
            Binning::Ranged {
                lower_cut,
                upper_cut,
                ..
            } => {
                if value <= lower_cut {
                    Bin::Lower
                } else if value <= upper_cut {
                    Bin::Middle
                } else {
                    Bin::Upper
                }
            }
        }
    }

    pub fn is_constant(&self) -> bool {
        matches!(self, Binning::Constant { .. })
    }
}

impl fmt::Display for Binning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Binning::Ranged {
                min,
                lower_cut,
                upper_cut,
                max,
            } => write!(
                f,
                "[{:.2}, {:.2}] | ({:.2}, {:.2}] | ({:.2}, {:.2}]",
                min, lower_cut, lower_cut, upper_cut, upper_cut, max
            ),
            Binning::Constant { value } => write!(f, "constant at {:.2}", value),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorizedDataset {
    pub records: Vec<CategorizedRecord>,
    /// `None` when the dataset is empty.
    pub temperature_bins: Option<Binning>,
    pub humidity_bins: Option<Binning>,
}

impl CategorizedDataset {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Labels every record with a temperature and humidity category. Bin edges
/// are computed once from the whole dataset.
pub struct Categorizer;

impl Categorizer {
    pub fn new() -> Self {
        Self
    }

    pub fn categorize(&self, records: &[CleanedRecord]) -> CategorizedDataset {
        let temperature_bins = Binning::from_values(records.iter().map(|r| r.temperature));
        let humidity_bins = Binning::from_values(records.iter().map(|r| r.humidity));

        for (name, bins) in [("temperature", &temperature_bins), ("humidity", &humidity_bins)] {
            match bins {
                Some(b) if b.is_constant() => {
                    warn!("{} is constant across the dataset; using the middle category", name)
                }
                Some(b) => debug!("{} bins: {}", name, b),
                None => {}
            }
        }

        let categorized = match (temperature_bins, humidity_bins) {
            (Some(temp), Some(humidity)) => records
                .iter()
                .map(|record| {
                    CategorizedRecord::new(
                        *record,
                        TempCategory::from(temp.bin(record.temperature)),
                        HumidityCategory::from(humidity.bin(record.humidity)),
                    )
                })
                .collect(),
            _ => Vec::new(),
        };

        CategorizedDataset {
            records: categorized,
            temperature_bins,
            humidity_bins,
        }
    }
}

impl Default for Categorizer {
    fn default() -> Self {
        Self::new()
    }
}

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::fmt;
use tracing::{debug, warn};

use crate::models::{CategorizedRecord, HumidityCategory, TempCategory};

/// An empirical probability kept as counts, so "no qualifying records" stays
/// distinguishable from an observed zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Estimate {
    pub successes: usize,
    pub trials: usize,
}

impl Estimate {
    pub fn new(successes: usize, trials: usize) -> Self {
        Self { successes, trials }
    }

    /// Counts the records matching `given`, and among those the ones matching
    /// `event`.
    pub fn conditional<G, E>(records: &[CategorizedRecord], given: G, event: E) -> Self
    where
        G: Fn(&CategorizedRecord) -> bool,
        E: Fn(&CategorizedRecord) -> bool,
    {
        records
            .iter()
            .filter(|&r| given(r))
            .fold(Estimate::default(), |acc, r| Estimate {
                successes: acc.successes + usize::from(event(r)),
                trials: acc.trials + 1,
            })
    }

    /// `None` when there were no trials.
    pub fn value(&self) -> Option<f64> {
        (self.trials > 0).then(|| self.successes as f64 / self.trials as f64)
    }

    pub fn is_defined(&self) -> bool {
        self.trials > 0
    }
}

impl fmt::Display for Estimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value() {
            Some(p) => write!(f, "{:.4} ({}/{})", p, self.successes, self.trials),
            None => write!(f, "undefined (no qualifying records)"),
        }
    }
}

impl Serialize for Estimate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Estimate", 3)?;
        state.serialize_field("successes", &self.successes)?;
        state.serialize_field("trials", &self.trials)?;
        state.serialize_field("probability", &self.value())?;
        state.end()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CategoryRate<C> {
    pub category: C,
    pub rain: Estimate,
}

/// Population-weighted mean of per-category rain rates. Categories with no
/// records contribute nothing.
pub fn weighted_rain_rate<C>(rates: &[CategoryRate<C>]) -> Option<f64> {
    let total: usize = rates.iter().map(|r| r.rain.trials).sum();
    if total == 0 {
        return None;
    }
    let weighted: f64 = rates
        .iter()
        .filter_map(|r| r.rain.value().map(|p| p * r.rain.trials as f64))
        .sum();
    Some(weighted / total as f64)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProbabilityReport {
    pub records: usize,
    /// P(rain)
    pub rain: Estimate,
    /// P(humidity = High)
    pub high_humidity: Estimate,
    /// P(rain | humidity = High)
    pub rain_given_high_humidity: Estimate,
    /// P(rain | temperature = Cold)
    pub rain_given_cold: Estimate,
    /// P(rain | humidity = High, temperature = Cold)
    pub rain_given_high_humidity_and_cold: Estimate,
    /// P(humidity = High | rain), measured directly on the rainy records.
    pub high_humidity_given_rain: Estimate,
    pub rain_by_temperature: Vec<CategoryRate<TempCategory>>,
    pub rain_by_humidity: Vec<CategoryRate<HumidityCategory>>,
}

impl ProbabilityReport {
    /// P(High | rain) derived through Bayes' theorem from
    /// P(rain | High), P(High) and P(rain). Undefined when any input is, or
    /// when P(rain) is zero.
    pub fn bayes_high_humidity_given_rain(&self) -> Option<f64> {
        let likelihood = self.rain_given_high_humidity.value()?;
        let prior = self.high_humidity.value()?;
        let evidence = self.rain.value().filter(|p| *p > 0.0)?;
        Some(likelihood * prior / evidence)
    }
}

/// Computes every probability from counts over the full categorized dataset.
pub struct ProbabilityEngine;

impl ProbabilityEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn compute(&self, records: &[CategorizedRecord]) -> ProbabilityReport {
        let always = |_: &CategorizedRecord| true;
        let rain = |r: &CategorizedRecord| r.rain();

        let report = ProbabilityReport {
            records: records.len(),
            rain: Estimate::conditional(records, always, rain),
            high_humidity: Estimate::conditional(records, always, |r| r.is_high_humidity()),
            rain_given_high_humidity: Estimate::conditional(records, |r| r.is_high_humidity(), rain),
            rain_given_cold: Estimate::conditional(records, |r| r.is_cold(), rain),
            rain_given_high_humidity_and_cold: Estimate::conditional(
                records,
                |r| r.is_high_humidity() && r.is_cold(),
                rain,
            ),
            high_humidity_given_rain: Estimate::conditional(records, rain, |r| {
                r.is_high_humidity()
            }),
            rain_by_temperature: TempCategory::ALL
                .iter()
                .map(|&category| CategoryRate {
                    category,
                    rain: Estimate::conditional(records, |r| r.temp_category == category, rain),
                })
                .collect(),
            rain_by_humidity: HumidityCategory::ALL
                .iter()
                .map(|&category| CategoryRate {
                    category,
                    rain: Estimate::conditional(records, |r| r.humidity_category == category, rain),
                })
                .collect(),
        };

        for (name, estimate) in [
            ("P(rain)", report.rain),
            ("P(rain | High humidity)", report.rain_given_high_humidity),
            ("P(rain | Cold)", report.rain_given_cold),
            ("P(rain | High humidity, Cold)", report.rain_given_high_humidity_and_cold),
            ("P(High humidity | rain)", report.high_humidity_given_rain),
        ] {
            if estimate.is_defined() {
                debug!("{} = {}", name, estimate);
            } else {
                warn!("{} is undefined: no records satisfy the condition", name);
            }
        }

        report
    }
}

impl Default for ProbabilityEngine {
    fn default() -> Self {
        Self::new()
    }
}

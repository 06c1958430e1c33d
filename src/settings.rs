use chrono::{NaiveDate, NaiveDateTime};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::error::{ProcessingError, Result};
use crate::utils::constants::*;

/// Closed range used for clamping. An absent `max` means unbounded above.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: Option<f64>,
}

impl ValueRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self {
            min,
            max: Some(max),
        }
    }

    pub fn at_least(min: f64) -> Self {
        Self { min, max: None }
    }

    pub fn clamp(&self, value: f64) -> f64 {
        let value = value.max(self.min);
        match self.max {
            Some(max) => value.min(max),
            None => value,
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && self.max.map_or(true, |max| value <= max)
    }

    /// True when every value this range admits is also admitted by `outer`.
    pub fn is_within(&self, outer: &ValueRange) -> bool {
        let upper_ok = match (self.max, outer.max) {
            (_, None) => true,
            (Some(max), Some(limit)) => max <= limit,
            (None, Some(_)) => false,
        };
        self.min >= outer.min && upper_ok
    }

    /// A configured range may narrow `limits` but never widen it.
    fn check(&self, name: &str, limits: &ValueRange) -> Result<()> {
        if self.min.is_nan() || self.max.is_some_and(|max| max.is_nan() || max < self.min) {
            return Err(ProcessingError::Config(format!(
                "invalid {} range: min={} max={:?}",
                name, self.min, self.max
            )));
        }
        if !self.is_within(limits) {
            return Err(ProcessingError::Config(format!(
                "{} range min={} max={:?} exceeds the physical limits min={} max={:?}",
                name, self.min, self.max, limits.min, limits.max
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleaningConfig {
    pub temperature: ValueRange,
    pub humidity: ValueRange,
    pub pressure: ValueRange,
    pub wind_speed: ValueRange,
    pub precipitation: ValueRange,
    /// Longest run of consecutive missing values that forward-fill may bridge.
    pub max_fill_gap: usize,
}

impl Default for CleaningConfig {
    fn default() -> Self {
        Self {
            temperature: ValueRange::new(MIN_VALID_TEMP, MAX_VALID_TEMP),
            humidity: ValueRange::new(MIN_VALID_HUMIDITY, MAX_VALID_HUMIDITY),
            pressure: ValueRange::new(MIN_VALID_PRESSURE, MAX_VALID_PRESSURE),
            wind_speed: ValueRange::at_least(MIN_VALID_WIND_SPEED),
            precipitation: ValueRange::at_least(MIN_VALID_PRECIPITATION),
            max_fill_gap: DEFAULT_MAX_FILL_GAP,
        }
    }
}

impl CleaningConfig {
    /// Ranges in `WeatherRecord::FIELDS` order.
    pub fn ranges(&self) -> [ValueRange; 5] {
        [
            self.temperature,
            self.humidity,
            self.pressure,
            self.wind_speed,
            self.precipitation,
        ]
    }

    pub fn check(&self) -> Result<()> {
        let limits = CleaningConfig::default();
        self.temperature.check("temperature", &limits.temperature)?;
        self.humidity.check("humidity", &limits.humidity)?;
        self.pressure.check("pressure", &limits.pressure)?;
        self.wind_speed.check("wind_speed", &limits.wind_speed)?;
        self.precipitation.check("precipitation", &limits.precipitation)?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SampleConfig {
    pub rows: usize,
    pub seed: u64,
    pub start: NaiveDateTime,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_SAMPLE_ROWS,
            seed: DEFAULT_SEED,
            start: NaiveDate::from_ymd_opt(2024, 1, 1)
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub cleaning: CleaningConfig,
    pub sample: SampleConfig,
}

impl Settings {
    /// Layers defaults, an optional settings file and `WEATHER_PROB_*`
    /// environment variables (nested keys separated by `__`).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();

        if let Some(path) = path {
            debug!("Loading settings from {}", path.display());
            builder = builder.add_source(File::from(path));
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.cleaning.check()?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_value_range_clamp() {
        let humidity = ValueRange::new(0.0, 100.0);
        assert_eq!(humidity.clamp(-3.0), 0.0);
        assert_eq!(humidity.clamp(104.5), 100.0);
        assert_eq!(humidity.clamp(55.0), 55.0);

        let wind = ValueRange::at_least(0.0);
        assert_eq!(wind.clamp(-1.0), 0.0);
        assert_eq!(wind.clamp(250.0), 250.0);
        assert!(wind.contains(1.0e6));
    }

    #[test]
    fn test_defaults_match_physical_ranges() {
        let cleaning = CleaningConfig::default();
        assert_eq!(cleaning.temperature, ValueRange::new(-50.0, 60.0));
        assert_eq!(cleaning.pressure, ValueRange::new(800.0, 1100.0));
        assert_eq!(cleaning.max_fill_gap, 1);
        assert!(cleaning.check().is_ok());
    }

    #[test]
    fn test_load_from_file() -> Result<()> {
        let mut file = Builder::new().suffix(".toml").tempfile()?;
        writeln!(file, "[cleaning]")?;
        writeln!(file, "max_fill_gap = 2")?;
        writeln!(file, "[cleaning.temperature]")?;
        writeln!(file, "min = -40.0")?;
        writeln!(file, "max = 50.0")?;
        writeln!(file, "[sample]")?;
        writeln!(file, "seed = 7")?;

        let settings = Settings::load(Some(file.path()))?;

        assert_eq!(settings.cleaning.max_fill_gap, 2);
        assert_eq!(settings.cleaning.temperature, ValueRange::new(-40.0, 50.0));
        assert_eq!(settings.cleaning.humidity, ValueRange::new(0.0, 100.0));
        assert_eq!(settings.sample.seed, 7);
        assert_eq!(settings.sample.rows, DEFAULT_SAMPLE_ROWS);
        Ok(())
    }

    #[test]
    fn test_inverted_range_rejected() -> Result<()> {
        let mut file = Builder::new().suffix(".toml").tempfile()?;
        writeln!(file, "[cleaning.humidity]")?;
        writeln!(file, "min = 100.0")?;
        writeln!(file, "max = 0.0")?;

        let result = Settings::load(Some(file.path()));
        assert!(matches!(result, Err(ProcessingError::Config(_))));
        Ok(())
    }

    #[test]
    fn test_widened_range_rejected() {
        let cleaning = CleaningConfig {
            temperature: ValueRange::new(-80.0, 80.0),
            ..CleaningConfig::default()
        };
        assert!(matches!(cleaning.check(), Err(ProcessingError::Config(_))));

        let capped = CleaningConfig {
            precipitation: ValueRange::new(0.0, 200.0),
            ..CleaningConfig::default()
        };
        assert!(capped.check().is_ok());

        let negative_wind = CleaningConfig {
            wind_speed: ValueRange::at_least(-5.0),
            ..CleaningConfig::default()
        };
        assert!(matches!(negative_wind.check(), Err(ProcessingError::Config(_))));
    }

    #[test]
    fn test_open_upper_bound_not_within_closed_range() {
        let humidity = ValueRange::new(0.0, 100.0);

        assert!(ValueRange::new(10.0, 90.0).is_within(&humidity));
        assert!(!ValueRange::at_least(10.0).is_within(&humidity));
        assert!(ValueRange::new(0.0, 5.0).is_within(&ValueRange::at_least(0.0)));
    }

    #[test]
    fn test_widened_range_from_file_rejected() -> Result<()> {
        let mut file = Builder::new().suffix(".toml").tempfile()?;
        writeln!(file, "[cleaning.temperature]")?;
        writeln!(file, "min = -50.0")?;
        writeln!(file, "max = 80.0")?;

        let result = Settings::load(Some(file.path()));
        assert!(matches!(result, Err(ProcessingError::Config(_))));
        Ok(())
    }
}

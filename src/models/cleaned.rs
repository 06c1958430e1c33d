use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{ProcessingError, Result};
use crate::models::WeatherRecord;

/// A complete observation with every value inside its physical range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
pub struct CleanedRecord {
    pub timestamp: NaiveDateTime,

    #[validate(range(min = -50.0, max = 60.0))]
    pub temperature: f64,

    #[validate(range(min = 0.0, max = 100.0))]
    pub humidity: f64,

    #[validate(range(min = 800.0, max = 1100.0))]
    pub pressure: f64,

    #[validate(range(min = 0.0))]
    pub wind_speed: f64,

    #[validate(range(min = 0.0))]
    pub precipitation: f64,

    pub rain: bool,
}

impl CleanedRecord {
    /// Builds a record and derives `rain` from the precipitation value.
    pub fn new(
        timestamp: NaiveDateTime,
        temperature: f64,
        humidity: f64,
        pressure: f64,
        wind_speed: f64,
        precipitation: f64,
    ) -> Self {
        Self {
            timestamp,
            temperature,
            humidity,
            pressure,
            wind_speed,
            precipitation,
            rain: precipitation > 0.0,
        }
    }

    /// Checks value ranges and that `rain` agrees with precipitation.
    pub fn validate_relationships(&self) -> Result<()> {
        if self.rain != (self.precipitation > 0.0) {
            return Err(ProcessingError::InvalidFormat(format!(
                "rain flag {} disagrees with precipitation {} at {}",
                self.rain, self.precipitation, self.timestamp
            )));
        }

        self.validate()?;
        Ok(())
    }

    pub fn rain_indicator(&self) -> f64 {
        if self.rain {
            1.0
        } else {
            0.0
        }
    }
}

impl From<&CleanedRecord> for WeatherRecord {
    fn from(record: &CleanedRecord) -> Self {
        WeatherRecord::new(
            record.timestamp,
            Some(record.temperature),
            Some(record.humidity),
            Some(record.pressure),
            Some(record.wind_speed),
            Some(record.precipitation),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn timestamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 16)
            .unwrap()
            .and_hms_opt(13, 15, 0)
            .unwrap()
    }

    #[test]
    fn test_rain_derived_from_precipitation() {
        let dry = CleanedRecord::new(timestamp(), 20.0, 60.0, 1005.0, 5.0, 0.0);
        let wet = CleanedRecord::new(timestamp(), 15.0, 85.0, 1008.0, 10.0, 3.0);

        assert!(!dry.rain);
        assert!(wet.rain);
        assert_eq!(wet.rain_indicator(), 1.0);
    }

    #[test]
    fn test_out_of_range_fails_validation() {
        let mut record = CleanedRecord::new(timestamp(), 20.0, 60.0, 1005.0, 5.0, 0.0);
        record.humidity = 120.0;

        assert!(matches!(
            record.validate_relationships(),
            Err(ProcessingError::Validation(_))
        ));
    }

    #[test]
    fn test_inconsistent_rain_flag() {
        let mut record = CleanedRecord::new(timestamp(), 20.0, 60.0, 1005.0, 5.0, 0.0);
        record.rain = true;

        assert!(matches!(
            record.validate_relationships(),
            Err(ProcessingError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_into_raw_record() {
        let record = CleanedRecord::new(timestamp(), 20.0, 60.0, 1005.0, 5.0, 0.4);
        let raw = WeatherRecord::from(&record);

        assert!(raw.is_complete());
        assert_eq!(raw.precipitation, Some(0.4));
    }
}

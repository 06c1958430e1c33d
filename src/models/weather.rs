use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{ProcessingError, Result};

/// One raw observation as loaded from the input file. Any measurement may be
/// missing; the timestamp never is.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherRecord {
    pub timestamp: NaiveDateTime,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub pressure: Option<f64>,
    pub wind_speed: Option<f64>,
    pub precipitation: Option<f64>,
}

impl WeatherRecord {
    pub fn new(
        timestamp: NaiveDateTime,
        temperature: Option<f64>,
        humidity: Option<f64>,
        pressure: Option<f64>,
        wind_speed: Option<f64>,
        precipitation: Option<f64>,
    ) -> Self {
        Self {
            timestamp,
            temperature,
            humidity,
            pressure,
            wind_speed,
            precipitation,
        }
    }

    /// Builds a record from values in [`Self::FIELDS`] order.
    pub fn from_measurements(timestamp: NaiveDateTime, values: [Option<f64>; 5]) -> Self {
        let [temperature, humidity, pressure, wind_speed, precipitation] = values;
        Self::new(
            timestamp,
            temperature,
            humidity,
            pressure,
            wind_speed,
            precipitation,
        )
    }

    pub fn builder() -> WeatherRecordBuilder {
        WeatherRecordBuilder::new()
    }

    pub const FIELDS: [&'static str; 5] = [
        "temperature",
        "humidity",
        "pressure",
        "wind_speed",
        "precipitation",
    ];

    pub fn measurements(&self) -> [Option<f64>; 5] {
        [
            self.temperature,
            self.humidity,
            self.pressure,
            self.wind_speed,
            self.precipitation,
        ]
    }

    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    pub fn missing_fields(&self) -> Vec<&'static str> {
        Self::FIELDS
            .iter()
            .zip(self.measurements())
            .filter(|(_, value)| value.is_none())
            .map(|(name, _)| *name)
            .collect()
    }
}

#[derive(Debug, Default)]
pub struct WeatherRecordBuilder {
    timestamp: Option<NaiveDateTime>,
    temperature: Option<f64>,
    humidity: Option<f64>,
    pressure: Option<f64>,
    wind_speed: Option<f64>,
    precipitation: Option<f64>,
}

impl WeatherRecordBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn timestamp(mut self, timestamp: NaiveDateTime) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn humidity(mut self, humidity: f64) -> Self {
        self.humidity = Some(humidity);
        self
    }

    pub fn pressure(mut self, pressure: f64) -> Self {
        self.pressure = Some(pressure);
        self
    }

    pub fn wind_speed(mut self, wind_speed: f64) -> Self {
        self.wind_speed = Some(wind_speed);
        self
    }

    pub fn precipitation(mut self, precipitation: f64) -> Self {
        self.precipitation = Some(precipitation);
        self
    }

    pub fn build(self) -> Result<WeatherRecord> {
        let timestamp = self
            .timestamp
            .ok_or_else(|| ProcessingError::InvalidFormat("timestamp is required".to_string()))?;

        Ok(WeatherRecord {
            timestamp,
            temperature: self.temperature,
            humidity: self.humidity,
            pressure: self.pressure,
            wind_speed: self.wind_speed,
            precipitation: self.precipitation,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 16)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_builder_pattern() {
        let record = WeatherRecord::builder()
            .timestamp(at(13))
            .temperature(20.0)
            .humidity(60.0)
            .pressure(1005.0)
            .wind_speed(5.0)
            .precipitation(0.0)
            .build()
            .unwrap();

        assert_eq!(record.timestamp, at(13));
        assert_eq!(record.humidity, Some(60.0));
        assert!(record.is_complete());
    }

    #[test]
    fn test_partial_record() {
        let record = WeatherRecord::builder()
            .timestamp(at(1))
            .temperature(10.0)
            .build()
            .unwrap();

        assert!(!record.is_complete());
        assert_eq!(
            record.missing_fields(),
            vec!["humidity", "pressure", "wind_speed", "precipitation"]
        );
    }

    #[test]
    fn test_builder_requires_timestamp() {
        let result = WeatherRecord::builder().temperature(10.0).build();
        assert!(matches!(result, Err(ProcessingError::InvalidFormat(_))));
    }
}

use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

use crate::error::{ProcessingError, Result};
use crate::models::WeatherRecord;
use crate::readers::{column_index, line_of};
use crate::utils::constants::*;
use crate::utils::parse_timestamp;

struct RawColumns {
    timestamp: usize,
    temperature: usize,
    humidity: usize,
    pressure: usize,
    wind_speed: usize,
    precipitation: usize,
}

impl RawColumns {
    fn locate(headers: &StringRecord) -> Result<Self> {
        Ok(Self {
            timestamp: column_index(headers, COL_LAST_UPDATED)?,
            temperature: column_index(headers, COL_TEMPERATURE_CELSIUS)?,
            humidity: column_index(headers, COL_HUMIDITY)?,
            pressure: column_index(headers, COL_PRESSURE_MB)?,
            wind_speed: column_index(headers, COL_WIND_KPH)?,
            precipitation: column_index(headers, COL_PRECIP_MM)?,
        })
    }
}

/// Loads raw observations from a weather export. Only the six columns the
/// analysis needs are read; everything else in the file is ignored.
pub struct WeatherReader {
    delimiter: u8,
}

impl WeatherReader {
    pub fn new() -> Self {
        Self { delimiter: b',' }
    }

    pub fn with_delimiter(delimiter: u8) -> Self {
        Self { delimiter }
    }

    pub fn read_records(&self, path: &Path) -> Result<Vec<WeatherRecord>> {
        let file = File::open(path)?;
        let records = self.read_from(file)?;
        info!("Loaded {} raw records from {}", records.len(), path.display());
        Ok(records)
    }

    /// Missing cells become `None`. A missing column, an unparseable
    /// timestamp or a non-numeric measurement fails the whole load.
    pub fn read_from<R: Read>(&self, source: R) -> Result<Vec<WeatherRecord>> {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .trim(Trim::All)
            .from_reader(source);

        let columns = RawColumns::locate(reader.headers()?)?;
        let mut records = Vec::new();

        for row in reader.records() {
            let row = row?;
            let line = line_of(&row);

            let raw_timestamp = row.get(columns.timestamp).unwrap_or_default();
            let timestamp =
                parse_timestamp(raw_timestamp).ok_or_else(|| ProcessingError::InvalidTimestamp {
                    line,
                    value: raw_timestamp.to_string(),
                })?;

            records.push(WeatherRecord::new(
                timestamp,
                parse_measurement(&row, columns.temperature, COL_TEMPERATURE_CELSIUS, line)?,
                parse_measurement(&row, columns.humidity, COL_HUMIDITY, line)?,
                parse_measurement(&row, columns.pressure, COL_PRESSURE_MB, line)?,
                parse_measurement(&row, columns.wind_speed, COL_WIND_KPH, line)?,
                parse_measurement(&row, columns.precipitation, COL_PRECIP_MM, line)?,
            ));
        }

        debug!("Parsed {} rows", records.len());
        Ok(records)
    }
}

impl Default for WeatherReader {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_measurement(
    row: &StringRecord,
    index: usize,
    column: &str,
    line: u64,
) -> Result<Option<f64>> {
    let cell = row.get(index).unwrap_or_default().trim();

    if MISSING_MARKERS.contains(&cell.to_ascii_lowercase().as_str()) {
        return Ok(None);
    }

    let value = cell.parse::<f64>().map_err(|_| {
        ProcessingError::InvalidFormat(format!(
            "Invalid {} value '{}' on line {}",
            column, cell, line
        ))
    })?;

    // Infinities carry no measurement; treat them like blanks.
    Ok(value.is_finite().then_some(value))
}

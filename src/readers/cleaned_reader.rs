use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::info;

use crate::error::{ProcessingError, Result};
use crate::models::CleanedRecord;
use crate::readers::{column_index, line_of};
use crate::utils::constants::*;
use crate::utils::parse_timestamp;

struct CleanedColumns {
    datetime: usize,
    temperature: usize,
    humidity: usize,
    pressure: usize,
    wind_speed: usize,
    /// Absent in six-column files; `rain` is then the only rain signal.
    precipitation: Option<usize>,
    rain: usize,
}

impl CleanedColumns {
    fn locate(headers: &StringRecord) -> Result<Self> {
        Ok(Self {
            datetime: column_index(headers, COL_DATETIME)?,
            temperature: column_index(headers, COL_TEMPERATURE)?,
            humidity: column_index(headers, COL_HUMIDITY)?,
            pressure: column_index(headers, COL_PRESSURE)?,
            wind_speed: column_index(headers, COL_WIND_SPEED)?,
            precipitation: column_index(headers, COL_PRECIPITATION).ok(),
            rain: column_index(headers, COL_RAIN)?,
        })
    }
}

/// Reads the intermediate file written by [`crate::writers::CleanedWriter`].
///
/// The file is expected to already satisfy every cleaning invariant, so any
/// violation (blank cell, out-of-range value, rain flag disagreeing with
/// precipitation, timestamps not strictly increasing) is an error.
///
/// The `precipitation` column is optional. Without it the `rain` flag is
/// taken as given and precipitation is recorded as the 0/1 rain indicator.
pub struct CleanedReader;

impl CleanedReader {
    pub fn new() -> Self {
        Self
    }

    pub fn read_records(&self, path: &Path) -> Result<Vec<CleanedRecord>> {
        let file = File::open(path)?;
        let records = self.read_from(file)?;
        info!("Loaded {} cleaned records from {}", records.len(), path.display());
        Ok(records)
    }

    pub fn read_from<R: Read>(&self, source: R) -> Result<Vec<CleanedRecord>> {
        let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(source);
        let columns = CleanedColumns::locate(reader.headers()?)?;
        let mut records: Vec<CleanedRecord> = Vec::new();

        for row in reader.records() {
            let row = row?;
            let line = line_of(&row);

            let raw_timestamp = row.get(columns.datetime).unwrap_or_default();
            let timestamp =
                parse_timestamp(raw_timestamp).ok_or_else(|| ProcessingError::InvalidTimestamp {
                    line,
                    value: raw_timestamp.to_string(),
                })?;

            let rain = parse_flag(&row, columns.rain, line)?;
            let precipitation = match columns.precipitation {
                Some(index) => parse_value(&row, index, COL_PRECIPITATION, line)?,
                None => f64::from(u8::from(rain)),
            };

            let record = CleanedRecord {
                timestamp,
                temperature: parse_value(&row, columns.temperature, COL_TEMPERATURE, line)?,
                humidity: parse_value(&row, columns.humidity, COL_HUMIDITY, line)?,
                pressure: parse_value(&row, columns.pressure, COL_PRESSURE, line)?,
                wind_speed: parse_value(&row, columns.wind_speed, COL_WIND_SPEED, line)?,
                precipitation,
                rain,
            };
            record.validate_relationships()?;

            if let Some(previous) = records.last() {
                if previous.timestamp >= record.timestamp {
                    return Err(ProcessingError::InvalidFormat(format!(
                        "Timestamp {} on line {} does not follow {}",
                        record.timestamp, line, previous.timestamp
                    )));
                }
            }

            records.push(record);
        }

        Ok(records)
    }
}

impl Default for CleanedReader {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_value(row: &StringRecord, index: usize, column: &str, line: u64) -> Result<f64> {
    let cell = row.get(index).unwrap_or_default();
    cell.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| {
            ProcessingError::InvalidFormat(format!(
                "Invalid {} value '{}' on line {}",
                column, cell, line
            ))
        })
}

fn parse_flag(row: &StringRecord, index: usize, line: u64) -> Result<bool> {
    match row.get(index).unwrap_or_default() {
        "1" | "true" => Ok(true),
        "0" | "false" => Ok(false),
        other => Err(ProcessingError::InvalidFormat(format!(
            "Invalid rain flag '{}' on line {}",
            other, line
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "datetime,temperature,humidity,pressure,wind_speed,precipitation,rain";

    fn read(body: &str) -> Result<Vec<CleanedRecord>> {
        CleanedReader::new().read_from(format!("{}\n{}", HEADER, body).as_bytes())
    }

    #[test]
    fn test_read_cleaned_rows() {
        let records = read(
            "2024-05-16 13:15:00,20,60,1005,5,0,0\n\
             2024-05-16 14:15:00,15,85,1008,10,3,1\n",
        )
        .unwrap();

        assert_eq!(records.len(), 2);
        assert!(!records[0].rain);
        assert!(records[1].rain);
        assert_eq!(records[1].precipitation, 3.0);
    }

    #[test]
    fn test_extra_columns_ignored() {
        let data = "station,datetime,temperature,humidity,pressure,wind_speed,precipitation,rain\n\
                    A,2024-05-16 13:15:00,20,60,1005,5,0,0\n";
        let records = CleanedReader::new().read_from(data.as_bytes()).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_six_column_layout_without_precipitation() {
        let data = "datetime,temperature,humidity,pressure,wind_speed,rain\n\
                    2024-05-16 13:15:00,20,60,1005,5,0\n\
                    2024-05-16 14:15:00,15,85,1008,10,1\n";

        let records = CleanedReader::new().read_from(data.as_bytes()).unwrap();

        assert_eq!(records.len(), 2);
        assert!(!records[0].rain);
        assert!(records[1].rain);
        assert_eq!(records[0].precipitation, 0.0);
        assert_eq!(records[1].precipitation, records[1].rain_indicator());
        assert!(records.iter().all(|r| r.validate_relationships().is_ok()));
    }

    #[test]
    fn test_missing_rain_column_rejected() {
        let data = "datetime,temperature,humidity,pressure,wind_speed,precipitation\n\
                    2024-05-16 13:15:00,20,60,1005,5,0\n";

        let result = CleanedReader::new().read_from(data.as_bytes());
        assert!(matches!(
            result,
            Err(ProcessingError::MissingColumn { column }) if column == "rain"
        ));
    }

    #[test]
    fn test_out_of_range_value_rejected() {
        let result = read("2024-05-16 13:15:00,20,160,1005,5,0,0\n");
        assert!(matches!(result, Err(ProcessingError::Validation(_))));
    }

    #[test]
    fn test_rain_flag_must_match_precipitation() {
        let result = read("2024-05-16 13:15:00,20,60,1005,5,0,1\n");
        assert!(matches!(result, Err(ProcessingError::InvalidFormat(_))));
    }

    #[test]
    fn test_blank_value_rejected() {
        let result = read("2024-05-16 13:15:00,,60,1005,5,0,0\n");
        assert!(matches!(result, Err(ProcessingError::InvalidFormat(_))));
    }

    #[test]
    fn test_unordered_timestamps_rejected() {
        let result = read(
            "2024-05-16 14:15:00,20,60,1005,5,0,0\n\
             2024-05-16 13:15:00,20,60,1005,5,0,0\n",
        );
        assert!(matches!(result, Err(ProcessingError::InvalidFormat(_))));
    }
}

use csv::Writer;
use std::io::Write;
use std::path::Path;
use tracing::info;

use crate::error::Result;
use crate::models::{CleanedRecord, WeatherRecord};
use crate::utils::constants::*;
use crate::utils::format_timestamp;
use crate::writers::create_output;

// f64 Display prints the shortest string that parses back to the same value.
fn format_value(value: f64) -> String {
    value.to_string()
}

fn format_optional(value: Option<f64>) -> String {
    value.map(format_value).unwrap_or_default()
}

/// Writes the intermediate cleaned file that sits between the cleaning and
/// analysis stages.
pub struct CleanedWriter;

impl CleanedWriter {
    pub fn new() -> Self {
        Self
    }

    pub fn write_records(&self, records: &[CleanedRecord], path: &Path) -> Result<()> {
        self.write_to(records, create_output(path)?)?;
        info!("Wrote {} cleaned records to {}", records.len(), path.display());
        Ok(())
    }

    pub fn write_to<W: Write>(&self, records: &[CleanedRecord], sink: W) -> Result<()> {
        let mut writer = Writer::from_writer(sink);
        writer.write_record([
            COL_DATETIME,
            COL_TEMPERATURE,
            COL_HUMIDITY,
            COL_PRESSURE,
            COL_WIND_SPEED,
            COL_PRECIPITATION,
            COL_RAIN,
        ])?;

        for record in records {
            writer.write_record([
                format_timestamp(&record.timestamp),
                format_value(record.temperature),
                format_value(record.humidity),
                format_value(record.pressure),
                format_value(record.wind_speed),
                format_value(record.precipitation),
                String::from(if record.rain { "1" } else { "0" }),
            ])?;
        }

        writer.flush()?;
        Ok(())
    }
}

impl Default for CleanedWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Writes raw observations in the loader's input layout. Missing values are
/// left blank.
pub struct RawWriter;

impl RawWriter {
    pub fn new() -> Self {
        Self
    }

    pub fn write_records(&self, records: &[WeatherRecord], path: &Path) -> Result<()> {
        self.write_to(records, create_output(path)?)?;
        info!("Wrote {} raw records to {}", records.len(), path.display());
        Ok(())
    }

    pub fn write_to<W: Write>(&self, records: &[WeatherRecord], sink: W) -> Result<()> {
        let mut writer = Writer::from_writer(sink);
        writer.write_record([
            COL_LAST_UPDATED,
            COL_TEMPERATURE_CELSIUS,
            COL_HUMIDITY,
            COL_PRESSURE_MB,
            COL_WIND_KPH,
            COL_PRECIP_MM,
        ])?;

        for record in records {
            writer.write_record([
                format_timestamp(&record.timestamp),
                format_optional(record.temperature),
                format_optional(record.humidity),
                format_optional(record.pressure),
                format_optional(record.wind_speed),
                format_optional(record.precipitation),
            ])?;
        }

        writer.flush()?;
        Ok(())
    }
}

impl Default for RawWriter {
    fn default() -> Self {
        Self::new()
    }
}

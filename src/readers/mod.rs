pub mod cleaned_reader;
pub mod weather_reader;

pub use cleaned_reader::CleanedReader;
pub use weather_reader::WeatherReader;

use csv::StringRecord;

use crate::error::{ProcessingError, Result};

/// Position of a required column in the header row.
pub(crate) fn column_index(headers: &StringRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|header| header.trim() == name)
        .ok_or_else(|| ProcessingError::MissingColumn {
            column: name.to_string(),
        })
}

pub(crate) fn line_of(record: &StringRecord) -> u64 {
    record.position().map_or(0, |p| p.line())
}

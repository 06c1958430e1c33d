use chrono::NaiveDateTime;
use serde::Serialize;
use std::collections::HashSet;
use tracing::{debug, info};

use crate::models::{CleanedRecord, WeatherRecord};
use crate::settings::CleaningConfig;

/// What the cleaner changed. Anomalies are repaired silently, so this is the
/// only place they become visible.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CleaningReport {
    pub input_records: usize,
    pub duplicates_removed: usize,
    pub values_clamped: usize,
    pub values_filled: usize,
    pub records_dropped: usize,
    pub output_records: usize,
}

impl CleaningReport {
    pub fn summary(&self) -> String {
        format!(
            "=== Cleaning Report ===\n\
            Input Records: {}\n\
            Duplicates Removed: {}\n\
            Values Clamped: {}\n\
            Values Forward-Filled: {}\n\
            Records Dropped: {}\n\
            Output Records: {}",
            self.input_records,
            self.duplicates_removed,
            self.values_clamped,
            self.values_filled,
            self.records_dropped,
            self.output_records
        )
    }
}

/// Turns raw observations into complete, range-checked records ordered by
/// timestamp.
///
/// Steps, in order: keep the first occurrence of each timestamp, clamp every
/// value into its configured range, sort ascending, forward-fill runs of
/// missing values no longer than `max_fill_gap`, then drop any record that
/// still has a missing value. The input slice is never modified.
pub struct DataCleaner {
    config: CleaningConfig,
}

impl DataCleaner {
    pub fn new() -> Self {
        Self {
            config: CleaningConfig::default(),
        }
    }

    pub fn with_config(config: CleaningConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CleaningConfig {
        &self.config
    }

    pub fn clean(&self, raw: &[WeatherRecord]) -> (Vec<CleanedRecord>, CleaningReport) {
        let mut report = CleaningReport {
            input_records: raw.len(),
            ..CleaningReport::default()
        };

        let mut records = self.deduplicate(raw);
        report.duplicates_removed = raw.len() - records.len();

        for record in records.iter_mut() {
            report.values_clamped += self.clamp(record);
        }

        records.sort_by_key(|r| r.timestamp);

        let timestamps: Vec<NaiveDateTime> = records.iter().map(|r| r.timestamp).collect();
        let mut rows: Vec<[Option<f64>; 5]> = records.iter().map(|r| r.measurements()).collect();
        report.values_filled = self.forward_fill(&mut rows);

        let mut cleaned = Vec::with_capacity(rows.len());
        for (timestamp, values) in timestamps.into_iter().zip(rows) {
            match values {
                [Some(temperature), Some(humidity), Some(pressure), Some(wind_speed), Some(precipitation)] => {
                    cleaned.push(CleanedRecord::new(
                        timestamp,
                        temperature,
                        humidity,
                        pressure,
                        wind_speed,
                        precipitation,
                    ));
                }
                _ => {
                    let record = WeatherRecord::from_measurements(timestamp, values);
                    debug!(
                        "Dropping record at {}: missing {:?}",
                        timestamp,
                        record.missing_fields()
                    );
                    report.records_dropped += 1;
                }
            }
        }

        report.output_records = cleaned.len();
        info!(
            "Cleaned {} records: {} duplicates, {} clamped, {} filled, {} dropped",
            report.input_records,
            report.duplicates_removed,
            report.values_clamped,
            report.values_filled,
            report.records_dropped
        );

        (cleaned, report)
    }

    /// First occurrence of each timestamp wins.
    fn deduplicate(&self, raw: &[WeatherRecord]) -> Vec<WeatherRecord> {
        let mut seen = HashSet::with_capacity(raw.len());
        raw.iter()
            .filter(|record| seen.insert(record.timestamp))
            .copied()
            .collect()
    }

    /// Returns how many values were moved into range.
    fn clamp(&self, record: &mut WeatherRecord) -> usize {
        let mut clamped = 0;
        let mut values = record.measurements();

        for (value, range) in values.iter_mut().zip(self.config.ranges()) {
            if let Some(v) = value {
                let bounded = range.clamp(*v);
                if bounded != *v {
                    *v = bounded;
                    clamped += 1;
                }
            }
        }

        *record = WeatherRecord::from_measurements(record.timestamp, values);
        clamped
    }

    /// Fills each run of missing values in a column from the value just before
    /// it, but only when the whole run is at most `max_fill_gap` long. Longer
    /// runs stay missing in full. Returns the number of values filled.
    fn forward_fill(&self, rows: &mut [[Option<f64>; 5]]) -> usize {
        let limit = self.config.max_fill_gap;
        let mut filled = 0;

        for field in 0..WeatherRecord::FIELDS.len() {
            let mut i = 0;
            while i < rows.len() {
                if rows[i][field].is_some() {
                    i += 1;
                    continue;
                }

                let start = i;
                while i < rows.len() && rows[i][field].is_none() {
                    i += 1;
                }
                let run = i - start;

                let previous = start.checked_sub(1).and_then(|p| rows[p][field]);
                if let Some(value) = previous {
                    if run <= limit {
                        for row in &mut rows[start..i] {
                            row[field] = Some(value);
                        }
                        filled += run;
                    }
                }
            }
        }

        filled
    }
}

impl Default for DataCleaner {
    fn default() -> Self {
        Self::new()
    }
}

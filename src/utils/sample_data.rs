use chrono::Duration;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::PI;

use crate::models::WeatherRecord;
use crate::settings::SampleConfig;

const DUPLICATE_RATE: f64 = 0.02;
const OUT_OF_RANGE_RATE: f64 = 0.01;
const MISSING_RATE: f64 = 0.02;

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Generates hourly raw observations starting at `config.start`.
///
/// Output depends only on `config`: the same seed always yields the same
/// records. Rain is more likely in humid, cold hours. A small share of rows
/// is deliberately dirty (repeated timestamps, out-of-range values, missing
/// cells) so the generated file exercises every cleaning rule.
pub fn generate_sample_data(config: &SampleConfig) -> Vec<WeatherRecord> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut records = Vec::with_capacity(config.rows + config.rows / 20);

    for hour in 0..config.rows {
        let timestamp = config.start + Duration::hours(hour as i64);
        let phase = 2.0 * PI * (hour % 24) as f64 / 24.0;

        let temperature = 15.0 + 8.0 * phase.sin() + rng.gen_range(-4.0..4.0);
        let humidity = 70.0 - 1.5 * (temperature - 15.0) + rng.gen_range(-12.0..12.0);
        let pressure = 1013.0 + rng.gen_range(-15.0..15.0);
        let wind_speed = rng.gen_range(0.0..30.0);

        let mut rain_chance: f64 = 0.1;
        if humidity > 80.0 {
            rain_chance += 0.45;
        }
        if temperature < 10.0 {
            rain_chance += 0.15;
        }
        let precipitation = if rng.gen_bool(rain_chance.min(1.0)) {
            rng.gen_range(0.1..12.0)
        } else {
            0.0
        };

        let mut record = WeatherRecord::new(
            timestamp,
            Some(round1(temperature)),
            Some(round1(humidity)),
            Some(round1(pressure)),
            Some(round1(wind_speed)),
            Some(round1(precipitation)),
        );

        if rng.gen_bool(OUT_OF_RANGE_RATE) {
            match rng.gen_range(0..3) {
                0 => record.humidity = Some(104.0),
                1 => record.wind_speed = Some(-2.0),
                _ => record.pressure = Some(1125.0),
            }
        }

        // The first row is never blanked so a complete series can always start.
        if hour > 0 && rng.gen_bool(MISSING_RATE) {
            match rng.gen_range(0..5) {
                0 => record.temperature = None,
                1 => record.humidity = None,
                2 => record.pressure = None,
                3 => record.wind_speed = None,
                _ => record.precipitation = None,
            }
        }

        records.push(record);

        if rng.gen_bool(DUPLICATE_RATE) {
            records.push(record);
        }
    }

    records
}

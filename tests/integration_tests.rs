use clap::Parser;
use pretty_assertions::assert_eq;
use std::collections::HashSet;
use std::fs;
use tempfile::TempDir;
use weather_prob::analyzers::probability::weighted_rain_rate;
use weather_prob::analyzers::WeatherAnalyzer;
use weather_prob::cli::{run, Cli};
use weather_prob::error::ProcessingError;
use weather_prob::models::{CleanedRecord, WeatherRecord};
use weather_prob::processors::{Categorizer, DataCleaner};
use weather_prob::readers::{CleanedReader, WeatherReader};
use weather_prob::settings::SampleConfig;
use weather_prob::utils::generate_sample_data;
use weather_prob::writers::{CleanedWriter, RawWriter};

fn sample(rows: usize, seed: u64) -> Vec<WeatherRecord> {
    generate_sample_data(&SampleConfig {
        rows,
        seed,
        ..SampleConfig::default()
    })
}

#[test]
fn test_duplicate_rows_example() {
    let raw = "last_updated,temperature_celsius,humidity,pressure_mb,wind_kph,precip_mm\n\
               2024-05-16 13:15,20,60,1005,5,0\n\
               2024-05-16 13:15,20,60,1005,5,0\n\
               2024-05-16 14:15,15,85,1008,10,3\n";

    let records = WeatherReader::new().read_from(raw.as_bytes()).unwrap();
    let (cleaned, report) = DataCleaner::new().clean(&records);

    assert_eq!(cleaned.len(), 2);
    assert_eq!(
        cleaned.iter().map(|r| r.rain).collect::<Vec<_>>(),
        vec![false, true]
    );
    assert_eq!(report.duplicates_removed, 1);
}

#[test]
fn test_cleaned_invariants_on_generated_data() {
    let raw = sample(1000, 42);
    let (cleaned, report) = DataCleaner::new().clean(&raw);

    assert!(!cleaned.is_empty());
    assert!(report.duplicates_removed > 0);
    assert_eq!(
        report.input_records,
        report.duplicates_removed + report.records_dropped + report.output_records
    );

    for pair in cleaned.windows(2) {
        assert!(pair[0].timestamp < pair[1].timestamp);
    }

    for record in &cleaned {
        assert!((-50.0..=60.0).contains(&record.temperature));
        assert!((0.0..=100.0).contains(&record.humidity));
        assert!((800.0..=1100.0).contains(&record.pressure));
        assert!(record.wind_speed >= 0.0);
        assert!(record.precipitation >= 0.0);
        assert_eq!(record.rain, record.precipitation > 0.0);
        assert!(record.validate_relationships().is_ok());
    }

    let unique: HashSet<_> = cleaned.iter().map(|r| r.timestamp).collect();
    assert_eq!(unique.len(), cleaned.len());
}

#[test]
fn test_cleaning_generated_data_is_idempotent() {
    let cleaner = DataCleaner::new();
    let (once, _) = cleaner.clean(&sample(500, 7));
    let as_raw: Vec<WeatherRecord> = once.iter().map(WeatherRecord::from).collect();
    let (twice, _) = cleaner.clean(&as_raw);

    assert_eq!(twice, once);
}

#[test]
fn test_files_round_trip_through_disk() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let raw_path = temp_dir.path().join("raw.csv");
    let cleaned_path = temp_dir.path().join("nested").join("cleaned.csv");

    let raw = sample(300, 11);
    RawWriter::new().write_records(&raw, &raw_path).unwrap();
    let loaded = WeatherReader::new().read_records(&raw_path).unwrap();
    assert_eq!(loaded, raw);

    let (cleaned, _) = DataCleaner::new().clean(&loaded);
    CleanedWriter::new()
        .write_records(&cleaned, &cleaned_path)
        .unwrap();
    let read_back: Vec<CleanedRecord> = CleanedReader::new().read_records(&cleaned_path).unwrap();

    assert_eq!(read_back, cleaned);
}

#[test]
fn test_missing_input_file_is_io_error() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let result = WeatherReader::new().read_records(&temp_dir.path().join("absent.csv"));

    assert!(matches!(result, Err(ProcessingError::Io(_))));
}

#[test]
fn test_probabilities_on_generated_data() {
    let (cleaned, _) = DataCleaner::new().clean(&sample(2000, 42));
    let dataset = Categorizer::new().categorize(&cleaned);
    let report = WeatherAnalyzer::new().analyze(&dataset).unwrap();
    let p = &report.probabilities;

    let marginal = p.rain.value().unwrap();
    assert!(marginal > 0.0 && marginal < 1.0);

    let by_temp = weighted_rain_rate(&p.rain_by_temperature).unwrap();
    let by_humidity = weighted_rain_rate(&p.rain_by_humidity).unwrap();
    assert!((by_temp - marginal).abs() < 1e-9);
    assert!((by_humidity - marginal).abs() < 1e-9);

    // Generated rain favours humid hours.
    assert!(p.rain_given_high_humidity.value().unwrap() > marginal);

    let empirical = p.high_humidity_given_rain.value().unwrap();
    let derived = p.bayes_high_humidity_given_rain().unwrap();
    assert!((empirical - derived).abs() < 1e-9);

    let stats = report.statistics.expect("statistics for 2000 rows");
    assert_eq!(stats.variables.len(), 4);
    assert_eq!(stats.rain_correlations().len(), 5);
}

#[test]
fn test_categorization_repeatable_across_runs() {
    let (cleaned, _) = DataCleaner::new().clean(&sample(400, 3));
    let categorizer = Categorizer::new();

    assert_eq!(categorizer.categorize(&cleaned), categorizer.categorize(&cleaned));
}

#[test]
fn test_cli_generate_then_run() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let raw_path = temp_dir.path().join("raw.csv");
    let cleaned_path = temp_dir.path().join("cleaned.csv");
    let json_path = temp_dir.path().join("report.json");
    let log_path = temp_dir.path().join("run.log");

    RawWriter::new()
        .write_records(&sample(200, 5), &raw_path)
        .unwrap();

    let cli = Cli::parse_from([
        "weather-prob",
        "--log-file",
        log_path.to_str().unwrap(),
        "run",
        "-i",
        raw_path.to_str().unwrap(),
        "--cleaned-output",
        cleaned_path.to_str().unwrap(),
        "--json",
        json_path.to_str().unwrap(),
    ]);
    run(cli).unwrap();

    assert!(cleaned_path.exists());
    let report: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
    assert!(report["probabilities"]["rain"]["trials"].as_u64().unwrap() > 0);
    assert!(fs::read_to_string(&log_path).unwrap().contains("Analyzed"));
}

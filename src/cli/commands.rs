use std::path::Path;
use tracing::debug;

use crate::analyzers::WeatherAnalyzer;
use crate::cli::args::{Cli, Commands};
use crate::error::{ProcessingError, Result};
use crate::models::CleanedRecord;
use crate::processors::DataCleaner;
use crate::readers::{CleanedReader, WeatherReader};
use crate::settings::{CleaningConfig, Settings};
use crate::utils::progress::ProgressReporter;
use crate::utils::{generate_sample_data, init_logging};
use crate::writers::{CleanedWriter, RawWriter};

pub fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose, cli.log_file.as_deref())?;

    let settings = Settings::load(cli.config.as_deref())?;
    debug!("Settings: {:?}", settings);

    match cli.command {
        Commands::Clean {
            input,
            output,
            delimiter,
        } => {
            println!("Cleaning weather data...");
            println!("Input file: {}", input.display());
            println!("Output file: {}", output.display());

            let cleaned = load_and_clean(&input, delimiter, &settings.cleaning)?;
            CleanedWriter::new().write_records(&cleaned, &output)?;

            println!("Cleaning complete!");
        }

        Commands::Analyze { input, json } => {
            println!("Analyzing cleaned file: {}", input.display());

            let progress = ProgressReporter::new_spinner("Reading cleaned data...", false);
            let records = CleanedReader::new().read_records(&input)?;
            progress.finish_with_count("Read", records.len());

            analyze(&records, json.as_deref())?;
        }

        Commands::Run {
            input,
            cleaned_output,
            json,
            delimiter,
        } => {
            println!("Running full pipeline on {}", input.display());

            let cleaned = load_and_clean(&input, delimiter, &settings.cleaning)?;
            if let Some(path) = cleaned_output {
                CleanedWriter::new().write_records(&cleaned, &path)?;
                println!("Cleaned data written to {}", path.display());
            }

            analyze(&cleaned, json.as_deref())?;
        }

        Commands::Generate { output, rows, seed } => {
            let mut sample = settings.sample;
            if let Some(rows) = rows {
                sample.rows = rows;
            }
            if let Some(seed) = seed {
                sample.seed = seed;
            }

            println!(
                "Generating {} hourly observations (seed {})...",
                sample.rows, sample.seed
            );
            let records = generate_sample_data(&sample);
            RawWriter::new().write_records(&records, &output)?;
            println!("Wrote {} rows to {}", records.len(), output.display());
        }
    }

    Ok(())
}

fn delimiter_byte(delimiter: char) -> Result<u8> {
    u8::try_from(delimiter)
        .ok()
        .filter(|b| b.is_ascii())
        .ok_or_else(|| ProcessingError::Config(format!("delimiter must be ASCII, got '{}'", delimiter)))
}

fn load_and_clean(input: &Path, delimiter: char, config: &CleaningConfig) -> Result<Vec<CleanedRecord>> {
    let progress = ProgressReporter::new_spinner("Loading raw data...", false);
    let raw = WeatherReader::with_delimiter(delimiter_byte(delimiter)?).read_records(input)?;
    progress.set_message("Cleaning records...");

    let (cleaned, report) = DataCleaner::with_config(config.clone()).clean(&raw);
    progress.finish_with_count("Cleaned", cleaned.len());

    println!("\n{}", report.summary());
    if cleaned.is_empty() {
        println!("No records survived cleaning");
    }

    Ok(cleaned)
}

fn analyze(records: &[CleanedRecord], json: Option<&Path>) -> Result<()> {
    let report = WeatherAnalyzer::new().analyze_records(records)?;
    println!("\n{}", report.detailed_summary());

    if let Some(path) = json {
        report.write_json(path)?;
        println!("\nReport written to {}", path.display());
    }

    Ok(())
}

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "weather-prob")]
#[command(about = "Clean weather records and estimate rain probabilities")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Log file path")]
    pub log_file: Option<PathBuf>,

    #[arg(long, global = true, help = "Settings file (toml, yaml or json)")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Clean a raw weather export into the intermediate file
    Clean {
        #[arg(short, long, help = "Raw input CSV file")]
        input: PathBuf,

        #[arg(short, long, help = "Cleaned output CSV file")]
        output: PathBuf,

        #[arg(short, long, default_value = ",")]
        delimiter: char,
    },

    /// Analyze a cleaned intermediate file
    Analyze {
        #[arg(short, long, help = "Cleaned input CSV file")]
        input: PathBuf,

        #[arg(long, help = "Write the full report as JSON")]
        json: Option<PathBuf>,
    },

    /// Clean and analyze a raw weather export in one pass
    Run {
        #[arg(short, long, help = "Raw input CSV file")]
        input: PathBuf,

        #[arg(long, help = "Also write the cleaned intermediate file")]
        cleaned_output: Option<PathBuf>,

        #[arg(long, help = "Write the full report as JSON")]
        json: Option<PathBuf>,

        #[arg(short, long, default_value = ",")]
        delimiter: char,
    },

    /// Generate seeded sample data in the raw input layout
    Generate {
        #[arg(short, long, help = "Output CSV file")]
        output: PathBuf,

        #[arg(short, long, help = "Number of hourly observations [default: from settings]")]
        rows: Option<usize>,

        #[arg(short, long, help = "Random seed [default: from settings]")]
        seed: Option<u64>,
    },
}

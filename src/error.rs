use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProcessingError>;

#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Date parsing error: {0}")]
    DateParse(#[from] chrono::ParseError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Settings error: {0}")]
    Settings(#[from] config::ConfigError),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Required column '{column}' not found in input")]
    MissingColumn { column: String },

    #[error("Unparseable timestamp '{value}' on line {line}")]
    InvalidTimestamp { line: u64, value: String },

    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    #[error("Not enough data for {variable}: {count} value(s), at least {required} required")]
    InsufficientData {
        variable: String,
        count: usize,
        required: usize,
    },
}

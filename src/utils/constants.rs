/// Raw input column names
pub const COL_LAST_UPDATED: &str = "last_updated";
pub const COL_TEMPERATURE_CELSIUS: &str = "temperature_celsius";
pub const COL_HUMIDITY: &str = "humidity";
pub const COL_PRESSURE_MB: &str = "pressure_mb";
pub const COL_WIND_KPH: &str = "wind_kph";
pub const COL_PRECIP_MM: &str = "precip_mm";

/// Intermediate (cleaned) file column names
pub const COL_DATETIME: &str = "datetime";
pub const COL_TEMPERATURE: &str = "temperature";
pub const COL_PRESSURE: &str = "pressure";
pub const COL_WIND_SPEED: &str = "wind_speed";
pub const COL_PRECIPITATION: &str = "precipitation";
pub const COL_RAIN: &str = "rain";

/// Physical value ranges
pub const MIN_VALID_TEMP: f64 = -50.0;
pub const MAX_VALID_TEMP: f64 = 60.0;
pub const MIN_VALID_HUMIDITY: f64 = 0.0;
pub const MAX_VALID_HUMIDITY: f64 = 100.0;
pub const MIN_VALID_PRESSURE: f64 = 800.0;
pub const MAX_VALID_PRESSURE: f64 = 1100.0;
pub const MIN_VALID_WIND_SPEED: f64 = 0.0;
pub const MIN_VALID_PRECIPITATION: f64 = 0.0;

/// Cleaning defaults
pub const DEFAULT_MAX_FILL_GAP: usize = 1;

/// Timestamp formats, tried in order
pub const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];
pub const DATETIME_OUTPUT_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Cells treated as missing values
pub const MISSING_MARKERS: &[&str] = &["", "na", "n/a", "nan", "null", "none"];

/// Sample data defaults
pub const DEFAULT_SAMPLE_ROWS: usize = 500;
pub const DEFAULT_SEED: u64 = 42;

/// Environment prefix for settings overrides
pub const ENV_PREFIX: &str = "WEATHER_PROB";

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::CleanedRecord;

/// A numeric column of the cleaned dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variable {
    Temperature,
    Humidity,
    Pressure,
    WindSpeed,
    Rain,
}

impl Variable {
    /// Variables that receive descriptive statistics.
    pub const CONTINUOUS: [Variable; 4] = [
        Variable::Temperature,
        Variable::Humidity,
        Variable::Pressure,
        Variable::WindSpeed,
    ];

    /// Variables in the correlation matrix, in matrix order.
    pub const CORRELATED: [Variable; 5] = [
        Variable::Temperature,
        Variable::Humidity,
        Variable::Pressure,
        Variable::WindSpeed,
        Variable::Rain,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Variable::Temperature => "temperature",
            Variable::Humidity => "humidity",
            Variable::Pressure => "pressure",
            Variable::WindSpeed => "wind_speed",
            Variable::Rain => "rain",
        }
    }

    /// Rain is read as a 0/1 indicator.
    pub fn value(&self, record: &CleanedRecord) -> f64 {
        match self {
            Variable::Temperature => record.temperature,
            Variable::Humidity => record.humidity,
            Variable::Pressure => record.pressure,
            Variable::WindSpeed => record.wind_speed,
            Variable::Rain => record.rain_indicator(),
        }
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::CleanedRecord;

/// Position of a value within three equal-width bins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Bin {
    Lower,
    Middle,
    Upper,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TempCategory {
    Cold,
    Moderate,
    Hot,
}

impl TempCategory {
    pub const ALL: [TempCategory; 3] = [TempCategory::Cold, TempCategory::Moderate, TempCategory::Hot];
}

impl From<Bin> for TempCategory {
    fn from(bin: Bin) -> Self {
        match bin {
            Bin::Lower => TempCategory::Cold,
            Bin::Middle => TempCategory::Moderate,
            Bin::Upper => TempCategory::Hot,
        }
    }
}

impl fmt::Display for TempCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TempCategory::Cold => write!(f, "Cold"),
            TempCategory::Moderate => write!(f, "Moderate"),
            TempCategory::Hot => write!(f, "Hot"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HumidityCategory {
    Low,
    Medium,
    High,
}

impl HumidityCategory {
    pub const ALL: [HumidityCategory; 3] = [
        HumidityCategory::Low,
        HumidityCategory::Medium,
        HumidityCategory::High,
    ];
}

impl From<Bin> for HumidityCategory {
    fn from(bin: Bin) -> Self {
        match bin {
            Bin::Lower => HumidityCategory::Low,
            Bin::Middle => HumidityCategory::Medium,
            Bin::Upper => HumidityCategory::High,
        }
    }
}

impl fmt::Display for HumidityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HumidityCategory::Low => write!(f, "Low"),
            HumidityCategory::Medium => write!(f, "Medium"),
            HumidityCategory::High => write!(f, "High"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategorizedRecord {
    #[serde(flatten)]
    pub record: CleanedRecord,
    pub temp_category: TempCategory,
    pub humidity_category: HumidityCategory,
}

impl CategorizedRecord {
    pub fn new(
        record: CleanedRecord,
        temp_category: TempCategory,
        humidity_category: HumidityCategory,
    ) -> Self {
        Self {
            record,
            temp_category,
            humidity_category,
        }
    }

    pub fn rain(&self) -> bool {
        self.record.rain
    }

    pub fn is_high_humidity(&self) -> bool {
        self.humidity_category == HumidityCategory::High
    }

    pub fn is_cold(&self) -> bool {
        self.temp_category == TempCategory::Cold
    }
}

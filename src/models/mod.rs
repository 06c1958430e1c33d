pub mod categorized;
pub mod cleaned;
pub mod variable;
pub mod weather;

pub use categorized::{Bin, CategorizedRecord, HumidityCategory, TempCategory};
pub use cleaned::CleanedRecord;
pub use variable::Variable;
pub use weather::{WeatherRecord, WeatherRecordBuilder};

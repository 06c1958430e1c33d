pub mod constants;
pub mod logging;
pub mod progress;
pub mod sample_data;
pub mod timestamp;

pub use constants::*;
pub use logging::init_logging;
pub use progress::ProgressReporter;
pub use sample_data::generate_sample_data;
pub use timestamp::{format_timestamp, parse_timestamp};

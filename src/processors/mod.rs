pub mod categorizer;
pub mod data_cleaner;

pub use categorizer::{Binning, CategorizedDataset, Categorizer};
pub use data_cleaner::{CleaningReport, DataCleaner};

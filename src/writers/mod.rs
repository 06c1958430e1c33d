pub mod csv_writer;

pub use csv_writer::{CleanedWriter, RawWriter};

use std::fs::{self, File};
use std::path::Path;

use crate::error::Result;

/// Creates `path` for writing, along with any missing parent directories.
pub(crate) fn create_output(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(File::create(path)?)
}

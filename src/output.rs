//! The module responsible for writing output data to disk.
use crate::report::Report;
use anyhow::{Context, Result, ensure};
use std::fs;
use std::path::Path;

pub mod metadata;

/// The output file name for the report
const REPORT_FILE_NAME: &str = "report.csv";

/// Create a new output directory, if it doesn't already exist.
///
/// An existing directory which already has files in it is only reused if `allow_overwrite` is
/// true.
///
/// # Returns
///
/// Whether existing files in the directory may be overwritten
pub fn create_output_directory(output_dir: &Path, allow_overwrite: bool) -> Result<bool> {
    if output_dir.is_dir() {
        // Already exists
        let is_empty = output_dir
            .read_dir()
            .with_context(|| format!("Could not read directory {}", output_dir.display()))?
            .next()
            .is_none();
        if is_empty {
            return Ok(false);
        }

        ensure!(
            allow_overwrite,
            "Output folder already exists and is not empty. \
            Use the --overwrite option or the overwrite setting to overwrite it."
        );

        return Ok(true);
    }

    // Try to create the directory, with parents
    fs::create_dir_all(output_dir)?;

    Ok(false)
}

/// Write the report to a CSV file in the output directory
pub fn write_report(output_dir: &Path, report: &Report) -> Result<()> {
    let file_path = output_dir.join(REPORT_FILE_NAME);
    let mut writer = csv::Writer::from_path(&file_path)
        .with_context(|| format!("Could not create {}", file_path.display()))?;
    for line in report.lines() {
        writer.serialize(line)?;
    }
    writer.flush()?;

    Ok(())
}

//! Common routines for handling input data.
use crate::reference::ReferenceData;
use anyhow::{Context, Result, ensure};
use itertools::Itertools;
use log::{debug, warn};
use serde::de::{Deserialize, DeserializeOwned, Deserializer};
use std::fs;
use std::path::Path;

pub mod panel;
use panel::read_panels;
pub mod setup_cost;
use setup_cost::read_setup_costs;
pub mod site;
use site::read_sites;
pub mod tariff;
use tariff::read_tariffs;

/// Read a series of type `T`s from a CSV file.
///
/// Will raise an error if the file is empty.
///
/// # Arguments
///
/// * `file_path` - Path to the CSV file
pub fn read_csv<'a, T: DeserializeOwned + 'a>(
    file_path: &'a Path,
) -> Result<impl Iterator<Item = T> + 'a> {
    let vec = csv::Reader::from_path(file_path)
        .with_context(|| input_err_msg(file_path))?
        .into_deserialize()
        .process_results(|iter| iter.collect_vec())
        .with_context(|| input_err_msg(file_path))?;
    ensure!(
        !vec.is_empty(),
        "CSV file {} cannot be empty",
        file_path.display()
    );

    Ok(vec.into_iter())
}

/// Parse a TOML file at the specified path.
///
/// # Arguments
///
/// * `file_path` - Path to the TOML file
///
/// # Returns
///
/// * The deserialised TOML data or an error if the file could not be read or parsed.
pub fn read_toml<T: DeserializeOwned>(file_path: &Path) -> Result<T> {
    let toml_str = fs::read_to_string(file_path).with_context(|| input_err_msg(file_path))?;
    let toml_data = toml::from_str(&toml_str).with_context(|| input_err_msg(file_path))?;
    Ok(toml_data)
}

/// Read an f64, checking that it is between 0 and 1 (exclusive of 0)
pub fn deserialise_proportion_nonzero<'de, D, T>(deserialiser: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: From<f64>,
{
    let value = f64::deserialize(deserialiser)?;
    if !(value > 0.0 && value <= 1.0) {
        Err(serde::de::Error::custom("Value must be > 0 and <= 1"))?;
    }

    Ok(value.into())
}

/// Check that a value is finite and greater than zero
pub fn check_positive(value: f64, name: &str) -> Result<()> {
    ensure!(
        value.is_finite() && value > 0.0,
        "{name} must be a finite number greater than zero"
    );

    Ok(())
}

/// Check that a value is finite and not negative
pub fn check_non_negative(value: f64, name: &str) -> Result<()> {
    ensure!(
        value.is_finite() && value >= 0.0,
        "{name} must be a finite number greater than or equal to zero"
    );

    Ok(())
}

/// Format an error message to include the file path. To be used with `anyhow::Context`.
pub fn input_err_msg<P: AsRef<Path>>(file_path: P) -> String {
    format!("Error reading {}", file_path.as_ref().display())
}

/// Read the reference data from the specified directory.
///
/// # Arguments
///
/// * `data_dir` - Folder containing the reference data files
///
/// # Returns
///
/// The reference data, validated, or an error describing the first problem found.
pub fn load_reference_data(data_dir: &Path) -> Result<ReferenceData> {
    let sites = read_sites(data_dir)?;
    let tariffs = read_tariffs(data_dir, &sites)?;
    let panels = read_panels(data_dir)?;
    let setup_costs = read_setup_costs(data_dir)?;
    debug!(
        "Read {} sites and {} tariffs from {}",
        sites.len(),
        tariffs.len(),
        data_dir.display()
    );

    for region_id in tariffs.keys() {
        if !sites.values().any(|site| &site.region_id == region_id) {
            warn!("Tariff defined for region {region_id}, which has no sites");
        }
    }

    Ok(ReferenceData {
        sites,
        tariffs,
        panels,
        setup_costs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::Dimensionless;
    use rstest::rstest;
    use serde::Deserialize;
    use serde::de::IntoDeserializer;
    use serde::de::value::{Error as ValueError, F64Deserializer};
    use std::fs::File;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::tempdir;

    #[derive(Debug, PartialEq, Deserialize)]
    struct Record {
        id: String,
        value: u32,
    }

    /// Create an example CSV file in dir_path
    fn create_csv_file(dir_path: &Path, contents: &str) -> PathBuf {
        let file_path = dir_path.join("test.csv");
        let mut file = File::create(&file_path).unwrap();
        writeln!(file, "{contents}").unwrap();
        file_path
    }

    /// Test a normal read
    #[test]
    fn test_read_csv() {
        let dir = tempdir().unwrap();
        let file_path = create_csv_file(dir.path(), "id,value\nhello,1\nworld,2\n");
        let records: Vec<Record> = read_csv(&file_path).unwrap().collect();
        assert_eq!(
            records,
            &[
                Record {
                    id: "hello".to_string(),
                    value: 1,
                },
                Record {
                    id: "world".to_string(),
                    value: 2,
                }
            ]
        );
    }

    #[test]
    fn test_read_csv_empty() {
        let dir = tempdir().unwrap();
        let file_path = create_csv_file(dir.path(), "id,value\n");
        assert!(read_csv::<Record>(&file_path).is_err());
    }

    #[test]
    fn test_read_csv_bad_value() {
        let dir = tempdir().unwrap();
        let file_path = create_csv_file(dir.path(), "id,value\nhello,x\n");
        assert!(read_csv::<Record>(&file_path).is_err());
    }

    #[test]
    fn test_read_toml() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("test.toml");
        {
            let mut file = File::create(&file_path).unwrap();
            writeln!(file, "id = \"hello\"\nvalue = 1").unwrap();
        }

        assert_eq!(
            read_toml::<Record>(&file_path).unwrap(),
            Record {
                id: "hello".to_string(),
                value: 1,
            }
        );

        // Missing file
        assert!(read_toml::<Record>(&dir.path().join("missing.toml")).is_err());
    }

    /// Deserialise value with deserialise_proportion_nonzero()
    fn deserialise_f64(value: f64) -> Result<Dimensionless, ValueError> {
        let deserialiser: F64Deserializer<ValueError> = value.into_deserializer();
        deserialise_proportion_nonzero(deserialiser)
    }

    #[rstest]
    #[case(0.5, true)]
    #[case(1.0, true)]
    #[case(1e-9, true)]
    #[case(0.0, false)]
    #[case(-1.0, false)]
    #[case(1.5, false)]
    #[case(f64::NAN, false)]
    fn test_deserialise_proportion_nonzero(#[case] value: f64, #[case] valid: bool) {
        let result = deserialise_f64(value);
        assert_eq!(result.is_ok(), valid);
        if valid {
            assert_eq!(result.unwrap(), Dimensionless(value));
        }
    }

    #[rstest]
    #[case(1.0, true)]
    #[case(0.0, false)]
    #[case(-2.0, false)]
    #[case(f64::INFINITY, false)]
    fn test_check_positive(#[case] value: f64, #[case] valid: bool) {
        assert_eq!(check_positive(value, "x").is_ok(), valid);
    }

    #[rstest]
    #[case(1.0, true)]
    #[case(0.0, true)]
    #[case(-2.0, false)]
    #[case(f64::NAN, false)]
    fn test_check_non_negative(#[case] value: f64, #[case] valid: bool) {
        assert_eq!(check_non_negative(value, "x").is_ok(), valid);
    }
}

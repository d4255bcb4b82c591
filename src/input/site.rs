//! Code for reading site conditions from a CSV file.
use super::*;
use crate::id::collect_id_map;
use crate::site::{PostalCode, RegionID, Site, SiteMap};
use crate::units::Dimensionless;
use serde::Deserialize;

const SITES_FILE_NAME: &str = "sites.csv";

#[derive(PartialEq, Debug, Deserialize)]
struct SiteRaw {
    postal_code: String,
    region_id: String,
    avg_temperature: f64,
    #[serde(deserialize_with = "deserialise_proportion_nonzero")]
    shading_factor: Dimensionless,
    #[serde(deserialize_with = "deserialise_proportion_nonzero")]
    soiling_factor: Dimensionless,
    average_irradiance: f64,
}

impl SiteRaw {
    /// Validate the raw record and convert it into a [`Site`]
    fn into_site(self) -> Result<Site> {
        let postal_code = self.postal_code.trim();
        ensure!(!postal_code.is_empty(), "Postal code cannot be empty");
        ensure!(
            !self.region_id.trim().is_empty(),
            "Region for postal code {postal_code} cannot be empty"
        );
        ensure!(
            self.avg_temperature.is_finite(),
            "Average temperature for postal code {postal_code} must be a finite number"
        );
        check_positive(
            self.average_irradiance,
            &format!("Average irradiance for postal code {postal_code}"),
        )?;

        Ok(Site {
            postal_code: PostalCode::new(postal_code),
            region_id: RegionID::new(self.region_id.trim()),
            avg_temperature: self.avg_temperature,
            shading_factor: self.shading_factor,
            soiling_factor: self.soiling_factor,
            average_irradiance: self.average_irradiance,
        })
    }
}

/// Read site conditions from the specified data directory.
///
/// # Arguments
///
/// * `data_dir` - Folder containing the reference data files
///
/// # Returns
///
/// The sites, keyed by postal code. Duplicate postal codes are an error.
pub fn read_sites(data_dir: &Path) -> Result<SiteMap> {
    let file_path = data_dir.join(SITES_FILE_NAME);
    let sites_csv = read_csv::<SiteRaw>(&file_path)?;
    read_sites_from_iter(sites_csv).with_context(|| input_err_msg(&file_path))
}

fn read_sites_from_iter<I>(iter: I) -> Result<SiteMap>
where
    I: Iterator<Item = SiteRaw>,
{
    let sites: Vec<Site> = iter.map(SiteRaw::into_site).try_collect()?;
    collect_id_map(sites)
}

//! Code for reading tariffs from a CSV file.
use super::*;
use crate::site::{RegionID, SiteMap};
use crate::tariff::{Tariff, TariffMap};
use crate::units::MoneyPerEnergy;
use indexmap::IndexMap;
use serde::Deserialize;

const TARIFFS_FILE_NAME: &str = "tariffs.csv";

/// A single slab of a tariff, as read from file
#[derive(PartialEq, Debug, Deserialize)]
struct TariffSlabRaw {
    region_id: String,
    slab: u32,
    price: MoneyPerEnergy,
}

/// Read tariffs from the specified data directory.
///
/// Every region which appears in `sites` must have a tariff.
///
/// # Arguments
///
/// * `data_dir` - Folder containing the reference data files
/// * `sites` - Sites which have already been read
///
/// # Returns
///
/// The tariffs, keyed by region
pub fn read_tariffs(data_dir: &Path, sites: &SiteMap) -> Result<TariffMap> {
    let file_path = data_dir.join(TARIFFS_FILE_NAME);
    let slabs_csv = read_csv::<TariffSlabRaw>(&file_path)?;
    read_tariffs_from_iter(slabs_csv, sites).with_context(|| input_err_msg(&file_path))
}

fn read_tariffs_from_iter<I>(iter: I, sites: &SiteMap) -> Result<TariffMap>
where
    I: Iterator<Item = TariffSlabRaw>,
{
    // Group slabs by region, keeping regions in file order
    let mut slabs_by_region: IndexMap<RegionID, Vec<(u32, MoneyPerEnergy)>> = IndexMap::new();
    for slab in iter {
        let region_id = slab.region_id.trim();
        ensure!(!region_id.is_empty(), "Region for tariff slab cannot be empty");
        slabs_by_region
            .entry(RegionID::new(region_id))
            .or_default()
            .push((slab.slab, slab.price));
    }

    let mut tariffs = TariffMap::new();
    for (region_id, mut slabs) in slabs_by_region {
        slabs.sort_by_key(|(number, _)| *number);
        for (expected, (number, _)) in (1..).zip(slabs.iter()) {
            ensure!(
                *number == expected,
                "Slabs for region {region_id} must be numbered consecutively from 1 \
                (expected slab {expected}, found {number})"
            );
        }

        let prices = slabs.into_iter().map(|(_, price)| price).collect();
        let tariff = Tariff::new(prices)
            .with_context(|| format!("Invalid tariff for region {region_id}"))?;
        tariffs.insert(region_id, tariff);
    }

    for site in sites.values() {
        ensure!(
            tariffs.contains_key(&site.region_id),
            "No tariff defined for region {} (used by postal code {})",
            site.region_id,
            site.postal_code
        );
    }

    Ok(tariffs)
}

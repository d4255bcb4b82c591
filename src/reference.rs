//! The reference data which every estimate is computed from.
use crate::input::load_reference_data;
use crate::panel::PanelSpecMap;
use crate::setup_cost::SetupCosts;
use crate::site::SiteMap;
use crate::tariff::TariffMap;
use anyhow::Result;
use std::path::Path;

/// Read-only lookup tables, loaded once per run and shared by every stage of the estimate
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceData {
    /// Site conditions, keyed by postal code
    pub sites: SiteMap,
    /// Tariffs, keyed by region
    pub tariffs: TariffMap,
    /// Constants for each panel type
    pub panels: PanelSpecMap,
    /// Balance-of-system cost constants
    pub setup_costs: SetupCosts,
}

impl ReferenceData {
    /// Read the reference data from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `data_dir` - Folder containing the reference data files
    pub fn from_path<P: AsRef<Path>>(data_dir: P) -> Result<Self> {
        load_reference_data(data_dir.as_ref())
    }
}

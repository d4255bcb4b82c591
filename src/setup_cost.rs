//! Constants for the cost of the balance of system: everything in an installation except the
//! panels themselves.
use crate::units::{Money, MoneyPerPower};
use indexmap::IndexMap;
use serde::Deserialize;
use strum::{Display, EnumIter};

/// A component (or service) of an installation which is priced per installed watt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Display, EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SetupComponent {
    /// Solar inverter
    Inverter,
    /// Mounting structure
    Mounting,
    /// DC distribution box
    #[serde(rename = "dc_db")]
    #[strum(serialize = "dc_db")]
    DcDistributionBox,
    /// AC distribution box
    #[serde(rename = "ac_db")]
    #[strum(serialize = "ac_db")]
    AcDistributionBox,
    /// DC cabling
    DcCable,
    /// AC cabling
    AcCable,
    /// Earthing kit
    EarthingKit,
    /// Lightning arrester
    LightningArrester,
    /// Connectors
    Connectors,
    /// Cable ties
    CableTies,
    /// Other installation accessories
    InstallationAccessories,
    /// Labour and installation charges
    LabourAndInstallation,
}

/// Cost constants for the balance of system
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SetupCosts {
    /// Flat fee for the net meter (as set by the distribution company)
    pub net_meter: Money,
    /// Cost of each component per watt of installed panel capacity
    pub per_watt: IndexMap<SetupComponent, MoneyPerPower>,
}

impl SetupCosts {
    /// The cost coefficient for a component.
    ///
    /// # Panics
    ///
    /// Panics if the component is missing, which the input layer rules out.
    pub fn coefficient(&self, component: SetupComponent) -> MoneyPerPower {
        *self
            .per_watt
            .get(&component)
            .unwrap_or_else(|| panic!("Missing setup cost for {component}"))
    }
}

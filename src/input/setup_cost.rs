//! Code for reading balance-of-system cost constants from a TOML file.
use super::*;
use crate::setup_cost::{SetupComponent, SetupCosts};
use strum::IntoEnumIterator;

const SETUP_COSTS_FILE_NAME: &str = "setup_costs.toml";

/// Read the setup cost constants from the specified data directory.
///
/// Every [`SetupComponent`] must have a coefficient.
///
/// # Arguments
///
/// * `data_dir` - Folder containing the reference data files
pub fn read_setup_costs(data_dir: &Path) -> Result<SetupCosts> {
    let file_path = data_dir.join(SETUP_COSTS_FILE_NAME);
    let setup_costs: SetupCosts = read_toml(&file_path)?;
    check_setup_costs(&setup_costs).with_context(|| input_err_msg(&file_path))?;

    // Store coefficients in report order
    Ok(SetupCosts {
        net_meter: setup_costs.net_meter,
        per_watt: SetupComponent::iter()
            .map(|component| (component, setup_costs.coefficient(component)))
            .collect(),
    })
}

fn check_setup_costs(setup_costs: &SetupCosts) -> Result<()> {
    check_non_negative(setup_costs.net_meter.value(), "net_meter")?;
    for component in SetupComponent::iter() {
        let cost = setup_costs
            .per_watt
            .get(&component)
            .with_context(|| format!("Missing cost per watt for {component}"))?;
        check_non_negative(cost.value(), &format!("Cost per watt for {component}"))?;
    }

    Ok(())
}

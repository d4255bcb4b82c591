//! Code for reading panel constants from a TOML file.
use super::*;
use crate::panel::{PanelSpec, PanelSpecMap, PanelType};

const PANELS_FILE_NAME: &str = "panels.toml";

/// Read the constants for each panel type from the specified data directory.
///
/// # Arguments
///
/// * `data_dir` - Folder containing the reference data files
///
/// # Returns
///
/// The constants for every panel type, or an error if any are missing or invalid
pub fn read_panels(data_dir: &Path) -> Result<PanelSpecMap> {
    let file_path = data_dir.join(PANELS_FILE_NAME);
    let panels: PanelSpecMap = read_toml(&file_path)?;
    check_panels(&panels).with_context(|| input_err_msg(&file_path))?;

    // Store in a fixed order, whatever the order in the file
    Ok(PanelType::ALL
        .into_iter()
        .filter_map(|panel_type| Some((panel_type, panels.get(&panel_type)?.clone())))
        .collect())
}

fn check_panels(panels: &PanelSpecMap) -> Result<()> {
    for panel_type in PanelType::ALL {
        let panel = panels
            .get(&panel_type)
            .with_context(|| format!("Missing constants for panel type {panel_type}"))?;
        check_panel_spec(panel)
            .with_context(|| format!("Invalid constants for panel type {panel_type}"))?;
    }

    Ok(())
}

fn check_panel_spec(panel: &PanelSpec) -> Result<()> {
    for (value, name) in [
        (panel.panel_efficiency.value(), "panel_efficiency"),
        (panel.inverter_efficiency.value(), "inverter_efficiency"),
        (
            panel.installation_quality_factor.value(),
            "installation_quality_factor",
        ),
    ] {
        ensure!(
            value > 0.0 && value <= 1.0,
            "{name} must be > 0 and <= 1"
        );
    }

    check_positive(panel.panel_area_m2, "panel_area_m2")?;
    check_positive(panel.panel_area_sqft, "panel_area_sqft")?;
    check_positive(panel.panel_wattage.value(), "panel_wattage")?;
    check_positive(panel.unit_cost.value(), "unit_cost")?;
    check_non_negative(panel.co2_emission_factor, "co2_emission_factor")?;
    ensure!(
        panel.temperature_coefficient.is_finite(),
        "temperature_coefficient must be a finite number"
    );

    Ok(())
}

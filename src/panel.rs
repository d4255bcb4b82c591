//! Panels are the installation variants which can be recommended, along with their physical and
//! economic constants.
use crate::units::{Dimensionless, Money, Power};
use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::Deserialize;
use serde_string_enum::DeserializeLabeledStringEnum;
use std::fmt;

/// A map of [`PanelSpec`]s, keyed by panel type
pub type PanelSpecMap = IndexMap<PanelType, PanelSpec>;

/// The panel and installation variant.
///
/// The variant also decides whether the government subsidy is applied for, so choosing a variant
/// is how the user's subsidy preference is expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, DeserializeLabeledStringEnum)]
pub enum PanelType {
    /// An installation for which the government subsidy is claimed
    #[string = "with_subsidy"]
    WithSubsidy,
    /// An installation without a subsidy claim
    #[string = "without_subsidy"]
    WithoutSubsidy,
}

impl PanelType {
    /// All panel types, which must all appear in the panel constants
    pub const ALL: [PanelType; 2] = [PanelType::WithSubsidy, PanelType::WithoutSubsidy];

    /// Get the panel type matching the user's subsidy preference
    pub fn from_subsidy_preference(wants_subsidy: bool) -> Self {
        if wants_subsidy {
            Self::WithSubsidy
        } else {
            Self::WithoutSubsidy
        }
    }

    /// Whether the government subsidy is claimed for installations of this type
    pub fn claims_subsidy(self) -> bool {
        self == Self::WithSubsidy
    }

    /// The label used for this panel type in input files
    pub fn label(self) -> &'static str {
        match self {
            Self::WithSubsidy => "with_subsidy",
            Self::WithoutSubsidy => "without_subsidy",
        }
    }
}

impl fmt::Display for PanelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Physical and economic constants for one panel type
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PanelSpec {
    /// Fraction of incident solar energy converted into electricity
    pub panel_efficiency: Dimensionless,
    /// Area of a single panel (m²)
    pub panel_area_m2: f64,
    /// Area of roof needed for a single panel (sq ft)
    pub panel_area_sqft: f64,
    /// Rated (peak) power of a single panel
    pub panel_wattage: Power,
    /// Change in output per °C away from 25 °C
    pub temperature_coefficient: f64,
    /// Fraction of DC power delivered as AC by the inverter
    pub inverter_efficiency: Dimensionless,
    /// Fraction of output retained given the quality of the installation
    pub installation_quality_factor: Dimensionless,
    /// Grid CO2 emissions avoided per unit of energy (kg/kWh)
    pub co2_emission_factor: f64,
    /// Cost of a single panel
    pub unit_cost: Money,
}

/// Get the constants for a panel type
pub fn panel_spec(panels: &PanelSpecMap, panel_type: PanelType) -> Result<&PanelSpec> {
    panels
        .get(&panel_type)
        .with_context(|| format!("No constants defined for panel type {panel_type}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::{assert_error, panel};
    use rstest::rstest;

    #[rstest]
    #[case(true, PanelType::WithSubsidy)]
    #[case(false, PanelType::WithoutSubsidy)]
    fn test_from_subsidy_preference(#[case] wants_subsidy: bool, #[case] expected: PanelType) {
        let panel_type = PanelType::from_subsidy_preference(wants_subsidy);
        assert_eq!(panel_type, expected);
        assert_eq!(panel_type.claims_subsidy(), wants_subsidy);
    }

    #[test]
    fn test_panel_type_display() {
        assert_eq!(PanelType::WithSubsidy.to_string(), "with_subsidy");
        assert_eq!(PanelType::WithoutSubsidy.to_string(), "without_subsidy");
    }

    #[rstest]
    fn test_panel_spec(panel: PanelSpec) {
        let panels = PanelSpecMap::from([(PanelType::WithSubsidy, panel.clone())]);
        assert_eq!(panel_spec(&panels, PanelType::WithSubsidy).unwrap(), &panel);
        assert_error!(
            panel_spec(&panels, PanelType::WithoutSubsidy),
            "No constants defined for panel type without_subsidy"
        );
    }
}

//! Cost of an installation: itemised setup cost, tax, subsidy and the net total.
use crate::panel::{PanelSpec, PanelType};
use crate::setup_cost::{SetupComponent, SetupCosts};
use crate::sizing::Sizing;
use crate::units::{Dimensionless, Money, Power};
use indexmap::IndexMap;
use log::debug;
use strum::IntoEnumIterator;

/// Share of the setup cost taxed at the lower GST rate
const GST_LOWER_SHARE: Dimensionless = Dimensionless::new(0.7);
/// The lower GST rate
const GST_LOWER_RATE: Dimensionless = Dimensionless::new(0.12);
/// Share of the setup cost taxed at the upper GST rate
const GST_UPPER_SHARE: Dimensionless = Dimensionless::new(0.3);
/// The upper GST rate
const GST_UPPER_RATE: Dimensionless = Dimensionless::new(0.18);

/// Subsidy for installations of 3 kW and above
const SUBSIDY_CAP: Money = Money::new(78000.0);
/// Subsidy for an installation of exactly 2 kW
const SUBSIDY_AT_2KW: Money = Money::new(60000.0);
/// Subsidy per kW between 2 and 3 kW
const SUBSIDY_PER_KW_ABOVE_2KW: f64 = 18000.0;
/// Subsidy per kW below 2 kW
const SUBSIDY_PER_KW_BELOW_2KW: f64 = 30000.0;

/// Itemised cost of an installation
#[derive(Debug, Clone, PartialEq)]
pub struct CostBreakdown {
    /// Cost of the panels
    pub panels: Money,
    /// Cost of each balance-of-system component
    pub components: IndexMap<SetupComponent, Money>,
    /// Flat fee for the net meter
    pub net_meter: Money,
    /// Everything above, before tax and subsidy
    pub total_setup: Money,
    /// Goods and services tax
    pub gst: Money,
    /// Government subsidy (zero if not claimed)
    pub subsidy: Money,
    /// Setup cost plus tax minus subsidy
    pub total: Money,
}

impl CostBreakdown {
    /// The cost of one component
    pub fn component(&self, component: SetupComponent) -> Money {
        self.components
            .get(&component)
            .copied()
            .unwrap_or_default()
    }

    /// The combined cost of several components
    pub fn components_total(&self, components: &[SetupComponent]) -> Money {
        components.iter().map(|c| self.component(*c)).sum()
    }
}

/// Cost of the panels themselves
pub fn cost_of_panels(panel_count: u32, panel: &PanelSpec) -> Money {
    panel.unit_cost * Dimensionless(f64::from(panel_count))
}

/// Cost of a balance-of-system component, which scales with installed capacity
pub fn component_cost(
    installed_capacity: Power,
    setup_costs: &SetupCosts,
    component: SetupComponent,
) -> Money {
    setup_costs.coefficient(component) * installed_capacity
}

/// GST on the setup cost, charged at a blend of two rates
pub fn gst(total_setup_cost: Money) -> Money {
    total_setup_cost * GST_LOWER_SHARE * GST_LOWER_RATE
        + total_setup_cost * GST_UPPER_SHARE * GST_UPPER_RATE
}

/// The government subsidy for an installation.
///
/// Nothing is paid unless the panel type claims the subsidy. Otherwise the amount is tiered by
/// installed capacity: 30000 per kW up to 2 kW, 18000 per kW for the next kW, capped at 78000
/// from 3 kW upwards.
pub fn government_subsidy(panel_type: PanelType, installed_capacity: Power) -> Money {
    if !panel_type.claims_subsidy() {
        return Money(0.0);
    }

    let kw = installed_capacity.kilowatts();
    if kw >= 3.0 {
        SUBSIDY_CAP
    } else if kw > 2.0 {
        SUBSIDY_AT_2KW + Money((kw - 2.0) * SUBSIDY_PER_KW_ABOVE_2KW)
    } else if kw < 2.0 {
        Money(kw * SUBSIDY_PER_KW_BELOW_2KW)
    } else {
        SUBSIDY_AT_2KW
    }
}

/// Work out the itemised cost of a sized installation
pub fn estimate_costs(
    panel_type: PanelType,
    panel: &PanelSpec,
    setup_costs: &SetupCosts,
    sizing: &Sizing,
) -> CostBreakdown {
    let panels = cost_of_panels(sizing.panel_count, panel);
    let components: IndexMap<_, _> = SetupComponent::iter()
        .map(|c| (c, component_cost(sizing.installed_capacity, setup_costs, c)))
        .collect();
    let total_setup =
        panels + setup_costs.net_meter + components.values().copied().sum::<Money>();
    let gst = gst(total_setup);
    let subsidy = government_subsidy(panel_type, sizing.installed_capacity);
    debug!("Setup cost {total_setup}, GST {gst}, subsidy {subsidy}");

    CostBreakdown {
        panels,
        components,
        net_meter: setup_costs.net_meter,
        total_setup,
        gst,
        subsidy,
        total: total_setup + gst - subsidy,
    }
}

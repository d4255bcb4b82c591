//! The estimate pipeline: from a bill, postal code and subsidy preference to a sized and costed
//! installation.
use crate::cost::{CostBreakdown, estimate_costs};
use crate::panel::{PanelType, panel_spec};
use crate::reference::ReferenceData;
use crate::site::{PostalCode, resolve_site};
use crate::sizing::{Sizing, size_installation};
use crate::tariff::{tariff_for_region, units_from_bill};
use crate::units::{Dimensionless, Energy, Money};
use anyhow::{Context, Result, ensure};
use log::info;

/// Months in a year
const MONTHS_PER_YEAR: f64 = 12.0;

/// The user's inputs for an estimate
#[derive(Debug, Clone, PartialEq)]
pub struct EstimateInputs {
    /// Average monthly electricity bill
    pub monthly_bill: f64,
    /// Postal code of the installation
    pub postal_code: String,
    /// Whether the user wants to claim the government subsidy
    pub wants_subsidy: bool,
}

/// A sized and costed installation, along with the context it was computed for
#[derive(Debug, Clone, PartialEq)]
pub struct Estimate {
    /// Average monthly electricity bill
    pub monthly_bill: Money,
    /// Postal code of the installation
    pub postal_code: PostalCode,
    /// The panel type used, which also decides whether the subsidy is claimed
    pub panel_type: PanelType,
    /// Units consumed per month, as worked out from the bill
    pub units_consumed: Energy,
    /// The recommended installation
    pub sizing: Sizing,
    /// What the installation costs
    pub costs: CostBreakdown,
}

impl Estimate {
    /// The money saved on electricity bills each year
    pub fn yearly_savings(&self) -> Money {
        self.monthly_bill * Dimensionless(MONTHS_PER_YEAR)
    }

    /// How many years of savings it takes to recover the total cost
    pub fn payback_years(&self) -> f64 {
        (self.costs.total / self.yearly_savings()).value()
    }
}

/// Check that the monthly bill is a finite number greater than zero
pub fn check_monthly_bill(monthly_bill: f64) -> Result<Money> {
    ensure!(
        monthly_bill.is_finite() && monthly_bill > 0.0,
        "Monthly bill must be a finite number greater than zero (got {monthly_bill})"
    );

    Ok(Money(monthly_bill))
}

/// Compute an estimate for the given inputs.
///
/// Inputs are validated before anything else is computed and an unknown postal code is an error.
pub fn run_estimate(data: &ReferenceData, inputs: &EstimateInputs) -> Result<Estimate> {
    let monthly_bill = check_monthly_bill(inputs.monthly_bill)?;
    let site = resolve_site(&data.sites, &inputs.postal_code)?;
    let tariff = tariff_for_region(&data.tariffs, &site.region_id)?;
    let panel_type = PanelType::from_subsidy_preference(inputs.wants_subsidy);
    let panel = panel_spec(&data.panels, panel_type)?;
    info!(
        "Estimating for postal code {} ({}) with panel type {panel_type}",
        site.postal_code, site.region_id
    );

    let units_consumed = units_from_bill(monthly_bill, tariff)
        .with_context(|| format!("Could not work out consumption for a bill of {monthly_bill}"))?;
    info!("Estimated monthly consumption: {units_consumed} units");

    let sizing = size_installation(site, panel, units_consumed)
        .with_context(|| format!("Could not size installation for {}", site.postal_code))?;
    let costs = estimate_costs(panel_type, panel, &data.setup_costs, &sizing);
    info!(
        "Recommended {} panels with a total cost of {}",
        sizing.panel_count, costs.total
    );

    Ok(Estimate {
        monthly_bill,
        postal_code: site.postal_code.clone(),
        panel_type,
        units_consumed,
        sizing,
        costs,
    })
}

//! Sizing of an installation: how many panels are needed to cover a household's consumption and
//! the physical quantities which follow from that.
use crate::panel::PanelSpec;
use crate::site::Site;
use crate::units::{Dimensionless, Energy, Power};
use anyhow::{Result, ensure};
use log::debug;

/// Days in a month, for converting monthly consumption to daily
const DAYS_PER_MONTH: f64 = 30.0;

/// Days in a year
const DAYS_PER_YEAR: f64 = 365.0;

/// Kilograms in a metric ton
const KG_PER_TON: f64 = 1000.0;

/// The recommended installation and its physical characteristics
#[derive(Debug, Clone, PartialEq)]
pub struct Sizing {
    /// Number of panels to install
    pub panel_count: u32,
    /// The household's average daily consumption
    pub daily_consumption: Energy,
    /// Realistic daily output of a single panel at the site
    pub adjusted_daily_energy: Energy,
    /// Daily output of the whole installation
    pub total_daily_energy: Energy,
    /// Total rated power of the installation
    pub installed_capacity: Power,
    /// Yearly CO2 emissions avoided (metric tons)
    pub co2_offset_tons: f64,
    /// Roof area needed for the panels (sq ft)
    pub roof_area_sqft: f64,
    /// Yearly output of the whole installation
    pub yearly_generation: Energy,
}

/// Combined losses from temperature, shading, soiling, the inverter and installation quality
pub fn derating_factor(site: &Site, panel: &PanelSpec) -> Dimensionless {
    site.temperature_derating(panel.temperature_coefficient)
        * site.shading_factor
        * site.soiling_factor
        * panel.inverter_efficiency
        * panel.installation_quality_factor
}

/// Daily output of a single panel at the site with no losses
pub fn theoretical_daily_energy(site: &Site, panel: &PanelSpec) -> Energy {
    Energy(panel.panel_efficiency.value() * panel.panel_area_m2 * site.average_irradiance)
}

/// Realistic daily output of a single panel at the site
pub fn adjusted_daily_energy(site: &Site, panel: &PanelSpec) -> Energy {
    theoretical_daily_energy(site, panel) * derating_factor(site, panel)
}

/// Average daily consumption for a month's consumption
pub fn daily_consumption(monthly_units: Energy) -> Energy {
    monthly_units / Dimensionless(DAYS_PER_MONTH)
}

/// The smallest number of panels whose combined output covers the daily consumption
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn panel_count(daily_consumption: Energy, adjusted_daily_energy: Energy) -> Result<u32> {
    ensure!(
        adjusted_daily_energy.is_finite() && adjusted_daily_energy > Energy(0.0),
        "Daily energy per panel must be greater than zero (got {adjusted_daily_energy} kWh); \
        check the panel constants and site factors"
    );
    ensure!(
        daily_consumption.is_finite() && daily_consumption >= Energy(0.0),
        "Daily consumption must be a finite, non-negative number"
    );

    let ratio = (daily_consumption / adjusted_daily_energy).value();
    let count = ratio.ceil();
    ensure!(
        count <= f64::from(u32::MAX),
        "Too many panels required ({count})"
    );

    Ok(count as u32)
}

/// Size an installation of the given panel type at a site, to cover the monthly consumption.
pub fn size_installation(site: &Site, panel: &PanelSpec, monthly_units: Energy) -> Result<Sizing> {
    let daily_consumption = daily_consumption(monthly_units);
    let adjusted_daily_energy = adjusted_daily_energy(site, panel);
    let panel_count = panel_count(daily_consumption, adjusted_daily_energy)?;
    debug!(
        "Daily consumption of {daily_consumption} kWh needs {panel_count} panels producing \
        {adjusted_daily_energy} kWh each"
    );

    let count = Dimensionless(f64::from(panel_count));
    let total_daily_energy = adjusted_daily_energy * count;
    Ok(Sizing {
        panel_count,
        daily_consumption,
        adjusted_daily_energy,
        total_daily_energy,
        installed_capacity: panel.panel_wattage * count,
        co2_offset_tons: panel.co2_emission_factor * daily_consumption.kwh() * DAYS_PER_YEAR
            / KG_PER_TON,
        roof_area_sqft: f64::from(panel_count) * panel.panel_area_sqft,
        yearly_generation: total_daily_energy * Dimensionless(DAYS_PER_YEAR),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::{assert_error, panel, site};
    use float_cmp::assert_approx_eq;
    use rstest::rstest;

    #[rstest]
    fn test_derating_factor(site: Site, panel: PanelSpec) {
        // 0.96 (temperature) * 0.9 * 0.95 * 0.96 * 0.95
        assert_approx_eq!(
            Dimensionless,
            derating_factor(&site, &panel),
            Dimensionless(0.748_569_6),
            epsilon = 1e-12
        );
    }

    #[rstest]
    fn test_theoretical_daily_energy(site: Site, panel: PanelSpec) {
        assert_approx_eq!(
            Energy,
            theoretical_daily_energy(&site, &panel),
            Energy(2.0),
            epsilon = 1e-12
        );
    }

    #[rstest]
    fn test_adjusted_daily_energy(site: Site, panel: PanelSpec) {
        assert_approx_eq!(
            Energy,
            adjusted_daily_energy(&site, &panel),
            Energy(1.497_139_2),
            epsilon = 1e-12
        );
    }

    #[rstest]
    #[case(0.0, 1.5, 0)]
    #[case(3.0, 1.5, 2)] // Exact multiple needs no extra panel
    #[case(3.01, 1.5, 3)]
    #[case(0.1, 1.5, 1)]
    #[case(8.708_333_333_333_334, 1.497_139_2, 6)]
    fn test_panel_count(#[case] consumption: f64, #[case] per_panel: f64, #[case] expected: u32) {
        assert_eq!(
            panel_count(Energy(consumption), Energy(per_panel)).unwrap(),
            expected
        );
    }

    #[rstest]
    #[case(0.1, 0.3)]
    #[case(1.0, 0.7)]
    #[case(8.7, 1.497)]
    #[case(25.0, 0.4)]
    #[case(99.99, 2.5)]
    #[case(1234.5, 0.333)]
    fn test_panel_count_is_ceiling(#[case] consumption: f64, #[case] per_panel: f64) {
        let ratio = consumption / per_panel;
        let count = f64::from(panel_count(Energy(consumption), Energy(per_panel)).unwrap());
        assert!(count >= ratio);
        assert!(count - 1.0 < ratio);
    }

    #[rstest]
    #[case(0.0)]
    #[case(-1.0)]
    #[case(f64::NAN)]
    fn test_panel_count_bad_panel_output(#[case] per_panel: f64) {
        assert!(panel_count(Energy(5.0), Energy(per_panel)).is_err());
    }

    #[test]
    fn test_panel_count_bad_consumption() {
        assert_error!(
            panel_count(Energy(-5.0), Energy(1.0)),
            "Daily consumption must be a finite, non-negative number"
        );
    }

    #[rstest]
    fn test_size_installation(site: Site, panel: PanelSpec) {
        let sizing = size_installation(&site, &panel, Energy(261.25)).unwrap();

        assert_eq!(sizing.panel_count, 6);
        assert_approx_eq!(
            Energy,
            sizing.daily_consumption,
            Energy(8.708_333_333_333_334),
            epsilon = 1e-12
        );
        assert_approx_eq!(
            Energy,
            sizing.total_daily_energy,
            Energy(8.982_835_2),
            epsilon = 1e-9
        );
        assert_eq!(sizing.installed_capacity, Power(2400.0));
        assert_approx_eq!(f64, sizing.co2_offset_tons, 2.606_404_166_666_667, epsilon = 1e-9);
        assert_approx_eq!(f64, sizing.roof_area_sqft, 129.0);
        assert_approx_eq!(
            Energy,
            sizing.yearly_generation,
            Energy(3_278.734_848),
            epsilon = 1e-6
        );
    }

    #[rstest]
    fn test_more_irradiance_needs_fewer_panels(site: Site, panel: PanelSpec) {
        let monthly_units = Energy(900.0);
        let counts: Vec<u32> = [2.0, 3.0, 4.5, 6.0, 9.0]
            .into_iter()
            .map(|irradiance| {
                let site = Site {
                    average_irradiance: irradiance,
                    ..site.clone()
                };
                size_installation(&site, &panel, monthly_units)
                    .unwrap()
                    .panel_count
            })
            .collect();

        assert!(counts.windows(2).all(|w| w[1] < w[0]), "{counts:?}");
    }

    #[rstest]
    fn test_size_installation_zero_consumption(site: Site, panel: PanelSpec) {
        let sizing = size_installation(&site, &panel, Energy(0.0)).unwrap();
        assert_eq!(sizing.panel_count, 0);
        assert_eq!(sizing.installed_capacity, Power(0.0));
    }
}

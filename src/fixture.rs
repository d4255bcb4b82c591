//! Fixtures for tests

use crate::panel::{PanelSpec, PanelSpecMap, PanelType};
use crate::reference::ReferenceData;
use crate::setup_cost::{SetupComponent, SetupCosts};
use crate::site::{Site, SiteMap};
use crate::sizing::{Sizing, size_installation};
use crate::tariff::{Tariff, TariffMap};
use crate::units::{Dimensionless, Energy, Money, MoneyPerEnergy, MoneyPerPower, Power};
use indexmap::indexmap;
use rstest::fixture;

/// Assert that an error with the given message occurs
macro_rules! assert_error {
    ($result:expr, $msg:expr) => {
        assert_eq!(
            $result.unwrap_err().chain().next().unwrap().to_string(),
            $msg
        );
    };
}
pub(crate) use assert_error;

#[fixture]
pub fn site() -> Site {
    Site {
        postal_code: "400001".into(),
        region_id: "Maharashtra".into(),
        avg_temperature: 35.0,
        shading_factor: Dimensionless(0.9),
        soiling_factor: Dimensionless(0.95),
        average_irradiance: 5.0,
    }
}

#[fixture]
pub fn sites(site: Site) -> SiteMap {
    let other = Site {
        postal_code: "560001".into(),
        region_id: "Karnataka".into(),
        avg_temperature: 28.0,
        shading_factor: Dimensionless(0.95),
        soiling_factor: Dimensionless(0.97),
        average_irradiance: 5.4,
    };

    indexmap! {
        site.postal_code.clone() => site,
        other.postal_code.clone() => other,
    }
}

#[fixture]
pub fn tariff() -> Tariff {
    Tariff::new(vec![
        MoneyPerEnergy(6.0),
        MoneyPerEnergy(7.0),
        MoneyPerEnergy(8.0),
    ])
    .unwrap()
}

#[fixture]
pub fn tariffs(tariff: Tariff) -> TariffMap {
    indexmap! {
        "Maharashtra".into() => tariff,
        "Karnataka".into() => Tariff::new(vec![MoneyPerEnergy(4.5), MoneyPerEnergy(7.0)]).unwrap(),
    }
}

#[fixture]
pub fn panel() -> PanelSpec {
    PanelSpec {
        panel_efficiency: Dimensionless(0.2),
        panel_area_m2: 2.0,
        panel_area_sqft: 21.5,
        panel_wattage: Power(400.0),
        temperature_coefficient: -0.004,
        inverter_efficiency: Dimensionless(0.96),
        installation_quality_factor: Dimensionless(0.95),
        co2_emission_factor: 0.82,
        unit_cost: Money(12000.0),
    }
}

#[fixture]
pub fn panels(panel: PanelSpec) -> PanelSpecMap {
    let large_panel = PanelSpec {
        panel_efficiency: Dimensionless(0.21),
        panel_area_m2: 2.8,
        panel_area_sqft: 30.0,
        panel_wattage: Power(550.0),
        temperature_coefficient: -0.0035,
        inverter_efficiency: Dimensionless(0.97),
        installation_quality_factor: Dimensionless(0.95),
        co2_emission_factor: 0.82,
        unit_cost: Money(16000.0),
    };

    indexmap! {
        PanelType::WithSubsidy => panel,
        PanelType::WithoutSubsidy => large_panel,
    }
}

#[fixture]
pub fn setup_costs() -> SetupCosts {
    use SetupComponent::*;

    SetupCosts {
        net_meter: Money(5000.0),
        per_watt: [
            (Inverter, 5.0),
            (Mounting, 3.0),
            (DcDistributionBox, 0.5),
            (AcDistributionBox, 0.5),
            (DcCable, 0.25),
            (AcCable, 0.25),
            (EarthingKit, 0.5),
            (LightningArrester, 0.25),
            (Connectors, 0.125),
            (CableTies, 0.125),
            (InstallationAccessories, 0.25),
            (LabourAndInstallation, 2.0),
        ]
        .into_iter()
        .map(|(component, cost)| (component, MoneyPerPower(cost)))
        .collect(),
    }
}

/// Sizing for the `site` and `panel` fixtures with a bill of 2000 under the `tariff` fixture
#[fixture]
pub fn sizing(site: Site, panel: PanelSpec) -> Sizing {
    size_installation(&site, &panel, Energy(261.25)).unwrap()
}

#[fixture]
pub fn reference_data(
    sites: SiteMap,
    tariffs: TariffMap,
    panels: PanelSpecMap,
    setup_costs: SetupCosts,
) -> ReferenceData {
    ReferenceData {
        sites,
        tariffs,
        panels,
        setup_costs,
    }
}

//! Sites describe the local conditions at a postal code, which affect how much energy panels
//! installed there will produce.
use crate::id::{define_id_getter, define_id_type, get_by_id};
use crate::units::Dimensionless;
use anyhow::Result;
use indexmap::IndexMap;

define_id_type! {PostalCode}
define_id_type! {RegionID}

/// A map of [`Site`]s, keyed by postal code
pub type SiteMap = IndexMap<PostalCode, Site>;

/// The temperature at which panels produce their rated output (°C)
const REFERENCE_TEMPERATURE: f64 = 25.0;

/// Environmental attributes of the area covered by a postal code
#[derive(Debug, Clone, PartialEq)]
pub struct Site {
    /// The postal code this record applies to
    pub postal_code: PostalCode,
    /// The region (state or union territory) the postal code lies in. Selects the tariff.
    pub region_id: RegionID,
    /// Average temperature (°C)
    pub avg_temperature: f64,
    /// Fraction of output retained after shading losses
    pub shading_factor: Dimensionless,
    /// Fraction of output retained after soiling (dust, dirt) losses
    pub soiling_factor: Dimensionless,
    /// Average daily irradiance (kWh/m²/day)
    pub average_irradiance: f64,
}
define_id_getter! {Site, PostalCode, postal_code}

impl Site {
    /// Linear derating of panel output for the site's temperature.
    ///
    /// The coefficient is per °C away from 25 °C and is usually negative, so hotter sites produce
    /// less.
    pub fn temperature_derating(&self, temperature_coefficient: f64) -> Dimensionless {
        Dimensionless(
            1.0 + temperature_coefficient * (self.avg_temperature - REFERENCE_TEMPERATURE),
        )
    }
}

/// Find the site for the given postal code.
///
/// An unknown postal code is an error: nothing can be estimated without the site's conditions.
pub fn resolve_site<'a>(sites: &'a SiteMap, postal_code: &str) -> Result<&'a Site> {
    get_by_id(sites, postal_code.trim(), "postal code")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::{assert_error, site, sites};
    use float_cmp::assert_approx_eq;
    use rstest::rstest;

    #[rstest]
    #[case(25.0, -0.004, 1.0)] // Reference temperature
    #[case(35.0, -0.004, 0.96)]
    #[case(15.0, -0.004, 1.04)] // Cooler than reference
    #[case(35.0, 0.0, 1.0)]
    fn test_temperature_derating(
        site: Site,
        #[case] temperature: f64,
        #[case] coefficient: f64,
        #[case] expected: f64,
    ) {
        let site = Site {
            avg_temperature: temperature,
            ..site
        };
        assert_approx_eq!(
            Dimensionless,
            site.temperature_derating(coefficient),
            Dimensionless(expected),
            epsilon = 1e-12
        );
    }

    #[rstest]
    fn test_resolve_site(sites: SiteMap) {
        let site = resolve_site(&sites, "400001").unwrap();
        assert_eq!(site.region_id, "Maharashtra".into());

        // Surrounding whitespace from user input is ignored
        assert_eq!(resolve_site(&sites, " 400001\n").unwrap(), site);
    }

    #[rstest]
    fn test_resolve_site_unknown(sites: SiteMap) {
        assert_error!(resolve_site(&sites, "999999"), "Unknown postal code: 999999");
    }
}

//! Progressive electricity tariffs and the conversion of a bill back into consumed units.
use crate::id::get_by_id;
use crate::site::RegionID;
use crate::units::{Dimensionless, Energy, Money, MoneyPerEnergy};
use anyhow::{Result, ensure};
use indexmap::IndexMap;
use log::debug;

/// A map of [`Tariff`]s, keyed by region
pub type TariffMap = IndexMap<RegionID, Tariff>;

/// The number of units (kWh) in every slab except the last
pub const SLAB_WIDTH: Energy = Energy::new(50.0);

/// The proportion of the bill which pays for energy, after the fixed service surcharge is removed
const ENERGY_SHARE_OF_BILL: Dimensionless = Dimensionless::new(0.97);

/// A tiered tariff: the price per unit rises with each slab of consumption.
///
/// The last slab is open-ended and its price applies to all remaining consumption.
#[derive(Debug, Clone, PartialEq)]
pub struct Tariff {
    slab_prices: Vec<MoneyPerEnergy>,
}

impl Tariff {
    /// Create a new tariff from slab prices in ascending order of consumption.
    ///
    /// There must be at least one slab and all prices must be finite and greater than zero.
    pub fn new(slab_prices: Vec<MoneyPerEnergy>) -> Result<Self> {
        ensure!(!slab_prices.is_empty(), "Tariff must have at least one slab");
        for (idx, price) in slab_prices.iter().enumerate() {
            ensure!(
                price.is_finite() && *price > MoneyPerEnergy(0.0),
                "Price for slab {} must be a finite number greater than zero",
                idx + 1
            );
        }

        Ok(Self { slab_prices })
    }

    /// The slab prices in ascending order of consumption
    pub fn slab_prices(&self) -> &[MoneyPerEnergy] {
        &self.slab_prices
    }

    /// Calculate how many units the given amount of money buys under this tariff.
    ///
    /// Full slabs are bought greedily from the cheapest up. Whatever remains once a full slab can
    /// no longer be afforded buys a fractional number of units at the current slab's price.
    pub fn units_for_amount(&self, amount: Money) -> Result<Energy> {
        ensure!(
            amount.is_finite() && amount >= Money(0.0),
            "Amount must be a finite, non-negative number"
        );

        let (last, full_width) = self
            .slab_prices
            .split_last()
            .expect("Tariff cannot be empty");
        let mut remaining = amount;
        let mut units = Energy(0.0);
        for price in full_width {
            let slab_cost = *price * SLAB_WIDTH;
            if remaining < slab_cost {
                return Ok(units + remaining / *price);
            }

            remaining -= slab_cost;
            units += SLAB_WIDTH;
        }

        // Every full slab still affordable is charged at the last price
        let slab_cost = *last * SLAB_WIDTH;
        let full_slabs = (remaining / slab_cost).value().floor();
        remaining -= slab_cost * Dimensionless(full_slabs);
        units += SLAB_WIDTH * Dimensionless(full_slabs);

        Ok(units + remaining / *last)
    }
}

/// Find the tariff for the given region
pub fn tariff_for_region<'a>(tariffs: &'a TariffMap, region_id: &RegionID) -> Result<&'a Tariff> {
    get_by_id(tariffs, &region_id.0, "region")
}

/// Estimate the units consumed in a month from the monthly bill.
///
/// A fixed 3% of the bill is treated as a service surcharge and removed before the tariff is
/// applied.
pub fn units_from_bill(bill: Money, tariff: &Tariff) -> Result<Energy> {
    let effective_bill = bill * ENERGY_SHARE_OF_BILL;
    let units = tariff.units_for_amount(effective_bill)?;
    debug!("A bill of {bill} pays for {units} units after the surcharge ({effective_bill})");

    Ok(units)
}

//! Common functionality for solarcalc, a rooftop solar estimator.
#![warn(missing_docs)]
use std::path::PathBuf;

pub mod cli;
pub mod cost;
pub mod estimate;
pub mod id;
pub mod input;
pub mod log;
pub mod output;
pub mod panel;
pub mod prompt;
pub mod reference;
pub mod report;
pub mod settings;
pub mod setup_cost;
pub mod site;
pub mod sizing;
pub mod tariff;
pub mod units;

#[cfg(test)]
mod fixture;

/// Get config dir for program.
///
/// Falls back to the current directory if the platform has no config dir.
pub fn get_solarcalc_config_dir() -> PathBuf {
    let mut dir = dirs::config_dir().unwrap_or_default();
    dir.push("solarcalc");
    dir
}

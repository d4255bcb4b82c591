//! The report shown to the user: labelled numbers in a fixed order.
use crate::estimate::Estimate;
use crate::setup_cost::SetupComponent;
use serde::Serialize;
use std::fmt;

/// The section of the report a line belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportSection {
    /// Sizing, energy and payback
    Summary,
    /// Itemised costs
    Cost,
}

/// A single labelled value in the report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportLine {
    /// The section the line belongs to
    pub section: ReportSection,
    /// Label shown to the user
    pub label: &'static str,
    /// The value
    pub value: f64,
}

/// The full report for an estimate
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    lines: Vec<ReportLine>,
}

impl Report {
    /// Build the report for an estimate
    pub fn from_estimate(estimate: &Estimate) -> Self {
        use ReportSection::*;
        use SetupComponent::*;

        let sizing = &estimate.sizing;
        let costs = &estimate.costs;
        let lines = [
            (Summary, "No. of Solar Panels", f64::from(sizing.panel_count)),
            (Summary, "Area needed in Sqft", sizing.roof_area_sqft),
            (
                Summary,
                "Savings on electricity per year",
                estimate.yearly_savings().value(),
            ),
            (
                Summary,
                "Generate Power KwH/Year",
                sizing.yearly_generation.kwh(),
            ),
            (Summary, "Recovery in no. of Years", estimate.payback_years()),
            (
                Summary,
                "Total Energy Produced Daily",
                sizing.total_daily_energy.kwh(),
            ),
            (
                Summary,
                "Total kWh Setup",
                sizing.installed_capacity.kilowatts(),
            ),
            (Summary, "Tons of CO2 Cut", sizing.co2_offset_tons),
            (Cost, "Solar Panels", costs.panels.value()),
            (Cost, "Solar Inverter", costs.component(Inverter).value()),
            (Cost, "Mounting Structure", costs.component(Mounting).value()),
            (
                Cost,
                "AC & DC Distribution Box",
                costs
                    .components_total(&[DcDistributionBox, AcDistributionBox])
                    .value(),
            ),
            (
                Cost,
                "AC & DC Cables",
                costs.components_total(&[DcCable, AcCable]).value(),
            ),
            (Cost, "Earthing Kit", costs.component(EarthingKit).value()),
            (
                Cost,
                "Lightning Arrestor",
                costs.component(LightningArrester).value(),
            ),
            (Cost, "Net Meter (as per DISCOM)", costs.net_meter.value()),
            (
                Cost,
                "All Other Installation Accessories",
                costs
                    .components_total(&[Connectors, CableTies, InstallationAccessories])
                    .value(),
            ),
            (
                Cost,
                "Labor & Installation Charges",
                costs.component(LabourAndInstallation).value(),
            ),
            (Cost, "GST Charges", costs.gst.value()),
            (Cost, "Government Subsidy", costs.subsidy.value()),
            (Cost, "Total Cost", costs.total.value()),
        ]
        .into_iter()
        .map(|(section, label, value)| ReportLine {
            section,
            label,
            value,
        })
        .collect();

        Self { lines }
    }

    /// The lines of the report, in display order
    pub fn lines(&self) -> &[ReportLine] {
        &self.lines
    }

    /// Get the value for a label, if present
    pub fn value(&self, label: &str) -> Option<f64> {
        self.lines
            .iter()
            .find(|line| line.label == label)
            .map(|line| line.value)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut section: Option<ReportSection> = None;
        for line in &self.lines {
            if section.is_some_and(|section| section != line.section) {
                // Blank line between sections
                writeln!(f)?;
            }
            section = Some(line.section);
            writeln!(f, "{}: {}", line.label, line.value)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimate::{EstimateInputs, run_estimate};
    use crate::fixture::reference_data;
    use crate::reference::ReferenceData;
    use float_cmp::assert_approx_eq;
    use rstest::{fixture, rstest};

    #[fixture]
    fn report(reference_data: ReferenceData) -> Report {
        let inputs = EstimateInputs {
            monthly_bill: 2000.0,
            postal_code: "400001".into(),
            wants_subsidy: true,
        };
        Report::from_estimate(&run_estimate(&reference_data, &inputs).unwrap())
    }

    #[rstest]
    fn test_report_order(report: Report) {
        let labels: Vec<_> = report.lines().iter().map(|line| line.label).collect();
        assert_eq!(
            labels,
            [
                "No. of Solar Panels",
                "Area needed in Sqft",
                "Savings on electricity per year",
                "Generate Power KwH/Year",
                "Recovery in no. of Years",
                "Total Energy Produced Daily",
                "Total kWh Setup",
                "Tons of CO2 Cut",
                "Solar Panels",
                "Solar Inverter",
                "Mounting Structure",
                "AC & DC Distribution Box",
                "AC & DC Cables",
                "Earthing Kit",
                "Lightning Arrestor",
                "Net Meter (as per DISCOM)",
                "All Other Installation Accessories",
                "Labor & Installation Charges",
                "GST Charges",
                "Government Subsidy",
                "Total Cost",
            ]
        );
        assert!(
            report.lines()[..8]
                .iter()
                .all(|line| line.section == ReportSection::Summary)
        );
        assert!(
            report.lines()[8..]
                .iter()
                .all(|line| line.section == ReportSection::Cost)
        );
    }

    #[rstest]
    fn test_report_values(report: Report) {
        assert_eq!(report.value("No. of Solar Panels"), Some(6.0));
        assert_eq!(report.value("Area needed in Sqft"), Some(129.0));
        assert_eq!(report.value("Savings on electricity per year"), Some(24000.0));
        assert_approx_eq!(f64, report.value("Total kWh Setup").unwrap(), 2.4);
        assert_eq!(report.value("Solar Panels"), Some(72000.0));
        assert_eq!(report.value("Solar Inverter"), Some(12000.0));
        // dc_db + ac_db
        assert_eq!(report.value("AC & DC Distribution Box"), Some(2400.0));
        // connectors + cable_ties + installation_accessories
        assert_eq!(
            report.value("All Other Installation Accessories"),
            Some(1200.0)
        );
        assert_eq!(report.value("Net Meter (as per DISCOM)"), Some(5000.0));
        assert_approx_eq!(
            f64,
            report.value("Government Subsidy").unwrap(),
            67_200.0,
            epsilon = 1e-6
        );
        assert_approx_eq!(
            f64,
            report.value("Total Cost").unwrap(),
            55_248.8,
            epsilon = 1e-6
        );
        assert_eq!(report.value("Not a label"), None);
    }

    #[rstest]
    fn test_report_display(report: Report) {
        let text = report.to_string();
        let lines: Vec<_> = text.lines().collect();

        // 21 values plus a blank line between the sections
        assert_eq!(lines.len(), 22);
        assert_eq!(lines[0], "No. of Solar Panels: 6");
        assert_eq!(lines[8], "");
        assert_eq!(lines[9], "Solar Panels: 72000");
    }
}

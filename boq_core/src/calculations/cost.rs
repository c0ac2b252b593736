//! # Cost Aggregation
//!
//! Folds the already-priced report rows into category subtotals and a
//! grand total. Pure summation; rounding and currency formatting belong to
//! whoever displays the figures.

use serde::{Deserialize, Serialize};

use super::report::QuantityReport;

/// Subtotals per category plus the grand total.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CostSummary {
    /// Σ total_price over unit-material rows
    pub total_unit_materials_cost: f64,
    /// Σ total_price over area-material rows
    pub total_area_materials_cost: f64,
    /// Unit + area subtotals
    pub total_materials_cost: f64,
}

/// Sum the priced rows of a report.
///
/// ```rust
/// use boq_core::calculations::{calculate, cost};
/// use boq_core::model::{TemplateMaterial, UnitTemplate};
///
/// let template = UnitTemplate::new("A1", "Two-bedroom", 95.0, 10)
///     .with_material(TemplateMaterial::new("Tile", "m2", 5.0, 20.0));
/// let report = calculate(&[], &[template], &[]).unwrap();
///
/// let summary = cost::summarize(&report);
/// assert_eq!(summary.total_materials_cost, 1000.0);
/// ```
pub fn summarize(report: &QuantityReport) -> CostSummary {
    let total_unit_materials_cost = report.unit_materials.iter().fold(0.0, |acc, r| acc + r.total_price);
    let total_area_materials_cost = report.area_materials.iter().fold(0.0, |acc, r| acc + r.total_price);

    CostSummary {
        total_unit_materials_cost,
        total_area_materials_cost,
        total_materials_cost: total_unit_materials_cost + total_area_materials_cost,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::calculate;
    use crate::model::{AreaMaterial, Floor, TemplateMaterial, UnitTemplate};

    #[test]
    fn test_empty_report_costs_nothing() {
        assert_eq!(summarize(&QuantityReport::default()), CostSummary::default());
    }

    #[test]
    fn test_subtotals_and_total() {
        let floors = vec![Floor::new(1, 100.0, 0.0)];
        let templates = vec![
            UnitTemplate::new("A1", "x", 50.0, 2)
                .with_material(TemplateMaterial::new("Door", "pcs", 3.0, 100.0))
                .with_material(TemplateMaterial::new("Sink", "pcs", 1.0, 250.0)),
        ];
        let materials = vec![AreaMaterial::new("Screed", "m3", 80.0).with_factor(0.05)];

        let report = calculate(&floors, &templates, &materials).unwrap();
        let summary = summarize(&report);

        // doors 6 × 100 + sinks 2 × 250
        assert!((summary.total_unit_materials_cost - 1100.0).abs() < 1e-9);
        // 100 m² × 0.05 × 80
        assert!((summary.total_area_materials_cost - 400.0).abs() < 1e-9);
        assert!((summary.total_materials_cost - 1500.0).abs() < 1e-9);
        assert_eq!(report.cost_summary(), summary);
    }
}

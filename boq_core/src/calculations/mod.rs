//! # Quantity & Cost Calculations
//!
//! The take-off engine. [`calculate`] is a pure function: it validates its
//! inputs, then derives a [`QuantityReport`] without I/O or shared state, so
//! identical inputs always give an identical report.
//!
//! ## Pipeline
//!
//! - [`steel`] - Steel tons per floor, total area
//! - [`unit_materials`] - Template materials × unit counts, merged per material
//! - [`area_materials`] - Scope, base quantity, tile override, waste
//! - [`cost`] - Subtotals and grand total
//!
//! Stale floor links, unit clashes and degenerate tiles do not fail the run;
//! they show up as [`ReportWarning`]s on the affected rows.

pub mod area_materials;
pub mod cost;
pub mod report;
pub mod steel;
pub mod unit_materials;

pub use cost::CostSummary;
pub use report::{
    AreaMaterialRow, FloorSteel, QuantityReport, ReportWarning, SteelCalculation, UnitMaterialRow,
};

use crate::errors::CalcResult;
use crate::model::{AreaMaterial, Floor, UnitTemplate};

/// Validate every entity, stopping at the first invalid one.
pub fn validate_inputs(
    floors: &[Floor],
    templates: &[UnitTemplate],
    area_materials: &[AreaMaterial],
) -> CalcResult<()> {
    for floor in floors {
        floor.validate()?;
    }
    for template in templates {
        template.validate()?;
    }
    for material in area_materials {
        material.validate()?;
    }
    Ok(())
}

/// Compute the full quantity report.
///
/// # Arguments
///
/// * `floors` - Building stories, in display order
/// * `templates` - Unit templates with their per-unit materials
/// * `area_materials` - Bulk materials scoped by floor area
///
/// # Returns
///
/// * `Ok(QuantityReport)` - Complete report, possibly with row warnings
/// * `Err(CalcError)` - An entity failed validation (negative value, blank
///   name, ...)
///
/// # Example
///
/// ```rust
/// use boq_core::calculations::calculate;
/// use boq_core::model::Floor;
///
/// let floors = vec![Floor::new(1, 100.0, 120.0), Floor::new(2, 80.0, 100.0)];
/// let report = calculate(&floors, &[], &[]).unwrap();
///
/// assert!((report.steel_calculation.total_steel_tons - 20.0).abs() < 1e-9);
/// assert_eq!(report.total_area, 180.0);
/// ```
pub fn calculate(
    floors: &[Floor],
    templates: &[UnitTemplate],
    area_materials: &[AreaMaterial],
) -> CalcResult<QuantityReport> {
    validate_inputs(floors, templates, area_materials)?;

    let steel_calculation = steel::calculate_steel(floors);
    let rollup = unit_materials::rollup_unit_materials(templates);
    let area_rows: Vec<AreaMaterialRow> = area_materials
        .iter()
        .map(|material| area_materials::resolve_area_material(material, floors))
        .collect();

    let report = QuantityReport {
        steel_calculation,
        unit_materials: rollup.rows,
        area_materials: area_rows,
        total_area: steel::total_area(floors).value(),
        total_units: rollup.total_units,
    };

    tracing::debug!(
        floors = floors.len(),
        templates = templates.len(),
        unit_rows = report.unit_materials.len(),
        area_rows = report.area_materials.len(),
        total_steel_tons = report.steel_calculation.total_steel_tons,
        warnings = report.warnings().len(),
        "quantity report calculated"
    );

    Ok(report)
}

//! # Quantity Report
//!
//! Output types of [`super::calculate`]. Everything here is derived and
//! regenerated on each run; values are un-rounded.
//!
//! ## JSON Example (abridged)
//!
//! ```json
//! {
//!   "steel_calculation": {
//!     "floors": [
//!       { "floor_id": "…", "floor_number": 1, "floor_name": "Floor 1",
//!         "area": 100.0, "steel_factor": 120.0, "steel_tons": 12.0 }
//!     ],
//!     "total_steel_tons": 12.0
//!   },
//!   "unit_materials": [
//!     { "item_name": "Tile", "item_code": null, "unit": "m2", "quantity": 50.0,
//!       "unit_price": 20.0, "total_price": 1000.0, "templates": ["A1"], "warnings": [] }
//!   ],
//!   "area_materials": [],
//!   "total_area": 100.0,
//!   "total_units": 10
//! }
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::cost::{self, CostSummary};
use crate::model::CalculationMethod;

/// Something a human should review on a report row.
///
/// Warnings never stop the calculation; the row still carries a quantity
/// computed with the documented fallback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReportWarning {
    /// A floor-scoped material points at a floor that is not in the project
    /// (or at no floor at all). The quantity was computed over all floors.
    FloorNotFound { selected_floor_id: Option<Uuid> },

    /// The same material appears with different units across templates.
    /// The rows were kept apart instead of being merged.
    UnitMismatch { item: String, units: Vec<String> },

    /// Tile dimensions were set but their area evaluated to zero (or the
    /// tile count overflowed). The pre-override quantity was kept.
    DegenerateTileGeometry { tile_width: f64, tile_height: f64 },

    /// A computed value overflowed to infinity. Inputs are individually
    /// valid but their product is out of range; JSON renders the value as null.
    NonFiniteResult { field: String },
}

impl ReportWarning {
    /// Short code for programmatic handling
    pub fn code(&self) -> &'static str {
        match self {
            ReportWarning::FloorNotFound { .. } => "FLOOR_NOT_FOUND",
            ReportWarning::UnitMismatch { .. } => "UNIT_MISMATCH",
            ReportWarning::DegenerateTileGeometry { .. } => "DEGENERATE_TILE_GEOMETRY",
            ReportWarning::NonFiniteResult { .. } => "NON_FINITE_RESULT",
        }
    }

    /// Flag the first of `quantity` / `total_price` that is not finite.
    pub(crate) fn non_finite(quantity: f64, total_price: f64) -> Option<ReportWarning> {
        [("quantity", quantity), ("total_price", total_price)]
            .into_iter()
            .find(|(_, value)| !value.is_finite())
            .map(|(field, _)| ReportWarning::NonFiniteResult { field: field.to_string() })
    }
}

impl fmt::Display for ReportWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportWarning::FloorNotFound { selected_floor_id: Some(id) } => {
                write!(f, "selected floor {} not found, using all floors", id)
            }
            ReportWarning::FloorNotFound { selected_floor_id: None } => {
                write!(f, "no floor selected, using all floors")
            }
            ReportWarning::UnitMismatch { item, units } => {
                write!(f, "'{}' is listed with different units: {}", item, units.join(", "))
            }
            ReportWarning::DegenerateTileGeometry { tile_width, tile_height } => {
                write!(f, "tile {} x {} cm has no usable area, tile count ignored", tile_width, tile_height)
            }
            ReportWarning::NonFiniteResult { field } => {
                write!(f, "{} is out of range, check input magnitudes", field)
            }
        }
    }
}

/// Steel take-off for one floor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloorSteel {
    pub floor_id: Uuid,
    pub floor_number: i32,
    /// Display name (explicit name or derived from the number)
    pub floor_name: String,
    /// m²
    pub area: f64,
    /// kg/m²
    pub steel_factor: f64,
    /// area × steel_factor / 1000
    pub steel_tons: f64,
}

/// Steel take-off for the whole building.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SteelCalculation {
    /// One row per floor, in input order
    pub floors: Vec<FloorSteel>,
    pub total_steel_tons: f64,
}

/// One rolled-up material line from the unit templates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitMaterialRow {
    pub item_name: String,
    pub item_code: Option<String>,
    pub unit: String,
    /// Σ quantity_per_unit × template count
    pub quantity: f64,
    /// Shared unit price, or the quantity-weighted average when templates
    /// priced the item differently
    pub unit_price: f64,
    pub total_price: f64,
    /// Codes of the templates that contributed, in first-seen order
    pub templates: Vec<String>,
    pub warnings: Vec<ReportWarning>,
}

/// One resolved area material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaMaterialRow {
    pub area_material_id: Uuid,
    pub item_name: String,
    pub item_code: Option<String>,
    pub unit: String,
    pub calculation_method: CalculationMethod,
    /// Area the material was computed over (m²)
    pub scope_area: f64,
    /// Quantity before waste (after the tile override, if any)
    pub base_quantity: f64,
    /// True when the tile count replaced the factor/direct quantity
    pub tile_override_applied: bool,
    pub waste_percentage: f64,
    /// Final quantity including waste
    pub quantity: f64,
    pub unit_price: f64,
    pub total_price: f64,
    /// Name of the selected floor; `None` when the scope is all floors
    /// (including the fallback for a missing floor)
    pub resolved_floor_name: Option<String>,
    pub warnings: Vec<ReportWarning>,
}

/// Full take-off produced by [`super::calculate`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct QuantityReport {
    pub steel_calculation: SteelCalculation,
    pub unit_materials: Vec<UnitMaterialRow>,
    pub area_materials: Vec<AreaMaterialRow>,
    /// Σ floor area (m²)
    pub total_area: f64,
    /// Σ template counts
    pub total_units: u64,
}

impl QuantityReport {
    /// Cost totals for this report.
    pub fn cost_summary(&self) -> CostSummary {
        cost::summarize(self)
    }

    /// Every warning in the report, paired with the item name it belongs to.
    pub fn warnings(&self) -> Vec<(&str, &ReportWarning)> {
        let unit_rows = self
            .unit_materials
            .iter()
            .flat_map(|row| row.warnings.iter().map(move |w| (row.item_name.as_str(), w)));
        let area_rows = self
            .area_materials
            .iter()
            .flat_map(|row| row.warnings.iter().map(move |w| (row.item_name.as_str(), w)));
        unit_rows.chain(area_rows).collect()
    }

    /// True when at least one row carries a warning.
    pub fn requires_review(&self) -> bool {
        self.unit_materials.iter().any(|r| !r.warnings.is_empty())
            || self.area_materials.iter().any(|r| !r.warnings.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warning_serialization() {
        let warning = ReportWarning::UnitMismatch {
            item: "Grout".to_string(),
            units: vec!["kg".to_string(), "bag".to_string()],
        };
        let json = serde_json::to_string(&warning).unwrap();
        assert!(json.contains("\"kind\":\"unit_mismatch\""));
        let roundtrip: ReportWarning = serde_json::from_str(&json).unwrap();
        assert_eq!(warning, roundtrip);
    }

    #[test]
    fn test_warning_display() {
        let warning = ReportWarning::FloorNotFound { selected_floor_id: None };
        assert_eq!(warning.to_string(), "no floor selected, using all floors");
        assert_eq!(warning.code(), "FLOOR_NOT_FOUND");
    }

    #[test]
    fn test_non_finite() {
        assert_eq!(ReportWarning::non_finite(1.0, 2.0), None);
        assert_eq!(
            ReportWarning::non_finite(1.0, f64::INFINITY),
            Some(ReportWarning::NonFiniteResult { field: "total_price".to_string() })
        );
        let warning = ReportWarning::non_finite(f64::INFINITY, f64::INFINITY).unwrap();
        assert_eq!(warning.to_string(), "quantity is out of range, check input magnitudes");
    }

    #[test]
    fn test_empty_report_needs_no_review() {
        let report = QuantityReport::default();
        assert!(!report.requires_review());
        assert!(report.warnings().is_empty());
    }
}

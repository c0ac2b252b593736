//! # Area-Material Quantity Resolution
//!
//! Each area material goes through four steps:
//!
//! 1. **Scope** - all floors, or the selected floor. A selected floor that
//!    cannot be found falls back to all floors and the row is flagged.
//! 2. **Base quantity** - `direct_quantity`, or `scope_area × factor`.
//! 3. **Tile override** - when both tile dimensions (cm) and the scope area
//!    are positive, the base becomes the tile count
//!    `scope_area / ((w/100) × (h/100))`. This wins over both the factor and
//!    the direct quantity.
//! 4. **Waste** - `quantity = base × (1 + waste% / 100)`.
//!
//! ## Example
//!
//! ```rust
//! use boq_core::model::{AreaMaterial, Floor};
//! use boq_core::calculations::area_materials::resolve_area_material;
//!
//! let floors = vec![Floor::new(1, 100.0, 120.0), Floor::new(2, 80.0, 100.0)];
//! let screed = AreaMaterial::new("Screed", "m3", 85.0)
//!     .with_factor(0.02)
//!     .with_waste(10.0);
//!
//! let row = resolve_area_material(&screed, &floors);
//! assert!((row.quantity - 3.96).abs() < 1e-9);
//! ```

use crate::model::{find_floor, AreaMaterial, CalculationMethod, CalculationType, Floor};
use crate::units::{Centimeters, Meters, SqM};

use super::report::{AreaMaterialRow, ReportWarning};
use super::steel::total_area;

/// Outcome of step 1.
#[derive(Debug, Clone, PartialEq)]
pub struct Scope {
    pub area: SqM,
    /// Set only when a selected floor was found
    pub floor_name: Option<String>,
    pub warning: Option<ReportWarning>,
}

/// Step 1: the area the material is computed over.
pub fn resolve_scope(material: &AreaMaterial, floors: &[Floor]) -> Scope {
    match material.calculation_type {
        CalculationType::AllFloors => Scope {
            area: total_area(floors),
            floor_name: None,
            warning: None,
        },
        CalculationType::SelectedFloor => {
            match material.selected_floor_id.and_then(|id| find_floor(floors, id)) {
                Some(floor) => Scope {
                    area: SqM(floor.area),
                    floor_name: Some(floor.display_name()),
                    warning: None,
                },
                None => {
                    tracing::warn!(
                        item = %material.item_name,
                        selected_floor_id = ?material.selected_floor_id,
                        "selected floor not found, falling back to all floors"
                    );
                    Scope {
                        area: total_area(floors),
                        floor_name: None,
                        warning: Some(ReportWarning::FloorNotFound {
                            selected_floor_id: material.selected_floor_id,
                        }),
                    }
                }
            }
        }
    }
}

/// Step 2: quantity from the calculation method.
pub fn base_quantity(material: &AreaMaterial, scope_area: SqM) -> f64 {
    match material.calculation_method {
        CalculationMethod::Direct => material.direct_quantity,
        CalculationMethod::Factor => scope_area.0 * material.factor,
    }
}

/// Outcome of step 3.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TileOutcome {
    /// No tile dimensions, or nothing to cover
    NotApplicable,
    /// Base replaced by the tile count
    Applied { tile_count: f64 },
    /// Dimensions were set but gave no usable tile area
    Degenerate,
}

/// Step 3: tile count, if the material is tiled.
pub fn tile_override(material: &AreaMaterial, scope_area: SqM) -> TileOutcome {
    if !(material.has_tile_dimensions() && scope_area.0 > 0.0) {
        return TileOutcome::NotApplicable;
    }

    let width: Meters = Centimeters(material.tile_width).into();
    let height: Meters = Centimeters(material.tile_height).into();
    let tile_area = width * height;
    if tile_area.0 <= 0.0 {
        return TileOutcome::Degenerate;
    }

    let tile_count = scope_area.0 / tile_area.0;
    if !tile_count.is_finite() {
        return TileOutcome::Degenerate;
    }
    TileOutcome::Applied { tile_count }
}

/// Step 4: add the waste allowance.
pub fn apply_waste(base: f64, waste_percentage: f64) -> f64 {
    base * (1.0 + waste_percentage / 100.0)
}

/// Run all four steps for one material.
pub fn resolve_area_material(material: &AreaMaterial, floors: &[Floor]) -> AreaMaterialRow {
    let scope = resolve_scope(material, floors);
    let mut warnings: Vec<ReportWarning> = scope.warning.into_iter().collect();

    let mut base = base_quantity(material, scope.area);
    let mut tile_override_applied = false;
    match tile_override(material, scope.area) {
        TileOutcome::NotApplicable => {}
        TileOutcome::Applied { tile_count } => {
            base = tile_count;
            tile_override_applied = true;
        }
        TileOutcome::Degenerate => {
            tracing::warn!(
                item = %material.item_name,
                tile_width = material.tile_width,
                tile_height = material.tile_height,
                "tile area is zero, keeping base quantity"
            );
            warnings.push(ReportWarning::DegenerateTileGeometry {
                tile_width: material.tile_width,
                tile_height: material.tile_height,
            });
        }
    }

    let quantity = apply_waste(base, material.waste_percentage);
    let total_price = quantity * material.unit_price;
    if let Some(warning) = ReportWarning::non_finite(quantity, total_price) {
        tracing::warn!(item = %material.item_name, %warning, "area material result overflowed");
        warnings.push(warning);
    }

    AreaMaterialRow {
        area_material_id: material.id,
        item_name: material.item_name.clone(),
        item_code: material.code().map(str::to_string),
        unit: material.unit.trim().to_string(),
        calculation_method: material.calculation_method,
        scope_area: scope.area.0,
        base_quantity: base,
        tile_override_applied,
        waste_percentage: material.waste_percentage,
        quantity,
        unit_price: material.unit_price,
        total_price,
        resolved_floor_name: scope.floor_name,
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn floors() -> Vec<Floor> {
        vec![Floor::new(1, 100.0, 120.0), Floor::new(2, 80.0, 100.0)]
    }

    #[test]
    fn test_all_floors_scope() {
        let material = AreaMaterial::new("Paint", "l", 5.0).with_factor(0.3);
        let scope = resolve_scope(&material, &floors());
        assert_eq!(scope.area, SqM(180.0));
        assert!(scope.floor_name.is_none());
        assert!(scope.warning.is_none());
    }

    #[test]
    fn test_selected_floor_scope() {
        let floors = floors();
        let material = AreaMaterial::new("Paint", "l", 5.0)
            .with_factor(0.3)
            .on_floor(floors[1].id);
        let row = resolve_area_material(&material, &floors);
        assert_eq!(row.scope_area, 80.0);
        assert!(approx(row.quantity, 24.0));
        assert_eq!(row.resolved_floor_name.as_deref(), Some("Floor 2"));
        assert!(row.warnings.is_empty());
    }

    #[test]
    fn test_dangling_floor_falls_back_to_all_floors() {
        let floors = floors();
        let stale = Uuid::new_v4();
        let material = AreaMaterial::new("Paint", "l", 5.0).with_factor(0.3).on_floor(stale);
        let row = resolve_area_material(&material, &floors);

        let all = resolve_area_material(&AreaMaterial::new("Paint", "l", 5.0).with_factor(0.3), &floors);
        assert_eq!(row.scope_area, all.scope_area);
        assert_eq!(row.quantity, all.quantity);
        assert!(row.resolved_floor_name.is_none());
        assert_eq!(
            row.warnings,
            vec![ReportWarning::FloorNotFound { selected_floor_id: Some(stale) }]
        );
    }

    #[test]
    fn test_selected_floor_without_id_falls_back() {
        let mut material = AreaMaterial::new("Paint", "l", 5.0).with_factor(1.0);
        material.calculation_type = CalculationType::SelectedFloor;
        let row = resolve_area_material(&material, &floors());
        assert_eq!(row.scope_area, 180.0);
        assert_eq!(row.warnings, vec![ReportWarning::FloorNotFound { selected_floor_id: None }]);
    }

    #[test]
    fn test_direct_quantity_ignores_area() {
        let material = AreaMaterial::new("Waterproofing kit", "set", 300.0)
            .with_direct_quantity(12.0)
            .with_waste(0.0);
        let row = resolve_area_material(&material, &floors());
        assert_eq!(row.base_quantity, 12.0);
        assert_eq!(row.quantity, 12.0);
        assert!(approx(row.total_price, 3600.0));
    }

    #[test]
    fn test_tile_override_replaces_factor() {
        let floors = vec![Floor::new(1, 36.0, 0.0)];
        let material = AreaMaterial::new("Tile 60x60", "pcs", 2.0)
            .with_factor(999.0)
            .with_tile(60.0, 60.0)
            .with_waste(5.0);
        let row = resolve_area_material(&material, &floors);
        assert!(row.tile_override_applied);
        assert!(approx(row.base_quantity, 100.0));
        assert!(approx(row.quantity, 105.0));
        assert!(approx(row.total_price, 210.0));
    }

    #[test]
    fn test_tile_override_replaces_direct() {
        let floors = vec![Floor::new(1, 36.0, 0.0)];
        let material = AreaMaterial::new("Tile 30x60", "pcs", 1.0)
            .with_direct_quantity(7.0)
            .with_tile(30.0, 60.0);
        let row = resolve_area_material(&material, &floors);
        // 36 / (0.3 × 0.6) = 200
        assert!(approx(row.base_quantity, 200.0));
    }

    #[test]
    fn test_tile_needs_both_dimensions() {
        let floors = vec![Floor::new(1, 36.0, 0.0)];
        let material = AreaMaterial::new("Skirting", "m", 1.0)
            .with_factor(0.5)
            .with_tile(60.0, 0.0);
        let row = resolve_area_material(&material, &floors);
        assert!(!row.tile_override_applied);
        assert_eq!(row.base_quantity, 18.0);
    }

    #[test]
    fn test_tile_ignored_for_zero_scope() {
        let floors = vec![Floor::new(1, 0.0, 0.0)];
        let material = AreaMaterial::new("Tile", "pcs", 1.0)
            .with_direct_quantity(4.0)
            .with_tile(60.0, 60.0);
        let row = resolve_area_material(&material, &floors);
        assert!(!row.tile_override_applied);
        assert_eq!(row.base_quantity, 4.0);
        assert!(row.warnings.is_empty());
    }

    #[test]
    fn test_degenerate_tile_keeps_base() {
        let floors = vec![Floor::new(1, 36.0, 0.0)];
        // (1e-200 / 100)² underflows to zero
        let material = AreaMaterial::new("Tile", "pcs", 1.0)
            .with_factor(2.0)
            .with_tile(1e-200, 1e-200);
        assert_eq!(tile_override(&material, SqM(36.0)), TileOutcome::Degenerate);

        let row = resolve_area_material(&material, &floors);
        assert!(!row.tile_override_applied);
        assert_eq!(row.base_quantity, 72.0);
        assert_eq!(row.warnings.len(), 1);
        assert_eq!(row.warnings[0].code(), "DEGENERATE_TILE_GEOMETRY");
    }

    #[test]
    fn test_overflow_is_flagged() {
        let floors = vec![Floor::new(1, 1e200, 0.0)];
        let material = AreaMaterial::new("Sealant", "l", 1.0).with_factor(1e200);
        let row = resolve_area_material(&material, &floors);
        assert!(row.quantity.is_infinite());
        assert_eq!(
            row.warnings,
            vec![ReportWarning::NonFiniteResult { field: "quantity".to_string() }]
        );

        // Finite quantity, overflowing price
        let pricey = AreaMaterial::new("Gold leaf", "m2", 1e300).with_direct_quantity(1e10);
        let row = resolve_area_material(&pricey, &floors);
        assert_eq!(row.warnings[0].code(), "NON_FINITE_RESULT");
    }

    #[test]
    fn test_code_and_unit_normalised() {
        let material = AreaMaterial::new("Paint", " l ", 5.0).with_factor(0.3).with_code("  ");
        let row = resolve_area_material(&material, &floors());
        assert_eq!(row.item_code, None);
        assert_eq!(row.unit, "l");

        let coded = AreaMaterial::new("Paint", "l", 5.0).with_code(" PNT-1 ");
        let row = resolve_area_material(&coded, &floors());
        assert_eq!(row.item_code.as_deref(), Some("PNT-1"));
    }

    #[test]
    fn test_waste() {
        assert_eq!(apply_waste(10.0, 0.0), 10.0);
        assert!(approx(apply_waste(10.0, 15.0), 11.5));
        assert!(apply_waste(10.0, 15.0) < apply_waste(10.0, 15.5));
    }

    #[test]
    fn test_empty_floor_set() {
        let material = AreaMaterial::new("Paint", "l", 5.0).with_factor(0.3);
        let row = resolve_area_material(&material, &[]);
        assert_eq!(row.scope_area, 0.0);
        assert_eq!(row.quantity, 0.0);
    }
}

//! # Steel by Floor
//!
//! Reinforcement steel from each floor's area and steel ratio:
//!
//! ```text
//! steel_tons = area (m²) × steel_factor (kg/m²) / 1000
//! ```
//!
//! Floors with zero area stay in the output so the row count always equals
//! the floor count.

use crate::model::Floor;
use crate::units::{KgPerSqM, SqM, Tonnes};

use super::report::{FloorSteel, SteelCalculation};

/// Steel for a single floor, in metric tons.
pub fn steel_tons(floor: &Floor) -> f64 {
    let tons: Tonnes = (SqM(floor.area) * KgPerSqM(floor.steel_factor)).into();
    tons.0
}

/// Σ floor area in m².
pub fn total_area(floors: &[Floor]) -> SqM {
    floors.iter().map(|f| SqM(f.area)).sum()
}

/// Steel take-off for every floor, in input order.
pub fn calculate_steel(floors: &[Floor]) -> SteelCalculation {
    let rows: Vec<FloorSteel> = floors
        .iter()
        .map(|floor| FloorSteel {
            floor_id: floor.id,
            floor_number: floor.floor_number,
            floor_name: floor.display_name(),
            area: floor.area,
            steel_factor: floor.steel_factor,
            steel_tons: steel_tons(floor),
        })
        .collect();

    let total_steel_tons = rows.iter().fold(0.0, |acc, r| acc + r.steel_tons);

    SteelCalculation {
        floors: rows,
        total_steel_tons,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ROOF_FLOOR_NUMBER as ROOF;

    #[test]
    fn test_single_floor() {
        let floor = Floor::new(1, 100.0, 120.0);
        // 100 × 120 / 1000 = 12 t
        assert!((steel_tons(&floor) - 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_area_floor_kept() {
        let floors = vec![Floor::new(1, 100.0, 120.0), Floor::new(ROOF, 0.0, 50.0)];
        let steel = calculate_steel(&floors);
        assert_eq!(steel.floors.len(), 2);
        assert_eq!(steel.floors[1].steel_tons, 0.0);
        assert_eq!(steel.floors[1].floor_name, "Roof");
    }

    #[test]
    fn test_linear_in_area() {
        let base = Floor::new(1, 75.0, 110.0);
        let mut scaled = base.clone();
        scaled.area *= 4.0;
        assert!((steel_tons(&scaled) - 4.0 * steel_tons(&base)).abs() < 1e-9);
    }

    #[test]
    fn test_empty_floor_set() {
        let steel = calculate_steel(&[]);
        assert!(steel.floors.is_empty());
        assert_eq!(steel.total_steel_tons, 0.0);
        assert_eq!(total_area(&[]), SqM(0.0));
    }
}

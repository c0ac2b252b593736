//! # Data Model
//!
//! Input entities for the take-off. They are produced by project setup
//! (or loaded from a `.boq` file) and never mutated by the calculations.
//!
//! - [`floor`] - Building stories with area and steel ratio
//! - [`unit_template`] - Repeated unit layouts and their per-unit materials
//! - [`area_material`] - Bulk materials quantified from floor area

pub mod area_material;
pub mod floor;
pub mod unit_template;

pub use area_material::{AreaMaterial, CalculationMethod, CalculationType};
pub use floor::{find_floor, Floor, ROOF_FLOOR_NUMBER};
pub use unit_template::{TemplateMaterial, UnitTemplate};

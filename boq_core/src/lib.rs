//! # boq_core - Bill of Quantities Engine
//!
//! `boq_core` turns a building's structure into a priced Bill of Quantities:
//! floors give steel tonnage and areas, unit templates are multiplied by how
//! many units are built, and area materials are resolved from floor area
//! (factor, direct quantity or tile count, plus waste).
//!
//! ## Design Philosophy
//!
//! - **Stateless**: [`calculations::calculate`] is a pure function of its inputs
//! - **JSON-First**: All inputs and outputs implement Serialize/Deserialize
//! - **Always a report**: Stale references and unit clashes become row
//!   warnings, not errors
//! - **Full precision**: Rounding is left to whoever displays the numbers
//!
//! ## Quick Start
//!
//! ```rust
//! use boq_core::model::{AreaMaterial, Floor, TemplateMaterial, UnitTemplate};
//! use boq_core::calculations::calculate;
//!
//! let floors = vec![Floor::new(1, 100.0, 120.0), Floor::new(2, 80.0, 100.0)];
//! let templates = vec![
//!     UnitTemplate::new("A1", "Two-bedroom", 95.0, 10)
//!         .with_material(TemplateMaterial::new("Tile", "m2", 5.0, 20.0)),
//! ];
//! let materials = vec![
//!     AreaMaterial::new("Screed", "m3", 85.0).with_factor(0.02).with_waste(10.0),
//! ];
//!
//! let report = calculate(&floors, &templates, &materials).unwrap();
//! let costs = report.cost_summary();
//!
//! assert!((report.steel_calculation.total_steel_tons - 20.0).abs() < 1e-9);
//! assert!(costs.total_materials_cost > 1000.0);
//! ```
//!
//! ## Modules
//!
//! - [`model`] - Floors, unit templates, area materials
//! - [`calculations`] - The take-off engine and its report types
//! - [`project`] - Project container and settings
//! - [`file_io`] - `.boq` files with atomic saves and locking
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod errors;
pub mod file_io;
pub mod model;
pub mod project;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{calculate, CostSummary, QuantityReport, ReportWarning};
pub use errors::{CalcError, CalcResult};
pub use file_io::{load_project, save_project, FileLock};
pub use project::{Project, ProjectMetadata, ProjectSettings};

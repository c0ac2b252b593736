//! # Area Materials
//!
//! Bulk materials (tiling, screed, paint, ...) whose quantity comes from
//! floor area instead of unit counts.
//!
//! ## JSON Example (Tiles on one floor)
//!
//! ```json
//! {
//!   "id": "9e3b7c55-2f0a-4d8e-a1b2-6c7d8e9f0a1b",
//!   "item_name": "Porcelain tile 60x60",
//!   "item_code": "PT-6060",
//!   "unit": "pcs",
//!   "calculation_method": "factor",
//!   "factor": 0.0,
//!   "direct_quantity": 0.0,
//!   "calculation_type": "selected_floor",
//!   "selected_floor_id": "6f1c1a8e-6d0f-4c2a-9d35-3f7c5a2e9b11",
//!   "tile_width": 60.0,
//!   "tile_height": 60.0,
//!   "waste_percentage": 5.0,
//!   "unit_price": 3.2,
//!   "notes": "Lobby only"
//! }
//! ```
//!
//! Non-zero tile dimensions switch the quantity to a tile count. That
//! replaces both the factor and the direct quantity, see
//! [`crate::calculations::area_materials`].

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{ensure_non_negative, ensure_present, CalcResult};

/// How the base quantity is obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculationMethod {
    /// scope area × factor
    #[default]
    Factor,
    /// A fixed quantity entered by the user
    Direct,
}

impl CalculationMethod {
    pub fn display_name(&self) -> &'static str {
        match self {
            CalculationMethod::Factor => "Factor",
            CalculationMethod::Direct => "Direct",
        }
    }
}

/// Which floors the material covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculationType {
    #[default]
    AllFloors,
    SelectedFloor,
}

/// A bulk material scoped by floor area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaMaterial {
    pub id: Uuid,

    pub item_name: String,

    #[serde(default)]
    pub item_code: Option<String>,

    /// Unit of measure (e.g., "m3", "pcs", "kg")
    pub unit: String,

    #[serde(default)]
    pub calculation_method: CalculationMethod,

    /// Quantity per m² of scope area (used when method is `factor`)
    #[serde(default)]
    pub factor: f64,

    /// Fixed quantity (used when method is `direct`)
    #[serde(default)]
    pub direct_quantity: f64,

    #[serde(default)]
    pub calculation_type: CalculationType,

    /// Floor the material is limited to (used when type is `selected_floor`)
    #[serde(default)]
    pub selected_floor_id: Option<Uuid>,

    /// Tile width in cm, 0 when not tiled
    #[serde(default)]
    pub tile_width: f64,

    /// Tile height in cm, 0 when not tiled
    #[serde(default)]
    pub tile_height: f64,

    /// Extra allowance for cutting/breakage, in percent
    #[serde(default)]
    pub waste_percentage: f64,

    pub unit_price: f64,

    #[serde(default)]
    pub notes: Option<String>,
}

impl AreaMaterial {
    /// Factor-based material over all floors, no tiles, no waste.
    pub fn new(item_name: impl Into<String>, unit: impl Into<String>, unit_price: f64) -> Self {
        AreaMaterial {
            id: Uuid::new_v4(),
            item_name: item_name.into(),
            item_code: None,
            unit: unit.into(),
            calculation_method: CalculationMethod::Factor,
            factor: 0.0,
            direct_quantity: 0.0,
            calculation_type: CalculationType::AllFloors,
            selected_floor_id: None,
            tile_width: 0.0,
            tile_height: 0.0,
            waste_percentage: 0.0,
            unit_price,
            notes: None,
        }
    }

    /// Use `scope area × factor` as the base quantity.
    pub fn with_factor(mut self, factor: f64) -> Self {
        self.calculation_method = CalculationMethod::Factor;
        self.factor = factor;
        self
    }

    /// Use a fixed base quantity.
    pub fn with_direct_quantity(mut self, quantity: f64) -> Self {
        self.calculation_method = CalculationMethod::Direct;
        self.direct_quantity = quantity;
        self
    }

    /// Limit the scope to one floor.
    pub fn on_floor(mut self, floor_id: Uuid) -> Self {
        self.calculation_type = CalculationType::SelectedFloor;
        self.selected_floor_id = Some(floor_id);
        self
    }

    /// Tile dimensions in cm.
    pub fn with_tile(mut self, width_cm: f64, height_cm: f64) -> Self {
        self.tile_width = width_cm;
        self.tile_height = height_cm;
        self
    }

    pub fn with_waste(mut self, waste_percentage: f64) -> Self {
        self.waste_percentage = waste_percentage;
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.item_code = Some(code.into());
        self
    }

    /// Trimmed item code, `None` when missing or blank.
    pub fn code(&self) -> Option<&str> {
        self.item_code
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }

    /// True when both tile dimensions are set.
    pub fn has_tile_dimensions(&self) -> bool {
        self.tile_width > 0.0 && self.tile_height > 0.0
    }

    /// Validate input parameters.
    ///
    /// Unused numeric fields (e.g. `factor` on a direct material) are still
    /// checked: a negative value anywhere is a data-entry error.
    pub fn validate(&self) -> CalcResult<()> {
        let field = |name: &str| format!("area_materials[{}].{}", self.item_name, name);
        ensure_present("area_materials.item_name", &self.item_name)?;
        ensure_present(field("unit"), &self.unit)?;
        ensure_non_negative(field("factor"), self.factor)?;
        ensure_non_negative(field("direct_quantity"), self.direct_quantity)?;
        ensure_non_negative(field("tile_width"), self.tile_width)?;
        ensure_non_negative(field("tile_height"), self.tile_height)?;
        ensure_non_negative(field("waste_percentage"), self.waste_percentage)?;
        ensure_non_negative(field("unit_price"), self.unit_price)?;
        Ok(())
    }
}

//! # Unit Templates
//!
//! A unit template is a reusable apartment/unit layout. Its materials are
//! quantities for ONE unit; the take-off multiplies them by `count`.
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "id": "0b8f2a64-51a7-4f4c-8f0e-8a4b3f9a7c21",
//!   "code": "A1",
//!   "name": "Two-bedroom",
//!   "area": 95.0,
//!   "rooms_count": 2,
//!   "bathrooms_count": 1,
//!   "count": 10,
//!   "materials": [
//!     {
//!       "id": "2a4c9e1d-0c55-4a51-bf1d-3e2f1c9b8d77",
//!       "item_name": "Tile",
//!       "item_code": "T-60",
//!       "unit": "m2",
//!       "quantity_per_unit": 5.0,
//!       "unit_price": 20.0
//!     }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{ensure_non_negative, ensure_present, CalcResult};

/// A material line item belonging to one unit template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateMaterial {
    pub id: Uuid,

    /// Material name as it should appear in the BOQ
    pub item_name: String,

    /// Optional catalogue code; preferred over the name when rolling up
    #[serde(default)]
    pub item_code: Option<String>,

    /// Unit of measure (e.g., "m2", "pcs", "bag")
    pub unit: String,

    /// Quantity needed for a single unit
    pub quantity_per_unit: f64,

    /// Price per `unit`
    pub unit_price: f64,
}

impl TemplateMaterial {
    pub fn new(item_name: impl Into<String>, unit: impl Into<String>, quantity_per_unit: f64, unit_price: f64) -> Self {
        TemplateMaterial {
            id: Uuid::new_v4(),
            item_name: item_name.into(),
            item_code: None,
            unit: unit.into(),
            quantity_per_unit,
            unit_price,
        }
    }

    /// Builder-style catalogue code.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.item_code = Some(code.into());
        self
    }

    /// Code used for rollup, if one is set and not blank.
    pub fn code(&self) -> Option<&str> {
        self.item_code
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }

    fn validate(&self, template_code: &str, index: usize) -> CalcResult<()> {
        let field = |name: &str| format!("unit_templates[{}].materials[{}].{}", template_code, index, name);
        ensure_present(field("item_name"), &self.item_name)?;
        ensure_present(field("unit"), &self.unit)?;
        ensure_non_negative(field("quantity_per_unit"), self.quantity_per_unit)?;
        ensure_non_negative(field("unit_price"), self.unit_price)?;
        Ok(())
    }
}

/// A repeated unit layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitTemplate {
    pub id: Uuid,

    /// Short code (e.g., "A1")
    pub code: String,

    /// Descriptive name (e.g., "Two-bedroom corner")
    pub name: String,

    /// Net area of one unit in m²
    pub area: f64,

    #[serde(default)]
    pub rooms_count: u32,

    #[serde(default)]
    pub bathrooms_count: u32,

    /// Number of physical units built from this template
    pub count: u32,

    /// Per-unit material requirements, in entry order
    #[serde(default)]
    pub materials: Vec<TemplateMaterial>,
}

impl UnitTemplate {
    pub fn new(code: impl Into<String>, name: impl Into<String>, area: f64, count: u32) -> Self {
        UnitTemplate {
            id: Uuid::new_v4(),
            code: code.into(),
            name: name.into(),
            area,
            rooms_count: 0,
            bathrooms_count: 0,
            count,
            materials: Vec::new(),
        }
    }

    /// Builder-style room counts.
    pub fn with_rooms(mut self, rooms_count: u32, bathrooms_count: u32) -> Self {
        self.rooms_count = rooms_count;
        self.bathrooms_count = bathrooms_count;
        self
    }

    /// Builder-style material line.
    pub fn with_material(mut self, material: TemplateMaterial) -> Self {
        self.materials.push(material);
        self
    }

    /// Validate the template and every material it owns.
    pub fn validate(&self) -> CalcResult<()> {
        ensure_present("unit_templates.code", &self.code)?;
        ensure_non_negative(format!("unit_templates[{}].area", self.code), self.area)?;
        for (index, material) in self.materials.iter().enumerate() {
            material.validate(&self.code, index)?;
        }
        Ok(())
    }
}

//! # Floors
//!
//! A floor is one physical story of the building. It carries its own gross
//! area and the steel reinforcement ratio used for the steel take-off.
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "id": "6f1c1a8e-6d0f-4c2a-9d35-3f7c5a2e9b11",
//!   "floor_number": -1,
//!   "floor_name": null,
//!   "area": 420.0,
//!   "steel_factor": 95.0
//! }
//! ```

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{ensure_non_negative, CalcResult};

/// Floor number reserved for the roof level.
pub const ROOF_FLOOR_NUMBER: i32 = 99;

/// A building story.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Floor {
    /// Stable identifier, referenced by area materials scoped to one floor
    pub id: Uuid,

    /// Story number: negative for basements, 0 for ground, 99 for roof
    pub floor_number: i32,

    /// Optional display name (e.g., "Mezzanine")
    #[serde(default)]
    pub floor_name: Option<String>,

    /// Gross floor area in m²
    pub area: f64,

    /// Steel reinforcement in kg per m² of floor
    pub steel_factor: f64,
}

impl Floor {
    /// Create a floor with a fresh id and no display name.
    pub fn new(floor_number: i32, area: f64, steel_factor: f64) -> Self {
        Floor {
            id: Uuid::new_v4(),
            floor_number,
            floor_name: None,
            area,
            steel_factor,
        }
    }

    /// Builder-style display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.floor_name = Some(name.into());
        self
    }

    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        ensure_non_negative(format!("floors[{}].area", self.floor_number), self.area)?;
        ensure_non_negative(format!("floors[{}].steel_factor", self.floor_number), self.steel_factor)?;
        Ok(())
    }

    /// Name shown in reports.
    ///
    /// Uses `floor_name` when it is set and not blank, otherwise derives a
    /// label from the floor number.
    ///
    /// ```rust
    /// use boq_core::model::Floor;
    ///
    /// assert_eq!(Floor::new(-2, 0.0, 0.0).display_name(), "Basement 2");
    /// assert_eq!(Floor::new(99, 0.0, 0.0).display_name(), "Roof");
    /// assert_eq!(Floor::new(3, 0.0, 0.0).with_name("Podium").display_name(), "Podium");
    /// ```
    pub fn display_name(&self) -> String {
        match self.floor_name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => match self.floor_number {
                ROOF_FLOOR_NUMBER => "Roof".to_string(),
                0 => "Ground Floor".to_string(),
                n if n < 0 => format!("Basement {}", n.unsigned_abs()),
                n => format!("Floor {}", n),
            },
        }
    }
}

/// Find a floor by id. The first match wins if ids repeat.
pub fn find_floor(floors: &[Floor], id: Uuid) -> Option<&Floor> {
    floors.iter().find(|f| f.id == id)
}

//! # Project Data Structures
//!
//! The `Project` struct is the root container for a building's take-off
//! inputs. Projects serialize to `.boq` files as human-readable JSON.
//!
//! ## Structure
//!
//! ```text
//! Project
//! ├── meta: ProjectMetadata (version, name, client, estimator, timestamps)
//! ├── settings: ProjectSettings (currency, display precision)
//! ├── floors: Vec<Floor> (ordered stories)
//! ├── unit_templates: Vec<UnitTemplate> (with their materials)
//! └── area_materials: Vec<AreaMaterial>
//! ```
//!
//! ## Example
//!
//! ```rust
//! use boq_core::model::Floor;
//! use boq_core::project::Project;
//!
//! let mut project = Project::new("Harbour View", "ACME Developments", "J. Estimator");
//! project.add_floor(Floor::new(1, 100.0, 120.0));
//!
//! let report = project.calculate().unwrap();
//! assert_eq!(report.steel_calculation.floors.len(), 1);
//!
//! let json = serde_json::to_string_pretty(&project).unwrap();
//! assert!(json.contains("Harbour View"));
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculations::{self, QuantityReport};
use crate::errors::CalcResult;
use crate::model::{find_floor, AreaMaterial, Floor, UnitTemplate};

/// Current schema version for .boq files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Root project container.
///
/// Floors keep their entry order: it is the order of the steel rows in the
/// report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub meta: ProjectMetadata,

    #[serde(default)]
    pub settings: ProjectSettings,

    #[serde(default)]
    pub floors: Vec<Floor>,

    #[serde(default)]
    pub unit_templates: Vec<UnitTemplate>,

    #[serde(default)]
    pub area_materials: Vec<AreaMaterial>,
}

impl Project {
    /// Create a new empty project.
    ///
    /// # Arguments
    ///
    /// * `name` - Project name (e.g., "Harbour View Tower B")
    /// * `client` - Client name
    /// * `estimator` - Person responsible for the take-off
    pub fn new(name: impl Into<String>, client: impl Into<String>, estimator: impl Into<String>) -> Self {
        let now = Utc::now();
        Project {
            meta: ProjectMetadata {
                version: SCHEMA_VERSION.to_string(),
                name: name.into(),
                client: client.into(),
                estimator: estimator.into(),
                created: now,
                modified: now,
            },
            settings: ProjectSettings::default(),
            floors: Vec::new(),
            unit_templates: Vec::new(),
            area_materials: Vec::new(),
        }
    }

    /// Append a floor. Returns its id.
    pub fn add_floor(&mut self, floor: Floor) -> Uuid {
        let id = floor.id;
        self.floors.push(floor);
        self.touch();
        id
    }

    /// Remove a floor by id.
    ///
    /// Area materials that pointed at it are left as they are; the next
    /// report computes them over all floors and flags them for review.
    pub fn remove_floor(&mut self, id: &Uuid) -> Option<Floor> {
        let position = self.floors.iter().position(|f| f.id == *id)?;
        self.touch();
        Some(self.floors.remove(position))
    }

    /// Get a floor by id.
    pub fn floor(&self, id: &Uuid) -> Option<&Floor> {
        find_floor(&self.floors, *id)
    }

    /// Append a unit template. Returns its id.
    pub fn add_unit_template(&mut self, template: UnitTemplate) -> Uuid {
        let id = template.id;
        self.unit_templates.push(template);
        self.touch();
        id
    }

    /// Remove a unit template (and the materials it owns) by id.
    pub fn remove_unit_template(&mut self, id: &Uuid) -> Option<UnitTemplate> {
        let position = self.unit_templates.iter().position(|t| t.id == *id)?;
        self.touch();
        Some(self.unit_templates.remove(position))
    }

    /// Append an area material. Returns its id.
    pub fn add_area_material(&mut self, material: AreaMaterial) -> Uuid {
        let id = material.id;
        self.area_materials.push(material);
        self.touch();
        id
    }

    /// Remove an area material by id.
    pub fn remove_area_material(&mut self, id: &Uuid) -> Option<AreaMaterial> {
        let position = self.area_materials.iter().position(|m| m.id == *id)?;
        self.touch();
        Some(self.area_materials.remove(position))
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }

    /// Validate every floor, template and area material.
    pub fn validate(&self) -> CalcResult<()> {
        calculations::validate_inputs(&self.floors, &self.unit_templates, &self.area_materials)
    }

    /// Run the take-off over the current snapshot of this project.
    pub fn calculate(&self) -> CalcResult<QuantityReport> {
        calculations::calculate(&self.floors, &self.unit_templates, &self.area_materials)
    }
}

impl Default for Project {
    fn default() -> Self {
        Project::new("", "", "")
    }
}

/// Project metadata stored in the file header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,

    pub name: String,

    pub client: String,

    /// Person responsible for the take-off
    pub estimator: String,

    pub created: DateTime<Utc>,

    pub modified: DateTime<Utc>,
}

/// Presentation settings stored with the project.
///
/// The engine never reads these; they tell report renderers how to format
/// the un-rounded figures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSettings {
    /// ISO currency code printed next to prices
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Decimal places used when displaying quantities and prices
    #[serde(default = "default_display_decimals")]
    pub display_decimals: usize,
}

fn default_currency() -> String {
    "USD".to_string()
}

fn default_display_decimals() -> usize {
    2
}

impl Default for ProjectSettings {
    fn default() -> Self {
        ProjectSettings {
            currency: default_currency(),
            display_decimals: default_display_decimals(),
        }
    }
}

//! Sample project used by `boq init --sample`

use boq_core::model::{AreaMaterial, Floor, TemplateMaterial, UnitTemplate, ROOF_FLOOR_NUMBER};
use boq_core::project::Project;

/// A small four-story building with two unit types.
pub fn sample_project(name: &str, client: &str, estimator: &str) -> Project {
    let mut project = Project::new(name, client, estimator);

    let basement = project.add_floor(Floor::new(-1, 36.0, 90.0).with_name("Parking"));
    project.add_floor(Floor::new(1, 100.0, 120.0));
    project.add_floor(Floor::new(2, 80.0, 100.0));
    project.add_floor(Floor::new(ROOF_FLOOR_NUMBER, 0.0, 0.0));

    project.add_unit_template(
        UnitTemplate::new("A1", "Two-bedroom", 95.0, 10)
            .with_rooms(2, 1)
            .with_material(TemplateMaterial::new("Tile", "m2", 5.0, 20.0).with_code("T-3030"))
            .with_material(TemplateMaterial::new("Interior door", "pcs", 4.0, 150.0))
            .with_material(TemplateMaterial::new("Grout", "kg", 2.0, 1.2)),
    );
    project.add_unit_template(
        UnitTemplate::new("S1", "Studio", 40.0, 4)
            .with_rooms(1, 1)
            .with_material(TemplateMaterial::new("Tile", "m2", 3.0, 20.0).with_code("T-3030"))
            .with_material(TemplateMaterial::new("Interior door", "pcs", 2.0, 150.0)),
    );

    project.add_area_material(
        AreaMaterial::new("Floor screed", "m3", 85.0)
            .with_code("SCR-50")
            .with_factor(0.02)
            .with_waste(10.0),
    );
    project.add_area_material(
        AreaMaterial::new("Porcelain tile 60x60", "pcs", 3.2)
            .with_tile(60.0, 60.0)
            .with_waste(5.0)
            .on_floor(basement),
    );
    project.add_area_material(
        AreaMaterial::new("Ceiling paint", "l", 4.5)
            .with_factor(0.35)
            .with_waste(5.0),
    );

    project
}

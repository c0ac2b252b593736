//! # Unit-Template Material Rollup
//!
//! Every template material is multiplied by the template's unit count:
//!
//! ```text
//! quantity    = quantity_per_unit × count
//! total_price = quantity × unit_price
//! ```
//!
//! Lines for the same material in different templates are merged into one
//! BOQ row. The identity of a material is its `item_code` when one is set,
//! otherwise its `item_name`; lines are only merged when their unit matches
//! too. An uncoded line also joins a coded row with the same name and unit,
//! as long as exactly one such coded row exists.
//!
//! Rows that share an identity or a name but carry different units stay
//! separate and each of them gets a [`ReportWarning::UnitMismatch`].

use std::collections::HashMap;

use crate::model::{TemplateMaterial, UnitTemplate};

use super::report::{ReportWarning, UnitMaterialRow};

/// Identity of a material for rollup purposes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Identity {
    Code(String),
    Name(String),
}

impl Identity {
    fn of(material: &TemplateMaterial) -> Self {
        match material.code() {
            Some(code) => Identity::Code(code.to_string()),
            None => Identity::Name(material.item_name.trim().to_string()),
        }
    }
}

/// Row under construction plus what is needed to finish its unit price.
struct Accumulator {
    row: UnitMaterialRow,
    identity: Identity,
    /// Trimmed item name
    name: String,
    mixed_prices: bool,
}

impl Accumulator {
    fn from_line(template: &UnitTemplate, material: &TemplateMaterial) -> Self {
        let quantity = material.quantity_per_unit * f64::from(template.count);
        Accumulator {
            row: UnitMaterialRow {
                item_name: material.item_name.clone(),
                item_code: material.code().map(str::to_string),
                unit: material.unit.trim().to_string(),
                quantity,
                unit_price: material.unit_price,
                total_price: quantity * material.unit_price,
                templates: vec![template.code.clone()],
                warnings: Vec::new(),
            },
            identity: Identity::of(material),
            name: material.item_name.trim().to_string(),
            mixed_prices: false,
        }
    }

    fn merge_key(&self) -> (Identity, String) {
        (self.identity.clone(), self.row.unit.clone())
    }

    fn absorb(&mut self, other: Accumulator) {
        self.row.quantity += other.row.quantity;
        self.row.total_price += other.row.total_price;
        if other.mixed_prices || self.row.unit_price != other.row.unit_price {
            self.mixed_prices = true;
        }
        for code in other.row.templates {
            if !self.row.templates.contains(&code) {
                self.row.templates.push(code);
            }
        }
    }

    fn finish(mut self) -> UnitMaterialRow {
        if self.mixed_prices && self.row.quantity > 0.0 {
            self.row.unit_price = self.row.total_price / self.row.quantity;
        }
        if let Some(warning) = ReportWarning::non_finite(self.row.quantity, self.row.total_price) {
            tracing::warn!(item = %self.row.item_name, %warning, "unit material result overflowed");
            self.row.warnings.push(warning);
        }
        self.row
    }
}

/// Result of the rollup.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitRollup {
    pub rows: Vec<UnitMaterialRow>,
    /// Σ template counts
    pub total_units: u64,
}

/// Multiply template materials by unit counts and merge matching lines.
///
/// Rows come out in the order their material was first seen, so the output
/// does not depend on hash ordering.
pub fn rollup_unit_materials(templates: &[UnitTemplate]) -> UnitRollup {
    let mut accumulators: Vec<Accumulator> = Vec::new();
    let mut index: HashMap<(Identity, String), usize> = HashMap::new();

    for template in templates {
        for material in &template.materials {
            let line = Accumulator::from_line(template, material);
            match index.get(&line.merge_key()) {
                Some(&i) => accumulators[i].absorb(line),
                None => {
                    index.insert(line.merge_key(), accumulators.len());
                    accumulators.push(line);
                }
            }
        }
    }

    let mut accumulators = fold_uncoded_into_coded(accumulators);
    flag_unit_mismatches(&mut accumulators);

    let rows = accumulators.into_iter().map(Accumulator::finish).collect();
    let total_units = templates.iter().map(|t| u64::from(t.count)).sum();

    UnitRollup { rows, total_units }
}

/// Merge name-keyed rows into the single coded row with the same name and unit.
///
/// When several codes share a name the uncoded row is left alone, since
/// there is no way to tell which code it belongs to.
fn fold_uncoded_into_coded(accumulators: Vec<Accumulator>) -> Vec<Accumulator> {
    let mut coded: HashMap<(&str, &str), Vec<usize>> = HashMap::new();
    for (i, acc) in accumulators.iter().enumerate() {
        if let Identity::Code(_) = acc.identity {
            coded
                .entry((acc.name.as_str(), acc.row.unit.as_str()))
                .or_default()
                .push(i);
        }
    }

    let targets: Vec<Option<usize>> = accumulators
        .iter()
        .map(|acc| match acc.identity {
            Identity::Name(_) => match coded.get(&(acc.name.as_str(), acc.row.unit.as_str())) {
                Some(indices) if indices.len() == 1 => Some(indices[0]),
                _ => None,
            },
            Identity::Code(_) => None,
        })
        .collect();

    let mut slots: Vec<Option<Accumulator>> = accumulators.into_iter().map(Some).collect();
    for (i, target) in targets.into_iter().enumerate() {
        let Some(target) = target else { continue };
        if let Some(line) = slots[i].take() {
            tracing::debug!(item = %line.name, "uncoded material merged into coded row");
            if let Some(row) = slots[target].as_mut() {
                row.absorb(line);
            }
        }
    }
    slots.into_iter().flatten().collect()
}

/// Attach a warning to every row whose identity or name shows up with more
/// than one unit.
fn flag_unit_mismatches(accumulators: &mut [Accumulator]) {
    let conflicts: Vec<Vec<String>> = accumulators
        .iter()
        .map(|acc| {
            let mut units: Vec<String> = Vec::new();
            for other in accumulators
                .iter()
                .filter(|o| o.identity == acc.identity || o.name == acc.name)
            {
                if !units.contains(&other.row.unit) {
                    units.push(other.row.unit.clone());
                }
            }
            units
        })
        .collect();

    for (acc, units) in accumulators.iter_mut().zip(conflicts) {
        if units.len() > 1 {
            tracing::warn!(
                item = %acc.row.item_name,
                unit = %acc.row.unit,
                units = ?units,
                "material listed with different units across templates, not merged"
            );
            acc.row.warnings.push(ReportWarning::UnitMismatch {
                item: acc.row.item_name.clone(),
                units,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_single_template() {
        let template = UnitTemplate::new("A1", "Two-bedroom", 95.0, 10)
            .with_material(TemplateMaterial::new("Tile", "m2", 5.0, 20.0));
        let rollup = rollup_unit_materials(&[template]);

        assert_eq!(rollup.total_units, 10);
        assert_eq!(rollup.rows.len(), 1);
        assert!(approx(rollup.rows[0].quantity, 50.0));
        assert!(approx(rollup.rows[0].total_price, 1000.0));
        assert_eq!(rollup.rows[0].unit_price, 20.0);
    }

    #[test]
    fn test_same_name_merged_across_templates() {
        let a = UnitTemplate::new("A1", "Two-bedroom", 95.0, 10)
            .with_material(TemplateMaterial::new("Door", "pcs", 4.0, 150.0));
        let b = UnitTemplate::new("B1", "Studio", 40.0, 6)
            .with_material(TemplateMaterial::new("Door", "pcs", 2.0, 150.0));
        let rollup = rollup_unit_materials(&[a, b]);

        assert_eq!(rollup.rows.len(), 1);
        let row = &rollup.rows[0];
        assert!(approx(row.quantity, 52.0));
        assert!(approx(row.total_price, 7800.0));
        assert_eq!(row.unit_price, 150.0);
        assert_eq!(row.templates, vec!["A1".to_string(), "B1".to_string()]);
        assert!(row.warnings.is_empty());
        assert_eq!(rollup.total_units, 16);
    }

    #[test]
    fn test_code_takes_precedence_over_name() {
        let a = UnitTemplate::new("A1", "x", 1.0, 1)
            .with_material(TemplateMaterial::new("Ceramic tile", "m2", 10.0, 12.0).with_code("CT-30"));
        let b = UnitTemplate::new("B1", "y", 1.0, 1)
            .with_material(TemplateMaterial::new("Wall tile 30x30", "m2", 5.0, 12.0).with_code("CT-30"));
        let rollup = rollup_unit_materials(&[a, b]);

        assert_eq!(rollup.rows.len(), 1);
        assert_eq!(rollup.rows[0].item_name, "Ceramic tile");
        assert_eq!(rollup.rows[0].item_code.as_deref(), Some("CT-30"));
        assert!(approx(rollup.rows[0].quantity, 15.0));
    }

    #[test]
    fn test_unit_mismatch_not_merged() {
        let a = UnitTemplate::new("A1", "x", 1.0, 2)
            .with_material(TemplateMaterial::new("Grout", "kg", 3.0, 1.5));
        let b = UnitTemplate::new("B1", "y", 1.0, 3)
            .with_material(TemplateMaterial::new("Grout", "bag", 1.0, 9.0));
        let rollup = rollup_unit_materials(&[a, b]);

        assert_eq!(rollup.rows.len(), 2);
        assert!(approx(rollup.rows[0].quantity, 6.0));
        assert!(approx(rollup.rows[1].quantity, 3.0));
        for row in &rollup.rows {
            assert_eq!(
                row.warnings,
                vec![ReportWarning::UnitMismatch {
                    item: "Grout".to_string(),
                    units: vec!["kg".to_string(), "bag".to_string()],
                }]
            );
        }
    }

    #[test]
    fn test_unit_mismatch_across_coded_and_uncoded() {
        let a = UnitTemplate::new("A1", "x", 1.0, 2)
            .with_material(TemplateMaterial::new("Grout", "kg", 3.0, 1.5).with_code("G-1"));
        let b = UnitTemplate::new("B1", "y", 1.0, 3)
            .with_material(TemplateMaterial::new("Grout", "bag", 1.0, 9.0));
        let rollup = rollup_unit_materials(&[a, b]);

        assert_eq!(rollup.rows.len(), 2);
        for row in &rollup.rows {
            assert_eq!(
                row.warnings,
                vec![ReportWarning::UnitMismatch {
                    item: "Grout".to_string(),
                    units: vec!["kg".to_string(), "bag".to_string()],
                }]
            );
        }
    }

    #[test]
    fn test_uncoded_line_joins_coded_row() {
        let a = UnitTemplate::new("A1", "x", 1.0, 2)
            .with_material(TemplateMaterial::new("Grout", "kg", 3.0, 1.5));
        let b = UnitTemplate::new("B1", "y", 1.0, 4)
            .with_material(TemplateMaterial::new("Grout", "kg", 1.0, 1.5).with_code("G-1"));
        let rollup = rollup_unit_materials(&[a, b]);

        assert_eq!(rollup.rows.len(), 1);
        let row = &rollup.rows[0];
        assert!(approx(row.quantity, 10.0));
        assert!(approx(row.total_price, 15.0));
        assert_eq!(row.item_code.as_deref(), Some("G-1"));
        assert_eq!(row.templates, vec!["B1".to_string(), "A1".to_string()]);
        assert!(row.warnings.is_empty());
    }

    #[test]
    fn test_uncoded_line_kept_when_codes_ambiguous() {
        let a = UnitTemplate::new("A1", "x", 1.0, 1)
            .with_material(TemplateMaterial::new("Grout", "kg", 1.0, 1.0).with_code("G-1"))
            .with_material(TemplateMaterial::new("Grout", "kg", 1.0, 1.0).with_code("G-2"));
        let b = UnitTemplate::new("B1", "y", 1.0, 1)
            .with_material(TemplateMaterial::new("Grout", "kg", 1.0, 1.0));
        let rollup = rollup_unit_materials(&[a, b]);

        assert_eq!(rollup.rows.len(), 3);
        assert!(rollup.rows.iter().all(|r| r.warnings.is_empty()));
    }

    #[test]
    fn test_overflowing_line_flagged() {
        let template = UnitTemplate::new("A1", "x", 1.0, 10)
            .with_material(TemplateMaterial::new("Rebar", "kg", f64::MAX, 1.0));
        let rollup = rollup_unit_materials(&[template]);
        assert_eq!(rollup.rows[0].warnings[0].code(), "NON_FINITE_RESULT");
    }

    #[test]
    fn test_mixed_prices_use_weighted_average() {
        let a = UnitTemplate::new("A1", "x", 1.0, 1)
            .with_material(TemplateMaterial::new("Paint", "l", 10.0, 2.0));
        let b = UnitTemplate::new("B1", "y", 1.0, 1)
            .with_material(TemplateMaterial::new("Paint", "l", 30.0, 4.0));
        let rollup = rollup_unit_materials(&[a, b]);

        let row = &rollup.rows[0];
        // (10×2 + 30×4) / 40 = 3.5
        assert!(approx(row.total_price, 140.0));
        assert!(approx(row.unit_price, 3.5));
    }

    #[test]
    fn test_zero_count_template() {
        let template = UnitTemplate::new("C1", "Penthouse", 200.0, 0)
            .with_material(TemplateMaterial::new("Marble", "m2", 40.0, 90.0));
        let rollup = rollup_unit_materials(&[template]);

        assert_eq!(rollup.rows.len(), 1);
        assert_eq!(rollup.rows[0].quantity, 0.0);
        assert_eq!(rollup.rows[0].unit_price, 90.0);
        assert_eq!(rollup.total_units, 0);
    }

    #[test]
    fn test_first_seen_order() {
        let a = UnitTemplate::new("A1", "x", 1.0, 1)
            .with_material(TemplateMaterial::new("Zinc", "kg", 1.0, 1.0))
            .with_material(TemplateMaterial::new("Alu", "kg", 1.0, 1.0));
        let b = UnitTemplate::new("B1", "y", 1.0, 1)
            .with_material(TemplateMaterial::new("Copper", "kg", 1.0, 1.0))
            .with_material(TemplateMaterial::new("Zinc", "kg", 1.0, 1.0));
        let rollup = rollup_unit_materials(&[a, b]);

        let names: Vec<&str> = rollup.rows.iter().map(|r| r.item_name.as_str()).collect();
        assert_eq!(names, vec!["Zinc", "Alu", "Copper"]);
    }
}

// astrars-beamline/src/composite.rs

//! The composite simulation document.
//!
//! One request owns one run specification, one output specification, one
//! space-charge model and the beamline module lists. Module ordering and
//! id assignment happen exactly once, at composition time, before any
//! id-dependent field (per-instance file names) is computed; the document
//! is rendered once and never mutated afterwards.

use crate::modules::{
    aggregate_group, order_and_index, BeamlineModule, Cavity, Indexed, Quadrupole, Solenoid,
};
use crate::output::OutputSpecs;
use crate::run::{DistributionPaths, RunSpecs};
use crate::space_charge::SpaceCharge;
use astrars_namelist::{json_kind, render_document, RawMap, Result, SchemaError};
use astrars_tables::FieldTable;
use serde_json::Value;

/// A fully composed simulation input.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationInput {
    pub run_specs: RunSpecs,
    pub output_specs: OutputSpecs,
    pub space_charge: SpaceCharge,
    pub cavities: Vec<Indexed<Cavity>>,
    pub solenoids: Vec<Indexed<Solenoid>>,
    pub quadrupoles: Vec<Indexed<Quadrupole>>,
}

impl SimulationInput {
    /// Compose a document from resolved parts.
    ///
    /// Each module kind is ordered independently: stable-sorted ascending
    /// by `z_0` if every instance of the kind has it set, input order
    /// otherwise; ids are assigned 1..N by final order.
    pub fn compose(
        run_specs: RunSpecs,
        output_specs: OutputSpecs,
        space_charge: SpaceCharge,
        cavities: Vec<Cavity>,
        solenoids: Vec<Solenoid>,
        quadrupoles: Vec<Quadrupole>,
    ) -> Self {
        Self {
            run_specs,
            output_specs,
            space_charge,
            cavities: order_and_index(cavities),
            solenoids: order_and_index(solenoids),
            quadrupoles: order_and_index(quadrupoles),
        }
    }

    /// Resolve a raw request document and compose it.
    ///
    /// Missing sections resolve to their defaults; `paths` supplies the
    /// location of named particle distributions.
    pub fn resolve(input: &RawMap, paths: &dyn DistributionPaths) -> Result<Self> {
        let empty = RawMap::new();
        let section = |key| sub_object(input, key).map(|map| map.unwrap_or(&empty));

        let run_specs = RunSpecs::resolve(section("run_specs")?, paths)?;
        let output_specs = OutputSpecs::resolve(section("output_specs")?)?;
        let space_charge = SpaceCharge::resolve(section("space_charge")?)?;

        let mut cavities = Vec::new();
        for map in sub_modules(input, "cavities")? {
            cavities.push(Cavity::resolve(map)?);
        }
        let mut solenoids = Vec::new();
        for map in sub_modules(input, "solenoids")? {
            solenoids.push(Solenoid::resolve(map)?);
        }
        let mut quadrupoles = Vec::new();
        for map in sub_modules(input, "quadrupoles")? {
            quadrupoles.push(Quadrupole::resolve(map)?);
        }

        Ok(Self::compose(
            run_specs,
            output_specs,
            space_charge,
            cavities,
            solenoids,
            quadrupoles,
        ))
    }

    /// Render the full deck: NEWRUN, OUTPUT, CHARGE, then one aggregated
    /// group per module kind, blank-line separated, trailing newline.
    pub fn render(&self) -> Result<String> {
        render_document(&[
            self.run_specs.to_group(),
            self.output_specs.to_group(),
            self.space_charge.to_group(),
            aggregate_group(&self.cavities),
            aggregate_group(&self.solenoids),
            aggregate_group(&self.quadrupoles),
        ])
    }

    /// The field-map files referenced by the deck, as
    /// (file name, table) pairs to be written into the run directory.
    pub fn field_map_files(&self) -> Vec<(String, &FieldTable)> {
        let cavity_maps = self
            .cavities
            .iter()
            .filter_map(|c| c.module.field_map(c.id));
        let solenoid_maps = self
            .solenoids
            .iter()
            .filter_map(|s| s.module.field_map(s.id));
        cavity_maps.chain(solenoid_maps).collect()
    }

    /// Directory name the run executes in: `run_dir` when given, the run
    /// id otherwise.
    pub fn run_dir_name<'a>(&'a self, sim_id: &'a str) -> &'a str {
        self.run_specs.run_dir.as_deref().unwrap_or(sim_id)
    }
}

fn sub_object<'a>(input: &'a RawMap, key: &'static str) -> Result<Option<&'a RawMap>> {
    match input.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(map)) => Ok(Some(map)),
        Some(other) => Err(SchemaError::InvalidFieldValue {
            field: key,
            expected: "an object",
            got: json_kind(other),
        }),
    }
}

fn sub_modules<'a>(input: &'a RawMap, key: &'static str) -> Result<Vec<&'a RawMap>> {
    let values = match input.get(key) {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(values)) => values,
        Some(other) => {
            return Err(SchemaError::InvalidFieldValue {
                field: key,
                expected: "an array of objects",
                got: json_kind(other),
            })
        }
    };
    let mut maps = Vec::with_capacity(values.len());
    for value in values {
        match value {
            Value::Object(map) => maps.push(map),
            other => {
                return Err(SchemaError::InvalidFieldValue {
                    field: key,
                    expected: "an array of objects",
                    got: json_kind(other),
                })
            }
        }
    }
    Ok(maps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct FlatPaths;

    impl DistributionPaths for FlatPaths {
        fn distribution_file(&self, name: &str) -> String {
            format!("/data/generator/{}.ini", name)
        }
    }

    fn resolve(value: serde_json::Value) -> SimulationInput {
        SimulationInput::resolve(value.as_object().unwrap(), &FlatPaths).unwrap()
    }

    #[test]
    fn empty_request_composes_a_default_deck() {
        let input = resolve(json!({}));
        let text = input.render().unwrap();
        let group_order: Vec<&str> = text
            .lines()
            .filter(|line| line.starts_with('&'))
            .collect();
        assert_eq!(
            group_order,
            vec!["&NEWRUN", "&OUTPUT", "&CHARGE", "&CAVITY", "&SOLENOID", "&QUADRUPOLE"]
        );
        assert!(text.contains("\n/\n\n&OUTPUT"));
        assert!(text.contains("    LEfield = false\n"));
        assert!(text.contains("    LBfield = false\n"));
        assert!(text.contains("    LQuad = false\n"));
        assert!(text.ends_with("/\n"));
    }

    #[test]
    fn cavities_sort_by_position_and_get_sequential_ids() {
        let input = resolve(json!({
            "cavities": [
                {"z_0": 3.0, "phase": 30.0},
                {"z_0": 1.0, "phase": 10.0},
                {"z_0": 2.0, "phase": 20.0},
            ],
        }));
        let phases: Vec<(u32, f64)> = input
            .cavities
            .iter()
            .map(|c| (c.id, c.module.phi))
            .collect();
        assert_eq!(phases, vec![(1, 10.0), (2, 20.0), (3, 30.0)]);

        let text = input.render().unwrap();
        assert!(text.contains("    C_pos(1) = 1.0\n"));
        assert!(text.contains("    C_pos(3) = 3.0\n"));
    }

    #[test]
    fn solenoid_with_unset_position_freezes_input_order() {
        let input = resolve(json!({
            "solenoids": [
                {"z_0": 3.0},
                {"max_field_strength": 0.5},
                {"z_0": 2.0},
            ],
        }));
        let order: Vec<(u32, Option<f64>)> = input
            .solenoids
            .iter()
            .map(|s| (s.id, s.module.s_pos))
            .collect();
        assert_eq!(order, vec![(1, Some(3.0)), (2, None), (3, Some(2.0))]);
    }

    #[test]
    fn field_maps_are_collected_with_assigned_instance_names() {
        let input = resolve(json!({
            "cavities": [
                {"z_0": 2.0},
                {"z_0": 1.0, "field_table": {"z": [0.0, 0.1], "v": [0.0, 1.0]}},
            ],
        }));
        let files: Vec<String> = input
            .field_map_files()
            .into_iter()
            .map(|(name, _)| name)
            .collect();
        // the cavity at z_0 = 1.0 sorted to id 1
        assert_eq!(files, vec!["C1_E.dat".to_string()]);
    }

    #[test]
    fn malformed_section_is_rejected_with_its_key() {
        let err = SimulationInput::resolve(
            json!({"cavities": "none"}).as_object().unwrap(),
            &FlatPaths,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            SchemaError::InvalidFieldValue {
                field: "cavities",
                ..
            }
        ));
    }
}

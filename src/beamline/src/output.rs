// astrars-beamline/src/output.rs

//! Output generation parameters, rendered as the `&OUTPUT` group.

use astrars_namelist::{FieldSpec, NamelistGroup, RawMap, Result};

/// Field table of the output specification, in declaration order.
pub mod fields {
    use astrars_namelist::FieldSpec;

    pub const ZSTART: FieldSpec = FieldSpec::new("ZSTART").alias("z_start").unit("[m]");
    pub const ZSTOP: FieldSpec = FieldSpec::new("ZSTOP").alias("z_stop").unit("[m]");
    pub const ZEMIT: FieldSpec = FieldSpec::new("Zemit").alias("emittance_checkpoint_num");
    pub const ZPHASE: FieldSpec = FieldSpec::new("Zphase").alias("distribution_checkpoint_num");
    pub const HIGH_RES: FieldSpec = FieldSpec::new("High_res").alias("high_accuracy");
    pub const REFS: FieldSpec = FieldSpec::new("RefS");
    pub const EMITS: FieldSpec = FieldSpec::new("EmitS").alias("generate_emittance_output");
    pub const TR_EMITS: FieldSpec =
        FieldSpec::new("Tr_emitS").alias("generate_ts_emittance_output");
    pub const PHASES: FieldSpec =
        FieldSpec::new("PhaseS").alias("generate_complete_particle_output");

    pub const FIELDS: &[FieldSpec] = &[
        ZSTART, ZSTOP, ZEMIT, ZPHASE, HIGH_RES, REFS, EMITS, TR_EMITS, PHASES,
    ];
}

/// Parameters controlling which output files the simulation produces.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputSpecs {
    /// Minimal z position for output generation [m].
    pub z_start: f64,
    /// Longitudinal stop position [m]; tracking stops when the bunch
    /// center passes it.
    pub z_stop: f64,
    /// Number of emittance checkpoints between z_start and z_stop.
    pub z_emit: i64,
    /// Number of complete-distribution checkpoints.
    pub z_phase: i64,
    /// If true, distributions are saved with increased accuracy.
    pub high_res: bool,
    /// If true, reference trajectory output at each Runge-Kutta step.
    pub ref_s: bool,
    /// If true, emittance and statistical beam parameters are stored.
    pub emit_s: bool,
    /// If true, trace-space emittance output is stored.
    pub tr_emit_s: bool,
    /// If true, the complete distribution is saved at each checkpoint.
    pub phase_s: bool,
}

impl OutputSpecs {
    /// Group name of the rendered model.
    pub const GROUP: &'static str = "OUTPUT";

    /// Resolve a raw request map into output specifications.
    pub fn resolve(input: &RawMap) -> Result<Self> {
        use fields::*;
        Ok(Self {
            z_start: ZSTART.real(input)?.unwrap_or(0.0),
            z_stop: ZSTOP.real(input)?.unwrap_or(1.0),
            z_emit: ZEMIT.int(input)?.unwrap_or(100),
            z_phase: ZPHASE.int(input)?.unwrap_or(1),
            high_res: HIGH_RES.logical(input)?.unwrap_or(true),
            ref_s: REFS.logical(input)?.unwrap_or(true),
            emit_s: EMITS.logical(input)?.unwrap_or(true),
            tr_emit_s: TR_EMITS.logical(input)?.unwrap_or(true),
            phase_s: PHASES.logical(input)?.unwrap_or(true),
        })
    }

    /// Fold the model into its `&OUTPUT` group.
    pub fn to_group(&self) -> NamelistGroup {
        use fields::*;
        let mut group = NamelistGroup::new(Self::GROUP);
        group.push(ZSTART.name, self.z_start);
        group.push(ZSTOP.name, self.z_stop);
        group.push(ZEMIT.name, self.z_emit);
        group.push(ZPHASE.name, self.z_phase);
        group.push(HIGH_RES.name, self.high_res);
        group.push(REFS.name, self.ref_s);
        group.push(EMITS.name, self.emit_s);
        group.push(TR_EMITS.name, self.tr_emit_s);
        group.push(PHASES.name, self.phase_s);
        group
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: serde_json::Value) -> RawMap {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn defaults_render_one_line_per_field() {
        let specs = OutputSpecs::resolve(&raw(json!({}))).unwrap();
        let text = specs.to_group().render().unwrap();
        assert_eq!(text.lines().count(), fields::FIELDS.len() + 2);
        assert!(text.contains("    ZSTOP = 1.0\n"));
        assert!(text.contains("    Zemit = 100\n"));
        assert!(text.contains("    PhaseS = true\n"));
    }

    #[test]
    fn aliases_resolve() {
        let specs = OutputSpecs::resolve(&raw(json!({
            "z_stop": 2.5,
            "generate_emittance_output": false,
        })))
        .unwrap();
        assert_eq!(specs.z_stop, 2.5);
        assert!(!specs.emit_s);
    }
}

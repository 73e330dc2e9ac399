// astrars-beamline/src/space_charge.rs

//! Space-charge solver parameters, rendered as the `&CHARGE` group.

use astrars_namelist::{FieldSpec, NamelistGroup, RawMap, Result};

/// Field table of the space-charge model, in declaration order.
pub mod fields {
    use astrars_namelist::FieldSpec;

    pub const LSPCH: FieldSpec = FieldSpec::new("LSPCH").alias("use_space_charge");
    pub const LSPCH3D: FieldSpec = FieldSpec::new("LSPCH3D").alias("use_3d_space_charge");
    pub const Z_TRANS: FieldSpec = FieldSpec::new("z_trans").unit("[m]");
    pub const LMIRROR: FieldSpec = FieldSpec::new("Lmirror").alias("use_mirror_charge");
    pub const NRAD: FieldSpec = FieldSpec::new("Nrad").alias("grid_cell_count");
    pub const CELL_VAR: FieldSpec = FieldSpec::new("Cell_var").alias("cell_size_scale");
    pub const MAX_SCALE: FieldSpec = FieldSpec::new("Max_Scale").alias("max_scale");
    pub const MAX_COUNT: FieldSpec = FieldSpec::new("Max_Count").alias("max_scale_count");
    pub const EXP_CONTROL: FieldSpec = FieldSpec::new("Exp_Control").alias("variation_threshold");
    pub const NLONG_IN: FieldSpec = FieldSpec::new("Nlong_in").alias("longitudinal_grid_size");
    pub const N_MIN: FieldSpec = FieldSpec::new("N_min").alias("emitted_particle_num_per_step");
    pub const L2D_3D: FieldSpec = FieldSpec::new("L2D_3D").computed();

    pub const FIELDS: &[FieldSpec] = &[
        LSPCH, LSPCH3D, Z_TRANS, LMIRROR, NRAD, CELL_VAR, MAX_SCALE, MAX_COUNT, EXP_CONTROL,
        NLONG_IN, N_MIN, L2D_3D,
    ];
}

/// Space-charge solver configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct SpaceCharge {
    /// Toggle space-charge field calculation.
    pub lspch: bool,
    /// Toggle the 3D FFT space-charge algorithm.
    pub lspch3d: bool,
    /// Position of the automatic 2D-to-3D transition [m]; the `L2D_3D`
    /// switch is derived from its presence.
    pub z_trans: Option<f64>,
    /// If true, mirror charges at the cathode are taken into account.
    pub lmirror: bool,
    /// Number of radial grid cells up to the bunch radius.
    pub nrad: i64,
    /// Radial variation of the cell height.
    pub cell_var: f64,
    /// Scaling-factor limit triggering a new space-charge calculation.
    pub max_scale: f64,
    /// Scaling count triggering a new space-charge calculation.
    pub max_count: i64,
    /// Maximum tolerable bunch-extension variation per time step.
    pub exp_control: f64,
    /// Maximum longitudinal grid cells within the bunch length.
    pub nlong_in: i64,
    /// Average particles emitted per step during cathode emission.
    pub n_min: i64,
}

impl SpaceCharge {
    /// Group name of the rendered model.
    pub const GROUP: &'static str = "CHARGE";

    /// Resolve a raw request map into a space-charge model.
    pub fn resolve(input: &RawMap) -> Result<Self> {
        use fields::*;
        Ok(Self {
            lspch: LSPCH.logical(input)?.unwrap_or(false),
            lspch3d: LSPCH3D.logical(input)?.unwrap_or(false),
            z_trans: Z_TRANS.real(input)?,
            lmirror: LMIRROR.logical(input)?.unwrap_or(true),
            nrad: NRAD.int(input)?.unwrap_or(32),
            cell_var: CELL_VAR.real(input)?.unwrap_or(2.0),
            max_scale: MAX_SCALE.real(input)?.unwrap_or(0.05),
            max_count: MAX_COUNT.int(input)?.unwrap_or(40),
            exp_control: EXP_CONTROL.real(input)?.unwrap_or(0.1),
            nlong_in: NLONG_IN.int(input)?.unwrap_or(10),
            n_min: N_MIN.int(input)?.unwrap_or(10),
        })
    }

    /// The derived 2D-to-3D transition switch.
    pub fn l2d_3d(&self) -> bool {
        self.z_trans.is_some()
    }

    /// Fold the model into its `&CHARGE` group, the derived switch last.
    pub fn to_group(&self) -> NamelistGroup {
        use fields::*;
        let mut group = NamelistGroup::new(Self::GROUP);
        group.push(LSPCH.name, self.lspch);
        group.push(LSPCH3D.name, self.lspch3d);
        if let Some(z_trans) = self.z_trans {
            group.push(Z_TRANS.name, z_trans);
        }
        group.push(LMIRROR.name, self.lmirror);
        group.push(NRAD.name, self.nrad);
        group.push(CELL_VAR.name, self.cell_var);
        group.push(MAX_SCALE.name, self.max_scale);
        group.push(MAX_COUNT.name, self.max_count);
        group.push(EXP_CONTROL.name, self.exp_control);
        group.push(NLONG_IN.name, self.nlong_in);
        group.push(N_MIN.name, self.n_min);
        group.push(L2D_3D.name, self.l2d_3d());
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
    fn transition_switch_follows_z_trans() {
        let charge = SpaceCharge::resolve(&raw(json!({}))).unwrap();
        assert!(!charge.l2d_3d());
        let text = charge.to_group().render().unwrap();
        assert!(text.contains("    L2D_3D = false\n"));
        assert!(!text.contains("z_trans"));

        let charge = SpaceCharge::resolve(&raw(json!({"z_trans": 0.3}))).unwrap();
        let text = charge.to_group().render().unwrap();
        assert!(text.contains("    z_trans = 0.3\n"));
        assert!(text.contains("    L2D_3D = true\n"));
    }

    #[test]
    fn grid_defaults_match_the_solver() {
        let charge = SpaceCharge::resolve(&raw(json!({}))).unwrap();
        assert_eq!(charge.nrad, 32);
        assert_eq!(charge.cell_var, 2.0);
        assert_eq!(charge.max_count, 40);
        assert!(charge.lmirror);
    }
}

// astrars-beamline/src/modules.rs

//! Indexed beamline modules: cavities, solenoids and quadrupoles.
//!
//! All modules of one kind share a single namelist group headed by an
//! existence flag (`LEfield`, `LBfield`, `LQuad`); the fields of each
//! instance carry a `(id)` suffix. Instance ids are assigned by the
//! composition engine, never supplied by the caller.

use astrars_namelist::{json_kind, FieldSpec, NamelistGroup, RawMap, Result, SchemaError};
use astrars_tables::FieldTable;
use serde_json::Value;
use std::cmp::Ordering;

/// Capability shared by every beamline module kind: ordered by a
/// longitudinal position, indexable, and rendered into a named, flagged
/// field group.
pub trait BeamlineModule {
    /// Group all instances of this kind share.
    const GROUP: &'static str;
    /// Existence flag heading the group.
    const FLAG: &'static str;

    /// The positional key the composition engine sorts by, when set.
    fn z_0(&self) -> Option<f64>;

    /// Append this instance's fields to the shared group under the given id.
    fn append_entries(&self, id: u32, group: &mut NamelistGroup);

    /// The field-map file this instance references, if any, as
    /// (file name, table). The orchestration layer writes it next to the
    /// rendered deck.
    fn field_map(&self, id: u32) -> Option<(String, &FieldTable)> {
        let _ = id;
        None
    }
}

/// A module instance with its assigned id.
#[derive(Debug, Clone, PartialEq)]
pub struct Indexed<M> {
    /// Instance id, 1-based, fixed at composition time.
    pub id: u32,
    pub module: M,
}

/// Order modules of one kind and assign instance ids.
///
/// If every instance carries a positional key, the list is stable-sorted
/// ascending by it; otherwise input order is preserved. Ids are assigned
/// 1..N by final order either way. Runs exactly once, before any
/// id-dependent field is computed.
pub fn order_and_index<M: BeamlineModule>(mut modules: Vec<M>) -> Vec<Indexed<M>> {
    if modules.iter().all(|module| module.z_0().is_some()) {
        modules.sort_by(|a, b| {
            a.z_0()
                .partial_cmp(&b.z_0())
                .unwrap_or(Ordering::Equal)
        });
    }
    modules
        .into_iter()
        .enumerate()
        .map(|(index, module)| Indexed {
            id: index as u32 + 1,
            module,
        })
        .collect()
}

/// Render all instances of one kind into their shared flagged group.
pub fn aggregate_group<M: BeamlineModule>(modules: &[Indexed<M>]) -> NamelistGroup {
    let mut group = NamelistGroup::new(M::GROUP);
    group.push(M::FLAG, !modules.is_empty());
    for indexed in modules {
        indexed.module.append_entries(indexed.id, &mut group);
    }
    group
}

/// Field table of the cavity model, in declaration order.
pub mod cavity_fields {
    use astrars_namelist::FieldSpec;

    pub const FIELD_TABLE: FieldSpec = FieldSpec::new("field_table").excluded();
    pub const NUE: FieldSpec = FieldSpec::new("Nue").alias("frequency").unit("[GHz]");
    pub const C_POS: FieldSpec = FieldSpec::new("C_pos").alias("z_0").unit("[m]");
    pub const C_SMOOTH: FieldSpec = FieldSpec::new("C_smooth").alias("smoothing_iterations");
    pub const C_HIGHER_ORDER: FieldSpec = FieldSpec::new("C_higher_order").alias("higher_order");
    pub const PHI: FieldSpec = FieldSpec::new("Phi").alias("phase").unit("[deg]");
    pub const MAX_E: FieldSpec = FieldSpec::new("MaxE")
        .alias("max_field_strength")
        .unit("[MV/m]");
    pub const FILE_EFIELD: FieldSpec = FieldSpec::new("File_Efield").computed();

    pub const FIELDS: &[FieldSpec] = &[
        FIELD_TABLE, NUE, C_POS, C_SMOOTH, C_HIGHER_ORDER, PHI, MAX_E, FILE_EFIELD,
    ];
}

/// An accelerating RF cavity.
#[derive(Debug, Clone, PartialEq)]
pub struct Cavity {
    /// On-axis field profile, written as `C<id>_E.dat`.
    pub field_table: Option<FieldTable>,
    /// RF frequency [GHz].
    pub nue: f64,
    /// Leftmost longitudinal cavity position [m].
    pub c_pos: f64,
    /// Smoothing iterations for transverse field components.
    pub c_smooth: i64,
    /// Field expansion to 3rd order if true, 1st order if false.
    pub c_higher_order: bool,
    /// Initial RF phase [deg].
    pub phi: f64,
    /// Maximum on-axis longitudinal field amplitude [MV/m].
    pub max_e: f64,
}

impl Cavity {
    /// Resolve a raw request map into a cavity.
    pub fn resolve(input: &RawMap) -> Result<Self> {
        use cavity_fields::*;
        Ok(Self {
            field_table: resolve_field_table(&FIELD_TABLE, input)?,
            nue: NUE.real(input)?.unwrap_or(1.3),
            c_pos: C_POS.real(input)?.unwrap_or(0.0),
            c_smooth: C_SMOOTH.int(input)?.unwrap_or(10),
            c_higher_order: C_HIGHER_ORDER.logical(input)?.unwrap_or(true),
            phi: PHI.real(input)?.unwrap_or(0.0),
            max_e: MAX_E.real(input)?.unwrap_or(130.0),
        })
    }

    /// Name of the field-map file for instance `id`.
    pub fn file_efield(id: u32) -> String {
        format!("C{}_E.dat", id)
    }
}

impl BeamlineModule for Cavity {
    const GROUP: &'static str = "CAVITY";
    const FLAG: &'static str = "LEfield";

    fn z_0(&self) -> Option<f64> {
        Some(self.c_pos)
    }

    fn append_entries(&self, id: u32, group: &mut NamelistGroup) {
        use cavity_fields::*;
        group.push_indexed(NUE.name, id, self.nue);
        group.push_indexed(C_POS.name, id, self.c_pos);
        group.push_indexed(C_SMOOTH.name, id, self.c_smooth);
        group.push_indexed(C_HIGHER_ORDER.name, id, self.c_higher_order);
        group.push_indexed(PHI.name, id, self.phi);
        group.push_indexed(MAX_E.name, id, self.max_e);
        group.push_indexed(FILE_EFIELD.name, id, Self::file_efield(id));
    }

    fn field_map(&self, id: u32) -> Option<(String, &FieldTable)> {
        self.field_table
            .as_ref()
            .map(|table| (Self::file_efield(id), table))
    }
}

/// Field table of the solenoid model, in declaration order.
pub mod solenoid_fields {
    use astrars_namelist::FieldSpec;

    pub const FIELD_TABLE: FieldSpec = FieldSpec::new("field_table").excluded();
    pub const S_POS: FieldSpec = FieldSpec::new("S_pos").alias("z_0").unit("[m]");
    pub const S_SMOOTH: FieldSpec = FieldSpec::new("S_smooth").alias("smoothing_iterations");
    pub const MAX_B: FieldSpec = FieldSpec::new("MaxB").alias("max_field_strength").unit("[T]");
    pub const FILE_BFIELD: FieldSpec = FieldSpec::new("File_Bfield").computed();

    pub const FIELDS: &[FieldSpec] = &[FIELD_TABLE, S_POS, S_SMOOTH, MAX_B, FILE_BFIELD];
}

/// A focusing solenoid.
#[derive(Debug, Clone, PartialEq)]
pub struct Solenoid {
    /// On-axis field profile, written as `S<id>_B.dat`.
    pub field_table: Option<FieldTable>,
    /// Leftmost longitudinal solenoid position [m].
    pub s_pos: Option<f64>,
    /// Smoothing iterations for transverse field components.
    pub s_smooth: i64,
    /// Maximum on-axis longitudinal field amplitude [T].
    pub max_b: Option<f64>,
}

impl Solenoid {
    /// Resolve a raw request map into a solenoid.
    pub fn resolve(input: &RawMap) -> Result<Self> {
        use solenoid_fields::*;
        Ok(Self {
            field_table: resolve_field_table(&FIELD_TABLE, input)?,
            s_pos: S_POS.real(input)?,
            s_smooth: S_SMOOTH.int(input)?.unwrap_or(10),
            max_b: MAX_B.real(input)?,
        })
    }

    /// Name of the field-map file for instance `id`.
    pub fn file_bfield(id: u32) -> String {
        format!("S{}_B.dat", id)
    }
}

impl BeamlineModule for Solenoid {
    const GROUP: &'static str = "SOLENOID";
    const FLAG: &'static str = "LBfield";

    fn z_0(&self) -> Option<f64> {
        self.s_pos
    }

    fn append_entries(&self, id: u32, group: &mut NamelistGroup) {
        use solenoid_fields::*;
        if let Some(s_pos) = self.s_pos {
            group.push_indexed(S_POS.name, id, s_pos);
        }
        group.push_indexed(S_SMOOTH.name, id, self.s_smooth);
        if let Some(max_b) = self.max_b {
            group.push_indexed(MAX_B.name, id, max_b);
        }
        group.push_indexed(FILE_BFIELD.name, id, Self::file_bfield(id));
    }

    fn field_map(&self, id: u32) -> Option<(String, &FieldTable)> {
        self.field_table
            .as_ref()
            .map(|table| (Self::file_bfield(id), table))
    }
}

/// Field table of the quadrupole model, in declaration order.
pub mod quadrupole_fields {
    use astrars_namelist::FieldSpec;

    pub const Q_LENGTH: FieldSpec = FieldSpec::new("Q_length").alias("q_len").unit("[m]");
    pub const Q_K: FieldSpec = FieldSpec::new("Q_K").alias("q_focus").unit("[m^-2]");
    pub const Q_BORE: FieldSpec = FieldSpec::new("Q_bore").alias("bore_radius").unit("[m]");
    pub const Q_POS: FieldSpec = FieldSpec::new("Q_pos").alias("z_0").unit("[m]");

    pub const FIELDS: &[FieldSpec] = &[Q_LENGTH, Q_K, Q_BORE, Q_POS];
}

/// A focusing quadrupole.
#[derive(Debug, Clone, PartialEq)]
pub struct Quadrupole {
    /// Effective length [m].
    pub q_length: Option<f64>,
    /// Focusing strength [m^-2].
    pub q_k: f64,
    /// Taper parameter for the field edge [m].
    pub q_bore: f64,
    /// Longitudinal position [m].
    pub q_pos: Option<f64>,
}

impl Quadrupole {
    /// Resolve a raw request map into a quadrupole.
    pub fn resolve(input: &RawMap) -> Result<Self> {
        use quadrupole_fields::*;
        Ok(Self {
            q_length: Q_LENGTH.real(input)?,
            q_k: Q_K.real(input)?.unwrap_or(10.0),
            q_bore: Q_BORE.real(input)?.unwrap_or(0.035),
            q_pos: Q_POS.real(input)?,
        })
    }
}

impl BeamlineModule for Quadrupole {
    const GROUP: &'static str = "QUADRUPOLE";
    const FLAG: &'static str = "LQuad";

    fn z_0(&self) -> Option<f64> {
        self.q_pos
    }

    fn append_entries(&self, id: u32, group: &mut NamelistGroup) {
        use quadrupole_fields::*;
        if let Some(q_length) = self.q_length {
            group.push_indexed(Q_LENGTH.name, id, q_length);
        }
        group.push_indexed(Q_K.name, id, self.q_k);
        group.push_indexed(Q_BORE.name, id, self.q_bore);
        if let Some(q_pos) = self.q_pos {
            group.push_indexed(Q_POS.name, id, q_pos);
        }
    }
}

/// Resolve a nested field-map table: an object with equal-length `z` and
/// `v` arrays, both required when the table is given at all.
fn resolve_field_table(spec: &FieldSpec, input: &RawMap) -> Result<Option<FieldTable>> {
    const Z: FieldSpec = FieldSpec::new("z").unit("[m]");
    const V: FieldSpec = FieldSpec::new("v");

    let map = match spec.raw(input)? {
        None => return Ok(None),
        Some(Value::Object(map)) => map,
        Some(other) => {
            return Err(SchemaError::InvalidFieldValue {
                field: spec.name,
                expected: "an object with `z` and `v` arrays",
                got: json_kind(other),
            })
        }
    };
    let z = Z.real_seq(map)?.ok_or_else(|| Z.missing())?;
    let v = V.real_seq(map)?.ok_or_else(|| V.missing())?;
    if z.len() != v.len() {
        return Err(SchemaError::InvalidFieldValue {
            field: spec.name,
            expected: "equal-length `z` and `v` arrays",
            got: "arrays of different length",
        });
    }
    Ok(Some(FieldTable { z, v }))
}

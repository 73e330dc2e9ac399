// astrars-beamline/src/generator.rs

//! The particle generator input model, rendered as the `&INPUT` group.

use crate::enums::{resolve_enum, Distribution, ParticleType};
use astrars_namelist::{FieldSpec, NamelistGroup, RawMap, Result};

/// Field table of the generator input, in declaration order.
///
/// Internal names are the keywords the generator binary reads; aliases are
/// the public request keys. `FNAME` is derived from the run id and never
/// user-settable.
pub mod fields {
    use astrars_namelist::FieldSpec;

    pub const ADD: FieldSpec = FieldSpec::new("Add");
    pub const N_ADD: FieldSpec = FieldSpec::new("N_add");
    pub const IPART: FieldSpec = FieldSpec::new("IPart").alias("particle_count");
    pub const SPECIES: FieldSpec = FieldSpec::new("Species").alias("particle_type");
    pub const PROBE: FieldSpec = FieldSpec::new("Probe").alias("generate_probe_particles");
    pub const NOISE_REDUC: FieldSpec = FieldSpec::new("Noise_reduc").alias("quasi_random");
    pub const CATHODE: FieldSpec = FieldSpec::new("Cathode").alias("time_spread");
    pub const HIGH_RES: FieldSpec = FieldSpec::new("High_res").alias("high_accuracy");
    pub const Q_TOTAL: FieldSpec = FieldSpec::new("Q_total").alias("total_charge").unit("[nC]");
    pub const DIST_Z: FieldSpec = FieldSpec::new("Dist_z").alias("dist_z");
    pub const DIST_PZ: FieldSpec = FieldSpec::new("Dist_pz").alias("dist_pz");
    pub const DIST_X: FieldSpec = FieldSpec::new("Dist_x").alias("dist_x");
    pub const DIST_PX: FieldSpec = FieldSpec::new("Dist_px").alias("dist_px");
    pub const DIST_Y: FieldSpec = FieldSpec::new("Dist_y").alias("dist_y");
    pub const DIST_PY: FieldSpec = FieldSpec::new("Dist_py").alias("dist_py");
    pub const COR_EKIN: FieldSpec = FieldSpec::new("cor_Ekin").alias("cor_energy_spread");
    pub const COR_PX: FieldSpec = FieldSpec::new("cor_px").unit("[mrad]");
    pub const COR_PY: FieldSpec = FieldSpec::new("cor_py").unit("[mrad]");
    pub const REF_EKIN: FieldSpec = FieldSpec::new("Ref_Ekin")
        .alias("reference_kinetic_energy")
        .unit("[keV]");
    pub const REF_ZPOS: FieldSpec = FieldSpec::new("Ref_zpos").alias("z_0_ref").unit("[m]");
    pub const SIG_EKIN: FieldSpec = FieldSpec::new("sig_Ekin")
        .alias("rms_energy_spread")
        .unit("[keV]");
    pub const SIG_X: FieldSpec = FieldSpec::new("sig_x").alias("rms_bunch_size_x").unit("[mm]");
    pub const SIG_PX: FieldSpec = FieldSpec::new("sig_px").alias("rms_dist_px").unit("[eV/c]");
    pub const SIG_Y: FieldSpec = FieldSpec::new("sig_y").alias("rms_bunch_size_y").unit("[mm]");
    pub const SIG_PY: FieldSpec = FieldSpec::new("sig_py").alias("rms_dist_py").unit("[eV/c]");
    pub const SIG_Z: FieldSpec = FieldSpec::new("sig_z").alias("rms_bunch_size_z").unit("[mm]");
    pub const SIG_CLOCK: FieldSpec = FieldSpec::new("sig_clock").alias("sig_t").unit("[ns]");
    pub const NEMIT_X: FieldSpec = FieldSpec::new("Nemit_x")
        .alias("x_emittance")
        .unit("[pi*mrad*mm]");
    pub const NEMIT_Y: FieldSpec = FieldSpec::new("Nemit_y")
        .alias("y_emittance")
        .unit("[pi*mrad*mm]");
    pub const C_SIG_X: FieldSpec = FieldSpec::new("C_sig_x").alias("gaussian_cutoff_x");
    pub const C_SIG_Y: FieldSpec = FieldSpec::new("C_sig_y").alias("gaussian_cutoff_y");
    pub const C_SIG_Z: FieldSpec = FieldSpec::new("C_sig_z").alias("gaussian_cutoff_z");
    pub const LZ: FieldSpec = FieldSpec::new("Lz").alias("flattop_z_length").unit("[mm]");
    pub const RZ: FieldSpec = FieldSpec::new("rz").alias("flattop_rise_z").unit("[mm]");
    pub const LT: FieldSpec = FieldSpec::new("Lt").alias("flattop_time_length").unit("[ns]");
    pub const RT: FieldSpec = FieldSpec::new("rt").alias("flattop_rise_time").unit("[ns]");
    pub const FNAME: FieldSpec = FieldSpec::new("FNAME").computed();

    pub const FIELDS: &[FieldSpec] = &[
        ADD, N_ADD, IPART, SPECIES, PROBE, NOISE_REDUC, CATHODE, HIGH_RES, Q_TOTAL, DIST_Z,
        DIST_PZ, DIST_X, DIST_PX, DIST_Y, DIST_PY, COR_EKIN, COR_PX, COR_PY, REF_EKIN, REF_ZPOS,
        SIG_EKIN, SIG_X, SIG_PX, SIG_Y, SIG_PY, SIG_Z, SIG_CLOCK, NEMIT_X, NEMIT_Y, C_SIG_X,
        C_SIG_Y, C_SIG_Z, LZ, RZ, LT, RT, FNAME,
    ];
}

/// Input for one particle generator run.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorInput {
    /// Target path of the generated particle file. Derived, never settable.
    pub fname: String,
    /// If true, particles are added to an existing distribution file.
    pub add: bool,
    /// Number of particles to add.
    pub n_add: i64,
    /// Number of particles to be generated.
    pub ipart: i64,
    /// Species of the generated particles.
    pub species: ParticleType,
    /// If true, six probe particles are generated.
    pub probe: bool,
    /// If true, coordinates follow a quasi-random Hammersley sequence.
    pub noise_reduc: bool,
    /// If true, particles get a time spread rather than a longitudinal
    /// position spread.
    pub cathode: bool,
    /// If true, the distribution is saved with increased accuracy.
    pub high_res: bool,
    /// Total charge, equally distributed over the particles [nC].
    pub q_total: f64,
    pub dist_z: Distribution,
    pub dist_pz: Distribution,
    pub dist_x: Distribution,
    pub dist_px: Distribution,
    pub dist_y: Distribution,
    pub dist_py: Distribution,
    /// Correlated energy spread.
    pub cor_ekin: f64,
    /// Correlated horizontal beam divergence [mrad].
    pub cor_px: f64,
    /// Correlated vertical beam divergence [mrad].
    pub cor_py: f64,
    /// Initial kinetic energy of the reference particle [keV].
    pub ref_ekin: f64,
    /// z position of the reference particle [m].
    pub ref_zpos: f64,
    /// RMS energy spread [keV].
    pub sig_ekin: f64,
    /// RMS bunch size, horizontal [mm].
    pub sig_x: f64,
    /// RMS horizontal momentum spread [eV/c].
    pub sig_px: f64,
    /// RMS bunch size, vertical [mm].
    pub sig_y: f64,
    /// RMS vertical momentum spread [eV/c].
    pub sig_py: f64,
    /// RMS bunch length [mm].
    pub sig_z: f64,
    /// RMS emission time when generated from a cathode [ns].
    pub sig_clock: f64,
    /// Normalized transverse emittance, horizontal [pi*mrad*mm].
    pub nemit_x: f64,
    /// Normalized transverse emittance, vertical [pi*mrad*mm].
    pub nemit_y: f64,
    pub c_sig_x: f64,
    pub c_sig_y: f64,
    /// Gaussian cutoff at `c_sig_z` times `sig_z`.
    pub c_sig_z: f64,
    /// Flattop bunch length [mm].
    pub lz: f64,
    /// Flattop rise length [mm].
    pub rz: f64,
    /// Flattop bunch length in time [ns].
    pub lt: f64,
    /// Flattop rise time [ns].
    pub rt: f64,
}

impl GeneratorInput {
    /// Group name of the rendered model.
    pub const GROUP: &'static str = "INPUT";

    /// Resolve a raw request map into a generator input.
    ///
    /// `fname` is the derived path of the particle file the generator will
    /// write, minted by the caller from the run id.
    pub fn resolve(input: &RawMap, fname: String) -> Result<Self> {
        use fields::*;
        Ok(Self {
            fname,
            add: ADD.logical(input)?.unwrap_or(false),
            n_add: N_ADD.int(input)?.unwrap_or(0),
            ipart: IPART.int(input)?.unwrap_or(100),
            species: resolve_enum(&SPECIES, input)?.unwrap_or_default(),
            probe: PROBE.logical(input)?.unwrap_or(true),
            noise_reduc: NOISE_REDUC.logical(input)?.unwrap_or(true),
            cathode: CATHODE.logical(input)?.unwrap_or(true),
            high_res: HIGH_RES.logical(input)?.unwrap_or(true),
            q_total: Q_TOTAL.real(input)?.unwrap_or(1.0),
            dist_z: resolve_enum(&DIST_Z, input)?.unwrap_or_default(),
            dist_pz: resolve_enum(&DIST_PZ, input)?.unwrap_or_default(),
            dist_x: resolve_enum(&DIST_X, input)?.unwrap_or_default(),
            dist_px: resolve_enum(&DIST_PX, input)?.unwrap_or_default(),
            dist_y: resolve_enum(&DIST_Y, input)?.unwrap_or_default(),
            dist_py: resolve_enum(&DIST_PY, input)?.unwrap_or_default(),
            cor_ekin: COR_EKIN.real(input)?.unwrap_or(0.0),
            cor_px: COR_PX.real(input)?.unwrap_or(0.0),
            cor_py: COR_PY.real(input)?.unwrap_or(0.0),
            ref_ekin: REF_EKIN.real(input)?.unwrap_or(0.0),
            ref_zpos: REF_ZPOS.real(input)?.unwrap_or(0.0),
            sig_ekin: SIG_EKIN.real(input)?.unwrap_or(0.0),
            sig_x: SIG_X.real(input)?.unwrap_or(1.0),
            sig_px: SIG_PX.real(input)?.unwrap_or(0.0),
            sig_y: SIG_Y.real(input)?.unwrap_or(1.0),
            sig_py: SIG_PY.real(input)?.unwrap_or(0.0),
            sig_z: SIG_Z.real(input)?.unwrap_or(0.0),
            sig_clock: SIG_CLOCK.real(input)?.unwrap_or(1e-3),
            nemit_x: NEMIT_X.real(input)?.unwrap_or(0.0),
            nemit_y: NEMIT_Y.real(input)?.unwrap_or(0.0),
            c_sig_x: C_SIG_X.real(input)?.unwrap_or(0.0),
            c_sig_y: C_SIG_Y.real(input)?.unwrap_or(0.0),
            c_sig_z: C_SIG_Z.real(input)?.unwrap_or(0.0),
            lz: LZ.real(input)?.unwrap_or(0.0),
            rz: RZ.real(input)?.unwrap_or(0.0),
            lt: LT.real(input)?.unwrap_or(0.0),
            rt: RT.real(input)?.unwrap_or(0.0),
        })
    }

    /// Fold the model into its `&INPUT` group, computed fields last.
    pub fn to_group(&self) -> NamelistGroup {
        use fields::*;
        let mut group = NamelistGroup::new(Self::GROUP);
        group.push(ADD.name, self.add);
        group.push(N_ADD.name, self.n_add);
        group.push(IPART.name, self.ipart);
        group.push(SPECIES.name, self.species);
        group.push(PROBE.name, self.probe);
        group.push(NOISE_REDUC.name, self.noise_reduc);
        group.push(CATHODE.name, self.cathode);
        group.push(HIGH_RES.name, self.high_res);
        group.push(Q_TOTAL.name, self.q_total);
        group.push(DIST_Z.name, self.dist_z);
        group.push(DIST_PZ.name, self.dist_pz);
        group.push(DIST_X.name, self.dist_x);
        group.push(DIST_PX.name, self.dist_px);
        group.push(DIST_Y.name, self.dist_y);
        group.push(DIST_PY.name, self.dist_py);
        group.push(COR_EKIN.name, self.cor_ekin);
        group.push(COR_PX.name, self.cor_px);
        group.push(COR_PY.name, self.cor_py);
        group.push(REF_EKIN.name, self.ref_ekin);
        group.push(REF_ZPOS.name, self.ref_zpos);
        group.push(SIG_EKIN.name, self.sig_ekin);
        group.push(SIG_X.name, self.sig_x);
        group.push(SIG_PX.name, self.sig_px);
        group.push(SIG_Y.name, self.sig_y);
        group.push(SIG_PY.name, self.sig_py);
        group.push(SIG_Z.name, self.sig_z);
        group.push(SIG_CLOCK.name, self.sig_clock);
        group.push(NEMIT_X.name, self.nemit_x);
        group.push(NEMIT_Y.name, self.nemit_y);
        group.push(C_SIG_X.name, self.c_sig_x);
        group.push(C_SIG_Y.name, self.c_sig_y);
        group.push(C_SIG_Z.name, self.c_sig_z);
        group.push(LZ.name, self.lz);
        group.push(RZ.name, self.rz);
        group.push(LT.name, self.lt);
        group.push(RT.name, self.rt);
        group.push(FNAME.name, self.fname.as_str());
        group
    }

    /// Render the generator deck.
    pub fn render(&self) -> Result<String> {
        astrars_namelist::render_document(&[self.to_group()])
    }
}

// astrars-beamline/src/run.rs

//! Operative run parameters, rendered as the `&NEWRUN` group.

use astrars_namelist::{FieldSpec, NamelistGroup, RawMap, Result};

/// Resolves a named particle distribution to the file path the external
/// binary reads it from. Implemented by the orchestration layer; the core
/// has no knowledge of directories.
pub trait DistributionPaths {
    /// Full path of the distribution file for a generator run name
    /// (without extension).
    fn distribution_file(&self, name: &str) -> String;
}

/// Name used when no initial particle file is given.
const EXAMPLE_DISTRIBUTION: &str = "example";

/// Field table of the run specification, in declaration order.
pub mod fields {
    use astrars_namelist::FieldSpec;

    pub const RUN_DIR: FieldSpec = FieldSpec::new("run_dir").excluded();
    pub const VERSION: FieldSpec = FieldSpec::new("Version");
    pub const THREAD_NUM: FieldSpec = FieldSpec::new("thread_num").excluded();
    pub const TIMEOUT: FieldSpec = FieldSpec::new("timeout").excluded();
    pub const RUN: FieldSpec = FieldSpec::new("RUN").alias("run_number");
    pub const PARTICLE_FILE_NAME: FieldSpec = FieldSpec::new("particle_file_name").excluded();
    pub const QBUNCH: FieldSpec = FieldSpec::new("Qbunch").alias("bunch_charge").unit("[nC]");
    pub const Q_SCHOTTKY: FieldSpec = FieldSpec::new("Q_Schottky")
        .alias("schottky_coefficient")
        .unit("[nC*m/MV]");
    pub const XYRMS: FieldSpec = FieldSpec::new("XYrms")
        .alias("rms_laser_spot_size")
        .unit("[mm]");
    pub const TRMS: FieldSpec = FieldSpec::new("Trms")
        .alias("rms_emission_time")
        .unit("[ns]");
    pub const H_MIN: FieldSpec = FieldSpec::new("H_min").alias("start_time").unit("[ns]");
    pub const H_MAX: FieldSpec = FieldSpec::new("H_max").alias("end_time").unit("[ns]");
    pub const MAX_STEP: FieldSpec = FieldSpec::new("Max_step").alias("max_iteration");
    pub const Z_CATHODE: FieldSpec = FieldSpec::new("Z_Cathode").alias("z_cathode").unit("[m]");
    pub const TRACK_ALL: FieldSpec = FieldSpec::new("Track_All").alias("track_all_particles");
    pub const AUTO_PHASE: FieldSpec = FieldSpec::new("Auto_Phase").alias("auto_phase");
    pub const HEAD: FieldSpec = FieldSpec::new("Head").computed();
    pub const DISTRIBUTION: FieldSpec = FieldSpec::new("Distribution").computed();

    pub const FIELDS: &[FieldSpec] = &[
        RUN_DIR, VERSION, THREAD_NUM, TIMEOUT, RUN, PARTICLE_FILE_NAME, QBUNCH, Q_SCHOTTKY,
        XYRMS, TRMS, H_MIN, H_MAX, MAX_STEP, Z_CATHODE, TRACK_ALL, AUTO_PHASE, HEAD, DISTRIBUTION,
    ];
}

/// Operative parameters of one simulation run.
///
/// The excluded fields (`run_dir`, `thread_num`, `timeout`,
/// `particle_file_name`) configure the orchestration layer and never
/// appear in the rendered deck.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSpecs {
    /// Name of the directory the simulation executes in; the run id when
    /// unset.
    pub run_dir: Option<String>,
    pub version: i64,
    /// Worker-process count hint for the external binary.
    pub thread_num: i64,
    /// Wall-clock timeout for the run [s].
    pub timeout: i64,
    /// Run number, used as extension of all output files.
    pub run_number: i64,
    /// Name of a previously generated particle file.
    pub particle_file_name: Option<String>,
    /// Run name for the protocol. Derived.
    pub head: String,
    /// Path of the initial particle distribution. Derived.
    pub distribution: String,
    /// Bunch charge [nC]; scaling is active when set and non-zero.
    pub qbunch: Option<f64>,
    /// Linear charge variation with the cathode field [nC*m/MV].
    pub q_schottky: f64,
    /// Horizontal and vertical rms beam size [mm]; active when > 0.
    pub xy_rms: f64,
    /// RMS emission time [ns]; active when > 0.
    pub t_rms: f64,
    /// Minimum Runge-Kutta time step [ns].
    pub h_min: f64,
    /// Maximum Runge-Kutta time step [ns].
    pub h_max: f64,
    /// Safety termination after this many Runge-Kutta steps.
    pub max_step: i64,
    /// Cathode position for the mirror charge [m].
    pub z_cathode: f64,
    /// If false, only the reference particle is tracked.
    pub track_all: bool,
    /// If true, RF phases are set relative to maximum energy gain.
    pub auto_phase: bool,
}

impl RunSpecs {
    /// Group name of the rendered model.
    pub const GROUP: &'static str = "NEWRUN";

    /// Resolve a raw request map into run specifications.
    pub fn resolve(input: &RawMap, paths: &dyn DistributionPaths) -> Result<Self> {
        use fields::*;
        let particle_file_name = PARTICLE_FILE_NAME.string(input)?;
        let distribution_name = particle_file_name
            .clone()
            .unwrap_or_else(|| EXAMPLE_DISTRIBUTION.to_string());
        Ok(Self {
            run_dir: RUN_DIR.string(input)?,
            version: VERSION.int(input)?.unwrap_or(4),
            thread_num: THREAD_NUM.int(input)?.unwrap_or(1),
            timeout: TIMEOUT.int(input)?.unwrap_or(600),
            run_number: RUN.int(input)?.unwrap_or(1),
            head: format!(
                "Simulation run with initial particle distribution {}",
                distribution_name
            ),
            distribution: paths.distribution_file(&distribution_name),
            particle_file_name,
            qbunch: QBUNCH.real(input)?,
            q_schottky: Q_SCHOTTKY.real(input)?.unwrap_or(0.0),
            xy_rms: XYRMS.real(input)?.unwrap_or(-1.0),
            t_rms: TRMS.real(input)?.unwrap_or(-1.0),
            h_min: H_MIN.real(input)?.unwrap_or(0.0),
            h_max: H_MAX.real(input)?.unwrap_or(0.001),
            max_step: MAX_STEP.int(input)?.unwrap_or(100_000),
            z_cathode: Z_CATHODE.real(input)?.unwrap_or(0.0),
            track_all: TRACK_ALL.logical(input)?.unwrap_or(true),
            auto_phase: AUTO_PHASE.logical(input)?.unwrap_or(true),
        })
    }

    /// Fold the model into its `&NEWRUN` group, computed fields last,
    /// unset optionals omitted.
    pub fn to_group(&self) -> NamelistGroup {
        use fields::*;
        let mut group = NamelistGroup::new(Self::GROUP);
        group.push(VERSION.name, self.version);
        group.push(RUN.name, self.run_number);
        if let Some(qbunch) = self.qbunch {
            group.push(QBUNCH.name, qbunch);
        }
        group.push(Q_SCHOTTKY.name, self.q_schottky);
        group.push(XYRMS.name, self.xy_rms);
        group.push(TRMS.name, self.t_rms);
        group.push(H_MIN.name, self.h_min);
        group.push(H_MAX.name, self.h_max);
        group.push(MAX_STEP.name, self.max_step);
        group.push(Z_CATHODE.name, self.z_cathode);
        group.push(TRACK_ALL.name, self.track_all);
        group.push(AUTO_PHASE.name, self.auto_phase);
        group.push(HEAD.name, self.head.as_str());
        group.push(DISTRIBUTION.name, self.distribution.as_str());
        group
    }
}

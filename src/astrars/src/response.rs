// astrars/src/response.rs

//! Response documents emitted by the CLI.

use astrars_tables::{ParticleTable, XyEmittanceTable, ZEmittanceTable};
use serde::Serialize;

/// Result of one particle generator run.
#[derive(Debug, Serialize)]
pub struct GeneratorOutput {
    pub gen_id: String,
    /// The generated distribution, absent if the binary produced no file.
    pub particles: Option<ParticleTable>,
    /// The rendered input deck.
    pub input_ini: String,
    /// Captured process output.
    pub run_output: String,
}

/// Result of one beam-dynamics simulation run.
#[derive(Debug, Serialize)]
pub struct SimulationOutput {
    pub sim_id: String,
    /// The rendered input deck.
    pub input_ini: String,
    /// Captured process output.
    pub run_output: String,
    /// The initial distribution followed by the checkpoint distributions
    /// in ascending z order; entries are absent where a file was not (yet)
    /// produced.
    pub particles: Vec<Option<ParticleTable>>,
    pub emittance_x: Option<XyEmittanceTable>,
    pub emittance_y: Option<XyEmittanceTable>,
    pub emittance_z: Option<ZEmittanceTable>,
}

// astrars/src/config.rs

//! Explicit runtime configuration.
//!
//! Binary locations and data directories come from CLI flags with
//! environment fallbacks and are collected into one owned struct that is
//! passed down explicitly. The core crates never read the environment.

use astrars_beamline::DistributionPaths;
use clap::Args;
use std::path::PathBuf;

/// CLI/environment arguments the configuration is built from.
#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    /// Particle generator executable
    #[arg(
        long,
        env = "ASTRA_GENERATOR_BINARY_PATH",
        value_name = "PATH",
        default_value = "generator"
    )]
    pub generator_binary: PathBuf,

    /// Beam-dynamics simulation executable
    #[arg(
        long,
        env = "ASTRA_SIMULATION_BINARY_PATH",
        value_name = "PATH",
        default_value = "Astra"
    )]
    pub simulation_binary: PathBuf,

    /// Directory holding generated particle distributions
    #[arg(
        long,
        env = "ASTRA_GENERATOR_DATA_PATH",
        value_name = "DIR",
        default_value = "data/generator"
    )]
    pub generator_data_dir: PathBuf,

    /// Directory simulation runs execute in
    #[arg(
        long,
        env = "ASTRA_SIMULATION_DATA_PATH",
        value_name = "DIR",
        default_value = "data/simulation"
    )]
    pub simulation_data_dir: PathBuf,
}

/// Resolved runtime configuration.
#[derive(Debug, Clone)]
pub struct AstraConfig {
    pub generator_binary: PathBuf,
    pub simulation_binary: PathBuf,
    pub generator_data_dir: PathBuf,
    pub simulation_data_dir: PathBuf,
}

impl AstraConfig {
    /// Path of a generator artifact: `<gen_dir>/<gen_id>.<ext>`.
    ///
    /// The generator run uses three extensions: `in` for the rendered
    /// deck, `ini` for the particle distribution it produces, and `out`
    /// for the captured process output.
    pub fn generator_file(&self, gen_id: &str, extension: &str) -> PathBuf {
        self.generator_data_dir
            .join(format!("{}.{}", gen_id, extension))
    }

    /// Directory a simulation run executes in.
    pub fn simulation_run_dir(&self, name: &str) -> PathBuf {
        self.simulation_data_dir.join(name)
    }
}

impl From<ConfigArgs> for AstraConfig {
    fn from(args: ConfigArgs) -> Self {
        Self {
            generator_binary: args.generator_binary,
            simulation_binary: args.simulation_binary,
            generator_data_dir: args.generator_data_dir,
            simulation_data_dir: args.simulation_data_dir,
        }
    }
}

impl DistributionPaths for AstraConfig {
    fn distribution_file(&self, name: &str) -> String {
        self.generator_file(name, "ini").display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> AstraConfig {
        AstraConfig {
            generator_binary: PathBuf::from("generator"),
            simulation_binary: PathBuf::from("Astra"),
            generator_data_dir: PathBuf::from("/data/generator"),
            simulation_data_dir: PathBuf::from("/data/simulation"),
        }
    }

    #[test]
    fn distribution_paths_resolve_into_the_generator_dir() {
        let config = config();
        assert_eq!(
            config.distribution_file("example"),
            "/data/generator/example.ini"
        );
        assert_eq!(
            config.generator_file("2026-08-07-0a1b2c3d", "out"),
            PathBuf::from("/data/generator/2026-08-07-0a1b2c3d.out")
        );
    }

    #[test]
    fn run_dirs_nest_under_the_simulation_dir()  {
        assert_eq!(
            config().simulation_run_dir("2026-08-07-0a1b2c3d"),
            PathBuf::from("/data/simulation/2026-08-07-0a1b2c3d")
        );
    }
}

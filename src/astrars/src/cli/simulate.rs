// astrars/src/cli/simulate.rs

use crate::cli::generate::read_request;
use crate::config::AstraConfig;
use crate::ids;
use crate::response::SimulationOutput;
use crate::runner;
use astrars_beamline::SimulationInput;
use astrars_tables::{EmittanceAxis, ParticleTable, XyEmittanceTable, ZEmittanceTable};
use log::info;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Run one beam-dynamics simulation.
///
/// Each run executes in its own directory under the simulation data
/// directory, so concurrent requests cannot collide on file names. The
/// rendered deck lands in `run.in`, field maps next to it, captured
/// process output in `run.out`; result files are collected afterwards.
pub fn run_simulation(
    config: &AstraConfig,
    request: &Path,
    timeout_override: Option<Duration>,
) -> anyhow::Result<SimulationOutput> {
    let raw = read_request(request)?;
    let sim_id = ids::mint_run_id();
    let input = SimulationInput::resolve(&raw, config)?;

    let run_dir = config.simulation_run_dir(input.run_dir_name(&sim_id));
    fs_err::create_dir_all(&run_dir)?;

    let deck = input.render()?;
    fs_err::write(run_dir.join("run.in"), &deck)?;
    for (name, table) in input.field_map_files() {
        table.write_to(&run_dir.join(&name))?;
    }
    info!("prepared run directory {}", run_dir.display());

    if input.run_specs.thread_num > 1 {
        // resource-allocation hint for the scheduler layer, passed through
        info!(
            "run requests {} worker processes",
            input.run_specs.thread_num
        );
    }

    let timeout = timeout_override
        .unwrap_or_else(|| Duration::from_secs(input.run_specs.timeout.max(0) as u64));
    let output = runner::run_with_timeout(
        &config.simulation_binary,
        &[OsStr::new("run.in")],
        Some(&run_dir),
        timeout,
    )?;
    fs_err::write(run_dir.join("run.out"), &output.stdout)?;

    let run_number = u32::try_from(input.run_specs.run_number).unwrap_or(1);
    let emittance_x =
        XyEmittanceTable::read_from(&run_dir.join(EmittanceAxis::X.output_file_name(run_number)))?;
    let emittance_y =
        XyEmittanceTable::read_from(&run_dir.join(EmittanceAxis::Y.output_file_name(run_number)))?;
    let emittance_z =
        ZEmittanceTable::read_from(&run_dir.join(EmittanceAxis::Z.output_file_name(run_number)))?;

    let mut particles = Vec::new();
    particles.push(ParticleTable::read_from(Path::new(
        &input.run_specs.distribution,
    ))?);
    for path in checkpoint_files(&run_dir, run_number)? {
        particles.push(ParticleTable::read_from(&path)?);
    }

    Ok(SimulationOutput {
        sim_id,
        input_ini: deck,
        run_output: output.stdout,
        particles,
        emittance_x,
        emittance_y,
        emittance_z,
    })
}

/// The checkpoint distributions of a run, `run.<z-label>.<run>`, in
/// ascending z order.
fn checkpoint_files(run_dir: &Path, run_number: u32) -> std::io::Result<Vec<PathBuf>> {
    let suffix = format!("{:03}", run_number);
    let mut labeled: Vec<(u64, PathBuf)> = Vec::new();
    for entry in fs_err::read_dir(run_dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        let mut parts = name.split('.');
        if let (Some("run"), Some(label), Some(ext), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        {
            if ext == suffix && !label.is_empty() && label.chars().all(|c| c.is_ascii_digit()) {
                if let Ok(z_label) = label.parse::<u64>() {
                    labeled.push((z_label, entry.path()));
                }
            }
        }
    }
    labeled.sort_by_key(|(z_label, _)| *z_label);
    Ok(labeled.into_iter().map(|(_, path)| path).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn checkpoints_sort_by_z_label_and_skip_other_outputs() {
        let dir = TempDir::new().unwrap();
        for name in [
            "run.0300.001",
            "run.0050.001",
            "run.0100.001",
            "run.Xemit.001",
            "run.0100.002",
            "run.in",
            "run.out",
        ] {
            fs_err::write(dir.path().join(name), "").unwrap();
        }

        let files: Vec<String> = checkpoint_files(dir.path(), 1)
            .unwrap()
            .into_iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(files, vec!["run.0050.001", "run.0100.001", "run.0300.001"]);
    }
}

// astrars/src/cli/generate.rs

use crate::config::AstraConfig;
use crate::ids;
use crate::response::GeneratorOutput;
use crate::runner;
use anyhow::Context;
use astrars_beamline::GeneratorInput;
use astrars_namelist::RawMap;
use astrars_tables::ParticleTable;
use log::info;
use std::path::Path;
use std::time::Duration;

/// Wall-clock limit for the generator binary when no override is given.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(600);

/// Read and validate a JSON request document.
pub fn read_request(path: &Path) -> anyhow::Result<RawMap> {
    let content = fs_err::read_to_string(path)?;
    let value: serde_json::Value = serde_json::from_str(&content)
        .context(format!("Error parsing JSON request: {}", path.display()))?;
    match value {
        serde_json::Value::Object(map) => Ok(map),
        _ => anyhow::bail!(
            "Request document {} must be a JSON object.",
            path.display()
        ),
    }
}

/// Run the particle generator for one request document.
///
/// The run writes three sibling files into the generator data directory:
/// `<gen_id>.in` (the rendered deck), `<gen_id>.ini` (the distribution the
/// binary produces) and `<gen_id>.out` (the captured process output).
pub fn run_generator(
    config: &AstraConfig,
    request: &Path,
    timeout: Option<Duration>,
) -> anyhow::Result<GeneratorOutput> {
    let raw = read_request(request)?;
    let gen_id = ids::mint_run_id();
    let particle_file = config.generator_file(&gen_id, "ini");

    let input = GeneratorInput::resolve(&raw, particle_file.display().to_string())?;
    let deck = input.render()?;

    fs_err::create_dir_all(&config.generator_data_dir)?;
    let input_file = config.generator_file(&gen_id, "in");
    fs_err::write(&input_file, &deck)?;
    info!("wrote generator deck {}", input_file.display());

    let output = runner::run_with_timeout(
        &config.generator_binary,
        &[input_file.as_os_str()],
        None,
        timeout.unwrap_or(DEFAULT_TIMEOUT),
    )?;
    fs_err::write(config.generator_file(&gen_id, "out"), &output.stdout)?;

    let particles = ParticleTable::read_from(&particle_file)?;
    if particles.is_none() {
        info!("generator produced no particle file at {}", particle_file.display());
    }

    Ok(GeneratorOutput {
        gen_id,
        particles,
        input_ini: deck,
        run_output: output.stdout,
    })
}

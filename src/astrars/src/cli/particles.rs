// astrars/src/cli/particles.rs

use crate::config::AstraConfig;
use crate::ids;
use anyhow::Context;
use astrars_tables::ParticleTable;
use std::path::Path;

/// List the names of all stored particle distributions, sorted.
pub fn list_distributions(config: &AstraConfig) -> anyhow::Result<Vec<String>> {
    if !config.generator_data_dir.exists() {
        return Ok(Vec::new());
    }
    let mut names = Vec::new();
    for entry in fs_err::read_dir(&config.generator_data_dir)? {
        let path = entry?.path();
        if path.extension().map_or(false, |ext| ext == "ini") {
            if let Some(stem) = path.file_stem() {
                names.push(stem.to_string_lossy().into_owned());
            }
        }
    }
    names.sort();
    Ok(names)
}

/// Read one stored distribution; `None` if it does not exist.
pub fn read_distribution(
    config: &AstraConfig,
    name: &str,
) -> anyhow::Result<Option<ParticleTable>> {
    Ok(ParticleTable::read_from(&config.generator_file(name, "ini"))?)
}

/// Store a distribution supplied as a JSON table document; returns the
/// name it was stored under. An existing distribution of the same name is
/// overwritten (last writer wins).
pub fn store_distribution(
    config: &AstraConfig,
    name: Option<String>,
    file: &Path,
) -> anyhow::Result<String> {
    let content = fs_err::read_to_string(file)?;
    let table: ParticleTable = serde_json::from_str(&content)
        .context(format!("Error parsing particle table: {}", file.display()))?;
    table.populated_columns()?;

    let name = name.unwrap_or_else(ids::mint_run_id);
    fs_err::create_dir_all(&config.generator_data_dir)?;
    table.write_to(&config.generator_file(&name, "ini"))?;
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn config(dir: &TempDir) -> AstraConfig {
        AstraConfig {
            generator_binary: PathBuf::from("generator"),
            simulation_binary: PathBuf::from("Astra"),
            generator_data_dir: dir.path().join("generator"),
            simulation_data_dir: dir.path().join("simulation"),
        }
    }

    #[test]
    fn stored_distributions_round_trip_by_name() {
        let dir = TempDir::new().unwrap();
        let config = config(&dir);

        let document = dir.path().join("table.json");
        fs_err::write(
            &document,
            r#"{"x": [0.0], "y": [0.0], "z": [0.0], "px": [0.0], "py": [0.0], "pz": [2.4585e6]}"#,
        )
        .unwrap();

        let name = store_distribution(&config, Some("probe".to_string()), &document).unwrap();
        assert_eq!(name, "probe");
        assert_eq!(list_distributions(&config).unwrap(), vec!["probe"]);

        let table = read_distribution(&config, "probe").unwrap().unwrap();
        assert_eq!(table.pz, vec![2.4585e6]);
        assert!(read_distribution(&config, "missing").unwrap().is_none());
    }

    #[test]
    fn listing_without_a_data_dir_is_empty() {
        let dir = TempDir::new().unwrap();
        assert!(list_distributions(&config(&dir)).unwrap().is_empty());
    }
}

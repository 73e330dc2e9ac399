// astrars-beamline/tests/deck_rendering.rs

//! End-to-end rendering of generator and simulation decks through the
//! public API.

use astrars_beamline::{DistributionPaths, GeneratorInput, SimulationInput};
use serde_json::json;

struct FlatPaths;

impl DistributionPaths for FlatPaths {
    fn distribution_file(&self, name: &str) -> String {
        format!("/data/generator/{}.ini", name)
    }
}

#[test]
fn generator_request_renders_the_expected_input_group() {
    let request = json!({
        "particle_count": 100,
        "total_charge": 1.0,
        "particle_type": "electrons",
    });
    let input = GeneratorInput::resolve(
        request.as_object().unwrap(),
        "/data/generator/2026-08-07-0a1b2c3d.ini".to_string(),
    )
    .unwrap();
    let text = input.render().unwrap();

    assert!(text.starts_with("&INPUT\n"));
    assert!(text.ends_with("/\n"));
    assert!(text.contains("    IPart = 100\n"));
    assert!(text.contains("    Species = 'electrons'\n"));
    assert!(text.contains("    Q_total = 1.0\n"));
}

#[test]
fn aliases_resolve_before_rendering() {
    let request = json!({
        "particle_count": 2000,
        "particle_type": "el",
        "dist_z": "flattop",
    });
    let input =
        GeneratorInput::resolve(request.as_object().unwrap(), "gen.ini".to_string()).unwrap();
    let text = input.render().unwrap();

    assert!(text.contains("    IPart = 2000\n"));
    assert!(text.contains("    Species = 'electrons'\n"));
    assert!(text.contains("    Dist_z = 'plateau'\n"));
}

#[test]
fn simulation_request_renders_a_complete_deck() {
    let request = json!({
        "run_specs": {"particle_file_name": "2026-08-07-0a1b2c3d", "bunch_charge": 0.25},
        "output_specs": {"z_stop": 2.0},
        "space_charge": {"use_space_charge": true},
        "cavities": [
            {"z_0": 0.5, "max_field_strength": 60.0},
            {"z_0": 0.0, "phase": -5.0},
        ],
        "solenoids": [
            {"z_0": 0.2, "max_field_strength": 0.35},
        ],
    });
    let input = SimulationInput::resolve(request.as_object().unwrap(), &FlatPaths).unwrap();
    let text = input.render().unwrap();

    // groups appear in fixed order, separated by blank lines
    let newrun = text.find("&NEWRUN").unwrap();
    let output = text.find("&OUTPUT").unwrap();
    let charge = text.find("&CHARGE").unwrap();
    let cavity = text.find("&CAVITY").unwrap();
    let solenoid = text.find("&SOLENOID").unwrap();
    assert!(newrun < output && output < charge && charge < cavity && cavity < solenoid);

    assert!(text.contains("    Qbunch = 0.25\n"));
    assert!(text.contains("    ZSTOP = 2.0\n"));
    assert!(text.contains("    LSPCH = true\n"));
    assert!(text.contains("    Distribution = '/data/generator/2026-08-07-0a1b2c3d.ini'\n"));

    // the cavity at z_0 = 0.0 sorted to id 1
    assert!(text.contains("    C_pos(1) = 0.0\n"));
    assert!(text.contains("    Phi(1) = -5.0\n"));
    assert!(text.contains("    MaxE(2) = 60.0\n"));
    assert!(text.contains("    LBfield = true\n"));
    assert!(text.contains("    File_Bfield(1) = 'S1_B.dat'\n"));
}

//! Configuration file loading.

use std::io::Write;

use radqec_core::{Experiment, ExperimentConfig};
use tempfile::NamedTempFile;

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_from_file() {
    let file = write_config(
        "orbit:\n  altitude_km: 700\n  inclination: \"45\"\n  mission_duration_years: 3.0\nshots: 2500\nseed: 8\n",
    );
    let config = ExperimentConfig::from_file(file.path()).unwrap();
    assert_eq!(config.orbit.altitude_km, 700);
    assert_eq!(config.orbit.inclination, "45");
    assert_eq!(config.shots, 2500);
    assert_eq!(config.seed, Some(8));

    let experiment =
        Experiment::from_orbit(&config.rate_table(), config.orbit_profile(), config.error_probability)
            .unwrap();
    assert!((experiment.error_probability() - 0.030).abs() < 1e-12);
}

#[test]
fn test_env_overrides_file() {
    let file = write_config("orbit:\n  altitude_km: 700\nshots: 2500\n");
    let config = ExperimentConfig::from_file(file.path())
        .unwrap()
        .merge_vars(|name| match name {
            "RADQEC_SHOTS" => Some("10".to_string()),
            _ => None,
        })
        .unwrap();
    assert_eq!(config.shots, 10);
    assert_eq!(config.orbit.altitude_km, 700);
}

#[test]
fn test_invalid_file_values() {
    let file = write_config("shots: 0\n");
    let err = ExperimentConfig::from_file(file.path()).unwrap_err();
    assert!(err.is_invalid_parameter());

    let file = write_config("orbit: [not, a, map]\n");
    let err = ExperimentConfig::from_file(file.path()).unwrap_err();
    assert!(err.is_configuration());
}

#[test]
fn test_missing_explicit_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = ExperimentConfig::from_file(dir.path().join("absent.yaml")).unwrap_err();
    assert!(err.is_configuration());
}

#[test]
fn test_custom_table_from_file() {
    let file = write_config(
        "orbit:\n  altitude_km: 1000\n  inclination: polar\nbase_rates:\n  1000:\n    polar: 0.05\n",
    );
    let config = ExperimentConfig::from_file(file.path()).unwrap();
    let rates = config.rate_table().error_rates(&config.orbit_profile()).unwrap();
    assert!((rates.overall_rate - 0.05).abs() < 1e-12);
}

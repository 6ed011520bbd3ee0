//! End-to-end tests of the `radqec` binary.
//!
//! Each test runs the compiled binary with an empty home directory so no
//! user configuration leaks in.

use std::io::Write;
use std::process::{Command, Output};

use tempfile::{NamedTempFile, TempDir};

fn radqec(home: &TempDir, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_radqec"))
        .args(args)
        .current_dir(home.path())
        .env("HOME", home.path())
        .env_remove("RUST_LOG")
        .env_remove("RADQEC_SHOTS")
        .env_remove("RADQEC_SEED")
        .env_remove("RADQEC_ALTITUDE_KM")
        .env_remove("RADQEC_INCLINATION")
        .env_remove("RADQEC_MISSION_YEARS")
        .env_remove("RADQEC_ERROR_PROBABILITY")
        .env_remove("RADQEC_LOG_LEVEL")
        .env_remove("RADQEC_LOG_FORMAT")
        .output()
        .expect("failed to launch radqec")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn counts_file(json: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();
    file
}

#[test]
fn test_version() {
    let home = TempDir::new().unwrap();
    let output = radqec(&home, &["version"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_rates_for_standard_orbit() {
    let home = TempDir::new().unwrap();
    let output = radqec(
        &home,
        &["rates", "--altitude", "600", "--inclination", "SSO", "--duration", "1"],
    );
    assert!(output.status.success(), "{}", stderr(&output));
    let text = stdout(&output);
    assert!(text.contains("0.0100"));
    assert!(text.contains("0.0060"));
    assert!(text.contains("0.0040"));
}

#[test]
fn test_unsupported_altitude_fails() {
    let home = TempDir::new().unwrap();
    let output = radqec(&home, &["rates", "--altitude", "550"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Error:"));
    assert!(stderr(&output).contains("550"));
}

#[test]
fn test_noiseless_run_as_json() {
    let home = TempDir::new().unwrap();
    let output = radqec(
        &home,
        &["run", "-p", "0", "--shots", "500", "--seed", "3", "--format", "json"],
    );
    assert!(output.status.success(), "{}", stderr(&output));

    let report: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(report["shots"], 500);
    assert_eq!(report["seed"], 3);
    assert_eq!(report["classification"]["valid_shots"], 500);
    assert_eq!(report["classification"]["post_selection_ratio"], 1.0);
    assert_eq!(report["outcomes"]["0000"], 500);
}

#[test]
fn test_run_exports_report() {
    let home = TempDir::new().unwrap();
    let export = home.path().join("report.json");
    let output = radqec(
        &home,
        &[
            "run",
            "--altitude",
            "700",
            "--shots",
            "200",
            "--seed",
            "1",
            "--compare-ideal",
            "--export",
            export.to_str().unwrap(),
        ],
    );
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stdout(&output).contains("Post-selection ratio"));

    let report: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&export).unwrap()).unwrap();
    assert_eq!(report["orbit"]["altitude_km"], 700);
    assert!(report["ideal"].is_object());
}

#[test]
fn test_run_rejects_large_probability() {
    let home = TempDir::new().unwrap();
    let output = radqec(&home, &["run", "-p", "0.5", "--shots", "10"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("1/3"));
}

#[test]
fn test_config_file_is_used() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("mission.yaml");
    std::fs::write(
        &config,
        "orbit:\n  altitude_km: 800\n  inclination: \"45\"\n  mission_duration_years: 2.0\n",
    )
    .unwrap();
    let output = radqec(&home, &["--config", config.to_str().unwrap(), "rates"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stdout(&output).contains("0.0240"));
}

#[test]
fn test_analyze_counts_file() {
    let home = TempDir::new().unwrap();
    let file = counts_file(r#"{"0000": 900, "01 01": 100}"#);
    let output = radqec(
        &home,
        &["analyze", "--input", file.path().to_str().unwrap(), "--format", "json"],
    );
    assert!(output.status.success(), "{}", stderr(&output));

    let summary: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(summary["valid_shots"], 1000);
    assert_eq!(summary["error_types"]["00"], 900);
    assert_eq!(summary["error_types"]["01"], 100);
    assert_eq!(summary["error_percentages"]["00"], "90.00%");
    assert_eq!(summary["error_percentages"]["01"], "10.00%");
}

#[test]
fn test_analyze_overflowing_counts() {
    let home = TempDir::new().unwrap();
    let file = counts_file(r#"{"0000": 18446744073709551615, "0101": 1}"#);
    let output = radqec(&home, &["analyze", "-i", file.path().to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("exceeds u64"));
}

#[test]
fn test_analyze_malformed_counts() {
    let home = TempDir::new().unwrap();
    let file = counts_file(r#"{"00x1": 4}"#);
    let output = radqec(&home, &["analyze", "-i", file.path().to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("non-binary"));
}

#[test]
fn test_circuit_listing() {
    let home = TempDir::new().unwrap();
    let output = radqec(&home, &["circuit"]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("cx q0, q2"));
    assert!(text.contains("measure q5 -> c3"));
}

#[test]
fn test_sweep_lists_every_orbit() {
    let home = TempDir::new().unwrap();
    let output = radqec(&home, &["sweep", "--shots", "100", "--seed", "9"]);
    assert!(output.status.success(), "{}", stderr(&output));
    let text = stdout(&output);
    for altitude in ["600km", "700km", "800km"] {
        assert!(text.contains(altitude), "missing {altitude}");
    }
}

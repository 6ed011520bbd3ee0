//! Experiment configuration.
//!
//! Supports loading configuration from:
//! 1. A YAML file (explicit path, else `~/.radqec/config.yaml` when present)
//! 2. Environment variables with the `RADQEC_` prefix
//! 3. `.env` files
//!
//! Command-line flags are applied on top by the CLI, giving the precedence
//! flags > environment > file > defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{QecError, QecResult};
use crate::noise_spec::validate_error_probability;
use crate::radiation::{BaseRateTable, OrbitProfile};

/// Directory under the home directory holding user configuration.
pub const CONFIG_DIR: &str = ".radqec";

/// Default configuration file name.
pub const CONFIG_FILE: &str = "config.yaml";

/// Complete experiment configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentConfig {
    /// Orbit under study.
    #[serde(default)]
    pub orbit: OrbitConfig,

    /// Optional override of the orbit-derived error probability.
    #[serde(default)]
    pub error_probability: Option<f64>,

    /// Shots per run.
    #[serde(default = "default_shots")]
    pub shots: u32,

    /// RNG seed for reproducible runs.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Replacement base-rate table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_rates: Option<BaseRateTable>,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Orbit settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrbitConfig {
    /// Altitude in kilometres.
    #[serde(default = "default_altitude")]
    pub altitude_km: u32,

    /// Inclination label.
    #[serde(default = "default_inclination")]
    pub inclination: String,

    /// Mission length in years.
    #[serde(default = "default_mission_years")]
    pub mission_duration_years: f64,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: "trace", "debug", "info", "warn", "error"
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: "console" or "json"
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_shots() -> u32 {
    100_000
}

fn default_altitude() -> u32 {
    600
}

fn default_inclination() -> String {
    "SSO".to_string()
}

fn default_mission_years() -> f64 {
    1.0
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "console".to_string()
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            altitude_km: default_altitude(),
            inclination: default_inclination(),
            mission_duration_years: default_mission_years(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            orbit: OrbitConfig::default(),
            error_probability: None,
            shots: default_shots(),
            seed: None,
            base_rates: None,
            logging: LoggingConfig::default(),
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, value: &str) -> QecResult<T> {
    value.trim().parse().map_err(|_| {
        QecError::Config(format!("environment variable {name} has invalid value '{value}'"))
    })
}

impl ExperimentConfig {
    /// Parse YAML without validating.
    pub fn from_yaml_str(contents: &str) -> QecResult<Self> {
        serde_yaml_ng::from_str(contents).map_err(|e| QecError::Config(format!("parse error: {e}")))
    }

    /// Load and validate a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> QecResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| QecError::Config(format!("cannot read {}: {e}", path.display())))?;
        let config = Self::from_yaml_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// `~/.radqec/config.yaml`, if a home directory is known.
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    /// Load with precedence environment > file > defaults.
    ///
    /// `config_file` is required to exist when given; otherwise the default
    /// path is used only if the file is present.
    pub fn load(config_file: Option<&Path>) -> QecResult<Self> {
        dotenvy::dotenv().ok();

        let config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path().filter(|p| p.is_file()) {
                Some(path) => {
                    debug!("Using configuration file {}", path.display());
                    Self::from_file(path)?
                }
                None => Self::default(),
            },
        };

        let config = config.merge_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `RADQEC_*` environment overrides.
    pub fn merge_env(self) -> QecResult<Self> {
        self.merge_vars(|name| std::env::var(name).ok())
    }

    /// Apply overrides from any variable source.
    ///
    /// Only variables that are present change the configuration; values that
    /// fail to parse are reported rather than ignored.
    pub fn merge_vars(mut self, lookup: impl Fn(&str) -> Option<String>) -> QecResult<Self> {
        if let Some(v) = lookup("RADQEC_ALTITUDE_KM") {
            self.orbit.altitude_km = parse_var("RADQEC_ALTITUDE_KM", &v)?;
        }
        if let Some(v) = lookup("RADQEC_INCLINATION") {
            self.orbit.inclination = v;
        }
        if let Some(v) = lookup("RADQEC_MISSION_YEARS") {
            self.orbit.mission_duration_years = parse_var("RADQEC_MISSION_YEARS", &v)?;
        }
        if let Some(v) = lookup("RADQEC_ERROR_PROBABILITY") {
            self.error_probability = Some(parse_var("RADQEC_ERROR_PROBABILITY", &v)?);
        }
        if let Some(v) = lookup("RADQEC_SHOTS") {
            self.shots = parse_var("RADQEC_SHOTS", &v)?;
        }
        if let Some(v) = lookup("RADQEC_SEED") {
            self.seed = Some(parse_var("RADQEC_SEED", &v)?);
        }
        if let Some(v) = lookup("RADQEC_LOG_LEVEL") {
            self.logging.level = v;
        }
        if let Some(v) = lookup("RADQEC_LOG_FORMAT") {
            self.logging.format = v;
        }
        Ok(self)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> QecResult<()> {
        let years = self.orbit.mission_duration_years;
        if !years.is_finite() || years <= 0.0 {
            return Err(QecError::InvalidParameter(format!(
                "mission duration must be a positive number of years, got {years}"
            )));
        }

        if self.shots == 0 {
            return Err(QecError::InvalidParameter(
                "shot count must be at least 1".into(),
            ));
        }

        if let Some(p) = self.error_probability {
            validate_error_probability(p)?;
        }

        if let Some(table) = &self.base_rates {
            table.validate()?;
        }

        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            other => {
                return Err(QecError::Config(format!("Invalid log level: {other}")));
            }
        }

        match self.logging.format.as_str() {
            "console" | "json" => {}
            other => {
                return Err(QecError::Config(format!("Invalid log format: {other}")));
            }
        }

        Ok(())
    }

    /// The configured base-rate table, or the standard one.
    pub fn rate_table(&self) -> BaseRateTable {
        self.base_rates.clone().unwrap_or_default()
    }

    /// The configured orbit.
    pub fn orbit_profile(&self) -> OrbitProfile {
        OrbitProfile::new(
            self.orbit.altitude_km,
            self.orbit.inclination.clone(),
            self.orbit.mission_duration_years,
        )
    }

    /// Serialize back to YAML.
    pub fn to_yaml(&self) -> QecResult<String> {
        serde_yaml_ng::to_string(self).map_err(|e| QecError::Config(format!("serialize error: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = ExperimentConfig::default();
        assert_eq!(config.orbit.altitude_km, 600);
        assert_eq!(config.orbit.inclination, "SSO");
        assert_eq!(config.shots, 100_000);
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let config = ExperimentConfig::from_yaml_str("orbit:\n  altitude_km: 800\nshots: 500\n").unwrap();
        assert_eq!(config.orbit.altitude_km, 800);
        assert_eq!(config.orbit.inclination, "SSO");
        assert_eq!(config.shots, 500);
        assert_eq!(config.error_probability, None);
    }

    #[test]
    fn test_base_rate_table_from_yaml() {
        let yaml = "base_rates:\n  1000:\n    polar: 0.03\n";
        let config = ExperimentConfig::from_yaml_str(yaml).unwrap();
        let table = config.rate_table();
        assert_eq!(table.base_rate(1000, "polar").unwrap(), 0.03);
        assert!(table.base_rate(600, "SSO").is_err());
    }

    #[test]
    fn test_env_overrides() {
        let config = ExperimentConfig::default()
            .merge_vars(vars(&[
                ("RADQEC_ALTITUDE_KM", "700"),
                ("RADQEC_ERROR_PROBABILITY", "0.02"),
                ("RADQEC_SEED", "17"),
                ("RADQEC_LOG_FORMAT", "json"),
            ]))
            .unwrap();
        assert_eq!(config.orbit.altitude_km, 700);
        assert_eq!(config.error_probability, Some(0.02));
        assert_eq!(config.seed, Some(17));
        assert_eq!(config.logging.format, "json");
        // Untouched values keep their defaults.
        assert_eq!(config.orbit.inclination, "SSO");
    }

    #[test]
    fn test_env_parse_failure_is_reported() {
        let err = ExperimentConfig::default()
            .merge_vars(vars(&[("RADQEC_SHOTS", "lots")]))
            .unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("RADQEC_SHOTS"));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = ExperimentConfig::default();
        config.shots = 0;
        assert!(config.validate().unwrap_err().is_invalid_parameter());

        let mut config = ExperimentConfig::default();
        config.orbit.mission_duration_years = 0.0;
        assert!(config.validate().is_err());

        let mut config = ExperimentConfig::default();
        config.error_probability = Some(0.4);
        assert!(config.validate().is_err());

        let mut config = ExperimentConfig::default();
        config.logging.level = "loud".into();
        assert!(config.validate().unwrap_err().is_configuration());

        let mut config = ExperimentConfig::default();
        config.logging.format = "xml".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_yaml_round_trip() {
        let mut config = ExperimentConfig::default();
        config.seed = Some(3);
        let yaml = config.to_yaml().unwrap();
        assert_eq!(ExperimentConfig::from_yaml_str(&yaml).unwrap(), config);
    }
}

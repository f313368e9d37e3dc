//! Configuration for the `qecc` command-line tool.
//!
//! Supports loading configuration from:
//! 1. A YAML file (`--config`, else `~/.qecc/config.yaml` when present)
//! 2. Environment variables (with `QECC_` prefix)
//!
//! Configuration precedence (highest to lowest):
//! 1. Command-line flags (applied by each command)
//! 2. Environment variables
//! 3. Configuration file
//! 4. Default values

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Complete CLI configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Reference simulator settings
    pub simulator: SimulatorConfig,

    /// Defaults for `run` and `sweep`
    pub run: RunConfig,

    /// Log filter used when no `-v` flag is given
    pub log_level: String,
}

/// Reference simulator settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Largest circuit the simulator accepts
    pub max_qubits: u32,

    /// Sampling seed; entropy when absent
    pub seed: Option<u64>,
}

/// Execution defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Shots per experiment
    pub shots: u32,

    /// Width of the binomial acceptance band, in standard deviations
    pub tolerance_sigmas: f64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            simulator: SimulatorConfig::default(),
            run: RunConfig::default(),
            log_level: "warn".to_string(),
        }
    }
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        SimulatorConfig {
            max_qubits: qecc_hal::DEFAULT_MAX_QUBITS,
            seed: None,
        }
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            shots: 1024,
            tolerance_sigmas: 4.0,
        }
    }
}

impl Config {
    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::IoError(format!("{}: {e}", path.display())))?;
        Self::from_yaml(&contents)
    }

    /// Parse configuration from YAML text.
    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        serde_yaml_ng::from_str(contents).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// `~/.qecc/config.yaml`, if a home directory is known.
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".qecc").join("config.yaml"))
    }

    /// Load configuration with the following precedence:
    /// 1. Load from `config_file` if given, else the default path if it exists
    /// 2. Apply environment variable overrides
    /// 3. Validate
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path().filter(|p| p.exists()) {
                Some(path) => Self::from_file(path)?,
                None => Config::default(),
            },
        };

        let config = config.merge_vars(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Merge `QECC_*` variables looked up through `var` into this configuration.
    ///
    /// Only variables that are present and parse override existing values.
    pub fn merge_vars(mut self, var: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(val) = var("QECC_SHOTS").and_then(|v| v.parse().ok()) {
            self.run.shots = val;
        }
        if let Some(val) = var("QECC_SEED").and_then(|v| v.parse().ok()) {
            self.simulator.seed = Some(val);
        }
        if let Some(val) = var("QECC_MAX_QUBITS").and_then(|v| v.parse().ok()) {
            self.simulator.max_qubits = val;
        }
        if let Some(level) = var("QECC_LOG") {
            self.log_level = level;
        }
        self
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.run.shots == 0 {
            return Err(ConfigError::ValidationError(
                "shots must be greater than 0".to_string(),
            ));
        }

        if !(self.run.tolerance_sigmas > 0.0) {
            return Err(ConfigError::ValidationError(format!(
                "tolerance_sigmas must be positive, got {}",
                self.run.tolerance_sigmas
            )));
        }

        if self.simulator.max_qubits == 0 {
            return Err(ConfigError::ValidationError(
                "max_qubits must be greater than 0".to_string(),
            ));
        }

        if self.log_level.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "log_level must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.run.shots, 1024);
        assert_eq!(config.simulator.max_qubits, qecc_hal::DEFAULT_MAX_QUBITS);
        assert_eq!(config.log_level, "warn");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = Config::from_yaml("run:\n  shots: 64\nsimulator:\n  seed: 9\n").unwrap();
        assert_eq!(config.run.shots, 64);
        assert_eq!(config.run.tolerance_sigmas, 4.0);
        assert_eq!(config.simulator.seed, Some(9));
        assert_eq!(config.simulator.max_qubits, qecc_hal::DEFAULT_MAX_QUBITS);
    }

    #[test]
    fn test_invalid_yaml() {
        assert!(matches!(
            Config::from_yaml("run: [1, 2"),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_validate_rejects_zero_shots() {
        let mut config = Config::default();
        config.run.shots = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_non_positive_tolerance() {
        let mut config = Config::default();
        config.run.tolerance_sigmas = 0.0;
        assert!(config.validate().is_err());
        config.run.tolerance_sigmas = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_env_overrides_file() {
        let vars: HashMap<&str, &str> = [
            ("QECC_SHOTS", "2048"),
            ("QECC_SEED", "17"),
            ("QECC_MAX_QUBITS", "not-a-number"),
            ("QECC_LOG", "debug"),
        ]
        .into_iter()
        .collect();
        let config = Config::from_yaml("simulator:\n  max_qubits: 18\n")
            .unwrap()
            .merge_vars(|k| vars.get(k).map(|v| (*v).to_string()));

        assert_eq!(config.run.shots, 2048);
        assert_eq!(config.simulator.seed, Some(17));
        assert_eq!(config.simulator.max_qubits, 18);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "log_level: info\nrun:\n  tolerance_sigmas: 3.5").unwrap();
        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.log_level, "info");
        assert_eq!(config.run.tolerance_sigmas, 3.5);

        let missing = Config::from_file(file.path().with_extension("absent"));
        assert!(matches!(missing, Err(ConfigError::IoError(_))));
    }
}

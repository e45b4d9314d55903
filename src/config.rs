//! Console configuration.
//!
//! Configuration is loaded in the following order (later overrides earlier):
//! 1. Default values
//! 2. YAML config file (if specified via LIFTDFA_CONFIG or --config)
//! 3. Environment variables
//! 4. Command-line flags (applied by `main`)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Upper bound for the animation frame delay.
const MAX_FRAME_DELAY_MS: u64 = 2000;

/// Highest floor count accepted. A trip allocates one symbol per floor.
pub const MAX_FLOORS: u32 = 10_000;

/// Console configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Elevator configuration.
    pub elevator: ElevatorConfig,
    /// Display configuration.
    pub display: DisplayConfig,
}

impl Config {
    /// Loads configuration from file, then applies environment variable overrides.
    ///
    /// Without an explicit `path`, the file named by `LIFTDFA_CONFIG` is used.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with(path, |key| std::env::var(key).ok())
    }

    fn load_with(
        path: Option<&Path>,
        var: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match var("LIFTDFA_CONFIG") {
                Some(path) => Self::from_file(&path)?,
                None => Self::default(),
            },
        };

        config.apply_overrides(&var);
        config.validate()?;

        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::IoError(path.to_path_buf(), e))?;
        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| ConfigError::ParseError(path.to_path_buf(), e.to_string()))?;
        Ok(config)
    }

    fn apply_overrides(&mut self, var: &impl Fn(&str) -> Option<String>) {
        self.elevator.apply_overrides(var);
        self.display.apply_overrides(var);
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.elevator.validate()?;
        self.display.validate()
    }

    /// Saves configuration to a YAML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let content = serde_yaml::to_string(self)
            .map_err(|e| ConfigError::ParseError(path.to_path_buf(), e.to_string()))?;
        std::fs::write(path, content).map_err(|e| ConfigError::IoError(path.to_path_buf(), e))?;
        Ok(())
    }
}

/// Elevator configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElevatorConfig {
    /// Highest floor; the elevator serves `0..=floors`.
    pub floors: u32,
}

impl Default for ElevatorConfig {
    fn default() -> Self {
        Self { floors: 5 }
    }
}

impl ElevatorConfig {
    fn apply_overrides(&mut self, var: &impl Fn(&str) -> Option<String>) {
        if let Some(floors) = var("LIFTDFA_FLOORS") {
            if let Ok(n) = floors.parse() {
                self.floors = n;
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.floors > MAX_FLOORS {
            return Err(ConfigError::ValidationError(format!(
                "elevator.floors must be at most {}, got {}",
                MAX_FLOORS, self.floors
            )));
        }
        Ok(())
    }
}

/// Display configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Print one frame per floor passed.
    pub animate: bool,
    /// Delay between animation frames in milliseconds.
    pub frame_delay_ms: u64,
    /// Colorize output.
    pub color: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            animate: true,
            frame_delay_ms: 150,
            color: true,
        }
    }
}

impl DisplayConfig {
    fn apply_overrides(&mut self, var: &impl Fn(&str) -> Option<String>) {
        if let Some(animate) = var("LIFTDFA_ANIMATE") {
            self.animate = animate == "1" || animate.to_lowercase() == "true";
        }
        if let Some(delay) = var("LIFTDFA_FRAME_DELAY_MS") {
            if let Ok(ms) = delay.parse() {
                self.frame_delay_ms = ms;
            }
        }
        if var("NO_COLOR").is_some() {
            self.color = false;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.frame_delay_ms > MAX_FRAME_DELAY_MS {
            return Err(ConfigError::ValidationError(format!(
                "display.frame_delay_ms must be at most {}, got {}",
                MAX_FRAME_DELAY_MS, self.frame_delay_ms
            )));
        }
        Ok(())
    }

    /// Returns the frame delay as Duration.
    pub fn frame_delay(&self) -> Duration {
        Duration::from_millis(self.frame_delay_ms)
    }
}

/// Configuration error.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{}': {}", .0.display(), .1)]
    IoError(PathBuf, std::io::Error),

    #[error("failed to parse config file '{}': {}", .0.display(), .1)]
    ParseError(PathBuf, String),

    #[error("configuration validation failed: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.elevator.floors, 5);
        assert!(config.display.animate);
        assert_eq!(config.display.frame_delay(), Duration::from_millis(150));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_yaml_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("liftdfa.yaml");

        let mut config = Config::default();
        config.elevator.floors = 12;
        config.display.animate = false;
        config.save(&path).unwrap();

        let parsed = Config::from_file(&path).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("liftdfa.yaml");
        std::fs::write(&path, "elevator:\n  floors: 9\n").unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.elevator.floors, 9);
        assert_eq!(config.display, DisplayConfig::default());
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let result = Config::from_file(dir.path().join("missing.yaml"));
        assert!(matches!(result, Err(ConfigError::IoError(..))));
    }

    #[test]
    fn test_invalid_yaml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.yaml");
        std::fs::write(&path, "elevator:\n  floors: [not, a, number]\n").unwrap();

        let result = Config::from_file(&path);
        assert!(matches!(result, Err(ConfigError::ParseError(..))));
    }

    #[test]
    fn test_overrides() {
        let mut config = Config::default();
        config.apply_overrides(&lookup(&[
            ("LIFTDFA_FLOORS", "20"),
            ("LIFTDFA_ANIMATE", "false"),
            ("LIFTDFA_FRAME_DELAY_MS", "10"),
            ("NO_COLOR", "1"),
        ]));

        assert_eq!(config.elevator.floors, 20);
        assert!(!config.display.animate);
        assert_eq!(config.display.frame_delay_ms, 10);
        assert!(!config.display.color);
    }

    #[test]
    fn test_unparseable_override_is_ignored() {
        let mut config = Config::default();
        config.apply_overrides(&lookup(&[("LIFTDFA_FLOORS", "-3")]));
        assert_eq!(config.elevator.floors, 5);
    }

    #[test]
    fn test_validate_frame_delay() {
        let mut config = Config::default();
        config.display.frame_delay_ms = 5000;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_validate_floor_limit() {
        let mut config = Config::default();
        config.elevator.floors = MAX_FLOORS;
        assert!(config.validate().is_ok());

        config.elevator.floors = u32::MAX;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(msg)) if msg.contains("elevator.floors")
        ));

        let result = Config::load_with(None, lookup(&[("LIFTDFA_FLOORS", "4294967295")]));
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_load_reads_config_path_from_env() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("liftdfa.yaml");
        std::fs::write(&path, "elevator:\n  floors: 9\n").unwrap();
        let path = path.to_string_lossy().into_owned();

        let vars = lookup(&[("LIFTDFA_CONFIG", path.as_str())]);
        let config = Config::load_with(None, vars).unwrap();
        assert_eq!(config.elevator.floors, 9);

        // An explicit path wins over the variable
        let other = dir.path().join("other.yaml");
        std::fs::write(&other, "elevator:\n  floors: 2\n").unwrap();
        let vars = lookup(&[("LIFTDFA_CONFIG", path.as_str())]);
        let config = Config::load_with(Some(&other), vars).unwrap();
        assert_eq!(config.elevator.floors, 2);

        let config = Config::load_with(None, lookup(&[])).unwrap();
        assert_eq!(config, Config::default());
    }
}

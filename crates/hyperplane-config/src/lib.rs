//! Configuration system for hyperplane.
//!
//! Load enumeration settings from TOML or YAML files to control the move
//! radius, pruning and reordering without code changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use hyperplane_config::EnumerationConfig;
//!
//! let config = EnumerationConfig::from_toml_str(r#"
//!     radius = 2
//!     reordering = false
//! "#).unwrap();
//!
//! assert_eq!(config.radius, 2);
//! assert!(config.hyperplane_elimination);
//! assert!(!config.reordering);
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use hyperplane_config::EnumerationConfig;
//!
//! let config = EnumerationConfig::load("hyperplane.toml").unwrap_or_default();
//! assert_eq!(config.radius, 1);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;


/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main enumeration configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case", default)]
pub struct EnumerationConfig {
    /// Largest number of bits a single move may flip.
    pub radius: usize,

    /// Skip regions of the search space that cannot hold a local optimum.
    pub hyperplane_elimination: bool,

    /// Reorder bits so interacting bits sit next to each other.
    pub reordering: bool,

    /// Environment mode affecting runtime assertions.
    pub environment_mode: EnvironmentMode,
}

impl Default for EnumerationConfig {
    fn default() -> Self {
        Self {
            radius: 1,
            hyperplane_elimination: true,
            reordering: true,
            environment_mode: EnvironmentMode::default(),
        }
    }
}

impl EnumerationConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Loads a file, picking YAML for `.yaml`/`.yml` extensions and TOML
    /// otherwise.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_file(path),
            _ => Self::from_toml_file(path),
        }
    }

    /// Sets the move radius.
    pub fn with_radius(mut self, radius: usize) -> Self {
        self.radius = radius;
        self
    }

    /// Enables or disables hyperplane elimination.
    pub fn with_hyperplane_elimination(mut self, enabled: bool) -> Self {
        self.hyperplane_elimination = enabled;
        self
    }

    /// Enables or disables bit reordering.
    pub fn with_reordering(mut self, enabled: bool) -> Self {
        self.reordering = enabled;
        self
    }

    /// Sets the environment mode.
    pub fn with_environment_mode(mut self, mode: EnvironmentMode) -> Self {
        self.environment_mode = mode;
        self
    }

    /// Checks values that deserialize fine but cannot be enumerated.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.radius == 0 {
            return Err(ConfigError::Invalid(
                "radius must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Returns true if the engine should cross-check its delta table.
    pub fn verify_deltas(&self) -> bool {
        self.environment_mode == EnvironmentMode::FullAssert
    }
}

/// Environment mode affecting enumeration behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvironmentMode {
    /// No runtime assertions beyond the engine's own invariants.
    #[default]
    Fast,

    /// Recompute every delta from scratch at each local optimum and abort on
    /// any disagreement.
    FullAssert,
}

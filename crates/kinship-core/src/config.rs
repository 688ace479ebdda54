//! Layered configuration for layout spacing, the visualization adapter and
//! logging.
//!
//! Sources are merged in order: built-in defaults, an optional TOML file,
//! then `KINSHIP_`-prefixed environment variables (`__` separates nested
//! keys, e.g. `KINSHIP_LAYOUT__NODE_SEPARATION=200`).

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Environment variable prefix for overrides.
pub const ENV_PREFIX: &str = "KINSHIP_";

/// Configuration loading or validation error.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A source could not be read or deserialized.
    #[error("Configuration parse error: {0}")]
    Parse(String),

    /// A value is out of range.
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Spacing parameters for the tree layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Minimum horizontal distance between neighbouring families.
    pub node_separation: f64,
    /// Vertical distance between generations.
    pub level_separation: f64,
    /// Horizontal distance between spouses in one family cluster.
    pub spouse_separation: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_separation: 180.0,
            level_separation: 120.0,
            spouse_separation: 90.0,
        }
    }
}

impl LayoutConfig {
    /// Creates a layout config with the given separations.
    #[must_use]
    pub fn new(node_separation: f64, level_separation: f64, spouse_separation: f64) -> Self {
        Self {
            node_separation,
            level_separation,
            spouse_separation,
        }
    }

    /// Checks that every separation is finite and positive and that spouses
    /// sit closer together than separate families.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("layout.node_separation", self.node_separation),
            ("layout.level_separation", self.level_separation),
            ("layout.spouse_separation", self.spouse_separation),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be a positive number, got {value}"
                )));
            }
        }
        if self.spouse_separation >= self.node_separation {
            return Err(ConfigError::Invalid(format!(
                "layout.spouse_separation ({}) must be smaller than layout.node_separation ({})",
                self.spouse_separation, self.node_separation
            )));
        }
        Ok(())
    }
}

/// Settings for the visualization adapter boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdapterConfig {
    /// Container handed to the renderer when allocating a surface.
    pub container: String,
    /// Largest layout (in nodes) the adapter will hand to the renderer.
    pub node_budget: usize,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            container: "family-tree".to_string(),
            node_budget: 5000,
        }
    }
}

/// Logging settings consumed by binaries when installing a subscriber.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KinshipConfig {
    /// Layout spacing.
    pub layout: LayoutConfig,
    /// Visualization adapter settings.
    pub adapter: AdapterConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

impl KinshipConfig {
    /// Loads defaults, then `path` if given and present, then environment
    /// overrides, and validates the result.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            if !path.exists() {
                return Err(ConfigError::Parse(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
            figment = figment.merge(Toml::file(path));
        }
        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));
        Self::extract(&figment)
    }

    /// Parses a TOML document on top of the defaults (no environment).
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        let figment = Figment::from(Serialized::defaults(Self::default())).merge(Toml::string(toml));
        Self::extract(&figment)
    }

    /// Validates all sections.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.layout.validate()?;
        if self.adapter.node_budget == 0 {
            return Err(ConfigError::Invalid(
                "adapter.node_budget must be greater than zero".to_string(),
            ));
        }
        if self.adapter.container.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "adapter.container cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    fn extract(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment
            .extract()
            .map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

//! TOML filter configuration files.

use std::path::Path;

use filtergraph_core::Filter;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::spec::FilterSpec;

/// A labelled filter selection, stored as TOML.
///
/// ```toml
/// name = "slapback"
/// description = "Short single repeat"
///
/// [filter]
/// type = "echo"
/// delay = 4410
/// decay = 0.5
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Optional label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// The filter to build. Defaults to the half-second echo.
    #[serde(default)]
    pub filter: FilterSpec,
}

impl FilterConfig {
    /// Create an unlabelled configuration for `filter`.
    pub fn new(filter: FilterSpec) -> Self {
        Self {
            name: None,
            description: None,
            filter,
        }
    }

    /// Set the label.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Load a configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read(path, e))?;
        Self::from_toml(&content)
    }

    /// Parse a configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Save the configuration to a TOML file, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write(path, e))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Validate the filter parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.filter.validate()
    }

    /// Validate and build the configured filter.
    pub fn build(&self) -> Result<Box<dyn Filter>, ConfigError> {
        self.filter.build()
    }
}

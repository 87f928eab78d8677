//! Failures while loading, saving or building a filter configuration.

use std::path::PathBuf;

use filtergraph_core::FilterError;
use thiserror::Error;

/// Everything that can go wrong between a configuration file and a built filter.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be opened or read.
    #[error("cannot read filter configuration '{path}': {source}")]
    ReadConfig {
        /// The configuration file.
        path: PathBuf,
        /// Cause.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file could not be written.
    #[error("cannot write filter configuration '{path}': {source}")]
    WriteConfig {
        /// The configuration file.
        path: PathBuf,
        /// Cause.
        #[source]
        source: std::io::Error,
    },

    /// A parent directory of the configuration file could not be created.
    #[error("cannot create configuration directory '{path}': {source}")]
    CreateDir {
        /// The directory that could not be created.
        path: PathBuf,
        /// Cause.
        #[source]
        source: std::io::Error,
    },

    /// Malformed TOML, an unknown filter type or a missing parameter.
    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// The configuration could not be written as TOML.
    #[error("failed to serialize TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// No preset has this name.
    #[error("unknown preset: {0}")]
    UnknownPreset(String),

    /// A parameter is out of range for its preset, e.g. a decay of 1.5.
    #[error("invalid parameter '{param}' for filter '{filter}': {reason}")]
    InvalidParameter {
        /// Preset name, as listed by [`FilterSpec::names`](crate::FilterSpec::names).
        filter: String,
        /// Parameter name as written in the configuration file.
        param: String,
        /// What the accepted range is.
        reason: String,
    },

    /// The parameters passed validation but the filter still refused them.
    #[error("failed to build filter: {0}")]
    Filter(#[from] FilterError),
}

impl ConfigError {
    pub(crate) fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::ReadConfig {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::WriteConfig {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn create_dir(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::CreateDir {
            path: path.into(),
            source,
        }
    }

    /// Reject `param` of preset `filter`.
    pub fn invalid_parameter(
        filter: impl Into<String>,
        param: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        ConfigError::InvalidParameter {
            filter: filter.into(),
            param: param.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;
    use std::io::ErrorKind;

    #[test]
    fn missing_config_names_file() {
        let err = ConfigError::read("rooms/hall.toml", ErrorKind::NotFound.into());
        assert!(
            matches!(err, ConfigError::ReadConfig { ref path, .. } if path.ends_with("hall.toml"))
        );
        assert!(
            err.to_string()
                .starts_with("cannot read filter configuration 'rooms/hall.toml'"),
            "got: {err}"
        );
    }

    #[test]
    fn save_failures_keep_io_cause() {
        let denied = || std::io::Error::from(ErrorKind::PermissionDenied);
        let write = ConfigError::write("slapback.toml", denied());
        let mkdir = ConfigError::create_dir("presets", denied());
        assert!(write.to_string().contains("slapback.toml"), "got: {write}");
        assert!(mkdir.to_string().contains("directory 'presets'"), "got: {mkdir}");
        for err in [write, mkdir] {
            let cause = err.source().and_then(|s| s.downcast_ref::<std::io::Error>());
            assert_eq!(cause.map(std::io::Error::kind), Some(ErrorKind::PermissionDenied));
        }
    }

    #[test]
    fn out_of_range_decay_message() {
        let err = ConfigError::invalid_parameter("echo", "decay", "must be in (0, 1)");
        assert_eq!(
            err.to_string(),
            "invalid parameter 'decay' for filter 'echo': must be in (0, 1)"
        );
        assert!(err.source().is_none());
    }

    #[test]
    fn unknown_preset_message() {
        let err = ConfigError::UnknownPreset("flanger".to_string());
        assert_eq!(err.to_string(), "unknown preset: flanger");
    }

    #[test]
    fn rejected_filter_wraps_filter_error() {
        let err: ConfigError =
            FilterError::invalid_parameter("delay", "delay must be positive").into();
        assert!(matches!(
            err,
            ConfigError::Filter(FilterError::InvalidParameter { .. })
        ));
        assert!(err.to_string().starts_with("failed to build filter"), "got: {err}");
        assert!(err.source().is_some());
    }
}

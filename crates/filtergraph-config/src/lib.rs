//! Configuration and preset selection for filtergraph filters.
//!
//! A [`FilterSpec`] names one of the preset topologies and carries its
//! parameters. A [`FilterConfig`] wraps a spec with an optional label and
//! reads or writes it as TOML.
//!
//! # Example
//!
//! ```rust
//! use filtergraph_config::{FilterConfig, FilterSpec, Overrides};
//!
//! let config = FilterConfig::from_toml(
//!     r#"
//! [filter]
//! type = "lowpass"
//! delay = 1
//! gain = 0.5
//! "#,
//! )
//! .unwrap();
//! let mut filter = config.build().unwrap();
//! assert_eq!(filter.compute_one_step(&[1.0]).unwrap(), vec![0.5]);
//!
//! let echo = FilterSpec::preset("echo", Overrides { delay: Some(100), ..Default::default() }).unwrap();
//! assert_eq!(echo, FilterSpec::Echo { delay: 100, decay: 0.6 });
//! ```

mod config;
mod error;
mod spec;

pub use config::FilterConfig;
pub use error::ConfigError;
pub use spec::{DEFAULT_DECAY, DEFAULT_DELAY, FilterSpec, Overrides, PRESET_NAMES};

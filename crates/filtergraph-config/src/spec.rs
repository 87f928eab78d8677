//! Filter selection: which preset topology to build, with which parameters.

use filtergraph_core::{DelayFilter, Filter, GainFilter};
use filtergraph_effects::{AllPass, Comb, Echo, JcRev, LowPass, Reverb};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Names accepted by [`FilterSpec::preset`], in display order.
pub static PRESET_NAMES: &[&str] = &[
    "echo", "comb", "allpass", "lowpass", "reverb", "jcrev", "gain", "delay",
];

/// Default delay of the echo and comb presets: half a second at 44.1 kHz.
pub const DEFAULT_DELAY: usize = 22050;

/// Default decay of the echo and comb presets.
pub const DEFAULT_DECAY: f64 = 0.6;

/// A filter to build, tagged by its preset name.
///
/// # TOML Format
///
/// The variant is selected by the `type` key; the remaining keys are its
/// parameters. Delays are in samples.
///
/// ```toml
/// type = "allpass"
/// delay = 353
/// gain = 0.3
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FilterSpec {
    /// Feedback comb, see [`Echo`].
    Echo {
        /// Delay between repeats.
        delay: usize,
        /// Loss of intensity per repeat, in (0, 1).
        decay: f64,
    },
    /// Feedforward comb, see [`Comb`].
    Comb {
        /// Offset of the delayed copy.
        delay: usize,
        /// Attenuation of the delayed copy, in (0, 1).
        decay: f64,
    },
    /// Schroeder all-pass, see [`AllPass`].
    AllPass {
        /// Loop delay.
        delay: usize,
        /// Feedback gain, in (0, 1).
        gain: f64,
    },
    /// Recursive low-pass, see [`LowPass`].
    LowPass {
        /// Feedback delay.
        delay: usize,
        /// Feedback gain, in (0, 1).
        gain: f64,
    },
    /// Gardner large-room reverberator, see [`Reverb`].
    Reverb,
    /// Chowning reverberator, see [`JcRev`].
    JcRev,
    /// Constant gain.
    Gain {
        /// Multiplication factor, any finite value.
        factor: f64,
    },
    /// Plain delay line.
    Delay {
        /// Delay in samples.
        delay: usize,
    },
}

impl Default for FilterSpec {
    /// Echo with a half-second delay and a 0.6 decay.
    fn default() -> Self {
        FilterSpec::Echo {
            delay: DEFAULT_DELAY,
            decay: DEFAULT_DECAY,
        }
    }
}

/// Optional parameter overrides applied on top of a preset's defaults.
///
/// Overrides a preset has no use for are ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Overrides {
    /// Delay in samples.
    pub delay: Option<usize>,
    /// Decay of echo and comb presets.
    pub decay: Option<f64>,
    /// Gain of all-pass and low-pass presets, factor of the gain preset.
    pub gain: Option<f64>,
}

impl FilterSpec {
    /// Every supported preset name.
    pub fn names() -> &'static [&'static str] {
        PRESET_NAMES
    }

    /// Returns the preset `name` with its default parameters, then `overrides`
    /// applied.
    ///
    /// The result is not validated; call [`validate`](Self::validate) or
    /// [`build`](Self::build).
    pub fn preset(name: &str, overrides: Overrides) -> Result<Self, ConfigError> {
        let delay = |default| overrides.delay.unwrap_or(default);
        let decay = overrides.decay.unwrap_or(DEFAULT_DECAY);

        let spec = match name.to_ascii_lowercase().as_str() {
            "echo" => FilterSpec::Echo {
                delay: delay(DEFAULT_DELAY),
                decay,
            },
            "comb" => FilterSpec::Comb {
                delay: delay(DEFAULT_DELAY),
                decay,
            },
            "allpass" => FilterSpec::AllPass {
                delay: delay(353),
                gain: overrides.gain.unwrap_or(0.3),
            },
            "lowpass" => FilterSpec::LowPass {
                delay: delay(88),
                gain: overrides.gain.unwrap_or(0.7133),
            },
            "reverb" => FilterSpec::Reverb,
            "jcrev" => FilterSpec::JcRev,
            "gain" => FilterSpec::Gain {
                factor: overrides.gain.unwrap_or(1.0),
            },
            "delay" => FilterSpec::Delay {
                delay: delay(DEFAULT_DELAY),
            },
            _ => return Err(ConfigError::UnknownPreset(name.to_string())),
        };
        Ok(spec)
    }

    /// Preset name of this spec, as written in the `type` key.
    pub fn name(&self) -> &'static str {
        match self {
            FilterSpec::Echo { .. } => "echo",
            FilterSpec::Comb { .. } => "comb",
            FilterSpec::AllPass { .. } => "allpass",
            FilterSpec::LowPass { .. } => "lowpass",
            FilterSpec::Reverb => "reverb",
            FilterSpec::JcRev => "jcrev",
            FilterSpec::Gain { .. } => "gain",
            FilterSpec::Delay { .. } => "delay",
        }
    }

    /// One-line summary of the parameters, for listings.
    pub fn describe(&self) -> String {
        match *self {
            FilterSpec::Echo { delay, decay } | FilterSpec::Comb { delay, decay } => {
                format!("delay = {delay}, decay = {decay}")
            }
            FilterSpec::AllPass { delay, gain } | FilterSpec::LowPass { delay, gain } => {
                format!("delay = {delay}, gain = {gain}")
            }
            FilterSpec::Reverb => "Gardner large room, fixed".to_string(),
            FilterSpec::JcRev => "Chowning JCRev, fixed".to_string(),
            FilterSpec::Gain { factor } => format!("factor = {factor}"),
            FilterSpec::Delay { delay } => format!("delay = {delay}"),
        }
    }

    /// Checks every parameter against the range its filter accepts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let name = self.name();
        match *self {
            FilterSpec::Echo { delay, decay } | FilterSpec::Comb { delay, decay } => {
                positive_delay(name, delay)?;
                unit_open(name, "decay", decay)
            }
            FilterSpec::AllPass { delay, gain } | FilterSpec::LowPass { delay, gain } => {
                positive_delay(name, delay)?;
                unit_open(name, "gain", gain)
            }
            FilterSpec::Reverb | FilterSpec::JcRev => Ok(()),
            FilterSpec::Gain { factor } => {
                if factor.is_finite() {
                    Ok(())
                } else {
                    Err(ConfigError::invalid_parameter(
                        name,
                        "factor",
                        format!("must be finite, got {factor}"),
                    ))
                }
            }
            FilterSpec::Delay { delay } => positive_delay(name, delay),
        }
    }

    /// Validates the spec and builds the filter it describes.
    pub fn build(&self) -> Result<Box<dyn Filter>, ConfigError> {
        self.validate()?;
        let filter: Box<dyn Filter> = match *self {
            FilterSpec::Echo { delay, decay } => Box::new(Echo::new(delay, decay)?),
            FilterSpec::Comb { delay, decay } => Box::new(Comb::new(delay, decay)?),
            FilterSpec::AllPass { delay, gain } => Box::new(AllPass::new(delay, gain)?),
            FilterSpec::LowPass { delay, gain } => Box::new(LowPass::new(delay, gain)?),
            FilterSpec::Reverb => Box::new(Reverb::new()?),
            FilterSpec::JcRev => Box::new(JcRev::new()?),
            FilterSpec::Gain { factor } => Box::new(GainFilter::new(factor)),
            FilterSpec::Delay { delay } => Box::new(DelayFilter::new(delay)?),
        };
        Ok(filter)
    }
}

fn positive_delay(filter: &str, delay: usize) -> Result<(), ConfigError> {
    if delay == 0 {
        return Err(ConfigError::invalid_parameter(
            filter,
            "delay",
            "must be at least 1 sample",
        ));
    }
    Ok(())
}

fn unit_open(filter: &str, param: &str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 && value < 1.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid_parameter(
            filter,
            param,
            format!("must be in (0, 1), got {value}"),
        ))
    }
}

//! Comb filters: [`Echo`] (feedback) and [`Comb`] (feedforward).
//!
//! Both weight the delayed signal by `1 - decay`, so a larger decay means a
//! quieter repeat.

use filtergraph_core::{AdditionFilter, CompositeFilter, DelayFilter, FilterError, GainFilter};

use crate::{check_delay, check_unit_open, impl_composite_filter};

/// Feedback comb filter.
///
/// `y[n] = x[n] + (1 - decay) * y[n - delay]`
///
/// ```text
/// in ──► add ──┬──────────────► out
///         ▲    │
///         │    ▼
///       gain ◄─ delay
/// ```
#[derive(Debug)]
pub struct Echo {
    graph: CompositeFilter,
    delay: usize,
    decay: f64,
}

impl Echo {
    /// Creates an echo repeating every `delay` samples.
    ///
    /// Fails if `delay` is zero or `decay` is outside (0, 1).
    pub fn new(delay: usize, decay: f64) -> Result<Self, FilterError> {
        check_delay("echo", delay)?;
        check_unit_open("echo", "decay", decay)?;

        let mut graph = CompositeFilter::new(1, 1);
        let wait = graph.add_block(DelayFilter::new(delay)?);
        let gain = graph.add_block(GainFilter::new(1.0 - decay));
        let add = graph.add_block(AdditionFilter::new(2));

        graph.connect_input_to_block(0, add, 0)?;
        graph.connect_block_to_block(add, 0, wait, 0)?;
        graph.connect_block_to_block(wait, 0, gain, 0)?;
        graph.connect_block_to_block(gain, 0, add, 1)?;
        graph.connect_block_to_output(add, 0, 0)?;

        Ok(Self {
            graph,
            delay,
            decay,
        })
    }

    /// Delay between repeats, in samples.
    pub fn delay(&self) -> usize {
        self.delay
    }

    /// Loss of intensity per repeat.
    pub fn decay(&self) -> f64 {
        self.decay
    }
}

/// Feedforward comb filter.
///
/// `y[n] = x[n] + (1 - decay) * x[n - delay]`
#[derive(Debug)]
pub struct Comb {
    graph: CompositeFilter,
    delay: usize,
    decay: f64,
}

impl Comb {
    /// Creates a comb adding one copy of the input `delay` samples late.
    ///
    /// Fails if `delay` is zero or `decay` is outside (0, 1).
    pub fn new(delay: usize, decay: f64) -> Result<Self, FilterError> {
        check_delay("comb", delay)?;
        check_unit_open("comb", "decay", decay)?;

        let mut graph = CompositeFilter::new(1, 1);
        let wait = graph.add_block(DelayFilter::new(delay)?);
        let gain = graph.add_block(GainFilter::new(1.0 - decay));
        let add = graph.add_block(AdditionFilter::new(2));

        graph.connect_input_to_block(0, add, 0)?;
        graph.connect_input_to_block(0, wait, 0)?;
        graph.connect_block_to_block(wait, 0, gain, 0)?;
        graph.connect_block_to_block(gain, 0, add, 1)?;
        graph.connect_block_to_output(add, 0, 0)?;

        Ok(Self {
            graph,
            delay,
            decay,
        })
    }

    /// Offset of the delayed copy, in samples.
    pub fn delay(&self) -> usize {
        self.delay
    }

    /// Attenuation of the delayed copy.
    pub fn decay(&self) -> f64 {
        self.decay
    }
}

impl_composite_filter!(Echo, Comb);

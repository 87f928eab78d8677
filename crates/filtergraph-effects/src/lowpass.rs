//! Recursive low-pass filter.

use filtergraph_core::{AdditionFilter, CompositeFilter, DelayFilter, FilterError, GainFilter};

use crate::{check_delay, check_unit_open, impl_composite_filter};

/// Recursive low-pass filter.
///
/// `y[n] = (1 - g) * x[n] + g * y[n - delay]`
///
/// The DC gain is 1. With `delay = 1` this is the classic one-pole smoother;
/// longer delays give a comb-shaped response with low-pass peaks.
#[derive(Debug)]
pub struct LowPass {
    graph: CompositeFilter,
    delay: usize,
    gain: f64,
}

impl LowPass {
    /// Creates a low-pass filter.
    ///
    /// Fails if `delay` is zero or `gain` is outside (0, 1).
    pub fn new(delay: usize, gain: f64) -> Result<Self, FilterError> {
        check_delay("low-pass", delay)?;
        check_unit_open("low-pass", "gain", gain)?;

        let mut graph = CompositeFilter::new(1, 1);
        let invert = graph.add_block(GainFilter::new(1.0 - gain));
        let add = graph.add_block(AdditionFilter::new(2));
        let wait = graph.add_block(DelayFilter::new(delay)?);
        let mult = graph.add_block(GainFilter::new(gain));

        graph.connect_input_to_block(0, invert, 0)?;
        graph.connect_block_to_block(invert, 0, add, 0)?;
        graph.connect_block_to_block(add, 0, wait, 0)?;
        graph.connect_block_to_block(wait, 0, mult, 0)?;
        graph.connect_block_to_block(mult, 0, add, 1)?;
        graph.connect_block_to_output(add, 0, 0)?;

        Ok(Self { graph, delay, gain })
    }

    /// Feedback delay, in samples.
    pub fn delay(&self) -> usize {
        self.delay
    }

    /// Feedback gain `g`.
    pub fn gain(&self) -> f64 {
        self.gain
    }
}

impl_composite_filter!(LowPass);

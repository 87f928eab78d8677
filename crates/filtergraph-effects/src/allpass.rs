//! Schroeder all-pass filter.
//!
//! `H(z) = (-g + z^-d) / (1 - g z^-d)`: flat magnitude response, frequency
//! dependent phase. Used as a diffuser in reverberators.
//!
//! ```text
//!        ┌──────► -g ──────────┐
//!        │                     ▼
//! in ────┼──► add1 ──► delay ──► add2 ──┬──► out
//!             ▲                         │
//!             └────────── g ◄───────────┘
//! ```
//!
//! [`AllPass::nested`] inserts another 1→1 filter between `add1` and the delay,
//! which is how nested all-pass structures are built.

use filtergraph_core::{
    AdditionFilter, BlockId, CompositeFilter, DelayFilter, Filter, FilterError, GainFilter,
};

use crate::{check_delay, check_unit_open, impl_composite_filter};

/// Schroeder all-pass filter, optionally with a nested filter in its loop.
#[derive(Debug)]
pub struct AllPass {
    graph: CompositeFilter,
    delay: usize,
    gain: f64,
}

impl AllPass {
    /// Creates an all-pass filter.
    ///
    /// Fails if `delay` is zero or `gain` is outside (0, 1).
    pub fn new(delay: usize, gain: f64) -> Result<Self, FilterError> {
        Self::build(delay, gain).map(|(filter, _, _)| filter)
    }

    /// Creates an all-pass filter whose loop runs through `nested` before the
    /// delay.
    ///
    /// Fails like [`AllPass::new`], or if `nested` is not 1→1.
    pub fn nested<F: Filter + 'static>(
        delay: usize,
        gain: f64,
        nested: F,
    ) -> Result<Self, FilterError> {
        let (mut filter, add1, wait) = Self::build(delay, gain)?;
        if nested.nb_inputs() != 1 || nested.nb_outputs() != 1 {
            return Err(FilterError::invalid_parameter(
                "all-pass",
                "nested filter must have exactly one input and one output",
            ));
        }

        let graph = &mut filter.graph;
        let inner = graph.add_block(nested);
        graph.connect_block_to_block(add1, 0, inner, 0)?;
        // Replaces add1 as the delay's producer.
        graph.connect_block_to_block(inner, 0, wait, 0)?;
        Ok(filter)
    }

    /// Builds the plain structure and returns the `add1` and delay handles.
    fn build(delay: usize, gain: f64) -> Result<(Self, BlockId, BlockId), FilterError> {
        check_delay("all-pass", delay)?;
        check_unit_open("all-pass", "gain", gain)?;

        let mut graph = CompositeFilter::new(1, 1);
        let wait = graph.add_block(DelayFilter::new(delay)?);
        let neg = graph.add_block(GainFilter::new(-gain));
        let pos = graph.add_block(GainFilter::new(gain));
        let add1 = graph.add_block(AdditionFilter::new(2));
        let add2 = graph.add_block(AdditionFilter::new(2));

        graph.connect_input_to_block(0, neg, 0)?;
        graph.connect_input_to_block(0, add1, 0)?;
        graph.connect_block_to_block(pos, 0, add1, 1)?;
        graph.connect_block_to_block(add1, 0, wait, 0)?;
        graph.connect_block_to_block(neg, 0, add2, 0)?;
        graph.connect_block_to_block(wait, 0, add2, 1)?;
        graph.connect_block_to_block(add2, 0, pos, 0)?;
        graph.connect_block_to_output(add2, 0, 0)?;

        Ok((Self { graph, delay, gain }, add1, wait))
    }

    /// Loop delay, in samples.
    pub fn delay(&self) -> usize {
        self.delay
    }

    /// Feedback gain `g`.
    pub fn gain(&self) -> f64 {
        self.gain
    }
}

impl_composite_filter!(AllPass);

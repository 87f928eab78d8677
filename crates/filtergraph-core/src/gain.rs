//! Constant gain.

use crate::error::{FilterError, check_arity};
use crate::filter::Filter;

/// Multiplies its single input by a fixed factor.
///
/// The factor may be any real number, including zero and negative values
/// (a factor of `-1.0` is a polarity inversion).
///
/// ```rust
/// use filtergraph_core::{Filter, GainFilter};
///
/// let mut half = GainFilter::new(0.5);
/// assert_eq!(half.compute_one_step(&[2.0]).unwrap(), vec![1.0]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GainFilter {
    factor: f64,
}

impl GainFilter {
    /// Creates a gain filter with the given factor.
    pub fn new(factor: f64) -> Self {
        Self { factor }
    }

    /// Returns the multiplication factor.
    pub fn factor(&self) -> f64 {
        self.factor
    }
}

impl Filter for GainFilter {
    fn nb_inputs(&self) -> usize {
        1
    }

    fn nb_outputs(&self) -> usize {
        1
    }

    fn reset(&mut self) {}

    fn compute_one_step(&mut self, input: &[f64]) -> Result<Vec<f64>, FilterError> {
        check_arity("gain", 1, input.len())?;
        Ok(vec![self.factor * input[0]])
    }
}

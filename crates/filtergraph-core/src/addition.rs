//! Summing filters: [`AdditionFilter`] and its averaging variant [`MeanFilter`].

use crate::error::{FilterError, check_arity};
use crate::filter::Filter;

/// Sums `n` inputs into a single output.
///
/// # Example
///
/// ```rust
/// use filtergraph_core::{AdditionFilter, Filter};
///
/// let mut add = AdditionFilter::new(3);
/// assert_eq!(add.compute_one_step(&[1.0, 2.0, 3.5]).unwrap(), vec![6.5]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdditionFilter {
    nb_inputs: usize,
}

impl AdditionFilter {
    /// Creates an addition filter expecting `nb_inputs` inputs.
    ///
    /// Zero inputs is allowed: the output is then always `0.0`.
    pub fn new(nb_inputs: usize) -> Self {
        Self { nb_inputs }
    }

    fn sum(&self, name: &'static str, input: &[f64]) -> Result<f64, FilterError> {
        check_arity(name, self.nb_inputs, input.len())?;
        Ok(input.iter().sum())
    }
}

impl Default for AdditionFilter {
    /// Two inputs.
    fn default() -> Self {
        Self::new(2)
    }
}

impl Filter for AdditionFilter {
    fn nb_inputs(&self) -> usize {
        self.nb_inputs
    }

    fn nb_outputs(&self) -> usize {
        1
    }

    fn reset(&mut self) {}

    fn compute_one_step(&mut self, input: &[f64]) -> Result<Vec<f64>, FilterError> {
        Ok(vec![self.sum("addition", input)?])
    }
}

/// Averages `n` inputs into a single output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeanFilter {
    inner: AdditionFilter,
}

impl MeanFilter {
    /// Creates a mean filter over `nb_inputs` inputs.
    ///
    /// With zero inputs the mean is undefined and the output is NaN.
    pub fn new(nb_inputs: usize) -> Self {
        Self {
            inner: AdditionFilter::new(nb_inputs),
        }
    }
}

impl Filter for MeanFilter {
    fn nb_inputs(&self) -> usize {
        self.inner.nb_inputs
    }

    fn nb_outputs(&self) -> usize {
        1
    }

    fn reset(&mut self) {}

    fn compute_one_step(&mut self, input: &[f64]) -> Result<Vec<f64>, FilterError> {
        let sum = self.inner.sum("mean", input)?;
        Ok(vec![sum / self.inner.nb_inputs as f64])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_addition_has_two_inputs() {
        let mut add = AdditionFilter::default();
        assert_eq!(add.nb_inputs(), 2);
        assert_eq!(add.nb_outputs(), 1);
        assert_eq!(add.compute_one_step(&[1.5, -0.5]).unwrap(), vec![1.0]);
    }

    #[test]
    fn addition_rejects_wrong_arity() {
        let mut add = AdditionFilter::new(2);
        assert!(matches!(
            add.compute_one_step(&[1.0]),
            Err(FilterError::Arity {
                filter: "addition",
                expected: 2,
                got: 1
            })
        ));
    }

    #[test]
    fn zero_input_addition_outputs_zero() {
        let mut add = AdditionFilter::new(0);
        assert_eq!(add.compute_one_step(&[]).unwrap(), vec![0.0]);
    }

    #[test]
    fn mean_divides_by_count() {
        let mut mean = MeanFilter::new(4);
        assert_eq!(
            mean.compute_one_step(&[1.0, 2.0, 3.0, 6.0]).unwrap(),
            vec![3.0]
        );
    }

    #[test]
    fn mean_rejects_wrong_arity() {
        let mut mean = MeanFilter::new(3);
        assert!(matches!(
            mean.compute_one_step(&[1.0, 2.0]),
            Err(FilterError::Arity { filter: "mean", .. })
        ));
    }
}

//! Core Filter trait and related types.
//!
//! The [`Filter`] trait is the only contract between the graph engine and the
//! processing units it wires together. Leaf filters (addition, gain, delay...)
//! and composite graphs implement the same trait, which is what lets a composite
//! be nested inside another one as an ordinary block.
//!
//! ## Design Decisions
//!
//! - **Vector steps**: one call consumes exactly [`nb_inputs`](Filter::nb_inputs)
//!   scalars and produces exactly [`nb_outputs`](Filter::nb_outputs) scalars.
//!   There is no block processing; one call is one logical sample.
//!
//! - **Capabilities instead of downcasts**: the engine needs to know whether a
//!   filter is a delay (to break feedback loops) or a composite (to validate it
//!   recursively). Filters report this through [`Filter::kind`] and the matching
//!   optional methods rather than through type inspection.
//!
//! - **Object-safe**: blocks hold `Box<dyn Filter>`; `Send` is required so a
//!   complete graph can be moved to a worker thread.

use crate::error::FilterError;

/// How the graph engine must treat a filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterKind {
    /// Stateless or stateful scalar transform without a sub-graph.
    #[default]
    Leaf,
    /// Buffers history and can yield a value without a new input through
    /// [`Filter::compute_from_history`]. Loops through such a filter are legal.
    Delay,
    /// Owns a sub-graph that must itself be validated through [`Filter::check`].
    Composite,
}

/// Core trait for all filters.
///
/// # Example
///
/// ```rust
/// use filtergraph_core::{Filter, FilterError, check_arity};
///
/// struct Negate;
///
/// impl Filter for Negate {
///     fn nb_inputs(&self) -> usize {
///         1
///     }
///
///     fn nb_outputs(&self) -> usize {
///         1
///     }
///
///     fn reset(&mut self) {}
///
///     fn compute_one_step(&mut self, input: &[f64]) -> Result<Vec<f64>, FilterError> {
///         check_arity("negate", 1, input.len())?;
///         Ok(vec![-input[0]])
///     }
/// }
///
/// assert_eq!(Negate.compute_one_step(&[2.0]).unwrap(), vec![-2.0]);
/// ```
pub trait Filter: Send {
    /// Number of input samples consumed per step. Constant for the filter's lifetime.
    fn nb_inputs(&self) -> usize;

    /// Number of output samples produced per step. Constant for the filter's lifetime.
    fn nb_outputs(&self) -> usize;

    /// Clears retained state (delay buffers, queued samples). Idempotent.
    fn reset(&mut self);

    /// Computes one step.
    ///
    /// Fails with [`FilterError::Arity`] when `input.len() != self.nb_inputs()`.
    /// On success the returned vector has exactly `self.nb_outputs()` elements.
    fn compute_one_step(&mut self, input: &[f64]) -> Result<Vec<f64>, FilterError>;

    /// Reports how the engine must treat this filter. Defaults to [`FilterKind::Leaf`].
    fn kind(&self) -> FilterKind {
        FilterKind::Leaf
    }

    /// Computes one step from buffered history alone, without a new input.
    ///
    /// Only meaningful for [`FilterKind::Delay`] filters; the default fails with
    /// [`FilterError::NoHistory`].
    fn compute_from_history(&mut self) -> Result<Vec<f64>, FilterError> {
        Err(FilterError::NoHistory("leaf"))
    }

    /// Validates any internal structure. Leaves have none, so the default succeeds.
    fn check(&mut self) -> Result<(), FilterError> {
        Ok(())
    }
}

impl<F: Filter + ?Sized> Filter for Box<F> {
    fn nb_inputs(&self) -> usize {
        (**self).nb_inputs()
    }

    fn nb_outputs(&self) -> usize {
        (**self).nb_outputs()
    }

    fn reset(&mut self) {
        (**self).reset();
    }

    fn compute_one_step(&mut self, input: &[f64]) -> Result<Vec<f64>, FilterError> {
        (**self).compute_one_step(input)
    }

    fn kind(&self) -> FilterKind {
        (**self).kind()
    }

    fn compute_from_history(&mut self) -> Result<Vec<f64>, FilterError> {
        (**self).compute_from_history()
    }

    fn check(&mut self) -> Result<(), FilterError> {
        (**self).check()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::check_arity;

    struct Identity;

    impl Filter for Identity {
        fn nb_inputs(&self) -> usize {
            1
        }
        fn nb_outputs(&self) -> usize {
            1
        }
        fn reset(&mut self) {}
        fn compute_one_step(&mut self, input: &[f64]) -> Result<Vec<f64>, FilterError> {
            check_arity("identity", 1, input.len())?;
            Ok(input.to_vec())
        }
    }

    #[test]
    fn default_capabilities_are_leaf() {
        let mut f = Identity;
        assert_eq!(f.kind(), FilterKind::Leaf);
        assert!(f.check().is_ok());
        assert!(matches!(
            f.compute_from_history(),
            Err(FilterError::NoHistory(_))
        ));
    }

    #[test]
    fn boxed_filter_delegates() {
        let mut boxed: Box<dyn Filter> = Box::new(Identity);
        assert_eq!(boxed.nb_inputs(), 1);
        assert_eq!(boxed.compute_one_step(&[4.0]).unwrap(), vec![4.0]);
        assert!(boxed.compute_one_step(&[]).is_err());
    }
}

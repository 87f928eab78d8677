//! Filtergraph Effects - preconfigured filter topologies
//!
//! Every effect in this crate is a [`CompositeFilter`] wired from the leaf
//! filters of `filtergraph-core` (addition, gain, mean, delay). Nothing here
//! computes samples directly; each type only assembles a graph and forwards
//! the [`Filter`] contract to it.
//!
//! - [`Echo`] - Feedback comb: repeats the output after `delay` samples
//! - [`Comb`] - Feedforward comb: adds one delayed copy of the input
//! - [`AllPass`] - Schroeder all-pass, optionally with a nested filter in its loop
//! - [`LowPass`] - One-pole recursive smoother
//! - [`Reverb`] - Gardner large-room reverberator
//! - [`JcRev`] - Chowning's JCRev reverberator
//!
//! All delays are expressed in samples. Constructors validate their parameters
//! and fail with [`FilterError::InvalidParameter`].
//!
//! ## Example
//!
//! ```rust
//! use filtergraph_core::Filter;
//! use filtergraph_effects::Echo;
//!
//! let mut echo = Echo::new(2, 0.5)?;
//! let out: Vec<f64> = [1.0, 0.0, 0.0]
//!     .iter()
//!     .map(|&x| echo.compute_one_step(&[x]).map(|y| y[0]))
//!     .collect::<Result<_, _>>()?;
//! assert_eq!(out, vec![1.0, 0.0, 0.5]);
//! # Ok::<(), filtergraph_core::FilterError>(())
//! ```

use filtergraph_core::{CompositeFilter, Filter, FilterError};

pub mod allpass;
pub mod comb;
pub mod lowpass;
pub mod reverb;

// Re-export main types at crate root
pub use allpass::AllPass;
pub use comb::{Comb, Echo};
pub use lowpass::LowPass;
pub use reverb::{JcRev, Reverb};

/// Implements [`Filter`] for effect structs holding their graph in a `graph`
/// field.
macro_rules! impl_composite_filter {
    ($($ty:ty),* $(,)?) => {$(
        impl filtergraph_core::Filter for $ty {
            fn nb_inputs(&self) -> usize {
                filtergraph_core::Filter::nb_inputs(&self.graph)
            }

            fn nb_outputs(&self) -> usize {
                filtergraph_core::Filter::nb_outputs(&self.graph)
            }

            fn reset(&mut self) {
                filtergraph_core::Filter::reset(&mut self.graph);
            }

            fn compute_one_step(
                &mut self,
                input: &[f64],
            ) -> Result<Vec<f64>, filtergraph_core::FilterError> {
                filtergraph_core::Filter::compute_one_step(&mut self.graph, input)
            }

            fn kind(&self) -> filtergraph_core::FilterKind {
                filtergraph_core::FilterKind::Composite
            }

            fn check(&mut self) -> Result<(), filtergraph_core::FilterError> {
                filtergraph_core::Filter::check(&mut self.graph)
            }
        }

        impl From<$ty> for filtergraph_core::CompositeFilter {
            fn from(effect: $ty) -> Self {
                effect.graph
            }
        }
    )*};
}

pub(crate) use impl_composite_filter;

/// Chains 1→1 filters in series: input → first → ... → last → output.
///
/// Fails with [`FilterError::InvalidParameter`] if `filters` is empty or one of
/// them is not 1→1.
///
/// ```rust
/// use filtergraph_core::{Filter, GainFilter};
/// use filtergraph_effects::series;
///
/// let mut quarter = series([
///     Box::new(GainFilter::new(0.5)) as Box<dyn Filter>,
///     Box::new(GainFilter::new(0.5)),
/// ])?;
/// assert_eq!(quarter.compute_one_step(&[1.0])?, vec![0.25]);
/// # Ok::<(), filtergraph_core::FilterError>(())
/// ```
pub fn series<I>(filters: I) -> Result<CompositeFilter, FilterError>
where
    I: IntoIterator<Item = Box<dyn Filter>>,
{
    let mut graph = CompositeFilter::new(1, 1);
    let mut last = None;
    for filter in filters {
        if filter.nb_inputs() != 1 || filter.nb_outputs() != 1 {
            return Err(FilterError::invalid_parameter(
                "series",
                format!(
                    "every filter must be 1→1, got {}→{}",
                    filter.nb_inputs(),
                    filter.nb_outputs()
                ),
            ));
        }
        let block = graph.add_boxed_block(filter);
        match last {
            None => graph.connect_input_to_block(0, block, 0)?,
            Some(prev) => graph.connect_block_to_block(prev, 0, block, 0)?,
        }
        last = Some(block);
    }

    let last = last.ok_or_else(|| {
        FilterError::invalid_parameter("series", "at least one filter is required")
    })?;
    graph.connect_block_to_output(last, 0, 0)?;
    Ok(graph)
}

/// Fails unless `delay` is at least one sample.
pub(crate) fn check_delay(filter: &'static str, delay: usize) -> Result<(), FilterError> {
    if delay == 0 {
        return Err(FilterError::invalid_parameter(
            filter,
            "delay must be positive",
        ));
    }
    Ok(())
}

/// Fails unless `value` lies strictly between 0 and 1.
pub(crate) fn check_unit_open(
    filter: &'static str,
    name: &str,
    value: f64,
) -> Result<(), FilterError> {
    if value > 0.0 && value < 1.0 {
        Ok(())
    } else {
        Err(FilterError::invalid_parameter(
            filter,
            format!("{name} must be in (0, 1), got {value}"),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use filtergraph_core::{AdditionFilter, GainFilter};

    #[test]
    fn unit_open_interval_excludes_bounds_and_nan() {
        assert!(check_unit_open("echo", "decay", 0.5).is_ok());
        for bad in [0.0, 1.0, -0.1, 1.5, f64::NAN] {
            assert!(
                check_unit_open("echo", "decay", bad).is_err(),
                "{bad} accepted"
            );
        }
        let err = check_unit_open("echo", "decay", 2.0).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid parameter for echo filter: decay must be in (0, 1), got 2"
        );
    }

    #[test]
    fn zero_delay_rejected() {
        assert!(check_delay("comb", 0).is_err());
        assert!(check_delay("comb", 1).is_ok());
    }

    #[test]
    fn series_rejects_empty_and_wide_filters() {
        assert!(series(Vec::new()).is_err());
        let wide: Vec<Box<dyn Filter>> = vec![Box::new(AdditionFilter::new(2))];
        assert!(matches!(
            series(wide),
            Err(FilterError::InvalidParameter {
                filter: "series",
                ..
            })
        ));
    }

    #[test]
    fn series_multiplies_gains() {
        let gains: Vec<Box<dyn Filter>> = [2.0, 3.0, 0.5]
            .into_iter()
            .map(|g| Box::new(GainFilter::new(g)) as Box<dyn Filter>)
            .collect();
        let mut chain = series(gains).unwrap();
        assert_eq!(chain.block_count(), 3);
        assert_eq!(chain.compute_one_step(&[1.0]).unwrap(), vec![3.0]);
    }
}

//! Error type shared by every filter and by the graph engine.
//!
//! Errors fall into four groups, in the order a caller meets them:
//!
//! - **construction**: a filter was built with an invalid fixed parameter
//!   ([`FilterError::InvalidParameter`]);
//! - **wiring**: a connection call named an unknown block or a port index out of
//!   range ([`FilterError::UnknownBlock`], [`FilterError::PortOutOfRange`]). The graph is
//!   left exactly as it was before the failing call;
//! - **validation**: [`check`](crate::Filter::check) found an unconnected port
//!   or a loop without a delay ([`FilterError::UnconnectedPort`],
//!   [`FilterError::CycleWithoutDelay`]). Fix the wiring and check again;
//! - **runtime**: raised from `compute_one_step` ([`FilterError::Arity`],
//!   [`FilterError::EmptyHistory`], [`FilterError::InternalInvariant`], ...). A validated
//!   graph built from well-behaved leaves never produces these.

use thiserror::Error;

use crate::graph::BlockId;

/// Which side of a block a port index refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortSide {
    /// A sink port (the filter reads from it).
    Input,
    /// A source port (the filter writes to it).
    Output,
}

impl core::fmt::Display for PortSide {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Input => f.write_str("input"),
            Self::Output => f.write_str("output"),
        }
    }
}

/// Errors raised by filters and composite graphs.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FilterError {
    /// A step was called with the wrong number of input samples.
    #[error("provided {got} input(s) to {filter} filter, it expects exactly {expected}")]
    Arity {
        /// Short name of the filter that rejected the call.
        filter: &'static str,
        /// Declared number of inputs.
        expected: usize,
        /// Length of the vector actually provided.
        got: usize,
    },

    /// A filter was constructed with a parameter outside its valid range.
    #[error("invalid parameter for {filter} filter: {reason}")]
    InvalidParameter {
        /// Short name of the filter being constructed.
        filter: &'static str,
        /// What was wrong with the parameter.
        reason: String,
    },

    /// The zero-argument step was invoked on a delay whose buffer holds nothing unread.
    #[error("tried to read empty queue from delay filter")]
    EmptyHistory,

    /// The zero-argument step was invoked on a filter that keeps no history.
    #[error("{0} filter cannot produce output without input")]
    NoHistory(&'static str),

    /// A block handle does not belong to this graph.
    #[error("block {0} was not added to this composite filter")]
    UnknownBlock(BlockId),

    /// A port index exceeds the number of ports on that side.
    #[error("{side} number {index} is out of range, must be between 0 and {count} (excluded)")]
    PortOutOfRange {
        /// Input or output side.
        side: PortSide,
        /// Index requested by the caller.
        index: usize,
        /// Number of ports available on that side.
        count: usize,
    },

    /// Validation reached a sink port with no producer.
    #[error("in composite filter, {0} is not connected to anything")]
    UnconnectedPort(String),

    /// Validation found a directed loop that does not pass through a delay.
    #[error("composite filter contains a loop with no delay (through block {0})")]
    CycleWithoutDelay(BlockId),

    /// The engine reached a state that validation should have ruled out.
    #[error("unexpected error: {0}")]
    InternalInvariant(String),

    /// A wrapped filter failed while a block was being evaluated.
    #[error("unexpected error while computing one step of block {block}: {source}")]
    BlockStep {
        /// Block whose filter failed.
        block: BlockId,
        /// The filter's own error.
        #[source]
        source: Box<FilterError>,
    },
}

impl FilterError {
    /// Create an invalid parameter error.
    pub fn invalid_parameter(filter: &'static str, reason: impl Into<String>) -> Self {
        FilterError::InvalidParameter {
            filter,
            reason: reason.into(),
        }
    }

    /// Wrap the error of the filter inside `block`.
    pub fn block_step(block: BlockId, source: FilterError) -> Self {
        FilterError::BlockStep {
            block,
            source: Box::new(source),
        }
    }
}

/// Verifies that `got` samples were provided to a filter declaring `expected` inputs.
///
/// Every leaf filter calls this first in `compute_one_step`.
///
/// ```rust
/// use filtergraph_core::{FilterError, check_arity};
///
/// assert!(check_arity("gain", 1, 1).is_ok());
/// assert!(matches!(check_arity("gain", 1, 2), Err(FilterError::Arity { got: 2, .. })));
/// ```
#[inline]
pub fn check_arity(filter: &'static str, expected: usize, got: usize) -> Result<(), FilterError> {
    if expected == got {
        Ok(())
    } else {
        Err(FilterError::Arity {
            filter,
            expected,
            got,
        })
    }
}

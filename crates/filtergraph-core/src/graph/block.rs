//! Blocks: one owned filter plus its ports.
//!
//! A block is created by [`CompositeFilter::add_block`](super::CompositeFilter::add_block)
//! and lives as long as its graph. Its port arrays are sized from the wrapped
//! filter's declared arity at creation time and never change afterwards.

use crate::filter::{Filter, FilterKind};

use super::port::{InputPort, OutputPort};

/// Handle to a block inside a composite graph.
///
/// Handles are issued by [`CompositeFilter::add_block`](super::CompositeFilter::add_block)
/// and remain valid for the graph's lifetime. A handle also records which graph
/// issued it, so passing it to another graph fails with
/// [`FilterError::UnknownBlock`](crate::FilterError::UnknownBlock) instead of
/// silently addressing an unrelated block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BlockId {
    pub(crate) graph: u32,
    pub(crate) index: u32,
}

impl BlockId {
    pub(crate) fn new(graph: u32, index: u32) -> Self {
        Self { graph, index }
    }

    /// Returns the block's position in insertion order.
    #[inline]
    pub fn index(self) -> u32 {
        self.index
    }
}

impl core::fmt::Display for BlockId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "#{}", self.index)
    }
}

/// Progress of the current validation pass through one block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum Visit {
    /// Not reached yet. Blocks still in this state after a pass are unreachable.
    #[default]
    Unvisited,
    /// On the current delay-free search path: reaching it again closes a loop.
    OnPath,
    /// Fully validated. Once a pass succeeds these are exactly the blocks
    /// an external output reaches, and only they receive broadcast values.
    Done,
}

/// A filter wrapped with one input port per filter input and one output port
/// per filter output.
pub(crate) struct Block {
    pub filter: Box<dyn Filter>,
    pub inputs: Vec<InputPort>,
    pub outputs: Vec<OutputPort>,
    /// Reset to [`Visit::Unvisited`] at the start of every validation or
    /// reachability pass.
    pub visit: Visit,
}

impl Block {
    pub fn new(filter: Box<dyn Filter>) -> Self {
        let inputs = (0..filter.nb_inputs()).map(|_| InputPort::new()).collect();
        let outputs = (0..filter.nb_outputs()).map(|_| OutputPort::new()).collect();
        Self {
            filter,
            inputs,
            outputs,
            visit: Visit::Unvisited,
        }
    }

    #[inline]
    pub fn kind(&self) -> FilterKind {
        self.filter.kind()
    }

    /// Resets the wrapped filter and empties every input queue.
    pub fn reset(&mut self) {
        self.filter.reset();
        for input in &mut self.inputs {
            input.reset();
        }
    }

    /// `true` if at least one input has nothing queued.
    pub fn any_input_empty(&self) -> bool {
        self.inputs.iter().any(|i| i.queue.is_empty())
    }
}

//! Input (sink) and output (source) ports.
//!
//! Ports never reference each other directly. Each side stores handles
//! ([`InputRef`] / [`OutputRef`]) that the owning [`CompositeFilter`](super::CompositeFilter)
//! resolves against its block arena. The two relations they encode are:
//!
//! - an [`InputPort`] reads from **at most one** output (its producer);
//! - an [`OutputPort`] broadcasts to any number of inputs (fan-out).
//!
//! Both directions are kept in sync by the graph's connection protocol: linking
//! an input to a new producer first removes it from the old producer's fan-out.

use super::queue::SampleQueue;

/// Handle to a sink port inside one composite graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InputRef {
    /// Input `port` of the block stored at arena index `block`.
    Block {
        /// Arena index of the owning block.
        block: usize,
        /// Port index on that block.
        port: usize,
    },
    /// External output adapter `i` of the composite: the graph's own output `i`
    /// is read from this sink.
    External(usize),
}

/// Handle to a source port inside one composite graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OutputRef {
    /// Output `port` of the block stored at arena index `block`.
    Block {
        /// Arena index of the owning block.
        block: usize,
        /// Port index on that block.
        port: usize,
    },
    /// External input adapter `i` of the composite: a virtual producer with no
    /// upstream block, fed directly by `compute_one_step`.
    External(usize),
}

impl OutputRef {
    /// Returns the arena index of the block owning this output, or `None` for
    /// an external input adapter.
    pub fn owner(self) -> Option<usize> {
        match self {
            OutputRef::Block { block, .. } => Some(block),
            OutputRef::External(_) => None,
        }
    }
}

impl core::fmt::Display for InputRef {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            InputRef::Block { block, port } => write!(f, "input {port} of block #{block}"),
            InputRef::External(i) => write!(f, "output {i}"),
        }
    }
}

/// Sink port: a FIFO of pending samples plus its producer, if any.
#[derive(Debug, Default)]
pub(crate) struct InputPort {
    pub queue: SampleQueue,
    pub source: Option<OutputRef>,
}

impl InputPort {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops queued samples; the connection is kept.
    pub fn reset(&mut self) {
        self.queue.clear();
    }
}

/// Source port: the inputs it broadcasts to.
#[derive(Debug, Default)]
pub(crate) struct OutputPort {
    pub targets: Vec<InputRef>,
}

impl OutputPort {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(&mut self, input: InputRef) {
        if !self.targets.contains(&input) {
            self.targets.push(input);
        }
    }

    pub fn detach(&mut self, input: InputRef) {
        self.targets.retain(|t| *t != input);
    }
}

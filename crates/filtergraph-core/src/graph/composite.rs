//! [`CompositeFilter`]: a filter implemented as a graph of blocks.
//!
//! # Evaluation
//!
//! Evaluation is demand driven. [`Filter::compute_one_step`] broadcasts the
//! external input vector into the queues fed by the graph's inputs, then pulls
//! one value from each external output. A pull on an empty queue computes the
//! block that produces it, which pulls its own inputs, and so on upstream. Each
//! computed value is broadcast to every input its output feeds, so a block with
//! fan-out runs once and leaves a value queued for each consumer.
//!
//! A delay block asked for a value while one of its inputs is still empty
//! answers from its buffered history instead of recursing. That is what
//! terminates the pull chain around a feedback loop: the loop's consumer gets
//! the delayed sample, and the value computed downstream later lands in the
//! delay's input queue for the next step.
//!
//! # Validation
//!
//! [`Filter::check`] walks upstream from every external output. It fails on an
//! input with no producer and on any directed loop that does not pass through a
//! delay block. Delay inputs are explored as separate roots once the current
//! delay-free search has finished, so a delay never closes a loop during the
//! search. Nested composites are validated when first reached. A successful
//! check is remembered until the next structural change.
//!
//! Both walks keep their own stack of pending blocks, so a long delay-free
//! chain is limited by memory rather than by the thread's stack.

use core::sync::atomic::{AtomicU32, Ordering};

use crate::error::{FilterError, PortSide, check_arity};
use crate::filter::{Filter, FilterKind};

use super::block::{Block, BlockId, Visit};
use super::port::{InputPort, InputRef, OutputPort, OutputRef};

/// Source of graph tags carried by [`BlockId`].
static NEXT_GRAPH: AtomicU32 = AtomicU32::new(0);

/// A filter built by wiring other filters together.
///
/// The composite owns every filter added to it. External input `i` behaves like
/// a block output whose value is supplied by the caller on each step; external
/// output `o` behaves like a block input whose value is returned to the caller.
///
/// # Example
///
/// A one-sample echo: `y[n] = x[n] + 0.5 * y[n - 1]`.
///
/// ```rust
/// use filtergraph_core::{AdditionFilter, CompositeFilter, DelayFilter, Filter, GainFilter};
///
/// let mut echo = CompositeFilter::new(1, 1);
/// let add = echo.add_block(AdditionFilter::new(2));
/// let wait = echo.add_block(DelayFilter::new(1).unwrap());
/// let decay = echo.add_block(GainFilter::new(0.5));
///
/// echo.connect_input_to_block(0, add, 0).unwrap();
/// echo.connect_block_to_block(add, 0, wait, 0).unwrap();
/// echo.connect_block_to_block(wait, 0, decay, 0).unwrap();
/// echo.connect_block_to_block(decay, 0, add, 1).unwrap();
/// echo.connect_block_to_output(add, 0, 0).unwrap();
///
/// let out: Vec<f64> = [1.0, 0.0, 0.0]
///     .iter()
///     .map(|&x| echo.compute_one_step(&[x]).unwrap()[0])
///     .collect();
/// assert_eq!(out, vec![1.0, 0.5, 0.25]);
/// ```
pub struct CompositeFilter {
    /// Tag stamped into every [`BlockId`] this graph issues.
    tag: u32,
    blocks: Vec<Block>,
    /// External input adapters: virtual producers with no upstream block.
    sources: Vec<OutputPort>,
    /// External output adapters: sinks read by `compute_one_step`.
    sinks: Vec<InputPort>,
    validated: bool,
    unreachable: Vec<BlockId>,
}

impl CompositeFilter {
    /// Creates an empty graph with the given external arity.
    pub fn new(nb_inputs: usize, nb_outputs: usize) -> Self {
        Self {
            tag: NEXT_GRAPH.fetch_add(1, Ordering::Relaxed),
            blocks: Vec::new(),
            sources: (0..nb_inputs).map(|_| OutputPort::new()).collect(),
            sinks: (0..nb_outputs).map(|_| InputPort::new()).collect(),
            validated: false,
            unreachable: Vec::new(),
        }
    }

    /// Adds a filter as a new block and returns its handle.
    ///
    /// The graph takes ownership of the filter, so the same instance can never
    /// be added twice.
    pub fn add_block<F: Filter + 'static>(&mut self, filter: F) -> BlockId {
        self.add_boxed_block(Box::new(filter))
    }

    /// Adds an already boxed filter as a new block and returns its handle.
    pub fn add_boxed_block(&mut self, filter: Box<dyn Filter>) -> BlockId {
        let index = self.blocks.len();
        self.blocks.push(Block::new(filter));
        self.validated = false;
        let id = self.block_id(index);
        #[cfg(feature = "tracing")]
        {
            let block = &self.blocks[index];
            tracing::debug!(
                "composite_add: block {id} ({:?}, {} in, {} out)",
                block.kind(),
                block.inputs.len(),
                block.outputs.len()
            );
        }
        id
    }

    /// Connects output `output` of block `from` to input `input` of block `to`.
    ///
    /// If that input was already fed by another output it is detached from it
    /// first. Fails with [`FilterError::UnknownBlock`] or
    /// [`FilterError::PortOutOfRange`] without changing the graph.
    pub fn connect_block_to_block(
        &mut self,
        from: BlockId,
        output: usize,
        to: BlockId,
        input: usize,
    ) -> Result<(), FilterError> {
        let source = self.block_output(from, output)?;
        let target = self.block_input(to, input)?;
        self.link(source, target);
        self.validated = false;
        #[cfg(feature = "tracing")]
        tracing::debug!("composite_connect: block {from}:{output} → block {to}:{input}");
        Ok(())
    }

    /// Connects output `output` of block `from` to the graph's external output
    /// `external`.
    pub fn connect_block_to_output(
        &mut self,
        from: BlockId,
        output: usize,
        external: usize,
    ) -> Result<(), FilterError> {
        let source = self.block_output(from, output)?;
        if external >= self.sinks.len() {
            return Err(FilterError::PortOutOfRange {
                side: PortSide::Output,
                index: external,
                count: self.sinks.len(),
            });
        }
        self.link(source, InputRef::External(external));
        self.validated = false;
        #[cfg(feature = "tracing")]
        tracing::debug!("composite_connect: block {from}:{output} → output {external}");
        Ok(())
    }

    /// Connects the graph's external input `external` to input `input` of block
    /// `to`.
    ///
    /// External inputs have no upstream block, so this cannot close a loop and
    /// a previous successful check stays valid.
    pub fn connect_input_to_block(
        &mut self,
        external: usize,
        to: BlockId,
        input: usize,
    ) -> Result<(), FilterError> {
        if external >= self.sources.len() {
            return Err(FilterError::PortOutOfRange {
                side: PortSide::Input,
                index: external,
                count: self.sources.len(),
            });
        }
        let target = self.block_input(to, input)?;
        self.link(OutputRef::External(external), target);
        // The previous producer may have lost its last path to an output.
        if self.validated {
            self.refresh_reachability();
        }
        #[cfg(feature = "tracing")]
        tracing::debug!("composite_connect: input {external} → block {to}:{input}");
        Ok(())
    }

    /// Number of blocks added so far.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Handles of every block, in insertion order.
    pub fn block_ids(&self) -> impl Iterator<Item = BlockId> + '_ {
        (0..self.blocks.len()).map(|index| self.block_id(index))
    }

    /// Returns the filter wrapped by block `id`.
    pub fn filter(&self, id: BlockId) -> Result<&dyn Filter, FilterError> {
        let index = self.resolve(id)?;
        Ok(self.blocks[index].filter.as_ref())
    }

    /// Returns the filter wrapped by block `id` mutably.
    ///
    /// Port counts are fixed for a filter's lifetime, so the graph's wiring
    /// cannot be invalidated through this reference.
    pub fn filter_mut(&mut self, id: BlockId) -> Result<&mut dyn Filter, FilterError> {
        let index = self.resolve(id)?;
        Ok(self.blocks[index].filter.as_mut())
    }

    /// `true` if the graph passed [`Filter::check`] and has not been
    /// structurally modified since.
    pub fn is_validated(&self) -> bool {
        self.validated
    }

    /// Blocks no external output reaches, as found by the last successful
    /// check and kept current by [`connect_input_to_block`](Self::connect_input_to_block).
    /// They are never computed and nothing is queued on their inputs.
    pub fn unreachable_blocks(&self) -> &[BlockId] {
        &self.unreachable
    }

    // --- handles ---

    #[allow(clippy::cast_possible_truncation)]
    fn block_id(&self, index: usize) -> BlockId {
        BlockId::new(self.tag, index as u32)
    }

    fn resolve(&self, id: BlockId) -> Result<usize, FilterError> {
        let index = id.index() as usize;
        if id.graph != self.tag || index >= self.blocks.len() {
            return Err(FilterError::UnknownBlock(id));
        }
        Ok(index)
    }

    fn block_output(&self, id: BlockId, port: usize) -> Result<OutputRef, FilterError> {
        let block = self.resolve(id)?;
        let count = self.blocks[block].outputs.len();
        if port >= count {
            return Err(FilterError::PortOutOfRange {
                side: PortSide::Output,
                index: port,
                count,
            });
        }
        Ok(OutputRef::Block { block, port })
    }

    fn block_input(&self, id: BlockId, port: usize) -> Result<InputRef, FilterError> {
        let block = self.resolve(id)?;
        let count = self.blocks[block].inputs.len();
        if port >= count {
            return Err(FilterError::PortOutOfRange {
                side: PortSide::Input,
                index: port,
                count,
            });
        }
        Ok(InputRef::Block { block, port })
    }

    // Port lookups below take handles that were range-checked when the
    // connection was made; arena entries are never removed.

    fn input_port(&self, input: InputRef) -> &InputPort {
        match input {
            InputRef::Block { block, port } => &self.blocks[block].inputs[port],
            InputRef::External(i) => &self.sinks[i],
        }
    }

    fn input_port_mut(&mut self, input: InputRef) -> &mut InputPort {
        match input {
            InputRef::Block { block, port } => &mut self.blocks[block].inputs[port],
            InputRef::External(i) => &mut self.sinks[i],
        }
    }

    fn output_port(&self, output: OutputRef) -> &OutputPort {
        match output {
            OutputRef::Block { block, port } => &self.blocks[block].outputs[port],
            OutputRef::External(i) => &self.sources[i],
        }
    }

    fn output_port_mut(&mut self, output: OutputRef) -> &mut OutputPort {
        match output {
            OutputRef::Block { block, port } => &mut self.blocks[block].outputs[port],
            OutputRef::External(i) => &mut self.sources[i],
        }
    }

    /// Makes `source` the only producer of `target`.
    fn link(&mut self, source: OutputRef, target: InputRef) {
        if let Some(previous) = self.input_port_mut(target).source.replace(source) {
            self.output_port_mut(previous).detach(target);
        }
        self.output_port_mut(source).attach(target);
    }

    // --- validation ---

    fn validate(&mut self) -> Result<(), FilterError> {
        if self.validated {
            return Ok(());
        }

        for block in &mut self.blocks {
            block.visit = Visit::Unvisited;
        }

        let mut deferred = Vec::new();
        for external in 0..self.sinks.len() {
            self.check_from(InputRef::External(external), &mut deferred)?;
        }
        while let Some(delay) = deferred.pop() {
            for port in 0..self.blocks[delay].inputs.len() {
                self.check_from(InputRef::Block { block: delay, port }, &mut deferred)?;
            }
        }

        self.validated = true;
        self.collect_unreachable();
        Ok(())
    }

    /// Block producing `input`, or `None` when it is fed by an external input.
    fn producer(&self, input: InputRef) -> Result<Option<usize>, FilterError> {
        self.input_port(input)
            .source
            .map(OutputRef::owner)
            .ok_or_else(|| FilterError::UnconnectedPort(input.to_string()))
    }

    /// Depth-first search upstream of `root`. Each frame is a block on the
    /// current delay-free path and the next input port to examine.
    fn check_from(
        &mut self,
        root: InputRef,
        deferred: &mut Vec<usize>,
    ) -> Result<(), FilterError> {
        let mut path: Vec<(usize, usize)> = Vec::new();
        if let Some(block) = self.producer(root)? {
            self.enter(block, &mut path, deferred)?;
        }

        while let Some(&(index, port)) = path.last() {
            if port == self.blocks[index].inputs.len() {
                self.blocks[index].visit = Visit::Done;
                path.pop();
                continue;
            }
            let top = path.len() - 1;
            path[top].1 += 1;
            if let Some(block) = self.producer(InputRef::Block { block: index, port })? {
                self.enter(block, &mut path, deferred)?;
            }
        }
        Ok(())
    }

    fn enter(
        &mut self,
        index: usize,
        path: &mut Vec<(usize, usize)>,
        deferred: &mut Vec<usize>,
    ) -> Result<(), FilterError> {
        match self.blocks[index].visit {
            Visit::OnPath => return Err(FilterError::CycleWithoutDelay(self.block_id(index))),
            Visit::Done => return Ok(()),
            Visit::Unvisited => {}
        }

        let block = &mut self.blocks[index];
        match block.kind() {
            FilterKind::Delay => {
                block.visit = Visit::Done;
                deferred.push(index);
                return Ok(());
            }
            FilterKind::Composite => block.filter.check()?,
            FilterKind::Leaf => {}
        }

        block.visit = Visit::OnPath;
        path.push((index, 0));
        Ok(())
    }

    /// Recomputes which blocks an external output reaches, without checking
    /// for loops. Used after wiring that cannot make a valid graph invalid.
    fn refresh_reachability(&mut self) {
        for block in &mut self.blocks {
            block.visit = Visit::Unvisited;
        }

        let mut pending: Vec<usize> = self
            .sinks
            .iter()
            .filter_map(|sink| sink.source.and_then(OutputRef::owner))
            .collect();
        while let Some(index) = pending.pop() {
            let block = &mut self.blocks[index];
            if block.visit == Visit::Done {
                continue;
            }
            block.visit = Visit::Done;
            pending.extend(
                block
                    .inputs
                    .iter()
                    .filter_map(|input| input.source.and_then(OutputRef::owner)),
            );
        }
        self.collect_unreachable();
    }

    /// Lists the blocks left unvisited and drops whatever is queued on their
    /// inputs. They receive nothing until a later check reaches them.
    fn collect_unreachable(&mut self) {
        let mut unreachable = Vec::new();
        for index in 0..self.blocks.len() {
            let block = &mut self.blocks[index];
            if block.visit == Visit::Unvisited {
                for input in &mut block.inputs {
                    input.reset();
                }
                unreachable.push(self.block_id(index));
            }
        }
        #[cfg(feature = "tracing")]
        for id in &unreachable {
            tracing::warn!("composite_check: block {id} is not reachable from any output");
        }
        self.unreachable = unreachable;
    }

    // --- evaluation ---

    /// Pops the next value for `input`, computing its producer if needed.
    fn pull(&mut self, input: InputRef) -> Result<f64, FilterError> {
        if let Some(value) = self.input_port_mut(input).queue.pop() {
            return Ok(value);
        }

        let source = self
            .input_port(input)
            .source
            .ok_or_else(|| FilterError::UnconnectedPort(input.to_string()))?;
        match source {
            OutputRef::External(external) => Err(FilterError::InternalInvariant(format!(
                "{input} read input {external} twice in one step"
            ))),
            OutputRef::Block { block, .. } => {
                self.compute_block(block)?;
                self.input_port_mut(input).queue.pop().ok_or_else(|| starved(input))
            }
        }
    }

    /// Runs one step of block `root`, first computing every upstream block
    /// whose value it is missing.
    ///
    /// Pending blocks live on an explicit stack. A frame whose next input is
    /// empty stays on the stack under a frame for that input's producer.
    fn compute_block(&mut self, root: usize) -> Result<(), FilterError> {
        let mut stack: Vec<Pending> = self.start(root)?.into_iter().collect();

        while let Some(mut frame) = stack.pop() {
            let nb_inputs = self.blocks[frame.block].inputs.len();
            if frame.values.len() == nb_inputs {
                let id = self.block_id(frame.block);
                let output = self.blocks[frame.block]
                    .filter
                    .compute_one_step(&frame.values)
                    .map_err(|e| FilterError::block_step(id, e))?;
                self.emit(frame.block, output)?;
                continue;
            }

            let input = InputRef::Block {
                block: frame.block,
                port: frame.values.len(),
            };
            if let Some(value) = self.input_port_mut(input).queue.pop() {
                frame.values.push(value);
                frame.waiting = false;
                stack.push(frame);
                continue;
            }
            if frame.waiting {
                return Err(starved(input));
            }

            let producer = self.producer(input)?.ok_or_else(|| {
                FilterError::InternalInvariant(format!(
                    "{input} read an external input twice in one step"
                ))
            })?;
            frame.waiting = true;
            stack.push(frame);
            stack.extend(self.start(producer)?);
        }
        Ok(())
    }

    /// Begins computing block `index`.
    ///
    /// A delay with an empty input answers from its history right away and
    /// returns `None`. A fresh delay whose history is drained falls back to a
    /// normal step like any other block.
    fn start(&mut self, index: usize) -> Result<Option<Pending>, FilterError> {
        let block = &mut self.blocks[index];
        if block.kind() == FilterKind::Delay && block.any_input_empty() {
            if let Ok(history) = block.filter.compute_from_history() {
                #[cfg(feature = "tracing")]
                tracing::trace!(
                    "composite_pull: block {} answered from history",
                    self.block_id(index)
                );
                self.emit(index, history)?;
                return Ok(None);
            }
        }
        Ok(Some(Pending {
            block: index,
            values: Vec::with_capacity(self.blocks[index].inputs.len()),
            waiting: false,
        }))
    }

    /// Broadcasts one computed value per output of block `index`.
    fn emit(&mut self, index: usize, output: Vec<f64>) -> Result<(), FilterError> {
        let nb_outputs = self.blocks[index].outputs.len();
        if output.len() != nb_outputs {
            return Err(FilterError::block_step(
                self.block_id(index),
                FilterError::InternalInvariant(format!(
                    "filter produced {} value(s) for {nb_outputs} output(s)",
                    output.len()
                )),
            ));
        }
        for (port, value) in output.into_iter().enumerate() {
            self.broadcast(OutputRef::Block { block: index, port }, value);
        }
        Ok(())
    }

    /// Pushes `value` into every input fed by `source`, skipping blocks no
    /// external output reaches.
    fn broadcast(&mut self, source: OutputRef, value: f64) {
        for k in 0..self.output_port(source).targets.len() {
            let target = self.output_port(source).targets[k];
            if self.is_live(target) {
                self.input_port_mut(target).queue.push(value);
            }
        }
    }

    /// `true` if `input` belongs to an external output or to a block the last
    /// reachability pass marked done.
    fn is_live(&self, input: InputRef) -> bool {
        match input {
            InputRef::Block { block, .. } => self.blocks[block].visit == Visit::Done,
            InputRef::External(_) => true,
        }
    }
}

/// A block waiting for its input values during evaluation.
struct Pending {
    block: usize,
    /// Values gathered so far, one per input port in order.
    values: Vec<f64>,
    /// Set once the producer of the next input has been run for it.
    waiting: bool,
}

fn starved(input: InputRef) -> FilterError {
    FilterError::InternalInvariant(format!(
        "{input} is still empty after computing its producer"
    ))
}

impl Default for CompositeFilter {
    /// One input, one output, no blocks.
    fn default() -> Self {
        Self::new(1, 1)
    }
}

impl core::fmt::Debug for CompositeFilter {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CompositeFilter")
            .field("nb_inputs", &self.sources.len())
            .field("nb_outputs", &self.sinks.len())
            .field("blocks", &self.blocks.len())
            .field("validated", &self.validated)
            .finish_non_exhaustive()
    }
}

impl Filter for CompositeFilter {
    fn nb_inputs(&self) -> usize {
        self.sources.len()
    }

    fn nb_outputs(&self) -> usize {
        self.sinks.len()
    }

    /// Resets every block and drops values queued anywhere in the graph.
    /// Wiring and the validation state are kept.
    fn reset(&mut self) {
        for block in &mut self.blocks {
            block.reset();
        }
        for sink in &mut self.sinks {
            sink.reset();
        }
    }

    /// Validates the graph if needed, feeds `input` to the external inputs and
    /// pulls one value from each external output.
    fn compute_one_step(&mut self, input: &[f64]) -> Result<Vec<f64>, FilterError> {
        self.validate()?;
        check_arity("composite", self.sources.len(), input.len())?;

        for (external, &value) in input.iter().enumerate() {
            self.broadcast(OutputRef::External(external), value);
        }
        (0..self.sinks.len())
            .map(|external| self.pull(InputRef::External(external)))
            .collect()
    }

    fn kind(&self) -> FilterKind {
        FilterKind::Composite
    }

    fn check(&mut self) -> Result<(), FilterError> {
        self.validate()
    }
}
